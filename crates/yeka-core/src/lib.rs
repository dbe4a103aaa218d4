//! Yeka Core: submission payloads, validation, and wire encoding
//!
//! Shared building blocks for the Yeka corruption-report pipeline:
//! payload and lookup types, catalog-driven schema validators,
//! multipart body assembly, and failure-text recovery.

pub mod error_text;
pub mod model;
pub mod multipart;
pub mod schema;
pub mod ticket;

pub use model::{
    ComplaintSubmission, CorruptionType, EvidenceFile, FetchPage, PlaceType, ReportSubmission,
    SubmissionResult,
};
pub use multipart::{MultipartBody, Part, EVIDENCES_FIELD};
pub use schema::{
    ComplaintSchema, FieldError, FieldErrors, ReportSchema, SchemaMessages, ValidationError,
};
pub use ticket::TicketNumber;

/// Version advertised by the HTTP client
pub const YEKA_VERSION: &str = "1.0.0";
