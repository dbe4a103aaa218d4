//! Yeka Form: session state, evidence staging, and the submission
//! flow.
//!
//! The pieces compose the way the forms do: a [`FormSession`] holds
//! field values and staged evidence, a [`Submitter`] validates and
//! uploads one submission at a time, and a [`TicketDialog`] shows
//! progress and the issued ticket.

pub mod dialog;
pub mod evidence;
pub mod session;
pub mod submit;

pub use dialog::{CloseRequest, DialogView, TicketDialog};
pub use evidence::{content_type_for, EvidenceKind, EvidenceSet, PreviewStore, StagedEvidence};
pub use session::{FormKind, FormSession, TypeOptions, TypeSelect};
pub use submit::{SubmissionPayload, SubmitError, SubmitState, Submitter, Toast};
