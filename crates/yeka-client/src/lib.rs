//! Yeka Client: typed HTTP access to the submission API.
//!
//! Wraps `reqwest` with the portal's conventions: a fixed base URL
//! and timeout, session cookies, typed endpoint resources, upload
//! progress callbacks, and a TTL cache for lookup data.

pub mod api;
pub mod config;
pub mod error;
pub mod gateway;
pub mod lookup;
pub mod progress;

pub use api::{ApiClient, RequestOptions, Resource, COMPLAINTS_ENDPOINT, REPORTS_ENDPOINT};
pub use config::ClientConfig;
pub use error::{ApiError, ApiResult};
pub use gateway::{HttpSubmissionGateway, SubmissionGateway};
pub use lookup::{CorruptionTypeLookup, HttpTypeSource, TypeSource, CORRUPTION_TYPES_ENDPOINT};
pub use progress::{percent, tracked_body, ProgressFn};
