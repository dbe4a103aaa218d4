//! Error types for the HTTP client.

use thiserror::Error;

use yeka_core::error_text;

pub type ApiResult<T> = Result<T, ApiError>;

/// Failures surfaced by [`crate::ApiClient`].
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("invalid client configuration: {message}")]
    Config { message: String },

    /// Non-2xx response; the body is kept for message extraction.
    #[error("API request failed: {status}")]
    Status { status: u16, body: String },

    #[error("HTTP error: {0}")]
    Transport(#[from] reqwest::Error),
}

impl ApiError {
    pub fn config(message: impl Into<String>) -> Self {
        ApiError::Config {
            message: message.into(),
        }
    }

    pub fn status(status: u16, body: impl Into<String>) -> Self {
        ApiError::Status {
            status,
            body: body.into(),
        }
    }

    pub fn status_code(&self) -> Option<u16> {
        match self {
            ApiError::Status { status, .. } => Some(*status),
            ApiError::Transport(e) => e.status().map(|s| s.as_u16()),
            ApiError::Config { .. } => None,
        }
    }

    pub fn body(&self) -> Option<&str> {
        match self {
            ApiError::Status { body, .. } => Some(body),
            _ => None,
        }
    }

    pub fn is_timeout(&self) -> bool {
        matches!(self, ApiError::Transport(e) if e.is_timeout())
    }

    /// Text fit for a toast: server-provided message when one exists,
    /// then the client error, then a generic fallback.
    pub fn user_message(&self) -> String {
        match self {
            ApiError::Status { body, .. } => {
                error_text::resolve(Some(body), Some(&self.to_string()))
            }
            other => error_text::resolve(None, Some(&other.to_string())),
        }
    }
}
