//! Human-readable text for failed submissions.
//!
//! Server error bodies arrive in several shapes: a bare string, a JSON
//! string literal, or an object carrying `message` or `error`. The
//! resolver walks those shapes in order and falls back to the client
//! error text, then to a generic message, so the toast never renders
//! blank.

use serde_json::Value;

/// Shown when neither the response body nor the transport error
/// yields usable text.
pub const FALLBACK_MESSAGE: &str = "An unknown error occurred.";

type Extractor = fn(&str) -> Option<String>;

const BODY_EXTRACTORS: [Extractor; 3] = [plain_text, object_message, object_error];

/// Best message recoverable from a response body alone.
pub fn from_body(body: &str) -> Option<String> {
    BODY_EXTRACTORS.iter().find_map(|extract| extract(body))
}

/// Resolve a display message from an optional response body and an
/// optional client-side error description.
pub fn resolve(body: Option<&str>, error_message: Option<&str>) -> String {
    if let Some(body) = body {
        if let Some(message) = from_body(body) {
            return message;
        }
    }
    if let Some(message) = error_message.and_then(non_empty) {
        return message;
    }
    FALLBACK_MESSAGE.to_string()
}

/// Bare text bodies pass through; JSON string literals unwrap to their
/// contents; any other JSON falls through to the object extractors.
fn plain_text(body: &str) -> Option<String> {
    match serde_json::from_str::<Value>(body) {
        Ok(Value::String(inner)) => non_empty(&inner),
        Ok(_) => None,
        Err(_) => non_empty(body),
    }
}

fn object_message(body: &str) -> Option<String> {
    string_field(body, "message")
}

fn object_error(body: &str) -> Option<String> {
    string_field(body, "error")
}

fn string_field(body: &str, field: &str) -> Option<String> {
    let value: Value = serde_json::from_str(body).ok()?;
    value
        .get(field)
        .and_then(Value::as_str)
        .and_then(non_empty)
}

fn non_empty(text: &str) -> Option<String> {
    if text.is_empty() {
        None
    } else {
        Some(text.to_string())
    }
}
