//! Ticket identifiers issued by the reporting API.
use serde::{Deserialize, Serialize};
use std::fmt;

/// Opaque ticket identifier returned after a successful submission.
///
/// The value is issued by the server (ex: "YK-2024-0001") and is
/// never reinterpreted client-side; it is displayed, copied, and
/// used verbatim in the status-check path.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TicketNumber(String);

impl TicketNumber {
    pub fn new(raw: impl Into<String>) -> Self {
        TicketNumber(raw.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// App-relative status page path for this ticket.
    pub fn status_path(&self) -> String {
        format!("/report/{}", self.0)
    }
}

impl fmt::Display for TicketNumber {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<String> for TicketNumber {
    fn from(raw: String) -> Self {
        TicketNumber(raw)
    }
}

impl From<&str> for TicketNumber {
    fn from(raw: &str) -> Self {
        TicketNumber(raw.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ticket_is_verbatim() {
        let ticket = TicketNumber::new("YK-2024-0001");
        assert_eq!(ticket.as_str(), "YK-2024-0001");
        assert_eq!(format!("{}", ticket), "YK-2024-0001");
    }

    #[test]
    fn test_status_path() {
        let ticket = TicketNumber::new("YK-2024-0001");
        assert_eq!(ticket.status_path(), "/report/YK-2024-0001");
    }
}
