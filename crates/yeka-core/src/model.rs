//! Data model: submissions, lookup data, and server results.
use serde::{Deserialize, Serialize};

use crate::ticket::TicketNumber;

/// Administrative place unit a submission points at.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PlaceType {
    Subcity,
    Woreda,
}

impl PlaceType {
    pub fn as_str(&self) -> &'static str {
        match self {
            PlaceType::Subcity => "subcity",
            PlaceType::Woreda => "woreda",
        }
    }
}

impl Default for PlaceType {
    /// The form opens on the woreda selector.
    fn default() -> Self {
        PlaceType::Woreda
    }
}

/// One attached evidence file, as it goes on the wire.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EvidenceFile {
    /// Original filename, preserved in the multipart part
    pub file_name: String,
    /// MIME type (ex: "image/png", "application/pdf")
    pub content_type: String,
    /// Raw file bytes
    pub bytes: Vec<u8>,
}

impl EvidenceFile {
    pub fn new(
        file_name: impl Into<String>,
        content_type: impl Into<String>,
        bytes: Vec<u8>,
    ) -> Self {
        Self {
            file_name: file_name.into(),
            content_type: content_type.into(),
            bytes,
        }
    }
}

/// Corruption report payload (report tab).
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReportSubmission {
    /// Reporter name
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// Contact phone, required, digits with an optional leading plus
    pub phone: String,
    /// Contact email
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    /// Reporter address
    #[serde(skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,
    /// Incident date, ISO yyyy-mm-dd
    #[serde(skip_serializing_if = "Option::is_none")]
    pub date: Option<String>,
    /// Place code within the selected place list (ex: "09")
    pub place: String,
    /// Which place list the code belongs to; client-side only
    #[serde(skip)]
    pub place_type: PlaceType,
    /// Office or department the report concerns
    pub office: String,
    /// Taxonomy id from the corruption-type lookup
    #[serde(skip_serializing_if = "Option::is_none")]
    pub corruption_type_id: Option<String>,
    /// What happened
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Attached evidence; sent as repeated multipart parts
    #[serde(skip)]
    pub evidences: Vec<EvidenceFile>,
}

/// Service complaint payload (complaint tab).
///
/// Same shape as a report minus the corruption-type id and evidence
/// attachments; the description is required here.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ComplaintSubmission {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    pub phone: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub date: Option<String>,
    pub place: String,
    #[serde(skip)]
    pub place_type: PlaceType,
    pub office: String,
    pub description: String,
}

/// One entry of the corruption-type taxonomy.
///
/// Read-only reference data owned by the API; the name arrives in
/// the locale requested through `Accept-Language`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CorruptionType {
    pub id: i64,
    pub name: String,
}

/// Server answer to a successful submission.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SubmissionResult {
    /// Opaque ticket identifier; terminal once issued
    pub ticket_number: TicketNumber,
}

/// Paginated list envelope returned by list endpoints.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FetchPage<T> {
    pub size: u64,
    pub page: u64,
    pub total_elements: u64,
    pub total_pages: u64,
    pub results: Vec<T>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_place_type_default() {
        assert_eq!(PlaceType::default(), PlaceType::Woreda);
        assert_eq!(PlaceType::Subcity.as_str(), "subcity");
    }

    #[test]
    fn test_report_serializes_camel_case() {
        let report = ReportSubmission {
            phone: "0911223344".to_string(),
            place: "09".to_string(),
            office: "Revenue desk".to_string(),
            corruption_type_id: Some("3".to_string()),
            ..Default::default()
        };

        let json = serde_json::to_string(&report).unwrap();
        assert!(json.contains("\"corruptionTypeId\":\"3\""));
        // Client-side state never leaks onto the wire
        assert!(!json.contains("placeType"));
        assert!(!json.contains("evidences"));
        // Absent optionals are omitted, not null
        assert!(!json.contains("\"name\""));
    }

    #[test]
    fn test_submission_result_wire_shape() {
        let json = r#"{"ticketNumber":"YK-2024-0001"}"#;
        let result: SubmissionResult = serde_json::from_str(json).unwrap();
        assert_eq!(result.ticket_number.as_str(), "YK-2024-0001");
        assert_eq!(serde_json::to_string(&result).unwrap(), json);
    }

    #[test]
    fn test_fetch_page_deserializes() {
        let json = r#"{
            "size": 20,
            "page": 0,
            "totalElements": 2,
            "totalPages": 1,
            "results": [{"id": 1, "name": "Bribery"}, {"id": 2, "name": "Nepotism"}]
        }"#;

        let page: FetchPage<CorruptionType> = serde_json::from_str(json).unwrap();
        assert_eq!(page.total_elements, 2);
        assert_eq!(page.results[1].name, "Nepotism");
    }
}
