//! Multipart form-data assembly for submission payloads.
//!
//! Bodies are encoded up front so the upload layer knows the exact
//! byte total before the first chunk leaves; progress percentages
//! need that total. String fields become simple text parts; every
//! evidence file becomes its own part under the shared `evidences`
//! field name, keeping the original filename and content type.

use uuid::Uuid;

use crate::model::{ComplaintSubmission, EvidenceFile, ReportSubmission};

/// Field name shared by every attached evidence part.
pub const EVIDENCES_FIELD: &str = "evidences";

/// One part of a multipart body.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Part {
    Text {
        name: String,
        value: String,
    },
    File {
        name: String,
        file_name: String,
        content_type: String,
        bytes: Vec<u8>,
    },
}

impl Part {
    pub fn name(&self) -> &str {
        match self {
            Part::Text { name, .. } => name,
            Part::File { name, .. } => name,
        }
    }
}

/// An owned multipart/form-data body with a fresh boundary.
#[derive(Debug, Clone)]
pub struct MultipartBody {
    boundary: String,
    parts: Vec<Part>,
}

impl MultipartBody {
    pub fn new() -> Self {
        Self {
            boundary: format!("yeka-{}", Uuid::new_v4().simple()),
            parts: Vec::new(),
        }
    }

    /// Report bodies carry every field, empty or not, matching what
    /// the report form sends.
    pub fn from_report(payload: &ReportSubmission) -> Self {
        let mut body = Self::new();
        body.append_text("name", payload.name.clone().unwrap_or_default());
        body.append_text("phone", payload.phone.clone());
        body.append_text("email", payload.email.clone().unwrap_or_default());
        body.append_text("address", payload.address.clone().unwrap_or_default());
        body.append_text("date", payload.date.clone().unwrap_or_default());
        body.append_text("place", payload.place.clone());
        body.append_text("office", payload.office.clone());
        body.append_text(
            "corruptionTypeId",
            payload.corruption_type_id.clone().unwrap_or_default(),
        );
        body.append_text("description", payload.description.clone().unwrap_or_default());
        for file in &payload.evidences {
            body.append_file(file);
        }
        body
    }

    /// Complaint bodies skip empty fields entirely.
    pub fn from_complaint(payload: &ComplaintSubmission) -> Self {
        let mut body = Self::new();
        body.append_non_empty("name", payload.name.as_deref());
        body.append_non_empty("phone", Some(&payload.phone));
        body.append_non_empty("email", payload.email.as_deref());
        body.append_non_empty("address", payload.address.as_deref());
        body.append_non_empty("date", payload.date.as_deref());
        body.append_non_empty("place", Some(&payload.place));
        body.append_non_empty("office", Some(&payload.office));
        body.append_non_empty("description", Some(&payload.description));
        body
    }

    pub fn append_text(&mut self, name: impl Into<String>, value: impl Into<String>) {
        self.parts.push(Part::Text {
            name: name.into(),
            value: value.into(),
        });
    }

    pub fn append_file(&mut self, file: &EvidenceFile) {
        self.parts.push(Part::File {
            name: EVIDENCES_FIELD.to_string(),
            file_name: file.file_name.clone(),
            content_type: file.content_type.clone(),
            bytes: file.bytes.clone(),
        });
    }

    fn append_non_empty(&mut self, name: &str, value: Option<&str>) {
        if let Some(value) = value {
            if !value.is_empty() {
                self.append_text(name, value);
            }
        }
    }

    pub fn boundary(&self) -> &str {
        &self.boundary
    }

    /// Value for the request `Content-Type` header.
    pub fn content_type(&self) -> String {
        format!("multipart/form-data; boundary={}", self.boundary)
    }

    pub fn parts(&self) -> &[Part] {
        &self.parts
    }

    /// Parts registered under one field name.
    pub fn parts_named(&self, name: &str) -> Vec<&Part> {
        self.parts.iter().filter(|p| p.name() == name).collect()
    }

    pub fn is_empty(&self) -> bool {
        self.parts.is_empty()
    }

    /// Serialize to the exact bytes that go on the wire.
    pub fn encode(&self) -> Vec<u8> {
        let mut out = Vec::new();
        for part in &self.parts {
            out.extend_from_slice(format!("--{}\r\n", self.boundary).as_bytes());
            match part {
                Part::Text { name, value } => {
                    out.extend_from_slice(
                        format!(
                            "Content-Disposition: form-data; name=\"{}\"\r\n\r\n",
                            escape_disposition(name)
                        )
                        .as_bytes(),
                    );
                    out.extend_from_slice(value.as_bytes());
                }
                Part::File {
                    name,
                    file_name,
                    content_type,
                    bytes,
                } => {
                    out.extend_from_slice(
                        format!(
                            "Content-Disposition: form-data; name=\"{}\"; filename=\"{}\"\r\n",
                            escape_disposition(name),
                            escape_disposition(file_name)
                        )
                        .as_bytes(),
                    );
                    out.extend_from_slice(format!("Content-Type: {}\r\n\r\n", content_type).as_bytes());
                    out.extend_from_slice(bytes);
                }
            }
            out.extend_from_slice(b"\r\n");
        }
        out.extend_from_slice(format!("--{}--\r\n", self.boundary).as_bytes());
        out
    }
}

impl Default for MultipartBody {
    fn default() -> Self {
        Self::new()
    }
}

/// A quote would end the parameter early and a newline would start a
/// new header line, so both travel percent-encoded inside disposition
/// parameters, as the browser form serializer sends them.
fn escape_disposition(value: &str) -> String {
    value
        .replace('"', "%22")
        .replace('\r', "%0D")
        .replace('\n', "%0A")
}
