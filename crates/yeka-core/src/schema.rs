//! Schema validation for report and complaint payloads.
//!
//! Mirrors the declarative constraints the forms enforce:
//! - Required fields (phone, place, office; description for complaints)
//! - Phone length and pattern
//! - Email format when an address is given
//! - ISO incident dates
//!
//! Every message comes from a caller-supplied catalog, so the rules
//! stay locale-neutral. Validation is synchronous and pure; the same
//! payload always yields the same verdict.

use chrono::NaiveDate;
use lazy_static::lazy_static;
use regex::Regex;
use thiserror::Error;

use crate::model::{ComplaintSubmission, ReportSubmission};

lazy_static! {
    /// Digits with an optional leading plus
    static ref PHONE: Regex = Regex::new(r"^\+?[0-9]+$").unwrap();
    /// Practical address shape; the server revalidates
    static ref EMAIL: Regex = Regex::new(r"^[^@\s]+@[^@\s]+\.[^@\s]+$").unwrap();
}

/// Minimum accepted phone length.
pub const MIN_PHONE_LEN: usize = 10;

/// Incident dates are plain ISO dates.
const DATE_FORMAT: &str = "%Y-%m-%d";

/// Localized messages the validators attach to failing fields.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SchemaMessages {
    pub required: String,
    pub invalid: String,
    pub phone: String,
    pub place: String,
    pub office: String,
    pub complaint_type: String,
}

/// A single failing field with its messages, in rule order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldError {
    pub field: &'static str,
    pub messages: Vec<String>,
}

/// Field-level failures, ordered the way the schema declares fields.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FieldErrors {
    entries: Vec<FieldError>,
}

impl FieldErrors {
    /// Append a message to `field`, keeping first-seen field order.
    pub fn push(&mut self, field: &'static str, message: impl Into<String>) {
        let message = message.into();
        match self.entries.iter_mut().find(|e| e.field == field) {
            Some(entry) => entry.messages.push(message),
            None => self.entries.push(FieldError {
                field,
                messages: vec![message],
            }),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Number of failing fields.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Messages for one field, if it failed.
    pub fn get(&self, field: &str) -> Option<&[String]> {
        self.entries
            .iter()
            .find(|e| e.field == field)
            .map(|e| e.messages.as_slice())
    }

    pub fn iter(&self) -> impl Iterator<Item = &FieldError> {
        self.entries.iter()
    }

    /// Every message flattened in field order, for the consolidated toast.
    pub fn flattened(&self) -> Vec<&str> {
        self.entries
            .iter()
            .flat_map(|e| e.messages.iter().map(String::as_str))
            .collect()
    }
}

/// Validation failure carrying every failing field.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Validation failed.")]
pub struct ValidationError {
    pub errors: FieldErrors,
}

/// Validator for the report form, built over a message catalog.
///
/// The report treats description and corruption type as optional;
/// the complaint form requires its description. That asymmetry is
/// deliberate and preserved.
#[derive(Debug, Clone)]
pub struct ReportSchema {
    messages: SchemaMessages,
}

impl ReportSchema {
    pub fn new(messages: SchemaMessages) -> Self {
        Self { messages }
    }

    pub fn validate(&self, payload: &ReportSubmission) -> Result<(), ValidationError> {
        let mut errors = FieldErrors::default();
        check_phone(&payload.phone, &self.messages, &mut errors);
        check_email(payload.email.as_deref(), &self.messages, &mut errors);
        check_date(payload.date.as_deref(), &self.messages, &mut errors);
        require("place", &payload.place, &self.messages.place, &mut errors);
        require("office", &payload.office, &self.messages.office, &mut errors);
        finish(errors)
    }
}

/// Validator for the complaint form.
#[derive(Debug, Clone)]
pub struct ComplaintSchema {
    messages: SchemaMessages,
}

impl ComplaintSchema {
    pub fn new(messages: SchemaMessages) -> Self {
        Self { messages }
    }

    pub fn validate(&self, payload: &ComplaintSubmission) -> Result<(), ValidationError> {
        let mut errors = FieldErrors::default();
        check_phone(&payload.phone, &self.messages, &mut errors);
        check_email(payload.email.as_deref(), &self.messages, &mut errors);
        check_date(payload.date.as_deref(), &self.messages, &mut errors);
        require("place", &payload.place, &self.messages.place, &mut errors);
        require("office", &payload.office, &self.messages.office, &mut errors);
        require(
            "description",
            &payload.description,
            &self.messages.required,
            &mut errors,
        );
        finish(errors)
    }
}

fn finish(errors: FieldErrors) -> Result<(), ValidationError> {
    if errors.is_empty() {
        Ok(())
    } else {
        Err(ValidationError { errors })
    }
}

fn require(field: &'static str, value: &str, message: &str, errors: &mut FieldErrors) {
    if value.is_empty() {
        errors.push(field, message);
    }
}

/// Length and pattern are independent checks; a phone can fail both.
fn check_phone(value: &str, messages: &SchemaMessages, errors: &mut FieldErrors) {
    if value.len() < MIN_PHONE_LEN {
        errors.push("phone", &messages.phone);
    }
    if !PHONE.is_match(value) {
        errors.push("phone", &messages.phone);
    }
}

/// Absent or empty email is fine; a non-empty one must parse.
fn check_email(value: Option<&str>, messages: &SchemaMessages, errors: &mut FieldErrors) {
    if let Some(email) = value {
        if !email.is_empty() && !EMAIL.is_match(email) {
            errors.push("email", &messages.invalid);
        }
    }
}

/// Absent or empty date is fine; a non-empty one must be yyyy-mm-dd.
fn check_date(value: Option<&str>, messages: &SchemaMessages, errors: &mut FieldErrors) {
    if let Some(date) = value {
        if !date.is_empty() && NaiveDate::parse_from_str(date, DATE_FORMAT).is_err() {
            errors.push("date", &messages.invalid);
        }
    }
}
