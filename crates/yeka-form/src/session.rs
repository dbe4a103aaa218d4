//! Form session state.
//!
//! A [`FormSession`] holds what the report or complaint form holds:
//! field values, the subcity/woreda selector, staged evidence, and
//! the corruption type options as they load. Payload builders turn
//! the session into the wire types.

use std::sync::Arc;

use chrono::NaiveDate;
use uuid::Uuid;

use yeka_core::{
    ComplaintSubmission, CorruptionType, EvidenceFile, PlaceType, ReportSubmission,
    SchemaMessages,
};
use yeka_i18n::places::{place_options, PlaceOption};
use yeka_i18n::{catalog, Locale, MessageCatalog};

use crate::evidence::{EvidenceSet, PreviewStore};
use crate::submit::SubmissionPayload;

/// Which of the two forms this session drives.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormKind {
    Report,
    Complaint,
}

/// Corruption type options as the lookup progresses.
#[derive(Debug, Clone)]
pub enum TypeOptions {
    Loading,
    Ready(Arc<Vec<CorruptionType>>),
    Failed(String),
}

/// What the type selector should show right now.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TypeSelect {
    pub enabled: bool,
    pub placeholder: Option<String>,
    /// `(value, label)` pairs for the dropdown.
    pub items: Vec<(String, String)>,
}

/// Live state of one form.
pub struct FormSession {
    id: Uuid,
    kind: FormKind,
    locale: Locale,
    pub name: String,
    pub phone: String,
    pub email: String,
    pub address: String,
    pub place: String,
    pub office: String,
    pub corruption_type_id: String,
    pub description: String,
    date: Option<NaiveDate>,
    place_type: PlaceType,
    evidence: EvidenceSet,
    types: TypeOptions,
}

impl FormSession {
    fn new(kind: FormKind, locale: Locale) -> Self {
        Self {
            id: Uuid::new_v4(),
            kind,
            locale,
            name: String::new(),
            phone: String::new(),
            email: String::new(),
            address: String::new(),
            place: String::new(),
            office: String::new(),
            corruption_type_id: String::new(),
            description: String::new(),
            date: None,
            place_type: PlaceType::default(),
            evidence: EvidenceSet::new(),
            types: TypeOptions::Loading,
        }
    }

    pub fn report(locale: Locale) -> Self {
        Self::new(FormKind::Report, locale)
    }

    pub fn complaint(locale: Locale) -> Self {
        Self::new(FormKind::Complaint, locale)
    }

    pub fn with_preview_store(mut self, store: PreviewStore) -> Self {
        self.evidence = EvidenceSet::with_store(store);
        self
    }

    /// Stable identifier for the life of this session, kept across
    /// [`FormSession::reset`].
    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn kind(&self) -> FormKind {
        self.kind
    }

    pub fn locale(&self) -> Locale {
        self.locale
    }

    pub fn catalog(&self) -> &'static MessageCatalog {
        catalog(self.locale)
    }

    pub fn schema_messages(&self) -> SchemaMessages {
        self.catalog().schema_messages()
    }

    pub fn place_type(&self) -> PlaceType {
        self.place_type
    }

    /// Switch between the subcity and woreda selectors. The picked
    /// code carries over; the validator decides if it still fits.
    pub fn set_place_type(&mut self, place_type: PlaceType) {
        self.place_type = place_type;
    }

    pub fn place_options(&self) -> Vec<PlaceOption> {
        place_options(self.place_type, self.locale)
    }

    pub fn date(&self) -> Option<NaiveDate> {
        self.date
    }

    pub fn pick_date(&mut self, date: NaiveDate) {
        self.date = Some(date);
    }

    pub fn add_evidence(&mut self, files: Vec<EvidenceFile>) {
        self.evidence.add_files(files);
    }

    pub fn remove_evidence(&mut self, index: usize) -> bool {
        self.evidence.remove(index)
    }

    pub fn evidence(&self) -> &EvidenceSet {
        &self.evidence
    }

    pub fn set_types(&mut self, types: TypeOptions) {
        self.types = types;
    }

    pub fn types(&self) -> &TypeOptions {
        &self.types
    }

    /// Current rendering of the corruption type selector.
    pub fn type_select(&self) -> TypeSelect {
        let messages = self.catalog();
        match &self.types {
            TypeOptions::Loading => TypeSelect {
                enabled: false,
                placeholder: Some(messages.text("lookup.loading").to_string()),
                items: Vec::new(),
            },
            TypeOptions::Failed(_) => TypeSelect {
                enabled: false,
                placeholder: Some(messages.text("lookup.error").to_string()),
                items: Vec::new(),
            },
            TypeOptions::Ready(types) => TypeSelect {
                enabled: true,
                placeholder: None,
                items: types
                    .iter()
                    .map(|t| (t.id.to_string(), t.name.clone()))
                    .collect(),
            },
        }
    }

    /// The payload this session's form submits.
    pub fn payload(&self) -> SubmissionPayload {
        match self.kind {
            FormKind::Report => SubmissionPayload::Report(self.report_payload()),
            FormKind::Complaint => SubmissionPayload::Complaint(self.complaint_payload()),
        }
    }

    pub fn report_payload(&self) -> ReportSubmission {
        ReportSubmission {
            name: optional(&self.name),
            phone: self.phone.clone(),
            email: optional(&self.email),
            address: optional(&self.address),
            date: self.date.map(|d| d.format("%Y-%m-%d").to_string()),
            place: self.place.clone(),
            place_type: self.place_type,
            office: self.office.clone(),
            corruption_type_id: optional(&self.corruption_type_id),
            description: optional(&self.description),
            evidences: self.evidence.files(),
        }
    }

    pub fn complaint_payload(&self) -> ComplaintSubmission {
        ComplaintSubmission {
            name: optional(&self.name),
            phone: self.phone.clone(),
            email: optional(&self.email),
            address: optional(&self.address),
            date: self.date.map(|d| d.format("%Y-%m-%d").to_string()),
            place: self.place.clone(),
            place_type: self.place_type,
            office: self.office.clone(),
            description: self.description.clone(),
        }
    }

    /// Clear every field and staged file. The place selector and the
    /// loaded type options stay, so the reopened form is ready.
    pub fn reset(&mut self) {
        self.name.clear();
        self.phone.clear();
        self.email.clear();
        self.address.clear();
        self.place.clear();
        self.office.clear();
        self.corruption_type_id.clear();
        self.description.clear();
        self.date = None;
        self.evidence.clear();
    }
}

fn optional(value: &str) -> Option<String> {
    if value.is_empty() {
        None
    } else {
        Some(value.to_string())
    }
}
