//! Message catalogs for the portal's two locales.
//!
//! Catalogs ship embedded in the binary as YAML files with flat
//! dotted keys. Each message is registered as a Handlebars template
//! so parameterized strings (such as the woreda option label) render
//! with data.

use std::collections::HashMap;

use handlebars::Handlebars;
use lazy_static::lazy_static;
use serde::Deserialize;
use serde_json::Value;
use thiserror::Error;

use yeka_core::SchemaMessages;

use crate::locale::Locale;

const EN_CATALOG: &str = include_str!("../catalogs/en.yaml");
const AM_CATALOG: &str = include_str!("../catalogs/am.yaml");

/// Top-level catalog file structure.
#[derive(Debug, Clone, Deserialize)]
pub struct CatalogFile {
    pub version: String,
    pub messages: HashMap<String, String>,
}

impl CatalogFile {
    pub fn from_yaml(yaml: &str) -> Result<Self, CatalogError> {
        Ok(serde_yaml::from_str(yaml)?)
    }
}

#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("failed to parse catalog: {0}")]
    Parse(#[from] serde_yaml::Error),
    #[error("unknown message key: {0}")]
    UnknownKey(String),
    #[error("failed to render {key}: {reason}")]
    Render { key: String, reason: String },
}

/// A compiled catalog for one locale.
pub struct MessageCatalog {
    locale: Locale,
    messages: HashMap<String, String>,
    handlebars: Handlebars<'static>,
}

impl MessageCatalog {
    /// Parse YAML content and register every message as a template.
    pub fn load(locale: Locale, yaml: &str) -> Result<Self, CatalogError> {
        let file = CatalogFile::from_yaml(yaml)?;

        let mut handlebars = Handlebars::new();
        handlebars.set_strict_mode(false);
        for (key, message) in &file.messages {
            handlebars
                .register_template_string(key, message)
                .map_err(|e| CatalogError::Render {
                    key: key.clone(),
                    reason: e.to_string(),
                })?;
        }

        Ok(Self {
            locale,
            messages: file.messages,
            handlebars,
        })
    }

    pub fn locale(&self) -> Locale {
        self.locale
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.messages.get(key).map(String::as_str)
    }

    /// Message text for a key. Unknown keys fall back to the key
    /// itself so a missing translation never blanks the interface.
    pub fn text<'a>(&'a self, key: &'a str) -> &'a str {
        self.get(key).unwrap_or(key)
    }

    /// Render a parameterized message with data.
    pub fn render(&self, key: &str, data: &Value) -> Result<String, CatalogError> {
        if !self.messages.contains_key(key) {
            return Err(CatalogError::UnknownKey(key.to_string()));
        }
        self.handlebars
            .render(key, data)
            .map_err(|e| CatalogError::Render {
                key: key.to_string(),
                reason: e.to_string(),
            })
    }

    /// Localized messages for the form validators.
    pub fn schema_messages(&self) -> SchemaMessages {
        SchemaMessages {
            required: self.text("form.error.required").to_string(),
            invalid: self.text("form.error.invalid").to_string(),
            phone: self.text("form.error.phone").to_string(),
            place: self.text("form.error.place").to_string(),
            office: self.text("form.error.office").to_string(),
            complaint_type: self.text("form.error.complaintType").to_string(),
        }
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.messages.keys().map(String::as_str)
    }
}

lazy_static! {
    /// English catalog, compiled from the embedded YAML
    static ref EN: MessageCatalog =
        MessageCatalog::load(Locale::En, EN_CATALOG).expect("embedded English catalog");
    /// Amharic catalog, compiled from the embedded YAML
    static ref AM: MessageCatalog =
        MessageCatalog::load(Locale::Am, AM_CATALOG).expect("embedded Amharic catalog");
}

/// The compiled catalog for a locale.
pub fn catalog(locale: Locale) -> &'static MessageCatalog {
    match locale {
        Locale::En => &EN,
        Locale::Am => &AM,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use std::collections::BTreeSet;

    #[test]
    fn test_both_catalogs_compile() {
        assert_eq!(catalog(Locale::En).locale(), Locale::En);
        assert_eq!(catalog(Locale::Am).locale(), Locale::Am);
    }

    #[test]
    fn test_catalogs_carry_the_same_keys() {
        let en: BTreeSet<&str> = catalog(Locale::En).keys().collect();
        let am: BTreeSet<&str> = catalog(Locale::Am).keys().collect();
        assert_eq!(en, am);
        assert!(!en.is_empty());
    }

    #[test]
    fn test_schema_messages_are_localized() {
        let en = catalog(Locale::En).schema_messages();
        assert_eq!(en.phone, "Phone number is required.");

        let am = catalog(Locale::Am).schema_messages();
        assert_ne!(am.phone, en.phone);
    }

    #[test]
    fn test_woreda_option_renders_with_code() {
        let label = catalog(Locale::En)
            .render("places.woredaOption", &json!({ "code": "05" }))
            .unwrap();
        assert_eq!(label, "Woreda 05");
    }

    #[test]
    fn test_upload_progress_renders_with_percent() {
        let line = catalog(Locale::En)
            .render("dialog.uploading", &json!({ "percent": 42 }))
            .unwrap();
        assert_eq!(line, "Uploading (42%)");
    }

    #[test]
    fn test_unknown_key_falls_back_to_itself() {
        assert_eq!(catalog(Locale::En).text("no.such.key"), "no.such.key");
    }

    #[test]
    fn test_render_unknown_key_errors() {
        let err = catalog(Locale::En)
            .render("no.such.key", &json!({}))
            .unwrap_err();
        assert!(matches!(err, CatalogError::UnknownKey(_)));
    }

    #[test]
    fn test_dialog_labels_exist_in_both_locales() {
        for locale in Locale::ALL {
            let c = catalog(locale);
            for key in [
                "dialog.uploading",
                "dialog.successTitle",
                "dialog.successDescription",
                "dialog.ticketLabel",
                "dialog.copy",
                "dialog.copied",
                "dialog.close",
                "dialog.checkStatus",
            ] {
                assert!(c.get(key).is_some(), "{} missing {}", locale, key);
            }
        }
    }
}
