//! Supported interface locales.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// A locale the portal serves. English is the default; Amharic is the
/// primary audience language.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Locale {
    En,
    Am,
}

impl Locale {
    /// Every supported locale, in display order.
    pub const ALL: [Locale; 2] = [Locale::En, Locale::Am];

    /// Lowercase code used in URL paths and catalog lookups.
    pub fn as_str(&self) -> &'static str {
        match self {
            Locale::En => "en",
            Locale::Am => "am",
        }
    }

    /// Value for the `Accept-Language` request header.
    pub fn accept_language(&self) -> &'static str {
        self.as_str()
    }

    /// Short label shown on the locale switcher.
    pub fn label(&self) -> &'static str {
        match self {
            Locale::En => "EN",
            Locale::Am => "AM",
        }
    }

    /// The locale a switcher toggles to.
    pub fn other(&self) -> Locale {
        match self {
            Locale::En => Locale::Am,
            Locale::Am => Locale::En,
        }
    }
}

impl Default for Locale {
    fn default() -> Self {
        Locale::En
    }
}

impl fmt::Display for Locale {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Raised when a path segment or CLI flag names a locale the portal
/// does not serve.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unsupported locale: {0}")]
pub struct UnknownLocale(pub String);

impl FromStr for Locale {
    type Err = UnknownLocale;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Locale::ALL
            .iter()
            .copied()
            .find(|locale| locale.as_str().eq_ignore_ascii_case(s))
            .ok_or_else(|| UnknownLocale(s.to_string()))
    }
}
