//! Locale-prefixed route paths.
//!
//! Every portal path carries the locale as its first segment, as in
//! `/en/report/YK-2024-0001`. Switching locale rewrites that segment
//! and keeps the rest of the path intact.

use std::str::FromStr;

use crate::locale::Locale;

/// Rewrite the locale segment of a path, preserving everything after
/// it. Paths without a locale segment come back unchanged.
pub fn switch_locale(path: &str, locale: Locale) -> String {
    if path.is_empty() {
        return String::new();
    }
    let mut segments: Vec<&str> = path.split('/').collect();
    if segments.len() > 1 {
        segments[1] = locale.as_str();
    }
    segments.join("/")
}

/// Prefix a locale-free path with a locale segment.
pub fn localized(locale: Locale, path: &str) -> String {
    if path.starts_with('/') {
        format!("/{}{}", locale.as_str(), path)
    } else {
        format!("/{}/{}", locale.as_str(), path)
    }
}

/// The locale a path is currently served under.
pub fn locale_of(path: &str) -> Option<Locale> {
    path.split('/')
        .nth(1)
        .and_then(|segment| Locale::from_str(segment).ok())
}
