//! Addis Ababa place options for the report and complaint forms.
//!
//! The forms accept either a subcity or a woreda as the incident
//! place. Subcity names are fixed in both locales; woreda labels
//! render from the catalog so the numeral prefix localizes.

use serde_json::json;

use yeka_core::PlaceType;

use crate::catalog::catalog;
use crate::locale::Locale;

/// One of the ten Addis Ababa subcities.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Subcity {
    pub code: &'static str,
    pub en: &'static str,
    pub am: &'static str,
}

impl Subcity {
    pub fn name(&self, locale: Locale) -> &'static str {
        match locale {
            Locale::En => self.en,
            Locale::Am => self.am,
        }
    }
}

/// All subcities, in administrative code order.
pub const SUBCITIES: [Subcity; 10] = [
    Subcity { code: "01", en: "Addis Ketema", am: "አዲስ ከተማ" },
    Subcity { code: "02", en: "Akaki Kality", am: "አቃቂ ቃሊቲ" },
    Subcity { code: "03", en: "Arada", am: "አራዳ" },
    Subcity { code: "04", en: "Bole", am: "ቦሌ" },
    Subcity { code: "05", en: "Gullele", am: "ጉለሌ" },
    Subcity { code: "06", en: "Kolfe Keranio", am: "ኮልፌ ቀራኒዮ" },
    Subcity { code: "07", en: "Lideta", am: "ልደታ" },
    Subcity { code: "08", en: "Nifas Silk Lafto", am: "ንፋስ ስልክ ላፍቶ" },
    // Official spelling is የካ; the ይካ variant seen in older forms is
    // a typo.
    Subcity { code: "09", en: "Yeka", am: "የካ" },
    Subcity { code: "10", en: "Lemi Kura", am: "ለሚ ኩራ" },
];

/// Woredas are numbered 01 through this count.
pub const WOREDA_COUNT: u8 = 13;

/// A selectable place with its submitted value and display label.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlaceOption {
    pub value: String,
    pub label: String,
}

pub fn subcity_options(locale: Locale) -> Vec<PlaceOption> {
    SUBCITIES
        .iter()
        .map(|s| PlaceOption {
            value: s.code.to_string(),
            label: s.name(locale).to_string(),
        })
        .collect()
}

pub fn woreda_options(locale: Locale) -> Vec<PlaceOption> {
    let messages = catalog(locale);
    (1..=WOREDA_COUNT)
        .map(|n| {
            let code = format!("{:02}", n);
            let label = messages
                .render("places.woredaOption", &json!({ "code": code }))
                .unwrap_or_else(|_| format!("{} {}", messages.text("places.woreda"), code));
            PlaceOption { value: code, label }
        })
        .collect()
}

/// Options for whichever selector the form is showing.
pub fn place_options(place_type: PlaceType, locale: Locale) -> Vec<PlaceOption> {
    match place_type {
        PlaceType::Subcity => subcity_options(locale),
        PlaceType::Woreda => woreda_options(locale),
    }
}

/// Label on the subcity/woreda toggle itself.
pub fn place_type_label(place_type: PlaceType, locale: Locale) -> &'static str {
    let messages = catalog(locale);
    match place_type {
        PlaceType::Subcity => messages.text("places.subcity"),
        PlaceType::Woreda => messages.text("places.woreda"),
    }
}

pub fn subcity_name(code: &str, locale: Locale) -> Option<&'static str> {
    SUBCITIES
        .iter()
        .find(|s| s.code == code)
        .map(|s| s.name(locale))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ten_subcities_thirteen_woredas() {
        assert_eq!(subcity_options(Locale::En).len(), 10);
        assert_eq!(woreda_options(Locale::En).len(), 13);
    }

    #[test]
    fn test_woreda_values_are_zero_padded() {
        let options = woreda_options(Locale::En);
        assert_eq!(options[0].value, "01");
        assert_eq!(options[0].label, "Woreda 01");
        assert_eq!(options[12].value, "13");
    }

    #[test]
    fn test_woreda_labels_localize() {
        let am = woreda_options(Locale::Am);
        assert_eq!(am[3].label, "ወረዳ 04");
    }

    #[test]
    fn test_subcity_name_lookup() {
        assert_eq!(subcity_name("09", Locale::En), Some("Yeka"));
        assert_eq!(subcity_name("09", Locale::Am), Some("የካ"));
        assert_eq!(subcity_name("99", Locale::En), None);
    }

    #[test]
    fn test_place_options_follow_the_selector() {
        let subcities = place_options(PlaceType::Subcity, Locale::En);
        assert_eq!(subcities[0].label, "Addis Ketema");

        let woredas = place_options(PlaceType::Woreda, Locale::En);
        assert_eq!(woredas[0].label, "Woreda 01");
    }

    #[test]
    fn test_place_type_labels() {
        assert_eq!(place_type_label(PlaceType::Woreda, Locale::En), "Woreda");
        assert_eq!(place_type_label(PlaceType::Subcity, Locale::Am), "ክፍለ ከተማ");
    }
}
