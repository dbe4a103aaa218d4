//! Yeka I18n: locales, message catalogs, place options, and route paths.
//!
//! The portal serves English and Amharic. This crate owns everything
//! locale-shaped: the `Locale` type, the embedded message catalogs,
//! the subcity/woreda option lists, and the locale-prefixed route
//! helpers.

pub mod catalog;
pub mod locale;
pub mod places;
pub mod routes;

pub use catalog::{catalog, CatalogError, CatalogFile, MessageCatalog};
pub use locale::{Locale, UnknownLocale};
pub use places::{place_options, subcity_options, woreda_options, PlaceOption, Subcity};
