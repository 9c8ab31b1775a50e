//! portfolio-i18n
//!
//! Content layer of a bilingual (French/English) résumé site: translation catalogs, key
//! resolution, language selection with a persisted preference, and the contact form.

pub mod cli;
pub mod config;
pub mod contact;
pub mod content;
pub mod input;
pub mod language;
pub mod preference;
pub mod resolver;
pub mod sections;
pub mod selection;

#[cfg(test)]
mod test_utils;

pub use input::catalog::Catalog;
pub use language::Language;
pub use resolver::{
    ResolveOptions,
    Resolution,
    Translator,
};
pub use selection::LanguageSelection;
