//! Active language selection.
//!
//! The first render always uses the default language. Stored preferences become readable once
//! the page has been activated; activation then applies a valid stored language, which costs at
//! most one extra render. From then on every change is written back to the store.

use crate::input::catalog::Catalog;
use crate::language::Language;
use crate::preference::{
    LANGUAGE_KEY,
    PreferenceStore,
};
use crate::resolver::Translator;

/// The active language and whether stored preferences have been applied.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LanguageSelection {
    /// Language texts are currently shown in
    current: Language,
    /// Whether `activate` has run
    activated: bool,
}

impl Default for LanguageSelection {
    fn default() -> Self {
        Self::new(Language::DEFAULT)
    }
}

impl LanguageSelection {
    /// Selection showing `default` until activation.
    #[must_use]
    pub const fn new(default: Language) -> Self {
        Self { current: default, activated: false }
    }

    /// Language texts are currently shown in.
    #[must_use]
    pub const fn current(&self) -> Language {
        self.current
    }

    /// Whether stored preferences are readable yet.
    #[must_use]
    pub const fn is_activated(&self) -> bool {
        self.activated
    }

    /// Complete activation and apply the stored preference, if it names a supported language.
    ///
    /// Returns `true` when the current language changed and views need to be rebuilt.
    /// Only the first call has any effect.
    pub fn activate(&mut self, store: &dyn PreferenceStore) -> bool {
        if self.activated {
            return false;
        }
        self.activated = true;

        let Some(stored) = store.get(LANGUAGE_KEY) else {
            return false;
        };
        let Ok(language) = stored.parse::<Language>() else {
            tracing::debug!("Ignoring unsupported stored language: {:?}", stored);
            return false;
        };

        let changed = language != self.current;
        self.current = language;
        changed
    }

    /// Switch language on user request.
    ///
    /// The new language takes effect immediately. It is written to `store` only after
    /// activation; a failed write is logged and the in-memory change is kept.
    pub fn set_language(&mut self, language: Language, store: &mut dyn PreferenceStore) {
        self.current = language;

        if !self.activated {
            return;
        }
        if let Err(e) = store.set(LANGUAGE_KEY, language.code()) {
            tracing::warn!("Failed to persist language preference: {}", e);
        }
    }

    /// Translator for the current language.
    #[must_use]
    pub const fn translator<'a>(&self, catalog: &'a Catalog) -> Translator<'a> {
        Translator::new(catalog, self.current)
    }
}
