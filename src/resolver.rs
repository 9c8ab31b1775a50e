//! Dotted-key translation lookup against the active language's tree.

use std::borrow::Cow;

use serde::de::DeserializeOwned;
use serde_json::Value;
use thiserror::Error;

use crate::input::catalog::Catalog;
use crate::language::Language;

/// Separator used when none is configured.
pub const DEFAULT_SEPARATOR: &str = ".";

/// Options for a single lookup.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ResolveOptions {
    /// Hand lists and nested objects back as [`Resolution::Structured`].
    pub return_structured: bool,
}

impl ResolveOptions {
    /// Options returning lists and objects as structured values.
    #[must_use]
    pub const fn structured() -> Self {
        Self { return_structured: true }
    }
}

/// Outcome of resolving a key.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Resolution<'a, 'k> {
    /// The stored value, untouched.
    Value(&'a Value),
    /// A list or object, returned because structured output was requested.
    Structured(&'a Value),
    /// The key was not found; carries the original key for display.
    Fallback(&'k str),
}

impl<'a, 'k> Resolution<'a, 'k> {
    /// Whether the key was not found.
    #[must_use]
    pub const fn is_fallback(&self) -> bool {
        matches!(self, Self::Fallback(_))
    }

    /// The resolved value, or `None` on a miss.
    #[must_use]
    pub const fn value(&self) -> Option<&'a Value> {
        match *self {
            Self::Value(value) | Self::Structured(value) => Some(value),
            Self::Fallback(_) => None,
        }
    }

    /// Text to display for this resolution.
    ///
    /// Strings are borrowed as-is, other values are shown as their JSON text and a miss shows
    /// the key itself.
    #[must_use]
    pub fn display<'s>(&self) -> Cow<'s, str>
    where
        'a: 's,
        'k: 's,
    {
        match *self {
            Self::Value(Value::String(text)) | Self::Structured(Value::String(text)) => {
                Cow::Borrowed(text.as_str())
            }
            Self::Value(value) | Self::Structured(value) => Cow::Owned(value.to_string()),
            Self::Fallback(key) => Cow::Borrowed(key),
        }
    }
}

/// Errors from typed lookups.
#[derive(Error, Debug)]
pub enum ResolveError {
    /// The key does not resolve.
    #[error("Translation key not found: {key}")]
    Missing {
        /// Requested key.
        key: String,
    },

    /// The value does not match the requested type.
    #[error("Translation '{key}' does not have the expected shape: {source}")]
    Shape {
        /// Requested key.
        key: String,
        /// Deserialization error.
        #[source]
        source: serde_json::Error,
    },
}

/// Resolves keys for one language.
///
/// Cheap to copy; build a new one whenever the active language changes.
#[derive(Debug, Clone, Copy)]
pub struct Translator<'a> {
    /// Catalog to search.
    catalog: &'a Catalog,
    /// Language whose tree is searched.
    language: Language,
    /// Separator between key segments.
    separator: &'a str,
}

impl<'a> Translator<'a> {
    /// Translator using the default separator.
    #[must_use]
    pub const fn new(catalog: &'a Catalog, language: Language) -> Self {
        Self { catalog, language, separator: DEFAULT_SEPARATOR }
    }

    /// Same translator with another key separator.
    #[must_use]
    pub const fn with_separator(self, separator: &'a str) -> Self {
        Self { separator, ..self }
    }

    /// Language keys are resolved in.
    #[must_use]
    pub const fn language(&self) -> Language {
        self.language
    }

    /// Catalog keys are resolved against.
    #[must_use]
    pub const fn catalog(&self) -> &'a Catalog {
        self.catalog
    }

    /// Resolve `key` by walking the active language's tree one segment at a time.
    ///
    /// Each step requires the current value to be an object containing the segment, or a list
    /// and an in-range index. The first step that fails ends the walk and the key itself is
    /// returned as [`Resolution::Fallback`].
    pub fn resolve<'k>(&self, key: &'k str, options: ResolveOptions) -> Resolution<'a, 'k> {
        let Some(found) = self.lookup(key) else {
            tracing::warn!(key, language = %self.language, "Translation key not found");
            return Resolution::Fallback(key);
        };

        if options.return_structured && (found.is_array() || found.is_object()) {
            Resolution::Structured(found)
        } else {
            Resolution::Value(found)
        }
    }

    /// Walk the active tree; `None` as soon as a segment cannot be followed.
    fn lookup(&self, key: &str) -> Option<&'a Value> {
        let mut current = self.catalog.tree(self.language)?;
        for segment in key.split(self.separator) {
            current = match current {
                Value::Object(map) => map.get(segment)?,
                Value::Array(items) => items.get(list_index(segment)?)?,
                _ => return None,
            };
        }
        Some(current)
    }

    /// Display text for `key`; the key itself when it cannot be resolved.
    #[must_use]
    pub fn t<'s>(&self, key: &'s str) -> Cow<'s, str>
    where
        'a: 's,
    {
        self.resolve(key, ResolveOptions::default()).display()
    }

    /// Resolve `key` and deserialize the structured value into `T`.
    pub fn structured<T: DeserializeOwned>(&self, key: &str) -> Result<T, ResolveError> {
        let value = self
            .resolve(key, ResolveOptions::structured())
            .value()
            .ok_or_else(|| ResolveError::Missing { key: key.to_string() })?;

        T::deserialize(value)
            .map_err(|source| ResolveError::Shape { key: key.to_string(), source })
    }
}

/// Parse a list index written in canonical decimal form: `"0"`, `"1"`, `"12"`.
///
/// Signs and leading zeros (`"+1"`, `"01"`) do not name a member.
fn list_index(segment: &str) -> Option<usize> {
    let canonical = !segment.is_empty()
        && segment.bytes().all(|b| b.is_ascii_digit())
        && (segment == "0" || !segment.starts_with('0'));
    if canonical { segment.parse().ok() } else { None }
}
