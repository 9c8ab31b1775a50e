//! Translation catalog: one nested JSON tree per supported language.

use std::collections::{
    BTreeMap,
    BTreeSet,
    HashMap,
};
use std::path::{
    Path,
    PathBuf,
};

use serde_json::Value;
use thiserror::Error;

use crate::language::Language;

/// French catalog shipped with the binary.
const EMBEDDED_FR: &str = include_str!("../../locales/fr.json");
/// English catalog shipped with the binary.
const EMBEDDED_EN: &str = include_str!("../../locales/en.json");

/// Errors from loading or checking catalogs.
#[derive(Error, Debug)]
pub enum CatalogError {
    /// A file or directory could not be read.
    #[error("Failed to read translation file {path:?}: {source}")]
    Io {
        /// Path being read.
        path: PathBuf,
        /// Underlying error.
        #[source]
        source: std::io::Error,
    },

    /// A catalog is not valid JSON.
    #[error("Failed to parse '{origin}' translations: {source}")]
    Parse {
        /// File path, or the embedded catalog's name.
        origin: String,
        /// Underlying error.
        #[source]
        source: serde_json::Error,
    },

    /// A catalog root is not an object.
    #[error("Translation root for '{language}' must be a JSON object")]
    NotAnObject {
        /// Language of the rejected tree.
        language: Language,
    },

    /// A supported language has no catalog.
    #[error("No translation file found for '{0}'")]
    MissingLanguage(Language),

    /// Some key paths exist in one language only.
    #[error("Translation catalogs are out of sync:\n{}", format_mismatches(.0))]
    KeyMismatch(Vec<KeyMismatch>),
}

/// A key path that one language exposes and another lacks.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeyMismatch {
    /// Full key path.
    pub key: String,
    /// Language that has the key.
    pub present_in: Language,
    /// Language that lacks it.
    pub missing_from: Language,
}

/// Numbered list, one mismatch per line.
fn format_mismatches(mismatches: &[KeyMismatch]) -> String {
    mismatches
        .iter()
        .enumerate()
        .map(|(i, m)| {
            format!("  {}. '{}' exists in {} but not in {}", i + 1, m.key, m.present_in, m.missing_from)
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// Detect the language of a translation file from its path.
///
/// Splits the path on '/' and '.', then searches backwards for a supported code.
///
/// # Examples
/// - `locales/en.json` → `en`
/// - `locales/fr/site.json` → `fr`
/// - `locales/de.json` → `None`
fn language_from_path(file_path: &Path) -> Option<Language> {
    let path_str = file_path.to_string_lossy();
    let parts: Vec<&str> = path_str.split(&['/', '\\', '.']).collect();

    parts.iter().rev().find_map(|part| part.parse().ok())
}

/// Collect every key path of a translation tree.
///
/// Objects are descended into; anything else (strings, numbers, lists of records) is a leaf.
/// Empty objects are reported as paths of their own so that `{}` and a missing branch differ.
///
/// # Examples
/// ```
/// use serde_json::json;
/// use portfolio_i18n::input::catalog::key_paths;
///
/// let tree = json!({
///     "about": { "title": "About me", "text": ["a", "b"] }
/// });
///
/// let paths = key_paths(&tree, ".");
/// assert!(paths.contains("about.title"));
/// assert!(paths.contains("about.text"));
/// assert!(!paths.contains("about"));
/// ```
#[must_use]
pub fn key_paths(tree: &Value, separator: &str) -> BTreeSet<String> {
    let mut result = BTreeSet::new();
    collect_key_paths(tree, separator, None, &mut result);
    result
}

/// Depth-first walk that records leaf paths under `prefix`.
fn collect_key_paths(
    value: &Value,
    separator: &str,
    prefix: Option<&str>,
    result: &mut BTreeSet<String>,
) {
    match value {
        Value::Object(map) if !map.is_empty() => {
            for (key, child) in map {
                let full_key =
                    prefix.map_or_else(|| key.clone(), |p| format!("{p}{separator}{key}"));
                collect_key_paths(child, separator, Some(&full_key), result);
            }
        }
        _ => {
            if let Some(key) = prefix {
                result.insert(key.to_string());
            }
        }
    }
}

/// Checks if `child_key` lies under `parent_key`.
#[must_use]
pub fn is_child_key(child_key: &str, parent_key: &str, separator: &str) -> bool {
    let Some(remainder) = child_key.strip_prefix(parent_key) else {
        return false;
    };

    !remainder.is_empty() && remainder.starts_with(separator)
}

/// The per-language translation trees, loaded once and never modified.
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    /// Root object of each loaded language.
    trees: HashMap<Language, Value>,
}

impl Catalog {
    /// Catalog compiled into the binary from `locales/`.
    pub fn embedded() -> Result<Self, CatalogError> {
        let mut catalog = Self::default();
        for (language, text) in [(Language::Fr, EMBEDDED_FR), (Language::En, EMBEDDED_EN)] {
            catalog.insert_json(language, text, &format!("embedded {language}"))?;
        }
        Ok(catalog)
    }

    /// Build a catalog from already parsed trees.
    ///
    /// Later entries for the same language replace earlier ones.
    pub fn from_trees(
        trees: impl IntoIterator<Item = (Language, Value)>,
    ) -> Result<Self, CatalogError> {
        let mut catalog = Self::default();
        for (language, tree) in trees {
            catalog.insert(language, tree)?;
        }
        Ok(catalog)
    }

    /// Load `*.json` files from a directory, detecting the language from each path.
    ///
    /// Files whose path names no supported language are skipped. Every supported language
    /// must end up with a tree.
    pub fn load_dir(dir: &Path) -> Result<Self, CatalogError> {
        tracing::debug!("Loading translations from: {:?}", dir);

        let entries = std::fs::read_dir(dir)
            .map_err(|source| CatalogError::Io { path: dir.to_path_buf(), source })?;

        let mut catalog = Self::default();
        for entry in entries {
            let path = entry
                .map_err(|source| CatalogError::Io { path: dir.to_path_buf(), source })?
                .path();
            if path.extension().and_then(|ext| ext.to_str()) != Some("json") {
                continue;
            }
            let Some(language) = language_from_path(&path) else {
                tracing::debug!("Skipping translation file without a known language: {:?}", path);
                continue;
            };

            let content = std::fs::read_to_string(&path)
                .map_err(|source| CatalogError::Io { path: path.clone(), source })?;
            catalog.insert_json(language, &content, &path.to_string_lossy())?;
        }

        if let Some(missing) = Language::ALL.into_iter().find(|l| !catalog.trees.contains_key(l)) {
            return Err(CatalogError::MissingLanguage(missing));
        }

        Ok(catalog)
    }

    /// Parse `text` and store it as `language`'s tree.
    fn insert_json(&mut self, language: Language, text: &str, origin: &str) -> Result<(), CatalogError> {
        let tree: Value = serde_json::from_str(text)
            .map_err(|source| CatalogError::Parse { origin: origin.to_string(), source })?;
        self.insert(language, tree)
    }

    /// Store a tree, rejecting roots that are not objects.
    fn insert(&mut self, language: Language, tree: Value) -> Result<(), CatalogError> {
        if !tree.is_object() {
            return Err(CatalogError::NotAnObject { language });
        }
        self.trees.insert(language, tree);
        Ok(())
    }

    /// Root of a language's tree, if one was loaded.
    #[must_use]
    pub fn tree(&self, language: Language) -> Option<&Value> {
        self.trees.get(&language)
    }

    /// Languages with a loaded tree, in switcher order.
    #[must_use]
    pub fn languages(&self) -> Vec<Language> {
        Language::ALL.into_iter().filter(|l| self.trees.contains_key(l)).collect()
    }

    /// Key paths of one language, optionally restricted to those under `prefix`.
    #[must_use]
    pub fn key_paths(
        &self,
        language: Language,
        separator: &str,
        prefix: Option<&str>,
    ) -> BTreeSet<String> {
        let Some(tree) = self.tree(language) else {
            return BTreeSet::new();
        };
        let mut paths = key_paths(tree, separator);
        if let Some(prefix) = prefix {
            paths.retain(|key| key == prefix || is_child_key(key, prefix, separator));
        }
        paths
    }

    /// Every key path exposed by any language but not by all of them.
    #[must_use]
    pub fn mismatches(&self, separator: &str) -> Vec<KeyMismatch> {
        let per_language: BTreeMap<Language, BTreeSet<String>> = self
            .languages()
            .into_iter()
            .map(|language| (language, self.key_paths(language, separator, None)))
            .collect();

        let mut mismatches = Vec::new();
        for (present_in, keys) in &per_language {
            for (missing_from, other_keys) in &per_language {
                if present_in == missing_from {
                    continue;
                }
                mismatches.extend(keys.difference(other_keys).map(|key| KeyMismatch {
                    key: key.clone(),
                    present_in: *present_in,
                    missing_from: *missing_from,
                }));
            }
        }
        mismatches
    }

    /// Verify that every language exposes the same key paths.
    pub fn check_parity(&self, separator: &str) -> Result<(), CatalogError> {
        let mismatches = self.mismatches(separator);
        if mismatches.is_empty() { Ok(()) } else { Err(CatalogError::KeyMismatch(mismatches)) }
    }
}
