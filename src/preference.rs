//! Client-local key-value storage for user preferences.
//!
//! Holds the same kind of data a browser keeps in local storage: a flat map of string keys to
//! string values. Only the language preference is stored.
//!
//! # Path Resolution
//!
//! The preference file location is resolved in this order:
//! 1. An explicit path (from the `preferenceFile` setting)
//! 2. `PORTFOLIO_DATA_DIR` environment variable
//! 3. Platform data directory (`dirs::data_dir()/portfolio`)

use std::collections::HashMap;
use std::fs;
use std::path::{
    Path,
    PathBuf,
};

use serde_json::{
    Map,
    Value,
};
use thiserror::Error;

/// Storage key of the language preference.
pub const LANGUAGE_KEY: &str = "language";

/// Environment variable overriding the preference directory.
pub const ENV_DATA_DIR: &str = "PORTFOLIO_DATA_DIR";

/// Directory name under the platform data directory.
const APP_DIR: &str = "portfolio";

/// File name of the preference file.
const PREFERENCE_FILE: &str = "preferences.json";

/// Errors from writing preferences.
#[derive(Error, Debug)]
pub enum PreferenceError {
    /// The preference file could not be written.
    #[error("Failed to write preferences to {path:?}: {source}")]
    Write {
        /// Preference file path.
        path: PathBuf,
        /// Underlying error.
        #[source]
        source: std::io::Error,
    },

    /// The entries could not be encoded.
    #[error("Failed to serialize preferences: {0}")]
    Serialize(#[from] serde_json::Error),

    /// Neither an explicit path nor a data directory is available.
    #[error("No location available for the preference file")]
    NoLocation,
}

/// Key-value storage that survives restarts.
pub trait PreferenceStore {
    /// Stored value of `key`, if any.
    fn get(&self, key: &str) -> Option<String>;

    /// Store `value` under `key`.
    fn set(&mut self, key: &str, value: &str) -> Result<(), PreferenceError>;
}

/// Volatile store, for tests and sessions that must not touch disk.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    /// Stored values by key.
    entries: HashMap<String, String>,
}

impl MemoryStore {
    /// Empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

impl PreferenceStore for MemoryStore {
    fn get(&self, key: &str) -> Option<String> {
        self.entries.get(key).cloned()
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), PreferenceError> {
        self.entries.insert(key.to_string(), value.to_string());
        Ok(())
    }
}

/// Store backed by a JSON object on disk, rewritten on every change.
#[derive(Debug, Clone)]
pub struct FileStore {
    /// Location of the JSON file.
    path: PathBuf,
    /// Every entry of the file. Values other than strings are kept as-is and never returned.
    entries: Map<String, Value>,
}

impl FileStore {
    /// Open the store at `path`.
    ///
    /// A missing file yields an empty store. An unreadable file, or one that is not a JSON
    /// object, is logged and treated as empty as well; it is replaced on the next write.
    #[must_use]
    pub fn open(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let entries = Self::read_entries(&path);
        Self { path, entries }
    }

    /// Open the store at the default location (see the module docs).
    pub fn open_default(explicit: Option<PathBuf>) -> Result<Self, PreferenceError> {
        let path = explicit.or_else(default_path).ok_or(PreferenceError::NoLocation)?;
        Ok(Self::open(path))
    }

    /// Read the file's entries, or an empty map when it cannot be used.
    fn read_entries(path: &Path) -> Map<String, Value> {
        if !path.exists() {
            tracing::debug!("Preference file not found: {:?}", path);
            return Map::new();
        }

        match fs::read_to_string(path) {
            Ok(content) => serde_json::from_str(&content).unwrap_or_else(|e| {
                tracing::warn!("Ignoring corrupt preference file {:?}: {}", path, e);
                Map::new()
            }),
            Err(e) => {
                tracing::warn!("Failed to read preference file {:?}: {}", path, e);
                Map::new()
            }
        }
    }

    /// Location of the file.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl PreferenceStore for FileStore {
    fn get(&self, key: &str) -> Option<String> {
        self.entries.get(key).and_then(Value::as_str).map(str::to_string)
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), PreferenceError> {
        self.entries.insert(key.to_string(), Value::String(value.to_string()));

        let content = serde_json::to_string_pretty(&self.entries)?;
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)
                .map_err(|source| PreferenceError::Write { path: self.path.clone(), source })?;
        }
        fs::write(&self.path, content)
            .map_err(|source| PreferenceError::Write { path: self.path.clone(), source })?;

        tracing::debug!(key, value, "Preference saved to {:?}", self.path);
        Ok(())
    }
}

/// Default preference file path, from the environment or the platform data directory.
#[must_use]
pub fn default_path() -> Option<PathBuf> {
    let dir = std::env::var_os(ENV_DATA_DIR)
        .filter(|value| !value.is_empty())
        .map(PathBuf::from)
        .or_else(|| dirs::data_dir().map(|dir| dir.join(APP_DIR)))?;
    Some(dir.join(PREFERENCE_FILE))
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use googletest::prelude::*;
    use rstest::rstest;
    use tempfile::TempDir;

    use super::*;

    #[rstest]
    fn memory_store_round_trip() {
        let mut store = MemoryStore::new();

        assert_that!(store.get(LANGUAGE_KEY), none());
        store.set(LANGUAGE_KEY, "en").unwrap();
        assert_that!(store.get(LANGUAGE_KEY), some(eq("en")));
    }

    #[rstest]
    fn file_store_missing_file_is_empty() {
        let temp_dir = TempDir::new().unwrap();

        let store = FileStore::open(temp_dir.path().join("preferences.json"));

        assert_that!(store.get(LANGUAGE_KEY), none());
    }

    #[rstest]
    fn file_store_persists_across_reopen() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("nested").join("preferences.json");

        let mut store = FileStore::open(&path);
        store.set(LANGUAGE_KEY, "en").unwrap();

        let reopened = FileStore::open(&path);
        assert_that!(reopened.get(LANGUAGE_KEY), some(eq("en")));
    }

    #[rstest]
    fn file_store_ignores_corrupt_file() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("preferences.json");
        fs::write(&path, "not json").unwrap();

        let mut store = FileStore::open(&path);
        assert_that!(store.get(LANGUAGE_KEY), none());

        store.set(LANGUAGE_KEY, "fr").unwrap();
        let content = fs::read_to_string(&path).unwrap();
        assert_that!(content, contains_substring("\"language\": \"fr\""));
    }

    #[rstest]
    fn file_store_keeps_entries_of_other_types() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("preferences.json");
        fs::write(&path, r#"{"language": "en", "visits": 3, "theme": null}"#).unwrap();

        let mut store = FileStore::open(&path);
        assert_that!(store.get(LANGUAGE_KEY), some(eq("en")));
        assert_that!(store.get("visits"), none());

        store.set(LANGUAGE_KEY, "fr").unwrap();
        let saved: Value = serde_json::from_str(&fs::read_to_string(&path).unwrap()).unwrap();
        assert_eq!(saved, serde_json::json!({ "language": "fr", "visits": 3, "theme": null }));
    }

    #[rstest]
    fn open_default_prefers_explicit_path() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("custom.json");

        let store = FileStore::open_default(Some(path.clone())).unwrap();

        assert_eq!(store.path(), path.as_path());
    }
}
