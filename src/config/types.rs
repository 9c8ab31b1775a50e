//! Settings file contents and their validation.

use std::path::PathBuf;

use serde::{
    Deserialize,
    Serialize,
};
use thiserror::Error;

use crate::contact::{
    DEFAULT_ENDPOINT,
    parse_endpoint,
};
use crate::language::Language;
use crate::resolver::DEFAULT_SEPARATOR;

/// One problem found in the settings.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("Configuration error in '{field_path}': {message}")]
pub struct ValidationError {
    /// JSON path to the field (e.g., "contact.endpoint")
    pub field_path: String,
    /// What is wrong and how to fix it.
    pub message: String,
}

impl ValidationError {
    /// Error for the field at `field_path`.
    #[must_use]
    pub fn new(field_path: impl Into<String>, message: impl Into<String>) -> Self {
        Self { field_path: field_path.into(), message: message.into() }
    }
}

/// Errors from loading the settings file.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// One or more fields failed validation.
    #[error("Configuration validation failed:\n{}", format_validation_errors(.0))]
    ValidationErrors(Vec<ValidationError>),

    /// The settings file could not be read.
    #[error("Failed to load configuration file: {0}")]
    IoError(#[from] std::io::Error),

    /// The settings file is not valid JSON for these settings.
    #[error("Failed to parse configuration: {0}")]
    ParseError(#[from] serde_json::Error),
}

/// Numbered list, one error per line.
fn format_validation_errors(errors: &[ValidationError]) -> String {
    errors
        .iter()
        .enumerate()
        .map(|(i, err)| format!("  {}. {} - {}", i + 1, err.field_path, err.message))
        .collect::<Vec<_>>()
        .join("\n")
}

/// Contents of `.portfolio.json`.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SiteSettings {
    /// Name shown in the hero and the footer.
    pub owner_name: String,

    /// Language of the first render, before any stored preference is applied.
    pub default_language: Language,

    /// Separator between key segments.
    pub key_separator: String,

    /// Directory of `<code>.json` translation files.
    /// If unset, the catalogs compiled into the binary are used.
    pub locales_dir: Option<PathBuf>,

    /// Where the language preference is stored.
    /// If unset, `PORTFOLIO_DATA_DIR` or the platform data directory is used.
    pub preference_file: Option<PathBuf>,

    /// Treat catalogs with diverging key paths as an error instead of a warning.
    pub strict_catalogs: bool,

    /// Tools named in the footer after its "built with" label.
    pub built_with_tools: Vec<String>,

    /// Contact form and chat link.
    pub contact: ContactConfig,
}

/// Contact section settings.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ContactConfig {
    /// Form relay receiving `{name, email, message}`.
    pub endpoint: String,
    /// WhatsApp chat link. Empty hides the link.
    pub whatsapp_url: String,
}

impl Default for ContactConfig {
    fn default() -> Self {
        Self {
            endpoint: DEFAULT_ENDPOINT.to_string(),
            whatsapp_url: "https://wa.me/212612267326".to_string(),
        }
    }
}

impl SiteSettings {
    /// # Errors
    /// - Required field is empty
    /// - Contact endpoint is not an https URL
    pub fn validate(&self) -> Result<(), Vec<ValidationError>> {
        let mut errors = Vec::new();

        if self.key_separator.is_empty() {
            errors.push(ValidationError::new(
                "keySeparator",
                "The separator cannot be empty. Please specify a separator, for example: \".\" (dot)",
            ));
        }

        if self.owner_name.trim().is_empty() {
            errors.push(ValidationError::new(
                "ownerName",
                "The owner name cannot be empty. It is shown in the hero and the footer",
            ));
        }

        if let Err(e) = parse_endpoint(&self.contact.endpoint) {
            errors.push(ValidationError::new("contact.endpoint", e.to_string()));
        }

        if !self.contact.whatsapp_url.is_empty()
            && !self.contact.whatsapp_url.starts_with("https://")
        {
            errors.push(ValidationError::new(
                "contact.whatsappUrl",
                "The link must start with \"https://\", or be left empty to hide it",
            ));
        }

        if errors.is_empty() { Ok(()) } else { Err(errors) }
    }
}

impl Default for SiteSettings {
    fn default() -> Self {
        Self {
            owner_name: "Mohamed Lotfi".to_string(),
            default_language: Language::DEFAULT,
            key_separator: DEFAULT_SEPARATOR.to_string(),
            locales_dir: None,
            preference_file: None,
            strict_catalogs: false,
            built_with_tools: vec!["ChatGPT".to_string(), "Cursor AI".to_string()],
            contact: ContactConfig::default(),
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::indexing_slicing, clippy::expect_used, clippy::panic)]
mod tests {
    use googletest::prelude::*;
    use rstest::*;

    use super::*;

    #[rstest]
    fn validate_valid_settings() {
        let settings = SiteSettings::default();

        assert_that!(settings.validate(), ok(anything()));
    }

    #[rstest]
    fn deserialize_partial_settings() {
        let json = r#"{"defaultLanguage": "en", "builtWithTools": [], "contact": {"whatsappUrl": ""}}"#;

        let settings: SiteSettings = serde_json::from_str(json).unwrap();

        assert_that!(settings.default_language, eq(Language::En));
        assert_that!(settings.key_separator, eq("."));
        assert_that!(settings.contact.endpoint, eq(DEFAULT_ENDPOINT));
        assert_that!(settings.contact.whatsapp_url, eq(""));
        assert_that!(settings.built_with_tools, is_empty());
    }

    #[rstest]
    fn deserialize_empty_settings() {
        let json = "{}";

        let settings: SiteSettings = serde_json::from_str(json).unwrap();

        assert_that!(settings.owner_name, eq("Mohamed Lotfi"));
        assert_that!(settings.default_language, eq(Language::Fr));
        assert_that!(settings.locales_dir, none());
        assert_that!(settings.preference_file, none());
        assert_that!(settings.strict_catalogs, eq(false));
        assert_that!(settings.built_with_tools, elements_are![eq("ChatGPT"), eq("Cursor AI")]);
    }

    #[rstest]
    fn deserialize_unsupported_language_fails() {
        let json = r#"{"defaultLanguage": "de"}"#;

        let result = serde_json::from_str::<SiteSettings>(json);

        assert!(result.is_err());
    }

    #[rstest]
    fn validate_invalid_key_separator_empty() {
        let settings = SiteSettings { key_separator: String::new(), ..SiteSettings::default() };
        let result = settings.validate();

        assert_that!(
            result,
            err(elements_are![all![
                field!(ValidationError.field_path, eq("keySeparator")),
                field!(ValidationError.message, contains_substring("cannot be empty"))
            ]])
        );
    }

    #[rstest]
    fn validate_invalid_owner_name_blank() {
        let settings = SiteSettings { owner_name: "  ".to_string(), ..SiteSettings::default() };
        let result = settings.validate();

        assert_that!(
            result,
            err(elements_are![all![
                field!(ValidationError.field_path, eq("ownerName")),
                field!(ValidationError.message, contains_substring("cannot be empty"))
            ]])
        );
    }

    #[rstest]
    #[case::plain_http("http://formspree.io/f/abc")]
    #[case::not_a_url("formspree")]
    fn validate_invalid_contact_endpoint(#[case] endpoint: &str) {
        let settings = SiteSettings {
            contact: ContactConfig { endpoint: endpoint.to_string(), ..ContactConfig::default() },
            ..SiteSettings::default()
        };

        let result = settings.validate();

        assert_that!(
            result,
            err(elements_are![all![
                field!(ValidationError.field_path, eq("contact.endpoint")),
                field!(ValidationError.message, contains_substring(endpoint))
            ]])
        );
    }

    #[rstest]
    fn validate_invalid_whatsapp_url() {
        let settings = SiteSettings {
            contact: ContactConfig {
                whatsapp_url: "wa.me/123".to_string(),
                ..ContactConfig::default()
            },
            ..SiteSettings::default()
        };

        let result = settings.validate();

        assert_that!(
            result,
            err(elements_are![field!(ValidationError.field_path, eq("contact.whatsappUrl"))])
        );
    }

    #[rstest]
    fn config_error_validation_errors_format() {
        let settings = SiteSettings {
            key_separator: String::new(),
            owner_name: String::new(),
            ..SiteSettings::default()
        };

        let validation_result = settings.validate();
        let errors = validation_result.unwrap_err();
        let config_error = ConfigError::ValidationErrors(errors);

        let error_message = format!("{config_error}");
        assert_that!(error_message, contains_substring("Configuration validation failed"));
        assert_that!(error_message, contains_substring("1. keySeparator"));
        assert_that!(error_message, contains_substring("cannot be empty"));
        assert_that!(error_message, contains_substring("2. ownerName"));
    }
}
