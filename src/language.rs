//! Supported display languages.

use std::fmt;
use std::str::FromStr;

use serde::{
    Deserialize,
    Serialize,
};
use thiserror::Error;

/// A language the site is translated into.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Language {
    /// French
    #[default]
    Fr,
    /// English
    En,
}

/// Returned when an identifier is not one of the supported languages.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("Unsupported language '{0}'. Expected one of: fr, en")]
pub struct UnsupportedLanguage(pub String);

impl Language {
    /// Every supported language, in switcher order.
    pub const ALL: [Self; 2] = [Self::Fr, Self::En];

    /// Language used for the first render, before any stored preference is read.
    pub const DEFAULT: Self = Self::Fr;

    /// Two-letter identifier, as stored in preferences.
    #[must_use]
    pub const fn code(self) -> &'static str {
        match self {
            Self::Fr => "fr",
            Self::En => "en",
        }
    }

    /// Translation key of this language's label in the language switcher.
    #[must_use]
    pub const fn switcher_key(self) -> &'static str {
        match self {
            Self::Fr => "languageSwitcher.fr",
            Self::En => "languageSwitcher.en",
        }
    }
}

impl FromStr for Language {
    type Err = UnsupportedLanguage;

    /// Identifiers are matched exactly; `"FR"` or `"fr-FR"` are rejected.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "fr" => Ok(Self::Fr),
            "en" => Ok(Self::En),
            other => Err(UnsupportedLanguage(other.to_string())),
        }
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use googletest::prelude::*;
    use rstest::rstest;

    use super::*;

    #[rstest]
    #[case("fr", Language::Fr)]
    #[case("en", Language::En)]
    fn parse_supported(#[case] input: &str, #[case] expected: Language) {
        assert_eq!(input.parse::<Language>(), Ok(expected));
    }

    #[rstest]
    #[case::other_language("de")]
    #[case::uppercase("FR")]
    #[case::region("en-US")]
    #[case::empty("")]
    fn parse_unsupported(#[case] input: &str) {
        assert_eq!(input.parse::<Language>(), Err(UnsupportedLanguage(input.to_string())));
    }

    #[rstest]
    fn default_is_french() {
        assert_that!(Language::default(), eq(Language::DEFAULT));
        assert_that!(Language::DEFAULT.code(), eq("fr"));
    }

    #[rstest]
    fn display_matches_code() {
        for language in Language::ALL {
            assert_that!(language.to_string(), eq(language.code()));
        }
    }

    #[rstest]
    fn serde_uses_codes() {
        let json = serde_json::to_string(&Language::En).unwrap_or_default();
        assert_that!(json, eq("\"en\""));

        let parsed: Language = serde_json::from_str("\"fr\"").unwrap();
        assert_that!(parsed, eq(Language::Fr));
    }
}
