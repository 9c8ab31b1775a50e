//! Typed records stored in the translation trees.

use serde::{
    Deserialize,
    Serialize,
};
use thiserror::Error;

/// A record that parsed but holds impossible values.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ContentError {
    /// A skill level outside 0-100.
    #[error("Skill '{language}' has percent {percent}, expected 0-100")]
    PercentOutOfRange {
        /// Skill name.
        language: String,
        /// Stored value.
        percent: u8,
    },

    /// An education entry that ends before it starts.
    #[error("Education entry '{title}' ends ({end}) before it starts ({start})")]
    InvertedYears {
        /// Entry title.
        title: String,
        /// First year.
        start: u16,
        /// Last year.
        end: u16,
    },
}

/// One entry of the education timeline.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EducationItem {
    /// Display label such as `"2022–2024"`. Derived from the years when absent.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub year: Option<String>,
    /// First year of the entry.
    pub start_year: u16,
    /// `None` for single-year entries.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub end_year: Option<u16>,
    /// Diploma or course name.
    pub title: String,
    /// Short description.
    pub description: String,
}

impl EducationItem {
    /// Year the timeline is ordered by.
    #[must_use]
    pub fn sort_year(&self) -> u16 {
        self.end_year.unwrap_or(self.start_year)
    }

    /// Label shown next to the entry.
    #[must_use]
    pub fn year_label(&self) -> String {
        if let Some(label) = &self.year {
            return label.clone();
        }
        match self.end_year {
            Some(end) if end != self.start_year => format!("{}–{end}", self.start_year),
            _ => self.start_year.to_string(),
        }
    }

    /// Check that the years are in order.
    pub fn validate(&self) -> Result<(), ContentError> {
        match self.end_year {
            Some(end) if end < self.start_year => Err(ContentError::InvertedYears {
                title: self.title.clone(),
                start: self.start_year,
                end,
            }),
            _ => Ok(()),
        }
    }
}

/// Order the timeline from oldest to most recent. Entries ending the same year keep their
/// original order.
pub fn sort_timeline(items: &mut [EducationItem]) {
    items.sort_by_key(EducationItem::sort_year);
}

/// A spoken language and how well it is mastered.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct LanguageSkill {
    /// Name of the language, in the display language.
    pub language: String,
    /// Level label, e.g. `"Fluent"`.
    pub level: String,
    /// Width of the skill bar.
    pub percent: u8,
}

impl LanguageSkill {
    /// Check that `percent` is at most 100.
    pub fn validate(&self) -> Result<(), ContentError> {
        if self.percent > 100 {
            return Err(ContentError::PercentOutOfRange {
                language: self.language.clone(),
                percent: self.percent,
            });
        }
        Ok(())
    }
}

/// Text stored either as a single string or as a list of paragraphs.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(untagged)]
pub enum Paragraphs {
    /// A single paragraph.
    One(String),
    /// Several paragraphs, in order.
    Many(Vec<String>),
}

impl Paragraphs {
    /// The paragraphs, in order.
    #[must_use]
    pub fn into_vec(self) -> Vec<String> {
        match self {
            Self::One(text) => vec![text],
            Self::Many(paragraphs) => paragraphs,
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use googletest::prelude::*;
    use rstest::rstest;
    use serde_json::json;

    use super::*;

    fn item(title: &str, start_year: u16, end_year: Option<u16>) -> EducationItem {
        EducationItem {
            year: None,
            start_year,
            end_year,
            title: title.to_string(),
            description: String::new(),
        }
    }

    #[rstest]
    fn timeline_sorts_oldest_first_by_end_year() {
        let mut items = vec![
            item("bachelor", 2024, Some(2025)),
            item("diploma", 2022, Some(2024)),
            item("high school", 2022, None),
        ];

        sort_timeline(&mut items);

        let titles: Vec<&str> = items.iter().map(|i| i.title.as_str()).collect();
        assert_eq!(titles, vec!["high school", "diploma", "bachelor"]);
    }

    #[rstest]
    fn timeline_sort_is_stable() {
        let mut items = vec![item("first", 2020, Some(2023)), item("second", 2023, None)];

        sort_timeline(&mut items);

        let titles: Vec<&str> = items.iter().map(|i| i.title.as_str()).collect();
        assert_eq!(titles, vec!["first", "second"]);
    }

    #[rstest]
    #[case::explicit_label(Some("2022 – now"), 2022, None, "2022 – now")]
    #[case::range(None, 2022, Some(2024), "2022–2024")]
    #[case::single_year(None, 2022, None, "2022")]
    #[case::same_year(None, 2022, Some(2022), "2022")]
    fn year_label(
        #[case] year: Option<&str>,
        #[case] start_year: u16,
        #[case] end_year: Option<u16>,
        #[case] expected: &str,
    ) {
        let entry = EducationItem { year: year.map(str::to_string), ..item("x", start_year, end_year) };

        assert_that!(entry.year_label(), eq(expected));
    }

    #[rstest]
    fn education_item_deserializes_camel_case() {
        let value = json!({
            "year": "2024–2025",
            "startYear": 2024,
            "endYear": 2025,
            "title": "Bachelor",
            "description": "Software engineering"
        });

        let entry: EducationItem = serde_json::from_value(value).unwrap();

        assert_that!(entry.start_year, eq(2024));
        assert_that!(entry.end_year, some(eq(2025)));
        assert_that!(entry.validate(), ok(anything()));
    }

    #[rstest]
    fn inverted_years_are_rejected() {
        let entry = item("backwards", 2025, Some(2020));

        assert_that!(entry.validate(), err(anything()));
    }

    #[rstest]
    fn skill_percent_must_be_a_percentage() {
        let skill = LanguageSkill {
            language: "French".to_string(),
            level: "Fluent".to_string(),
            percent: 120,
        };

        let message = skill.validate().unwrap_err().to_string();

        assert_that!(message, contains_substring("expected 0-100"));
    }

    #[rstest]
    fn paragraphs_accept_string_or_list() {
        let one: Paragraphs = serde_json::from_value(json!("Hello")).unwrap();
        let many: Paragraphs = serde_json::from_value(json!(["a", "b"])).unwrap();

        assert_eq!(one.into_vec(), vec!["Hello".to_string()]);
        assert_eq!(many.into_vec(), vec!["a".to_string(), "b".to_string()]);
    }
}
