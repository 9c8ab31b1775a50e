//! Shared fixtures for unit tests.
#![cfg(test)]

use serde_json::{
    Value,
    json,
};

use crate::input::catalog::Catalog;
use crate::language::Language;

/// Build a catalog from literal trees.
///
/// # Panics
/// If a tree root is not an object.
#[allow(clippy::expect_used)]
pub(crate) fn catalog_from(trees: impl IntoIterator<Item = (Language, Value)>) -> Catalog {
    Catalog::from_trees(trees).expect("test trees must be objects")
}

/// A small two-language catalog covering the shapes the site uses.
pub(crate) fn sample_catalog() -> Catalog {
    catalog_from([
        (
            Language::Fr,
            json!({
                "hero": { "title": "Développeur", "subtitle": "Étudiant" },
                "skills": {
                    "title": "Compétences",
                    "languages": {
                        "title": "Langues",
                        "items": [
                            { "language": "Arabe", "level": "Langue maternelle", "percent": 100 },
                            { "language": "Français", "level": "Courant", "percent": 90 },
                            { "language": "Anglais", "level": "Intermédiaire", "percent": 75 }
                        ]
                    },
                    "soft": { "title": "Savoir-être", "items": ["Travail en équipe", "Autonomie"] }
                },
                "contact": {
                    "form": {
                        "name": "Nom",
                        "email": "E-mail",
                        "message": "Message",
                        "send": "Envoyer",
                        "sending": "Envoi en cours..."
                    }
                }
            }),
        ),
        (
            Language::En,
            json!({
                "hero": { "title": "Developer", "subtitle": "Student" },
                "skills": {
                    "title": "Skills",
                    "languages": {
                        "title": "Languages",
                        "items": [
                            { "language": "Arabic", "level": "Native", "percent": 100 },
                            { "language": "French", "level": "Fluent", "percent": 90 },
                            { "language": "English", "level": "Intermediate", "percent": 75 }
                        ]
                    },
                    "soft": { "title": "Soft skills", "items": ["Teamwork", "Autonomy"] }
                },
                "contact": {
                    "form": {
                        "name": "Name",
                        "email": "Email",
                        "message": "Message",
                        "send": "Send",
                        "sending": "Sending..."
                    }
                }
            }),
        ),
    ])
}
