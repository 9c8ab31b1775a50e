//! Contact form state, validation and submission flow.

use std::borrow::Cow;
use std::collections::BTreeMap;
use std::sync::LazyLock;

use regex::Regex;
use serde::{
    Deserialize,
    Serialize,
};

use super::client::{
    SubmitError,
    Submitter,
};
use crate::resolver::Translator;

/// Shown whenever a submission fails, whatever the cause.
pub const FAILURE_ALERT: &str = "Something went wrong. Please try again later.";

/// Shown for an email that does not look like `local@domain.tld`.
pub const INVALID_EMAIL: &str = "Please enter a valid email";

/// Loose `local@domain.tld` check. `None` only if the pattern fails to compile.
static EMAIL_PATTERN: LazyLock<Option<Regex>> = LazyLock::new(|| Regex::new(r"^\S+@\S+\.\S+$").ok());

/// Body sent to the form relay.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
pub struct ContactMessage {
    /// Sender name.
    pub name: String,
    /// Reply address.
    pub email: String,
    /// Message body.
    pub message: String,
}

/// An input of the form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Field {
    /// Sender name
    Name,
    /// Reply address
    Email,
    /// Message body
    Message,
}

impl Field {
    /// Fields in display order.
    pub const ALL: [Self; 3] = [Self::Name, Self::Email, Self::Message];

    /// Translation key of the field's label.
    #[must_use]
    pub const fn label_key(self) -> &'static str {
        match self {
            Self::Name => "contact.form.name",
            Self::Email => "contact.form.email",
            Self::Message => "contact.form.message",
        }
    }
}

/// Where the form is in its submit cycle.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum FormStatus {
    /// Accepting input.
    #[default]
    Editing,
    /// A request is in flight; the send button is disabled.
    Submitting,
    /// The relay accepted the message; the confirmation is shown.
    Submitted,
}

/// Result of finishing a submission.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmitOutcome {
    /// Validation failed; no request was made.
    Invalid,
    /// A submission is already in flight or the confirmation is showing.
    Ignored,
    /// The relay accepted the message.
    Sent,
    /// The request failed; carries the alert to show.
    Failed(String),
}

/// State of the contact form.
#[derive(Debug, Clone, Default)]
pub struct ContactForm {
    /// Current input
    fields: ContactMessage,
    /// Validation message per field; absent when the field is fine
    errors: BTreeMap<Field, String>,
    /// Submit cycle state
    status: FormStatus,
}

impl ContactForm {
    /// Empty form in the editing state.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Current submit cycle state.
    #[must_use]
    pub const fn status(&self) -> FormStatus {
        self.status
    }

    /// Current input.
    #[must_use]
    pub const fn fields(&self) -> &ContactMessage {
        &self.fields
    }

    /// Current input of one field.
    #[must_use]
    pub fn value(&self, field: Field) -> &str {
        match field {
            Field::Name => &self.fields.name,
            Field::Email => &self.fields.email,
            Field::Message => &self.fields.message,
        }
    }

    /// Validation message shown under `field`, if any.
    #[must_use]
    pub fn error(&self, field: Field) -> Option<&str> {
        self.errors.get(&field).map(String::as_str)
    }

    /// Whether any field currently shows an error.
    #[must_use]
    pub fn has_errors(&self) -> bool {
        !self.errors.is_empty()
    }

    /// Update a field as the user types. Any error shown for that field is cleared.
    pub fn set_field(&mut self, field: Field, value: impl Into<String>) {
        let slot = match field {
            Field::Name => &mut self.fields.name,
            Field::Email => &mut self.fields.email,
            Field::Message => &mut self.fields.message,
        };
        *slot = value.into();
        self.errors.remove(&field);
    }

    /// Check every field, replacing the previous errors. Returns `true` when the form is valid.
    pub fn validate(&mut self, translator: &Translator<'_>) -> bool {
        self.errors.clear();

        for field in Field::ALL {
            let value = self.value(field);
            let error = if value.trim().is_empty() {
                Some(format!("{} is required", translator.t(field.label_key())))
            } else if field == Field::Email && !is_valid_email(value) {
                Some(INVALID_EMAIL.to_string())
            } else {
                None
            };
            if let Some(error) = error {
                self.errors.insert(field, error);
            }
        }

        self.errors.is_empty()
    }

    /// Label of the send button.
    #[must_use]
    pub fn submit_label<'a>(&self, translator: &Translator<'a>) -> Cow<'a, str> {
        match self.status {
            FormStatus::Submitting => translator.t("contact.form.sending"),
            FormStatus::Editing | FormStatus::Submitted => translator.t("contact.form.send"),
        }
    }

    /// Validate and enter the busy state.
    ///
    /// Returns the message to send, or `None` when nothing should be sent: the form is
    /// invalid, a request is already in flight, or the confirmation is showing.
    pub fn begin_submit(&mut self, translator: &Translator<'_>) -> Option<ContactMessage> {
        if self.status != FormStatus::Editing {
            return None;
        }
        if !self.validate(translator) {
            return None;
        }

        self.status = FormStatus::Submitting;
        Some(self.fields.clone())
    }

    /// Leave the busy state with the relay's answer.
    pub fn finish_submit(&mut self, result: Result<(), SubmitError>) -> SubmitOutcome {
        if self.status != FormStatus::Submitting {
            return SubmitOutcome::Ignored;
        }

        match result {
            Ok(()) => {
                self.status = FormStatus::Submitted;
                self.fields = ContactMessage::default();
                SubmitOutcome::Sent
            }
            Err(e) => {
                tracing::error!("Error submitting contact form: {}", e);
                self.status = FormStatus::Editing;
                SubmitOutcome::Failed(FAILURE_ALERT.to_string())
            }
        }
    }

    /// Validate, send once through `submitter`, and apply the answer.
    pub async fn submit<S: Submitter>(
        &mut self,
        translator: &Translator<'_>,
        submitter: &S,
    ) -> SubmitOutcome {
        if self.status != FormStatus::Editing {
            return SubmitOutcome::Ignored;
        }
        let Some(message) = self.begin_submit(translator) else {
            return SubmitOutcome::Invalid;
        };

        let result = submitter.submit(&message).await;
        self.finish_submit(result)
    }

    /// "Send another message": go back from the confirmation to an empty form.
    pub fn reset(&mut self) {
        if self.status == FormStatus::Submitted {
            self.status = FormStatus::Editing;
            self.errors.clear();
        }
    }
}

/// Whether `email` looks like `local@domain.tld`.
fn is_valid_email(email: &str) -> bool {
    EMAIL_PATTERN.as_ref().is_some_and(|pattern| pattern.is_match(email))
}
