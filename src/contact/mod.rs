//! Contact form: validation, busy state and delivery to the form relay.

mod client;
mod form;

pub use client::{
    DEFAULT_ENDPOINT,
    HttpSubmitter,
    SubmitError,
    Submitter,
    parse_endpoint,
};
pub use form::{
    ContactForm,
    ContactMessage,
    FAILURE_ALERT,
    Field,
    FormStatus,
    INVALID_EMAIL,
    SubmitOutcome,
};
