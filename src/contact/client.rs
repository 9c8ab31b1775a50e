//! Outbound delivery of contact messages to the hosted form relay.

use std::future::Future;

use reqwest::{
    Client,
    Url,
    header,
};
use thiserror::Error;

use super::form::ContactMessage;

/// Form relay endpoint the site posts to.
pub const DEFAULT_ENDPOINT: &str = "https://formspree.io/f/meokeknn";

/// Why a message could not be delivered.
#[derive(Error, Debug)]
pub enum SubmitError {
    /// The endpoint URL is unusable.
    #[error("Invalid contact endpoint '{url}': {reason}")]
    Endpoint {
        /// The rejected value.
        url: String,
        /// Why it was rejected.
        reason: String,
    },

    /// The request did not complete.
    #[error("Contact request failed: {0}")]
    Transport(#[from] reqwest::Error),

    /// The relay answered with a non-success status.
    #[error("Contact endpoint answered HTTP status {0}")]
    Status(u16),
}

/// Delivers a contact message. One call is one attempt: no retry, no timeout.
pub trait Submitter {
    /// Send `message` once.
    fn submit(
        &self,
        message: &ContactMessage,
    ) -> impl Future<Output = Result<(), SubmitError>> + Send;
}

/// Posts messages as JSON over HTTP.
#[derive(Debug, Clone)]
pub struct HttpSubmitter {
    /// HTTP client with the crate's user agent.
    client: Client,
    /// Validated relay URL.
    endpoint: Url,
}

impl HttpSubmitter {
    /// Build a submitter for `endpoint`.
    ///
    /// Only `https` endpoints are accepted, plus `http` on loopback hosts for local testing.
    pub fn new(endpoint: &str) -> Result<Self, SubmitError> {
        let endpoint = parse_endpoint(endpoint)?;
        let client = Client::builder()
            .user_agent(concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION")))
            .build()?;

        Ok(Self { client, endpoint })
    }

    /// Relay URL messages are posted to.
    #[must_use]
    pub const fn endpoint(&self) -> &Url {
        &self.endpoint
    }
}

/// Parse and check a relay endpoint.
pub fn parse_endpoint(endpoint: &str) -> Result<Url, SubmitError> {
    let invalid = |reason: String| SubmitError::Endpoint { url: endpoint.to_string(), reason };

    let url = Url::parse(endpoint).map_err(|e| invalid(e.to_string()))?;
    let loopback = matches!(url.host_str(), Some("localhost" | "127.0.0.1" | "[::1]"));
    match url.scheme() {
        "https" => Ok(url),
        "http" if loopback => Ok(url),
        scheme => Err(invalid(format!("scheme '{scheme}' is not allowed, use https"))),
    }
}

impl Submitter for HttpSubmitter {
    async fn submit(&self, message: &ContactMessage) -> Result<(), SubmitError> {
        tracing::debug!(endpoint = %self.endpoint, "Submitting contact form");

        let response = self
            .client
            .post(self.endpoint.clone())
            .header(header::ACCEPT, "application/json")
            .json(message)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            tracing::warn!("Contact endpoint rejected the message: {}", status);
            return Err(SubmitError::Status(status.as_u16()));
        }

        tracing::debug!("Contact form delivered");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use googletest::prelude::*;
    use rstest::rstest;

    use super::*;

    #[rstest]
    #[case::default_endpoint(DEFAULT_ENDPOINT)]
    #[case::loopback_http("http://127.0.0.1:8080/f/test")]
    #[case::localhost_http("http://localhost/f/test")]
    fn accepted_endpoints(#[case] endpoint: &str) {
        assert_that!(parse_endpoint(endpoint), ok(anything()));
    }

    #[rstest]
    #[case::plain_http("http://formspree.io/f/meokeknn", "not allowed")]
    #[case::other_scheme("ftp://example.com/form", "not allowed")]
    #[case::not_a_url("formspree", "relative URL")]
    fn rejected_endpoints(#[case] endpoint: &str, #[case] reason: &str) {
        let result = parse_endpoint(endpoint);

        assert_that!(
            result,
            err(displays_as(all![contains_substring(endpoint), contains_substring(reason)]))
        );
    }

    #[rstest]
    fn new_keeps_endpoint() {
        let submitter = HttpSubmitter::new(DEFAULT_ENDPOINT);

        assert_that!(
            submitter.map(|s| s.endpoint().to_string()),
            ok(eq(DEFAULT_ENDPOINT))
        );
    }
}
