//! HTTP boundary: posting one form-encoded payload.

use std::time::Duration;

use reqwest::blocking::Client;
use reqwest::header::{ACCEPT, USER_AGENT};
use thiserror::Error;
use tracing::debug;

/// User agent string for submissions.
const USER_AGENT_VALUE: &str = concat!("leadpost/", env!("CARGO_PKG_VERSION"));

/// Default per-request timeout.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Status and body of a response that was actually received.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormResponse {
    pub status: u16,
    pub body: String,
}

impl FormResponse {
    pub fn new(status: u16, body: impl Into<String>) -> Self {
        Self {
            status,
            body: body.into(),
        }
    }

    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// The request could not be completed: connect failure, timeout, or a body
/// that could not be read.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("{0}")]
pub struct TransportError(pub String);

impl From<reqwest::Error> for TransportError {
    fn from(err: reqwest::Error) -> Self {
        Self(err.to_string())
    }
}

/// Anything that can send an `application/x-www-form-urlencoded` POST.
pub trait FormPoster {
    fn post_form(
        &self,
        url: &str,
        fields: &[(String, String)],
    ) -> Result<FormResponse, TransportError>;
}

impl<P: FormPoster + ?Sized> FormPoster for &P {
    fn post_form(
        &self,
        url: &str,
        fields: &[(String, String)],
    ) -> Result<FormResponse, TransportError> {
        (**self).post_form(url, fields)
    }
}

/// Blocking `reqwest` implementation of [`FormPoster`].
#[derive(Debug, Clone)]
pub struct HttpFormPoster {
    client: Client,
}

impl HttpFormPoster {
    pub fn new(timeout: Duration) -> Result<Self, TransportError> {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| TransportError(format!("failed to create HTTP client: {e}")))?;
        Ok(Self { client })
    }
}

impl FormPoster for HttpFormPoster {
    fn post_form(
        &self,
        url: &str,
        fields: &[(String, String)],
    ) -> Result<FormResponse, TransportError> {
        debug!(url, fields = fields.len(), "posting form");
        let response = self
            .client
            .post(url)
            .header(USER_AGENT, USER_AGENT_VALUE)
            .header(ACCEPT, "application/json")
            .form(fields)
            .send()?;
        let status = response.status().as_u16();
        let body = response.text()?;
        Ok(FormResponse { status, body })
    }
}
