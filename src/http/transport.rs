//! The HTTP collaborator the dispatcher sends requests through.

use async_trait::async_trait;
use log::debug;
use reqwest::{Client, Request, StatusCode};
use thiserror::Error;

/// Status and body of a completed HTTP exchange.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawResponse {
    pub status: StatusCode,
    pub body: Vec<u8>,
}

impl RawResponse {
    /// Creates a response from a status and raw body bytes.
    pub fn new(status: StatusCode, body: impl Into<Vec<u8>>) -> Self {
        Self {
            status,
            body: body.into(),
        }
    }

    /// Body as text, with invalid UTF-8 replaced.
    pub fn body_text(&self) -> String {
        String::from_utf8_lossy(&self.body).into_owned()
    }
}

/// Failure to complete an HTTP exchange.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TransportError {
    /// The request never got a response (DNS, connect, TLS, timeout).
    #[error("{0}")]
    Connection(String),
    /// Response headers arrived but reading the body failed.
    #[error("{0}")]
    Body(String),
}

/// Executes one HTTP request. Implementations must be safe to share across
/// concurrent sends.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait Transport: Send + Sync {
    async fn execute(&self, request: Request) -> Result<RawResponse, TransportError>;
}

/// [`Transport`] backed by a `reqwest::Client`.
#[derive(Clone, Default)]
pub struct ReqwestTransport {
    client: Client,
}

impl ReqwestTransport {
    /// Wraps an existing `reqwest::Client`.
    pub fn new(client: Client) -> Self {
        Self { client }
    }
}

#[async_trait]
impl Transport for ReqwestTransport {
    #[tracing::instrument(skip(self, request))]
    async fn execute(&self, request: Request) -> Result<RawResponse, TransportError> {
        let response = self
            .client
            .execute(request)
            .await
            .map_err(|e| TransportError::Connection(e.to_string()))?;

        let status = response.status();
        let body = response
            .bytes()
            .await
            .map_err(|e| TransportError::Body(e.to_string()))?;

        debug!("Gateway responded with {} ({} bytes)", status, body.len());

        Ok(RawResponse::new(status, body.to_vec()))
    }
}
