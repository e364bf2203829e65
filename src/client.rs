//! Message dispatcher with transparent retry of transient failures.

use std::sync::Arc;

use log::{debug, warn};

use crate::config::{Config, ResolvedConfig, merge_defaults};
use crate::error::{ClassifiedError, ErrorKind};
use crate::http::{RequestError, build_request, classify, next_retry_delay};
use crate::message::Message;
use crate::response::Response;

/// Sends messages to the gateway, one message per [`Client::send`] call.
///
/// Cloning is cheap and clones share the same configuration and transport.
#[derive(Clone, Debug)]
pub struct Client {
    config: Arc<ResolvedConfig>,
}

impl Client {
    /// Creates a client, filling unset config fields with defaults.
    pub fn new(config: Config) -> Self {
        Self {
            config: Arc::new(merge_defaults(config)),
        }
    }

    /// Returns the resolved configuration.
    pub fn config(&self) -> &ResolvedConfig {
        &self.config
    }

    /// Sends `message` and waits for a final outcome.
    ///
    /// Connection failures and 5xx responses are retried up to
    /// `max_retries` times, waiting `2^r * 400ms` before retry `r`. All other
    /// errors, and the last error once retries run out, are returned as is.
    ///
    /// A returned [`Response`] can still hold per-recipient delivery errors.
    #[tracing::instrument(skip(self, message), fields(endpoint = %self.config.endpoint))]
    pub async fn send(&self, message: &Message) -> Result<Response, ClassifiedError> {
        let body = serde_json::to_vec(message).map_err(|e| {
            ClassifiedError::new(ErrorKind::Unknown, RequestError::from(e).to_string())
        })?;

        let max_retries = self.config.max_retries;
        let mut attempt = 0;

        loop {
            let err = match self.send_once(&body).await {
                Ok(response) => {
                    debug!(
                        "Message accepted: {} succeeded, {} failed",
                        response.success, response.failure
                    );
                    return Ok(response);
                }
                Err(err) => err,
            };

            let Some(delay) = next_retry_delay(&err, attempt, max_retries) else {
                if err.is_retryable() {
                    warn!(
                        "Giving up after {} attempt(s): {}",
                        attempt.saturating_add(1),
                        err
                    );
                } else {
                    debug!("Non-retryable error: {}", err);
                }
                return Err(err);
            };

            warn!(
                "Send attempt {}/{} failed ({}), retrying in {}ms...",
                attempt + 1,
                max_retries.saturating_add(1),
                err,
                delay.as_millis()
            );
            tokio::time::sleep(delay).await;
            attempt += 1;
        }
    }

    /// Single attempt without retry.
    async fn send_once(&self, body: &[u8]) -> Result<Response, ClassifiedError> {
        let request = build_request(&self.config.endpoint, &self.config.api_key, body)
            .map_err(|e| ClassifiedError::new(ErrorKind::Unknown, e.to_string()))?;

        debug!("POST {} ({} bytes)", self.config.endpoint, body.len());

        classify(self.config.transport.execute(request).await)
    }
}
