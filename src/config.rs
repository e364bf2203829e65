//! Client configuration and its built-in defaults.

use std::fmt;
use std::sync::Arc;

use crate::http::{DEFAULT_MAX_RETRIES, ReqwestTransport, Transport};

/// Legacy HTTP send endpoint.
pub const DEFAULT_ENDPOINT: &str = "https://fcm.googleapis.com/fcm/send";

/// Options supplied by the caller. Unset fields fall back to defaults in
/// [`merge_defaults`].
#[derive(Clone, Default)]
pub struct Config {
    /// Server key. May be empty, in which case sends fail with an
    /// authentication error.
    pub api_key: String,
    /// HTTP collaborator. Defaults to a plain [`ReqwestTransport`].
    pub transport: Option<Arc<dyn Transport>>,
    /// Retries after the first attempt. Defaults to 5; `Some(0)` disables
    /// retries.
    pub max_retries: Option<u32>,
    pub endpoint: Option<String>,
}

/// Configuration with every default applied. Read-only once built.
#[derive(Clone)]
pub struct ResolvedConfig {
    pub api_key: String,
    pub transport: Arc<dyn Transport>,
    pub max_retries: u32,
    pub endpoint: String,
}

impl Config {
    /// Creates a configuration with `api_key` and every other field unset.
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            ..Default::default()
        }
    }

    /// Sends through `transport` instead of the default reqwest client.
    pub fn with_transport(mut self, transport: Arc<dyn Transport>) -> Self {
        self.transport = Some(transport);
        self
    }

    /// Sets the retry budget. `0` disables retries.
    pub fn with_max_retries(mut self, max_retries: u32) -> Self {
        self.max_retries = Some(max_retries);
        self
    }

    /// Overrides the gateway URL.
    pub fn with_endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.endpoint = Some(endpoint.into());
        self
    }
}

/// Fills every unset field of `config` with its default.
pub fn merge_defaults(config: Config) -> ResolvedConfig {
    ResolvedConfig {
        api_key: config.api_key,
        transport: config
            .transport
            .unwrap_or_else(|| Arc::new(ReqwestTransport::default())),
        max_retries: config.max_retries.unwrap_or(DEFAULT_MAX_RETRIES),
        endpoint: config
            .endpoint
            .filter(|endpoint| !endpoint.is_empty())
            .unwrap_or_else(|| DEFAULT_ENDPOINT.to_string()),
    }
}

/// Shows the first and last few characters of a key only.
fn mask_key(key: &str) -> String {
    let chars: Vec<char> = key.chars().collect();
    if chars.len() <= 12 {
        return "*".repeat(chars.len());
    }
    let head: String = chars[..4].iter().collect();
    let tail: String = chars[chars.len() - 4..].iter().collect();
    format!("{}*********{}", head, tail)
}

impl fmt::Debug for Config {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Config")
            .field("api_key", &mask_key(&self.api_key))
            .field("transport", &self.transport.as_ref().map(|_| "<custom>"))
            .field("max_retries", &self.max_retries)
            .field("endpoint", &self.endpoint)
            .finish()
    }
}

impl fmt::Debug for ResolvedConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ResolvedConfig")
            .field("api_key", &mask_key(&self.api_key))
            .field("max_retries", &self.max_retries)
            .field("endpoint", &self.endpoint)
            .finish_non_exhaustive()
    }
}
