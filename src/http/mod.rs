//! HTTP plumbing for the send call: request construction, transport,
//! response classification and retry policy.

mod classify;
mod request;
mod retry;
mod transport;

pub use classify::classify;
pub use request::{RequestError, build_request};
pub use retry::{BASE_RETRY_DELAY, DEFAULT_MAX_RETRIES, backoff_delay, next_retry_delay};
#[cfg(test)]
pub use transport::MockTransport;
pub use transport::{RawResponse, ReqwestTransport, Transport, TransportError};
