//! Error taxonomy for gateway send calls.
//!
//! Every failed attempt produces exactly one [`ClassifiedError`]. Whether the
//! dispatcher may try again is decided by [`ErrorKind::is_retryable`] alone.

use std::fmt;

use thiserror::Error;

/// Closed set of failure categories a send attempt can end in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// The endpoint could not be reached (DNS, connect, timeout).
    Connection,
    /// HTTP 400. The gateway rejected the payload.
    BadRequest,
    /// HTTP 401. Missing or invalid server key.
    Authentication,
    /// HTTP 413. The serialized message is too large.
    EntityTooLarge,
    /// HTTP 5xx.
    ServiceUnavailable,
    /// HTTP 200 with a body that is not a valid send response.
    ResponseParse,
    /// Anything else, including local request construction failures.
    Unknown,
}

impl ErrorKind {
    /// Returns true for failures that may succeed when the same message is
    /// sent again.
    pub fn is_retryable(self) -> bool {
        match self {
            ErrorKind::Connection | ErrorKind::ServiceUnavailable => true,
            ErrorKind::BadRequest
            | ErrorKind::Authentication
            | ErrorKind::EntityTooLarge
            | ErrorKind::ResponseParse
            | ErrorKind::Unknown => false,
        }
    }

    /// Human readable description used as the prefix of the error message.
    pub fn description(self) -> &'static str {
        match self {
            ErrorKind::Connection => "connection error",
            ErrorKind::BadRequest => "bad request",
            ErrorKind::Authentication => "authentication error",
            ErrorKind::EntityTooLarge => "request entity too large",
            ErrorKind::ServiceUnavailable => "fcm service unavailable",
            ErrorKind::ResponseParse => "response body is not well-formed json",
            ErrorKind::Unknown => "unknown error",
        }
    }
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.description())
    }
}

/// A failed send attempt: what went wrong and any diagnostic text.
///
/// `message` carries the gateway's response body for [`ErrorKind::BadRequest`]
/// and [`ErrorKind::Unknown`] HTTP failures, the local error text for
/// transport and parse failures, and is empty otherwise.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{kind}: {message}")]
pub struct ClassifiedError {
    kind: ErrorKind,
    message: String,
}

impl ClassifiedError {
    /// Creates an error of `kind` carrying `message`.
    pub fn new(kind: ErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }

    /// Returns the category of this error.
    pub fn kind(&self) -> ErrorKind {
        self.kind
    }

    /// Returns the detail text, empty when the gateway gave none.
    pub fn message(&self) -> &str {
        &self.message
    }

    /// Whether the dispatcher retries this error.
    pub fn is_retryable(&self) -> bool {
        self.kind.is_retryable()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const ALL_KINDS: [ErrorKind; 7] = [
        ErrorKind::Connection,
        ErrorKind::BadRequest,
        ErrorKind::Authentication,
        ErrorKind::EntityTooLarge,
        ErrorKind::ServiceUnavailable,
        ErrorKind::ResponseParse,
        ErrorKind::Unknown,
    ];

    #[test]
    fn test_only_transient_kinds_are_retryable() {
        for kind in ALL_KINDS {
            let expected = matches!(kind, ErrorKind::Connection | ErrorKind::ServiceUnavailable);
            assert_eq!(kind.is_retryable(), expected, "{:?}", kind);
            assert_eq!(ClassifiedError::new(kind, "x").is_retryable(), expected);
        }
    }

    #[test]
    fn test_display_includes_kind_and_message() {
        let err = ClassifiedError::new(ErrorKind::BadRequest, "bad field");
        assert_eq!(err.to_string(), "bad request: bad field");

        let err = ClassifiedError::new(ErrorKind::Authentication, "");
        assert_eq!(err.to_string(), "authentication error: ");
    }

    #[test]
    fn test_accessors() {
        let err = ClassifiedError::new(ErrorKind::ResponseParse, "expected value");
        assert_eq!(err.kind(), ErrorKind::ResponseParse);
        assert_eq!(err.message(), "expected value");
    }
}
