//! Turns the outcome of one HTTP exchange into a parsed response or a
//! [`ClassifiedError`].

use reqwest::StatusCode;
use serde_json::{Map, Value};

use super::transport::{RawResponse, TransportError};
use crate::error::{ClassifiedError, ErrorKind};
use crate::response::Response;

/// Maps a transport outcome to the send result for that attempt.
pub fn classify(outcome: Result<RawResponse, TransportError>) -> Result<Response, ClassifiedError> {
    let raw = match outcome {
        Ok(raw) => raw,
        Err(TransportError::Connection(msg)) => {
            return Err(ClassifiedError::new(ErrorKind::Connection, msg));
        }
        Err(TransportError::Body(msg)) => {
            return Err(ClassifiedError::new(ErrorKind::Unknown, msg));
        }
    };

    match raw.status {
        StatusCode::OK => parse_response(&raw.body)
            .map_err(|e| ClassifiedError::new(ErrorKind::ResponseParse, e.to_string())),
        StatusCode::BAD_REQUEST => Err(ClassifiedError::new(
            ErrorKind::BadRequest,
            raw.body_text(),
        )),
        StatusCode::UNAUTHORIZED => Err(ClassifiedError::new(ErrorKind::Authentication, "")),
        StatusCode::PAYLOAD_TOO_LARGE => Err(ClassifiedError::new(ErrorKind::EntityTooLarge, "")),
        s if s.is_server_error() => Err(ClassifiedError::new(ErrorKind::ServiceUnavailable, "")),
        _ => Err(ClassifiedError::new(ErrorKind::Unknown, raw.body_text())),
    }
}

/// Only a JSON object is a send response; serde would otherwise accept a
/// sequence for a struct whose fields all have defaults.
fn parse_response(body: &[u8]) -> serde_json::Result<Response> {
    let object: Map<String, Value> = serde_json::from_slice(body)?;
    serde_json::from_value(Value::Object(object))
}
