//! Parsed body of a successful (HTTP 200) send call.
//!
//! A 200 only means the gateway accepted the request. Each recipient gets
//! its own [`SendResult`], and those can still carry delivery errors.

use std::fmt;

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Response {
    #[serde(default)]
    pub multicast_id: i64,
    #[serde(default)]
    pub success: u32,
    #[serde(default)]
    pub failure: u32,
    #[serde(default)]
    pub canonical_ids: u32,
    #[serde(default)]
    pub results: Vec<SendResult>,
    /// Set instead of `results` when the message was sent to a topic.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message_id: Option<i64>,
    /// Topic-level delivery error.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<ResultError>,
}

/// Outcome for one recipient, in the same order as the request's targets.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct SendResult {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message_id: Option<String>,
    /// Canonical token the caller should store in place of the one it sent.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub registration_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<ResultError>,
}

impl SendResult {
    /// Whether this recipient got the message.
    pub fn is_success(&self) -> bool {
        self.error.is_none()
    }

    /// Whether the gateway returned a canonical token to replace the one sent.
    pub fn token_changed(&self) -> bool {
        self.registration_id
            .as_deref()
            .is_some_and(|id| !id.is_empty())
    }
}

impl Response {
    /// Results that carry a delivery error, paired with their index.
    pub fn failed_results(&self) -> impl Iterator<Item = (usize, &SendResult)> {
        self.results
            .iter()
            .enumerate()
            .filter(|(_, result)| !result.is_success())
    }
}

/// Per-recipient delivery error codes.
///
/// See <https://firebase.google.com/docs/cloud-messaging/http-server-ref#error-codes>.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum ResultError {
    MissingRegistration,
    InvalidRegistration,
    NotRegistered,
    MessageTooBig,
    InvalidDataKey,
    InvalidTtl,
    DeviceMessageRateExceeded,
    TopicsMessageRateExceeded,
    MismatchSenderId,
    InvalidPackageName,
    InternalServerError,
    Unavailable,
    /// A code this client does not know about yet.
    Other(String),
}

impl ResultError {
    /// Returns the code as sent by the gateway.
    pub fn as_str(&self) -> &str {
        match self {
            ResultError::MissingRegistration => "MissingRegistration",
            ResultError::InvalidRegistration => "InvalidRegistration",
            ResultError::NotRegistered => "NotRegistered",
            ResultError::MessageTooBig => "MessageTooBig",
            ResultError::InvalidDataKey => "InvalidDataKey",
            ResultError::InvalidTtl => "InvalidTtl",
            ResultError::DeviceMessageRateExceeded => "DeviceMessageRateExceeded",
            ResultError::TopicsMessageRateExceeded => "TopicsMessageRateExceeded",
            ResultError::MismatchSenderId => "MismatchSenderId",
            ResultError::InvalidPackageName => "InvalidPackageName",
            ResultError::InternalServerError => "InternalServerError",
            ResultError::Unavailable => "Unavailable",
            ResultError::Other(code) => code,
        }
    }

    /// Whether resending to this one recipient later may succeed.
    ///
    /// Advisory only: the client never resends individual recipients.
    pub fn is_retryable(&self) -> bool {
        matches!(
            self,
            ResultError::Unavailable
                | ResultError::InternalServerError
                | ResultError::DeviceMessageRateExceeded
                | ResultError::TopicsMessageRateExceeded
        )
    }
}

impl From<String> for ResultError {
    fn from(code: String) -> Self {
        match code.as_str() {
            "MissingRegistration" => ResultError::MissingRegistration,
            "InvalidRegistration" => ResultError::InvalidRegistration,
            "NotRegistered" => ResultError::NotRegistered,
            "MessageTooBig" => ResultError::MessageTooBig,
            "InvalidDataKey" => ResultError::InvalidDataKey,
            "InvalidTtl" => ResultError::InvalidTtl,
            "DeviceMessageRateExceeded" => ResultError::DeviceMessageRateExceeded,
            "TopicsMessageRateExceeded" => ResultError::TopicsMessageRateExceeded,
            "MismatchSenderId" => ResultError::MismatchSenderId,
            "InvalidPackageName" => ResultError::InvalidPackageName,
            "InternalServerError" => ResultError::InternalServerError,
            "Unavailable" => ResultError::Unavailable,
            _ => ResultError::Other(code),
        }
    }
}

impl From<ResultError> for String {
    fn from(error: ResultError) -> Self {
        match error {
            ResultError::Other(code) => code,
            known => known.as_str().to_string(),
        }
    }
}

impl fmt::Display for ResultError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_mixed_results() {
        let response: Response = serde_json::from_str(
            r#"{
                "multicast_id": 108,
                "success": 1,
                "failure": 2,
                "canonical_ids": 1,
                "results": [
                    { "message_id": "1:08", "registration_id": "new-token" },
                    { "error": "NotRegistered" },
                    { "error": "SomethingNew" }
                ]
            }"#,
        )
        .unwrap();

        assert_eq!(response.multicast_id, 108);
        assert_eq!(response.results.len(), 3);

        let first = &response.results[0];
        assert!(first.is_success());
        assert!(first.token_changed());
        assert_eq!(first.message_id.as_deref(), Some("1:08"));

        assert_eq!(response.results[1].error, Some(ResultError::NotRegistered));
        assert_eq!(
            response.results[2].error,
            Some(ResultError::Other("SomethingNew".to_string()))
        );

        let failed: Vec<usize> = response.failed_results().map(|(i, _)| i).collect();
        assert_eq!(failed, vec![1, 2]);
    }

    #[test]
    fn test_token_changed_ignores_empty_registration_id() {
        let result = SendResult {
            message_id: Some("m".to_string()),
            registration_id: Some(String::new()),
            error: None,
        };
        assert!(!result.token_changed());
    }

    #[test]
    fn test_result_error_serializes_as_code() {
        let result = SendResult {
            error: Some(ResultError::InvalidTtl),
            ..Default::default()
        };
        assert_eq!(
            serde_json::to_string(&result).unwrap(),
            r#"{"error":"InvalidTtl"}"#
        );
    }

    #[test]
    fn test_result_error_retryable_codes() {
        assert!(ResultError::Unavailable.is_retryable());
        assert!(ResultError::DeviceMessageRateExceeded.is_retryable());
        assert!(!ResultError::NotRegistered.is_retryable());
        assert!(!ResultError::Other("Unavailable2".to_string()).is_retryable());
    }

    #[test]
    fn test_parse_topic_response() {
        let response: Response = serde_json::from_str(r#"{"message_id": 5302146532485}"#).unwrap();
        assert_eq!(response.message_id, Some(5302146532485));
        assert!(response.results.is_empty());
        assert!(response.error.is_none());
    }

    #[test]
    fn test_wrong_field_type_fails_to_parse() {
        assert!(serde_json::from_str::<Response>(r#"{"results": "nope"}"#).is_err());
    }
}
