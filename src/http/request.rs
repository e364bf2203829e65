//! Builds the POST request for one send attempt.

use reqwest::header::{ACCEPT, AUTHORIZATION, CONTENT_TYPE, HeaderValue, InvalidHeaderValue};
use reqwest::{Method, Request, Url};
use thiserror::Error;

const APPLICATION_JSON: &str = "application/json";

/// The request could not be assembled locally.
#[derive(Debug, Error)]
pub enum RequestError {
    #[error("failed to serialize message: {0}")]
    Serialize(#[from] serde_json::Error),
    #[error("invalid endpoint URL '{endpoint}': {reason}")]
    Endpoint { endpoint: String, reason: String },
    #[error("invalid server key: {0}")]
    ApiKey(#[from] InvalidHeaderValue),
}

/// Creates a JSON POST to `endpoint` carrying `body`, authorized with
/// `api_key`.
pub fn build_request(endpoint: &str, api_key: &str, body: &[u8]) -> Result<Request, RequestError> {
    let url = Url::parse(endpoint).map_err(|e| RequestError::Endpoint {
        endpoint: endpoint.to_string(),
        reason: e.to_string(),
    })?;

    let mut auth_value = HeaderValue::from_str(&format!("key={}", api_key))?;
    auth_value.set_sensitive(true);

    let mut request = Request::new(Method::POST, url);
    let headers = request.headers_mut();
    headers.insert(AUTHORIZATION, auth_value);
    headers.insert(ACCEPT, HeaderValue::from_static(APPLICATION_JSON));
    headers.insert(CONTENT_TYPE, HeaderValue::from_static(APPLICATION_JSON));
    *request.body_mut() = Some(body.to_vec().into());

    Ok(request)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_build_request_headers() {
        let request = build_request("https://fcm.example.com/fcm/send", "secret", b"{}").unwrap();

        assert_eq!(request.method(), Method::POST);
        assert_eq!(request.url().as_str(), "https://fcm.example.com/fcm/send");

        let headers = request.headers();
        assert_eq!(headers[AUTHORIZATION], "key=secret");
        assert!(headers[AUTHORIZATION].is_sensitive());
        assert_eq!(headers[ACCEPT], "application/json");
        assert_eq!(headers[CONTENT_TYPE], "application/json");

        let body = request.body().and_then(|b| b.as_bytes()).unwrap();
        assert_eq!(body, b"{}");
    }

    #[test]
    fn test_empty_api_key_is_allowed() {
        let request = build_request("https://fcm.example.com/fcm/send", "", b"{}").unwrap();
        assert_eq!(request.headers()[AUTHORIZATION], "key=");
    }

    #[test]
    fn test_invalid_endpoint() {
        let err = build_request("not a url", "k", b"{}").unwrap_err();
        assert!(matches!(err, RequestError::Endpoint { .. }));
    }

    #[test]
    fn test_api_key_with_newline_is_rejected() {
        let err = build_request("https://fcm.example.com", "bad\nkey", b"{}").unwrap_err();
        assert!(matches!(err, RequestError::ApiKey(_)));
    }
}
