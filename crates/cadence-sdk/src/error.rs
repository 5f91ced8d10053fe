//! Error types for the Cadence SDK.

use cadence_domain::ValidationError;
use serde::Deserialize;
use thiserror::Error;

const DEFAULT_DETAIL: &str = "Request failed";
const DEFAULT_CODE: &str = "UNKNOWN_ERROR";

/// SDK operation errors
#[derive(Debug, Error)]
pub enum SdkError {
    /// The server answered with a non-success status
    #[error("API error (HTTP {status}, {code}): {detail}")]
    Api {
        /// HTTP status code
        status: u16,
        /// Machine-readable error code from the body
        code: String,
        /// Human-readable detail from the body
        detail: String,
    },

    /// Connection error (network, DNS, etc.)
    #[error("Connection error: {0}")]
    ConnectionError(String),

    /// The request exceeded the configured timeout
    #[error("Request timed out")]
    Timeout,

    /// Response body could not be decoded
    #[error("Decode error: {0}")]
    DecodeError(String),

    /// Merge input rejected before any request was sent
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),

    /// A merge is already being submitted
    #[error("A merge submission is already in flight")]
    SubmissionInFlight,

    /// Any other transport failure
    #[error("Transport error: {0}")]
    TransportError(String),
}

/// Error body returned by the API: `{ "detail": ..., "code": ... }`
#[derive(Debug, Deserialize)]
struct ApiErrorBody {
    detail: Option<String>,
    code: Option<String>,
}

impl SdkError {
    /// Build an [`SdkError::Api`] from a status and raw response body
    ///
    /// Missing or non-JSON bodies fall back to `"Request failed"` /
    /// `"UNKNOWN_ERROR"`.
    pub fn from_error_body(status: u16, body: &[u8]) -> Self {
        let parsed = serde_json::from_slice::<ApiErrorBody>(body).ok();
        let (detail, code) = match parsed {
            Some(b) => (b.detail, b.code),
            None => (None, None),
        };

        SdkError::Api {
            status,
            code: code.unwrap_or_else(|| DEFAULT_CODE.to_string()),
            detail: detail.unwrap_or_else(|| DEFAULT_DETAIL.to_string()),
        }
    }

    /// Whether this is an HTTP 404
    pub fn is_not_found(&self) -> bool {
        matches!(self, SdkError::Api { status: 404, .. })
    }

    /// HTTP status, for API errors
    pub fn status(&self) -> Option<u16> {
        match self {
            SdkError::Api { status, .. } => Some(*status),
            _ => None,
        }
    }
}

impl From<reqwest::Error> for SdkError {
    fn from(e: reqwest::Error) -> Self {
        if e.is_timeout() {
            SdkError::Timeout
        } else if e.is_connect() {
            SdkError::ConnectionError(e.to_string())
        } else if e.is_decode() {
            SdkError::DecodeError(e.to_string())
        } else if let Some(status) = e.status() {
            SdkError::from_error_body(status.as_u16(), &[])
        } else {
            SdkError::TransportError(e.to_string())
        }
    }
}

impl From<serde_json::Error> for SdkError {
    fn from(e: serde_json::Error) -> Self {
        SdkError::DecodeError(format!("JSON parsing error: {}", e))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_body_parsed() {
        let err = SdkError::from_error_body(409, br#"{"detail":"Name taken","code":"CONFLICT"}"#);
        match err {
            SdkError::Api { status, code, detail } => {
                assert_eq!(status, 409);
                assert_eq!(code, "CONFLICT");
                assert_eq!(detail, "Name taken");
            }
            other => panic!("Unexpected error: {:?}", other),
        }
    }

    #[test]
    fn test_error_body_defaults() {
        let err = SdkError::from_error_body(502, b"<html>Bad Gateway</html>");
        assert_eq!(
            err.to_string(),
            "API error (HTTP 502, UNKNOWN_ERROR): Request failed"
        );
        assert!(!err.is_not_found());
    }

    #[test]
    fn test_partial_error_body() {
        let err = SdkError::from_error_body(404, br#"{"detail":"Clone has no DNA"}"#);
        assert!(err.is_not_found());
        assert_eq!(err.status(), Some(404));
        assert!(err.to_string().contains("UNKNOWN_ERROR"));
    }
}
