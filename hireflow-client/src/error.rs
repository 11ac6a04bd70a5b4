//! Error types for the Hireflow client

use std::time::Duration;

use hireflow_core::domain::error::ClassifiedError;
use serde_json::Value as JsonValue;
use thiserror::Error;

/// Result type alias for client operations
pub type Result<T> = std::result::Result<T, ClientError>;

/// Errors that can occur when using the Hireflow client
#[derive(Debug, Error)]
pub enum ClientError {
    /// Connection, DNS or protocol failure
    #[error("HTTP request failed: {0}")]
    Transport(reqwest::Error),

    /// No response within the operation's budget
    #[error("Request timed out after {after:?}")]
    Timeout {
        /// Budget that elapsed
        after: Duration,
    },

    /// Non-2xx response
    #[error("HTTP error (status {status})")]
    Http {
        status: u16,
        /// `message` from the body, when the body was an envelope
        message: Option<String>,
    },

    /// Envelope delivered with a code outside the success set
    #[error("API error (code {code}): {message}")]
    Business {
        code: i64,
        message: String,
        data: Option<JsonValue>,
    },

    /// Failed to parse response
    #[error("Failed to parse response: {0}")]
    Parse(String),

    /// Invalid request
    #[error("Invalid request: {0}")]
    InvalidRequest(String),
}

impl ClientError {
    /// Maps a reqwest error, separating timeouts from other transport failures
    pub(crate) fn from_reqwest(err: reqwest::Error, budget: Duration) -> Self {
        if err.is_timeout() {
            Self::Timeout { after: budget }
        } else {
            Self::Transport(err)
        }
    }

    /// Classifies the error for callers
    ///
    /// A delivered envelope keeps its code and message verbatim. Anything
    /// else is a network failure: the HTTP status (or 500) as code, and the
    /// remote message, the transport message or `fallback`, in that order.
    pub fn classify(&self, fallback: &str) -> ClassifiedError {
        match self {
            Self::Business { code, message, .. } => ClassifiedError::business(*code, message.clone()),
            Self::Http { status, message } => ClassifiedError::network(
                i64::from(*status),
                message
                    .clone()
                    .filter(|m| !m.trim().is_empty())
                    .unwrap_or_else(|| format!("request failed with status code {}", status)),
            ),
            Self::Transport(err) => {
                let message = err.to_string();
                ClassifiedError::network(
                    err.status().map(|s| i64::from(s.as_u16())).unwrap_or(500),
                    if message.trim().is_empty() {
                        fallback.to_string()
                    } else {
                        message
                    },
                )
            }
            Self::Timeout { .. } | Self::Parse(_) => ClassifiedError::network(500, fallback),
            Self::InvalidRequest(message) => ClassifiedError::validation(message.clone()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use hireflow_core::domain::error::FailureKind;
    use serde_json::json;

    const FALLBACK: &str = "Network request failed";

    #[test]
    fn test_business_error_is_verbatim() {
        let err = ClientError::Business {
            code: 409,
            message: "duplicate".to_string(),
            data: Some(json!({"task_id": "t-1"})),
        };
        let classified = err.classify(FALLBACK);
        assert_eq!(classified.kind, FailureKind::Business);
        assert_eq!(classified.code, 409);
        assert_eq!(classified.message, "duplicate");
    }

    #[test]
    fn test_timeout_uses_fallback() {
        let err = ClientError::Timeout {
            after: Duration::from_secs(60),
        };
        let classified = err.classify(FALLBACK);
        assert_eq!(classified.kind, FailureKind::Network);
        assert_eq!(classified.code, 500);
        assert_eq!(classified.message, FALLBACK);
    }

    #[test]
    fn test_http_error_prefers_remote_message() {
        let err = ClientError::Http {
            status: 503,
            message: Some("maintenance".to_string()),
        };
        let classified = err.classify(FALLBACK);
        assert_eq!(classified.kind, FailureKind::Network);
        assert_eq!(classified.code, 503);
        assert_eq!(classified.message, "maintenance");

        let err = ClientError::Http {
            status: 502,
            message: None,
        };
        assert_eq!(err.classify(FALLBACK).message, "request failed with status code 502");
    }

    #[test]
    fn test_parse_and_invalid_request() {
        let classified = ClientError::Parse("eof".to_string()).classify(FALLBACK);
        assert_eq!((classified.kind, classified.code), (FailureKind::Network, 500));

        let classified = ClientError::InvalidRequest("bad".to_string()).classify(FALLBACK);
        assert_eq!((classified.kind, classified.code), (FailureKind::Validation, 400));
    }
}
