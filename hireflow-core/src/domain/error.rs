//! Classified error types

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Failure class used to decide retry eligibility and user-facing wording
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FailureKind {
    /// Transport failure, timeout or an HTTP error without a usable envelope
    Network,
    /// A delivered envelope whose code is outside the success set
    Business,
    /// Caller-side payload problem, detected before any request is made
    Validation,
    /// The job is no longer tracked
    NotFound,
}

impl FailureKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            FailureKind::Network => "network",
            FailureKind::Business => "business",
            FailureKind::Validation => "validation",
            FailureKind::NotFound => "not_found",
        }
    }
}

impl std::fmt::Display for FailureKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// An error after classification
///
/// `message` is always human readable: the remote message when one was
/// delivered, otherwise a fallback chosen by the classifier.
#[derive(Debug, Clone, PartialEq, Eq, Error, Serialize, Deserialize)]
#[error("{kind} error (code {code}): {message}")]
pub struct ClassifiedError {
    pub kind: FailureKind,
    pub code: i64,
    pub message: String,
}

impl ClassifiedError {
    pub fn new(kind: FailureKind, code: i64, message: impl Into<String>) -> Self {
        Self {
            kind,
            code,
            message: message.into(),
        }
    }

    pub fn network(code: i64, message: impl Into<String>) -> Self {
        Self::new(FailureKind::Network, code, message)
    }

    pub fn business(code: i64, message: impl Into<String>) -> Self {
        Self::new(FailureKind::Business, code, message)
    }

    pub fn validation(message: impl Into<String>) -> Self {
        Self::new(FailureKind::Validation, 400, message)
    }

    pub fn not_found(id: &str) -> Self {
        Self::new(FailureKind::NotFound, 404, format!("job {} is not tracked", id))
    }

    /// Only network failures are retried, and only by the poller
    pub fn is_retryable(&self) -> bool {
        self.kind == FailureKind::Network
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_only_network_is_retryable() {
        assert!(ClassifiedError::network(500, "x").is_retryable());
        assert!(!ClassifiedError::business(409, "duplicate").is_retryable());
        assert!(!ClassifiedError::validation("bad").is_retryable());
        assert!(!ClassifiedError::not_found("t-1").is_retryable());
    }

    #[test]
    fn test_display_includes_kind_and_code() {
        let err = ClassifiedError::business(409, "duplicate");
        assert_eq!(err.to_string(), "business error (code 409): duplicate");
    }
}
