//! Response envelope
//!
//! Every JSON endpoint answers `{code, message, data}`. The HTTP status can
//! be 200 while `code` still signals a business failure.

use serde::{Deserialize, Serialize};
use serde_json::Value as JsonValue;

/// Envelope codes that count as success
pub const SUCCESS_CODES: [i64; 3] = [200, 201, 202];

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Envelope<T = JsonValue> {
    pub code: i64,
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub data: Option<T>,
}

impl<T> Envelope<T> {
    pub fn is_success(&self) -> bool {
        SUCCESS_CODES.contains(&self.code)
    }
}
