//! Hireflow HTTP Client
//!
//! Typed access to the recruitment service API. Every JSON endpoint answers
//! with a `{code, message, data}` envelope; the client unwraps it and turns
//! any non-success into a [`ClientError`], which [`ClientError::classify`]
//! maps onto the classified errors callers see.
//!
//! # Example
//!
//! ```no_run
//! use hireflow_client::ServiceClient;
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let client = ServiceClient::new("http://localhost:8000/api");
//!
//!     let listing = client.list_resumes(&Default::default()).await?;
//!     println!("{} resumes", listing.total);
//!     Ok(())
//! }
//! ```

pub mod endpoints;
pub mod error;
mod jobs;
mod reports;
mod resumes;

// Re-export commonly used types
pub use error::{ClientError, Result};
pub use jobs::JobService;
pub use reports::{DownloadedReport, filename_from_disposition};
pub use resumes::ResumeQuery;

use std::sync::{Arc, RwLock};
use std::time::Duration;

use hireflow_core::dto::envelope::Envelope;
use reqwest::{Client, RequestBuilder};
use serde_json::Value as JsonValue;

/// Shared, runtime-replaceable base URL
///
/// Every request reads the current value, so an override takes effect on
/// the next call without rebuilding the client.
#[derive(Debug, Clone)]
pub struct BaseUrl(Arc<RwLock<String>>);

impl BaseUrl {
    pub fn new(url: impl Into<String>) -> Self {
        Self(Arc::new(RwLock::new(normalize(url.into()))))
    }

    pub fn get(&self) -> String {
        self.0.read().unwrap_or_else(|e| e.into_inner()).clone()
    }

    pub fn set(&self, url: impl Into<String>) {
        *self.0.write().unwrap_or_else(|e| e.into_inner()) = normalize(url.into());
    }
}

fn normalize(url: String) -> String {
    url.trim_end_matches('/').to_string()
}

/// HTTP client for the recruitment service API
///
/// Endpoints are grouped by area:
/// - Job submission, status and cancellation ([`JobService`])
/// - Screening report downloads
/// - Resume listing and the resume generation dev tool
#[derive(Debug, Clone)]
pub struct ServiceClient {
    /// Base URL of the API (e.g., "http://localhost:8000/api")
    base_url: BaseUrl,
    /// HTTP client instance
    client: Client,
}

impl ServiceClient {
    /// Create a new service client
    ///
    /// # Example
    /// ```
    /// use hireflow_client::ServiceClient;
    ///
    /// let client = ServiceClient::new("http://localhost:8000/api");
    /// ```
    pub fn new(base_url: impl Into<String>) -> Self {
        Self::with_client(base_url, Client::new())
    }

    /// Create a new service client with a custom HTTP client
    ///
    /// Timeouts are set per request from the timeout policy and override
    /// any client-wide timeout.
    pub fn with_client(base_url: impl Into<String>, client: Client) -> Self {
        Self {
            base_url: BaseUrl::new(base_url),
            client,
        }
    }

    /// Current base URL
    pub fn base_url(&self) -> String {
        self.base_url.get()
    }

    /// Replace the base URL for all subsequent requests
    pub fn set_base_url(&self, url: impl Into<String>) {
        self.base_url.set(url);
    }

    pub(crate) fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url.get(), path)
    }

    // =============================================================================
    // Response Handlers
    // =============================================================================

    /// Send a request and unwrap the response envelope
    pub(crate) async fn send_enveloped(
        &self,
        request: RequestBuilder,
        budget: Duration,
    ) -> Result<JsonValue> {
        let response = request
            .timeout(budget)
            .send()
            .await
            .map_err(|e| ClientError::from_reqwest(e, budget))?;

        let status = response.status().as_u16();
        let body = response
            .bytes()
            .await
            .map_err(|e| ClientError::from_reqwest(e, budget))?;

        interpret_envelope(status, &body)
    }
}

/// Interpret a raw response as an envelope
///
/// Non-2xx statuses become [`ClientError::Http`] regardless of body. An
/// empty 2xx body (`204 No Content` from deletes) yields `null`. Any other
/// 2xx body that is not an envelope is a parse error, and an envelope with
/// a code outside the success set is a [`ClientError::Business`].
pub fn interpret_envelope(status: u16, body: &[u8]) -> Result<JsonValue> {
    if !(200..300).contains(&status) {
        return Err(ClientError::Http {
            status,
            message: remote_message(body),
        });
    }

    if body.iter().all(u8::is_ascii_whitespace) {
        return Ok(JsonValue::Null);
    }

    let envelope: Envelope = serde_json::from_slice(body)
        .map_err(|e| ClientError::Parse(format!("Failed to parse envelope: {}", e)))?;

    if !envelope.is_success() {
        return Err(ClientError::Business {
            code: envelope.code,
            message: envelope.message.unwrap_or_default(),
            data: envelope.data,
        });
    }

    Ok(envelope.data.unwrap_or(JsonValue::Null))
}

/// `message` of an error body, if it has one
pub(crate) fn remote_message(body: &[u8]) -> Option<String> {
    let value: JsonValue = serde_json::from_slice(body).ok()?;
    value
        .get("message")
        .and_then(JsonValue::as_str)
        .filter(|m| !m.trim().is_empty())
        .map(str::to_string)
}
