//! Engine configuration
//!
//! Defines the tunable parameters of the engine: where the service lives,
//! how often jobs are polled, how many requests may be in flight per lane,
//! and the generic message used when a failure carries no usable text.

use std::time::Duration;

pub const DEFAULT_BASE_URL: &str = "http://localhost:8000/api";
pub const DEFAULT_POLL_INTERVAL: Duration = Duration::from_millis(3000);
pub const DEFAULT_MAX_CONCURRENT_SUBMITS: usize = 4;
pub const DEFAULT_MAX_CONCURRENT_POLLS: usize = 8;
pub const DEFAULT_NETWORK_FAILURE_MESSAGE: &str = "Network request failed";

/// Engine configuration
#[derive(Debug, Clone)]
pub struct EngineConfig {
    /// Service base URL (e.g., "http://localhost:8000/api")
    pub base_url: String,

    /// Period of the status poll tick
    pub poll_interval: Duration,

    /// Maximum in-flight submissions and cancellations
    pub max_concurrent_submits: usize,

    /// Maximum in-flight status polls
    pub max_concurrent_polls: usize,

    /// Message used for network failures without a transport message
    pub network_failure_message: String,
}

impl EngineConfig {
    /// Creates a new configuration with defaults
    pub fn new(base_url: String) -> Self {
        Self {
            base_url,
            poll_interval: DEFAULT_POLL_INTERVAL,
            max_concurrent_submits: DEFAULT_MAX_CONCURRENT_SUBMITS,
            max_concurrent_polls: DEFAULT_MAX_CONCURRENT_POLLS,
            network_failure_message: DEFAULT_NETWORK_FAILURE_MESSAGE.to_string(),
        }
    }

    /// Creates configuration from environment variables
    ///
    /// Expected environment variables (all optional):
    /// - HIREFLOW_BASE_URL (default: http://localhost:8000/api)
    /// - HIREFLOW_POLL_INTERVAL_MS (default: 3000)
    /// - HIREFLOW_MAX_CONCURRENT_SUBMITS (default: 4)
    /// - HIREFLOW_MAX_CONCURRENT_POLLS (default: 8)
    /// - HIREFLOW_NETWORK_FAILURE_MESSAGE (default: "Network request failed")
    pub fn from_env() -> anyhow::Result<Self> {
        let base_url =
            std::env::var("HIREFLOW_BASE_URL").unwrap_or_else(|_| DEFAULT_BASE_URL.to_string());

        let poll_interval = std::env::var("HIREFLOW_POLL_INTERVAL_MS")
            .ok()
            .and_then(|s| s.parse::<u64>().ok())
            .map(Duration::from_millis)
            .unwrap_or(DEFAULT_POLL_INTERVAL);

        let max_concurrent_submits = std::env::var("HIREFLOW_MAX_CONCURRENT_SUBMITS")
            .ok()
            .and_then(|s| s.parse::<usize>().ok())
            .unwrap_or(DEFAULT_MAX_CONCURRENT_SUBMITS);

        let max_concurrent_polls = std::env::var("HIREFLOW_MAX_CONCURRENT_POLLS")
            .ok()
            .and_then(|s| s.parse::<usize>().ok())
            .unwrap_or(DEFAULT_MAX_CONCURRENT_POLLS);

        let network_failure_message = std::env::var("HIREFLOW_NETWORK_FAILURE_MESSAGE")
            .unwrap_or_else(|_| DEFAULT_NETWORK_FAILURE_MESSAGE.to_string());

        let config = Self {
            base_url,
            poll_interval,
            max_concurrent_submits,
            max_concurrent_polls,
            network_failure_message,
        };
        config.validate()?;
        Ok(config)
    }

    /// Overrides the base URL
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    /// Validates the configuration
    pub fn validate(&self) -> anyhow::Result<()> {
        if self.base_url.is_empty() {
            anyhow::bail!("base_url cannot be empty");
        }

        if !self.base_url.starts_with("http://") && !self.base_url.starts_with("https://") {
            anyhow::bail!("base_url must start with http:// or https://");
        }

        if self.poll_interval.is_zero() {
            anyhow::bail!("poll_interval must be greater than 0");
        }

        if self.max_concurrent_submits == 0 {
            anyhow::bail!("max_concurrent_submits must be greater than 0");
        }

        if self.max_concurrent_polls == 0 {
            anyhow::bail!("max_concurrent_polls must be greater than 0");
        }

        if self.network_failure_message.trim().is_empty() {
            anyhow::bail!("network_failure_message cannot be empty");
        }

        Ok(())
    }
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self::new(DEFAULT_BASE_URL.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = EngineConfig::default();
        assert_eq!(config.poll_interval, Duration::from_millis(3000));
        assert_eq!(config.max_concurrent_submits, 4);
        assert_eq!(config.max_concurrent_polls, 8);
        assert_eq!(config.network_failure_message, "Network request failed");
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_config_validation() {
        let mut config = EngineConfig::default();

        config.base_url = "localhost:8000".to_string();
        assert!(config.validate().is_err());

        config.base_url = "https://hr.example.com/api".to_string();
        assert!(config.validate().is_ok());

        config.poll_interval = Duration::ZERO;
        assert!(config.validate().is_err());
        config.poll_interval = DEFAULT_POLL_INTERVAL;

        config.max_concurrent_polls = 0;
        assert!(config.validate().is_err());
        config.max_concurrent_polls = 1;

        config.network_failure_message = " ".to_string();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_with_base_url() {
        let config = EngineConfig::default().with_base_url("http://10.0.0.2:8000/api");
        assert_eq!(config.base_url, "http://10.0.0.2:8000/api");
    }
}
