//! Configuration module
//!
//! Handles CLI configuration: the service base URL from the command line,
//! layered over the engine settings from the environment.

use anyhow::{Context, Result};
use hireflow_engine::config::EngineConfig;
use tracing::debug;

/// CLI configuration
#[derive(Debug, Clone)]
pub struct Config {
    /// Base URL of the recruitment service API
    pub base_url: String,
}

impl Config {
    /// Engine settings with the CLI base URL applied
    pub fn engine(&self) -> Result<EngineConfig> {
        let config = EngineConfig::from_env()
            .context("Invalid HIREFLOW_* environment configuration")?
            .with_base_url(self.base_url.clone());
        config.validate().context("Invalid --base-url")?;
        debug!("Using service at {}", config.base_url);
        Ok(config)
    }
}
