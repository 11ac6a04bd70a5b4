//! Hireflow job engine
//!
//! Tracks long-running remote operations (screening, video analysis,
//! interview assistance, recommendation) from submission to a terminal
//! state. The engine is built from:
//!
//! - [`registry::JobRegistry`]: single-writer store of tracked jobs
//! - [`governor::ConcurrencyGovernor`]: per-lane bound on in-flight calls
//! - [`scheduler::Poller`]: deduplicated, self-suspending status polling
//! - [`orchestrator::TaskOrchestrator`]: the public façade
//!
//! # Example
//!
//! ```no_run
//! use std::sync::Arc;
//!
//! use hireflow_client::ServiceClient;
//! use hireflow_core::dto::submission::Submission;
//! use hireflow_engine::config::EngineConfig;
//! use hireflow_engine::orchestrator::TaskOrchestrator;
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let config = EngineConfig::from_env()?;
//!     let client = Arc::new(ServiceClient::new(config.base_url.clone()));
//!     let engine = TaskOrchestrator::new(&config, client);
//!
//!     let job = engine
//!         .submit(Submission::RecommendationAnalysis {
//!             resume_id: "3f2c".to_string(),
//!         })
//!         .await?;
//!     println!("tracking {}", job.id);
//!     Ok(())
//! }
//! ```

pub mod config;
pub mod governor;
pub mod orchestrator;
pub mod registry;
pub mod scheduler;

#[cfg(test)]
mod testing;

pub use orchestrator::{CancelOutcome, TaskOrchestrator};
pub use registry::{RegistryEvent, SubscriptionId};
