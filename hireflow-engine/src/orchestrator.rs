//! Task orchestrator
//!
//! Public entry point of the engine. Submissions and cancellations are
//! issued here; every later state change comes from the poller.

use std::sync::Arc;

use chrono::Utc;
use hireflow_client::JobService;
use hireflow_core::domain::error::ClassifiedError;
use hireflow_core::domain::job::{Job, Tracking};
use hireflow_core::dto::submission::Submission;
use hireflow_core::reconcile::acknowledge;
use hireflow_core::timeout::{Operation, timeout_for};
use tracing::{debug, error, info, warn};
use uuid::Uuid;

use crate::config::EngineConfig;
use crate::governor::{ConcurrencyGovernor, Lane};
use crate::registry::{JobRegistry, RegistryEvent, SubscriptionId};
use crate::scheduler::Poller;

/// What [`TaskOrchestrator::cancel`] did
#[derive(Debug, Clone, PartialEq)]
pub struct CancelOutcome {
    /// The job was tracked and has been removed
    pub removed: bool,
    /// The remote cancellation failed; local tracking was dropped anyway
    pub remote_error: Option<ClassifiedError>,
}

/// Façade over the registry, poller and remote service
pub struct TaskOrchestrator {
    registry: JobRegistry,
    poller: Poller,
    governor: ConcurrencyGovernor,
    service: Arc<dyn JobService>,
    network_failure_message: String,
}

impl TaskOrchestrator {
    /// Creates the engine; must be called inside a Tokio runtime
    pub fn new(config: &EngineConfig, service: Arc<dyn JobService>) -> Self {
        let registry = JobRegistry::spawn();
        let governor =
            ConcurrencyGovernor::new(config.max_concurrent_submits, config.max_concurrent_polls);
        let poller = Poller::new(
            registry.clone(),
            Arc::clone(&service),
            governor.clone(),
            config.poll_interval,
            config.network_failure_message.clone(),
        );

        Self {
            registry,
            poller,
            governor,
            service,
            network_failure_message: config.network_failure_message.clone(),
        }
    }

    /// Submits a job and starts tracking it
    ///
    /// Failures are returned once and never retried here.
    pub async fn submit(&self, submission: Submission) -> Result<Job, ClassifiedError> {
        let kind = submission.kind();
        submission.validate()?;

        let raw = {
            let _permit = self.acquire(Lane::Submit).await?;
            debug!("Submitting {} job", kind);
            self.service
                .submit(&submission, timeout_for(submission.operation()))
                .await
                .map_err(|e| {
                    let classified = e.classify(&self.network_failure_message);
                    warn!("Failed to submit {} job: {}", kind, classified);
                    classified
                })?
        };

        let ack = acknowledge(kind, &raw);
        let tracking = if ack.inline {
            Tracking::Inline
        } else {
            Tracking::Remote
        };
        let id = match ack.job_id {
            Some(id) => id,
            None if ack.inline => format!("{}-{}", kind, Uuid::new_v4()),
            None => {
                warn!("Submission of {} job returned no job id", kind);
                return Err(ClassifiedError::network(
                    500,
                    "submission response carried no job id",
                ));
            }
        };

        let job = Job::queued(
            id,
            kind,
            submission.resource().map(str::to_string),
            tracking,
            Some(raw),
            Utc::now(),
        );
        self.registry.put(job.clone()).await.map_err(|e| {
            error!("Failed to track {} job {}: {}", kind, job.id, e);
            ClassifiedError::network(500, e.to_string())
        })?;
        self.poller.ensure_running();

        info!("Submitted {} job {}", kind, job.id);
        Ok(job)
    }

    /// Cancels a job remotely and stops tracking it
    ///
    /// The job is removed even if the remote call fails. Jobs whose result
    /// arrived inline have nothing running remotely and are only removed.
    pub async fn cancel(&self, id: &str) -> CancelOutcome {
        let Some(job) = self.registry.get(id) else {
            debug!("Cancel requested for untracked job {}", id);
            return CancelOutcome {
                removed: false,
                remote_error: None,
            };
        };

        self.poller.retire(id);

        let remote_error = match job.tracking {
            Tracking::Inline => None,
            Tracking::Remote => self.cancel_remote(&job).await.err(),
        };

        let removed = match self.registry.remove(id).await {
            Ok(removed) => removed.is_some(),
            Err(e) => {
                error!("Failed to remove job {}: {}", id, e);
                false
            }
        };
        self.poller.forget(id);

        info!("Cancelled {} job {}", job.kind, id);
        CancelOutcome {
            removed,
            remote_error,
        }
    }

    async fn cancel_remote(&self, job: &Job) -> Result<(), ClassifiedError> {
        let _permit = self.acquire(Lane::Submit).await?;
        self.service
            .cancel(job, timeout_for(Operation::Cancel(job.kind)))
            .await
            .map_err(|e| {
                let classified = e.classify(&self.network_failure_message);
                warn!("Failed to cancel job {} remotely: {}", job.id, classified);
                classified
            })
    }

    /// Stops tracking a job without contacting the service
    pub async fn evict(&self, id: &str) -> Option<Job> {
        self.poller.retire(id);
        let removed = self.registry.remove(id).await.ok().flatten();
        self.poller.forget(id);
        removed
    }

    /// Current state of a tracked job
    pub fn get(&self, id: &str) -> Option<Job> {
        self.registry.get(id)
    }

    /// All tracked jobs, oldest first
    pub fn jobs(&self) -> Vec<Job> {
        let mut jobs: Vec<Job> = self.registry.snapshot().values().cloned().collect();
        jobs.sort_by(|a, b| a.submitted_at.cmp(&b.submitted_at).then_with(|| a.id.cmp(&b.id)));
        jobs
    }

    /// Invokes `listener` after every registry mutation
    pub fn subscribe(
        &self,
        listener: impl Fn(&RegistryEvent) + Send + Sync + 'static,
    ) -> SubscriptionId {
        self.registry.subscribe(listener)
    }

    /// Removes a listener; unsubscribing twice is harmless
    pub fn unsubscribe(&self, id: SubscriptionId) -> bool {
        self.registry.unsubscribe(id)
    }

    /// Stops polling and fails every caller waiting for a permit
    pub fn shutdown(&self) {
        self.poller.shutdown();
        self.governor.close();
    }

    async fn acquire(&self, lane: Lane) -> Result<crate::governor::Permit, ClassifiedError> {
        self.governor
            .acquire(lane)
            .await
            .map_err(|e| ClassifiedError::network(500, e.to_string()))
    }
}
