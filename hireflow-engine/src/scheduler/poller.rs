//! Job poller
//!
//! Ticks at a fixed interval and polls every non-terminal job that has no
//! poll in flight. Each poll runs in its own task behind a `poll` permit.
//! Responses are reconciled and applied through the registry writer; a
//! response for a job the registry no longer holds is discarded.
//!
//! Per job id the poller keeps a small state machine:
//! `idle -> polling -> idle` after a non-terminal response or a network
//! failure, `idle -> polling -> stopped` after a terminal response, a
//! business failure, or removal of the job.

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use chrono::Utc;
use hireflow_client::JobService;
use hireflow_core::domain::error::ClassifiedError;
use hireflow_core::domain::job::{ApplyOutcome, Job, Tracking};
use hireflow_core::reconcile::reconcile_state;
use hireflow_core::timeout::{Operation, timeout_for};
use serde_json::Value as JsonValue;
use tokio::task::JoinHandle;
use tokio::time::{self, Duration, Instant, MissedTickBehavior};
use tracing::{debug, error, info, warn};

use crate::governor::{ConcurrencyGovernor, Lane};
use crate::registry::{JobRegistry, UpdateOutcome};

/// Polling state of one job id
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PollState {
    Idle,
    Polling,
    Stopped,
}

#[derive(Default)]
struct Schedule {
    handle: Option<JoinHandle<()>>,
    running: bool,
    shut_down: bool,
}

struct Inner {
    registry: JobRegistry,
    service: Arc<dyn JobService>,
    governor: ConcurrencyGovernor,
    interval: Duration,
    network_failure_message: String,
    states: Mutex<HashMap<String, PollState>>,
    schedule: Mutex<Schedule>,
}

/// Handle to the polling loop
///
/// Cheap to clone; all clones drive the same loop.
#[derive(Clone)]
pub struct Poller {
    inner: Arc<Inner>,
}

impl Poller {
    /// Creates a suspended poller; call [`Poller::ensure_running`] to start it
    pub fn new(
        registry: JobRegistry,
        service: Arc<dyn JobService>,
        governor: ConcurrencyGovernor,
        interval: Duration,
        network_failure_message: impl Into<String>,
    ) -> Self {
        Self {
            inner: Arc::new(Inner {
                registry,
                service,
                governor,
                interval,
                network_failure_message: network_failure_message.into(),
                states: Mutex::new(HashMap::new()),
                schedule: Mutex::new(Schedule::default()),
            }),
        }
    }

    /// Starts the tick loop unless it is already running
    pub fn ensure_running(&self) {
        let mut schedule = self.inner.lock_schedule();
        if schedule.running || schedule.shut_down {
            return;
        }

        info!("Starting job poller (interval: {:?})", self.inner.interval);
        schedule.running = true;
        schedule.handle = Some(tokio::spawn(Inner::run(Arc::clone(&self.inner))));
    }

    /// Whether the tick loop is active
    pub fn is_running(&self) -> bool {
        self.inner.lock_schedule().running
    }

    /// Stops polling `id`; an in-flight poll for it still completes
    pub fn retire(&self, id: &str) {
        self.inner
            .lock_states()
            .insert(id.to_string(), PollState::Stopped);
    }

    /// Drops the per-job state of a job that left the registry
    pub fn forget(&self, id: &str) {
        self.inner.lock_states().remove(id);
    }

    /// Polling state of `id`, if it was ever scheduled
    pub fn state(&self, id: &str) -> Option<PollState> {
        self.inner.lock_states().get(id).copied()
    }

    /// Stops the tick loop for good
    pub fn shutdown(&self) {
        let mut schedule = self.inner.lock_schedule();
        schedule.shut_down = true;
        schedule.running = false;
        if let Some(handle) = schedule.handle.take() {
            handle.abort();
        }
        info!("Job poller shut down");
    }
}

impl Inner {
    async fn run(self: Arc<Self>) {
        let mut ticker = time::interval_at(Instant::now() + self.interval, self.interval);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

        loop {
            ticker.tick().await;

            if !self.tick() {
                break;
            }
        }
    }

    /// One scheduling pass; returns `false` once the loop suspended itself
    fn tick(self: &Arc<Self>) -> bool {
        let jobs = self.registry.list_non_terminal();

        if jobs.is_empty() {
            let mut schedule = self.lock_schedule();
            // A submission may have landed since the snapshot was taken
            if self.registry.list_non_terminal().is_empty() {
                debug!("No jobs to poll, suspending poller");
                schedule.running = false;
                schedule.handle = None;
                return false;
            }
            return true;
        }

        let snapshot = self.registry.snapshot();
        let due: Vec<Job> = {
            let mut states = self.lock_states();
            states.retain(|id, _| snapshot.contains_key(id));

            jobs.into_iter()
                .filter(|job| {
                    let state = states.entry(job.id.clone()).or_insert(PollState::Idle);
                    if *state == PollState::Idle {
                        *state = PollState::Polling;
                        true
                    } else {
                        false
                    }
                })
                .collect()
        };

        if !due.is_empty() {
            debug!("Polling {} job(s)", due.len());
        }

        for job in due {
            let inner = Arc::clone(self);
            tokio::spawn(async move { inner.poll_one(job).await });
        }

        true
    }

    async fn poll_one(&self, job: Job) {
        let response = match job.tracking {
            Tracking::Inline => Ok(job.raw.clone().unwrap_or(JsonValue::Null)),
            Tracking::Remote => {
                let Ok(_permit) = self.governor.acquire(Lane::Poll).await else {
                    debug!("Governor closed, skipping poll of job {}", job.id);
                    self.finish(&job.id, PollState::Idle);
                    return;
                };

                debug!("Polling job {} ({})", job.id, job.kind);
                self.service
                    .status(&job, timeout_for(Operation::StatusPoll(job.kind)))
                    .await
            }
        };

        match response {
            Ok(raw) => self.apply(&job, raw).await,
            Err(e) => {
                let classified = e.classify(&self.network_failure_message);
                if classified.is_retryable() {
                    warn!("Failed to poll job {} ({}): {}", job.id, job.kind, classified);
                    self.finish(&job.id, PollState::Idle);
                    return;
                }

                error!("Job {} ({}) failed remotely: {}", job.id, job.kind, classified);
                let now = Utc::now();
                if let UpdateOutcome::Applied { value, .. } =
                    self.registry.update(&job.id, move |j| j.fail(classified, now)).await
                {
                    log_outcome(&job, &value);
                }
                self.finish(&job.id, PollState::Stopped);
            }
        }
    }

    async fn apply(&self, job: &Job, raw: JsonValue) {
        let state = reconcile_state(job.kind, &raw);
        let now = Utc::now();

        match self.registry.update(&job.id, move |j| j.apply(state, raw, now)).await {
            UpdateOutcome::NotFound => {
                debug!("Discarding poll response: {}", ClassifiedError::not_found(&job.id));
                self.lock_states().remove(&job.id);
            }
            UpdateOutcome::Applied { job: updated, value } => {
                log_outcome(job, &value);
                let next = if updated.is_terminal() {
                    PollState::Stopped
                } else {
                    PollState::Idle
                };
                self.finish(&job.id, next);
            }
        }
    }

    /// Leaves `polling`; a retired job stays stopped
    fn finish(&self, id: &str, next: PollState) {
        let mut states = self.lock_states();
        if let Some(state) = states.get_mut(id) {
            if *state != PollState::Stopped {
                *state = next;
            }
        }
    }

    fn lock_states(&self) -> std::sync::MutexGuard<'_, HashMap<String, PollState>> {
        self.states.lock().unwrap_or_else(|e| e.into_inner())
    }

    fn lock_schedule(&self) -> std::sync::MutexGuard<'_, Schedule> {
        self.schedule.lock().unwrap_or_else(|e| e.into_inner())
    }
}

fn log_outcome(job: &Job, outcome: &ApplyOutcome) {
    if outcome.ignored {
        debug!("Ignoring update for terminal job {}", job.id);
    }
    if let Some((kept, reported)) = outcome.progress_regressed {
        warn!(
            "Job {} reported progress {} after {}, keeping {}",
            job.id, reported, kept, kept
        );
    }
    if let Some((from, to)) = outcome.transition {
        info!("Job {} ({}) {} -> {}", job.id, job.kind, from, to);
    }
}
