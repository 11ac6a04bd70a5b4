//! Scripted in-memory `JobService` for engine tests

use std::collections::{HashMap, VecDeque};
use std::sync::Mutex;
use std::time::Duration;

use async_trait::async_trait;
use hireflow_client::error::{ClientError, Result};
use hireflow_client::JobService;
use hireflow_core::domain::job::Job;
use hireflow_core::dto::submission::Submission;
use serde_json::{Value, json};

/// A canned remote answer
#[derive(Debug, Clone)]
pub(crate) enum Reply {
    Data(Value),
    Business(i64, &'static str),
    Timeout,
}

impl Reply {
    fn into_result(self) -> Result<Value> {
        match self {
            Reply::Data(value) => Ok(value),
            Reply::Business(code, message) => Err(ClientError::Business {
                code,
                message: message.to_string(),
                data: None,
            }),
            Reply::Timeout => Err(ClientError::Timeout {
                after: Duration::from_secs(60),
            }),
        }
    }
}

#[derive(Default)]
struct Script {
    submits: VecDeque<Reply>,
    statuses: HashMap<String, VecDeque<Reply>>,
    cancels: VecDeque<Reply>,
}

#[derive(Default)]
struct Calls {
    submits: usize,
    statuses: HashMap<String, usize>,
    cancels: Vec<String>,
    in_flight: HashMap<String, usize>,
    max_in_flight: usize,
    total_in_flight: usize,
    max_total_in_flight: usize,
}

/// Fake remote service
///
/// Submissions without a scripted reply get a fresh `task_id`. Status polls
/// without a scripted reply report `running`. `status_delay` holds every
/// status response for that long.
#[derive(Default)]
pub(crate) struct FakeService {
    script: Mutex<Script>,
    calls: Mutex<Calls>,
    status_delay: Mutex<Duration>,
}

impl FakeService {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    pub(crate) fn script_submit(&self, reply: Reply) {
        self.script.lock().unwrap().submits.push_back(reply);
    }

    pub(crate) fn script_status(&self, id: &str, reply: Reply) {
        self.script
            .lock()
            .unwrap()
            .statuses
            .entry(id.to_string())
            .or_default()
            .push_back(reply);
    }

    pub(crate) fn script_cancel(&self, reply: Reply) {
        self.script.lock().unwrap().cancels.push_back(reply);
    }

    pub(crate) fn set_status_delay(&self, delay: Duration) {
        *self.status_delay.lock().unwrap() = delay;
    }

    pub(crate) fn submit_calls(&self) -> usize {
        self.calls.lock().unwrap().submits
    }

    pub(crate) fn status_calls(&self, id: &str) -> usize {
        self.calls.lock().unwrap().statuses.get(id).copied().unwrap_or(0)
    }

    pub(crate) fn total_status_calls(&self) -> usize {
        self.calls.lock().unwrap().statuses.values().sum()
    }

    pub(crate) fn cancelled(&self) -> Vec<String> {
        self.calls.lock().unwrap().cancels.clone()
    }

    /// Highest number of concurrent polls seen across all jobs
    pub(crate) fn max_in_flight_total(&self) -> usize {
        self.calls.lock().unwrap().max_total_in_flight
    }

    /// Highest number of concurrent polls seen for any single job id
    pub(crate) fn max_in_flight_per_id(&self) -> usize {
        self.calls.lock().unwrap().max_in_flight
    }
}

#[async_trait]
impl JobService for FakeService {
    async fn submit(&self, _submission: &Submission, _timeout: Duration) -> Result<Value> {
        self.calls.lock().unwrap().submits += 1;
        let scripted = self.script.lock().unwrap().submits.pop_front();
        scripted
            .unwrap_or_else(|| {
                Reply::Data(json!({"task_id": uuid::Uuid::new_v4().to_string(), "status": "pending"}))
            })
            .into_result()
    }

    async fn status(&self, job: &Job, _timeout: Duration) -> Result<Value> {
        {
            let mut calls = self.calls.lock().unwrap();
            *calls.statuses.entry(job.id.clone()).or_default() += 1;
            let in_flight = calls.in_flight.entry(job.id.clone()).or_default();
            *in_flight += 1;
            let current = *in_flight;
            calls.max_in_flight = calls.max_in_flight.max(current);
            calls.total_in_flight += 1;
            calls.max_total_in_flight = calls.max_total_in_flight.max(calls.total_in_flight);
        }

        let delay = *self.status_delay.lock().unwrap();
        if !delay.is_zero() {
            tokio::time::sleep(delay).await;
        }

        let scripted = self
            .script
            .lock()
            .unwrap()
            .statuses
            .get_mut(&job.id)
            .and_then(VecDeque::pop_front);

        {
            let mut calls = self.calls.lock().unwrap();
            calls.total_in_flight -= 1;
            if let Some(in_flight) = calls.in_flight.get_mut(&job.id) {
                *in_flight -= 1;
            }
        }

        scripted
            .unwrap_or_else(|| Reply::Data(json!({"status": "running"})))
            .into_result()
    }

    async fn cancel(&self, job: &Job, _timeout: Duration) -> Result<()> {
        self.calls.lock().unwrap().cancels.push(job.id.clone());
        let scripted = self.script.lock().unwrap().cancels.pop_front();
        match scripted {
            Some(reply) => reply.into_result().map(|_| ()),
            None => Ok(()),
        }
    }
}
