//! Job domain types

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value as JsonValue;

use crate::domain::error::ClassifiedError;
use crate::domain::result::JobResult;
use crate::reconcile::RemoteState;

/// Kind of remote operation a job represents
///
/// Closed set: each kind has one canonical result shape and its own
/// timeout rule.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum JobKind {
    Screening,
    VideoAnalysis,
    InterviewQuestionGen,
    QaRound,
    ReportGeneration,
    RecommendationAnalysis,
}

impl JobKind {
    pub const ALL: [JobKind; 6] = [
        JobKind::Screening,
        JobKind::VideoAnalysis,
        JobKind::InterviewQuestionGen,
        JobKind::QaRound,
        JobKind::ReportGeneration,
        JobKind::RecommendationAnalysis,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            JobKind::Screening => "screening",
            JobKind::VideoAnalysis => "video_analysis",
            JobKind::InterviewQuestionGen => "interview_question_gen",
            JobKind::QaRound => "qa_round",
            JobKind::ReportGeneration => "report_generation",
            JobKind::RecommendationAnalysis => "recommendation_analysis",
        }
    }
}

impl std::fmt::Display for JobKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for JobKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        JobKind::ALL
            .into_iter()
            .find(|kind| kind.as_str() == s)
            .ok_or_else(|| format!("unknown job kind '{}'", s))
    }
}

/// Job lifecycle status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum JobStatus {
    Queued,
    Running,
    Completed,
    Failed,
    Cancelled,
}

impl JobStatus {
    pub fn is_terminal(&self) -> bool {
        matches!(
            self,
            JobStatus::Completed | JobStatus::Failed | JobStatus::Cancelled
        )
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            JobStatus::Queued => "queued",
            JobStatus::Running => "running",
            JobStatus::Completed => "completed",
            JobStatus::Failed => "failed",
            JobStatus::Cancelled => "cancelled",
        }
    }
}

impl std::fmt::Display for JobStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// How the poller learns about a job's state
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Tracking {
    /// Status is fetched from the remote status endpoint
    Remote,
    /// The submission response already carried the final payload
    Inline,
}

/// A tracked asynchronous remote operation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Job {
    pub id: String,
    pub kind: JobKind,
    pub status: JobStatus,
    pub progress: u8,
    pub submitted_at: DateTime<Utc>,
    pub last_polled_at: Option<DateTime<Utc>>,
    pub result: Option<JobResult>,
    pub error: Option<ClassifiedError>,
    /// Parent resource the job was submitted against (session or resume id)
    pub resource: Option<String>,
    pub tracking: Tracking,
    /// Last unreconciled payload, kept for diagnostics only
    pub raw: Option<JsonValue>,
}

/// What happened when remote state was applied to a job
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ApplyOutcome {
    /// Status change, if any
    pub transition: Option<(JobStatus, JobStatus)>,
    /// Remote progress went backwards: (kept, reported)
    pub progress_regressed: Option<(u8, u8)>,
    /// The job was already terminal and nothing but `raw` changed
    pub ignored: bool,
}

impl ApplyOutcome {
    pub fn reached_terminal(&self) -> bool {
        matches!(self.transition, Some((_, to)) if to.is_terminal())
    }
}

impl Job {
    /// Creates a freshly submitted job in `queued` state
    pub fn queued(
        id: impl Into<String>,
        kind: JobKind,
        resource: Option<String>,
        tracking: Tracking,
        raw: Option<JsonValue>,
        submitted_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id: id.into(),
            kind,
            status: JobStatus::Queued,
            progress: 0,
            submitted_at,
            last_polled_at: None,
            result: None,
            error: None,
            resource,
            tracking,
            raw,
        }
    }

    pub fn is_terminal(&self) -> bool {
        self.status.is_terminal()
    }

    /// Applies reconciled remote state
    ///
    /// Terminal jobs never leave the terminal set and keep their result.
    /// `result` is set only on the transition to `completed`.
    pub fn apply(&mut self, state: RemoteState, raw: JsonValue, at: DateTime<Utc>) -> ApplyOutcome {
        let mut outcome = ApplyOutcome::default();
        self.raw = Some(raw);
        self.last_polled_at = Some(at);

        if self.is_terminal() {
            outcome.ignored = true;
            return outcome;
        }

        if let Some(reported) = state.progress {
            if reported < self.progress {
                outcome.progress_regressed = Some((self.progress, reported));
            } else {
                self.progress = reported;
            }
        }

        let Some(next) = state.status else {
            return outcome;
        };

        match next {
            JobStatus::Completed => {
                self.result = Some(
                    state
                        .result
                        .unwrap_or_else(|| JobResult::empty(self.kind)),
                );
                self.progress = 100;
            }
            JobStatus::Failed => {
                self.error = Some(
                    state
                        .failure
                        .unwrap_or_else(|| ClassifiedError::business(0, "job failed")),
                );
            }
            _ => {}
        }

        if next != self.status {
            outcome.transition = Some((self.status, next));
            self.status = next;
        }

        outcome
    }

    /// Marks the job failed with an already classified error
    pub fn fail(&mut self, error: ClassifiedError, at: DateTime<Utc>) -> ApplyOutcome {
        self.last_polled_at = Some(at);
        if self.is_terminal() {
            return ApplyOutcome {
                ignored: true,
                ..Default::default()
            };
        }

        let from = self.status;
        self.status = JobStatus::Failed;
        self.error = Some(error);
        ApplyOutcome {
            transition: Some((from, JobStatus::Failed)),
            ..Default::default()
        }
    }
}
