//! Response reconciliation
//!
//! The remote API renamed fields across versions and some endpoints wrap
//! their payload (`{report: {...}}`). Reconciliation maps whatever arrived
//! onto the canonical types, falling back to typed defaults instead of
//! failing, so neither an older nor a newer backend can break the client.
//!
//! All functions here are pure. Reconciling a payload that is already in
//! canonical form returns the same value.

pub mod aliases;
mod fields;
mod listing;
mod results;

pub use listing::{reconcile_generated, reconcile_listing};

use serde_json::Value;

use crate::domain::error::ClassifiedError;
use crate::domain::job::{JobKind, JobStatus};
use crate::domain::result::JobResult;
use aliases::*;
use fields::{Fields, flatten};

/// Remote job state after reconciliation
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RemoteState {
    /// `None` when the payload carries no recognisable status
    pub status: Option<JobStatus>,
    pub progress: Option<u8>,
    /// Set when `status` is `failed`
    pub failure: Option<ClassifiedError>,
    /// Set when `status` is `completed`
    pub result: Option<JobResult>,
}

/// What a submission response tells us about the new job
#[derive(Debug, Clone, PartialEq)]
pub struct SubmitAck {
    pub job_id: Option<String>,
    /// The response already is the final payload
    pub inline: bool,
}

/// Maps a raw payload onto the canonical result for `kind`
pub fn reconcile(kind: JobKind, raw: &Value) -> JobResult {
    let payload = flatten(raw, RESULT_WRAPPER);
    match kind {
        JobKind::Screening => JobResult::Screening(results::screening(&payload)),
        JobKind::VideoAnalysis => JobResult::VideoAnalysis(results::video_analysis(&payload)),
        JobKind::InterviewQuestionGen => {
            JobResult::InterviewQuestions(results::question_set(&payload))
        }
        JobKind::QaRound => JobResult::QaRound(results::qa_round(&payload)),
        JobKind::ReportGeneration => JobResult::Report(results::interview_report(&payload)),
        JobKind::RecommendationAnalysis => {
            JobResult::Recommendation(results::recommendation(&payload))
        }
    }
}

/// Reconciles a status payload into lifecycle state
pub fn reconcile_state(kind: JobKind, raw: &Value) -> RemoteState {
    let f = Fields::of(raw);

    let status = match f.string(STATUS) {
        Some(reported) => parse_status(&reported),
        None => inferred_completion(kind, f),
    };

    let failure = (status == Some(JobStatus::Failed)).then(|| {
        ClassifiedError::business(
            f.integer(ERROR_CODE),
            f.string(ERROR_MESSAGE)
                .filter(|m| !m.trim().is_empty())
                .unwrap_or_else(|| "job failed".to_string()),
        )
    });

    let result = (status == Some(JobStatus::Completed)).then(|| reconcile(kind, raw));

    RemoteState {
        status,
        progress: progress(f),
        failure,
        result,
    }
}

/// Reconciles a submission response
pub fn acknowledge(kind: JobKind, raw: &Value) -> SubmitAck {
    let f = Fields::of(raw);
    let id_aliases: &[&str] = match kind {
        JobKind::VideoAnalysis => VIDEO_ID,
        _ => JOB_ID,
    };

    SubmitAck {
        job_id: f.string(id_aliases).filter(|id| !id.trim().is_empty()),
        inline: reconcile_state(kind, raw)
            .status
            .is_some_and(|status| status.is_terminal()),
    }
}

/// Maps the remote status vocabulary onto [`JobStatus`]
pub fn parse_status(reported: &str) -> Option<JobStatus> {
    match reported.trim().to_ascii_lowercase().as_str() {
        "pending" | "queued" | "waiting" => Some(JobStatus::Queued),
        "running" | "processing" | "in_progress" => Some(JobStatus::Running),
        "completed" | "success" | "succeeded" | "done" => Some(JobStatus::Completed),
        "failed" | "error" => Some(JobStatus::Failed),
        "cancelled" | "canceled" | "stopped" => Some(JobStatus::Cancelled),
        _ => None,
    }
}

fn inferred_completion(kind: JobKind, f: Fields<'_>) -> Option<JobStatus> {
    if f.flag(COMPLETED_FLAG) {
        return Some(JobStatus::Completed);
    }
    let markers = completion_markers(kind);
    let nested = f.nested(&[RESULT_WRAPPER]);
    (f.has_any(markers) || nested.has_any(markers)).then_some(JobStatus::Completed)
}

fn progress(f: Fields<'_>) -> Option<u8> {
    if let Some(percent) = f.number_opt(PROGRESS) {
        return Some(percent.clamp(0.0, 100.0).round() as u8);
    }

    let step = f.number(CURRENT_STEP);
    let total = f.number(TOTAL_STEPS);
    (total > 0.0).then(|| (step / total * 100.0).clamp(0.0, 100.0).round() as u8)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::result::{JobResult, QaRoundResult};
    use serde_json::json;

    #[test]
    fn test_parse_status_vocabulary() {
        assert_eq!(parse_status("pending"), Some(JobStatus::Queued));
        assert_eq!(parse_status("Processing"), Some(JobStatus::Running));
        assert_eq!(parse_status("completed"), Some(JobStatus::Completed));
        assert_eq!(parse_status("failed"), Some(JobStatus::Failed));
        assert_eq!(parse_status("canceled"), Some(JobStatus::Cancelled));
        assert_eq!(parse_status("paused"), None);
    }

    #[test]
    fn test_screening_status_legacy_and_current_agree() {
        let legacy = json!({
            "task_id": "t-1",
            "status": "completed",
            "progress": 100,
            "reports": [{"report_id": "r-1", "position_info": {"position": "Backend"}}],
            "resume_data": [{"id": "rd-1", "candidate_name": "Lin", "scores": {"comprehensive_score": 82}, "summary": "solid"}]
        });
        let current = json!({
            "task_id": "t-1",
            "status": "completed",
            "progress": 100,
            "reports": [{"report_id": "r-1", "position_title": "Backend"}],
            "resumes": [{"id": "rd-1", "candidate_name": "Lin", "position_title": "Backend", "screening_score": {"comprehensive_score": 82}, "screening_summary": "solid"}]
        });

        let a = reconcile_state(JobKind::Screening, &legacy);
        let b = reconcile_state(JobKind::Screening, &current);
        assert_eq!(a.status, Some(JobStatus::Completed));
        assert_eq!(a.result, b.result);

        let Some(JobResult::Screening(result)) = a.result else {
            panic!("expected screening result");
        };
        assert_eq!(result.resumes[0].position_title.as_deref(), Some("Backend"));
        assert_eq!(result.resumes[0].screening_score.comprehensive_score, 82.0);
        assert_eq!(result.resumes[0].screening_score.hr_score, 0.0);
    }

    #[test]
    fn test_group_fields_map_to_position() {
        let raw = json!({"resume_data": [{"id": "rd-1", "group_id": "g-7", "group_name": "Data"}]});
        let JobResult::Screening(result) = reconcile(JobKind::Screening, &raw) else {
            panic!("expected screening result");
        };
        assert_eq!(result.resumes[0].position_id.as_deref(), Some("g-7"));
        assert_eq!(result.resumes[0].position_title.as_deref(), Some("Data"));
    }

    #[test]
    fn test_bare_number_score() {
        let raw = json!({"resumes": [{"screening_score": "77.5"}]});
        let JobResult::Screening(result) = reconcile(JobKind::Screening, &raw) else {
            panic!("expected screening result");
        };
        assert_eq!(result.resumes[0].screening_score.comprehensive_score, 77.5);
    }

    #[test]
    fn test_reconcile_is_idempotent_on_canonical_input() {
        let samples = [
            (JobKind::Screening, json!({"reports": [{"id": "r-1"}], "resume_data": [{"scores": {"hr_score": 5}}], "current_speaker": "hr"})),
            (JobKind::VideoAnalysis, json!({"id": "v-1", "status": "completed", "analysis_result": {"fraud_score": 0.1, "openness_score": 0.7}})),
            (JobKind::InterviewQuestionGen, json!({"questions": [{"content": "Tell me about Rust", "difficulty": 3}], "resume_highlights": ["OSS"]})),
            (JobKind::QaRound, json!({"round": 2, "followup_suggestions": [{"question": "Why?", "purpose": "depth", "difficulty": 2}], "evaluation": {"normalized_score": 71, "dimension_scores": {"honesty": 9}}})),
            (JobKind::ReportGeneration, json!({"report": {"overall_assessment": {"recommendation_score": 88}, "highlights": ["clear"]}, "report_file_url": "/r.md"})),
            (JobKind::RecommendationAnalysis, json!({"report": {"final_score": 91, "recommendation": {"level": "strong"}, "dimension_scores": {"skill": {"dimension_score": 90, "sub_scores": {"rust": 95}}}}})),
        ];

        for (kind, raw) in samples {
            let once = reconcile(kind, &raw);
            let canonical = serde_json::to_value(&once).unwrap();
            let twice = reconcile(kind, &canonical);
            assert_eq!(once, twice, "reconcile is not idempotent for {}", kind);
        }
    }

    #[test]
    fn test_report_wrapper_is_flattened() {
        let raw = json!({
            "report": {
                "overall_assessment": {"recommendation_score": 88, "recommendation": "hire", "summary": "good"},
                "highlights": ["clear"],
                "red_flags": [],
                "overconfidence_detected": false
            },
            "report_file_url": null
        });
        let JobResult::Report(report) = reconcile(JobKind::ReportGeneration, &raw) else {
            panic!("expected report");
        };
        assert_eq!(report.overall_assessment.recommendation_score, 88.0);
        assert_eq!(report.overall_assessment.recommendation.as_deref(), Some("hire"));
        assert_eq!(report.highlights, vec!["clear".to_string()]);
        assert_eq!(report.report_file_url, None);
    }

    #[test]
    fn test_missing_numeric_fields_default_to_zero() {
        let raw = json!({"final_score": null, "recommendation": {}});
        let JobResult::Recommendation(result) = reconcile(JobKind::RecommendationAnalysis, &raw) else {
            panic!("expected recommendation");
        };
        assert_eq!(result.final_score, 0.0);
        assert_eq!(result.recommendation.score, 0.0);
        assert_eq!(result.comprehensive_report, None);
    }

    #[test]
    fn test_inline_payload_counts_as_completed() {
        let raw = json!({"round_number": 3, "evaluation": null, "candidate_questions": [], "hr_action_hints": []});
        let state = reconcile_state(JobKind::QaRound, &raw);
        assert_eq!(state.status, Some(JobStatus::Completed));
        assert_eq!(
            state.result,
            Some(JobResult::QaRound(QaRoundResult {
                round_number: 3,
                ..Default::default()
            }))
        );

        let ack = acknowledge(JobKind::QaRound, &raw);
        assert!(ack.inline);
        assert_eq!(ack.job_id, None);
    }

    #[test]
    fn test_async_ack_is_not_inline() {
        let ack = acknowledge(JobKind::Screening, &json!({"task_id": "t-9", "status": "pending", "progress": 0}));
        assert_eq!(ack.job_id.as_deref(), Some("t-9"));
        assert!(!ack.inline);

        let ack = acknowledge(JobKind::VideoAnalysis, &json!({"id": "v-3", "status": "pending"}));
        assert_eq!(ack.job_id.as_deref(), Some("v-3"));
    }

    #[test]
    fn test_task_endpoint_result_wrapper() {
        let raw = json!({"task_id": "q-1", "status": "completed", "result": {"question_pool": [{"question": "Ownership?"}]}});
        let state = reconcile_state(JobKind::InterviewQuestionGen, &raw);
        let Some(JobResult::InterviewQuestions(set)) = state.result else {
            panic!("expected question set");
        };
        assert_eq!(set.question_pool[0].question, "Ownership?");
    }

    #[test]
    fn test_progress_from_steps_and_clamping() {
        let state = reconcile_state(JobKind::Screening, &json!({"status": "running", "current_step": 1, "total_steps": 4}));
        assert_eq!(state.progress, Some(25));

        let state = reconcile_state(JobKind::Screening, &json!({"status": "running", "progress": 140}));
        assert_eq!(state.progress, Some(100));

        let state = reconcile_state(JobKind::Screening, &json!({"status": "running"}));
        assert_eq!(state.progress, None);
    }

    #[test]
    fn test_failed_status_carries_remote_message() {
        let state = reconcile_state(JobKind::VideoAnalysis, &json!({"status": "failed", "error_message": "codec not supported"}));
        let failure = state.failure.unwrap();
        assert_eq!(failure.message, "codec not supported");
        assert_eq!(failure.code, 0);

        let state = reconcile_state(JobKind::VideoAnalysis, &json!({"status": "failed", "error_message": ""}));
        assert_eq!(state.failure.unwrap().message, "job failed");
    }

    #[test]
    fn test_unknown_status_is_left_unset() {
        let state = reconcile_state(JobKind::Screening, &json!({"status": "paused", "progress": 10}));
        assert_eq!(state.status, None);
        assert_eq!(state.result, None);
    }
}
