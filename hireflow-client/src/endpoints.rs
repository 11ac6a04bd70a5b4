//! Remote endpoint table
//!
//! Paths are relative to the base URL and keep the trailing slash the
//! service routes expect.

use hireflow_core::domain::job::{Job, JobKind};
use hireflow_core::dto::submission::Submission;

use crate::error::{ClientError, Result};

pub const SCREENING: &str = "/screening/";
pub const VIDEOS_UPLOAD: &str = "/videos/upload/";
pub const RESUMES: &str = "/resumes/";
pub const SCREENING_DEV_GENERATE: &str = "/screening/dev/generate-resumes/";

pub fn screening_task_status(id: &str) -> String {
    format!("/screening/tasks/{}/status/", id)
}

pub fn screening_task(id: &str) -> String {
    format!("/screening/tasks/{}/", id)
}

pub fn screening_report_download(id: &str) -> String {
    format!("/screening/reports/{}/download/", id)
}

pub fn video_status(id: &str) -> String {
    format!("/videos/{}/status/", id)
}

pub fn video(id: &str) -> String {
    format!("/videos/{}/", id)
}

pub fn interview_questions(session_id: &str) -> String {
    format!("/interviews/sessions/{}/questions/", session_id)
}

pub fn interview_qa(session_id: &str) -> String {
    format!("/interviews/sessions/{}/qa/", session_id)
}

pub fn interview_report(session_id: &str) -> String {
    format!("/interviews/sessions/{}/report/", session_id)
}

/// Status and cancel path of an asynchronous interview task
///
/// Only reached when a backend answers an interview submission with a
/// `task_id`; synchronous backends complete those jobs inline.
pub fn interview_task(session_id: &str, task_id: &str) -> String {
    format!("/interviews/sessions/{}/tasks/{}/", session_id, task_id)
}

pub fn recommend_analysis(resume_id: &str) -> String {
    format!("/recommend/analysis/{}/", resume_id)
}

/// Path a submission is posted to
pub fn submit_path(submission: &Submission) -> String {
    match submission {
        Submission::Screening { .. } => SCREENING.to_string(),
        Submission::VideoAnalysis(_) => VIDEOS_UPLOAD.to_string(),
        Submission::InterviewQuestionGen { session_id, .. } => interview_questions(session_id),
        Submission::QaRound { session_id, .. } => interview_qa(session_id),
        Submission::ReportGeneration { session_id, .. } => interview_report(session_id),
        Submission::RecommendationAnalysis { resume_id } => recommend_analysis(resume_id),
    }
}

/// Path the job's status is read from
pub fn status_path(job: &Job) -> Result<String> {
    match job.kind {
        JobKind::Screening => Ok(screening_task_status(&job.id)),
        JobKind::VideoAnalysis => Ok(video_status(&job.id)),
        _ => task_path(job),
    }
}

/// Path the job is cancelled through
pub fn cancel_path(job: &Job) -> Result<String> {
    match job.kind {
        JobKind::Screening => Ok(screening_task(&job.id)),
        JobKind::VideoAnalysis => Ok(video(&job.id)),
        _ => task_path(job),
    }
}

fn task_path(job: &Job) -> Result<String> {
    let resource = job.resource.as_deref().ok_or_else(|| {
        ClientError::InvalidRequest(format!("{} job {} has no parent resource", job.kind, job.id))
    })?;

    match job.kind {
        JobKind::RecommendationAnalysis => Ok(recommend_analysis(resource)),
        _ => Ok(interview_task(resource, &job.id)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use hireflow_core::domain::job::Tracking;

    fn job(id: &str, kind: JobKind, resource: Option<&str>) -> Job {
        Job::queued(id, kind, resource.map(str::to_string), Tracking::Remote, None, Utc::now())
    }

    #[test]
    fn test_submit_paths() {
        let sub = Submission::QaRound {
            session_id: "s-2".to_string(),
            record: serde_json::json!({}),
        };
        assert_eq!(submit_path(&sub), "/interviews/sessions/s-2/qa/");

        let sub = Submission::RecommendationAnalysis {
            resume_id: "r-5".to_string(),
        };
        assert_eq!(submit_path(&sub), "/recommend/analysis/r-5/");
    }

    #[test]
    fn test_status_paths() {
        assert_eq!(
            status_path(&job("t-1", JobKind::Screening, None)).unwrap(),
            "/screening/tasks/t-1/status/"
        );
        assert_eq!(
            status_path(&job("v-1", JobKind::VideoAnalysis, None)).unwrap(),
            "/videos/v-1/status/"
        );
        assert_eq!(
            status_path(&job("q-1", JobKind::QaRound, Some("s-1"))).unwrap(),
            "/interviews/sessions/s-1/tasks/q-1/"
        );
        assert_eq!(
            status_path(&job("a-1", JobKind::RecommendationAnalysis, Some("r-1"))).unwrap(),
            "/recommend/analysis/r-1/"
        );
    }

    #[test]
    fn test_cancel_paths() {
        assert_eq!(cancel_path(&job("t-1", JobKind::Screening, None)).unwrap(), "/screening/tasks/t-1/");
        assert_eq!(cancel_path(&job("v-1", JobKind::VideoAnalysis, None)).unwrap(), "/videos/v-1/");
    }

    #[test]
    fn test_missing_resource_is_invalid_request() {
        let err = status_path(&job("q-1", JobKind::ReportGeneration, None)).unwrap_err();
        assert!(matches!(err, ClientError::InvalidRequest(_)));
    }
}
