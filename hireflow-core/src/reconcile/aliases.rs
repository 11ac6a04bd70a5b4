//! Field alias table
//!
//! Each entry lists the current field name first, then the names older
//! backends used for the same value. Resolution stops at the first
//! non-null hit.

use crate::domain::job::JobKind;

// Job lifecycle
pub const JOB_ID: &[&str] = &["task_id", "id", "job_id"];
pub const STATUS: &[&str] = &["status", "state", "task_status"];
pub const PROGRESS: &[&str] = &["progress", "percent"];
pub const CURRENT_STEP: &[&str] = &["current_step"];
pub const TOTAL_STEPS: &[&str] = &["total_steps"];
pub const COMPLETED_FLAG: &[&str] = &["is_completed"];
pub const ERROR_MESSAGE: &[&str] = &["error_message", "error"];
pub const ERROR_CODE: &[&str] = &["error_code"];
/// Task endpoints may nest the finished payload under this key
pub const RESULT_WRAPPER: &str = "result";

// Screening
pub const SCREENED_RESUMES: &[&str] = &["resumes", "resume_data"];
pub const REPORTS: &[&str] = &["reports"];
pub const REPORT_ID: &[&str] = &["report_id", "id"];
pub const REPORT_FILENAME: &[&str] = &["report_filename", "filename"];
pub const DOWNLOAD_URL: &[&str] = &["download_url", "url"];
pub const POSITION_INFO: &[&str] = &["position_info", "position"];
pub const CURRENT_SPEAKER: &[&str] = &["current_speaker"];
pub const SCREENING_SCORE: &[&str] = &["screening_score", "scores", "screening_result"];
pub const COMPREHENSIVE_SCORE: &[&str] = &["comprehensive_score", "score"];
pub const SCREENING_SUMMARY: &[&str] = &["screening_summary", "summary"];
pub const RESUME_CONTENT: &[&str] = &["resume_content", "content"];

// Resume grouping: "group" was folded into "position"
pub const POSITION_ID: &[&str] = &["position_id", "group_id"];
pub const POSITION_TITLE: &[&str] = &["position_title", "group_name"];

// Video analysis
pub const VIDEO_ID: &[&str] = &["id", "video_id"];
pub const VIDEO_SCORES_WRAPPER: &str = "analysis_result";
pub const RESUME_DATA_ID: &[&str] = &["resume_data_id", "resume_id"];

// Interview assistance
pub const QUESTION_POOL: &[&str] = &["question_pool", "questions"];
pub const QUESTION_TEXT: &[&str] = &["question", "content"];
pub const ROUND_NUMBER: &[&str] = &["round_number", "round"];
pub const CANDIDATE_QUESTIONS: &[&str] = &["candidate_questions", "followup_suggestions"];
pub const REPORT_WRAPPER: &str = "report";

// Recommendation
pub const COMPREHENSIVE_REPORT: &[&str] = &["comprehensive_report", "report"];

// Listings: the "library" resource was renamed to "resumes"
pub const LISTED_RESUMES: &[&str] = &["resumes", "items"];
pub const ADDED_RESUMES: &[&str] = &["added", "uploaded"];
pub const ADDED_COUNT: &[&str] = &["added_count", "uploaded_count"];

/// Fields whose presence means the payload is already a finished result
///
/// Older backends answered the generative calls synchronously with the
/// result itself and no status field.
pub fn completion_markers(kind: JobKind) -> &'static [&'static str] {
    match kind {
        JobKind::Screening | JobKind::VideoAnalysis => &[],
        JobKind::InterviewQuestionGen => &["question_pool", "questions"],
        JobKind::QaRound => &["round_number", "candidate_questions", "followup_suggestions"],
        JobKind::ReportGeneration => &["report", "overall_assessment"],
        JobKind::RecommendationAnalysis => &["final_score", "comprehensive_report"],
    }
}
