//! Canonical result types
//!
//! One shape per job kind, independent of which backend generation
//! produced the payload. Numeric fields default to 0, optional strings to
//! `None`, collections to empty.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::domain::job::JobKind;

/// Result of a completed job, tagged by kind
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum JobResult {
    Screening(ScreeningResult),
    VideoAnalysis(VideoAnalysisResult),
    InterviewQuestions(QuestionSet),
    QaRound(QaRoundResult),
    Report(InterviewReport),
    Recommendation(RecommendationResult),
}

impl JobResult {
    /// Typed empty result for a kind
    pub fn empty(kind: JobKind) -> Self {
        match kind {
            JobKind::Screening => JobResult::Screening(ScreeningResult::default()),
            JobKind::VideoAnalysis => JobResult::VideoAnalysis(VideoAnalysisResult::default()),
            JobKind::InterviewQuestionGen => JobResult::InterviewQuestions(QuestionSet::default()),
            JobKind::QaRound => JobResult::QaRound(QaRoundResult::default()),
            JobKind::ReportGeneration => JobResult::Report(InterviewReport::default()),
            JobKind::RecommendationAnalysis => {
                JobResult::Recommendation(RecommendationResult::default())
            }
        }
    }

    pub fn kind(&self) -> JobKind {
        match self {
            JobResult::Screening(_) => JobKind::Screening,
            JobResult::VideoAnalysis(_) => JobKind::VideoAnalysis,
            JobResult::InterviewQuestions(_) => JobKind::InterviewQuestionGen,
            JobResult::QaRound(_) => JobKind::QaRound,
            JobResult::Report(_) => JobKind::ReportGeneration,
            JobResult::Recommendation(_) => JobKind::RecommendationAnalysis,
        }
    }
}

// =============================================================================
// Screening
// =============================================================================

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ScreeningResult {
    pub reports: Vec<ReportInfo>,
    pub resumes: Vec<ScreenedResume>,
    pub current_speaker: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ReportInfo {
    pub report_id: Option<String>,
    pub report_filename: Option<String>,
    pub download_url: Option<String>,
    pub resume_content: Option<String>,
    pub position_title: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ScreenedResume {
    pub id: Option<String>,
    pub candidate_name: Option<String>,
    pub position_id: Option<String>,
    pub position_title: Option<String>,
    pub screening_score: ScreeningScore,
    pub screening_summary: Option<String>,
    pub resume_content: Option<String>,
    pub report_md_url: Option<String>,
    pub report_json_url: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ScreeningScore {
    pub hr_score: f64,
    pub technical_score: f64,
    pub manager_score: f64,
    pub comprehensive_score: f64,
}

// =============================================================================
// Video analysis
// =============================================================================

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct VideoAnalysisResult {
    pub id: Option<String>,
    pub video_name: Option<String>,
    pub candidate_name: Option<String>,
    pub position_applied: Option<String>,
    pub resume_data_id: Option<String>,
    pub fraud_score: f64,
    pub neuroticism_score: f64,
    pub extraversion_score: f64,
    pub openness_score: f64,
    pub agreeableness_score: f64,
    pub conscientiousness_score: f64,
    pub confidence_score: f64,
    pub summary: Option<String>,
}

// =============================================================================
// Interview assistance
// =============================================================================

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct QuestionSet {
    pub question_pool: Vec<InterviewQuestion>,
    pub resume_highlights: Vec<String>,
    pub interest_points: Vec<InterestPoint>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct InterviewQuestion {
    pub question: String,
    pub category: Option<String>,
    pub difficulty: f64,
    pub expected_skills: Vec<String>,
    pub source: Option<String>,
    pub related_point: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct InterestPoint {
    pub content: String,
    pub question: String,
    pub reason: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct QaRoundResult {
    pub round_number: u64,
    pub evaluation: Option<AnswerEvaluation>,
    pub candidate_questions: Vec<CandidateQuestion>,
    pub hr_action_hints: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AnswerEvaluation {
    pub normalized_score: f64,
    pub dimension_scores: BTreeMap<String, f64>,
    pub confidence_level: Option<String>,
    pub should_followup: bool,
    pub followup_reason: Option<String>,
    pub feedback: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CandidateQuestion {
    pub question: String,
    pub purpose: Option<String>,
    pub expected_skills: Vec<String>,
    pub source: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct InterviewReport {
    pub overall_assessment: OverallAssessment,
    pub dimension_analysis: BTreeMap<String, DimensionComment>,
    pub skill_assessment: Vec<SkillAssessment>,
    pub highlights: Vec<String>,
    pub red_flags: Vec<String>,
    pub overconfidence_detected: bool,
    pub suggested_next_steps: Vec<String>,
    pub report_file_url: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct OverallAssessment {
    pub recommendation_score: f64,
    pub recommendation: Option<String>,
    pub summary: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DimensionComment {
    pub score: f64,
    pub comment: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SkillAssessment {
    pub skill: String,
    pub level: Option<String>,
    pub evidence: Option<String>,
}

// =============================================================================
// Recommendation
// =============================================================================

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RecommendationResult {
    pub id: Option<String>,
    pub resume_id: Option<String>,
    pub candidate_name: Option<String>,
    pub final_score: f64,
    pub recommendation: RecommendationLevel,
    pub dimension_scores: BTreeMap<String, DimensionScore>,
    pub comprehensive_report: Option<String>,
    pub created_at: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RecommendationLevel {
    pub level: Option<String>,
    pub label: Option<String>,
    pub action: Option<String>,
    pub score: f64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DimensionScore {
    pub dimension_score: f64,
    pub dimension_name: Option<String>,
    pub weight: f64,
    pub strengths: Vec<String>,
    pub weaknesses: Vec<String>,
    pub analysis: Option<String>,
    pub sub_scores: BTreeMap<String, f64>,
}

// =============================================================================
// Listings (not job results)
// =============================================================================

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ResumeListing {
    pub resumes: Vec<ResumeSummary>,
    pub total: u64,
    pub page: u64,
    pub page_size: u64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ResumeSummary {
    pub id: Option<String>,
    pub filename: Option<String>,
    pub candidate_name: Option<String>,
    pub position_id: Option<String>,
    pub position_title: Option<String>,
    pub status: Option<String>,
    pub file_size: u64,
    pub created_at: Option<String>,
}

/// Outcome of the resume generation dev tool
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct GeneratedResumes {
    pub added: Vec<ResumeSummary>,
    pub skipped: Vec<SkippedFile>,
    pub added_count: u64,
    pub skipped_count: u64,
    pub requested_count: u64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SkippedFile {
    pub filename: Option<String>,
    pub reason: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_result_matches_kind() {
        for kind in JobKind::ALL {
            assert_eq!(JobResult::empty(kind).kind(), kind);
        }
    }

    #[test]
    fn test_result_is_tagged_by_kind() {
        let value = serde_json::to_value(JobResult::empty(JobKind::QaRound)).unwrap();
        assert_eq!(value["kind"], "qa_round");
        assert_eq!(value["round_number"], 0);
    }
}
