//! Per-kind result reconciliation

use serde_json::Value;

use crate::domain::result::{
    AnswerEvaluation, CandidateQuestion, DimensionComment, DimensionScore, InterestPoint,
    InterviewQuestion, InterviewReport, OverallAssessment, QaRoundResult, QuestionSet,
    RecommendationLevel, RecommendationResult, ReportInfo, ScreenedResume, ScreeningResult,
    ScreeningScore, SkillAssessment, VideoAnalysisResult,
};
use crate::reconcile::aliases::*;
use crate::reconcile::fields::{Fields, as_number, flatten};

pub(crate) fn screening(value: &Value) -> ScreeningResult {
    let f = Fields::of(value);
    let reports: Vec<ReportInfo> = f.list(REPORTS).iter().map(report_info).collect();
    let fallback_title = reports.iter().find_map(|r| r.position_title.clone());

    let resumes = f
        .list(SCREENED_RESUMES)
        .iter()
        .map(|item| {
            let mut resume = screened_resume(item);
            if resume.position_title.is_none() {
                resume.position_title = fallback_title.clone();
            }
            resume
        })
        .collect();

    ScreeningResult {
        reports,
        resumes,
        current_speaker: f.string(CURRENT_SPEAKER),
    }
}

fn report_info(value: &Value) -> ReportInfo {
    let f = Fields::of(value);
    ReportInfo {
        report_id: f.string(REPORT_ID),
        report_filename: f.string(REPORT_FILENAME),
        download_url: f.string(DOWNLOAD_URL),
        resume_content: f.string(RESUME_CONTENT),
        position_title: f
            .string(POSITION_TITLE)
            .or_else(|| f.nested(POSITION_INFO).string(&["position", "position_title"])),
    }
}

fn screened_resume(value: &Value) -> ScreenedResume {
    let f = Fields::of(value);
    ScreenedResume {
        id: f.string(&["id"]),
        candidate_name: f.string(&["candidate_name"]),
        position_id: f.string(POSITION_ID),
        position_title: f.string(POSITION_TITLE),
        screening_score: screening_score(f),
        screening_summary: f
            .string(SCREENING_SUMMARY)
            .or_else(|| f.nested(SCREENING_SCORE).string(&["summary"])),
        resume_content: f.string(RESUME_CONTENT),
        report_md_url: f.string(&["report_md_url"]),
        report_json_url: f.string(&["report_json_url"]),
    }
}

fn screening_score(f: Fields<'_>) -> ScreeningScore {
    // A bare number is the pre-breakdown score format
    if let Some(total) = f.lookup(SCREENING_SCORE).filter(|v| !v.is_object()) {
        return ScreeningScore {
            comprehensive_score: as_number(total).unwrap_or(0.0),
            ..Default::default()
        };
    }

    let score = f.nested(SCREENING_SCORE);
    ScreeningScore {
        hr_score: score.number(&["hr_score"]),
        technical_score: score.number(&["technical_score"]),
        manager_score: score.number(&["manager_score"]),
        comprehensive_score: score.number(COMPREHENSIVE_SCORE),
    }
}

pub(crate) fn video_analysis(value: &Value) -> VideoAnalysisResult {
    let flat = flatten(value, VIDEO_SCORES_WRAPPER);
    let f = Fields::of(&flat);
    VideoAnalysisResult {
        id: f.string(VIDEO_ID),
        video_name: f.string(&["video_name"]),
        candidate_name: f.string(&["candidate_name"]),
        position_applied: f.string(&["position_applied", "position_title"]),
        resume_data_id: f.string(RESUME_DATA_ID),
        fraud_score: f.number(&["fraud_score"]),
        neuroticism_score: f.number(&["neuroticism_score"]),
        extraversion_score: f.number(&["extraversion_score"]),
        openness_score: f.number(&["openness_score"]),
        agreeableness_score: f.number(&["agreeableness_score"]),
        conscientiousness_score: f.number(&["conscientiousness_score"]),
        confidence_score: f.number(&["confidence_score"]),
        summary: f.string(&["summary"]),
    }
}

pub(crate) fn question_set(value: &Value) -> QuestionSet {
    let f = Fields::of(value);
    QuestionSet {
        question_pool: f
            .list(QUESTION_POOL)
            .iter()
            .map(|item| {
                let q = Fields::of(item);
                InterviewQuestion {
                    question: q.text(QUESTION_TEXT),
                    category: q.string(&["category"]),
                    difficulty: q.number(&["difficulty"]),
                    expected_skills: q.strings(&["expected_skills"]),
                    source: q.string(&["source"]),
                    related_point: q.string(&["related_point"]),
                }
            })
            .collect(),
        resume_highlights: f.strings(&["resume_highlights"]),
        interest_points: f
            .list(&["interest_points"])
            .iter()
            .map(|item| {
                let p = Fields::of(item);
                InterestPoint {
                    content: p.text(&["content"]),
                    question: p.text(&["question"]),
                    reason: p.string(&["reason"]),
                }
            })
            .collect(),
    }
}

pub(crate) fn qa_round(value: &Value) -> QaRoundResult {
    let f = Fields::of(value);
    let evaluation = f.nested(&["evaluation"]);

    QaRoundResult {
        round_number: f.count(ROUND_NUMBER),
        evaluation: evaluation.is_object().then(|| AnswerEvaluation {
            normalized_score: evaluation.number(&["normalized_score"]),
            dimension_scores: evaluation.number_map(&["dimension_scores"]),
            confidence_level: evaluation.string(&["confidence_level"]),
            should_followup: evaluation.flag(&["should_followup"]),
            followup_reason: evaluation.string(&["followup_reason"]),
            feedback: evaluation.string(&["feedback"]),
        }),
        candidate_questions: f
            .list(CANDIDATE_QUESTIONS)
            .iter()
            .map(|item| {
                let q = Fields::of(item);
                CandidateQuestion {
                    question: q.text(QUESTION_TEXT),
                    purpose: q.string(&["purpose"]),
                    expected_skills: q.strings(&["expected_skills"]),
                    source: q.string(&["source"]),
                }
            })
            .collect(),
        hr_action_hints: f.strings(&["hr_action_hints"]),
    }
}

pub(crate) fn interview_report(value: &Value) -> InterviewReport {
    let flat = flatten(value, REPORT_WRAPPER);
    let f = Fields::of(&flat);
    let overall = f.nested(&["overall_assessment"]);

    InterviewReport {
        overall_assessment: OverallAssessment {
            recommendation_score: overall
                .number_opt(&["recommendation_score"])
                .unwrap_or_else(|| f.number(&["recommendation_score"])),
            recommendation: overall
                .string(&["recommendation"])
                .or_else(|| f.string(&["recommendation"])),
            summary: overall.string(&["summary"]).or_else(|| f.string(&["summary"])),
        },
        dimension_analysis: f
            .entries(&["dimension_analysis"])
            .map(|(name, item)| {
                let d = Fields::of(item);
                (
                    name.clone(),
                    DimensionComment {
                        score: d.number(&["score"]),
                        comment: d.string(&["comment"]),
                    },
                )
            })
            .collect(),
        skill_assessment: f
            .list(&["skill_assessment"])
            .iter()
            .map(|item| {
                let s = Fields::of(item);
                SkillAssessment {
                    skill: s.text(&["skill"]),
                    level: s.string(&["level"]),
                    evidence: s.string(&["evidence"]),
                }
            })
            .collect(),
        highlights: f.strings(&["highlights"]),
        red_flags: f.strings(&["red_flags"]),
        overconfidence_detected: f.flag(&["overconfidence_detected"]),
        suggested_next_steps: f.strings(&["suggested_next_steps"]),
        report_file_url: f.string(&["report_file_url"]),
    }
}

pub(crate) fn recommendation(value: &Value) -> RecommendationResult {
    let flat = flatten(value, REPORT_WRAPPER);
    let f = Fields::of(&flat);
    let level = f.nested(&["recommendation"]);

    RecommendationResult {
        id: f.string(&["id", "analysis_id"]),
        resume_id: f.string(&["resume_id", "resume_data_id"]),
        candidate_name: f.string(&["candidate_name"]),
        final_score: f.number(&["final_score"]),
        recommendation: RecommendationLevel {
            level: level.string(&["level"]),
            label: level.string(&["label"]),
            action: level.string(&["action"]),
            score: level.number(&["score"]),
        },
        dimension_scores: f
            .entries(&["dimension_scores"])
            .map(|(name, item)| {
                let d = Fields::of(item);
                (
                    name.clone(),
                    DimensionScore {
                        dimension_score: d.number(&["dimension_score", "score"]),
                        dimension_name: d.string(&["dimension_name"]),
                        weight: d.number(&["weight"]),
                        strengths: d.strings(&["strengths"]),
                        weaknesses: d.strings(&["weaknesses"]),
                        analysis: d.string(&["analysis"]),
                        sub_scores: d.number_map(&["sub_scores"]),
                    },
                )
            })
            .collect(),
        comprehensive_report: f.string(COMPREHENSIVE_REPORT),
        created_at: f.string(&["created_at"]),
    }
}
