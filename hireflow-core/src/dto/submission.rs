//! Job submissions
//!
//! A submission is the caller's intent to start a job. It is validated
//! before any request leaves the process.

use serde::{Deserialize, Serialize};
use serde_json::Value as JsonValue;
use thiserror::Error;

use crate::domain::error::ClassifiedError;
use crate::domain::job::JobKind;
use crate::timeout::Operation;

/// Caller-side payload problem
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("at least one resume is required")]
    NoResumes,

    #[error("resume #{0} has an empty name or content")]
    EmptyResume(usize),

    #[error("{0} must not be empty")]
    MissingField(&'static str),

    #[error("count must be at least 1")]
    ZeroCount,
}

impl From<ValidationError> for ClassifiedError {
    fn from(err: ValidationError) -> Self {
        ClassifiedError::validation(err.to_string())
    }
}

/// A resume document sent for screening
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResumeDocument {
    pub name: String,
    pub content: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub metadata: Option<ResumeMetadata>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResumeMetadata {
    pub size: u64,
    #[serde(rename = "type")]
    pub mime_type: String,
}

/// A candidate video uploaded for analysis
#[derive(Debug, Clone, PartialEq)]
pub struct VideoUpload {
    pub file_name: String,
    pub bytes: Vec<u8>,
    pub candidate_name: String,
    pub position_applied: String,
    pub resume_data_id: Option<String>,
}

/// Intent to start one job
#[derive(Debug, Clone, PartialEq)]
pub enum Submission {
    Screening {
        position: JsonValue,
        resumes: Vec<ResumeDocument>,
    },
    VideoAnalysis(VideoUpload),
    InterviewQuestionGen {
        session_id: String,
        params: JsonValue,
    },
    QaRound {
        session_id: String,
        record: JsonValue,
    },
    ReportGeneration {
        session_id: String,
        params: JsonValue,
    },
    RecommendationAnalysis {
        resume_id: String,
    },
}

impl Submission {
    pub fn kind(&self) -> JobKind {
        match self {
            Submission::Screening { .. } => JobKind::Screening,
            Submission::VideoAnalysis(_) => JobKind::VideoAnalysis,
            Submission::InterviewQuestionGen { .. } => JobKind::InterviewQuestionGen,
            Submission::QaRound { .. } => JobKind::QaRound,
            Submission::ReportGeneration { .. } => JobKind::ReportGeneration,
            Submission::RecommendationAnalysis { .. } => JobKind::RecommendationAnalysis,
        }
    }

    /// Parent resource the job is submitted against
    pub fn resource(&self) -> Option<&str> {
        match self {
            Submission::InterviewQuestionGen { session_id, .. }
            | Submission::QaRound { session_id, .. }
            | Submission::ReportGeneration { session_id, .. } => Some(session_id),
            Submission::RecommendationAnalysis { resume_id } => Some(resume_id),
            Submission::Screening { .. } | Submission::VideoAnalysis(_) => None,
        }
    }

    pub fn operation(&self) -> Operation {
        Operation::Submit(self.kind())
    }

    /// JSON request body; `None` for multipart and bodiless submissions
    pub fn json_body(&self) -> Option<JsonValue> {
        match self {
            Submission::Screening { position, resumes } => Some(serde_json::json!({
                "position": position,
                "resumes": resumes,
            })),
            Submission::InterviewQuestionGen { params, .. }
            | Submission::ReportGeneration { params, .. } => Some(object_or_empty(params)),
            Submission::QaRound { record, .. } => Some(record.clone()),
            Submission::VideoAnalysis(_) | Submission::RecommendationAnalysis { .. } => None,
        }
    }

    pub fn validate(&self) -> Result<(), ValidationError> {
        match self {
            Submission::Screening { resumes, .. } => {
                if resumes.is_empty() {
                    return Err(ValidationError::NoResumes);
                }
                if let Some(idx) = resumes
                    .iter()
                    .position(|r| r.name.trim().is_empty() || r.content.trim().is_empty())
                {
                    return Err(ValidationError::EmptyResume(idx));
                }
                Ok(())
            }
            Submission::VideoAnalysis(upload) => {
                if upload.file_name.trim().is_empty() {
                    return Err(ValidationError::MissingField("file_name"));
                }
                if upload.bytes.is_empty() {
                    return Err(ValidationError::MissingField("video_file"));
                }
                Ok(())
            }
            Submission::QaRound { session_id, record } => {
                require("session_id", session_id)?;
                let answer = record
                    .pointer("/answer/content")
                    .and_then(JsonValue::as_str)
                    .unwrap_or_default();
                require("answer.content", answer)
            }
            Submission::InterviewQuestionGen { session_id, .. }
            | Submission::ReportGeneration { session_id, .. } => require("session_id", session_id),
            Submission::RecommendationAnalysis { resume_id } => require("resume_id", resume_id),
        }
    }
}

/// Request for the resume generation dev tool
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GenerateResumes {
    pub position: JsonValue,
    pub count: u32,
}

impl GenerateResumes {
    pub fn operation(&self) -> Operation {
        Operation::ResumeGeneration { count: self.count }
    }

    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.count == 0 {
            return Err(ValidationError::ZeroCount);
        }
        Ok(())
    }
}

fn require(field: &'static str, value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        Err(ValidationError::MissingField(field))
    } else {
        Ok(())
    }
}

fn object_or_empty(value: &JsonValue) -> JsonValue {
    if value.is_null() {
        serde_json::json!({})
    } else {
        value.clone()
    }
}
