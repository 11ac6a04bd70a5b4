//! Command handlers module

pub mod cancel;
pub mod dev;
pub mod report;
pub mod resumes;
pub mod submit;

use std::path::Path;

use anyhow::{Context, Result};
use clap::Subcommand;
use hireflow_core::domain::job::JobKind;
use serde_json::Value as JsonValue;

use crate::config::Config;

#[derive(Subcommand)]
pub enum Commands {
    /// Submit a job
    Submit {
        #[command(subcommand)]
        command: submit::SubmitCommands,
    },
    /// Cancel a remote job
    Cancel(cancel::CancelArgs),
    /// Report operations
    Report {
        #[command(subcommand)]
        command: report::ReportCommands,
    },
    /// Resume library operations
    Resumes {
        #[command(subcommand)]
        command: resumes::ResumeCommands,
    },
    /// Development tools
    Dev {
        #[command(subcommand)]
        command: dev::DevCommands,
    },
}

/// Route commands to their handlers
pub async fn handle_command(command: Commands, config: &Config) -> Result<()> {
    match command {
        Commands::Submit { command } => submit::handle_submit_command(command, config).await,
        Commands::Cancel(args) => cancel::handle_cancel(args, config).await,
        Commands::Report { command } => report::handle_report_command(command, config).await,
        Commands::Resumes { command } => resumes::handle_resume_command(command, config).await,
        Commands::Dev { command } => dev::handle_dev_command(command, config).await,
    }
}

/// Reads a JSON document from disk
pub(crate) async fn read_json(path: &Path) -> Result<JsonValue> {
    let content = tokio::fs::read_to_string(path)
        .await
        .with_context(|| format!("Failed to read {}", path.display()))?;
    serde_json::from_str(&content).with_context(|| format!("Invalid JSON in {}", path.display()))
}

/// Accepts canonical kind names and their short forms
pub(crate) fn parse_kind(s: &str) -> std::result::Result<JobKind, String> {
    match s {
        "video" => Ok(JobKind::VideoAnalysis),
        "questions" => Ok(JobKind::InterviewQuestionGen),
        "qa" => Ok(JobKind::QaRound),
        "report" => Ok(JobKind::ReportGeneration),
        "recommend" => Ok(JobKind::RecommendationAnalysis),
        other => other.parse(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_kind_short_and_canonical() {
        assert_eq!(parse_kind("qa"), Ok(JobKind::QaRound));
        assert_eq!(parse_kind("qa_round"), Ok(JobKind::QaRound));
        assert_eq!(parse_kind("screening"), Ok(JobKind::Screening));
        assert_eq!(parse_kind("recommend"), Ok(JobKind::RecommendationAnalysis));
        assert!(parse_kind("bogus").is_err());
    }
}
