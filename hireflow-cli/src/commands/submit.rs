//! Job submission commands

use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::{Context, Result, bail};
use clap::{Args, Subcommand};
use colored::Colorize;
use hireflow_client::ServiceClient;
use hireflow_core::domain::job::{Job, JobStatus};
use hireflow_core::dto::submission::{ResumeDocument, ResumeMetadata, Submission, VideoUpload};
use hireflow_engine::{RegistryEvent, TaskOrchestrator};
use serde_json::Value as JsonValue;
use tokio::sync::mpsc;

use super::read_json;
use crate::config::Config;
use crate::display::{print_error, print_job_summary, print_progress, print_result};

#[derive(Args)]
pub struct WatchArgs {
    /// Follow the job until it reaches a terminal state
    #[arg(long)]
    watch: bool,
}

#[derive(Args)]
pub struct SessionArgs {
    /// Interview session ID
    #[arg(long)]
    session: String,

    /// JSON file with the request body
    #[arg(long)]
    params: Option<PathBuf>,

    #[command(flatten)]
    watch: WatchArgs,
}

#[derive(Subcommand)]
pub enum SubmitCommands {
    /// Screen resumes against a position
    Screening {
        /// JSON file describing the position
        #[arg(long)]
        position: PathBuf,

        /// Resume file (repeatable)
        #[arg(long = "resume", required = true)]
        resumes: Vec<PathBuf>,

        #[command(flatten)]
        watch: WatchArgs,
    },
    /// Upload a candidate video for analysis
    Video {
        /// Video file
        #[arg(long)]
        file: PathBuf,

        /// Candidate name
        #[arg(long)]
        candidate: String,

        /// Position applied for
        #[arg(long)]
        position: String,

        /// Linked resume data ID
        #[arg(long)]
        resume_data_id: Option<String>,

        #[command(flatten)]
        watch: WatchArgs,
    },
    /// Generate interview questions
    Questions(SessionArgs),
    /// Submit one question/answer round
    Qa(SessionArgs),
    /// Generate the final interview report
    Report(SessionArgs),
    /// Run recommendation analysis for a resume
    Recommend {
        /// Resume ID
        #[arg(long)]
        resume: String,

        #[command(flatten)]
        watch: WatchArgs,
    },
}

pub async fn handle_submit_command(command: SubmitCommands, config: &Config) -> Result<()> {
    let (submission, watch) = build_submission(command).await?;

    let engine_config = config.engine()?;
    let client = Arc::new(ServiceClient::new(engine_config.base_url.clone()));
    let engine = TaskOrchestrator::new(&engine_config, client);

    let kind = submission.kind();
    println!("{}", format!("Submitting {} job...", kind).yellow());

    let outcome = match engine.submit(submission).await {
        Ok(job) => {
            println!("{}", "✓ Job submitted".green());
            print_job_summary(&job);
            if watch {
                watch_job(&engine, job).await
            } else {
                println!();
                println!("Re-run with {} to follow it", "--watch".cyan());
                Ok(())
            }
        }
        Err(err) => {
            print_error(&err);
            Err(err).context("Submission failed")
        }
    };

    engine.shutdown();
    outcome
}

async fn build_submission(command: SubmitCommands) -> Result<(Submission, bool)> {
    Ok(match command {
        SubmitCommands::Screening {
            position,
            resumes,
            watch,
        } => {
            let position = read_json(&position).await?;
            let mut documents = Vec::with_capacity(resumes.len());
            for path in &resumes {
                documents.push(resume_document(path).await?);
            }
            (
                Submission::Screening {
                    position,
                    resumes: documents,
                },
                watch.watch,
            )
        }
        SubmitCommands::Video {
            file,
            candidate,
            position,
            resume_data_id,
            watch,
        } => {
            let bytes = tokio::fs::read(&file)
                .await
                .with_context(|| format!("Failed to read {}", file.display()))?;
            (
                Submission::VideoAnalysis(VideoUpload {
                    file_name: file_name(&file),
                    bytes,
                    candidate_name: candidate,
                    position_applied: position,
                    resume_data_id,
                }),
                watch.watch,
            )
        }
        SubmitCommands::Questions(args) => {
            let params = optional_json(args.params.as_deref()).await?;
            (
                Submission::InterviewQuestionGen {
                    session_id: args.session,
                    params,
                },
                args.watch.watch,
            )
        }
        SubmitCommands::Qa(args) => {
            let Some(path) = args.params.as_deref() else {
                bail!("qa requires --params with the question and answer record");
            };
            let record = read_json(path).await?;
            (
                Submission::QaRound {
                    session_id: args.session,
                    record,
                },
                args.watch.watch,
            )
        }
        SubmitCommands::Report(args) => {
            let params = optional_json(args.params.as_deref()).await?;
            (
                Submission::ReportGeneration {
                    session_id: args.session,
                    params,
                },
                args.watch.watch,
            )
        }
        SubmitCommands::Recommend { resume, watch } => (
            Submission::RecommendationAnalysis { resume_id: resume },
            watch.watch,
        ),
    })
}

/// Follows `job` until it is terminal, cancelling it on Ctrl-C
async fn watch_job(engine: &TaskOrchestrator, job: Job) -> Result<()> {
    let (tx, mut rx) = mpsc::unbounded_channel();
    let id = job.id.clone();
    let subscription = engine.subscribe(move |event: &RegistryEvent| {
        if event.job().id == id {
            let _ = tx.send(event.clone());
        }
    });

    println!();
    println!("{}", "Watching job (Ctrl-C to cancel)...".yellow());

    // The job may have moved before the subscription was registered
    let mut last = engine.get(&job.id).unwrap_or(job);
    let outcome = loop {
        if last.is_terminal() {
            break report_terminal(&last);
        }

        tokio::select! {
            event = rx.recv() => match event {
                Some(RegistryEvent::Removed(_)) | None => {
                    break Err(anyhow::anyhow!("Job {} is no longer tracked", last.id));
                }
                Some(RegistryEvent::Inserted(job)) | Some(RegistryEvent::Updated(job)) => {
                    if job.status != last.status || job.progress != last.progress {
                        print_progress(&job);
                    }
                    last = job;
                }
            },
            signal = tokio::signal::ctrl_c() => {
                signal.context("Failed to listen for Ctrl-C")?;
                println!("{}", "Cancelling job...".yellow());
                let cancel = engine.cancel(&last.id).await;
                match cancel.remote_error {
                    Some(err) => print_error(&err),
                    None => println!("{}", "✓ Job cancelled".green()),
                }
                break Ok(());
            }
        }
    };

    engine.unsubscribe(subscription);
    outcome
}

fn report_terminal(job: &Job) -> Result<()> {
    println!();
    print_job_summary(job);
    match job.status {
        JobStatus::Completed => match &job.result {
            Some(result) => print_result(result),
            None => Ok(()),
        },
        JobStatus::Failed => {
            if let Some(err) = &job.error {
                print_error(err);
            }
            bail!("Job {} failed", job.id)
        }
        _ => Ok(()),
    }
}

async fn optional_json(path: Option<&Path>) -> Result<JsonValue> {
    match path {
        Some(path) => read_json(path).await,
        None => Ok(JsonValue::Null),
    }
}

async fn resume_document(path: &Path) -> Result<ResumeDocument> {
    let content = tokio::fs::read_to_string(path)
        .await
        .with_context(|| format!("Failed to read resume {}", path.display()))?;
    Ok(ResumeDocument {
        name: file_name(path),
        metadata: Some(ResumeMetadata {
            size: content.len() as u64,
            mime_type: mime_type(path).to_string(),
        }),
        content,
    })
}

fn file_name(path: &Path) -> String {
    path.file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_default()
}

fn mime_type(path: &Path) -> &'static str {
    match path.extension().and_then(|ext| ext.to_str()) {
        Some("md") | Some("markdown") => "text/markdown",
        Some("json") => "application/json",
        Some("html") | Some("htm") => "text/html",
        _ => "text/plain",
    }
}
