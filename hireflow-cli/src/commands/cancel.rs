//! Remote cancellation

use anyhow::{Context, Result};
use chrono::Utc;
use clap::Args;
use colored::Colorize;
use hireflow_client::{JobService, ServiceClient};
use hireflow_core::domain::job::{Job, JobKind, Tracking};
use hireflow_core::timeout::{Operation, timeout_for};

use super::parse_kind;
use crate::config::Config;
use crate::display::print_error;

#[derive(Args)]
pub struct CancelArgs {
    /// Job kind (e.g. screening, video, questions, qa, report, recommend)
    #[arg(value_parser = parse_kind)]
    kind: JobKind,

    /// Job ID
    id: String,

    /// Parent resource (session ID for interview jobs)
    #[arg(long)]
    resource: Option<String>,
}

/// Cancels a job started by another process
///
/// Nothing is tracked locally, so the request goes straight to the service.
pub async fn handle_cancel(args: CancelArgs, config: &Config) -> Result<()> {
    let engine_config = config.engine()?;
    let client = ServiceClient::new(engine_config.base_url.clone());

    let job = Job::queued(
        args.id,
        args.kind,
        args.resource,
        Tracking::Remote,
        None,
        Utc::now(),
    );

    println!("{}", format!("Cancelling {} job {}...", job.kind, job.id).yellow());
    match client
        .cancel(&job, timeout_for(Operation::Cancel(job.kind)))
        .await
    {
        Ok(()) => {
            println!("{}", "✓ Job cancelled".green());
            Ok(())
        }
        Err(err) => {
            let classified = err.classify(&engine_config.network_failure_message);
            print_error(&classified);
            Err(classified).context("Cancellation failed")
        }
    }
}
