//! Terminal rendering of jobs and results

use colored::Colorize;
use hireflow_core::domain::error::ClassifiedError;
use hireflow_core::domain::job::{Job, JobStatus};
use hireflow_core::domain::result::JobResult;

pub fn colorize_status(status: JobStatus) -> colored::ColoredString {
    match status {
        JobStatus::Queued => status.as_str().yellow(),
        JobStatus::Running => status.as_str().cyan(),
        JobStatus::Completed => status.as_str().green(),
        JobStatus::Failed => status.as_str().red(),
        JobStatus::Cancelled => status.as_str().dimmed(),
    }
}

pub fn print_job_summary(job: &Job) {
    println!("{} {}", "▸".cyan(), job.id.bold());
    println!("  {}: {}", "Kind".dimmed(), job.kind);
    println!("  {}: {}", "Status".dimmed(), colorize_status(job.status));
    println!("  {}: {}%", "Progress".dimmed(), job.progress);
    if let Some(resource) = &job.resource {
        println!("  {}: {}", "Resource".dimmed(), resource);
    }
    println!(
        "  {}: {}",
        "Submitted".dimmed(),
        job.submitted_at.format("%Y-%m-%d %H:%M:%S")
    );
    if let Some(polled) = job.last_polled_at {
        println!(
            "  {}: {}",
            "Last polled".dimmed(),
            polled.format("%Y-%m-%d %H:%M:%S")
        );
    }
}

pub fn print_progress(job: &Job) {
    println!(
        "{} {} {}%",
        "…".dimmed(),
        colorize_status(job.status),
        job.progress
    );
}

pub fn print_error(error: &ClassifiedError) {
    println!(
        "{} {} (code {}): {}",
        "✗".red(),
        error.kind.as_str().red(),
        error.code,
        error.message
    );
}

/// Prints the canonical result as pretty JSON
pub fn print_result(result: &JobResult) -> anyhow::Result<()> {
    println!("{}", "Result:".green().bold());
    println!("{}", serde_json::to_string_pretty(result)?);
    Ok(())
}
