//! Resume library commands

use anyhow::{Context, Result};
use clap::Subcommand;
use colored::Colorize;
use hireflow_client::{ResumeQuery, ServiceClient};
use hireflow_core::domain::result::ResumeSummary;

use crate::config::Config;

#[derive(Subcommand)]
pub enum ResumeCommands {
    /// List resumes
    List {
        /// Page number
        #[arg(long)]
        page: Option<u32>,

        /// Page size
        #[arg(long)]
        page_size: Option<u32>,

        /// Search keyword
        #[arg(long)]
        keyword: Option<String>,

        /// Filter by status
        #[arg(long)]
        status: Option<String>,

        /// Filter by position ID
        #[arg(long)]
        position_id: Option<String>,
    },
}

pub async fn handle_resume_command(command: ResumeCommands, config: &Config) -> Result<()> {
    match command {
        ResumeCommands::List {
            page,
            page_size,
            keyword,
            status,
            position_id,
        } => {
            let client = ServiceClient::new(config.engine()?.base_url);
            let query = ResumeQuery {
                page,
                page_size,
                keyword,
                status,
                position_id,
            };

            let listing = client
                .list_resumes(&query)
                .await
                .context("Failed to list resumes")?;

            if listing.resumes.is_empty() {
                println!("{}", "No resumes found".yellow());
                return Ok(());
            }

            println!(
                "{}",
                format!("Resumes ({} total):", listing.total).green().bold()
            );
            println!();
            for resume in &listing.resumes {
                print_resume(resume);
            }
            Ok(())
        }
    }
}

pub(crate) fn print_resume(resume: &ResumeSummary) {
    println!(
        "{} {}",
        "▸".cyan(),
        resume.id.as_deref().unwrap_or("-").bold()
    );
    if let Some(name) = &resume.candidate_name {
        println!("  {}: {}", "Candidate".dimmed(), name);
    }
    if let Some(filename) = &resume.filename {
        println!("  {}: {} ({} bytes)", "File".dimmed(), filename, resume.file_size);
    }
    if let Some(title) = &resume.position_title {
        println!("  {}: {}", "Position".dimmed(), title);
    }
    if let Some(status) = &resume.status {
        println!("  {}: {}", "Status".dimmed(), status);
    }
    println!();
}
