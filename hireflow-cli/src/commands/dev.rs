//! Development tools

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Subcommand;
use colored::Colorize;
use hireflow_client::ServiceClient;
use hireflow_core::dto::submission::GenerateResumes;

use super::read_json;
use super::resumes::print_resume;
use crate::config::Config;

#[derive(Subcommand)]
pub enum DevCommands {
    /// Generate synthetic resumes for a position
    GenerateResumes {
        /// JSON file describing the position
        #[arg(long)]
        position: PathBuf,

        /// Number of resumes to generate
        #[arg(long)]
        count: u32,
    },
}

pub async fn handle_dev_command(command: DevCommands, config: &Config) -> Result<()> {
    match command {
        DevCommands::GenerateResumes { position, count } => {
            let client = ServiceClient::new(config.engine()?.base_url);
            let request = GenerateResumes {
                position: read_json(&position).await?,
                count,
            };

            println!("{}", format!("Generating {} resumes...", count).yellow());
            let generated = client
                .generate_resumes(&request)
                .await
                .context("Failed to generate resumes")?;

            println!(
                "{}",
                format!(
                    "✓ Added {} of {} requested ({} skipped)",
                    generated.added_count, generated.requested_count, generated.skipped_count
                )
                .green()
            );
            println!();
            for resume in &generated.added {
                print_resume(resume);
            }
            for skipped in &generated.skipped {
                println!(
                    "{} {}: {}",
                    "✗".red(),
                    skipped.filename.as_deref().unwrap_or("-"),
                    skipped.reason.as_deref().unwrap_or("skipped").dimmed()
                );
            }
            Ok(())
        }
    }
}
