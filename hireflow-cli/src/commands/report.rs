//! Report download commands

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::Subcommand;
use colored::Colorize;
use hireflow_client::ServiceClient;

use crate::config::Config;

#[derive(Subcommand)]
pub enum ReportCommands {
    /// Download a screening report
    Download {
        /// Report ID
        id: String,

        /// Output directory
        #[arg(long, default_value = ".")]
        out: PathBuf,
    },
}

pub async fn handle_report_command(command: ReportCommands, config: &Config) -> Result<()> {
    match command {
        ReportCommands::Download { id, out } => {
            let client = ServiceClient::new(config.engine()?.base_url);

            println!("{}", format!("Downloading report {}...", id).yellow());
            let report = client
                .download_report(&id)
                .await
                .with_context(|| format!("Failed to download report {}", id))?;

            tokio::fs::create_dir_all(&out)
                .await
                .with_context(|| format!("Failed to create {}", out.display()))?;
            let path = out.join(safe_filename(&report.filename, &id));
            tokio::fs::write(&path, &report.bytes)
                .await
                .with_context(|| format!("Failed to write {}", path.display()))?;

            println!(
                "{} {} ({} bytes)",
                "✓ Saved".green(),
                path.display(),
                report.bytes.len()
            );
            Ok(())
        }
    }
}

/// Server-supplied names must not escape the output directory
fn safe_filename(name: &str, report_id: &str) -> PathBuf {
    Path::new(name)
        .file_name()
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from(format!("report_{}.md", report_id)))
}
