//! Hireflow CLI
//!
//! Command-line interface for submitting and following recruitment jobs
//! (screening, video analysis, interview assistance, recommendation).

mod commands;
mod config;
mod display;

use anyhow::Result;
use clap::Parser;
use commands::{Commands, handle_command};
use config::Config;
use hireflow_engine::config::DEFAULT_BASE_URL;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "hireflow")]
#[command(about = "Hireflow recruitment job CLI", long_about = None)]
struct Cli {
    /// Service base URL
    #[arg(long, env = "HIREFLOW_BASE_URL", default_value = DEFAULT_BASE_URL)]
    base_url: String,

    #[command(subcommand)]
    command: Commands,
}

#[tokio::main]
async fn main() -> Result<()> {
    // Logs go to stderr so command output stays pipeable
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "hireflow_engine=info,hireflow_client=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();

    let config = Config {
        base_url: cli.base_url,
    };

    handle_command(cli.command, &config).await
}
