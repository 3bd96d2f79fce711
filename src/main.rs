use anyhow::{Context, Result};
use clap::Parser;
use job_scout::{handle_command, ScoutCli};
use std::fs::OpenOptions;

use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{fmt, EnvFilter};

const DEFAULT_LOG_PATH: &str = "/tmp/job_scout.log";

#[tokio::main]
async fn main() -> Result<()> {
    let log_path = std::env::var("JOB_SCOUT_LOG").unwrap_or_else(|_| DEFAULT_LOG_PATH.to_string());
    let file = OpenOptions::new()
        .create(true)
        .write(true)
        .truncate(true) // Clear file on startup
        .open(&log_path)
        .with_context(|| format!("Failed to open log file {}", log_path))?;

    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new("job_scout=info"))
        .context("Invalid log filter")?;

    tracing_subscriber::registry()
        .with(
            fmt::layer()
                .json()
                .with_writer(file)
                .with_current_span(false)
                .with_span_list(false),
        )
        .with(
            fmt::layer()
                .compact()
                .with_target(false)
                .with_writer(std::io::stderr),
        )
        .with(filter)
        .init();

    handle_command(ScoutCli::parse()).await
}
