use anyhow::{Context, Result};
use clap::Parser;
use skillsync_client::cli::{handle_command, Cli};
use skillsync_client::ClientConfig;
use std::fs::OpenOptions;
use std::process::ExitCode;
use tracing::info;

use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{fmt, EnvFilter};

fn init_logging(config: &ClientConfig) -> Result<()> {
    let file = OpenOptions::new()
        .create(true)
        .write(true)
        .truncate(true) // Clear file on startup
        .open(&config.log_path)
        .with_context(|| format!("Failed to open log file: {}", config.log_path.display()))?;

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::registry()
        .with(
            fmt::layer()
                .json()
                .with_writer(file)
                .with_current_span(false)
                .with_span_list(false),
        )
        .with(filter)
        .init();

    Ok(())
}

#[tokio::main]
async fn main() -> Result<ExitCode> {
    let cli = Cli::parse();

    let config = ClientConfig::load(&cli.overrides())?;
    init_logging(&config)?;

    info!("Endpoint: {}", config.endpoint);
    info!("Timeout: {:?}", config.timeout_seconds);

    let code = handle_command(cli.command, &config).await?;
    Ok(ExitCode::from(code))
}
