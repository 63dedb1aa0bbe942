// src/cli.rs
use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use std::sync::Arc;
use tracing::{error, info};

use crate::controller::{SubmitOutcome, UploadController};
use crate::core::{AnalysisClient, ClientConfig, ConfigOverrides};
use crate::error::AnalysisError;
use crate::page::{render_html, render_terminal, Page};
use crate::types::ResumeFile;
use crate::utils;

pub const EXIT_OK: u8 = 0;
pub const EXIT_FAILED: u8 = 1;
pub const EXIT_NO_FILE: u8 = 2;

#[derive(Parser)]
#[command(name = "skillsync")]
#[command(about = "Send a résumé to the SkillSync analysis service and show the results")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// YAML config file (default: ./skillsync.yaml when present)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Analysis endpoint URL
    #[arg(long, global = true)]
    pub endpoint: Option<String>,

    /// Request timeout in seconds (default: wait for the server)
    #[arg(long, global = true)]
    pub timeout: Option<u64>,
}

#[derive(Subcommand)]
pub enum Command {
    /// Upload a résumé (PDF or DOCX) and render the analysis
    Analyze {
        /// Résumé file
        file: Option<PathBuf>,

        /// Print the analysis as JSON instead of text
        #[arg(long)]
        json: bool,

        /// Write an HTML report to this path
        #[arg(long, conflicts_with = "report_dir")]
        html: Option<PathBuf>,

        /// Write an HTML report with a generated name into this directory
        #[arg(long)]
        report_dir: Option<PathBuf>,
    },
    /// Print the effective configuration
    Config,
}

impl Cli {
    pub fn overrides(&self) -> ConfigOverrides {
        ConfigOverrides {
            config_path: self.config.clone(),
            endpoint: self.endpoint.clone(),
            timeout_seconds: self.timeout,
        }
    }
}

pub async fn handle_command(command: Command, config: &ClientConfig) -> Result<u8> {
    match command {
        Command::Config => {
            println!("endpoint: {}", config.endpoint);
            match config.timeout_seconds {
                Some(seconds) => println!("timeout_seconds: {}", seconds),
                None => println!("timeout_seconds: none"),
            }
            println!("log_path: {}", config.log_path.display());
            Ok(EXIT_OK)
        }
        Command::Analyze {
            file,
            json,
            html,
            report_dir,
        } => {
            let selection = match &file {
                Some(path) => Some(ResumeFile::from_path(path).await?),
                None => None,
            };
            let resume_name = selection
                .as_ref()
                .map(|r| r.file_name.clone())
                .unwrap_or_else(|| "resume".to_string());

            let client = AnalysisClient::new(config)?;
            let controller = UploadController::new(Arc::new(client));

            let outcome = controller.submit(selection).await;
            let page = controller.page();

            let report_path = html.or_else(|| {
                report_dir.map(|dir| utils::report_file_path(&dir, &resume_name))
            });

            match outcome {
                SubmitOutcome::Alert(message) => {
                    eprintln!("{}", message);
                    Ok(EXIT_NO_FILE)
                }
                SubmitOutcome::Rendered(analysis) => {
                    if json {
                        let body = serde_json::to_string_pretty(&analysis)
                            .context("Failed to serialize analysis")?;
                        println!("{}", body);
                    } else {
                        print!("{}", render_terminal(&page));
                    }
                    write_report(report_path, &page, &resume_name).await?;
                    Ok(EXIT_OK)
                }
                SubmitOutcome::Failed(err) => {
                    error!(
                        "Analysis of {} failed ({}): {}",
                        resume_name,
                        describe_failure(&err),
                        err
                    );
                    eprint!("{}", render_terminal(&page));
                    write_report(report_path, &page, &resume_name).await?;
                    Ok(EXIT_FAILED)
                }
                SubmitOutcome::Superseded => {
                    eprintln!("Analysis was cancelled");
                    Ok(EXIT_FAILED)
                }
            }
        }
    }
}

/// Failure category for the log, with the HTTP status when there is one
fn describe_failure(err: &AnalysisError) -> String {
    match err.status() {
        Some(status) => format!("{} error, HTTP {}", err.kind(), status),
        None => format!("{} error", err.kind()),
    }
}

async fn write_report(path: Option<PathBuf>, page: &Page, resume_name: &str) -> Result<()> {
    let Some(path) = path else {
        return Ok(());
    };

    utils::write_file_content(&path, &render_html(page, resume_name)).await?;
    info!("Report written to {}", path.display());
    eprintln!("Report written to {}", path.display());
    Ok(())
}
