//! Command-line entry point

use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::Parser;
use tracing::error;

use gdc_vault_scraper::infrastructure::config::{AppConfig, ConfigManager};
use gdc_vault_scraper::infrastructure::html_source::SourceKind;
use gdc_vault_scraper::infrastructure::logging::{init_logging_with_config, log_system_info};
use gdc_vault_scraper::ScrapeJob;

#[derive(Parser, Debug)]
#[command(name = "gdc-vault-scraper")]
#[command(version, about = "Extract session links from a GDC Vault browse page")]
struct Cli {
    /// Configuration file (toml, json or yaml)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Fetch the browse page from this URL
    #[arg(long, conflicts_with = "file")]
    url: Option<String>,

    /// Read a saved browse page from disk
    #[arg(long)]
    file: Option<PathBuf>,

    /// Prefix for links recovered from members-only entries
    #[arg(long)]
    base_url: Option<String>,

    /// Output format: json, plain or csv
    #[arg(short, long)]
    format: Option<String>,

    /// Output file
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// CSV field delimiter
    #[arg(long)]
    delimiter: Option<char>,

    /// Log level (overridden by RUST_LOG)
    #[arg(long)]
    log_level: Option<String>,

    /// Write the log file as JSON lines
    #[arg(long)]
    json_logs: bool,
}

impl Cli {
    /// Flags take precedence over file and environment settings
    fn apply(self, config: &mut AppConfig) {
        if let Some(url) = self.url {
            config.input.kind = SourceKind::Url;
            config.input.uri = url;
        }
        if let Some(file) = self.file {
            config.input.kind = SourceKind::File;
            config.input.uri = file.to_string_lossy().into_owned();
        }
        if let Some(base_url) = self.base_url {
            config.input.base_url = Some(base_url);
        }
        if let Some(format) = self.format {
            config.output.format = format;
        }
        if let Some(output) = self.output {
            config.output.file = output.to_string_lossy().into_owned();
        }
        if let Some(delimiter) = self.delimiter {
            config.output.csv_delimiter = delimiter.to_string();
        }
        if let Some(level) = self.log_level {
            config.logging.level = level;
        }
        if self.json_logs {
            config.logging.json_format = true;
        }
    }
}

async fn run(cli: Cli) -> Result<()> {
    let mut config =
        ConfigManager::load(cli.config.as_deref()).context("Failed to load configuration")?;
    cli.apply(&mut config);
    config.validate().context("Invalid configuration")?;

    init_logging_with_config(&config.logging)?;
    log_system_info();

    ScrapeJob::new(config).run().await?;
    Ok(())
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    match run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            if tracing::dispatcher::has_been_set() {
                error!("❌ {:#}", e);
            } else {
                eprintln!("Error: {:#}", e);
            }
            ExitCode::FAILURE
        }
    }
}
