//! Scrape job: fetch, extract, render, persist
//!
//! A failed fetch ends the run before anything is written.

#![allow(clippy::uninlined_format_args)]

use std::path::PathBuf;
use std::time::Instant;

use anyhow::{Context, Result};
use scraper::Html;
use tracing::{error, info};

use crate::application::render::{renderer_for, OutputFormat};
use crate::infrastructure::config::AppConfig;
use crate::infrastructure::html_source::{source_for, HtmlSource};
use crate::infrastructure::parsing::{ContextualParser, ParseContext, SessionListParser};
use crate::infrastructure::storage::persist;

/// Outcome of a successful run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunSummary {
    pub output_path: PathBuf,
    pub format: OutputFormat,
    pub sessions: usize,
    pub unlinked: usize,
    pub bytes_written: usize,
}

/// One end-to-end scrape of a listing page
pub struct ScrapeJob {
    config: AppConfig,
    source: Option<Box<dyn HtmlSource>>,
}

impl ScrapeJob {
    /// Job reading from the source named in the configuration
    pub fn new(config: AppConfig) -> Self {
        Self {
            config,
            source: None,
        }
    }

    /// Job reading from a caller-supplied source
    pub fn with_source(config: AppConfig, source: Box<dyn HtmlSource>) -> Self {
        Self {
            config,
            source: Some(source),
        }
    }

    pub const fn config(&self) -> &AppConfig {
        &self.config
    }

    pub async fn run(self) -> Result<RunSummary> {
        let started = Instant::now();
        let Self { config, source } = self;

        let source = match source {
            Some(source) => source,
            None => source_for(&config.input.descriptor(), &config.http)
                .context("Failed to set up the input source")?,
        };
        let described = source.describe();
        info!("🚀 Scraping {}", described);

        let html = match source.fetch().await {
            Ok(html) => html,
            Err(e) => {
                error!("❌ Failed to obtain HTML from {}: {}", described, e);
                return Err(e).with_context(|| format!("Failed to obtain HTML from {}", described));
            }
        };
        info!("Fetched {} bytes of HTML", html.len());

        let parser = SessionListParser::with_config(&config.selectors)
            .context("Invalid selector configuration")?;
        let context = ParseContext::new(config.base_url()).with_source(described);
        // the parsed document is not Send; keep it out of the awaits below
        let catalog = {
            let document = Html::parse_document(&html);
            parser
                .parse_with_context(&document, &context)
                .context("Failed to extract sessions")?
        };

        let format = OutputFormat::resolve(&config.output.format);
        let renderer = renderer_for(format, &config.output);
        let text = renderer
            .render(&catalog)
            .with_context(|| format!("Failed to render {} output", format))?;

        let output_path = config.output.path();
        persist(&output_path, &text)
            .await
            .context("Failed to write output")?;

        let summary = RunSummary {
            output_path,
            format,
            sessions: catalog.session_count(),
            unlinked: catalog.unlinked_count(),
            bytes_written: text.len(),
        };

        info!(
            "✅ Wrote {} sessions ({} unlinked) as {} to {:?} in {:?}",
            summary.sessions,
            summary.unlinked,
            summary.format,
            summary.output_path,
            started.elapsed()
        );

        Ok(summary)
    }
}
