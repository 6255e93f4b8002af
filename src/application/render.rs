//! Output renderers: JSON, plain text and CSV
//!
//! Each renderer turns a [`Catalog`] into the full text of the output file.
//! Iteration follows catalog order, which is page order.

#![allow(clippy::uninlined_format_args)]

use std::fmt::{self, Write};

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, warn};

use crate::domain::{Catalog, SessionRecord};
use crate::infrastructure::config::OutputConfig;

#[derive(Error, Debug)]
pub enum RenderError {
    #[error("JSON serialization failed: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Text formatting failed: {0}")]
    Format(#[from] fmt::Error),
}

/// Supported output formats
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    Json,
    Plain,
    Csv,
}

impl OutputFormat {
    /// Case-insensitive lookup of a format tag
    pub fn from_tag(tag: &str) -> Option<Self> {
        match tag.trim().to_ascii_lowercase().as_str() {
            "json" => Some(Self::Json),
            "plain" => Some(Self::Plain),
            "csv" => Some(Self::Csv),
            _ => None,
        }
    }

    /// Like [`from_tag`](Self::from_tag), but an unknown tag falls back to JSON
    pub fn resolve(tag: &str) -> Self {
        Self::from_tag(tag).unwrap_or_else(|| {
            warn!("Unknown output format '{}', falling back to json", tag);
            Self::Json
        })
    }

    pub const fn tag(self) -> &'static str {
        match self {
            Self::Json => "json",
            Self::Plain => "plain",
            Self::Csv => "csv",
        }
    }

    /// Conventional file extension
    pub const fn extension(self) -> &'static str {
        match self {
            Self::Json => "json",
            Self::Plain => "txt",
            Self::Csv => "csv",
        }
    }
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.tag())
    }
}

/// Turns a catalog into output text
pub trait Renderer: Send + Sync {
    fn render(&self, catalog: &Catalog) -> Result<String, RenderError>;

    fn format(&self) -> OutputFormat;
}

/// Build the renderer for a format
pub fn renderer_for(format: OutputFormat, config: &OutputConfig) -> Box<dyn Renderer> {
    match format {
        OutputFormat::Json => Box::new(JsonRenderer),
        OutputFormat::Plain => Box::new(PlainRenderer),
        OutputFormat::Csv => Box::new(CsvRenderer::new(config.delimiter())),
    }
}

/// Pretty-printed JSON of the whole catalog
#[derive(Debug, Clone, Copy, Default)]
pub struct JsonRenderer;

impl Renderer for JsonRenderer {
    fn render(&self, catalog: &Catalog) -> Result<String, RenderError> {
        Ok(serde_json::to_string_pretty(catalog)?)
    }

    fn format(&self) -> OutputFormat {
        OutputFormat::Json
    }
}

/// Markdown-style headings with one `<url> <title>` line per session
#[derive(Debug, Clone, Copy, Default)]
pub struct PlainRenderer;

impl Renderer for PlainRenderer {
    fn render(&self, catalog: &Catalog) -> Result<String, RenderError> {
        let mut out = String::new();

        for (conference, media_types) in catalog.conferences() {
            writeln!(out, "# {}", conference)?;
            for (media_type, categories) in media_types {
                writeln!(out, "## {}", media_type)?;
                for (category, sessions) in categories {
                    writeln!(out, "### {}", category)?;
                    for record in sessions.values() {
                        writeln!(out, "{} {}", record.url, record.title)?;
                    }
                    writeln!(out)?;
                }
            }
        }

        if !catalog.unlinked().is_empty() {
            writeln!(out, "# Unlinked")?;
            for (conference, media_types) in catalog.unlinked() {
                writeln!(out, "## {}", conference)?;
                for (media_type, categories) in media_types {
                    writeln!(out, "### {}", media_type)?;
                    for (category, titles) in categories {
                        writeln!(out, "#### {}", category)?;
                        for title in titles {
                            writeln!(out, "{}", title)?;
                        }
                        writeln!(out)?;
                    }
                }
            }
        }

        Ok(out)
    }

    fn format(&self) -> OutputFormat {
        OutputFormat::Plain
    }
}

/// Delimited rows, one per linked session
#[derive(Debug, Clone, Copy)]
pub struct CsvRenderer {
    delimiter: char,
}

pub const CSV_HEADER: [&str; 8] = [
    "Conference",
    "Media type",
    "Category",
    "Title",
    "Speaker",
    "Company",
    "Link",
    "Free content",
];

impl CsvRenderer {
    pub const fn new(delimiter: char) -> Self {
        Self { delimiter }
    }

    pub const fn delimiter(&self) -> char {
        self.delimiter
    }

    fn write_row<S: AsRef<str>>(&self, out: &mut String, row: &[S]) -> fmt::Result {
        for (i, cell) in row.iter().enumerate() {
            if i > 0 {
                out.push(self.delimiter);
            }
            let cell = cell.as_ref();
            if needs_quotes(cell, self.delimiter) {
                write!(out, "\"{}\"", cell.replace('"', "\"\""))?;
            } else {
                out.push_str(cell);
            }
        }
        out.push('\n');
        Ok(())
    }

    fn row_for(record: &SessionRecord) -> [&str; 8] {
        [
            record.conference_name.as_str(),
            record.media_type.as_str(),
            record.category.as_str(),
            record.title.as_str(),
            record.speaker.name.as_str(),
            record.speaker.company.as_deref().unwrap_or_default(),
            record.url.as_str(),
            // "No" for members-only sessions; matches the legacy export
            if record.members_only { "No" } else { "Yes" },
        ]
    }
}

impl Default for CsvRenderer {
    fn default() -> Self {
        Self::new(';')
    }
}

impl Renderer for CsvRenderer {
    fn render(&self, catalog: &Catalog) -> Result<String, RenderError> {
        let mut out = String::new();
        self.write_row(&mut out, &CSV_HEADER)?;

        for record in catalog.records() {
            self.write_row(&mut out, &Self::row_for(record))?;
        }

        let skipped = catalog.unlinked_count();
        if skipped > 0 {
            debug!("{} unlinked sessions have no link and were left out of the CSV", skipped);
        }

        Ok(out)
    }

    fn format(&self) -> OutputFormat {
        OutputFormat::Csv
    }
}

fn needs_quotes(field: &str, delimiter: char) -> bool {
    field.contains(delimiter) || field.contains('"') || field.contains('\n') || field.contains('\r')
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::Speaker;

    fn record(title: &str, url: &str, members_only: bool) -> SessionRecord {
        SessionRecord {
            title: title.to_string(),
            conference_name: "GDC 2019".to_string(),
            category: "Programming".to_string(),
            media_type: "video".to_string(),
            url: url.to_string(),
            members_only,
            sponsored: false,
            speaker: Speaker::new("Jane Doe", Some("Bot Studio".to_string())),
        }
    }

    #[test]
    fn test_format_tags() {
        assert_eq!(OutputFormat::from_tag("CSV"), Some(OutputFormat::Csv));
        assert_eq!(OutputFormat::from_tag(" plain "), Some(OutputFormat::Plain));
        assert_eq!(OutputFormat::from_tag("xml"), None);
        assert_eq!(OutputFormat::resolve("xml"), OutputFormat::Json);
        assert_eq!(OutputFormat::Plain.extension(), "txt");
        assert_eq!(OutputFormat::Csv.to_string(), "csv");
    }

    #[test]
    fn test_csv_free_content_is_inverted() {
        let mut catalog = Catalog::new();
        catalog.insert(record("Gated", "https://www.gdcvault.com/play/456/", true));
        catalog.insert(record("Open", "/play/123/", false));

        let csv = CsvRenderer::default().render(&catalog).unwrap();
        let lines: Vec<&str> = csv.lines().collect();

        assert_eq!(lines[0], "Conference;Media type;Category;Title;Speaker;Company;Link;Free content");
        assert_eq!(
            lines[1],
            "GDC 2019;video;Programming;Gated;Jane Doe;Bot Studio;https://www.gdcvault.com/play/456/;No"
        );
        assert!(lines[2].ends_with(";Yes"));
    }

    #[test]
    fn test_csv_quotes_fields_with_delimiter() {
        let mut catalog = Catalog::new();
        catalog.insert(record("Bots, Brains", "/play/1/", false));

        let csv = CsvRenderer::new(',').render(&catalog).unwrap();
        assert!(csv.lines().nth(1).unwrap().contains("\"Bots, Brains\""));
    }

    #[test]
    fn test_plain_groups_with_headings() {
        let mut catalog = Catalog::new();
        catalog.insert(record("Building Bots", "/play/123/", false));
        catalog.insert_unlinked("GDC 2019", "slide", "Design", "Lost Talk");

        let text = PlainRenderer.render(&catalog).unwrap();

        assert!(text.starts_with("# GDC 2019\n## video\n### Programming\n/play/123/ Building Bots\n"));
        assert!(text.contains("# Unlinked\n## GDC 2019\n### slide\n#### Design\nLost Talk\n"));
    }

    #[test]
    fn test_json_is_nested_by_conference() {
        let mut catalog = Catalog::new();
        catalog.insert(record("Building Bots", "/play/123/", false));

        let json = JsonRenderer.render(&catalog).unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();

        assert_eq!(
            value["GDC 2019"]["video"]["Programming"]["Building Bots"]["url"],
            "/play/123/"
        );
        assert!(value.get("unlinked").is_none());
    }
}
