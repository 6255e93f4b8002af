//! Session list parser for catalog browse pages
//!
//! Walks every session entry on a listing page and files it into a
//! [`Catalog`]. Extraction never fails: a missing sub-field becomes an empty
//! string, and an entry whose link cannot be resolved is recorded as a bare
//! title in the unlinked bucket.

#![allow(clippy::uninlined_format_args)]

use once_cell::sync::Lazy;
use regex::Regex;
use scraper::{ElementRef, Html, Selector};
use tracing::{debug, error, info, warn};

use super::config::SessionListSelectors;
use super::link_resolver::{resolve_link, LinkResolution};
use super::{ContextualParser, ParseContext, ParsingError, ParsingResult};
use crate::domain::{Catalog, SessionRecord, Speaker};

static COMPANY_PATTERN: Lazy<Regex> = Lazy::new(|| Regex::new(r"^\((.+)\)$").unwrap());

/// Parser for extracting session entries from a listing page
pub struct SessionListParser {
    entry_selectors: Vec<Selector>,
    media_type_icon_selectors: Vec<Selector>,
    info_block_selectors: Vec<Selector>,
    title_selectors: Vec<Selector>,
    conference_name_selectors: Vec<Selector>,
    track_name_selectors: Vec<Selector>,
    speaker_block_selectors: Vec<Selector>,
    company_selectors: Vec<Selector>,
}

/// Text fields of one entry, read before link resolution
#[derive(Debug)]
struct EntryFields {
    media_type: String,
    title: String,
    conference_name: String,
    category: String,
    speaker: Speaker,
}

impl SessionListParser {
    /// Create a parser with the default browse-page selectors
    pub fn new() -> ParsingResult<Self> {
        Self::with_config(&SessionListSelectors::default())
    }

    /// Create a parser with custom selector configuration
    pub fn with_config(selectors: &SessionListSelectors) -> ParsingResult<Self> {
        Ok(Self {
            entry_selectors: Self::compile_selectors("entry", &selectors.entry)?,
            media_type_icon_selectors: Self::compile_selectors(
                "media_type_icon",
                &selectors.media_type_icon,
            )?,
            info_block_selectors: Self::compile_selectors("info_block", &selectors.info_block)?,
            title_selectors: Self::compile_selectors("title", &selectors.title)?,
            conference_name_selectors: Self::compile_selectors(
                "conference_name",
                &selectors.conference_name,
            )?,
            track_name_selectors: Self::compile_selectors("track_name", &selectors.track_name)?,
            speaker_block_selectors: Self::compile_selectors(
                "speaker_block",
                &selectors.speaker_block,
            )?,
            company_selectors: Self::compile_selectors("company", &selectors.company)?,
        })
    }

    /// Compile fallback selector strings, skipping the ones that fail.
    ///
    /// At least one selector per field must compile.
    fn compile_selectors(field: &str, selector_strings: &[String]) -> ParsingResult<Vec<Selector>> {
        let mut selectors = Vec::new();
        let mut errors = Vec::new();

        for selector_str in selector_strings {
            match Selector::parse(selector_str) {
                Ok(selector) => selectors.push(selector),
                Err(e) => {
                    let failure = ParsingError::invalid_selector(field, selector_str, &e.to_string());
                    warn!("{}", failure);
                    errors.push(format!("'{}': {}", selector_str, e));
                }
            }
        }

        if selectors.is_empty() {
            return Err(ParsingError::no_valid_selectors(field, errors));
        }

        Ok(selectors)
    }

    /// Extract every session entry from raw HTML
    pub fn extract(&self, html: &str, base_url: &str) -> Catalog {
        let document = Html::parse_document(html);
        self.extract_from_document(&document, &ParseContext::new(base_url))
    }

    fn extract_from_document(&self, document: &Html, context: &ParseContext) -> Catalog {
        let mut catalog = Catalog::new();
        let source = context.source.as_deref().unwrap_or("<inline html>");

        let Some(entries) = self.find_entries(document) else {
            info!("No session entries found in {}", source);
            return catalog;
        };

        debug!("Found {} session entries in {}", entries.len(), source);

        for (index, entry) in entries.into_iter().enumerate() {
            self.extract_entry(entry, index, &context.base_url, &mut catalog);
        }

        info!(
            "Extracted {} sessions ({} unlinked) from {}",
            catalog.session_count(),
            catalog.unlinked_count(),
            source
        );

        catalog
    }

    /// Entries from the first entry selector that matches anything
    fn find_entries<'a>(&self, document: &'a Html) -> Option<Vec<ElementRef<'a>>> {
        self.entry_selectors
            .iter()
            .map(|selector| document.select(selector).collect::<Vec<_>>())
            .find(|entries| !entries.is_empty())
    }

    fn extract_entry(&self, entry: ElementRef<'_>, index: usize, base_url: &str, catalog: &mut Catalog) {
        let fields = self.read_fields(entry);

        let onclick = entry.value().attr("onclick");
        let href = entry.value().attr("href");

        match resolve_link(onclick, href, base_url) {
            LinkResolution::Resolved {
                url,
                members_only,
                sponsored,
            } => {
                debug!(
                    "Entry {}: '{}' -> {} (members_only: {})",
                    index, fields.title, url, members_only
                );
                let record = SessionRecord {
                    title: fields.title,
                    conference_name: fields.conference_name,
                    category: fields.category,
                    media_type: fields.media_type,
                    url,
                    members_only,
                    sponsored,
                    speaker: fields.speaker,
                };
                if let Some(previous) = catalog.insert(record) {
                    debug!("Entry {}: replaced earlier session '{}'", index, previous.title);
                }
            }
            LinkResolution::Unresolved => {
                if onclick.is_some() {
                    debug!("Entry {}: '{}' has an unrecognised onclick handler", index, fields.title);
                } else {
                    debug!("Entry {}: '{}' has no link", index, fields.title);
                }
                catalog.insert_unlinked(
                    &fields.conference_name,
                    &fields.media_type,
                    &fields.category,
                    &fields.title,
                );
            }
        }
    }

    fn read_fields(&self, entry: ElementRef<'_>) -> EntryFields {
        let media_type = select_first(entry, &self.media_type_icon_selectors)
            .and_then(|icon| icon.value().attr("class"))
            .and_then(|class| class.split_whitespace().nth(1))
            .unwrap_or_default()
            .to_string();

        // labels live in the info block; fall back to the whole entry
        let scope = select_first(entry, &self.info_block_selectors).unwrap_or(entry);

        let title = sanitize_title(&text_of(scope, &self.title_selectors));
        let conference_name = text_of(scope, &self.conference_name_selectors).trim().to_string();
        let category = text_of(scope, &self.track_name_selectors).trim().to_string();
        let speaker = self.read_speaker(scope);

        EntryFields {
            media_type,
            title,
            conference_name,
            category,
            speaker,
        }
    }

    fn read_speaker(&self, scope: ElementRef<'_>) -> Speaker {
        let Some(block) = select_first(scope, &self.speaker_block_selectors) else {
            return Speaker::default();
        };

        let name = direct_text(block);
        let company = parse_company(text_of(block, &self.company_selectors).trim());

        Speaker { name, company }
    }
}

impl ContextualParser for SessionListParser {
    type Output = Catalog;
    type Context = ParseContext;

    fn parse_with_context(&self, html: &Html, context: &Self::Context) -> ParsingResult<Self::Output> {
        Ok(self.extract_from_document(html, context))
    }
}

/// Extract sessions with the default selectors
pub fn extract(html: &str, base_url: &str) -> Catalog {
    match SessionListParser::new() {
        Ok(parser) => parser.extract(html, base_url),
        Err(e) => {
            error!("Default selectors failed to compile: {}", e);
            Catalog::new()
        }
    }
}

fn select_first<'a>(scope: ElementRef<'a>, selectors: &[Selector]) -> Option<ElementRef<'a>> {
    selectors
        .iter()
        .find_map(|selector| scope.select(selector).next())
}

fn text_of(scope: ElementRef<'_>, selectors: &[Selector]) -> String {
    select_first(scope, selectors)
        .map(|element| element.text().collect::<String>())
        .unwrap_or_default()
}

/// Text nodes that are direct children of `element`, whitespace-collapsed
fn direct_text(element: ElementRef<'_>) -> String {
    let raw: String = element
        .children()
        .filter_map(|node| node.value().as_text())
        .map(|text| &**text)
        .collect::<Vec<&str>>()
        .join(" ");

    raw.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Trim and drop quote characters, which break delimited output
pub fn sanitize_title(raw: &str) -> String {
    raw.trim().replace(['\'', '"'], "")
}

/// `(Company)` → `Some("Company")`
fn parse_company(text: &str) -> Option<String> {
    COMPANY_PATTERN
        .captures(text)
        .map(|caps| caps[1].to_string())
}
