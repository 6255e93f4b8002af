//! HTML parsing for catalog browse pages
//!
//! Selector-driven extraction of session entries with fallback selectors,
//! plus the gate rules that recover links hidden behind `onclick` handlers.

pub mod config;
pub mod context;
pub mod link_resolver;
pub mod session_list_parser;

// Re-export public types
pub use super::parsing_error::{ParsingError, ParsingResult};
pub use self::config::SessionListSelectors;
pub use context::ParseContext;
pub use link_resolver::{resolve_link, resolve_onclick, LinkResolution, LinkRule, LINK_RULES};
pub use session_list_parser::{extract, sanitize_title, SessionListParser};

use scraper::Html;

/// Parser over an already-parsed document with contextual information
pub trait ContextualParser {
    type Output;
    type Context;

    /// Parse HTML with contextual information
    fn parse_with_context(&self, html: &Html, context: &Self::Context) -> ParsingResult<Self::Output>;
}
