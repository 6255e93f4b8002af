//! Application layer
//!
//! Renders catalogs to output text and orchestrates a full scrape run.

pub mod render;
pub mod scrape;

pub use render::{
    renderer_for, CsvRenderer, JsonRenderer, OutputFormat, PlainRenderer, RenderError, Renderer,
};
pub use scrape::{RunSummary, ScrapeJob};
