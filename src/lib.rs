//! GDC Vault Scraper
//!
//! Extracts session metadata (title, conference, category, speaker, access
//! restriction and playback link) from a GDC Vault browse page and writes it
//! as JSON, plain text or CSV.

// Module declarations
pub mod application;
pub mod domain;
pub mod infrastructure;

// Re-export the main entry points
pub use application::{OutputFormat, RunSummary, ScrapeJob};
pub use domain::{Catalog, SessionRecord, Speaker};
pub use infrastructure::{extract, AppConfig, ConfigManager};
