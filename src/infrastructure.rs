//! Infrastructure layer: page sources, HTML parsing, persistence,
//! configuration and logging.

pub mod config; // Layered configuration
pub mod html_source; // URL and file sources
pub mod http_client;
pub mod logging; // Logging infrastructure
pub mod parsing; // Session list extraction
pub mod parsing_error;
pub mod storage;

// Re-export commonly used items
pub use self::config::{AppConfig, ConfigError, ConfigManager, InputConfig, LoggingConfig, OutputConfig};
pub use html_source::{
    source_for, FileSource, HtmlSource, SourceDescriptor, SourceError, SourceKind, UrlSource,
};
pub use http_client::{HttpClient, HttpClientConfig};
pub use logging::{get_log_directory, init_logging, init_logging_with_config};
pub use parsing::{extract, ParsingError, ParsingResult, SessionListParser, SessionListSelectors};
pub use storage::{persist, StorageError};
