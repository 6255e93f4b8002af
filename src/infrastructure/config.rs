//! Configuration infrastructure
//!
//! Settings are layered, lowest priority first:
//! 1. Built-in defaults (`#[serde(default)]` on every section)
//! 2. A config file: the explicit `--config` path, or the optional
//!    `gdc-vault-scraper.{toml,json,yaml}` in the working directory and
//!    `<user config dir>/gdc-vault-scraper/config.*`
//! 3. Environment variables, e.g. `GDCVAULT__OUTPUT__TYPE=json`
//!
//! Command-line flags are applied on top by the binary.

#![allow(clippy::uninlined_format_args)]

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;

use super::html_source::{origin_of, SourceDescriptor, SourceKind};
use super::http_client::HttpClientConfig;
use super::parsing::SessionListSelectors;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to load config: {source}")]
    FileLoad {
        #[from]
        source: config::ConfigError,
    },

    #[error("Configuration validation failed: {message}")]
    Validation { message: String },
}

/// Complete application configuration
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub input: InputConfig,
    pub output: OutputConfig,
    pub http: HttpClientConfig,
    pub logging: LoggingConfig,
    pub selectors: SessionListSelectors,
}

/// Where the listing page comes from
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct InputConfig {
    /// `url` or `file`
    #[serde(rename = "type")]
    pub kind: SourceKind,

    /// Network address or local path
    pub uri: String,

    /// Prefix for gated links; derived from the input when unset
    pub base_url: Option<String>,
}

/// What to write and where
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    /// Format tag: `json`, `plain` or `csv`. Unknown tags fall back to JSON.
    #[serde(rename = "type")]
    pub format: String,

    /// Output file path
    pub file: String,

    /// Single-character CSV field delimiter
    pub csv_delimiter: String,
}

/// Logging configuration settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Log level: "error", "warn", "info", "debug", "trace"
    pub level: String,

    /// Enable JSON formatted logs
    pub json_format: bool,

    /// Enable console (stderr) output
    pub console_output: bool,

    /// Enable file output
    pub file_output: bool,

    /// Directory for the log file; defaults to `logs/` next to the executable
    pub log_dir: Option<PathBuf>,

    /// Log file name inside `log_dir`
    pub file_name: String,
}

impl Default for InputConfig {
    fn default() -> Self {
        Self {
            kind: SourceKind::Url,
            uri: gdc_vault::BROWSE_PAGE.to_string(),
            base_url: None,
        }
    }
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            format: defaults::OUTPUT_FORMAT.to_string(),
            file: defaults::OUTPUT_FILE.to_string(),
            csv_delimiter: defaults::CSV_DELIMITER.to_string(),
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: defaults::LOG_LEVEL.to_string(),
            json_format: defaults::LOG_JSON_FORMAT,
            console_output: defaults::LOG_CONSOLE_OUTPUT,
            file_output: defaults::LOG_FILE_OUTPUT,
            log_dir: None,
            file_name: defaults::LOG_FILE_NAME.to_string(),
        }
    }
}

impl InputConfig {
    pub fn descriptor(&self) -> SourceDescriptor {
        SourceDescriptor {
            kind: self.kind,
            uri: self.uri.clone(),
        }
    }
}

impl OutputConfig {
    /// The configured delimiter, or `;` when the setting is empty
    pub fn delimiter(&self) -> char {
        self.csv_delimiter.chars().next().unwrap_or(';')
    }

    pub fn path(&self) -> PathBuf {
        PathBuf::from(&self.file)
    }
}

impl AppConfig {
    /// Base URL for links recovered from gated entries.
    ///
    /// Explicit setting first, then the origin of a URL input, then the
    /// GDC Vault site root.
    pub fn base_url(&self) -> String {
        if let Some(base) = self.input.base_url.as_deref().filter(|b| !b.is_empty()) {
            return base.trim_end_matches('/').to_string();
        }
        match self.input.kind {
            SourceKind::Url => origin_of(&self.input.uri)
                .unwrap_or_else(|| gdc_vault::BASE_URL.to_string()),
            SourceKind::File => gdc_vault::BASE_URL.to_string(),
        }
    }

    /// Reject settings that cannot produce a run
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.input.uri.trim().is_empty() {
            return Err(ConfigError::Validation {
                message: "input.uri must not be empty".to_string(),
            });
        }

        if self.output.file.trim().is_empty() {
            return Err(ConfigError::Validation {
                message: "output.file must not be empty".to_string(),
            });
        }

        if self.http.timeout_seconds == 0 {
            return Err(ConfigError::Validation {
                message: "http.timeout_seconds must be greater than 0".to_string(),
            });
        }

        if self.output.csv_delimiter.chars().count() > 1 {
            return Err(ConfigError::Validation {
                message: format!(
                    "output.csv_delimiter must be a single character, got '{}'",
                    self.output.csv_delimiter
                ),
            });
        }

        Ok(())
    }
}

/// Configuration loader
pub struct ConfigManager;

impl ConfigManager {
    /// Per-user configuration directory
    pub fn get_config_dir() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join(defaults::APP_NAME))
    }

    /// Load configuration from defaults, file and environment.
    ///
    /// An explicit path must exist; the implicit locations are optional.
    pub fn load(explicit_path: Option<&Path>) -> Result<AppConfig, ConfigError> {
        let mut builder = config::Config::builder();

        match explicit_path {
            Some(path) => {
                debug!("Loading configuration from {:?}", path);
                builder = builder.add_source(config::File::from(path).required(true));
            }
            None => {
                if let Some(dir) = Self::get_config_dir() {
                    let user_config = dir.join("config");
                    builder = builder.add_source(
                        config::File::with_name(&user_config.to_string_lossy()).required(false),
                    );
                }
                builder = builder
                    .add_source(config::File::with_name(defaults::LOCAL_CONFIG_NAME).required(false));
            }
        }

        let settings = builder
            .add_source(
                config::Environment::with_prefix(defaults::ENV_PREFIX)
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        let config: AppConfig = settings.try_deserialize()?;
        config.validate()?;
        Ok(config)
    }
}

/// GDC Vault site constants
pub mod gdc_vault {
    /// Site root, prefix for gated playback links
    pub const BASE_URL: &str = "https://www.gdcvault.com";

    /// Default browse page (GDC 2019)
    pub const BROWSE_PAGE: &str = "https://www.gdcvault.com/browse/gdc-19";
}

/// Default configuration values
pub mod defaults {
    pub const APP_NAME: &str = "gdc-vault-scraper";

    /// Config file stem looked up in the working directory
    pub const LOCAL_CONFIG_NAME: &str = "gdc-vault-scraper";

    /// Environment variable prefix
    pub const ENV_PREFIX: &str = "GDCVAULT";

    pub const OUTPUT_FORMAT: &str = "csv";
    pub const OUTPUT_FILE: &str = "gdc_vault_links.csv";
    pub const CSV_DELIMITER: &str = ";";

    pub const LOG_LEVEL: &str = "info";
    pub const LOG_JSON_FORMAT: bool = false;
    pub const LOG_CONSOLE_OUTPUT: bool = true;
    pub const LOG_FILE_OUTPUT: bool = false;
    pub const LOG_FILE_NAME: &str = "gdc-vault-scraper.log";
}
