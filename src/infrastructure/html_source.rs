//! HTML sources: where the listing page comes from
//!
//! A source is either a network address or a local file. Both return the
//! whole document or an error, never partial content.

use std::path::PathBuf;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use url::Url;

use super::http_client::{HttpClient, HttpClientConfig};

#[derive(Error, Debug)]
pub enum SourceError {
    #[error("Invalid source URL '{url}': {reason}")]
    InvalidUrl { url: String, reason: String },

    #[error("HTTP request to {url} failed: {source}")]
    Request {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("HTTP request failed with status {status}: {url}")]
    Status { status: u16, url: String },

    #[error("Failed to read {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("HTTP client error: {0}")]
    Client(String),
}

/// Kind of input source, tagged as in the configuration file
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SourceKind {
    Url,
    File,
}

/// Where to read the listing page from
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SourceDescriptor {
    #[serde(rename = "type")]
    pub kind: SourceKind,
    pub uri: String,
}

impl SourceDescriptor {
    pub fn url(uri: impl Into<String>) -> Self {
        Self {
            kind: SourceKind::Url,
            uri: uri.into(),
        }
    }

    pub fn file(uri: impl Into<String>) -> Self {
        Self {
            kind: SourceKind::File,
            uri: uri.into(),
        }
    }
}

/// Supplies raw HTML for one extraction pass
#[async_trait]
pub trait HtmlSource: Send + Sync {
    async fn fetch(&self) -> Result<String, SourceError>;

    /// Human-readable description for logs
    fn describe(&self) -> String;
}

/// Listing page fetched over HTTP(S)
pub struct UrlSource {
    url: Url,
    client: HttpClient,
}

impl UrlSource {
    pub fn new(uri: &str, config: &HttpClientConfig) -> Result<Self, SourceError> {
        let url = Url::parse(uri).map_err(|e| SourceError::InvalidUrl {
            url: uri.to_string(),
            reason: e.to_string(),
        })?;
        let client = HttpClient::new(config.clone())?;
        Ok(Self { url, client })
    }
}

#[async_trait]
impl HtmlSource for UrlSource {
    async fn fetch(&self) -> Result<String, SourceError> {
        self.client.get_text(self.url.as_str()).await
    }

    fn describe(&self) -> String {
        self.url.to_string()
    }
}

/// Listing page saved to disk
pub struct FileSource {
    path: PathBuf,
}

impl FileSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

#[async_trait]
impl HtmlSource for FileSource {
    async fn fetch(&self) -> Result<String, SourceError> {
        tracing::info!("Reading file: {}", self.path.display());
        tokio::fs::read_to_string(&self.path)
            .await
            .map_err(|source| SourceError::Read {
                path: self.path.clone(),
                source,
            })
    }

    fn describe(&self) -> String {
        self.path.display().to_string()
    }
}

/// Build the source named by a descriptor
pub fn source_for(
    descriptor: &SourceDescriptor,
    http: &HttpClientConfig,
) -> Result<Box<dyn HtmlSource>, SourceError> {
    match descriptor.kind {
        SourceKind::Url => Ok(Box::new(UrlSource::new(&descriptor.uri, http)?)),
        SourceKind::File => Ok(Box::new(FileSource::new(&descriptor.uri))),
    }
}

/// Origin (`scheme://host[:port]`) of a URL, used as the default base URL
pub fn origin_of(uri: &str) -> Option<String> {
    let url = Url::parse(uri).ok()?;
    let origin = url.origin();
    origin.is_tuple().then(|| origin.ascii_serialization())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_origin_of() {
        assert_eq!(
            origin_of("https://www.gdcvault.com/browse/gdc-19").as_deref(),
            Some("https://www.gdcvault.com")
        );
        assert_eq!(
            origin_of("http://localhost:8080/browse").as_deref(),
            Some("http://localhost:8080")
        );
        assert_eq!(origin_of("not a url"), None);
    }

    #[test]
    fn test_descriptor_uses_type_tag() {
        let descriptor: SourceDescriptor =
            serde_json::from_str(r#"{ "type": "file", "uri": "input/GDC Vault.html" }"#).unwrap();
        assert_eq!(descriptor, SourceDescriptor::file("input/GDC Vault.html"));
    }

    #[test]
    fn test_invalid_url_is_rejected() {
        let result = source_for(&SourceDescriptor::url("::nope::"), &HttpClientConfig::default());
        assert!(matches!(result, Err(SourceError::InvalidUrl { .. })));
    }

    #[tokio::test]
    async fn test_file_source_reads_whole_document() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "<html><body>hello</body></html>").unwrap();

        let source = source_for(
            &SourceDescriptor::file(file.path().to_string_lossy()),
            &HttpClientConfig::default(),
        )
        .unwrap();

        assert_eq!(source.fetch().await.unwrap(), "<html><body>hello</body></html>");
    }

    #[tokio::test]
    async fn test_missing_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let source = FileSource::new(dir.path().join("missing.html"));

        let err = source.fetch().await.unwrap_err();
        assert!(matches!(err, SourceError::Read { .. }));
    }
}
