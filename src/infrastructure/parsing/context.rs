//! Parsing context for listing pages

/// Context information for one extraction pass
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseContext {
    /// Prefix for links recovered from on-click handlers
    pub base_url: String,

    /// Where the HTML came from, for log messages only
    pub source: Option<String>,
}

impl ParseContext {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            source: None,
        }
    }

    /// Attach a source description (URL or file path)
    pub fn with_source(mut self, source: impl Into<String>) -> Self {
        self.source = Some(source.into());
        self
    }
}
