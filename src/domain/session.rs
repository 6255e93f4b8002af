//! Session record extracted from one catalog entry

use serde::{Deserialize, Serialize};

/// Speaker credited on a session
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Speaker {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub company: Option<String>,
}

impl Speaker {
    pub fn new(name: impl Into<String>, company: Option<String>) -> Self {
        Self {
            name: name.into(),
            company,
        }
    }
}

/// One catalog entry with a resolved playback link.
///
/// Entries whose link could not be resolved never become a record; they are
/// kept as bare titles in the catalog's unlinked bucket instead.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionRecord {
    pub title: String,
    pub conference_name: String,
    pub category: String,
    pub media_type: String,
    pub url: String,
    pub members_only: bool,
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub sponsored: bool,
    pub speaker: Speaker,
}

impl SessionRecord {
    /// Inverse of `members_only`
    pub const fn is_free(&self) -> bool {
        !self.members_only
    }
}
