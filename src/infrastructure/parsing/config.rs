//! Selector configuration for the browse page
//!
//! Each field holds fallback selectors tried in order; the first one that
//! matches inside the current element wins. Defaults follow the GDC Vault
//! browse page markup:
//!
//! ```html
//! <ul class="media_items">
//!   <li>
//!     <a class="session_item" href="..." onclick="...">
//!       <div class="media_type_image video"></div>
//!       <div class="conference_info">
//!         <p><strong>Title</strong></p>
//!         <p>
//!           <span class="conference_name">GDC 2019</span>
//!           <span class="track_name">Programming</span>
//!           <span>Speaker Name <strong>(Company)</strong></span>
//!         </p>
//!       </div>
//!     </a>
//!   </li>
//! </ul>
//! ```

use serde::{Deserialize, Serialize};

/// CSS selectors for session entries on a listing page
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SessionListSelectors {
    /// One element per session entry (the link-carrying anchor)
    pub entry: Vec<String>,

    /// Icon whose second class token names the media type
    pub media_type_icon: Vec<String>,

    /// Info block holding title, labels and speaker
    pub info_block: Vec<String>,

    /// Session title, searched inside the info block
    pub title: Vec<String>,

    /// Conference name label
    pub conference_name: Vec<String>,

    /// Track/category label
    pub track_name: Vec<String>,

    /// Speaker block: everything in the info block that is not one of the labels
    pub speaker_block: Vec<String>,

    /// Bolded "(Company)" suffix inside the speaker block
    pub company: Vec<String>,
}

impl Default for SessionListSelectors {
    fn default() -> Self {
        Self {
            entry: vec![
                "ul.media_items > li > a".to_string(),
                "a.session_item".to_string(),
            ],
            media_type_icon: vec![".media_type_image".to_string()],
            info_block: vec![".conference_info".to_string()],
            title: vec!["p > strong".to_string(), ".session_title".to_string()],
            conference_name: vec![".conference_name".to_string()],
            track_name: vec![".track_name".to_string()],
            speaker_block: vec!["span:not(.conference_name):not(.track_name)".to_string()],
            company: vec!["strong".to_string(), "b".to_string()],
        }
    }
}
