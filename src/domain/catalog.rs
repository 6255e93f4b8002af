//! Grouped catalog of extracted sessions
//!
//! Sessions are grouped conference → media type → category → title. Titles
//! are the dedup key inside a category: a later entry with the same title
//! replaces the earlier one. Entries without a resolvable link are kept in a
//! parallel `unlinked` tree holding titles only.
//!
//! Maps are insertion-ordered so rendered output follows the page order.

use indexmap::{IndexMap, IndexSet};
use serde::{Deserialize, Serialize};

use super::session::SessionRecord;

/// Titles within one category
pub type CategoryMap = IndexMap<String, SessionRecord>;
/// Categories within one media type
pub type MediaTypeMap = IndexMap<String, CategoryMap>;
/// Media types within one conference
pub type ConferenceMap = IndexMap<String, MediaTypeMap>;
/// conference → media type → category → titles without a link
pub type UnlinkedBucket = IndexMap<String, IndexMap<String, IndexMap<String, IndexSet<String>>>>;

/// Result of one extraction pass
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Catalog {
    #[serde(flatten)]
    conferences: IndexMap<String, ConferenceMap>,

    #[serde(default, skip_serializing_if = "IndexMap::is_empty")]
    unlinked: UnlinkedBucket,
}

impl Catalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a record at `[conference][media_type][category][title]`.
    ///
    /// Returns the record previously stored at that path, if any. The same
    /// title is dropped from the unlinked bucket so a path is never both.
    pub fn insert(&mut self, record: SessionRecord) -> Option<SessionRecord> {
        self.remove_unlinked(
            &record.conference_name,
            &record.media_type,
            &record.category,
            &record.title,
        );

        self.conferences
            .entry(record.conference_name.clone())
            .or_default()
            .entry(record.media_type.clone())
            .or_default()
            .entry(record.category.clone())
            .or_default()
            .insert(record.title.clone(), record)
    }

    /// Record a title whose link could not be resolved.
    ///
    /// Any record at the same path is removed (latest entry wins). Returns
    /// `false` if the title was already in the bucket.
    pub fn insert_unlinked(
        &mut self,
        conference: &str,
        media_type: &str,
        category: &str,
        title: &str,
    ) -> bool {
        self.remove_record(conference, media_type, category, title);

        self.unlinked
            .entry(conference.to_string())
            .or_default()
            .entry(media_type.to_string())
            .or_default()
            .entry(category.to_string())
            .or_default()
            .insert(title.to_string())
    }

    pub fn get(
        &self,
        conference: &str,
        media_type: &str,
        category: &str,
        title: &str,
    ) -> Option<&SessionRecord> {
        self.conferences
            .get(conference)?
            .get(media_type)?
            .get(category)?
            .get(title)
    }

    pub fn unlinked_titles(
        &self,
        conference: &str,
        media_type: &str,
        category: &str,
    ) -> Option<&IndexSet<String>> {
        self.unlinked.get(conference)?.get(media_type)?.get(category)
    }

    pub const fn conferences(&self) -> &IndexMap<String, ConferenceMap> {
        &self.conferences
    }

    pub const fn unlinked(&self) -> &UnlinkedBucket {
        &self.unlinked
    }

    /// All records, depth-first in insertion order
    pub fn records(&self) -> impl Iterator<Item = &SessionRecord> {
        self.conferences
            .values()
            .flat_map(IndexMap::values)
            .flat_map(IndexMap::values)
            .flat_map(IndexMap::values)
    }

    pub fn session_count(&self) -> usize {
        self.records().count()
    }

    pub fn unlinked_count(&self) -> usize {
        self.unlinked
            .values()
            .flat_map(IndexMap::values)
            .flat_map(IndexMap::values)
            .map(IndexSet::len)
            .sum()
    }

    pub fn is_empty(&self) -> bool {
        self.conferences.is_empty() && self.unlinked.is_empty()
    }

    fn remove_record(&mut self, conference: &str, media_type: &str, category: &str, title: &str) {
        let Some(media_types) = self.conferences.get_mut(conference) else {
            return;
        };
        let Some(categories) = media_types.get_mut(media_type) else {
            return;
        };
        let Some(titles) = categories.get_mut(category) else {
            return;
        };
        if titles.shift_remove(title).is_none() {
            return;
        }

        // prune empty branches so the JSON never shows `{}` groups
        if titles.is_empty() {
            categories.shift_remove(category);
        }
        if categories.is_empty() {
            media_types.shift_remove(media_type);
        }
        if media_types.is_empty() {
            self.conferences.shift_remove(conference);
        }
    }

    fn remove_unlinked(&mut self, conference: &str, media_type: &str, category: &str, title: &str) {
        let Some(media_types) = self.unlinked.get_mut(conference) else {
            return;
        };
        let Some(categories) = media_types.get_mut(media_type) else {
            return;
        };
        let Some(titles) = categories.get_mut(category) else {
            return;
        };
        if !titles.shift_remove(title) {
            return;
        }

        if titles.is_empty() {
            categories.shift_remove(category);
        }
        if categories.is_empty() {
            media_types.shift_remove(media_type);
        }
        if media_types.is_empty() {
            self.unlinked.shift_remove(conference);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::session::Speaker;

    fn record(conference: &str, media_type: &str, category: &str, title: &str, url: &str) -> SessionRecord {
        SessionRecord {
            title: title.to_string(),
            conference_name: conference.to_string(),
            category: category.to_string(),
            media_type: media_type.to_string(),
            url: url.to_string(),
            members_only: false,
            sponsored: false,
            speaker: Speaker::default(),
        }
    }

    #[test]
    fn test_insert_groups_by_conference_media_type_and_category() {
        let mut catalog = Catalog::new();
        catalog.insert(record("GDC 2019", "video", "Programming", "Building Bots", "/play/1/"));
        catalog.insert(record("GDC 2019", "slide", "Design", "Level Flow", "/play/2/"));
        catalog.insert(record("VRDC 2019", "video", "VR", "Presence", "/play/3/"));

        assert_eq!(catalog.conferences().len(), 2);
        assert_eq!(catalog.conferences()["GDC 2019"].len(), 2);
        assert_eq!(
            catalog.get("GDC 2019", "slide", "Design", "Level Flow").map(|r| r.url.as_str()),
            Some("/play/2/")
        );
        assert_eq!(catalog.session_count(), 3);
        assert_eq!(catalog.unlinked_count(), 0);
    }

    #[test]
    fn test_duplicate_title_overwrites_previous_record() {
        let mut catalog = Catalog::new();
        assert!(catalog.insert(record("GDC", "video", "Art", "Same", "/play/1/")).is_none());
        let previous = catalog.insert(record("GDC", "video", "Art", "Same", "/play/2/"));

        assert_eq!(previous.map(|r| r.url), Some("/play/1/".to_string()));
        assert_eq!(catalog.session_count(), 1);
        assert_eq!(catalog.get("GDC", "video", "Art", "Same").unwrap().url, "/play/2/");
    }

    #[test]
    fn test_path_is_never_both_linked_and_unlinked() {
        let mut catalog = Catalog::new();
        catalog.insert(record("GDC", "video", "Art", "Talk", "/play/1/"));
        assert!(catalog.insert_unlinked("GDC", "video", "Art", "Talk"));

        assert!(catalog.get("GDC", "video", "Art", "Talk").is_none());
        assert!(catalog.conferences().is_empty());
        assert!(catalog.unlinked_titles("GDC", "video", "Art").unwrap().contains("Talk"));

        catalog.insert(record("GDC", "video", "Art", "Talk", "/play/9/"));
        assert!(catalog.unlinked_titles("GDC", "video", "Art").is_none());
        assert!(catalog.unlinked().is_empty());
        assert_eq!(catalog.session_count(), 1);
    }

    #[test]
    fn test_repeated_unlinked_title_is_kept_once() {
        let mut catalog = Catalog::new();
        assert!(catalog.insert_unlinked("GDC", "video", "Art", "Talk"));
        assert!(!catalog.insert_unlinked("GDC", "video", "Art", "Talk"));
        assert_eq!(catalog.unlinked_count(), 1);
    }

    #[test]
    fn test_json_shape_has_conferences_at_top_level_and_optional_unlinked() {
        let mut catalog = Catalog::new();
        catalog.insert(record("GDC 2019", "video", "Programming", "Building Bots", "/play/123/"));

        let value = serde_json::to_value(&catalog).unwrap();
        assert_eq!(
            value["GDC 2019"]["video"]["Programming"]["Building Bots"]["url"],
            "/play/123/"
        );
        assert!(value.get("unlinked").is_none());

        catalog.insert_unlinked("GDC 2019", "video", "Programming", "Hidden Talk");
        let value = serde_json::to_value(&catalog).unwrap();
        assert_eq!(value["unlinked"]["GDC 2019"]["video"]["Programming"][0], "Hidden Talk");
    }

    #[test]
    fn test_records_follow_insertion_order() {
        let mut catalog = Catalog::new();
        catalog.insert(record("B", "video", "X", "first", "/1"));
        catalog.insert(record("A", "video", "X", "second", "/2"));
        catalog.insert(record("B", "video", "X", "third", "/3"));

        let titles: Vec<&str> = catalog.records().map(|r| r.title.as_str()).collect();
        assert_eq!(titles, vec!["first", "third", "second"]);
    }
}
