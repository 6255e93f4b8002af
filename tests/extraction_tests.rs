//! Extraction tests against a saved browse page
use gdc_vault_scraper::infrastructure::parsing::{
    extract, sanitize_title, ContextualParser, ParseContext, SessionListParser,
    SessionListSelectors,
};
use gdc_vault_scraper::Catalog;
use proptest::prelude::*;
use scraper::Html;

const FIXTURE: &str = include_str!("fixtures/browse_page.html");
const BASE: &str = "https://www.gdcvault.com";

fn catalog() -> Catalog {
    extract(FIXTURE, BASE)
}

#[test]
fn every_entry_is_accounted_for_once() {
    let catalog = catalog();
    // 7 entries, one of which overwrites an earlier title
    assert_eq!(catalog.session_count(), 4);
    assert_eq!(catalog.unlinked_count(), 2);
}

#[test]
fn direct_href_is_kept_verbatim() {
    let catalog = catalog();
    let record = catalog
        .get("GDC 2018", "video", "Production & Team Management", "Postmortem: Into the Breach")
        .expect("postmortem session");

    assert_eq!(record.url, "https://www.gdcvault.com/play/1024000/Postmortem");
    assert!(!record.members_only);
    assert_eq!(record.speaker.name, "Justin Ma");
    // company label without parentheses is not a company
    assert_eq!(record.speaker.company, None);
}

#[test]
fn vault_gate_link_is_prefixed_with_base_url() {
    let catalog = catalog();
    let record = catalog
        .get("GDC 2019", "slide", "Design", "Level Design Workshop")
        .expect("gated session");

    assert_eq!(record.url, "https://www.gdcvault.com/play/1026000/Gated-Talk");
    assert!(record.members_only);
    assert!(!record.sponsored);
    assert_eq!(record.speaker.name, "John Smith");
}

#[test]
fn sponsor_gate_link_uses_play_id() {
    let catalog = catalog();
    let record = catalog
        .get("GDC 2019", "video", "Sponsored", "Sponsors Session")
        .expect("sponsored session");

    assert_eq!(record.url, "https://www.gdcvault.com/play/1026001/");
    assert!(record.members_only);
    assert!(record.sponsored);
    assert_eq!(record.speaker.company.as_deref(), Some("Engine Co"));
}

#[test]
fn later_duplicate_title_overwrites_earlier() {
    let catalog = catalog();
    let record = catalog
        .get("GDC 2019", "video", "Programming", "Building Bots")
        .expect("building bots");

    assert_eq!(record.url, "/play/1026002/Building-Bots-Encore");
    assert_eq!(record.speaker.company.as_deref(), Some("Bot Studio"));
}

#[test]
fn unresolvable_entries_land_in_unlinked_bucket() {
    let catalog = catalog();

    let programming = catalog
        .unlinked_titles("GDC 2019", "video", "Programming")
        .expect("unmatched onclick");
    assert!(programming.contains("Mystery Talk"));
    assert!(catalog.get("GDC 2019", "video", "Programming", "Mystery Talk").is_none());

    let audio = catalog
        .unlinked_titles("GDC 2019", "audio", "Audio")
        .expect("entry without link");
    assert!(audio.contains("Lost Recording"));
}

#[test]
fn output_follows_page_order() {
    let catalog = catalog();
    let conferences: Vec<&str> = catalog.conferences().keys().map(String::as_str).collect();
    assert_eq!(conferences, ["GDC 2019", "GDC 2018"]);

    let titles: Vec<&str> = catalog.records().map(|r| r.title.as_str()).collect();
    assert_eq!(
        titles,
        [
            "Building Bots",
            "Sponsors Session",
            "Level Design Workshop",
            "Postmortem: Into the Breach"
        ]
    );
}

#[test]
fn extraction_is_idempotent() {
    assert_eq!(catalog(), catalog());
}

#[test]
fn page_without_entries_yields_empty_catalog() {
    let catalog = extract("<html><body><p>Maintenance</p></body></html>", BASE);
    assert!(catalog.is_empty());
}

#[test]
fn contextual_parser_matches_free_function() {
    let parser = SessionListParser::new().unwrap();
    let document = Html::parse_document(FIXTURE);
    let context = ParseContext::new(BASE).with_source("fixtures/browse_page.html");

    let parsed = parser.parse_with_context(&document, &context).unwrap();
    assert_eq!(parsed, catalog());
}

#[test]
fn custom_selectors_change_the_entry_pattern() {
    let selectors = SessionListSelectors {
        entry: vec!["li > a[href^='/play/']".to_string()],
        ..SessionListSelectors::default()
    };
    let parser = SessionListParser::with_config(&selectors).unwrap();

    let catalog = parser.extract(FIXTURE, BASE);
    assert_eq!(catalog.session_count(), 1);
    assert_eq!(catalog.unlinked_count(), 0);
}

proptest! {
    #[test]
    fn sanitized_titles_never_contain_quotes(raw in ".*") {
        let title = sanitize_title(&raw);
        prop_assert!(!title.contains('\''));
        prop_assert!(!title.contains('"'));
    }

    #[test]
    fn extracted_titles_never_contain_quotes(raw in "[a-zA-Z '\"]{1,24}") {
        let html = format!(
            r#"<ul class="media_items"><li><a href="/play/1/">
                <div class="media_type_image video"></div>
                <div class="conference_info"><p><strong>{raw}</strong></p></div>
            </a></li></ul>"#
        );
        let catalog = extract(&html, BASE);
        for record in catalog.records() {
            prop_assert!(!record.title.contains('\''));
            prop_assert!(!record.title.contains('"'));
        }
        prop_assert_eq!(catalog.session_count() + catalog.unlinked_count(), 1);
    }

    #[test]
    fn vault_gate_path_is_appended_verbatim(path in "/play/[0-9]{1,7}/[A-Za-z-]{0,12}") {
        let html = format!(
            r#"<ul class="media_items"><li><a onclick="loginPopup('{path}'); return false;">
                <div class="media_type_image video"></div>
                <div class="conference_info"><p><strong>Talk</strong></p></div>
            </a></li></ul>"#
        );
        let catalog = extract(&html, BASE);
        let record = catalog.get("", "video", "", "Talk").unwrap();
        prop_assert_eq!(&record.url, &format!("{BASE}{path}"));
        prop_assert!(record.members_only);
    }
}
