//! Link resolution for session entries
//!
//! Gated sessions hide their playback link behind an inline `onclick`
//! handler. The link is recovered by matching the handler against an ordered
//! table of known gate patterns; the first matching rule wins.

use once_cell::sync::Lazy;
use regex::{Captures, Regex};

/// Outcome of resolving an entry's link
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LinkResolution {
    Resolved {
        url: String,
        members_only: bool,
        sponsored: bool,
    },
    Unresolved,
}

impl LinkResolution {
    pub const fn is_resolved(&self) -> bool {
        matches!(self, Self::Resolved { .. })
    }
}

/// A known gate pattern and how to turn its captures into a link
pub struct LinkRule {
    pub name: &'static str,
    pattern: &'static Lazy<Regex>,
    resolve: fn(&Captures<'_>, &str) -> LinkResolution,
}

impl LinkRule {
    pub fn apply(&self, onclick: &str, base_url: &str) -> Option<LinkResolution> {
        self.pattern
            .captures(onclick)
            .map(|caps| (self.resolve)(&caps, base_url))
    }

    pub fn pattern(&self) -> &str {
        self.pattern.as_str()
    }
}

static VAULT_GATE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^loginPopup\('(.+)'\); return false;$").unwrap());

static SPONSOR_GATE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^sponsorRegPopup\('\d+','(\d+)','\d+'\)$").unwrap());

fn resolve_vault_gate(caps: &Captures<'_>, base_url: &str) -> LinkResolution {
    LinkResolution::Resolved {
        url: format!("{base_url}{}", &caps[1]),
        members_only: true,
        sponsored: false,
    }
}

fn resolve_sponsor_gate(caps: &Captures<'_>, base_url: &str) -> LinkResolution {
    LinkResolution::Resolved {
        url: format!("{base_url}/play/{}/", &caps[1]),
        members_only: true,
        sponsored: true,
    }
}

/// Gate rules in the order they are tried
pub static LINK_RULES: [LinkRule; 2] = [
    LinkRule {
        name: "vault-login",
        pattern: &VAULT_GATE,
        resolve: resolve_vault_gate,
    },
    LinkRule {
        name: "sponsor-registration",
        pattern: &SPONSOR_GATE,
        resolve: resolve_sponsor_gate,
    },
];

/// Match an `onclick` handler against the gate rules
pub fn resolve_onclick(onclick: &str, base_url: &str) -> LinkResolution {
    for rule in &LINK_RULES {
        if let Some(resolution) = rule.apply(onclick, base_url) {
            tracing::trace!("onclick matched rule '{}'", rule.name);
            return resolution;
        }
    }
    LinkResolution::Unresolved
}

/// Resolve an entry's link from its attributes.
///
/// An `onclick` handler takes precedence over `href`: when one is present the
/// entry resolves through the gate rules or not at all. A plain `href` is
/// used verbatim and marks the entry as free content.
pub fn resolve_link(onclick: Option<&str>, href: Option<&str>, base_url: &str) -> LinkResolution {
    match (onclick, href) {
        (Some(onclick), _) => resolve_onclick(onclick, base_url),
        (None, Some(href)) => LinkResolution::Resolved {
            url: href.to_string(),
            members_only: false,
            sponsored: false,
        },
        (None, None) => LinkResolution::Unresolved,
    }
}
