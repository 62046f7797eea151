//! Outlet classification and authority tiers.

use crate::acquisition::origin::bare_host;
use crate::store::Outlet;
use serde::{Deserialize, Serialize};

/// Outlets treated as top-tier national/international authorities.
const HIGH_AUTHORITY: &[&str] = &[
    "nytimes.com",
    "washingtonpost.com",
    "wsj.com",
    "reuters.com",
    "apnews.com",
    "bloomberg.com",
    "bbc.com",
    "bbc.co.uk",
    "cnn.com",
    "theguardian.com",
    "npr.org",
    "ft.com",
    "economist.com",
    "latimes.com",
    "usatoday.com",
];

/// Well-known outlets one step below the majors.
const MEDIUM_AUTHORITY: &[&str] = &[
    "techcrunch.com",
    "theverge.com",
    "wired.com",
    "axios.com",
    "politico.com",
    "forbes.com",
    "businessinsider.com",
    "arstechnica.com",
    "engadget.com",
    "vox.com",
    "thehill.com",
    "fortune.com",
    "cnbc.com",
    "time.com",
    "newsweek.com",
];

const WIRE_HOSTS: &[&str] = &["reuters", "apnews", "upi.com", "afp.com"];
const BROADCAST_HOSTS: &[&str] = &[
    "cnn", "bbc", "nbc", "abc", "cbs", "foxnews", "msnbc", "pbs", "tv", "news12",
];
const RADIO_HOSTS: &[&str] = &["npr", "radio", "fm", "wnyc", "kqed"];
const DIGITAL_HOSTS: &[&str] = &[
    "techcrunch", "theverge", "vox", "axios", "buzzfeed", "huffpost", "vice", "mashable",
    "engadget", "substack", "medium",
];

/// Authority bucket for an outlet.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AuthorityTier {
    High,
    Medium,
    /// Known to the store, but neither on a list nor ranked highly.
    Low,
    Unranked,
}

/// Authority tier from the outlet host, or the stored domain authority
/// when the host is on neither list.
pub fn authority_tier(outlet: Option<&Outlet>) -> AuthorityTier {
    let Some(outlet) = outlet else {
        return AuthorityTier::Unranked;
    };
    let host = bare_host(&outlet.url);
    if matches_host(&host, HIGH_AUTHORITY) {
        return AuthorityTier::High;
    }
    if matches_host(&host, MEDIUM_AUTHORITY) {
        return AuthorityTier::Medium;
    }
    match outlet.domain_authority {
        Some(da) if da >= 70 => AuthorityTier::High,
        Some(da) if da >= 40 => AuthorityTier::Medium,
        Some(_) => AuthorityTier::Low,
        None => AuthorityTier::Unranked,
    }
}

fn matches_host(host: &str, list: &[&str]) -> bool {
    list.iter()
        .any(|d| host == *d || host.ends_with(&format!(".{d}")))
}

/// Outlet type from host and page title keywords.
///
/// One of `wire`, `broadcast`, `radio`, `digital`, `publication`.
pub fn classify_outlet_type(url: &str, title: Option<&str>) -> &'static str {
    let host = bare_host(url);
    let title = title.unwrap_or("").to_lowercase();
    let host_has = |words: &[&str]| words.iter().any(|w| host.contains(w));

    if host_has(WIRE_HOSTS) || title.contains("wire service") || title.contains("press association") {
        "wire"
    } else if host_has(RADIO_HOSTS) || title.contains("radio") || title.contains("podcast") {
        "radio"
    } else if host_has(BROADCAST_HOSTS) || title.contains("television") || title.contains(" tv") {
        "broadcast"
    } else if host_has(DIGITAL_HOSTS) || title.contains("blog") {
        "digital"
    } else {
        "publication"
    }
}
