//! Staff-page discovery for an outlet origin.
//!
//! Three tiers, each tried only when the previous found nothing:
//!
//! 1. Try well-known paths (`/staff`, `/team`, `/masthead`, ...) and accept
//!    pages whose body mentions newsroom roles.
//! 2. Scan the landing page for links whose text or href looks staff-related.
//! 3. Fall back to the origin itself.
//!
//! The result is never empty.

use super::http_client::{FetchedPage, HttpClient};
use super::origin::{resolve_href, same_host};
use crate::extraction::document::Document;
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Path suffixes commonly used for staff listings.
pub const STAFF_PATHS: &[&str] = &[
    "/staff",
    "/team",
    "/masthead",
    "/our-team",
    "/about/staff",
    "/about/team",
    "/about-us/staff",
    "/about/masthead",
    "/newsroom",
    "/people",
    "/authors",
    "/writers",
    "/reporters",
    "/editors",
    "/contributors",
    "/editorial-team",
    "/our-staff",
    "/contact/staff",
    "/about/contact",
    "/about-us",
];

/// Words whose presence in a fetched body confirms a staff page.
const BODY_KEYWORDS: &[&str] = &["staff", "team", "reporter", "editor", "journalist", "writer"];

/// Words marking a landing-page anchor as a staff link.
const LINK_KEYWORDS: &[&str] = &[
    "staff",
    "team",
    "masthead",
    "reporters",
    "editors",
    "journalists",
    "writers",
    "contributors",
    "about us",
    "newsroom",
];

/// Concurrent path fetches in flight during tier 1.
const PATH_CONCURRENCY: usize = 5;

/// Per-path timeout during tier 1.
const PATH_TIMEOUT_MS: u64 = 8_000;

/// Which tier produced the staff-page list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LocatorTier {
    KnownPaths,
    LandingPageLinks,
    OriginFallback,
}

/// Ordered, deduplicated staff-page candidates for one origin.
#[derive(Debug, Clone)]
pub struct StaffPages {
    pub urls: Vec<String>,
    pub tier: LocatorTier,
    /// Pages already fetched while locating, in `urls` order. Filled only
    /// for the known-paths tier, where each path fetch returns the full body.
    pub fetched: Vec<FetchedPage>,
}

/// Locate staff pages for a normalized origin (`scheme://host[:port]`).
pub async fn locate_staff_pages(client: &HttpClient, origin: &str) -> StaffPages {
    let origin = origin.trim_end_matches('/');

    let candidates: Vec<String> = STAFF_PATHS.iter().map(|p| format!("{origin}{p}")).collect();
    let pages = client
        .get_many(&candidates, PATH_CONCURRENCY, PATH_TIMEOUT_MS)
        .await;
    let mut urls = Vec::new();
    let mut fetched = Vec::new();
    for page in pages {
        if page.ok && body_mentions_staff(&page.body) && !urls.contains(&page.url) {
            urls.push(page.url.clone());
            fetched.push(page);
        }
    }
    if !urls.is_empty() {
        debug!("{origin}: {} staff pages from known paths", urls.len());
        return StaffPages {
            urls,
            tier: LocatorTier::KnownPaths,
            fetched,
        };
    }

    let landing = client.fetch(origin).await;
    if landing.ok {
        let links = staff_links(&landing.body, origin);
        if !links.is_empty() {
            debug!("{origin}: {} staff links on landing page", links.len());
            return StaffPages {
                urls: links,
                tier: LocatorTier::LandingPageLinks,
                fetched: Vec::new(),
            };
        }
    }

    debug!("{origin}: no staff pages found, scraping the origin");
    StaffPages {
        urls: vec![origin.to_string()],
        tier: LocatorTier::OriginFallback,
        fetched: Vec::new(),
    }
}

/// True when the lower-cased body contains any staff keyword.
fn body_mentions_staff(body: &str) -> bool {
    let lower = body.to_lowercase();
    BODY_KEYWORDS.iter().any(|k| lower.contains(k))
}

/// Same-host anchors whose text or href contains a staff keyword.
fn staff_links(html: &str, origin: &str) -> Vec<String> {
    let doc = Document::parse(html);
    let mut links = Vec::new();
    for a in doc.select("a[href]") {
        let Some(href) = a.attr("href") else {
            continue;
        };
        let text = a.text().to_lowercase();
        let href_lower = href.to_lowercase();
        let qualifies = LINK_KEYWORDS
            .iter()
            .any(|k| text.contains(k) || href_lower.contains(&k.replace(' ', "-")));
        if !qualifies {
            continue;
        }
        if let Some(resolved) = resolve_href(origin, href) {
            if same_host(&resolved, origin) {
                push_unique(&mut links, resolved);
            }
        }
    }
    links
}

fn push_unique(urls: &mut Vec<String>, url: String) {
    if !urls.contains(&url) {
        urls.push(url);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_body_mentions_staff() {
        assert!(body_mentions_staff("<h1>Meet our Editors</h1>"));
        assert!(!body_mentions_staff("<h1>Page not found</h1>"));
    }

    #[test]
    fn test_staff_links() {
        let html = r#"<nav>
          <a href="/about/our-team">Who we are</a>
          <a href="/masthead">Masthead</a>
          <a href="/masthead#top">Masthead again</a>
          <a href="https://other.com/staff">Partner staff</a>
          <a href="/sports">Sports</a>
          <a href="/about-us">About Us</a>
        </nav>"#;
        let links = staff_links(html, "https://outlet.com");
        assert_eq!(
            links,
            vec![
                "https://outlet.com/about/our-team".to_string(),
                "https://outlet.com/masthead".to_string(),
                "https://outlet.com/about-us".to_string(),
            ]
        );
    }

    #[test]
    fn test_staff_paths_are_unique() {
        let mut sorted = STAFF_PATHS.to_vec();
        sorted.sort();
        sorted.dedup();
        assert_eq!(sorted.len(), STAFF_PATHS.len());
        assert_eq!(STAFF_PATHS.len(), 20);
    }
}
