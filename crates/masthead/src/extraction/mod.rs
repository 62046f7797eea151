//! Contact extraction from staff pages.
//!
//! Runs the strategies in [`strategies`] in order of specificity and stops at
//! the first one that yields candidates.

pub mod candidate;
pub mod document;
pub mod strategies;
pub mod validate;

use candidate::ContactCandidate;
use document::Document;
use tracing::debug;

/// Extract contact candidates from one HTML page.
///
/// Deterministic: the same input always yields the same candidates in the
/// same order.
pub fn extract_contacts(html: &str, base_url: &str) -> Vec<ContactCandidate> {
    let doc = Document::parse(html);

    let structured = strategies::structured_sections(&doc, base_url);
    if !structured.is_empty() {
        debug!("{base_url}: {} candidates from staff sections", structured.len());
        return structured;
    }

    let cards = strategies::profile_cards(&doc, base_url);
    if !cards.is_empty() {
        debug!("{base_url}: {} candidates from profile cards", cards.len());
        return cards;
    }

    let free = strategies::free_text(&doc, base_url);
    debug!("{base_url}: {} candidates from free text", free.len());
    free
}

/// `<title>` / `og:site_name` based display name for an outlet landing page.
///
/// Prefers `og:site_name`, then the first segment of `<title>` split on the
/// usual separators.
pub fn page_display_name(html: &str) -> Option<String> {
    let doc = Document::parse(html);

    if let Some(site) = doc
        .first("meta[property='og:site_name']")
        .and_then(|m| m.attr("content"))
        .map(document::collapse_whitespace)
        .filter(|s| !s.is_empty())
    {
        return Some(site);
    }

    let title = doc.first("title")?.text();
    let first = [" | ", " - ", " – ", " — ", " :: ", ": "]
        .iter()
        .fold(title.as_str(), |acc, sep| acc.split(sep).next().unwrap_or(acc))
        .trim()
        .to_string();
    (!first.is_empty()).then_some(first)
}
