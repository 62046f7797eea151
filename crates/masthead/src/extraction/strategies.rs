//! The three extraction strategies, most specific first.
//!
//! 1. **Structured sections** -- staff/bio/profile containers.
//! 2. **Profile cards** -- generic card widgets that mention a person.
//! 3. **Free text** -- email-anchored scan of the page text.
//!
//! Every strategy returns an empty vector rather than failing.

use super::candidate::{ContactCandidate, ExtractionStrategy, SocialLinks};
use super::document::{Document, Node};
use super::validate::{
    find_email, is_linkedin_profile, is_valid_title, looks_like_name, twitter_handle, EMAIL_RE,
};
use crate::acquisition::origin::{resolve_href, same_host};
use std::collections::HashSet;

/// Containers with staff/bio/profile semantics.
const SECTION_SELECTORS: &[&str] = &[
    ".staff-member",
    ".team-member",
    ".masthead-member",
    ".author-bio",
    ".author-card",
    ".staff-bio",
    ".bio",
    ".profile",
    "[class*='staff-']",
    "[class*='team-member']",
    "[itemtype*='schema.org/Person']",
];

/// Card-like widgets; only kept when they mention a person.
const CARD_SELECTORS: &[&str] = &[
    ".card",
    ".profile-card",
    ".person",
    ".member",
    ".contributor",
    "[class*='card']",
    "[class*='person']",
    "li",
    "article",
];

/// Tokens that make a card plausibly about a person.
const PERSON_INDICATORS: &[&str] = &[
    "@",
    "email",
    "reporter",
    "editor",
    "writer",
    "journalist",
    "correspondent",
    "contact",
];

const NAME_SELECTORS: &[&str] = &[
    "[itemprop='name']",
    ".name",
    "[class*='name']",
    "h1",
    "h2",
    "h3",
    "h4",
    "h5",
    "strong",
    "b",
    "a",
];

const TITLE_SELECTORS: &[&str] = &[
    "[itemprop='jobTitle']",
    ".title",
    ".position",
    ".role",
    ".job-title",
    "[class*='title']",
    "[class*='position']",
    "[class*='role']",
    "p",
    "span",
    "em",
    "small",
    "div",
];

const BIO_SELECTORS: &[&str] = &[
    "[itemprop='description']",
    ".bio",
    ".description",
    "[class*='bio']",
    "[class*='description']",
    "p",
];

/// Link text suggesting a full profile page.
const PROFILE_LINK_WORDS: &[&str] = &["profile", "bio", "more"];

/// Lines searched above an email for a name, and below a name for a title.
const NAME_LOOKBACK_LINES: usize = 5;
const TITLE_LOOKAHEAD_LINES: usize = 3;

/// Strategy 1: staff/bio/profile containers.
pub fn structured_sections(doc: &Document, base_url: &str) -> Vec<ContactCandidate> {
    let mut out = Vec::new();
    let mut seen = HashSet::new();
    for selector in SECTION_SELECTORS {
        for node in doc.select(selector) {
            if !seen.insert(node.id()) {
                continue;
            }
            if let Some(c) = candidate_from_node(node, base_url, ExtractionStrategy::StructuredSection)
            {
                out.push(c);
            }
        }
    }
    out
}

/// Strategy 2: card widgets that carry at least one person indicator.
pub fn profile_cards(doc: &Document, base_url: &str) -> Vec<ContactCandidate> {
    let mut out = Vec::new();
    let mut seen = HashSet::new();
    for selector in CARD_SELECTORS {
        for node in doc.select(selector) {
            if !seen.insert(node.id()) || !mentions_person(node) {
                continue;
            }
            if let Some(c) = candidate_from_node(node, base_url, ExtractionStrategy::ProfileCard) {
                out.push(c);
            }
        }
    }
    out
}

/// Strategy 3: find emails in the page text and look around them.
pub fn free_text(doc: &Document, base_url: &str) -> Vec<ContactCandidate> {
    let lines = doc.text_lines();
    let mut out = Vec::new();

    for (idx, line) in lines.iter().enumerate() {
        let Some(found) = EMAIL_RE.find(line) else {
            continue;
        };
        let email = found.as_str().to_lowercase();

        // Same-line prefix ("Jane Doe - jane@x.com") first, then the lines above.
        let prefix = trim_separators(&line[..found.start()]);

        let (name, name_idx) = if looks_like_name(&prefix) {
            (prefix, idx)
        } else {
            let start = idx.saturating_sub(NAME_LOOKBACK_LINES);
            match (start..idx)
                .rev()
                .map(|i| (trim_separators(&lines[i]), i))
                .find(|(text, _)| looks_like_name(text))
            {
                Some(found) => found,
                None => continue,
            }
        };

        let title = (name_idx + 1..=(name_idx + TITLE_LOOKAHEAD_LINES).min(lines.len().saturating_sub(1)))
            .filter(|&i| i != idx)
            .map(|i| lines[i].trim())
            .find(|text| is_valid_title(text) && !text.eq_ignore_ascii_case(&name))
            .map(str::to_string);

        out.push(
            ContactCandidate {
                name,
                title,
                email: Some(email),
                bio: None,
                image_url: None,
                profile_url: None,
                social: SocialLinks::default(),
                beat: None,
                confidence: 0,
                strategy: ExtractionStrategy::FreeText,
                source_url: base_url.to_string(),
            }
            .finalize(),
        );
    }
    out
}

/// Extract all fields scoped to one container element.
fn candidate_from_node(
    node: Node<'_>,
    base_url: &str,
    strategy: ExtractionStrategy,
) -> Option<ContactCandidate> {
    let (name, people) = extract_name(node)?;
    // A container naming several people, or carrying several addresses, is a
    // listing wrapper; its members are matched on their own.
    if people > 1 || distinct_mailto_count(node) > 1 {
        return None;
    }
    let title = extract_title(node, &name);
    let email = extract_email(node);
    let bio = extract_bio(node);
    let image_url = extract_image(node, base_url);
    let profile_url = extract_profile_url(node, base_url);
    let social = extract_social(node, base_url);

    Some(
        ContactCandidate {
            name,
            title,
            email,
            bio,
            image_url,
            profile_url,
            social,
            beat: None,
            confidence: 0,
            strategy,
            source_url: base_url.to_string(),
        }
        .finalize(),
    )
}

fn mentions_person(node: Node<'_>) -> bool {
    let text = node.text().to_lowercase();
    let html = node.inner_html().to_lowercase();
    PERSON_INDICATORS
        .iter()
        .any(|t| text.contains(t) || (*t == "@" && html.contains("mailto:")))
}

/// First name found, plus how many distinct names the same selector matched.
fn extract_name(node: Node<'_>) -> Option<(String, usize)> {
    NAME_SELECTORS.iter().find_map(|sel| {
        let names: Vec<String> = node
            .select(sel)
            .into_iter()
            .map(|n| n.text())
            .filter(|t| looks_like_name(t))
            .collect();
        let first = names.first()?.clone();
        let distinct: HashSet<String> = names.iter().map(|n| n.to_lowercase()).collect();
        Some((first, distinct.len()))
    })
}

fn extract_title(node: Node<'_>, name: &str) -> Option<String> {
    TITLE_SELECTORS.iter().find_map(|sel| {
        node.select(sel)
            .into_iter()
            .map(|n| n.text())
            .find(|t| t.as_str() != name && is_valid_title(t) && !t.contains(name))
    })
}

fn extract_email(node: Node<'_>) -> Option<String> {
    let from_mailto = node.select("a[href^='mailto:']").into_iter().find_map(|a| {
        let href = a.attr("href")?;
        let addr = href.trim_start_matches("mailto:");
        let addr = addr.split('?').next().unwrap_or(addr);
        find_email(addr)
    });
    from_mailto.or_else(|| find_email(&node.text()))
}

fn distinct_mailto_count(node: Node<'_>) -> usize {
    node.select("a[href^='mailto:']")
        .into_iter()
        .filter_map(|a| find_email(a.attr("href")?))
        .collect::<HashSet<_>>()
        .len()
}

fn extract_bio(node: Node<'_>) -> Option<String> {
    BIO_SELECTORS.iter().find_map(|sel| {
        node.select(sel)
            .into_iter()
            .map(|n| n.text())
            .find(|t| t.chars().count() >= super::candidate::MIN_BIO_CHARS)
    })
}

fn extract_image(node: Node<'_>, base_url: &str) -> Option<String> {
    node.select("img").into_iter().find_map(|img| {
        let src = img.attr("src").or_else(|| img.attr("data-src"))?;
        if src.starts_with("data:") {
            return None;
        }
        resolve_href(base_url, src)
    })
}

fn extract_profile_url(node: Node<'_>, base_url: &str) -> Option<String> {
    node.select("a[href]").into_iter().find_map(|a| {
        let text = a.text().to_lowercase();
        if !PROFILE_LINK_WORDS.iter().any(|w| text.contains(w)) {
            return None;
        }
        resolve_href(base_url, a.attr("href")?)
    })
}

fn extract_social(node: Node<'_>, base_url: &str) -> SocialLinks {
    let mut social = SocialLinks::default();
    for a in node.select("a[href]") {
        let Some(href) = a.attr("href") else {
            continue;
        };
        if href.trim().to_lowercase().starts_with("mailto:") {
            continue;
        }
        if social.twitter.is_none() {
            if let Some(handle) = twitter_handle(href) {
                social.twitter = Some(handle);
                continue;
            }
        }
        if social.linkedin.is_none() && is_linkedin_profile(href) {
            social.linkedin = Some(href.trim().to_string());
            continue;
        }
        let lower = href.to_lowercase();
        if social.personal_website.is_none()
            && (lower.starts_with("http://") || lower.starts_with("https://"))
            && !lower.contains("twitter.com")
            && !lower.contains("x.com/")
            && !lower.contains("linkedin.com")
            && !same_host(href, base_url)
        {
            social.personal_website = Some(href.trim().to_string());
        }
    }
    social
}

fn trim_separators(s: &str) -> String {
    s.trim()
        .trim_matches(|c: char| matches!(c, '-' | '|' | ':' | ',' | '–' | '—' | '(' | ')' | '<' | '>'))
        .trim()
        .to_string()
}
