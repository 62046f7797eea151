//! Name/title validation and the text patterns shared by the extractor.

use regex::Regex;
use std::sync::LazyLock;

pub static EMAIL_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[a-zA-Z0-9._%+-]+@[a-zA-Z0-9.-]+\.[a-zA-Z]{2,}").unwrap());

static TWITTER_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)^https?://(?:www\.|mobile\.)?(?:twitter\.com|x\.com)/@?([A-Za-z0-9_]{1,15})/?(?:[?#].*)?$")
        .unwrap()
});

static LINKEDIN_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)^https?://(?:[a-z]{2,3}\.)?linkedin\.com/in/[A-Za-z0-9_%-]+/?").unwrap()
});

/// Path segments on twitter/x that are not user handles.
const TWITTER_RESERVED: &[&str] = &["share", "intent", "home", "search", "hashtag", "i", "login"];

/// Substrings that disqualify a string from being a person's name.
const NAME_BLACKLIST: &[&str] = &[
    "email", "@", "http", "mailto", "www.", "phone", "contact", "follow", "click", "read more",
];

/// Words indicating a newsroom job title.
pub const TITLE_INDICATORS: &[&str] = &[
    "reporter",
    "editor",
    "correspondent",
    "anchor",
    "producer",
    "chief",
    "senior",
    "writer",
    "journalist",
    "columnist",
    "contributor",
    "host",
    "director",
    "manager",
    "critic",
    "photographer",
];

/// Heuristic check that `text` looks like a person's name.
///
/// 2-100 chars, 2-5 whitespace tokens, more than 70% alphabetic characters,
/// none of the blacklisted substrings.
pub fn is_valid_name(text: &str) -> bool {
    let text = text.trim();
    let len = text.chars().count();
    if !(2..=100).contains(&len) {
        return false;
    }
    let tokens = text.split_whitespace().count();
    if !(2..=5).contains(&tokens) {
        return false;
    }
    let lower = text.to_lowercase();
    if NAME_BLACKLIST.iter().any(|b| lower.contains(b)) {
        return false;
    }
    let alpha = text.chars().filter(|c| c.is_alphabetic()).count();
    alpha as f64 / len as f64 > 0.7
}

/// True when any word of `text` is a title indicator ("Politics Editor").
pub fn has_title_word(text: &str) -> bool {
    text.split(|c: char| c.is_whitespace() || c == '-' || c == ',' || c == '/')
        .map(|w| w.trim_matches(|c: char| !c.is_alphanumeric()).to_lowercase())
        .any(|w| {
            TITLE_INDICATORS
                .iter()
                .any(|t| w == *t || w.strip_suffix('s') == Some(*t))
        })
}

/// A name as the extractor accepts it: a valid name that is not a job title.
pub fn looks_like_name(text: &str) -> bool {
    is_valid_name(text) && !has_title_word(text)
}

/// Heuristic check that `text` looks like a job title.
pub fn is_valid_title(text: &str) -> bool {
    let text = text.trim();
    let len = text.chars().count();
    if !(3..=100).contains(&len) || text.contains('@') {
        return false;
    }
    let lower = text.to_lowercase();
    TITLE_INDICATORS.iter().any(|t| lower.contains(t))
}

/// First email address in `text`, lower-cased.
pub fn find_email(text: &str) -> Option<String> {
    EMAIL_RE.find(text).map(|m| m.as_str().to_lowercase())
}

/// Twitter/x handle from a profile URL, without the `@`.
pub fn twitter_handle(url: &str) -> Option<String> {
    let caps = TWITTER_RE.captures(url.trim())?;
    let handle = caps.get(1)?.as_str();
    if TWITTER_RESERVED.contains(&handle.to_lowercase().as_str()) {
        return None;
    }
    Some(handle.to_string())
}

pub fn is_linkedin_profile(url: &str) -> bool {
    LINKEDIN_RE.is_match(url.trim())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_names() {
        assert!(is_valid_name("Jane Doe"));
        assert!(is_valid_name("María José García"));
        assert!(is_valid_name("Mary-Kate O'Neil"));
    }

    #[test]
    fn test_names_need_not_be_capitalized() {
        assert!(is_valid_name("bell hooks"));
        assert!(is_valid_name("jane DOE"));
        assert!(!is_valid_name("jane"));
        assert!(!is_valid_name("a b c d e f"));
    }

    #[test]
    fn test_invalid_names() {
        assert!(!is_valid_name("Reporter"));
        assert!(!is_valid_name("jane.doe@example.com"));
        assert!(!is_valid_name("Jane mailto Doe"));
        assert!(!is_valid_name("See http links"));
        assert!(!is_valid_name("Email Jane Doe"));
        assert!(!is_valid_name("R2 D2 42"));
        assert!(!is_valid_name("This sentence is clearly far too long to be a name"));
    }

    #[test]
    fn test_looks_like_name_rejects_titles() {
        assert!(is_valid_name("Health Correspondent"));
        assert!(!looks_like_name("Health Correspondent"));
        assert!(!looks_like_name("Senior Editors"));
        assert!(looks_like_name("Chester Hostetler"));
    }

    #[test]
    fn test_titles() {
        assert!(is_valid_title("Senior Technology Reporter"));
        assert!(is_valid_title("Editor-in-Chief"));
        assert!(!is_valid_title("Jane Doe"));
        assert!(!is_valid_title("editor@example.com"));
    }

    #[test]
    fn test_find_email() {
        assert_eq!(
            find_email("Reach her at Jane.Doe@Outlet.com today").as_deref(),
            Some("jane.doe@outlet.com")
        );
        assert_eq!(find_email("no address here"), None);
    }

    #[test]
    fn test_social_shapes() {
        assert_eq!(
            twitter_handle("https://twitter.com/janedoe").as_deref(),
            Some("janedoe")
        );
        assert_eq!(
            twitter_handle("https://x.com/@jane_doe?ref=bio").as_deref(),
            Some("jane_doe")
        );
        assert_eq!(twitter_handle("https://twitter.com/intent"), None);
        assert_eq!(twitter_handle("https://twitter.com/janedoe/status/1"), None);
        assert!(is_linkedin_profile("https://www.linkedin.com/in/jane-doe/"));
        assert!(!is_linkedin_profile("https://www.linkedin.com/company/outlet"));
    }
}
