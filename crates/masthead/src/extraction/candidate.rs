//! Extracted contact candidates, their confidence score and beat inference.

use serde::{Deserialize, Serialize};

/// Which extraction strategy produced a candidate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ExtractionStrategy {
    /// Staff/bio/profile sections.
    StructuredSection,
    /// Card widgets containing person indicators.
    ProfileCard,
    /// Email-anchored scan of the page text.
    FreeText,
}

impl ExtractionStrategy {
    pub fn as_str(&self) -> &'static str {
        match self {
            ExtractionStrategy::StructuredSection => "structured_section",
            ExtractionStrategy::ProfileCard => "profile_card",
            ExtractionStrategy::FreeText => "free_text",
        }
    }
}

/// Social profile links found next to a contact.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SocialLinks {
    /// Handle without the leading `@`.
    pub twitter: Option<String>,
    pub linkedin: Option<String>,
    pub personal_website: Option<String>,
}

impl SocialLinks {
    pub fn is_empty(&self) -> bool {
        self.twitter.is_none() && self.linkedin.is_none() && self.personal_website.is_none()
    }
}

/// An unpersisted guess at a journalist scraped from one page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContactCandidate {
    pub name: String,
    pub title: Option<String>,
    pub email: Option<String>,
    pub bio: Option<String>,
    pub image_url: Option<String>,
    pub profile_url: Option<String>,
    pub social: SocialLinks,
    pub beat: Option<String>,
    /// Additive 0-100 completeness score.
    pub confidence: u8,
    pub strategy: ExtractionStrategy,
    pub source_url: String,
}

impl ContactCandidate {
    /// First token of the name.
    pub fn first_name(&self) -> &str {
        self.name.split_whitespace().next().unwrap_or("")
    }

    /// Everything after the first token.
    pub fn last_name(&self) -> String {
        self.name
            .split_whitespace()
            .skip(1)
            .collect::<Vec<_>>()
            .join(" ")
    }

    /// Recompute `confidence` and `beat` from the current fields.
    pub fn finalize(mut self) -> Self {
        self.confidence = score(&CandidateFields::of(&self));
        self.beat = infer_beat(self.title.as_deref(), self.bio.as_deref()).map(str::to_string);
        self
    }
}

/// Field presence fed to [`score`].
#[derive(Debug, Clone, Copy, Default)]
pub struct CandidateFields {
    pub has_name: bool,
    pub has_email: bool,
    pub has_title: bool,
    pub bio_len: usize,
    pub has_image: bool,
    pub has_social: bool,
}

impl CandidateFields {
    pub fn of(c: &ContactCandidate) -> Self {
        Self {
            has_name: !c.name.trim().is_empty(),
            has_email: c.email.is_some(),
            has_title: c.title.is_some(),
            bio_len: c.bio.as_deref().map(|b| b.chars().count()).unwrap_or(0),
            has_image: c.image_url.is_some(),
            has_social: !c.social.is_empty(),
        }
    }
}

pub const NAME_WEIGHT: u8 = 20;
pub const EMAIL_WEIGHT: u8 = 30;
pub const TITLE_WEIGHT: u8 = 20;
pub const BIO_WEIGHT: u8 = 15;
pub const IMAGE_WEIGHT: u8 = 5;
pub const SOCIAL_WEIGHT: u8 = 10;
pub const MIN_BIO_CHARS: usize = 50;

/// Additive confidence over present fields, 0-100.
pub fn score(fields: &CandidateFields) -> u8 {
    let mut total = 0u8;
    if fields.has_name {
        total += NAME_WEIGHT;
    }
    if fields.has_email {
        total += EMAIL_WEIGHT;
    }
    if fields.has_title {
        total += TITLE_WEIGHT;
    }
    if fields.bio_len >= MIN_BIO_CHARS {
        total += BIO_WEIGHT;
    }
    if fields.has_image {
        total += IMAGE_WEIGHT;
    }
    if fields.has_social {
        total += SOCIAL_WEIGHT;
    }
    total.min(100)
}

/// Ordered keyword map for beat inference. First match wins.
const BEAT_KEYWORDS: &[(&str, &[&str])] = &[
    (
        "technology",
        &["technology", "tech", "software", "digital", "cyber", "startup", "gadget"],
    ),
    (
        "business",
        &["business", "finance", "economy", "economic", "market", "money", "wall street"],
    ),
    (
        "sports",
        &["sport", "football", "basketball", "baseball", "soccer", "hockey", "athlet"],
    ),
    (
        "politics",
        &["politic", "government", "election", "congress", "white house", "policy"],
    ),
    ("health", &["health", "medical", "medicine", "wellness", "hospital"]),
    (
        "entertainment",
        &["entertainment", "culture", "arts", "film", "movie", "music", "celebrity"],
    ),
    ("science", &["science", "research", "climate", "environment", "space"]),
];

/// Infer a beat from title and bio text.
pub fn infer_beat(title: Option<&str>, bio: Option<&str>) -> Option<&'static str> {
    let text = format!("{} {}", title.unwrap_or(""), bio.unwrap_or("")).to_lowercase();
    if text.trim().is_empty() {
        return None;
    }
    BEAT_KEYWORDS
        .iter()
        .find(|(_, keywords)| keywords.iter().any(|k| text.contains(k)))
        .map(|(beat, _)| *beat)
}
