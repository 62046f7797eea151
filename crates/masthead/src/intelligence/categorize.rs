//! Beat categorization: external model first, keyword rules as fallback.

use super::types::{Categorization, CategorizationSource};
use crate::store::{Contact, Outlet};
use anyhow::{bail, Context, Result};
use async_trait::async_trait;
use regex::Regex;
use serde::Deserialize;
use std::sync::LazyLock;
use tracing::debug;

/// An external categorization capability answering with untyped JSON.
#[async_trait]
pub trait Categorizer: Send + Sync {
    async fn categorize(&self, context: &str) -> Result<serde_json::Value>;
}

const BEAT_DICTIONARIES: &[(&str, &[&str])] = &[
    (
        "technology",
        &[
            "technology",
            "tech",
            "software",
            "ai",
            "artificial intelligence",
            "startup",
            "blockchain",
            "crypto",
            "ipo",
            "cybersecurity",
            "venture capital",
            "silicon valley",
            "app",
        ],
    ),
    (
        "business",
        &[
            "business",
            "finance",
            "economy",
            "market",
            "earnings",
            "ipo",
            "investment",
            "stock",
            "merger",
            "venture capital",
        ],
    ),
    (
        "healthcare",
        &["health", "medical", "medicine", "hospital", "pharma", "biotech", "wellness", "fda"],
    ),
    (
        "politics",
        &["politics", "political", "government", "election", "congress", "senate", "policy", "campaign"],
    ),
    (
        "sports",
        &["sports", "football", "basketball", "baseball", "soccer", "hockey", "olympics", "athlete"],
    ),
    (
        "entertainment",
        &["entertainment", "film", "movie", "music", "celebrity", "television", "hollywood", "culture"],
    ),
    (
        "science",
        &["science", "research", "climate", "space", "physics", "biology", "environment"],
    ),
    (
        "education",
        &["education", "school", "university", "college", "student", "teacher", "campus"],
    ),
];

/// One whole-word matcher per keyword; a trailing plural `s` is allowed.
static BEAT_MATCHERS: LazyLock<Vec<(&'static str, Vec<(&'static str, Regex)>)>> =
    LazyLock::new(|| {
        BEAT_DICTIONARIES
            .iter()
            .map(|(beat, words)| {
                let matchers = words
                    .iter()
                    .map(|w| {
                        let re = Regex::new(&format!(r"\b{}s?\b", regex::escape(w))).unwrap();
                        (*w, re)
                    })
                    .collect();
                (*beat, matchers)
            })
            .collect()
    });

/// Labelled context text for one contact.
pub fn build_context(contact: &Contact, outlet: Option<&Outlet>) -> String {
    let mut lines = vec![format!("Name: {}", contact.full_name())];
    let mut push = |label: &str, value: Option<&str>| {
        if let Some(v) = value.map(str::trim).filter(|v| !v.is_empty()) {
            lines.push(format!("{label}: {v}"));
        }
    };
    push("Title", contact.title.as_deref());
    push("Bio", contact.bio.as_deref());
    push("Beat", contact.beat.as_deref());
    push("Outlet", outlet.map(|o| o.name.as_str()));
    push("Location", contact.location.as_deref());
    lines.join("\n")
}

/// Whole-word keyword-count categorization over the lower-cased context.
///
/// Most hits wins, ties resolved by dictionary order; up to two runners-up
/// with hits become secondary beats.
pub fn categorize_by_rules(context: &str) -> Categorization {
    let text = context.to_lowercase();
    let mut hits: Vec<(usize, &str, usize, Vec<&str>)> = BEAT_MATCHERS
        .iter()
        .enumerate()
        .map(|(order, (beat, words))| {
            let matched: Vec<&str> = words
                .iter()
                .filter(|(_, re)| re.is_match(&text))
                .map(|(w, _)| *w)
                .collect();
            (order, *beat, matched.len(), matched)
        })
        .filter(|(_, _, count, _)| *count > 0)
        .collect();
    hits.sort_by(|a, b| b.2.cmp(&a.2).then(a.0.cmp(&b.0)));

    let Some((_, primary, count, matched)) = hits.first() else {
        return Categorization {
            primary_beat: "general".to_string(),
            secondary_beats: Vec::new(),
            confidence_score: 0,
            expertise_areas: Vec::new(),
            content_preferences: Vec::new(),
            source: CategorizationSource::Rules,
        };
    };

    Categorization {
        primary_beat: primary.to_string(),
        secondary_beats: hits.iter().skip(1).take(2).map(|h| h.1.to_string()).collect(),
        confidence_score: ((*count as f64 / 3.0) * 100.0).min(100.0).round() as u8,
        expertise_areas: matched.iter().map(|w| w.to_string()).collect(),
        content_preferences: Vec::new(),
        source: CategorizationSource::Rules,
    }
}

/// The shape a model reply must have to be trusted.
#[derive(Debug, Deserialize)]
struct ModelCategorization {
    primary_beat: String,
    #[serde(default)]
    secondary_beats: Vec<String>,
    confidence_score: f64,
    #[serde(default)]
    expertise_areas: Vec<String>,
    #[serde(default)]
    content_preferences: Vec<String>,
}

/// Validate an untyped model reply.
pub fn parse_model_reply(value: serde_json::Value) -> Result<Categorization> {
    let reply: ModelCategorization =
        serde_json::from_value(value).context("categorization reply has the wrong shape")?;
    if !(0.0..=100.0).contains(&reply.confidence_score) {
        bail!("confidence {} out of range", reply.confidence_score);
    }
    let primary = reply.primary_beat.trim().to_lowercase();
    if primary.is_empty() {
        bail!("empty primary beat");
    }
    Ok(Categorization {
        primary_beat: primary,
        secondary_beats: reply
            .secondary_beats
            .into_iter()
            .map(|b| b.trim().to_lowercase())
            .filter(|b| !b.is_empty())
            .take(2)
            .collect(),
        confidence_score: reply.confidence_score.round() as u8,
        expertise_areas: reply.expertise_areas,
        content_preferences: reply.content_preferences,
        source: CategorizationSource::Ai,
    })
}

/// Categorize a contact, falling back to rules on any model failure.
pub async fn categorize(categorizer: Option<&dyn Categorizer>, context: &str) -> Categorization {
    if let Some(categorizer) = categorizer {
        match categorizer.categorize(context).await.and_then(parse_model_reply) {
            Ok(c) => return c,
            Err(e) => debug!("model categorization unusable, using rules: {e:#}"),
        }
    }
    categorize_by_rules(context)
}
