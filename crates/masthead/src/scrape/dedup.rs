//! Cross-page candidate deduplication.

use crate::extraction::candidate::ContactCandidate;
use std::collections::{HashMap, HashSet};

/// Key identifying the same person within one scrape.
pub fn dedup_key(candidate: &ContactCandidate) -> String {
    let email = candidate
        .email
        .as_deref()
        .map(str::to_lowercase)
        .unwrap_or_else(|| "<no-email>".to_string());
    format!("{}|{}", candidate.name.trim().to_lowercase(), email)
}

/// Drop later candidates that share a key with an earlier one, then fold
/// each no-email candidate into an emailed candidate of the same name.
///
/// A merged record keeps the fields of the higher-confidence side and fills
/// its gaps from the other. Returns the survivors in input order and the
/// number removed.
pub fn dedup_candidates(candidates: Vec<ContactCandidate>) -> (Vec<ContactCandidate>, usize) {
    let total = candidates.len();
    let mut seen = HashSet::new();
    let exact: Vec<_> = candidates
        .into_iter()
        .filter(|c| seen.insert(dedup_key(c)))
        .collect();

    let mut emailed_by_name: HashMap<String, usize> = HashMap::new();
    for (i, c) in exact.iter().enumerate() {
        if c.email.is_some() {
            emailed_by_name.entry(name_key(c)).or_insert(i);
        }
    }

    let mut slots: Vec<Option<ContactCandidate>> = exact.into_iter().map(Some).collect();
    for i in 0..slots.len() {
        let target = match &slots[i] {
            Some(c) if c.email.is_none() => emailed_by_name.get(&name_key(c)).copied(),
            _ => None,
        };
        let Some(target) = target else { continue };
        if let (Some(orphan), Some(emailed)) = (slots[i].take(), slots[target].take()) {
            slots[target] = Some(merge(emailed, orphan));
        }
    }

    let kept: Vec<_> = slots.into_iter().flatten().collect();
    let removed = total - kept.len();
    (kept, removed)
}

fn name_key(candidate: &ContactCandidate) -> String {
    candidate.name.trim().to_lowercase()
}

fn merge(a: ContactCandidate, b: ContactCandidate) -> ContactCandidate {
    let (mut primary, other) = if b.confidence > a.confidence { (b, a) } else { (a, b) };
    primary.email = primary.email.or(other.email);
    primary.title = primary.title.or(other.title);
    primary.bio = primary.bio.or(other.bio);
    primary.image_url = primary.image_url.or(other.image_url);
    primary.profile_url = primary.profile_url.or(other.profile_url);
    primary.social.twitter = primary.social.twitter.or(other.social.twitter);
    primary.social.linkedin = primary.social.linkedin.or(other.social.linkedin);
    primary.social.personal_website = primary
        .social
        .personal_website
        .or(other.social.personal_website);
    primary.finalize()
}
