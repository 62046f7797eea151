//! Social presence checks by fetching public profile pages.

use super::types::{PlatformCheck, SocialVerification};
use crate::acquisition::http_client::HttpClient;
use regex::Regex;
use std::sync::LazyLock;
use tracing::debug;

const PROFILE_TIMEOUT_MS: u64 = 10_000;

/// Page text that marks a profile as missing.
const MISSING_MARKERS: &[&str] = &[
    "doesn't exist",
    "doesn’t exist",
    "account suspended",
    "suspended",
    "page not found",
];

const BADGE_MARKERS: &[&str] = &[
    "verified account",
    "\"is_blue_verified\":true",
    "\"verified\":true",
    "verified badge",
];

static FOLLOWERS_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)([0-9][0-9,]*(?:\.[0-9]+)?)\s*([km])?\+?\s*(followers|connections)").unwrap()
});

/// Parse `12.5K`, `1,204`, `3M` style counts.
pub fn parse_count(number: &str, suffix: Option<&str>) -> Option<u64> {
    let value: f64 = number.replace(',', "").parse().ok()?;
    let multiplier = match suffix.map(|s| s.to_ascii_lowercase()).as_deref() {
        Some("k") => 1_000.0,
        Some("m") => 1_000_000.0,
        _ => 1.0,
    };
    Some((value * multiplier).round() as u64)
}

/// First follower/connection count mentioned in `body`.
pub fn follower_count(body: &str) -> Option<u64> {
    let caps = FOLLOWERS_RE.captures(body)?;
    parse_count(caps.get(1)?.as_str(), caps.get(2).map(|m| m.as_str()))
}

/// Engagement estimate in percent; larger audiences engage less.
pub fn estimated_engagement(followers: u64) -> f64 {
    match followers {
        f if f >= 100_000 => 1.5,
        f if f >= 10_000 => 2.5,
        f if f >= 1_000 => 3.5,
        _ => 5.0,
    }
}

/// Fetch one profile and read the existence, follower and badge signals.
pub async fn check_profile(http: &HttpClient, url: &str) -> PlatformCheck {
    let page = http.get(url, PROFILE_TIMEOUT_MS).await;
    if !page.ok {
        debug!("profile {url} unreachable (status {})", page.status);
        return PlatformCheck {
            url: url.to_string(),
            exists: false,
            followers: None,
            verified_badge: false,
            engagement_rate: None,
        };
    }
    let lower = page.body.to_lowercase();
    let exists = !MISSING_MARKERS.iter().any(|m| lower.contains(m));
    let followers = exists.then(|| follower_count(&page.body)).flatten();
    PlatformCheck {
        url: url.to_string(),
        exists,
        followers,
        verified_badge: exists && BADGE_MARKERS.iter().any(|m| lower.contains(m)),
        engagement_rate: followers.map(estimated_engagement),
    }
}

/// Check whichever of twitter and linkedin the contact has.
pub async fn verify_social(
    http: &HttpClient,
    twitter_base: &str,
    twitter_handle: Option<&str>,
    linkedin_url: Option<&str>,
) -> SocialVerification {
    let twitter_url = twitter_handle
        .map(|h| h.trim().trim_start_matches('@'))
        .filter(|h| !h.is_empty())
        .map(|h| format!("{}/{h}", twitter_base.trim_end_matches('/')));
    let linkedin_url = linkedin_url.map(str::trim).filter(|u| !u.is_empty());

    let (twitter, linkedin) = tokio::join!(
        async {
            match &twitter_url {
                Some(url) => Some(check_profile(http, url).await),
                None => None,
            }
        },
        async {
            match linkedin_url {
                Some(url) => Some(check_profile(http, url).await),
                None => None,
            }
        }
    );

    let present: Vec<&PlatformCheck> = [twitter.as_ref(), linkedin.as_ref()]
        .into_iter()
        .flatten()
        .filter(|p| p.exists)
        .collect();
    let total_followers = present.iter().filter_map(|p| p.followers).sum();
    let rates: Vec<f64> = present.iter().filter_map(|p| p.engagement_rate).collect();
    let average_engagement =
        (!rates.is_empty()).then(|| rates.iter().sum::<f64>() / rates.len() as f64);

    SocialVerification {
        active_platforms: present.len() as u8,
        total_followers,
        average_engagement,
        twitter,
        linkedin,
    }
}
