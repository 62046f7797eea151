//! Verification signal blocks and the fused result.

use crate::store::VerificationStatus;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Deliverability {
    Deliverable,
    LikelyDeliverable,
    Unknown,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EmailVerification {
    pub email: Option<String>,
    pub format_valid: bool,
    pub domain: Option<String>,
    pub is_disposable: bool,
    pub is_role_based: bool,
    pub mx_found: bool,
    pub deliverability: Deliverability,
    pub confidence: u8,
}

impl EmailVerification {
    /// The zero block for a missing or unusable address.
    pub fn empty(email: Option<String>) -> Self {
        Self {
            email,
            format_valid: false,
            domain: None,
            is_disposable: false,
            is_role_based: false,
            mx_found: false,
            deliverability: Deliverability::Unknown,
            confidence: 0,
        }
    }
}

/// One social platform's profile check.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlatformCheck {
    pub url: String,
    pub exists: bool,
    pub followers: Option<u64>,
    pub verified_badge: bool,
    /// Estimated engagement rate in percent.
    pub engagement_rate: Option<f64>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SocialVerification {
    pub twitter: Option<PlatformCheck>,
    pub linkedin: Option<PlatformCheck>,
    pub active_platforms: u8,
    pub total_followers: u64,
    pub average_engagement: Option<f64>,
}

impl SocialVerification {
    /// Binary presence score: 50 per active platform, capped at 100.
    pub fn presence_score(&self) -> u8 {
        (self.active_platforms as u32 * 50).min(100) as u8
    }
}

/// A byline found by the publication search.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Publication {
    pub title: String,
    pub url: Option<String>,
    pub published_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ContentVerification {
    pub query: String,
    pub publications_found: usize,
    pub recent_publications: usize,
    pub weighted_count: f64,
    pub latest_publication: Option<DateTime<Utc>>,
    pub frequency_score: u8,
    pub sample: Vec<Publication>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Reach {
    National,
    Regional,
    Local,
    Limited,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InfluenceVerification {
    pub authority_points: u8,
    pub seniority_points: u8,
    pub social_points: u8,
    pub interaction_points: u8,
    pub social_influence_score: u8,
    pub reach: Reach,
}

impl Default for InfluenceVerification {
    fn default() -> Self {
        Self {
            authority_points: 0,
            seniority_points: 0,
            social_points: 0,
            interaction_points: 0,
            social_influence_score: 0,
            reach: Reach::Limited,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OverallVerification {
    pub confidence_score: u8,
    pub status: VerificationStatus,
    pub verified_at: DateTime<Utc>,
    pub notes: Vec<String>,
}

/// Everything verification learned about one contact.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VerificationResult {
    pub contact_id: String,
    pub email_verification: EmailVerification,
    pub social_verification: SocialVerification,
    pub content_verification: ContentVerification,
    pub influence_verification: InfluenceVerification,
    pub overall_verification: OverallVerification,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct VerificationSummary {
    pub total_requested: usize,
    pub verified_successfully: usize,
    pub failed: usize,
    pub batches: usize,
    pub status_counts: BTreeMap<String, usize>,
    pub average_confidence: f64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_presence_score_caps() {
        let mut s = SocialVerification::default();
        assert_eq!(s.presence_score(), 0);
        s.active_platforms = 1;
        assert_eq!(s.presence_score(), 50);
        s.active_platforms = 3;
        assert_eq!(s.presence_score(), 100);
    }
}
