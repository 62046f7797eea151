//! Weighted fusion of the four signals into one score and status.

use super::types::{
    ContentVerification, EmailVerification, InfluenceVerification, OverallVerification,
    SocialVerification,
};
use crate::config::StatusThresholds;
use crate::store::VerificationStatus;
use chrono::{DateTime, Utc};

pub const EMAIL_WEIGHT: f64 = 0.30;
pub const SOCIAL_WEIGHT: f64 = 0.25;
pub const CONTENT_WEIGHT: f64 = 0.25;
pub const INFLUENCE_WEIGHT: f64 = 0.20;

/// Weighted 0-100 score from the four sub-scores.
pub fn fused_score(email: u8, social: u8, content: u8, influence: u8) -> u8 {
    let score = email as f64 * EMAIL_WEIGHT
        + social as f64 * SOCIAL_WEIGHT
        + content as f64 * CONTENT_WEIGHT
        + influence as f64 * INFLUENCE_WEIGHT;
    score.round().clamp(0.0, 100.0) as u8
}

/// Map a fused score to a status. Monotonic in `score`.
pub fn status_for(score: u8, thresholds: &StatusThresholds) -> VerificationStatus {
    if score >= thresholds.verified {
        VerificationStatus::Verified
    } else if score >= thresholds.likely_valid {
        VerificationStatus::LikelyValid
    } else if score >= thresholds.questionable {
        VerificationStatus::Questionable
    } else {
        VerificationStatus::Invalid
    }
}

pub fn fuse(
    email: &EmailVerification,
    social: &SocialVerification,
    content: &ContentVerification,
    influence: &InfluenceVerification,
    thresholds: &StatusThresholds,
    now: DateTime<Utc>,
) -> OverallVerification {
    let social_score = social.presence_score();
    let score = fused_score(
        email.confidence,
        social_score,
        content.frequency_score,
        influence.social_influence_score,
    );

    let mut notes = Vec::new();
    if email.confidence < 50 {
        notes.push("email verification concerns".to_string());
    }
    if social_score == 0 {
        notes.push("no verified social media presence".to_string());
    }
    if content.frequency_score < 30 {
        notes.push("limited recent publication activity".to_string());
    }

    OverallVerification {
        confidence_score: score,
        status: status_for(score, thresholds),
        verified_at: now,
        notes,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_thresholds() {
        let t = StatusThresholds::default();
        assert_eq!(status_for(85, &t), VerificationStatus::Verified);
        assert_eq!(status_for(80, &t), VerificationStatus::Verified);
        assert_eq!(status_for(60, &t), VerificationStatus::LikelyValid);
        assert_eq!(status_for(45, &t), VerificationStatus::Questionable);
        assert_eq!(status_for(10, &t), VerificationStatus::Invalid);
    }

    #[test]
    fn test_status_is_monotonic() {
        let t = StatusThresholds::default();
        let rank = |s: VerificationStatus| match s {
            VerificationStatus::Invalid => 0,
            VerificationStatus::Questionable => 1,
            VerificationStatus::LikelyValid => 2,
            VerificationStatus::Verified => 3,
            VerificationStatus::Pending => unreachable!(),
        };
        for score in 0..100u8 {
            assert!(rank(status_for(score, &t)) <= rank(status_for(score + 1, &t)));
        }
    }

    #[test]
    fn test_fused_weights() {
        assert_eq!(fused_score(100, 100, 100, 100), 100);
        assert_eq!(fused_score(0, 0, 0, 0), 0);
        // 100*0.30 + 100*0.25 + 60*0.25 + 40*0.20 = 78
        assert_eq!(fused_score(100, 100, 60, 40), 78);
        assert_eq!(fused_score(100, 0, 0, 0), 30);
    }

    #[test]
    fn test_empty_contact_is_invalid_with_notes() {
        let overall = fuse(
            &EmailVerification::empty(None),
            &SocialVerification::default(),
            &ContentVerification::default(),
            &InfluenceVerification::default(),
            &StatusThresholds::default(),
            Utc::now(),
        );
        assert_eq!(overall.confidence_score, 0);
        assert_eq!(overall.status, VerificationStatus::Invalid);
        assert_eq!(
            overall.notes,
            vec![
                "email verification concerns",
                "no verified social media presence",
                "limited recent publication activity"
            ]
        );
    }
}
