//! Influence tiering with an audit trail of contributing factors.

use super::types::{InfluenceAnalysis, InfluenceTier};
use crate::outlets::{authority_tier, AuthorityTier};
use crate::store::{Contact, Outlet};

const SENIOR_TITLES: &[&str] = &[
    "chief", "senior", "lead", "editor", "executive", "managing", "head", "principal", "director",
];

pub fn tier_for(points: u8) -> InfluenceTier {
    match points {
        p if p >= 70 => InfluenceTier::Tier1,
        p if p >= 50 => InfluenceTier::Tier2,
        p if p >= 30 => InfluenceTier::Tier3,
        _ => InfluenceTier::Emerging,
    }
}

/// Outlet points and indicator from stored metrics, else the authority lists.
fn outlet_factor(outlet: Option<&Outlet>) -> (u8, Option<String>) {
    let da = outlet.and_then(|o| o.domain_authority).unwrap_or(0);
    let traffic = outlet.and_then(|o| o.monthly_traffic).unwrap_or(0);
    if da >= 80 || traffic >= 10_000_000 {
        return (40, Some("major outlet authority".to_string()));
    }
    if da >= 50 || traffic >= 1_000_000 {
        return (25, Some("established outlet authority".to_string()));
    }
    if da >= 30 || traffic >= 100_000 {
        return (10, Some("regional outlet authority".to_string()));
    }
    match authority_tier(outlet) {
        AuthorityTier::High => (40, Some("major outlet authority".to_string())),
        AuthorityTier::Medium => (25, Some("established outlet authority".to_string())),
        _ => (0, None),
    }
}

/// Reach estimate from outlet traffic, or a per-tier default.
fn reach_estimate(outlet: Option<&Outlet>, tier: InfluenceTier) -> u64 {
    if let Some(traffic) = outlet.and_then(|o| o.monthly_traffic).filter(|t| *t > 0) {
        return traffic;
    }
    match tier {
        InfluenceTier::Tier1 => 5_000_000,
        InfluenceTier::Tier2 => 1_000_000,
        InfluenceTier::Tier3 => 250_000,
        InfluenceTier::Emerging => 50_000,
    }
}

fn engagement_quality(contact: &Contact) -> &'static str {
    match contact.response_rate {
        Some(r) if r >= 60.0 => "high",
        Some(r) if r >= 30.0 => "medium",
        Some(_) => "low",
        None => "unknown",
    }
}

/// Tier a contact. `expertise_score` is the categorization confidence.
pub fn analyze_influence(contact: &Contact, outlet: Option<&Outlet>, expertise_score: u8) -> InfluenceAnalysis {
    let mut points: u32 = 0;
    let mut indicators = Vec::new();

    let (outlet_points, outlet_indicator) = outlet_factor(outlet);
    points += outlet_points as u32;
    indicators.extend(outlet_indicator);

    let title = contact.title.as_deref().unwrap_or("").to_lowercase();
    if SENIOR_TITLES.iter().any(|k| title.contains(k)) {
        points += 20;
        indicators.push("senior editorial title".to_string());
    }
    if contact.twitter_handle.is_some() {
        points += 10;
        indicators.push("active on twitter".to_string());
    }
    if contact.linkedin_url.is_some() {
        points += 5;
        indicators.push("linkedin presence".to_string());
    }
    if expertise_score >= 80 {
        points += 15;
        indicators.push("deep beat expertise".to_string());
    } else if expertise_score >= 60 {
        points += 8;
        indicators.push("clear beat focus".to_string());
    }

    let points = points.min(100) as u8;
    let tier = tier_for(points);
    InfluenceAnalysis {
        tier,
        influence_points: points,
        reach_estimate: reach_estimate(outlet, tier),
        engagement_quality: engagement_quality(contact).to_string(),
        authority_indicators: indicators,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{sample_contact, sample_outlet};

    #[test]
    fn test_tier_boundaries() {
        assert_eq!(tier_for(70), InfluenceTier::Tier1);
        assert_eq!(tier_for(69), InfluenceTier::Tier2);
        assert_eq!(tier_for(50), InfluenceTier::Tier2);
        assert_eq!(tier_for(30), InfluenceTier::Tier3);
        assert_eq!(tier_for(29), InfluenceTier::Emerging);
    }

    #[test]
    fn test_major_outlet_senior_reporter() {
        let mut c = sample_contact();
        c.title = Some("Senior Technology Reporter".into());
        c.twitter_handle = Some("janedoe".into());
        let mut o = sample_outlet("https://local.example");
        o.domain_authority = Some(85);
        let a = analyze_influence(&c, Some(&o), 90);
        // 40 + 20 + 10 + 15
        assert_eq!(a.influence_points, 85);
        assert_eq!(a.tier, InfluenceTier::Tier1);
        assert_eq!(a.authority_indicators.len(), 4);
        assert_eq!(a.reach_estimate, 5_000_000);
    }

    #[test]
    fn test_listed_outlet_without_metrics() {
        let c = sample_contact();
        let o = sample_outlet("https://techcrunch.com");
        let a = analyze_influence(&c, Some(&o), 0);
        assert_eq!(a.influence_points, 25);
        assert_eq!(a.tier, InfluenceTier::Emerging);
        assert_eq!(a.authority_indicators, vec!["established outlet authority".to_string()]);
    }

    #[test]
    fn test_no_signals_is_emerging() {
        let mut c = sample_contact();
        c.title = None;
        let a = analyze_influence(&c, None, 0);
        assert_eq!(a.influence_points, 0);
        assert_eq!(a.tier, InfluenceTier::Emerging);
        assert!(a.authority_indicators.is_empty());
        assert_eq!(a.engagement_quality, "unknown");
    }
}
