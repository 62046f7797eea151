//! Social-influence estimate from outlet authority, seniority and history.

use super::types::{InfluenceVerification, Reach};
use crate::outlets::{authority_tier, AuthorityTier};
use crate::store::{Contact, Outlet};

const SENIOR_EXECUTIVE: &[&str] = &["chief", "executive", "managing", "editor-in-chief", "publisher"];
const SENIOR: &[&str] = &["senior", "lead", "editor", "principal", "head"];

pub fn authority_points(tier: AuthorityTier) -> u8 {
    match tier {
        AuthorityTier::High => 40,
        AuthorityTier::Medium => 25,
        AuthorityTier::Low => 10,
        AuthorityTier::Unranked => 0,
    }
}

/// Seniority points for a title; no title scores zero.
pub fn seniority_points(title: Option<&str>) -> u8 {
    let Some(title) = title.map(str::to_lowercase).filter(|t| !t.trim().is_empty()) else {
        return 0;
    };
    if SENIOR_EXECUTIVE.iter().any(|k| title.contains(k)) {
        25
    } else if SENIOR.iter().any(|k| title.contains(k)) {
        15
    } else {
        5
    }
}

pub fn reach_for(score: u8) -> Reach {
    match score {
        s if s >= 70 => Reach::National,
        s if s >= 40 => Reach::Regional,
        s if s >= 15 => Reach::Local,
        _ => Reach::Limited,
    }
}

/// Influence score for a contact at an outlet. Pure; never fails.
pub fn assess_influence(contact: &Contact, outlet: Option<&Outlet>) -> InfluenceVerification {
    let authority = authority_points(authority_tier(outlet));
    let seniority = seniority_points(contact.title.as_deref());
    let mut social = 0u8;
    if contact.twitter_handle.is_some() {
        social += 10;
    }
    if contact.linkedin_url.is_some() {
        social += 10;
    }
    let interaction = contact.interaction_count.saturating_mul(2).min(15) as u8;

    let score = (authority as u32 + seniority as u32 + social as u32 + interaction as u32).min(100) as u8;
    InfluenceVerification {
        authority_points: authority,
        seniority_points: seniority,
        social_points: social,
        interaction_points: interaction,
        social_influence_score: score,
        reach: reach_for(score),
    }
}
