//! Intelligence analysis blocks and the merged per-contact record.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Where a categorization came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CategorizationSource {
    Ai,
    Rules,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Categorization {
    pub primary_beat: String,
    pub secondary_beats: Vec<String>,
    pub confidence_score: u8,
    pub expertise_areas: Vec<String>,
    pub content_preferences: Vec<String>,
    pub source: CategorizationSource,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InfluenceTier {
    #[serde(rename = "tier_1")]
    Tier1,
    #[serde(rename = "tier_2")]
    Tier2,
    #[serde(rename = "tier_3")]
    Tier3,
    Emerging,
}

impl InfluenceTier {
    pub fn as_str(&self) -> &'static str {
        match self {
            InfluenceTier::Tier1 => "tier_1",
            InfluenceTier::Tier2 => "tier_2",
            InfluenceTier::Tier3 => "tier_3",
            InfluenceTier::Emerging => "emerging",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InfluenceAnalysis {
    pub tier: InfluenceTier,
    pub influence_points: u8,
    /// Monthly readers the contact plausibly reaches.
    pub reach_estimate: u64,
    pub engagement_quality: String,
    pub authority_indicators: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GeographicAnalysis {
    pub primary_coverage_area: String,
    pub timezone: String,
    pub secondary_coverage: Vec<String>,
    pub local_influence_score: u8,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PitchStyle {
    pub prefers_short_pitches: bool,
    pub prefers_data_driven: bool,
    pub prefers_narrative: bool,
    pub prefers_multimedia: bool,
    pub prefers_breaking_news: bool,
    pub accepts_embargo: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CommunicationIntelligence {
    pub preferred_contact_method: String,
    pub preferred_contact_time: String,
    pub optimal_times: Vec<String>,
    pub response_likelihood: u8,
    pub pitch_style: PitchStyle,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ContentFormats {
    pub article: bool,
    pub video: bool,
    pub podcast: bool,
    pub social: bool,
    pub newsletter: bool,
    pub live_reporting: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RelationshipInsights {
    pub networking_score: u8,
    pub collaboration_likelihood: u8,
    pub follow_up_sensitivity: String,
    pub exclusivity_preference: String,
    pub relationship_score: u8,
}

/// Every intelligence analysis for one contact.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ContactIntelligence {
    pub contact_id: String,
    pub categorization: Categorization,
    pub influence_analysis: InfluenceAnalysis,
    pub geographic_analysis: GeographicAnalysis,
    pub communication_intelligence: CommunicationIntelligence,
    pub content_formats: ContentFormats,
    pub relationship_insights: RelationshipInsights,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct IntelligenceSummary {
    pub processed: usize,
    pub successful: usize,
    pub failed: usize,
    pub batches: usize,
    pub beat_distribution: BTreeMap<String, usize>,
    pub influence_tiers: BTreeMap<String, usize>,
    pub average_confidence: f64,
}
