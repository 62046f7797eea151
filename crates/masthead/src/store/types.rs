//! Persisted outlet and contact records.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Verification status of a contact.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum VerificationStatus {
    /// Created by scraping, not yet verified.
    Pending,
    Verified,
    LikelyValid,
    Questionable,
    Invalid,
}

impl VerificationStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            VerificationStatus::Pending => "pending",
            VerificationStatus::Verified => "verified",
            VerificationStatus::LikelyValid => "likely_valid",
            VerificationStatus::Questionable => "questionable",
            VerificationStatus::Invalid => "invalid",
        }
    }

    /// Parse a stored status; unknown values read as `Pending`.
    pub fn parse(s: &str) -> Self {
        match s {
            "verified" => VerificationStatus::Verified,
            "likely_valid" => VerificationStatus::LikelyValid,
            "questionable" => VerificationStatus::Questionable,
            "invalid" => VerificationStatus::Invalid,
            _ => VerificationStatus::Pending,
        }
    }
}

impl std::fmt::Display for VerificationStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A media outlet, identified by tenant and origin URL.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Outlet {
    pub id: String,
    pub tenant_id: String,
    /// Normalized origin, `scheme://host[:port]`.
    pub url: String,
    pub name: String,
    /// `wire`, `broadcast`, `radio`, `digital` or `publication`.
    pub outlet_type: String,
    pub category: String,
    pub discovery_method: String,
    pub verification_status: String,
    pub domain_authority: Option<u8>,
    pub monthly_traffic: Option<u64>,
    pub created_at: DateTime<Utc>,
}

/// Fields written when a scraped candidate is upserted.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct NewContact {
    pub outlet_id: String,
    pub first_name: String,
    pub last_name: String,
    pub email: Option<String>,
    pub title: Option<String>,
    pub bio: Option<String>,
    pub image_url: Option<String>,
    pub profile_url: Option<String>,
    pub twitter_handle: Option<String>,
    pub linkedin_url: Option<String>,
    pub personal_website: Option<String>,
    pub beat: Option<String>,
    pub confidence_score: u8,
}

/// A persisted contact.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Contact {
    pub id: String,
    pub tenant_id: String,
    pub outlet_id: String,
    pub first_name: String,
    pub last_name: String,
    pub email: Option<String>,
    pub title: Option<String>,
    pub bio: Option<String>,
    pub image_url: Option<String>,
    pub profile_url: Option<String>,
    pub twitter_handle: Option<String>,
    pub linkedin_url: Option<String>,
    pub personal_website: Option<String>,
    pub location: Option<String>,

    // Verification
    pub confidence_score: u8,
    pub verification_status: VerificationStatus,
    pub last_verified_at: Option<DateTime<Utc>>,
    pub verification_metadata: Option<serde_json::Value>,

    // Intelligence
    pub beat: Option<String>,
    pub secondary_beats: Vec<String>,
    pub expertise_score: Option<u8>,
    pub relationship_score: Option<u8>,
    pub preferred_contact_time: Option<String>,
    pub timezone: Option<String>,
    pub ai_intelligence: Option<serde_json::Value>,

    // Engagement history maintained by the CRM side.
    pub response_rate: Option<f64>,
    pub avg_response_time_hours: Option<f64>,
    pub total_pitches: u32,
    pub successful_pitches: u32,
    pub interaction_count: u32,

    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Contact {
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
            .trim()
            .to_string()
    }
}

/// Engagement history as recorded by the CRM.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Engagement {
    pub response_rate: Option<f64>,
    pub avg_response_time_hours: Option<f64>,
    pub total_pitches: u32,
    pub successful_pitches: u32,
    pub interaction_count: u32,
}

/// What an upsert did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UpsertOutcome {
    Created,
    Updated,
}

/// Verification fields written back in one update.
#[derive(Debug, Clone)]
pub struct VerificationUpdate {
    pub confidence_score: u8,
    pub status: VerificationStatus,
    pub verified_at: DateTime<Utc>,
    pub metadata: serde_json::Value,
}

/// Intelligence fields written back in one update.
#[derive(Debug, Clone)]
pub struct IntelligenceUpdate {
    pub beat: String,
    pub secondary_beats: Vec<String>,
    pub expertise_score: u8,
    pub relationship_score: u8,
    pub preferred_contact_time: String,
    pub timezone: String,
    pub blob: serde_json::Value,
}
