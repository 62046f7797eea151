//! Masthead: media-contact discovery, verification and intelligence.
//!
//! A scrape turns an outlet URL into stored journalist contacts; verification
//! fuses email, social, byline and influence signals into a status; the
//! intelligence pass assigns beats and outreach hints. All three run behind
//! [`pipeline::Pipeline`] and are exposed over HTTP by [`server`] and on the
//! command line by [`cli`].

pub mod acquisition;
pub mod audit;
pub mod batch;
pub mod cli;
pub mod config;
pub mod extraction;
pub mod intelligence;
pub mod outlets;
pub mod pipeline;
pub mod scrape;
pub mod server;
pub mod store;
pub mod verification;

#[cfg(test)]
pub(crate) mod test_support {
    use crate::store::{Contact, Outlet, VerificationStatus};
    use chrono::Utc;

    pub fn sample_contact() -> Contact {
        let now = Utc::now();
        Contact {
            id: "c1".into(),
            tenant_id: "t1".into(),
            outlet_id: "o1".into(),
            first_name: "Jane".into(),
            last_name: "Doe".into(),
            email: Some("jane@outlet.com".into()),
            title: Some("Reporter".into()),
            bio: None,
            image_url: None,
            profile_url: None,
            twitter_handle: None,
            linkedin_url: None,
            personal_website: None,
            location: None,
            confidence_score: 0,
            verification_status: VerificationStatus::Pending,
            last_verified_at: None,
            verification_metadata: None,
            beat: None,
            secondary_beats: Vec::new(),
            expertise_score: None,
            relationship_score: None,
            preferred_contact_time: None,
            timezone: None,
            ai_intelligence: None,
            response_rate: None,
            avg_response_time_hours: None,
            total_pitches: 0,
            successful_pitches: 0,
            interaction_count: 0,
            created_at: now,
            updated_at: now,
        }
    }

    pub fn sample_outlet(url: &str) -> Outlet {
        Outlet {
            id: "o1".into(),
            tenant_id: "t1".into(),
            url: url.into(),
            name: "Sample Outlet".into(),
            outlet_type: "publication".into(),
            category: "news".into(),
            discovery_method: "scrape".into(),
            verification_status: "pending".into(),
            domain_authority: None,
            monthly_traffic: None,
            created_at: Utc::now(),
        }
    }
}
