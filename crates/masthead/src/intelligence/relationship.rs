//! Relationship insights from social presence and pitch history.

use super::types::RelationshipInsights;
use crate::store::{Contact, Outlet};

pub fn analyze_relationship(contact: &Contact, outlet: Option<&Outlet>, beat: &str) -> RelationshipInsights {
    let mut networking: u32 = 20;
    if contact.twitter_handle.is_some() {
        networking += 30;
    }
    if contact.linkedin_url.is_some() {
        networking += 30;
    }
    if contact.personal_website.is_some() {
        networking += 20;
    }
    let networking = networking.min(100) as u8;

    let collaboration = if contact.total_pitches > 0 {
        let ratio = contact.successful_pitches.min(contact.total_pitches) as f64
            / contact.total_pitches as f64;
        (ratio * 100.0).round() as u8
    } else {
        50
    };

    let follow_up = match contact.avg_response_time_hours {
        Some(h) if h <= 2.0 => "high",
        Some(h) if h >= 48.0 => "low",
        _ => "medium",
    };

    let wire = outlet.is_some_and(|o| o.outlet_type == "wire");
    let exclusivity = if wire {
        "non_exclusive"
    } else if matches!(beat, "politics" | "business" | "technology") {
        "prefers_exclusive"
    } else {
        "flexible"
    };

    RelationshipInsights {
        networking_score: networking,
        collaboration_likelihood: collaboration,
        follow_up_sensitivity: follow_up.to_string(),
        exclusivity_preference: exclusivity.to_string(),
        relationship_score: ((networking as u32 + collaboration as u32) / 2) as u8,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{sample_contact, sample_outlet};

    #[test]
    fn test_no_history() {
        let c = sample_contact();
        let r = analyze_relationship(&c, None, "general");
        assert_eq!(r.networking_score, 20);
        assert_eq!(r.collaboration_likelihood, 50);
        assert_eq!(r.follow_up_sensitivity, "medium");
        assert_eq!(r.exclusivity_preference, "flexible");
        assert_eq!(r.relationship_score, 35);
    }

    #[test]
    fn test_history_and_wire_outlet() {
        let mut c = sample_contact();
        c.twitter_handle = Some("janedoe".into());
        c.linkedin_url = Some("https://linkedin.com/in/janedoe".into());
        c.total_pitches = 10;
        c.successful_pitches = 4;
        c.avg_response_time_hours = Some(1.5);
        let mut o = sample_outlet("https://reuters.com");
        o.outlet_type = "wire".into();
        let r = analyze_relationship(&c, Some(&o), "business");
        assert_eq!(r.networking_score, 80);
        assert_eq!(r.collaboration_likelihood, 40);
        assert_eq!(r.follow_up_sensitivity, "high");
        assert_eq!(r.exclusivity_preference, "non_exclusive");
        assert_eq!(r.relationship_score, 60);

        c.avg_response_time_hours = Some(72.0);
        let r = analyze_relationship(&c, None, "business");
        assert_eq!(r.follow_up_sensitivity, "low");
        assert_eq!(r.exclusivity_preference, "prefers_exclusive");
    }
}
