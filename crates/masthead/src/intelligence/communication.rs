//! Pitch timing and style preferences.

use super::types::{CommunicationIntelligence, PitchStyle};
use crate::store::{Contact, Outlet};

const OPTIMAL_TIMES: &[&str] = &["Tuesday 10:00", "Wednesday 10:00", "Thursday 14:00"];
const PREFERRED_TIME: &str = "10:00";
const DEFAULT_RESPONSE_RATE: f64 = 50.0;

pub fn analyze_communication(
    contact: &Contact,
    outlet: Option<&Outlet>,
    beat: &str,
) -> CommunicationIntelligence {
    let digital = outlet.is_some_and(|o| o.outlet_type == "digital");

    let mut likelihood = contact
        .response_rate
        .unwrap_or(DEFAULT_RESPONSE_RATE)
        .clamp(0.0, 100.0);
    if digital {
        likelihood = (likelihood + 10.0).min(100.0);
    }

    let mut style = PitchStyle {
        prefers_short_pitches: digital,
        prefers_data_driven: false,
        prefers_narrative: false,
        prefers_multimedia: false,
        prefers_breaking_news: false,
        accepts_embargo: true,
    };
    match beat {
        "technology" => {
            style.prefers_data_driven = true;
            style.prefers_multimedia = true;
        }
        "entertainment" => {
            style.prefers_narrative = true;
            style.prefers_multimedia = true;
        }
        "politics" => {
            style.prefers_breaking_news = true;
            style.accepts_embargo = false;
        }
        "business" => style.prefers_data_driven = true,
        _ => {}
    }

    CommunicationIntelligence {
        preferred_contact_method: if contact.email.is_some() {
            "email".to_string()
        } else if contact.twitter_handle.is_some() {
            "twitter".to_string()
        } else {
            "outlet".to_string()
        },
        preferred_contact_time: PREFERRED_TIME.to_string(),
        optimal_times: OPTIMAL_TIMES.iter().map(|t| t.to_string()).collect(),
        response_likelihood: likelihood.round() as u8,
        pitch_style: style,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{sample_contact, sample_outlet};

    #[test]
    fn test_defaults() {
        let c = sample_contact();
        let comm = analyze_communication(&c, None, "general");
        assert_eq!(comm.response_likelihood, 50);
        assert_eq!(comm.preferred_contact_time, "10:00");
        assert_eq!(comm.preferred_contact_method, "email");
        assert!(comm.pitch_style.accepts_embargo);
        assert!(!comm.pitch_style.prefers_short_pitches);
    }

    #[test]
    fn test_digital_outlet_and_beat_adjustments() {
        let mut c = sample_contact();
        c.response_rate = Some(95.0);
        let mut o = sample_outlet("https://techcrunch.com");
        o.outlet_type = "digital".into();

        let comm = analyze_communication(&c, Some(&o), "technology");
        assert_eq!(comm.response_likelihood, 100);
        assert!(comm.pitch_style.prefers_short_pitches);
        assert!(comm.pitch_style.prefers_data_driven);
        assert!(comm.pitch_style.prefers_multimedia);

        let politics = analyze_communication(&c, None, "politics");
        assert!(politics.pitch_style.prefers_breaking_news);
        assert!(!politics.pitch_style.accepts_embargo);
        assert_eq!(politics.response_likelihood, 95);
    }
}
