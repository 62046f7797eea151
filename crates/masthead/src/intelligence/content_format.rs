//! Content format affinities from outlet type and title wording.

use super::types::ContentFormats;
use crate::store::{Contact, Outlet};

/// Format affinities: article-only unless outlet type or title say otherwise.
pub fn analyze_formats(contact: &Contact, outlet: Option<&Outlet>) -> ContentFormats {
    let mut formats = ContentFormats {
        article: true,
        ..Default::default()
    };

    match outlet.map(|o| o.outlet_type.as_str()) {
        Some("broadcast") => {
            formats.video = true;
            formats.live_reporting = true;
        }
        Some("radio") => formats.podcast = true,
        Some("digital") => {
            formats.social = true;
            formats.newsletter = true;
        }
        Some("wire") => formats.live_reporting = true,
        _ => {}
    }

    let title = contact.title.as_deref().unwrap_or("").to_lowercase();
    if ["video", "anchor", "producer", "tv"].iter().any(|k| title.contains(k)) {
        formats.video = true;
    }
    if ["podcast", "audio", "host"].iter().any(|k| title.contains(k)) {
        formats.podcast = true;
    }
    if title.contains("social") {
        formats.social = true;
    }
    if title.contains("newsletter") {
        formats.newsletter = true;
    }
    if ["live", "breaking", "correspondent"].iter().any(|k| title.contains(k)) {
        formats.live_reporting = true;
    }
    formats
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{sample_contact, sample_outlet};

    #[test]
    fn test_article_only_default() {
        let c = sample_contact();
        let f = analyze_formats(&c, None);
        assert_eq!(
            f,
            ContentFormats {
                article: true,
                ..Default::default()
            }
        );
    }

    #[test]
    fn test_outlet_and_title_adjustments() {
        let mut c = sample_contact();
        c.title = Some("Podcast Host and Newsletter Editor".into());
        let mut o = sample_outlet("https://cbsnews.com");
        o.outlet_type = "broadcast".into();
        let f = analyze_formats(&c, Some(&o));
        assert!(f.article && f.video && f.live_reporting && f.podcast && f.newsletter);
        assert!(!f.social);
    }
}
