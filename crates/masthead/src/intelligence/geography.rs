//! Coverage area and time zone from location and bio text.

use super::types::GeographicAnalysis;
use crate::store::Contact;

struct Region {
    name: &'static str,
    timezone: &'static str,
    places: &'static [&'static str],
}

const REGIONS: &[Region] = &[
    Region {
        name: "northeast",
        timezone: "America/New_York",
        places: &[
            "new york", "nyc", "boston", "philadelphia", "washington", "d.c.", "baltimore",
            "pittsburgh", "hartford", "providence", "newark",
        ],
    },
    Region {
        name: "southeast",
        timezone: "America/New_York",
        places: &["atlanta", "miami", "charlotte", "orlando", "tampa", "nashville", "raleigh", "jacksonville"],
    },
    Region {
        name: "midwest",
        timezone: "America/Chicago",
        places: &[
            "chicago", "detroit", "minneapolis", "st. louis", "cleveland", "columbus", "milwaukee",
            "kansas city", "indianapolis",
        ],
    },
    Region {
        name: "southwest",
        timezone: "America/Chicago",
        places: &["dallas", "houston", "austin", "san antonio", "oklahoma city"],
    },
    Region {
        name: "mountain",
        timezone: "America/Denver",
        places: &["denver", "phoenix", "salt lake city", "boise", "albuquerque", "las vegas"],
    },
    Region {
        name: "west_coast",
        timezone: "America/Los_Angeles",
        places: &[
            "los angeles", "san francisco", "seattle", "portland", "san diego", "oakland",
            "san jose", "silicon valley", "sacramento",
        ],
    },
    Region {
        name: "international",
        timezone: "UTC",
        places: &[
            "london", "paris", "berlin", "tokyo", "hong kong", "singapore", "toronto", "sydney",
            "brussels", "dubai",
        ],
    },
];

const MAJOR_MARKETS: &[&str] = &[
    "new york", "nyc", "los angeles", "chicago", "washington", "san francisco", "boston",
    "london",
];

const DEFAULT_AREA: &str = "national";
const DEFAULT_TIMEZONE: &str = "America/New_York";

pub fn analyze_geography(contact: &Contact) -> GeographicAnalysis {
    let location = contact.location.as_deref().unwrap_or("").to_lowercase();
    let region = (!location.trim().is_empty())
        .then(|| {
            REGIONS
                .iter()
                .find(|r| r.places.iter().any(|p| location.contains(p)))
        })
        .flatten();

    let bio = contact.bio.as_deref().unwrap_or("").to_lowercase();
    let mut secondary = Vec::new();
    if ["international", "global", "world", "foreign"].iter().any(|k| bio.contains(k)) {
        secondary.push("international".to_string());
    }
    if ["national", "nationwide", "federal"].iter().any(|k| bio.contains(k)) {
        secondary.push("national".to_string());
    }
    if ["local", "community", "city hall", "metro"].iter().any(|k| bio.contains(k)) {
        secondary.push("local".to_string());
    }

    let mut local_influence = 50u8;
    if MAJOR_MARKETS.iter().any(|m| location.contains(m)) {
        local_influence += 30;
    }
    if region.is_some() {
        local_influence += 10;
    }

    GeographicAnalysis {
        primary_coverage_area: region.map(|r| r.name).unwrap_or(DEFAULT_AREA).to_string(),
        timezone: region.map(|r| r.timezone).unwrap_or(DEFAULT_TIMEZONE).to_string(),
        secondary_coverage: secondary,
        local_influence_score: local_influence,
    }
}
