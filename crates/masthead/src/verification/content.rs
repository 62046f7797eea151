//! Recent-publication activity from a news search feed.
//!
//! The default search capability queries an RSS/Atom endpoint and parses the
//! feed with quick-xml.

use super::types::{ContentVerification, Publication};
use crate::acquisition::http_client::HttpClient;
use anyhow::{anyhow, Result};
use async_trait::async_trait;
use chrono::{DateTime, Duration, Utc};
use quick_xml::events::Event;
use tracing::debug;

const SEARCH_TIMEOUT_MS: u64 = 10_000;

/// Publications kept in the result as evidence.
const SAMPLE_SIZE: usize = 5;

/// Search for articles matching a free-text query.
#[async_trait]
pub trait PublicationSearch: Send + Sync {
    async fn search(&self, query: &str) -> Result<Vec<Publication>>;
}

/// News search over an endpoint that answers `?q=<query>` with RSS or Atom.
pub struct FeedSearch {
    http: HttpClient,
    base_url: String,
}

impl FeedSearch {
    pub fn new(http: HttpClient, base_url: &str) -> Self {
        Self {
            http,
            base_url: base_url.to_string(),
        }
    }
}

#[async_trait]
impl PublicationSearch for FeedSearch {
    async fn search(&self, query: &str) -> Result<Vec<Publication>> {
        let url = url::Url::parse_with_params(&self.base_url, &[("q", query)])?;
        let page = self.http.get(url.as_str(), SEARCH_TIMEOUT_MS).await;
        if !page.ok {
            return Err(anyhow!("search returned status {}", page.status));
        }
        Ok(parse_feed(&page.body))
    }
}

/// Parse RSS 2.0 or Atom XML into publications.
pub fn parse_feed(xml: &str) -> Vec<Publication> {
    let mut entries = Vec::new();
    let mut in_entry = false;
    let mut title = String::new();
    let mut link: Option<String> = None;
    let mut date: Option<String> = None;
    let mut tag = String::new();

    let mut reader = quick_xml::Reader::from_str(xml);
    reader.config_mut().trim_text(true);
    let mut buf = Vec::new();

    loop {
        match reader.read_event_into(&mut buf) {
            Ok(Event::Start(ref e)) | Ok(Event::Empty(ref e)) => {
                let name = String::from_utf8_lossy(e.name().as_ref()).to_string();
                if name == "item" || name == "entry" {
                    in_entry = true;
                    title.clear();
                    link = None;
                    date = None;
                }
                // Atom carries the link as an attribute.
                if in_entry && name == "link" {
                    for attr in e.attributes().flatten() {
                        if attr.key.as_ref() == b"href" {
                            link = Some(String::from_utf8_lossy(&attr.value).to_string());
                        }
                    }
                }
                tag = name;
            }
            Ok(Event::Text(ref e)) if in_entry => {
                let text = e.unescape().unwrap_or_default();
                let text = text.trim();
                if !text.is_empty() {
                    match tag.as_str() {
                        "title" => title = text.to_string(),
                        "link" => link = Some(text.to_string()),
                        "pubDate" | "dc:date" | "published" | "updated" => {
                            date.get_or_insert_with(|| text.to_string());
                        }
                        _ => {}
                    }
                }
            }
            Ok(Event::CData(ref e)) if in_entry && tag == "title" => {
                title = String::from_utf8_lossy(e).trim().to_string();
            }
            Ok(Event::End(ref e)) => {
                let name = String::from_utf8_lossy(e.name().as_ref()).to_string();
                if (name == "item" || name == "entry") && in_entry {
                    if !title.is_empty() || link.is_some() {
                        entries.push(Publication {
                            title: title.clone(),
                            url: link.clone(),
                            published_at: date.as_deref().and_then(parse_date),
                        });
                    }
                    in_entry = false;
                }
                tag.clear();
            }
            Ok(Event::Eof) => break,
            Err(e) => {
                debug!("feed parse stopped: {e}");
                break;
            }
            _ => {}
        }
        buf.clear();
    }

    entries
}

/// RFC 2822 (RSS) or RFC 3339 (Atom) timestamps.
fn parse_date(s: &str) -> Option<DateTime<Utc>> {
    DateTime::parse_from_rfc2822(s)
        .or_else(|_| DateTime::parse_from_rfc3339(s))
        .map(|d| d.with_timezone(&Utc))
        .ok()
}

/// Weight of one publication by age: within 30 days 1.0, within 90 days 0.5,
/// older 0. Undated items count 0.5.
pub fn recency_weight(published_at: Option<DateTime<Utc>>, now: DateTime<Utc>) -> f64 {
    match published_at {
        None => 0.5,
        Some(at) => {
            let age = now - at;
            if age <= Duration::days(30) {
                1.0
            } else if age <= Duration::days(90) {
                0.5
            } else {
                0.0
            }
        }
    }
}

/// Publication-frequency score for a recency-weighted count.
pub fn frequency_score(weighted: f64) -> u8 {
    match weighted {
        w if w >= 20.0 => 100,
        w if w >= 10.0 => 80,
        w if w >= 5.0 => 60,
        w if w >= 2.0 => 40,
        w if w >= 1.0 => 20,
        _ => 0,
    }
}

/// Search query for a contact's bylines.
pub fn byline_query(name: &str, outlet_name: Option<&str>) -> String {
    match outlet_name.filter(|o| !o.trim().is_empty()) {
        Some(outlet) => format!("\"{}\" \"{}\"", name.trim(), outlet.trim()),
        None => format!("\"{}\"", name.trim()),
    }
}

/// Score recent publication activity. A failed search scores zero.
pub async fn verify_content(
    search: &dyn PublicationSearch,
    name: &str,
    outlet_name: Option<&str>,
    now: DateTime<Utc>,
) -> ContentVerification {
    let query = byline_query(name, outlet_name);
    let publications = match search.search(&query).await {
        Ok(found) => found,
        Err(e) => {
            debug!("publication search for {name} failed: {e:#}");
            return ContentVerification {
                query,
                ..Default::default()
            };
        }
    };
    summarize(query, publications, now)
}

fn summarize(query: String, publications: Vec<Publication>, now: DateTime<Utc>) -> ContentVerification {
    let weighted: f64 = publications
        .iter()
        .map(|p| recency_weight(p.published_at, now))
        .sum();
    let recent = publications
        .iter()
        .filter(|p| p.published_at.is_some_and(|at| now - at <= Duration::days(30)))
        .count();
    ContentVerification {
        query,
        publications_found: publications.len(),
        recent_publications: recent,
        weighted_count: weighted,
        latest_publication: publications.iter().filter_map(|p| p.published_at).max(),
        frequency_score: frequency_score(weighted),
        sample: publications.into_iter().take(SAMPLE_SIZE).collect(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::matchers::{method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    #[test]
    fn test_frequency_table() {
        assert_eq!(frequency_score(25.0), 100);
        assert_eq!(frequency_score(10.0), 80);
        assert_eq!(frequency_score(7.5), 60);
        assert_eq!(frequency_score(2.0), 40);
        assert_eq!(frequency_score(1.0), 20);
        assert_eq!(frequency_score(0.5), 0);
    }

    #[test]
    fn test_recency_weight() {
        let now = Utc::now();
        assert_eq!(recency_weight(Some(now - Duration::days(3)), now), 1.0);
        assert_eq!(recency_weight(Some(now - Duration::days(60)), now), 0.5);
        assert_eq!(recency_weight(Some(now - Duration::days(400)), now), 0.0);
        assert_eq!(recency_weight(None, now), 0.5);
    }

    #[test]
    fn test_parse_rss_and_atom() {
        let rss = r#"<?xml version="1.0"?>
        <rss version="2.0"><channel><title>Search</title>
          <item>
            <title>Chip shortage eases - Outlet Daily</title>
            <link>https://outlet.com/chips</link>
            <pubDate>Mon, 05 Jan 2026 10:00:00 GMT</pubDate>
          </item>
          <item><title><![CDATA[Undated piece]]></title></item>
        </channel></rss>"#;
        let items = parse_feed(rss);
        assert_eq!(items.len(), 2);
        assert_eq!(items[0].url.as_deref(), Some("https://outlet.com/chips"));
        assert!(items[0].published_at.is_some());
        assert_eq!(items[1].title, "Undated piece");
        assert!(items[1].published_at.is_none());

        let atom = r#"<feed xmlns="http://www.w3.org/2005/Atom">
          <entry><title>Entry</title><link href="https://outlet.com/e"/>
            <published>2026-01-15T00:00:00Z</published></entry>
        </feed>"#;
        let items = parse_feed(atom);
        assert_eq!(items.len(), 1);
        assert_eq!(items[0].url.as_deref(), Some("https://outlet.com/e"));
        assert!(items[0].published_at.is_some());
    }

    #[test]
    fn test_byline_query() {
        assert_eq!(
            byline_query("Jane Doe", Some("Outlet Daily")),
            "\"Jane Doe\" \"Outlet Daily\""
        );
        assert_eq!(byline_query("Jane Doe", None), "\"Jane Doe\"");
    }

    #[tokio::test]
    async fn test_feed_search_scores_recent_bylines() {
        let now = Utc::now();
        let items: String = (0..6)
            .map(|i| {
                format!(
                    "<item><title>Story {i}</title><link>https://outlet.com/{i}</link><pubDate>{}</pubDate></item>",
                    (now - Duration::days(2 + i)).to_rfc2822()
                )
            })
            .collect();
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/rss/search"))
            .and(query_param("q", "\"Jane Doe\" \"Outlet Daily\""))
            .respond_with(ResponseTemplate::new(200).set_body_string(format!(
                "<rss><channel>{items}</channel></rss>"
            )))
            .mount(&server)
            .await;

        let http = HttpClient::new("masthead-test", 2_000).unwrap();
        let search = FeedSearch::new(http, &format!("{}/rss/search", server.uri()));
        let v = verify_content(&search, "Jane Doe", Some("Outlet Daily"), now).await;
        assert_eq!(v.publications_found, 6);
        assert_eq!(v.recent_publications, 6);
        assert_eq!(v.frequency_score, 60);
        assert_eq!(v.sample.len(), SAMPLE_SIZE);
    }

    #[tokio::test]
    async fn test_failed_search_scores_zero() {
        let server = MockServer::start().await;
        let http = HttpClient::new("masthead-test", 2_000).unwrap();
        let search = FeedSearch::new(http, &format!("{}/rss/search", server.uri()));
        let v = verify_content(&search, "Jane Doe", None, Utc::now()).await;
        assert_eq!(v.frequency_score, 0);
        assert_eq!(v.publications_found, 0);
    }
}
