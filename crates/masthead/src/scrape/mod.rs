//! Outlet scraping: locate staff pages, extract, deduplicate and persist.

pub mod dedup;

use crate::acquisition::origin::{bare_host, normalize_origin};
use crate::acquisition::staff_locator::{locate_staff_pages, LocatorTier};
use crate::extraction::candidate::ContactCandidate;
use crate::extraction::{extract_contacts, page_display_name};
use crate::outlets::classify_outlet_type;
use crate::pipeline::Pipeline;
use crate::store::{NewContact, Outlet, UpsertOutcome};
use anyhow::{bail, Result};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::time::Instant;
use tracing::{info, warn};

/// Staff pages fetched concurrently per scrape.
const PAGE_CONCURRENCY: usize = 3;

/// A persisted contact as reported back from a scrape.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScrapedContact {
    pub contact_id: String,
    /// True when this scrape created the record.
    pub created: bool,
    #[serde(flatten)]
    pub candidate: ContactCandidate,
}

/// Bookkeeping for one scrape run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScrapingMetadata {
    pub outlet_id: String,
    pub locator_tier: LocatorTier,
    pub pages_discovered: usize,
    pub pages_scraped: usize,
    pub pages_failed: usize,
    pub candidates_extracted: usize,
    pub duplicates_removed: usize,
    pub contacts_created: usize,
    pub contacts_updated: usize,
    pub contacts_failed: usize,
    pub strategy_counts: BTreeMap<String, usize>,
    pub started_at: DateTime<Utc>,
    pub completed_at: DateTime<Utc>,
    pub duration_ms: u64,
}

/// Result of `scrape_outlet`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScrapeReport {
    pub outlet_name: String,
    pub outlet_url: String,
    pub contacts_found: Vec<ScrapedContact>,
    pub scraping_metadata: ScrapingMetadata,
}

impl Pipeline {
    /// Scrape one outlet for a tenant.
    ///
    /// Fetch failures only shrink the result; the call fails only for an
    /// unusable URL or when the outlet record cannot be stored.
    pub async fn scrape_outlet(&self, outlet_url: &str, tenant_id: &str) -> Result<ScrapeReport> {
        let Some(origin) = normalize_origin(outlet_url) else {
            bail!("not a valid outlet url: {outlet_url}");
        };
        let started_at = Utc::now();
        let timer = Instant::now();
        info!("scraping {origin} for tenant {tenant_id}");

        let outlet = self.resolve_outlet(&origin, tenant_id).await?;

        let located = locate_staff_pages(&self.http, &origin).await;
        let pages_discovered = located.urls.len();
        let max_pages = self.config.max_staff_pages.max(1);
        let pages = if located.fetched.is_empty() {
            let mut urls = located.urls;
            urls.truncate(max_pages);
            self.http
                .get_many(&urls, PAGE_CONCURRENCY, self.config.fetch_timeout_ms)
                .await
        } else {
            let mut fetched = located.fetched;
            fetched.truncate(max_pages);
            fetched
        };

        let mut pages_failed = 0;
        let mut candidates = Vec::new();
        for page in &pages {
            if !page.ok {
                pages_failed += 1;
                continue;
            }
            candidates.extend(extract_contacts(&page.body, &page.final_url));
        }
        let candidates_extracted = candidates.len();

        let mut strategy_counts = BTreeMap::new();
        for c in &candidates {
            *strategy_counts.entry(c.strategy.as_str().to_string()).or_insert(0) += 1;
        }

        let (unique, duplicates_removed) = dedup::dedup_candidates(candidates);

        let mut contacts_found = Vec::with_capacity(unique.len());
        let (mut created, mut updated, mut failed) = (0, 0, 0);
        for candidate in unique {
            let new = to_new_contact(&candidate, &outlet.id);
            match self.store.upsert_contact(tenant_id, &new) {
                Ok((contact_id, outcome)) => {
                    let was_created = outcome == UpsertOutcome::Created;
                    if was_created {
                        created += 1;
                    } else {
                        updated += 1;
                    }
                    contacts_found.push(ScrapedContact {
                        contact_id,
                        created: was_created,
                        candidate,
                    });
                }
                Err(e) => {
                    failed += 1;
                    warn!("failed to store {} from {}: {e:#}", candidate.name, candidate.source_url);
                }
            }
        }

        let duration_ms = timer.elapsed().as_millis() as u64;
        info!(
            "scraped {origin}: {} pages, {candidates_extracted} candidates, {created} created, {updated} updated in {duration_ms}ms",
            pages.len()
        );

        Ok(ScrapeReport {
            outlet_name: outlet.name.clone(),
            outlet_url: origin,
            contacts_found,
            scraping_metadata: ScrapingMetadata {
                outlet_id: outlet.id,
                locator_tier: located.tier,
                pages_discovered,
                pages_scraped: pages.len() - pages_failed,
                pages_failed,
                candidates_extracted,
                duplicates_removed,
                contacts_created: created,
                contacts_updated: updated,
                contacts_failed: failed,
                strategy_counts,
                started_at,
                completed_at: Utc::now(),
                duration_ms,
            },
        })
    }

    /// Find or create the outlet for an origin, resolving its display name
    /// from the landing page when it is new or still unnamed.
    async fn resolve_outlet(&self, origin: &str, tenant_id: &str) -> Result<Outlet> {
        let host = bare_host(origin);
        let existing = self.store.find_outlet_by_url(tenant_id, origin)?;
        if let Some(outlet) = &existing {
            if outlet.name != host {
                return Ok(outlet.clone());
            }
        }

        let landing = self.http.fetch(origin).await;
        let display_name = landing
            .ok
            .then(|| page_display_name(&landing.body))
            .flatten();

        match existing {
            Some(mut outlet) => {
                if let Some(name) = display_name {
                    self.store.set_outlet_name(tenant_id, &outlet.id, &name)?;
                    outlet.name = name;
                }
                Ok(outlet)
            }
            None => {
                let outlet = Outlet {
                    id: uuid::Uuid::new_v4().to_string(),
                    tenant_id: tenant_id.to_string(),
                    url: origin.to_string(),
                    outlet_type: classify_outlet_type(origin, display_name.as_deref()).to_string(),
                    name: display_name.unwrap_or(host),
                    category: "news".to_string(),
                    discovery_method: "scrape".to_string(),
                    verification_status: "pending".to_string(),
                    domain_authority: None,
                    monthly_traffic: None,
                    created_at: Utc::now(),
                };
                self.store.insert_outlet_if_absent(&outlet)
            }
        }
    }
}

fn to_new_contact(c: &ContactCandidate, outlet_id: &str) -> NewContact {
    NewContact {
        outlet_id: outlet_id.to_string(),
        first_name: c.first_name().to_string(),
        last_name: c.last_name(),
        email: c.email.clone(),
        title: c.title.clone(),
        bio: c.bio.clone(),
        image_url: c.image_url.clone(),
        profile_url: c.profile_url.clone(),
        twitter_handle: c.social.twitter.clone(),
        linkedin_url: c.social.linkedin.clone(),
        personal_website: c.social.personal_website.clone(),
        beat: c.beat.clone(),
        confidence_score: c.confidence,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::extraction::candidate::{ExtractionStrategy, SocialLinks};

    #[test]
    fn test_to_new_contact_splits_name() {
        let c = ContactCandidate {
            name: "Mary Ann van Dyke".to_string(),
            title: Some("Politics Editor".to_string()),
            email: Some("mary@outlet.com".to_string()),
            bio: None,
            image_url: None,
            profile_url: None,
            social: SocialLinks {
                twitter: Some("maryvd".to_string()),
                ..Default::default()
            },
            beat: Some("politics".to_string()),
            confidence: 80,
            strategy: ExtractionStrategy::StructuredSection,
            source_url: "https://outlet.com/staff".to_string(),
        };
        let new = to_new_contact(&c, "o1");
        assert_eq!(new.first_name, "Mary");
        assert_eq!(new.last_name, "Ann van Dyke");
        assert_eq!(new.twitter_handle.as_deref(), Some("maryvd"));
        assert_eq!(new.confidence_score, 80);
        assert_eq!(new.outlet_id, "o1");
    }
}
