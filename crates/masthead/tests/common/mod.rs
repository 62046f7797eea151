#![allow(dead_code)]

use anyhow::Result;
use async_trait::async_trait;
use chrono::Utc;
use masthead::config::Config;
use masthead::pipeline::Pipeline;
use masthead::store::sqlite::SqliteStore;
use masthead::store::{ContactStore, NewContact, Outlet};
use masthead::verification::content::PublicationSearch;
use masthead::verification::email::{DomainPresence, MxResolver};
use masthead::verification::Publication;
use std::sync::Arc;
use std::time::Duration;

pub struct StaticMx(pub bool);

#[async_trait]
impl MxResolver for StaticMx {
    async fn has_mx(&self, _domain: &str) -> Result<bool> {
        Ok(self.0)
    }
}

pub struct StaticPresence(pub bool);

#[async_trait]
impl DomainPresence for StaticPresence {
    async fn answers(&self, _domain: &str) -> bool {
        self.0
    }
}

/// Returns `count` fresh publications for any query.
pub struct StubSearch(pub usize);

#[async_trait]
impl PublicationSearch for StubSearch {
    async fn search(&self, query: &str) -> Result<Vec<Publication>> {
        Ok((0..self.0)
            .map(|i| Publication {
                title: format!("{query} story {i}"),
                url: Some(format!("https://news.example/{i}")),
                published_at: Some(Utc::now()),
            })
            .collect())
    }
}

pub fn test_config() -> Config {
    let mut config = Config::default();
    config.fetch_timeout_ms = 2_000;
    config.verification.cooldown = Duration::ZERO;
    config.intelligence.cooldown = Duration::ZERO;
    config.ai = None;
    config
}

/// Pipeline over an in-memory store with offline capabilities.
pub fn test_pipeline() -> (Pipeline, Arc<SqliteStore>) {
    let store = Arc::new(SqliteStore::open_in_memory().unwrap());
    let pipeline = Pipeline::new(test_config(), store.clone())
        .unwrap()
        .with_mx(Arc::new(StaticMx(true)))
        .with_presence(Arc::new(StaticPresence(false)))
        .with_search(Arc::new(StubSearch(0)))
        .with_categorizer(None);
    (pipeline, store)
}

pub fn seed_outlet(store: &SqliteStore, tenant_id: &str) -> Outlet {
    store
        .insert_outlet_if_absent(&Outlet {
            id: uuid::Uuid::new_v4().to_string(),
            tenant_id: tenant_id.to_string(),
            url: "https://harborgazette.com".to_string(),
            name: "Harbor Gazette".to_string(),
            outlet_type: "publication".to_string(),
            category: "news".to_string(),
            discovery_method: "manual".to_string(),
            verification_status: "pending".to_string(),
            domain_authority: None,
            monthly_traffic: None,
            created_at: Utc::now(),
        })
        .unwrap()
}

pub fn seed_contact(store: &SqliteStore, tenant_id: &str, outlet_id: &str, first: &str, last: &str) -> String {
    let (id, _) = store
        .upsert_contact(
            tenant_id,
            &NewContact {
                outlet_id: outlet_id.to_string(),
                first_name: first.to_string(),
                last_name: last.to_string(),
                email: Some(format!("{}.{}@gmail.com", first.to_lowercase(), last.to_lowercase())),
                title: Some("Technology Reporter".to_string()),
                bio: Some("Covers software startups and cybersecurity.".to_string()),
                confidence_score: 60,
                ..Default::default()
            },
        )
        .unwrap();
    id
}
