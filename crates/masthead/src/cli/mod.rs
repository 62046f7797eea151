//! CLI subcommand implementations for the `masthead` binary.

pub mod categorize_cmd;
pub mod contacts_cmd;
pub mod output;
pub mod scrape_cmd;
pub mod serve;
pub mod verify_cmd;

use crate::config::Config;
use crate::pipeline::Pipeline;
use crate::store::sqlite::SqliteStore;
use anyhow::{Context, Result};
use std::sync::Arc;

/// Open the configured database and build a pipeline over it.
pub fn open_pipeline(config: Config) -> Result<Pipeline> {
    let store = SqliteStore::open(&config.db_path)
        .with_context(|| format!("failed to open database {}", config.db_path.display()))?;
    Pipeline::new(config, Arc::new(store))
}
