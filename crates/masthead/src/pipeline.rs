//! Shared context for the scrape, verification and intelligence pipelines.

use crate::acquisition::http_client::HttpClient;
use crate::config::Config;
use crate::intelligence::ai_client::OpenAiCategorizer;
use crate::intelligence::categorize::Categorizer;
use crate::store::ContactStore;
use crate::verification::content::{FeedSearch, PublicationSearch};
use crate::verification::email::{DnsMxResolver, DomainPresence, HeadPresence, MxResolver};
use anyhow::Result;
use std::sync::Arc;

/// Everything a pipeline run needs: configuration, the HTTP client, the store
/// and the pluggable external capabilities.
///
/// Cheap to clone; the HTTP server keeps one and clones it per request.
#[derive(Clone)]
pub struct Pipeline {
    pub config: Config,
    pub http: HttpClient,
    pub store: Arc<dyn ContactStore>,
    pub mx: Arc<dyn MxResolver>,
    pub presence: Arc<dyn DomainPresence>,
    pub search: Arc<dyn PublicationSearch>,
    /// `None` means the rule-based categorizer is always used.
    pub categorizer: Option<Arc<dyn Categorizer>>,
}

impl Pipeline {
    /// Build a pipeline with the default capabilities: system DNS for MX
    /// lookups, an HTTPS HEAD for domain presence, the configured RSS search
    /// endpoint, and an OpenAI-compatible categorizer when an API key is
    /// configured.
    pub fn new(config: Config, store: Arc<dyn ContactStore>) -> Result<Self> {
        let http = HttpClient::new(&config.user_agent, config.fetch_timeout_ms)?;
        let search = FeedSearch::new(http.clone(), &config.search_url);
        let categorizer: Option<Arc<dyn Categorizer>> = match &config.ai {
            Some(ai) => Some(Arc::new(OpenAiCategorizer::new(ai.clone())?)),
            None => None,
        };
        Ok(Self {
            mx: Arc::new(DnsMxResolver::from_system()),
            presence: Arc::new(HeadPresence::new(http.clone())),
            search: Arc::new(search),
            categorizer,
            http,
            store,
            config,
        })
    }

    pub fn with_mx(mut self, mx: Arc<dyn MxResolver>) -> Self {
        self.mx = mx;
        self
    }

    pub fn with_presence(mut self, presence: Arc<dyn DomainPresence>) -> Self {
        self.presence = presence;
        self
    }

    pub fn with_search(mut self, search: Arc<dyn PublicationSearch>) -> Self {
        self.search = search;
        self
    }

    pub fn with_categorizer(mut self, categorizer: Option<Arc<dyn Categorizer>>) -> Self {
        self.categorizer = categorizer;
        self
    }
}
