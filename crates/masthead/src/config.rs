//! Runtime configuration read from `MASTHEAD_*` environment variables.

use std::path::PathBuf;
use std::time::Duration;

/// Browser-like identity sent with every outbound request.
pub const DEFAULT_USER_AGENT: &str = "Mozilla/5.0 (Macintosh; Intel Mac OS X 10_15_7) \
AppleWebKit/537.36 (KHTML, like Gecko) Chrome/124.0 Safari/537.36";

/// News search endpoint returning RSS for a free-text query.
pub const DEFAULT_SEARCH_URL: &str = "https://news.google.com/rss/search";

/// Base URL for twitter/x profile pages.
pub const DEFAULT_TWITTER_BASE: &str = "https://x.com";

/// OpenAI-compatible chat completions base URL.
pub const DEFAULT_AI_BASE_URL: &str = "https://api.openai.com/v1";

pub const DEFAULT_AI_MODEL: &str = "gpt-4o-mini";

/// Score cut-offs mapping a fused verification score to a status.
///
/// The defaults are hand-tuned; they carry no statistical meaning.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StatusThresholds {
    pub verified: u8,
    pub likely_valid: u8,
    pub questionable: u8,
}

impl Default for StatusThresholds {
    fn default() -> Self {
        Self {
            verified: 80,
            likely_valid: 60,
            questionable: 30,
        }
    }
}

/// Batch size and inter-batch cooldown for one pipeline.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BatchPolicy {
    pub batch_size: usize,
    pub cooldown: Duration,
}

/// Credentials and model for the external categorization capability.
#[derive(Debug, Clone)]
pub struct AiConfig {
    pub api_key: String,
    pub base_url: String,
    pub model: String,
}

/// Full runtime configuration.
#[derive(Debug, Clone)]
pub struct Config {
    pub db_path: PathBuf,
    pub bind: String,
    pub user_agent: String,
    pub fetch_timeout_ms: u64,
    pub max_staff_pages: usize,
    pub verification: BatchPolicy,
    pub intelligence: BatchPolicy,
    pub thresholds: StatusThresholds,
    pub search_url: String,
    pub twitter_base: String,
    pub ai: Option<AiConfig>,
    pub ledger_path: Option<PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            db_path: default_db_path(),
            bind: "127.0.0.1:8787".to_string(),
            user_agent: DEFAULT_USER_AGENT.to_string(),
            fetch_timeout_ms: 12_000,
            max_staff_pages: 10,
            verification: BatchPolicy {
                batch_size: 5,
                cooldown: Duration::from_millis(1000),
            },
            intelligence: BatchPolicy {
                batch_size: 3,
                cooldown: Duration::from_millis(2000),
            },
            thresholds: StatusThresholds::default(),
            search_url: DEFAULT_SEARCH_URL.to_string(),
            twitter_base: DEFAULT_TWITTER_BASE.to_string(),
            ai: None,
            ledger_path: None,
        }
    }
}

impl Config {
    /// Build a configuration from the process environment.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build a configuration from an arbitrary key lookup.
    ///
    /// Unparseable numeric values fall back to their defaults.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();
        let num = |key: &str, default: u64| -> u64 {
            lookup(key)
                .and_then(|v| v.trim().parse().ok())
                .unwrap_or(default)
        };
        let threshold = |key: &str, default: u8| -> u8 {
            lookup(key)
                .and_then(|v| v.trim().parse::<u8>().ok())
                .map(|v| v.min(100))
                .unwrap_or(default)
        };

        let ai = lookup("MASTHEAD_AI_API_KEY")
            .or_else(|| lookup("OPENAI_API_KEY"))
            .filter(|k| !k.trim().is_empty())
            .map(|api_key| AiConfig {
                api_key,
                base_url: lookup("MASTHEAD_AI_BASE_URL")
                    .unwrap_or_else(|| DEFAULT_AI_BASE_URL.to_string()),
                model: lookup("MASTHEAD_AI_MODEL").unwrap_or_else(|| DEFAULT_AI_MODEL.to_string()),
            });

        Self {
            db_path: lookup("MASTHEAD_DB")
                .map(PathBuf::from)
                .unwrap_or(defaults.db_path),
            bind: lookup("MASTHEAD_BIND").unwrap_or(defaults.bind),
            user_agent: lookup("MASTHEAD_USER_AGENT").unwrap_or(defaults.user_agent),
            fetch_timeout_ms: num("MASTHEAD_FETCH_TIMEOUT_MS", defaults.fetch_timeout_ms),
            max_staff_pages: num("MASTHEAD_MAX_STAFF_PAGES", defaults.max_staff_pages as u64)
                .max(1) as usize,
            verification: BatchPolicy {
                batch_size: num(
                    "MASTHEAD_VERIFY_BATCH_SIZE",
                    defaults.verification.batch_size as u64,
                )
                .max(1) as usize,
                cooldown: Duration::from_millis(num(
                    "MASTHEAD_VERIFY_COOLDOWN_MS",
                    defaults.verification.cooldown.as_millis() as u64,
                )),
            },
            intelligence: BatchPolicy {
                batch_size: num(
                    "MASTHEAD_INTEL_BATCH_SIZE",
                    defaults.intelligence.batch_size as u64,
                )
                .max(1) as usize,
                cooldown: Duration::from_millis(num(
                    "MASTHEAD_INTEL_COOLDOWN_MS",
                    defaults.intelligence.cooldown.as_millis() as u64,
                )),
            },
            thresholds: StatusThresholds {
                verified: threshold("MASTHEAD_THRESHOLD_VERIFIED", defaults.thresholds.verified),
                likely_valid: threshold(
                    "MASTHEAD_THRESHOLD_LIKELY",
                    defaults.thresholds.likely_valid,
                ),
                questionable: threshold(
                    "MASTHEAD_THRESHOLD_QUESTIONABLE",
                    defaults.thresholds.questionable,
                ),
            },
            search_url: lookup("MASTHEAD_SEARCH_URL").unwrap_or(defaults.search_url),
            twitter_base: lookup("MASTHEAD_TWITTER_BASE").unwrap_or(defaults.twitter_base),
            ai,
            ledger_path: lookup("MASTHEAD_LEDGER").map(PathBuf::from),
        }
    }
}

/// Default database location: `~/.masthead/masthead.db`.
pub fn default_db_path() -> PathBuf {
    dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("/tmp"))
        .join(".masthead")
        .join("masthead.db")
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_defaults_without_env() {
        let config = Config::from_lookup(|_| None);
        assert_eq!(config.verification.batch_size, 5);
        assert_eq!(config.intelligence.batch_size, 3);
        assert!(config.intelligence.cooldown > config.verification.cooldown);
        assert_eq!(config.thresholds, StatusThresholds::default());
        assert!(config.ai.is_none());
        assert!(config.db_path.ends_with("masthead.db"));
    }

    #[test]
    fn test_overrides_and_bad_numbers() {
        let config = Config::from_lookup(lookup_from(&[
            ("MASTHEAD_VERIFY_BATCH_SIZE", "8"),
            ("MASTHEAD_INTEL_COOLDOWN_MS", "not-a-number"),
            ("MASTHEAD_THRESHOLD_VERIFIED", "250"),
            ("OPENAI_API_KEY", "sk-test"),
        ]));
        assert_eq!(config.verification.batch_size, 8);
        assert_eq!(config.intelligence.cooldown, Duration::from_millis(2000));
        assert_eq!(config.thresholds.verified, 100);
        let ai = config.ai.unwrap();
        assert_eq!(ai.api_key, "sk-test");
        assert_eq!(ai.model, DEFAULT_AI_MODEL);
    }

    #[test]
    fn test_zero_batch_size_is_clamped() {
        let config = Config::from_lookup(lookup_from(&[("MASTHEAD_INTEL_BATCH_SIZE", "0")]));
        assert_eq!(config.intelligence.batch_size, 1);
    }
}
