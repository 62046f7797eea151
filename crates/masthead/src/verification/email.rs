//! Heuristic email deliverability.
//!
//! No SMTP conversation takes place; the signals are format, domain
//! blacklists, role prefixes, MX presence and whether the domain answers a
//! web request.

use super::types::{Deliverability, EmailVerification};
use crate::acquisition::http_client::HttpClient;
use anyhow::Result;
use async_trait::async_trait;
use regex::Regex;
use std::sync::LazyLock;
use std::time::Duration;
use tracing::{debug, warn};
use trust_dns_resolver::config::{ResolverConfig, ResolverOpts};
use trust_dns_resolver::TokioAsyncResolver;

static EMAIL_FORMAT: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[a-zA-Z0-9._%+-]+@[a-zA-Z0-9.-]+\.[a-zA-Z]{2,}$").unwrap());

const DISPOSABLE_DOMAINS: &[&str] = &[
    "mailinator.com",
    "guerrillamail.com",
    "10minutemail.com",
    "tempmail.com",
    "temp-mail.org",
    "throwaway.email",
    "yopmail.com",
    "trashmail.com",
    "sharklasers.com",
    "getnada.com",
    "dispostable.com",
    "maildrop.cc",
];

const ROLE_PREFIXES: &[&str] = &[
    "info", "admin", "contact", "support", "sales", "news", "newsroom", "editor", "editors",
    "tips", "press", "hello", "office", "webmaster", "noreply", "no-reply",
];

/// Mailbox providers assumed to accept mail for any well-formed address.
const MAJOR_PROVIDERS: &[&str] = &[
    "gmail.com",
    "googlemail.com",
    "outlook.com",
    "hotmail.com",
    "live.com",
    "yahoo.com",
    "icloud.com",
    "me.com",
    "aol.com",
    "protonmail.com",
    "proton.me",
];

const FORMAT_POINTS: u8 = 20;
const MX_POINTS: u8 = 30;
const NOT_DISPOSABLE_POINTS: u8 = 20;
const NOT_ROLE_POINTS: u8 = 10;
const DELIVERABLE_POINTS: u8 = 20;
const LIKELY_DELIVERABLE_POINTS: u8 = 10;

const HEAD_TIMEOUT_MS: u64 = 5_000;
const MX_TIMEOUT: Duration = Duration::from_secs(5);

/// MX existence lookup.
#[async_trait]
pub trait MxResolver: Send + Sync {
    /// True when the domain publishes at least one MX record.
    async fn has_mx(&self, domain: &str) -> Result<bool>;
}

/// MX lookups through the system resolver.
pub struct DnsMxResolver {
    resolver: TokioAsyncResolver,
}

impl DnsMxResolver {
    /// Use the system resolver configuration, or public defaults when it
    /// cannot be read.
    pub fn from_system() -> Self {
        let resolver = TokioAsyncResolver::tokio_from_system_conf().unwrap_or_else(|e| {
            warn!("system resolver unavailable ({e}), using default resolver config");
            TokioAsyncResolver::tokio(ResolverConfig::default(), ResolverOpts::default())
        });
        Self { resolver }
    }
}

#[async_trait]
impl MxResolver for DnsMxResolver {
    async fn has_mx(&self, domain: &str) -> Result<bool> {
        let lookup = tokio::time::timeout(MX_TIMEOUT, self.resolver.mx_lookup(domain)).await??;
        Ok(lookup.iter().next().is_some())
    }
}

/// Whether a mail domain also runs a live website.
#[async_trait]
pub trait DomainPresence: Send + Sync {
    async fn answers(&self, domain: &str) -> bool;
}

/// HEAD request against a URL built from a template; `{domain}` is replaced
/// by the mail domain.
pub struct HeadPresence {
    http: HttpClient,
    url_template: String,
}

impl HeadPresence {
    pub const DEFAULT_TEMPLATE: &'static str = "https://{domain}";

    pub fn new(http: HttpClient) -> Self {
        Self::with_url_template(http, Self::DEFAULT_TEMPLATE)
    }

    pub fn with_url_template(http: HttpClient, url_template: &str) -> Self {
        Self {
            http,
            url_template: url_template.to_string(),
        }
    }

    fn url_for(&self, domain: &str) -> String {
        self.url_template.replace("{domain}", domain)
    }
}

#[async_trait]
impl DomainPresence for HeadPresence {
    async fn answers(&self, domain: &str) -> bool {
        self.http.head(&self.url_for(domain), HEAD_TIMEOUT_MS).await
    }
}

/// Split a well-formed address into its lower-cased local part and domain.
pub fn parse_address(email: &str) -> Option<(String, String)> {
    let email = email.trim().to_lowercase();
    if !EMAIL_FORMAT.is_match(&email) {
        return None;
    }
    let (local, domain) = email.rsplit_once('@')?;
    Some((local.to_string(), domain.to_string()))
}

pub fn is_disposable(domain: &str) -> bool {
    DISPOSABLE_DOMAINS.contains(&domain)
}

pub fn is_role_based(local: &str) -> bool {
    ROLE_PREFIXES.contains(&local)
}

pub fn is_major_provider(domain: &str) -> bool {
    MAJOR_PROVIDERS.contains(&domain)
}

/// Additive confidence over the email signals, capped at 100.
pub fn email_confidence(
    format_valid: bool,
    mx_found: bool,
    disposable: bool,
    role_based: bool,
    deliverability: Deliverability,
) -> u8 {
    if !format_valid {
        return 0;
    }
    let mut score = FORMAT_POINTS;
    if mx_found {
        score += MX_POINTS;
    }
    if !disposable {
        score += NOT_DISPOSABLE_POINTS;
    }
    if !role_based {
        score += NOT_ROLE_POINTS;
    }
    score += match deliverability {
        Deliverability::Deliverable => DELIVERABLE_POINTS,
        Deliverability::LikelyDeliverable => LIKELY_DELIVERABLE_POINTS,
        Deliverability::Unknown => 0,
    };
    score.min(100)
}

/// Run every email check. Lookup failures count as a missing signal.
pub async fn verify_email(
    email: Option<&str>,
    mx: &dyn MxResolver,
    presence: &dyn DomainPresence,
) -> EmailVerification {
    let Some(raw) = email.filter(|e| !e.trim().is_empty()) else {
        return EmailVerification::empty(None);
    };
    let Some((local, domain)) = parse_address(raw) else {
        debug!("malformed email {raw}");
        return EmailVerification::empty(Some(raw.to_string()));
    };

    let disposable = is_disposable(&domain);
    let role_based = is_role_based(&local);
    let mx_found = match mx.has_mx(&domain).await {
        Ok(found) => found,
        Err(e) => {
            debug!("mx lookup for {domain} failed: {e:#}");
            false
        }
    };

    let deliverability = if is_major_provider(&domain) {
        Deliverability::Deliverable
    } else if presence.answers(&domain).await {
        Deliverability::LikelyDeliverable
    } else {
        Deliverability::Unknown
    };

    EmailVerification {
        email: Some(format!("{local}@{domain}")),
        format_valid: true,
        confidence: email_confidence(true, mx_found, disposable, role_based, deliverability),
        domain: Some(domain),
        is_disposable: disposable,
        is_role_based: role_based,
        mx_found,
        deliverability,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use anyhow::anyhow;
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    struct StaticMx(Option<bool>);

    #[async_trait]
    impl MxResolver for StaticMx {
        async fn has_mx(&self, _domain: &str) -> Result<bool> {
            self.0.ok_or_else(|| anyhow!("resolver offline"))
        }
    }

    fn client() -> HttpClient {
        HttpClient::new("masthead-test", 2_000).unwrap()
    }

    fn presence(base: &str) -> HeadPresence {
        HeadPresence::with_url_template(client(), &format!("{base}/{{domain}}"))
    }

    async fn site_for(domain: &str, status: u16) -> MockServer {
        let server = MockServer::start().await;
        Mock::given(method("HEAD"))
            .and(path(format!("/{domain}")))
            .respond_with(ResponseTemplate::new(status))
            .expect(1)
            .mount(&server)
            .await;
        server
    }

    #[test]
    fn test_parse_address() {
        assert_eq!(
            parse_address(" Jane.Doe@Outlet.COM "),
            Some(("jane.doe".to_string(), "outlet.com".to_string()))
        );
        assert_eq!(parse_address("not-an-email"), None);
        assert_eq!(parse_address("a@b"), None);
    }

    #[test]
    fn test_confidence_table() {
        use Deliverability::*;
        assert_eq!(email_confidence(true, true, false, false, Deliverable), 100);
        assert_eq!(email_confidence(true, true, false, false, LikelyDeliverable), 90);
        assert_eq!(email_confidence(true, false, false, true, Unknown), 40);
        assert_eq!(email_confidence(true, true, true, true, Unknown), 50);
        assert_eq!(email_confidence(false, true, false, false, Deliverable), 0);
    }

    #[test]
    fn test_blacklists() {
        assert!(is_disposable("mailinator.com"));
        assert!(!is_disposable("outlet.com"));
        assert!(is_role_based("newsroom"));
        assert!(!is_role_based("jane"));
    }

    #[test]
    fn test_default_template_uses_https() {
        assert_eq!(HeadPresence::new(client()).url_for("outlet.com"), "https://outlet.com");
    }

    #[tokio::test]
    async fn test_missing_and_malformed_email() {
        let web = HeadPresence::new(client());
        let none = verify_email(None, &StaticMx(Some(true)), &web).await;
        assert_eq!(none.confidence, 0);
        let bad = verify_email(Some("jane at outlet"), &StaticMx(Some(true)), &web).await;
        assert_eq!(bad.confidence, 0);
        assert!(!bad.format_valid);
    }

    #[tokio::test]
    async fn test_major_provider_is_deliverable() {
        let server = MockServer::start().await;
        let v = verify_email(Some("jane@gmail.com"), &StaticMx(Some(true)), &presence(&server.uri())).await;
        assert_eq!(v.deliverability, Deliverability::Deliverable);
        assert_eq!(v.confidence, 100);
    }

    #[tokio::test]
    async fn test_mx_failure_degrades() {
        let server = MockServer::start().await;
        let v = verify_email(Some("info@gmail.com"), &StaticMx(None), &presence(&server.uri())).await;
        assert!(!v.mx_found);
        assert!(v.is_role_based);
        // format 20 + not disposable 20 + deliverable 20
        assert_eq!(v.confidence, 60);
    }

    #[tokio::test]
    async fn test_live_site_is_likely_deliverable() {
        let server = site_for("harborgazette.com", 200).await;
        let v = verify_email(
            Some("jane@harborgazette.com"),
            &StaticMx(Some(true)),
            &presence(&server.uri()),
        )
        .await;
        assert_eq!(v.deliverability, Deliverability::LikelyDeliverable);
        // format 20 + mx 30 + not disposable 20 + not role 10 + likely 10
        assert_eq!(v.confidence, 90);
    }

    #[tokio::test]
    async fn test_dead_site_is_unknown() {
        let server = site_for("harborgazette.com", 503).await;
        let v = verify_email(
            Some("jane@harborgazette.com"),
            &StaticMx(Some(true)),
            &presence(&server.uri()),
        )
        .await;
        assert_eq!(v.deliverability, Deliverability::Unknown);
        assert_eq!(v.confidence, 80);
    }
}
