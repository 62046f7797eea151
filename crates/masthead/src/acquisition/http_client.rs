//! Document fetcher: plain HTTP GET/HEAD with a fixed identity and timeouts.
//!
//! Transport errors and non-2xx statuses are folded into `ok = false` so
//! callers can degrade to empty results instead of propagating failures.

use futures::stream::{self, StreamExt};
use std::time::Duration;
use tracing::debug;

/// A fetched page. `body` is empty whenever `ok` is false.
#[derive(Debug, Clone, Default)]
pub struct FetchedPage {
    /// The requested URL.
    pub url: String,
    /// URL after redirects.
    pub final_url: String,
    /// HTTP status code (0 if the request never completed).
    pub status: u16,
    pub body: String,
    pub ok: bool,
}

impl FetchedPage {
    fn failed(url: &str, status: u16) -> Self {
        Self {
            url: url.to_string(),
            final_url: url.to_string(),
            status,
            body: String::new(),
            ok: false,
        }
    }
}

/// Shared HTTP client. Cheap to clone.
#[derive(Debug, Clone)]
pub struct HttpClient {
    client: reqwest::Client,
    default_timeout_ms: u64,
}

impl HttpClient {
    /// Create a client sending `user_agent` on every request.
    pub fn new(user_agent: &str, default_timeout_ms: u64) -> anyhow::Result<Self> {
        let client = reqwest::Client::builder()
            .user_agent(user_agent)
            .redirect(reqwest::redirect::Policy::limited(5))
            .build()?;
        Ok(Self {
            client,
            default_timeout_ms,
        })
    }

    /// GET a URL. Never fails; check `ok` on the result.
    pub async fn get(&self, url: &str, timeout_ms: u64) -> FetchedPage {
        let resp = match self
            .client
            .get(url)
            .timeout(Duration::from_millis(timeout_ms))
            .send()
            .await
        {
            Ok(resp) => resp,
            Err(e) => {
                debug!("fetch {url} failed: {e}");
                return FetchedPage::failed(url, 0);
            }
        };

        let status = resp.status().as_u16();
        if !resp.status().is_success() {
            debug!("fetch {url} returned {status}");
            return FetchedPage::failed(url, status);
        }

        let final_url = resp.url().to_string();
        match resp.text().await {
            Ok(body) => FetchedPage {
                url: url.to_string(),
                final_url,
                status,
                body,
                ok: true,
            },
            Err(e) => {
                debug!("reading body of {url} failed: {e}");
                FetchedPage::failed(url, status)
            }
        }
    }

    /// GET with the client's default timeout.
    pub async fn fetch(&self, url: &str) -> FetchedPage {
        self.get(url, self.default_timeout_ms).await
    }

    /// GET many URLs with bounded concurrency. Output order matches input order.
    pub async fn get_many(
        &self,
        urls: &[String],
        concurrency: usize,
        timeout_ms: u64,
    ) -> Vec<FetchedPage> {
        let fetches: Vec<_> = urls.iter().map(|url| self.get(url, timeout_ms)).collect();
        stream::iter(fetches)
            .buffered(concurrency.max(1))
            .collect()
            .await
    }

    /// HEAD a URL; true when the server answers with a non-error status.
    pub async fn head(&self, url: &str, timeout_ms: u64) -> bool {
        match self
            .client
            .head(url)
            .timeout(Duration::from_millis(timeout_ms))
            .send()
            .await
        {
            Ok(resp) => !resp.status().is_client_error() && !resp.status().is_server_error(),
            Err(e) => {
                debug!("head {url} failed: {e}");
                false
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn client() -> HttpClient {
        HttpClient::new("masthead-test", 5_000).unwrap()
    }

    #[tokio::test]
    async fn test_get_success() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/staff"))
            .respond_with(ResponseTemplate::new(200).set_body_string("<h1>Our staff</h1>"))
            .mount(&server)
            .await;

        let page = client().get(&format!("{}/staff", server.uri()), 5_000).await;
        assert!(page.ok);
        assert_eq!(page.status, 200);
        assert!(page.body.contains("Our staff"));
    }

    #[tokio::test]
    async fn test_non_success_is_not_ok() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(503).set_body_string("down"))
            .mount(&server)
            .await;

        let page = client().get(&format!("{}/x", server.uri()), 5_000).await;
        assert!(!page.ok);
        assert_eq!(page.status, 503);
        assert!(page.body.is_empty());
    }

    #[tokio::test]
    async fn test_transport_error_is_not_ok() {
        let page = client().get("http://127.0.0.1:1/unreachable", 1_000).await;
        assert!(!page.ok);
        assert_eq!(page.status, 0);
    }

    #[tokio::test]
    async fn test_get_many_preserves_order() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/a"))
            .respond_with(ResponseTemplate::new(200).set_body_string("a"))
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .and(path("/b"))
            .respond_with(ResponseTemplate::new(200).set_body_string("b"))
            .mount(&server)
            .await;

        let urls = vec![
            format!("{}/b", server.uri()),
            format!("{}/missing", server.uri()),
            format!("{}/a", server.uri()),
        ];
        let pages = client().get_many(&urls, 3, 5_000).await;
        assert_eq!(pages.len(), 3);
        assert_eq!(pages[0].body, "b");
        assert!(!pages[1].ok);
        assert_eq!(pages[2].body, "a");
    }

    #[tokio::test]
    async fn test_head() {
        let server = MockServer::start().await;
        Mock::given(method("HEAD"))
            .and(path("/"))
            .respond_with(ResponseTemplate::new(200))
            .mount(&server)
            .await;

        assert!(client().head(&format!("{}/", server.uri()), 5_000).await);
        assert!(!client().head(&format!("{}/nope", server.uri()), 5_000).await);
    }
}
