//! URL helpers: outlet origin normalization, host extraction, href resolution.

use url::Url;

/// Normalize an outlet address to `scheme://host[:port]`.
///
/// Adds `https://` when no scheme is given and strips path, query and fragment.
/// Returns `None` for inputs that do not carry a host.
pub fn normalize_origin(input: &str) -> Option<String> {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        return None;
    }
    let with_scheme = if trimmed.contains("://") {
        trimmed.to_string()
    } else {
        format!("https://{trimmed}")
    };
    let url = Url::parse(&with_scheme).ok()?;
    if !matches!(url.scheme(), "http" | "https") {
        return None;
    }
    let host = url.host_str()?;
    Some(match url.port() {
        Some(port) => format!("{}://{}:{}", url.scheme(), host, port),
        None => format!("{}://{}", url.scheme(), host),
    })
}

/// Host of a URL, lower-cased, without a leading `www.`.
pub fn bare_host(url: &str) -> String {
    let host = Url::parse(url)
        .ok()
        .and_then(|u| u.host_str().map(str::to_lowercase))
        .unwrap_or_else(|| {
            let rest = url
                .strip_prefix("https://")
                .or_else(|| url.strip_prefix("http://"))
                .unwrap_or(url);
            rest.split(['/', ':', '?', '#'])
                .next()
                .unwrap_or("")
                .to_lowercase()
        });
    host.strip_prefix("www.").map(str::to_string).unwrap_or(host)
}

/// Resolve `href` against `base`. Drops fragments; rejects non-http schemes.
pub fn resolve_href(base: &str, href: &str) -> Option<String> {
    let href = href.trim();
    if href.is_empty() || href.starts_with('#') {
        return None;
    }
    let lower = href.to_lowercase();
    if lower.starts_with("mailto:") || lower.starts_with("javascript:") || lower.starts_with("tel:")
    {
        return None;
    }
    let base = Url::parse(base).ok()?;
    let mut resolved = base.join(href).ok()?;
    if !matches!(resolved.scheme(), "http" | "https") {
        return None;
    }
    resolved.set_fragment(None);
    Some(resolved.to_string())
}

/// True when both URLs share a host (ignoring `www.`).
pub fn same_host(a: &str, b: &str) -> bool {
    let ha = bare_host(a);
    !ha.is_empty() && ha == bare_host(b)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_origin() {
        assert_eq!(
            normalize_origin("https://www.example.com/news/today?x=1#top").as_deref(),
            Some("https://www.example.com")
        );
        assert_eq!(
            normalize_origin("example.com/about").as_deref(),
            Some("https://example.com")
        );
        assert_eq!(
            normalize_origin("http://127.0.0.1:8080/staff").as_deref(),
            Some("http://127.0.0.1:8080")
        );
        assert_eq!(normalize_origin("   "), None);
        assert_eq!(normalize_origin("ftp://example.com"), None);
    }

    #[test]
    fn test_bare_host() {
        assert_eq!(bare_host("https://www.NYTimes.com/section"), "nytimes.com");
        assert_eq!(bare_host("techcrunch.com/about"), "techcrunch.com");
    }

    #[test]
    fn test_resolve_href() {
        let base = "https://example.com/about/";
        assert_eq!(
            resolve_href(base, "/staff").as_deref(),
            Some("https://example.com/staff")
        );
        assert_eq!(
            resolve_href(base, "team#editors").as_deref(),
            Some("https://example.com/about/team")
        );
        assert_eq!(resolve_href(base, "mailto:jane@example.com"), None);
        assert_eq!(resolve_href(base, "#top"), None);
    }

    #[test]
    fn test_same_host() {
        assert!(same_host("https://www.example.com/a", "https://example.com/b"));
        assert!(!same_host("https://example.com", "https://twitter.com/jane"));
    }
}
