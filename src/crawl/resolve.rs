// src/crawl/resolve.rs
// =============================================================================
// Resolving hrefs and deciding which ones belong to the seed's site.
//
// Resolution follows the browser rules implemented by the `url` crate:
//   base = "https://example.com/blog/post"
//   href = "/docs"       -> "https://example.com/docs"
//   href = "../about"    -> "https://example.com/about"
//   href = "other"       -> "https://example.com/blog/other"
//   href = "//cdn.x/a"   -> "https://cdn.x/a"
//
// Same-domain means the hostname strings are identical. "www.example.com"
// and "example.com" are different sites here, and scheme and port are not
// compared at all.
// =============================================================================

use url::Url;

/// Resolves `href` against `base`
///
/// Returns None for an empty or malformed href; callers skip those silently.
/// A whitespace-only href is not empty: the parser strips it and it
/// resolves to the base page, as in a browser.
pub fn resolve(base: &Url, href: &str) -> Option<Url> {
    // An empty href would otherwise resolve to the base page itself
    if href.is_empty() {
        return None;
    }

    base.join(href).ok()
}

/// True when both URLs have a host and the hosts are byte-for-byte equal
pub fn is_same_domain(candidate: &Url, base: &Url) -> bool {
    match (candidate.host_str(), base.host_str()) {
        (Some(candidate_host), Some(base_host)) => candidate_host == base_host,
        _ => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn base() -> Url {
        Url::parse("https://example.com/blog/post").unwrap()
    }

    #[test]
    fn test_resolve_absolute_path() {
        let url = resolve(&base(), "/docs").unwrap();
        assert_eq!(url.as_str(), "https://example.com/docs");
    }

    #[test]
    fn test_resolve_relative_path() {
        let url = resolve(&base(), "other").unwrap();
        assert_eq!(url.as_str(), "https://example.com/blog/other");

        let url = resolve(&base(), "../about").unwrap();
        assert_eq!(url.as_str(), "https://example.com/about");
    }

    #[test]
    fn test_resolve_absolute_url() {
        let url = resolve(&base(), "https://other.com").unwrap();
        assert_eq!(url.as_str(), "https://other.com/");
    }

    #[test]
    fn test_resolve_protocol_relative() {
        let url = resolve(&base(), "//cdn.example.net/lib.js").unwrap();
        assert_eq!(url.as_str(), "https://cdn.example.net/lib.js");
    }

    #[test]
    fn test_resolve_empty_href() {
        assert_eq!(resolve(&base(), ""), None);
    }

    #[test]
    fn test_resolve_whitespace_href_is_base() {
        let url = resolve(&base(), "   ").unwrap();
        assert_eq!(url.as_str(), "https://example.com/blog/post");

        let url = resolve(&base(), " /docs \n").unwrap();
        assert_eq!(url.as_str(), "https://example.com/docs");
    }

    #[test]
    fn test_resolve_malformed_href() {
        assert_eq!(resolve(&base(), "http://"), None);
        assert_eq!(resolve(&base(), "https://exa mple.com/"), None);
    }

    #[test]
    fn test_same_domain_exact_host() {
        let a = Url::parse("http://example.com:8080/x").unwrap();
        assert!(is_same_domain(&a, &base()));
    }

    #[test]
    fn test_subdomain_is_different_domain() {
        let a = Url::parse("https://www.example.com/").unwrap();
        assert!(!is_same_domain(&a, &base()));
    }

    #[test]
    fn test_hostless_url_is_never_same_domain() {
        let a = Url::parse("mailto:someone@example.com").unwrap();
        assert!(!is_same_domain(&a, &base()));
    }
}
