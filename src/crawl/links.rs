// src/crawl/links.rs
// =============================================================================
// Link discovery: fetch the seed page once and collect its same-domain links.
//
// How it works:
// 1. Validate the seed URL (no request is made for a bad one)
// 2. GET the page with a fixed User-Agent
// 3. Parse the HTML and walk every <a href> in document order
// 4. Resolve each href against the seed, keep it if it is on the same host
// 5. Drop repeats, keeping the first occurrence
//
// Only the seed page is read. Links are not followed any further.
// =============================================================================

use crate::checker::status_text;
use crate::config::CRAWLER_USER_AGENT;
use crate::crawl::resolve::{is_same_domain, resolve};
use crate::error::{AuditError, Result};
use reqwest::header::USER_AGENT;
use reqwest::Client;
use scraper::{Html, Selector};
use std::collections::HashSet;
use tracing::{debug, info, warn};
use url::Url;

/// Validates a seed URL
///
/// It must be non-empty, parse as an absolute URL, use http or https and have a host.
pub fn parse_seed(raw: &str) -> Result<Url> {
    let raw = raw.trim();
    if raw.is_empty() {
        return Err(AuditError::InvalidUrl("URL is required".to_string()));
    }

    let url = Url::parse(raw)
        .map_err(|e| AuditError::InvalidUrl(format!("Invalid URL format '{}': {}", raw, e)))?;

    if !matches!(url.scheme(), "http" | "https") {
        return Err(AuditError::InvalidUrl(format!(
            "Unsupported scheme '{}' in {}",
            url.scheme(),
            raw
        )));
    }

    if url.host_str().is_none() {
        return Err(AuditError::InvalidUrl(format!("URL has no host: {}", raw)));
    }

    Ok(url)
}

/// Fetches the seed page and returns its unique same-domain links
///
/// A non-2xx page is still parsed for links unless `strict_status` is set.
/// Only a transport failure, or an error page whose body can't be read,
/// aborts discovery.
pub async fn discover(client: &Client, seed: &Url, strict_status: bool) -> Result<Vec<String>> {
    info!("Fetching seed page {}", seed);

    let response = client
        .get(seed.as_str())
        .header(USER_AGENT, CRAWLER_USER_AGENT)
        .send()
        .await
        .map_err(AuditError::Fetch)?;

    let status = response.status();
    let reason = status_text(&response);
    let http_error = || AuditError::Http {
        status: status.as_u16(),
        status_text: reason.clone(),
    };

    let html = if status.is_success() {
        response.text().await.map_err(AuditError::Fetch)?
    } else if strict_status {
        return Err(http_error());
    } else {
        warn!("Seed page returned HTTP {}, parsing it anyway", status.as_u16());
        response.text().await.map_err(|_| http_error())?
    };

    debug!("Fetched HTML length: {}", html.len());

    let links = extract_same_domain_links(&html, seed);
    info!("Discovered {} same-domain link(s) on {}", links.len(), seed);

    Ok(links)
}

/// Extracts the unique same-domain links from `html`, in document order
///
/// Example:
///   html = `<a href="/a"></a><a href="https://other.com/b"></a><a href="/a"></a>`
///   base = "https://example.com"
///   result = ["https://example.com/a"]
pub fn extract_same_domain_links(html: &str, base: &Url) -> Vec<String> {
    let document = Html::parse_document(html);

    // Constant selector, known to be valid
    let selector = Selector::parse("a[href]").unwrap();

    let mut seen = HashSet::new();
    let mut links = Vec::new();

    for element in document.select(&selector) {
        let Some(href) = element.value().attr("href") else {
            continue;
        };

        let Some(resolved) = resolve(base, href) else {
            debug!("Skipping unresolvable href {:?}", href);
            continue;
        };

        if !is_same_domain(&resolved, base) {
            continue;
        }

        let absolute = String::from(resolved);
        if seen.insert(absolute.clone()) {
            links.push(absolute);
        }
    }

    links
}

// -----------------------------------------------------------------------------
// BEGINNER NOTES:
//
// 1. Why a HashSet next to the Vec?
//    - The Vec keeps document order, the HashSet answers "seen before?" in O(1)
//    - HashSet::insert returns false when the value was already there,
//      so one call both checks and records
//
// 2. What does String::from(url) do for a Url?
//    - Gives back the serialized URL without re-parsing it
//    - Two hrefs that resolve to the same URL serialize identically,
//      which is what deduplication compares
// -----------------------------------------------------------------------------
