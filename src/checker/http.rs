// src/checker/http.rs
// =============================================================================
// This module probes a single URL and records what came back.
//
// Key functionality:
// - Makes a HEAD request (lightweight) unless the body is wanted, then GET
// - Sends browser-like headers so naive bot filters let us through
// - If the request fails before any response, retries once with a plain GET
// - Treats every response as data, 404 and 500 included
// - Never returns an error: a failure becomes a ProbeResult with status 0
//
// Many servers reject or mishandle HEAD, which is why the retry exists.
// The client does not decompress on its own, so content-encoding and
// content-length are reported as sent. A captured body is decoded here.
// =============================================================================

use crate::checker::decode::decode_body;
use crate::checker::result::ProbeResult;
use crate::config::AuditConfig;
use crate::error::Result;
use async_trait::async_trait;
use reqwest::header::{
    HeaderMap, HeaderValue, ACCEPT, ACCEPT_ENCODING, ACCEPT_LANGUAGE, CONTENT_ENCODING, USER_AGENT,
};
use reqwest::{Client, Method, Response};
use std::collections::BTreeMap;
use std::error::Error as _;
use tracing::{debug, warn};

const BROWSER_USER_AGENT: &str = "Mozilla/5.0 (Macintosh; Intel Mac OS X 10_15_7) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/143.0.0.0 Safari/537.36";
const BROWSER_ACCEPT: &str = "text/html,application/xhtml+xml,application/xml;q=0.9,image/avif,image/webp,image/apng,*/*;q=0.8,application/signed-exchange;v=b3;q=0.7";
const BROWSER_ACCEPT_ENCODING: &str = "gzip, deflate, br";
const BROWSER_ACCEPT_LANGUAGE: &str = "en-NL,en-GB;q=0.9,en-US;q=0.8,en;q=0.7";

/// User-Agent for the fallback GET, nothing else is sent
const FALLBACK_USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36";

/// Anything that can turn a URL into a ProbeResult
///
/// The audit loop only depends on this trait, so tests can drive it
/// without a network.
#[async_trait]
pub trait LinkProbe: Send + Sync {
    async fn probe(&self, url: &str, capture_body: bool) -> ProbeResult;
}

/// The real probe, backed by a shared reqwest client
#[derive(Debug, Clone)]
pub struct HttpProbe {
    client: Client,
}

impl HttpProbe {
    pub fn new(client: Client) -> Self {
        Self { client }
    }

    pub fn from_config(config: &AuditConfig) -> Result<Self> {
        Ok(Self::new(config.build_client()?))
    }
}

#[async_trait]
impl LinkProbe for HttpProbe {
    async fn probe(&self, url: &str, capture_body: bool) -> ProbeResult {
        // A HEAD response has no body to capture
        let method = if capture_body { Method::GET } else { Method::HEAD };

        let first = self
            .client
            .request(method.clone(), url)
            .headers(browser_headers())
            .send()
            .await;

        let response = match first {
            Ok(response) => response,
            Err(e) => {
                debug!("{} {} failed ({}), retrying with plain GET", method, url, e);
                let fallback = self
                    .client
                    .get(url)
                    .header(USER_AGENT, FALLBACK_USER_AGENT)
                    .send()
                    .await;

                match fallback {
                    Ok(response) => response,
                    Err(e) => {
                        warn!("Probe of {} failed: {}", url, e);
                        return ProbeResult::failed(url.to_string(), describe_error(&e));
                    }
                }
            }
        };

        analyze_response(url, response, capture_body).await
    }
}

// Turns a response of any status into a ProbeResult
async fn analyze_response(url: &str, response: Response, capture_body: bool) -> ProbeResult {
    let status = response.status();
    let status_text = status_text(&response);
    let headers = collect_headers(response.headers());

    let body = if capture_body {
        let encoding = response
            .headers()
            .get(CONTENT_ENCODING)
            .and_then(|value| value.to_str().ok())
            .map(str::to_string);

        match response.bytes().await {
            Ok(raw) => match decode_body(encoding.as_deref(), &raw) {
                Ok(decoded) => Some(String::from_utf8_lossy(&decoded).into_owned()),
                Err(e) => {
                    warn!("Failed to decode response body of {}: {}", url, e);
                    None
                }
            },
            Err(e) => {
                warn!("Failed to capture response body of {}: {}", url, e);
                None
            }
        }
    } else {
        None
    };

    debug!("{} -> {} {}", url, status.as_u16(), status_text);
    ProbeResult::completed(url.to_string(), status, status_text, headers, body)
}

/// The reason phrase the server sent on its status line
///
/// hyper only records it when it differs from the standard phrase, so the
/// standard phrase (empty for unknown codes) is the fallback.
pub fn status_text(response: &Response) -> String {
    match response.extensions().get::<hyper::ext::ReasonPhrase>() {
        Some(reason) => String::from_utf8_lossy(reason.as_bytes()).into_owned(),
        None => response.status().canonical_reason().unwrap_or("").to_string(),
    }
}

/// Copies response headers into a lowercase-keyed map
///
/// http::HeaderName is already lowercase. A header sent more than once
/// keeps its last value.
fn collect_headers(headers: &HeaderMap) -> BTreeMap<String, String> {
    headers
        .iter()
        .map(|(name, value)| {
            (
                name.as_str().to_ascii_lowercase(),
                String::from_utf8_lossy(value.as_bytes()).into_owned(),
            )
        })
        .collect()
}

fn browser_headers() -> HeaderMap {
    let mut headers = HeaderMap::new();
    headers.insert(USER_AGENT, HeaderValue::from_static(BROWSER_USER_AGENT));
    headers.insert(ACCEPT, HeaderValue::from_static(BROWSER_ACCEPT));
    headers.insert(ACCEPT_ENCODING, HeaderValue::from_static(BROWSER_ACCEPT_ENCODING));
    headers.insert(ACCEPT_LANGUAGE, HeaderValue::from_static(BROWSER_ACCEPT_LANGUAGE));
    headers
}

// reqwest's top-level message is generic ("error sending request for url"),
// the useful part (DNS, refused, TLS) is further down the source chain
fn describe_error(error: &reqwest::Error) -> String {
    let mut message = error.to_string();
    let mut source = error.source();
    while let Some(cause) = source {
        message.push_str(": ");
        message.push_str(&cause.to_string());
        source = cause.source();
    }
    message
}
