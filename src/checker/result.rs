// src/checker/result.rs
// =============================================================================
// The record produced for every probed link.
//
// A ProbeResult is either:
// - a completed request: `status` is the real HTTP status (even 404 or 500)
//   and `error` is None, or
// - a failed request: `status` is 0, `status_text` is "Request Failed" and
//   `error` holds the reason.
// =============================================================================

use crate::checker::cache::is_cache_hit;
use reqwest::StatusCode;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Status text used when no response was received at all
pub const REQUEST_FAILED: &str = "Request Failed";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProbeResult {
    /// The URL that was probed
    pub url: String,
    /// HTTP status code, 0 when the request never got a response
    pub status: u16,
    pub status_text: String,
    /// Response headers keyed by lowercase name, sorted by name
    #[serde(default)]
    pub headers: BTreeMap<String, String>,
    /// Response body, only when body capture was requested and readable
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub body: Option<String>,
    #[serde(default)]
    pub cache_hit: bool,
    /// Transport-level failure message
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl ProbeResult {
    /// Builds the result for a request that got a response
    ///
    /// `status_text` is the reason phrase as received.
    pub fn completed(
        url: String,
        status: StatusCode,
        status_text: String,
        headers: BTreeMap<String, String>,
        body: Option<String>,
    ) -> Self {
        let cache_hit = is_cache_hit(&headers);
        Self {
            url,
            status: status.as_u16(),
            status_text,
            headers,
            body,
            cache_hit,
            error: None,
        }
    }

    /// Builds the result for a request that never got a response
    pub fn failed(url: String, error: String) -> Self {
        Self {
            url,
            status: 0,
            status_text: REQUEST_FAILED.to_string(),
            headers: BTreeMap::new(),
            body: None,
            cache_hit: false,
            error: Some(error),
        }
    }

    pub fn is_failed(&self) -> bool {
        self.error.is_some()
    }

    /// A link worth flagging: no response, or a 4xx/5xx status
    pub fn is_broken(&self) -> bool {
        self.is_failed() || self.status >= 400
    }
}
