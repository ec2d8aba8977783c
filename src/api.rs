// src/api.rs
// =============================================================================
// The two request/response operations link-auditor exposes: Discover and
// Probe. Their JSON shapes are what `--json` prints and what any embedding
// service would send over the wire.
//
// Discover can fail (bad seed, unreachable seed page). Probe only fails on a
// missing URL, everything else is reported inside the response.
// =============================================================================

use crate::checker::{LinkProbe, ProbeResult};
use crate::crawl;
use crate::error::AuditError;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

#[derive(Debug, Clone, Default, Deserialize)]
pub struct DiscoverRequest {
    #[serde(default)]
    pub url: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DiscoverResponse {
    pub links: Vec<String>,
    pub total_links: usize,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProbeRequest {
    #[serde(default)]
    pub url: Option<String>,
    #[serde(default)]
    pub capture_body: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProbeResponse {
    pub url: String,
    pub status: u16,
    pub status_text: String,
    pub headers: BTreeMap<String, String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub body: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl From<ProbeResult> for ProbeResponse {
    fn from(result: ProbeResult) -> Self {
        Self {
            url: result.url,
            status: result.status,
            status_text: result.status_text,
            headers: result.headers,
            body: result.body,
            error: result.error,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
}

/// A failed operation: the status to answer with and the JSON body
#[derive(Debug, Clone, PartialEq)]
pub struct ApiError {
    pub status: u16,
    pub body: ErrorResponse,
}

impl From<AuditError> for ApiError {
    fn from(err: AuditError) -> Self {
        Self {
            status: err.status_code(),
            body: ErrorResponse {
                error: err.to_string(),
            },
        }
    }
}

fn require_url(url: Option<&str>) -> Result<&str, ApiError> {
    match url.map(str::trim) {
        Some(url) if !url.is_empty() => Ok(url),
        _ => Err(AuditError::InvalidUrl("URL is required".to_string()).into()),
    }
}

/// Discover: seed URL in, unique same-domain links out
pub async fn discover(
    client: &Client,
    request: &DiscoverRequest,
    strict_status: bool,
) -> Result<DiscoverResponse, ApiError> {
    let raw = require_url(request.url.as_deref())?;
    let seed = crawl::parse_seed(raw)?;
    let links = crawl::discover(client, &seed, strict_status).await?;

    Ok(DiscoverResponse {
        total_links: links.len(),
        links,
    })
}

/// Probe: one URL in, its status and headers out
pub async fn probe<P: LinkProbe>(probe: &P, request: &ProbeRequest) -> Result<ProbeResponse, ApiError> {
    let url = require_url(request.url.as_deref())?;
    Ok(probe.probe(url, request.capture_body).await.into())
}
