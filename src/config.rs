// src/config.rs
// =============================================================================
// Runtime options shared by discovery and probing.
//
// There are no config files: the CLI fills an AuditConfig from its flags and
// everything downstream reads from it. Defaults match what the CLI uses when
// a flag is not given.
// =============================================================================

use crate::error::{AuditError, Result};
use reqwest::Client;
use std::time::Duration;

/// Identifier sent when fetching the seed page
pub const CRAWLER_USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36";

/// Default per-request timeout in seconds
pub const DEFAULT_TIMEOUT_SECS: u64 = 10;

/// How many redirects a single request may follow
pub const MAX_REDIRECTS: usize = 5;

#[derive(Debug, Clone)]
pub struct AuditConfig {
    /// Timeout applied to every request (seed fetch and each probe)
    pub timeout: Duration,
    /// Probe with GET and keep the response body
    pub capture_body: bool,
    /// Treat a non-2xx seed page as a discovery failure instead of parsing it
    pub strict_status: bool,
}

impl Default for AuditConfig {
    fn default() -> Self {
        Self {
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
            capture_body: false,
            strict_status: false,
        }
    }
}

impl AuditConfig {
    /// Builds the HTTP client every request in a run goes through
    ///
    /// One client is reused for all requests so connections get pooled.
    /// Automatic decompression stays off so content-encoding and
    /// content-length survive in the response headers.
    pub fn build_client(&self) -> Result<Client> {
        Client::builder()
            .timeout(self.timeout)
            .no_gzip()
            .no_brotli()
            .no_deflate()
            .redirect(reqwest::redirect::Policy::limited(MAX_REDIRECTS))
            .build()
            .map_err(AuditError::Client)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = AuditConfig::default();
        assert_eq!(config.timeout, Duration::from_secs(10));
        assert!(!config.capture_body);
        assert!(!config.strict_status);
    }

    #[test]
    fn test_build_client() {
        let config = AuditConfig {
            timeout: Duration::from_secs(3),
            ..AuditConfig::default()
        };
        assert!(config.build_client().is_ok());
    }
}
