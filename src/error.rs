// src/error.rs
// =============================================================================
// Error types for the library side of link-auditor.
//
// Only discovery (and the CLI's file output) can fail as a whole. A failed
// probe is never an error: it is recorded inside its ProbeResult instead,
// and an HTTP 4xx/5xx is just data.
// =============================================================================

use thiserror::Error;

#[derive(Error, Debug)]
pub enum AuditError {
    /// The seed URL was missing or could not be parsed. No request was made.
    #[error("Invalid URL: {0}")]
    InvalidUrl(String),

    /// The seed page could not be fetched at all (DNS, TLS, refused, timeout).
    #[error("Failed to fetch URL: {0}")]
    Fetch(#[source] reqwest::Error),

    /// The seed page answered with an error status we could not use.
    #[error("Failed to fetch URL: HTTP {status} {status_text}")]
    Http { status: u16, status_text: String },

    #[error("Failed to build HTTP client: {0}")]
    Client(#[source] reqwest::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl AuditError {
    /// Status code to report at the Discover boundary
    ///
    /// 400 for a bad seed URL, the upstream status for an HTTP error,
    /// 500 for everything else.
    pub fn status_code(&self) -> u16 {
        match self {
            AuditError::InvalidUrl(_) => 400,
            AuditError::Http { status, .. } => *status,
            AuditError::Fetch(_) | AuditError::Client(_) | AuditError::Io(_) => 500,
        }
    }
}

pub type Result<T> = std::result::Result<T, AuditError>;
