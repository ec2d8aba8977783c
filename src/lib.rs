// src/lib.rs
// =============================================================================
// link-auditor: find a page's same-domain links, then check each one.
//
// Pipeline:
//   seed URL -> crawl (discover links) -> audit (probe each, in order)
//            -> report (table, JSON or CSV)
//
// Modules:
// - crawl: seed validation, link extraction and the same-host rule
// - checker: probing one URL and classifying cache hits
// - audit: the sequential, cancellable loop over all links
// - report: CSV and JSON export
// - api: the Discover / Probe request and response types
// - config, error: shared options and the error type
// =============================================================================

pub mod api;
pub mod audit;
pub mod checker;
pub mod config;
pub mod crawl;
pub mod error;
pub mod report;

pub use error::{AuditError, Result};
