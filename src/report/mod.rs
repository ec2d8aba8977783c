// src/report/mod.rs
// =============================================================================
// This module turns a finished audit into text for humans and machines.
//
// Submodules:
// - csv: the spreadsheet export (pure function plus a file writer)
//
// JSON output lives here directly since serde does all of the work.
// =============================================================================

mod csv;

pub use csv::{to_csv, write_csv};

use crate::audit::AuditReport;

/// Pretty-printed JSON for the whole report, state and totals included
pub fn to_json(report: &AuditReport) -> serde_json::Result<String> {
    serde_json::to_string_pretty(report)
}
