// src/report/csv.rs
// =============================================================================
// Exports probe results as CSV.
//
// Columns: URL, Status, Status Text, Hit, All Headers, Error
//
// - Hit is "HIT" or "MISS"
// - All Headers is every "name: value" pair joined with "; "
// - A field containing a comma, a quote or a line break is wrapped in
//   quotes, with quotes inside it doubled
//
// to_csv is pure: the same results always give the same text.
// =============================================================================

use crate::checker::ProbeResult;
use crate::error::Result;
use std::borrow::Cow;
use std::path::Path;

const HEADER_ROW: [&str; 6] = ["URL", "Status", "Status Text", "Hit", "All Headers", "Error"];

/// Renders results as CSV, one header row plus one row per result
pub fn to_csv(results: &[ProbeResult]) -> String {
    let mut rows = Vec::with_capacity(results.len() + 1);
    rows.push(HEADER_ROW.join(","));

    for result in results {
        let status = result.status.to_string();
        let hit = if result.cache_hit { "HIT" } else { "MISS" };
        let headers = flatten_headers(result);
        let error = result.error.as_deref().unwrap_or("");

        let fields = [
            escape_field(&result.url),
            escape_field(&status),
            escape_field(&result.status_text),
            escape_field(hit),
            escape_field(&headers),
            escape_field(error),
        ];
        rows.push(fields.join(","));
    }

    rows.join("\n")
}

/// Writes the CSV export to `path`
pub fn write_csv(path: &Path, results: &[ProbeResult]) -> Result<()> {
    std::fs::write(path, to_csv(results))?;
    Ok(())
}

fn flatten_headers(result: &ProbeResult) -> String {
    result
        .headers
        .iter()
        .map(|(name, value)| format!("{}: {}", name, value))
        .collect::<Vec<_>>()
        .join("; ")
}

fn escape_field(field: &str) -> Cow<'_, str> {
    if field.contains([',', '"', '\n', '\r']) {
        Cow::Owned(format!("\"{}\"", field.replace('"', "\"\"")))
    } else {
        Cow::Borrowed(field)
    }
}
