// src/cli.rs
// =============================================================================
// This file defines our command-line interface using the `clap` crate.
//
// We use the "derive" API which lets us define the CLI structure using
// Rust structs and attributes (the #[...] things).
//
// Subcommands:
// - discover: list the same-domain links on a page
// - probe: check a single URL
// - audit: discover, then probe every link found, with optional CSV export
// =============================================================================

use clap::{Parser, Subcommand};
use link_auditor::config::{AuditConfig, DEFAULT_TIMEOUT_SECS};
use std::path::PathBuf;
use std::time::Duration;

#[derive(Parser, Debug)]
#[command(
    name = "link-auditor",
    version,
    about = "Audit the same-domain links of a web page",
    long_about = "link-auditor finds every link on a page that stays on the same host, then \
                  checks each one for its HTTP status, response headers and whether a cache served it."
)]
pub struct Cli {
    /// Per-request timeout in seconds (at least 1)
    #[arg(
        long,
        global = true,
        default_value_t = DEFAULT_TIMEOUT_SECS,
        value_parser = clap::value_parser!(u64).range(1..)
    )]
    pub timeout: u64,

    /// Show debug logs on stderr
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Only show errors on stderr
    #[arg(short, long, global = true)]
    pub quiet: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// List the unique same-domain links found on a page
    ///
    /// Example: link-auditor discover https://example.com
    Discover {
        /// Page to read links from
        url: String,

        /// Fail if the page itself answers with an error status
        #[arg(long)]
        strict_status: bool,

        /// Output results in JSON format
        #[arg(long)]
        json: bool,
    },

    /// Probe a single URL for status and headers
    ///
    /// Example: link-auditor probe https://example.com/about --capture-body
    Probe {
        /// URL to probe
        url: String,

        /// Use GET and keep the response body
        #[arg(long)]
        capture_body: bool,

        /// Output results in JSON format
        #[arg(long)]
        json: bool,
    },

    /// Discover a page's links and probe each of them in turn
    ///
    /// Example: link-auditor audit https://example.com --csv report.csv
    /// Press Ctrl-C to stop early; the links probed so far are still reported.
    Audit {
        /// Seed page
        url: String,

        /// Use GET and keep every response body
        #[arg(long)]
        capture_body: bool,

        /// Fail if the seed page answers with an error status
        #[arg(long)]
        strict_status: bool,

        /// Also write the report as CSV to this file
        #[arg(long, value_name = "PATH")]
        csv: Option<PathBuf>,

        /// Output results in JSON format instead of a table
        #[arg(long)]
        json: bool,
    },
}

impl Cli {
    /// Collects the flags that matter downstream into an AuditConfig
    pub fn audit_config(&self) -> AuditConfig {
        let (capture_body, strict_status) = match &self.command {
            Commands::Discover { strict_status, .. } => (false, *strict_status),
            Commands::Probe { capture_body, .. } => (*capture_body, false),
            Commands::Audit {
                capture_body,
                strict_status,
                ..
            } => (*capture_body, *strict_status),
        };

        AuditConfig {
            timeout: Duration::from_secs(self.timeout),
            capture_body,
            strict_status,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_audit_flags() {
        let cli = Cli::parse_from([
            "link-auditor",
            "audit",
            "https://example.com",
            "--capture-body",
            "--csv",
            "out.csv",
            "--timeout",
            "30",
        ]);

        let config = cli.audit_config();
        assert!(config.capture_body);
        assert!(!config.strict_status);
        assert_eq!(config.timeout, Duration::from_secs(30));

        match cli.command {
            Commands::Audit { url, csv, json, .. } => {
                assert_eq!(url, "https://example.com");
                assert_eq!(csv, Some(PathBuf::from("out.csv")));
                assert!(!json);
            }
            other => panic!("unexpected command {:?}", other),
        }
    }

    #[test]
    fn test_default_timeout() {
        let cli = Cli::parse_from(["link-auditor", "discover", "https://example.com"]);
        assert_eq!(cli.audit_config().timeout, Duration::from_secs(10));
    }

    #[test]
    fn test_zero_timeout_is_rejected() {
        let parsed = Cli::try_parse_from([
            "link-auditor",
            "audit",
            "https://example.com",
            "--timeout",
            "0",
        ]);
        assert!(parsed.is_err());

        let cli = Cli::try_parse_from(["link-auditor", "--timeout", "1", "discover", "https://example.com"])
            .unwrap();
        assert_eq!(cli.audit_config().timeout, Duration::from_secs(1));
    }
}
