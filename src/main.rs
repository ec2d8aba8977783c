// src/main.rs
// =============================================================================
// This is the entry point of our CLI application.
//
// What happens here:
// 1. Parse command-line arguments using clap and set up logging
// 2. Dispatch to the appropriate subcommand handler
// 3. Print results (table or JSON) and write the CSV if asked
// 4. Exit with proper code (0 = success, 1 = broken links, 2 = error)
//
// All the real work lives in the library (src/lib.rs); this file only
// wires it to the terminal.
// =============================================================================

mod cli; // src/cli.rs - command-line parsing
mod logging; // src/logging.rs - tracing subscriber setup

use anyhow::{Context, Result};
use clap::Parser;
use cli::{Cli, Commands};
use link_auditor::api::{self, ApiError, DiscoverRequest, ProbeRequest, ProbeResponse};
use link_auditor::audit::{AuditReport, Auditor, CancelToken, Phase, RunProgress, RunState};
use link_auditor::checker::{HttpProbe, ProbeResult};
use link_auditor::config::AuditConfig;
use link_auditor::{crawl, report};
use std::io::Write;
use std::path::Path;

#[tokio::main]
async fn main() {
    let exit_code = match run().await {
        Ok(code) => code,
        Err(e) => {
            // {:#} prints the whole context chain on one line
            eprintln!("Error: {:#}", e);
            2
        }
    };

    std::process::exit(exit_code);
}

// Returns:
//   Ok(0) = no broken links
//   Ok(1) = broken links found
//   Ok(2) = the request itself could not be served (e.g. bad seed URL)
//   Err = unexpected error
async fn run() -> Result<i32> {
    let cli = Cli::parse();
    logging::initialize_logging(cli.verbose, cli.quiet)?;

    let config = cli.audit_config();

    match cli.command {
        Commands::Discover { url, json, .. } => handle_discover(&url, json, &config).await,
        Commands::Probe { url, json, .. } => handle_probe(&url, json, &config).await,
        Commands::Audit {
            url, csv, json, ..
        } => handle_audit(&url, csv.as_deref(), json, &config).await,
    }
}

// Handles the 'discover' subcommand
async fn handle_discover(url: &str, json: bool, config: &AuditConfig) -> Result<i32> {
    let client = config.build_client()?;
    let request = DiscoverRequest {
        url: Some(url.to_string()),
    };

    let response = match api::discover(&client, &request, config.strict_status).await {
        Ok(response) => response,
        Err(e) => return report_api_error(&e, json),
    };

    if json {
        println!("{}", serde_json::to_string_pretty(&response)?);
    } else {
        for link in &response.links {
            println!("{}", link);
        }
        eprintln!("🔗 {} same-domain link(s) found", response.total_links);
    }

    Ok(0)
}

// Handles the 'probe' subcommand
async fn handle_probe(url: &str, json: bool, config: &AuditConfig) -> Result<i32> {
    let probe = HttpProbe::from_config(config)?;
    let request = ProbeRequest {
        url: Some(url.to_string()),
        capture_body: config.capture_body,
    };

    let response: ProbeResponse = match api::probe(&probe, &request).await {
        Ok(response) => response,
        Err(e) => return report_api_error(&e, json),
    };

    let broken = response.error.is_some() || response.status >= 400;

    if json {
        println!("{}", serde_json::to_string_pretty(&response)?);
    } else {
        println!("{} {} {}", response.url, response.status, response.status_text);
        for (name, value) in &response.headers {
            println!("  {}: {}", name, value);
        }
        if let Some(error) = &response.error {
            println!("  error: {}", error);
        }
        if let Some(body) = &response.body {
            println!("\n{}", body);
        }
    }

    Ok(if broken { 1 } else { 0 })
}

// Handles the 'audit' subcommand
//
// Ctrl-C cancels the run: the probe in flight is dropped, and everything
// probed before it is still printed and exported.
async fn handle_audit(url: &str, csv: Option<&Path>, json: bool, config: &AuditConfig) -> Result<i32> {
    let seed = crawl::parse_seed(url)?;
    let client = config.build_client()?;

    print_progress(&RunProgress::discovering());
    let links = crawl::discover(&client, &seed, config.strict_status)
        .await
        .with_context(|| format!("Link discovery failed for {}", seed))?;
    eprintln!();

    let cancel = CancelToken::new();
    let ctrl_c = {
        let cancel = cancel.clone();
        tokio::spawn(async move {
            if tokio::signal::ctrl_c().await.is_ok() {
                eprintln!("\n⏹️  Stopping audit...");
                cancel.cancel();
            }
        })
    };

    let mut auditor = Auditor::new(HttpProbe::new(client), links, config.capture_body, cancel);
    let state = auditor.run(|progress| print_progress(&progress)).await;
    ctrl_c.abort();
    eprintln!();

    let audit = auditor.into_report();
    if state == RunState::Cancelled {
        eprintln!(
            "⚠️  Audit stopped early: {} of {} link(s) probed",
            audit.results.len(),
            audit.total
        );
    }

    if json {
        println!("{}", report::to_json(&audit)?);
    } else {
        print_table(&audit);
    }

    if let Some(path) = csv {
        report::write_csv(path, &audit.results)
            .with_context(|| format!("Failed to write CSV to {}", path.display()))?;
        eprintln!("💾 CSV report written to {}", path.display());
    }

    Ok(if audit.broken_count() > 0 { 1 } else { 0 })
}

// Prints a failed Discover/Probe request the same way the JSON API would
fn report_api_error(error: &ApiError, json: bool) -> Result<i32> {
    if json {
        println!("{}", serde_json::to_string_pretty(&error.body)?);
    }
    eprintln!("Error ({}): {}", error.status, error.body.error);
    Ok(2)
}

// Rewrites the progress line on stderr
fn print_progress(progress: &RunProgress) {
    let label = match progress.phase {
        Phase::Discovering => "Crawling links...",
        Phase::Probing | Phase::Idle => "Fetching headers...",
    };

    let mut stderr = std::io::stderr();
    if progress.phase == Phase::Discovering {
        let _ = write!(stderr, "\r🔍 {}", label);
    } else {
        let _ = write!(
            stderr,
            "\r🌐 {} {}/{} ({:.0}%)",
            label,
            progress.completed,
            progress.total,
            progress.percent()
        );
    }
    let _ = stderr.flush();
}

// Prints results as a human-readable table in the terminal
fn print_table(audit: &AuditReport) {
    println!("{:<60} {:<8} {:<6} {:<30}", "URL", "STATUS", "CACHE", "MESSAGE");
    println!("{}", "=".repeat(106));

    for result in &audit.results {
        println!(
            "{:<60} {:<8} {:<6} {:<30}",
            truncate(&result.url, 57),
            result.status,
            if result.cache_hit { "HIT" } else { "MISS" },
            message(result)
        );
    }

    println!();

    let broken = audit.broken_count();
    let hits = audit.results.iter().filter(|r| r.cache_hit).count();

    println!("📊 Summary:");
    println!("   ✅ OK: {}", audit.results.len() - broken);
    println!("   ❌ Broken: {}", broken);
    println!("   ⚡ Cache hits: {}", hits);
    println!("   📋 Probed: {} / {}", audit.results.len(), audit.total);
}

fn message(result: &ProbeResult) -> String {
    match &result.error {
        Some(error) => format!("{}: {}", result.status_text, error),
        None => result.status_text.clone(),
    }
}

// Truncates on a char boundary so multi-byte URLs don't panic
fn truncate(text: &str, max_chars: usize) -> String {
    if text.chars().count() > max_chars {
        let head: String = text.chars().take(max_chars).collect();
        format!("{}...", head)
    } else {
        text.to_string()
    }
}
