// src/logging.rs
// =============================================================================
// Sets up the tracing subscriber.
//
// Logs always go to stderr so that `--json` output on stdout stays clean.
// Default level is WARN, -v raises it to DEBUG, -q drops it to ERROR.
// =============================================================================

use anyhow::Result;
use tracing::Level;
use tracing_subscriber::FmtSubscriber;

/// Picks the log level from the verbosity flags
pub fn level_for(verbose: bool, quiet: bool) -> Level {
    if verbose {
        Level::DEBUG
    } else if quiet {
        Level::ERROR
    } else {
        Level::WARN
    }
}

/// Installs the global subscriber
///
/// # Errors
///
/// Returns an error if a global subscriber was already set.
pub fn initialize_logging(verbose: bool, quiet: bool) -> Result<()> {
    let subscriber = FmtSubscriber::builder()
        .with_max_level(level_for(verbose, quiet))
        .with_target(false)
        .with_writer(std::io::stderr)
        .finish();

    tracing::subscriber::set_global_default(subscriber)?;
    Ok(())
}
