// src/audit/mod.rs
// =============================================================================
// This module runs the probe over every discovered link.
//
// Submodules:
// - runner: the sequential, cancellable audit loop and its report
// - cancel: the shared cancellation signal
// =============================================================================

mod cancel;
mod runner;

pub use cancel::CancelToken;
pub use runner::{AuditReport, Auditor, Phase, RunProgress, RunState};
