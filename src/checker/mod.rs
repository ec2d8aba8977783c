// src/checker/mod.rs
// =============================================================================
// This module contains the per-link probing logic.
//
// Submodules:
// - http: makes the request (HEAD or GET, with a GET retry) for one URL
// - cache: decides from the headers whether a cache served the response
// - decode: undoes gzip/deflate/br on a captured body
// - result: the ProbeResult record every probe produces
//
// This file (mod.rs) is the module root - it re-exports the public API so
// callers can write `checker::HttpProbe` instead of `checker::http::HttpProbe`.
// =============================================================================

mod cache;
mod decode;
mod http;
mod result;

pub use cache::is_cache_hit;
pub use http::{status_text, HttpProbe, LinkProbe};
pub use result::{ProbeResult, REQUEST_FAILED};
