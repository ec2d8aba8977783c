// src/crawl/mod.rs
// =============================================================================
// This module handles link discovery on the seed page.
//
// Submodules:
// - resolve: turns hrefs into absolute URLs and applies the same-host rule
// - links: fetches the seed page and extracts its unique same-domain links
//
// Only one page is read. Recursive crawling is deliberately out of scope.
// =============================================================================

mod links;
mod resolve;

pub use links::{discover, extract_same_domain_links, parse_seed};
pub use resolve::{is_same_domain, resolve};
