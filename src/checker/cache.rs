// src/checker/cache.rs
// =============================================================================
// Guessing whether a response was served by a cache in front of the origin.
//
// Two signals count as a hit:
// - `age` is a number greater than 0 (the response sat in a cache)
// - `x-cache` contains "HIT" (CDN convention, e.g. "HIT", "TCP_HIT")
//
// Either one is enough. That means `age: 30` together with `x-cache: MISS`
// is still reported as a hit.
// =============================================================================

use std::collections::BTreeMap;

/// Returns true if the (lowercase-keyed) headers suggest a cache hit
pub fn is_cache_hit(headers: &BTreeMap<String, String>) -> bool {
    let aged = headers
        .get("age")
        .and_then(|age| age.trim().parse::<f64>().ok())
        .is_some_and(|age| age > 0.0);

    let x_cache_hit = headers
        .get("x-cache")
        .is_some_and(|value| value.contains("HIT"));

    aged || x_cache_hit
}
