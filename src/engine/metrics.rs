//! Scan metrics.
//!
//! Collected on every scan (the counters are plain integers), but only
//! surfaced through `find_with_metrics`. Useful for profiling vocabularies and
//! for checking how much work `NoSkip` adds over `Skip` on a given input.

use serde::Serialize;
use std::time::Duration;

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ScanMetrics {
    /// Elapsed time for preparation + scanning + result assembly.
    pub elapsed: Duration,
    /// Non-ignorable positions the cursor stopped at.
    pub starts: usize,
    /// Starts that passed the boundary check and began a descent.
    pub descents: usize,
    /// Trie edges followed across all descents.
    pub visited: usize,
    /// Matches emitted.
    pub matches: usize,
}

/// Scan output bundled with its metrics.
#[derive(Debug, Clone)]
pub struct ScanRun<M> {
    pub matches: Vec<M>,
    pub metrics: ScanMetrics,
}
