//! Matching engine.
//!
//! One generic engine serves both matchers. The string matcher feeds it
//! `char` keys, the token matcher feeds it token keys; everything below works
//! on canonical keys and symbol positions only.
//!
//! ```text
//! entries ── policy ── builder::insert ──▶ Trie (store.rs)
//!                                            │
//! input ── policy ── PreparedInput ──────────┤
//!          (prepare.rs)                      v
//!                                  Scanner::run (scanner.rs)
//!                                    - descents per start
//!                                    - longest / all
//!                                    - boundaries, skip / noskip
//!                                            │
//!                                            v
//!                                  resolve_hit (resolve.rs) ──▶ Vec<Match>
//! ```
//!
//! ## Responsibilities by module
//!
//! - `store.rs`: arena of nodes, child edges, payload bindings.
//! - `builder.rs`: validated insertion and the duplicate policy.
//! - `prepare.rs`: one-pass canonicalization of the input and word flags.
//! - `scanner.rs`: the descent loop and cursor advance.
//! - `resolve.rs`: hits to public matches.
//! - `metrics.rs`: per-scan counters and timing.
//!
//! The store is only mutated through `builder::insert`; scanning takes `&Trie`
//! and can run from any number of threads at once.

#[path = "engine/builder.rs"]
mod builder;
#[path = "engine/metrics.rs"]
mod metrics;
#[path = "engine/prepare.rs"]
mod prepare;
#[path = "engine/resolve.rs"]
mod resolve;
#[path = "engine/scanner.rs"]
mod scanner;
#[path = "engine/store.rs"]
mod store;


pub(crate) use builder::{EntryKeys, insert};
pub use metrics::{ScanMetrics, ScanRun};
pub(crate) use prepare::PreparedInput;
pub(crate) use resolve::resolve_hit;
pub(crate) use scanner::{ScanSettings, Scanner};
pub use store::EntryId;
pub(crate) use store::{NodeId, Trie};
