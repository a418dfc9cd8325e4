//! Trie-based gazetteer matching for strings and token sequences.
//!
//! A vocabulary of entries (a symbol sequence plus a caller-owned payload) is
//! compiled into a trie keyed by canonical symbols. Scanning an input reports
//! every occurrence of an entry, or only the longest one at each start,
//! optionally only at word boundaries.
//!
//! ```
//! use termtrie::{CharPolicy, MatchMode, MatcherConfig, ScanOptions, StringMatcher, Continuation};
//!
//! let mut cities = StringMatcher::new(CharPolicy::case_insensitive(), MatcherConfig::default());
//! cities.insert("new york", "P1").unwrap();
//! cities.insert("new york city", "P2").unwrap();
//! cities.insert("york", "P3").unwrap();
//!
//! let text = "I live in New York City";
//! let found = cities.find(text);
//! assert_eq!(found.len(), 1);
//! assert_eq!(found[0].raw, "New York City");
//! assert_eq!(found[0].payloads, vec![&"P2"]);
//!
//! let all = cities.find_with(text, &ScanOptions::new(MatchMode::All, Continuation::Skip));
//! let spans: Vec<&str> = all.iter().map(|m| m.raw).collect();
//! assert_eq!(spans, vec!["New York", "New York City"]);
//! ```
//!
//! Two front-ends share one engine:
//!
//! - [`StringMatcher`] matches character by character and reports UTF-8 byte
//!   offsets.
//! - [`TokenMatcher`] matches pre-tokenized input and reports token indices.
//!
//! Matchers are built with `&mut self` inserts and scanned with `&self`; once
//! built, a matcher can be shared across threads for read-only scanning.

#[macro_use]
mod macros;
mod api;
mod config;
mod engine;
mod error;
mod policy;
mod tokenize;

pub use api::{Match, StringMatch, StringMatcher, TokenMatch, TokenMatcher};
pub use config::{Boundary, Continuation, DuplicatePolicy, MatchMode, MatcherConfig, ScanOptions};
pub use engine::{EntryId, ScanMetrics, ScanRun};
pub use error::MatchError;
pub use policy::{CharFold, CharPolicy, Canonicalize, FnPolicy, Identity, TokenFold, TokenPolicy, is_word_char};
pub use tokenize::{TokenSpan, tokenize};

// --- Internal types ---------------------------------------------------------

/// A scan result before resolution: symbol positions of the span and the
/// terminal node it ended on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct Hit {
    /// Start position (inclusive).
    pub start: usize,
    /// End position (exclusive).
    pub end: usize,
    pub node: engine::NodeId,
}
