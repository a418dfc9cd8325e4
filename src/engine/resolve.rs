//! Hit resolution.
//!
//! The scanner works in symbol positions and only knows which node a hit
//! ended on. Resolution turns a [`Hit`] into the public [`Match`]:
//!
//! ```text
//! Hit { start, end, node } ──▶ offsets (positions → bytes for strings)
//!                          ├─▶ raw span borrowed from the input
//!                          └─▶ entry ids + payloads bound at `node`
//! ```
//!
//! Payloads are borrowed from the store, never cloned.

use super::store::Trie;
use crate::{Hit, Match};
use std::hash::Hash;

/// Build a match for `hit` from already-converted offsets and raw span.
pub(crate) fn resolve_hit<'a, K: Eq + Hash, P, R: ?Sized>(
    trie: &'a Trie<K, P>,
    hit: &Hit,
    offsets: (usize, usize),
    raw: &'a R,
    tag: Option<&'a str>,
) -> Match<'a, R, P> {
    let bindings = trie.bindings(hit.node);
    debug_assert!(!bindings.is_empty(), "hits always end on terminal nodes");

    Match {
        start: offsets.0,
        end: offsets.1,
        raw,
        entries: bindings.iter().map(|b| b.entry).collect(),
        payloads: bindings.iter().map(|b| &b.payload).collect(),
        tag,
    }
}
