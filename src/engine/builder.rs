//! Entry insertion.
//!
//! An entry reaches the store as its canonical key sequence (ignorable
//! symbols already dropped by the caller's policy). Insertion validates the
//! whole sequence before touching the store, so a rejected entry leaves the
//! trie exactly as it was.

use super::store::{EntryId, NodeId, Trie};
use crate::{DuplicatePolicy, MatchError};
use smallvec::SmallVec;
use std::hash::Hash;

/// Canonical keys of one entry. Most vocabulary entries are short.
pub(crate) type EntryKeys<K> = SmallVec<[K; 16]>;

/// Insert `keys` and bind `payload` at the terminal node.
///
/// - Empty key sequences fail with [`MatchError::InvalidEntry`].
/// - A store without room for the new nodes or entry id fails with
///   [`MatchError::CapacityExceeded`] before anything is allocated.
/// - Existing canonical forms are handled according to `policy`.
pub(crate) fn insert<K, P>(
    trie: &mut Trie<K, P>,
    keys: EntryKeys<K>,
    payload: P,
    policy: DuplicatePolicy,
) -> Result<EntryId, MatchError>
where
    K: Eq + Hash,
{
    if keys.is_empty() {
        return Err(MatchError::InvalidEntry("canonical form is empty".to_string()));
    }

    if policy == DuplicatePolicy::Reject && trie.locate(keys.iter()).is_some_and(|node| trie.is_terminal(node)) {
        return Err(MatchError::DuplicateEntry);
    }

    trie.ensure_capacity(keys.len())?;

    let mut node = NodeId::ROOT;
    for key in keys {
        node = trie.child_or_insert(node, key)?;
    }

    match policy {
        DuplicatePolicy::Append | DuplicatePolicy::Reject => trie.push_binding(node, payload),
        DuplicatePolicy::Replace => trie.replace_bindings(node, payload),
    }
}
