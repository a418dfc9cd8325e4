//! Arena node store shared by both engines.
//!
//! Every node lives in one `Vec` and is addressed by a [`NodeId`]. Edges are
//! keyed by canonical symbols; a node owns the payload bindings of every
//! entry whose canonical form ends exactly there.
//!
//! ```text
//! root ─n─> (1) ─e─> (2) ─w─> (3)          "new"
//!                                └─y─> (4) ─o─> ... ─k─> (7) [P1]
//! ```
//!
//! ## Invariants
//!
//! - Node 0 is the root and never carries bindings (empty canonical forms are
//!   rejected before they reach the store).
//! - Each node except the root has exactly one incoming edge, from the node
//!   that allocated it. Nodes are never removed, so ids stay valid for the
//!   lifetime of the store.

use crate::MatchError;
use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};
use smallvec::SmallVec;
use std::hash::Hash;

/// Index of a node in the arena.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub(crate) struct NodeId(u32);

impl NodeId {
    pub(crate) const ROOT: NodeId = NodeId(0);

    #[inline]
    fn index(self) -> usize {
        self.0 as usize
    }
}

/// Identity of an inserted entry: its position in insertion order.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct EntryId(u32);

impl EntryId {
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

/// A payload bound to a terminal node.
#[derive(Debug, Clone)]
pub(crate) struct Binding<P> {
    pub(crate) entry: EntryId,
    pub(crate) payload: P,
}

#[derive(Debug, Clone)]
struct NodeRecord<K, P> {
    children: FxHashMap<K, NodeId>,
    bindings: SmallVec<[Binding<P>; 1]>,
}

impl<K, P> Default for NodeRecord<K, P> {
    fn default() -> Self {
        Self { children: FxHashMap::default(), bindings: SmallVec::new() }
    }
}

/// The trie: arena of nodes plus entry bookkeeping.
#[derive(Debug, Clone)]
pub(crate) struct Trie<K, P> {
    nodes: Vec<NodeRecord<K, P>>,
    /// Number of nodes with at least one binding.
    terminals: usize,
    /// Next entry id to hand out.
    next_entry: u32,
}

impl<K: Eq + Hash, P> Default for Trie<K, P> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K: Eq + Hash, P> Trie<K, P> {
    pub(crate) fn new() -> Self {
        Self { nodes: vec![NodeRecord::default()], terminals: 0, next_entry: 0 }
    }

    #[inline]
    pub(crate) fn child(&self, node: NodeId, key: &K) -> Option<NodeId> {
        self.nodes[node.index()].children.get(key).copied()
    }

    /// Fail unless `nodes` more nodes and one more entry can be allocated.
    pub(crate) fn ensure_capacity(&self, nodes: usize) -> Result<(), MatchError> {
        let total = self.nodes.len().checked_add(nodes);
        if total.is_none_or(|n| u32::try_from(n).is_err()) {
            return Err(MatchError::CapacityExceeded("node"));
        }
        if self.next_entry == u32::MAX {
            return Err(MatchError::CapacityExceeded("entry"));
        }
        Ok(())
    }

    /// Follow `key` from `node`, allocating the child if it is missing.
    pub(crate) fn child_or_insert(&mut self, node: NodeId, key: K) -> Result<NodeId, MatchError> {
        if let Some(existing) = self.child(node, &key) {
            return Ok(existing);
        }
        let id = u32::try_from(self.nodes.len()).map(NodeId).map_err(|_| MatchError::CapacityExceeded("node"))?;
        self.nodes.push(NodeRecord::default());
        self.nodes[node.index()].children.insert(key, id);
        Ok(id)
    }

    /// Walk `keys` from the root without allocating.
    pub(crate) fn locate<'k>(&self, keys: impl IntoIterator<Item = &'k K>) -> Option<NodeId>
    where
        K: 'k,
    {
        keys.into_iter().try_fold(NodeId::ROOT, |node, key| self.child(node, key))
    }

    #[inline]
    pub(crate) fn is_terminal(&self, node: NodeId) -> bool {
        !self.nodes[node.index()].bindings.is_empty()
    }

    pub(crate) fn bindings(&self, node: NodeId) -> &[Binding<P>] {
        &self.nodes[node.index()].bindings
    }

    /// Append a binding at `node` and return its entry id.
    pub(crate) fn push_binding(&mut self, node: NodeId, payload: P) -> Result<EntryId, MatchError> {
        let entry = self.allocate_entry()?;
        let bindings = &mut self.nodes[node.index()].bindings;
        if bindings.is_empty() {
            self.terminals += 1;
        }
        bindings.push(Binding { entry, payload });
        Ok(entry)
    }

    /// Drop every binding at `node` and bind `payload` alone.
    pub(crate) fn replace_bindings(&mut self, node: NodeId, payload: P) -> Result<EntryId, MatchError> {
        let entry = self.allocate_entry()?;
        let bindings = &mut self.nodes[node.index()].bindings;
        if bindings.is_empty() {
            self.terminals += 1;
        }
        bindings.clear();
        bindings.push(Binding { entry, payload });
        Ok(entry)
    }

    fn allocate_entry(&mut self) -> Result<EntryId, MatchError> {
        let entry = EntryId(self.next_entry);
        self.next_entry = self.next_entry.checked_add(1).ok_or(MatchError::CapacityExceeded("entry"))?;
        Ok(entry)
    }

    /// Number of distinct canonical forms stored.
    pub(crate) fn len(&self) -> usize {
        self.terminals
    }

    pub(crate) fn is_empty(&self) -> bool {
        self.terminals == 0
    }

    pub(crate) fn node_count(&self) -> usize {
        self.nodes.len()
    }
}
