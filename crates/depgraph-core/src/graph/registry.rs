//! The merging node set used during graph construction.
//!
//! # Overview
//!
//! The registry accumulates [`Node`] values and guarantees that no two
//! stored nodes denote the same project. Nodes live in an arena of slots;
//! two lookup tables (`by_package`, `by_path`) map each populated key value
//! to the slot holding it, so "a node matching key K" is an O(1) lookup and
//! a merge is one slot update plus index rewiring — no linear scans.
//!
//! # Merging
//!
//! Adding a node can hit zero, one, or two existing slots:
//!
//! - **Zero** — insert into a fresh slot.
//! - **One** — combine into that slot: existing non-empty keys are kept,
//!   missing keys are filled from the incoming node.
//! - **Two** — only possible when the incoming node carries both keys and
//!   each key matches a different slot. All matched slots are coalesced
//!   into the lowest-index one, holding the union of non-empty keys (first
//!   populated value wins per field, in slot order, then the incoming
//!   node). Vacated slots are emptied and every key value pointing at them
//!   is rewired to the survivor.
//!
//! Index invariant: every index entry points at a live slot, and key
//! values that ever matched the same identity point at the same slot. A
//! key value absorbed by a merge, including one that loses a same-kind
//! conflict, stays in the index as an alias of the surviving node, so
//! re-adding any previously seen node is a no-op and resolving it finds
//! exactly one slot.

#![allow(clippy::must_use_candidate, clippy::module_name_repetitions)]

use std::collections::HashMap;

use tracing::debug;

use super::Node;

/// A deduplicating, merging set of graph nodes.
#[derive(Debug, Clone, Default)]
pub struct NodeRegistry {
    /// Arena. `None` marks a slot vacated by coalescing.
    slots: Vec<Option<Node>>,
    /// package id → slot of the node carrying it.
    by_package: HashMap<String, usize>,
    /// path → slot of the node carrying it.
    by_path: HashMap<String, usize>,
    /// Slot of the single degenerate fully-empty node, if one was added.
    empty_slot: Option<usize>,
}

impl NodeRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of live nodes.
    pub fn len(&self) -> usize {
        self.slots.iter().flatten().count()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Iterate the live nodes.
    pub fn nodes(&self) -> impl Iterator<Item = &Node> {
        self.slots.iter().flatten()
    }

    /// Consume the registry, yielding the final merged node values.
    pub fn into_nodes(self) -> impl Iterator<Item = Node> {
        self.slots.into_iter().flatten()
    }

    /// Add identity evidence. Always succeeds; see the module docs for the
    /// merge rules.
    pub fn add(&mut self, node: Node) {
        if node.is_empty() {
            // All fully-empty nodes are the same unknown project.
            if self.empty_slot.is_none() {
                self.empty_slot = Some(self.insert(node));
            }
            return;
        }

        let matches = self.matching_slots(&node);
        match matches.len() {
            0 => {
                self.insert(node);
            }
            1 => self.merge_into(matches[0], &node),
            _ => self.coalesce(matches, &node),
        }
    }

    /// Find the final node representing `probe`, if any.
    ///
    /// After the add phase has seen `probe` itself, at most one slot can
    /// match — two matches here would mean coalescing failed, which is an
    /// internal-consistency fault rather than a lookup miss.
    pub fn resolve(&self, probe: &Node) -> Option<&Node> {
        if probe.is_empty() {
            return self.empty_slot.and_then(|slot| self.slots[slot].as_ref());
        }
        let matches = self.matching_slots(probe);
        debug_assert!(
            matches.len() <= 1,
            "registry holds {} nodes matching {probe}",
            matches.len()
        );
        matches
            .first()
            .and_then(|&slot| self.slots[slot].as_ref())
    }

    /// Slots whose node shares a populated key with `node`, in ascending
    /// slot order. At most two entries: one per key.
    fn matching_slots(&self, node: &Node) -> Vec<usize> {
        let mut matches = Vec::with_capacity(2);
        if !node.package_id.is_empty() {
            if let Some(&slot) = self.by_package.get(&node.package_id) {
                matches.push(slot);
            }
        }
        if !node.path.is_empty() {
            if let Some(&slot) = self.by_path.get(&node.path) {
                if !matches.contains(&slot) {
                    matches.push(slot);
                }
            }
        }
        matches.sort_unstable();
        matches
    }

    fn insert(&mut self, node: Node) -> usize {
        let slot = self.slots.len();
        self.index_keys(&node, slot);
        self.slots.push(Some(node));
        slot
    }

    fn merge_into(&mut self, slot: usize, node: &Node) {
        let merged = match &self.slots[slot] {
            Some(existing) => existing.combine(node),
            // Matched slots are always live; tolerate anyway.
            None => node.clone(),
        };
        // A key value the merge drops keeps resolving to this slot.
        self.index_keys(node, slot);
        self.index_keys(&merged, slot);
        self.slots[slot] = Some(merged);
    }

    /// Coalesce every matched slot into the lowest-index one.
    ///
    /// Key conflicts (two slots carrying different values for the same key
    /// kind) resolve to the first populated value in slot order; every
    /// absorbed key value, the losing one included, stays in the index as
    /// an alias of the survivor.
    fn coalesce(&mut self, matches: Vec<usize>, node: &Node) {
        let survivor = matches[0];
        let mut merged = match &self.slots[survivor] {
            Some(existing) => existing.clone(),
            None => Node::default(),
        };
        for &slot in &matches[1..] {
            if let Some(vacated) = self.slots[slot].take() {
                merged = merged.combine(&vacated);
            }
            self.repoint(slot, survivor);
        }
        merged = merged.combine(node);
        debug!(node = %merged, absorbed = matches.len() - 1, "coalesced node identities");
        self.index_keys(node, survivor);
        self.index_keys(&merged, survivor);
        self.slots[survivor] = Some(merged);
    }

    fn index_keys(&mut self, node: &Node, slot: usize) {
        if !node.package_id.is_empty() {
            self.by_package.insert(node.package_id.clone(), slot);
        }
        if !node.path.is_empty() {
            self.by_path.insert(node.path.clone(), slot);
        }
    }

    /// Redirect every index entry for `from` to `to`, aliases included.
    fn repoint(&mut self, from: usize, to: usize) {
        for slot in self
            .by_package
            .values_mut()
            .chain(self.by_path.values_mut())
        {
            if *slot == from {
                *slot = to;
            }
        }
    }
}
