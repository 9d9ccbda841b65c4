//! Per-variable unique subtables.
//!
//! Every variable owns one subtable mapping `(low, high)` children to the node
//! that branches on that variable with exactly those children. Together with
//! the node arena this forms the unique table:
//!
//! ```text
//! subtables[0] → Subtable for variable x0 (at whatever level x0 currently sits)
//! subtables[1] → Subtable for variable x1
//! ...
//! ```
//!
//! Subtables are keyed by variable rather than by level, so an adjacent swap
//! during reordering only moves entries between the two affected subtables.

use std::collections::HashMap;

use crate::reference::Ref;
use crate::types::{NodeId, Var};

/// A subtable storing BDD nodes for a single variable.
///
/// Nodes in a subtable all have the same variable. The hash table is keyed
/// by (low, high) children since the variable is implicit.
#[derive(Debug, Clone)]
pub struct Subtable {
    /// The variable for all nodes in this subtable.
    pub variable: Var,

    /// Map from (low, high) to node index in the global storage.
    nodes: HashMap<(Ref, Ref), NodeId>,
}

impl Subtable {
    /// Create a new empty subtable for the given variable.
    pub fn new(variable: Var) -> Self {
        Self {
            variable,
            nodes: HashMap::new(),
        }
    }

    /// Look up a node by its children.
    pub fn find(&self, low: Ref, high: Ref) -> Option<NodeId> {
        self.nodes.get(&(low, high)).copied()
    }

    /// Insert a node into the subtable.
    pub fn insert(&mut self, low: Ref, high: Ref, id: NodeId) {
        let old = self.nodes.insert((low, high), id);
        debug_assert!(old.is_none(), "Duplicate node ({}, {}) in subtable of {}", low, high, self.variable);
    }

    /// Remove a node from the subtable.
    ///
    /// Returns the storage index if the node was present.
    pub fn remove(&mut self, low: Ref, high: Ref) -> Option<NodeId> {
        self.nodes.remove(&(low, high))
    }

    /// Get the number of nodes in this subtable.
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Check if the subtable is empty.
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Iterate over all node indices in this subtable.
    pub fn ids(&self) -> impl Iterator<Item = NodeId> + '_ {
        self.nodes.values().copied()
    }
}
