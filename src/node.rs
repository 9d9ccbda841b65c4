use crate::reference::Ref;
use crate::types::{NodeId, Var};

/// A decision node as stored in the manager.
///
/// `rc` counts every live incoming edge: pins held by callers, parents in the
/// unique table, and entries of transient memo tables.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub struct Node {
    pub variable: Var,
    pub low: Ref,
    pub high: Ref,
    pub rc: u32,
}

impl Node {
    /// The terminal node. Its children are never followed.
    pub const TERMINAL: Node = Node {
        variable: Var::TERMINAL,
        low: Ref::positive(NodeId::ONE),
        high: Ref::positive(NodeId::ONE),
        rc: u32::MAX,
    };

    pub fn new(variable: Var, low: Ref, high: Ref) -> Self {
        Self {
            variable,
            low,
            high,
            rc: 0,
        }
    }

    pub fn is_terminal(&self) -> bool {
        self.variable.is_terminal()
    }

    /// Whether no incoming edge keeps this node alive.
    pub fn is_dead(&self) -> bool {
        self.rc == 0
    }
}

impl Default for Node {
    fn default() -> Self {
        Self::TERMINAL
    }
}
