//! Type-safe wrappers for node identifiers, variables and levels.
//!
//! This module provides newtype wrappers that enforce compile-time distinction
//! between node indices, variable indices and level indices, preventing common
//! mistakes in BDD manipulation code (most notably mixing up a variable with
//! its current position in the ordering).
use std::fmt;

/// A node identifier (index into the manager's node storage).
///
/// # Invariants
///
/// - `NodeId(0)` is an unused sentinel
/// - `NodeId(1)` is the ONE terminal (ZERO is its complemented edge)
/// - Decision nodes start at index 2
#[derive(Debug, Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash)]
pub struct NodeId(u32);

impl NodeId {
    /// The ONE terminal node.
    pub const ONE: NodeId = NodeId(1);

    /// Largest index that still fits into a [`Ref`][crate::reference::Ref].
    pub const MAX: u32 = u32::MAX >> 1;

    /// Creates a new NodeId from a raw index.
    ///
    /// # Panics
    ///
    /// Panics if the index does not fit into 31 bits.
    pub const fn new(index: u32) -> Self {
        assert!(index <= Self::MAX, "Node index does not fit into 31 bits");
        NodeId(index)
    }

    /// Creates a NodeId without the range check.
    ///
    /// # Safety
    ///
    /// The caller must ensure that `index <= NodeId::MAX`.
    pub const unsafe fn from_raw_unchecked(index: u32) -> Self {
        NodeId(index)
    }

    /// Returns the raw value.
    pub const fn raw(self) -> u32 {
        self.0
    }

    /// Returns the node index as a `usize` for array indexing.
    pub const fn index(self) -> usize {
        self.0 as usize
    }

    /// Returns true if this is the terminal node.
    pub const fn is_terminal(self) -> bool {
        self.0 == 1
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "@{}", self.0)
    }
}

impl From<u32> for NodeId {
    fn from(index: u32) -> Self {
        NodeId::new(index)
    }
}

impl From<NodeId> for usize {
    fn from(id: NodeId) -> Self {
        id.0 as usize
    }
}

/// A variable index (0-indexed).
///
/// Variables represent Boolean decision points in a BDD. Unlike levels,
/// variable indices are stable across reordering operations, which is what
/// renaming maps and permutation arrays are indexed by.
///
/// # Invariants
///
/// - [`Var::TERMINAL`] is reserved for the terminal node and never names a
///   real variable
#[derive(Debug, Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash)]
pub struct Var(u32);

impl Var {
    /// Pseudo-variable of the terminal node.
    pub const TERMINAL: Var = Var(u32::MAX);

    /// Creates a new variable with the given index.
    ///
    /// # Panics
    ///
    /// Panics if `index` collides with [`Var::TERMINAL`].
    pub const fn new(index: u32) -> Self {
        assert!(index != u32::MAX, "Variable index is reserved for terminals");
        Var(index)
    }

    /// Returns the raw variable index as a `u32`.
    pub const fn id(self) -> u32 {
        self.0
    }

    /// Returns the variable index as a `usize` for array indexing.
    pub const fn index(self) -> usize {
        self.0 as usize
    }

    /// Checks if this is the terminal pseudo-variable.
    pub const fn is_terminal(self) -> bool {
        self.0 == u32::MAX
    }
}

impl fmt::Display for Var {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_terminal() {
            write!(f, "x⊤")
        } else {
            write!(f, "x{}", self.0)
        }
    }
}

impl From<Var> for u32 {
    fn from(var: Var) -> Self {
        var.0
    }
}

impl From<u32> for Var {
    fn from(index: u32) -> Self {
        Var::new(index)
    }
}

/// A level in the variable ordering (0-indexed).
///
/// Levels represent the position of a variable in the current ordering.
/// Unlike variable indices, levels change when variables are reordered.
///
/// # Invariants
///
/// - Level 0 is the topmost level (closest to root)
/// - Levels increase downward toward the terminal
/// - The terminal sits at [`Level::TERMINAL`], below every variable
#[derive(Debug, Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash)]
pub struct Level(usize);

impl Level {
    /// Level of the terminal node.
    pub const TERMINAL: Level = Level(usize::MAX);

    /// Creates a new level with the given index.
    pub fn new(index: usize) -> Self {
        Level(index)
    }

    /// Returns the raw level index as a `usize`.
    pub fn index(self) -> usize {
        self.0
    }

    /// Returns the next level down (index + 1).
    pub fn next(self) -> Self {
        Level(self.0 + 1)
    }

    /// Returns the previous level up (index - 1), or None if at level 0.
    pub fn prev(self) -> Option<Self> {
        if self.0 > 0 {
            Some(Level(self.0 - 1))
        } else {
            None
        }
    }

    /// Checks if this is the top level (level 0).
    pub fn is_top(self) -> bool {
        self.0 == 0
    }
}

impl fmt::Display for Level {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if *self == Level::TERMINAL {
            write!(f, "L⊤")
        } else {
            write!(f, "L{}", self.0)
        }
    }
}

impl From<Level> for usize {
    fn from(level: Level) -> Self {
        level.0
    }
}

impl From<usize> for Level {
    fn from(index: usize) -> Self {
        Level(index)
    }
}
