use std::fmt::{Display, Formatter};
use std::ops::Neg;

use crate::types::NodeId;

/// An edge to a BDD node, potentially complemented.
///
/// Uses a 32-bit representation where the least significant bit indicates negation
/// and the remaining bits store the node ID. Two refs that differ only in the
/// polarity bit denote a function and its negation, backed by the same node.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
#[repr(transparent)]
pub struct Ref(u32);

impl Ref {
    /// Creates a new reference with the given node ID and negation flag.
    pub const fn new(id: NodeId, negated: bool) -> Self {
        Self((id.raw() << 1) | (negated as u32))
    }

    /// Creates a positive (non-negated) reference.
    pub const fn positive(id: NodeId) -> Self {
        Self::new(id, false)
    }

    /// Creates a negative (negated) reference.
    pub const fn negative(id: NodeId) -> Self {
        Self::new(id, true)
    }

    /// Returns the node ID this reference points to.
    #[inline]
    pub const fn id(self) -> NodeId {
        // SAFETY: shifting a u32 right by one always fits into 31 bits.
        unsafe { NodeId::from_raw_unchecked(self.0 >> 1) }
    }

    /// Returns true if this reference is negated.
    #[inline]
    pub const fn is_negated(self) -> bool {
        (self.0 & 1) != 0
    }

    /// Returns the non-negated reference to the same node.
    #[inline]
    pub const fn regular(self) -> Self {
        Self(self.0 & !1)
    }

    /// Negates the reference if `cond` holds.
    #[inline]
    pub const fn negate_if(self, cond: bool) -> Self {
        Self(self.0 ^ (cond as u32))
    }

    /// Returns the raw underlying value.
    #[inline]
    pub const fn raw(self) -> u32 {
        self.0
    }
}

// -Ref
impl Neg for Ref {
    type Output = Self;

    fn neg(self) -> Self::Output {
        Self(self.0 ^ 1)
    }
}

impl Display for Ref {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        if self.is_negated() {
            write!(f, "~{}", self.id())
        } else {
            write!(f, "{}", self.id())
        }
    }
}
