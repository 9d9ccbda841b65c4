//! Errors reported by node construction and by the rebuilding algorithms.

use std::fmt;

use crate::types::Var;

/// Why an operation did not produce a result.
///
/// An operation never returns a node for a wrong function: it either yields a
/// valid result or one of these errors.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum BddError {
    /// The live-node limit was reached even after garbage collection.
    OutOfMemory,
    /// The manager's time limit expired.
    TimeoutExpired,
    /// Dynamic reordering fired during node construction.
    ///
    /// Every result computed under the old order is stale, so the current
    /// attempt is abandoned. The retry harness consumes this error and starts
    /// over; it is only visible to code calling the recursive steps directly.
    Reordered,
    /// A variable map has no entry for a variable reachable from the operand.
    UnmappedVariable { var: Var, len: usize },
}

impl fmt::Display for BddError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BddError::OutOfMemory => write!(f, "out of memory: live node limit reached"),
            BddError::TimeoutExpired => write!(f, "time limit expired"),
            BddError::Reordered => write!(f, "interrupted by dynamic reordering"),
            BddError::UnmappedVariable { var, len } => {
                write!(f, "variable {} is not covered by a map of length {}", var, len)
            }
        }
    }
}

impl std::error::Error for BddError {}

/// Status field of a manager, describing the last construction failure.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Default)]
pub enum ErrorCode {
    #[default]
    NoError,
    MemoryOut,
    TimeoutExpired,
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ErrorCode::NoError => write!(f, "no error"),
            ErrorCode::MemoryOut => write!(f, "memory out"),
            ErrorCode::TimeoutExpired => write!(f, "timeout expired"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display() {
        assert_eq!(BddError::TimeoutExpired.to_string(), "time limit expired");
        let e = BddError::UnmappedVariable { var: Var::new(4), len: 3 };
        assert_eq!(e.to_string(), "variable x4 is not covered by a map of length 3");
        assert_eq!(ErrorCode::default(), ErrorCode::NoError);
    }
}
