//! The crate's only fallible surface: the consistency checker's error type.
//! The core itself never returns a `Result`. Violations there are bugs,
//! not runtime conditions, and are caught by `debug_assert!` instead.

use thiserror::Error;

/// A violated rank-balance or structural invariant, as found by
/// [`crate::check::check`]. Each variant names the first violation
/// encountered during the walk, not every one present.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConsistencyError {
    #[error("node out of order at key index {0}")]
    OutOfOrder(usize),

    #[error("rank-difference {actual} out of {{1,2}} at key index {at}")]
    RankRuleViolation { at: usize, actual: u32 },

    #[error("2,2-leaf at key index {0}")]
    TwoTwoLeaf(usize),

    #[error("parent/child pointers disagree at key index {0}")]
    ParentMismatch(usize),

    #[error("in-order walk visited {visited} nodes but len() reports {reported}")]
    LengthMismatch { visited: usize, reported: usize },
}
