//! An intrusive weak-AVL (wavl) rank-balanced binary search tree.
//!
//! The hard core (`core` module) maintains the rank-balance invariants of a
//! Linux-style wavl tree purely in terms of parent/child pointers and a
//! one-bit-per-node rank parity; it never compares keys and never
//! allocates. [`WavlSet`] is the safe, owning collection built on top of
//! it: it allocates one node per key, does the BST walk the core leaves
//! external, and drives `link`/`insert_fixup`/`erase` the way any caller of
//! the core is expected to.
//!
//! Enable the `consistency_check` feature to have [`WavlSet::insert`] and
//! [`WavlSet::remove`] re-validate every invariant after each mutation,
//! panicking on the first violation found. It is off by default because the
//! check is `O(n)` per call.

mod check;
mod core;
mod error;
mod header;
mod node;
mod set;

pub use check::{check, Checkable};
pub use error::ConsistencyError;
pub use set::{Iter, WavlSet};
