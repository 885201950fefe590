//! Consistency checker: an independent, O(n) re-derivation of every
//! invariant the hard core is supposed to maintain. Not part of the hard
//! core itself, it exists for tests and for the `consistency_check`
//! feature, and is allowed the auxiliary stacks the core's own routines
//! are forbidden from using.

use std::collections::HashMap;
use std::ptr::NonNull;

use crate::error::ConsistencyError;
use crate::node::{child, node_parity, parent_of, parity_of, Link, Node, Side};

/// Anything the checker can walk: a root link plus the length the owner
/// believes it holds. Implemented by [`crate::WavlSet`].
pub trait Checkable<T> {
    fn root(&self) -> Link<T>;
    fn reported_len(&self) -> usize;
}

/// Verifies P1 (strict ordering), the rank rule (P2/I1, every non-root
/// rank-difference is 1 or 2), the no-2,2-leaf rule (P3/I3), parent/child
/// agreement (P5), and that the node count matches `reported_len()` (P6).
///
/// Returns the first violation found, walking keys in ascending order.
pub fn check<T, C>(tree: &C) -> Result<(), ConsistencyError>
where
    T: Ord,
    C: Checkable<T>,
{
    let root = match tree.root() {
        Some(root) => root,
        None => {
            return if tree.reported_len() == 0 {
                Ok(())
            } else {
                Err(ConsistencyError::LengthMismatch {
                    visited: 0,
                    reported: tree.reported_len(),
                })
            };
        }
    };

    let order = in_order(root);

    for w in order.windows(2) {
        let (a, b) = (w[0], w[1]);
        let ak = unsafe { &a.as_ref().key };
        let bk = unsafe { &b.as_ref().key };
        if ak >= bk {
            let idx = order.iter().position(|&n| n == b).unwrap();
            return Err(ConsistencyError::OutOfOrder(idx));
        }
    }

    if order.len() != tree.reported_len() {
        return Err(ConsistencyError::LengthMismatch {
            visited: order.len(),
            reported: tree.reported_len(),
        });
    }

    let index_of: HashMap<NonNull<Node<T>>, usize> = order
        .iter()
        .enumerate()
        .map(|(i, &n)| (n, i))
        .collect();

    let mut rank: HashMap<NonNull<Node<T>>, i64> = HashMap::with_capacity(order.len());
    for &node in post_order(root).iter() {
        let l = unsafe { child(node, Side::Left) };
        let r = unsafe { child(node, Side::Right) };
        let lr = l.map_or(-1, |n| rank[&n]);
        let rr = r.map_or(-1, |n| rank[&n]);
        let this_rank = 1 + lr.max(rr);
        rank.insert(node, this_rank);

        let at = index_of[&node];

        let diff_l = this_rank - lr;
        let diff_r = this_rank - rr;
        if !(1..=2).contains(&diff_l) {
            return Err(ConsistencyError::RankRuleViolation {
                at,
                actual: diff_l as u32,
            });
        }
        if !(1..=2).contains(&diff_r) {
            return Err(ConsistencyError::RankRuleViolation {
                at,
                actual: diff_r as u32,
            });
        }
        if diff_l == 2 && diff_r == 2 {
            return Err(ConsistencyError::TwoTwoLeaf(at));
        }

        let expected_parity = this_rank % 2 != 0;
        if unsafe { node_parity(node) } != expected_parity {
            return Err(ConsistencyError::RankRuleViolation {
                at,
                actual: unsafe { parity_of(Some(node)) } as u32,
            });
        }

        if let Some(l) = l {
            if unsafe { parent_of(l) } != Some(node) {
                return Err(ConsistencyError::ParentMismatch(at));
            }
        }
        if let Some(r) = r {
            if unsafe { parent_of(r) } != Some(node) {
                return Err(ConsistencyError::ParentMismatch(at));
            }
        }
    }

    Ok(())
}

fn in_order<T>(root: NonNull<Node<T>>) -> Vec<NonNull<Node<T>>> {
    let mut out = Vec::new();
    let mut stack = Vec::new();
    let mut cur = Some(root);
    loop {
        while let Some(node) = cur {
            stack.push(node);
            cur = unsafe { child(node, Side::Left) };
        }
        match stack.pop() {
            Some(node) => {
                out.push(node);
                cur = unsafe { child(node, Side::Right) };
            }
            None => break,
        }
    }
    out
}

fn post_order<T>(root: NonNull<Node<T>>) -> Vec<NonNull<Node<T>>> {
    // Classic iterative post-order via a reversed pre-order (root, right,
    // left) walk, bounded by node count just like `in_order` above.
    let mut out = Vec::new();
    let mut stack = vec![root];
    while let Some(node) = stack.pop() {
        out.push(node);
        if let Some(l) = unsafe { child(node, Side::Left) } {
            stack.push(l);
        }
        if let Some(r) = unsafe { child(node, Side::Right) } {
            stack.push(r);
        }
    }
    out.reverse();
    out
}
