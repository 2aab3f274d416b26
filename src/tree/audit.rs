//! From-scratch invariant checking
//!
//! [`AvlTree::validate`](super::AvlTree::validate) trusts the cached heights;
//! this module does not. It remeasures every subtree, so it catches a stale
//! height cache as well as balance and ordering violations, and it reports
//! the offending node's identity instead of panicking, so the tree stays
//! usable as a post-mortem subject.

use thiserror::Error;

use super::node::{Link, Node};

/// A structural invariant broken somewhere in the tree.
///
/// Carries the identity tag of the first offending node found (post-order),
/// so a renderer or test can point at the exact node.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum InvariantViolation {
    /// A node's subtrees differ in height by more than one.
    #[error("node {identity} is out of balance (factor {factor})")]
    Unbalanced {
        /// Identity of the unbalanced node.
        identity: u64,
        /// Measured balance factor at that node.
        factor: i64,
    },
    /// A key sits on the wrong side of an ancestor.
    #[error("node {identity} breaks search order")]
    OutOfOrder {
        /// Identity of the node whose subtree breaks the order.
        identity: u64,
    },
    /// A cached height disagrees with the subtree's measured height.
    #[error("node {identity} caches height {cached}, measured {measured}")]
    StaleHeight {
        /// Identity of the node with the stale cache.
        identity: u64,
        /// The cached value.
        cached: u32,
        /// The height measured from scratch.
        measured: u32,
    },
}

/// Measured facts about a non-empty subtree.
struct Summary<'a, K> {
    height: u32,
    min: &'a K,
    max: &'a K,
}

pub(crate) fn check<K: Ord>(root: &Link<K>) -> Result<(), InvariantViolation> {
    check_subtree(root).map(|_| ())
}

fn check_subtree<K: Ord>(link: &Link<K>) -> Result<Option<Summary<'_, K>>, InvariantViolation> {
    let node: &Node<K> = match link.as_deref() {
        None => return Ok(None),
        Some(node) => node,
    };

    let left = check_subtree(&node.left)?;
    let right = check_subtree(&node.right)?;

    // Left subtree strictly below the key; duplicates live on the right.
    let (left_height, min) = match left {
        Some(summary) => {
            if *summary.max >= node.key {
                return Err(InvariantViolation::OutOfOrder {
                    identity: node.identity,
                });
            }
            (summary.height, summary.min)
        }
        None => (0, &node.key),
    };
    let (right_height, max) = match right {
        Some(summary) => {
            if *summary.min < node.key {
                return Err(InvariantViolation::OutOfOrder {
                    identity: node.identity,
                });
            }
            (summary.height, summary.max)
        }
        None => (0, &node.key),
    };

    let measured = 1 + left_height.max(right_height);
    if node.height != measured {
        return Err(InvariantViolation::StaleHeight {
            identity: node.identity,
            cached: node.height,
            measured,
        });
    }

    let factor = i64::from(left_height) - i64::from(right_height);
    if factor.abs() > 1 {
        return Err(InvariantViolation::Unbalanced {
            identity: node.identity,
            factor,
        });
    }

    Ok(Some(Summary {
        height: measured,
        min,
        max,
    }))
}
