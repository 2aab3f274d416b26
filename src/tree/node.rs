//! Node record and local restructuring primitives
//!
//! Heights are cached per node (0 for an absent link, 1 for a leaf) so that
//! balance checks stay O(1) during the bottom-up repair pass. Rotations are
//! ownership moves over boxed links; the displaced child's height is
//! recomputed before its new parent's, since the parent depends on it.

use std::cmp::max;

/// An owned, optional subtree link.
pub(crate) type Link<K> = Option<Box<Node<K>>>;

/// One stored key with its cached subtree height and creation-order identity.
#[derive(Debug)]
pub(crate) struct Node<K> {
    pub key: K,
    pub identity: u64,
    pub height: u32,
    pub left: Link<K>,
    pub right: Link<K>,
}

impl<K> Node<K> {
    pub fn new(key: K, identity: u64) -> Box<Self> {
        Box::new(Node {
            key,
            identity,
            height: 1,
            left: None,
            right: None,
        })
    }

    /// Recompute the cached height from the children's caches.
    pub fn update_height(&mut self) {
        self.height = 1 + max(height(&self.left), height(&self.right));
    }

    /// Left subtree height minus right subtree height.
    pub fn balance_factor(&self) -> i32 {
        height(&self.left) as i32 - height(&self.right) as i32
    }
}

/// Cached height of a link, 0 when absent. Never recurses.
#[inline]
pub(crate) fn height<K>(link: &Link<K>) -> u32 {
    link.as_ref().map_or(0, |n| n.height)
}

/// Balance factor of a link, 0 when absent.
#[inline]
pub(crate) fn balance<K>(link: &Link<K>) -> i32 {
    link.as_ref().map_or(0, |n| n.balance_factor())
}

/// Promote the left child over `node`, preserving in-order key sequence.
pub(crate) fn rotate_right<K>(mut node: Box<Node<K>>) -> Box<Node<K>> {
    let mut pivot = node.left.take().expect("right rotation requires a left child");
    node.left = pivot.right.take();
    node.update_height();
    pivot.right = Some(node);
    pivot.update_height();
    pivot
}

/// Promote the right child over `node`, preserving in-order key sequence.
pub(crate) fn rotate_left<K>(mut node: Box<Node<K>>) -> Box<Node<K>> {
    let mut pivot = node.right.take().expect("left rotation requires a right child");
    node.right = pivot.left.take();
    node.update_height();
    pivot.left = Some(node);
    pivot.update_height();
    pivot
}

/// Restore the AVL invariant at `node` after a mutation below it.
///
/// Handles the four classic shapes: a left-heavy node whose left child leans
/// right (or a right-heavy node whose right child leans left) needs a child
/// rotation first to reduce to the single-rotation case.
pub(crate) fn rebalance<K>(mut node: Box<Node<K>>) -> Box<Node<K>> {
    let factor = node.balance_factor();

    if factor > 1 {
        if balance(&node.left) < 0 {
            let left = node.left.take().expect("left-heavy node has a left child");
            node.left = Some(rotate_left(left));
        }
        return rotate_right(node);
    }

    if factor < -1 {
        if balance(&node.right) > 0 {
            let right = node.right.take().expect("right-heavy node has a right child");
            node.right = Some(rotate_right(right));
        }
        return rotate_left(node);
    }

    node
}
