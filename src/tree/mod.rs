//! Height-balanced ordered multiset
//!
//! A classic AVL tree over a single owned root link. Every mutation recurses
//! down the affected path and rebuilds it bottom-up, refreshing cached
//! heights and rotating where the balance factor leaves `{-1, 0, 1}`, so
//! search, insert, and delete stay logarithmic and the shape never
//! degenerates into a list.
//!
//! Duplicates are allowed and always routed into the right subtree. Each
//! node carries an identity tag drawn from a per-tree creation counter,
//! giving external observers (e.g. a renderer) a handle that survives
//! rotations.

mod audit;
mod node;
mod traversal;

pub use audit::InvariantViolation;
pub use traversal::{Inorder, NodeRecord, NodeView, Postorder, Preorder};

use std::cmp::Ordering;

use node::{balance, rebalance, Link, Node};

/// Height-balanced ordered multiset of keys.
///
/// ```
/// use canopy::AvlTree;
///
/// let mut tree = AvlTree::new();
/// for key in [10, 20, 30] {
///     tree.insert(key);
/// }
/// let sorted: Vec<i64> = tree.inorder().map(|v| *v.key).collect();
/// assert_eq!(sorted, vec![10, 20, 30]);
/// assert_eq!(tree.height(), 2); // the 10-20-30 chain was rotated
/// ```
#[derive(Debug)]
pub struct AvlTree<K> {
    root: Link<K>,
    next_identity: u64,
    len: usize,
}

impl<K> Default for AvlTree<K> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K> AvlTree<K> {
    /// Create an empty tree.
    pub fn new() -> Self {
        AvlTree {
            root: None,
            next_identity: 0,
            len: 0,
        }
    }

    /// Number of stored keys, duplicates included.
    pub fn len(&self) -> usize {
        self.len
    }

    /// Whether the tree holds no keys.
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Height of the root, 0 for an empty tree. O(1) via the cache.
    pub fn height(&self) -> u32 {
        node::height(&self.root)
    }

    /// Pre-order traversal (node, left, right).
    pub fn preorder(&self) -> Preorder<'_, K> {
        Preorder::new(&self.root)
    }

    /// In-order traversal (left, node, right); keys come out sorted.
    pub fn inorder(&self) -> Inorder<'_, K> {
        Inorder::new(&self.root)
    }

    /// Post-order traversal (left, right, node).
    pub fn postorder(&self) -> Postorder<'_, K> {
        Postorder::new(&self.root)
    }

    /// Cheap balance check over the cached heights.
    ///
    /// True iff every node's balance factor is within `{-1, 0, 1}`. Trusts
    /// the height caches; [`AvlTree::audit`] is the form that does not.
    pub fn validate(&self) -> bool {
        fn balanced<K>(link: &Link<K>) -> bool {
            match link.as_deref() {
                None => true,
                Some(n) => {
                    balance(link).abs() <= 1 && balanced(&n.left) && balanced(&n.right)
                }
            }
        }
        balanced(&self.root)
    }
}

impl<K: Ord> AvlTree<K> {
    /// Insert a key, keeping the tree balanced. Duplicates are accepted and
    /// routed into the right subtree. Allocates exactly one identity tag.
    pub fn insert(&mut self, key: K) {
        self.next_identity += 1;
        let identity = self.next_identity;
        self.root = Some(insert_at(self.root.take(), key, identity));
        self.len += 1;
    }

    /// Remove one occurrence of `key`. Returns whether a node was removed;
    /// an absent key (or an empty tree) is a no-op.
    ///
    /// When the matched node has two children, the in-order successor's key
    /// moves into it and the successor node is unlinked. The surviving node
    /// keeps its identity tag, so identity is a *position* handle: observers
    /// tracking it will see its key change across such a delete.
    pub fn delete(&mut self, key: &K) -> bool {
        let mut removed = false;
        self.root = remove_at(self.root.take(), key, &mut removed);
        if removed {
            self.len -= 1;
        }
        removed
    }

    /// Exact number of stored keys equal to `key`, 0 when absent.
    ///
    /// Full O(n) scan on purpose: once rotations have rearranged the tree,
    /// equal keys are not guaranteed to lie on one downward path, so a
    /// guided descent can undercount.
    pub fn count_equal(&self, key: &K) -> usize {
        self.preorder().filter(|view| view.key == key).count()
    }

    /// From-scratch invariant audit: remeasures every subtree height and
    /// checks balance, search order, and height-cache exactness. Reports the
    /// first offending node's identity instead of panicking.
    pub fn audit(&self) -> Result<(), InvariantViolation> {
        audit::check(&self.root)
    }

    /// Partition the tree into two fresh, independent trees: keys strictly
    /// below `pivot` and keys at-or-above it.
    ///
    /// Both results are rebuilt by ordinary insertion, so they are balanced
    /// by construction and share no nodes with the consumed input; identity
    /// tags start over in each result. O(n log n).
    pub fn split(mut self, pivot: &K) -> (AvlTree<K>, AvlTree<K>) {
        let mut below = AvlTree::new();
        let mut at_or_above = AvlTree::new();

        let mut pending: Vec<Box<Node<K>>> = self.root.take().into_iter().collect();
        while let Some(mut node) = pending.pop() {
            if let Some(left) = node.left.take() {
                pending.push(left);
            }
            if let Some(right) = node.right.take() {
                pending.push(right);
            }
            if node.key < *pivot {
                below.insert(node.key);
            } else {
                at_or_above.insert(node.key);
            }
        }

        tracing::debug!(
            below = below.len,
            at_or_above = at_or_above.len,
            "split rebuilt both halves"
        );
        (below, at_or_above)
    }
}

impl<K: Ord + Clone> AvlTree<K> {
    /// Build a fresh tree holding every key from both inputs, duplicates
    /// additive. Neither input is modified; the result shares no nodes with
    /// them and starts its own identity counter. O((n+m) log(n+m)).
    pub fn merge(a: &AvlTree<K>, b: &AvlTree<K>) -> AvlTree<K> {
        let mut merged = AvlTree::new();
        for view in a.preorder() {
            merged.insert(view.key.clone());
        }
        for view in b.preorder() {
            merged.insert(view.key.clone());
        }
        tracing::debug!(len = merged.len, "merge rebuilt union");
        merged
    }
}

impl<K: Clone> AvlTree<K> {
    /// Owned pre-order snapshot of the tree, one [`NodeRecord`] per node.
    ///
    /// The records carry identities and child identities, which is enough to
    /// rebuild the edge graph a renderer draws.
    pub fn snapshot(&self) -> Vec<NodeRecord<K>> {
        self.preorder().map(NodeRecord::from_view).collect()
    }
}

/// Insert `key` under `link`, returning the possibly-rotated new subtree root.
fn insert_at<K: Ord>(link: Link<K>, key: K, identity: u64) -> Box<Node<K>> {
    let mut node = match link {
        None => return Node::new(key, identity),
        Some(node) => node,
    };

    if key < node.key {
        node.left = Some(insert_at(node.left.take(), key, identity));
    } else {
        // Equal keys go right.
        node.right = Some(insert_at(node.right.take(), key, identity));
    }

    node.update_height();
    rebalance(node)
}

/// Remove one node matching `key` under `link`, rebalancing the return path.
fn remove_at<K: Ord>(link: Link<K>, key: &K, removed: &mut bool) -> Link<K> {
    let mut node = match link {
        None => return None,
        Some(node) => node,
    };

    match key.cmp(&node.key) {
        Ordering::Less => node.left = remove_at(node.left.take(), key, removed),
        Ordering::Greater => node.right = remove_at(node.right.take(), key, removed),
        Ordering::Equal => {
            *removed = true;
            if node.left.is_none() {
                return node.right.take();
            }
            if node.right.is_none() {
                return node.left.take();
            }
            // Two children: unlink the in-order successor and move its key
            // here. The node's identity stays put.
            let right = node.right.take().expect("two-children case");
            let (rest, successor) = take_min(right);
            node.key = successor.key;
            node.right = rest;
        }
    }

    node.update_height();
    Some(rebalance(node))
}

/// Detach the leftmost node of `node`'s subtree, rebalancing the path down
/// to it. Returns the remaining subtree and the detached node.
fn take_min<K: Ord>(mut node: Box<Node<K>>) -> (Link<K>, Box<Node<K>>) {
    match node.left.take() {
        None => {
            let rest = node.right.take();
            (rest, node)
        }
        Some(left) => {
            let (rest, min) = take_min(left);
            node.left = rest;
            node.update_height();
            (Some(rebalance(node)), min)
        }
    }
}
