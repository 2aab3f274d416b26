//! Explicit-stack traversals over the node graph
//!
//! All three orders are pure reads implemented with an explicit stack rather
//! than call-stack recursion, so traversal depth never leans on the call
//! stack even for large trees. Each iterator yields a [`NodeView`] carrying
//! the key, the node's identity tag, and the identities of its children:
//! enough for a renderer to rebuild the `identity -> identity` edge graph
//! without touching the nodes themselves.

use super::node::{Link, Node};

/// Borrowed handle to one stored node, as seen during a traversal.
#[derive(Debug, Clone, Copy)]
pub struct NodeView<'a, K> {
    /// The stored key.
    pub key: &'a K,
    /// Creation-order identity tag, stable for the node's lifetime.
    pub identity: u64,
    /// Cached subtree height at this node.
    pub height: u32,
    /// Depth below the root (root is 0).
    pub depth: usize,
    /// Identity of the left child, if any.
    pub left: Option<u64>,
    /// Identity of the right child, if any.
    pub right: Option<u64>,
}

impl<'a, K> NodeView<'a, K> {
    fn of(node: &'a Node<K>, depth: usize) -> Self {
        NodeView {
            key: &node.key,
            identity: node.identity,
            height: node.height,
            depth,
            left: node.left.as_ref().map(|n| n.identity),
            right: node.right.as_ref().map(|n| n.identity),
        }
    }
}

/// Owned snapshot row for one node, for renderers and serialization.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "visualize", derive(serde::Serialize))]
pub struct NodeRecord<K> {
    /// The stored key.
    pub key: K,
    /// Creation-order identity tag.
    pub identity: u64,
    /// Cached subtree height at this node.
    pub height: u32,
    /// Depth below the root (root is 0).
    pub depth: usize,
    /// Identity of the left child, if any.
    pub left: Option<u64>,
    /// Identity of the right child, if any.
    pub right: Option<u64>,
}

impl<K: Clone> NodeRecord<K> {
    pub(crate) fn from_view(view: NodeView<'_, K>) -> Self {
        NodeRecord {
            key: view.key.clone(),
            identity: view.identity,
            height: view.height,
            depth: view.depth,
            left: view.left,
            right: view.right,
        }
    }
}

/// Pre-order traversal: node, then left subtree, then right subtree.
#[derive(Debug)]
pub struct Preorder<'a, K> {
    stack: Vec<(&'a Node<K>, usize)>,
}

impl<'a, K> Preorder<'a, K> {
    pub(crate) fn new(root: &'a Link<K>) -> Self {
        Preorder {
            stack: root.as_deref().map(|n| (n, 0)).into_iter().collect(),
        }
    }
}

impl<'a, K> Iterator for Preorder<'a, K> {
    type Item = NodeView<'a, K>;

    fn next(&mut self) -> Option<Self::Item> {
        let (node, depth) = self.stack.pop()?;
        // Right is pushed first so left pops first.
        if let Some(right) = node.right.as_deref() {
            self.stack.push((right, depth + 1));
        }
        if let Some(left) = node.left.as_deref() {
            self.stack.push((left, depth + 1));
        }
        Some(NodeView::of(node, depth))
    }
}

/// In-order traversal: left subtree, node, right subtree.
///
/// Yields keys in sorted, duplicate-preserving order.
#[derive(Debug)]
pub struct Inorder<'a, K> {
    stack: Vec<(&'a Node<K>, usize)>,
    descent: Option<(&'a Node<K>, usize)>,
}

impl<'a, K> Inorder<'a, K> {
    pub(crate) fn new(root: &'a Link<K>) -> Self {
        Inorder {
            stack: Vec::new(),
            descent: root.as_deref().map(|n| (n, 0)),
        }
    }
}

impl<'a, K> Iterator for Inorder<'a, K> {
    type Item = NodeView<'a, K>;

    fn next(&mut self) -> Option<Self::Item> {
        while let Some((node, depth)) = self.descent.take() {
            self.stack.push((node, depth));
            self.descent = node.left.as_deref().map(|n| (n, depth + 1));
        }
        let (node, depth) = self.stack.pop()?;
        self.descent = node.right.as_deref().map(|n| (n, depth + 1));
        Some(NodeView::of(node, depth))
    }
}

/// Post-order traversal: left subtree, right subtree, node.
#[derive(Debug)]
pub struct Postorder<'a, K> {
    // The flag marks nodes whose children are already on the stack.
    stack: Vec<(&'a Node<K>, usize, bool)>,
}

impl<'a, K> Postorder<'a, K> {
    pub(crate) fn new(root: &'a Link<K>) -> Self {
        Postorder {
            stack: root.as_deref().map(|n| (n, 0, false)).into_iter().collect(),
        }
    }
}

impl<'a, K> Iterator for Postorder<'a, K> {
    type Item = NodeView<'a, K>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            let (node, depth, expanded) = self.stack.pop()?;
            if expanded {
                return Some(NodeView::of(node, depth));
            }
            self.stack.push((node, depth, true));
            if let Some(right) = node.right.as_deref() {
                self.stack.push((right, depth + 1, false));
            }
            if let Some(left) = node.left.as_deref() {
                self.stack.push((left, depth + 1, false));
            }
        }
    }
}
