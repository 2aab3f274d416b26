//! Shared helpers for the integration tests

#![allow(dead_code)]

use canopy::AvlTree;

/// Build a tree by inserting the keys in order.
pub fn tree_from(keys: &[i64]) -> AvlTree<i64> {
    let mut tree = AvlTree::new();
    for &key in keys {
        tree.insert(key);
    }
    tree
}

/// In-order key sequence of a tree.
pub fn inorder_keys(tree: &AvlTree<i64>) -> Vec<i64> {
    tree.inorder().map(|view| *view.key).collect()
}

/// Key of the current root, if any.
pub fn root_key(tree: &AvlTree<i64>) -> Option<i64> {
    tree.preorder().next().map(|view| *view.key)
}

/// Assert both validation forms pass.
pub fn assert_sound(tree: &AvlTree<i64>) {
    assert!(tree.validate(), "cached-height balance check failed");
    tree.audit().expect("from-scratch audit failed");
}
