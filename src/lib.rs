//! # Height-Balanced Ordered Multiset
//!
//! An AVL tree over totally-ordered keys: insert, delete, the three classic
//! traversals, exact duplicate counting, split-by-pivot, merge, and two
//! levels of structural validation.
//!
//! ## Core guarantees
//!
//! 1. **BST order**: left subtree strictly below a node's key, duplicates
//!    routed right; in-order traversal yields a sorted sequence.
//! 2. **AVL balance**: every node's subtree heights differ by at most one,
//!    repaired bottom-up with at most one rotation (or pair) per level.
//! 3. **Height cache**: each node caches its subtree height, kept exact
//!    across every public operation.
//! 4. **Stable identities**: every node carries a creation-order identity
//!    tag for external handles (renderers build `identity -> identity` edge
//!    graphs from traversal views).
//!
//! ## Usage
//!
//! ```
//! use canopy::AvlTree;
//!
//! let mut tree = AvlTree::new();
//! for key in [50, 30, 70, 20, 40, 60, 80] {
//!     tree.insert(key);
//! }
//! tree.delete(&50);
//! assert!(tree.validate());
//!
//! let (below, at_or_above) = tree.split(&40);
//! assert!(below.inorder().all(|v| *v.key < 40));
//! assert!(at_or_above.inorder().all(|v| *v.key >= 40));
//! ```

#![warn(missing_docs, missing_debug_implementations)]

pub mod generate; // Random fixture growth for tests and demos
pub mod tree; // The balanced multiset itself

// Re-exports for convenience
pub use generate::{random_tree, GrowthConfig, GrowthError};
pub use tree::{AvlTree, InvariantViolation, NodeRecord, NodeView};
