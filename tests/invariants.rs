//! Invariant preservation across insert/delete sequences, plus the concrete
//! rotation and deletion scenarios the structure must reproduce exactly.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use test_case::test_case;

use canopy::AvlTree;

mod test_helpers;
use test_helpers::*;

#[test]
fn ascending_chain_rotates_at_the_root() {
    let tree = tree_from(&[10, 20, 30]);
    assert_eq!(inorder_keys(&tree), vec![10, 20, 30]);
    assert_eq!(root_key(&tree), Some(20));
    assert_eq!(tree.height(), 2);
    assert_sound(&tree);
}

#[test]
fn delete_with_two_children_promotes_the_successor() {
    let mut tree = tree_from(&[50, 30, 70, 20, 40, 60, 80]);
    assert!(tree.delete(&50));
    assert_eq!(root_key(&tree), Some(60));
    assert_eq!(inorder_keys(&tree), vec![20, 30, 40, 60, 70, 80]);
    assert_sound(&tree);
}

// The three removal shapes: leaf, single child, two children.
#[test_case(&[20, 10], 10, &[20]; "leaf")]
#[test_case(&[20, 10, 30, 5], 10, &[5, 20, 30]; "single left child")]
#[test_case(&[20, 10, 30, 25, 40], 30, &[10, 20, 25, 40]; "two children")]
fn delete_shapes(build: &[i64], victim: i64, expect: &[i64]) {
    let mut tree = tree_from(build);
    assert!(tree.delete(&victim));
    assert_eq!(inorder_keys(&tree), expect);
    assert_sound(&tree);
}

#[test]
fn duplicate_keys_count_exactly() {
    let tree = tree_from(&[5, 5, 5]);
    assert_eq!(tree.count_equal(&5), 3);
    assert_eq!(tree.count_equal(&6), 0);
    assert_eq!(tree.len(), 3);
    assert_sound(&tree);
}

#[test]
fn deleting_duplicates_one_at_a_time() {
    let mut tree = tree_from(&[5, 5, 5]);
    for remaining in (0..3).rev() {
        assert!(tree.delete(&5));
        assert_eq!(tree.count_equal(&5), remaining);
        assert_sound(&tree);
    }
    assert!(!tree.delete(&5));
    assert!(tree.is_empty());
}

#[test]
fn absent_key_operations_are_noops() {
    let mut tree = tree_from(&[1, 2, 3]);
    assert!(!tree.delete(&99));
    assert_eq!(tree.len(), 3);
    assert_eq!(tree.count_equal(&99), 0);

    let mut empty: AvlTree<i64> = AvlTree::new();
    assert!(!empty.delete(&1));
    assert_eq!(empty.height(), 0);
    assert!(empty.validate());
    empty.audit().unwrap();
}

#[test]
fn ascending_and_descending_floods_stay_logarithmic() {
    let mut up = AvlTree::new();
    for key in 0..1024 {
        up.insert(key);
    }
    let mut down = AvlTree::new();
    for key in (0..1024).rev() {
        down.insert(key);
    }

    // 1024 keys fit in height 11 at worst for an AVL shape.
    assert!(up.height() <= 11, "height {} after ascending flood", up.height());
    assert!(down.height() <= 11, "height {} after descending flood", down.height());
    assert_sound(&up);
    assert_sound(&down);
}

#[test]
fn random_churn_keeps_every_invariant() {
    let mut rng = StdRng::seed_from_u64(42);
    let mut tree = AvlTree::new();
    let mut shadow: Vec<i64> = Vec::new();

    for _ in 0..2_000 {
        let key = rng.gen_range(0..200);
        if rng.gen_bool(0.6) {
            tree.insert(key);
            let at = shadow.partition_point(|&k| k <= key);
            shadow.insert(at, key);
        } else {
            let removed = tree.delete(&key);
            let present = shadow.iter().position(|&k| k == key);
            assert_eq!(removed, present.is_some());
            if let Some(at) = present {
                shadow.remove(at);
            }
        }

        assert_sound(&tree);
        assert_eq!(tree.len(), shadow.len());
    }

    assert_eq!(inorder_keys(&tree), shadow);
}

#[test]
fn traversals_visit_every_node_exactly_once() {
    let tree = tree_from(&[8, 3, 10, 1, 6, 14, 4, 7, 13]);
    let n = tree.len();
    assert_eq!(tree.preorder().count(), n);
    assert_eq!(tree.inorder().count(), n);
    assert_eq!(tree.postorder().count(), n);

    let mut pre: Vec<i64> = tree.preorder().map(|v| *v.key).collect();
    let mut post: Vec<i64> = tree.postorder().map(|v| *v.key).collect();
    pre.sort_unstable();
    post.sort_unstable();
    assert_eq!(pre, inorder_keys(&tree));
    assert_eq!(post, inorder_keys(&tree));
}

#[test]
fn snapshot_depths_match_edge_distance_from_root() {
    let tree = tree_from(&[4, 2, 6, 1, 3, 5, 7]);
    let records = tree.snapshot();

    let root = &records[0];
    assert_eq!(root.depth, 0);
    for record in &records {
        for child_id in [record.left, record.right].into_iter().flatten() {
            let child = records
                .iter()
                .find(|r| r.identity == child_id)
                .expect("child identity present in snapshot");
            assert_eq!(child.depth, record.depth + 1);
        }
    }
}
