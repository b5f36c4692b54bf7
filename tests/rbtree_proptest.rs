//! Property-based tests: random insert/remove sequences checked against
//! `BTreeSet` and the tree's own invariant audit.

use std::collections::BTreeSet;

use proptest::prelude::*;
use rbtree::{RBTree, TreeError};

#[derive(Clone, Debug)]
enum Op {
    Insert(i16),
    Remove(i16),
}

fn arbitrary_op() -> impl Strategy<Value = Op> {
    prop_oneof![
        3 => any::<i16>().prop_map(|key| Op::Insert(key % 256)),
        2 => any::<i16>().prop_map(|key| Op::Remove(key % 256)),
    ]
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(256))]

    /// Every step keeps the red-black invariants and agrees with a
    /// reference set on membership and size.
    #[test]
    fn matches_reference_set(ops in prop::collection::vec(arbitrary_op(), 0..300)) {
        let mut tree = RBTree::new();
        let mut expected = BTreeSet::new();

        for op in &ops {
            match *op {
                Op::Insert(key) => {
                    let before = tree.len();
                    let fresh = expected.insert(key);
                    prop_assert_eq!(tree.insert(key), fresh);
                    prop_assert_eq!(tree.len(), before + usize::from(fresh));
                }
                Op::Remove(key) => {
                    let before = tree.len();
                    if expected.remove(&key) {
                        prop_assert_eq!(tree.remove(&key), Ok(key));
                        prop_assert_eq!(tree.len(), before - 1);
                    } else {
                        prop_assert_eq!(tree.remove(&key), Err(TreeError::KeyNotFound));
                        prop_assert_eq!(tree.len(), before);
                    }
                }
            }
            prop_assert!(tree.validate().is_ok(), "after {:?}:\n{}", op, tree);
        }

        for key in &expected {
            prop_assert_eq!(tree.find(key).map(|node| *node.key()), Some(*key));
        }
        for key in -256..256i16 {
            prop_assert_eq!(tree.contains(&key), expected.contains(&key));
        }
    }

    /// Height never exceeds `2 * log2(n + 1)`.
    #[test]
    fn height_is_logarithmic(keys in prop::collection::hash_set(any::<u32>(), 1..500)) {
        let mut tree = RBTree::new();
        for key in &keys {
            tree.insert(*key);
        }
        let bound = 2.0 * ((keys.len() + 1) as f64).log2();
        prop_assert!(tree.height() as f64 <= bound);
        prop_assert_eq!(tree.len(), keys.len());
    }

    /// A reversed comparator stores the same keys in mirrored order.
    #[test]
    fn custom_order_is_respected(keys in prop::collection::vec(any::<i32>(), 0..200)) {
        let mut tree = RBTree::with_comparator(|lhs: &i32, rhs: &i32| rhs.cmp(lhs));
        for key in &keys {
            tree.insert(*key);
        }
        prop_assert!(tree.validate().is_ok());

        if let Some(root) = tree.root() {
            if let Some(left) = root.left() {
                prop_assert!(left.key() > root.key());
            }
            if let Some(right) = root.right() {
                prop_assert!(right.key() < root.key());
            }
        }
    }
}
