use std::cell::RefCell;
use std::collections::BTreeSet;
use std::rc::Rc;

use rand::prelude::*;
use rbtree::{Checkpoint, Color, NodeRef, RBTree, TreeError, TreeObserver};
use simplelog::{Config, LevelFilter, TestLogger};

fn init_logging() {
    let _ = TestLogger::init(LevelFilter::Debug, Config::default());
}

fn tree_of(keys: impl IntoIterator<Item = i32>) -> RBTree<i32> {
    let mut tree = RBTree::new();
    for key in keys {
        assert!(tree.insert(key));
    }
    tree
}

#[derive(Default)]
struct Trace(RefCell<Vec<(Checkpoint, i32, Color)>>);

impl TreeObserver<i32> for Trace {
    fn on_checkpoint(&self, checkpoint: Checkpoint, _: &RBTree<i32>, node: NodeRef<'_, i32>) {
        self.0
            .borrow_mut()
            .push((checkpoint, *node.key(), node.color()));
    }
}

#[test]
fn ascending_triple_rotates_at_root() {
    let tree = tree_of([10, 20, 30]);

    let root = tree.root().unwrap();
    assert_eq!(*root.key(), 20);
    assert_eq!(root.color(), Color::Black);
    assert_eq!(*root.left().unwrap().key(), 10);
    assert_eq!(*root.right().unwrap().key(), 30);
    assert!(tree.validate().is_ok());
}

#[test]
fn descending_sequence_stays_shallow() {
    let mut tree = RBTree::new();
    for key in [50, 40, 30, 20, 10] {
        tree.insert(key);
        assert!(tree.validate().is_ok(), "{tree}");
    }
    assert!(tree.height() as f64 <= 2.0 * 6f64.log2());
    assert_eq!(*tree.root().unwrap().key(), 40);
}

#[test]
fn removals_from_seven_keys() {
    let mut tree = tree_of([10, 20, 30, 40, 50, 60, 70]);
    let forty = tree.find(&40).unwrap().id();

    tree.remove(&20).unwrap();
    assert!(tree.validate().is_ok(), "{tree}");
    tree.remove(&40).unwrap();
    assert!(tree.validate().is_ok(), "{tree}");

    assert_eq!(tree.node(forty).map(|node| *node.key()), Some(30));
    assert_eq!(tree.len(), 5);
}

#[test]
fn single_node_tree_empties() {
    let mut tree = tree_of([1]);
    assert_eq!(tree.remove(&1), Ok(1));
    assert!(tree.is_empty());
    for key in -5..5 {
        assert!(tree.find(&key).is_none());
    }
    assert_eq!(tree.remove(&1), Err(TreeError::KeyNotFound));
}

#[test]
fn checkpoint_sequence_for_red_uncle_then_line_case() {
    let mut tree = tree_of([20, 10, 30]);
    let trace = Rc::new(Trace::default());
    tree.set_observer(trace.clone());

    tree.insert(5);
    tree.insert(1);

    assert_eq!(
        *trace.0.borrow(),
        vec![
            (Checkpoint::AfterBstInsert, 5, Color::Red),
            (Checkpoint::AfterRecolorCase1, 20, Color::Red),
            (Checkpoint::AfterInsertComplete, 5, Color::Red),
            (Checkpoint::AfterBstInsert, 1, Color::Red),
            (Checkpoint::AfterRecolorCase3Pre, 1, Color::Red),
            (Checkpoint::AfterRotateRight, 10, Color::Red),
            (Checkpoint::AfterRecolorCase3Post, 1, Color::Red),
            (Checkpoint::AfterInsertComplete, 1, Color::Red),
        ]
    );
    assert!(tree.root().unwrap().is_black());
}

#[test]
fn observer_can_be_detached() {
    let mut tree: RBTree<i32> = RBTree::new();
    let trace = Rc::new(Trace::default());
    tree.set_observer(trace.clone());
    tree.insert(1);
    assert!(tree.take_observer().is_some());
    tree.insert(2);
    assert_eq!(trace.0.borrow().len(), 2);
}

#[test]
fn seeded_churn_agrees_with_btreeset() {
    init_logging();
    let mut rng = StdRng::seed_from_u64(123);
    let mut tree = RBTree::new();
    let mut expected = BTreeSet::new();

    for round in 0..5_000 {
        let key: u16 = rng.random_range(0..512);
        if rng.random_bool(0.6) {
            assert_eq!(tree.insert(key), expected.insert(key));
        } else if expected.remove(&key) {
            assert_eq!(tree.remove(&key), Ok(key));
        } else {
            assert_eq!(tree.remove(&key), Err(TreeError::KeyNotFound));
        }

        assert_eq!(tree.len(), expected.len());
        if round % 250 == 0 {
            assert!(tree.validate().is_ok(), "round {round}:\n{tree}");
        }
    }

    assert!(tree.validate().is_ok());
    for key in &expected {
        assert!(tree.contains(key));
    }
}

#[test]
fn owned_string_keys() {
    let mut tree = RBTree::new();
    for word in ["pear", "apple", "fig", "kiwi", "banana"] {
        tree.insert(word.to_string());
    }
    assert_eq!(tree.root().unwrap().key(), "fig");
    assert!(tree.contains(&"kiwi".to_string()));
    assert_eq!(tree.remove(&"fig".to_string()), Ok("fig".to_string()));
    assert!(tree.validate().is_ok());
}

#[test]
fn large_tree_drops_without_recursion() {
    let mut tree = RBTree::new();
    for key in 0..200_000u32 {
        tree.insert(key);
    }
    assert!(tree.height() <= 2 * 18);
    drop(tree);
}
