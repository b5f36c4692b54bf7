//! An arena-backed red-black tree with a pluggable key ordering and an
//! optional checkpoint observer for instrumenting the rebalancing steps.
//!
//! ```
//! use rbtree::RBTree;
//!
//! let mut tree = RBTree::new();
//! for key in [10, 20, 30] {
//!     tree.insert(key);
//! }
//!
//! let root = tree.root().unwrap();
//! assert_eq!(*root.key(), 20);
//! assert!(root.is_black());
//!
//! assert_eq!(tree.remove(&20), Ok(20));
//! assert!(tree.find(&20).is_none());
//! ```

pub mod data_structures;

pub use data_structures::rbtree::{
    Checkpoint, Color, Compare, InvariantViolation, LogObserver, NaturalOrder, NodeId, NodeRef,
    RBTree, Rotation, TreeError, TreeObserver,
};
