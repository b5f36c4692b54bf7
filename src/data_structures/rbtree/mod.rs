//! Red-black tree over an index arena.
//!
//! Five properties hold after every public operation:
//! 1. every node is red or black
//! 2. the root is black
//! 3. every nil position counts as black (absent children)
//! 4. a red node never has a red parent
//! 5. every path from a node down to a nil position meets the same number
//!    of black nodes
//!
//! Together they keep the height below `2 * log2(n + 1)`.

mod arena;
mod compare;
mod error;
mod insert;
mod node;
mod observer;
mod remove;
mod rotate;
mod validate;

use std::cmp::Ordering;
use std::fmt;
use std::rc::Rc;

use arena::Arena;
use node::Link;

pub use compare::{Compare, NaturalOrder};
pub use error::{InvariantViolation, TreeError};
pub use node::{Color, NodeId, NodeRef};
pub use observer::{Checkpoint, LogObserver, TreeObserver};
pub use rotate::Rotation;

pub struct RBTree<K, C = NaturalOrder> {
    nodes: Arena<K>,
    root: Link,
    compare: C,
    observer: Option<Rc<dyn TreeObserver<K, C>>>,
}

impl<K: Ord> RBTree<K> {
    pub fn new() -> Self {
        Self::with_comparator(NaturalOrder)
    }
}

impl<K: Ord> Default for RBTree<K> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K, C> RBTree<K, C> {
    /// Empty tree ordered by `compare` instead of the key's own `Ord`.
    pub fn with_comparator(compare: C) -> Self {
        Self {
            nodes: Arena::new(),
            root: None,
            compare,
            observer: None,
        }
    }

    /// Attaches an observer, replacing any previous one. The caller keeps
    /// its own handle to read back whatever the observer recorded.
    pub fn set_observer(&mut self, observer: Rc<dyn TreeObserver<K, C>>) {
        self.observer = Some(observer);
    }

    pub fn take_observer(&mut self) -> Option<Rc<dyn TreeObserver<K, C>>> {
        self.observer.take()
    }

    pub fn comparator(&self) -> &C {
        &self.compare
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.root.is_none()
    }

    pub fn root(&self) -> Option<NodeRef<'_, K, C>> {
        self.root.map(|id| NodeRef::new(self, id))
    }

    /// Looks up a node by handle, `None` if the handle no longer names a
    /// live node of this tree.
    pub fn node(&self, id: NodeId) -> Option<NodeRef<'_, K, C>> {
        self.nodes.contains(id).then(|| NodeRef::new(self, id))
    }

    /// Number of nodes on the longest root-to-leaf path.
    pub fn height(&self) -> usize {
        let mut tallest = 0;
        let mut pending: Vec<(NodeId, usize)> = self.root.map(|id| (id, 1)).into_iter().collect();
        while let Some((id, depth)) = pending.pop() {
            tallest = tallest.max(depth);
            let node = &self.nodes[id];
            pending.extend([node.left, node.right].into_iter().flatten().map(|child| (child, depth + 1)));
        }
        tallest
    }

    /// Releases every node. Runs off an explicit work list, so degenerate
    /// shapes cannot exhaust the call stack.
    pub fn clear(&mut self) {
        let mut pending: Vec<NodeId> = self.root.take().into_iter().collect();
        while let Some(id) = pending.pop() {
            let node = self.nodes.release(id);
            pending.extend(node.left);
            pending.extend(node.right);
        }
        self.nodes.reset();
    }
}

impl<K, C: Compare<K>> RBTree<K, C> {
    pub fn find(&self, key: &K) -> Option<NodeRef<'_, K, C>> {
        self.find_id(key).map(|id| NodeRef::new(self, id))
    }

    pub fn contains(&self, key: &K) -> bool {
        self.find_id(key).is_some()
    }

    fn find_id(&self, key: &K) -> Link {
        let mut current = self.root;
        while let Some(id) = current {
            let node = &self.nodes[id];
            current = match self.compare.compare(key, &node.key) {
                Ordering::Equal => return Some(id),
                Ordering::Less => node.left,
                Ordering::Greater => node.right,
            };
        }
        None
    }
}

impl<K, C> Drop for RBTree<K, C> {
    fn drop(&mut self) {
        self.clear();
    }
}

/// Renders the tree sideways, one node per line:
///
/// ```text
/// +- 20 # Black -
///    +- 10 # Red - L
///    +- 30 # Red - R
/// ```
impl<K: fmt::Debug, C> fmt::Display for RBTree<K, C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let Some(root) = self.root else {
            return writeln!(f, "(empty)");
        };

        let mut pending = vec![(root, String::new(), true, "")];
        while let Some((id, indent, is_final, append)) = pending.pop() {
            let node = &self.nodes[id];
            writeln!(f, "{indent}+- {:?} # {:?} - {append}", node.key, node.color)?;

            let new_indent = format!("{indent}{}", if is_final { "   " } else { "|  " });
            if let Some(right) = node.right {
                pending.push((right, new_indent.clone(), true, "R"));
            }
            if let Some(left) = node.left {
                pending.push((left, new_indent, node.right.is_none(), "L"));
            }
        }
        Ok(())
    }
}

impl<K: fmt::Debug, C> fmt::Debug for RBTree<K, C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RBTree")
            .field("len", &self.len())
            .field("root", &self.root())
            .finish_non_exhaustive()
    }
}

#[cold]
#[track_caller]
pub(crate) fn invariant_broken(what: &str) -> ! {
    panic!("red-black invariant broken: {what}")
}
