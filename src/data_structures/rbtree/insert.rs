use std::cmp::Ordering;

use log::{debug, trace};

use super::compare::Compare;
use super::node::{Color, Node, NodeId, Side};
use super::observer::Checkpoint;
use super::rotate::Rotation;
use super::{invariant_broken, RBTree};

impl<K, C: Compare<K>> RBTree<K, C> {
    /// Adds `key` and rebalances. Returns `false`, leaving the tree as it
    /// was, if an equal key is already stored.
    pub fn insert(&mut self, key: K) -> bool {
        let Some(id) = self.insert_bst_leaf(key) else {
            debug!("insert skipped, key already present");
            return false;
        };

        self.notify(Checkpoint::AfterBstInsert, id);
        self.rebalance_after_insert(id);
        self.notify(Checkpoint::AfterInsertComplete, id);
        true
    }

    /// Plain binary-search-tree insertion of a red leaf.
    fn insert_bst_leaf(&mut self, key: K) -> Option<NodeId> {
        let mut current = self.root;
        let mut last = None;

        while let Some(id) = current {
            let node = &self.nodes[id];
            let side = match self.compare.compare(&key, &node.key) {
                Ordering::Less => Side::Left,
                Ordering::Greater => Side::Right,
                Ordering::Equal => return None,
            };
            last = Some((id, side));
            current = node.child(side);
        }

        let id = self.nodes.alloc(Node::new(key));
        match last {
            Some((parent, side)) => {
                self.nodes.set_child(parent, side, Some(id));
                trace!("attached {id:?} as {side:?} child of {parent:?}");
            }
            None => {
                self.root = Some(id);
                trace!("attached {id:?} as root");
            }
        }
        Some(id)
    }

    fn rebalance_after_insert(&mut self, mut id: NodeId) {
        while self.nodes.has_red_parent(id) {
            id = self.insert_fixup_step(id);
        }

        // a chain of red-uncle recolors can end with a red root
        if let Some(root) = self.root {
            self.nodes[root].color = Color::Black;
        }
    }

    /// One step of the upward pass for a node whose parent is red. Returns
    /// the node the pass continues from.
    fn insert_fixup_step(&mut self, id: NodeId) -> NodeId {
        let parent = self.parent_of(id);
        let grandparent = self.parent_of(parent);
        let side = self.side_of(parent);

        let uncle = self.nodes[grandparent].child(side.opposite());
        if let Some(uncle) = uncle.filter(|&uncle| self.nodes[uncle].is_red()) {
            self.nodes[uncle].color = Color::Black;
            self.nodes[parent].color = Color::Black;
            self.nodes[grandparent].color = Color::Red;
            self.notify(Checkpoint::AfterRecolorCase1, grandparent);
            return grandparent;
        }

        let mut current = id;
        if self.side_of(current) != side {
            // inner grandchild: straighten the line first
            current = parent;
            self.rotate_or_abort(current, Rotation::toward(side));
        }

        let parent = self.parent_of(current);
        let grandparent = self.parent_of(parent);
        self.nodes[parent].color = Color::Black;
        self.nodes[grandparent].color = Color::Red;
        self.notify(Checkpoint::AfterRecolorCase3Pre, current);

        self.rotate_or_abort(grandparent, Rotation::toward(side.opposite()));
        self.notify(Checkpoint::AfterRecolorCase3Post, current);
        current
    }
}

impl<K, C> RBTree<K, C> {
    pub(crate) fn parent_of(&self, id: NodeId) -> NodeId {
        self.nodes[id]
            .parent
            .unwrap_or_else(|| invariant_broken("expected a parent above a red node"))
    }

    pub(crate) fn side_of(&self, id: NodeId) -> Side {
        self.nodes
            .side_of(id)
            .unwrap_or_else(|| invariant_broken("node missing from its parent's slots"))
    }
}

#[cfg(test)]
mod test {
    use crate::RBTree;

    #[test]
    fn ascending_keys_rotate_at_root() {
        let mut tree = RBTree::new();
        for key in [10, 20, 30] {
            tree.insert(key);
        }

        let root = tree.root().unwrap();
        assert_eq!(*root.key(), 20);
        assert!(root.is_black());
        assert_eq!(*root.left().unwrap().key(), 10);
        assert_eq!(*root.right().unwrap().key(), 30);
        assert_eq!(tree.validate(), Ok(1));
    }

    #[test]
    fn descending_keys_stay_balanced_at_every_step() {
        let mut tree = RBTree::new();
        for (inserted, key) in [50, 40, 30, 20, 10].into_iter().enumerate() {
            assert!(tree.insert(key));
            assert!(tree.validate().is_ok(), "after inserting {key}:\n{tree}");
            let n = (inserted + 1) as f64;
            assert!(tree.height() as f64 <= 2.0 * (n + 1.0).log2());
        }
        assert_eq!(tree.len(), 5);
    }

    #[test]
    fn recolor_chain_reaching_root_keeps_root_black() {
        let mut tree = RBTree::new();
        for key in 1..=10 {
            tree.insert(key);
            assert!(tree.root().unwrap().is_black());
        }
        assert!(tree.validate().is_ok());
    }

    #[test]
    fn every_inserted_key_is_found() {
        let mut tree = RBTree::new();
        let keys = [41, 38, 31, 12, 19, 8, 77, 3, 56, 99, 64];
        for key in keys {
            tree.insert(key);
        }
        for key in keys {
            assert_eq!(tree.find(&key).map(|node| *node.key()), Some(key));
        }
        assert!(!tree.contains(&0));
        assert_eq!(tree.len(), keys.len());
    }
}
