use log::{debug, trace};

use super::arena::Relink;
use super::compare::Compare;
use super::error::TreeError;
use super::node::{Color, NodeId, Side};
use super::rotate::Rotation;
use super::{invariant_broken, RBTree};

impl<K, C: Compare<K>> RBTree<K, C> {
    /// Removes the node holding `key` and hands the key back.
    ///
    /// A node with two children is not moved: its in-order predecessor's key
    /// takes its place and the predecessor, which has at most one child, is
    /// spliced out instead.
    pub fn remove(&mut self, key: &K) -> Result<K, TreeError> {
        let Some(mut id) = self.find_id(key) else {
            debug!("remove failed, key not in tree");
            return Err(TreeError::KeyNotFound);
        };

        let node = &self.nodes[id];
        if node.left.is_some() && node.right.is_some() {
            let predecessor = self
                .nodes
                .predecessor(id)
                .unwrap_or_else(|| invariant_broken("left subtree without a rightmost node"));
            self.nodes.swap_keys(id, predecessor);
            id = predecessor;
        }

        self.splice(id);
        Ok(self.nodes.release(id).key)
    }

    /// Unlinks a node with at most one child, promoting that child into its
    /// slot, and repairs black heights if a black node went away.
    fn splice(&mut self, id: NodeId) {
        let node = &self.nodes[id];
        let child = node.left.or(node.right);
        let removed_black = node.is_black();
        let parent = node.parent;

        match child {
            Some(child) => {
                match parent {
                    Some(parent) => {
                        let side = self.side_of(id);
                        if let Relink::Replaced(previous) = self.nodes.set_child(parent, side, Some(child)) {
                            debug_assert_eq!(previous, Some(id));
                        }
                    }
                    None => {
                        self.nodes.detach(child);
                        self.root = Some(child);
                    }
                }
                trace!("spliced {id:?}, promoted {child:?}");

                if removed_black {
                    self.rebalance_after_remove(child);
                }
            }
            None if parent.is_none() => {
                self.root = None;
                trace!("spliced {id:?}, tree is empty");
            }
            None => {
                // the leaf stays linked as the placeholder for the empty slot
                // while the fixup looks at its sibling
                if removed_black {
                    self.rebalance_after_remove(id);
                }
                self.nodes.detach(id);
                trace!("spliced leaf {id:?}");
            }
        }
    }

    /// Resolves the missing black on the path through `id`.
    fn rebalance_after_remove(&mut self, mut id: NodeId) {
        while Some(id) != self.root && self.nodes[id].is_black() {
            let parent = self.parent_of(id);
            let side = self.side_of(id);
            let far = side.opposite();

            let mut sibling = self.child_of(parent, far);
            if self.nodes[sibling].is_red() {
                self.nodes[sibling].color = Color::Black;
                self.nodes[parent].color = Color::Red;
                self.rotate_or_abort(parent, Rotation::toward(side));
                sibling = self.child_of(parent, far);
            }

            let near_child = self.nodes[sibling].child(side);
            let far_child = self.nodes[sibling].child(far);
            if self.nodes.is_black(near_child) && self.nodes.is_black(far_child) {
                self.nodes[sibling].color = Color::Red;
                id = parent;
                continue;
            }

            if self.nodes.is_black(far_child) {
                if let Some(near_child) = near_child {
                    self.nodes[near_child].color = Color::Black;
                }
                self.nodes[sibling].color = Color::Red;
                self.rotate_or_abort(sibling, Rotation::toward(far));
                sibling = self.child_of(parent, far);
            }

            let parent_color = self.nodes[parent].color;
            self.nodes[sibling].color = parent_color;
            self.nodes[parent].color = Color::Black;
            if let Some(far_child) = self.nodes[sibling].child(far) {
                self.nodes[far_child].color = Color::Black;
            }
            self.rotate_or_abort(parent, Rotation::toward(side));
            break;
        }

        self.nodes[id].color = Color::Black;
    }

    fn child_of(&self, id: NodeId, side: Side) -> NodeId {
        self.nodes[id]
            .child(side)
            .unwrap_or_else(|| invariant_broken("doubly black node without a sibling"))
    }
}
