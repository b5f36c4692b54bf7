use std::cmp::Ordering;

use super::compare::Compare;
use super::error::InvariantViolation;
use super::node::NodeId;
use super::RBTree;

impl<K, C: Compare<K>> RBTree<K, C> {
    /// Checks linkage, coloring, black heights and key order.
    ///
    /// Returns the number of black nodes on every path from the root down to
    /// a nil position. Both walks use explicit stacks.
    pub fn validate(&self) -> Result<usize, InvariantViolation> {
        let Some(root) = self.root else {
            return match self.nodes.len() {
                0 => Ok(0),
                recorded => Err(InvariantViolation::CountMismatch {
                    reachable: 0,
                    recorded,
                }),
            };
        };

        let root_node = &self.nodes[root];
        if root_node.parent.is_some() {
            return Err(InvariantViolation::RootHasParent);
        }
        if root_node.is_red() {
            return Err(InvariantViolation::RedRoot);
        }

        let black_height = self.check_heights(root)?;
        self.check_order(root)?;
        Ok(black_height)
    }

    /// Post-order walk computing each subtree's black height.
    fn check_heights(&self, root: NodeId) -> Result<usize, InvariantViolation> {
        let mut heights = vec![0; self.nodes.capacity()];
        let mut reachable = 0;
        let mut pending = vec![(root, false)];

        while let Some((id, expanded)) = pending.pop() {
            let node = &self.nodes[id];
            if !expanded {
                pending.push((id, true));
                for child in [node.right, node.left].into_iter().flatten() {
                    let child_node = &self.nodes[child];
                    if child_node.parent != Some(id) {
                        return Err(InvariantViolation::BrokenParentLink { child });
                    }
                    if node.is_red() && child_node.is_red() {
                        return Err(InvariantViolation::RedChildOfRed { child });
                    }
                    pending.push((child, false));
                }
                continue;
            }

            reachable += 1;
            let left = node.left.map_or(0, |child| heights[child.0]);
            let right = node.right.map_or(0, |child| heights[child.0]);
            if left != right {
                return Err(InvariantViolation::BlackHeightMismatch {
                    node: id,
                    left,
                    right,
                });
            }
            heights[id.0] = left + usize::from(node.is_black());
        }

        if reachable != self.nodes.len() {
            return Err(InvariantViolation::CountMismatch {
                reachable,
                recorded: self.nodes.len(),
            });
        }
        Ok(heights[root.0])
    }

    /// In-order walk requiring strictly ascending keys.
    fn check_order(&self, root: NodeId) -> Result<(), InvariantViolation> {
        let mut stack = Vec::new();
        let mut current = Some(root);
        let mut previous: Option<NodeId> = None;

        loop {
            while let Some(id) = current {
                stack.push(id);
                current = self.nodes[id].left;
            }
            let Some(id) = stack.pop() else {
                return Ok(());
            };

            if let Some(previous) = previous {
                let ordering = self
                    .compare
                    .compare(&self.nodes[previous].key, &self.nodes[id].key);
                if ordering != Ordering::Less {
                    return Err(InvariantViolation::OutOfOrder { node: id });
                }
            }
            previous = Some(id);
            current = self.nodes[id].right;
        }
    }
}
