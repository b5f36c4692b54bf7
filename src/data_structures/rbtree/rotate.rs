use std::fmt;

use log::trace;

use super::error::TreeError;
use super::node::{NodeId, Side};
use super::observer::Checkpoint;
use super::{invariant_broken, RBTree};

/// Direction of a single rotation, named after the way the rotated node
/// moves: a left rotation lifts the right child above its parent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Rotation {
    Left,
    Right,
}

impl Rotation {
    /// The rotation that moves a node down into its `side` slot.
    pub(crate) fn toward(side: Side) -> Self {
        match side {
            Side::Left => Rotation::Left,
            Side::Right => Rotation::Right,
        }
    }

    fn down_side(self) -> Side {
        match self {
            Rotation::Left => Side::Left,
            Rotation::Right => Side::Right,
        }
    }

    fn checkpoint(self) -> Checkpoint {
        match self {
            Rotation::Left => Checkpoint::AfterRotateLeft,
            Rotation::Right => Checkpoint::AfterRotateRight,
        }
    }
}

impl fmt::Display for Rotation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Rotation::Left => f.write_str("left"),
            Rotation::Right => f.write_str("right"),
        }
    }
}

impl<K, C> RBTree<K, C> {
    pub(crate) fn rotate_left(&mut self, id: NodeId) -> Result<(), TreeError> {
        self.rotate(id, Rotation::Left)
    }

    pub(crate) fn rotate_right(&mut self, id: NodeId) -> Result<(), TreeError> {
        self.rotate(id, Rotation::Right)
    }

    /// Single rotation about `id`. The pivot is checked before any link is
    /// touched, so an `Err` leaves the tree as it was.
    fn rotate(&mut self, id: NodeId, rotation: Rotation) -> Result<(), TreeError> {
        let down = rotation.down_side();
        let up = down.opposite();

        let pivot = self.nodes[id]
            .child(up)
            .ok_or(TreeError::MissingPivot(rotation))?;
        let inner = self.nodes[pivot].child(down);
        let parent = self.nodes[id].parent;
        let side = self.nodes.side_of(id);

        // pivot's inner subtree crosses over; pivot is left standalone
        self.nodes.set_child(id, up, inner);

        match (parent, side) {
            (Some(parent), Some(side)) => {
                self.nodes.set_child(parent, side, Some(pivot));
            }
            _ => self.root = Some(pivot),
        }

        self.nodes.set_child(pivot, down, Some(id));

        trace!("rotated {rotation} about {id:?}, {pivot:?} lifted");
        self.notify(rotation.checkpoint(), id);
        Ok(())
    }

    /// Rotation inside the rebalancing algorithms, where a missing pivot can
    /// only mean the color invariants were already broken.
    pub(crate) fn rotate_or_abort(&mut self, id: NodeId, rotation: Rotation) {
        let rotated = match rotation {
            Rotation::Left => self.rotate_left(id),
            Rotation::Right => self.rotate_right(id),
        };
        if let Err(err) = rotated {
            invariant_broken(&err.to_string());
        }
    }
}
