use std::error::Error;
use std::fmt;

use super::node::NodeId;
use super::rotate::Rotation;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TreeError {
    /// `remove` was asked for a key the tree does not hold.
    KeyNotFound,
    /// A rotation was requested on a node without the child it pivots on.
    /// Nothing was relinked.
    MissingPivot(Rotation),
}

impl TreeError {
    /// Structural errors mean the tree's own bookkeeping is wrong, as
    /// opposed to a caller asking for something that is not there.
    pub fn is_structural(&self) -> bool {
        matches!(self, TreeError::MissingPivot(_))
    }
}

impl fmt::Display for TreeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TreeError::KeyNotFound => write!(f, "no such key in the tree"),
            TreeError::MissingPivot(Rotation::Left) => {
                write!(f, "can't rotate left since the right child is nil")
            }
            TreeError::MissingPivot(Rotation::Right) => {
                write!(f, "can't rotate right since the left child is nil")
            }
        }
    }
}

impl Error for TreeError {}

/// First red-black or linkage rule found broken by [`RBTree::validate`].
///
/// [`RBTree::validate`]: super::RBTree::validate
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InvariantViolation {
    RedRoot,
    RootHasParent,
    /// The child's parent link does not point back at the node holding it.
    BrokenParentLink { child: NodeId },
    RedChildOfRed { child: NodeId },
    BlackHeightMismatch {
        node: NodeId,
        left: usize,
        right: usize,
    },
    /// In-order neighbours that are not strictly ascending.
    OutOfOrder { node: NodeId },
    /// Reachable nodes differ from the number the tree believes it holds.
    CountMismatch { reachable: usize, recorded: usize },
}

impl fmt::Display for InvariantViolation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            InvariantViolation::RedRoot => write!(f, "root is red"),
            InvariantViolation::RootHasParent => write!(f, "root has a parent link"),
            InvariantViolation::BrokenParentLink { child } => {
                write!(f, "{child:?} does not link back to its parent")
            }
            InvariantViolation::RedChildOfRed { child } => {
                write!(f, "{child:?} is red under a red parent")
            }
            InvariantViolation::BlackHeightMismatch { node, left, right } => write!(
                f,
                "black height under {node:?} differs: {left} on the left, {right} on the right"
            ),
            InvariantViolation::OutOfOrder { node } => {
                write!(f, "{node:?} is not greater than its in-order predecessor")
            }
            InvariantViolation::CountMismatch {
                reachable,
                recorded,
            } => write!(f, "{reachable} nodes reachable but {recorded} recorded"),
        }
    }
}

impl Error for InvariantViolation {}
