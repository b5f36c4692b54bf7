use std::fmt;

use log::trace;

use super::compare::NaturalOrder;
use super::node::{NodeId, NodeRef};
use super::RBTree;

/// Points in the insert and rotate algorithms at which an attached
/// [`TreeObserver`] is called.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Checkpoint {
    /// New red leaf attached, nothing rebalanced yet. Node: the new leaf.
    AfterBstInsert,
    /// Rebalancing finished and the root is black. Node: the inserted leaf.
    AfterInsertComplete,
    /// Red uncle case recolored. Node: the grandparent, where fixing continues.
    AfterRecolorCase1,
    /// Line case recolored, rotation at the grandparent still to come.
    AfterRecolorCase3Pre,
    /// Line case rotation done.
    AfterRecolorCase3Post,
    /// Node: the node that moved down.
    AfterRotateLeft,
    /// Node: the node that moved down.
    AfterRotateRight,
}

impl fmt::Display for Checkpoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Checkpoint::AfterBstInsert => "after-bst-insert",
            Checkpoint::AfterInsertComplete => "after-insert-complete",
            Checkpoint::AfterRecolorCase1 => "after-recolor-case1",
            Checkpoint::AfterRecolorCase3Pre => "after-recolor-case3-pre",
            Checkpoint::AfterRecolorCase3Post => "after-recolor-case3-post",
            Checkpoint::AfterRotateLeft => "after-rotate-left",
            Checkpoint::AfterRotateRight => "after-rotate-right",
        };
        f.write_str(name)
    }
}

/// Read-only audit hook.
///
/// Observers only ever see shared references, so they cannot alter the
/// tree or the course of the algorithm. Use interior mutability to record.
pub trait TreeObserver<K, C = NaturalOrder> {
    fn on_checkpoint(&self, checkpoint: Checkpoint, tree: &RBTree<K, C>, node: NodeRef<'_, K, C>);
}

/// Reports every checkpoint at `trace` level.
#[derive(Debug, Default, Clone, Copy)]
pub struct LogObserver;

impl<K: fmt::Debug, C> TreeObserver<K, C> for LogObserver {
    fn on_checkpoint(&self, checkpoint: Checkpoint, tree: &RBTree<K, C>, node: NodeRef<'_, K, C>) {
        trace!(
            "{checkpoint}: {:?} is {:?}, {} nodes in tree",
            node.key(),
            node.color(),
            tree.len()
        );
    }
}

impl<K, C> RBTree<K, C> {
    pub(crate) fn notify(&self, checkpoint: Checkpoint, id: NodeId) {
        if let Some(observer) = &self.observer {
            observer.on_checkpoint(checkpoint, self, NodeRef::new(self, id));
        }
    }
}
