use std::mem;
use std::ops::{Index, IndexMut};

use super::node::{Link, Node, NodeId, Side};

/// Outcome of [`Arena::set_child`].
#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub(crate) enum Relink {
    /// The incoming link already occupied the slot; nothing was touched.
    Unchanged,
    /// The slot was reassigned. Carries the previous occupant, now a
    /// standalone subtree with no parent.
    Replaced(Link),
}

/// Slot storage for tree nodes.
///
/// A node is owned by the slot it lives in; the tree shape (a slot is
/// reachable from the root through exactly one child link) is what makes a
/// parent own its children. `parent` links are plain indices.
#[derive(Debug)]
pub(crate) struct Arena<K> {
    slots: Vec<Option<Node<K>>>,
    free: Vec<usize>,
    len: usize,
}

impl<K> Arena<K> {
    pub(crate) fn new() -> Self {
        Self {
            slots: Vec::new(),
            free: Vec::new(),
            len: 0,
        }
    }

    pub(crate) fn len(&self) -> usize {
        self.len
    }

    /// Upper bound (exclusive) on the raw index of any live `NodeId`.
    pub(crate) fn capacity(&self) -> usize {
        self.slots.len()
    }

    pub(crate) fn contains(&self, id: NodeId) -> bool {
        matches!(self.slots.get(id.0), Some(Some(_)))
    }

    pub(crate) fn alloc(&mut self, node: Node<K>) -> NodeId {
        self.len += 1;
        match self.free.pop() {
            Some(index) => {
                self.slots[index] = Some(node);
                NodeId(index)
            }
            None => {
                self.slots.push(Some(node));
                NodeId(self.slots.len() - 1)
            }
        }
    }

    /// Frees the slot and hands the node back. The caller is responsible for
    /// having unlinked it first.
    pub(crate) fn release(&mut self, id: NodeId) -> Node<K> {
        match self.slots.get_mut(id.0).and_then(Option::take) {
            Some(node) => {
                self.len -= 1;
                self.free.push(id.0);
                node
            }
            None => stale(id),
        }
    }

    /// Drops the backing storage, including any node no longer linked into
    /// the tree.
    pub(crate) fn reset(&mut self) {
        self.slots.clear();
        self.free.clear();
        self.len = 0;
    }

    pub(crate) fn is_red(&self, link: Link) -> bool {
        link.is_some_and(|id| self[id].is_red())
    }

    /// Absent children count as black.
    pub(crate) fn is_black(&self, link: Link) -> bool {
        !self.is_red(link)
    }

    pub(crate) fn has_red_parent(&self, id: NodeId) -> bool {
        self.is_red(self[id].parent)
    }

    /// Which slot of its parent holds `id`, or `None` for a detached node.
    pub(crate) fn side_of(&self, id: NodeId) -> Option<Side> {
        let parent = &self[self[id].parent?];
        if parent.left == Some(id) {
            Some(Side::Left)
        } else if parent.right == Some(id) {
            Some(Side::Right)
        } else {
            None
        }
    }

    pub(crate) fn sibling(&self, id: NodeId) -> Link {
        let side = self.side_of(id)?;
        let parent = self[id].parent?;
        self[parent].child(side.opposite())
    }

    pub(crate) fn predecessor(&self, id: NodeId) -> Link {
        self[id].left.map(|left| self.extreme(left, Side::Right))
    }

    pub(crate) fn successor(&self, id: NodeId) -> Link {
        self[id].right.map(|right| self.extreme(right, Side::Left))
    }

    /// Follows `side` links from `id` as far as they go.
    fn extreme(&self, mut id: NodeId, side: Side) -> NodeId {
        while let Some(next) = self[id].child(side) {
            id = next;
        }
        id
    }

    /// Reassigns the `side` child slot of `parent`.
    ///
    /// An incoming node still attached somewhere else is first cut loose
    /// from its old parent. The previous occupant loses its parent link and
    /// is returned so it is never silently dropped from the structure.
    pub(crate) fn set_child(&mut self, parent: NodeId, side: Side, child: Link) -> Relink {
        if self[parent].child(side) == child {
            return Relink::Unchanged;
        }

        if let Some(incoming) = child {
            self.detach(incoming);
            self[incoming].parent = Some(parent);
        }

        let previous = mem::replace(self[parent].child_mut(side), child);
        if let Some(previous) = previous {
            self[previous].parent = None;
        }

        Relink::Replaced(previous)
    }

    /// Cuts `id` loose from its parent, clearing whichever slot held it.
    pub(crate) fn detach(&mut self, id: NodeId) {
        if let Some(parent) = self[id].parent.take() {
            let parent = &mut self[parent];
            if parent.left == Some(id) {
                parent.left = None;
            } else if parent.right == Some(id) {
                parent.right = None;
            }
        }
    }

    pub(crate) fn swap_keys(&mut self, a: NodeId, b: NodeId) {
        if a == b {
            return;
        }
        let (low, high) = if a.0 < b.0 { (a, b) } else { (b, a) };
        let (head, tail) = self.slots.split_at_mut(high.0);
        match (head[low.0].as_mut(), tail[0].as_mut()) {
            (Some(first), Some(second)) => mem::swap(&mut first.key, &mut second.key),
            (None, _) => stale(low),
            (_, None) => stale(high),
        }
    }
}

#[cold]
#[track_caller]
fn stale(id: NodeId) -> ! {
    panic!("stale node handle {id:?}")
}

impl<K> Index<NodeId> for Arena<K> {
    type Output = Node<K>;

    fn index(&self, id: NodeId) -> &Self::Output {
        match self.slots.get(id.0) {
            Some(Some(node)) => node,
            _ => stale(id),
        }
    }
}

impl<K> IndexMut<NodeId> for Arena<K> {
    fn index_mut(&mut self, id: NodeId) -> &mut Self::Output {
        match self.slots.get_mut(id.0) {
            Some(Some(node)) => node,
            _ => stale(id),
        }
    }
}
