use std::fmt;

use super::compare::NaturalOrder;
use super::RBTree;

#[derive(Debug, PartialEq, Eq, PartialOrd, Ord, Clone, Copy, Hash)]
pub enum Color {
    Red,
    Black,
}

/// Which child slot of a parent a node occupies.
#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub(crate) enum Side {
    Left,
    Right,
}

impl Side {
    pub(crate) fn opposite(self) -> Self {
        match self {
            Side::Left => Side::Right,
            Side::Right => Side::Left,
        }
    }
}

/// Stable handle of a node inside its tree's arena.
///
/// Handles are only meaningful for the tree that produced them and only
/// until the node they name is removed; freed slots are reused.
#[derive(Debug, PartialEq, Eq, PartialOrd, Ord, Clone, Copy, Hash)]
pub struct NodeId(pub(crate) usize);

pub(crate) type Link = Option<NodeId>;

#[derive(Debug)]
pub(crate) struct Node<K> {
    pub(crate) key: K,
    pub(crate) color: Color,
    pub(crate) left: Link,
    pub(crate) right: Link,
    pub(crate) parent: Link,
}

impl<K> Node<K> {
    pub(crate) fn new(key: K) -> Self {
        Node {
            key,
            color: Color::Red,
            left: None,
            right: None,
            parent: None,
        }
    }

    pub(crate) fn child(&self, side: Side) -> Link {
        match side {
            Side::Left => self.left,
            Side::Right => self.right,
        }
    }

    pub(crate) fn child_mut(&mut self, side: Side) -> &mut Link {
        match side {
            Side::Left => &mut self.left,
            Side::Right => &mut self.right,
        }
    }

    pub(crate) fn is_red(&self) -> bool {
        self.color == Color::Red
    }

    pub(crate) fn is_black(&self) -> bool {
        self.color == Color::Black
    }
}

/// Read-only view of a node, borrowed from its tree.
///
/// This is what [`RBTree::find`] hands out and what observers receive, so
/// nothing reachable through it can change the tree.
pub struct NodeRef<'a, K, C = NaturalOrder> {
    tree: &'a RBTree<K, C>,
    id: NodeId,
}

impl<'a, K, C> NodeRef<'a, K, C> {
    pub(crate) fn new(tree: &'a RBTree<K, C>, id: NodeId) -> Self {
        NodeRef { tree, id }
    }

    fn node(&self) -> &'a Node<K> {
        &self.tree.nodes[self.id]
    }

    fn view(&self, link: Link) -> Option<Self> {
        link.map(|id| NodeRef::new(self.tree, id))
    }

    pub fn id(&self) -> NodeId {
        self.id
    }

    pub fn key(&self) -> &'a K {
        &self.node().key
    }

    pub fn color(&self) -> Color {
        self.node().color
    }

    pub fn is_red(&self) -> bool {
        self.node().is_red()
    }

    pub fn is_black(&self) -> bool {
        self.node().is_black()
    }

    pub fn parent(&self) -> Option<Self> {
        self.view(self.node().parent)
    }

    pub fn left(&self) -> Option<Self> {
        self.view(self.node().left)
    }

    pub fn right(&self) -> Option<Self> {
        self.view(self.node().right)
    }

    /// True iff this node sits in its parent's left slot.
    pub fn is_left_child(&self) -> bool {
        self.tree.nodes.side_of(self.id) == Some(Side::Left)
    }

    /// True iff this node sits in its parent's right slot.
    pub fn is_right_child(&self) -> bool {
        self.tree.nodes.side_of(self.id) == Some(Side::Right)
    }

    pub fn has_red_parent(&self) -> bool {
        self.tree.nodes.has_red_parent(self.id)
    }

    pub fn sibling(&self) -> Option<Self> {
        self.view(self.tree.nodes.sibling(self.id))
    }

    /// Rightmost node of the left subtree.
    pub fn predecessor(&self) -> Option<Self> {
        self.view(self.tree.nodes.predecessor(self.id))
    }

    /// Leftmost node of the right subtree.
    pub fn successor(&self) -> Option<Self> {
        self.view(self.tree.nodes.successor(self.id))
    }
}

impl<K, C> Clone for NodeRef<'_, K, C> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<K, C> Copy for NodeRef<'_, K, C> {}

impl<K: fmt::Debug, C> fmt::Debug for NodeRef<'_, K, C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("NodeRef")
            .field("id", &self.id)
            .field("key", self.key())
            .field("color", &self.color())
            .finish()
    }
}
