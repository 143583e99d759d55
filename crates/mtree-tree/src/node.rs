//! Tree nodes and their arena handles.

use std::fmt;

use mtree_types::Digest;

/// Index of a node inside its [`MerkleTree`](crate::MerkleTree) arena.
///
/// A `NodeId` is only meaningful for the tree that produced it.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(pub(crate) usize);

impl NodeId {
    /// Position in the arena.
    pub fn index(self) -> usize {
        self.0
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// The data a node commits to.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct NodeData<const N: usize = 32> {
    /// Digest of this node's subtree.
    pub digest: Digest<N>,
    /// Byte offset in the source stream where the subtree's data begins.
    pub offset: u64,
    /// Number of source bytes covered by the subtree.
    pub span: u64,
}

/// A leaf or internal node.
///
/// Leaves have no children. Internal nodes always have both. The parent link
/// is an arena index for upward traversal and carries no ownership.
#[derive(Clone, Debug)]
pub struct Node<const N: usize = 32> {
    pub data: NodeData<N>,
    left: Option<NodeId>,
    right: Option<NodeId>,
    parent: Option<NodeId>,
}

impl<const N: usize> Node<N> {
    pub(crate) fn leaf(data: NodeData<N>) -> Self {
        Self {
            data,
            left: None,
            right: None,
            parent: None,
        }
    }

    pub(crate) fn internal(data: NodeData<N>, left: NodeId, right: NodeId) -> Self {
        Self {
            data,
            left: Some(left),
            right: Some(right),
            parent: None,
        }
    }

    pub(crate) fn set_parent(&mut self, parent: NodeId) {
        self.parent = Some(parent);
    }

    pub fn digest(&self) -> &Digest<N> {
        &self.data.digest
    }

    pub fn offset(&self) -> u64 {
        self.data.offset
    }

    pub fn span(&self) -> u64 {
        self.data.span
    }

    pub fn left(&self) -> Option<NodeId> {
        self.left
    }

    pub fn right(&self) -> Option<NodeId> {
        self.right
    }

    /// Both children, or `None` for a leaf.
    pub fn children(&self) -> Option<(NodeId, NodeId)> {
        self.left.zip(self.right)
    }

    pub fn parent(&self) -> Option<NodeId> {
        self.parent
    }

    /// Returns `true` if the node has no parent.
    pub fn is_root(&self) -> bool {
        self.parent.is_none()
    }

    /// Returns `true` if the node has no children.
    pub fn is_leaf(&self) -> bool {
        self.left.is_none() && self.right.is_none()
    }

    /// Node equality: root-ness, leaf-ness, and `(digest, offset, span)` must
    /// all match. Children are not compared; the digest already commits to
    /// them.
    pub fn matches(&self, other: &Self) -> bool {
        self.is_root() == other.is_root()
            && self.is_leaf() == other.is_leaf()
            && self.data == other.data
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn data(byte: u8, offset: u64, span: u64) -> NodeData {
        NodeData {
            digest: Digest::from_hash([byte; 32]),
            offset,
            span,
        }
    }

    #[test]
    fn fresh_leaf_is_root_and_leaf() {
        let leaf = Node::leaf(data(1, 0, 4));
        assert!(leaf.is_leaf());
        assert!(leaf.is_root());
        assert_eq!(leaf.children(), None);
    }

    #[test]
    fn internal_node_has_both_children() {
        let node = Node::internal(data(1, 0, 8), NodeId(0), NodeId(1));
        assert!(!node.is_leaf());
        assert_eq!(node.children(), Some((NodeId(0), NodeId(1))));
    }

    #[test]
    fn matches_requires_same_rootness() {
        let a = Node::leaf(data(1, 0, 4));
        let mut b = Node::leaf(data(1, 0, 4));
        assert!(a.matches(&b));
        b.set_parent(NodeId(9));
        assert!(!a.matches(&b));
    }

    #[test]
    fn matches_requires_same_leafness() {
        let leaf = Node::leaf(data(1, 0, 8));
        let internal = Node::internal(data(1, 0, 8), NodeId(0), NodeId(1));
        assert!(!leaf.matches(&internal));
    }

    #[test]
    fn matches_compares_offset_and_span() {
        let a = Node::leaf(data(1, 0, 4));
        assert!(!a.matches(&Node::leaf(data(1, 1, 4))));
        assert!(!a.matches(&Node::leaf(data(1, 0, 5))));
        assert!(!a.matches(&Node::leaf(data(2, 0, 4))));
    }

    #[test]
    fn matches_ignores_children_ids() {
        let a = Node::internal(data(3, 0, 8), NodeId(0), NodeId(1));
        let b = Node::internal(data(3, 0, 8), NodeId(5), NodeId(6));
        assert!(a.matches(&b));
    }

    #[test]
    fn node_id_display() {
        assert_eq!(NodeId(3).to_string(), "#3");
        assert_eq!(NodeId(3).index(), 3);
    }
}
