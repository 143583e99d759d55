//! The arena-backed Merkle tree and its level reduction.
//!
//! [`MerkleTree`] owns every node in a flat arena. Leaves occupy the first
//! slots in stream order; internal nodes follow in the order they were
//! created. Reduction pairs `(0,1), (2,3), …` at each level and carries an
//! unpaired tail node up unchanged until a later level can pair it.
//!
//! # Invariants
//!
//! - An internal node's `offset` is its left child's, and its `span` is the
//!   sum of both children's.
//! - Exactly one node, the root, has no parent. An empty tree has no nodes.
//! - Nodes are never modified once construction returns.

use mtree_crypto::{hash_pair, HashFunction};
use mtree_types::Digest;
use tracing::debug;

use crate::node::{Node, NodeData, NodeId};

/// Whether two rootless (empty-stream) trees compare equal.
///
/// An empty tree is treated as "absent" and is unequal to every tree,
/// including another empty tree and itself.
pub const EMPTY_TREES_ARE_EQUAL: bool = false;

/// A Merkle tree over a chunked byte stream.
#[derive(Clone, Debug)]
pub struct MerkleTree<const N: usize = 32> {
    /// All nodes, leaves first.
    nodes: Vec<Node<N>>,
    /// The unique parentless node, absent for an empty stream.
    root: Option<NodeId>,
    /// Leaf ids in stream order.
    leaves: Vec<NodeId>,
    /// Node ids per level. Level 0 = leaves, last level = `[root]`.
    /// A carried node appears in every level it passes through.
    levels: Vec<Vec<NodeId>>,
    /// Chunk size the leaves were cut with.
    chunk_size: usize,
}

impl<const N: usize> MerkleTree<N> {
    /// Build a tree from leaf data in stream order.
    ///
    /// An empty list produces a rootless tree. A single leaf is its own root.
    pub fn from_leaves<H>(leaves: Vec<NodeData<N>>, hasher: &H, chunk_size: usize) -> Self
    where
        H: HashFunction<N> + ?Sized,
    {
        let mut nodes: Vec<Node<N>> = leaves.into_iter().map(Node::leaf).collect();
        let leaf_ids: Vec<NodeId> = (0..nodes.len()).map(NodeId).collect();

        if leaf_ids.is_empty() {
            debug!("empty stream, tree has no root");
            return Self {
                nodes,
                root: None,
                leaves: leaf_ids,
                levels: vec![],
                chunk_size,
            };
        }

        let mut levels = vec![leaf_ids.clone()];
        let mut current = leaf_ids.clone();

        while current.len() > 1 {
            let mut next = Vec::with_capacity((current.len() + 1) / 2);
            for pair in current.chunks(2) {
                if let [left, right] = *pair {
                    let l = nodes[left.0].data;
                    let r = nodes[right.0].data;
                    let parent = NodeId(nodes.len());
                    nodes.push(Node::internal(
                        NodeData {
                            digest: hash_pair(hasher, &l.digest, &r.digest),
                            offset: l.offset,
                            span: l.span + r.span,
                        },
                        left,
                        right,
                    ));
                    nodes[left.0].set_parent(parent);
                    nodes[right.0].set_parent(parent);
                    next.push(parent);
                } else {
                    // Odd tail: carried up as-is, paired at a later level.
                    next.extend_from_slice(pair);
                }
            }
            debug!(level = levels.len(), nodes = next.len(), "reduced tree level");
            levels.push(next.clone());
            current = next;
        }

        let root = current[0];
        debug!(
            root = %nodes[root.0].data.digest.short_hex(),
            leaves = leaf_ids.len(),
            height = levels.len() - 1,
            "built merkle tree"
        );

        Self {
            nodes,
            root: Some(root),
            leaves: leaf_ids,
            levels,
            chunk_size,
        }
    }

    /// The root id, or `None` if the source stream was empty.
    pub fn root(&self) -> Option<NodeId> {
        self.root
    }

    pub fn root_node(&self) -> Option<&Node<N>> {
        self.root.map(|id| &self.nodes[id.0])
    }

    /// The digest fingerprinting the whole stream.
    pub fn root_digest(&self) -> Option<&Digest<N>> {
        self.root_node().map(Node::digest)
    }

    /// Look up a node by id.
    pub fn node(&self, id: NodeId) -> Option<&Node<N>> {
        self.nodes.get(id.0)
    }

    /// All nodes in arena order (leaves first).
    pub fn nodes(&self) -> &[Node<N>] {
        &self.nodes
    }

    /// Leaf ids in stream order.
    pub fn leaves(&self) -> &[NodeId] {
        &self.leaves
    }

    pub fn leaf_count(&self) -> usize {
        self.leaves.len()
    }

    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    /// Node ids per reduction level, leaves first.
    pub fn levels(&self) -> &[Vec<NodeId>] {
        &self.levels
    }

    /// Number of reduction passes that produced the root.
    ///
    /// `0` for a single-leaf tree and for an empty tree.
    pub fn height(&self) -> usize {
        self.levels.len().saturating_sub(1)
    }

    /// Total bytes covered by the tree.
    pub fn span(&self) -> u64 {
        self.root_node().map_or(0, Node::span)
    }

    pub fn chunk_size(&self) -> usize {
        self.chunk_size
    }

    /// Returns `true` if the tree was built from an empty stream.
    pub fn is_empty(&self) -> bool {
        self.root.is_none()
    }

    /// Walk parent links from `id` up to the root, excluding `id` itself.
    pub fn ancestors(&self, id: NodeId) -> impl Iterator<Item = NodeId> + '_ {
        let first = self.node(id).and_then(Node::parent);
        std::iter::successors(first, move |current| self.nodes[current.0].parent())
    }

    /// Tree equality.
    ///
    /// Two trees are equal when both have a root and the roots match per
    /// [`Node::matches`]. Rootless trees follow [`EMPTY_TREES_ARE_EQUAL`].
    pub fn equals(&self, other: &Self) -> bool {
        match (self.root_node(), other.root_node()) {
            (Some(a), Some(b)) => a.matches(b),
            (None, None) => EMPTY_TREES_ARE_EQUAL,
            _ => false,
        }
    }
}

// Not `Eq`: an empty tree is unequal to itself.
impl<const N: usize> PartialEq for MerkleTree<N> {
    fn eq(&self, other: &Self) -> bool {
        self.equals(other)
    }
}
