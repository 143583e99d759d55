//! Chunked Merkle trees over byte streams.
//!
//! A byte stream is split into fixed-size chunks, each chunk is hashed into a
//! leaf, and adjacent nodes are paired level by level until a single root
//! remains. The root digest fingerprints the entire stream, so two trees
//! compare equal exactly when their roots do.
//!
//! # Construction
//!
//! - [`build_tree`] -- one-shot construction from any [`std::io::Read`]
//! - [`TreeBuilder`] -- reusable builder holding a validated chunk size and an
//!   injected [`HashFunction`](mtree_crypto::HashFunction)
//! - [`BuilderConfig`] -- serde/TOML configuration selecting chunk size and
//!   algorithm
//!
//! # Ownership
//!
//! Nodes live in an arena owned by [`MerkleTree`]. Children are referenced by
//! [`NodeId`] and the parent link is a plain index used only for upward
//! traversal, so the node graph has no reference cycles and drops in one go.
//!
//! # Design Rules
//!
//! 1. Construction is a pure function of stream contents, chunk size, and
//!    hash function.
//! 2. Only the final leaf may be shorter than the chunk size.
//! 3. An unpaired node at the end of a level is carried up unchanged.
//! 4. A tree built from an empty stream has no root and equals nothing.
//! 5. Failures never expose a partial tree.

pub mod builder;
pub mod config;
pub mod error;
pub mod node;
pub mod tree;

// Re-export primary types at crate root for ergonomic imports.
pub use builder::{build_tree, TreeBuilder};
pub use config::BuilderConfig;
pub use error::{TreeError, TreeResult};
pub use node::{Node, NodeData, NodeId};
pub use tree::{MerkleTree, EMPTY_TREES_ARE_EQUAL};
