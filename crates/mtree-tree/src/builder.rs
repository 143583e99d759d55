//! Stream chunking and tree construction.

use std::io::Read;
use std::sync::Arc;

use mtree_crypto::HashFunction;
use tracing::{debug, trace};

use crate::config::{validate_chunk_size, BuilderConfig};
use crate::error::TreeResult;
use crate::node::NodeData;
use crate::tree::MerkleTree;

/// Upper bound on the chunk buffer allocated up front. Larger chunks grow
/// the buffer only as data actually arrives.
const MAX_PREALLOC: usize = 64 * 1024;

/// Build a tree from a byte stream in one call.
///
/// Reads `reader` to exhaustion in `chunk_size` pieces, hashes each piece
/// into a leaf, and reduces the leaves to a root. Fails with
/// [`TreeError::InvalidConfiguration`](crate::TreeError::InvalidConfiguration)
/// before reading anything if `chunk_size` is zero.
pub fn build_tree<R, H, const N: usize>(
    reader: R,
    chunk_size: usize,
    hasher: &H,
) -> TreeResult<MerkleTree<N>>
where
    R: Read,
    H: HashFunction<N> + ?Sized,
{
    validate_chunk_size(chunk_size)?;
    let leaves = chunk_stream(reader, chunk_size, hasher)?;
    Ok(MerkleTree::from_leaves(leaves, hasher, chunk_size))
}

/// Split a stream into hashed leaves.
///
/// Each chunk is filled completely unless the stream ends first, so a reader
/// returning short reads still yields `chunk_size` leaves. Only the last leaf
/// can be shorter. A read of zero bytes marks the end of the stream.
fn chunk_stream<R, H, const N: usize>(
    mut reader: R,
    chunk_size: usize,
    hasher: &H,
) -> TreeResult<Vec<NodeData<N>>>
where
    R: Read,
    H: HashFunction<N> + ?Sized,
{
    let mut leaves = Vec::new();
    let mut chunk = Vec::with_capacity(chunk_size.min(MAX_PREALLOC));
    let mut offset = 0u64;

    loop {
        chunk.clear();
        // read_to_end retries `Interrupted` and stops at EOF or the limit.
        let read = reader
            .by_ref()
            .take(chunk_size as u64)
            .read_to_end(&mut chunk)?;
        if read == 0 {
            break;
        }

        let digest = hasher.hash(&chunk);
        trace!(offset, span = read, digest = %digest.short_hex(), "hashed chunk");
        leaves.push(NodeData {
            digest,
            offset,
            span: read as u64,
        });
        offset += read as u64;

        if read < chunk_size {
            break;
        }
    }

    debug!(
        leaves = leaves.len(),
        bytes = offset,
        chunk_size,
        hasher = hasher.name(),
        "chunked stream"
    );
    Ok(leaves)
}

/// Reusable tree builder.
///
/// Holds a validated chunk size and an injected hash function. Builders are
/// immutable and can be shared across threads; each `build` call is
/// independent.
#[derive(Clone)]
pub struct TreeBuilder<const N: usize = 32> {
    chunk_size: usize,
    hasher: Arc<dyn HashFunction<N>>,
}

impl TreeBuilder<32> {
    /// Create a builder from configuration, using the configured algorithm.
    pub fn new(config: &BuilderConfig) -> TreeResult<Self> {
        config.validate()?;
        Ok(Self {
            chunk_size: config.chunk_size,
            hasher: config.algorithm.hasher(),
        })
    }
}

impl<const N: usize> TreeBuilder<N> {
    /// Create a builder with an explicit hash function.
    pub fn with_hasher(chunk_size: usize, hasher: Arc<dyn HashFunction<N>>) -> TreeResult<Self> {
        validate_chunk_size(chunk_size)?;
        Ok(Self { chunk_size, hasher })
    }

    pub fn chunk_size(&self) -> usize {
        self.chunk_size
    }

    /// The injected hash function.
    pub fn hasher(&self) -> &dyn HashFunction<N> {
        self.hasher.as_ref()
    }

    /// Build a tree from a byte stream.
    pub fn build<R: Read>(&self, reader: R) -> TreeResult<MerkleTree<N>> {
        let leaves = self.chunk_leaves(reader)?;
        Ok(self.reduce(leaves))
    }

    /// Build a tree from an in-memory byte string.
    pub fn build_from_bytes(&self, data: &[u8]) -> TreeResult<MerkleTree<N>> {
        self.build(data)
    }

    /// Chunk and hash a stream without reducing it.
    pub fn chunk_leaves<R: Read>(&self, reader: R) -> TreeResult<Vec<NodeData<N>>> {
        chunk_stream(reader, self.chunk_size, self.hasher())
    }

    /// Reduce leaves (in stream order) to a tree.
    pub fn reduce(&self, leaves: Vec<NodeData<N>>) -> MerkleTree<N> {
        MerkleTree::from_leaves(leaves, self.hasher(), self.chunk_size)
    }
}

impl<const N: usize> std::fmt::Debug for TreeBuilder<N> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TreeBuilder")
            .field("chunk_size", &self.chunk_size)
            .field("hasher", &self.hasher.name())
            .finish()
    }
}
