//! Hash primitives for mtree.
//!
//! The tree builder never names a concrete algorithm. It consumes any
//! [`HashFunction`], a deterministic, fixed-output-length mapping from bytes
//! to a [`Digest`](mtree_types::Digest). SHA-256 is the reference default;
//! BLAKE3 and arbitrary closures plug in the same way.
//!
//! All crypto operations wrap established libraries; there is no custom cryptography.

pub mod hasher;

pub use hasher::{
    hash_pair, Blake3Hasher, HashAlgorithm, HashFunction, HasherError, Sha256Hasher,
};
