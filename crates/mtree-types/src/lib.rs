//! Foundation types for mtree.
//!
//! This crate provides the value types shared by every other mtree crate.
//! It has no knowledge of hashing algorithms or trees.
//!
//! # Key Types
//!
//! - [`Digest`] -- Fixed-size hash output with byte-lexicographic ordering
//! - [`TypeError`] -- Errors from parsing digests

pub mod digest;
pub mod error;

pub use digest::{Digest, Digest256};
pub use error::TypeError;
