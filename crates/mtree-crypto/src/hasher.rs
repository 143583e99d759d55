use std::fmt;
use std::str::FromStr;
use std::sync::Arc;

use mtree_types::Digest;
use serde::{Deserialize, Serialize};
use sha2::{Digest as _, Sha256};

/// A pluggable hash function.
///
/// Implementations must be deterministic, always produce exactly `N` bytes
/// (including for empty input), and have no side effects observable to the
/// caller. The tree builder relies on nothing else.
///
/// Any `Fn(&[u8]) -> Digest<N>` closure or function is a `HashFunction`, so
/// tests can inject stub hashes without defining a type.
pub trait HashFunction<const N: usize>: Send + Sync {
    /// Hash a byte span.
    fn hash(&self, data: &[u8]) -> Digest<N>;

    /// Human-readable algorithm name, used in logs.
    fn name(&self) -> &str {
        "custom"
    }
}

impl<F, const N: usize> HashFunction<N> for F
where
    F: Fn(&[u8]) -> Digest<N> + Send + Sync,
{
    fn hash(&self, data: &[u8]) -> Digest<N> {
        self(data)
    }
}

/// SHA-256, the reference default.
#[derive(Clone, Copy, Debug, Default)]
pub struct Sha256Hasher;

impl HashFunction<32> for Sha256Hasher {
    fn hash(&self, data: &[u8]) -> Digest<32> {
        Digest::from_hash(Sha256::digest(data).into())
    }

    fn name(&self) -> &str {
        "sha256"
    }
}

/// BLAKE3, optionally domain-separated.
///
/// With a domain tag (e.g. `"mtree-chunk-v1"`), the tag and a `:` separator
/// are prepended to every input, so the same bytes hashed under different
/// domains never collide.
#[derive(Clone, Copy, Debug, Default)]
pub struct Blake3Hasher {
    domain: Option<&'static str>,
}

impl Blake3Hasher {
    /// Plain BLAKE3 with no domain tag.
    pub const fn new() -> Self {
        Self { domain: None }
    }

    /// BLAKE3 with a domain tag prepended to every input.
    pub const fn with_domain(domain: &'static str) -> Self {
        Self {
            domain: Some(domain),
        }
    }

    /// The domain tag, if any.
    pub fn domain(&self) -> Option<&str> {
        self.domain
    }
}

impl HashFunction<32> for Blake3Hasher {
    fn hash(&self, data: &[u8]) -> Digest<32> {
        let mut hasher = blake3::Hasher::new();
        if let Some(domain) = self.domain {
            hasher.update(domain.as_bytes());
            hasher.update(b":");
        }
        hasher.update(data);
        Digest::from_hash(*hasher.finalize().as_bytes())
    }

    fn name(&self) -> &str {
        "blake3"
    }
}

/// Hash the concatenation `left || right` of two digests.
///
/// The input is always exactly `2 * N` bytes, left digest first.
pub fn hash_pair<H, const N: usize>(hasher: &H, left: &Digest<N>, right: &Digest<N>) -> Digest<N>
where
    H: HashFunction<N> + ?Sized,
{
    let mut buf = Vec::with_capacity(2 * N);
    buf.extend_from_slice(left.as_bytes());
    buf.extend_from_slice(right.as_bytes());
    hasher.hash(&buf)
}

/// Built-in algorithms selectable by name at run time.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HashAlgorithm {
    #[default]
    Sha256,
    Blake3,
}

impl HashAlgorithm {
    /// Instantiate the hash function for this algorithm.
    pub fn hasher(self) -> Arc<dyn HashFunction<32>> {
        match self {
            Self::Sha256 => Arc::new(Sha256Hasher),
            Self::Blake3 => Arc::new(Blake3Hasher::new()),
        }
    }

    /// Canonical lowercase name.
    pub fn name(self) -> &'static str {
        match self {
            Self::Sha256 => "sha256",
            Self::Blake3 => "blake3",
        }
    }
}

impl fmt::Display for HashAlgorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for HashAlgorithm {
    type Err = HasherError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "sha256" | "sha-256" => Ok(Self::Sha256),
            "blake3" => Ok(Self::Blake3),
            _ => Err(HasherError::UnknownAlgorithm(s.to_string())),
        }
    }
}

/// Errors from hashing operations.
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum HasherError {
    #[error("unknown hash algorithm: {0}")]
    UnknownAlgorithm(String),
}
