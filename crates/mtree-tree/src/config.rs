use mtree_crypto::HashAlgorithm;
use serde::{Deserialize, Serialize};

use crate::error::{TreeError, TreeResult};

/// Configuration for a [`TreeBuilder`](crate::TreeBuilder).
///
/// Missing fields fall back to their defaults when deserialized, so an empty
/// TOML document is a valid configuration.
///
/// ```toml
/// chunk_size = 1024
/// algorithm = "blake3"
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct BuilderConfig {
    /// Maximum number of bytes hashed into a single leaf. Must be positive.
    pub chunk_size: usize,
    /// Hash algorithm applied to chunks and to concatenated child digests.
    pub algorithm: HashAlgorithm,
}

impl Default for BuilderConfig {
    fn default() -> Self {
        Self {
            chunk_size: Self::DEFAULT_CHUNK_SIZE,
            algorithm: HashAlgorithm::default(),
        }
    }
}

impl BuilderConfig {
    /// Chunk size used when none is configured.
    pub const DEFAULT_CHUNK_SIZE: usize = 4096;

    /// A configuration with the given chunk size and the default algorithm.
    pub fn new(chunk_size: usize) -> Self {
        Self {
            chunk_size,
            ..Default::default()
        }
    }

    /// Replace the hash algorithm.
    pub fn with_algorithm(mut self, algorithm: HashAlgorithm) -> Self {
        self.algorithm = algorithm;
        self
    }

    /// Reject configurations the builder cannot run with.
    pub fn validate(&self) -> TreeResult<()> {
        validate_chunk_size(self.chunk_size)
    }

    /// Parse and validate a TOML document.
    pub fn from_toml_str(s: &str) -> TreeResult<Self> {
        let config: Self =
            toml::from_str(s).map_err(|e| TreeError::InvalidConfiguration(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }
}

pub(crate) fn validate_chunk_size(chunk_size: usize) -> TreeResult<()> {
    if chunk_size == 0 {
        return Err(TreeError::InvalidConfiguration(
            "chunk_size must be greater than zero".into(),
        ));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config() {
        let c = BuilderConfig::default();
        assert_eq!(c.chunk_size, 4096);
        assert_eq!(c.algorithm, HashAlgorithm::Sha256);
        assert!(c.validate().is_ok());
    }

    #[test]
    fn zero_chunk_size_is_invalid() {
        let err = BuilderConfig::new(0).validate().unwrap_err();
        assert!(matches!(err, TreeError::InvalidConfiguration(_)));
    }

    #[test]
    fn toml_overrides_defaults() {
        let c = BuilderConfig::from_toml_str("chunk_size = 16\nalgorithm = \"blake3\"\n").unwrap();
        assert_eq!(c, BuilderConfig::new(16).with_algorithm(HashAlgorithm::Blake3));
    }

    #[test]
    fn empty_toml_is_default() {
        assert_eq!(BuilderConfig::from_toml_str("").unwrap(), BuilderConfig::default());
    }

    #[test]
    fn toml_with_zero_chunk_size_is_rejected() {
        let err = BuilderConfig::from_toml_str("chunk_size = 0").unwrap_err();
        assert!(matches!(err, TreeError::InvalidConfiguration(_)));
    }

    #[test]
    fn toml_with_unknown_algorithm_is_rejected() {
        let err = BuilderConfig::from_toml_str("algorithm = \"md5\"").unwrap_err();
        assert!(matches!(err, TreeError::InvalidConfiguration(_)));
    }

    #[test]
    fn serde_json_roundtrip() {
        let c = BuilderConfig::new(64).with_algorithm(HashAlgorithm::Blake3);
        let json = serde_json::to_string(&c).unwrap();
        assert!(json.contains("\"blake3\""));
        let parsed: BuilderConfig = serde_json::from_str(&json).unwrap();
        assert_eq!(c, parsed);
    }
}
