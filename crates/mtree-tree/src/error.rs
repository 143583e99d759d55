//! Error types for tree construction.

/// Errors that can occur while building a tree.
///
/// No variant leaves a partially built tree behind: construction either
/// returns a complete [`MerkleTree`](crate::MerkleTree) or one of these.
#[derive(Debug, thiserror::Error)]
pub enum TreeError {
    /// The builder was configured with unusable parameters (e.g. a zero
    /// chunk size, or a configuration file that does not parse).
    #[error("invalid configuration: {0}")]
    InvalidConfiguration(String),

    /// The source stream reported an error other than end-of-stream.
    #[error("stream read failure: {0}")]
    StreamReadFailure(#[from] std::io::Error),
}

/// Convenience alias for tree results.
pub type TreeResult<T> = Result<T, TreeError>;
