use thiserror::Error;

/// Errors that can occur during corpus store operations
#[derive(Debug, Error)]
pub enum VectorStoreError {
    /// Invalid query provided
    #[error("Invalid query: {0}")]
    InvalidQuery(String),

    /// Query embedding length differs from the corpus dimensionality
    #[error("Embedding dimension mismatch: expected {expected}, got {actual}")]
    DimensionMismatch { expected: usize, actual: usize },

    /// A corpus embedding differs in length from the first one
    #[error("Embedding {index} has dimension {actual}, expected {expected}")]
    InconsistentDimension {
        index: usize,
        expected: usize,
        actual: usize,
    },

    /// Documents and embeddings are not index-aligned
    #[error("Corpus misaligned: {documents} documents but {embeddings} embeddings")]
    Misaligned { documents: usize, embeddings: usize },

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization error
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}
