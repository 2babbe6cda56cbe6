use thiserror::Error;

/// Errors that can occur during embedding operations
#[derive(Debug, Error)]
pub enum EmbeddingError {
    /// The embedding model could not be loaded or failed while running.
    /// Transient from the caller's point of view; retrying is up to the caller.
    #[error("Embedding model unavailable: {0}")]
    ModelUnavailable(String),

    /// Invalid input provided to embedding service
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// Cached model files could not be read
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<fastembed::Error> for EmbeddingError {
    fn from(err: fastembed::Error) -> Self {
        EmbeddingError::ModelUnavailable(err.to_string())
    }
}
