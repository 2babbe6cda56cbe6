use sitebot_vector_store::VectorStoreError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum RetrievalError {
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Query embedding has dimension {actual}, corpus uses {expected}")]
    DimensionMismatch { expected: usize, actual: usize },

    #[error("No retrievable content for this query")]
    EmptyContext,

    #[error("Invalid retrieval config: {0}")]
    InvalidConfig(String),

    #[error("Invalid shortcut rule: {0}")]
    InvalidShortcut(String),

    #[error("Vector store error: {0}")]
    VectorStore(#[source] VectorStoreError),
}

impl From<VectorStoreError> for RetrievalError {
    fn from(err: VectorStoreError) -> Self {
        match err {
            VectorStoreError::InvalidQuery(msg) => RetrievalError::InvalidInput(msg),
            VectorStoreError::DimensionMismatch { expected, actual } => {
                RetrievalError::DimensionMismatch { expected, actual }
            }
            other => RetrievalError::VectorStore(other),
        }
    }
}

pub type Result<T> = std::result::Result<T, RetrievalError>;
