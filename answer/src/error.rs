use thiserror::Error;

#[derive(Error, Debug)]
pub enum AnswerError {
    #[error("Retrieval error: {0}")]
    Retrieval(#[from] sitebot_retrieval::RetrievalError),

    #[error("Embedding error: {0}")]
    Embedding(#[from] sitebot_embeddings::EmbeddingError),

    #[error("Generation error: {0}")]
    Generation(#[from] sitebot_generation::GenerationError),
}

pub type Result<T> = std::result::Result<T, AnswerError>;
