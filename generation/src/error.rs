use thiserror::Error;

/// Errors that can occur while generating an answer
#[derive(Debug, Error)]
pub enum GenerationError {
    /// The model endpoint could not be reached, timed out, or failed server-side
    #[error("Generation model unavailable: {0}")]
    ModelUnavailable(String),

    /// The endpoint rejected the request
    #[error("Generation request failed: {status} - {body}")]
    Request { status: u16, body: String },

    /// The endpoint answered with something that is not a completion
    #[error("Invalid generation response: {0}")]
    InvalidResponse(String),

    /// Invalid configuration
    #[error("Invalid generation config: {0}")]
    Config(String),
}

impl From<reqwest::Error> for GenerationError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_decode() {
            GenerationError::InvalidResponse(err.to_string())
        } else {
            GenerationError::ModelUnavailable(err.to_string())
        }
    }
}
