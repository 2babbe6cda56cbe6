use crate::error::GenerationError;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};

/// One candidate produced by a generation model
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GeneratedText {
    pub generated_text: String,
}

impl GeneratedText {
    pub fn new(generated_text: impl Into<String>) -> Self {
        Self {
            generated_text: generated_text.into(),
        }
    }
}

/// Capability that produces text from a prompt.
#[async_trait]
pub trait Generator: Send + Sync {
    async fn generate(&self, prompt: &str) -> Result<Vec<GeneratedText>, GenerationError>;
}

/// Trimmed text of the first candidate, if it has any content
pub fn first_generated_text(candidates: &[GeneratedText]) -> Option<String> {
    candidates
        .first()
        .map(|candidate| candidate.generated_text.trim())
        .filter(|text| !text.is_empty())
        .map(str::to_string)
}
