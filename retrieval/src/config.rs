use serde::{Deserialize, Serialize};

/// Configuration for hybrid retrieval and context assembly
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct RetrievalConfig {
    /// Number of nearest neighbours taken from vector search
    #[serde(default = "default_vector_top_k")]
    pub vector_top_k: usize,

    /// Maximum number of documents in the assembled context
    #[serde(default = "default_max_context_docs")]
    pub max_context_docs: usize,

    /// Characters of each document's text included in the context
    #[serde(default = "default_max_doc_chars")]
    pub max_doc_chars: usize,

    /// Hard cap on the assembled context, in characters
    #[serde(default = "default_max_context_chars")]
    pub max_context_chars: usize,
}

fn default_vector_top_k() -> usize {
    5
}

fn default_max_context_docs() -> usize {
    5
}

fn default_max_doc_chars() -> usize {
    1000
}

fn default_max_context_chars() -> usize {
    2000
}

impl Default for RetrievalConfig {
    fn default() -> Self {
        Self {
            vector_top_k: default_vector_top_k(),
            max_context_docs: default_max_context_docs(),
            max_doc_chars: default_max_doc_chars(),
            max_context_chars: default_max_context_chars(),
        }
    }
}

impl RetrievalConfig {
    /// Validate configuration
    pub fn validate(&self) -> Result<(), String> {
        if self.vector_top_k == 0 {
            return Err("vector_top_k must be > 0".to_string());
        }

        if self.max_context_docs == 0 {
            return Err("max_context_docs must be > 0".to_string());
        }

        if self.max_doc_chars == 0 {
            return Err("max_doc_chars must be > 0".to_string());
        }

        if self.max_context_chars == 0 {
            return Err("max_context_chars must be > 0".to_string());
        }

        Ok(())
    }
}
