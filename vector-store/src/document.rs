use serde::{Deserialize, Serialize};

/// A page of website content. Identity is the `url`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Document {
    /// Canonical URL of the page
    pub url: String,

    /// Extracted page text
    pub text: String,
}

impl Document {
    /// Create a new document
    pub fn new(url: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            text: text.into(),
        }
    }

    /// First `max_chars` characters of the text, never splitting a character
    pub fn excerpt(&self, max_chars: usize) -> &str {
        match self.text.char_indices().nth(max_chars) {
            Some((byte_idx, _)) => &self.text[..byte_idx],
            None => &self.text,
        }
    }
}

/// A document together with its precomputed embedding
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CorpusEntry {
    pub document: Document,
    pub embedding: Vec<f32>,
}

impl CorpusEntry {
    pub fn new(document: Document, embedding: Vec<f32>) -> Self {
        Self {
            document,
            embedding,
        }
    }
}

/// A document with its similarity to a query embedding
#[derive(Debug, Clone, PartialEq)]
pub struct ScoredDocument {
    /// The document that was found
    pub document: Document,

    /// Cosine similarity in [-1.0, 1.0]; NaN when either vector has zero norm
    pub score: f32,
}
