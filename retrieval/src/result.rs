use serde::{Deserialize, Serialize};
use sitebot_vector_store::Document;

/// Which search path surfaced a document
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SearchSource {
    /// From keyword substring search
    Keyword,
    /// From vector similarity search
    Semantic,
    /// Found by both paths
    Hybrid,
}

/// A document kept in the assembled context
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ContextEntry {
    pub document: Document,

    pub source: SearchSource,

    /// Cosine similarity when the document came from vector search
    pub score: Option<f32>,
}

/// Deduplicated, bounded grounding for one query
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RetrievalContext {
    /// Documents in context order, unique by url
    pub entries: Vec<ContextEntry>,

    /// Rendered context block handed to the prompt
    pub text: String,
}

impl RetrievalContext {
    pub fn documents(&self) -> impl Iterator<Item = &Document> {
        self.entries.iter().map(|entry| &entry.document)
    }

    pub fn urls(&self) -> Vec<&str> {
        self.entries
            .iter()
            .map(|entry| entry.document.url.as_str())
            .collect()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Length of the rendered context in characters
    pub fn char_count(&self) -> usize {
        self.text.chars().count()
    }
}

/// Search performance statistics
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SearchStats {
    /// Total retrieval time in milliseconds
    pub total_time_ms: u64,

    /// Keyword search time in milliseconds
    pub keyword_time_ms: u64,

    /// Vector search time in milliseconds
    pub semantic_time_ms: u64,

    /// Merge time in milliseconds
    pub merge_time_ms: u64,

    /// Number of keyword results
    pub keyword_count: usize,

    /// Number of vector results
    pub semantic_count: usize,
}

/// Context plus the statistics of the retrieval that produced it
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RetrievalResults {
    /// Query that produced these results
    pub query: String,

    pub context: RetrievalContext,

    pub stats: SearchStats,
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_context_accessors() {
        let context = RetrievalContext {
            entries: vec![
                ContextEntry {
                    document: Document::new("a", "Azure"),
                    source: SearchSource::Keyword,
                    score: None,
                },
                ContextEntry {
                    document: Document::new("b", "Quantum"),
                    source: SearchSource::Semantic,
                    score: Some(0.8),
                },
            ],
            text: "Source: a\nAzure\n\nSource: b\nQuantum".to_string(),
        };

        assert_eq!(context.len(), 2);
        assert!(!context.is_empty());
        assert_eq!(context.urls(), vec!["a", "b"]);
        assert_eq!(context.char_count(), context.text.len());
    }
}
