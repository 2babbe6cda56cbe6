use crate::error::{Result, RetrievalError};
use log::debug;
use sitebot_vector_store::{CorpusStore, Document};
use std::sync::Arc;

/// Case-insensitive substring search over document text
pub struct KeywordSearchEngine {
    store: Arc<CorpusStore>,
    /// Pre-computed lower-cased text for each document
    search_texts: Vec<String>,
}

impl KeywordSearchEngine {
    pub fn new(store: Arc<CorpusStore>) -> Self {
        let search_texts = store.documents().map(|doc| doc.text.to_lowercase()).collect();
        Self {
            store,
            search_texts,
        }
    }

    /// Every document whose text contains `query`, in corpus order.
    ///
    /// Empty or whitespace-only queries are rejected since they would match
    /// every document.
    pub fn search(&self, query: &str) -> Result<Vec<Document>> {
        if query.trim().is_empty() {
            return Err(RetrievalError::InvalidInput(
                "keyword search needs a non-empty query".to_string(),
            ));
        }

        let needle = query.to_lowercase();
        let results: Vec<Document> = self
            .store
            .documents()
            .zip(self.search_texts.iter())
            .filter(|(_, text)| text.contains(&needle))
            .map(|(doc, _)| doc.clone())
            .collect();

        debug!("Keyword search for '{query}' matched {} documents", results.len());
        Ok(results)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn create_test_engine() -> KeywordSearchEngine {
        let store = CorpusStore::from_parts(
            vec![
                Document::new("a", "Azure covers networking"),
                Document::new("b", "Quantum gates"),
                Document::new("c", "Our AZURE lab uses quantum simulators"),
            ],
            vec![vec![1.0, 0.0], vec![0.0, 1.0], vec![0.5, 0.5]],
        )
        .unwrap();
        KeywordSearchEngine::new(Arc::new(store))
    }

    fn urls(docs: &[Document]) -> Vec<&str> {
        docs.iter().map(|d| d.url.as_str()).collect()
    }

    #[test]
    fn test_single_match() {
        let engine = create_test_engine();
        let results = engine.search("networking").unwrap();
        assert_eq!(urls(&results), vec!["a"]);
    }

    #[test]
    fn test_case_insensitive_in_corpus_order() {
        let engine = create_test_engine();
        assert_eq!(urls(&engine.search("azure").unwrap()), vec!["a", "c"]);
        assert_eq!(urls(&engine.search("QUANTUM").unwrap()), vec!["b", "c"]);
    }

    #[test]
    fn test_whole_query_is_one_substring() {
        let engine = create_test_engine();
        assert!(engine.search("azure quantum").unwrap().is_empty());
        assert_eq!(urls(&engine.search("quantum gates").unwrap()), vec!["b"]);
    }

    #[test]
    fn test_no_match() {
        let engine = create_test_engine();
        assert!(engine.search("kubernetes").unwrap().is_empty());
    }

    #[test]
    fn test_empty_query_rejected() {
        let engine = create_test_engine();
        for query in ["", "   ", "\t\n"] {
            assert!(matches!(
                engine.search(query),
                Err(RetrievalError::InvalidInput(_))
            ));
        }
    }

    #[test]
    fn test_empty_corpus() {
        let engine = KeywordSearchEngine::new(Arc::new(CorpusStore::default()));
        assert!(engine.search("azure").unwrap().is_empty());
    }
}
