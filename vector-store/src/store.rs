use crate::document::{CorpusEntry, Document, ScoredDocument};
use crate::error::VectorStoreError;
use indexmap::IndexMap;
use log::{debug, info};
use std::cmp::Ordering;
use std::path::Path;

/// In-memory corpus of documents and their embeddings.
///
/// Built once at startup and read-only afterwards; every entry carries an
/// embedding of the same dimensionality.
#[derive(Debug, Clone, Default)]
pub struct CorpusStore {
    entries: Vec<CorpusEntry>,
    dimension: Option<usize>,
}

impl CorpusStore {
    /// Create a store from entries, checking that all embeddings share one dimension
    pub fn new(entries: Vec<CorpusEntry>) -> Result<Self, VectorStoreError> {
        let dimension = entries.first().map(|entry| entry.embedding.len());

        if let Some(expected) = dimension {
            for (index, entry) in entries.iter().enumerate() {
                if entry.embedding.len() != expected {
                    return Err(VectorStoreError::InconsistentDimension {
                        index,
                        expected,
                        actual: entry.embedding.len(),
                    });
                }
            }
        }

        Ok(Self { entries, dimension })
    }

    /// Create a store from index-aligned documents and embeddings
    pub fn from_parts(
        documents: Vec<Document>,
        embeddings: Vec<Vec<f32>>,
    ) -> Result<Self, VectorStoreError> {
        if documents.len() != embeddings.len() {
            return Err(VectorStoreError::Misaligned {
                documents: documents.len(),
                embeddings: embeddings.len(),
            });
        }

        let entries = documents
            .into_iter()
            .zip(embeddings)
            .map(|(document, embedding)| CorpusEntry::new(document, embedding))
            .collect();
        Self::new(entries)
    }

    /// Load the documents file and its companion embeddings file
    pub async fn load(
        documents_path: &Path,
        embeddings_path: &Path,
    ) -> Result<Self, VectorStoreError> {
        info!(
            "Loading corpus from {} and {}",
            documents_path.display(),
            embeddings_path.display()
        );

        let documents = read_documents(documents_path).await?;
        let content = tokio::fs::read(embeddings_path).await?;
        let embeddings: Vec<Vec<f32>> = serde_json::from_slice(&content)?;

        let store = Self::from_parts(documents, embeddings)?;
        info!(
            "Corpus loaded: {} documents, dimension {:?}",
            store.len(),
            store.dimension()
        );
        Ok(store)
    }

    /// Number of documents in the corpus
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Embedding dimensionality, `None` for an empty corpus
    pub fn dimension(&self) -> Option<usize> {
        self.dimension
    }

    pub fn entries(&self) -> &[CorpusEntry] {
        &self.entries
    }

    /// Documents in corpus order
    pub fn documents(&self) -> impl Iterator<Item = &Document> {
        self.entries.iter().map(|entry| &entry.document)
    }

    /// Exact nearest-neighbour search by cosine similarity.
    ///
    /// Results are sorted by score descending with ties broken by corpus
    /// position; NaN scores rank after every finite score.
    pub fn search(
        &self,
        query_embedding: &[f32],
        k: usize,
    ) -> Result<Vec<ScoredDocument>, VectorStoreError> {
        if k == 0 {
            return Err(VectorStoreError::InvalidQuery(
                "k must be at least 1".to_string(),
            ));
        }

        let Some(expected) = self.dimension else {
            debug!("Vector search over empty corpus");
            return Ok(Vec::new());
        };

        if query_embedding.len() != expected {
            return Err(VectorStoreError::DimensionMismatch {
                expected,
                actual: query_embedding.len(),
            });
        }

        let mut scored: Vec<(usize, f32)> = self
            .entries
            .iter()
            .enumerate()
            .map(|(idx, entry)| (idx, cosine_similarity(query_embedding, &entry.embedding)))
            .collect();

        scored.sort_by(rank_order);
        scored.truncate(k);

        let results: Vec<ScoredDocument> = scored
            .into_iter()
            .map(|(idx, score)| ScoredDocument {
                document: self.entries[idx].document.clone(),
                score,
            })
            .collect();

        debug!("Vector search returned {} of {} documents", results.len(), self.len());
        Ok(results)
    }
}

/// Score descending, NaN last, then corpus index ascending
fn rank_order(a: &(usize, f32), b: &(usize, f32)) -> Ordering {
    let by_score = match (a.1.is_nan(), b.1.is_nan()) {
        (false, false) => b.1.partial_cmp(&a.1).unwrap_or(Ordering::Equal),
        (true, false) => Ordering::Greater,
        (false, true) => Ordering::Less,
        (true, true) => Ordering::Equal,
    };
    by_score.then(a.0.cmp(&b.0))
}

/// Cosine similarity of two equal-length vectors.
///
/// Returns NaN when either vector has zero norm. Identical nonzero vectors
/// score exactly 1.0 and the function is symmetric in its arguments.
pub fn cosine_similarity(a: &[f32], b: &[f32]) -> f32 {
    let mut dot = 0.0f64;
    let mut norm_a = 0.0f64;
    let mut norm_b = 0.0f64;
    for (x, y) in a.iter().zip(b.iter()) {
        let (x, y) = (f64::from(*x), f64::from(*y));
        dot += x * y;
        norm_a += x * x;
        norm_b += y * y;
    }

    let denom = (norm_a * norm_b).sqrt();
    if denom == 0.0 {
        return f32::NAN;
    }

    ((dot / denom) as f32).clamp(-1.0, 1.0)
}

/// Read a documents file: a JSON object whose values are documents, in key order
pub async fn read_documents(path: &Path) -> Result<Vec<Document>, VectorStoreError> {
    let content = tokio::fs::read(path).await?;
    let documents: IndexMap<String, Document> = serde_json::from_slice(&content)?;
    Ok(documents.into_values().collect())
}

/// Write an embeddings file as a JSON array of vectors
pub async fn write_embeddings(
    path: &Path,
    embeddings: &[Vec<f32>],
) -> Result<(), VectorStoreError> {
    if let Some(parent) = path.parent() {
        tokio::fs::create_dir_all(parent).await?;
    }
    let content = serde_json::to_vec(embeddings)?;
    tokio::fs::write(path, content).await?;
    info!("Wrote {} embeddings to {}", embeddings.len(), path.display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use tempfile::TempDir;

    fn create_test_store() -> CorpusStore {
        CorpusStore::from_parts(
            vec![
                Document::new("a", "Azure covers networking"),
                Document::new("b", "Quantum gates"),
                Document::new("c", "Chip design and VLSI"),
            ],
            vec![
                vec![1.0, 0.0, 0.0],
                vec![0.0, 1.0, 0.0],
                vec![0.7, 0.7, 0.0],
            ],
        )
        .unwrap()
    }

    #[test]
    fn test_cosine_similarity() {
        let a = vec![1.0, 2.0, 3.0];
        let b = vec![1.0, 2.0, 3.0];
        let c = vec![-1.0, -2.0, -3.0];

        assert_eq!(cosine_similarity(&a, &b), 1.0);
        assert_eq!(cosine_similarity(&a, &c), -1.0);
    }

    #[test]
    fn test_cosine_similarity_self_is_one() {
        for v in [
            vec![0.3_f32, -0.2, 0.91, 0.05],
            vec![1e-3, 4.0, 7.5],
            vec![0.123_456_7; 384],
        ] {
            assert_eq!(cosine_similarity(&v, &v), 1.0);
        }
    }

    #[test]
    fn test_cosine_similarity_symmetric() {
        let a = vec![0.1, 0.9, -0.4, 2.5];
        let b = vec![-1.3, 0.2, 0.8, 0.05];
        assert_eq!(cosine_similarity(&a, &b), cosine_similarity(&b, &a));
    }

    #[test]
    fn test_cosine_similarity_zero_norm_is_nan() {
        assert!(cosine_similarity(&[0.0, 0.0], &[1.0, 0.0]).is_nan());
        assert!(cosine_similarity(&[1.0, 0.0], &[0.0, 0.0]).is_nan());
    }

    #[test]
    fn test_from_parts_misaligned() {
        let err = CorpusStore::from_parts(vec![Document::new("a", "x")], vec![]).unwrap_err();
        assert!(matches!(
            err,
            VectorStoreError::Misaligned {
                documents: 1,
                embeddings: 0
            }
        ));
    }

    #[test]
    fn test_inconsistent_dimension() {
        let err = CorpusStore::from_parts(
            vec![Document::new("a", "x"), Document::new("b", "y")],
            vec![vec![1.0, 0.0], vec![1.0]],
        )
        .unwrap_err();
        assert!(matches!(
            err,
            VectorStoreError::InconsistentDimension {
                index: 1,
                expected: 2,
                actual: 1
            }
        ));
    }

    #[test]
    fn test_search_identical_embedding_ranks_first() {
        let store = create_test_store();
        let results = store.search(&[1.0, 0.0, 0.0], 1).unwrap();

        assert_eq!(results.len(), 1);
        assert_eq!(results[0].document.url, "a");
        assert_eq!(results[0].score, 1.0);
    }

    #[test]
    fn test_search_sorted_descending() {
        let store = create_test_store();
        let results = store.search(&[0.9, 0.3, 0.1], 3).unwrap();

        assert_eq!(results.len(), 3);
        for pair in results.windows(2) {
            assert!(pair[0].score >= pair[1].score);
        }
    }

    #[test]
    fn test_search_respects_k() {
        let store = create_test_store();
        assert_eq!(store.search(&[0.0, 0.0, 1.0], 2).unwrap().len(), 2);
        assert_eq!(store.search(&[0.0, 0.0, 1.0], 10).unwrap().len(), 3);
    }

    #[test]
    fn test_search_ties_keep_corpus_order() {
        let store = CorpusStore::from_parts(
            vec![
                Document::new("first", "x"),
                Document::new("second", "y"),
                Document::new("third", "z"),
            ],
            vec![vec![0.0, 1.0], vec![1.0, 0.0], vec![1.0, 0.0]],
        )
        .unwrap();

        let urls: Vec<String> = store
            .search(&[1.0, 0.0], 3)
            .unwrap()
            .into_iter()
            .map(|r| r.document.url)
            .collect();
        assert_eq!(urls, vec!["second", "third", "first"]);
    }

    #[test]
    fn test_search_nan_scores_rank_last() {
        let store = CorpusStore::from_parts(
            vec![Document::new("zero", "x"), Document::new("real", "y")],
            vec![vec![0.0, 0.0], vec![-1.0, 0.0]],
        )
        .unwrap();

        let results = store.search(&[1.0, 0.0], 1).unwrap();
        assert_eq!(results[0].document.url, "real");
        assert_eq!(results[0].score, -1.0);
    }

    #[test]
    fn test_search_dimension_mismatch() {
        let store = create_test_store();
        let err = store.search(&[1.0, 0.0], 3).unwrap_err();
        assert!(matches!(
            err,
            VectorStoreError::DimensionMismatch {
                expected: 3,
                actual: 2
            }
        ));
    }

    #[test]
    fn test_search_zero_k_rejected() {
        let store = create_test_store();
        assert!(matches!(
            store.search(&[1.0, 0.0, 0.0], 0),
            Err(VectorStoreError::InvalidQuery(_))
        ));
    }

    #[test]
    fn test_search_empty_corpus() {
        let store = CorpusStore::default();
        assert!(store.is_empty());
        assert_eq!(store.dimension(), None);
        assert!(store.search(&[1.0, 2.0], 5).unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_load_preserves_key_order() {
        let temp_dir = TempDir::new().unwrap();
        let docs_path = temp_dir.path().join("website_documents.json");
        let emb_path = temp_dir.path().join("document_embeddings.json");

        std::fs::write(
            &docs_path,
            r#"{
                "zeta": {"url": "https://example.com/z", "text": "Last key, first entry"},
                "alpha": {"url": "https://example.com/a", "text": "First key, second entry"}
            }"#,
        )
        .unwrap();
        std::fs::write(&emb_path, "[[1.0, 0.0], [0.0, 1.0]]").unwrap();

        let store = CorpusStore::load(&docs_path, &emb_path).await.unwrap();
        let urls: Vec<&str> = store.documents().map(|d| d.url.as_str()).collect();

        assert_eq!(urls, vec!["https://example.com/z", "https://example.com/a"]);
        assert_eq!(store.dimension(), Some(2));
    }

    #[tokio::test]
    async fn test_load_misaligned_files() {
        let temp_dir = TempDir::new().unwrap();
        let docs_path = temp_dir.path().join("docs.json");
        let emb_path = temp_dir.path().join("emb.json");

        std::fs::write(&docs_path, r#"{"a": {"url": "a", "text": "x"}}"#).unwrap();
        std::fs::write(&emb_path, "[[1.0], [2.0]]").unwrap();

        let err = CorpusStore::load(&docs_path, &emb_path).await.unwrap_err();
        assert!(matches!(err, VectorStoreError::Misaligned { .. }));
    }

    #[tokio::test]
    async fn test_write_embeddings_round_trip() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("nested").join("emb.json");

        write_embeddings(&path, &[vec![0.5, 0.25]]).await.unwrap();

        let content = std::fs::read_to_string(&path).unwrap();
        let parsed: Vec<Vec<f32>> = serde_json::from_str(&content).unwrap();
        assert_eq!(parsed, vec![vec![0.5, 0.25]]);
    }
}
