use crate::config::RetrievalConfig;
use crate::error::{Result, RetrievalError};
use crate::keyword::KeywordSearchEngine;
use crate::merge::ResultMerger;
use crate::result::{RetrievalResults, SearchStats};
use log::{debug, info, warn};
use sitebot_vector_store::{CorpusStore, Document, ScoredDocument};
use std::sync::Arc;
use std::time::Instant;

/// Hybrid retrieval engine combining keyword and vector search
pub struct HybridRetrieval {
    config: RetrievalConfig,
    store: Arc<CorpusStore>,
    keyword_engine: KeywordSearchEngine,
    merger: ResultMerger,
}

impl HybridRetrieval {
    /// Create new hybrid retrieval engine
    pub fn new(config: RetrievalConfig, store: Arc<CorpusStore>) -> Result<Self> {
        config.validate().map_err(RetrievalError::InvalidConfig)?;

        info!(
            "Initializing hybrid retrieval over {} documents",
            store.len()
        );

        let keyword_engine = KeywordSearchEngine::new(Arc::clone(&store));
        let merger = ResultMerger::from_config(&config);

        Ok(Self {
            config,
            store,
            keyword_engine,
            merger,
        })
    }

    /// Build the grounding context for `query`.
    ///
    /// A failing search path (empty query, wrong embedding size) contributes
    /// no results instead of failing the whole retrieval. Fails with
    /// `EmptyContext` when neither path yields any content.
    pub fn retrieve(&self, query: &str, query_embedding: &[f32]) -> Result<RetrievalResults> {
        let start = Instant::now();
        let mut stats = SearchStats::default();

        debug!("Hybrid retrieval for: '{query}'");

        // Stage 1: Vector search
        let semantic_start = Instant::now();
        let semantic_results = self.vector_results(query_embedding);
        stats.semantic_time_ms = semantic_start.elapsed().as_millis() as u64;
        stats.semantic_count = semantic_results.len();

        // Stage 2: Keyword search
        let keyword_start = Instant::now();
        let keyword_results = self.keyword_results(query);
        stats.keyword_time_ms = keyword_start.elapsed().as_millis() as u64;
        stats.keyword_count = keyword_results.len();

        // Stage 3: Merge
        let merge_start = Instant::now();
        let context = self.merger.merge(keyword_results, semantic_results)?;
        stats.merge_time_ms = merge_start.elapsed().as_millis() as u64;

        stats.total_time_ms = start.elapsed().as_millis() as u64;

        info!(
            "Retrieval completed in {}ms: {} keyword, {} vector, {} in context",
            stats.total_time_ms,
            stats.keyword_count,
            stats.semantic_count,
            context.len()
        );

        Ok(RetrievalResults {
            query: query.to_string(),
            context,
            stats,
        })
    }

    fn vector_results(&self, query_embedding: &[f32]) -> Vec<ScoredDocument> {
        match self
            .store
            .search(query_embedding, self.config.vector_top_k)
            .map_err(RetrievalError::from)
        {
            Ok(results) => results,
            Err(err) => {
                warn!("Vector search skipped: {err}");
                Vec::new()
            }
        }
    }

    fn keyword_results(&self, query: &str) -> Vec<Document> {
        match self.keyword_engine.search(query) {
            Ok(results) => results,
            Err(err) => {
                warn!("Keyword search skipped: {err}");
                Vec::new()
            }
        }
    }

    /// Get configuration
    pub fn config(&self) -> &RetrievalConfig {
        &self.config
    }

    pub fn store(&self) -> &CorpusStore {
        &self.store
    }
}
