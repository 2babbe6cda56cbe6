use crate::config::SitebotConfig;
use anyhow::Context;
use anyhow::Result;
use sitebot_answer::ChatResponder;
use sitebot_embeddings::LazyEmbedder;
use sitebot_generation::OpenAiCompatibleGenerator;
use sitebot_retrieval::HybridRetrieval;
use sitebot_vector_store::CorpusStore;
use std::sync::Arc;

/// Load the corpus named by the config.
pub async fn load_store(config: &SitebotConfig) -> Result<CorpusStore> {
    let documents = &config.corpus.documents;
    let embeddings = &config.corpus.embeddings;

    CorpusStore::load(documents, embeddings)
        .await
        .with_context(|| {
            format!(
                "Failed to load corpus from {} and {}",
                documents.display(),
                embeddings.display()
            )
        })
}

pub fn build_retrieval(config: &SitebotConfig, store: CorpusStore) -> Result<HybridRetrieval> {
    HybridRetrieval::new(config.retrieval.clone(), Arc::new(store))
        .context("Failed to initialize retrieval engine")
}

/// Assemble the full answering pipeline.
///
/// The embedding model is loaded lazily, so shortcut answers never touch it.
pub async fn build_responder(config: &SitebotConfig) -> Result<ChatResponder> {
    let shortcuts = config.shortcut_matcher()?;
    let store = load_store(config).await?;
    let retrieval = build_retrieval(config, store)?;

    let embedder = Arc::new(LazyEmbedder::new(config.embedding.clone()));
    let generator = Arc::new(
        OpenAiCompatibleGenerator::new(config.generation.clone())
            .context("Failed to initialize generation client")?,
    );

    Ok(ChatResponder::new(shortcuts, retrieval, embedder, generator))
}
