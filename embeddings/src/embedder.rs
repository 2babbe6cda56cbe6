use crate::error::EmbeddingError;
use crate::service::{EmbeddingConfig, EmbeddingService};
use async_trait::async_trait;
use log::info;
use tokio::sync::OnceCell;

/// Capability that turns a piece of text into an embedding vector.
#[async_trait]
pub trait Embedder: Send + Sync {
    async fn embed(&self, text: &str) -> Result<Vec<f32>, EmbeddingError>;
}

/// Embedder that loads its model on first use.
///
/// Queries answered by a shortcut rule never pay for model start-up.
pub struct LazyEmbedder {
    config: EmbeddingConfig,
    service: OnceCell<EmbeddingService>,
}

impl LazyEmbedder {
    pub fn new(config: EmbeddingConfig) -> Self {
        Self {
            config,
            service: OnceCell::new(),
        }
    }

    /// Whether the underlying model has been loaded yet
    pub fn is_loaded(&self) -> bool {
        self.service.initialized()
    }

    async fn service(&self) -> Result<&EmbeddingService, EmbeddingError> {
        self.service
            .get_or_try_init(|| async {
                info!("Loading embedding model on first use");
                EmbeddingService::with_config(self.config.clone()).await
            })
            .await
    }
}

#[async_trait]
impl Embedder for LazyEmbedder {
    async fn embed(&self, text: &str) -> Result<Vec<f32>, EmbeddingError> {
        self.service().await?.embed_single(text)
    }
}
