use crate::embedder::Embedder;
use crate::error::EmbeddingError;
use async_trait::async_trait;
use fastembed::{
    EmbeddingModel, InitOptions, InitOptionsUserDefined, Pooling, TextEmbedding, TokenizerFiles,
    UserDefinedEmbeddingModel,
};
use log::{debug, info};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Configuration for the embedding service
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EmbeddingConfig {
    /// Model to use for embeddings
    #[serde(default)]
    pub model: EmbeddingModelType,

    /// Directory holding downloaded model files
    #[serde(default = "default_cache_dir")]
    pub cache_dir: PathBuf,

    /// Maximum batch size for embedding generation
    #[serde(default = "default_batch_size")]
    pub batch_size: usize,

    /// Show download progress when downloading models
    #[serde(default)]
    pub show_download_progress: bool,

    /// Pooling over token embeddings; mean when unset, which is what the
    /// published `document_embeddings.json` files were computed with
    #[serde(default)]
    pub pooling: Option<PoolingMode>,
}

fn default_cache_dir() -> PathBuf {
    PathBuf::from("./models")
}

fn default_batch_size() -> usize {
    32
}

impl Default for EmbeddingConfig {
    fn default() -> Self {
        Self {
            model: EmbeddingModelType::default(),
            cache_dir: default_cache_dir(),
            batch_size: default_batch_size(),
            show_download_progress: false,
            pooling: None,
        }
    }
}

impl EmbeddingConfig {
    /// Validate configuration
    pub fn validate(&self) -> Result<(), String> {
        if self.batch_size == 0 {
            return Err("batch_size must be > 0".to_string());
        }
        Ok(())
    }

    /// Pooling the service will apply
    pub fn pooling(&self) -> PoolingMode {
        self.pooling.unwrap_or(PoolingMode::Mean)
    }
}

/// How token embeddings are reduced to one vector
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PoolingMode {
    /// First ([CLS]) token
    Cls,
    /// Attention-masked average of all tokens
    Mean,
}

impl PoolingMode {
    fn to_fastembed(self) -> Pooling {
        match self {
            PoolingMode::Cls => Pooling::Cls,
            PoolingMode::Mean => Pooling::Mean,
        }
    }
}

/// Supported embedding models
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum EmbeddingModelType {
    /// BAAI bge-small-en-v1.5 (normalized)
    #[default]
    #[serde(rename = "bge-small-en-v1.5")]
    BgeSmallEnV15,
    /// All-MiniLM-L6-v2 (lightweight, faster)
    #[serde(rename = "all-minilm-l6-v2")]
    AllMiniLmL6V2,
    /// Nomic-embed-text-v1.5
    #[serde(rename = "nomic-embed-text-v1.5")]
    NomicEmbedTextV15,
}

impl EmbeddingModelType {
    fn to_fastembed_model(self) -> EmbeddingModel {
        match self {
            EmbeddingModelType::BgeSmallEnV15 => EmbeddingModel::BGESmallENV15,
            EmbeddingModelType::AllMiniLmL6V2 => EmbeddingModel::AllMiniLML6V2,
            EmbeddingModelType::NomicEmbedTextV15 => EmbeddingModel::NomicEmbedTextV15,
        }
    }

    /// Pooling fastembed applies to this model out of the box
    pub fn native_pooling(self) -> PoolingMode {
        match self {
            EmbeddingModelType::BgeSmallEnV15 => PoolingMode::Cls,
            EmbeddingModelType::AllMiniLmL6V2 | EmbeddingModelType::NomicEmbedTextV15 => {
                PoolingMode::Mean
            }
        }
    }

    /// Hugging Face repository and ONNX file fastembed downloads for this model
    fn hub_files(self) -> (&'static str, &'static str) {
        match self {
            EmbeddingModelType::BgeSmallEnV15 => ("Xenova/bge-small-en-v1.5", "onnx/model.onnx"),
            EmbeddingModelType::AllMiniLmL6V2 => ("Qdrant/all-MiniLM-L6-v2-onnx", "model.onnx"),
            EmbeddingModelType::NomicEmbedTextV15 => {
                ("nomic-ai/nomic-embed-text-v1.5", "onnx/model.onnx")
            }
        }
    }

    /// Dimension of the vectors this model produces
    pub fn dimension(self) -> usize {
        match self {
            EmbeddingModelType::BgeSmallEnV15 | EmbeddingModelType::AllMiniLmL6V2 => 384,
            EmbeddingModelType::NomicEmbedTextV15 => 768,
        }
    }
}

/// Service for generating text embeddings with a local ONNX model
pub struct EmbeddingService {
    model: TextEmbedding,
    config: EmbeddingConfig,
}

impl EmbeddingService {
    /// Create a new embedding service with default configuration
    pub async fn new() -> Result<Self, EmbeddingError> {
        Self::with_config(EmbeddingConfig::default()).await
    }

    /// Create a new embedding service with custom configuration
    pub async fn with_config(config: EmbeddingConfig) -> Result<Self, EmbeddingError> {
        config.validate().map_err(EmbeddingError::InvalidInput)?;

        info!(
            "Initializing embedding service with model {:?} from {}",
            config.model,
            config.cache_dir.display()
        );

        let init_options = InitOptions::new(config.model.to_fastembed_model())
            .with_cache_dir(config.cache_dir.clone())
            .with_show_download_progress(config.show_download_progress);

        let pooling = config.pooling();
        let model = if pooling == config.model.native_pooling() {
            load_model(init_options)?
        } else {
            info!(
                "Using {pooling:?} pooling instead of the model's {:?}",
                config.model.native_pooling()
            );
            load_model_with_pooling(&config, init_options, pooling).await?
        };

        info!("Embedding service initialized successfully");

        Ok(Self { model, config })
    }

    /// Generate embeddings for a list of texts
    ///
    /// # Arguments
    ///
    /// * `texts` - Vector of texts to embed
    ///
    /// # Returns
    ///
    /// Vector of embedding vectors, one for each input text
    pub fn embed_batch(&self, texts: Vec<String>) -> Result<Vec<Vec<f32>>, EmbeddingError> {
        if texts.is_empty() {
            return Ok(Vec::new());
        }

        debug!("Generating embeddings for {} texts", texts.len());

        let text_refs: Vec<&str> = texts.iter().map(String::as_str).collect();
        let mut all_embeddings = Vec::with_capacity(texts.len());

        for chunk in text_refs.chunks(self.config.batch_size) {
            let batch_embeddings = self.model.embed(chunk.to_vec(), None)?;
            all_embeddings.extend(batch_embeddings);
        }

        debug!("Generated {} embeddings", all_embeddings.len());

        Ok(all_embeddings)
    }

    /// Generate a single embedding for a text
    pub fn embed_single(&self, text: &str) -> Result<Vec<f32>, EmbeddingError> {
        let mut embeddings = self.embed_batch(vec![text.to_string()])?;
        embeddings
            .pop()
            .ok_or_else(|| EmbeddingError::ModelUnavailable("No embedding generated".into()))
    }

    /// Get the dimension of embeddings produced by this service
    pub fn dimension(&self) -> usize {
        self.config.model.dimension()
    }

    /// Get the configuration of this service
    pub fn config(&self) -> &EmbeddingConfig {
        &self.config
    }
}

#[async_trait]
impl Embedder for EmbeddingService {
    async fn embed(&self, text: &str) -> Result<Vec<f32>, EmbeddingError> {
        self.embed_single(text)
    }
}

fn load_model(init_options: InitOptions) -> Result<TextEmbedding, EmbeddingError> {
    TextEmbedding::try_new(init_options)
        .map_err(|e| EmbeddingError::ModelUnavailable(format!("Failed to initialize model: {e}")))
}

/// Build the model from its cached files with an explicit pooling.
///
/// fastembed fixes the pooling of its catalogue models, so the ONNX graph and
/// tokenizer are loaded as a user-defined model instead. Files missing from
/// the cache are downloaded through the regular loader first.
async fn load_model_with_pooling(
    config: &EmbeddingConfig,
    init_options: InitOptions,
    pooling: PoolingMode,
) -> Result<TextEmbedding, EmbeddingError> {
    let (repo, onnx_path) = config.model.hub_files();

    let snapshot = match find_snapshot(&config.cache_dir, repo, onnx_path).await? {
        Some(dir) => dir,
        None => {
            load_model(init_options)?;
            find_snapshot(&config.cache_dir, repo, onnx_path)
                .await?
                .ok_or_else(|| {
                    EmbeddingError::ModelUnavailable(format!(
                        "model files for {repo} not found under {}",
                        config.cache_dir.display()
                    ))
                })?
        }
    };

    debug!("Loading model files from {}", snapshot.display());
    let model = read_model_files(&snapshot, onnx_path)
        .await?
        .with_pooling(pooling.to_fastembed());

    TextEmbedding::try_new_from_user_defined(model, InitOptionsUserDefined::default())
        .map_err(|e| EmbeddingError::ModelUnavailable(format!("Failed to initialize model: {e}")))
}

/// Snapshot directory of `repo` in the hub cache that contains `onnx_path`
async fn find_snapshot(
    cache_dir: &Path,
    repo: &str,
    onnx_path: &str,
) -> Result<Option<PathBuf>, EmbeddingError> {
    let snapshots = cache_dir
        .join(format!("models--{}", repo.replace('/', "--")))
        .join("snapshots");
    if !tokio::fs::try_exists(&snapshots).await? {
        return Ok(None);
    }

    let mut entries = tokio::fs::read_dir(&snapshots).await?;
    while let Some(entry) = entries.next_entry().await? {
        let dir = entry.path();
        if tokio::fs::try_exists(dir.join(onnx_path)).await? {
            return Ok(Some(dir));
        }
    }
    Ok(None)
}

async fn read_model_files(
    snapshot: &Path,
    onnx_path: &str,
) -> Result<UserDefinedEmbeddingModel, EmbeddingError> {
    let onnx_file = tokio::fs::read(snapshot.join(onnx_path)).await?;
    let tokenizer_files = TokenizerFiles {
        tokenizer_file: tokio::fs::read(snapshot.join("tokenizer.json")).await?,
        config_file: tokio::fs::read(snapshot.join("config.json")).await?,
        special_tokens_map_file: tokio::fs::read(snapshot.join("special_tokens_map.json")).await?,
        tokenizer_config_file: tokio::fs::read(snapshot.join("tokenizer_config.json")).await?,
    };
    Ok(UserDefinedEmbeddingModel::new(onnx_file, tokenizer_files))
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use tempfile::TempDir;

    #[test]
    fn test_default_config() {
        let config = EmbeddingConfig::default();
        assert_eq!(config.model, EmbeddingModelType::BgeSmallEnV15);
        assert_eq!(config.cache_dir, PathBuf::from("./models"));
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_zero_batch_size_rejected() {
        let config = EmbeddingConfig {
            batch_size: 0,
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_model_names_deserialize() {
        let config: EmbeddingConfig =
            serde_json::from_str(r#"{"model": "all-minilm-l6-v2"}"#).unwrap();
        assert_eq!(config.model, EmbeddingModelType::AllMiniLmL6V2);
        assert_eq!(config.batch_size, 32);
    }

    #[test]
    fn test_bge_defaults_to_mean_pooling() {
        let config = EmbeddingConfig::default();
        assert_eq!(config.pooling(), PoolingMode::Mean);
        // fastembed would pool bge with [CLS], so the override path is taken
        assert_eq!(config.model.native_pooling(), PoolingMode::Cls);
        assert!(matches!(config.pooling().to_fastembed(), Pooling::Mean));
    }

    #[test]
    fn test_pooling_override_from_config() {
        let config: EmbeddingConfig = serde_json::from_str(r#"{"pooling": "cls"}"#).unwrap();
        assert_eq!(config.pooling(), PoolingMode::Cls);
        assert_eq!(config.pooling(), config.model.native_pooling());
    }

    #[tokio::test]
    async fn test_find_snapshot_in_hub_cache() {
        let cache = TempDir::new().unwrap();
        let (repo, onnx_path) = EmbeddingModelType::BgeSmallEnV15.hub_files();
        assert_eq!(
            find_snapshot(cache.path(), repo, onnx_path).await.unwrap(),
            None
        );

        let snapshots = cache
            .path()
            .join("models--Xenova--bge-small-en-v1.5")
            .join("snapshots");
        std::fs::create_dir_all(snapshots.join("partial")).unwrap();
        let complete = snapshots.join("abc123");
        std::fs::create_dir_all(complete.join("onnx")).unwrap();
        std::fs::write(complete.join(onnx_path), b"onnx").unwrap();

        assert_eq!(
            find_snapshot(cache.path(), repo, onnx_path).await.unwrap(),
            Some(complete)
        );
    }

    #[tokio::test]
    async fn test_missing_tokenizer_file_is_io_error() {
        let snapshot = TempDir::new().unwrap();
        std::fs::write(snapshot.path().join("model.onnx"), b"onnx").unwrap();

        let err = read_model_files(snapshot.path(), "model.onnx")
            .await
            .err()
            .unwrap();
        assert!(matches!(err, EmbeddingError::Io(_)));
    }

    #[test]
    fn test_model_dimensions() {
        assert_eq!(EmbeddingModelType::BgeSmallEnV15.dimension(), 384);
        assert_eq!(EmbeddingModelType::NomicEmbedTextV15.dimension(), 768);
    }

    #[tokio::test]
    #[ignore = "Requires downloading embedding model"]
    async fn test_embed_single() {
        let service = EmbeddingService::new().await.unwrap();
        let embedding = service.embed_single("What courses do you offer?").unwrap();
        assert_eq!(embedding.len(), service.dimension());
    }

    #[tokio::test]
    #[ignore = "Requires downloading embedding model"]
    async fn test_empty_batch() {
        let service = EmbeddingService::new().await.unwrap();
        let embeddings = service.embed_batch(vec![]).unwrap();
        assert!(embeddings.is_empty());
    }
}
