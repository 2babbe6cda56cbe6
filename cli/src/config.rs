use anyhow::Context;
use anyhow::Result;
use serde::Deserialize;
use serde::Serialize;
use sitebot_embeddings::EmbeddingConfig;
use sitebot_generation::GenerationConfig;
use sitebot_retrieval::RetrievalConfig;
use sitebot_retrieval::ShortcutMatcher;
use sitebot_retrieval::ShortcutRule;
use std::path::Path;
use std::path::PathBuf;

/// Config file read from the working directory when `--config` is not given
pub const DEFAULT_CONFIG_FILE: &str = "sitebot.toml";

/// Location of the corpus files
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CorpusConfig {
    /// JSON object of `{url, text}` records
    #[serde(default = "default_documents")]
    pub documents: PathBuf,

    /// JSON array of embeddings, index-aligned with the documents
    #[serde(default = "default_embeddings")]
    pub embeddings: PathBuf,
}

fn default_documents() -> PathBuf {
    PathBuf::from("website_documents.json")
}

fn default_embeddings() -> PathBuf {
    PathBuf::from("document_embeddings.json")
}

impl Default for CorpusConfig {
    fn default() -> Self {
        Self {
            documents: default_documents(),
            embeddings: default_embeddings(),
        }
    }
}

/// Contents of `sitebot.toml`
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SitebotConfig {
    #[serde(default)]
    pub corpus: CorpusConfig,

    #[serde(default)]
    pub retrieval: RetrievalConfig,

    #[serde(default)]
    pub embedding: EmbeddingConfig,

    #[serde(default)]
    pub generation: GenerationConfig,

    /// Replaces the built-in shortcut table when non-empty
    #[serde(default)]
    pub shortcuts: Vec<ShortcutRule>,
}

impl SitebotConfig {
    /// Load config from `path`, or from `sitebot.toml` when present.
    ///
    /// Relative paths inside the file resolve against the file's directory.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let path = match path {
            Some(path) => path.to_path_buf(),
            None => {
                let default = PathBuf::from(DEFAULT_CONFIG_FILE);
                if !default.exists() {
                    tracing::debug!("No {DEFAULT_CONFIG_FILE} found, using defaults");
                    return Ok(Self::default());
                }
                default
            }
        };

        let contents = std::fs::read_to_string(&path)
            .with_context(|| format!("Failed to read config {}", path.display()))?;
        let mut config = Self::from_toml(&contents)
            .with_context(|| format!("Invalid config {}", path.display()))?;

        if let Some(base) = path.parent() {
            config.resolve_paths(base);
        }

        tracing::info!("Loaded config from {}", path.display());
        Ok(config)
    }

    pub fn from_toml(contents: &str) -> Result<Self> {
        let config: Self = toml::from_str(contents)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        self.retrieval
            .validate()
            .map_err(|e| anyhow::anyhow!("[retrieval] {e}"))?;
        self.embedding
            .validate()
            .map_err(|e| anyhow::anyhow!("[embedding] {e}"))?;
        self.generation
            .validate()
            .map_err(|e| anyhow::anyhow!("[generation] {e}"))?;
        Ok(())
    }

    /// The configured shortcut table, or the built-in one
    pub fn shortcut_matcher(&self) -> Result<ShortcutMatcher> {
        if self.shortcuts.is_empty() {
            return Ok(ShortcutMatcher::default());
        }
        ShortcutMatcher::new(self.shortcuts.clone()).context("Invalid [[shortcuts]] table")
    }

    fn resolve_paths(&mut self, base: &Path) {
        for path in [
            &mut self.corpus.documents,
            &mut self.corpus.embeddings,
            &mut self.embedding.cache_dir,
        ] {
            if path.is_relative() {
                *path = base.join(&*path);
            }
        }
    }
}
