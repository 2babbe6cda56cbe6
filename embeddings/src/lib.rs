//! # Sitebot Embeddings
//!
//! Text embedding for queries and website documents. It uses the
//! bge-small-en-v1.5 model via fastembed-rs by default, with model files kept
//! in a local cache directory.
//!
//! ## Features
//!
//! - Local embedding generation using ONNX Runtime
//! - `Embedder` capability trait for the answering pipeline
//! - Lazy model loading for shortcut-heavy traffic
//! - Batch processing for embedding a whole corpus
//!
//! ## Example
//!
//! ```no_run
//! use sitebot_embeddings::{Embedder, EmbeddingService};
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let service = EmbeddingService::new().await?;
//!     let embedding = service.embed("Which courses do you offer?").await?;
//!     println!("Embedding has {} dimensions", embedding.len());
//!     Ok(())
//! }
//! ```

mod embedder;
mod error;
mod service;

pub use embedder::{Embedder, LazyEmbedder};
pub use error::EmbeddingError;
pub use service::{EmbeddingConfig, EmbeddingModelType, EmbeddingService};
