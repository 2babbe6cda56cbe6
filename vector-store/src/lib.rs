//! # Sitebot Vector Store
//!
//! In-memory corpus of website documents with precomputed embeddings, and
//! exact cosine-similarity search over it.
//!
//! ## Features
//!
//! - Documents and embeddings stored as one aligned sequence
//! - Loading from the `website_documents.json` / `document_embeddings.json` pair
//! - Brute-force top-k search with deterministic tie-breaking
//!
//! ## Example
//!
//! ```no_run
//! use sitebot_vector_store::CorpusStore;
//! use std::path::Path;
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let store = CorpusStore::load(
//!         Path::new("website_documents.json"),
//!         Path::new("document_embeddings.json"),
//!     )
//!     .await?;
//!
//!     let query_embedding = vec![0.0; store.dimension().unwrap_or_default()];
//!     let results = store.search(&query_embedding, 5)?;
//!
//!     println!("Found {} similar pages", results.len());
//!     Ok(())
//! }
//! ```

mod document;
mod error;
mod store;

pub use document::{CorpusEntry, Document, ScoredDocument};
pub use error::VectorStoreError;
pub use store::{CorpusStore, cosine_similarity, read_documents, write_embeddings};
