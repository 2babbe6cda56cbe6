//! # Sitebot Answer
//!
//! Turns a user query into a reply: shortcut rules first, otherwise hybrid
//! retrieval over the website corpus, a grounded prompt, and one generation
//! call.
//!
//! ## Example
//!
//! ```no_run
//! use sitebot_answer::ChatResponder;
//! use sitebot_embeddings::{EmbeddingConfig, LazyEmbedder};
//! use sitebot_generation::{GenerationConfig, OpenAiCompatibleGenerator};
//! use sitebot_retrieval::{HybridRetrieval, RetrievalConfig, ShortcutMatcher};
//! use sitebot_vector_store::CorpusStore;
//! use std::path::Path;
//! use std::sync::Arc;
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let store = CorpusStore::load(
//!         Path::new("website_documents.json"),
//!         Path::new("document_embeddings.json"),
//!     )
//!     .await?;
//!
//!     let responder = ChatResponder::new(
//!         ShortcutMatcher::default(),
//!         HybridRetrieval::new(RetrievalConfig::default(), Arc::new(store))?,
//!         Arc::new(LazyEmbedder::new(EmbeddingConfig::default())),
//!         Arc::new(OpenAiCompatibleGenerator::new(GenerationConfig::default())?),
//!     );
//!
//!     if let Some(reply) = responder.respond("What does the Azure course cover?").await? {
//!         println!("{}", reply.text);
//!     }
//!     Ok(())
//! }
//! ```

mod error;
mod prompt;
mod responder;

pub use error::{AnswerError, Result};
pub use prompt::{FALLBACK_ANSWER, NO_ANSWER_GENERATED, PromptAssembler};
pub use responder::{ChatResponder, PreparedQuery, Reply, ReplyKind};
