//! # Sitebot Generation
//!
//! Answer generation behind a small capability trait. The bundled client
//! talks to any OpenAI-compatible `/chat/completions` endpoint, which covers
//! hosted OpenAI as well as local Ollama and LM Studio servers.
//!
//! ## Example
//!
//! ```no_run
//! use sitebot_generation::{GenerationConfig, Generator, OpenAiCompatibleGenerator};
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let generator = OpenAiCompatibleGenerator::new(GenerationConfig::default())?;
//!     let candidates = generator.generate("Say hello").await?;
//!     println!("{} candidates", candidates.len());
//!     Ok(())
//! }
//! ```

mod error;
mod generator;
mod openai;

pub use error::GenerationError;
pub use generator::{GeneratedText, Generator, first_generated_text};
pub use openai::{GenerationConfig, OpenAiCompatibleGenerator};
