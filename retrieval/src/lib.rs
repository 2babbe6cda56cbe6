/*!
# Sitebot Retrieval

Hybrid retrieval and context assembly for the website chatbot:
- **Shortcut matching** answers common questions from a fixed rule table
- **Keyword search** via case-insensitive substring matching
- **Vector search** via cosine similarity over precomputed embeddings
- **Merging** into one deduplicated, size-bounded context block

## Architecture

```text
Query
  ├─> Shortcut Matcher
  │     └─> Canned answer (stops here on a hit)
  ├─> Keyword Search (substring)
  │     └─> All matches, corpus order
  ├─> Vector Search (cosine)
  │     └─> Top-K by similarity
  └─> Merger (keyword first, dedup by url)
        └─> "Source: <url>\n<excerpt>" blocks
              └─> Truncated to max_context_chars
```

## Example

```rust,no_run
use sitebot_retrieval::{HybridRetrieval, RetrievalConfig, ShortcutMatcher};
use sitebot_vector_store::CorpusStore;
use std::path::Path;
use std::sync::Arc;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let shortcuts = ShortcutMatcher::default();
    if let Some(answer) = shortcuts.find_response("who is the founder") {
        println!("{answer}");
    }

    let store = CorpusStore::load(
        Path::new("website_documents.json"),
        Path::new("document_embeddings.json"),
    )
    .await?;
    let retrieval = HybridRetrieval::new(RetrievalConfig::default(), Arc::new(store))?;

    let query_embedding = vec![0.0; 384]; // from the embedding model
    let results = retrieval.retrieve("azure", &query_embedding)?;
    println!("{}", results.context.text);

    Ok(())
}
```
*/

mod config;
mod error;
mod keyword;
mod merge;
mod result;
mod retrieval;
mod shortcut;

pub use config::RetrievalConfig;
pub use error::{Result, RetrievalError};
pub use keyword::KeywordSearchEngine;
pub use merge::ResultMerger;
pub use result::{ContextEntry, RetrievalContext, RetrievalResults, SearchSource, SearchStats};
pub use retrieval::HybridRetrieval;
pub use shortcut::{ShortcutMatcher, ShortcutRule, default_rules};
