use crate::config::RetrievalConfig;
use crate::error::{Result, RetrievalError};
use crate::result::{ContextEntry, RetrievalContext, SearchSource};
use indexmap::IndexMap;
use indexmap::map::Entry;
use log::debug;
use sitebot_vector_store::{Document, ScoredDocument};

const BLOCK_SEPARATOR: &str = "\n\n";

/// Combines keyword and vector results into a bounded context block.
///
/// Keyword results come first and win on conflicts; documents are unique by
/// url, capped at `max_docs`, and the rendered text never exceeds
/// `max_chars` characters.
#[derive(Debug, Clone)]
pub struct ResultMerger {
    max_docs: usize,
    max_doc_chars: usize,
    max_chars: usize,
}

impl ResultMerger {
    pub fn new(max_docs: usize, max_doc_chars: usize, max_chars: usize) -> Self {
        Self {
            max_docs,
            max_doc_chars,
            max_chars,
        }
    }

    pub fn from_config(config: &RetrievalConfig) -> Self {
        Self::new(
            config.max_context_docs,
            config.max_doc_chars,
            config.max_context_chars,
        )
    }

    /// Merge both result lists; fails with `EmptyContext` when nothing but
    /// whitespace would remain.
    pub fn merge(
        &self,
        keyword_results: Vec<Document>,
        vector_results: Vec<ScoredDocument>,
    ) -> Result<RetrievalContext> {
        debug!(
            "Merging {} keyword + {} vector results",
            keyword_results.len(),
            vector_results.len()
        );

        let mut merged: IndexMap<String, ContextEntry> = IndexMap::new();

        for document in keyword_results {
            if let Entry::Vacant(slot) = merged.entry(document.url.clone()) {
                slot.insert(ContextEntry {
                    document,
                    source: SearchSource::Keyword,
                    score: None,
                });
            }
        }

        for scored in vector_results {
            match merged.entry(scored.document.url.clone()) {
                Entry::Occupied(mut slot) => {
                    let entry = slot.get_mut();
                    if entry.source == SearchSource::Keyword {
                        entry.source = SearchSource::Hybrid;
                        entry.score = Some(scored.score);
                    }
                }
                Entry::Vacant(slot) => {
                    slot.insert(ContextEntry {
                        document: scored.document,
                        source: SearchSource::Semantic,
                        score: Some(scored.score),
                    });
                }
            }
        }

        let mut full = String::new();
        let mut full_chars = 0;
        let mut entries = Vec::new();

        for (idx, entry) in merged.into_values().take(self.max_docs).enumerate() {
            if idx > 0 {
                full.push_str(BLOCK_SEPARATOR);
                full_chars += BLOCK_SEPARATOR.len();
            }

            let block_start = full_chars;
            let block = format!(
                "Source: {}\n{}",
                entry.document.url,
                entry.document.excerpt(self.max_doc_chars)
            );
            full_chars += block.chars().count();
            full.push_str(&block);

            // only documents whose block starts inside the budget are kept
            if block_start < self.max_chars {
                entries.push(entry);
            }
        }

        let text = truncate_chars(&full, self.max_chars).to_string();
        if text.trim().is_empty() {
            debug!("Merged context is empty");
            return Err(RetrievalError::EmptyContext);
        }

        debug!(
            "Merged context has {} documents, {} chars",
            entries.len(),
            text.chars().count()
        );
        Ok(RetrievalContext { entries, text })
    }
}

fn truncate_chars(text: &str, max_chars: usize) -> &str {
    match text.char_indices().nth(max_chars) {
        Some((byte_idx, _)) => &text[..byte_idx],
        None => text,
    }
}
