use crate::error::Result;
use crate::prompt::FALLBACK_ANSWER;
use crate::prompt::NO_ANSWER_GENERATED;
use crate::prompt::PromptAssembler;
use log::debug;
use log::info;
use serde::Deserialize;
use serde::Serialize;
use sitebot_embeddings::Embedder;
use sitebot_generation::Generator;
use sitebot_generation::first_generated_text;
use sitebot_retrieval::HybridRetrieval;
use sitebot_retrieval::RetrievalError;
use sitebot_retrieval::RetrievalResults;
use sitebot_retrieval::ShortcutMatcher;
use std::sync::Arc;

/// How a reply was produced
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReplyKind {
    /// Canned response from a shortcut rule
    Shortcut,
    /// Model output grounded on retrieved context
    Generated,
    /// Retrieval found nothing; the fallback sentence
    NotFound,
}

/// Answer to one user query
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Reply {
    pub kind: ReplyKind,

    pub text: String,

    /// Urls of the documents the answer was grounded on
    pub sources: Vec<String>,
}

impl Reply {
    fn shortcut(text: String) -> Self {
        Self {
            kind: ReplyKind::Shortcut,
            text,
            sources: Vec::new(),
        }
    }

    fn not_found() -> Self {
        Self {
            kind: ReplyKind::NotFound,
            text: FALLBACK_ANSWER.to_string(),
            sources: Vec::new(),
        }
    }
}

/// Everything decided before the generator is called
#[derive(Debug, Clone)]
pub enum PreparedQuery {
    Shortcut(String),
    NotFound,
    Prompt {
        prompt: String,
        results: RetrievalResults,
    },
}

/// Per-query answering flow: shortcut, retrieval, prompt, generation
pub struct ChatResponder {
    shortcuts: ShortcutMatcher,
    retrieval: HybridRetrieval,
    assembler: PromptAssembler,
    embedder: Arc<dyn Embedder>,
    generator: Arc<dyn Generator>,
}

impl ChatResponder {
    pub fn new(
        shortcuts: ShortcutMatcher,
        retrieval: HybridRetrieval,
        embedder: Arc<dyn Embedder>,
        generator: Arc<dyn Generator>,
    ) -> Self {
        Self {
            shortcuts,
            retrieval,
            assembler: PromptAssembler::new(),
            embedder,
            generator,
        }
    }

    /// Run the steps up to, but not including, generation.
    ///
    /// Returns `None` for a blank query.
    pub async fn prepare(&self, query: &str) -> Result<Option<PreparedQuery>> {
        let query = query.trim();
        if query.is_empty() {
            return Ok(None);
        }

        if let Some(response) = self.shortcuts.find_response(query) {
            debug!("Answered by shortcut rule");
            return Ok(Some(PreparedQuery::Shortcut(response.to_string())));
        }

        let query_embedding = self.embedder.embed(query).await?;

        let results = match self.retrieval.retrieve(query, &query_embedding) {
            Ok(results) => results,
            Err(RetrievalError::EmptyContext) => {
                info!("No website content found for query");
                return Ok(Some(PreparedQuery::NotFound));
            }
            Err(err) => return Err(err.into()),
        };

        let prompt = self.assembler.build(&results.context.text, query);
        Ok(Some(PreparedQuery::Prompt { prompt, results }))
    }

    /// Answer `query`; `None` when the query is blank.
    pub async fn respond(&self, query: &str) -> Result<Option<Reply>> {
        let prepared = match self.prepare(query).await? {
            Some(prepared) => prepared,
            None => return Ok(None),
        };

        let reply = match prepared {
            PreparedQuery::Shortcut(text) => Reply::shortcut(text),
            PreparedQuery::NotFound => Reply::not_found(),
            PreparedQuery::Prompt { prompt, results } => {
                let candidates = self.generator.generate(&prompt).await?;
                let text = first_generated_text(&candidates).unwrap_or_else(|| {
                    debug!("Generator returned no usable text");
                    NO_ANSWER_GENERATED.to_string()
                });

                Reply {
                    kind: ReplyKind::Generated,
                    text,
                    sources: results
                        .context
                        .urls()
                        .into_iter()
                        .map(str::to_string)
                        .collect(),
                }
            }
        };

        Ok(Some(reply))
    }

    pub fn shortcuts(&self) -> &ShortcutMatcher {
        &self.shortcuts
    }

    pub fn retrieval(&self) -> &HybridRetrieval {
        &self.retrieval
    }
}
