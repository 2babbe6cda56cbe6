use crate::app::build_retrieval;
use crate::app::load_store;
use crate::config::SitebotConfig;
use anyhow::Context;
use anyhow::Result;
use clap::Parser;
use owo_colors::OwoColorize;
use sitebot_embeddings::Embedder;
use sitebot_embeddings::EmbeddingService;
use sitebot_embeddings::LazyEmbedder;
use sitebot_retrieval::RetrievalError;
use sitebot_vector_store::read_documents;
use sitebot_vector_store::write_embeddings;
use std::path::PathBuf;
use std::time::Instant;

#[derive(Debug, Parser)]
pub struct SearchArgs {
    /// Search query
    #[arg(value_name = "QUERY")]
    pub query: String,

    /// Print the assembled context block
    #[arg(short, long)]
    pub verbose: bool,
}

#[derive(Debug, Parser)]
pub struct EmbedArgs {
    /// Where to write the embeddings (defaults to the configured corpus file)
    #[arg(short, long, value_name = "PATH")]
    pub output: Option<PathBuf>,
}

/// Show what retrieval selects for a query, without generating an answer.
pub async fn run_search(config: &SitebotConfig, args: SearchArgs) -> Result<()> {
    let query = args.query.trim();
    if query.is_empty() {
        anyhow::bail!("Search query must not be empty");
    }

    let store = load_store(config).await?;
    let retrieval = build_retrieval(config, store)?;
    let embedder = LazyEmbedder::new(config.embedding.clone());

    let query_embedding = embedder
        .embed(query)
        .await
        .context("Failed to embed query")?;

    let results = match retrieval.retrieve(query, &query_embedding) {
        Ok(results) => results,
        Err(RetrievalError::EmptyContext) => {
            println!("{} No website content matched", "✗".bright_red());
            return Ok(());
        }
        Err(err) => return Err(err).context("Retrieval failed"),
    };

    println!(
        "{} {} documents in context ({} keyword, {} vector) in {}ms\n",
        "✓".bright_green(),
        results.context.len().to_string().bright_cyan(),
        results.stats.keyword_count,
        results.stats.semantic_count,
        results.stats.total_time_ms
    );

    for (i, entry) in results.context.entries.iter().enumerate() {
        let score = entry
            .score
            .map(|score| format!("{score:.3}"))
            .unwrap_or_else(|| "-".to_string());
        println!(
            "{}. {} {} {:?} {} {}",
            (i + 1).to_string().bright_yellow(),
            entry.document.url.bright_cyan(),
            "Source:".bright_black(),
            entry.source,
            "Score:".bright_black(),
            score.bright_green()
        );
    }

    if args.verbose {
        println!("\n{}", "Context:".bright_blue());
        for line in results.context.text.lines() {
            println!("   {}", line.dimmed());
        }
    }

    Ok(())
}

/// Compute the embeddings file for the configured documents file.
pub async fn run_embed(config: &SitebotConfig, args: EmbedArgs) -> Result<()> {
    let documents_path = &config.corpus.documents;
    let output = args
        .output
        .unwrap_or_else(|| config.corpus.embeddings.clone());

    let documents = read_documents(documents_path)
        .await
        .with_context(|| format!("Failed to read documents from {}", documents_path.display()))?;
    if documents.is_empty() {
        anyhow::bail!("No documents found in {}", documents_path.display());
    }

    println!(
        "{} Embedding {} documents from {}",
        "▶".bright_blue(),
        documents.len(),
        documents_path.display()
    );

    let start = Instant::now();
    let service = EmbeddingService::with_config(config.embedding.clone())
        .await
        .context("Failed to load embedding model")?;

    let texts = documents.into_iter().map(|doc| doc.text).collect();
    let embeddings = service
        .embed_batch(texts)
        .context("Failed to embed documents")?;

    write_embeddings(&output, &embeddings)
        .await
        .with_context(|| format!("Failed to write embeddings to {}", output.display()))?;

    println!(
        "{} Wrote {} embeddings ({} dimensions) to {} in {:.1}s",
        "✓".bright_green(),
        embeddings.len().to_string().bright_cyan(),
        service.dimension(),
        output.display(),
        start.elapsed().as_secs_f64()
    );

    Ok(())
}
