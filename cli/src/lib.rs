pub mod app;
pub mod chat_cmd;
pub mod config;
pub mod corpus_cmd;
pub mod shortcuts_cmd;

use anyhow::Result;
use chat_cmd::AskArgs;
use chat_cmd::ChatArgs;
use clap::Parser;
use clap::Subcommand;
use config::SitebotConfig;
use corpus_cmd::EmbedArgs;
use corpus_cmd::SearchArgs;
use std::path::PathBuf;

/// Answer questions about a website from its crawled content.
#[derive(Debug, Parser)]
#[command(name = "sitebot", version)]
pub struct SitebotCli {
    /// Config file (defaults to ./sitebot.toml when present)
    #[arg(short, long, global = true, value_name = "PATH")]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: SitebotCommand,
}

#[derive(Debug, Subcommand)]
pub enum SitebotCommand {
    /// Answer a single question
    Ask(AskArgs),

    /// Answer questions read line by line from stdin
    Chat(ChatArgs),

    /// Show the context retrieval selects for a query
    Search(SearchArgs),

    /// Compute the embeddings file for the documents file
    Embed(EmbedArgs),

    /// List the shortcut rules in match order
    Shortcuts,
}

impl SitebotCli {
    pub async fn run(self) -> Result<()> {
        let config = SitebotConfig::load(self.config.as_deref())?;

        match self.command {
            SitebotCommand::Ask(args) => chat_cmd::run_ask(&config, args).await,
            SitebotCommand::Chat(args) => chat_cmd::run_chat(&config, args).await,
            SitebotCommand::Search(args) => corpus_cmd::run_search(&config, args).await,
            SitebotCommand::Embed(args) => corpus_cmd::run_embed(&config, args).await,
            SitebotCommand::Shortcuts => shortcuts_cmd::run_shortcuts(&config),
        }
    }
}
