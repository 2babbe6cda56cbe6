use crate::app::build_responder;
use crate::config::SitebotConfig;
use anyhow::Result;
use clap::Parser;
use owo_colors::OwoColorize;
use sitebot_answer::ChatResponder;
use sitebot_answer::FALLBACK_ANSWER;
use sitebot_answer::PreparedQuery;
use sitebot_answer::Reply;
use std::io::IsTerminal;
use std::io::Write;
use tokio::io::AsyncBufReadExt;
use tokio::io::BufReader;

#[derive(Debug, Parser)]
pub struct AskArgs {
    /// Question to answer
    #[arg(value_name = "QUERY")]
    pub query: String,

    /// Print the prompt that would be sent to the model instead of generating
    #[arg(long)]
    pub prompt_only: bool,

    /// List the urls the answer was grounded on
    #[arg(short, long)]
    pub sources: bool,
}

#[derive(Debug, Parser)]
pub struct ChatArgs {
    /// List the urls each answer was grounded on
    #[arg(short, long)]
    pub sources: bool,
}

pub async fn run_ask(config: &SitebotConfig, args: AskArgs) -> Result<()> {
    let responder = build_responder(config).await?;

    if args.prompt_only {
        match responder.prepare(&args.query).await? {
            Some(PreparedQuery::Shortcut(text)) => println!("{text}"),
            Some(PreparedQuery::NotFound) => println!("{FALLBACK_ANSWER}"),
            Some(PreparedQuery::Prompt { prompt, .. }) => println!("{prompt}"),
            None => {}
        }
        return Ok(());
    }

    if let Some(reply) = responder.respond(&args.query).await? {
        print_reply(&reply, args.sources);
    }
    Ok(())
}

/// Answer one question per stdin line until end of input.
///
/// A failed answer is reported and the loop keeps going.
pub async fn run_chat(config: &SitebotConfig, args: ChatArgs) -> Result<()> {
    let responder = build_responder(config).await?;
    let interactive = std::io::stdin().is_terminal();

    if interactive {
        println!(
            "{} Ask about the website. Ctrl-D to quit.",
            "▶".bright_blue()
        );
    }

    let mut stdin = BufReader::new(tokio::io::stdin());
    let mut buf = Vec::new();
    loop {
        if interactive {
            print!("{} ", ">".bright_blue());
            std::io::stdout().flush()?;
        }

        buf.clear();
        if stdin.read_until(b'\n', &mut buf).await? == 0 {
            break;
        }
        match decode_line(&buf) {
            Some(line) => answer_line(&responder, line, args.sources).await,
            None => {
                tracing::warn!("Skipping input line that is not valid UTF-8");
                println!("Error: input line is not valid UTF-8");
            }
        }
    }

    Ok(())
}

/// Line text without its terminator, or `None` when it is not UTF-8.
fn decode_line(buf: &[u8]) -> Option<&str> {
    let line = std::str::from_utf8(buf).ok()?;
    Some(line.trim_end_matches(['\n', '\r']))
}

async fn answer_line(responder: &ChatResponder, line: &str, show_sources: bool) {
    match responder.respond(line).await {
        Ok(Some(reply)) => print_reply(&reply, show_sources),
        Ok(None) => {}
        Err(err) => {
            tracing::warn!("Answering failed: {err}");
            println!("Error: {err}");
        }
    }
}

fn print_reply(reply: &Reply, show_sources: bool) {
    println!("{}", reply.text);

    if show_sources && !reply.sources.is_empty() {
        println!("{}", "Sources:".bright_black());
        for url in &reply.sources {
            println!("  {}", url.bright_cyan());
        }
    }
}
