use crate::config::SitebotConfig;
use anyhow::Result;
use owo_colors::OwoColorize;

/// Print the active shortcut table in match order.
pub fn run_shortcuts(config: &SitebotConfig) -> Result<()> {
    let matcher = config.shortcut_matcher()?;

    if matcher.is_empty() {
        println!("No shortcut rules configured.");
        return Ok(());
    }

    for (i, rule) in matcher.rules().iter().enumerate() {
        println!(
            "{}. {}",
            (i + 1).to_string().bright_yellow(),
            rule.keywords.join(", ").bright_cyan()
        );
        println!("   {}", rule.response);
    }

    Ok(())
}
