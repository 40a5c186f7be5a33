use crate::config::Config;
use crate::logbook::minute_utc;
use crate::Result;
use colored::Colorize;
use std::path::Path;

/// Show the recorded timestamp for each target
pub fn run(config_path: Option<&Path>) -> Result<()> {
    let config = Config::load(config_path)?;
    let store = super::load_store(&config);

    if store.is_empty() {
        println!(
            "{}",
            "No recorded state yet. Run 'repowatch check' first.".yellow()
        );
        return Ok(());
    }

    println!("{}", "📋 Recorded update times:".cyan());
    for (name, timestamp) in store.entries() {
        let marker = if config.targets.iter().any(|t| t.name == *name) {
            " "
        } else {
            // Entry survives from a target no longer configured
            "?"
        };
        println!(
            "  {} {}: {}",
            marker,
            name.as_str().bold(),
            minute_utc(*timestamp)
        );
    }

    Ok(())
}
