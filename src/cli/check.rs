use crate::config::Config;
use crate::fetch::HttpSource;
use crate::logbook::LogBook;
use crate::monitor;
use crate::Result;
use colored::Colorize;
use std::path::Path;

/// Run a single check cycle
pub async fn run(config_path: Option<&Path>) -> Result<()> {
    let config = Config::load(config_path)?;
    let source = HttpSource::new()?;
    let logbook = LogBook::open(&config.log_dir, &config.filename)?;
    let mut store = super::load_store(&config);

    println!("{}", "🔍 Running single check...".cyan());
    let report = monitor::run_cycle(&config, &source, &mut store, &logbook).await?;
    super::print_report(&report);
    println!("{}", "✅ Check complete!".green());

    Ok(())
}
