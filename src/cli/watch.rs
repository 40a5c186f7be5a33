use crate::config::Config;
use crate::fetch::HttpSource;
use crate::logbook::LogBook;
use crate::monitor;
use crate::Result;
use chrono::Utc;
use colored::Colorize;
use std::path::Path;
use std::time::Duration;

/// Run check cycles forever at a fixed interval.
///
/// A failed cycle (including a failed state write) is reported and the loop
/// keeps going; the next interval retries with the current in-memory state.
pub async fn run(config_path: Option<&Path>, interval: Option<u64>) -> Result<()> {
    let config = Config::load(config_path)?;
    let interval = interval.unwrap_or(config.interval_minutes);
    if interval == 0 {
        anyhow::bail!("Interval must be at least one minute");
    }

    let source = HttpSource::new()?;
    let logbook = LogBook::open(&config.log_dir, &config.filename)?;
    let mut store = super::load_store(&config);

    println!("{}", "🚀 Starting repository monitor".cyan().bold());
    println!("📁 Logs: {}", config.log_dir.display());
    println!("⏰ Check interval: {} minutes", interval);
    println!("🎯 Monitoring:");
    for target in &config.targets {
        println!("   • {}: {}", target.name, target.url);
    }
    println!("\nPress Ctrl+C to stop...");

    loop {
        println!(
            "\n{}",
            format!(
                "🔍 Checking targets at {}...",
                Utc::now().format("%Y-%m-%d %H:%M:%S UTC")
            )
            .cyan()
        );

        match monitor::run_cycle(&config, &source, &mut store, &logbook).await {
            Ok(report) => super::print_report(&report),
            Err(err) => eprintln!("{}", format!("❌ Cycle failed: {}", err).red().bold()),
        }

        let next_check = Utc::now() + chrono::Duration::minutes(interval as i64);
        println!(
            "⏳ Next check at: {}",
            next_check.format("%Y-%m-%d %H:%M:%S UTC")
        );
        tokio::time::sleep(Duration::from_secs(interval * 60)).await;
    }
}
