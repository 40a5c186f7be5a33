//! CLI command implementations

pub mod check;
pub mod init;
pub mod status;
pub mod watch;

use crate::config::Config;
use crate::logbook::minute_utc;
use crate::models::CycleReport;
use crate::state::StateStore;
use colored::Colorize;

/// Load persisted state, falling back to an empty mapping on a bad file.
/// A reset silently forgets update history, so it is reported loudly.
pub(crate) fn load_store(config: &Config) -> StateStore {
    match StateStore::load(config.state_file()) {
        Ok(store) => store,
        Err(err) => {
            eprintln!(
                "{}",
                format!("⚠ {}; update history reset", err).yellow().bold()
            );
            StateStore::empty(config.state_file())
        }
    }
}

/// Print one cycle's results to the console
pub(crate) fn print_report(report: &CycleReport) {
    for check in &report.checks {
        if check.is_new {
            println!(
                "{}",
                format!(
                    "🆕 {}: update at {}",
                    check.observation.target,
                    minute_utc(check.observation.timestamp)
                )
                .green()
                .bold()
            );
        } else {
            println!(
                "   ✓ {}: {}",
                check.observation.target,
                minute_utc(check.observation.timestamp)
            );
        }
    }

    for failure in &report.failures {
        eprintln!(
            "{}",
            format!("   ✗ {}: {}", failure.target, failure.reason).red()
        );
    }

    let updates = report.updates();
    if !updates.is_empty() {
        println!("\n{}", "🚨 Updates detected:".cyan().bold());
        for update in &updates {
            println!("   • {}: {}", update.target, minute_utc(update.timestamp));
        }
    }
}
