//! Append-only check and update logs
//!
//! Each target gets its own `<name>_updates.log` with one line per check;
//! `update_summary.log` collects one line per detected update across all
//! targets. Lines carry the UTC wall-clock time of the check.

use crate::{Context, Result};
use chrono::{DateTime, Utc};
use std::fs::OpenOptions;
use std::io::Write;
use std::path::{Path, PathBuf};

const SUMMARY_LOG: &str = "update_summary.log";

pub struct LogBook {
    dir: PathBuf,
    filename: String,
}

impl LogBook {
    /// Open a log book rooted at `dir`, creating the directory if needed.
    /// `filename` is the tracked file named in the log lines.
    pub fn open(dir: impl Into<PathBuf>, filename: &str) -> Result<Self> {
        let dir = dir.into();
        std::fs::create_dir_all(&dir)
            .with_context(|| format!("Failed to create log directory {}", dir.display()))?;
        Ok(Self {
            dir,
            filename: filename.to_string(),
        })
    }

    pub fn target_log_path(&self, target: &str) -> PathBuf {
        self.dir.join(format!("{target}_updates.log"))
    }

    pub fn summary_log_path(&self) -> PathBuf {
        self.dir.join(SUMMARY_LOG)
    }

    /// One line per check in the target's own log
    pub fn record_check(
        &self,
        target: &str,
        modified: DateTime<Utc>,
        is_new: bool,
    ) -> Result<()> {
        let line = if is_new {
            format!(
                "[{}] UPDATE DETECTED! {} modified: {}",
                wall_clock(Utc::now()),
                self.filename,
                minute_utc(modified)
            )
        } else {
            format!(
                "[{}] Check: {} last modified: {}",
                wall_clock(Utc::now()),
                self.filename,
                minute_utc(modified)
            )
        };
        self.append(&self.target_log_path(target), &line)
    }

    /// One line per detected update, across all targets
    pub fn record_update(&self, target: &str, modified: DateTime<Utc>) -> Result<()> {
        let line = format!(
            "[{}] {}: UPDATE - {} modified at {}",
            wall_clock(Utc::now()),
            target,
            self.filename,
            minute_utc(modified)
        );
        self.append(&self.summary_log_path(), &line)
    }

    fn append(&self, path: &Path, line: &str) -> Result<()> {
        let mut file = OpenOptions::new()
            .append(true)
            .create(true)
            .open(path)
            .with_context(|| format!("Failed to open log file {}", path.display()))?;
        writeln!(file, "{line}")
            .with_context(|| format!("Failed to append to log file {}", path.display()))
    }
}

/// Wall-clock stamp for log line prefixes
fn wall_clock(now: DateTime<Utc>) -> String {
    now.format("%Y-%m-%d %H:%M:%S UTC").to_string()
}

/// Extracted timestamps are minute precision
pub fn minute_utc(timestamp: DateTime<Utc>) -> String {
    timestamp.format("%Y-%m-%d %H:%M UTC").to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use tempfile::TempDir;

    fn modified() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 8, 9, 9, 15, 0).unwrap()
    }

    #[test]
    fn test_routine_check_line() {
        let temp = TempDir::new().unwrap();
        let book = LogBook::open(temp.path().join("logs"), "Packages.gz").unwrap();

        book.record_check("noble-main", modified(), false).unwrap();

        let log = std::fs::read_to_string(book.target_log_path("noble-main")).unwrap();
        assert!(log.contains("Check: Packages.gz last modified: 2025-08-09 09:15 UTC"));
        assert!(!log.contains("UPDATE DETECTED"));
        assert!(!book.summary_log_path().exists());
    }

    #[test]
    fn test_update_lines_reach_both_logs() {
        let temp = TempDir::new().unwrap();
        let book = LogBook::open(temp.path().join("logs"), "Packages.gz").unwrap();

        book.record_check("noble-main", modified(), true).unwrap();
        book.record_update("noble-main", modified()).unwrap();

        let target_log = std::fs::read_to_string(book.target_log_path("noble-main")).unwrap();
        assert!(target_log.contains("UPDATE DETECTED! Packages.gz modified: 2025-08-09 09:15 UTC"));

        let summary = std::fs::read_to_string(book.summary_log_path()).unwrap();
        assert!(summary.contains("noble-main: UPDATE - Packages.gz modified at 2025-08-09 09:15 UTC"));
    }

    #[test]
    fn test_logs_are_append_only() {
        let temp = TempDir::new().unwrap();
        let book = LogBook::open(temp.path().join("logs"), "Packages.gz").unwrap();

        book.record_check("noble-main", modified(), false).unwrap();
        book.record_check("noble-main", modified(), false).unwrap();

        let log = std::fs::read_to_string(book.target_log_path("noble-main")).unwrap();
        assert_eq!(log.lines().count(), 2);
    }
}
