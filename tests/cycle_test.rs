//! Integration tests for the check cycle
//!
//! Drives fetch → extract → evaluate → log → persist end to end with an
//! in-memory page source and a temp directory, covering:
//! - update detection against seeded state
//! - no-change and idempotence behavior
//! - first-seen policies on an empty state store
//! - partial-failure isolation between targets

use async_trait::async_trait;
use chrono::{TimeZone, Utc};
use repowatch::config::Config;
use repowatch::fetch::{FetchError, PageSource};
use repowatch::logbook::LogBook;
use repowatch::models::{FirstSeenPolicy, Target};
use repowatch::monitor;
use repowatch::state::StateStore;
use std::collections::HashMap;
use std::path::PathBuf;
use tempfile::TempDir;

struct StubSource {
    pages: HashMap<String, String>,
}

impl StubSource {
    fn new(pages: &[(&str, String)]) -> Self {
        Self {
            pages: pages
                .iter()
                .map(|(url, html)| (url.to_string(), html.clone()))
                .collect(),
        }
    }
}

#[async_trait]
impl PageSource for StubSource {
    async fn fetch(&self, url: &str) -> Result<String, FetchError> {
        self.pages
            .get(url)
            .cloned()
            .ok_or_else(|| FetchError::Unavailable {
                url: url.to_string(),
                reason: "connection refused".to_string(),
            })
    }
}

/// Listing page with one Packages.gz row reporting `stamp`
fn listing(stamp: &str) -> String {
    format!(
        "<html><body><table>\n\
         <tr><td><a href=\"../\">Parent Directory</a></td><td align=\"right\">  - </td></tr>\n\
         <tr><td><a href=\"Packages.gz\">Packages.gz</a></td>\n\
         <td align=\"right\">{stamp}  </td><td align=\"right\">1.6M</td></tr>\n\
         </table></body></html>\n"
    )
}

fn url(name: &str) -> String {
    format!("https://mirror.test/dists/{name}/binary-amd64/")
}

fn test_config(log_dir: PathBuf, names: &[&str], first_seen: FirstSeenPolicy) -> Config {
    Config {
        log_dir,
        filename: "Packages.gz".to_string(),
        first_seen,
        interval_minutes: 30,
        request_delay_secs: 0,
        targets: names
            .iter()
            .map(|&name| Target::new(name, url(name)))
            .collect(),
    }
}

#[tokio::test]
async fn test_advanced_timestamp_is_detected_and_persisted() {
    let temp = TempDir::new().unwrap();
    let config = test_config(temp.path().join("logs"), &["noble-main"], FirstSeenPolicy::Baseline);
    let logbook = LogBook::open(&config.log_dir, &config.filename).unwrap();

    std::fs::write(
        config.state_file(),
        r#"{"noble-main": "2025-08-09T08:38:00+00:00"}"#,
    )
    .unwrap();
    let mut store = StateStore::load(config.state_file()).unwrap();

    let source = StubSource::new(&[(url("noble-main").as_str(), listing("2025-08-09 09:15"))]);
    let report = monitor::run_cycle(&config, &source, &mut store, &logbook)
        .await
        .unwrap();

    assert_eq!(report.checks.len(), 1);
    assert!(report.checks[0].is_new);
    assert!(report.failures.is_empty());

    let updates = report.updates();
    assert_eq!(updates.len(), 1);
    assert_eq!(updates[0].target, "noble-main");

    let summary = std::fs::read_to_string(logbook.summary_log_path()).unwrap();
    assert_eq!(summary.lines().count(), 1);
    assert!(summary.contains("noble-main"));
    assert!(summary.contains("2025-08-09 09:15 UTC"));

    let state_raw = std::fs::read_to_string(config.state_file()).unwrap();
    assert!(state_raw.contains("2025-08-09T09:15:00+00:00"));
}

#[tokio::test]
async fn test_unchanged_timestamp_is_routine() {
    let temp = TempDir::new().unwrap();
    let config = test_config(temp.path().join("logs"), &["noble-main"], FirstSeenPolicy::Baseline);
    let logbook = LogBook::open(&config.log_dir, &config.filename).unwrap();

    std::fs::write(
        config.state_file(),
        r#"{"noble-main": "2025-08-09T08:38:00+00:00"}"#,
    )
    .unwrap();
    let mut store = StateStore::load(config.state_file()).unwrap();

    let source = StubSource::new(&[(url("noble-main").as_str(), listing("2025-08-09 08:38"))]);
    let report = monitor::run_cycle(&config, &source, &mut store, &logbook)
        .await
        .unwrap();

    assert_eq!(report.checks.len(), 1);
    assert!(!report.checks[0].is_new);
    assert!(!report.has_updates());
    assert!(!logbook.summary_log_path().exists());

    let target_log = std::fs::read_to_string(logbook.target_log_path("noble-main")).unwrap();
    assert_eq!(target_log.lines().count(), 1);
    assert!(target_log.contains("Check: Packages.gz last modified: 2025-08-09 08:38 UTC"));

    let reloaded = StateStore::load(config.state_file()).unwrap();
    assert_eq!(
        reloaded.get("noble-main"),
        Some(Utc.with_ymd_and_hms(2025, 8, 9, 8, 38, 0).unwrap())
    );
}

#[tokio::test]
async fn test_first_run_under_baseline_records_quietly() {
    let temp = TempDir::new().unwrap();
    let names = ["noble-main", "noble-updates", "noble-security"];
    let config = test_config(temp.path().join("logs"), &names, FirstSeenPolicy::Baseline);
    let logbook = LogBook::open(&config.log_dir, &config.filename).unwrap();
    let mut store = StateStore::load(config.state_file()).unwrap();
    assert!(store.is_empty());

    let pages: Vec<(String, String)> = names
        .iter()
        .map(|&name| (url(name), listing("2025-08-09 08:38")))
        .collect();
    let pages_ref: Vec<(&str, String)> = pages
        .iter()
        .map(|(u, h)| (u.as_str(), h.clone()))
        .collect();
    let source = StubSource::new(&pages_ref);

    let report = monitor::run_cycle(&config, &source, &mut store, &logbook)
        .await
        .unwrap();

    assert_eq!(report.checks.len(), 3);
    assert!(!report.has_updates());
    assert!(!logbook.summary_log_path().exists());

    let reloaded = StateStore::load(config.state_file()).unwrap();
    assert_eq!(reloaded.len(), 3);
    for name in names {
        assert!(reloaded.get(name).is_some());
    }
}

#[tokio::test]
async fn test_first_run_under_announce_emits_updates() {
    let temp = TempDir::new().unwrap();
    let config = test_config(temp.path().join("logs"), &["noble-main"], FirstSeenPolicy::Announce);
    let logbook = LogBook::open(&config.log_dir, &config.filename).unwrap();
    let mut store = StateStore::load(config.state_file()).unwrap();

    let source = StubSource::new(&[(url("noble-main").as_str(), listing("2025-08-09 08:38"))]);
    let report = monitor::run_cycle(&config, &source, &mut store, &logbook)
        .await
        .unwrap();

    assert_eq!(report.updates().len(), 1);
    let summary = std::fs::read_to_string(logbook.summary_log_path()).unwrap();
    assert!(summary.contains("noble-main"));
}

#[tokio::test]
async fn test_one_failing_target_does_not_abort_the_others() {
    let temp = TempDir::new().unwrap();
    let names = ["alpha", "beta", "gamma"];
    let config = test_config(temp.path().join("logs"), &names, FirstSeenPolicy::Baseline);
    let logbook = LogBook::open(&config.log_dir, &config.filename).unwrap();
    let mut store = StateStore::load(config.state_file()).unwrap();

    // beta has no page and will fail to fetch
    let source = StubSource::new(&[
        (url("alpha").as_str(), listing("2025-08-09 08:38")),
        (url("gamma").as_str(), listing("2025-08-09 09:15")),
    ]);

    let report = monitor::run_cycle(&config, &source, &mut store, &logbook)
        .await
        .unwrap();

    assert_eq!(report.checks.len(), 2);
    assert_eq!(report.failures.len(), 1);
    assert_eq!(report.failures[0].target, "beta");

    let reloaded = StateStore::load(config.state_file()).unwrap();
    assert_eq!(reloaded.len(), 2);
    assert!(reloaded.get("alpha").is_some());
    assert!(reloaded.get("beta").is_none());
    assert!(reloaded.get("gamma").is_some());

    assert!(logbook.target_log_path("alpha").exists());
    assert!(logbook.target_log_path("gamma").exists());
    assert!(!logbook.target_log_path("beta").exists());
}

#[tokio::test]
async fn test_failed_target_keeps_its_previous_entry() {
    let temp = TempDir::new().unwrap();
    let config = test_config(temp.path().join("logs"), &["noble-main"], FirstSeenPolicy::Baseline);
    let logbook = LogBook::open(&config.log_dir, &config.filename).unwrap();

    std::fs::write(
        config.state_file(),
        r#"{"noble-main": "2025-08-09T08:38:00+00:00"}"#,
    )
    .unwrap();
    let mut store = StateStore::load(config.state_file()).unwrap();

    let source = StubSource::new(&[]);
    let report = monitor::run_cycle(&config, &source, &mut store, &logbook)
        .await
        .unwrap();

    assert_eq!(report.failures.len(), 1);
    let reloaded = StateStore::load(config.state_file()).unwrap();
    assert_eq!(
        reloaded.get("noble-main"),
        Some(Utc.with_ymd_and_hms(2025, 8, 9, 8, 38, 0).unwrap())
    );
}

#[tokio::test]
async fn test_repeated_cycle_with_no_upstream_change_is_idempotent() {
    let temp = TempDir::new().unwrap();
    let config = test_config(temp.path().join("logs"), &["noble-main"], FirstSeenPolicy::Announce);
    let logbook = LogBook::open(&config.log_dir, &config.filename).unwrap();
    let mut store = StateStore::load(config.state_file()).unwrap();

    let source = StubSource::new(&[(url("noble-main").as_str(), listing("2025-08-09 09:15"))]);

    let first = monitor::run_cycle(&config, &source, &mut store, &logbook)
        .await
        .unwrap();
    assert_eq!(first.updates().len(), 1);
    let state_after_first = std::fs::read_to_string(config.state_file()).unwrap();

    let second = monitor::run_cycle(&config, &source, &mut store, &logbook)
        .await
        .unwrap();
    assert!(second.updates().is_empty());

    let state_after_second = std::fs::read_to_string(config.state_file()).unwrap();
    assert_eq!(state_after_first, state_after_second);

    // Second run also survives a process restart: reload from disk and re-run
    let mut reloaded = StateStore::load(config.state_file()).unwrap();
    let third = monitor::run_cycle(&config, &source, &mut reloaded, &logbook)
        .await
        .unwrap();
    assert!(third.updates().is_empty());
}

#[tokio::test]
async fn test_extraction_failure_is_isolated_like_a_fetch_failure() {
    let temp = TempDir::new().unwrap();
    let names = ["alpha", "beta"];
    let config = test_config(temp.path().join("logs"), &names, FirstSeenPolicy::Baseline);
    let logbook = LogBook::open(&config.log_dir, &config.filename).unwrap();
    let mut store = StateStore::load(config.state_file()).unwrap();

    let source = StubSource::new(&[
        (url("alpha").as_str(), "<html>no table here</html>".to_string()),
        (url("beta").as_str(), listing("2025-08-09 08:38")),
    ]);

    let report = monitor::run_cycle(&config, &source, &mut store, &logbook)
        .await
        .unwrap();

    assert_eq!(report.failures.len(), 1);
    assert_eq!(report.failures[0].target, "alpha");
    assert!(report.failures[0].reason.contains("Packages.gz"));
    assert_eq!(report.checks.len(), 1);
    assert_eq!(report.checks[0].observation.target, "beta");
}
