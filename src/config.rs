//! Monitor configuration
//!
//! Loaded from `repowatch.toml` in the working directory (or a path given
//! with `--config`). With no config file present, the built-in Ubuntu noble
//! target set is used.

use crate::models::{FirstSeenPolicy, Target};
use crate::{Context, Result};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::path::{Path, PathBuf};

pub const DEFAULT_CONFIG_FILE: &str = "repowatch.toml";

/// State file name inside the log directory
const STATE_FILE: &str = "last_state.json";

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Directory holding the state file and the append-only logs
    pub log_dir: PathBuf,

    /// File whose reported modification time is the update signal
    pub filename: String,

    /// How to treat a target with no recorded timestamp yet
    pub first_seen: FirstSeenPolicy,

    /// Minutes between cycles in watch mode
    pub interval_minutes: u64,

    /// Pause between target requests within a cycle
    pub request_delay_secs: u64,

    pub targets: Vec<Target>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            log_dir: PathBuf::from("logs"),
            filename: "Packages.gz".to_string(),
            first_seen: FirstSeenPolicy::default(),
            interval_minutes: 30,
            request_delay_secs: 1,
            targets: vec![
                Target::new(
                    "noble-main",
                    "https://archive.ubuntu.com/ubuntu/dists/noble/main/binary-amd64/",
                ),
                Target::new(
                    "noble-updates",
                    "https://archive.ubuntu.com/ubuntu/dists/noble-updates/main/binary-amd64/",
                ),
                Target::new(
                    "noble-security",
                    "https://archive.ubuntu.com/ubuntu/dists/noble-security/main/binary-amd64/",
                ),
            ],
        }
    }
}

impl Config {
    /// Load configuration. An explicit path must exist; the default path is
    /// optional and falls back to the built-in target set.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let config = match path {
            Some(path) => Self::from_file(path)?,
            None => {
                let default_path = Path::new(DEFAULT_CONFIG_FILE);
                if default_path.exists() {
                    Self::from_file(default_path)?
                } else {
                    Self::default()
                }
            }
        };

        config.validate()?;
        Ok(config)
    }

    fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config {}", path.display()))?;
        toml::from_str(&content)
            .with_context(|| format!("Failed to parse config {}", path.display()))
    }

    pub fn state_file(&self) -> PathBuf {
        self.log_dir.join(STATE_FILE)
    }

    fn validate(&self) -> Result<()> {
        if self.targets.is_empty() {
            anyhow::bail!("No targets configured");
        }
        if self.interval_minutes == 0 {
            anyhow::bail!("interval_minutes must be at least 1");
        }
        if self.filename.trim().is_empty() {
            anyhow::bail!("filename must not be empty");
        }

        let mut seen = HashSet::new();
        for target in &self.targets {
            if !seen.insert(target.name.as_str()) {
                anyhow::bail!("Duplicate target name '{}'", target.name);
            }
        }

        Ok(())
    }
}
