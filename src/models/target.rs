use serde::{Deserialize, Serialize};

/// One monitored repository index endpoint
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Target {
    /// Short identifier used in state entries and log file names (e.g. "noble-main")
    pub name: String,

    /// URL of the directory listing that carries the tracked file
    pub url: String,
}

impl Target {
    pub fn new(name: impl Into<String>, url: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            url: url.into(),
        }
    }
}

/// How to treat a target that has no recorded timestamp yet
///
/// A scheduled-job deployment usually wants `Baseline` so the very first run
/// after an empty state store does not announce every target at once.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FirstSeenPolicy {
    /// Record the first observation without announcing an update
    #[default]
    Baseline,
    /// Announce the first observation as an update
    Announce,
}
