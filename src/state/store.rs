//! StateStore - last-known timestamp persistence

use chrono::{DateTime, Utc};
use std::collections::BTreeMap;
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum StateError {
    #[error("failed to read state file {path}: {source}")]
    Load {
        path: PathBuf,
        source: io::Error,
    },

    #[error("state file {path} is not a valid JSON mapping: {source}")]
    Parse {
        path: PathBuf,
        source: serde_json::Error,
    },

    #[error("state file {path} has unparseable timestamp '{value}': {source}")]
    Timestamp {
        path: PathBuf,
        value: String,
        source: chrono::ParseError,
    },

    #[error("failed to encode state: {source}")]
    Encode { source: serde_json::Error },

    #[error("failed to persist state file {path}: {source}")]
    Persist {
        path: PathBuf,
        source: io::Error,
    },
}

/// Durable mapping of target name to the last recorded timestamp
///
/// Values are written as RFC 3339 UTC strings and round-trip exactly, so
/// ordering comparisons are stable across the serialize/deserialize boundary.
#[derive(Debug)]
pub struct StateStore {
    path: PathBuf,
    entries: BTreeMap<String, DateTime<Utc>>,
}

impl StateStore {
    /// Load the last known snapshot. A missing file is an empty mapping;
    /// an unreadable or malformed file is an error the caller is expected
    /// to report loudly before falling back to [`StateStore::empty`].
    pub fn load(path: impl Into<PathBuf>) -> Result<Self, StateError> {
        let path = path.into();

        let raw = match std::fs::read_to_string(&path) {
            Ok(raw) => raw,
            Err(err) if err.kind() == io::ErrorKind::NotFound => {
                return Ok(Self {
                    path,
                    entries: BTreeMap::new(),
                });
            }
            Err(source) => return Err(StateError::Load { path, source }),
        };

        let raw_entries: BTreeMap<String, String> =
            serde_json::from_str(&raw).map_err(|source| StateError::Parse {
                path: path.clone(),
                source,
            })?;

        let mut entries = BTreeMap::new();
        for (name, value) in raw_entries {
            let timestamp = DateTime::parse_from_rfc3339(&value)
                .map_err(|source| StateError::Timestamp {
                    path: path.clone(),
                    value: value.clone(),
                    source,
                })?
                .with_timezone(&Utc);
            entries.insert(name, timestamp);
        }

        Ok(Self { path, entries })
    }

    /// An empty mapping bound to `path` (fallback after a load failure)
    pub fn empty(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            entries: BTreeMap::new(),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Last recorded timestamp for a target, if any
    pub fn get(&self, name: &str) -> Option<DateTime<Utc>> {
        self.entries.get(name).copied()
    }

    /// Stage a timestamp for a target. Durable only after [`StateStore::save`].
    pub fn record(&mut self, name: &str, timestamp: DateTime<Utc>) {
        self.entries.insert(name.to_string(), timestamp);
    }

    pub fn entries(&self) -> &BTreeMap<String, DateTime<Utc>> {
        &self.entries
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Write the whole mapping as one atomic snapshot replace.
    ///
    /// The JSON is written to a temp file in the state file's directory and
    /// renamed over the old snapshot, so readers never observe a partial write.
    pub fn save(&self) -> Result<(), StateError> {
        let raw: BTreeMap<&str, String> = self
            .entries
            .iter()
            .map(|(name, timestamp)| (name.as_str(), timestamp.to_rfc3339()))
            .collect();
        let json =
            serde_json::to_string_pretty(&raw).map_err(|source| StateError::Encode { source })?;

        let dir = match self.path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent,
            _ => Path::new("."),
        };
        std::fs::create_dir_all(dir).map_err(|source| StateError::Persist {
            path: self.path.clone(),
            source,
        })?;

        let mut tmp = tempfile::NamedTempFile::new_in(dir).map_err(|source| {
            StateError::Persist {
                path: self.path.clone(),
                source,
            }
        })?;
        tmp.write_all(json.as_bytes())
            .and_then(|_| tmp.write_all(b"\n"))
            .map_err(|source| StateError::Persist {
                path: self.path.clone(),
                source,
            })?;
        tmp.persist(&self.path).map_err(|err| StateError::Persist {
            path: self.path.clone(),
            source: err.error,
        })?;

        Ok(())
    }
}
