// Repowatch - Package Repository Update Monitor
// Tracks when repository mirrors republish their package index by watching
// the Packages.gz modification time on directory-listing pages

pub mod cli;
pub mod config;
pub mod fetch;
pub mod logbook;
pub mod models;
pub mod monitor;
pub mod parser;
pub mod state;

pub use anyhow::{Context, Result};
pub use colored::Colorize;

// Re-export commonly used types
pub use config::Config;
pub use models::{CycleReport, Decision, FirstSeenPolicy, Target, UpdateEvent};
pub use state::StateStore;
