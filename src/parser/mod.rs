//! Parsers for upstream page formats

pub mod listing;

pub use listing::{extract_timestamp, ExtractError};
