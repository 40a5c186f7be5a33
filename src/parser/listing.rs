//! Directory-listing timestamp extraction
//!
//! Mirror index pages render one table row per file, e.g.:
//!
//! ```text
//! <tr><td><a href="Packages.gz">Packages.gz</a></td>
//! <td align="right">2025-08-09 08:38  </td><td align="right">1.6M</td></tr>
//! ```
//!
//! The anchor and the modification cell may be separated by arbitrary markup
//! and newlines, so the match runs in dot-matches-newline mode. Listing pages
//! report UTC-equivalent wall times at minute precision; seconds are zero.

use chrono::{DateTime, NaiveDateTime, Utc};
use regex::Regex;
use thiserror::Error;

/// Format the listing pages use for modification times
const LISTING_TIME_FORMAT: &str = "%Y-%m-%d %H:%M";

#[derive(Debug, Error)]
pub enum ExtractError {
    #[error("invalid listing pattern: {0}")]
    Pattern(#[from] regex::Error),

    #[error("no modification time for '{filename}' in listing")]
    PatternNotFound { filename: String },

    #[error("unparseable modification time '{value}': {source}")]
    BadTimestamp {
        value: String,
        source: chrono::ParseError,
    },
}

/// Extract the last-modified time reported for `filename` in a listing page.
///
/// Pure function of its inputs; identical HTML always yields the identical
/// result. The first row referencing `filename` wins.
pub fn extract_timestamp(html: &str, filename: &str) -> Result<DateTime<Utc>, ExtractError> {
    let file = regex::escape(filename);
    let pattern = format!(
        r#"(?s)<a href="{file}">{file}</a>.*?<td align="right">([\d-]+\s+[\d:]+)\s*</td>"#
    );
    let re = Regex::new(&pattern)?;

    let captures = re
        .captures(html)
        .ok_or_else(|| ExtractError::PatternNotFound {
            filename: filename.to_string(),
        })?;

    let value = captures[1].trim().to_string();
    let naive = NaiveDateTime::parse_from_str(&value, LISTING_TIME_FORMAT).map_err(|source| {
        ExtractError::BadTimestamp {
            value: value.clone(),
            source,
        }
    })?;

    Ok(naive.and_utc())
}
