//! Error types for report loading, table lookups and histogram binning.
//!
//! Application code wraps these in `anyhow` with extra context; the
//! typed variants exist so callers (and tests) can tell a malformed file
//! apart from a file that is valid JSON but lacks the expected keys.

use std::path::PathBuf;
use thiserror::Error;

/// Errors raised while discovering or parsing counter reports.
#[derive(Error, Debug)]
pub enum LoadError {
    #[error("Invalid report pattern '{pattern}': {source}")]
    Pattern {
        pattern: String,
        #[source]
        source: glob::PatternError,
    },

    #[error("Failed to read {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Malformed JSON in {}: {source}", .path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("Unexpected report structure in {}: {source}", .path.display())]
    Schema {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

impl LoadError {
    /// Whether this error concerns a single file and may be skipped.
    pub fn is_per_file(&self) -> bool {
        !matches!(self, LoadError::Pattern { .. })
    }
}

/// Errors raised when reading columns out of a metric table.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TableError {
    #[error("Column '{column}' not found ({rows} rows available)")]
    MissingColumn { column: String, rows: usize },
}

/// Errors raised while binning values into a histogram.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum HistogramError {
    #[error("Cannot build a histogram from an empty sample")]
    Empty,

    #[error("Histogram needs at least one bin")]
    ZeroBins,

    #[error("Sample contains a non-finite value")]
    NonFinite,
}
