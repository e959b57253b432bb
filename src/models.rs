//! Data models for counter reports and rendered plots.
//!
//! Counter reports are produced by an external complexity analyzer, one
//! JSON document per analyzed artifact. This module holds the typed view
//! of those documents and the structures handed to the report generator.

use crate::analysis::Figure;
use chrono::{DateTime, Utc};
use indexmap::IndexMap;
use serde::{Deserialize, Deserializer};

/// One flattened row: prefixed counter name to value, in column order.
///
/// A `None` cell is a counter the report carries without a numeric value.
pub type Row = IndexMap<String, Option<f64>>;

/// Counter names emitted by the complexity analyzer for each language.
///
/// Reports may carry other keys; these are only used to flag metric
/// names that look misspelled.
pub const KNOWN_COUNTERS: &[&str] = &[
    "lines",
    "lines_of_code",
    "keywords",
    "indentations",
    "indentations_normalized",
    "indentations_diff",
    "indentations_diff_normalized",
    "keywords_complexity",
    "indentations_complexity",
    "indentations_diff_complexity",
];

/// Source category of a counter inside a report.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CounterCategory {
    /// Sum over all analyzed files.
    Total,
    /// Per-file mean.
    Average,
}

impl CounterCategory {
    /// Column prefix for counters of this category.
    pub fn prefix(&self) -> &'static str {
        match self {
            CounterCategory::Total => "total_",
            CounterCategory::Average => "average_",
        }
    }

    /// Build the column name for a counter key.
    pub fn column(&self, key: &str) -> String {
        format!("{}{}", self.prefix(), key)
    }
}

/// A counter report as written by the analyzer.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct CounterReport {
    /// Counters keyed by language name, in document order.
    pub counters_by_language: IndexMap<String, LanguageCounters>,
}

/// The `total` and `average` counters of one language.
///
/// Both maps must be present. Values that are `null` or not numbers are
/// kept as empty cells instead of rejecting the report.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct LanguageCounters {
    #[serde(deserialize_with = "numeric_or_empty")]
    pub total: IndexMap<String, Option<f64>>,
    #[serde(deserialize_with = "numeric_or_empty")]
    pub average: IndexMap<String, Option<f64>>,
}

fn numeric_or_empty<'de, D>(deserializer: D) -> Result<IndexMap<String, Option<f64>>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = IndexMap::<String, serde_json::Value>::deserialize(deserializer)?;
    Ok(raw
        .into_iter()
        .map(|(key, value)| (key, value.as_f64()))
        .collect())
}

impl LanguageCounters {
    /// Flatten into a single row, `total_*` columns first, then `average_*`.
    pub fn flatten(&self) -> Row {
        let mut row = Row::with_capacity(self.total.len() + self.average.len());

        for (category, counters) in [
            (CounterCategory::Total, &self.total),
            (CounterCategory::Average, &self.average),
        ] {
            for (key, value) in counters {
                row.insert(category.column(key), *value);
            }
        }

        row
    }
}

/// Metadata printed above the rendered figures.
#[derive(Debug, Clone)]
pub struct PlotMetadata {
    /// Glob pattern the reports were discovered with.
    pub pattern: String,
    /// Language whose metrics were plotted.
    pub language: String,
    /// Number of report files loaded.
    pub files_loaded: usize,
    /// Number of report files skipped as invalid.
    pub files_skipped: usize,
    /// Number of rows in the plotted language's table.
    pub rows: usize,
    /// When the plot was generated.
    pub generated_at: DateTime<Utc>,
}

/// Everything the report generator needs to render one run.
#[derive(Debug, Clone)]
pub struct PlotReport {
    pub metadata: PlotMetadata,
    pub figures: Vec<Figure>,
}
