//! Figure construction for one language.

use super::histogram::Histogram;
use super::table::LanguageTables;
use crate::models::{CounterCategory, KNOWN_COUNTERS};
use anyhow::{Context, Result};
use tracing::{debug, warn};

/// Default language whose metrics are plotted.
pub const DEFAULT_LANGUAGE: &str = "java";

/// Default metric columns, in plotting order.
pub const DEFAULT_METRICS: &[&str] = &[
    "total_lines_of_code",
    "average_lines_of_code",
    "average_keywords_complexity",
    "average_indentations_complexity",
    "average_indentations_diff_complexity",
];

/// One histogram panel.
#[derive(Debug, Clone, PartialEq)]
pub struct Figure {
    /// Column the histogram was built from.
    pub metric: String,
    pub histogram: Histogram,
}

/// Whether a column name is a prefixed analyzer counter.
pub fn is_known_metric(name: &str) -> bool {
    [CounterCategory::Total, CounterCategory::Average]
        .iter()
        .any(|category| {
            name.strip_prefix(category.prefix())
                .is_some_and(|key| KNOWN_COUNTERS.contains(&key))
        })
}

/// Build one figure per metric for `language`.
///
/// All figures are built before returning, so a missing column fails the
/// whole call and nothing is rendered.
pub fn plot_language(
    tables: &LanguageTables,
    language: &str,
    metrics: &[String],
    bins: usize,
) -> Result<Vec<Figure>> {
    if !tables.contains(language) {
        warn!("No report mentions language '{}'", language);
    }
    let table = tables.get(language);

    let mut figures = Vec::with_capacity(metrics.len());
    for metric in metrics {
        if !is_known_metric(metric) {
            debug!("'{}' is not a known analyzer counter", metric);
        }

        let values = table
            .column(metric)
            .with_context(|| format!("Cannot plot '{}' for language '{}'", metric, language))?;
        let histogram = Histogram::from_values(&values, bins)
            .with_context(|| format!("Cannot bin '{}' for language '{}'", metric, language))?;

        debug!(
            "{}: {} values in {} bins",
            metric,
            histogram.total(),
            bins
        );
        figures.push(Figure {
            metric: metric.clone(),
            histogram,
        });
    }

    Ok(figures)
}
