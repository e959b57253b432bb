//! Counter aggregation.
//!
//! Reports are flattened into rows and collected per language; the
//! per-language tables are built once at the end.

use super::table::{LanguageTables, MetricTable};
use crate::models::{CounterReport, Row};
use indexmap::IndexMap;
use tracing::debug;

/// Accumulates flattened rows per language.
#[derive(Debug, Default)]
pub struct Aggregator {
    rows: IndexMap<String, Vec<Row>>,
    reports: usize,
}

impl Aggregator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append one row per language mentioned in the report.
    pub fn push_report(&mut self, report: &CounterReport) {
        for (language, counters) in &report.counters_by_language {
            let row = counters.flatten();
            debug!("{}: appended row with {} columns", language, row.len());
            self.rows_for(language).push(row);
        }
        self.reports += 1;
    }

    /// Get-or-create the row list of a language.
    fn rows_for(&mut self, language: &str) -> &mut Vec<Row> {
        self.rows.entry(language.to_string()).or_default()
    }

    /// Number of reports pushed so far.
    pub fn report_count(&self) -> usize {
        self.reports
    }

    /// Build the final per-language tables.
    pub fn finish(self) -> LanguageTables {
        let mut tables = LanguageTables::new();
        for (language, rows) in self.rows {
            tables.insert(language, MetricTable::from_rows(rows));
        }
        tables
    }
}

/// Aggregate a sequence of reports in order.
pub fn aggregate<'a, I>(reports: I) -> LanguageTables
where
    I: IntoIterator<Item = &'a CounterReport>,
{
    let mut aggregator = Aggregator::new();
    for report in reports {
        aggregator.push_report(report);
    }
    debug!("Aggregated {} reports", aggregator.report_count());
    aggregator.finish()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn report(json: &str) -> CounterReport {
        serde_json::from_str(json).unwrap()
    }

    fn java_report(loc: f64) -> CounterReport {
        report(&format!(
            r#"{{"counters_by_language": {{"java": {{"total": {{"lines_of_code": {loc}}}, "average": {{"lines_of_code": 10, "keywords_complexity": 2, "indentations_complexity": 1, "indentations_diff_complexity": 0}}}}}}}}"#
        ))
    }

    #[test]
    fn test_single_report_single_row() {
        let tables = aggregate([&java_report(100.0)]);
        let java = tables.get("java");

        assert_eq!(java.len(), 1);
        assert_eq!(java.column("total_lines_of_code").unwrap(), vec![100.0]);
        assert_eq!(java.column("average_lines_of_code").unwrap(), vec![10.0]);
        assert_eq!(
            java.column("average_keywords_complexity").unwrap(),
            vec![2.0]
        );
        assert_eq!(
            java.column("average_indentations_complexity").unwrap(),
            vec![1.0]
        );
        assert_eq!(
            java.column("average_indentations_diff_complexity").unwrap(),
            vec![0.0]
        );
    }

    #[test]
    fn test_rows_follow_report_order() {
        let reports = vec![java_report(3.0), java_report(1.0), java_report(2.0)];
        let tables = aggregate(&reports);

        assert_eq!(
            tables.get("java").column("total_lines_of_code").unwrap(),
            vec![3.0, 1.0, 2.0]
        );
    }

    #[test]
    fn test_rows_per_language_match_mentions() {
        let java = java_report(100.0);
        let python = report(
            r#"{"counters_by_language": {"python": {"total": {"lines": 5}, "average": {"lines": 5}}}}"#,
        );
        let both = report(
            r#"{"counters_by_language": {
                "python": {"total": {"lines": 7}, "average": {"lines": 7}},
                "java": {"total": {"lines_of_code": 1}, "average": {"lines_of_code": 1}}
            }}"#,
        );

        let mut aggregator = Aggregator::new();
        for r in [&java, &python, &both] {
            aggregator.push_report(r);
        }
        assert_eq!(aggregator.report_count(), 3);

        let tables = aggregator.finish();
        assert_eq!(tables.get("java").len(), 2);
        assert_eq!(tables.get("python").len(), 1 + 1);
        assert_eq!(
            tables.get("python").column("total_lines").unwrap(),
            vec![5.0, 7.0]
        );
    }

    #[test]
    fn test_unseen_language_fails_only_on_column_access() {
        let java = java_report(100.0);
        let python = report(
            r#"{"counters_by_language": {"python": {"total": {"lines": 5}, "average": {"lines": 5}}}}"#,
        );
        let tables = aggregate([&java, &python]);

        assert_eq!(tables.get("java").len(), 1);
        assert_eq!(tables.get("python").len(), 1);

        let go = tables.get("go");
        assert!(go.is_empty());
        assert!(go.column("total_lines_of_code").is_err());
        assert!(!tables.contains("go"));
    }

    #[test]
    fn test_no_reports_no_languages() {
        let tables = aggregate(std::iter::empty());
        assert!(tables.is_empty());
        assert!(tables.get("java").column("total_lines_of_code").is_err());
    }
}
