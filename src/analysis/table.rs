//! Per-language metric tables.

use crate::errors::TableError;
use crate::models::Row;
use std::collections::BTreeMap;

static EMPTY_TABLE: MetricTable = MetricTable::EMPTY;

/// Rows of one language, one row per counter report.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MetricTable {
    columns: Vec<String>,
    rows: Vec<Row>,
}

impl MetricTable {
    const EMPTY: Self = Self {
        columns: Vec::new(),
        rows: Vec::new(),
    };

    /// Build a table from rows in their final order.
    ///
    /// Columns are the union of all row keys in first-seen order.
    pub fn from_rows(rows: Vec<Row>) -> Self {
        let mut columns: Vec<String> = Vec::new();

        for row in &rows {
            for key in row.keys() {
                if !columns.contains(key) {
                    columns.push(key.clone());
                }
            }
        }

        Self { columns, rows }
    }

    /// Number of rows.
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Column names in first-seen order.
    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    pub fn has_column(&self, name: &str) -> bool {
        self.columns.iter().any(|c| c == name)
    }

    /// Values of a column in row order.
    ///
    /// Rows that lack the column or hold an empty cell are skipped; a
    /// column absent from every row is an error, which also covers the
    /// empty table.
    pub fn column(&self, name: &str) -> Result<Vec<f64>, TableError> {
        if !self.has_column(name) {
            return Err(TableError::MissingColumn {
                column: name.to_string(),
                rows: self.rows.len(),
            });
        }

        Ok(self
            .rows
            .iter()
            .filter_map(|row| row.get(name).copied().flatten())
            .collect())
    }
}

/// Mapping from language name to its metric table.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct LanguageTables {
    tables: BTreeMap<String, MetricTable>,
}

impl LanguageTables {
    pub fn new() -> Self {
        Self::default()
    }

    /// Table for a language; unseen languages yield an empty table.
    ///
    /// Lookups never insert, so reading an unknown language leaves the
    /// mapping unchanged.
    pub fn get(&self, language: &str) -> &MetricTable {
        self.tables.get(language).unwrap_or(&EMPTY_TABLE)
    }

    pub fn contains(&self, language: &str) -> bool {
        self.tables.contains_key(language)
    }

    /// Replace (or create) a language's table.
    pub fn insert(&mut self, language: String, table: MetricTable) {
        self.tables.insert(language, table);
    }

    /// Languages with their row counts, sorted by name.
    pub fn languages(&self) -> Vec<(&str, usize)> {
        self.tables
            .iter()
            .map(|(name, table)| (name.as_str(), table.len()))
            .collect()
    }

    /// Iterate over languages and tables, sorted by name.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &MetricTable)> {
        self.tables.iter().map(|(name, table)| (name.as_str(), table))
    }

    /// Number of languages seen.
    pub fn len(&self) -> usize {
        self.tables.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tables.is_empty()
    }
}
