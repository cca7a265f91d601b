use super::ResultRow;
use crate::core::Row;

/// Outcome of one statement: the selected rows for queries, the number of
/// touched rows for everything else.
#[derive(Debug, Clone, Default)]
pub struct QueryResult {
    pub columns: Vec<String>,
    pub rows: Vec<Row>,
    pub affected_rows: usize,
}

impl QueryResult {
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn new(columns: Vec<String>, rows: Vec<Row>) -> Self {
        Self {
            columns,
            rows,
            affected_rows: 0,
        }
    }

    pub fn affected(count: usize) -> Self {
        Self {
            affected_rows: count,
            ..Self::default()
        }
    }

    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    pub fn rows(&self) -> &[Row] {
        &self.rows
    }

    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn affected_rows(&self) -> usize {
        self.affected_rows
    }

    /// Rows in result-set order, with by-name column access.
    pub fn rows_iter(&self) -> impl Iterator<Item = ResultRow<'_>> {
        self.rows
            .iter()
            .map(|row| ResultRow::new(&self.columns, row))
    }
}
