use std::collections::HashMap;
use std::sync::Arc;

use super::row::{Row, index_columns};

/// Rows returned by a query, fully materialized.
#[derive(Debug, Clone, Default)]
pub struct ResultSet {
    /// The rows returned by the query
    pub rows: Vec<Row>,
    column_names: Arc<Vec<String>>,
    column_index: Arc<HashMap<String, usize>>,
}

impl ResultSet {
    /// Empty result set for the given columns.
    #[must_use]
    pub fn with_columns(column_names: Arc<Vec<String>>) -> Self {
        let column_index = Arc::new(index_columns(&column_names));
        Self {
            rows: Vec::new(),
            column_names,
            column_index,
        }
    }

    #[must_use]
    pub fn column_names(&self) -> &Arc<Vec<String>> {
        &self.column_names
    }

    /// Append a row built from string-encoded values, sharing this set's column names.
    pub fn add_row_values(&mut self, values: Vec<Option<String>>) {
        self.rows.push(Row::with_index(
            Arc::clone(&self.column_names),
            Arc::clone(&self.column_index),
            values,
        ));
    }

    /// Append an already-built row.
    pub fn push(&mut self, row: Row) {
        self.rows.push(row);
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Row> {
        self.rows.iter()
    }

    /// Just the values, one `Vec` per row.
    #[must_use]
    pub fn into_value_rows(self) -> Vec<Vec<Option<String>>> {
        self.rows.into_iter().map(Row::into_values).collect()
    }
}

impl IntoIterator for ResultSet {
    type Item = Row;
    type IntoIter = std::vec::IntoIter<Row>;

    fn into_iter(self) -> Self::IntoIter {
        self.rows.into_iter()
    }
}

impl<'a> IntoIterator for &'a ResultSet {
    type Item = &'a Row;
    type IntoIter = std::slice::Iter<'a, Row>;

    fn into_iter(self) -> Self::IntoIter {
        self.rows.iter()
    }
}
