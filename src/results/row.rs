use std::collections::HashMap;
use std::sync::Arc;

/// One result row as string-encoded column values.
///
/// `None` marks a SQL `NULL`. Column names are shared by every row of a result.
#[derive(Debug, Clone)]
pub struct Row {
    /// The column names for this row (shared across all rows in a result set)
    pub column_names: Arc<Vec<String>>,
    /// The values for this row, in column order
    pub values: Vec<Option<String>>,
    // name -> index, shared across all rows in a result set
    column_index: Arc<HashMap<String, usize>>,
}

impl Row {
    /// Create a row, indexing `column_names` for lookups by name.
    #[must_use]
    pub fn new(column_names: Arc<Vec<String>>, values: Vec<Option<String>>) -> Self {
        let column_index = Arc::new(index_columns(&column_names));
        Self {
            column_names,
            values,
            column_index,
        }
    }

    pub(crate) fn with_index(
        column_names: Arc<Vec<String>>,
        column_index: Arc<HashMap<String, usize>>,
        values: Vec<Option<String>>,
    ) -> Self {
        Self {
            column_names,
            values,
            column_index,
        }
    }

    /// Index of a column by name; exact match first, then case-insensitive.
    #[must_use]
    pub fn get_column_index(&self, column_name: &str) -> Option<usize> {
        if let Some(&idx) = self.column_index.get(column_name) {
            return Some(idx);
        }
        self.column_names
            .iter()
            .position(|col| col.eq_ignore_ascii_case(column_name))
    }

    /// Value of a column by name. `None` for an unknown column or a `NULL` value.
    #[must_use]
    pub fn get(&self, column_name: &str) -> Option<&str> {
        self.get_column_index(column_name)
            .and_then(|idx| self.get_by_index(idx))
    }

    /// Value at a 0-based column index. `None` when out of bounds or `NULL`.
    #[must_use]
    pub fn get_by_index(&self, index: usize) -> Option<&str> {
        self.values.get(index).and_then(Option::as_deref)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.values.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    #[must_use]
    pub fn into_values(self) -> Vec<Option<String>> {
        self.values
    }
}

pub(crate) fn index_columns(column_names: &[String]) -> HashMap<String, usize> {
    column_names
        .iter()
        .enumerate()
        .map(|(i, name)| (name.clone(), i))
        .collect()
}
