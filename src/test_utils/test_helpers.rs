//! Helper utilities for testing and development.

use std::collections::VecDeque;
use std::sync::Arc;

use crate::connection::Cursor;
use crate::error::SqlToolboxError;
use crate::results::Row;
use crate::types::{CellValue, ColumnType};

/// Create a test row with the given column names and values.
#[must_use]
pub fn create_test_row(column_names: Vec<String>, values: Vec<Option<String>>) -> Row {
    Row::new(Arc::new(column_names), values)
}

/// In-memory cursor over scripted rows, optionally failing part way through.
#[derive(Debug, Clone, Default)]
pub struct VecCursor {
    column_names: Vec<String>,
    column_types: Vec<Option<ColumnType>>,
    rows: VecDeque<Vec<CellValue>>,
    fail_at: Option<usize>,
    read: usize,
}

impl VecCursor {
    /// Cursor with untyped columns and no rows.
    pub fn new<S: Into<String>>(column_names: impl IntoIterator<Item = S>) -> Self {
        let column_names: Vec<String> = column_names.into_iter().map(Into::into).collect();
        let column_types = vec![None; column_names.len()];
        Self {
            column_names,
            column_types,
            ..Self::default()
        }
    }

    /// Declare the type of column `idx`.
    #[must_use]
    pub fn with_type(mut self, idx: usize, column_type: ColumnType) -> Self {
        if let Some(slot) = self.column_types.get_mut(idx) {
            *slot = Some(column_type);
        }
        self
    }

    #[must_use]
    pub fn with_row(mut self, cells: Vec<CellValue>) -> Self {
        self.rows.push_back(cells);
        self
    }

    /// Fail with an execution error when asked for row `index` (0-based).
    #[must_use]
    pub fn fail_at(mut self, index: usize) -> Self {
        self.fail_at = Some(index);
        self
    }

    /// Rows handed out so far.
    #[must_use]
    pub fn rows_read(&self) -> usize {
        self.read
    }
}

impl Cursor for VecCursor {
    fn column_count(&self) -> usize {
        self.column_names.len()
    }

    fn column_names(&self) -> Vec<String> {
        self.column_names.clone()
    }

    fn column_type(&self, idx: usize) -> Option<ColumnType> {
        self.column_types.get(idx).copied().flatten()
    }

    fn next_row(&mut self) -> Result<Option<Vec<CellValue>>, SqlToolboxError> {
        if self.fail_at == Some(self.read) {
            return Err(SqlToolboxError::ExecutionError(format!(
                "scripted read failure at row {}",
                self.read
            )));
        }
        let row = self.rows.pop_front();
        if row.is_some() {
            self.read += 1;
        }
        Ok(row)
    }
}
