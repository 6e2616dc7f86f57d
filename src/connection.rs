//! The narrow surface this crate needs from a database driver.
//!
//! Connections are owned by the caller and passed into every operation; nothing
//! here opens, pools, or closes them. Statement and cursor resources live only
//! for the duration of one [`SqlConnection::execute`] or [`SqlConnection::query`]
//! call.

use crate::error::SqlToolboxError;
use crate::types::{BoundValue, CellValue, ColumnType, Dialect};

/// Forward-only view over the rows produced by one query.
pub trait Cursor {
    /// Number of columns in each row.
    fn column_count(&self) -> usize;

    /// Column names in result order.
    fn column_names(&self) -> Vec<String>;

    /// Declared type of column `idx` (0-based), when the driver knows it.
    fn column_type(&self, idx: usize) -> Option<ColumnType>;

    /// Advance to the next row and return its raw cells, or `None` at the end.
    ///
    /// # Errors
    /// Returns the driver failure that interrupted the read.
    fn next_row(&mut self) -> Result<Option<Vec<CellValue>>, SqlToolboxError>;
}

/// Visitor handed the open cursor of a query.
pub type CursorVisitor<'v> = dyn FnMut(&mut dyn Cursor) -> Result<(), SqlToolboxError> + 'v;

/// A single, caller-owned connection to a relational database.
pub trait SqlConnection {
    /// SQL flavour this connection speaks.
    fn dialect(&self) -> Dialect;

    /// Prepare `sql`, bind `params` positionally, execute it, and return rows affected.
    ///
    /// # Errors
    /// Returns a query-execution error if preparing, binding or executing fails.
    fn execute(&mut self, sql: &str, params: &[BoundValue]) -> Result<usize, SqlToolboxError>;

    /// Prepare `sql`, bind `params`, run it, and hand the open cursor to `visit`.
    ///
    /// The statement and cursor are released before this returns, whatever the outcome.
    ///
    /// # Errors
    /// Returns a query-execution error from the driver, or whatever `visit` returns.
    fn query(
        &mut self,
        sql: &str,
        params: &[BoundValue],
        visit: &mut CursorVisitor<'_>,
    ) -> Result<(), SqlToolboxError>;
}
