use tracing::debug;

use crate::error::SqlToolboxError;
use crate::types::BoundValue;

use super::SqliteConnection;
use crate::sqlite::params::Params;

impl SqliteConnection {
    /// Execute a DML or DDL statement and return rows affected. The statement is
    /// finalized before this returns.
    ///
    /// # Errors
    /// Returns `SqlToolboxError::QueryExecution` if preparing, binding or executing fails.
    pub fn execute_dml(
        &mut self,
        query: &str,
        params: &[BoundValue],
    ) -> Result<usize, SqlToolboxError> {
        debug!(sql = query, params = params.len(), "sqlite execute");
        let mut stmt = self.conn.prepare(query)?;
        Params::convert(params).bind_to(&mut stmt)?;
        let affected = stmt.raw_execute()?;
        Ok(affected)
    }

    /// Execute one or more parameterless statements separated by semicolons.
    ///
    /// # Errors
    /// Returns `SqlToolboxError::QueryExecution` if any statement fails.
    pub fn execute_batch(&mut self, sql: &str) -> Result<(), SqlToolboxError> {
        debug!(sql, "sqlite execute batch");
        self.conn.execute_batch(sql)?;
        Ok(())
    }
}
