use tracing::debug;

use crate::connection::CursorVisitor;
use crate::error::SqlToolboxError;
use crate::types::BoundValue;

use super::SqliteConnection;
use crate::sqlite::params::Params;
use crate::sqlite::query::{SqliteCursor, column_type_from_decl};

impl SqliteConnection {
    /// Run a SELECT and hand its cursor to `visit`; the statement is finalized on return.
    ///
    /// # Errors
    /// Returns `SqlToolboxError::QueryExecution` if preparing or running the query fails,
    /// or whatever `visit` returns.
    pub fn execute_select(
        &mut self,
        query: &str,
        params: &[BoundValue],
        visit: &mut CursorVisitor<'_>,
    ) -> Result<(), SqlToolboxError> {
        debug!(sql = query, params = params.len(), "sqlite select");
        let mut stmt = self.conn.prepare(query)?;
        Params::convert(params).bind_to(&mut stmt)?;

        let (column_names, column_types): (Vec<String>, Vec<_>) = stmt
            .columns()
            .iter()
            .map(|col| {
                (
                    col.name().to_string(),
                    col.decl_type().and_then(column_type_from_decl),
                )
            })
            .unzip();

        let rows = stmt.raw_query();
        let mut cursor = SqliteCursor::new(rows, column_names, column_types);
        visit(&mut cursor)
    }
}
