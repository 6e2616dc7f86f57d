use crate::error::SqlToolboxError;
use crate::identifiers::validate_identifier;

use super::{StatementBuilder, check_target};

impl StatementBuilder {
    /// `INSERT INTO t (a, b) VALUES (?, ?)`
    ///
    /// # Errors
    /// Returns `SqlToolboxError::InvalidArgument` if `columns` is empty, repeats a name,
    /// or contains a rejected identifier.
    pub fn insert<S: AsRef<str>>(
        &self,
        table: &str,
        columns: &[S],
    ) -> Result<String, SqlToolboxError> {
        check_target(table, columns, "INSERT")?;
        let names = columns
            .iter()
            .map(AsRef::as_ref)
            .collect::<Vec<_>>()
            .join(", ");
        Ok(format!(
            "INSERT INTO {table} ({names}) VALUES ({})",
            self.placeholders(1, columns.len())
        ))
    }

    /// `UPDATE t SET a = ?, b = ? WHERE id_column = ?`; the id binds last.
    ///
    /// # Errors
    /// Returns `SqlToolboxError::InvalidArgument` for an empty column list or rejected names.
    pub fn update_by_id<S: AsRef<str>>(
        &self,
        table: &str,
        columns: &[S],
        id_column: &str,
    ) -> Result<String, SqlToolboxError> {
        check_target(table, columns, "UPDATE")?;
        validate_identifier(id_column)?;
        let assignments = columns
            .iter()
            .enumerate()
            .map(|(i, c)| format!("{} = {}", c.as_ref(), self.dialect.placeholder(i + 1)))
            .collect::<Vec<_>>()
            .join(", ");
        Ok(format!(
            "UPDATE {table} SET {assignments} WHERE {id_column} = {}",
            self.dialect.placeholder(columns.len() + 1)
        ))
    }

    /// `DELETE FROM t WHERE id_column = ?`
    ///
    /// # Errors
    /// Returns `SqlToolboxError::InvalidArgument` for rejected names.
    pub fn delete_by_id(&self, table: &str, id_column: &str) -> Result<String, SqlToolboxError> {
        validate_identifier(table)?;
        validate_identifier(id_column)?;
        Ok(format!(
            "DELETE FROM {table} WHERE {id_column} = {}",
            self.dialect.placeholder(1)
        ))
    }
}
