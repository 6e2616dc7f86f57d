use crate::error::SqlToolboxError;
use crate::identifiers::validate_identifier;
use crate::types::{Connective, LogicalType};

use super::{StatementBuilder, check_fields};

impl StatementBuilder {
    /// `SELECT * FROM t WHERE a = ? <connective> b = ?`
    ///
    /// # Errors
    /// Returns `SqlToolboxError::InvalidArgument` if `fields` is empty or a name is rejected.
    pub fn select_where<S: AsRef<str>>(
        &self,
        table: &str,
        fields: &[S],
        connective: Connective,
    ) -> Result<String, SqlToolboxError> {
        check_fields(table, fields, "SELECT")?;
        let terms = fields
            .iter()
            .enumerate()
            .map(|(i, f)| format!("{} = {}", f.as_ref(), self.dialect.placeholder(i + 1)))
            .collect::<Vec<_>>()
            .join(connective.as_sql());
        Ok(format!("SELECT * FROM {table} WHERE {terms}"))
    }

    /// Single-field equality lookup.
    ///
    /// # Errors
    /// Returns `SqlToolboxError::InvalidArgument` for rejected names.
    pub fn select_by_field(&self, table: &str, field: &str) -> Result<String, SqlToolboxError> {
        self.select_where(table, &[field], Connective::And)
    }

    /// `SELECT * FROM t WHERE LOWER(f) = LOWER(?)`
    ///
    /// # Errors
    /// Returns `SqlToolboxError::InvalidArgument` for rejected names.
    pub fn select_ignore_case(&self, table: &str, field: &str) -> Result<String, SqlToolboxError> {
        validate_identifier(table)?;
        validate_identifier(field)?;
        Ok(format!(
            "SELECT * FROM {table} WHERE LOWER({field}) = LOWER({})",
            self.dialect.placeholder(1)
        ))
    }

    /// Case-insensitive multi-field `AND` lookup.
    ///
    /// `Text` fields render `LOWER(f) LIKE LOWER(?) ESCAPE '!'`; the bound value carries
    /// any wildcard and escapes its own `!`, `%` and `_` with `!`. Other types render a
    /// plain `f = ?` and bind with their logical type.
    ///
    /// # Errors
    /// Returns `SqlToolboxError::InvalidArgument` if `fields` is empty, `types` has a different
    /// length, or a name is rejected.
    pub fn select_ignore_case_many<S: AsRef<str>>(
        &self,
        table: &str,
        fields: &[S],
        types: &[LogicalType],
    ) -> Result<String, SqlToolboxError> {
        check_fields(table, fields, "SELECT")?;
        if fields.len() != types.len() {
            return Err(SqlToolboxError::invalid(format!(
                "The number of fields ({}) and types ({}) must be the same.",
                fields.len(),
                types.len()
            )));
        }
        let terms = fields
            .iter()
            .zip(types)
            .enumerate()
            .map(|(i, (f, ty))| {
                let placeholder = self.dialect.placeholder(i + 1);
                match ty {
                    LogicalType::Text => {
                        format!("LOWER({}) LIKE LOWER({placeholder}) ESCAPE '!'", f.as_ref())
                    }
                    _ => format!("{} = {placeholder}", f.as_ref()),
                }
            })
            .collect::<Vec<_>>()
            .join(Connective::And.as_sql());
        Ok(format!("SELECT * FROM {table} WHERE {terms}"))
    }

    /// `SELECT COUNT(*) FROM t`
    ///
    /// # Errors
    /// Returns `SqlToolboxError::InvalidArgument` for a rejected table name.
    pub fn count_rows(&self, table: &str) -> Result<String, SqlToolboxError> {
        validate_identifier(table)?;
        Ok(format!("SELECT COUNT(*) FROM {table}"))
    }
}
