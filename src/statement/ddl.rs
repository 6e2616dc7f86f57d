use crate::error::SqlToolboxError;
use crate::identifiers::{validate_identifier, validate_identifiers, validate_sql_type};
use crate::types::key_column_for;

use super::StatementBuilder;

impl StatementBuilder {
    /// `CREATE TABLE IF NOT EXISTS t (ID_t <key>, c1 T1, c2 T2)`
    ///
    /// The `ID_<table>` key column is always generated here; a caller column with
    /// that name is rejected.
    ///
    /// # Errors
    /// Returns `SqlToolboxError::InvalidArgument` if `columns` and `sql_types` differ in
    /// length, a name or type is rejected, or a column collides with the key.
    pub fn create_table<S: AsRef<str>, T: AsRef<str>>(
        &self,
        table: &str,
        columns: &[S],
        sql_types: &[T],
    ) -> Result<String, SqlToolboxError> {
        if columns.len() != sql_types.len() {
            return Err(SqlToolboxError::invalid(format!(
                "The number of columns ({}) and types ({}) must be the same.",
                columns.len(),
                sql_types.len()
            )));
        }
        validate_identifier(table)?;
        validate_identifiers(columns)?;
        let key = key_column_for(table);
        let mut definitions = Vec::with_capacity(columns.len() + 1);
        definitions.push(format!("{key} {}", self.dialect.synthetic_key_ddl()));
        for (column, sql_type) in columns.iter().zip(sql_types) {
            let column = column.as_ref();
            if column.eq_ignore_ascii_case(&key) {
                return Err(SqlToolboxError::invalid(format!(
                    "column {column:?} is reserved for the generated primary key"
                )));
            }
            definitions.push(format!("{column} {}", validate_sql_type(sql_type.as_ref())?));
        }
        Ok(format!(
            "CREATE TABLE IF NOT EXISTS {table} ({})",
            definitions.join(", ")
        ))
    }
}
