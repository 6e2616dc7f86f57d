//! SQL text assembly for single-table statements.
//!
//! Values never appear in the generated text: each one gets a positional
//! placeholder in the builder's [`Dialect`]. Table and column names are
//! interpolated verbatim after passing [`crate::identifiers`] checks, so they
//! must come from trusted code, never from end-user input.

use std::collections::HashSet;

use crate::error::SqlToolboxError;
use crate::identifiers::{validate_identifier, validate_identifiers};
use crate::types::{Connective, Dialect};

mod ddl;
mod dml;
mod select;

/// Builds statement text for one [`Dialect`].
///
/// ```rust
/// use sql_toolbox::prelude::*;
///
/// let sql = StatementBuilder::new(Dialect::Postgres)
///     .insert("widgets", &["name", "qty"])
///     .unwrap();
/// assert_eq!(sql, "INSERT INTO widgets (name, qty) VALUES ($1, $2)");
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct StatementBuilder {
    dialect: Dialect,
}

impl StatementBuilder {
    #[must_use]
    pub fn new(dialect: Dialect) -> Self {
        Self { dialect }
    }

    #[must_use]
    pub fn dialect(&self) -> Dialect {
        self.dialect
    }

    /// `count` placeholders numbered from `first`, comma separated.
    pub(crate) fn placeholders(&self, first: usize, count: usize) -> String {
        (first..first + count)
            .map(|i| self.dialect.placeholder(i))
            .collect::<Vec<_>>()
            .join(", ")
    }
}

/// `INSERT` text in the default (MySQL-style) dialect.
///
/// # Errors
/// Returns `SqlToolboxError::InvalidArgument` if `columns` is empty or a name is rejected.
pub fn build_insert<S: AsRef<str>>(table: &str, columns: &[S]) -> Result<String, SqlToolboxError> {
    StatementBuilder::default().insert(table, columns)
}

/// `SELECT *` text with one placeholder per field joined by `connective`.
///
/// # Errors
/// Returns `SqlToolboxError::InvalidArgument` if `fields` is empty or a name is rejected.
pub fn build_select<S: AsRef<str>>(
    table: &str,
    fields: &[S],
    connective: Connective,
) -> Result<String, SqlToolboxError> {
    StatementBuilder::default().select_where(table, fields, connective)
}

/// `CREATE TABLE` text with the synthetic `ID_<table>` key ahead of `columns`.
///
/// # Errors
/// Returns `SqlToolboxError::InvalidArgument` if `columns` and `sql_types` differ in length,
/// or a name or type is rejected.
pub fn build_create_table<S: AsRef<str>, T: AsRef<str>>(
    table: &str,
    columns: &[S],
    sql_types: &[T],
) -> Result<String, SqlToolboxError> {
    StatementBuilder::default().create_table(table, columns, sql_types)
}

/// Table name plus a non-empty list of valid field names. Fields may repeat.
pub(crate) fn check_fields<S: AsRef<str>>(
    table: &str,
    fields: &[S],
    what: &str,
) -> Result<(), SqlToolboxError> {
    validate_identifier(table)?;
    if fields.is_empty() {
        return Err(SqlToolboxError::invalid(format!(
            "{what} requires at least one column"
        )));
    }
    validate_identifiers(fields)
}

/// Like [`check_fields`], but every column may be written only once.
pub(crate) fn check_target<S: AsRef<str>>(
    table: &str,
    columns: &[S],
    what: &str,
) -> Result<(), SqlToolboxError> {
    check_fields(table, columns, what)?;
    let mut seen = HashSet::with_capacity(columns.len());
    for column in columns {
        if !seen.insert(column.as_ref()) {
            return Err(SqlToolboxError::invalid(format!(
                "column {:?} appears more than once",
                column.as_ref()
            )));
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::LogicalType;

    fn count_placeholders(sql: &str) -> usize {
        sql.matches('?').count()
    }

    #[test]
    fn insert_has_one_placeholder_per_column_in_order() {
        let sql = build_insert("t", &["c", "a", "b"]).unwrap();
        assert_eq!(sql, "INSERT INTO t (c, a, b) VALUES (?, ?, ?)");
        assert_eq!(count_placeholders(&sql), 3);
    }

    #[test]
    fn insert_rejects_empty_and_duplicate_columns() {
        let empty: [&str; 0] = [];
        assert!(build_insert("t", &empty).unwrap_err().is_invalid_argument());
        assert!(build_insert("t", &["a", "a"]).unwrap_err().is_invalid_argument());
        assert!(build_insert("t;", &["a"]).unwrap_err().is_invalid_argument());
    }

    #[test]
    fn select_joins_with_connective() {
        let and = build_select("t", &["a", "b"], Connective::And).unwrap();
        assert_eq!(and, "SELECT * FROM t WHERE a = ? AND b = ?");
        let or = build_select("t", &["a", "b", "c"], Connective::Or).unwrap();
        assert_eq!(or, "SELECT * FROM t WHERE a = ? OR b = ? OR c = ?");
        let empty: [&str; 0] = [];
        assert!(build_select("t", &empty, Connective::And).is_err());
    }

    #[test]
    fn select_may_repeat_a_field() {
        let or = build_select("t", &["a", "a"], Connective::Or).unwrap();
        assert_eq!(or, "SELECT * FROM t WHERE a = ? OR a = ?");
        let b = StatementBuilder::default();
        assert_eq!(
            b.select_ignore_case_many("t", &["a", "a"], &[LogicalType::Text, LogicalType::Text])
                .unwrap(),
            "SELECT * FROM t WHERE LOWER(a) LIKE LOWER(?) ESCAPE '!' AND LOWER(a) LIKE LOWER(?) ESCAPE '!'"
        );
        assert!(b.update_by_id("t", &["a", "a"], "id").is_err());
    }

    #[test]
    fn postgres_numbers_placeholders() {
        let b = StatementBuilder::new(Dialect::Postgres);
        assert_eq!(
            b.update_by_id("t", &["a", "b"], "id").unwrap(),
            "UPDATE t SET a = $1, b = $2 WHERE id = $3"
        );
        assert_eq!(
            b.select_where("t", &["a", "b"], Connective::Or).unwrap(),
            "SELECT * FROM t WHERE a = $1 OR b = $2"
        );
        assert_eq!(b.delete_by_id("t", "id").unwrap(), "DELETE FROM t WHERE id = $1");
    }

    #[test]
    fn update_and_delete_by_id() {
        let b = StatementBuilder::default();
        assert_eq!(
            b.update_by_id("t", &["a"], "ID_t").unwrap(),
            "UPDATE t SET a = ? WHERE ID_t = ?"
        );
        assert_eq!(b.delete_by_id("t", "ID_t").unwrap(), "DELETE FROM t WHERE ID_t = ?");
        assert!(b.delete_by_id("t", "id = 1 OR 1").is_err());
    }

    #[test]
    fn case_insensitive_selects() {
        let b = StatementBuilder::default();
        assert_eq!(
            b.select_ignore_case("t", "name").unwrap(),
            "SELECT * FROM t WHERE LOWER(name) = LOWER(?)"
        );
        assert_eq!(
            b.select_ignore_case_many("t", &["a", "b"], &[LogicalType::Text, LogicalType::Int])
                .unwrap(),
            "SELECT * FROM t WHERE LOWER(a) LIKE LOWER(?) ESCAPE '!' AND b = ?"
        );
        assert!(b.select_ignore_case_many("t", &["a"], &[]).unwrap_err().is_invalid_argument());
    }

    #[test]
    fn count_rows_text() {
        assert_eq!(
            StatementBuilder::default().count_rows("t").unwrap(),
            "SELECT COUNT(*) FROM t"
        );
    }

    #[test]
    fn create_table_puts_synthetic_key_first() {
        let sql =
            build_create_table("widgets", &["name", "qty"], &["VARCHAR(50)", "INT"]).unwrap();
        assert_eq!(
            sql,
            "CREATE TABLE IF NOT EXISTS widgets (ID_widgets INT AUTO_INCREMENT PRIMARY KEY, name VARCHAR(50), qty INT)"
        );
        let after_key = sql.split(", ").nth(1).unwrap();
        assert_eq!(after_key, "name VARCHAR(50)");
    }

    #[test]
    fn create_table_rejects_mismatch_and_caller_key() {
        assert!(build_create_table("w", &["a", "b"], &["INT"]).is_err());
        assert!(build_create_table("w", &["ID_w"], &["INT"]).is_err());
        assert!(build_create_table("w", &["a"], &["INT); DROP TABLE x; --"]).is_err());
    }

    #[test]
    fn sqlite_key_ddl() {
        let sql = StatementBuilder::new(Dialect::Sqlite)
            .create_table("w", &["a"], &["TEXT"])
            .unwrap();
        assert_eq!(
            sql,
            "CREATE TABLE IF NOT EXISTS w (ID_w INTEGER PRIMARY KEY AUTOINCREMENT, a TEXT)"
        );
    }
}
