use crate::binder::{bind_text, bind_values};
use crate::connection::SqlConnection;
use crate::error::SqlToolboxError;
use crate::types::{BoundValue, LogicalType};

use super::{builder_for, ensure_same_len};

/// Insert one row, binding every value as text.
///
/// Returns `true` if the database reports at least one inserted row.
///
/// # Errors
/// Returns `SqlToolboxError::InvalidArgument` before building anything when `columns` and
/// `values` differ in length, or a query-execution error from the driver.
pub fn insert_one<C, S, V>(
    conn: &mut C,
    table: &str,
    columns: &[S],
    values: &[V],
) -> Result<bool, SqlToolboxError>
where
    C: SqlConnection + ?Sized,
    S: AsRef<str>,
    V: AsRef<str>,
{
    ensure_same_len("columns", columns.len(), "values", values.len())?;
    let sql = builder_for(conn).insert(table, columns)?;
    Ok(conn.execute(&sql, &bind_text(values))? > 0)
}

/// Insert one row, converting each value according to its [`LogicalType`].
///
/// # Errors
/// Returns `SqlToolboxError::InvalidArgument` for length mismatches,
/// `SqlToolboxError::TypeConversion` if a value does not parse (nothing is executed),
/// or a query-execution error from the driver.
pub fn insert_one_typed<C, S, V>(
    conn: &mut C,
    table: &str,
    columns: &[S],
    values: &[V],
    types: &[LogicalType],
) -> Result<bool, SqlToolboxError>
where
    C: SqlConnection + ?Sized,
    S: AsRef<str>,
    V: AsRef<str>,
{
    ensure_same_len("columns", columns.len(), "values", values.len())?;
    ensure_same_len("values", values.len(), "types", types.len())?;
    let sql = builder_for(conn).insert(table, columns)?;
    let params = bind_values(values, types)?;
    Ok(conn.execute(&sql, &params)? > 0)
}

/// Update the row whose `id_column` equals `id`.
///
/// Returns `true` if a row was changed.
///
/// # Errors
/// Returns `SqlToolboxError::InvalidArgument` for length mismatches or rejected names,
/// `SqlToolboxError::TypeConversion` for unparseable values, or a query-execution error.
#[allow(clippy::too_many_arguments)]
pub fn update_by_id<C, S, V>(
    conn: &mut C,
    table: &str,
    id_column: &str,
    id: i64,
    columns: &[S],
    values: &[V],
    types: &[LogicalType],
) -> Result<bool, SqlToolboxError>
where
    C: SqlConnection + ?Sized,
    S: AsRef<str>,
    V: AsRef<str>,
{
    ensure_same_len("columns", columns.len(), "values", values.len())?;
    ensure_same_len("values", values.len(), "types", types.len())?;
    let sql = builder_for(conn).update_by_id(table, columns, id_column)?;
    let mut params = bind_values(values, types)?;
    params.push(BoundValue::Int(id));
    Ok(conn.execute(&sql, &params)? > 0)
}

/// Delete the row whose `id_column` equals `id`. Returns `true` if a row was removed.
///
/// # Errors
/// Returns `SqlToolboxError::InvalidArgument` for rejected names or a query-execution error.
pub fn delete_by_id<C>(
    conn: &mut C,
    table: &str,
    id_column: &str,
    id: i64,
) -> Result<bool, SqlToolboxError>
where
    C: SqlConnection + ?Sized,
{
    let sql = builder_for(conn).delete_by_id(table, id_column)?;
    Ok(conn.execute(&sql, &[BoundValue::Int(id)])? > 0)
}

/// Create `table` if it does not exist, with a generated `ID_<table>` key ahead of `columns`.
///
/// # Errors
/// Returns `SqlToolboxError::InvalidArgument` if `columns` and `sql_types` differ in length
/// or a name or type is rejected, or a query-execution error.
pub fn create_table<C, S, T>(
    conn: &mut C,
    table: &str,
    columns: &[S],
    sql_types: &[T],
) -> Result<(), SqlToolboxError>
where
    C: SqlConnection + ?Sized,
    S: AsRef<str>,
    T: AsRef<str>,
{
    let sql = builder_for(conn).create_table(table, columns, sql_types)?;
    conn.execute(&sql, &[])?;
    Ok(())
}
