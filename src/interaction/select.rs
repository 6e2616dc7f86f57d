use crate::binder::{bind_text, bind_typed, convert_value};
use crate::connection::SqlConnection;
use crate::error::SqlToolboxError;
use crate::results::{ResultSet, Row, RowStream, materialize};
use crate::types::{BoundValue, Connective, LogicalType};

use super::{Predicate, builder_for, ensure_same_len};

/// Run `sql` with `params` and materialize every row.
///
/// # Errors
/// Returns a query-execution error from the driver, including failures mid-read.
pub fn select_rows<C>(
    conn: &mut C,
    sql: &str,
    params: &[BoundValue],
) -> Result<ResultSet, SqlToolboxError>
where
    C: SqlConnection + ?Sized,
{
    let mut collected = None;
    conn.query(sql, params, &mut |cursor| {
        collected = Some(materialize(cursor)?);
        Ok(())
    })?;
    collected.ok_or_else(|| SqlToolboxError::ExecutionError("query produced no cursor".into()))
}

/// Run `sql` with `params`, folding rows into `init` one at a time as they are read.
///
/// Rows are never buffered. If a read fails part way, rows already passed to `f`
/// stay folded in whatever `f` captured, and the error is returned.
///
/// # Errors
/// Returns a query-execution error from the driver, including failures mid-read.
pub fn fold_rows<C, B, F>(
    conn: &mut C,
    sql: &str,
    params: &[BoundValue],
    init: B,
    mut f: F,
) -> Result<B, SqlToolboxError>
where
    C: SqlConnection + ?Sized,
    F: FnMut(B, Row) -> B,
{
    let mut acc = Some(init);
    conn.query(sql, params, &mut |cursor| {
        let Some(mut state) = acc.take() else {
            return Ok(());
        };
        for row in RowStream::new(cursor) {
            state = f(state, row?);
        }
        acc = Some(state);
        Ok(())
    })?;
    acc.ok_or_else(|| SqlToolboxError::ExecutionError("query produced no cursor".into()))
}

/// `SELECT *` rows where `field` equals `value`, bound as text.
///
/// # Errors
/// Returns `SqlToolboxError::InvalidArgument` for rejected names or a query-execution error.
pub fn search_by_field<C>(
    conn: &mut C,
    table: &str,
    field: &str,
    value: &str,
) -> Result<ResultSet, SqlToolboxError>
where
    C: SqlConnection + ?Sized,
{
    let sql = builder_for(conn).select_by_field(table, field)?;
    select_rows(conn, &sql, &bind_text(&[value]))
}

/// `SELECT *` rows matching every (`AND`) or any (`OR`) term of `predicate`.
///
/// Terms are bound with their logical types in both cases.
///
/// # Errors
/// Returns `SqlToolboxError::InvalidArgument` for an empty predicate or rejected names,
/// `SqlToolboxError::TypeConversion` if a term value does not parse, or a query-execution error.
pub fn search<C>(
    conn: &mut C,
    table: &str,
    predicate: &Predicate,
) -> Result<ResultSet, SqlToolboxError>
where
    C: SqlConnection + ?Sized,
{
    let (sql, params) = prepare_predicate(conn, table, predicate)?;
    select_rows(conn, &sql, &params)
}

/// Like [`search`], but folds rows incrementally instead of collecting them.
///
/// # Errors
/// Same as [`search`].
pub fn fold_search<C, B, F>(
    conn: &mut C,
    table: &str,
    predicate: &Predicate,
    init: B,
    f: F,
) -> Result<B, SqlToolboxError>
where
    C: SqlConnection + ?Sized,
    F: FnMut(B, Row) -> B,
{
    let (sql, params) = prepare_predicate(conn, table, predicate)?;
    fold_rows(conn, &sql, &params, init, f)
}

/// Multi-field `AND` search from parallel slices.
///
/// # Errors
/// Returns `SqlToolboxError::InvalidArgument` if the slices differ in length; otherwise as [`search`].
pub fn search_and<C, S, V>(
    conn: &mut C,
    table: &str,
    fields: &[S],
    values: &[V],
    types: &[LogicalType],
) -> Result<ResultSet, SqlToolboxError>
where
    C: SqlConnection + ?Sized,
    S: AsRef<str>,
    V: AsRef<str>,
{
    let predicate = Predicate::from_parallel(Connective::And, fields, values, types)?;
    search(conn, table, &predicate)
}

/// Multi-field `OR` search from parallel slices.
///
/// # Errors
/// Returns `SqlToolboxError::InvalidArgument` if the slices differ in length; otherwise as [`search`].
pub fn search_or<C, S, V>(
    conn: &mut C,
    table: &str,
    fields: &[S],
    values: &[V],
    types: &[LogicalType],
) -> Result<ResultSet, SqlToolboxError>
where
    C: SqlConnection + ?Sized,
    S: AsRef<str>,
    V: AsRef<str>,
{
    let predicate = Predicate::from_parallel(Connective::Or, fields, values, types)?;
    search(conn, table, &predicate)
}

/// Rows whose `column` equals `value` ignoring case.
///
/// # Errors
/// Returns `SqlToolboxError::InvalidArgument` for rejected names or a query-execution error.
pub fn search_ignore_case<C>(
    conn: &mut C,
    table: &str,
    column: &str,
    value: &str,
) -> Result<ResultSet, SqlToolboxError>
where
    C: SqlConnection + ?Sized,
{
    let sql = builder_for(conn).select_ignore_case(table, column)?;
    select_rows(conn, &sql, &bind_text(&[value]))
}

/// Case-insensitive multi-column `AND` search.
///
/// `Text` columns match any value starting with the search value, ignoring case;
/// `%`, `_` and `!` in the search value are literal. Other types compare for equality
/// after conversion to their logical type.
///
/// # Errors
/// Returns `SqlToolboxError::InvalidArgument` if the slices differ in length or a name is
/// rejected, `SqlToolboxError::TypeConversion` if a non-text value does not parse, or a
/// query-execution error.
pub fn search_ignore_case_many<C, S, V>(
    conn: &mut C,
    table: &str,
    columns: &[S],
    values: &[V],
    types: &[LogicalType],
) -> Result<ResultSet, SqlToolboxError>
where
    C: SqlConnection + ?Sized,
    S: AsRef<str>,
    V: AsRef<str>,
{
    ensure_same_len("columns", columns.len(), "values", values.len())?;
    ensure_same_len("values", values.len(), "types", types.len())?;
    let sql = builder_for(conn).select_ignore_case_many(table, columns, types)?;
    let params = values
        .iter()
        .zip(types)
        .enumerate()
        .map(|(i, (value, ty))| match ty {
            LogicalType::Text => Ok(BoundValue::Text(like_prefix(value.as_ref()))),
            _ => convert_value(value.as_ref(), *ty, i + 1),
        })
        .collect::<Result<Vec<_>, _>>()?;
    select_rows(conn, &sql, &params)
}

// `!` is the LIKE escape character used by `select_ignore_case_many`.
fn like_prefix(value: &str) -> String {
    let mut pattern = String::with_capacity(value.len() + 1);
    for ch in value.chars() {
        if matches!(ch, '!' | '%' | '_') {
            pattern.push('!');
        }
        pattern.push(ch);
    }
    pattern.push('%');
    pattern
}

/// Number of rows in `table`; `0` when the count query yields no row.
///
/// # Errors
/// Returns `SqlToolboxError::InvalidArgument` for a rejected name or a query-execution error.
pub fn count_rows<C>(conn: &mut C, table: &str) -> Result<u64, SqlToolboxError>
where
    C: SqlConnection + ?Sized,
{
    let sql = builder_for(conn).count_rows(table)?;
    let result = select_rows(conn, &sql, &[])?;
    let Some(count) = result.rows.first().and_then(|row| row.get_by_index(0)) else {
        return Ok(0);
    };
    count.parse::<u64>().map_err(|e| {
        SqlToolboxError::ExecutionError(format!("COUNT(*) returned {count:?}: {e}"))
    })
}

fn prepare_predicate<C>(
    conn: &C,
    table: &str,
    predicate: &Predicate,
) -> Result<(String, Vec<BoundValue>), SqlToolboxError>
where
    C: SqlConnection + ?Sized,
{
    let sql = builder_for(conn).select_where(table, &predicate.fields(), predicate.connective())?;
    let values: Vec<_> = predicate.terms().iter().map(|t| t.value.clone()).collect();
    let params = bind_typed(&values)?;
    Ok((sql, params))
}
