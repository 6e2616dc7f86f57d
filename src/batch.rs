//! Multi-row insert and multi-id delete over a caller-owned connection.
//!
//! Batches are plain loops: one statement per row, executed in order, stopping
//! at the first row that fails. There is no enclosing transaction, so rows that
//! succeeded before the failure stay committed.

use tracing::{debug, warn};

use crate::binder::{bind_text, bind_values};
use crate::connection::SqlConnection;
use crate::error::SqlToolboxError;
use crate::interaction::ensure_same_len;
use crate::statement::StatementBuilder;
use crate::types::{BoundValue, LogicalType};

/// Result of a batch: how far it got and why it stopped, if it did.
#[derive(Debug, Default)]
pub struct BatchOutcome {
    /// Rows (or ids) processed successfully before the batch stopped.
    pub succeeded: usize,
    /// 0-based index of the item that stopped the batch.
    pub failed_at: Option<usize>,
    /// Error raised by the failing item; `None` when it simply affected no rows.
    pub failure: Option<SqlToolboxError>,
}

impl BatchOutcome {
    /// True if every item was applied.
    #[must_use]
    pub fn all_succeeded(&self) -> bool {
        self.failed_at.is_none()
    }

    fn stop(&mut self, index: usize, failure: Option<SqlToolboxError>) {
        match &failure {
            Some(e) => warn!(index, error = %e, "batch stopped"),
            None => warn!(index, "batch stopped: no rows affected"),
        }
        self.failed_at = Some(index);
        self.failure = failure;
    }
}

/// Insert each row of `rows`, binding every value as text.
///
/// # Errors
/// Returns `SqlToolboxError::InvalidArgument` before executing anything when the table or a
/// column name is rejected. Row-level failures, including rows of the wrong length, are
/// reported in the [`BatchOutcome`] instead.
pub fn insert_many<C, S, V, R>(
    conn: &mut C,
    table: &str,
    columns: &[S],
    rows: &[R],
) -> Result<BatchOutcome, SqlToolboxError>
where
    C: SqlConnection + ?Sized,
    S: AsRef<str>,
    V: AsRef<str>,
    R: AsRef<[V]>,
{
    run_inserts(conn, table, columns, rows, |values| Ok(bind_text(values)))
}

/// Insert each row of `rows`, converting values by the column `types`.
///
/// A value that fails conversion stops the batch at its row.
///
/// # Errors
/// Returns `SqlToolboxError::InvalidArgument` before executing anything when `types` and
/// `columns` differ in length or a name is rejected.
pub fn insert_many_typed<C, S, V, R>(
    conn: &mut C,
    table: &str,
    columns: &[S],
    rows: &[R],
    types: &[LogicalType],
) -> Result<BatchOutcome, SqlToolboxError>
where
    C: SqlConnection + ?Sized,
    S: AsRef<str>,
    V: AsRef<str>,
    R: AsRef<[V]>,
{
    ensure_same_len("columns", columns.len(), "types", types.len())?;
    run_inserts(conn, table, columns, rows, |values| bind_values(values, types))
}

fn run_inserts<C, S, V, R, B>(
    conn: &mut C,
    table: &str,
    columns: &[S],
    rows: &[R],
    mut bind: B,
) -> Result<BatchOutcome, SqlToolboxError>
where
    C: SqlConnection + ?Sized,
    S: AsRef<str>,
    V: AsRef<str>,
    R: AsRef<[V]>,
    B: FnMut(&[V]) -> Result<Vec<BoundValue>, SqlToolboxError>,
{
    let sql = StatementBuilder::new(conn.dialect()).insert(table, columns)?;
    debug!(table, rows = rows.len(), "batch insert");

    let mut outcome = BatchOutcome::default();
    for (index, row) in rows.iter().enumerate() {
        let values = row.as_ref();
        let params = ensure_same_len("columns", columns.len(), "values", values.len())
            .and_then(|()| bind(values));
        let applied = params.and_then(|params| conn.execute(&sql, &params));
        match applied {
            Ok(affected) if affected > 0 => outcome.succeeded += 1,
            Ok(_) => {
                outcome.stop(index, None);
                break;
            }
            Err(e) => {
                outcome.stop(index, Some(e));
                break;
            }
        }
    }
    Ok(outcome)
}

/// Delete the row for each id in `ids`, in order, stopping at the first id that
/// removes nothing or fails.
///
/// # Errors
/// Returns `SqlToolboxError::InvalidArgument` before executing anything when the table or
/// `id_column` is rejected.
pub fn delete_many<C>(
    conn: &mut C,
    table: &str,
    id_column: &str,
    ids: &[i64],
) -> Result<BatchOutcome, SqlToolboxError>
where
    C: SqlConnection + ?Sized,
{
    let sql = StatementBuilder::new(conn.dialect()).delete_by_id(table, id_column)?;
    debug!(table, ids = ids.len(), "batch delete");

    let mut outcome = BatchOutcome::default();
    let mut index = 0;
    while index < ids.len() {
        match conn.execute(&sql, &[BoundValue::Int(ids[index])]) {
            Ok(affected) if affected > 0 => outcome.succeeded += 1,
            Ok(_) => {
                outcome.stop(index, None);
                break;
            }
            Err(e) => {
                outcome.stop(index, Some(e));
                break;
            }
        }
        index += 1;
    }
    Ok(outcome)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::ScriptedConnection;
    use crate::types::Dialect;

    #[test]
    fn insert_stops_at_first_failed_row() {
        let mut conn = ScriptedConnection::new(Dialect::MySql)
            .then_affect(1)
            .then_fail("duplicate key")
            .then_affect(1);
        let rows = [["a", "1"], ["b", "2"], ["c", "3"]];
        let outcome = insert_many(&mut conn, "t", &["name", "n"], &rows).unwrap();
        assert_eq!(outcome.succeeded, 1);
        assert_eq!(outcome.failed_at, Some(1));
        assert!(outcome.failure.unwrap().is_query_execution());
        assert_eq!(conn.issued().len(), 2);
    }

    #[test]
    fn zero_rows_affected_counts_as_failure() {
        let mut conn = ScriptedConnection::new(Dialect::MySql).then_affect(0);
        let outcome = insert_many(&mut conn, "t", &["a"], &[["x"], ["y"]]).unwrap();
        assert_eq!(outcome.succeeded, 0);
        assert_eq!(outcome.failed_at, Some(0));
        assert!(outcome.failure.is_none());
    }

    #[test]
    fn typed_batch_stops_on_unparseable_value_without_executing_it() {
        let mut conn = ScriptedConnection::new(Dialect::Postgres);
        let rows = vec![vec!["1"], vec!["two"], vec!["3"]];
        let outcome = insert_many_typed(&mut conn, "t", &["n"], &rows, &[LogicalType::Int]).unwrap();
        assert_eq!(outcome.succeeded, 1);
        assert_eq!(outcome.failed_at, Some(1));
        assert!(matches!(
            outcome.failure,
            Some(SqlToolboxError::TypeConversion { .. })
        ));
        assert_eq!(conn.issued().len(), 1);
        assert_eq!(conn.issued()[0].sql, "INSERT INTO t (n) VALUES ($1)");
        assert_eq!(conn.issued()[0].params, vec![BoundValue::Int(1)]);
    }

    #[test]
    fn mismatched_types_fail_before_any_row() {
        let mut conn = ScriptedConnection::new(Dialect::MySql);
        let err = insert_many_typed(&mut conn, "t", &["a", "b"], &[["1", "2"]], &[LogicalType::Int])
            .unwrap_err();
        assert!(err.is_invalid_argument());
        assert!(conn.issued().is_empty());
    }

    #[test]
    fn empty_batch_succeeds_without_statements() {
        let mut conn = ScriptedConnection::new(Dialect::MySql);
        let rows: [[&str; 1]; 0] = [];
        let outcome = insert_many(&mut conn, "t", &["a"], &rows).unwrap();
        assert!(outcome.all_succeeded());
        assert_eq!(outcome.succeeded, 0);
        assert!(conn.issued().is_empty());
    }

    #[test]
    fn delete_visits_each_id_once_and_short_circuits() {
        let mut conn = ScriptedConnection::new(Dialect::MySql)
            .then_affect(1)
            .then_affect(0);
        let outcome = delete_many(&mut conn, "t", "id", &[1, 2, 3]).unwrap();
        assert!(!outcome.all_succeeded());
        assert_eq!(outcome.succeeded, 1);
        assert_eq!(outcome.failed_at, Some(1));
        let ids: Vec<_> = conn
            .issued()
            .iter()
            .map(|s| s.params[0].as_int().unwrap())
            .collect();
        assert_eq!(ids, vec![1, 2]);
    }
}
