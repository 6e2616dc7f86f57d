//! Connections that remember what they were asked to run.

use std::collections::VecDeque;

use crate::connection::{CursorVisitor, SqlConnection};
use crate::error::SqlToolboxError;
use crate::types::{BoundValue, Dialect};

use super::test_helpers::VecCursor;

/// One statement as it reached the connection.
#[derive(Debug, Clone, PartialEq)]
pub struct IssuedStatement {
    pub sql: String,
    pub params: Vec<BoundValue>,
}

/// Wraps another connection and records every statement passed through it.
#[derive(Debug)]
pub struct RecordingConnection<C> {
    inner: C,
    issued: Vec<IssuedStatement>,
}

impl<C: SqlConnection> RecordingConnection<C> {
    pub fn new(inner: C) -> Self {
        Self {
            inner,
            issued: Vec::new(),
        }
    }

    #[must_use]
    pub fn issued(&self) -> &[IssuedStatement] {
        &self.issued
    }

    pub fn inner_mut(&mut self) -> &mut C {
        &mut self.inner
    }

    pub fn into_inner(self) -> C {
        self.inner
    }

    fn record(&mut self, sql: &str, params: &[BoundValue]) {
        self.issued.push(IssuedStatement {
            sql: sql.to_string(),
            params: params.to_vec(),
        });
    }
}

impl<C: SqlConnection> SqlConnection for RecordingConnection<C> {
    fn dialect(&self) -> Dialect {
        self.inner.dialect()
    }

    fn execute(&mut self, sql: &str, params: &[BoundValue]) -> Result<usize, SqlToolboxError> {
        self.record(sql, params);
        self.inner.execute(sql, params)
    }

    fn query(
        &mut self,
        sql: &str,
        params: &[BoundValue],
        visit: &mut CursorVisitor<'_>,
    ) -> Result<(), SqlToolboxError> {
        self.record(sql, params);
        self.inner.query(sql, params, visit)
    }
}

/// A database-free connection answering from a script.
///
/// `execute` pops the next scripted outcome, falling back to one affected row
/// once the script runs out. `query` pops the next scripted cursor, or an empty
/// cursor with no columns.
#[derive(Debug, Default)]
pub struct ScriptedConnection {
    dialect: Dialect,
    outcomes: VecDeque<Result<usize, String>>,
    cursors: VecDeque<VecCursor>,
    issued: Vec<IssuedStatement>,
}

impl ScriptedConnection {
    #[must_use]
    pub fn new(dialect: Dialect) -> Self {
        Self {
            dialect,
            ..Self::default()
        }
    }

    /// Queue the rows-affected count for the next `execute`.
    #[must_use]
    pub fn then_affect(mut self, rows: usize) -> Self {
        self.outcomes.push_back(Ok(rows));
        self
    }

    /// Queue a driver failure for the next `execute`.
    #[must_use]
    pub fn then_fail(mut self, message: impl Into<String>) -> Self {
        self.outcomes.push_back(Err(message.into()));
        self
    }

    /// Queue the cursor returned by the next `query`.
    #[must_use]
    pub fn then_return(mut self, cursor: VecCursor) -> Self {
        self.cursors.push_back(cursor);
        self
    }

    #[must_use]
    pub fn issued(&self) -> &[IssuedStatement] {
        &self.issued
    }

    fn record(&mut self, sql: &str, params: &[BoundValue]) {
        self.issued.push(IssuedStatement {
            sql: sql.to_string(),
            params: params.to_vec(),
        });
    }
}

impl SqlConnection for ScriptedConnection {
    fn dialect(&self) -> Dialect {
        self.dialect
    }

    fn execute(&mut self, sql: &str, params: &[BoundValue]) -> Result<usize, SqlToolboxError> {
        self.record(sql, params);
        match self.outcomes.pop_front() {
            Some(Ok(rows)) => Ok(rows),
            Some(Err(message)) => Err(SqlToolboxError::ExecutionError(message)),
            None => Ok(1),
        }
    }

    fn query(
        &mut self,
        sql: &str,
        params: &[BoundValue],
        visit: &mut CursorVisitor<'_>,
    ) -> Result<(), SqlToolboxError> {
        self.record(sql, params);
        let mut cursor = self.cursors.pop_front().unwrap_or_default();
        visit(&mut cursor)
    }
}
