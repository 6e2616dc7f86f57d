use std::fmt;

use tracing::{debug, info};

use crate::connection::{CursorVisitor, SqlConnection};
use crate::error::SqlToolboxError;
use crate::types::{BoundValue, Dialect};

use crate::sqlite::config::SqliteOptions;

/// A caller-owned `rusqlite` connection speaking [`Dialect::Sqlite`].
pub struct SqliteConnection {
    pub(crate) conn: rusqlite::Connection,
    pub(crate) db_path: String,
}

impl SqliteConnection {
    /// Open (creating if needed) the database named by `opts`.
    ///
    /// # Errors
    /// Returns `SqlToolboxError::ConfigError` for a blank path, `ConnectionError` if the file
    /// cannot be opened, or the pragma failure.
    pub fn open(opts: &SqliteOptions) -> Result<Self, SqlToolboxError> {
        opts.validate()?;
        let conn = rusqlite::Connection::open(&opts.db_path).map_err(|e| {
            SqlToolboxError::ConnectionError(format!(
                "Failed to open SQLite database {}: {e}",
                opts.db_path
            ))
        })?;
        apply_wal_pragmas(&conn, opts)?;
        info!(db_path = %opts.db_path, wal = opts.wal, "sqlite connection opened");
        Ok(Self {
            conn,
            db_path: opts.db_path.clone(),
        })
    }

    /// Private in-memory database, mostly for tests and scratch work.
    ///
    /// # Errors
    /// Returns `SqlToolboxError::ConnectionError` if `SQLite` cannot allocate the database.
    pub fn open_in_memory() -> Result<Self, SqlToolboxError> {
        let conn = rusqlite::Connection::open_in_memory().map_err(|e| {
            SqlToolboxError::ConnectionError(format!("Failed to open in-memory SQLite: {e}"))
        })?;
        info!("sqlite in-memory connection opened");
        Ok(Self {
            conn,
            db_path: ":memory:".to_string(),
        })
    }

    /// Close the connection, surfacing any error `SQLite` reports while doing so.
    ///
    /// # Errors
    /// Returns `SqlToolboxError::QueryExecution` if `SQLite` refuses to close.
    pub fn close(self) -> Result<(), SqlToolboxError> {
        let db_path = self.db_path;
        self.conn.close().map_err(|(_, e)| SqlToolboxError::from(e))?;
        info!(db_path = %db_path, "sqlite connection closed");
        Ok(())
    }

    #[must_use]
    pub fn db_path(&self) -> &str {
        &self.db_path
    }

    /// Borrow the underlying `rusqlite` connection.
    #[must_use]
    pub fn raw(&self) -> &rusqlite::Connection {
        &self.conn
    }
}

impl fmt::Debug for SqliteConnection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SqliteConnection")
            .field("db_path", &self.db_path)
            .finish_non_exhaustive()
    }
}

impl SqlConnection for SqliteConnection {
    fn dialect(&self) -> Dialect {
        Dialect::Sqlite
    }

    fn execute(&mut self, sql: &str, params: &[BoundValue]) -> Result<usize, SqlToolboxError> {
        self.execute_dml(sql, params)
    }

    fn query(
        &mut self,
        sql: &str,
        params: &[BoundValue],
        visit: &mut CursorVisitor<'_>,
    ) -> Result<(), SqlToolboxError> {
        self.execute_select(sql, params, visit)
    }
}

/// Apply WAL journaling and the busy timeout from `opts`.
///
/// # Errors
/// Returns `SqlToolboxError` if the PRAGMA statements cannot be executed.
pub fn apply_wal_pragmas(
    conn: &rusqlite::Connection,
    opts: &SqliteOptions,
) -> Result<(), SqlToolboxError> {
    if let Some(timeout) = opts.busy_timeout() {
        conn.busy_timeout(timeout)?;
    }
    if opts.wal {
        // in-memory databases answer "memory"; that is not an error
        let mode: String = conn.query_row("PRAGMA journal_mode = WAL", [], |row| row.get(0))?;
        debug!(journal_mode = %mode, "sqlite journal mode");
    }
    Ok(())
}
