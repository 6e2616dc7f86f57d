use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::error::SqlToolboxError;

use super::connection::SqliteConnection;

fn default_wal() -> bool {
    true
}

/// Options for opening a `SQLite` connection.
///
/// Deserializable so callers can keep them next to the rest of their configuration:
/// ```rust
/// use sql_toolbox::sqlite::SqliteOptions;
///
/// let opts = SqliteOptions::from_json(r#"{ "db_path": "app.db", "busy_timeout_ms": 500 }"#).unwrap();
/// assert!(opts.wal);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SqliteOptions {
    pub db_path: String,
    #[serde(default = "default_wal")]
    pub wal: bool,
    #[serde(default)]
    pub busy_timeout_ms: Option<u64>,
}

impl SqliteOptions {
    #[must_use]
    pub fn new(db_path: impl Into<String>) -> Self {
        Self {
            db_path: db_path.into(),
            wal: default_wal(),
            busy_timeout_ms: None,
        }
    }

    #[must_use]
    pub fn builder(db_path: impl Into<String>) -> SqliteOptionsBuilder {
        SqliteOptionsBuilder::new(db_path)
    }

    /// Parse options from a JSON document.
    ///
    /// # Errors
    /// Returns `SqlToolboxError::ConfigError` if the document is malformed or fails validation.
    pub fn from_json(json: &str) -> Result<Self, SqlToolboxError> {
        let opts: SqliteOptions = serde_json::from_str(json)?;
        opts.validate()?;
        Ok(opts)
    }

    /// Reject options that cannot name a database.
    ///
    /// # Errors
    /// Returns `SqlToolboxError::ConfigError` when `db_path` is blank.
    pub fn validate(&self) -> Result<(), SqlToolboxError> {
        if self.db_path.trim().is_empty() {
            return Err(SqlToolboxError::ConfigError(
                "SQLite db_path must not be blank".into(),
            ));
        }
        Ok(())
    }

    #[must_use]
    pub fn busy_timeout(&self) -> Option<Duration> {
        self.busy_timeout_ms.map(Duration::from_millis)
    }
}

/// Fluent builder for `SQLite` options.
#[derive(Debug, Clone)]
pub struct SqliteOptionsBuilder {
    opts: SqliteOptions,
}

impl SqliteOptionsBuilder {
    #[must_use]
    pub fn new(db_path: impl Into<String>) -> Self {
        Self {
            opts: SqliteOptions::new(db_path),
        }
    }

    #[must_use]
    pub fn wal(mut self, wal: bool) -> Self {
        self.opts.wal = wal;
        self
    }

    #[must_use]
    pub fn busy_timeout(mut self, timeout: Duration) -> Self {
        self.opts.busy_timeout_ms = Some(u64::try_from(timeout.as_millis()).unwrap_or(u64::MAX));
        self
    }

    #[must_use]
    pub fn finish(self) -> SqliteOptions {
        self.opts
    }

    /// Open a connection with these options.
    ///
    /// # Errors
    /// Returns `SqlToolboxError` if the options are invalid or the database cannot be opened.
    pub fn open(self) -> Result<SqliteConnection, SqlToolboxError> {
        SqliteConnection::open(&self.finish())
    }
}
