use thiserror::Error;

use crate::types::LogicalType;

#[derive(Debug, Error)]
pub enum SqlToolboxError {
    /// Column/value/type length mismatches, empty column lists, rejected identifiers.
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    /// A value could not be parsed into its declared logical type.
    #[error("Cannot convert {value:?} to {target} (parameter {position})")]
    TypeConversion {
        value: String,
        target: LogicalType,
        position: usize,
    },

    #[cfg(feature = "sqlite")]
    #[error(transparent)]
    QueryExecution(#[from] rusqlite::Error),

    #[error("SQL execution error: {0}")]
    ExecutionError(String),

    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("Connection error: {0}")]
    ConnectionError(String),
}

impl SqlToolboxError {
    pub(crate) fn invalid(msg: impl Into<String>) -> Self {
        SqlToolboxError::InvalidArgument(msg.into())
    }

    /// True when the driver (or a connection implementation) reported the failure.
    #[must_use]
    pub fn is_query_execution(&self) -> bool {
        match self {
            #[cfg(feature = "sqlite")]
            SqlToolboxError::QueryExecution(_) => true,
            SqlToolboxError::ExecutionError(_) => true,
            _ => false,
        }
    }

    #[must_use]
    pub fn is_invalid_argument(&self) -> bool {
        matches!(self, SqlToolboxError::InvalidArgument(_))
    }
}

impl From<serde_json::Error> for SqlToolboxError {
    fn from(err: serde_json::Error) -> Self {
        SqlToolboxError::ConfigError(format!("invalid options document: {err}"))
    }
}
