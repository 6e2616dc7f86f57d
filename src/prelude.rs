//! Convenient imports for common functionality.
//!
//! This module re-exports the most commonly used types and functions
//! to make it easier to get started with the library.

pub use crate::batch::{BatchOutcome, delete_many, insert_many, insert_many_typed};
pub use crate::connection::{Cursor, SqlConnection};
pub use crate::error::SqlToolboxError;
pub use crate::interaction::{Predicate, PredicateTerm};
pub use crate::results::{ResultSet, Row, RowStream};
pub use crate::statement::{StatementBuilder, build_create_table, build_insert, build_select};
pub use crate::types::{
    BoundValue, CellValue, ColumnType, Connective, Dialect, LogicalType, TypedValue,
    key_column_for,
};

#[cfg(feature = "sqlite")]
pub use crate::sqlite::{SqliteConnection, SqliteOptions, SqliteOptionsBuilder};
