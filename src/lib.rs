//! Parameterized SQL over a caller-owned connection.
//!
//! Callers describe a statement as a table, column names and string-encoded
//! values with [`LogicalType`] tags. The crate builds the SQL text, converts and
//! binds each value, executes against any [`SqlConnection`], and hands reads back
//! as text-valued [`ResultSet`]s.

pub mod batch;
pub mod binder;
pub mod connection;
pub mod error;
pub mod identifiers;
pub mod interaction;
pub mod prelude;
pub mod results;
pub mod statement;
pub mod types;

#[cfg(feature = "sqlite")]
pub mod sqlite;

#[cfg(any(test, feature = "test-utils"))]
pub mod test_utils;

pub use batch::BatchOutcome;
pub use connection::{Cursor, SqlConnection};
pub use error::SqlToolboxError;
pub use interaction::Predicate;
pub use results::{ResultSet, Row};
pub use statement::StatementBuilder;
pub use types::{
    BoundValue, CellValue, ColumnType, Connective, Dialect, LogicalType, TypedValue,
    key_column_for,
};

#[cfg(feature = "sqlite")]
pub use sqlite::{SqliteConnection, SqliteOptions};
