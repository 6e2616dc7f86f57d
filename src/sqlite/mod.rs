// SQLite module - the rusqlite implementation of the connector interface
//
// - config: connection options and their builder
// - connection: open/close lifecycle plus statement execution
// - params: bound values -> rusqlite values, attached by position
// - query: cursor over executing statements, declared-type mapping

pub mod config;
pub mod connection;
pub mod params;
pub mod query;

// Re-export the public API
pub use config::{SqliteOptions, SqliteOptionsBuilder};
pub use connection::{SqliteConnection, apply_wal_pragmas};
pub use params::Params;
pub use query::{SqliteCursor, column_type_from_decl};
