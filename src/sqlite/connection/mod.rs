mod core;
mod dml;
mod select;

pub use self::core::{SqliteConnection, apply_wal_pragmas};
