// Results module - string-encoded rows produced from query cursors
//
// - row: a single row of string-encoded values
// - result_set: fully materialized rows sharing column names
// - materializer: cursor -> rows, with per-column formatting

pub mod materializer;
pub mod result_set;
pub mod row;

pub use materializer::{RowStream, format_cell, format_float, materialize};
pub use result_set::ResultSet;
pub use row::Row;
