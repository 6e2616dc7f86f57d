//! Test doubles for code written against [`crate::connection`].
//!
//! Available to this crate's unit tests and, with the `test-utils` feature, to
//! integration tests and downstream crates.

pub mod recording;
pub mod test_helpers;

pub use recording::{IssuedStatement, RecordingConnection, ScriptedConnection};
pub use test_helpers::{VecCursor, create_test_row};
