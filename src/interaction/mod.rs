//! Single-record operations against a caller-owned [`SqlConnection`].
//!
//! Each call validates its inputs, builds one statement in the connection's
//! dialect, binds the values, executes, and returns. Nothing is retried and
//! nothing outlives the call.
//!
//! ```rust,no_run
//! use sql_toolbox::prelude::*;
//! use sql_toolbox::interaction::{create_table, insert_one_typed, search};
//!
//! # fn demo() -> Result<(), SqlToolboxError> {
//! let mut conn = SqliteConnection::open_in_memory()?;
//! create_table(&mut conn, "widgets", &["name", "qty"], &["VARCHAR(50)", "INT"])?;
//! insert_one_typed(
//!     &mut conn,
//!     "widgets",
//!     &["name", "qty"],
//!     &["bolt", "12"],
//!     &[LogicalType::Text, LogicalType::Int],
//! )?;
//! let found = search(&mut conn, "widgets", &Predicate::all().eq("qty", TypedValue::int("12")))?;
//! assert_eq!(found.rows[0].get("name"), Some("bolt"));
//! # Ok(())
//! # }
//! ```

mod dml;
mod select;

pub use dml::{create_table, delete_by_id, insert_one, insert_one_typed, update_by_id};
pub use select::{
    count_rows, fold_rows, fold_search, search, search_and, search_by_field, search_ignore_case,
    search_ignore_case_many, search_or, select_rows,
};

use crate::connection::SqlConnection;
use crate::error::SqlToolboxError;
use crate::statement::StatementBuilder;
use crate::types::{Connective, LogicalType, TypedValue};

/// One `field = value` term of a [`Predicate`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PredicateTerm {
    pub field: String,
    pub value: TypedValue,
}

/// Equality terms joined by a single [`Connective`].
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Predicate {
    connective: Connective,
    terms: Vec<PredicateTerm>,
}

impl Predicate {
    #[must_use]
    pub fn new(connective: Connective) -> Self {
        Self {
            connective,
            terms: Vec::new(),
        }
    }

    /// Every term must hold (`AND`).
    #[must_use]
    pub fn all() -> Self {
        Self::new(Connective::And)
    }

    /// Any term may hold (`OR`).
    #[must_use]
    pub fn any() -> Self {
        Self::new(Connective::Or)
    }

    /// Add a `field = value` term.
    #[must_use]
    pub fn eq(mut self, field: impl Into<String>, value: TypedValue) -> Self {
        self.terms.push(PredicateTerm {
            field: field.into(),
            value,
        });
        self
    }

    /// Build from parallel field/value/type slices.
    ///
    /// # Errors
    /// Returns `SqlToolboxError::InvalidArgument` if the slices differ in length.
    pub fn from_parallel<S: AsRef<str>, V: AsRef<str>>(
        connective: Connective,
        fields: &[S],
        values: &[V],
        types: &[LogicalType],
    ) -> Result<Self, SqlToolboxError> {
        if fields.len() != values.len() || values.len() != types.len() {
            return Err(SqlToolboxError::invalid(format!(
                "The number of fields ({}), values ({}) and types ({}) must be the same.",
                fields.len(),
                values.len(),
                types.len()
            )));
        }
        let terms = fields
            .iter()
            .zip(values)
            .zip(types)
            .map(|((field, value), ty)| PredicateTerm {
                field: field.as_ref().to_string(),
                value: TypedValue::new(value.as_ref(), *ty),
            })
            .collect();
        Ok(Self { connective, terms })
    }

    #[must_use]
    pub fn connective(&self) -> Connective {
        self.connective
    }

    #[must_use]
    pub fn terms(&self) -> &[PredicateTerm] {
        &self.terms
    }

    #[must_use]
    pub fn fields(&self) -> Vec<&str> {
        self.terms.iter().map(|t| t.field.as_str()).collect()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.terms.is_empty()
    }
}

fn builder_for<C: SqlConnection + ?Sized>(conn: &C) -> StatementBuilder {
    StatementBuilder::new(conn.dialect())
}

pub(crate) fn ensure_same_len(
    what: &str,
    left: usize,
    right_what: &str,
    right: usize,
) -> Result<(), SqlToolboxError> {
    if left == right {
        Ok(())
    } else {
        Err(SqlToolboxError::invalid(format!(
            "The number of {what} ({left}) and {right_what} ({right}) must be the same."
        )))
    }
}
