//! Allow-list checks for text interpolated verbatim into SQL.
//!
//! Table and column names cannot be bound as parameters, so they are spliced
//! into the statement text. Callers must still only pass trusted names; these
//! checks reject anything outside `[A-Za-z0-9_]` before it reaches the builder.

use std::sync::LazyLock;

use regex::Regex;

use crate::error::SqlToolboxError;

static IDENTIFIER: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[A-Za-z0-9_]+$").expect("identifier pattern compiles")
});

// `VARCHAR(50)`, `DOUBLE PRECISION`, `DECIMAL(10, 2)`, `VARCHAR(20) NOT NULL`
static SQL_TYPE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"^[A-Za-z][A-Za-z0-9_]*(?:\s+[A-Za-z][A-Za-z0-9_]*)*(?:\(\s*\d+\s*(?:,\s*\d+\s*)?\))?(?:\s+[A-Za-z][A-Za-z0-9_]*)*$",
    )
    .expect("sql type pattern compiles")
});

/// Accept a table or column name made only of ASCII letters, digits and underscores.
///
/// # Errors
/// Returns `SqlToolboxError::InvalidArgument` for anything else, including the empty string.
pub fn validate_identifier(name: &str) -> Result<&str, SqlToolboxError> {
    if IDENTIFIER.is_match(name) {
        Ok(name)
    } else {
        Err(SqlToolboxError::invalid(format!(
            "identifier {name:?} must match [A-Za-z0-9_]+"
        )))
    }
}

/// Validate every name in `names`, in order.
///
/// # Errors
/// Returns the error for the first rejected name.
pub fn validate_identifiers<S: AsRef<str>>(names: &[S]) -> Result<(), SqlToolboxError> {
    for name in names {
        validate_identifier(name.as_ref())?;
    }
    Ok(())
}

/// Accept a column type such as `INT`, `VARCHAR(50)` or `DECIMAL(10, 2)`.
///
/// # Errors
/// Returns `SqlToolboxError::InvalidArgument` when the type string does not look like a type name.
pub fn validate_sql_type(sql_type: &str) -> Result<&str, SqlToolboxError> {
    if SQL_TYPE.is_match(sql_type.trim()) {
        Ok(sql_type.trim())
    } else {
        Err(SqlToolboxError::invalid(format!(
            "column type {sql_type:?} is not a plain SQL type name"
        )))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_plain_names() {
        assert!(validate_identifier("widgets").is_ok());
        assert!(validate_identifier("ID_widgets").is_ok());
        assert!(validate_identifier("col_2").is_ok());
    }

    #[test]
    fn rejects_injection_shaped_names() {
        for bad in ["", "a b", "t; DROP TABLE x", "name--", "\"quoted\"", "schema.table"] {
            let err = validate_identifier(bad).unwrap_err();
            assert!(err.is_invalid_argument(), "{bad:?} should be rejected");
        }
    }

    #[test]
    fn sql_types() {
        for ok in [
            "INT",
            "VARCHAR(50)",
            "DOUBLE PRECISION",
            "DECIMAL(10, 2)",
            " TEXT ",
            "VARCHAR(20) NOT NULL",
        ] {
            assert!(validate_sql_type(ok).is_ok(), "{ok:?} should be accepted");
        }
        for bad in ["", "INT)", "TEXT; DROP TABLE t", "VARCHAR(x)", "50"] {
            assert!(validate_sql_type(bad).is_err(), "{bad:?} should be rejected");
        }
    }
}
