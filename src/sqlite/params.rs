use rusqlite::Statement;
use rusqlite::types::Value;

use crate::error::SqlToolboxError;
use crate::types::BoundValue;

/// Convert a single bound value to a rusqlite `Value`.
#[must_use]
pub fn bound_value_to_sqlite_value(value: &BoundValue) -> Value {
    match value {
        BoundValue::Int(i) => Value::Integer(*i),
        BoundValue::Float(f) => Value::Real(f64::from(*f)),
        BoundValue::Double(d) => Value::Real(*d),
        BoundValue::Text(s) => Value::Text(s.clone()),
    }
}

/// `SQLite` parameter container, in placeholder order.
pub struct Params(pub Vec<Value>);

impl Params {
    #[must_use]
    pub fn convert(params: &[BoundValue]) -> Self {
        Params(params.iter().map(bound_value_to_sqlite_value).collect())
    }

    #[must_use]
    pub fn as_values(&self) -> &[Value] {
        &self.0
    }

    /// Attach each value to its 1-based placeholder on `stmt`.
    ///
    /// # Errors
    /// Returns `SqlToolboxError::QueryExecution` if the statement expects a different number
    /// of parameters or a bind call fails.
    pub fn bind_to(&self, stmt: &mut Statement<'_>) -> Result<(), SqlToolboxError> {
        let expected = stmt.parameter_count();
        if expected != self.0.len() {
            return Err(rusqlite::Error::InvalidParameterCount(self.0.len(), expected).into());
        }
        for (i, value) in self.0.iter().enumerate() {
            stmt.raw_bind_parameter(i + 1, value)?;
        }
        Ok(())
    }
}
