//! Type-aware conversion of string-encoded values.
//!
//! Every caller value travels as text. The binder turns each one into the native
//! representation its [`LogicalType`] asks for; the backend then attaches the
//! resulting [`BoundValue`]s to the statement's placeholders in order.

use crate::error::SqlToolboxError;
use crate::types::{BoundValue, LogicalType, TypedValue};

/// Convert one value for the 1-based parameter `position`.
///
/// # Errors
///
/// Returns `SqlToolboxError::TypeConversion` carrying the offending value and target type
/// when an `Int`, `Float` or `Double` value does not parse.
///
/// ```rust
/// use sql_toolbox::binder::convert_value;
/// use sql_toolbox::prelude::*;
///
/// assert_eq!(convert_value("42", LogicalType::Int, 1).unwrap(), BoundValue::Int(42));
/// assert!(convert_value("4x2", LogicalType::Int, 1).is_err());
/// ```
pub fn convert_value(
    value: &str,
    ty: LogicalType,
    position: usize,
) -> Result<BoundValue, SqlToolboxError> {
    let conversion_error = || SqlToolboxError::TypeConversion {
        value: value.to_string(),
        target: ty,
        position,
    };
    match ty {
        LogicalType::Int => value
            .parse::<i64>()
            .map(BoundValue::Int)
            .map_err(|_| conversion_error()),
        LogicalType::Float => value
            .parse::<f32>()
            .map(BoundValue::Float)
            .map_err(|_| conversion_error()),
        LogicalType::Double => value
            .parse::<f64>()
            .map(BoundValue::Double)
            .map_err(|_| conversion_error()),
        LogicalType::Text => Ok(BoundValue::Text(value.to_string())),
    }
}

/// Convert parallel value/type slices, keeping positional order.
///
/// # Errors
///
/// Returns `SqlToolboxError::InvalidArgument` if the slices differ in length, or the first
/// `SqlToolboxError::TypeConversion` encountered.
pub fn bind_values<S: AsRef<str>>(
    values: &[S],
    types: &[LogicalType],
) -> Result<Vec<BoundValue>, SqlToolboxError> {
    if values.len() != types.len() {
        return Err(SqlToolboxError::invalid(format!(
            "The number of values ({}) and types ({}) must be the same.",
            values.len(),
            types.len()
        )));
    }
    values
        .iter()
        .zip(types)
        .enumerate()
        .map(|(i, (value, ty))| convert_value(value.as_ref(), *ty, i + 1))
        .collect()
}

/// Convert `(value, type)` pairs, keeping positional order.
///
/// # Errors
///
/// Returns the first `SqlToolboxError::TypeConversion` encountered.
pub fn bind_typed(values: &[TypedValue]) -> Result<Vec<BoundValue>, SqlToolboxError> {
    values
        .iter()
        .enumerate()
        .map(|(i, tv)| convert_value(&tv.value, tv.ty, i + 1))
        .collect()
}

/// Bind every value as text, verbatim.
#[must_use]
pub fn bind_text<S: AsRef<str>>(values: &[S]) -> Vec<BoundValue> {
    values
        .iter()
        .map(|v| BoundValue::Text(v.as_ref().to_string()))
        .collect()
}
