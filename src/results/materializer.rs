use std::collections::HashMap;
use std::sync::Arc;

use chrono::{DateTime, NaiveDate, NaiveDateTime, Timelike};

use crate::connection::Cursor;
use crate::error::SqlToolboxError;
use crate::types::{CellValue, ColumnType};

use super::result_set::ResultSet;
use super::row::{Row, index_columns};

const TIMESTAMP_FORMATS: [&str; 4] = [
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%dT%H:%M:%S",
    "%Y-%m-%dT%H:%M:%S%.f",
];

/// Lazy, single-pass sequence of formatted rows over an open cursor.
///
/// Ends quietly when the cursor is exhausted. A read failure is yielded once as
/// `Err` and the stream stops; rows already yielded stay with the caller.
pub struct RowStream<'c> {
    cursor: &'c mut dyn Cursor,
    column_names: Arc<Vec<String>>,
    column_index: Arc<HashMap<String, usize>>,
    column_types: Vec<Option<ColumnType>>,
    finished: bool,
}

impl<'c> RowStream<'c> {
    /// Snapshot the cursor's column metadata and start streaming.
    pub fn new(cursor: &'c mut dyn Cursor) -> Self {
        let column_names = Arc::new(cursor.column_names());
        let column_index = Arc::new(index_columns(&column_names));
        let column_types = (0..cursor.column_count())
            .map(|i| cursor.column_type(i))
            .collect();
        Self {
            cursor,
            column_names,
            column_index,
            column_types,
            finished: false,
        }
    }

    #[must_use]
    pub fn column_names(&self) -> &Arc<Vec<String>> {
        &self.column_names
    }

    fn format_row(&self, cells: Vec<CellValue>) -> Row {
        let values = cells
            .into_iter()
            .enumerate()
            .map(|(i, cell)| format_cell(cell, self.column_types.get(i).copied().flatten()))
            .collect();
        Row::with_index(
            Arc::clone(&self.column_names),
            Arc::clone(&self.column_index),
            values,
        )
    }
}

impl Iterator for RowStream<'_> {
    type Item = Result<Row, SqlToolboxError>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.finished {
            return None;
        }
        match self.cursor.next_row() {
            Ok(Some(cells)) => Some(Ok(self.format_row(cells))),
            Ok(None) => {
                self.finished = true;
                None
            }
            Err(e) => {
                self.finished = true;
                Some(Err(e))
            }
        }
    }
}

impl std::iter::FusedIterator for RowStream<'_> {}

/// Drain a cursor into a [`ResultSet`].
///
/// # Errors
/// Returns the first read failure; nothing read so far is returned in that case.
pub fn materialize(cursor: &mut dyn Cursor) -> Result<ResultSet, SqlToolboxError> {
    let stream = RowStream::new(cursor);
    let mut result_set = ResultSet::with_columns(Arc::clone(stream.column_names()));
    for row in stream {
        result_set.push(row?);
    }
    Ok(result_set)
}

/// Render one cell as text, using the column's declared type when known.
///
/// `NULL` is `None` whatever the type. Values that do not fit the declared type
/// fall back to the untyped rendering instead of failing.
#[must_use]
pub fn format_cell(cell: CellValue, column_type: Option<ColumnType>) -> Option<String> {
    if cell.is_null() {
        return None;
    }
    let typed = match column_type {
        Some(ColumnType::Integer | ColumnType::BigInt) => format_integer(&cell),
        Some(ColumnType::Float) => format_real(&cell).map(|f| format_float32(f as f32)),
        Some(ColumnType::Double | ColumnType::Numeric) => format_real(&cell).map(format_float),
        Some(ColumnType::Boolean) => format_boolean(&cell),
        Some(ColumnType::Date) => format_date(&cell),
        Some(ColumnType::Timestamp) => format_timestamp(&cell),
        Some(ColumnType::Text | ColumnType::Blob) | None => None,
    };
    Some(typed.unwrap_or_else(|| format_default(cell)))
}

/// Decimal text that always shows a fractional part for finite values: `42.0`, `3.5`.
#[must_use]
pub fn format_float(value: f64) -> String {
    with_fraction(value.to_string(), value.is_finite())
}

fn format_float32(value: f32) -> String {
    with_fraction(value.to_string(), value.is_finite())
}

fn with_fraction(mut text: String, finite: bool) -> String {
    if finite && !text.contains('.') {
        text.push_str(".0");
    }
    text
}

fn format_default(cell: CellValue) -> String {
    match cell {
        CellValue::Null => String::new(),
        CellValue::Int(i) => i.to_string(),
        CellValue::Real(f) => format_float(f),
        CellValue::Text(s) => s,
        CellValue::Blob(bytes) => String::from_utf8_lossy(&bytes).into_owned(),
    }
}

fn format_integer(cell: &CellValue) -> Option<String> {
    match cell {
        CellValue::Int(i) => Some(i.to_string()),
        #[allow(clippy::cast_possible_truncation)]
        CellValue::Real(f) if f.is_finite() => Some((f.trunc() as i64).to_string()),
        CellValue::Text(s) => s.trim().parse::<i64>().ok().map(|i| i.to_string()),
        _ => None,
    }
}

fn format_real(cell: &CellValue) -> Option<f64> {
    match cell {
        #[allow(clippy::cast_precision_loss)]
        CellValue::Int(i) => Some(*i as f64),
        CellValue::Real(f) => Some(*f),
        CellValue::Text(s) => s.trim().parse::<f64>().ok(),
        _ => None,
    }
}

fn format_boolean(cell: &CellValue) -> Option<String> {
    let truth = match cell {
        CellValue::Int(i) => *i != 0,
        CellValue::Real(f) => *f != 0.0,
        CellValue::Text(s) => match s.trim().to_ascii_lowercase().as_str() {
            "true" | "t" | "1" | "yes" | "y" => true,
            "false" | "f" | "0" | "no" | "n" => false,
            _ => return None,
        },
        _ => return None,
    };
    Some(truth.to_string())
}

fn parse_timestamp(cell: &CellValue) -> Option<NaiveDateTime> {
    match cell {
        CellValue::Int(secs) => DateTime::from_timestamp(*secs, 0).map(|dt| dt.naive_utc()),
        CellValue::Text(s) => {
            let s = s.trim();
            TIMESTAMP_FORMATS
                .iter()
                .find_map(|fmt| NaiveDateTime::parse_from_str(s, fmt).ok())
                .or_else(|| {
                    NaiveDate::parse_from_str(s, "%Y-%m-%d")
                        .ok()
                        .and_then(|d| d.and_hms_opt(0, 0, 0))
                })
        }
        _ => None,
    }
}

fn format_date(cell: &CellValue) -> Option<String> {
    parse_timestamp(cell).map(|ts| ts.date().format("%Y-%m-%d").to_string())
}

/// `YYYY-MM-DD HH:MM:SS.f`: trailing zeros trimmed from the fraction, at least one digit kept.
fn format_timestamp(cell: &CellValue) -> Option<String> {
    parse_timestamp(cell).map(|ts| {
        let nanos = format!("{:09}", ts.nanosecond());
        let fraction = match nanos.trim_end_matches('0') {
            "" => "0",
            digits => digits,
        };
        format!("{}.{fraction}", ts.format("%Y-%m-%d %H:%M:%S"))
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn text(s: &str) -> CellValue {
        CellValue::Text(s.to_string())
    }

    #[test]
    fn null_is_none_for_every_type() {
        assert_eq!(format_cell(CellValue::Null, Some(ColumnType::Integer)), None);
        assert_eq!(format_cell(CellValue::Null, None), None);
    }

    #[test]
    fn numeric_columns_render_decimal_text() {
        assert_eq!(format_cell(CellValue::Int(42), Some(ColumnType::Integer)).as_deref(), Some("42"));
        assert_eq!(format_cell(CellValue::Real(3.9), Some(ColumnType::Integer)).as_deref(), Some("3"));
        assert_eq!(format_cell(CellValue::Real(3.5), Some(ColumnType::Double)).as_deref(), Some("3.5"));
        assert_eq!(format_cell(CellValue::Int(42), Some(ColumnType::Double)).as_deref(), Some("42.0"));
        assert_eq!(format_cell(text("2.25"), Some(ColumnType::Numeric)).as_deref(), Some("2.25"));
    }

    #[test]
    fn float_columns_use_single_precision() {
        let widened = f64::from(0.1_f32);
        assert_eq!(format_cell(CellValue::Real(widened), Some(ColumnType::Float)).as_deref(), Some("0.1"));
    }

    #[test]
    fn booleans() {
        assert_eq!(format_cell(CellValue::Int(1), Some(ColumnType::Boolean)).as_deref(), Some("true"));
        assert_eq!(format_cell(CellValue::Int(0), Some(ColumnType::Boolean)).as_deref(), Some("false"));
        assert_eq!(format_cell(text("TRUE"), Some(ColumnType::Boolean)).as_deref(), Some("true"));
        assert_eq!(format_cell(text("maybe"), Some(ColumnType::Boolean)).as_deref(), Some("maybe"));
    }

    #[test]
    fn dates_and_timestamps() {
        assert_eq!(
            format_cell(text("2024-02-29"), Some(ColumnType::Date)).as_deref(),
            Some("2024-02-29")
        );
        assert_eq!(
            format_cell(text("2024-02-29 13:45:00"), Some(ColumnType::Date)).as_deref(),
            Some("2024-02-29")
        );
        assert_eq!(
            format_cell(text("2024-02-29T13:45:00.250"), Some(ColumnType::Timestamp)).as_deref(),
            Some("2024-02-29 13:45:00.25")
        );
        assert_eq!(
            format_cell(text("2024-02-29 13:45:00"), Some(ColumnType::Timestamp)).as_deref(),
            Some("2024-02-29 13:45:00.0")
        );
        assert_eq!(
            format_cell(CellValue::Int(0), Some(ColumnType::Timestamp)).as_deref(),
            Some("1970-01-01 00:00:00.0")
        );
        assert_eq!(
            format_cell(text("not a date"), Some(ColumnType::Date)).as_deref(),
            Some("not a date")
        );
    }

    #[test]
    fn untyped_columns_fall_back_to_driver_text() {
        assert_eq!(format_cell(CellValue::Int(7), None).as_deref(), Some("7"));
        assert_eq!(format_cell(CellValue::Real(2.0), None).as_deref(), Some("2.0"));
        assert_eq!(format_cell(text("hi"), Some(ColumnType::Text)).as_deref(), Some("hi"));
        assert_eq!(
            format_cell(CellValue::Blob(b"raw".to_vec()), Some(ColumnType::Blob)).as_deref(),
            Some("raw")
        );
    }
}
