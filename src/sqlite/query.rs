use rusqlite::Rows;
use rusqlite::types::ValueRef;

use crate::connection::Cursor;
use crate::error::SqlToolboxError;
use crate::types::{CellValue, ColumnType};

/// Map a declared `SQLite` column type to formatting metadata.
///
/// Follows `SQLite`'s affinity rules loosely: substring matches, checked in an
/// order that keeps `BIGINT` and `DATETIME` from falling into `INT` and `DATE`.
#[must_use]
pub fn column_type_from_decl(decl: &str) -> Option<ColumnType> {
    let decl = decl.to_ascii_uppercase();
    let ty = if decl.contains("BOOL") {
        ColumnType::Boolean
    } else if decl.contains("TIMESTAMP") || decl.contains("DATETIME") {
        ColumnType::Timestamp
    } else if decl.contains("DATE") {
        ColumnType::Date
    } else if decl.contains("BIGINT") {
        ColumnType::BigInt
    } else if decl.contains("INT") {
        ColumnType::Integer
    } else if decl.contains("DOUB") || decl.contains("REAL") {
        ColumnType::Double
    } else if decl.contains("FLOA") {
        ColumnType::Float
    } else if decl.contains("DEC") || decl.contains("NUMERIC") {
        ColumnType::Numeric
    } else if decl.contains("CHAR") || decl.contains("CLOB") || decl.contains("TEXT") {
        ColumnType::Text
    } else if decl.contains("BLOB") {
        ColumnType::Blob
    } else {
        return None;
    };
    Some(ty)
}

/// Extract a `CellValue` from a `SQLite` row.
///
/// # Errors
///
/// Returns `SqlToolboxError::QueryExecution` if the column cannot be read.
pub fn sqlite_extract_value_sync(
    row: &rusqlite::Row<'_>,
    idx: usize,
) -> Result<CellValue, SqlToolboxError> {
    let value = match row.get_ref(idx)? {
        ValueRef::Null => CellValue::Null,
        ValueRef::Integer(i) => CellValue::Int(i),
        ValueRef::Real(f) => CellValue::Real(f),
        ValueRef::Text(bytes) => CellValue::Text(String::from_utf8_lossy(bytes).into_owned()),
        ValueRef::Blob(b) => CellValue::Blob(b.to_vec()),
    };
    Ok(value)
}

/// Cursor over the rows of one executing `SQLite` statement.
pub struct SqliteCursor<'stmt> {
    rows: Rows<'stmt>,
    column_names: Vec<String>,
    column_types: Vec<Option<ColumnType>>,
}

impl<'stmt> SqliteCursor<'stmt> {
    pub(crate) fn new(
        rows: Rows<'stmt>,
        column_names: Vec<String>,
        column_types: Vec<Option<ColumnType>>,
    ) -> Self {
        Self {
            rows,
            column_names,
            column_types,
        }
    }
}

impl Cursor for SqliteCursor<'_> {
    fn column_count(&self) -> usize {
        self.column_names.len()
    }

    fn column_names(&self) -> Vec<String> {
        self.column_names.clone()
    }

    fn column_type(&self, idx: usize) -> Option<ColumnType> {
        self.column_types.get(idx).copied().flatten()
    }

    fn next_row(&mut self) -> Result<Option<Vec<CellValue>>, SqlToolboxError> {
        let col_count = self.column_names.len();
        match self.rows.next()? {
            Some(row) => {
                let mut cells = Vec::with_capacity(col_count);
                for i in 0..col_count {
                    cells.push(sqlite_extract_value_sync(row, i)?);
                }
                Ok(Some(cells))
            }
            None => Ok(None),
        }
    }
}
