use std::fmt;
use std::str::FromStr;

use clap::ValueEnum;
use serde::{Deserialize, Serialize};

use crate::error::SqlToolboxError;

/// Caller-declared conceptual type of a string-encoded value.
///
/// The tag picks the conversion applied at bind time; it says nothing about the
/// column type the database actually declares.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, ValueEnum, Serialize, Deserialize)]
pub enum LogicalType {
    /// 64-bit integer
    Int,
    /// Single precision floating point
    Float,
    /// Double precision floating point
    Double,
    /// Bound verbatim, no conversion
    #[default]
    Text,
}

impl LogicalType {
    #[must_use]
    pub fn as_tag(self) -> &'static str {
        match self {
            LogicalType::Int => "INT",
            LogicalType::Float => "FLOAT",
            LogicalType::Double => "DOUBLE",
            LogicalType::Text => "STRING",
        }
    }
}

impl fmt::Display for LogicalType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_tag())
    }
}

/// Parses legacy string tags. Unknown tags fall back to [`LogicalType::Text`].
///
/// ```rust
/// use sql_toolbox::prelude::*;
///
/// assert_eq!("double".parse::<LogicalType>().unwrap(), LogicalType::Double);
/// assert_eq!("VARCHAR".parse::<LogicalType>().unwrap(), LogicalType::Text);
/// ```
impl FromStr for LogicalType {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let tag = s.trim();
        Ok(if tag.eq_ignore_ascii_case("INT") {
            LogicalType::Int
        } else if tag.eq_ignore_ascii_case("FLOAT") {
            LogicalType::Float
        } else if tag.eq_ignore_ascii_case("DOUBLE") {
            LogicalType::Double
        } else {
            LogicalType::Text
        })
    }
}

/// A string-encoded value paired with the logical type it should be bound as.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TypedValue {
    pub value: String,
    pub ty: LogicalType,
}

impl TypedValue {
    pub fn new(value: impl Into<String>, ty: LogicalType) -> Self {
        Self {
            value: value.into(),
            ty,
        }
    }

    pub fn int(value: impl Into<String>) -> Self {
        Self::new(value, LogicalType::Int)
    }

    pub fn float(value: impl Into<String>) -> Self {
        Self::new(value, LogicalType::Float)
    }

    pub fn double(value: impl Into<String>) -> Self {
        Self::new(value, LogicalType::Double)
    }

    pub fn text(value: impl Into<String>) -> Self {
        Self::new(value, LogicalType::Text)
    }
}

/// A value converted to its native representation, ready for a placeholder.
#[derive(Debug, Clone, PartialEq)]
pub enum BoundValue {
    Int(i64),
    Float(f32),
    Double(f64),
    Text(String),
}

impl BoundValue {
    #[must_use]
    pub fn as_text(&self) -> Option<&str> {
        if let BoundValue::Text(value) = self {
            Some(value)
        } else {
            None
        }
    }

    #[must_use]
    pub fn as_int(&self) -> Option<i64> {
        if let BoundValue::Int(value) = self {
            Some(*value)
        } else {
            None
        }
    }
}

/// A raw cell as handed back by the driver, before formatting.
#[derive(Debug, Clone, PartialEq)]
pub enum CellValue {
    Null,
    Int(i64),
    Real(f64),
    Text(String),
    Blob(Vec<u8>),
}

impl CellValue {
    #[must_use]
    pub fn is_null(&self) -> bool {
        matches!(self, Self::Null)
    }
}

/// Column metadata reported by a cursor; drives per-column formatting.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ColumnType {
    Integer,
    BigInt,
    Float,
    Double,
    Numeric,
    Boolean,
    Date,
    Timestamp,
    Text,
    Blob,
}

/// Boolean operator joining the terms of a multi-field predicate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, ValueEnum, Serialize, Deserialize)]
pub enum Connective {
    /// All terms must hold
    #[default]
    And,
    /// Any term may hold
    Or,
}

impl Connective {
    #[must_use]
    pub fn as_sql(self) -> &'static str {
        match self {
            Connective::And => " AND ",
            Connective::Or => " OR ",
        }
    }
}

/// SQL flavour used when rendering placeholders and the synthetic key column.
///
/// Parses case-insensitively from configuration text:
/// ```rust
/// use sql_toolbox::prelude::*;
///
/// assert_eq!("Postgres".parse::<Dialect>().unwrap(), Dialect::Postgres);
/// assert_eq!("mysql".parse::<Dialect>().unwrap(), Dialect::MySql);
/// assert!("oracle".parse::<Dialect>().is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, ValueEnum, Serialize, Deserialize)]
pub enum Dialect {
    /// `?` placeholders, `INT AUTO_INCREMENT PRIMARY KEY`
    #[default]
    #[value(name = "mysql", alias = "mariadb")]
    MySql,
    /// `?` placeholders, `INTEGER PRIMARY KEY AUTOINCREMENT`
    Sqlite,
    /// `$n` placeholders, `SERIAL PRIMARY KEY`
    Postgres,
}

impl Dialect {
    /// Placeholder for the 1-based parameter `index`.
    #[must_use]
    pub fn placeholder(self, index: usize) -> String {
        match self {
            Dialect::MySql | Dialect::Sqlite => "?".to_string(),
            Dialect::Postgres => format!("${index}"),
        }
    }

    /// Column definition (minus the name) of the synthetic auto-increment key.
    #[must_use]
    pub fn synthetic_key_ddl(self) -> &'static str {
        match self {
            Dialect::MySql => "INT AUTO_INCREMENT PRIMARY KEY",
            Dialect::Sqlite => "INTEGER PRIMARY KEY AUTOINCREMENT",
            Dialect::Postgres => "SERIAL PRIMARY KEY",
        }
    }
}

impl FromStr for Dialect {
    type Err = SqlToolboxError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse_value_enum(s, "dialect")
    }
}

impl FromStr for Connective {
    type Err = SqlToolboxError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse_value_enum(s, "connective")
    }
}

fn parse_value_enum<T: ValueEnum>(s: &str, what: &str) -> Result<T, SqlToolboxError> {
    <T as ValueEnum>::from_str(s.trim(), true).map_err(|_| {
        let known = T::value_variants()
            .iter()
            .filter_map(|v| v.to_possible_value().map(|p| p.get_name().to_string()))
            .collect::<Vec<_>>()
            .join(", ");
        SqlToolboxError::ConfigError(format!("unknown {what} {s:?}; expected one of {known}"))
    })
}

/// Name of the key column injected by table creation: `ID_<table>`.
#[must_use]
pub fn key_column_for(table: &str) -> String {
    format!("ID_{table}")
}
