//! Column type tags and dynamically typed cell values.
use chrono::NaiveDateTime;
use std::fmt;

use crate::temporal::PackedDateTime;

// --- Basic Data Types ---

/// The declared type of a column.
///
/// Aggregate functions decide whether they can reduce a column by looking at
/// this tag alone, never at the values.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ColumnType {
    Double,
    Integer,
    Boolean,
    String,
    DateTime,
}

impl ColumnType {
    /// True for the types that expose a numeric (`f64`) view of their values.
    pub fn is_numeric(&self) -> bool {
        matches!(self, ColumnType::Double | ColumnType::Integer)
    }
}

impl fmt::Display for ColumnType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ColumnType::Double => "DOUBLE",
            ColumnType::Integer => "INTEGER",
            ColumnType::Boolean => "BOOLEAN",
            ColumnType::String => "STRING",
            ColumnType::DateTime => "DATE_TIME",
        };
        f.write_str(name)
    }
}

/// A single non-missing cell value. Missing cells are represented as `None`
/// wherever an `Option<Value>` is used.
#[derive(Clone, Debug, PartialEq)]
pub enum Value {
    Double(f64),
    Integer(i64),
    Boolean(bool),
    String(String),
    DateTime(PackedDateTime),
}

impl Value {
    pub fn column_type(&self) -> ColumnType {
        match self {
            Value::Double(_) => ColumnType::Double,
            Value::Integer(_) => ColumnType::Integer,
            Value::Boolean(_) => ColumnType::Boolean,
            Value::String(_) => ColumnType::String,
            Value::DateTime(_) => ColumnType::DateTime,
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Double(n) => write!(f, "{n}"),
            Value::Integer(n) => write!(f, "{n}"),
            Value::Boolean(b) => write!(f, "{b}"),
            Value::String(s) => f.write_str(s),
            Value::DateTime(dt) => write!(f, "{dt}"),
        }
    }
}

impl From<f64> for Value {
    fn from(value: f64) -> Self {
        Self::Double(value)
    }
}

impl From<f32> for Value {
    fn from(value: f32) -> Self {
        Self::Double(value as f64)
    }
}

impl From<i64> for Value {
    fn from(value: i64) -> Self {
        Self::Integer(value)
    }
}

impl From<i32> for Value {
    fn from(value: i32) -> Self {
        Self::Integer(value as i64)
    }
}

impl From<bool> for Value {
    fn from(value: bool) -> Self {
        Self::Boolean(value)
    }
}

impl From<String> for Value {
    fn from(value: String) -> Self {
        Self::String(value)
    }
}

impl From<&str> for Value {
    fn from(value: &str) -> Self {
        Self::String(value.into())
    }
}

impl From<PackedDateTime> for Value {
    fn from(value: PackedDateTime) -> Self {
        Self::DateTime(value)
    }
}

impl From<NaiveDateTime> for Value {
    fn from(value: NaiveDateTime) -> Self {
        Self::DateTime(PackedDateTime::from(value))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn value_from_primitives() {
        assert_eq!(Value::from(42), Value::Integer(42));
        assert_eq!(Value::from(42_i64), Value::Integer(42));
        assert_eq!(Value::from(4.5), Value::Double(4.5));
        assert_eq!(Value::from(true), Value::Boolean(true));
        assert_eq!(Value::from("Hi Mom!"), Value::String("Hi Mom!".into()));
        assert_eq!(
            Value::from(String::from("Hi Mom!")),
            Value::String("Hi Mom!".into())
        );
    }

    #[test]
    fn value_column_type() {
        assert_eq!(Value::from(1.0).column_type(), ColumnType::Double);
        assert_eq!(Value::from("x").column_type(), ColumnType::String);
        let dt = PackedDateTime::pack(2020, 1, 1, 0, 0, 0, 0);
        assert_eq!(Value::from(dt).column_type(), ColumnType::DateTime);
    }

    #[test]
    fn column_type_display() {
        assert_eq!(ColumnType::Double.to_string(), "DOUBLE");
        assert_eq!(ColumnType::DateTime.to_string(), "DATE_TIME");
        assert!(ColumnType::Integer.is_numeric());
        assert!(!ColumnType::Boolean.is_numeric());
    }
}
