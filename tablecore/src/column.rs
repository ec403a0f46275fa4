//! Named, typed columns of plain arrays.
//!
//! Each column type carries its own missing-value convention:
//! * `Double`: `NaN`
//! * `Integer`: `i64::MIN`
//! * `DateTime`: [`PackedDateTime::MISSING`]
//! * `Boolean` and `String`: `None`
use crate::{
    error::{Result, TableError},
    selection::Selection,
    temporal::PackedDateTime,
    types::{ColumnType, Value},
};

/// Sentinel for a missing cell in an integer column.
pub const INTEGER_MISSING: i64 = i64::MIN;

/// Storage of a column's values, one variant per [`ColumnType`].
#[derive(Clone, Debug)]
pub enum ColumnData {
    Double(Vec<f64>),
    Integer(Vec<i64>),
    Boolean(Vec<Option<bool>>),
    String(Vec<Option<String>>),
    DateTime(Vec<PackedDateTime>),
}

impl PartialEq for ColumnData {
    // NaN cells compare equal to each other so that column equality is reflexive.
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (ColumnData::Double(a), ColumnData::Double(b)) => {
                a.len() == b.len() && a.iter().zip(b).all(|(x, y)| x.to_bits() == y.to_bits())
            }
            (ColumnData::Integer(a), ColumnData::Integer(b)) => a == b,
            (ColumnData::Boolean(a), ColumnData::Boolean(b)) => a == b,
            (ColumnData::String(a), ColumnData::String(b)) => a == b,
            (ColumnData::DateTime(a), ColumnData::DateTime(b)) => a == b,
            _ => false,
        }
    }
}

/// A hashable projection of one cell, used as (part of) a grouping key and for
/// counting distinct values. All missing cells map to [`KeyPart::Missing`].
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum KeyPart {
    Missing,
    Double(u64),
    Integer(i64),
    Boolean(bool),
    String(String),
    DateTime(i64),
}

#[derive(Clone, Debug, PartialEq)]
pub struct Column {
    name: String,
    data: ColumnData,
}

impl Column {
    pub fn new(name: impl Into<String>, data: ColumnData) -> Self {
        Self {
            name: name.into(),
            data,
        }
    }

    pub fn doubles(name: impl Into<String>, values: impl Into<Vec<f64>>) -> Self {
        Self::new(name, ColumnData::Double(values.into()))
    }

    pub fn integers(name: impl Into<String>, values: impl Into<Vec<i64>>) -> Self {
        Self::new(name, ColumnData::Integer(values.into()))
    }

    pub fn booleans(name: impl Into<String>, values: impl Into<Vec<Option<bool>>>) -> Self {
        Self::new(name, ColumnData::Boolean(values.into()))
    }

    /// A string column with no missing cells.
    pub fn strings<S: Into<String>>(
        name: impl Into<String>,
        values: impl IntoIterator<Item = S>,
    ) -> Self {
        let values = values.into_iter().map(|s| Some(s.into())).collect();
        Self::new(name, ColumnData::String(values))
    }

    pub fn optional_strings<S: Into<String>>(
        name: impl Into<String>,
        values: impl IntoIterator<Item = Option<S>>,
    ) -> Self {
        let values = values.into_iter().map(|s| s.map(Into::into)).collect();
        Self::new(name, ColumnData::String(values))
    }

    pub fn date_times(name: impl Into<String>, values: impl Into<Vec<PackedDateTime>>) -> Self {
        Self::new(name, ColumnData::DateTime(values.into()))
    }

    /// An empty column of the given type, ready for [`Column::push`].
    pub fn empty(name: impl Into<String>, column_type: ColumnType) -> Self {
        let data = match column_type {
            ColumnType::Double => ColumnData::Double(Vec::new()),
            ColumnType::Integer => ColumnData::Integer(Vec::new()),
            ColumnType::Boolean => ColumnData::Boolean(Vec::new()),
            ColumnType::String => ColumnData::String(Vec::new()),
            ColumnType::DateTime => ColumnData::DateTime(Vec::new()),
        };
        Self::new(name, data)
    }

    /// Builds a column from dynamically typed cells, `None` meaning missing.
    pub fn from_values(
        name: impl Into<String>,
        column_type: ColumnType,
        values: impl IntoIterator<Item = Option<Value>>,
    ) -> Result<Self> {
        let mut column = Self::empty(name, column_type);
        for value in values {
            column.push(value)?;
        }
        Ok(column)
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn set_name(&mut self, name: impl Into<String>) {
        self.name = name.into();
    }

    pub fn data(&self) -> &ColumnData {
        &self.data
    }

    pub fn column_type(&self) -> ColumnType {
        match &self.data {
            ColumnData::Double(_) => ColumnType::Double,
            ColumnData::Integer(_) => ColumnType::Integer,
            ColumnData::Boolean(_) => ColumnType::Boolean,
            ColumnData::String(_) => ColumnType::String,
            ColumnData::DateTime(_) => ColumnType::DateTime,
        }
    }

    /// Number of rows.
    pub fn size(&self) -> usize {
        match &self.data {
            ColumnData::Double(v) => v.len(),
            ColumnData::Integer(v) => v.len(),
            ColumnData::Boolean(v) => v.len(),
            ColumnData::String(v) => v.len(),
            ColumnData::DateTime(v) => v.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.size() == 0
    }

    /// The cell at `row`, or `None` when it is missing or out of range.
    pub fn value(&self, row: usize) -> Option<Value> {
        match &self.data {
            ColumnData::Double(v) => v.get(row).filter(|x| !x.is_nan()).map(|x| Value::Double(*x)),
            ColumnData::Integer(v) => v
                .get(row)
                .filter(|x| **x != INTEGER_MISSING)
                .map(|x| Value::Integer(*x)),
            ColumnData::Boolean(v) => v.get(row).copied().flatten().map(Value::Boolean),
            ColumnData::String(v) => v
                .get(row)
                .and_then(|s| s.as_ref())
                .map(|s| Value::String(s.clone())),
            ColumnData::DateTime(v) => v
                .get(row)
                .filter(|dt| !dt.is_missing())
                .map(|dt| Value::DateTime(*dt)),
        }
    }

    /// The numeric view of the cell at `row`.
    ///
    /// Integers widen to `f64`, booleans map to `1.0` / `0.0`. Missing cells,
    /// out-of-range rows and non-numeric columns yield `NaN`.
    pub fn get_double(&self, row: usize) -> f64 {
        match &self.data {
            ColumnData::Double(v) => v.get(row).copied().unwrap_or(f64::NAN),
            ColumnData::Integer(v) => match v.get(row) {
                Some(x) if *x != INTEGER_MISSING => *x as f64,
                _ => f64::NAN,
            },
            ColumnData::Boolean(v) => match v.get(row) {
                Some(Some(true)) => 1.0,
                Some(Some(false)) => 0.0,
                _ => f64::NAN,
            },
            ColumnData::String(_) | ColumnData::DateTime(_) => f64::NAN,
        }
    }

    /// True when the column has a numeric view (see [`Column::get_double`]).
    pub fn has_numeric_view(&self) -> bool {
        matches!(
            self.data,
            ColumnData::Double(_) | ColumnData::Integer(_) | ColumnData::Boolean(_)
        )
    }

    /// Iterates the numeric view of every row, missing cells included as `NaN`.
    pub fn double_values(&self) -> impl Iterator<Item = f64> + '_ {
        (0..self.size()).map(move |row| self.get_double(row))
    }

    pub fn get_string(&self, row: usize) -> Option<&str> {
        match &self.data {
            ColumnData::String(v) => v.get(row).and_then(|s| s.as_deref()),
            _ => None,
        }
    }

    pub fn get_boolean(&self, row: usize) -> Option<bool> {
        match &self.data {
            ColumnData::Boolean(v) => v.get(row).copied().flatten(),
            _ => None,
        }
    }

    /// The packed date-time at `row`; [`PackedDateTime::MISSING`] for missing
    /// cells, out-of-range rows and non-temporal columns.
    pub fn get_packed(&self, row: usize) -> PackedDateTime {
        match &self.data {
            ColumnData::DateTime(v) => v.get(row).copied().unwrap_or(PackedDateTime::MISSING),
            _ => PackedDateTime::MISSING,
        }
    }

    pub fn is_missing(&self, row: usize) -> bool {
        self.value(row).is_none()
    }

    pub fn count_missing(&self) -> usize {
        (0..self.size()).filter(|row| self.is_missing(*row)).count()
    }

    /// The hashable key of the cell at `row`.
    pub fn key_at(&self, row: usize) -> KeyPart {
        match self.value(row) {
            None => KeyPart::Missing,
            // -0.0 and 0.0 are the same group.
            Some(Value::Double(x)) => KeyPart::Double((x + 0.0).to_bits()),
            Some(Value::Integer(x)) => KeyPart::Integer(x),
            Some(Value::Boolean(b)) => KeyPart::Boolean(b),
            Some(Value::String(s)) => KeyPart::String(s),
            Some(Value::DateTime(dt)) => KeyPart::DateTime(dt.raw()),
        }
    }

    /// Appends one cell. `None` appends the column's missing marker.
    pub fn push(&mut self, value: Option<Value>) -> Result<()> {
        let column_type = self.column_type();
        match (&mut self.data, value) {
            (ColumnData::Double(v), None) => v.push(f64::NAN),
            (ColumnData::Double(v), Some(Value::Double(x))) => v.push(x),
            (ColumnData::Double(v), Some(Value::Integer(x))) => v.push(x as f64),
            (ColumnData::Integer(v), None) => v.push(INTEGER_MISSING),
            (ColumnData::Integer(v), Some(Value::Integer(x))) => v.push(x),
            (ColumnData::Boolean(v), None) => v.push(None),
            (ColumnData::Boolean(v), Some(Value::Boolean(b))) => v.push(Some(b)),
            (ColumnData::String(v), None) => v.push(None),
            (ColumnData::String(v), Some(Value::String(s))) => v.push(Some(s)),
            (ColumnData::DateTime(v), None) => v.push(PackedDateTime::MISSING),
            (ColumnData::DateTime(v), Some(Value::DateTime(dt))) => v.push(dt),
            (_, Some(other)) => {
                return Err(TableError::TypeMismatch {
                    column: self.name.clone(),
                    expected: column_type.to_string(),
                    actual: other.column_type(),
                })
            }
        }
        Ok(())
    }

    /// A new column holding only the selected rows, in ascending row order.
    pub fn where_rows(&self, selection: &Selection) -> Column {
        fn pick<T: Clone>(values: &[T], selection: &Selection) -> Vec<T> {
            selection
                .iter()
                .filter_map(|row| values.get(row as usize).cloned())
                .collect()
        }
        let data = match &self.data {
            ColumnData::Double(v) => ColumnData::Double(pick(v, selection)),
            ColumnData::Integer(v) => ColumnData::Integer(pick(v, selection)),
            ColumnData::Boolean(v) => ColumnData::Boolean(pick(v, selection)),
            ColumnData::String(v) => ColumnData::String(pick(v, selection)),
            ColumnData::DateTime(v) => ColumnData::DateTime(pick(v, selection)),
        };
        Column::new(self.name.clone(), data)
    }

    /// Selection of every row in this column.
    pub fn all_rows(&self) -> Selection {
        Selection::with_range(0, self.size() as u32)
    }
}
