//! Composable row filters.
//!
//! A [`Filter`] is a tree whose leaves test the cells of one column and whose
//! inner nodes combine child selections with NOT / AND / OR. Evaluating a
//! filter against a [`Table`] or a single [`Column`] yields the [`Selection`]
//! of matching row indices. Filters hold no evaluation state, so the same
//! filter can be applied any number of times, to any number of tables.
//!
//! Missing cells never raise errors: leaves simply do not select them unless
//! the predicate asks for missing values explicitly. Errors are reserved for
//! unknown column names, predicates applied to a column of the wrong type and
//! unresolvable or mis-sized column operands.
use crate::{
    column::Column,
    error::{Result, TableError},
    selection::Selection,
    table::Table,
    temporal::PackedDateTime,
    types::ColumnType,
};
use chrono::{Month, Weekday};
use tracing::trace;

pub mod date_time;
pub mod numeric;
pub mod strings;

pub use date_time::DateTimePredicate;
pub use numeric::NumberPredicate;
pub use strings::{StringPairPredicate, StringPredicate};

/// A predicate tree evaluated post-order into a [`Selection`].
#[derive(Clone, Debug)]
pub enum Filter {
    Leaf(Leaf),
    /// Rows not selected by the child.
    Not(Box<Filter>),
    /// Rows selected by both children.
    And(Box<Filter>, Box<Filter>),
    /// Rows selected by either child.
    Or(Box<Filter>, Box<Filter>),
}

/// A predicate bound to a column name.
#[derive(Clone, Debug)]
pub struct Leaf {
    pub column: String,
    pub predicate: Predicate,
}

#[derive(Clone, Debug)]
pub enum Predicate {
    /// Tests the `f64` view of a double, integer or boolean column.
    Number(NumberPredicate),
    String(StringPredicate),
    /// Tests each string cell against the cell in the same row of `other`.
    StringPair {
        other: ColumnOperand,
        predicate: StringPairPredicate,
    },
    DateTime(DateTimePredicate),
}

/// The second column of a column-to-column predicate.
#[derive(Clone, Debug)]
pub enum ColumnOperand {
    /// Looked up by name in the table being filtered.
    Named(String),
    /// A concrete column, paired row by row.
    Values(Column),
}

impl From<&str> for ColumnOperand {
    fn from(name: &str) -> Self {
        ColumnOperand::Named(name.to_string())
    }
}

impl From<String> for ColumnOperand {
    fn from(name: String) -> Self {
        ColumnOperand::Named(name)
    }
}

impl From<Column> for ColumnOperand {
    fn from(column: Column) -> Self {
        ColumnOperand::Values(column)
    }
}

impl Filter {
    pub fn leaf(column: impl Into<String>, predicate: Predicate) -> Self {
        Filter::Leaf(Leaf {
            column: column.into(),
            predicate,
        })
    }

    /// Starts a numeric leaf on `column`.
    pub fn number(column: impl Into<String>) -> NumberColumnRef {
        NumberColumnRef(column.into())
    }

    /// Starts a string leaf on `column`.
    pub fn string(column: impl Into<String>) -> StringColumnRef {
        StringColumnRef(column.into())
    }

    /// Starts a date-time leaf on `column`.
    pub fn date_time(column: impl Into<String>) -> DateTimeColumnRef {
        DateTimeColumnRef(column.into())
    }

    pub fn and(self, other: Filter) -> Filter {
        Filter::And(Box::new(self), Box::new(other))
    }

    pub fn or(self, other: Filter) -> Filter {
        Filter::Or(Box::new(self), Box::new(other))
    }

    /// Evaluates this filter against `table`, resolving leaves by column name.
    pub fn apply_table(&self, table: &Table) -> Result<Selection> {
        let selection = match self {
            Filter::Leaf(leaf) => {
                let column = table.column(&leaf.column)?;
                leaf.predicate.evaluate(column, Some(table))?
            }
            Filter::Not(child) => {
                let mut full = table.all_rows();
                full.and_not(&child.apply_table(table)?);
                full
            }
            Filter::And(left, right) => {
                let mut selection = left.apply_table(table)?;
                if selection.is_empty() {
                    right.check_table(table)?;
                } else {
                    selection.and(&right.apply_table(table)?);
                }
                selection
            }
            Filter::Or(left, right) => {
                let mut selection = left.apply_table(table)?;
                selection.or(&right.apply_table(table)?);
                selection
            }
        };
        trace!(node = self.kind(), table = %table.name(), matched = selection.size(), "Evaluated filter node");
        Ok(selection)
    }

    /// Evaluates this filter against a single column. Leaf column names are
    /// ignored; every leaf tests `column`.
    ///
    /// Column-pair leaves must carry a concrete [`ColumnOperand::Values`]
    /// operand here, since there is no table to look a name up in.
    pub fn apply_column(&self, column: &Column) -> Result<Selection> {
        let selection = match self {
            Filter::Leaf(leaf) => leaf.predicate.evaluate(column, None)?,
            Filter::Not(child) => {
                let mut full = column.all_rows();
                full.and_not(&child.apply_column(column)?);
                full
            }
            Filter::And(left, right) => {
                let mut selection = left.apply_column(column)?;
                if selection.is_empty() {
                    right.check_column(column)?;
                } else {
                    selection.and(&right.apply_column(column)?);
                }
                selection
            }
            Filter::Or(left, right) => {
                let mut selection = left.apply_column(column)?;
                selection.or(&right.apply_column(column)?);
                selection
            }
        };
        trace!(node = self.kind(), column = %column.name(), matched = selection.size(), "Evaluated filter node");
        Ok(selection)
    }

    /// Checks every leaf against the schema of `table` without scanning rows.
    /// Reports the same errors [`Filter::apply_table`] would.
    pub fn check_table(&self, table: &Table) -> Result<()> {
        match self {
            Filter::Leaf(leaf) => leaf.predicate.check(table.column(&leaf.column)?, Some(table)),
            Filter::Not(child) => child.check_table(table),
            Filter::And(left, right) | Filter::Or(left, right) => {
                left.check_table(table)?;
                right.check_table(table)
            }
        }
    }

    /// Checks every leaf against `column` without scanning rows.
    pub fn check_column(&self, column: &Column) -> Result<()> {
        match self {
            Filter::Leaf(leaf) => leaf.predicate.check(column, None),
            Filter::Not(child) => child.check_column(column),
            Filter::And(left, right) | Filter::Or(left, right) => {
                left.check_column(column)?;
                right.check_column(column)
            }
        }
    }

    fn kind(&self) -> &'static str {
        match self {
            Filter::Leaf(leaf) => leaf.predicate.name(),
            Filter::Not(_) => "not",
            Filter::And(..) => "and",
            Filter::Or(..) => "or",
        }
    }
}

impl std::ops::Not for Filter {
    type Output = Filter;

    fn not(self) -> Filter {
        Filter::Not(Box::new(self))
    }
}

impl Predicate {
    pub fn name(&self) -> &'static str {
        match self {
            Predicate::Number(p) => p.name(),
            Predicate::String(p) => p.name(),
            Predicate::StringPair { predicate, .. } => predicate.name(),
            Predicate::DateTime(p) => p.name(),
        }
    }

    /// Checks that `column` suits this predicate and that a pair operand
    /// resolves to a string column of the same length.
    fn check(&self, column: &Column, table: Option<&Table>) -> Result<()> {
        match self {
            Predicate::Number(_) => {
                if column.has_numeric_view() {
                    Ok(())
                } else {
                    Err(type_mismatch(column, "numeric"))
                }
            }
            Predicate::String(_) => expect_type(column, ColumnType::String),
            Predicate::StringPair { other, .. } => {
                expect_type(column, ColumnType::String)?;
                let other = resolve_operand(other, table)?;
                expect_type(other, ColumnType::String)?;
                if other.size() != column.size() {
                    return Err(TableError::ColumnLengthMismatch {
                        column: other.name().to_string(),
                        expected: column.size(),
                        actual: other.size(),
                    });
                }
                Ok(())
            }
            Predicate::DateTime(_) => expect_type(column, ColumnType::DateTime),
        }
    }

    /// Tests every row of `column`. `table` resolves named column operands.
    fn evaluate(&self, column: &Column, table: Option<&Table>) -> Result<Selection> {
        self.check(column, table)?;
        let selection = match self {
            Predicate::Number(p) => select_rows(column.size(), |row| p.test(column.get_double(row))),
            Predicate::String(p) => select_rows(column.size(), |row| p.test(column.get_string(row))),
            Predicate::StringPair { other, predicate } => {
                let other = resolve_operand(other, table)?;
                select_rows(column.size(), |row| {
                    predicate.test(column.get_string(row), other.get_string(row))
                })
            }
            Predicate::DateTime(p) => select_rows(column.size(), |row| p.test(column.get_packed(row))),
        };
        Ok(selection)
    }
}

fn resolve_operand<'t>(operand: &'t ColumnOperand, table: Option<&'t Table>) -> Result<&'t Column> {
    match operand {
        ColumnOperand::Named(name) => table
            .ok_or_else(|| TableError::UnresolvedColumnReference(name.clone()))?
            .column(name),
        ColumnOperand::Values(values) => Ok(values),
    }
}

fn select_rows(size: usize, matches: impl Fn(usize) -> bool) -> Selection {
    (0..size)
        .filter(|row| matches(*row))
        .map(|row| row as u32)
        .collect()
}

fn expect_type(column: &Column, expected: ColumnType) -> Result<()> {
    if column.column_type() == expected {
        Ok(())
    } else {
        Err(type_mismatch(column, &expected.to_string()))
    }
}

fn type_mismatch(column: &Column, expected: &str) -> TableError {
    TableError::TypeMismatch {
        column: column.name().to_string(),
        expected: expected.to_string(),
        actual: column.column_type(),
    }
}

// --- Leaf builders ---

/// Builds numeric leaves for one column. See [`Filter::number`].
#[derive(Clone, Debug)]
pub struct NumberColumnRef(String);

impl NumberColumnRef {
    fn leaf(self, predicate: NumberPredicate) -> Filter {
        Filter::leaf(self.0, Predicate::Number(predicate))
    }

    pub fn is_zero(self) -> Filter {
        self.leaf(NumberPredicate::IsZero)
    }

    pub fn is_negative(self) -> Filter {
        self.leaf(NumberPredicate::IsNegative)
    }

    pub fn is_positive(self) -> Filter {
        self.leaf(NumberPredicate::IsPositive)
    }

    pub fn is_non_negative(self) -> Filter {
        self.leaf(NumberPredicate::IsNonNegative)
    }

    pub fn is_greater_than(self, value: f64) -> Filter {
        self.leaf(NumberPredicate::GreaterThan(value))
    }

    pub fn is_greater_than_or_equal_to(self, value: f64) -> Filter {
        self.leaf(NumberPredicate::GreaterThanOrEqualTo(value))
    }

    pub fn is_less_than(self, value: f64) -> Filter {
        self.leaf(NumberPredicate::LessThan(value))
    }

    pub fn is_less_than_or_equal_to(self, value: f64) -> Filter {
        self.leaf(NumberPredicate::LessThanOrEqualTo(value))
    }

    pub fn is_equal_to(self, value: f64) -> Filter {
        self.leaf(NumberPredicate::EqualTo(value))
    }

    pub fn is_not_equal_to(self, value: f64) -> Filter {
        self.leaf(NumberPredicate::NotEqualTo(value))
    }

    pub fn is_between_inclusive(self, start: f64, end: f64) -> Filter {
        self.leaf(NumberPredicate::BetweenInclusive(start, end))
    }

    pub fn is_between_exclusive(self, start: f64, end: f64) -> Filter {
        self.leaf(NumberPredicate::BetweenExclusive(start, end))
    }

    pub fn is_missing(self) -> Filter {
        self.leaf(NumberPredicate::IsMissing)
    }

    pub fn is_not_missing(self) -> Filter {
        self.leaf(NumberPredicate::IsNotMissing)
    }
}

/// Builds string leaves for one column. See [`Filter::string`].
#[derive(Clone, Debug)]
pub struct StringColumnRef(String);

impl StringColumnRef {
    fn leaf(self, predicate: StringPredicate) -> Filter {
        Filter::leaf(self.0, Predicate::String(predicate))
    }

    fn pair(self, other: impl Into<ColumnOperand>, predicate: StringPairPredicate) -> Filter {
        Filter::leaf(
            self.0,
            Predicate::StringPair {
                other: other.into(),
                predicate,
            },
        )
    }

    pub fn is_equal_to(self, value: impl Into<String>) -> Filter {
        self.leaf(StringPredicate::EqualTo(value.into()))
    }

    pub fn is_not_equal_to(self, value: impl Into<String>) -> Filter {
        self.leaf(StringPredicate::NotEqualTo(value.into()))
    }

    pub fn equals_ignore_case(self, value: impl Into<String>) -> Filter {
        self.leaf(StringPredicate::EqualToIgnoringCase(value.into()))
    }

    pub fn contains_string(self, value: impl Into<String>) -> Filter {
        self.leaf(StringPredicate::Contains(value.into()))
    }

    pub fn starts_with(self, value: impl Into<String>) -> Filter {
        self.leaf(StringPredicate::StartsWith(value.into()))
    }

    pub fn ends_with(self, value: impl Into<String>) -> Filter {
        self.leaf(StringPredicate::EndsWith(value.into()))
    }

    pub fn is_in<S: Into<String>>(self, values: impl IntoIterator<Item = S>) -> Filter {
        self.leaf(StringPredicate::is_in(values))
    }

    pub fn is_not_in<S: Into<String>>(self, values: impl IntoIterator<Item = S>) -> Filter {
        self.leaf(StringPredicate::is_not_in(values))
    }

    /// Fails with [`TableError::InvalidRegex`] when `pattern` does not compile.
    pub fn matches_regex(self, pattern: &str) -> Result<Filter> {
        Ok(self.leaf(StringPredicate::matches_regex(pattern)?))
    }

    pub fn is_upper_case(self) -> Filter {
        self.leaf(StringPredicate::IsUpperCase)
    }

    pub fn is_lower_case(self) -> Filter {
        self.leaf(StringPredicate::IsLowerCase)
    }

    pub fn is_alpha(self) -> Filter {
        self.leaf(StringPredicate::IsAlpha)
    }

    pub fn is_alpha_numeric(self) -> Filter {
        self.leaf(StringPredicate::IsAlphaNumeric)
    }

    pub fn is_numeric(self) -> Filter {
        self.leaf(StringPredicate::IsNumeric)
    }

    pub fn is_empty_string(self) -> Filter {
        self.leaf(StringPredicate::IsEmptyString)
    }

    pub fn is_longer_than(self, length: usize) -> Filter {
        self.leaf(StringPredicate::IsLongerThan(length))
    }

    pub fn is_shorter_than(self, length: usize) -> Filter {
        self.leaf(StringPredicate::IsShorterThan(length))
    }

    pub fn length_equals(self, length: usize) -> Filter {
        self.leaf(StringPredicate::LengthEqualTo(length))
    }

    pub fn is_missing(self) -> Filter {
        self.leaf(StringPredicate::IsMissing)
    }

    pub fn is_not_missing(self) -> Filter {
        self.leaf(StringPredicate::IsNotMissing)
    }

    pub fn is_equal_to_column(self, other: impl Into<ColumnOperand>) -> Filter {
        self.pair(other, StringPairPredicate::EqualTo)
    }

    pub fn is_not_equal_to_column(self, other: impl Into<ColumnOperand>) -> Filter {
        self.pair(other, StringPairPredicate::NotEqualTo)
    }

    pub fn equals_ignore_case_column(self, other: impl Into<ColumnOperand>) -> Filter {
        self.pair(other, StringPairPredicate::EqualToIgnoringCase)
    }

    pub fn starts_with_column(self, other: impl Into<ColumnOperand>) -> Filter {
        self.pair(other, StringPairPredicate::StartsWith)
    }

    pub fn ends_with_column(self, other: impl Into<ColumnOperand>) -> Filter {
        self.pair(other, StringPairPredicate::EndsWith)
    }

    pub fn contains_column(self, other: impl Into<ColumnOperand>) -> Filter {
        self.pair(other, StringPairPredicate::Contains)
    }
}

/// Builds date-time leaves for one column. See [`Filter::date_time`].
#[derive(Clone, Debug)]
pub struct DateTimeColumnRef(String);

impl DateTimeColumnRef {
    fn leaf(self, predicate: DateTimePredicate) -> Filter {
        Filter::leaf(self.0, Predicate::DateTime(predicate))
    }

    pub fn is_after(self, value: impl Into<PackedDateTime>) -> Filter {
        self.leaf(DateTimePredicate::IsAfter(value.into()))
    }

    pub fn is_before(self, value: impl Into<PackedDateTime>) -> Filter {
        self.leaf(DateTimePredicate::IsBefore(value.into()))
    }

    pub fn is_equal_to(self, value: impl Into<PackedDateTime>) -> Filter {
        self.leaf(DateTimePredicate::IsEqualTo(value.into()))
    }

    pub fn is_on_or_after(self, value: impl Into<PackedDateTime>) -> Filter {
        self.leaf(DateTimePredicate::IsOnOrAfter(value.into()))
    }

    pub fn is_on_or_before(self, value: impl Into<PackedDateTime>) -> Filter {
        self.leaf(DateTimePredicate::IsOnOrBefore(value.into()))
    }

    pub fn is_between_inclusive(
        self,
        start: impl Into<PackedDateTime>,
        end: impl Into<PackedDateTime>,
    ) -> Filter {
        self.leaf(DateTimePredicate::IsBetweenInclusive(start.into(), end.into()))
    }

    pub fn is_in_year(self, year: i32) -> Filter {
        self.leaf(DateTimePredicate::IsInYear(year))
    }

    pub fn is_in_month(self, month: Month) -> Filter {
        self.leaf(DateTimePredicate::IsInMonth(month))
    }

    pub fn is_in_quarter(self, quarter: u8) -> Filter {
        self.leaf(DateTimePredicate::IsInQuarter(quarter))
    }

    pub fn is_day_of_week(self, weekday: Weekday) -> Filter {
        self.leaf(DateTimePredicate::IsDayOfWeek(weekday))
    }

    pub fn is_first_day_of_month(self) -> Filter {
        self.leaf(DateTimePredicate::IsFirstDayOfMonth)
    }

    pub fn is_last_day_of_month(self) -> Filter {
        self.leaf(DateTimePredicate::IsLastDayOfMonth)
    }

    pub fn is_midnight(self) -> Filter {
        self.leaf(DateTimePredicate::IsMidnight)
    }

    pub fn is_noon(self) -> Filter {
        self.leaf(DateTimePredicate::IsNoon)
    }

    pub fn is_am(self) -> Filter {
        self.leaf(DateTimePredicate::IsAm)
    }

    pub fn is_pm(self) -> Filter {
        self.leaf(DateTimePredicate::IsPm)
    }

    pub fn is_leap_year(self) -> Filter {
        self.leaf(DateTimePredicate::IsLeapYear)
    }

    pub fn is_missing(self) -> Filter {
        self.leaf(DateTimePredicate::IsMissing)
    }

    pub fn is_not_missing(self) -> Filter {
        self.leaf(DateTimePredicate::IsNotMissing)
    }
}
