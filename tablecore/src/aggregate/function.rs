//! Named, type-gated column reductions.
use crate::{
    column::{Column, KeyPart},
    types::ColumnType,
};
use std::{collections::HashSet, fmt};

/// Reduces a column to a single `f64`.
///
/// Implementations must be stateless: the summarizer applies one function
/// value to many columns and many groups.
pub trait AggregateFunction: fmt::Debug + Send + Sync {
    /// Name used in output column headers, e.g. `"Mean"`.
    fn function_name(&self) -> &str;

    /// Whether this function can reduce columns of `column_type`.
    fn is_compatible_with(&self, column_type: ColumnType) -> bool;

    fn summarize(&self, column: &Column) -> f64;
}

/// The built-in aggregate functions.
///
/// Numeric reductions read the `f64` view of double and integer columns and
/// skip missing cells.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Aggregate {
    Sum,
    Mean,
    Min,
    Max,
    Range,
    Median,
    /// Sample variance (`n - 1` denominator).
    Variance,
    /// Sample standard deviation.
    StdDev,
    Product,
    /// First non-missing value in row order.
    First,
    /// Last non-missing value in row order.
    Last,
    /// Number of non-missing cells.
    Count,
    CountMissing,
    /// Number of distinct non-missing values.
    CountUnique,
    CountTrue,
    /// `CountTrue` over the non-missing cells.
    ProportionTrue,
}

impl Aggregate {
    pub const ALL: [Aggregate; 16] = [
        Aggregate::Sum,
        Aggregate::Mean,
        Aggregate::Min,
        Aggregate::Max,
        Aggregate::Range,
        Aggregate::Median,
        Aggregate::Variance,
        Aggregate::StdDev,
        Aggregate::Product,
        Aggregate::First,
        Aggregate::Last,
        Aggregate::Count,
        Aggregate::CountMissing,
        Aggregate::CountUnique,
        Aggregate::CountTrue,
        Aggregate::ProportionTrue,
    ];
}

impl AggregateFunction for Aggregate {
    fn function_name(&self) -> &str {
        match self {
            Aggregate::Sum => "Sum",
            Aggregate::Mean => "Mean",
            Aggregate::Min => "Min",
            Aggregate::Max => "Max",
            Aggregate::Range => "Range",
            Aggregate::Median => "Median",
            Aggregate::Variance => "Variance",
            Aggregate::StdDev => "Std. Deviation",
            Aggregate::Product => "Product",
            Aggregate::First => "First",
            Aggregate::Last => "Last",
            Aggregate::Count => "Count",
            Aggregate::CountMissing => "Missing Values",
            Aggregate::CountUnique => "Count Unique",
            Aggregate::CountTrue => "Number True",
            Aggregate::ProportionTrue => "Proportion True",
        }
    }

    fn is_compatible_with(&self, column_type: ColumnType) -> bool {
        match self {
            Aggregate::Count | Aggregate::CountMissing | Aggregate::CountUnique => true,
            Aggregate::CountTrue | Aggregate::ProportionTrue => column_type == ColumnType::Boolean,
            _ => column_type.is_numeric(),
        }
    }

    fn summarize(&self, column: &Column) -> f64 {
        match self {
            Aggregate::Sum => present(column).sum(),
            Aggregate::Mean => mean(&present(column).collect::<Vec<_>>()),
            Aggregate::Min => present(column).reduce(f64::min).unwrap_or(f64::NAN),
            Aggregate::Max => present(column).reduce(f64::max).unwrap_or(f64::NAN),
            Aggregate::Range => {
                let min = Aggregate::Min.summarize(column);
                let max = Aggregate::Max.summarize(column);
                max - min
            }
            Aggregate::Median => median(present(column).collect()),
            Aggregate::Variance => variance(&present(column).collect::<Vec<_>>()),
            Aggregate::StdDev => variance(&present(column).collect::<Vec<_>>()).sqrt(),
            Aggregate::Product => present(column).product(),
            Aggregate::First => present(column).next().unwrap_or(f64::NAN),
            Aggregate::Last => present(column).last().unwrap_or(f64::NAN),
            Aggregate::Count => (column.size() - column.count_missing()) as f64,
            Aggregate::CountMissing => column.count_missing() as f64,
            Aggregate::CountUnique => {
                let distinct: HashSet<KeyPart> = (0..column.size())
                    .map(|row| column.key_at(row))
                    .filter(|key| *key != KeyPart::Missing)
                    .collect();
                distinct.len() as f64
            }
            Aggregate::CountTrue => count_true(column) as f64,
            Aggregate::ProportionTrue => {
                let present = column.size() - column.count_missing();
                if present == 0 {
                    f64::NAN
                } else {
                    count_true(column) as f64 / present as f64
                }
            }
        }
    }
}

impl fmt::Display for Aggregate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.function_name())
    }
}

fn present(column: &Column) -> impl Iterator<Item = f64> + '_ {
    column.double_values().filter(|x| !x.is_nan())
}

fn count_true(column: &Column) -> usize {
    (0..column.size())
        .filter(|row| column.get_boolean(*row) == Some(true))
        .count()
}

fn mean(values: &[f64]) -> f64 {
    if values.is_empty() {
        return f64::NAN;
    }
    values.iter().sum::<f64>() / values.len() as f64
}

fn median(mut values: Vec<f64>) -> f64 {
    if values.is_empty() {
        return f64::NAN;
    }
    values.sort_by(f64::total_cmp);
    let mid = values.len() / 2;
    if values.len() % 2 == 0 {
        (values[mid - 1] + values[mid]) / 2.0
    } else {
        values[mid]
    }
}

/// Two-pass sample variance. A single value has variance zero.
fn variance(values: &[f64]) -> f64 {
    match values.len() {
        0 => f64::NAN,
        1 => 0.0,
        n => {
            let m = mean(values);
            values.iter().map(|x| (x - m) * (x - m)).sum::<f64>() / (n - 1) as f64
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::column::INTEGER_MISSING;

    fn close(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-9
    }

    #[test]
    fn numeric_reductions_skip_missing() {
        let column = Column::doubles("x", vec![4.0, f64::NAN, 1.0, 3.0, 2.0]);
        assert_eq!(Aggregate::Sum.summarize(&column), 10.0);
        assert_eq!(Aggregate::Mean.summarize(&column), 2.5);
        assert_eq!(Aggregate::Min.summarize(&column), 1.0);
        assert_eq!(Aggregate::Max.summarize(&column), 4.0);
        assert_eq!(Aggregate::Range.summarize(&column), 3.0);
        assert_eq!(Aggregate::Median.summarize(&column), 2.5);
        assert!(close(Aggregate::Variance.summarize(&column), 5.0 / 3.0));
        assert!(close(Aggregate::StdDev.summarize(&column), (5.0f64 / 3.0).sqrt()));
        assert_eq!(Aggregate::Product.summarize(&column), 24.0);
        assert_eq!(Aggregate::First.summarize(&column), 4.0);
        assert_eq!(Aggregate::Last.summarize(&column), 2.0);
        assert_eq!(Aggregate::Count.summarize(&column), 4.0);
        assert_eq!(Aggregate::CountMissing.summarize(&column), 1.0);
    }

    #[test]
    fn integers_use_numeric_view() {
        let column = Column::integers("n", vec![5, INTEGER_MISSING, 5, 1]);
        assert_eq!(Aggregate::Sum.summarize(&column), 11.0);
        assert_eq!(Aggregate::Median.summarize(&column), 5.0);
        assert_eq!(Aggregate::CountUnique.summarize(&column), 2.0);
    }

    #[test]
    fn empty_and_single_inputs() {
        let empty = Column::doubles("e", Vec::new());
        assert_eq!(Aggregate::Sum.summarize(&empty), 0.0);
        assert_eq!(Aggregate::Product.summarize(&empty), 1.0);
        assert_eq!(Aggregate::Count.summarize(&empty), 0.0);
        for f in [
            Aggregate::Mean,
            Aggregate::Min,
            Aggregate::Max,
            Aggregate::Median,
            Aggregate::Variance,
            Aggregate::First,
        ] {
            assert!(f.summarize(&empty).is_nan(), "{f} of empty column");
        }

        let single = Column::doubles("s", vec![7.0]);
        assert_eq!(Aggregate::Variance.summarize(&single), 0.0);
        assert_eq!(Aggregate::StdDev.summarize(&single), 0.0);
    }

    #[test]
    fn boolean_functions() {
        let column = Column::booleans("b", vec![Some(true), None, Some(false), Some(true)]);
        assert_eq!(Aggregate::CountTrue.summarize(&column), 2.0);
        assert!(close(Aggregate::ProportionTrue.summarize(&column), 2.0 / 3.0));
        assert_eq!(Aggregate::CountMissing.summarize(&column), 1.0);
        assert!(Aggregate::ProportionTrue
            .summarize(&Column::booleans("none", vec![None]))
            .is_nan());
    }

    #[test]
    fn compatibility() {
        assert!(Aggregate::Mean.is_compatible_with(ColumnType::Double));
        assert!(Aggregate::Mean.is_compatible_with(ColumnType::Integer));
        assert!(!Aggregate::Mean.is_compatible_with(ColumnType::String));
        assert!(!Aggregate::Sum.is_compatible_with(ColumnType::Boolean));
        assert!(Aggregate::CountUnique.is_compatible_with(ColumnType::String));
        assert!(Aggregate::Count.is_compatible_with(ColumnType::DateTime));
        assert!(Aggregate::CountTrue.is_compatible_with(ColumnType::Boolean));
        assert!(!Aggregate::CountTrue.is_compatible_with(ColumnType::Integer));
    }

    #[test]
    fn count_unique_on_strings() {
        let column = Column::optional_strings("s", vec![Some("a"), None, Some("b"), Some("a"), None]);
        assert_eq!(Aggregate::CountUnique.summarize(&column), 2.0);
        assert_eq!(Aggregate::Count.summarize(&column), 3.0);
    }

    #[test]
    fn names() {
        assert_eq!(Aggregate::StdDev.function_name(), "Std. Deviation");
        assert_eq!(Aggregate::CountMissing.to_string(), "Missing Values");
        let names: HashSet<&str> = Aggregate::ALL.iter().map(|f| f.function_name()).collect();
        assert_eq!(names.len(), Aggregate::ALL.len());
    }
}
