//! Predicates over the `f64` view of a column.
use rust_decimal::Decimal;
use std::cmp::Ordering;

/// A test on one numeric cell. `NaN` is the missing marker: every variant
/// except [`NumberPredicate::IsMissing`] answers `false` for it.
#[derive(Clone, Debug, PartialEq)]
pub enum NumberPredicate {
    IsZero,
    IsNegative,
    IsPositive,
    IsNonNegative,
    GreaterThan(f64),
    GreaterThanOrEqualTo(f64),
    LessThan(f64),
    LessThanOrEqualTo(f64),
    EqualTo(f64),
    NotEqualTo(f64),
    /// `start <= x <= end`, compared as exact decimals.
    BetweenInclusive(f64, f64),
    /// `start < x < end`, compared as exact decimals.
    BetweenExclusive(f64, f64),
    IsMissing,
    IsNotMissing,
}

impl NumberPredicate {
    pub fn test(&self, x: f64) -> bool {
        match *self {
            NumberPredicate::IsZero => x == 0.0,
            NumberPredicate::IsNegative => x < 0.0,
            NumberPredicate::IsPositive => x > 0.0,
            NumberPredicate::IsNonNegative => x >= 0.0,
            NumberPredicate::GreaterThan(v) => x > v,
            NumberPredicate::GreaterThanOrEqualTo(v) => x >= v,
            NumberPredicate::LessThan(v) => x < v,
            NumberPredicate::LessThanOrEqualTo(v) => x <= v,
            NumberPredicate::EqualTo(v) => x == v,
            // NaN != v is true in IEEE, so missing cells need the explicit guard.
            NumberPredicate::NotEqualTo(v) => !x.is_nan() && x != v,
            NumberPredicate::BetweenInclusive(start, end) => {
                matches!(exact_cmp(x, start), Some(Ordering::Greater | Ordering::Equal))
                    && matches!(exact_cmp(x, end), Some(Ordering::Less | Ordering::Equal))
            }
            NumberPredicate::BetweenExclusive(start, end) => {
                exact_cmp(x, start) == Some(Ordering::Greater)
                    && exact_cmp(x, end) == Some(Ordering::Less)
            }
            #[allow(clippy::eq_op)]
            NumberPredicate::IsMissing => x != x,
            NumberPredicate::IsNotMissing => !x.is_nan(),
        }
    }

    /// Short name used in trace output.
    pub fn name(&self) -> &'static str {
        match self {
            NumberPredicate::IsZero => "is_zero",
            NumberPredicate::IsNegative => "is_negative",
            NumberPredicate::IsPositive => "is_positive",
            NumberPredicate::IsNonNegative => "is_non_negative",
            NumberPredicate::GreaterThan(_) => "is_greater_than",
            NumberPredicate::GreaterThanOrEqualTo(_) => "is_greater_than_or_equal_to",
            NumberPredicate::LessThan(_) => "is_less_than",
            NumberPredicate::LessThanOrEqualTo(_) => "is_less_than_or_equal_to",
            NumberPredicate::EqualTo(_) => "is_equal_to",
            NumberPredicate::NotEqualTo(_) => "is_not_equal_to",
            NumberPredicate::BetweenInclusive(..) => "is_between_inclusive",
            NumberPredicate::BetweenExclusive(..) => "is_between_exclusive",
            NumberPredicate::IsMissing => "is_missing",
            NumberPredicate::IsNotMissing => "is_not_missing",
        }
    }
}

/// Compares the exact decimal expansions of two doubles.
///
/// Falls back to IEEE ordering when either side has no decimal form (NaN,
/// infinities, magnitudes beyond `Decimal::MAX`) or when the decimal forms
/// round to the same value for two distinct doubles.
fn exact_cmp(a: f64, b: f64) -> Option<Ordering> {
    match (Decimal::from_f64_retain(a), Decimal::from_f64_retain(b)) {
        (Some(da), Some(db)) => match da.cmp(&db) {
            Ordering::Equal if a != b => a.partial_cmp(&b),
            ordering => Some(ordering),
        },
        _ => a.partial_cmp(&b),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sign_predicates() {
        let values = [1.0, -2.0, f64::NAN, 0.0];
        let pick = |p: NumberPredicate| -> Vec<usize> {
            values
                .iter()
                .enumerate()
                .filter(|(_, x)| p.test(**x))
                .map(|(i, _)| i)
                .collect()
        };
        assert_eq!(pick(NumberPredicate::IsNonNegative), vec![0, 3]);
        assert_eq!(pick(NumberPredicate::IsNegative), vec![1]);
        assert_eq!(pick(NumberPredicate::IsPositive), vec![0]);
        assert_eq!(pick(NumberPredicate::IsZero), vec![3]);
        assert_eq!(pick(NumberPredicate::IsMissing), vec![2]);
        assert_eq!(pick(NumberPredicate::IsNotMissing), vec![0, 1, 3]);
    }

    #[test]
    fn missing_never_matches_comparisons() {
        let nan = f64::NAN;
        for p in [
            NumberPredicate::GreaterThan(0.0),
            NumberPredicate::GreaterThanOrEqualTo(0.0),
            NumberPredicate::LessThan(0.0),
            NumberPredicate::LessThanOrEqualTo(0.0),
            NumberPredicate::EqualTo(0.0),
            NumberPredicate::NotEqualTo(0.0),
            NumberPredicate::BetweenInclusive(-1.0, 1.0),
            NumberPredicate::BetweenExclusive(-1.0, 1.0),
        ] {
            assert!(!p.test(nan), "{} matched NaN", p.name());
        }
    }

    #[test]
    fn comparisons() {
        assert!(NumberPredicate::GreaterThan(1.0).test(1.5));
        assert!(!NumberPredicate::GreaterThan(1.5).test(1.5));
        assert!(NumberPredicate::GreaterThanOrEqualTo(1.5).test(1.5));
        assert!(NumberPredicate::LessThan(2.0).test(1.5));
        assert!(NumberPredicate::LessThanOrEqualTo(1.5).test(1.5));
        assert!(NumberPredicate::EqualTo(1.5).test(1.5));
        assert!(NumberPredicate::NotEqualTo(1.5).test(2.5));
        assert!(!NumberPredicate::NotEqualTo(1.5).test(1.5));
    }

    #[test]
    fn range_bounds() {
        let inclusive = NumberPredicate::BetweenInclusive(0.1, 0.3);
        let exclusive = NumberPredicate::BetweenExclusive(0.1, 0.3);
        assert!(inclusive.test(0.1) && inclusive.test(0.3) && inclusive.test(0.2));
        assert!(!exclusive.test(0.1) && !exclusive.test(0.3) && exclusive.test(0.2));
        // 0.1 + 0.2 lands just above the double nearest 0.3.
        assert!(!inclusive.test(0.1 + 0.2));
        assert!(!inclusive.test(f64::INFINITY));
        assert!(NumberPredicate::BetweenInclusive(0.0, f64::INFINITY).test(1e300));
    }
}
