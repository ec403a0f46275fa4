//! Predicates over packed date-time cells.
use crate::temporal::PackedDateTime;
use chrono::{Month, Weekday};

/// A test on one packed date-time cell. All variants except
/// [`DateTimePredicate::IsMissing`] answer `false` for the missing sentinel.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum DateTimePredicate {
    IsAfter(PackedDateTime),
    IsBefore(PackedDateTime),
    IsEqualTo(PackedDateTime),
    IsOnOrAfter(PackedDateTime),
    IsOnOrBefore(PackedDateTime),
    IsBetweenInclusive(PackedDateTime, PackedDateTime),
    IsInYear(i32),
    IsInMonth(Month),
    /// Quarter number, `1..=4`.
    IsInQuarter(u8),
    IsDayOfWeek(Weekday),
    IsFirstDayOfMonth,
    IsLastDayOfMonth,
    IsMidnight,
    IsNoon,
    IsAm,
    IsPm,
    IsLeapYear,
    IsMissing,
    IsNotMissing,
}

impl DateTimePredicate {
    pub fn test(&self, value: PackedDateTime) -> bool {
        match *self {
            DateTimePredicate::IsAfter(other) => value.is_after(other),
            DateTimePredicate::IsBefore(other) => value.is_before(other),
            DateTimePredicate::IsEqualTo(other) => value.is_equal_to(other),
            DateTimePredicate::IsOnOrAfter(other) => value.is_on_or_after(other),
            DateTimePredicate::IsOnOrBefore(other) => value.is_on_or_before(other),
            DateTimePredicate::IsBetweenInclusive(start, end) => {
                value.is_on_or_after(start) && value.is_on_or_before(end)
            }
            DateTimePredicate::IsInYear(year) => value.is_in_year(year),
            DateTimePredicate::IsInMonth(month) => value.is_in_month(month),
            DateTimePredicate::IsInQuarter(quarter) => value.is_in_quarter(quarter),
            DateTimePredicate::IsDayOfWeek(weekday) => value.is_day_of_week(weekday),
            DateTimePredicate::IsFirstDayOfMonth => value.is_first_day_of_month(),
            DateTimePredicate::IsLastDayOfMonth => value.is_last_day_of_month(),
            DateTimePredicate::IsMidnight => value.is_midnight(),
            DateTimePredicate::IsNoon => value.is_noon(),
            DateTimePredicate::IsAm => value.is_am(),
            DateTimePredicate::IsPm => value.is_pm(),
            DateTimePredicate::IsLeapYear => value.is_leap_year(),
            DateTimePredicate::IsMissing => value.is_missing(),
            DateTimePredicate::IsNotMissing => !value.is_missing(),
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            DateTimePredicate::IsAfter(_) => "is_after",
            DateTimePredicate::IsBefore(_) => "is_before",
            DateTimePredicate::IsEqualTo(_) => "is_equal_to",
            DateTimePredicate::IsOnOrAfter(_) => "is_on_or_after",
            DateTimePredicate::IsOnOrBefore(_) => "is_on_or_before",
            DateTimePredicate::IsBetweenInclusive(..) => "is_between_inclusive",
            DateTimePredicate::IsInYear(_) => "is_in_year",
            DateTimePredicate::IsInMonth(_) => "is_in_month",
            DateTimePredicate::IsInQuarter(_) => "is_in_quarter",
            DateTimePredicate::IsDayOfWeek(_) => "is_day_of_week",
            DateTimePredicate::IsFirstDayOfMonth => "is_first_day_of_month",
            DateTimePredicate::IsLastDayOfMonth => "is_last_day_of_month",
            DateTimePredicate::IsMidnight => "is_midnight",
            DateTimePredicate::IsNoon => "is_noon",
            DateTimePredicate::IsAm => "is_am",
            DateTimePredicate::IsPm => "is_pm",
            DateTimePredicate::IsLeapYear => "is_leap_year",
            DateTimePredicate::IsMissing => "is_missing",
            DateTimePredicate::IsNotMissing => "is_not_missing",
        }
    }
}
