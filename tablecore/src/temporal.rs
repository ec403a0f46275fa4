//! Packed local date-times.
//!
//! A [`PackedDateTime`] stores a calendar date and a time of day in a single
//! `i64` so that date-time columns are plain `Vec<i64>`-sized arrays and every
//! component query is a shift and a mask.
//!
//! Layout, most significant bits first:
//!
//! ```text
//! | year: i16 | month: u8 | day: u8 | hour: u8 | minute: u8 | millisecond of minute: u16 |
//! |<------------- date: i32 ------->|<------------------- time: i32 ------------------->|
//! ```
//!
//! The millisecond-of-minute field holds `0..=59_999`, so it is read back as an
//! unsigned 16 bit value. Because the hour never exceeds 23, the time half
//! never has its sign bit set and plain `i64` ordering of two packed values is
//! chronological ordering.
//!
//! `i64::MIN` is reserved as the missing value. Every predicate answers
//! `false` for it, ordinal queries answer `-1` and formatting yields an empty
//! string. The interval functions (`days_until` and friends) do **not** check
//! for it; callers must exclude missing operands themselves.
use chrono::{
    DateTime, Datelike, FixedOffset, Month, NaiveDate, NaiveDateTime, NaiveTime, TimeZone,
    Timelike, Utc, Weekday,
};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Days from 0000-01-01 to 1970-01-01 in the proleptic Gregorian calendar.
const DAYS_0000_TO_1970: i64 = 719_528;

/// Days before the first of each month in a non-leap year.
const DAYS_BEFORE_MONTH: [i32; 12] = [0, 31, 59, 90, 120, 151, 181, 212, 243, 273, 304, 334];

const WEEKDAYS: [Weekday; 7] = [
    Weekday::Mon,
    Weekday::Tue,
    Weekday::Wed,
    Weekday::Thu,
    Weekday::Fri,
    Weekday::Sat,
    Weekday::Sun,
];

const MILLIS_PER_MINUTE: i32 = 60_000;

/// A local date-time packed into 64 bits. See the module documentation for
/// the layout.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PackedDateTime(i64);

impl PackedDateTime {
    /// The reserved missing value.
    pub const MISSING: PackedDateTime = PackedDateTime(i64::MIN);

    /// Packs the given components without validating them against the
    /// calendar. `second` and `millisecond` are folded into the
    /// millisecond-of-minute field.
    pub const fn pack(
        year: i16,
        month: u8,
        day: u8,
        hour: u8,
        minute: u8,
        second: u8,
        millisecond: u16,
    ) -> Self {
        let date = pack_date(year, month, day);
        let millis_of_minute = (second as u16).wrapping_mul(1000).wrapping_add(millisecond);
        let time = pack_time(hour, minute, millis_of_minute);
        Self::create(date, time)
    }

    /// Combines an already packed date half and time half.
    pub const fn create(date: i32, time: i32) -> Self {
        PackedDateTime(((date as i64) << 32) | (time as u32 as i64))
    }

    /// Packs a date and a time, returning [`PackedDateTime::MISSING`] if either
    /// part is absent.
    pub fn from_parts(date: Option<NaiveDate>, time: Option<NaiveTime>) -> Self {
        match (date, time) {
            (Some(date), Some(time)) => Self::from(date.and_time(time)),
            _ => Self::MISSING,
        }
    }

    /// Wraps a raw packed value, e.g. one read back from a column buffer.
    pub const fn from_raw(raw: i64) -> Self {
        PackedDateTime(raw)
    }

    pub const fn raw(&self) -> i64 {
        self.0
    }

    pub const fn is_missing(&self) -> bool {
        self.0 == i64::MIN
    }

    /// The packed date half.
    pub const fn date(&self) -> i32 {
        (self.0 >> 32) as i32
    }

    /// The packed time half.
    pub const fn time(&self) -> i32 {
        self.0 as i32
    }

    // --- Conversions ---

    /// Unpacks into a calendar object; `None` for the missing value or for
    /// components that do not form a valid date-time.
    pub fn to_naive_date_time(&self) -> Option<NaiveDateTime> {
        if self.is_missing() {
            return None;
        }
        let date = NaiveDate::from_ymd_opt(
            self.raw_year() as i32,
            self.raw_month() as u32,
            self.raw_day() as u32,
        )?;
        let millis = self.raw_millis_of_minute() as u32;
        date.and_hms_milli_opt(
            self.raw_hour() as u32,
            self.raw_minute() as u32,
            millis / 1000,
            millis % 1000,
        )
    }

    /// Milliseconds since the Unix epoch, interpreting this local date-time at
    /// the given offset.
    pub fn to_epoch_milli(&self, offset: FixedOffset) -> Option<i64> {
        let local = self.to_naive_date_time()?;
        offset
            .from_local_datetime(&local)
            .single()
            .map(|dt| dt.timestamp_millis())
    }

    /// The local date-time at `offset` of an instant given as milliseconds
    /// since the Unix epoch.
    pub fn of_epoch_milli(millis: i64, offset: FixedOffset) -> Self {
        match DateTime::<Utc>::from_timestamp_millis(millis) {
            Some(instant) => Self::from(instant.with_timezone(&offset).naive_local()),
            None => Self::MISSING,
        }
    }

    // --- Date components ---

    /// The year, or `-1` when missing. Note that `-1` is also a legal
    /// proleptic year; use [`PackedDateTime::is_missing`] to tell them apart.
    pub fn year(&self) -> i32 {
        self.checked(|dt| dt.raw_year() as i32)
    }

    /// The month of the year, `1..=12`, or `-1` when missing.
    pub fn month_value(&self) -> i32 {
        self.checked(|dt| dt.raw_month() as i32)
    }

    pub fn month(&self) -> Option<Month> {
        if self.is_missing() {
            return None;
        }
        Month::try_from(self.raw_month()).ok()
    }

    /// The day of the month, `1..=31`, or `-1` when missing.
    pub fn day_of_month(&self) -> i32 {
        self.checked(|dt| dt.raw_day() as i32)
    }

    /// The day of the year, `1..=366`, or `-1` when missing.
    pub fn day_of_year(&self) -> i32 {
        self.checked(|dt| {
            let month = dt.raw_month() as usize;
            let mut before = DAYS_BEFORE_MONTH[(month.clamp(1, 12)) - 1];
            if month > 2 && is_leap(dt.raw_year() as i64) {
                before += 1;
            }
            before + dt.raw_day() as i32
        })
    }

    /// The ISO-8601 week of the week-based year, or `-1` when missing.
    pub fn week_of_year(&self) -> i32 {
        match self.to_naive_date_time() {
            Some(dt) => dt.iso_week().week() as i32,
            None => -1,
        }
    }

    pub fn day_of_week(&self) -> Option<Weekday> {
        if self.is_missing() {
            return None;
        }
        let index = (self.epoch_day() + 3).rem_euclid(7) as usize;
        Some(WEEKDAYS[index])
    }

    /// The quarter of the year, `1..=4`, or `-1` when missing.
    pub fn quarter(&self) -> i32 {
        self.checked(|dt| (dt.raw_month() as i32 - 1) / 3 + 1)
    }

    pub fn is_leap_year(&self) -> bool {
        !self.is_missing() && is_leap(self.raw_year() as i64)
    }

    /// Number of days in this value's month, or `-1` when missing.
    pub fn length_of_month(&self) -> i32 {
        self.checked(|dt| match dt.raw_month() {
            2 if is_leap(dt.raw_year() as i64) => 29,
            2 => 28,
            4 | 6 | 9 | 11 => 30,
            _ => 31,
        })
    }

    /// Number of days in this value's year, or `-1` when missing.
    pub fn length_of_year(&self) -> i32 {
        self.checked(|dt| if dt.is_leap_year() { 366 } else { 365 })
    }

    // --- Time components ---

    pub fn hour(&self) -> i32 {
        self.checked(|dt| dt.raw_hour() as i32)
    }

    pub fn minute(&self) -> i32 {
        self.checked(|dt| dt.raw_minute() as i32)
    }

    pub fn second(&self) -> i32 {
        self.checked(|dt| dt.raw_millis_of_minute() as i32 / 1000)
    }

    pub fn millisecond_of_second(&self) -> i32 {
        self.checked(|dt| dt.raw_millis_of_minute() as i32 % 1000)
    }

    pub fn millisecond_of_minute(&self) -> i32 {
        self.checked(|dt| dt.raw_millis_of_minute() as i32)
    }

    pub fn minute_of_day(&self) -> i32 {
        self.checked(|dt| dt.raw_hour() as i32 * 60 + dt.raw_minute() as i32)
    }

    pub fn second_of_day(&self) -> i32 {
        self.checked(|dt| {
            (dt.raw_hour() as i32 * 60 + dt.raw_minute() as i32) * 60
                + dt.raw_millis_of_minute() as i32 / 1000
        })
    }

    pub fn millisecond_of_day(&self) -> i64 {
        if self.is_missing() {
            return -1;
        }
        let minutes = self.raw_hour() as i64 * 60 + self.raw_minute() as i64;
        minutes * MILLIS_PER_MINUTE as i64 + self.raw_millis_of_minute() as i64
    }

    // --- Comparisons ---

    /// True if `self` is strictly later than `other`. Missing values take part
    /// in no ordering.
    pub fn is_after(&self, other: PackedDateTime) -> bool {
        self.both_present(other) && self.0 > other.0
    }

    pub fn is_before(&self, other: PackedDateTime) -> bool {
        self.both_present(other) && self.0 < other.0
    }

    /// Chronological equality; unlike `==`, two missing values are not equal.
    pub fn is_equal_to(&self, other: PackedDateTime) -> bool {
        self.both_present(other) && self.0 == other.0
    }

    pub fn is_on_or_after(&self, other: PackedDateTime) -> bool {
        self.is_after(other) || self.is_equal_to(other)
    }

    pub fn is_on_or_before(&self, other: PackedDateTime) -> bool {
        self.is_before(other) || self.is_equal_to(other)
    }

    // --- Calendar predicates ---

    pub fn is_in_year(&self, year: i32) -> bool {
        !self.is_missing() && self.raw_year() as i32 == year
    }

    pub fn is_in_month(&self, month: Month) -> bool {
        !self.is_missing() && self.raw_month() as u32 == month.number_from_month()
    }

    /// True if the value falls in quarter `quarter` (`1..=4`).
    pub fn is_in_quarter(&self, quarter: u8) -> bool {
        !self.is_missing() && self.quarter() == quarter as i32
    }

    pub fn is_day_of_week(&self, weekday: Weekday) -> bool {
        self.day_of_week() == Some(weekday)
    }

    pub fn is_first_day_of_month(&self) -> bool {
        !self.is_missing() && self.raw_day() == 1
    }

    pub fn is_last_day_of_month(&self) -> bool {
        !self.is_missing() && self.raw_day() as i32 == self.length_of_month()
    }

    pub fn is_midnight(&self) -> bool {
        !self.is_missing() && self.time() == 0
    }

    pub fn is_noon(&self) -> bool {
        !self.is_missing() && self.time() == pack_time(12, 0, 0)
    }

    /// True before noon. Midnight counts as AM.
    pub fn is_am(&self) -> bool {
        !self.is_missing() && self.raw_hour() < 12
    }

    /// True from noon onwards. Noon counts as PM.
    pub fn is_pm(&self) -> bool {
        !self.is_missing() && self.raw_hour() >= 12
    }

    // --- Intervals ---
    // These read the raw fields and are not missing-value safe.

    /// Whole days from `start` to `self`, ignoring the time of day.
    pub fn days_until(&self, start: PackedDateTime) -> i32 {
        (self.epoch_day() - start.epoch_day()) as i32
    }

    /// Whole weeks from `start` to `self`, truncated toward zero.
    pub fn weeks_until(&self, start: PackedDateTime) -> i32 {
        self.days_until(start) / 7
    }

    /// Whole months from `start` to `self`, truncated toward zero. A month
    /// only counts once the day of month has been reached.
    pub fn months_until(&self, start: PackedDateTime) -> i32 {
        let start = start.proleptic_month() * 32 + start.raw_day() as i32;
        let end = self.proleptic_month() * 32 + self.raw_day() as i32;
        (end - start) / 32
    }

    pub fn years_until(&self, start: PackedDateTime) -> i32 {
        self.months_until(start) / 12
    }

    /// Days since 1970-01-01 of the date half.
    pub fn epoch_day(&self) -> i64 {
        to_epoch_day(
            self.raw_year() as i64,
            self.raw_month() as i64,
            self.raw_day() as i64,
        )
    }

    // --- Raw field access ---

    fn raw_year(&self) -> i16 {
        (self.date() >> 16) as i16
    }

    fn raw_month(&self) -> u8 {
        ((self.date() >> 8) & 0xff) as u8
    }

    fn raw_day(&self) -> u8 {
        (self.date() & 0xff) as u8
    }

    fn raw_hour(&self) -> u8 {
        ((self.time() >> 24) & 0xff) as u8
    }

    fn raw_minute(&self) -> u8 {
        ((self.time() >> 16) & 0xff) as u8
    }

    fn raw_millis_of_minute(&self) -> u16 {
        (self.time() & 0xffff) as u16
    }

    fn proleptic_month(&self) -> i32 {
        self.raw_year() as i32 * 12 + self.raw_month() as i32 - 1
    }

    fn both_present(&self, other: PackedDateTime) -> bool {
        !self.is_missing() && !other.is_missing()
    }

    fn checked(&self, f: impl FnOnce(&Self) -> i32) -> i32 {
        if self.is_missing() {
            -1
        } else {
            f(self)
        }
    }
}

const fn pack_date(year: i16, month: u8, day: u8) -> i32 {
    ((year as i32) << 16) | ((month as i32) << 8) | day as i32
}

const fn pack_time(hour: u8, minute: u8, millis_of_minute: u16) -> i32 {
    ((hour as i32) << 24) | ((minute as i32) << 16) | millis_of_minute as i32
}

fn is_leap(year: i64) -> bool {
    (year & 3) == 0 && (year % 100 != 0 || year % 400 == 0)
}

fn to_epoch_day(year: i64, month: i64, day: i64) -> i64 {
    let mut total = 365 * year;
    if year >= 0 {
        total += (year + 3) / 4 - (year + 99) / 100 + (year + 399) / 400;
    } else {
        total -= year / -4 - year / -100 + year / -400;
    }
    total += (367 * month - 362) / 12;
    total += day - 1;
    if month > 2 {
        total -= 1;
        if !is_leap(year) {
            total -= 1;
        }
    }
    total - DAYS_0000_TO_1970
}

impl From<NaiveDateTime> for PackedDateTime {
    /// Years outside the 16 bit range cannot be packed and become
    /// [`PackedDateTime::MISSING`]. Leap-second nanoseconds are clamped.
    fn from(value: NaiveDateTime) -> Self {
        let Ok(year) = i16::try_from(value.year()) else {
            return PackedDateTime::MISSING;
        };
        let millis = (value.nanosecond() / 1_000_000).min(999) as u16;
        PackedDateTime::pack(
            year,
            value.month() as u8,
            value.day() as u8,
            value.hour() as u8,
            value.minute() as u8,
            value.second() as u8,
            millis,
        )
    }
}

impl From<Option<NaiveDateTime>> for PackedDateTime {
    fn from(value: Option<NaiveDateTime>) -> Self {
        value.map_or(PackedDateTime::MISSING, PackedDateTime::from)
    }
}

impl fmt::Display for PackedDateTime {
    /// ISO-like `YYYY-MM-DDTHH:MM:SS.mmm`; the missing value prints nothing.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_missing() {
            return Ok(());
        }
        let millis = self.raw_millis_of_minute();
        write!(
            f,
            "{}-{:02}-{:02}T{:02}:{:02}:{:02}.{:03}",
            self.raw_year(),
            self.raw_month(),
            self.raw_day(),
            self.raw_hour(),
            self.raw_minute(),
            millis / 1000,
            millis % 1000
        )
    }
}

impl fmt::Debug for PackedDateTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_missing() {
            f.write_str("PackedDateTime(MISSING)")
        } else {
            write!(f, "PackedDateTime({self})")
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn leap_day() -> PackedDateTime {
        PackedDateTime::pack(2024, 2, 29, 13, 30, 0, 250)
    }

    #[test]
    fn pack_and_unpack_leap_day() {
        let dt = leap_day();
        assert_eq!(dt.year(), 2024);
        assert_eq!(dt.month_value(), 2);
        assert_eq!(dt.month(), Some(Month::February));
        assert_eq!(dt.day_of_month(), 29);
        assert_eq!(dt.hour(), 13);
        assert_eq!(dt.minute(), 30);
        assert_eq!(dt.second(), 0);
        assert_eq!(dt.millisecond_of_second(), 250);
        assert!(dt.is_leap_year());
        assert_eq!(dt.to_string(), "2024-02-29T13:30:00.250");
        assert_eq!(dt.day_of_week(), Some(Weekday::Thu));
        assert_eq!(dt.day_of_year(), 60);
        assert_eq!(dt.quarter(), 1);
    }

    #[test]
    fn field_layout() {
        let dt = PackedDateTime::pack(2000, 12, 31, 23, 59, 59, 999);
        assert_eq!(dt.date(), (2000 << 16) | (12 << 8) | 31);
        assert_eq!(dt.time(), (23 << 24) | (59 << 16) | 59_999);
        assert_eq!(dt.millisecond_of_minute(), 59_999);
        assert_eq!(PackedDateTime::create(dt.date(), dt.time()), dt);
    }

    #[test]
    fn negative_years_round_trip() {
        let dt = PackedDateTime::pack(-44, 3, 15, 12, 0, 0, 0);
        assert_eq!(dt.year(), -44);
        assert_eq!(dt.month_value(), 3);
        assert_eq!(dt.day_of_month(), 15);
        assert!(dt.is_before(PackedDateTime::pack(1, 1, 1, 0, 0, 0, 0)));
    }

    #[test]
    fn missing_value_answers() {
        let missing = PackedDateTime::MISSING;
        assert!(missing.is_missing());
        assert_eq!(missing.quarter(), -1);
        assert_eq!(missing.day_of_year(), -1);
        assert_eq!(missing.week_of_year(), -1);
        assert_eq!(missing.length_of_month(), -1);
        assert_eq!(missing.minute_of_day(), -1);
        assert_eq!(missing.millisecond_of_day(), -1);
        assert_eq!(missing.to_string(), "");
        assert_eq!(missing.day_of_week(), None);
        assert_eq!(missing.month(), None);
        assert_eq!(missing.to_naive_date_time(), None);
        assert!(!missing.is_leap_year());
        assert!(!missing.is_in_quarter(1));
        assert!(!missing.is_in_month(Month::January));
        assert!(!missing.is_day_of_week(Weekday::Mon));
        assert!(!missing.is_first_day_of_month());
        assert!(!missing.is_last_day_of_month());
        assert!(!missing.is_midnight());
        assert!(!missing.is_noon());
        assert!(!missing.is_am());
        assert!(!missing.is_pm());
        assert!(!missing.is_in_year(-32768));
    }

    #[test]
    fn comparisons_exclude_missing() {
        let early = PackedDateTime::pack(2020, 1, 1, 0, 0, 0, 0);
        let late = PackedDateTime::pack(2020, 1, 1, 0, 0, 0, 1);
        let missing = PackedDateTime::MISSING;

        assert!(late.is_after(early));
        assert!(early.is_before(late));
        assert!(early.is_on_or_before(early));
        assert!(late.is_on_or_after(early));
        assert!(early.is_equal_to(early));

        assert!(!early.is_after(missing));
        assert!(!missing.is_before(early));
        assert!(!missing.is_equal_to(missing));
        assert!(!missing.is_on_or_after(missing));
        assert!(!early.is_on_or_before(missing));
    }

    #[test]
    fn ordering_spans_the_time_half() {
        let evening = PackedDateTime::pack(2021, 6, 1, 23, 59, 59, 999);
        let next_morning = PackedDateTime::pack(2021, 6, 2, 0, 0, 0, 0);
        assert!(next_morning.is_after(evening));
    }

    #[test]
    fn calendar_helpers_match_chrono() {
        let mut date = NaiveDate::from_ymd_opt(1899, 12, 25).unwrap();
        let end = NaiveDate::from_ymd_opt(2101, 1, 10).unwrap();
        let epoch = NaiveDate::from_ymd_opt(1970, 1, 1).unwrap();
        while date <= end {
            let dt = PackedDateTime::from(date.and_hms_opt(6, 0, 0).unwrap());
            assert_eq!(dt.day_of_week(), Some(date.weekday()), "{date}");
            assert_eq!(dt.day_of_year(), date.ordinal() as i32, "{date}");
            assert_eq!(dt.epoch_day(), (date - epoch).num_days(), "{date}");
            assert_eq!(dt.week_of_year(), date.iso_week().week() as i32, "{date}");
            date = date.succ_opt().unwrap();
        }
    }

    #[test]
    fn month_lengths() {
        assert_eq!(PackedDateTime::pack(2023, 2, 1, 0, 0, 0, 0).length_of_month(), 28);
        assert_eq!(PackedDateTime::pack(2024, 2, 1, 0, 0, 0, 0).length_of_month(), 29);
        assert_eq!(PackedDateTime::pack(1900, 2, 1, 0, 0, 0, 0).length_of_month(), 28);
        assert_eq!(PackedDateTime::pack(2000, 2, 1, 0, 0, 0, 0).length_of_month(), 29);
        assert_eq!(PackedDateTime::pack(2023, 4, 1, 0, 0, 0, 0).length_of_month(), 30);
        assert_eq!(PackedDateTime::pack(2023, 12, 1, 0, 0, 0, 0).length_of_month(), 31);
        assert_eq!(PackedDateTime::pack(2024, 7, 1, 0, 0, 0, 0).length_of_year(), 366);
        assert!(PackedDateTime::pack(2023, 4, 30, 0, 0, 0, 0).is_last_day_of_month());
        assert!(!PackedDateTime::pack(2024, 2, 28, 0, 0, 0, 0).is_last_day_of_month());
    }

    #[test]
    fn time_of_day_predicates() {
        let midnight = PackedDateTime::pack(2022, 5, 5, 0, 0, 0, 0);
        let noon = PackedDateTime::pack(2022, 5, 5, 12, 0, 0, 0);
        let just_after_noon = PackedDateTime::pack(2022, 5, 5, 12, 0, 0, 1);
        assert!(midnight.is_midnight());
        assert!(midnight.is_am());
        assert!(noon.is_noon());
        assert!(noon.is_pm());
        assert!(!just_after_noon.is_noon());
        assert!(just_after_noon.is_pm());
        assert_eq!(just_after_noon.minute_of_day(), 720);
        assert_eq!(just_after_noon.second_of_day(), 43_200);
        assert_eq!(just_after_noon.millisecond_of_day(), 43_200_001);
    }

    #[test]
    fn intervals_truncate_toward_zero() {
        let start = PackedDateTime::pack(2020, 1, 31, 0, 0, 0, 0);
        let end = PackedDateTime::pack(2020, 3, 15, 0, 0, 0, 0);
        assert_eq!(end.days_until(start), 44);
        assert_eq!(end.weeks_until(start), 6);
        assert_eq!(end.months_until(start), 1);

        // Negative spans truncate toward zero rather than flooring.
        assert_eq!(start.days_until(end), -44);
        assert_eq!(start.weeks_until(end), -6);
        assert_eq!(start.months_until(end), -1);

        let birth = PackedDateTime::pack(1990, 6, 15, 0, 0, 0, 0);
        let before_birthday = PackedDateTime::pack(2020, 6, 14, 0, 0, 0, 0);
        let on_birthday = PackedDateTime::pack(2020, 6, 15, 0, 0, 0, 0);
        assert_eq!(before_birthday.years_until(birth), 29);
        assert_eq!(on_birthday.years_until(birth), 30);
    }

    #[test]
    fn epoch_milli_conversions() {
        let utc = FixedOffset::east_opt(0).unwrap();
        let plus_two = FixedOffset::east_opt(2 * 3600).unwrap();

        let epoch = PackedDateTime::pack(1970, 1, 1, 0, 0, 0, 0);
        assert_eq!(epoch.to_epoch_milli(utc), Some(0));
        assert_eq!(epoch.to_epoch_milli(plus_two), Some(-7_200_000));

        let dt = PackedDateTime::of_epoch_milli(1_709_213_400_250, utc);
        assert_eq!(dt.to_string(), "2024-02-29T13:30:00.250");
        let shifted = PackedDateTime::of_epoch_milli(1_709_213_400_250, plus_two);
        assert_eq!(shifted.hour(), 15);

        assert_eq!(PackedDateTime::MISSING.to_epoch_milli(utc), None);
    }

    #[test]
    fn from_optional_parts() {
        let date = NaiveDate::from_ymd_opt(2021, 3, 4);
        let time = NaiveTime::from_hms_milli_opt(5, 6, 7, 8);
        let dt = PackedDateTime::from_parts(date, time);
        assert_eq!(dt.to_string(), "2021-03-04T05:06:07.008");
        assert!(PackedDateTime::from_parts(None, time).is_missing());
        assert!(PackedDateTime::from_parts(date, None).is_missing());
        assert!(PackedDateTime::from(None::<NaiveDateTime>).is_missing());
        assert_eq!(
            dt.to_naive_date_time(),
            date.and_then(|d| time.map(|t| d.and_time(t)))
        );
    }

    #[test]
    fn out_of_range_year_is_missing() {
        let far = NaiveDate::from_ymd_opt(40_000, 1, 1)
            .unwrap()
            .and_hms_opt(0, 0, 0)
            .unwrap();
        assert!(PackedDateTime::from(far).is_missing());
    }
}
