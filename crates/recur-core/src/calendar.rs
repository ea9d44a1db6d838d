//! Calendar date value type used at every boundary of the engine.
//!
//! Dates travel as 8-digit `YYYYMMDD` text and are held internally as a
//! [`chrono::NaiveDate`], so there is never a time-of-day or a timezone
//! involved in scheduling arithmetic.

use chrono::{Datelike, Days, Local, Months, NaiveDate, Weekday};
use serde_with::{DeserializeFromStr, SerializeDisplay};
use std::fmt;
use std::str::FromStr;

use crate::error::RecurrenceError;

/// `strftime` pattern of the boundary form.
pub const DATE_FORMAT: &str = "%Y%m%d";

/// Last year whose dates still print as eight digits.
pub const MAX_YEAR: i32 = 9999;

/// A Gregorian date without time-of-day.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    SerializeDisplay,
    DeserializeFromStr,
    sqlx::Type,
)]
#[sqlx(transparent)]
pub struct CalendarDate(NaiveDate);

impl CalendarDate {
    /// Builds a date from its parts, `None` if the day does not exist.
    pub fn from_ymd(year: i32, month: u32, day: u32) -> Option<Self> {
        NaiveDate::from_ymd_opt(year, month, day).map(Self)
    }

    /// The current date on the local clock.
    pub fn today() -> Self {
        Self(Local::now().date_naive())
    }

    #[inline]
    pub fn naive(self) -> NaiveDate {
        self.0
    }

    #[inline]
    pub fn year(self) -> i32 {
        self.0.year()
    }

    #[inline]
    pub fn month(self) -> u32 {
        self.0.month()
    }

    #[inline]
    pub fn day(self) -> u32 {
        self.0.day()
    }

    #[inline]
    pub fn weekday(self) -> Weekday {
        self.0.weekday()
    }

    /// Whether the date fits the `YYYYMMDD` text form.
    #[inline]
    pub fn is_representable(self) -> bool {
        (0..=MAX_YEAR).contains(&self.year())
    }

    pub fn add_days(self, days: u64) -> Option<Self> {
        self.0.checked_add_days(Days::new(days)).map(Self)
    }

    /// Adds whole years keeping month and day. A Feb 29 anchor lands on
    /// Feb 28 when the target year is not a leap year.
    pub fn add_years(self, years: u32) -> Option<Self> {
        years
            .checked_mul(12)
            .and_then(|months| self.0.checked_add_months(Months::new(months)))
            .map(Self)
    }

    /// Signed number of days from `earlier` to `self`.
    pub fn days_since(self, earlier: CalendarDate) -> i64 {
        (self.0 - earlier.0).num_days()
    }
}

/// Number of days in `month` of `year`, `None` for an out-of-range month.
pub fn days_in_month(year: i32, month: u32) -> Option<u32> {
    let first = NaiveDate::from_ymd_opt(year, month, 1)?;
    let next = first.checked_add_months(Months::new(1))?;
    u32::try_from((next - first).num_days()).ok()
}

impl From<NaiveDate> for CalendarDate {
    fn from(date: NaiveDate) -> Self {
        Self(date)
    }
}

impl From<CalendarDate> for NaiveDate {
    fn from(date: CalendarDate) -> Self {
        date.0
    }
}

impl fmt::Display for CalendarDate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.format(DATE_FORMAT))
    }
}

impl FromStr for CalendarDate {
    type Err = RecurrenceError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || RecurrenceError::InvalidDateFormat(s.to_string());

        if s.len() != 8 || !s.bytes().all(|b| b.is_ascii_digit()) {
            return Err(invalid());
        }

        // All bytes are ASCII digits, so these slices are on char boundaries.
        let year: i32 = s[0..4].parse().map_err(|_| invalid())?;
        let month: u32 = s[4..6].parse().map_err(|_| invalid())?;
        let day: u32 = s[6..8].parse().map_err(|_| invalid())?;

        Self::from_ymd(year, month, day).ok_or_else(invalid)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn date(s: &str) -> CalendarDate {
        s.parse().unwrap()
    }

    #[test]
    fn test_parse_and_display() {
        let d = date("20240131");
        assert_eq!(d.year(), 2024);
        assert_eq!(d.month(), 1);
        assert_eq!(d.day(), 31);
        assert_eq!(d.to_string(), "20240131");
    }

    #[rstest]
    #[case("")]
    #[case("2024013")]
    #[case("202401311")]
    #[case("2024-01-31")]
    #[case("20241301")]
    #[case("20240230")]
    #[case("20230229")]
    #[case("+2024011")]
    #[case("２０２４０１０１")]
    fn test_parse_rejects_malformed(#[case] input: &str) {
        assert_eq!(
            input.parse::<CalendarDate>(),
            Err(RecurrenceError::InvalidDateFormat(input.to_string()))
        );
    }

    #[rstest]
    #[case(2024, 2, 29)]
    #[case(2023, 2, 28)]
    #[case(2100, 2, 28)]
    #[case(2000, 2, 29)]
    #[case(2024, 4, 30)]
    #[case(2024, 12, 31)]
    fn test_days_in_month(#[case] year: i32, #[case] month: u32, #[case] expected: u32) {
        assert_eq!(days_in_month(year, month), Some(expected));
    }

    #[test]
    fn test_days_in_month_invalid_month() {
        assert_eq!(days_in_month(2024, 0), None);
        assert_eq!(days_in_month(2024, 13), None);
    }

    #[test]
    fn test_add_years_clamps_leap_day() {
        let leap = date("20240229");
        assert_eq!(leap.add_years(1), Some(date("20250228")));
        assert_eq!(leap.add_years(4), Some(date("20280229")));
        assert_eq!(leap.add_years(0), Some(leap));
    }

    #[test]
    fn test_days_since() {
        assert_eq!(date("20240301").days_since(date("20240101")), 60);
        assert_eq!(date("20240101").days_since(date("20240301")), -60);
    }

    #[test]
    fn test_serde_uses_compact_form() {
        let d = date("20250704");
        let json = serde_json::to_string(&d).unwrap();
        assert_eq!(json, "\"20250704\"");
        let back: CalendarDate = serde_json::from_str(&json).unwrap();
        assert_eq!(back, d);
        assert!(serde_json::from_str::<CalendarDate>("\"2025-07-04\"").is_err());
    }
}
