use crate::consts::{
    CENTURY_CYCLE, DAYS_IN_MONTH, FEBRUARY, FEBRUARY_DAYS_LEAP, GREGORIAN_CYCLE, LEAP_YEAR_CYCLE,
    MAX_MONTH, MAX_YEAR, MIN_DAY, MIN_YEAR,
};
use crate::ValueError;
use crate::prelude::*;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::num::NonZeroU16;
use std::num::NonZeroU8;

/// A year value guaranteed to be in the range `MIN_YEAR..=MAX_YEAR` (1..=9999)
/// Uses `NonZeroU16` internally, so 0 is not a valid year.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "u16", into = "u16")]
pub struct Year(NonZeroU16);

impl Year {
    /// Creates a new Year, validating that it's non-zero and <= `MAX_YEAR`
    ///
    /// # Errors
    /// Returns `ValueError::Year` if the value is 0 or > `MAX_YEAR`.
    pub const fn new(value: u16) -> Result<Self, ValueError> {
        match NonZeroU16::new(value) {
            Some(non_zero) if value >= MIN_YEAR && value <= MAX_YEAR => Ok(Self(non_zero)),
            _ => Err(ValueError::Year(value)),
        }
    }

    /// Returns the year value as u16
    #[inline]
    pub const fn get(self) -> u16 {
        self.0.get()
    }

    /// Whether this year has a 29th of February
    #[inline]
    pub const fn is_leap(self) -> bool {
        is_leap_year(self.get())
    }
}

impl TryFrom<u16> for Year {
    type Error = ValueError;

    fn try_from(value: u16) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<Year> for u16 {
    fn from(year: Year) -> Self {
        year.0.get()
    }
}

impl fmt::Display for Year {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:04}", self.0)
    }
}

/// A month value guaranteed to be in the range `1..=MAX_MONTH` (1..=12)
/// Uses `NonZeroU8` internally, so 0 is not a valid month.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub struct Month(NonZeroU8);

impl Month {
    /// Creates a new Month, validating that it's non-zero and <= `MAX_MONTH`
    ///
    /// # Errors
    /// Returns `ValueError::Month` if the value is 0 or > `MAX_MONTH`.
    pub const fn new(value: u8) -> Result<Self, ValueError> {
        match NonZeroU8::new(value) {
            Some(non_zero) if value <= MAX_MONTH => Ok(Self(non_zero)),
            _ => Err(ValueError::Month(value)),
        }
    }

    /// Returns the month value as u8
    #[inline]
    pub const fn get(self) -> u8 {
        self.0.get()
    }
}

impl TryFrom<u8> for Month {
    type Error = ValueError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<Month> for u8 {
    fn from(month: Month) -> Self {
        month.0.get()
    }
}

impl fmt::Display for Month {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:02}", self.0)
    }
}

/// A day value guaranteed to be valid for a given year and month
/// Uses `NonZeroU8` internally, so 0 is not a valid day.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub struct Day(NonZeroU8);

impl Day {
    /// Creates a new Day, validating that it's non-zero and valid for the given year and month
    ///
    /// # Errors
    /// Returns `ValueError::Day` if the value is 0 or invalid for the given year and month.
    pub const fn new(value: u8, year: u16, month: u8) -> Result<Self, ValueError> {
        let err = ValueError::Day {
            year,
            month,
            day: value,
        };
        if month == 0 || month > MAX_MONTH {
            return Err(err);
        }
        match NonZeroU8::new(value) {
            Some(non_zero) if value <= days_in_month(year, month) => Ok(Self(non_zero)),
            _ => Err(err),
        }
    }

    /// Returns the day value as u8
    #[inline]
    pub const fn get(self) -> u8 {
        self.0.get()
    }
}

impl TryFrom<u8> for Day {
    type Error = ValueError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        // Can't validate against a month here, so only the widest bound applies
        let err = ValueError::Day {
            year: 0,
            month: 0,
            day: value,
        };
        if value < MIN_DAY || value > DAYS_IN_MONTH[1] {
            return Err(err);
        }
        NonZeroU8::new(value).map(Self).ok_or(err)
    }
}

impl From<Day> for u8 {
    fn from(day: Day) -> Self {
        day.0.get()
    }
}

impl fmt::Display for Day {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:02}", self.0)
    }
}

/// The two ISO 8601 spellings of a date or time: with or without separators
/// between the numeric fields.
///
/// A parse fixes the style at the first separator-bearing field of the date
/// and holds every later field of the date and time to it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Display, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FormatStyle {
    /// `20250102T030405`
    #[display(fmt = "basic")]
    Basic,
    /// `2025-01-02T03:04:05`
    #[default]
    #[display(fmt = "extended")]
    Extended,
}

impl FormatStyle {
    #[inline]
    pub(crate) const fn is_extended(self) -> bool {
        matches!(self, Self::Extended)
    }
}

// Helper functions

pub const fn is_leap_year(year: u16) -> bool {
    (year % LEAP_YEAR_CYCLE == 0 && year % CENTURY_CYCLE != 0) || (year % GREGORIAN_CYCLE == 0)
}

pub const fn days_in_month(year: u16, month: u8) -> u8 {
    debug_assert!(month != 0 && month <= MAX_MONTH);

    if month == FEBRUARY && is_leap_year(year) {
        FEBRUARY_DAYS_LEAP
    } else {
        DAYS_IN_MONTH[month as usize]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_year_new_valid() {
        assert!(Year::new(1).is_ok());
        assert!(Year::new(2000).is_ok());
        assert!(Year::new(9999).is_ok());
    }

    #[test]
    fn test_year_new_invalid() {
        assert_eq!(Year::new(0), Err(ValueError::Year(0)));
        assert_eq!(Year::new(10000), Err(ValueError::Year(10000)));
    }

    #[test]
    fn test_year_display_is_zero_padded() {
        assert_eq!(Year::new(1).unwrap().to_string(), "0001");
        assert_eq!(Year::new(2024).unwrap().to_string(), "2024");
    }

    #[test]
    fn test_year_try_from_u16() {
        let year: Year = 2024.try_into().unwrap();
        assert_eq!(year.get(), 2024);

        let result: Result<Year, _> = 0.try_into();
        assert!(result.is_err());
    }

    #[test]
    fn test_year_serde() {
        let year = Year::new(2024).unwrap();
        let json = serde_json::to_string(&year).unwrap();
        assert_eq!(json, "2024");

        let parsed: Year = serde_json::from_str(&json).unwrap();
        assert_eq!(year, parsed);
        assert!(serde_json::from_str::<Year>("0").is_err());
    }

    #[test]
    fn test_month_new() {
        for m in 1..=12 {
            assert!(Month::new(m).is_ok(), "Month {m} should be valid");
        }
        assert_eq!(Month::new(0), Err(ValueError::Month(0)));
        assert_eq!(Month::new(13), Err(ValueError::Month(13)));
    }

    #[test]
    fn test_month_display_is_zero_padded() {
        assert_eq!(Month::new(8).unwrap().to_string(), "08");
    }

    #[test]
    fn test_day_new_valid() {
        // January - 31 days
        assert!(Day::new(1, 2024, 1).is_ok());
        assert!(Day::new(31, 2024, 1).is_ok());

        // February non-leap - 28 days
        assert!(Day::new(28, 2023, 2).is_ok());
        assert!(Day::new(29, 2023, 2).is_err());

        // February leap year - 29 days
        assert!(Day::new(29, 2024, 2).is_ok());
        assert!(Day::new(30, 2024, 2).is_err());

        // April - 30 days
        assert!(Day::new(30, 2024, 4).is_ok());
        assert!(Day::new(31, 2024, 4).is_err());
    }

    #[test]
    fn test_day_new_invalid() {
        assert_eq!(
            Day::new(32, 2024, 1),
            Err(ValueError::Day {
                year: 2024,
                month: 1,
                day: 32
            })
        );
        assert!(Day::new(0, 2024, 1).is_err());
        // A bad month never panics
        assert!(Day::new(1, 2024, 13).is_err());
    }

    #[test]
    fn test_day_try_from_u8() {
        let day: Day = 15.try_into().unwrap();
        assert_eq!(day.get(), 15);

        let result: Result<Day, _> = 0.try_into();
        assert!(result.is_err());
        let result: Result<Day, _> = 32.try_into();
        assert!(result.is_err());
    }

    #[test]
    fn test_is_leap_year_cases() {
        let cases = [
            (2020, true, "divisible by 4"),
            (2024, true, "divisible by 4"),
            (2021, false, "not divisible by 4"),
            (1900, false, "century not divisible by 400"),
            (2100, false, "century not divisible by 400"),
            (2000, true, "divisible by 400"),
            (2400, true, "divisible by 400"),
        ];

        for (year, is_leap, description) in cases {
            assert_eq!(is_leap_year(year), is_leap, "Year {year} ({description})");
        }
    }

    #[test]
    fn test_days_in_month() {
        let expected = [0, 31, 28, 31, 30, 31, 30, 31, 31, 30, 31, 30, 31];
        for month in 1..=12 {
            assert_eq!(
                days_in_month(2023, month),
                expected[month as usize],
                "Month {month} has incorrect day count"
            );
        }
        assert_eq!(days_in_month(2024, 2), 29);
        assert_eq!(days_in_month(1900, 2), 28);
    }

    #[test]
    fn test_format_style_display() {
        assert_eq!(FormatStyle::Basic.to_string(), "basic");
        assert_eq!(FormatStyle::Extended.to_string(), "extended");
        assert_eq!(FormatStyle::default(), FormatStyle::Extended);
    }
}
