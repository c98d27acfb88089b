//! Strict ISO 8601 parsing for dates, times, date-times and UTC offsets.
//!
//! ```
//! let value = isodate::parse_datetime("2025-W01-4T03:04:05.6+01:00").unwrap();
//! assert_eq!(value.date().to_string(), "2025-01-02");
//! assert_eq!(value.time().subsecond(), 600_000);
//! assert_eq!(value.offset().map(|o| o.total_minutes()), Some(60));
//!
//! let err = isodate::parse_date("2009-02-29").unwrap_err();
//! assert_eq!(err.kind(), isodate::ErrorKind::Range);
//! ```

#[macro_use]
mod logging;

mod consts;
mod cursor;
mod date;
mod datetime;
mod error;
mod input;
mod offset;
mod options;
mod parser;
mod prelude;
mod separator;
mod time;
mod types;
mod week;

pub use consts::*;
pub use date::CalendarDate;
pub use datetime::{DateTimeValue, OffsetTime};
pub use error::{ErrorKind, Field, ParseError, Reason, ValueError};
pub use input::{CodePoint, Input, SourceText};
pub use offset::UtcOffset;
pub use options::{OffsetHourPolicy, ParseOptions};
pub use parser::Parser;
pub use separator::Sign;
pub use time::TimeOfDay;
pub use types::{Day, FormatStyle, Month, Year, days_in_month, is_leap_year};
pub use week::{IsoWeekDate, is_long_year, weeks_in_year};

/// Parses a calendar or ISO week date with the default options.
///
/// # Errors
/// See [`Parser::parse_date`].
pub fn parse_date<'a>(text: impl Into<Input<'a>>) -> Result<CalendarDate, ParseError> {
    Parser::default().parse_date(text)
}

/// Parses a time of day without a UTC offset.
///
/// # Errors
/// See [`Parser::parse_time`].
pub fn parse_time<'a>(text: impl Into<Input<'a>>) -> Result<TimeOfDay, ParseError> {
    Parser::default().parse_time(text)
}

/// Parses a time of day with an optional UTC offset.
///
/// # Errors
/// See [`Parser::parse_offset_time`].
pub fn parse_offset_time<'a>(text: impl Into<Input<'a>>) -> Result<OffsetTime, ParseError> {
    Parser::default().parse_offset_time(text)
}

/// Parses a date, optionally followed by a time and a UTC offset.
///
/// # Errors
/// See [`Parser::parse_datetime`].
pub fn parse_datetime<'a>(text: impl Into<Input<'a>>) -> Result<DateTimeValue, ParseError> {
    Parser::default().parse_datetime(text)
}

/// Parses a UTC offset on its own.
///
/// # Errors
/// See [`Parser::parse_offset`].
pub fn parse_offset<'a>(text: impl Into<Input<'a>>) -> Result<UtcOffset, ParseError> {
    Parser::default().parse_offset(text)
}
