use crate::consts::{
    DATE_SEPARATOR, FIELD_DIGITS, WEEK_DESIGNATOR, WEEKDAY_DIGITS, YEAR_DIGITS,
};
use crate::cursor::{Cursor, Parsed, read_u8, read_u16};
use crate::error::{Failure, Field, Reason};
use crate::prelude::*;
use crate::types::{Day, Month, Year};
use crate::week::{self, IsoWeekDate};
use crate::{FormatStyle, ValueError};

/// A day in the proleptic Gregorian calendar, years 1 through 9999.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Display)]
#[display(fmt = "{year}-{month}-{day}")]
pub struct CalendarDate {
    year: Year,
    month: Month,
    day: Day,
}

impl CalendarDate {
    /// Creates a date, checking the day against the month and leap year.
    ///
    /// # Errors
    /// Returns the `ValueError` for the first component out of range.
    pub const fn new(year: u16, month: u8, day: u8) -> Result<Self, ValueError> {
        let year = match Year::new(year) {
            Ok(year) => year,
            Err(err) => return Err(err),
        };
        let month = match Month::new(month) {
            Ok(month) => month,
            Err(err) => return Err(err),
        };
        match Day::new(day, year.get(), month.get()) {
            Ok(day) => Ok(Self { year, month, day }),
            Err(err) => Err(err),
        }
    }

    /// Creates a date from already validated components.
    ///
    /// # Errors
    /// `ValueError::Day` if `day` doesn't exist in that month, which can
    /// happen when it was validated without a month via `Day::try_from`.
    pub const fn from_parts(year: Year, month: Month, day: Day) -> Result<Self, ValueError> {
        Self::new(year.get(), month.get(), day.get())
    }

    pub const fn year(&self) -> u16 {
        self.year.get()
    }

    pub const fn month(&self) -> u8 {
        self.month.get()
    }

    pub const fn day(&self) -> u8 {
        self.day.get()
    }

    pub const fn year_typed(&self) -> Year {
        self.year
    }

    pub const fn month_typed(&self) -> Month {
        self.month
    }

    pub const fn day_typed(&self) -> Day {
        self.day
    }

    /// Day of the week, Monday = 1 through Sunday = 7.
    pub const fn weekday(&self) -> u8 {
        week::weekday(self.year(), self.month(), self.day())
    }

    /// Day of the year, January 1st = 1.
    pub const fn day_of_year(&self) -> u16 {
        week::day_of_year(self.year(), self.month(), self.day())
    }

    pub fn iso_week_date(&self) -> IsoWeekDate {
        week::iso_week_date(*self)
    }

    /// Formats as `YYYY-MM-DD` or `YYYYMMDD`.
    pub fn to_iso_string(&self, style: FormatStyle) -> String {
        match style {
            FormatStyle::Extended => self.to_string(),
            FormatStyle::Basic => format!("{}{}{}", self.year, self.month, self.day),
        }
    }
}

/// The numeric fields of a date segment, before range checks.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum DateFields {
    Calendar { year: u16, month: u8, day: u8 },
    Week { year: u16, week: u8, weekday: u8 },
}

impl DateFields {
    /// Range checks the fields, resolving a week date to its calendar date.
    pub(crate) fn resolve(self) -> Result<CalendarDate, ValueError> {
        match self {
            Self::Calendar { year, month, day } => CalendarDate::new(year, month, day),
            Self::Week {
                year,
                week,
                weekday,
            } => IsoWeekDate::new(year, week, weekday)?.to_calendar_date(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct DateSegment {
    pub(crate) fields: DateFields,
    pub(crate) style: FormatStyle,
}

// Date :::
//   YYYY - MM - DD
//   YYYYMMDD
//   YYYY - W ww [- d]
//   YYYY W ww [d]
//
/// Parses the date segment of an input and reports which style it used.
///
/// Week numbers and weekdays are read but not range checked here.
pub(crate) fn parse_date_segment(cursor: Cursor<'_>) -> Result<Parsed<'_, DateSegment>, Failure> {
    let Parsed {
        value: year,
        cursor,
    } = read_u16(cursor, Field::Year, YEAR_DIGITS)?;

    if let Some(cursor) = cursor.eat(DATE_SEPARATOR) {
        if let Some(cursor) = cursor.eat(WEEK_DESIGNATOR) {
            return parse_week_extended(cursor, year);
        }
        return parse_calendar_extended(cursor, year);
    }
    if let Some(cursor) = cursor.eat(WEEK_DESIGNATOR) {
        return parse_week_basic(cursor, year);
    }
    if cursor.at_digit() {
        return parse_calendar_basic(cursor, year);
    }
    Err(Failure::at(
        Reason::ExpectedSeparator {
            field: Field::Month,
            expected: DATE_SEPARATOR,
        },
        cursor.position(),
    ))
}

fn parse_calendar_extended(cursor: Cursor<'_>, year: u16) -> Result<Parsed<'_, DateSegment>, Failure> {
    let Parsed {
        value: month,
        cursor,
    } = read_u8(cursor, Field::Month, FIELD_DIGITS)?;
    let cursor = cursor.expect(DATE_SEPARATOR, Field::Day)?;
    let Parsed { value: day, cursor } = read_u8(cursor, Field::Day, FIELD_DIGITS)?;
    Ok(Parsed {
        value: DateSegment {
            fields: DateFields::Calendar { year, month, day },
            style: FormatStyle::Extended,
        },
        cursor,
    })
}

fn parse_calendar_basic(cursor: Cursor<'_>, year: u16) -> Result<Parsed<'_, DateSegment>, Failure> {
    let Parsed {
        value: month,
        cursor,
    } = read_u8(cursor, Field::Month, FIELD_DIGITS)?;
    let Parsed { value: day, cursor } = read_u8(cursor, Field::Day, FIELD_DIGITS)?;
    Ok(Parsed {
        value: DateSegment {
            fields: DateFields::Calendar { year, month, day },
            style: FormatStyle::Basic,
        },
        cursor,
    })
}

fn parse_week_extended(cursor: Cursor<'_>, year: u16) -> Result<Parsed<'_, DateSegment>, Failure> {
    let Parsed { value: week, cursor } = read_u8(cursor, Field::Week, FIELD_DIGITS)?;

    // A hyphen after the week opens the weekday only when exactly one digit
    // follows it. `2025-W01-12` is week 1 with `-` as the date/time
    // separator and hour 12.
    let has_weekday = cursor.at(DATE_SEPARATOR)
        && cursor.peek_nth(1).and_then(|cp| cp.ascii_digit()).is_some()
        && cursor.peek_nth(2).and_then(|cp| cp.ascii_digit()).is_none();
    let (weekday, cursor) = if has_weekday {
        let Parsed { value, cursor } = read_u8(cursor.bump(), Field::Weekday, WEEKDAY_DIGITS)?;
        (value, cursor)
    } else {
        (1, cursor)
    };

    Ok(Parsed {
        value: DateSegment {
            fields: DateFields::Week {
                year,
                week,
                weekday,
            },
            style: FormatStyle::Extended,
        },
        cursor,
    })
}

fn parse_week_basic(cursor: Cursor<'_>, year: u16) -> Result<Parsed<'_, DateSegment>, Failure> {
    let Parsed { value: week, cursor } = read_u8(cursor, Field::Week, FIELD_DIGITS)?;

    // The date/time separator is never a digit, so a digit here is the weekday
    let (weekday, cursor) = if cursor.at_digit() {
        let Parsed { value, cursor } = read_u8(cursor, Field::Weekday, WEEKDAY_DIGITS)?;
        (value, cursor)
    } else {
        (1, cursor)
    };

    Ok(Parsed {
        value: DateSegment {
            fields: DateFields::Week {
                year,
                week,
                weekday,
            },
            style: FormatStyle::Basic,
        },
        cursor,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::input::CodePoint;

    fn points(s: &str) -> Vec<CodePoint> {
        s.chars().map(CodePoint::from).collect()
    }

    fn segment(s: &str) -> (DateSegment, usize) {
        let text = points(s);
        let Parsed { value, cursor } = parse_date_segment(Cursor::new(&text)).unwrap();
        (value, cursor.position())
    }

    fn failure(s: &str) -> Failure {
        let text = points(s);
        parse_date_segment(Cursor::new(&text)).unwrap_err()
    }

    #[test]
    fn test_calendar_date_new() {
        let date = CalendarDate::new(2020, 2, 29).unwrap();
        assert_eq!((date.year(), date.month(), date.day()), (2020, 2, 29));
        assert_eq!(
            CalendarDate::new(2009, 2, 29),
            Err(ValueError::Day {
                year: 2009,
                month: 2,
                day: 29
            })
        );
        assert_eq!(CalendarDate::new(2009, 13, 1), Err(ValueError::Month(13)));
        assert_eq!(CalendarDate::new(0, 1, 1), Err(ValueError::Year(0)));
    }

    #[test]
    fn test_calendar_date_from_parts() {
        let day = Day::try_from(31_u8).unwrap();
        let year = Year::new(2024).unwrap();
        assert!(CalendarDate::from_parts(year, Month::new(1).unwrap(), day).is_ok());
        assert!(CalendarDate::from_parts(year, Month::new(4).unwrap(), day).is_err());
    }

    #[test]
    fn test_calendar_date_display() {
        let date = CalendarDate::new(1, 1, 1).unwrap();
        assert_eq!(date.to_string(), "0001-01-01");
        assert_eq!(date.to_iso_string(FormatStyle::Basic), "00010101");

        let date = CalendarDate::new(2017, 5, 30).unwrap();
        assert_eq!(date.to_iso_string(FormatStyle::Extended), "2017-05-30");
    }

    #[test]
    fn test_calendar_date_ordering() {
        let a = CalendarDate::new(2024, 12, 31).unwrap();
        let b = CalendarDate::new(2025, 1, 1).unwrap();
        let c = CalendarDate::new(2025, 1, 2).unwrap();
        assert!(a < b && b < c);
    }

    #[test]
    fn test_calendar_date_week_helpers() {
        let date = CalendarDate::new(2025, 1, 2).unwrap();
        assert_eq!(date.weekday(), 4);
        assert_eq!(date.day_of_year(), 2);
        assert_eq!(date.iso_week_date().to_string(), "2025-W01-4");
    }

    #[test]
    fn test_parse_calendar_extended() {
        let (seg, end) = segment("2025-01-02");
        assert_eq!(
            seg.fields,
            DateFields::Calendar {
                year: 2025,
                month: 1,
                day: 2
            }
        );
        assert_eq!(seg.style, FormatStyle::Extended);
        assert_eq!(end, 10);
    }

    #[test]
    fn test_parse_calendar_basic() {
        let (seg, end) = segment("20250102T03");
        assert_eq!(
            seg.fields,
            DateFields::Calendar {
                year: 2025,
                month: 1,
                day: 2
            }
        );
        assert_eq!(seg.style, FormatStyle::Basic);
        assert_eq!(end, 8);
    }

    #[test]
    fn test_parse_week_extended() {
        let (seg, end) = segment("2025-W01-4");
        assert_eq!(
            seg.fields,
            DateFields::Week {
                year: 2025,
                week: 1,
                weekday: 4
            }
        );
        assert_eq!(seg.style, FormatStyle::Extended);
        assert_eq!(end, 10);

        // Weekday defaults to Monday
        let (seg, end) = segment("2025-W01");
        assert_eq!(
            seg.fields,
            DateFields::Week {
                year: 2025,
                week: 1,
                weekday: 1
            }
        );
        assert_eq!(end, 8);
    }

    #[test]
    fn test_parse_week_extended_hyphen_as_boundary() {
        let (seg, end) = segment("2025-W01-12:30");
        assert_eq!(
            seg.fields,
            DateFields::Week {
                year: 2025,
                week: 1,
                weekday: 1
            }
        );
        assert_eq!(end, 8);

        let (seg, end) = segment("2025-W01-4T12");
        assert!(matches!(seg.fields, DateFields::Week { weekday: 4, .. }));
        assert_eq!(end, 10);
    }

    #[test]
    fn test_parse_week_basic() {
        let (seg, end) = segment("2025W014");
        assert_eq!(
            seg.fields,
            DateFields::Week {
                year: 2025,
                week: 1,
                weekday: 4
            }
        );
        assert_eq!(seg.style, FormatStyle::Basic);
        assert_eq!(end, 8);

        let (seg, end) = segment("2025W01");
        assert!(matches!(seg.fields, DateFields::Week { weekday: 1, .. }));
        assert_eq!(end, 7);
    }

    #[test]
    fn test_week_numbers_are_not_checked_while_parsing() {
        let (seg, _) = segment("2019-W53-1");
        assert_eq!(
            seg.fields.resolve(),
            Err(ValueError::Week {
                year: 2019,
                week: 53
            })
        );
        let (seg, _) = segment("2020W019");
        assert_eq!(seg.fields.resolve(), Err(ValueError::Weekday(9)));
    }

    #[test]
    fn test_resolve() {
        let (seg, _) = segment("2025W01");
        assert_eq!(
            seg.fields.resolve().unwrap(),
            CalendarDate::new(2024, 12, 30).unwrap()
        );
        let (seg, _) = segment("2009-02-29");
        assert!(seg.fields.resolve().is_err());
    }

    #[test]
    fn test_parse_failures() {
        let err = failure("009-03-04");
        assert_eq!(
            err.reason,
            Reason::ExpectedDigits {
                field: Field::Year,
                expected: 4,
                found: 3
            }
        );

        let err = failure("2009.04-19");
        assert_eq!(err.position, Some(4));
        assert!(matches!(err.reason, Reason::ExpectedSeparator { .. }));

        let err = failure("2009-04.19");
        assert_eq!(
            err.reason,
            Reason::ExpectedSeparator {
                field: Field::Day,
                expected: '-'
            }
        );
        assert_eq!(err.position, Some(7));

        let err = failure("2009-1a-04");
        assert_eq!(err.position, Some(6));

        let err = failure("2025-W1");
        assert!(matches!(
            err.reason,
            Reason::ExpectedDigits {
                field: Field::Week,
                ..
            }
        ));

        // Seven digits is neither a basic calendar date nor anything else
        assert!(matches!(
            failure("2025010").reason,
            Reason::ExpectedDigits { field: Field::Day, .. }
        ));
    }

    #[test]
    fn test_surrogate_in_date_is_a_format_failure() {
        let text = vec![
            CodePoint::from('2'),
            CodePoint::from('0'),
            CodePoint::from('0'),
            CodePoint::from('9'),
            CodePoint::new(0xD800),
            CodePoint::from('0'),
            CodePoint::from('2'),
        ];
        let err = parse_date_segment(Cursor::new(&text)).unwrap_err();
        assert_eq!(err.position, Some(4));
    }
}
