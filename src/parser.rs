//! Entry routines.
//!
//! Each routine decodes its input once, runs the segment parsers over the
//! code points in order, insists that nothing is left over, and only then
//! range checks the fields. Grammar failures therefore win over range
//! failures: `2009-02-29x` is a format error, not a range error.

use crate::consts::TIME_DESIGNATOR;
use crate::cursor::{Cursor, Parsed};
use crate::date::{CalendarDate, parse_date_segment};
use crate::datetime::{DateTimeValue, OffsetTime, compose_datetime, compose_offset_time};
use crate::error::{Failure, Field, ParseError, Reason};
use crate::input::Input;
use crate::offset::{UtcOffset, parse_offset_segment};
use crate::options::ParseOptions;
use crate::separator::parse_boundary;
use crate::time::{TimeFields, TimeOfDay, parse_time_segment};

/// An ISO 8601 parser bound to a set of [`ParseOptions`].
///
/// Holds no state between calls; one value can be shared freely across
/// threads.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Parser {
    options: ParseOptions,
}

impl Parser {
    pub const fn new(options: ParseOptions) -> Self {
        Self { options }
    }

    pub const fn options(&self) -> &ParseOptions {
        &self.options
    }

    /// Parses a calendar or ISO week date, in basic or extended format.
    ///
    /// # Errors
    /// Anything after the date is a format error.
    pub fn parse_date<'a>(&self, input: impl Into<Input<'a>>) -> Result<CalendarDate, ParseError> {
        run(input.into(), |cursor| {
            let Parsed {
                value: date,
                cursor,
            } = parse_date_segment(cursor)?;
            finish(cursor)?;
            Ok(date.fields.resolve()?)
        })
    }

    /// Parses a time of day, optionally introduced by `T`.
    ///
    /// # Errors
    /// A UTC offset is a format error here; see
    /// [`parse_offset_time`](Self::parse_offset_time).
    pub fn parse_time<'a>(&self, input: impl Into<Input<'a>>) -> Result<TimeOfDay, ParseError> {
        run(input.into(), |cursor| {
            let cursor = cursor.eat(TIME_DESIGNATOR).unwrap_or(cursor);
            let Parsed {
                value: time,
                cursor,
            } = parse_time_segment(cursor, None)?;
            finish(cursor)?;
            Ok(time.fields.resolve()?)
        })
    }

    /// Parses a time of day followed by an optional UTC offset.
    ///
    /// # Errors
    /// Returns a format error for malformed text and a range error for
    /// out-of-range fields.
    pub fn parse_offset_time<'a>(&self, input: impl Into<Input<'a>>) -> Result<OffsetTime, ParseError> {
        run(input.into(), |cursor| {
            let cursor = cursor.eat(TIME_DESIGNATOR).unwrap_or(cursor);
            let Parsed {
                value: time,
                cursor,
            } = parse_time_segment(cursor, None)?;
            let Parsed {
                value: offset,
                cursor,
            } = parse_offset_segment(cursor)?;
            finish(cursor)?;
            Ok(compose_offset_time(time.fields, offset, &self.options)?)
        })
    }

    /// Parses a date, a one code point boundary, a time and an optional
    /// UTC offset. A date on its own is midnight, with no offset.
    ///
    /// The time must use the same basic or extended format as the date.
    /// The boundary may be any code point except an ASCII digit.
    ///
    /// # Errors
    /// Returns a format error for malformed text and a range error for
    /// out-of-range fields.
    pub fn parse_datetime<'a>(&self, input: impl Into<Input<'a>>) -> Result<DateTimeValue, ParseError> {
        run(input.into(), |cursor| {
            let Parsed {
                value: date,
                cursor,
            } = parse_date_segment(cursor)?;
            trace!("date segment in {} format ends at {}", date.style, cursor.position());
            if cursor.is_at_end() {
                return Ok(compose_datetime(
                    date.fields,
                    TimeFields::default(),
                    None,
                    &self.options,
                )?);
            }

            let Parsed { cursor, .. } = parse_boundary(cursor)?;
            let Parsed {
                value: time,
                cursor,
            } = parse_time_segment(cursor, Some(date.style))?;
            let Parsed {
                value: offset,
                cursor,
            } = parse_offset_segment(cursor)?;
            finish(cursor)?;
            Ok(compose_datetime(date.fields, time.fields, offset, &self.options)?)
        })
    }

    /// Parses a UTC offset on its own: `Z`, `+HH`, `+HHMM` or `+HH:MM`.
    ///
    /// # Errors
    /// Returns a format error for malformed text and a range error for
    /// out-of-range fields.
    pub fn parse_offset<'a>(&self, input: impl Into<Input<'a>>) -> Result<UtcOffset, ParseError> {
        run(input.into(), |cursor| {
            let Parsed {
                value: offset,
                cursor: end,
            } = parse_offset_segment(cursor)?;
            let Some(offset) = offset else {
                return Err(Failure::at(
                    Reason::ExpectedSeparator {
                        field: Field::OffsetHour,
                        expected: '+',
                    },
                    cursor.position(),
                ));
            };
            finish(end)?;
            Ok(offset.resolve(self.options.offset_hours)?)
        })
    }
}

/// Decodes the input and hands it to `parse`, turning any failure into a
/// `ParseError` that owns a copy of the input.
fn run<T>(input: Input<'_>, parse: impl FnOnce(Cursor<'_>) -> Result<T, Failure>) -> Result<T, ParseError> {
    trace!("parsing {input:?}");
    let result = match input.code_points() {
        None => Err(Failure {
            reason: Reason::NotText,
            position: None,
        }),
        Some(text) if text.is_empty() => Err(Failure::at(Reason::Empty, 0)),
        Some(text) => parse(Cursor::new(&text)),
    };
    let failure = match result {
        Ok(value) => return Ok(value),
        Err(failure) => failure,
    };
    let err = failure.into_error(input.to_source_text());
    debug!("rejected {input:?}: {err}");
    Err(err)
}

fn finish(cursor: Cursor<'_>) -> Result<(), Failure> {
    if cursor.is_at_end() {
        Ok(())
    } else {
        Err(Failure::at(Reason::TrailingInput, cursor.position()))
    }
}
