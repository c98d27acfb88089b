use crate::consts::{
    DAYS_PER_WEEK, MAX_HOUR, MAX_MINUTE, MAX_MONTH, MAX_OFFSET_HOUR, MAX_OFFSET_MINUTE,
    MAX_SECOND, MAX_SUBSECOND, MAX_YEAR, MIN_YEAR,
};
use crate::input::SourceText;
use crate::prelude::*;
use crate::FormatStyle;

/// The three ways a parse can fail.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display)]
pub enum ErrorKind {
    /// The input was not text at all (e.g. raw bytes).
    #[display(fmt = "type mismatch")]
    TypeMismatch,
    /// The text does not match the ISO 8601 grammar.
    #[display(fmt = "format error")]
    Format,
    /// The text is well formed but names a value that cannot exist.
    #[display(fmt = "range error")]
    Range,
}

/// Names the component a failure is attached to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display)]
pub enum Field {
    #[display(fmt = "year")]
    Year,
    #[display(fmt = "month")]
    Month,
    #[display(fmt = "day")]
    Day,
    #[display(fmt = "week")]
    Week,
    #[display(fmt = "weekday")]
    Weekday,
    #[display(fmt = "date/time separator")]
    Boundary,
    #[display(fmt = "hour")]
    Hour,
    #[display(fmt = "minute")]
    Minute,
    #[display(fmt = "second")]
    Second,
    #[display(fmt = "fraction of a second")]
    Fraction,
    #[display(fmt = "offset hour")]
    OffsetHour,
    #[display(fmt = "offset minute")]
    OffsetMinute,
    #[display(fmt = "offset second")]
    OffsetSecond,
    #[display(fmt = "offset fraction")]
    OffsetFraction,
}

/// A component value outside of its legal range.
///
/// Returned directly by the value constructors, and wrapped in a
/// [`ParseError`] of kind [`ErrorKind::Range`] when it comes out of a parse.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, thiserror::Error)]
pub enum ValueError {
    #[error("year {0} is out of range (must be {min}-{max})", min = MIN_YEAR, max = MAX_YEAR)]
    Year(u16),
    #[error("month {0} is out of range (must be 1-{max})", max = MAX_MONTH)]
    Month(u8),
    #[error("day {day} does not exist in {year:04}-{month:02}")]
    Day { year: u16, month: u8, day: u8 },
    #[error("week {week} does not exist in ISO year {year:04}")]
    Week { year: u16, week: u8 },
    #[error("weekday {0} is out of range (must be 1-{max})", max = DAYS_PER_WEEK)]
    Weekday(u8),
    #[error("hour {0} is out of range (must be 0-{max})", max = MAX_HOUR)]
    Hour(u8),
    #[error("minute {0} is out of range (must be 0-{max})", max = MAX_MINUTE)]
    Minute(u8),
    #[error("second {0} is out of range (must be 0-{max})", max = MAX_SECOND)]
    Second(u8),
    #[error("subsecond {0} is out of range (must be 0-{max})", max = MAX_SUBSECOND)]
    Subsecond(u32),
    #[error("offset hour {0} is out of range (must be 0-{max})", max = MAX_OFFSET_HOUR)]
    OffsetHour(u8),
    #[error("offset minute {0} is out of range (must be 0-{max})", max = MAX_OFFSET_MINUTE)]
    OffsetMinute(u8),
}

impl ValueError {
    /// The component that is out of range.
    pub const fn field(&self) -> Field {
        match self {
            Self::Year(_) => Field::Year,
            Self::Month(_) => Field::Month,
            Self::Day { .. } => Field::Day,
            Self::Week { .. } => Field::Week,
            Self::Weekday(_) => Field::Weekday,
            Self::Hour(_) => Field::Hour,
            Self::Minute(_) => Field::Minute,
            Self::Second(_) => Field::Second,
            Self::Subsecond(_) => Field::Fraction,
            Self::OffsetHour(_) => Field::OffsetHour,
            Self::OffsetMinute(_) => Field::OffsetMinute,
        }
    }
}

/// What went wrong, in enough detail to point at the offending field.
#[derive(Debug, Clone, PartialEq, Eq, Display)]
#[non_exhaustive]
pub enum Reason {
    #[display(fmt = "expected text, found binary data")]
    NotText,
    #[display(fmt = "empty input")]
    Empty,
    #[display(fmt = "expected {expected} digit(s) for {field}, found {found}")]
    ExpectedDigits {
        field: Field,
        expected: usize,
        found: usize,
    },
    #[display(fmt = "expected '{expected}' before {field}")]
    ExpectedSeparator { field: Field, expected: char },
    #[display(fmt = "the date/time separator must not be a digit")]
    DigitBoundary,
    #[display(fmt = "{field} is in {found} format but the date is in {expected} format")]
    MixedStyle {
        field: Field,
        expected: FormatStyle,
        found: FormatStyle,
    },
    #[display(fmt = "no digits after the decimal marker of the {field}")]
    EmptyFraction { field: Field },
    #[display(fmt = "unexpected trailing input")]
    TrailingInput,
    #[display(fmt = "{_0}")]
    Value(ValueError),
}

impl Reason {
    pub const fn kind(&self) -> ErrorKind {
        match self {
            Self::NotText => ErrorKind::TypeMismatch,
            Self::Value(_) => ErrorKind::Range,
            _ => ErrorKind::Format,
        }
    }

    pub const fn field(&self) -> Option<Field> {
        match self {
            Self::ExpectedDigits { field, .. }
            | Self::ExpectedSeparator { field, .. }
            | Self::MixedStyle { field, .. }
            | Self::EmptyFraction { field } => Some(*field),
            Self::DigitBoundary => Some(Field::Boundary),
            Self::Value(err) => Some(err.field()),
            Self::NotText | Self::Empty | Self::TrailingInput => None,
        }
    }
}

/// A failed parse, holding an unmodified copy of the input that caused it.
#[derive(Debug, Clone, PartialEq, Eq, Display)]
#[display(fmt = "invalid ISO 8601 input {input}: {reason}")]
pub struct ParseError {
    reason: Reason,
    input: SourceText,
    position: Option<usize>,
}

impl ParseError {
    pub(crate) const fn new(reason: Reason, input: SourceText, position: Option<usize>) -> Self {
        Self {
            reason,
            input,
            position,
        }
    }

    /// Which of the three failure classes this is.
    pub const fn kind(&self) -> ErrorKind {
        self.reason.kind()
    }

    pub const fn reason(&self) -> &Reason {
        &self.reason
    }

    /// The component the failure is attached to, when there is one.
    pub const fn field(&self) -> Option<Field> {
        self.reason.field()
    }

    /// Index of the offending code point in the input.
    ///
    /// `None` for type mismatches and for range failures, which concern a
    /// decoded value rather than a single location.
    pub const fn position(&self) -> Option<usize> {
        self.position
    }

    /// The input exactly as it was handed to the parser.
    pub const fn input(&self) -> &SourceText {
        &self.input
    }

    pub fn into_input(self) -> SourceText {
        self.input
    }
}

impl std::error::Error for ParseError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match &self.reason {
            Reason::Value(err) => Some(err),
            _ => None,
        }
    }
}

/// A failure inside a sub-parser, before it is tied to the input text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct Failure {
    pub(crate) reason: Reason,
    pub(crate) position: Option<usize>,
}

impl Failure {
    pub(crate) const fn at(reason: Reason, position: usize) -> Self {
        Self {
            reason,
            position: Some(position),
        }
    }

    pub(crate) fn into_error(self, input: SourceText) -> ParseError {
        ParseError::new(self.reason, input, self.position)
    }
}

impl From<ValueError> for Failure {
    fn from(err: ValueError) -> Self {
        Self {
            reason: Reason::Value(err),
            position: None,
        }
    }
}
