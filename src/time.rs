use crate::consts::{
    DECIMAL_MARKERS, FIELD_DIGITS, MAX_HOUR, MAX_MINUTE, MAX_SECOND, MAX_SUBSECOND,
    SUBSECOND_DIGITS, TIME_SEPARATOR,
};
use crate::cursor::{Cursor, Parsed, read_u8};
use crate::error::{Failure, Field, Reason};
use crate::{FormatStyle, ValueError};
use std::fmt;

/// A wall-clock time with microsecond resolution. There is no leap second.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct TimeOfDay {
    hour: u8,
    minute: u8,
    second: u8,
    subsecond: u32,
}

impl TimeOfDay {
    pub const MIDNIGHT: Self = Self {
        hour: 0,
        minute: 0,
        second: 0,
        subsecond: 0,
    };

    /// Creates a time of day; `subsecond` is in microseconds.
    ///
    /// # Errors
    /// Returns the `ValueError` for the first component out of range.
    pub const fn new(hour: u8, minute: u8, second: u8, subsecond: u32) -> Result<Self, ValueError> {
        if hour > MAX_HOUR {
            return Err(ValueError::Hour(hour));
        }
        if minute > MAX_MINUTE {
            return Err(ValueError::Minute(minute));
        }
        if second > MAX_SECOND {
            return Err(ValueError::Second(second));
        }
        if subsecond > MAX_SUBSECOND {
            return Err(ValueError::Subsecond(subsecond));
        }
        Ok(Self {
            hour,
            minute,
            second,
            subsecond,
        })
    }

    pub const fn hour(&self) -> u8 {
        self.hour
    }

    pub const fn minute(&self) -> u8 {
        self.minute
    }

    pub const fn second(&self) -> u8 {
        self.second
    }

    /// Fraction of the second, in microseconds.
    pub const fn subsecond(&self) -> u32 {
        self.subsecond
    }

    /// Formats as `HH:MM:SS[.ffffff]` or `HHMMSS[.ffffff]`. The fraction is
    /// written only when it is non-zero.
    pub fn to_iso_string(&self, style: FormatStyle) -> String {
        match style {
            FormatStyle::Extended => self.to_string(),
            FormatStyle::Basic => {
                let mut out = format!("{:02}{:02}{:02}", self.hour, self.minute, self.second);
                if self.subsecond != 0 {
                    out.push_str(&format!(".{:06}", self.subsecond));
                }
                out
            }
        }
    }
}

impl fmt::Display for TimeOfDay {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:02}:{:02}:{:02}", self.hour, self.minute, self.second)?;
        if self.subsecond != 0 {
            write!(f, ".{:06}", self.subsecond)?;
        }
        Ok(())
    }
}

/// The numeric fields of a time segment, before range checks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub(crate) struct TimeFields {
    pub(crate) hour: u8,
    pub(crate) minute: u8,
    pub(crate) second: u8,
    pub(crate) subsecond: u32,
}

impl TimeFields {
    pub(crate) const fn resolve(self) -> Result<TimeOfDay, ValueError> {
        TimeOfDay::new(self.hour, self.minute, self.second, self.subsecond)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct TimeSegment {
    pub(crate) fields: TimeFields,
    /// `None` when the hour stands alone, which fits either style.
    pub(crate) style: Option<FormatStyle>,
}

/// The style a time or offset switches to after its hour, judged by what
/// follows it: `:` for extended, a digit for basic.
pub(crate) fn style_after_hour(cursor: &Cursor<'_>) -> Option<FormatStyle> {
    if cursor.at(TIME_SEPARATOR) {
        Some(FormatStyle::Extended)
    } else if cursor.at_digit() {
        Some(FormatStyle::Basic)
    } else {
        None
    }
}

/// Consumes the separator in front of `field` if the style has one.
pub(crate) fn field_separator(cursor: Cursor<'_>, style: FormatStyle, field: Field) -> Result<Cursor<'_>, Failure> {
    if style.is_extended() {
        cursor.expect(TIME_SEPARATOR, field)
    } else {
        Ok(cursor)
    }
}

/// Whether another field follows in the given style.
pub(crate) fn has_next_field(cursor: &Cursor<'_>, style: FormatStyle) -> bool {
    if style.is_extended() {
        cursor.at(TIME_SEPARATOR)
    } else {
        cursor.at_digit()
    }
}

// Time :::
//   hh
//   hh : mm
//   hh : mm : ss [frac]
//   hh mm
//   hh mm ss [frac]
//
/// Parses hour, minute, second and fraction.
///
/// `required` is the style already fixed by the date segment. A time whose
/// own style differs is a format error; a lone hour fits either style.
pub(crate) fn parse_time_segment(
    cursor: Cursor<'_>,
    required: Option<FormatStyle>,
) -> Result<Parsed<'_, TimeSegment>, Failure> {
    let Parsed {
        value: hour,
        cursor,
    } = read_u8(cursor, Field::Hour, FIELD_DIGITS)?;
    let mut fields = TimeFields {
        hour,
        ..TimeFields::default()
    };

    let Some(style) = style_after_hour(&cursor) else {
        return Ok(Parsed {
            value: TimeSegment {
                fields,
                style: None,
            },
            cursor,
        });
    };
    if let Some(expected) = required {
        if expected != style {
            return Err(Failure::at(
                Reason::MixedStyle {
                    field: Field::Minute,
                    expected,
                    found: style,
                },
                cursor.position(),
            ));
        }
    }

    let cursor = field_separator(cursor, style, Field::Minute)?;
    let Parsed {
        value: minute,
        cursor,
    } = read_u8(cursor, Field::Minute, FIELD_DIGITS)?;
    fields.minute = minute;

    let cursor = if has_next_field(&cursor, style) {
        let cursor = field_separator(cursor, style, Field::Second)?;
        let Parsed {
            value: second,
            cursor,
        } = read_u8(cursor, Field::Second, FIELD_DIGITS)?;
        fields.second = second;

        let Parsed {
            value: subsecond,
            cursor,
        } = parse_fraction(cursor, Field::Fraction)?;
        fields.subsecond = subsecond.unwrap_or(0);
        cursor
    } else {
        cursor
    };

    Ok(Parsed {
        value: TimeSegment {
            fields,
            style: Some(style),
        },
        cursor,
    })
}

// Fraction :::
//   ( . | , ) d+
//
/// Parses an optional decimal fraction into microseconds.
///
/// The first six digits are kept, shorter runs are padded on the right and
/// any further digits are consumed and dropped: `.1` is 100000 and
/// `.1234567` is 123456.
pub(crate) fn parse_fraction(cursor: Cursor<'_>, field: Field) -> Result<Parsed<'_, Option<u32>>, Failure> {
    let Some(marker) = cursor.peek() else {
        return Ok(Parsed {
            value: None,
            cursor,
        });
    };
    if !DECIMAL_MARKERS.iter().any(|&c| marker.is(c)) {
        return Ok(Parsed {
            value: None,
            cursor,
        });
    }

    let mut cursor = cursor.bump();
    let mut value = 0u32;
    let mut count = 0usize;
    while let Some(digit) = cursor.peek().and_then(|cp| cp.ascii_digit()) {
        if count < SUBSECOND_DIGITS {
            value = value * 10 + u32::from(digit);
        }
        count += 1;
        cursor = cursor.bump();
    }

    if count == 0 {
        return Err(Failure::at(Reason::EmptyFraction { field }, cursor.position()));
    }
    for _ in count..SUBSECOND_DIGITS {
        value *= 10;
    }
    Ok(Parsed {
        value: Some(value),
        cursor,
    })
}
