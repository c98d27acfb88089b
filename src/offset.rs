use crate::consts::{FIELD_DIGITS, MAX_OFFSET_MINUTE, UTC_DESIGNATOR};
use crate::cursor::{Cursor, Parsed, read_u8};
use crate::error::{Failure, Field};
use crate::options::OffsetHourPolicy;
use crate::separator::{self, Sign};
use crate::time::{field_separator, has_next_field, parse_fraction, style_after_hour};
use crate::{FormatStyle, ValueError};
use std::fmt;

/// The largest offset two hour digits can spell: 99:59.
const MAX_TOTAL_MINUTES: i16 = 99 * 60 + 59;
const MINUTES_PER_HOUR: i16 = 60;

/// A fixed offset from UTC, in whole minutes.
///
/// A value with no offset at all is modelled as `Option<UtcOffset>::None`,
/// never as `UtcOffset::UTC`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct UtcOffset {
    minutes: i16,
}

impl UtcOffset {
    pub const UTC: Self = Self { minutes: 0 };

    /// # Errors
    /// `ValueError::OffsetHour` if the offset needs more than two hour digits.
    pub const fn from_minutes(minutes: i16) -> Result<Self, ValueError> {
        if minutes.unsigned_abs() > MAX_TOTAL_MINUTES.unsigned_abs() {
            // Saturates; only used for the message
            let hours = minutes.unsigned_abs() / MINUTES_PER_HOUR.unsigned_abs();
            #[allow(clippy::cast_possible_truncation)]
            let hours = if hours > u8::MAX as u16 { u8::MAX } else { hours as u8 };
            return Err(ValueError::OffsetHour(hours));
        }
        Ok(Self { minutes })
    }

    /// # Errors
    /// `ValueError::OffsetMinute` for minutes above 59,
    /// `ValueError::OffsetHour` for hours above 99.
    pub const fn from_hm(sign: Sign, hours: u8, minutes: u8) -> Result<Self, ValueError> {
        if minutes > MAX_OFFSET_MINUTE {
            return Err(ValueError::OffsetMinute(minutes));
        }
        let magnitude = hours as i16 * MINUTES_PER_HOUR + minutes as i16;
        Self::from_minutes(sign.as_i16() * magnitude)
    }

    pub const fn total_minutes(&self) -> i16 {
        self.minutes
    }

    /// Hour part of the magnitude, at most 99.
    #[allow(clippy::cast_possible_truncation)]
    pub const fn hours(&self) -> u8 {
        (self.minutes.unsigned_abs() / MINUTES_PER_HOUR.unsigned_abs()) as u8
    }

    /// Minute part of the magnitude.
    #[allow(clippy::cast_possible_truncation)]
    pub const fn minutes(&self) -> u8 {
        (self.minutes.unsigned_abs() % MINUTES_PER_HOUR.unsigned_abs()) as u8
    }

    /// `Negative` only for offsets west of UTC; zero counts as positive.
    pub const fn sign(&self) -> Sign {
        if self.minutes < 0 {
            Sign::Negative
        } else {
            Sign::Positive
        }
    }

    pub const fn is_negative(&self) -> bool {
        self.minutes < 0
    }

    pub const fn is_utc(&self) -> bool {
        self.minutes == 0
    }

    /// Formats as `+HH:MM` or `+HHMM`.
    pub fn to_iso_string(&self, style: FormatStyle) -> String {
        match style {
            FormatStyle::Extended => self.to_string(),
            FormatStyle::Basic => format!("{}{:02}{:02}", self.sign(), self.hours(), self.minutes()),
        }
    }
}

impl fmt::Display for UtcOffset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{:02}:{:02}", self.sign(), self.hours(), self.minutes())
    }
}

/// The numeric fields of an offset, before range checks.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum OffsetFields {
    Utc,
    Fixed { sign: Sign, hours: u8, minutes: u8 },
}

impl OffsetFields {
    pub(crate) const fn resolve(self, policy: OffsetHourPolicy) -> Result<UtcOffset, ValueError> {
        match self {
            Self::Utc => Ok(UtcOffset::UTC),
            Self::Fixed {
                sign,
                hours,
                minutes,
            } => {
                if !policy.allows(hours) {
                    return Err(ValueError::OffsetHour(hours));
                }
                UtcOffset::from_hm(sign, hours, minutes)
            }
        }
    }
}

// Offset :::
//   Z | z
//   sign hh [: mm [: ss [frac]]]
//   sign hh [mm [ss [frac]]]
//
/// Parses an optional UTC offset.
///
/// Anything other than `Z` or a sign leaves the cursor where it was and
/// yields `None`; the caller decides whether that is trailing garbage. The
/// offset picks its own style from its first separator. Seconds and their
/// fraction must be well formed but do not change the value.
pub(crate) fn parse_offset_segment(cursor: Cursor<'_>) -> Result<Parsed<'_, Option<OffsetFields>>, Failure> {
    let Some(next) = cursor.peek() else {
        return Ok(Parsed {
            value: None,
            cursor,
        });
    };
    if next.is(UTC_DESIGNATOR) || next.is(UTC_DESIGNATOR.to_ascii_lowercase()) {
        return Ok(Parsed {
            value: Some(OffsetFields::Utc),
            cursor: cursor.bump(),
        });
    }
    let Some(sign) = separator::sign(next) else {
        return Ok(Parsed {
            value: None,
            cursor,
        });
    };

    let Parsed {
        value: hours,
        cursor,
    } = read_u8(cursor.bump(), Field::OffsetHour, FIELD_DIGITS)?;
    let Some(style) = style_after_hour(&cursor) else {
        return Ok(Parsed {
            value: Some(OffsetFields::Fixed {
                sign,
                hours,
                minutes: 0,
            }),
            cursor,
        });
    };

    let cursor = field_separator(cursor, style, Field::OffsetMinute)?;
    let Parsed {
        value: minutes,
        cursor,
    } = read_u8(cursor, Field::OffsetMinute, FIELD_DIGITS)?;

    let cursor = if has_next_field(&cursor, style) {
        let cursor = field_separator(cursor, style, Field::OffsetSecond)?;
        let Parsed { cursor, .. } = read_u8(cursor, Field::OffsetSecond, FIELD_DIGITS)?;
        let Parsed { cursor, .. } = parse_fraction(cursor, Field::OffsetFraction)?;
        cursor
    } else {
        cursor
    };

    Ok(Parsed {
        value: Some(OffsetFields::Fixed {
            sign,
            hours,
            minutes,
        }),
        cursor,
    })
}
