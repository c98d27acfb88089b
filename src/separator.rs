use crate::cursor::{Cursor, Parsed};
use crate::error::{Failure, Reason};
use crate::input::CodePoint;
use crate::prelude::*;

/// Direction of a UTC offset.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display)]
pub enum Sign {
    #[display(fmt = "+")]
    Positive,
    #[display(fmt = "-")]
    Negative,
}

impl Sign {
    #[inline]
    pub const fn as_i16(self) -> i16 {
        match self {
            Self::Positive => 1,
            Self::Negative => -1,
        }
    }
}

/// How the parser sees a code point at a field boundary.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum CodePointClass {
    /// An ASCII decimal digit and its value.
    Digit(u8),
    /// `+` or `-`, which may open a UTC offset.
    Sign(Sign),
    /// Anything else, surrogates included.
    Other,
}

/// Classifies by code point identity only; width and surrogate status don't matter.
pub(crate) const fn classify(cp: CodePoint) -> CodePointClass {
    if let Some(digit) = cp.ascii_digit() {
        return CodePointClass::Digit(digit);
    }
    if cp.is('+') {
        CodePointClass::Sign(Sign::Positive)
    } else if cp.is('-') {
        CodePointClass::Sign(Sign::Negative)
    } else {
        CodePointClass::Other
    }
}

/// Whether `cp` may sit between the date and the time of a date-time.
///
/// Any code point except an ASCII digit qualifies: `T` and space in
/// practice, but also signs, multi-byte characters and lone surrogates.
#[inline]
pub(crate) const fn is_boundary(cp: CodePoint) -> bool {
    !matches!(classify(cp), CodePointClass::Digit(_))
}

#[inline]
pub(crate) const fn sign(cp: CodePoint) -> Option<Sign> {
    match classify(cp) {
        CodePointClass::Sign(sign) => Some(sign),
        CodePointClass::Digit(_) | CodePointClass::Other => None,
    }
}

/// Consumes the single code point separating date and time.
pub(crate) fn parse_boundary(cursor: Cursor<'_>) -> Result<Parsed<'_, CodePoint>, Failure> {
    match cursor.peek() {
        Some(cp) if is_boundary(cp) => Ok(Parsed {
            value: cp,
            cursor: cursor.bump(),
        }),
        Some(_) => Err(Failure::at(Reason::DigitBoundary, cursor.position())),
        // Callers only look for a boundary when input remains
        None => Err(Failure::at(Reason::TrailingInput, cursor.position())),
    }
}
