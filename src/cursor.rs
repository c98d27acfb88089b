//! Read position over decoded input, and the fixed-width digit reader every
//! sub-parser is built on.
//!
//! A [`Cursor`] is a plain value. Sub-parsers take one and hand back a new
//! one inside [`Parsed`], so no parser state outlives a call.

use crate::error::{Failure, Field, Reason};
use crate::input::CodePoint;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct Cursor<'a> {
    text: &'a [CodePoint],
    pos: usize,
}

impl<'a> Cursor<'a> {
    pub(crate) const fn new(text: &'a [CodePoint]) -> Self {
        Self { text, pos: 0 }
    }

    /// Index of the next code point to read.
    #[inline]
    pub(crate) const fn position(&self) -> usize {
        self.pos
    }

    #[inline]
    pub(crate) const fn is_at_end(&self) -> bool {
        self.pos >= self.text.len()
    }

    #[inline]
    pub(crate) fn peek(&self) -> Option<CodePoint> {
        self.peek_nth(0)
    }

    #[inline]
    pub(crate) fn peek_nth(&self, n: usize) -> Option<CodePoint> {
        self.text.get(self.pos + n).copied()
    }

    /// Whether the next code point is `c`.
    #[inline]
    pub(crate) fn at(&self, c: char) -> bool {
        self.peek().is_some_and(|cp| cp.is(c))
    }

    #[inline]
    pub(crate) fn at_digit(&self) -> bool {
        self.peek().and_then(CodePoint::ascii_digit).is_some()
    }

    /// Steps over one code point, saturating at the end of input.
    #[inline]
    pub(crate) fn bump(self) -> Self {
        Self {
            text: self.text,
            pos: (self.pos + 1).min(self.text.len()),
        }
    }

    /// Consumes `c` if it is next.
    #[inline]
    pub(crate) fn eat(self, c: char) -> Option<Self> {
        self.at(c).then(|| self.bump())
    }

    /// Consumes the separator `c`, failing if something else is next.
    pub(crate) fn expect(self, c: char, before: Field) -> Result<Self, Failure> {
        self.eat(c).ok_or_else(|| {
            Failure::at(
                Reason::ExpectedSeparator {
                    field: before,
                    expected: c,
                },
                self.pos,
            )
        })
    }
}

/// A value produced by a sub-parser, plus where reading stopped.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct Parsed<'a, T> {
    pub(crate) value: T,
    pub(crate) cursor: Cursor<'a>,
}

/// The result of reading a run of digits.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct Digits {
    pub(crate) value: u32,
    pub(crate) count: usize,
}

/// Reads between `min` and `max` ASCII digits into an integer.
///
/// Stops at the first non-digit or after `max` digits, whichever comes
/// first. Fewer than `min` digits is a format error that points at the
/// code point where the next digit was expected.
pub(crate) fn read_digits(
    cursor: Cursor<'_>,
    field: Field,
    min: usize,
    max: usize,
) -> Result<Parsed<'_, Digits>, Failure> {
    debug_assert!(min <= max && max <= 9, "field wider than a u32 holds");

    let mut cursor = cursor;
    let mut value = 0u32;
    let mut count = 0;
    while count < max {
        let Some(digit) = cursor.peek().and_then(CodePoint::ascii_digit) else {
            break;
        };
        value = value * 10 + u32::from(digit);
        count += 1;
        cursor = cursor.bump();
    }

    if count < min {
        return Err(Failure::at(
            Reason::ExpectedDigits {
                field,
                expected: min,
                found: count,
            },
            cursor.position(),
        ));
    }
    Ok(Parsed {
        value: Digits { value, count },
        cursor,
    })
}

/// Reads exactly `width` digits into a `u8`.
pub(crate) fn read_u8(
    cursor: Cursor<'_>,
    field: Field,
    width: usize,
) -> Result<Parsed<'_, u8>, Failure> {
    debug_assert!(width <= 2);
    let Parsed { value, cursor } = read_digits(cursor, field, width, width)?;
    // At most two digits
    #[allow(clippy::cast_possible_truncation)]
    let value = value.value as u8;
    Ok(Parsed { value, cursor })
}

/// Reads exactly `width` digits into a `u16`.
pub(crate) fn read_u16(
    cursor: Cursor<'_>,
    field: Field,
    width: usize,
) -> Result<Parsed<'_, u16>, Failure> {
    debug_assert!(width <= 4);
    let Parsed { value, cursor } = read_digits(cursor, field, width, width)?;
    // At most four digits
    #[allow(clippy::cast_possible_truncation)]
    let value = value.value as u16;
    Ok(Parsed { value, cursor })
}
