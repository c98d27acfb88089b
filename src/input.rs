//! The values a caller can hand to the parser, and the code point view the
//! parser works on.
//!
//! Text arrives either as UTF-8 (`&str`) or as UTF-16 code units. The latter
//! may carry unpaired surrogates, which `char` cannot represent, so the parser
//! reads [`CodePoint`]s: plain scalar values that may also be a lone
//! surrogate.

use crate::prelude::*;
use std::char::decode_utf16;
use std::fmt::{self, Write};

/// A single Unicode code point, including surrogate values `U+D800..=U+DFFF`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct CodePoint(u32);

impl CodePoint {
    #[inline]
    pub const fn new(value: u32) -> Self {
        Self(value)
    }

    #[inline]
    pub const fn get(self) -> u32 {
        self.0
    }

    /// The `char` for this code point, or `None` for a lone surrogate.
    #[inline]
    pub const fn to_char(self) -> Option<char> {
        char::from_u32(self.0)
    }

    #[inline]
    pub const fn is_surrogate(self) -> bool {
        matches!(self.0, 0xD800..=0xDFFF)
    }

    /// The value of an ASCII decimal digit.
    #[inline]
    pub const fn ascii_digit(self) -> Option<u8> {
        match self.0 {
            // Range checked, fits in a byte
            #[allow(clippy::cast_possible_truncation)]
            v @ 0x30..=0x39 => Some((v - 0x30) as u8),
            _ => None,
        }
    }

    #[inline]
    pub const fn is(self, c: char) -> bool {
        self.0 == c as u32
    }
}

impl From<char> for CodePoint {
    fn from(c: char) -> Self {
        Self(u32::from(c))
    }
}

impl fmt::Display for CodePoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.to_char() {
            Some(c) => f.write_char(c),
            None => write!(f, "\\u{{{:x}}}", self.0),
        }
    }
}

/// Borrowed input to one of the parse routines.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Input<'a> {
    /// UTF-8 text.
    Str(&'a str),
    /// UTF-16 code units, possibly with unpaired surrogates.
    Utf16(&'a [u16]),
    /// Raw binary data. Never parsed; always a type mismatch.
    Bytes(&'a [u8]),
}

impl Input<'_> {
    #[inline]
    pub const fn is_text(&self) -> bool {
        !matches!(self, Self::Bytes(_))
    }

    /// Decodes text into code points. `None` for binary input.
    pub(crate) fn code_points(&self) -> Option<Vec<CodePoint>> {
        match *self {
            Self::Str(s) => Some(s.chars().map(CodePoint::from).collect()),
            Self::Utf16(units) => Some(
                decode_utf16(units.iter().copied())
                    .map(|r| match r {
                        Ok(c) => CodePoint::from(c),
                        Err(e) => CodePoint::new(u32::from(e.unpaired_surrogate())),
                    })
                    .collect(),
            ),
            Self::Bytes(_) => None,
        }
    }

    pub(crate) fn to_source_text(self) -> SourceText {
        match self {
            Self::Str(s) => SourceText::Str(s.to_owned()),
            Self::Utf16(units) => SourceText::Utf16(units.to_vec()),
            Self::Bytes(bytes) => SourceText::Bytes(bytes.to_vec()),
        }
    }
}

impl<'a> From<&'a str> for Input<'a> {
    fn from(s: &'a str) -> Self {
        Self::Str(s)
    }
}

impl<'a> From<&'a String> for Input<'a> {
    fn from(s: &'a String) -> Self {
        Self::Str(s)
    }
}

impl<'a> From<&'a [u16]> for Input<'a> {
    fn from(units: &'a [u16]) -> Self {
        Self::Utf16(units)
    }
}

impl<'a> From<&'a Vec<u16>> for Input<'a> {
    fn from(units: &'a Vec<u16>) -> Self {
        Self::Utf16(units)
    }
}

impl<'a> From<&'a [u8]> for Input<'a> {
    fn from(bytes: &'a [u8]) -> Self {
        Self::Bytes(bytes)
    }
}

impl<'a> From<&'a Vec<u8>> for Input<'a> {
    fn from(bytes: &'a Vec<u8>) -> Self {
        Self::Bytes(bytes)
    }
}

impl<'a, const N: usize> From<&'a [u8; N]> for Input<'a> {
    fn from(bytes: &'a [u8; N]) -> Self {
        Self::Bytes(bytes)
    }
}

/// An owned, unmodified copy of the input, kept for diagnostics.
#[derive(Debug, Clone, PartialEq, Eq, Hash, From)]
pub enum SourceText {
    Str(String),
    Utf16(Vec<u16>),
    Bytes(Vec<u8>),
}

impl SourceText {
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::Str(s) => Some(s),
            Self::Utf16(_) | Self::Bytes(_) => None,
        }
    }

    pub fn as_utf16(&self) -> Option<&[u16]> {
        match self {
            Self::Utf16(units) => Some(units),
            Self::Str(_) | Self::Bytes(_) => None,
        }
    }

    pub fn as_bytes(&self) -> Option<&[u8]> {
        match self {
            Self::Bytes(bytes) => Some(bytes),
            Self::Str(_) | Self::Utf16(_) => None,
        }
    }

    /// Text with every lone surrogate replaced by U+FFFD.
    pub fn to_string_lossy(&self) -> String {
        match self {
            Self::Str(s) => s.clone(),
            Self::Utf16(units) => String::from_utf16_lossy(units),
            Self::Bytes(bytes) => String::from_utf8_lossy(bytes).into_owned(),
        }
    }
}

impl fmt::Display for SourceText {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Str(s) => write!(f, "{s:?}"),
            Self::Utf16(units) => {
                f.write_char('"')?;
                for r in decode_utf16(units.iter().copied()) {
                    match r {
                        Ok(c) => write!(f, "{}", c.escape_debug())?,
                        Err(e) => write!(f, "\\u{{{:x}}}", e.unpaired_surrogate())?,
                    }
                }
                f.write_char('"')
            }
            Self::Bytes(bytes) => write!(f, "b\"{}\"", bytes.escape_ascii()),
        }
    }
}
