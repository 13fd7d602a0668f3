//! Error types

use crate::binary::read::ReadEof;
use std::fmt;

/// Errors that originate when parsing font data
#[derive(Clone, Eq, PartialEq, Debug)]
pub enum ParseError {
    BadEof,
    BadValue,
    BadVersion,
    BadIndex,
    LimitExceeded,
    MissingValue,
}

impl From<ReadEof> for ParseError {
    fn from(_error: ReadEof) -> Self {
        ParseError::BadEof
    }
}

impl From<std::num::TryFromIntError> for ParseError {
    fn from(_error: std::num::TryFromIntError) -> Self {
        ParseError::BadValue
    }
}

impl fmt::Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ParseError::BadEof => write!(f, "end of data reached unexpectedly"),
            ParseError::BadValue => write!(f, "invalid value"),
            ParseError::BadVersion => write!(f, "unexpected font program header"),
            ParseError::BadIndex => write!(f, "invalid data index"),
            ParseError::LimitExceeded => write!(f, "limit exceeded"),
            ParseError::MissingValue => write!(f, "an expected data value was missing"),
        }
    }
}

impl std::error::Error for ParseError {}

/// A list of errors that can occur when interpreting Type 1 charstrings.
#[derive(Clone, Eq, PartialEq, Debug)]
pub enum CharStringError {
    ParseError(ParseError),
    InvalidOperator,
    UnsupportedOperator,
    MissingEndChar,
    NestingLimitReached,
    ArgumentsStackLimitReached,
    InvalidArgumentsStackLength,
    InvalidSubroutineIndex,
    DivisionByZero,
    InvalidFlex,
}

impl From<ParseError> for CharStringError {
    fn from(error: ParseError) -> CharStringError {
        CharStringError::ParseError(error)
    }
}

impl From<ReadEof> for CharStringError {
    fn from(_error: ReadEof) -> CharStringError {
        CharStringError::ParseError(ParseError::BadEof)
    }
}

impl fmt::Display for CharStringError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CharStringError::ParseError(parse_error) => {
                write!(f, "parse error: ")?;
                parse_error.fmt(f)
            }
            CharStringError::InvalidOperator => write!(f, "an invalid operator occurred"),
            CharStringError::UnsupportedOperator => write!(f, "an unsupported operator occurred"),
            CharStringError::MissingEndChar => write!(f, "the 'endchar' operator is missing"),
            CharStringError::NestingLimitReached => write!(f, "subroutines nesting limit reached"),
            CharStringError::ArgumentsStackLimitReached => {
                write!(f, "arguments stack limit reached")
            }
            CharStringError::InvalidArgumentsStackLength => {
                write!(f, "an invalid amount of items are in an arguments stack")
            }
            CharStringError::InvalidSubroutineIndex => write!(f, "an invalid subroutine index"),
            CharStringError::DivisionByZero => write!(f, "division by zero in 'div' operator"),
            CharStringError::InvalidFlex => write!(f, "malformed flex sequence"),
        }
    }
}

impl std::error::Error for CharStringError {}

/// Error returned when loading the outline of a single glyph
#[derive(Clone, Eq, PartialEq, Debug)]
pub enum GlyphError {
    InvalidGlyphIndex(u16),
    CharString(CharStringError),
    /// A glyph referenced by a `seac` composite is itself a composite.
    NestedComposite,
    InvalidSeacCode(i32),
    UnknownSeacGlyph(&'static str),
}

impl From<CharStringError> for GlyphError {
    fn from(error: CharStringError) -> Self {
        GlyphError::CharString(error)
    }
}

impl fmt::Display for GlyphError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GlyphError::InvalidGlyphIndex(index) => write!(f, "invalid glyph index {}", index),
            GlyphError::CharString(err) => write!(f, "charstring: {}", err),
            GlyphError::NestedComposite => write!(f, "invalid nested seac operator"),
            GlyphError::InvalidSeacCode(code) => write!(f, "invalid char code in seac: {}", code),
            GlyphError::UnknownSeacGlyph(name) => {
                write!(f, "unknown glyph name in seac: {}", name)
            }
        }
    }
}

impl std::error::Error for GlyphError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            GlyphError::CharString(err) => Some(err),
            _ => None,
        }
    }
}

/// Error returned from font level operations
#[derive(Clone, Eq, PartialEq, Debug)]
pub enum FontError {
    /// The container or the font dictionaries could not be parsed.
    InvalidFontFile(ParseError),
    NotImplemented,
}

impl From<ParseError> for FontError {
    fn from(error: ParseError) -> Self {
        FontError::InvalidFontFile(error)
    }
}

impl fmt::Display for FontError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FontError::InvalidFontFile(err) => write!(f, "invalid Type 1 font file: {}", err),
            FontError::NotImplemented => write!(f, "feature not implemented"),
        }
    }
}

impl std::error::Error for FontError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            FontError::InvalidFontFile(err) => Some(err),
            FontError::NotImplemented => None,
        }
    }
}
