//! Reading the font dictionary and the private dictionary.

use encoding_rs::WINDOWS_1252;
use itertools::Itertools;
use log::warn;
use rustc_hash::FxHashMap;

use crate::encoding::Encoding;
use crate::error::ParseError;
use crate::pfb::{decrypt, CHARSTRING_SEED};
use crate::postscript::{Lexer, Token};

use super::{CharString, PostScriptInfo, Type1Font};

/// Number of random bytes at the start of each encrypted charstring, unless `/lenIV` says
/// otherwise.
const DEFAULT_LEN_IV: i64 = 4;
const DEFAULT_FONT_MATRIX: [f32; 6] = [0.001, 0., 0., 0.001, 0., 0.];
/// Glyph indices are `u16`.
const MAX_GLYPHS: usize = u16::MAX as usize;
const MAX_SUBRS: usize = u16::MAX as usize + 1;

/// Build a font from the cleartext and decrypted private portions of a font program.
///
/// The returned font is not normalised.
pub(super) fn parse_font(cleartext: &[u8], private: &[u8]) -> Result<Type1Font, ParseError> {
    let mut font = Type1Font {
        encoding: Encoding::Standard,
        font_bbox: [0.; 4],
        font_matrix: DEFAULT_FONT_MATRIX,
        info: PostScriptInfo::default(),
        stroke_width: 0.,
        paint_type: 0,
        font_type: 1,
        unique_id: None,
        char_strings: Vec::new(),
        subrs: Vec::new(),
        cmap: FxHashMap::default(),
    };
    parse_font_dict(cleartext, &mut font);
    parse_private_dict(private, &mut font)?;

    if font.char_strings.is_empty() {
        return Err(ParseError::MissingValue);
    }
    Ok(font)
}

fn parse_font_dict(data: &[u8], font: &mut Type1Font) {
    let mut lexer = Lexer::new(data);
    while let Some(token) = lexer.next() {
        let Token::Name(key) = token else {
            continue;
        };
        let info = &mut font.info;
        match key {
            b"FontName" => set(&mut info.font_name, value(&mut lexer, key, name)),
            b"FontType" => set(&mut font.font_type, value(&mut lexer, key, int)),
            b"PaintType" => set(&mut font.paint_type, value(&mut lexer, key, int)),
            b"UniqueID" => font.unique_id = value(&mut lexer, key, int),
            b"StrokeWidth" => set(&mut font.stroke_width, value(&mut lexer, key, number)),
            b"FontMatrix" => {
                let matrix: Option<(f32, f32, f32, f32, f32, f32)> =
                    read_numbers(&mut lexer).and_then(|numbers| numbers.into_iter().collect_tuple());
                match matrix {
                    Some((a, b, c, d, e, f)) => font.font_matrix = [a, b, c, d, e, f],
                    None => warn_malformed(key),
                }
            }
            b"FontBBox" => {
                let bbox: Option<(f32, f32, f32, f32)> =
                    read_numbers(&mut lexer).and_then(|numbers| numbers.into_iter().collect_tuple());
                match bbox {
                    Some((x_min, y_min, x_max, y_max)) => {
                        font.font_bbox = [x_min, y_min, x_max, y_max]
                    }
                    None => warn_malformed(key),
                }
            }
            b"Encoding" => match parse_encoding(&mut lexer) {
                Some(encoding) => font.encoding = encoding,
                None => warn_malformed(key),
            },
            b"version" => set(&mut info.version, value(&mut lexer, key, string)),
            b"Notice" => set(&mut info.notice, value(&mut lexer, key, string)),
            b"Copyright" => set(&mut info.copyright, value(&mut lexer, key, string)),
            b"FullName" => set(&mut info.full_name, value(&mut lexer, key, string)),
            b"FamilyName" => set(&mut info.family_name, value(&mut lexer, key, string)),
            b"Weight" => set(&mut info.weight, value(&mut lexer, key, string)),
            b"ItalicAngle" => set(&mut info.italic_angle, value(&mut lexer, key, number)),
            b"isFixedPitch" => set(&mut info.is_fixed_pitch, value(&mut lexer, key, boolean)),
            b"UnderlinePosition" => {
                set(&mut info.underline_position, value(&mut lexer, key, number))
            }
            b"UnderlineThickness" => {
                set(&mut info.underline_thickness, value(&mut lexer, key, number))
            }
            _ => {}
        }
    }
}

fn parse_private_dict(data: &[u8], font: &mut Type1Font) -> Result<(), ParseError> {
    let mut len_iv = DEFAULT_LEN_IV;
    let mut lexer = Lexer::new(data);
    while let Some(token) = lexer.next() {
        let Token::Name(key) = token else {
            continue;
        };
        match key {
            b"lenIV" => set(&mut len_iv, value(&mut lexer, key, |token| token.as_int())),
            b"Subrs" => font.subrs = parse_subrs(&mut lexer, len_iv)?,
            b"CharStrings" => {
                font.char_strings = parse_char_strings(&mut lexer, len_iv)?;
                // What follows is the end of the program and the trailer
                break;
            }
            _ => {}
        }
    }
    Ok(())
}

/// `/Subrs n array` followed by `dup i <binary> NP` entries.
fn parse_subrs(lexer: &mut Lexer<'_>, len_iv: i64) -> Result<Vec<Vec<u8>>, ParseError> {
    let count = match lexer.next() {
        Some(Token::Int(count)) => usize::try_from(count)?,
        _ => {
            warn_malformed(b"Subrs");
            return Ok(Vec::new());
        }
    };
    if count > MAX_SUBRS {
        return Err(ParseError::LimitExceeded);
    }

    let mut subrs = vec![Vec::new(); count];
    loop {
        match lexer.peek() {
            Some(Token::Raw(b"dup")) => {
                lexer.next();
                let index = lexer
                    .next()
                    .and_then(|token| token.as_int())
                    .and_then(|index| usize::try_from(index).ok());
                match (index, lexer.next()) {
                    (Some(index), Some(Token::Binary(data))) if index < count => {
                        subrs[index] = decrypt_char_string(data, len_iv)
                    }
                    _ => warn!("malformed subroutine entry"),
                }
            }
            // Leftovers of `array` and of the terminators `noaccess put`
            Some(Token::Raw(b"array" | b"put" | b"NP" | b"|")) => {
                lexer.next();
            }
            _ => break,
        }
    }
    Ok(subrs)
}

/// `/CharStrings n dict dup begin` followed by `/name <binary> ND` entries up to `end`.
fn parse_char_strings(
    lexer: &mut Lexer<'_>,
    len_iv: i64,
) -> Result<Vec<CharString>, ParseError> {
    let mut char_strings = Vec::new();
    while let Some(token) = lexer.next() {
        match token {
            Token::Name(name) => match lexer.next() {
                Some(Token::Binary(data)) => {
                    if char_strings.len() == MAX_GLYPHS {
                        return Err(ParseError::LimitExceeded);
                    }
                    char_strings.push(CharString {
                        name: decode_string(name),
                        data: decrypt_char_string(data, len_iv),
                    });
                }
                _ => warn!("malformed charstring for /{}", decode_string(name)),
            },
            Token::Raw(b"end") => break,
            _ => {}
        }
    }
    Ok(char_strings)
}

/// A negative `lenIV` means charstrings are not encrypted.
fn decrypt_char_string(data: &[u8], len_iv: i64) -> Vec<u8> {
    let Ok(skip) = usize::try_from(len_iv) else {
        return data.to_vec();
    };
    let mut plain = decrypt(data, CHARSTRING_SEED);
    plain.drain(..skip.min(plain.len()));
    plain
}

/// `StandardEncoding`, or an array filled with `dup code /name put`.
fn parse_encoding(lexer: &mut Lexer<'_>) -> Option<Encoding> {
    match lexer.next()? {
        Token::Raw(b"StandardEncoding") => Some(Encoding::Standard),
        Token::Raw(name) => {
            warn!(
                "unsupported encoding {}, using StandardEncoding",
                decode_string(name)
            );
            Some(Encoding::Standard)
        }
        Token::Int(_) => {
            let mut encoding = Encoding::empty_custom();
            while let Some(token) = lexer.next() {
                match token {
                    Token::Raw(b"dup") => {
                        let code = lexer
                            .next()
                            .and_then(|token| token.as_int())
                            .and_then(|code| u8::try_from(code).ok());
                        match (code, lexer.next()) {
                            (Some(code), Some(Token::Name(name))) => {
                                encoding.set(code, &decode_string(name))
                            }
                            _ => warn!("malformed Encoding entry"),
                        }
                    }
                    Token::Raw(b"readonly" | b"def") => break,
                    _ => {}
                }
            }
            Some(encoding)
        }
        _ => None,
    }
}

/// Read an array of numbers written as `[ ... ]` or `{ ... }`.
fn read_numbers(lexer: &mut Lexer<'_>) -> Option<Vec<f32>> {
    match lexer.next()? {
        Token::Proc(body) => Lexer::new(body).map(|token| token.as_f32()).collect(),
        Token::Raw(b"[") => {
            let mut numbers = Vec::new();
            loop {
                match lexer.next()? {
                    Token::Raw(b"]") => return Some(numbers),
                    token => numbers.push(token.as_f32()?),
                }
            }
        }
        _ => None,
    }
}

fn value<'a, T>(
    lexer: &mut Lexer<'a>,
    key: &[u8],
    convert: impl FnOnce(Token<'a>) -> Option<T>,
) -> Option<T> {
    let value = lexer.next().and_then(convert);
    if value.is_none() {
        warn_malformed(key);
    }
    value
}

fn set<T>(field: &mut T, value: Option<T>) {
    if let Some(value) = value {
        *field = value;
    }
}

fn warn_malformed(key: &[u8]) {
    warn!("malformed value for /{}", decode_string(key));
}

fn int(token: Token<'_>) -> Option<i32> {
    token.as_int().and_then(|value| i32::try_from(value).ok())
}

fn number(token: Token<'_>) -> Option<f32> {
    token.as_f32()
}

fn boolean(token: Token<'_>) -> Option<bool> {
    token.as_bool()
}

fn name(token: Token<'_>) -> Option<String> {
    match token {
        Token::Name(name) => Some(decode_string(name)),
        _ => None,
    }
}

fn string(token: Token<'_>) -> Option<String> {
    match token {
        Token::LitString(string) => Some(decode_string(&unescape(string))),
        _ => None,
    }
}

/// Strings and names are treated as Windows-1252, which agrees with ISO Latin-1 on the
/// printable range.
fn decode_string(bytes: &[u8]) -> String {
    WINDOWS_1252
        .decode_without_bom_handling(bytes)
        .0
        .into_owned()
}

/// Process the escape sequences of a literal string.
fn unescape(string: &[u8]) -> Vec<u8> {
    let mut unescaped = Vec::with_capacity(string.len());
    let mut bytes = string.iter().copied().peekable();
    while let Some(byte) = bytes.next() {
        if byte != b'\\' {
            unescaped.push(byte);
            continue;
        }
        match bytes.next() {
            Some(b'n') => unescaped.push(b'\n'),
            Some(b'r') => unescaped.push(b'\r'),
            Some(b't') => unescaped.push(b'\t'),
            Some(b'b') => unescaped.push(0x08),
            Some(b'f') => unescaped.push(0x0C),
            // Line continuation
            Some(b'\r') => {
                bytes.next_if_eq(&b'\n');
            }
            Some(b'\n') | None => {}
            Some(digit @ b'0'..=b'7') => {
                let mut value = u32::from(digit - b'0');
                for _ in 0..2 {
                    match bytes.next_if(|byte| matches!(byte, b'0'..=b'7')) {
                        Some(digit) => value = value * 8 + u32::from(digit - b'0'),
                        None => break,
                    }
                }
                // Overflow of the high-order bits is ignored
                unescaped.push(value as u8);
            }
            Some(other) => unescaped.push(other),
        }
    }
    unescaped
}
