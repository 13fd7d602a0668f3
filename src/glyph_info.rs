//! Utilities for mapping glyph names to Unicode.
//!
//! Type 1 fonts carry no character map, only glyph names. Names are resolved following the
//! [Adobe Glyph List Specification](https://github.com/adobe-type-tools/agl-specification):
//! a lookup in the Adobe Glyph List (as provided by the `glyph-names` crate), then the `uniXXXX`
//! and `uXXXX[XX]` forms, after dropping any suffix that follows a period.

use std::borrow::Cow;

use lazy_static::lazy_static;
use rustc_hash::FxHashMap;

lazy_static! {
    /// `glyph-names` maps code points to names, this is the reverse direction.
    static ref NAME_TO_CHAR: FxHashMap<&'static str, char> = {
        let mut map = FxHashMap::default();
        // Adobe Glyph List names are all in the Basic Multilingual Plane
        for ch in '\0'..='\u{FFFF}' {
            if let Some(Cow::Borrowed(name)) = glyph_names::glyph_name(u32::from(ch)) {
                map.entry(name).or_insert(ch);
            }
        }
        map
    };
}

/// Resolve a glyph name to the Unicode scalar value it represents.
///
/// Returns `None` for names that can't be mapped, including ligature names like `f_i` that
/// stand for more than one character.
pub fn glyph_name_to_char(name: &str) -> Option<char> {
    // Everything after the first period is a variant suffix (`a.sc`, `one.oldstyle`)
    let base = match name.find('.') {
        Some(0) => return None,
        Some(index) => &name[..index],
        None => name,
    };
    if base.is_empty() || base.contains('_') {
        return None;
    }

    if let Some(&ch) = NAME_TO_CHAR.get(base) {
        return Some(ch);
    }

    if let Some(hex) = base.strip_prefix("uni") {
        if hex.len() == 4 {
            return parse_code_point(hex);
        }
    }
    if let Some(hex) = base.strip_prefix('u') {
        if (4..=6).contains(&hex.len()) {
            return parse_code_point(hex);
        }
    }

    None
}

fn parse_code_point(hex: &str) -> Option<char> {
    if !hex.bytes().all(|b| b.is_ascii_hexdigit()) {
        return None;
    }
    u32::from_str_radix(hex, 16).ok().and_then(char::from_u32)
}
