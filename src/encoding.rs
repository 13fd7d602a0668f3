//! The builtin encoding of a Type 1 font and the Adobe Standard Encoding.
//!
//! Refer to Appendix B of the [PostScript Language Reference Manual](https://www.adobe.com/jp/print/postscript/pdfs/PLRM.pdf)
//! for the Standard Encoding vector.

/// Name of the placeholder glyph.
pub const NOTDEF: &str = ".notdef";

/// The builtin encoding of a font, mapping byte codes to glyph names.
#[derive(Clone, Debug, PartialEq)]
pub enum Encoding {
    /// The font uses `StandardEncoding`.
    Standard,
    /// The font defines its own 256-entry encoding vector.
    Custom(Box<[Option<String>; 256]>),
}

impl Encoding {
    /// An encoding vector with every code unassigned.
    pub fn empty_custom() -> Encoding {
        Encoding::Custom(Box::new(std::array::from_fn(|_| None)))
    }

    /// Returns the glyph name for `code`, or `None` if the code is unassigned.
    pub fn glyph_name(&self, code: u8) -> Option<&str> {
        let name = match self {
            Encoding::Standard => STANDARD_ENCODING[usize::from(code)],
            Encoding::Custom(names) => names[usize::from(code)].as_deref()?,
        };
        (name != NOTDEF).then_some(name)
    }

    /// Assign `name` to `code`. Has no effect on the Standard Encoding.
    pub(crate) fn set(&mut self, code: u8, name: &str) {
        if let Encoding::Custom(names) = self {
            names[usize::from(code)] = Some(name.to_string());
        }
    }
}

/// Look up the Standard Encoding name of `code`.
///
/// Returns `None` when `code` is outside `0..=255`. Unassigned codes yield `.notdef`.
pub fn standard_glyph_name(code: i32) -> Option<&'static str> {
    let index = usize::try_from(code).ok()?;
    STANDARD_ENCODING.get(index).copied()
}

/// Adobe Standard Encoding, indexed by byte code.
pub const STANDARD_ENCODING: [&str; 256] = [
    ".notdef", ".notdef", ".notdef", ".notdef", ".notdef", ".notdef", ".notdef", ".notdef",
    ".notdef", ".notdef", ".notdef", ".notdef", ".notdef", ".notdef", ".notdef", ".notdef",
    ".notdef", ".notdef", ".notdef", ".notdef", ".notdef", ".notdef", ".notdef", ".notdef",
    ".notdef", ".notdef", ".notdef", ".notdef", ".notdef", ".notdef", ".notdef", ".notdef",
    "space", "exclam", "quotedbl", "numbersign", "dollar", "percent", "ampersand", "quoteright",
    "parenleft", "parenright", "asterisk", "plus", "comma", "hyphen", "period", "slash",
    "zero", "one", "two", "three", "four", "five", "six", "seven",
    "eight", "nine", "colon", "semicolon", "less", "equal", "greater", "question",
    "at", "A", "B", "C", "D", "E", "F", "G",
    "H", "I", "J", "K", "L", "M", "N", "O",
    "P", "Q", "R", "S", "T", "U", "V", "W",
    "X", "Y", "Z", "bracketleft", "backslash", "bracketright", "asciicircum", "underscore",
    "quoteleft", "a", "b", "c", "d", "e", "f", "g",
    "h", "i", "j", "k", "l", "m", "n", "o",
    "p", "q", "r", "s", "t", "u", "v", "w",
    "x", "y", "z", "braceleft", "bar", "braceright", "asciitilde", ".notdef",
    ".notdef", ".notdef", ".notdef", ".notdef", ".notdef", ".notdef", ".notdef", ".notdef",
    ".notdef", ".notdef", ".notdef", ".notdef", ".notdef", ".notdef", ".notdef", ".notdef",
    ".notdef", ".notdef", ".notdef", ".notdef", ".notdef", ".notdef", ".notdef", ".notdef",
    ".notdef", ".notdef", ".notdef", ".notdef", ".notdef", ".notdef", ".notdef", ".notdef",
    ".notdef", "exclamdown", "cent", "sterling", "fraction", "yen", "florin", "section",
    "currency", "quotesingle", "quotedblleft", "guillemotleft", "guilsinglleft", "guilsinglright", "fi", "fl",
    ".notdef", "endash", "dagger", "daggerdbl", "periodcentered", ".notdef", "paragraph", "bullet",
    "quotesinglbase", "quotedblbase", "quotedblright", "guillemotright", "ellipsis", "perthousand", ".notdef", "questiondown",
    ".notdef", "grave", "acute", "circumflex", "tilde", "macron", "breve", "dotaccent",
    "dieresis", ".notdef", "ring", "cedilla", ".notdef", "hungarumlaut", "ogonek", "caron",
    "emdash", ".notdef", ".notdef", ".notdef", ".notdef", ".notdef", ".notdef", ".notdef",
    ".notdef", ".notdef", ".notdef", ".notdef", ".notdef", ".notdef", ".notdef", ".notdef",
    ".notdef", "AE", ".notdef", "ordfeminine", ".notdef", ".notdef", ".notdef", ".notdef",
    "Lslash", "Oslash", "OE", "ordmasculine", ".notdef", ".notdef", ".notdef", ".notdef",
    ".notdef", "ae", ".notdef", ".notdef", ".notdef", "dotlessi", ".notdef", ".notdef",
    "lslash", "oslash", "oe", "germandbls", ".notdef", ".notdef", ".notdef", ".notdef",
];
