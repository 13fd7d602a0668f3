//! Tokenizer for the PostScript subset found in Type 1 font programs.
//!
//! Type 1 fonts are PostScript programs, but in practice they follow a rigid layout that can be
//! read with a tokenizer instead of an interpreter. The one liberty taken here is the treatment of
//! `RD` and `-|`: in a font program these are procedures that read raw bytes from the file, so an
//! integer followed by either of them is returned as a single [`Token::Binary`].

/// A lexical token, borrowing from the program text.
#[derive(Copy, Clone, PartialEq, Eq, Debug)]
pub enum Token<'a> {
    Int(i64),
    /// A number with a fractional part or exponent, kept as text.
    Real(&'a [u8]),
    /// Contents of a `( )` string, escapes are not processed.
    LitString(&'a [u8]),
    /// Contents of a `< >` string.
    HexString(&'a [u8]),
    /// Contents of a `{ }` procedure.
    Proc(&'a [u8]),
    /// Raw bytes read by `RD` or `-|`.
    Binary(&'a [u8]),
    /// A literal name, without the leading `/`.
    Name(&'a [u8]),
    /// Any other word or bracket.
    Raw(&'a [u8]),
}

impl Token<'_> {
    pub fn as_int(&self) -> Option<i64> {
        match *self {
            Token::Int(value) => Some(value),
            _ => None,
        }
    }

    pub fn as_f32(&self) -> Option<f32> {
        match *self {
            Token::Int(value) => Some(value as f32),
            Token::Real(text) => std::str::from_utf8(text).ok()?.parse().ok(),
            _ => None,
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match *self {
            Token::Raw(b"true") => Some(true),
            Token::Raw(b"false") => Some(false),
            _ => None,
        }
    }
}

#[derive(Clone)]
pub struct Lexer<'a> {
    data: &'a [u8],
    pos: usize,
}

impl<'a> Lexer<'a> {
    pub fn new(data: &'a [u8]) -> Self {
        Lexer { data, pos: 0 }
    }

    /// Returns the next token without consuming it.
    pub fn peek(&self) -> Option<Token<'a>> {
        self.clone().next()
    }

    fn peek_byte(&self) -> Option<u8> {
        self.data.get(self.pos).copied()
    }

    fn bump(&mut self) -> Option<u8> {
        let byte = self.peek_byte()?;
        self.pos += 1;
        Some(byte)
    }

    fn skip_whitespace(&mut self) {
        while self.peek_byte().is_some_and(is_whitespace) {
            self.pos += 1;
        }
    }

    /// Advance past the current word, returning it.
    fn word(&mut self, start: usize) -> &'a [u8] {
        while self
            .peek_byte()
            .is_some_and(|b| !is_whitespace(b) && !is_special(b))
        {
            self.pos += 1;
        }
        &self.data[start..self.pos]
    }

    fn read_bytes(&mut self, len: usize) -> Option<&'a [u8]> {
        let end = self.pos.checked_add(len)?;
        let bytes = self.data.get(self.pos..end)?;
        self.pos = end;
        Some(bytes)
    }

    fn skip_comment(&mut self) {
        while let Some(c) = self.bump() {
            if c == b'\n' || c == b'\r' {
                break;
            }
        }
    }

    /// Skip to the matching `}`, counting nested braces.
    ///
    /// Strings, comments and binary data are skipped whole so that braces inside them don't
    /// count.
    fn procedure(&mut self, start: usize) -> Option<Token<'a>> {
        let mut depth = 1_usize;
        loop {
            self.skip_whitespace();
            let token_start = self.pos;
            match self.bump()? {
                b'{' => depth += 1,
                b'}' => {
                    depth -= 1;
                    if depth == 0 {
                        return Some(Token::Proc(&self.data[start + 1..self.pos - 1]));
                    }
                }
                b'%' => self.skip_comment(),
                b'(' => {
                    self.literal_string(token_start)?;
                }
                b'<' if self.peek_byte() == Some(b'<') => self.pos += 1,
                b'<' => {
                    self.hex_string(token_start)?;
                }
                b'/' => {
                    let name_start = self.pos;
                    self.word(name_start);
                }
                c if is_special(c) => {}
                _ => {
                    let word = self.word(token_start);
                    if let Some(int) = decode_int(word) {
                        self.binary(int);
                    }
                }
            }
        }
    }

    fn literal_string(&mut self, start: usize) -> Option<Token<'a>> {
        let mut depth = 1;
        while depth > 0 {
            match self.bump()? {
                b'(' => depth += 1,
                b')' => depth -= 1,
                b'\\' => {
                    self.bump()?;
                }
                _ => {}
            }
        }
        Some(Token::LitString(&self.data[start + 1..self.pos - 1]))
    }

    fn hex_string(&mut self, start: usize) -> Option<Token<'a>> {
        loop {
            match self.bump()? {
                b'>' => return Some(Token::HexString(&self.data[start + 1..self.pos - 1])),
                b if is_whitespace(b) || b.is_ascii_hexdigit() => {}
                _ => return None,
            }
        }
    }

    /// Skip whitespace and return the following plain word, if any.
    fn next_word(&mut self) -> Option<&'a [u8]> {
        self.skip_whitespace();
        let start = self.pos;
        let word = self.word(start);
        (!word.is_empty()).then_some(word)
    }

    /// An integer followed by `RD` or `-|` introduces `int` bytes of binary data.
    fn binary(&mut self, len: i64) -> Option<Token<'a>> {
        let mut after = self.clone();
        match after.next_word()? {
            b"RD" | b"-|" => {}
            _ => return None,
        }
        // Exactly one separator byte precedes the data
        after.pos += 1;
        let data = after.read_bytes(usize::try_from(len).ok()?)?;
        // Skip the terminator (`ND`, `NP`, `|-`, `|` or `noaccess ...`)
        let mut terminator = after.clone();
        if let Some(word) = terminator.next_word() {
            if decode_int(word).is_none() && !is_real(word) {
                after = terminator;
            }
        }
        *self = after;
        Some(Token::Binary(data))
    }
}

impl<'a> Iterator for Lexer<'a> {
    type Item = Token<'a>;

    fn next(&mut self) -> Option<Token<'a>> {
        loop {
            self.skip_whitespace();
            let start = self.pos;
            match self.bump()? {
                b'%' => self.skip_comment(),
                b'{' => return self.procedure(start),
                b'(' => return self.literal_string(start),
                b'<' => {
                    if self.peek_byte() == Some(b'<') {
                        // Dictionary delimiters carry no information for us
                        self.pos += 1;
                        continue;
                    }
                    return self.hex_string(start);
                }
                b'>' if self.peek_byte() == Some(b'>') => {
                    self.pos += 1;
                }
                b'/' => {
                    let name_start = self.pos;
                    return Some(Token::Name(self.word(name_start)));
                }
                c if is_special(c) => return Some(Token::Raw(&self.data[start..self.pos])),
                _ => {
                    let word = self.word(start);
                    if let Some(int) = decode_int(word) {
                        if let Some(binary) = self.binary(int) {
                            return Some(binary);
                        }
                        return Some(Token::Int(int));
                    }
                    if is_real(word) {
                        return Some(Token::Real(word));
                    }
                    return Some(Token::Raw(word));
                }
            }
        }
    }
}

pub(crate) fn is_whitespace(c: u8) -> bool {
    matches!(c, b' ' | b'\n' | b'\r' | b'\t' | b'\0' | 0x0C)
}

/// Characters that always delimit tokens.
fn is_special(c: u8) -> bool {
    matches!(
        c,
        b'(' | b')' | b'<' | b'>' | b'[' | b']' | b'{' | b'}' | b'/' | b'%'
    )
}

/// Decode an integer, optionally written with a radix such as `8#40`.
fn decode_int(bytes: &[u8]) -> Option<i64> {
    let s = std::str::from_utf8(bytes).ok()?;
    match s.split_once('#') {
        Some((radix, digits)) => {
            let radix = radix.parse::<u32>().ok()?;
            if !(2..=36).contains(&radix) {
                return None;
            }
            i64::from_str_radix(digits, radix).ok()
        }
        None => s.parse().ok(),
    }
}

fn is_real(bytes: &[u8]) -> bool {
    bytes.iter().any(|&b| matches!(b, b'.' | b'e' | b'E'))
        && std::str::from_utf8(bytes).is_ok_and(|s| s.parse::<f64>().is_ok())
}
