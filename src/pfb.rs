//! Type 1 font containers.
//!
//! A Type 1 font program is stored either as a PFB file, a sequence of framed ASCII and
//! binary records, or as a PFA file, plain text in which the private portion follows the
//! `eexec` operator, usually hex encoded. Either way the result is the same pair of segments:
//! the cleartext font dictionary and the decrypted private portion.
//!
//! References:
//! - <https://adobe-type-tools.github.io/font-tech-notes/pdfs/T1_SPEC.pdf> (chapter 7)
//! - <https://adobe-type-tools.github.io/font-tech-notes/pdfs/5040.Download_Fonts.pdf>

use log::warn;

use crate::binary::read::{ReadBinary, ReadCtxt};
use crate::binary::{U32Le, U8};
use crate::error::ParseError;
use crate::postscript::is_whitespace;

/// Initial key for the `eexec` encrypted private portion.
pub const EEXEC_SEED: u16 = 55665;
/// Initial key for encrypted charstrings and subroutines.
pub const CHARSTRING_SEED: u16 = 4330;
/// Number of leading random bytes in the `eexec` encrypted portion.
const EEXEC_PREFIX_LEN: usize = 4;

const PFB_MARKER: u8 = 0x80;

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
enum RecordType {
    Ascii,
    Binary,
    Eof,
}

/// The cleartext and private portions of a Type 1 font program.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Segments {
    pub cleartext: Vec<u8>,
    /// The private portion, decrypted, with the random prefix removed.
    pub private: Vec<u8>,
}

impl TryFrom<u8> for RecordType {
    type Error = ParseError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            1 => Ok(RecordType::Ascii),
            2 => Ok(RecordType::Binary),
            3 => Ok(RecordType::Eof),
            _ => Err(ParseError::BadValue),
        }
    }
}

impl ReadBinary for Segments {
    type HostType<'a> = Segments;

    fn read<'a>(ctxt: &mut ReadCtxt<'a>) -> Result<Self, ParseError> {
        match ctxt.scope().data().first() {
            Some(&PFB_MARKER) => read_pfb(ctxt),
            Some(_) => read_pfa(ctxt),
            None => Err(ParseError::BadEof),
        }
    }
}

fn read_pfb(ctxt: &mut ReadCtxt<'_>) -> Result<Segments, ParseError> {
    let mut cleartext = Vec::new();
    let mut encrypted = Vec::new();
    while ctxt.bytes_available() {
        let marker = ctxt.read::<U8>()?;
        ctxt.check(marker == PFB_MARKER)?;
        match RecordType::try_from(ctxt.read::<U8>()?)? {
            RecordType::Ascii => {
                let data = read_record(ctxt)?;
                // ASCII records after the binary ones are the trailer of zeros and `cleartomark`
                if encrypted.is_empty() {
                    cleartext.extend_from_slice(data);
                }
            }
            RecordType::Binary => encrypted.extend_from_slice(read_record(ctxt)?),
            RecordType::Eof => break,
        }
    }

    if encrypted.is_empty() {
        return Err(ParseError::MissingValue);
    }
    Ok(Segments {
        cleartext,
        private: decrypt_private(&encrypted),
    })
}

fn read_record<'a>(ctxt: &mut ReadCtxt<'a>) -> Result<&'a [u8], ParseError> {
    let length = usize::try_from(ctxt.read::<U32Le>()?)?;
    Ok(ctxt.read_slice(length)?)
}

fn read_pfa(ctxt: &mut ReadCtxt<'_>) -> Result<Segments, ParseError> {
    let data = ctxt.scope().data();
    ctxt.check_version(data.starts_with(b"%!PS-AdobeFont") || data.starts_with(b"%!FontType"))?;
    let start = find_eexec_data(data).ok_or(ParseError::MissingValue)?;
    let (cleartext, encrypted) = ctxt.read_slice(data.len()).map(|data| data.split_at(start))?;

    let private = if encrypted.len() >= 4 && encrypted[..4].iter().all(u8::is_ascii_hexdigit) {
        decrypt_private(&decode_hex(encrypted))
    } else {
        warn!("eexec portion of PFA file is not hex encoded");
        decrypt_private(encrypted)
    };
    Ok(Segments {
        cleartext: cleartext.to_vec(),
        private,
    })
}

fn decrypt_private(encrypted: &[u8]) -> Vec<u8> {
    let mut private = decrypt(encrypted, EEXEC_SEED);
    private.drain(..EEXEC_PREFIX_LEN.min(private.len()));
    private
}

/// Find the position of the data following the `eexec` operator.
fn find_eexec_data(data: &[u8]) -> Option<usize> {
    const EEXEC: &[u8] = b"eexec";

    let position = data.windows(EEXEC.len()).position(|window| window == EEXEC)?;
    let mut start = position + EEXEC.len();
    while let Some(&byte) = data.get(start) {
        match byte {
            b' ' | b'\t' | b'\n' => {}
            // A carriage return is only skipped as part of `\r\n`
            b'\r' if data.get(start + 1) == Some(&b'\n') => {}
            _ => break,
        }
        start += 1;
    }
    (start < data.len()).then_some(start)
}

/// Decode hexadecimal digits, ignoring whitespace and stopping at any other character.
///
/// An odd trailing digit is padded with zero.
pub(crate) fn decode_hex(hex: &[u8]) -> Vec<u8> {
    let mut bytes = Vec::with_capacity(hex.len() / 2);
    let mut high = None;
    for &c in hex {
        if is_whitespace(c) {
            continue;
        }
        let nibble = match (c as char).to_digit(16) {
            Some(nibble) => nibble as u8,
            None => break,
        };
        match high.take() {
            Some(high) => bytes.push((high << 4) | nibble),
            None => high = Some(nibble),
        }
    }
    if let Some(high) = high {
        bytes.push(high << 4);
    }
    bytes
}

/// Decrypt `data` with the Type 1 encryption algorithm starting from key `seed`.
pub(crate) fn decrypt(data: &[u8], seed: u16) -> Vec<u8> {
    let mut key = seed;
    data.iter()
        .map(|&cipher| {
            let plain = cipher ^ (key >> 8) as u8;
            key = (u16::from(cipher).wrapping_add(key))
                .wrapping_mul(52845)
                .wrapping_add(22719);
            plain
        })
        .collect()
}
