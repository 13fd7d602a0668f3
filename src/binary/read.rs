//! Parse binary data
//!
//! A `ReadScope` is a view of a byte slice. Calling `ctxt` on it yields a `ReadCtxt`, a cursor
//! that reads primitive values and `ReadBinary` structures while checking that enough bytes
//! remain.

use byteorder::{BigEndian, ByteOrder, LittleEndian};

use crate::binary::{I32Be, U32Le, U8};
use crate::error::ParseError;

#[derive(Debug, Copy, Clone)]
pub struct ReadEof {}

#[derive(Copy, Clone, Debug, PartialEq)]
pub struct ReadScope<'a> {
    data: &'a [u8],
}

#[derive(Clone)]
pub struct ReadCtxt<'a> {
    scope: ReadScope<'a>,
    offset: usize,
}

pub trait ReadBinary {
    type HostType<'a>: Sized; // default = Self

    fn read<'a>(ctxt: &mut ReadCtxt<'a>) -> Result<Self::HostType<'a>, ParseError>;
}

impl<'a> ReadScope<'a> {
    pub fn new(data: &'a [u8]) -> ReadScope<'a> {
        ReadScope { data }
    }

    pub fn data(&self) -> &'a [u8] {
        self.data
    }

    pub fn offset(&self, offset: usize) -> ReadScope<'a> {
        let data = self.data.get(offset..).unwrap_or(&[]);
        ReadScope { data }
    }

    pub fn offset_length(&self, offset: usize, length: usize) -> Result<ReadScope<'a>, ParseError> {
        let end = offset.checked_add(length).ok_or(ParseError::BadEof)?;
        let data = self.data.get(offset..end).ok_or(ParseError::BadEof)?;
        Ok(ReadScope { data })
    }

    pub fn ctxt(&self) -> ReadCtxt<'a> {
        ReadCtxt::new(*self)
    }

    pub fn read<T: ReadBinary>(&self) -> Result<T::HostType<'a>, ParseError> {
        self.ctxt().read::<T>()
    }
}

impl<'a> ReadCtxt<'a> {
    /// ReadCtxt is constructed by calling `ReadScope::ctxt`.
    fn new(scope: ReadScope<'a>) -> ReadCtxt<'a> {
        ReadCtxt { scope, offset: 0 }
    }

    pub fn check(&self, cond: bool) -> Result<(), ParseError> {
        match cond {
            true => Ok(()),
            false => Err(ParseError::BadValue),
        }
    }

    /// Check a condition, returning `ParseError::BadVersion` if `false`.
    ///
    /// Intended for use in checking magic numbers and headers read from data.
    pub fn check_version(&self, cond: bool) -> Result<(), ParseError> {
        match cond {
            true => Ok(()),
            false => Err(ParseError::BadVersion),
        }
    }

    pub fn scope(&self) -> ReadScope<'a> {
        self.scope.offset(self.offset)
    }

    pub fn read<T: ReadBinary>(&mut self) -> Result<T::HostType<'a>, ParseError> {
        T::read(self)
    }

    pub fn bytes_available(&self) -> bool {
        self.offset < self.scope.data.len()
    }

    fn check_avail(&self, length: usize) -> Result<(), ReadEof> {
        match self.offset.checked_add(length) {
            Some(endpos) if endpos <= self.scope.data.len() => Ok(()),
            _ => Err(ReadEof {}),
        }
    }

    pub fn read_u8(&mut self) -> Result<u8, ReadEof> {
        self.check_avail(1)?;
        let byte = self.scope.data[self.offset];
        self.offset += 1;
        Ok(byte)
    }

    pub fn read_i32be(&mut self) -> Result<i32, ReadEof> {
        let bytes = self.read_slice(4)?;
        Ok(BigEndian::read_i32(bytes))
    }

    pub fn read_u32le(&mut self) -> Result<u32, ReadEof> {
        let bytes = self.read_slice(4)?;
        Ok(LittleEndian::read_u32(bytes))
    }

    pub fn read_scope(&mut self, length: usize) -> Result<ReadScope<'a>, ReadEof> {
        if let Ok(scope) = self.scope.offset_length(self.offset, length) {
            self.offset += length;
            Ok(scope)
        } else {
            Err(ReadEof {})
        }
    }

    pub fn read_slice(&mut self, length: usize) -> Result<&'a [u8], ReadEof> {
        let scope = self.read_scope(length)?;
        Ok(scope.data)
    }
}

impl ReadBinary for U8 {
    type HostType<'a> = u8;

    fn read<'a>(ctxt: &mut ReadCtxt<'a>) -> Result<u8, ParseError> {
        Ok(ctxt.read_u8()?)
    }
}

impl ReadBinary for I32Be {
    type HostType<'a> = i32;

    fn read<'a>(ctxt: &mut ReadCtxt<'a>) -> Result<i32, ParseError> {
        Ok(ctxt.read_i32be()?)
    }
}

impl ReadBinary for U32Le {
    type HostType<'a> = u32;

    fn read<'a>(ctxt: &mut ReadCtxt<'a>) -> Result<u32, ParseError> {
        Ok(ctxt.read_u32le()?)
    }
}
