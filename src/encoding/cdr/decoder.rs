// SPDX-FileCopyrightText: 2026 ArcheBase
//
// SPDX-License-Identifier: MulanPSL-2.0

//! CDR read cursor with origin-relative alignment.
//!
//! Alignment padding before a value of width `W` is
//! `(W - (cursor - origin) % W) % W`, where the origin is the byte after
//! the encapsulation header. Under XCDRv2, `W = 8` is capped at 4.

use byteorder::{BigEndian, LittleEndian};

use crate::core::{BuiltinType, CodecError, Result, RosTime, Variant};
use crate::encoding::bytes;
use crate::encoding::traits::Decoder;

use super::{CdrHeader, CdrVersion, Endianness, CDR_HEADER_SIZE};

/// Read cursor for CDR-encapsulated payloads.
#[derive(Debug)]
pub struct CdrDecoder<'a> {
    buffer: &'a [u8],
    cursor: usize,
    origin: usize,
    header: CdrHeader,
    align64: usize,
    default_version: CdrVersion,
}

impl<'a> CdrDecoder<'a> {
    /// Create a cursor that assumes classic DDS CDR for plain encodings.
    pub fn new() -> Self {
        Self::with_version(CdrVersion::default())
    }

    /// Create a cursor with an explicit default CDR version.
    pub fn with_version(default_version: CdrVersion) -> Self {
        Self {
            buffer: &[],
            cursor: 0,
            origin: 0,
            header: CdrHeader::default(),
            align64: 8,
            default_version,
        }
    }

    /// The header parsed by the last [`Decoder::init`].
    pub fn header(&self) -> &CdrHeader {
        &self.header
    }

    /// Current cursor position, counted from the start of the buffer
    /// (the encapsulation header included).
    pub fn position(&self) -> usize {
        self.cursor
    }

    fn align(&mut self, width: usize) -> Result<()> {
        let width = if width == 8 { self.align64 } else { width };
        let misalign = (self.cursor - self.origin) % width;
        if misalign > 0 {
            let padding = width - misalign;
            bytes::take(self.buffer, &mut self.cursor, padding)?;
        }
        Ok(())
    }

    fn little_endian(&self) -> bool {
        self.header.endianness == Endianness::Little
    }

    fn read_aligned_u16(&mut self) -> Result<u16> {
        self.align(2)?;
        if self.little_endian() {
            bytes::read_u16::<LittleEndian>(self.buffer, &mut self.cursor)
        } else {
            bytes::read_u16::<BigEndian>(self.buffer, &mut self.cursor)
        }
    }

    fn read_aligned_u32(&mut self) -> Result<u32> {
        self.align(4)?;
        if self.little_endian() {
            bytes::read_u32::<LittleEndian>(self.buffer, &mut self.cursor)
        } else {
            bytes::read_u32::<BigEndian>(self.buffer, &mut self.cursor)
        }
    }

    fn read_aligned_u64(&mut self) -> Result<u64> {
        self.align(8)?;
        if self.little_endian() {
            bytes::read_u64::<LittleEndian>(self.buffer, &mut self.cursor)
        } else {
            bytes::read_u64::<BigEndian>(self.buffer, &mut self.cursor)
        }
    }

    fn read_aligned_f32(&mut self) -> Result<f32> {
        Ok(f32::from_bits(self.read_aligned_u32()?))
    }

    fn read_aligned_f64(&mut self) -> Result<f64> {
        Ok(f64::from_bits(self.read_aligned_u64()?))
    }

    fn read_byte(&mut self) -> Result<u8> {
        Ok(bytes::take(self.buffer, &mut self.cursor, 1)?[0])
    }
}

impl Default for CdrDecoder<'_> {
    fn default() -> Self {
        Self::new()
    }
}

impl<'a> Decoder<'a> for CdrDecoder<'a> {
    fn init(&mut self, buffer: &'a [u8]) -> Result<()> {
        self.header = CdrHeader::parse(buffer, self.default_version)?;
        self.align64 = self.header.version.eight_byte_alignment();
        self.buffer = buffer;
        self.cursor = CDR_HEADER_SIZE;
        self.origin = CDR_HEADER_SIZE;
        Ok(())
    }

    fn decode(&mut self, ty: BuiltinType) -> Result<Variant> {
        let value = match ty {
            BuiltinType::Bool => Variant::Bool(self.read_byte()? != 0),
            BuiltinType::Byte => Variant::Byte(self.read_byte()?),
            BuiltinType::Char => Variant::Char(self.read_byte()?),
            BuiltinType::UInt8 => Variant::UInt8(self.read_byte()?),
            BuiltinType::Int8 => Variant::Int8(self.read_byte()? as i8),
            BuiltinType::UInt16 => Variant::UInt16(self.read_aligned_u16()?),
            BuiltinType::Int16 => Variant::Int16(self.read_aligned_u16()? as i16),
            BuiltinType::UInt32 => Variant::UInt32(self.read_aligned_u32()?),
            BuiltinType::Int32 => Variant::Int32(self.read_aligned_u32()? as i32),
            BuiltinType::UInt64 => Variant::UInt64(self.read_aligned_u64()?),
            BuiltinType::Int64 => Variant::Int64(self.read_aligned_u64()? as i64),
            BuiltinType::Float32 => Variant::Float32(self.read_aligned_f32()?),
            BuiltinType::Float64 => Variant::Float64(self.read_aligned_f64()?),
            BuiltinType::Time => {
                let sec = self.read_aligned_u32()?;
                let nsec = self.read_aligned_u32()?;
                Variant::Time(RosTime::new(sec, nsec))
            }
            BuiltinType::Duration => {
                let sec = self.read_aligned_u32()?;
                let nsec = self.read_aligned_u32()?;
                Variant::Duration(RosTime::new(sec, nsec))
            }
            BuiltinType::String | BuiltinType::Other => {
                return Err(CodecError::unsupported(format!(
                    "scalar decode of {ty}"
                )));
            }
        };
        Ok(value)
    }

    fn decode_string(&mut self) -> Result<String> {
        let len = self.decode_u32()? as usize;
        let raw = bytes::take(self.buffer, &mut self.cursor, len)?;
        // The wire length counts a trailing NUL; drop it if present.
        let text = match raw.last() {
            Some(0) => &raw[..len - 1],
            _ => raw,
        };
        Ok(String::from_utf8_lossy(text).into_owned())
    }

    fn decode_u32(&mut self) -> Result<u32> {
        self.read_aligned_u32()
    }

    fn jump(&mut self, count: usize) -> Result<()> {
        bytes::take(self.buffer, &mut self.cursor, count)?;
        Ok(())
    }

    fn bytes_left(&self) -> usize {
        self.buffer.len().saturating_sub(self.cursor)
    }

    fn remaining_slice(&self) -> &'a [u8] {
        &self.buffer[self.cursor..]
    }

    fn is_ros2(&self) -> bool {
        true
    }
}
