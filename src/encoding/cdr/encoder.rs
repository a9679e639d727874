// SPDX-FileCopyrightText: 2026 ArcheBase
//
// SPDX-License-Identifier: MulanPSL-2.0

//! CDR write cursor.
//!
//! Mirrors the decoder: the encapsulation header goes first, every value is
//! padded to its natural alignment relative to the byte after the header,
//! and strings carry a counted trailing NUL.

use byteorder::{BigEndian, LittleEndian};

use crate::core::{BuiltinType, CodecError, Result, Variant};
use crate::encoding::bytes;
use crate::encoding::traits::Encoder;

use super::{CdrHeader, CdrVersion, Endianness, CDR_HEADER_SIZE};

/// Write cursor producing a CDR-encapsulated payload.
#[derive(Debug)]
pub struct CdrEncoder {
    buffer: Vec<u8>,
    header: CdrHeader,
    align64: usize,
}

impl CdrEncoder {
    /// Little-endian plain CDR encoder.
    pub fn new() -> Self {
        Self::with_header(CdrHeader::default())
    }

    /// Encoder with an explicit header (endianness, encoding, version).
    pub fn with_header(header: CdrHeader) -> Self {
        let mut encoder = Self {
            buffer: Vec::with_capacity(64),
            align64: header.version.eight_byte_alignment(),
            header,
        };
        encoder.write_header();
        encoder
    }

    /// The header this encoder writes.
    pub fn header(&self) -> &CdrHeader {
        &self.header
    }

    /// Consume the encoder and return the bytes.
    pub fn finish(self) -> Vec<u8> {
        self.buffer
    }

    fn align(&mut self, width: usize) {
        let width = if width == 8 { self.align64 } else { width };
        let misalign = (self.buffer.len() - CDR_HEADER_SIZE) % width;
        if misalign > 0 {
            self.buffer.resize(self.buffer.len() + width - misalign, 0);
        }
    }

    fn little_endian(&self) -> bool {
        self.header.endianness == Endianness::Little
    }

    fn put_aligned_u16(&mut self, value: u16) {
        self.align(2);
        if self.little_endian() {
            bytes::put_u16::<LittleEndian>(&mut self.buffer, value);
        } else {
            bytes::put_u16::<BigEndian>(&mut self.buffer, value);
        }
    }

    fn put_aligned_u32(&mut self, value: u32) {
        self.align(4);
        if self.little_endian() {
            bytes::put_u32::<LittleEndian>(&mut self.buffer, value);
        } else {
            bytes::put_u32::<BigEndian>(&mut self.buffer, value);
        }
    }

    fn put_aligned_u64(&mut self, value: u64) {
        self.align(8);
        if self.little_endian() {
            bytes::put_u64::<LittleEndian>(&mut self.buffer, value);
        } else {
            bytes::put_u64::<BigEndian>(&mut self.buffer, value);
        }
    }
}

impl Default for CdrEncoder {
    fn default() -> Self {
        Self::new()
    }
}

impl Encoder for CdrEncoder {
    fn write_header(&mut self) {
        self.buffer.clear();
        self.buffer.extend_from_slice(&self.header.to_bytes());
    }

    fn encode(&mut self, ty: BuiltinType, value: &Variant) -> Result<()> {
        match ty {
            BuiltinType::Bool => self.buffer.push(u8::from(value.to_i64()? != 0)),
            BuiltinType::Byte | BuiltinType::Char | BuiltinType::UInt8 => {
                self.buffer.push(value.to_i64()? as u8)
            }
            BuiltinType::Int8 => self.buffer.push(value.to_i64()? as i8 as u8),
            BuiltinType::UInt16 => self.put_aligned_u16(value.to_i64()? as u16),
            BuiltinType::Int16 => self.put_aligned_u16(value.to_i64()? as i16 as u16),
            BuiltinType::UInt32 => self.put_aligned_u32(value.to_i64()? as u32),
            BuiltinType::Int32 => self.put_aligned_u32(value.to_i64()? as i32 as u32),
            BuiltinType::UInt64 => self.put_aligned_u64(value.to_u64()?),
            BuiltinType::Int64 => self.put_aligned_u64(value.to_i64()? as u64),
            BuiltinType::Float32 => {
                self.put_aligned_u32((value.to_f64()? as f32).to_bits())
            }
            BuiltinType::Float64 => self.put_aligned_u64(value.to_f64()?.to_bits()),
            BuiltinType::Time => {
                let t = value.extract_time()?;
                self.put_aligned_u32(t.sec);
                self.put_aligned_u32(t.nsec);
            }
            BuiltinType::Duration => {
                let t = value.extract_duration()?;
                self.put_aligned_u32(t.sec);
                self.put_aligned_u32(t.nsec);
            }
            BuiltinType::String | BuiltinType::Other => {
                return Err(CodecError::unsupported(format!(
                    "scalar encode of {ty}"
                )));
            }
        }
        Ok(())
    }

    fn encode_string(&mut self, s: &str) -> Result<()> {
        // The length counts the trailing NUL.
        self.put_aligned_u32(s.len() as u32 + 1);
        self.buffer.extend_from_slice(s.as_bytes());
        self.buffer.push(0);
        Ok(())
    }

    fn encode_u32(&mut self, value: u32) -> Result<()> {
        self.put_aligned_u32(value);
        Ok(())
    }

    fn reset(&mut self) {
        self.write_header();
    }

    fn data(&self) -> &[u8] {
        &self.buffer
    }

    fn is_ros2(&self) -> bool {
        true
    }
}
