// SPDX-FileCopyrightText: 2026 ArcheBase
//
// SPDX-License-Identifier: MulanPSL-2.0

//! ROS1 backend: a flat little-endian buffer with no header and no
//! alignment. Strings and dynamic arrays are `u32` length + raw bytes;
//! time and duration are two `u32` words.

use byteorder::LittleEndian;

use crate::core::{BuiltinType, CodecError, Result, RosTime, Variant};

use super::bytes;
use super::traits::{Decoder, Encoder};

/// Read cursor for the ROS1 packed format.
#[derive(Debug, Default)]
pub struct Ros1Decoder<'a> {
    buffer: &'a [u8],
    cursor: usize,
}

impl<'a> Ros1Decoder<'a> {
    /// Create a cursor not yet attached to a buffer.
    pub fn new() -> Self {
        Self {
            buffer: &[],
            cursor: 0,
        }
    }

    /// Current cursor position.
    pub fn position(&self) -> usize {
        self.cursor
    }
}

impl<'a> Decoder<'a> for Ros1Decoder<'a> {
    fn init(&mut self, buffer: &'a [u8]) -> Result<()> {
        self.buffer = buffer;
        self.cursor = 0;
        Ok(())
    }

    fn decode(&mut self, ty: BuiltinType) -> Result<Variant> {
        let buf = self.buffer;
        let cur = &mut self.cursor;
        let value = match ty {
            BuiltinType::Bool => Variant::Bool(bytes::take(buf, cur, 1)?[0] != 0),
            BuiltinType::Byte => Variant::Byte(bytes::take(buf, cur, 1)?[0]),
            BuiltinType::Char => Variant::Char(bytes::take(buf, cur, 1)?[0]),
            BuiltinType::UInt8 => Variant::UInt8(bytes::take(buf, cur, 1)?[0]),
            BuiltinType::Int8 => Variant::Int8(bytes::take(buf, cur, 1)?[0] as i8),
            BuiltinType::UInt16 => Variant::UInt16(bytes::read_u16::<LittleEndian>(buf, cur)?),
            BuiltinType::Int16 => {
                Variant::Int16(bytes::read_u16::<LittleEndian>(buf, cur)? as i16)
            }
            BuiltinType::UInt32 => Variant::UInt32(bytes::read_u32::<LittleEndian>(buf, cur)?),
            BuiltinType::Int32 => {
                Variant::Int32(bytes::read_u32::<LittleEndian>(buf, cur)? as i32)
            }
            BuiltinType::UInt64 => Variant::UInt64(bytes::read_u64::<LittleEndian>(buf, cur)?),
            BuiltinType::Int64 => {
                Variant::Int64(bytes::read_u64::<LittleEndian>(buf, cur)? as i64)
            }
            BuiltinType::Float32 => Variant::Float32(bytes::read_f32::<LittleEndian>(buf, cur)?),
            BuiltinType::Float64 => Variant::Float64(bytes::read_f64::<LittleEndian>(buf, cur)?),
            BuiltinType::Time => {
                let sec = bytes::read_u32::<LittleEndian>(buf, cur)?;
                let nsec = bytes::read_u32::<LittleEndian>(buf, cur)?;
                Variant::Time(RosTime::new(sec, nsec))
            }
            BuiltinType::Duration => {
                let sec = bytes::read_u32::<LittleEndian>(buf, cur)?;
                let nsec = bytes::read_u32::<LittleEndian>(buf, cur)?;
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
        Ok(String::from_utf8_lossy(raw).into_owned())
    }

    fn decode_u32(&mut self) -> Result<u32> {
        bytes::read_u32::<LittleEndian>(self.buffer, &mut self.cursor)
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
        false
    }
}

/// Write cursor for the ROS1 packed format.
#[derive(Debug, Default)]
pub struct Ros1Encoder {
    buffer: Vec<u8>,
}

impl Ros1Encoder {
    /// Create an empty encoder.
    pub fn new() -> Self {
        Self { buffer: Vec::new() }
    }

    /// Consume the encoder and return the bytes.
    pub fn finish(self) -> Vec<u8> {
        self.buffer
    }
}

impl Encoder for Ros1Encoder {
    fn write_header(&mut self) {
        // ROS1 payloads carry no header.
        self.buffer.clear();
    }

    fn encode(&mut self, ty: BuiltinType, value: &Variant) -> Result<()> {
        let out = &mut self.buffer;
        match ty {
            BuiltinType::Bool => out.push(u8::from(value.to_i64()? != 0)),
            BuiltinType::Byte | BuiltinType::Char | BuiltinType::UInt8 => {
                out.push(value.to_i64()? as u8)
            }
            BuiltinType::Int8 => out.push(value.to_i64()? as i8 as u8),
            BuiltinType::UInt16 => bytes::put_u16::<LittleEndian>(out, value.to_i64()? as u16),
            BuiltinType::Int16 => {
                bytes::put_u16::<LittleEndian>(out, value.to_i64()? as i16 as u16)
            }
            BuiltinType::UInt32 => bytes::put_u32::<LittleEndian>(out, value.to_i64()? as u32),
            BuiltinType::Int32 => {
                bytes::put_u32::<LittleEndian>(out, value.to_i64()? as i32 as u32)
            }
            BuiltinType::UInt64 => bytes::put_u64::<LittleEndian>(out, value.to_u64()?),
            BuiltinType::Int64 => bytes::put_u64::<LittleEndian>(out, value.to_i64()? as u64),
            BuiltinType::Float32 => bytes::put_f32::<LittleEndian>(out, value.to_f64()? as f32),
            BuiltinType::Float64 => bytes::put_f64::<LittleEndian>(out, value.to_f64()?),
            BuiltinType::Time => {
                let t = value.extract_time()?;
                bytes::put_u32::<LittleEndian>(out, t.sec);
                bytes::put_u32::<LittleEndian>(out, t.nsec);
            }
            BuiltinType::Duration => {
                let t = value.extract_duration()?;
                bytes::put_u32::<LittleEndian>(out, t.sec);
                bytes::put_u32::<LittleEndian>(out, t.nsec);
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
        self.encode_u32(s.len() as u32)?;
        self.buffer.extend_from_slice(s.as_bytes());
        Ok(())
    }

    fn encode_u32(&mut self, value: u32) -> Result<()> {
        bytes::put_u32::<LittleEndian>(&mut self.buffer, value);
        Ok(())
    }

    fn reset(&mut self) {
        self.buffer.clear();
    }

    fn data(&self) -> &[u8] {
        &self.buffer
    }

    fn is_ros2(&self) -> bool {
        false
    }
}
