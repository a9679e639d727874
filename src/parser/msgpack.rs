// SPDX-FileCopyrightText: 2026 ArcheBase
//
// SPDX-License-Identifier: MulanPSL-2.0

//! MessagePack emitter: a decoded [`FlatMessage`] becomes a single map of
//! `(path, scalar)` entries.
//!
//! Widening rules: `uint64` stays unsigned, `float64`/`float32` stay
//! floats, `bool` and `string` keep their formats, and every other leaf
//! (time and duration included) is widened to a signed `int64`.

use byteorder::BigEndian;

use crate::core::Variant;
use crate::encoding::bytes;

use super::FlatMessage;

/// Serialize `flat` into a MessagePack map, replacing `out`'s contents.
pub fn convert_to_msgpack(flat: &FlatMessage<'_>, out: &mut Vec<u8>) {
    out.clear();
    pack_map_header(out, flat.values.len() as u32);

    let mut key = String::new();
    for (leaf, value) in &flat.values {
        key.clear();
        key.push_str(&flat.path(leaf));
        pack_str(out, &key);
        match value {
            Variant::UInt64(v) => pack_uint(out, *v),
            Variant::Float64(v) => pack_f64(out, *v),
            Variant::Float32(v) => pack_f32(out, *v),
            Variant::Bool(v) => pack_bool(out, *v),
            Variant::String(s) => pack_str(out, s),
            other => pack_int(out, other.to_i64().unwrap_or(0)),
        }
    }
}

fn pack_map_header(out: &mut Vec<u8>, count: u32) {
    if count <= 15 {
        out.push(0x80 | count as u8);
    } else if count <= 0xFFFF {
        out.push(0xDE);
        bytes::put_u16::<BigEndian>(out, count as u16);
    } else {
        out.push(0xDF);
        bytes::put_u32::<BigEndian>(out, count);
    }
}

fn pack_str(out: &mut Vec<u8>, s: &str) {
    let len = s.len();
    if len <= 31 {
        out.push(0xA0 | len as u8);
    } else if len <= 0xFF {
        out.push(0xD9);
        out.push(len as u8);
    } else if len <= 0xFFFF {
        out.push(0xDA);
        bytes::put_u16::<BigEndian>(out, len as u16);
    } else {
        out.push(0xDB);
        bytes::put_u32::<BigEndian>(out, len as u32);
    }
    out.extend_from_slice(s.as_bytes());
}

fn pack_bool(out: &mut Vec<u8>, v: bool) {
    out.push(if v { 0xC3 } else { 0xC2 });
}

fn pack_uint(out: &mut Vec<u8>, v: u64) {
    if v <= 0x7F {
        out.push(v as u8);
    } else if v <= 0xFF {
        out.push(0xCC);
        out.push(v as u8);
    } else if v <= 0xFFFF {
        out.push(0xCD);
        bytes::put_u16::<BigEndian>(out, v as u16);
    } else if v <= 0xFFFF_FFFF {
        out.push(0xCE);
        bytes::put_u32::<BigEndian>(out, v as u32);
    } else {
        out.push(0xCF);
        bytes::put_u64::<BigEndian>(out, v);
    }
}

fn pack_int(out: &mut Vec<u8>, v: i64) {
    if v >= 0 {
        pack_uint(out, v as u64);
    } else if v >= -32 {
        out.push(v as i8 as u8);
    } else if v >= i64::from(i8::MIN) {
        out.push(0xD0);
        out.push(v as i8 as u8);
    } else if v >= i64::from(i16::MIN) {
        out.push(0xD1);
        bytes::put_u16::<BigEndian>(out, v as i16 as u16);
    } else if v >= i64::from(i32::MIN) {
        out.push(0xD2);
        bytes::put_u32::<BigEndian>(out, v as i32 as u32);
    } else {
        out.push(0xD3);
        bytes::put_u64::<BigEndian>(out, v as u64);
    }
}

fn pack_f32(out: &mut Vec<u8>, v: f32) {
    out.push(0xCA);
    bytes::put_f32::<BigEndian>(out, v);
}

fn pack_f64(out: &mut Vec<u8>, v: f64) {
    out.push(0xCB);
    bytes::put_f64::<BigEndian>(out, v);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pack_uint_widths() {
        let mut out = Vec::new();
        pack_uint(&mut out, 5);
        assert_eq!(out, [0x05]);

        out.clear();
        pack_uint(&mut out, 200);
        assert_eq!(out, [0xCC, 200]);

        out.clear();
        pack_uint(&mut out, 0x1234);
        assert_eq!(out, [0xCD, 0x12, 0x34]);

        out.clear();
        pack_uint(&mut out, 0x1_0000);
        assert_eq!(out, [0xCE, 0x00, 0x01, 0x00, 0x00]);

        out.clear();
        pack_uint(&mut out, u64::MAX);
        assert_eq!(out[0], 0xCF);
        assert_eq!(out.len(), 9);
    }

    #[test]
    fn test_pack_int_widths() {
        let mut out = Vec::new();
        pack_int(&mut out, -1);
        assert_eq!(out, [0xFF]);

        out.clear();
        pack_int(&mut out, -100);
        assert_eq!(out, [0xD0, (-100i8) as u8]);

        out.clear();
        pack_int(&mut out, -1000);
        assert_eq!(out, [0xD1, 0xFC, 0x18]);

        out.clear();
        pack_int(&mut out, -100_000);
        assert_eq!(out[0], 0xD2);

        out.clear();
        pack_int(&mut out, i64::MIN);
        assert_eq!(out[0], 0xD3);

        out.clear();
        pack_int(&mut out, 42);
        assert_eq!(out, [42]);
    }

    #[test]
    fn test_pack_str_formats() {
        let mut out = Vec::new();
        pack_str(&mut out, "hola");
        assert_eq!(out, [0xA4, b'h', b'o', b'l', b'a']);

        out.clear();
        let long = "x".repeat(40);
        pack_str(&mut out, &long);
        assert_eq!(out[0], 0xD9);
        assert_eq!(out[1], 40);
    }

    #[test]
    fn test_pack_floats() {
        let mut out = Vec::new();
        pack_f64(&mut out, 10.0);
        assert_eq!(out, [0xCB, 0x40, 0x24, 0, 0, 0, 0, 0, 0]);

        out.clear();
        pack_f32(&mut out, 1.5);
        assert_eq!(out, [0xCA, 0x3F, 0xC0, 0, 0]);
    }

    #[test]
    fn test_map_headers() {
        let mut out = Vec::new();
        pack_map_header(&mut out, 2);
        assert_eq!(out, [0x82]);

        out.clear();
        pack_map_header(&mut out, 100);
        assert_eq!(out, [0xDE, 0x00, 100]);
    }

    #[test]
    fn test_empty_flat_message() {
        let flat = FlatMessage::new();
        let mut out = vec![1, 2, 3];
        convert_to_msgpack(&flat, &mut out);
        assert_eq!(out, [0x80]);
    }
}
