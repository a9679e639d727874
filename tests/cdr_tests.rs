// SPDX-FileCopyrightText: 2026 ArcheBase
//
// SPDX-License-Identifier: MulanPSL-2.0

//! CDR backend integration tests: alignment, encapsulation validation,
//! scalar round trips, and the JointState decode scenario.

mod common;

use std::collections::HashSet;

use robomsg::{
    BuiltinType, CdrDecoder, CdrEncoder, CdrHeader, CdrVersion, CodecError, Decoder, Encoder,
    EncodingFlag, Endianness, FlatMessage, Parser, RosTime, RosType, Variant,
};

use common::{build_joint_state_cdr, sample_joint_state, JOINT_STATE_DEF};

fn joint_state_parser() -> Parser {
    Parser::new(
        "joint_state",
        &RosType::new("sensor_msgs/JointState"),
        JOINT_STATE_DEF,
    )
    .expect("compile JointState schema")
}

// ============================================================================
// Scalar round trips
// ============================================================================

#[test]
fn test_scalar_round_trip_every_builtin() {
    let cases: Vec<(BuiltinType, Variant)> = vec![
        (BuiltinType::Bool, Variant::Bool(false)),
        (BuiltinType::Byte, Variant::Byte(0xAB)),
        (BuiltinType::Char, Variant::Char(b'Q')),
        (BuiltinType::UInt8, Variant::UInt8(1)),
        (BuiltinType::UInt16, Variant::UInt16(0xFFFF)),
        (BuiltinType::UInt32, Variant::UInt32(0xDEAD_BEEF)),
        (BuiltinType::UInt64, Variant::UInt64(u64::MAX - 1)),
        (BuiltinType::Int8, Variant::Int8(-1)),
        (BuiltinType::Int16, Variant::Int16(i16::MIN)),
        (BuiltinType::Int32, Variant::Int32(i32::MAX)),
        (BuiltinType::Int64, Variant::Int64(i64::MIN + 1)),
        (BuiltinType::Float32, Variant::Float32(std::f32::consts::PI)),
        (BuiltinType::Float64, Variant::Float64(-std::f64::consts::E)),
        (
            BuiltinType::Time,
            Variant::Time(RosTime::new(1234, 567_000_000)),
        ),
        (
            BuiltinType::Duration,
            Variant::Duration(RosTime::new(0, 999_999_999)),
        ),
    ];

    for (ty, value) in cases {
        let mut enc = CdrEncoder::new();
        enc.encode(ty, &value).expect("encode");
        let data = enc.finish();

        let mut dec = CdrDecoder::new();
        dec.init(&data).expect("init");
        assert_eq!(dec.decode(ty).expect("decode"), value, "type {ty}");
    }
}

#[test]
fn test_float_round_trip_is_bit_exact() {
    for bits in [
        0x0000_0000_0000_0001_u64, // subnormal
        0x7FF0_0000_0000_0000,     // +inf
        0xFFF0_0000_0000_0000,     // -inf
        0x8000_0000_0000_0000,     // -0.0
    ] {
        let value = f64::from_bits(bits);
        let mut enc = CdrEncoder::new();
        enc.encode(BuiltinType::Float64, &Variant::Float64(value))
            .expect("encode");
        let data = enc.finish();

        let mut dec = CdrDecoder::new();
        dec.init(&data).expect("init");
        match dec.decode(BuiltinType::Float64).expect("decode") {
            Variant::Float64(v) => assert_eq!(v.to_bits(), bits),
            other => panic!("unexpected variant {other:?}"),
        }
    }
}

// ============================================================================
// Alignment
// ============================================================================

#[test]
fn test_cursor_positions_follow_padding() {
    // u8, u16, u32, f64: pads of 1, 0, 4 under DDS CDR
    let mut enc = CdrEncoder::new();
    enc.encode(BuiltinType::UInt8, &Variant::UInt8(1)).unwrap();
    enc.encode(BuiltinType::UInt16, &Variant::UInt16(2)).unwrap();
    enc.encode(BuiltinType::UInt32, &Variant::UInt32(3)).unwrap();
    enc.encode(BuiltinType::Float64, &Variant::Float64(4.0))
        .unwrap();
    let data = enc.finish();
    // 4 header + 1 + 1 pad + 2 + 4, then (12 - 4) % 8 == 0 so the f64
    // needs no padding
    assert_eq!(data.len(), 20);

    let mut dec = CdrDecoder::new();
    dec.init(&data).unwrap();
    assert_eq!(dec.decode(BuiltinType::UInt8).unwrap(), Variant::UInt8(1));
    assert_eq!(dec.position(), 5);
    assert_eq!(dec.decode(BuiltinType::UInt16).unwrap(), Variant::UInt16(2));
    assert_eq!(dec.position(), 8);
    assert_eq!(dec.decode(BuiltinType::UInt32).unwrap(), Variant::UInt32(3));
    assert_eq!(dec.position(), 12);
    assert_eq!(
        dec.decode(BuiltinType::Float64).unwrap(),
        Variant::Float64(4.0)
    );
    assert_eq!(dec.position(), 20);
}

#[test]
fn test_xcdr2_64bit_values_align_to_4() {
    let header = CdrHeader {
        endianness: Endianness::Little,
        encoding: EncodingFlag::PlainCdr2,
        version: CdrVersion::Xcdr2,
    };
    let mut enc = CdrEncoder::with_header(header);
    enc.encode(BuiltinType::UInt32, &Variant::UInt32(1)).unwrap();
    enc.encode(BuiltinType::Float64, &Variant::Float64(2.0))
        .unwrap();
    let data = enc.finish();
    assert_eq!(data.len(), 4 + 4 + 8);

    let mut dec = CdrDecoder::with_version(CdrVersion::Xcdr2);
    dec.init(&data).unwrap();
    assert_eq!(dec.decode(BuiltinType::UInt32).unwrap(), Variant::UInt32(1));
    assert_eq!(
        dec.decode(BuiltinType::Float64).unwrap(),
        Variant::Float64(2.0)
    );
}

// ============================================================================
// Encapsulation
// ============================================================================

#[test]
fn test_invalid_encapsulation_combinations() {
    let mut dec = CdrDecoder::new();

    // nonzero first byte
    assert!(matches!(
        dec.init(&[1, 0x01, 0, 0]).unwrap_err(),
        CodecError::InvalidEncapsulation { .. }
    ));

    // CDR2 encoding under a DDS_CDR default version
    assert!(matches!(
        dec.init(&[0, 0x07, 0, 0]).unwrap_err(),
        CodecError::InvalidEncapsulation { .. }
    ));

    // unknown encoding bits
    let mut dec2 = CdrDecoder::with_version(CdrVersion::Xcdr2);
    assert!(matches!(
        dec2.init(&[0, 0x0D, 0, 0]).unwrap_err(),
        CodecError::InvalidEncapsulation { .. }
    ));
}

#[test]
fn test_big_endian_payload_decodes() {
    let header = CdrHeader {
        endianness: Endianness::Big,
        encoding: EncodingFlag::PlainCdr,
        version: CdrVersion::DdsCdr,
    };
    let mut enc = CdrEncoder::with_header(header);
    enc.encode(BuiltinType::UInt32, &Variant::UInt32(0x0102_0304))
        .unwrap();
    enc.encode(BuiltinType::Float64, &Variant::Float64(12.5))
        .unwrap();
    let data = enc.finish();
    assert_eq!(&data[4..8], &[0x01, 0x02, 0x03, 0x04]);

    let mut dec = CdrDecoder::new();
    dec.init(&data).unwrap();
    assert_eq!(
        dec.decode(BuiltinType::UInt32).unwrap(),
        Variant::UInt32(0x0102_0304)
    );
    assert_eq!(
        dec.decode(BuiltinType::Float64).unwrap(),
        Variant::Float64(12.5)
    );
}

// ============================================================================
// Strings
// ============================================================================

#[test]
fn test_string_trailing_nul_dropped() {
    let mut enc = CdrEncoder::new();
    enc.encode_string("hola").unwrap();
    let data = enc.finish();
    // length counts the NUL
    assert_eq!(&data[4..8], &5u32.to_le_bytes());
    assert_eq!(data[12], 0);

    let mut dec = CdrDecoder::new();
    dec.init(&data).unwrap();
    assert_eq!(dec.decode_string().unwrap(), "hola");
}

// ============================================================================
// Boundary: empty dynamic array
// ============================================================================

#[test]
fn test_empty_dynamic_array_cursor() {
    let parser = Parser::new(
        "t",
        &RosType::new("test_msgs/Floats"),
        "float64[] values\n",
    )
    .unwrap();

    let mut enc = CdrEncoder::new();
    enc.encode_u32(0).unwrap();
    let data = enc.finish();
    assert_eq!(data.len(), 8);

    let mut flat = FlatMessage::new();
    let mut dec = CdrDecoder::new();
    let complete = parser.deserialize(&data, &mut flat, &mut dec).unwrap();
    assert!(complete);
    assert!(flat.values.is_empty());
}

// ============================================================================
// JointState scenario
// ============================================================================

#[test]
fn test_joint_state_flat_decode() {
    let parser = joint_state_parser();
    let sample = sample_joint_state();
    let buffer = build_joint_state_cdr(&sample);

    let mut flat = FlatMessage::new();
    let mut dec = CdrDecoder::new();
    let complete = parser.deserialize(&buffer, &mut flat, &mut dec).unwrap();
    assert!(complete);
    assert!(flat.blobs.is_empty());

    // 11 numeric leaves + 4 string leaves, in preorder
    assert_eq!(flat.values.len(), 15);
    let numeric = flat
        .values
        .iter()
        .filter(|(_, v)| !matches!(v, Variant::String(_)))
        .count();
    assert_eq!(numeric, 11);

    let expected: Vec<(&str, Variant)> = vec![
        ("joint_state/header/stamp/sec", Variant::Int32(1234)),
        (
            "joint_state/header/stamp/nanosec",
            Variant::UInt32(567_000_000),
        ),
        (
            "joint_state/header/frame_id",
            Variant::String("base".to_string()),
        ),
        ("joint_state/name[0]", Variant::String("hola".to_string())),
        ("joint_state/name[1]", Variant::String("ciao".to_string())),
        ("joint_state/name[2]", Variant::String("bye".to_string())),
        ("joint_state/position[0]", Variant::Float64(10.0)),
        ("joint_state/position[1]", Variant::Float64(11.0)),
        ("joint_state/position[2]", Variant::Float64(12.0)),
        ("joint_state/velocity[0]", Variant::Float64(30.0)),
        ("joint_state/velocity[1]", Variant::Float64(31.0)),
        ("joint_state/velocity[2]", Variant::Float64(32.0)),
        ("joint_state/effort[0]", Variant::Float64(50.0)),
        ("joint_state/effort[1]", Variant::Float64(51.0)),
        ("joint_state/effort[2]", Variant::Float64(52.0)),
    ];

    for (i, (path, value)) in expected.iter().enumerate() {
        assert_eq!(&flat.path(&flat.values[i].0), path, "entry {i}");
        assert_eq!(&flat.values[i].1, value, "entry {i}");
    }
}

#[test]
fn test_leaf_paths_are_unique() {
    let parser = joint_state_parser();
    let buffer = build_joint_state_cdr(&sample_joint_state());

    let mut flat = FlatMessage::new();
    let mut dec = CdrDecoder::new();
    parser.deserialize(&buffer, &mut flat, &mut dec).unwrap();

    let paths: HashSet<String> = flat.values.iter().map(|(l, _)| flat.path(l)).collect();
    assert_eq!(paths.len(), flat.values.len());
}

// ============================================================================
// Large arrays
// ============================================================================

const POINTS_DEF: &str = "\
geometry_msgs/Point[] points
uint32 tail
===
MSG: geometry_msgs/Point
float64 x
";

fn encode_points(count: u32, tail: u32) -> Vec<u8> {
    let mut enc = CdrEncoder::new();
    enc.encode_u32(count).unwrap();
    for i in 0..count {
        enc.encode(BuiltinType::Float64, &Variant::Float64(f64::from(i)))
            .unwrap();
    }
    enc.encode(BuiltinType::UInt32, &Variant::UInt32(tail)).unwrap();
    enc.finish()
}

#[test]
fn test_large_composite_array_discarded() {
    let mut parser =
        Parser::new("cloud", &RosType::new("test_msgs/Cloud"), POINTS_DEF).unwrap();
    parser
        .set_max_array_policy(robomsg::MaxArrayPolicy::DiscardLargeArrays, 2)
        .unwrap();

    let data = encode_points(4, 42);
    let mut flat = FlatMessage::new();
    let mut dec = CdrDecoder::new();
    let complete = parser.deserialize(&data, &mut flat, &mut dec).unwrap();

    assert!(!complete);
    // the whole sub-tree is dropped, but the cursor drained it
    assert_eq!(flat.values.len(), 1);
    assert_eq!(flat.path(&flat.values[0].0), "cloud/tail");
    assert_eq!(flat.values[0].1, Variant::UInt32(42));
}

#[test]
fn test_large_composite_array_kept_up_to_max() {
    let mut parser =
        Parser::new("cloud", &RosType::new("test_msgs/Cloud"), POINTS_DEF).unwrap();
    parser
        .set_max_array_policy(robomsg::MaxArrayPolicy::KeepLargeArrays, 2)
        .unwrap();

    let data = encode_points(4, 7);
    let mut flat = FlatMessage::new();
    let mut dec = CdrDecoder::new();
    let complete = parser.deserialize(&data, &mut flat, &mut dec).unwrap();

    assert!(!complete);
    assert_eq!(flat.values.len(), 3);
    assert_eq!(flat.path(&flat.values[0].0), "cloud/points[0]/x");
    assert_eq!(flat.path(&flat.values[1].0), "cloud/points[1]/x");
    assert_eq!(flat.path(&flat.values[2].0), "cloud/tail");
}

// ============================================================================
// Underruns
// ============================================================================

#[test]
fn test_truncated_payload_is_underrun() {
    let parser = joint_state_parser();
    let buffer = build_joint_state_cdr(&sample_joint_state());

    let mut flat = FlatMessage::new();
    let mut dec = CdrDecoder::new();
    let err = parser
        .deserialize(&buffer[..20], &mut flat, &mut dec)
        .unwrap_err();
    assert!(matches!(err, CodecError::BufferUnderrun { .. }));
}
