// SPDX-FileCopyrightText: 2026 ArcheBase
//
// SPDX-License-Identifier: MulanPSL-2.0

//! MessagePack emitter integration tests.

mod common;

use robomsg::{
    convert_to_msgpack, BuiltinType, CdrDecoder, Encoder, FlatMessage, Parser, Ros1Decoder,
    Ros1Encoder, RosType, Variant,
};

use common::{build_joint_state_cdr, sample_joint_state, JOINT_STATE_DEF};

// ============================================================================
// Map layout
// ============================================================================

#[test]
fn test_two_entry_map_layout() {
    let parser = Parser::new(
        "joint_state",
        &RosType::new("sensor_msgs/JointState"),
        "string[] name\nfloat64[] position\n",
    )
    .unwrap();

    let mut enc = Ros1Encoder::new();
    enc.encode_u32(1).unwrap();
    enc.encode_string("hola").unwrap();
    enc.encode_u32(1).unwrap();
    enc.encode(BuiltinType::Float64, &Variant::Float64(10.0))
        .unwrap();
    let data = enc.finish();

    let mut flat = FlatMessage::new();
    let mut dec = Ros1Decoder::new();
    parser.deserialize(&data, &mut flat, &mut dec).unwrap();
    assert_eq!(flat.values.len(), 2);

    let mut packed = Vec::new();
    convert_to_msgpack(&flat, &mut packed);

    let mut expected = vec![0x82];
    // fixstr "joint_state/name[0]" (19 bytes)
    expected.push(0xA0 | 19);
    expected.extend_from_slice(b"joint_state/name[0]");
    // fixstr "hola"
    expected.push(0xA4);
    expected.extend_from_slice(b"hola");
    // fixstr "joint_state/position[0]" (23 bytes)
    expected.push(0xA0 | 23);
    expected.extend_from_slice(b"joint_state/position[0]");
    // float64 10.0
    expected.push(0xCB);
    expected.extend_from_slice(&10.0f64.to_be_bytes());

    assert_eq!(packed, expected);
}

// ============================================================================
// Widening rules
// ============================================================================

#[test]
fn test_widening_rules() {
    let parser = Parser::new(
        "m",
        &RosType::new("test_msgs/Mixed"),
        "uint64 big\nfloat32 f\nbool ok\nint16 small\ntime stamp\n",
    )
    .unwrap();

    let mut enc = Ros1Encoder::new();
    enc.encode(BuiltinType::UInt64, &Variant::UInt64(u64::MAX))
        .unwrap();
    enc.encode(BuiltinType::Float32, &Variant::Float32(1.5))
        .unwrap();
    enc.encode(BuiltinType::Bool, &Variant::Bool(true)).unwrap();
    enc.encode(BuiltinType::Int16, &Variant::Int16(-5)).unwrap();
    enc.encode(
        BuiltinType::Time,
        &Variant::Time(robomsg::RosTime::new(1, 2)),
    )
    .unwrap();
    let data = enc.finish();

    let mut flat = FlatMessage::new();
    let mut dec = Ros1Decoder::new();
    parser.deserialize(&data, &mut flat, &mut dec).unwrap();

    let mut packed = Vec::new();
    convert_to_msgpack(&flat, &mut packed);

    // map of 5
    assert_eq!(packed[0], 0x85);

    // uint64 stays unsigned: 0xCF marker somewhere after the first key
    let key_len = "m/big".len();
    let mut offset = 1 + 1 + key_len;
    assert_eq!(packed[offset], 0xCF);
    offset += 9;

    // float32 keeps its width
    offset += 1 + "m/f".len();
    assert_eq!(packed[offset], 0xCA);
    offset += 5;

    // bool
    offset += 1 + "m/ok".len();
    assert_eq!(packed[offset], 0xC3);
    offset += 1;

    // small negative int -> negative fixint
    offset += 1 + "m/small".len();
    assert_eq!(packed[offset], (-5i8) as u8);
    offset += 1;

    // time widens to int64 nanoseconds: 1s + 2ns = 1_000_000_002
    offset += 1 + "m/stamp".len();
    assert_eq!(packed[offset], 0xCE);
    let nanos = u32::from_be_bytes([
        packed[offset + 1],
        packed[offset + 2],
        packed[offset + 3],
        packed[offset + 4],
    ]);
    assert_eq!(nanos, 1_000_000_002);
    assert_eq!(offset + 5, packed.len());
}

// ============================================================================
// Full message
// ============================================================================

#[test]
fn test_joint_state_msgpack_count() {
    let parser = Parser::new(
        "joint_state",
        &RosType::new("sensor_msgs/JointState"),
        JOINT_STATE_DEF,
    )
    .unwrap();
    let buffer = build_joint_state_cdr(&sample_joint_state());

    let mut flat = FlatMessage::new();
    let mut dec = CdrDecoder::new();
    parser.deserialize(&buffer, &mut flat, &mut dec).unwrap();

    let mut packed = Vec::new();
    convert_to_msgpack(&flat, &mut packed);

    // 15 entries: fixmap marker
    assert_eq!(packed[0], 0x8F);
    // reuse of the output buffer truncates stale content
    let previous_len = packed.len();
    convert_to_msgpack(&flat, &mut packed);
    assert_eq!(packed.len(), previous_len);
}
