// SPDX-FileCopyrightText: 2026 ArcheBase
//
// SPDX-License-Identifier: MulanPSL-2.0

//! Shared fixtures for the integration tests.

#![allow(dead_code)]

use robomsg::{BuiltinType, CdrEncoder, Encoder, Variant};

/// ROS2-style JointState definition with its dependencies.
pub const JOINT_STATE_DEF: &str = "\
std_msgs/Header header
string[] name
float64[] position
float64[] velocity
float64[] effort
================================================================================
MSG: std_msgs/Header
builtin_interfaces/Time stamp
string frame_id
================================================================================
MSG: builtin_interfaces/Time
int32 sec
uint32 nanosec
";

/// Sample values used across the JointState scenarios.
pub struct JointStateSample {
    pub sec: i32,
    pub nanosec: u32,
    pub frame_id: &'static str,
    pub name: [&'static str; 3],
    pub position: [f64; 3],
    pub velocity: [f64; 3],
    pub effort: [f64; 3],
}

pub fn sample_joint_state() -> JointStateSample {
    JointStateSample {
        sec: 1234,
        nanosec: 567_000_000,
        frame_id: "base",
        name: ["hola", "ciao", "bye"],
        position: [10.0, 11.0, 12.0],
        velocity: [30.0, 31.0, 32.0],
        effort: [50.0, 51.0, 52.0],
    }
}

/// Encode the sample JointState the way a ROS2 publisher would.
pub fn build_joint_state_cdr(sample: &JointStateSample) -> Vec<u8> {
    let mut enc = CdrEncoder::new();
    enc.encode(BuiltinType::Int32, &Variant::Int32(sample.sec))
        .expect("encode sec");
    enc.encode(BuiltinType::UInt32, &Variant::UInt32(sample.nanosec))
        .expect("encode nanosec");
    enc.encode_string(sample.frame_id).expect("encode frame_id");

    enc.encode_u32(sample.name.len() as u32).expect("name len");
    for name in &sample.name {
        enc.encode_string(name).expect("encode name");
    }
    for array in [&sample.position, &sample.velocity, &sample.effort] {
        enc.encode_u32(array.len() as u32).expect("array len");
        for value in array.iter() {
            enc.encode(BuiltinType::Float64, &Variant::Float64(*value))
                .expect("encode float");
        }
    }
    enc.finish()
}
