// SPDX-FileCopyrightText: 2026 ArcheBase
//
// SPDX-License-Identifier: MulanPSL-2.0

//! Builtin ROS type identifiers and their wire-size table.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Closed enumeration of the builtin ROS field types.
///
/// `Other` marks a composite (message) type; everything else is a leaf.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum BuiltinType {
    /// Boolean (1 byte on the wire)
    Bool,
    /// Byte (alias of uint8 in ROS1 definitions)
    Byte,
    /// Char (single byte, rendered as a 1-character string in JSON)
    Char,
    /// 8-bit unsigned integer
    UInt8,
    /// 16-bit unsigned integer
    UInt16,
    /// 32-bit unsigned integer
    UInt32,
    /// 64-bit unsigned integer
    UInt64,
    /// 8-bit signed integer
    Int8,
    /// 16-bit signed integer
    Int16,
    /// 32-bit signed integer
    Int32,
    /// 64-bit signed integer
    Int64,
    /// 32-bit float
    Float32,
    /// 64-bit float
    Float64,
    /// ROS time: `u32` seconds + `u32` nanoseconds
    Time,
    /// ROS duration: same wire shape as time
    Duration,
    /// Length-prefixed string
    String,
    /// Composite message type
    Other,
}

impl BuiltinType {
    /// Wire size in bytes, or `None` for variable-size types
    /// (`String`) and composites (`Other`).
    pub const fn size(self) -> Option<usize> {
        match self {
            BuiltinType::Bool
            | BuiltinType::Byte
            | BuiltinType::Char
            | BuiltinType::UInt8
            | BuiltinType::Int8 => Some(1),
            BuiltinType::UInt16 | BuiltinType::Int16 => Some(2),
            BuiltinType::UInt32 | BuiltinType::Int32 | BuiltinType::Float32 => Some(4),
            BuiltinType::UInt64
            | BuiltinType::Int64
            | BuiltinType::Float64
            | BuiltinType::Time
            | BuiltinType::Duration => Some(8),
            BuiltinType::String | BuiltinType::Other => None,
        }
    }

    /// The name used in message definitions (e.g. `"uint32"`).
    pub const fn name(self) -> &'static str {
        match self {
            BuiltinType::Bool => "bool",
            BuiltinType::Byte => "byte",
            BuiltinType::Char => "char",
            BuiltinType::UInt8 => "uint8",
            BuiltinType::UInt16 => "uint16",
            BuiltinType::UInt32 => "uint32",
            BuiltinType::UInt64 => "uint64",
            BuiltinType::Int8 => "int8",
            BuiltinType::Int16 => "int16",
            BuiltinType::Int32 => "int32",
            BuiltinType::Int64 => "int64",
            BuiltinType::Float32 => "float32",
            BuiltinType::Float64 => "float64",
            BuiltinType::Time => "time",
            BuiltinType::Duration => "duration",
            BuiltinType::String => "string",
            BuiltinType::Other => "other",
        }
    }

    /// Parse a builtin type name; unknown names map to `Other`.
    pub fn from_name(s: &str) -> Self {
        match s {
            "bool" => BuiltinType::Bool,
            "byte" => BuiltinType::Byte,
            "char" => BuiltinType::Char,
            "uint8" => BuiltinType::UInt8,
            "uint16" => BuiltinType::UInt16,
            "uint32" => BuiltinType::UInt32,
            "uint64" => BuiltinType::UInt64,
            "int8" => BuiltinType::Int8,
            "int16" => BuiltinType::Int16,
            "int32" => BuiltinType::Int32,
            "int64" => BuiltinType::Int64,
            "float32" => BuiltinType::Float32,
            "float64" => BuiltinType::Float64,
            "time" => BuiltinType::Time,
            "duration" => BuiltinType::Duration,
            "string" => BuiltinType::String,
            _ => BuiltinType::Other,
        }
    }

    /// CDR natural alignment of this type, in bytes.
    ///
    /// Strings and dynamic containers align their `u32` length prefix;
    /// time/duration align their leading `u32` word.
    pub const fn alignment(self) -> usize {
        match self {
            BuiltinType::Bool
            | BuiltinType::Byte
            | BuiltinType::Char
            | BuiltinType::UInt8
            | BuiltinType::Int8 => 1,
            BuiltinType::UInt16 | BuiltinType::Int16 => 2,
            BuiltinType::UInt64 | BuiltinType::Int64 | BuiltinType::Float64 => 8,
            _ => 4,
        }
    }
}

impl fmt::Display for BuiltinType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
