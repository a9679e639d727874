// SPDX-FileCopyrightText: 2026 ArcheBase
//
// SPDX-License-Identifier: MulanPSL-2.0

//! Tagged scalar value decoded from a message leaf.
//!
//! `Variant` holds exactly one builtin leaf value. Extraction requires the
//! exact tag; conversion coerces numerically where a total mapping exists
//! (anything numeric widens to `f64`, time and duration become seconds).

use std::fmt;

use serde::{Deserialize, Serialize};

use super::builtin::BuiltinType;
use super::error::{CodecError, Result};

/// ROS wall-clock time or duration: seconds + nanoseconds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RosTime {
    /// Seconds component
    pub sec: u32,
    /// Nanoseconds component
    pub nsec: u32,
}

impl RosTime {
    /// Create a time value from its two wire words.
    pub const fn new(sec: u32, nsec: u32) -> Self {
        Self { sec, nsec }
    }

    /// Seconds as a floating point value.
    pub fn to_sec(self) -> f64 {
        f64::from(self.sec) + f64::from(self.nsec) * 1e-9
    }

    /// Total nanoseconds.
    pub fn to_nanos(self) -> i64 {
        i64::from(self.sec) * 1_000_000_000 + i64::from(self.nsec)
    }
}

/// A single decoded leaf value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Variant {
    /// Boolean
    Bool(bool),
    /// Byte (uint8 alias)
    Byte(u8),
    /// Char (wire byte)
    Char(u8),
    /// 8-bit unsigned integer
    UInt8(u8),
    /// 16-bit unsigned integer
    UInt16(u16),
    /// 32-bit unsigned integer
    UInt32(u32),
    /// 64-bit unsigned integer
    UInt64(u64),
    /// 8-bit signed integer
    Int8(i8),
    /// 16-bit signed integer
    Int16(i16),
    /// 32-bit signed integer
    Int32(i32),
    /// 64-bit signed integer
    Int64(i64),
    /// 32-bit float
    Float32(f32),
    /// 64-bit float
    Float64(f64),
    /// ROS time
    Time(RosTime),
    /// ROS duration
    Duration(RosTime),
    /// UTF-8 string
    String(String),
}

impl Variant {
    /// The builtin tag of this value.
    pub fn type_id(&self) -> BuiltinType {
        match self {
            Variant::Bool(_) => BuiltinType::Bool,
            Variant::Byte(_) => BuiltinType::Byte,
            Variant::Char(_) => BuiltinType::Char,
            Variant::UInt8(_) => BuiltinType::UInt8,
            Variant::UInt16(_) => BuiltinType::UInt16,
            Variant::UInt32(_) => BuiltinType::UInt32,
            Variant::UInt64(_) => BuiltinType::UInt64,
            Variant::Int8(_) => BuiltinType::Int8,
            Variant::Int16(_) => BuiltinType::Int16,
            Variant::Int32(_) => BuiltinType::Int32,
            Variant::Int64(_) => BuiltinType::Int64,
            Variant::Float32(_) => BuiltinType::Float32,
            Variant::Float64(_) => BuiltinType::Float64,
            Variant::Time(_) => BuiltinType::Time,
            Variant::Duration(_) => BuiltinType::Duration,
            Variant::String(_) => BuiltinType::String,
        }
    }

    // ========================================================================
    // Lossless extraction (exact tag required)
    // ========================================================================

    /// Borrow the inner string, if this is a `String` variant.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Variant::String(s) => Some(s),
            _ => None,
        }
    }

    /// Extract a time value; fails unless the tag is `Time`.
    pub fn extract_time(&self) -> Result<RosTime> {
        match self {
            Variant::Time(t) => Ok(*t),
            other => Err(extract_error("time", other.type_id())),
        }
    }

    /// Extract a duration value; fails unless the tag is `Duration`.
    pub fn extract_duration(&self) -> Result<RosTime> {
        match self {
            Variant::Duration(t) => Ok(*t),
            other => Err(extract_error("duration", other.type_id())),
        }
    }

    /// Extract an `f64`; fails unless the tag is `Float64`.
    pub fn extract_f64(&self) -> Result<f64> {
        match self {
            Variant::Float64(v) => Ok(*v),
            other => Err(extract_error("float64", other.type_id())),
        }
    }

    /// Extract a `bool`; fails unless the tag is `Bool`.
    pub fn extract_bool(&self) -> Result<bool> {
        match self {
            Variant::Bool(v) => Ok(*v),
            other => Err(extract_error("bool", other.type_id())),
        }
    }

    // ========================================================================
    // Lossy conversion
    // ========================================================================

    /// Widen to `f64`. Time and duration become seconds; strings fail.
    pub fn to_f64(&self) -> Result<f64> {
        match self {
            Variant::Bool(v) => Ok(f64::from(u8::from(*v))),
            Variant::Byte(v) | Variant::Char(v) | Variant::UInt8(v) => Ok(f64::from(*v)),
            Variant::UInt16(v) => Ok(f64::from(*v)),
            Variant::UInt32(v) => Ok(f64::from(*v)),
            Variant::UInt64(v) => Ok(*v as f64),
            Variant::Int8(v) => Ok(f64::from(*v)),
            Variant::Int16(v) => Ok(f64::from(*v)),
            Variant::Int32(v) => Ok(f64::from(*v)),
            Variant::Int64(v) => Ok(*v as f64),
            Variant::Float32(v) => Ok(f64::from(*v)),
            Variant::Float64(v) => Ok(*v),
            Variant::Time(t) | Variant::Duration(t) => Ok(t.to_sec()),
            Variant::String(_) => Err(convert_error(self.type_id(), "f64")),
        }
    }

    /// Convert to `i64`. Time and duration become total nanoseconds; floats
    /// truncate; out-of-range `u64` and strings fail.
    pub fn to_i64(&self) -> Result<i64> {
        match self {
            Variant::Bool(v) => Ok(i64::from(u8::from(*v))),
            Variant::Byte(v) | Variant::Char(v) | Variant::UInt8(v) => Ok(i64::from(*v)),
            Variant::UInt16(v) => Ok(i64::from(*v)),
            Variant::UInt32(v) => Ok(i64::from(*v)),
            Variant::UInt64(v) => {
                i64::try_from(*v).map_err(|_| convert_error(BuiltinType::UInt64, "i64"))
            }
            Variant::Int8(v) => Ok(i64::from(*v)),
            Variant::Int16(v) => Ok(i64::from(*v)),
            Variant::Int32(v) => Ok(i64::from(*v)),
            Variant::Int64(v) => Ok(*v),
            Variant::Float32(v) => Ok(*v as i64),
            Variant::Float64(v) => Ok(*v as i64),
            Variant::Time(t) | Variant::Duration(t) => Ok(t.to_nanos()),
            Variant::String(_) => Err(convert_error(BuiltinType::String, "i64")),
        }
    }

    /// Convert to `u64`. Negative values, non-integers types that cannot
    /// represent the value, and strings fail.
    pub fn to_u64(&self) -> Result<u64> {
        match self {
            Variant::Bool(v) => Ok(u64::from(u8::from(*v))),
            Variant::Byte(v) | Variant::Char(v) | Variant::UInt8(v) => Ok(u64::from(*v)),
            Variant::UInt16(v) => Ok(u64::from(*v)),
            Variant::UInt32(v) => Ok(u64::from(*v)),
            Variant::UInt64(v) => Ok(*v),
            Variant::Int8(v) => {
                u64::try_from(*v).map_err(|_| convert_error(BuiltinType::Int8, "u64"))
            }
            Variant::Int16(v) => {
                u64::try_from(*v).map_err(|_| convert_error(BuiltinType::Int16, "u64"))
            }
            Variant::Int32(v) => {
                u64::try_from(*v).map_err(|_| convert_error(BuiltinType::Int32, "u64"))
            }
            Variant::Int64(v) => {
                u64::try_from(*v).map_err(|_| convert_error(BuiltinType::Int64, "u64"))
            }
            _ => Err(convert_error(self.type_id(), "u64")),
        }
    }
}

impl fmt::Display for Variant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Variant::Bool(v) => write!(f, "{v}"),
            Variant::Byte(v) | Variant::Char(v) | Variant::UInt8(v) => write!(f, "{v}"),
            Variant::UInt16(v) => write!(f, "{v}"),
            Variant::UInt32(v) => write!(f, "{v}"),
            Variant::UInt64(v) => write!(f, "{v}"),
            Variant::Int8(v) => write!(f, "{v}"),
            Variant::Int16(v) => write!(f, "{v}"),
            Variant::Int32(v) => write!(f, "{v}"),
            Variant::Int64(v) => write!(f, "{v}"),
            Variant::Float32(v) => write!(f, "{v}"),
            Variant::Float64(v) => write!(f, "{v}"),
            Variant::Time(t) => write!(f, "{}.{:09}", t.sec, t.nsec),
            Variant::Duration(t) => write!(f, "{}.{:09}", t.sec, t.nsec),
            Variant::String(s) => write!(f, "\"{s}\""),
        }
    }
}

fn extract_error(expected: &str, actual: BuiltinType) -> CodecError {
    CodecError::unsupported(format!("extract {expected} from {actual} variant"))
}

fn convert_error(from: BuiltinType, to: &str) -> CodecError {
    CodecError::unsupported(format!("convert {from} variant to {to}"))
}
