// SPDX-FileCopyrightText: 2026 ArcheBase
//
// SPDX-License-Identifier: MulanPSL-2.0

//! Backend contract shared by the ROS1 and CDR wire formats.
//!
//! The walker is polymorphic over these two traits: it asks the decoder for
//! one primitive at a time while it traverses the field tree, and drives the
//! encoder symmetrically when re-encoding from JSON.

use crate::core::{BuiltinType, Result, Variant};

/// Read cursor over a single message payload.
///
/// A decoder is a reusable cursor: call [`Decoder::init`] once per message,
/// then consume values in schema order.
pub trait Decoder<'a> {
    /// Attach the cursor to a message buffer and validate any header.
    fn init(&mut self, buffer: &'a [u8]) -> Result<()>;

    /// Decode one scalar of the given type into a [`Variant`].
    ///
    /// `String` and `Other` are not scalars and fail with `Unsupported`;
    /// strings go through [`Decoder::decode_string`] and composites through
    /// the walker.
    fn decode(&mut self, ty: BuiltinType) -> Result<Variant>;

    /// Decode a length-prefixed string.
    fn decode_string(&mut self) -> Result<String>;

    /// Decode a `u32` (array length prefix).
    fn decode_u32(&mut self) -> Result<u32>;

    /// Advance the cursor by `bytes` without decoding.
    fn jump(&mut self, bytes: usize) -> Result<()>;

    /// Bytes left after the cursor.
    fn bytes_left(&self) -> usize;

    /// The not-yet-consumed tail of the input buffer.
    fn remaining_slice(&self) -> &'a [u8];

    /// True for the CDR (ROS2) wire format.
    fn is_ros2(&self) -> bool;
}

/// Write cursor producing a single message payload.
pub trait Encoder {
    /// Start a new message: clear the buffer and emit any header.
    fn write_header(&mut self);

    /// Encode one scalar, coercing the variant to the wire type.
    fn encode(&mut self, ty: BuiltinType, value: &Variant) -> Result<()>;

    /// Encode a length-prefixed string.
    fn encode_string(&mut self, s: &str) -> Result<()>;

    /// Encode a `u32` (array length prefix).
    fn encode_u32(&mut self, value: u32) -> Result<()>;

    /// Discard buffered output and start over.
    fn reset(&mut self);

    /// The encoded bytes so far.
    fn data(&self) -> &[u8];

    /// True for the CDR (ROS2) wire format.
    fn is_ros2(&self) -> bool;
}
