// SPDX-FileCopyrightText: 2026 ArcheBase
//
// SPDX-License-Identifier: MulanPSL-2.0

//! Wire backends and low-level codecs.
//!
//! - [`bytes`] - bounds-checked primitive reads/writes and the host
//!   byte-order probe
//! - [`traits`] - the [`Decoder`]/[`Encoder`] contract the walker drives
//! - [`ros1`] - flat little-endian ROS1 format
//! - [`cdr`] - encapsulated CDR format used by ROS2/DDS
//! - [`json`] - streaming JSON writer (NaN/Infinity capable)

pub mod bytes;
pub mod cdr;
pub mod json;
pub mod ros1;
pub mod traits;

pub use cdr::{CdrDecoder, CdrEncoder, CdrHeader, CdrVersion, Endianness, EncodingFlag};
pub use ros1::{Ros1Decoder, Ros1Encoder};
pub use traits::{Decoder, Encoder};
