// SPDX-FileCopyrightText: 2026 ArcheBase
//
// SPDX-License-Identifier: MulanPSL-2.0

//! Core types shared across the crate: builtin type table, leaf values,
//! and the error/result types.

pub mod builtin;
pub mod error;
pub mod variant;

pub use builtin::BuiltinType;
pub use error::{CodecError, Result};
pub use variant::{RosTime, Variant};
