// SPDX-FileCopyrightText: 2026 ArcheBase
//
// SPDX-License-Identifier: MulanPSL-2.0

//! A single field declaration inside a message definition.
//!
//! Grammar of a field line:
//!
//! ```text
//! type name            # plain field
//! type[] name          # dynamic array
//! type[N] name         # fixed array
//! type NAME = literal  # constant (not present on the wire)
//! type name default    # field with a default value
//! ```
//!
//! Trailing `#` comments are stripped, except inside string constants where
//! the remainder of the line is the value.

use std::sync::OnceLock;

use regex::Regex;

use crate::core::{BuiltinType, CodecError, Result};

use super::ros_type::RosType;

/// Marker for a variable-length array.
pub const ARRAY_DYNAMIC: i32 = -1;

/// A `(name, type, array info, constancy, default)` tuple.
#[derive(Debug, Clone)]
pub struct RosField {
    name: String,
    ty: RosType,
    value: Option<String>,
    is_array: bool,
    array_size: i32,
    is_constant: bool,
}

fn field_line_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(
            r"^(?P<type>[A-Za-z][A-Za-z0-9_]*(?:/[A-Za-z][A-Za-z0-9_]*)?)(?:\[(?P<size>[0-9]*)\])?\s+(?P<name>[A-Za-z][A-Za-z0-9_]*)\s*(?P<rest>.*)$",
        )
        .expect("field line regex")
    })
}

impl RosField {
    /// Build a synthetic field (used for the tree root).
    pub fn new(ty: RosType, name: &str) -> Self {
        Self {
            name: name.to_string(),
            ty,
            value: None,
            is_array: false,
            array_size: 1,
            is_constant: false,
        }
    }

    /// Parse a single definition line.
    pub fn from_definition(line: &str) -> Result<Self> {
        let line = line.trim();
        let caps = field_line_regex()
            .captures(line)
            .ok_or_else(|| CodecError::malformed(line, "not a field declaration"))?;

        let type_str = &caps["type"];
        let name = caps["name"].to_string();

        let (is_array, array_size) = match caps.name("size") {
            None => (false, 1),
            Some(m) if m.as_str().is_empty() => (true, ARRAY_DYNAMIC),
            Some(m) => {
                let n: i32 = m
                    .as_str()
                    .parse()
                    .map_err(|_| CodecError::malformed(line, "bad array size"))?;
                (true, n)
            }
        };

        let ty = RosType::new(type_str);

        let rest = caps["rest"].trim();
        let mut is_constant = false;
        let mut value = None;

        if let Some(literal) = rest.strip_prefix('=') {
            is_constant = true;
            // String constants keep the whole remainder, including '#'.
            let literal = if ty.type_id() == BuiltinType::String {
                literal.trim()
            } else {
                strip_comment(literal).trim()
            };
            value = Some(literal.to_string());
        } else if !rest.is_empty() && !rest.starts_with('#') {
            // A trailing default value.
            let literal = strip_comment(rest).trim();
            if !literal.is_empty() {
                value = Some(literal.to_string());
            }
        }

        if is_constant && is_array {
            return Err(CodecError::malformed(line, "array constants are not allowed"));
        }

        Ok(Self {
            name,
            ty,
            value,
            is_array,
            array_size,
            is_constant,
        })
    }

    /// Field name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Field type.
    pub fn ty(&self) -> &RosType {
        &self.ty
    }

    /// Replace the type (used by package resolution).
    pub fn change_type(&mut self, ty: RosType) {
        self.ty = ty;
    }

    /// True if this is a constant declaration.
    pub fn is_constant(&self) -> bool {
        self.is_constant
    }

    /// Constant or default literal, if any.
    pub fn value(&self) -> Option<&str> {
        self.value.as_deref()
    }

    /// True for fixed and dynamic arrays.
    pub fn is_array(&self) -> bool {
        self.is_array
    }

    /// `1` for scalars, [`ARRAY_DYNAMIC`] for variable length, otherwise the
    /// fixed length.
    pub fn array_size(&self) -> i32 {
        self.array_size
    }
}

fn strip_comment(s: &str) -> &str {
    match s.find('#') {
        Some(pos) => &s[..pos],
        None => s,
    }
}
