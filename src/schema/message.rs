// SPDX-FileCopyrightText: 2026 ArcheBase
//
// SPDX-License-Identifier: MulanPSL-2.0

//! Message blocks and the two-pass definition compiler.
//!
//! A message-definition text is one or more blocks separated by lines of
//! `=` characters. The first block is the root message; every other block
//! starts with a `MSG: pkg/Name` header. The first pass parses each block
//! into a [`RosMessage`]; the second pass resolves unqualified composite
//! type names against the set of blocks.

use std::collections::HashMap;
use std::sync::Arc;

use tracing::debug;

use crate::core::{CodecError, Result};

use super::ros_field::RosField;
use super::ros_type::RosType;

/// An ordered sequence of fields plus the owning type.
///
/// Field order is the wire order and the field-tree child order.
#[derive(Debug, Clone)]
pub struct RosMessage {
    ty: RosType,
    fields: Vec<RosField>,
}

/// Mapping from composite type to its message, covering every type
/// referenced transitively from the root.
pub type MessageLibrary = HashMap<RosType, Arc<RosMessage>>;

impl RosMessage {
    /// Parse a single definition block.
    ///
    /// Empty lines and comment lines are skipped; a `MSG:` header sets the
    /// message type.
    pub fn from_block(block: &str) -> Result<Self> {
        let mut ty = RosType::default();
        let mut fields = Vec::new();

        for line in block.lines() {
            let trimmed = line.trim();
            if trimmed.is_empty() || trimmed.starts_with('#') {
                continue;
            }
            if let Some(name) = trimmed.strip_prefix("MSG:") {
                ty = RosType::new(name.trim());
            } else {
                fields.push(RosField::from_definition(trimmed)?);
            }
        }

        Ok(Self { ty, fields })
    }

    /// The owning type.
    pub fn ty(&self) -> &RosType {
        &self.ty
    }

    /// Replace the owning type (used for the root block, whose type is
    /// supplied by the caller rather than a `MSG:` header).
    pub fn set_type(&mut self, ty: RosType) {
        self.ty = ty;
    }

    /// Fields in declaration order.
    pub fn fields(&self) -> &[RosField] {
        &self.fields
    }

    /// Field at `i`.
    pub fn field(&self, i: usize) -> &RosField {
        &self.fields[i]
    }
}

/// Split a multi-block definition on separator lines (`^=+$`).
fn split_message_definitions(multi_def: &str) -> Vec<String> {
    let mut parts = Vec::new();
    let mut part = String::new();

    for line in multi_def.lines() {
        let trimmed = line.trim_end();
        if !trimmed.is_empty() && trimmed.bytes().all(|b| b == b'=') {
            parts.push(std::mem::take(&mut part));
        } else {
            part.push_str(line);
            part.push('\n');
        }
    }
    parts.push(part);
    parts
}

/// Parse a full definition into one message per block and resolve all
/// unqualified composite type names.
///
/// Resolution searches, in order: a block in the same package as the
/// enclosing message, a `std_msgs` block (the `Header` shorthand), then any
/// block whose message name matches. Matching is case-sensitive. Types that
/// stay unresolved surface as an undefined-type error when the field tree is
/// materialized.
pub fn parse_message_definitions(
    multi_def: &str,
    root_type: &RosType,
) -> Result<Vec<Arc<RosMessage>>> {
    let parts = split_message_definitions(multi_def);

    let mut parsed: Vec<RosMessage> = Vec::with_capacity(parts.len());
    for (i, part) in parts.iter().enumerate() {
        let mut msg = RosMessage::from_block(part)?;
        if i == 0 {
            if msg.ty() == &RosType::default() {
                if root_type == &RosType::default() {
                    return Err(CodecError::malformed("", "message type unspecified"));
                }
                msg.set_type(root_type.clone());
            }
        } else if msg.ty() == &RosType::default() {
            if msg.fields().is_empty() {
                continue;
            }
            return Err(CodecError::malformed(
                "",
                "auxiliary block without MSG: header",
            ));
        }
        parsed.push(msg);
    }

    let known_types: Vec<RosType> = parsed.iter().map(|m| m.ty().clone()).collect();

    // Second pass: qualify composite field types that lack a package.
    for msg in &mut parsed {
        let enclosing_pkg = msg.ty().pkg_name().to_string();
        for field in &mut msg.fields {
            let ty = field.ty();
            if ty.is_builtin() || !ty.pkg_name().is_empty() {
                continue;
            }
            let candidates: Vec<&RosType> = known_types
                .iter()
                .filter(|k| k.msg_name() == ty.msg_name())
                .collect();
            let resolved = candidates
                .iter()
                .find(|k| k.pkg_name() == enclosing_pkg)
                .or_else(|| candidates.iter().find(|k| k.pkg_name() == "std_msgs"))
                .or_else(|| candidates.first());
            if let Some(resolved) = resolved {
                field.change_type((*resolved).clone());
            }
        }
    }

    debug!(
        root = %root_type,
        blocks = parsed.len(),
        "parsed message definition"
    );

    Ok(parsed.into_iter().map(Arc::new).collect())
}
