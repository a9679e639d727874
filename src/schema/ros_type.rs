// SPDX-FileCopyrightText: 2026 ArcheBase
//
// SPDX-License-Identifier: MulanPSL-2.0

//! Message type identifier of the form `pkg/Name`, or a builtin name.

use std::fmt;
use std::hash::{Hash, Hasher};

use crate::core::BuiltinType;

/// A ROS type name.
///
/// Holds the full base name (e.g. `geometry_msgs/Pose`); the package and
/// message parts are views into it. Builtin names (`uint32`, `time`, ...)
/// carry their tag; anything else is `Other`. Equality and hashing are on
/// the base name. If the tag is not `Other`, the package is empty.
#[derive(Debug, Clone)]
pub struct RosType {
    base_name: String,
    pkg_len: usize,
    id: BuiltinType,
}

impl RosType {
    /// Parse a type name, with or without a package prefix.
    pub fn new(name: &str) -> Self {
        let pkg_len = name.find('/').unwrap_or(0);
        let msg_name = if pkg_len > 0 { &name[pkg_len + 1..] } else { name };
        Self {
            base_name: name.to_string(),
            pkg_len,
            id: BuiltinType::from_name(msg_name),
        }
    }

    /// Full name: `pkg/Name` or the bare builtin/message name.
    pub fn base_name(&self) -> &str {
        &self.base_name
    }

    /// Package part, empty if unqualified (always empty for builtins).
    pub fn pkg_name(&self) -> &str {
        &self.base_name[..self.pkg_len]
    }

    /// Message part: `geometry_msgs/Pose` -> `Pose`.
    pub fn msg_name(&self) -> &str {
        if self.pkg_len > 0 {
            &self.base_name[self.pkg_len + 1..]
        } else {
            &self.base_name
        }
    }

    /// True if the type is a ROS builtin.
    pub fn is_builtin(&self) -> bool {
        self.id != BuiltinType::Other
    }

    /// The builtin tag; `Other` for composites.
    pub fn type_id(&self) -> BuiltinType {
        self.id
    }

    /// Wire size of the builtin, `None` if variable or composite.
    pub fn type_size(&self) -> Option<usize> {
        self.id.size()
    }

    /// A copy of this type qualified with the given package.
    pub fn with_pkg_name(&self, pkg: &str) -> Self {
        RosType::new(&format!("{pkg}/{}", self.msg_name()))
    }
}

impl Default for RosType {
    fn default() -> Self {
        Self {
            base_name: String::new(),
            pkg_len: 0,
            id: BuiltinType::Other,
        }
    }
}

impl PartialEq for RosType {
    fn eq(&self, other: &Self) -> bool {
        self.base_name == other.base_name
    }
}

impl Eq for RosType {}

impl Hash for RosType {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.base_name.hash(state);
    }
}

impl fmt::Display for RosType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.base_name)
    }
}
