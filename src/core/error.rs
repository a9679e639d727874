// SPDX-FileCopyrightText: 2026 ArcheBase
//
// SPDX-License-Identifier: MulanPSL-2.0

//! Core error types for robomsg.
//!
//! Provides error types for introspection operations:
//! - Message-definition parsing and type resolution
//! - Binary decoding (ROS1 and CDR)
//! - JSON conversion in both directions

use std::fmt;

/// Errors that can occur while compiling a schema or transcoding a message.
#[derive(Debug, Clone)]
pub enum CodecError {
    /// A read needed more bytes than remain in the buffer
    BufferUnderrun {
        /// Requested bytes
        requested: usize,
        /// Available bytes
        available: usize,
        /// Cursor position when the error occurred
        cursor: usize,
    },

    /// CDR encapsulation header is malformed or incompatible with the
    /// configured CDR version
    InvalidEncapsulation {
        /// What made the header invalid
        reason: String,
    },

    /// A composite field references a type with no entry in the library
    UndefinedType {
        /// The unresolved type name
        type_name: String,
    },

    /// A message type transitively contains itself
    RecursiveSchema {
        /// The type that closed the cycle
        type_name: String,
    },

    /// A field line or block in the message definition could not be parsed
    MalformedDefinition {
        /// The offending line (may be empty for block-level errors)
        line: String,
        /// What went wrong
        reason: String,
    },

    /// Input JSON is not well-formed
    JsonParse {
        /// Parser error message
        message: String,
    },

    /// JSON value shape does not match the schema (array vs scalar, fixed
    /// array size disagreement, wrong member type)
    JsonShapeMismatch {
        /// Field being encoded
        field: String,
        /// Description of the mismatch
        reason: String,
    },

    /// Unsupported type or operation
    Unsupported {
        /// What is not supported
        feature: String,
    },
}

impl CodecError {
    /// Create a buffer underrun error.
    pub fn buffer_underrun(requested: usize, available: usize, cursor: usize) -> Self {
        CodecError::BufferUnderrun {
            requested,
            available,
            cursor,
        }
    }

    /// Create an invalid encapsulation error.
    pub fn invalid_encapsulation(reason: impl Into<String>) -> Self {
        CodecError::InvalidEncapsulation {
            reason: reason.into(),
        }
    }

    /// Create an undefined type error.
    pub fn undefined_type(type_name: impl Into<String>) -> Self {
        CodecError::UndefinedType {
            type_name: type_name.into(),
        }
    }

    /// Create a recursive schema error.
    pub fn recursive_schema(type_name: impl Into<String>) -> Self {
        CodecError::RecursiveSchema {
            type_name: type_name.into(),
        }
    }

    /// Create a malformed definition error.
    pub fn malformed(line: impl Into<String>, reason: impl Into<String>) -> Self {
        CodecError::MalformedDefinition {
            line: line.into(),
            reason: reason.into(),
        }
    }

    /// Create a JSON parse error.
    pub fn json_parse(message: impl Into<String>) -> Self {
        CodecError::JsonParse {
            message: message.into(),
        }
    }

    /// Create a JSON shape mismatch error.
    pub fn json_shape(field: impl Into<String>, reason: impl Into<String>) -> Self {
        CodecError::JsonShapeMismatch {
            field: field.into(),
            reason: reason.into(),
        }
    }

    /// Create an unsupported feature error.
    pub fn unsupported(feature: impl Into<String>) -> Self {
        CodecError::Unsupported {
            feature: feature.into(),
        }
    }

    /// Get structured fields for logging.
    pub fn log_fields(&self) -> Vec<(&'static str, String)> {
        match self {
            CodecError::BufferUnderrun {
                requested,
                available,
                cursor,
            } => vec![
                ("requested", requested.to_string()),
                ("available", available.to_string()),
                ("cursor", cursor.to_string()),
            ],
            CodecError::InvalidEncapsulation { reason } => vec![("reason", reason.clone())],
            CodecError::UndefinedType { type_name } => vec![("type", type_name.clone())],
            CodecError::RecursiveSchema { type_name } => vec![("type", type_name.clone())],
            CodecError::MalformedDefinition { line, reason } => {
                vec![("line", line.clone()), ("reason", reason.clone())]
            }
            CodecError::JsonParse { message } => vec![("message", message.clone())],
            CodecError::JsonShapeMismatch { field, reason } => {
                vec![("field", field.clone()), ("reason", reason.clone())]
            }
            CodecError::Unsupported { feature } => vec![("feature", feature.clone())],
        }
    }
}

impl fmt::Display for CodecError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CodecError::BufferUnderrun {
                requested,
                available,
                cursor,
            } => write!(
                f,
                "Buffer underrun: requested {requested} bytes at position {cursor}, but only {available} bytes available"
            ),
            CodecError::InvalidEncapsulation { reason } => {
                write!(f, "Invalid CDR encapsulation: {reason}")
            }
            CodecError::UndefinedType { type_name } => {
                write!(f, "Undefined type: '{type_name}'")
            }
            CodecError::RecursiveSchema { type_name } => {
                write!(f, "Recursive schema: type '{type_name}' contains itself")
            }
            CodecError::MalformedDefinition { line, reason } => {
                if line.is_empty() {
                    write!(f, "Malformed definition: {reason}")
                } else {
                    write!(f, "Malformed definition at '{line}': {reason}")
                }
            }
            CodecError::JsonParse { message } => write!(f, "JSON parse error: {message}"),
            CodecError::JsonShapeMismatch { field, reason } => {
                write!(f, "JSON shape mismatch at '{field}': {reason}")
            }
            CodecError::Unsupported { feature } => {
                write!(f, "Unsupported: '{feature}'")
            }
        }
    }
}

impl std::error::Error for CodecError {}

/// Result type for robomsg operations.
pub type Result<T> = std::result::Result<T, CodecError>;
