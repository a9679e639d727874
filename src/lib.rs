// SPDX-FileCopyrightText: 2026 ArcheBase
//
// SPDX-License-Identifier: MulanPSL-2.0

//! # Robomsg
//!
//! Schema-driven introspection for ROS-family message payloads.
//!
//! Given the human-readable message definition of a topic and its root
//! type, this library compiles a typed field tree and then walks raw
//! payload bytes against it without any generated code:
//!
//! - **Decode** ROS1-packed or CDR-encapsulated buffers into a flat,
//!   path-addressable list of leaf values ([`FlatMessage`]), extracting
//!   oversized byte arrays as zero-copy or owned blobs
//! - **Convert** payloads to JSON and re-encode JSON documents back into
//!   the binary wire form
//! - **Emit** a decoded message as a MessagePack map of `(path, value)`
//!   pairs
//!
//! ## Architecture
//!
//! - `core/` - builtin type table, [`Variant`] leaf values, errors
//! - `schema/` - message-definition compiler and the compiled field tree
//! - `encoding/` - the ROS1 and CDR wire backends behind one
//!   [`Decoder`]/[`Encoder`] contract
//! - `parser/` - the introspective walker, JSON bridge, and MessagePack
//!   emitter
//!
//! ## Example
//!
//! ```
//! use robomsg::{Parser, FlatMessage, RosType, Ros1Decoder};
//!
//! # fn main() -> robomsg::Result<()> {
//! let parser = Parser::new(
//!     "pose",
//!     &RosType::new("geometry_msgs/Point"),
//!     "float64 x\nfloat64 y\nfloat64 z\n",
//! )?;
//!
//! let payload = [
//!     0, 0, 0, 0, 0, 0, 0x24, 0x40, // x = 10.0
//!     0, 0, 0, 0, 0, 0, 0x26, 0x40, // y = 11.0
//!     0, 0, 0, 0, 0, 0, 0x28, 0x40, // z = 12.0
//! ];
//!
//! let mut flat = FlatMessage::new();
//! let mut decoder = Ros1Decoder::new();
//! let complete = parser.deserialize(&payload, &mut flat, &mut decoder)?;
//! assert!(complete);
//! assert_eq!(flat.path(&flat.values[0].0), "pose/x");
//! # Ok(())
//! # }
//! ```

// Core types
pub mod core;

pub use crate::core::{BuiltinType, CodecError, Result, RosTime, Variant};

// Schema compiler and field tree
pub mod schema;

pub use schema::{
    FieldLeaf, FieldTree, FieldTreeNode, MessageLibrary, MessageSchema, NodeId, RosField,
    RosMessage, RosType, ARRAY_DYNAMIC,
};

// Wire backends
pub mod encoding;

pub use encoding::{
    CdrDecoder, CdrEncoder, CdrHeader, CdrVersion, Decoder, Encoder, Endianness, EncodingFlag,
    Ros1Decoder, Ros1Encoder,
};

// Introspection front-end
pub mod parser;

pub use parser::msgpack::convert_to_msgpack;
pub use parser::{
    BackendKind, BlobPolicy, BlobRef, FlatMessage, MaxArrayPolicy, Parser, ParserCollection,
};
