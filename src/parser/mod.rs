// SPDX-FileCopyrightText: 2026 ArcheBase
//
// SPDX-License-Identifier: MulanPSL-2.0

//! The introspection front-end: compile a schema once, then walk binary
//! payloads against it.
//!
//! [`Parser::deserialize`] traverses the field tree in lock-step with a
//! wire backend and produces a [`FlatMessage`]: every primitive and string
//! leaf as a `(path, value)` pair in preorder, plus opaque byte regions
//! ("blobs") for oversized byte arrays.

pub mod json;
pub mod msgpack;

use std::collections::HashMap;
use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::core::{BuiltinType, CodecError, Result, Variant};
use crate::encoding::traits::Decoder;
use crate::schema::{
    build_message_schema, parse_message_definitions, FieldLeaf, MessageSchema, NodeId,
    RosMessage, RosType, ARRAY_DYNAMIC,
};

/// Hard cap on `max_array_size`.
const MAX_ARRAY_SIZE_LIMIT: u32 = 10_000;

/// What to do with arrays of composite elements longer than
/// `max_array_size`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum MaxArrayPolicy {
    /// Drop the whole sub-tree (the cursor still advances)
    #[default]
    DiscardLargeArrays,
    /// Keep the first `max_array_size` elements
    KeepLargeArrays,
}

/// How extracted blobs refer to their bytes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum BlobPolicy {
    /// Copy the region into owned storage
    #[default]
    Copy,
    /// Alias the input buffer (zero copy; the span lives as long as the
    /// caller's buffer)
    Reference,
}

/// A blob's bytes: either owned (copy policy) or aliasing the input
/// buffer (reference policy).
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BlobRef<'a> {
    /// Span into the caller's buffer
    Borrowed(&'a [u8]),
    /// Copied storage
    Owned(Vec<u8>),
}

impl BlobRef<'_> {
    /// The blob bytes.
    pub fn as_slice(&self) -> &[u8] {
        match self {
            BlobRef::Borrowed(s) => s,
            BlobRef::Owned(v) => v,
        }
    }

    /// Length in bytes.
    pub fn len(&self) -> usize {
        self.as_slice().len()
    }

    /// True if the blob is empty.
    pub fn is_empty(&self) -> bool {
        self.as_slice().is_empty()
    }
}

/// Linearized decode result.
///
/// `values` holds every recorded leaf (numeric and string) in preorder;
/// `blobs` holds oversized byte regions. Reuse the same instance across
/// calls to keep the allocations.
#[derive(Debug, Default)]
pub struct FlatMessage<'a> {
    /// Schema the message was decoded against
    pub schema: Option<Arc<MessageSchema>>,
    /// Preorder `(leaf, value)` pairs
    pub values: Vec<(FieldLeaf, Variant)>,
    /// Extracted `(leaf, bytes)` blob pairs
    pub blobs: Vec<(FieldLeaf, BlobRef<'a>)>,
}

impl FlatMessage<'_> {
    /// Create an empty container.
    pub fn new() -> Self {
        Self::default()
    }

    /// Render the path of a leaf through the attached schema.
    pub fn path(&self, leaf: &FieldLeaf) -> String {
        self.schema
            .as_ref()
            .map(|s| s.field_tree.leaf_to_string(leaf))
            .unwrap_or_default()
    }
}

/// Schema-driven message introspector.
///
/// Construct once per `(topic, type, definition)` triple; the compiled
/// schema is immutable afterwards and one parser may be shared by any
/// number of sequential decode calls.
#[derive(Debug, Clone)]
pub struct Parser {
    schema: Arc<MessageSchema>,
    max_array_size: u32,
    max_array_policy: MaxArrayPolicy,
    blob_policy: BlobPolicy,
}

impl Parser {
    /// Compile `definition` into a schema rooted at `root_type`, using
    /// `topic_name` as the path prefix.
    pub fn new(topic_name: &str, root_type: &RosType, definition: &str) -> Result<Self> {
        let parsed = parse_message_definitions(definition, root_type)?;
        let schema = build_message_schema(topic_name, &parsed)?;
        debug!(
            topic = topic_name,
            root = %root_type,
            types = schema.library.len(),
            nodes = schema.field_tree.len(),
            "compiled message schema"
        );
        Ok(Self {
            schema: Arc::new(schema),
            max_array_size: 100,
            max_array_policy: MaxArrayPolicy::DiscardLargeArrays,
            blob_policy: BlobPolicy::Copy,
        })
    }

    /// The compiled schema.
    pub fn schema(&self) -> &Arc<MessageSchema> {
        &self.schema
    }

    /// Look up a message in the library by type.
    pub fn message_by_type(&self, ty: &RosType) -> Option<&Arc<RosMessage>> {
        self.schema.library.get(ty)
    }

    /// Set the large-array policy and threshold. Values above 10000 are
    /// rejected.
    pub fn set_max_array_policy(
        &mut self,
        policy: MaxArrayPolicy,
        max_array_size: u32,
    ) -> Result<()> {
        if max_array_size > MAX_ARRAY_SIZE_LIMIT {
            return Err(CodecError::unsupported(format!(
                "max_array_size {max_array_size} exceeds the limit of {MAX_ARRAY_SIZE_LIMIT}"
            )));
        }
        self.max_array_policy = policy;
        self.max_array_size = max_array_size;
        Ok(())
    }

    /// Current large-array policy.
    pub fn max_array_policy(&self) -> MaxArrayPolicy {
        self.max_array_policy
    }

    /// Current large-array threshold.
    pub fn max_array_size(&self) -> u32 {
        self.max_array_size
    }

    /// Set the blob storage policy.
    pub fn set_blob_policy(&mut self, policy: BlobPolicy) {
        self.blob_policy = policy;
    }

    /// Current blob policy.
    pub fn blob_policy(&self) -> BlobPolicy {
        self.blob_policy
    }

    /// Decode `buffer` into `flat`.
    ///
    /// Returns `Ok(true)` when every leaf was recorded, `Ok(false)` when an
    /// oversized composite array forced a partial extraction. The output
    /// vectors are cleared and refilled; their capacity is retained.
    pub fn deserialize<'a>(
        &self,
        buffer: &'a [u8],
        flat: &mut FlatMessage<'a>,
        decoder: &mut dyn Decoder<'a>,
    ) -> Result<bool> {
        decoder.init(buffer)?;

        flat.schema = Some(self.schema.clone());
        flat.values.clear();
        flat.blobs.clear();

        let mut complete = true;
        let mut index_array = Vec::new();
        self.walk_children(
            self.schema.field_tree.root(),
            &mut index_array,
            true,
            decoder,
            flat,
            &mut complete,
        )?;
        Ok(complete)
    }

    fn walk_children<'a>(
        &self,
        node: NodeId,
        index_array: &mut Vec<u16>,
        store: bool,
        decoder: &mut dyn Decoder<'a>,
        flat: &mut FlatMessage<'a>,
        complete: &mut bool,
    ) -> Result<()> {
        let tree = &self.schema.field_tree;

        for i in 0..tree.children(node).len() {
            let child = tree.child(node, i);
            let field = tree.field(child);
            let type_id = field.ty().type_id();
            let dynamic = field.array_size() == ARRAY_DYNAMIC;

            let mut do_store = store;
            let array_size = if dynamic {
                i64::from(decoder.decode_u32()?)
            } else {
                i64::from(field.array_size())
            };

            if field.is_array() {
                index_array.push(0);
            }

            let oversized = array_size > i64::from(self.max_array_size);
            let is_blob = dynamic && oversized && type_id.size() == Some(1);

            if is_blob {
                let count = array_size as usize;
                if count > decoder.bytes_left() {
                    return Err(CodecError::buffer_underrun(
                        count,
                        decoder.bytes_left(),
                        0,
                    ));
                }
                if do_store {
                    let leaf = FieldLeaf {
                        node: child,
                        index_array: index_array.clone(),
                    };
                    let region = &decoder.remaining_slice()[..count];
                    let blob = match self.blob_policy {
                        BlobPolicy::Copy => BlobRef::Owned(region.to_vec()),
                        BlobPolicy::Reference => BlobRef::Borrowed(region),
                    };
                    flat.blobs.push((leaf, blob));
                }
                decoder.jump(count)?;
            } else {
                if oversized && type_id == BuiltinType::Other {
                    if self.max_array_policy == MaxArrayPolicy::DiscardLargeArrays {
                        do_store = false;
                    }
                    *complete = false;
                    warn!(
                        field = field.name(),
                        len = array_size,
                        max = self.max_array_size,
                        "large composite array, partial parse"
                    );
                }

                let mut store_element = do_store;
                for idx in 0..array_size {
                    if store_element && idx >= i64::from(self.max_array_size) {
                        store_element = false;
                    }
                    if field.is_array() && store_element {
                        if let Some(last) = index_array.last_mut() {
                            *last = idx as u16;
                        }
                    }

                    match type_id {
                        BuiltinType::String => {
                            let text = decoder.decode_string()?;
                            if store_element {
                                flat.values.push((
                                    FieldLeaf {
                                        node: child,
                                        index_array: index_array.clone(),
                                    },
                                    Variant::String(text),
                                ));
                            }
                        }
                        BuiltinType::Other => {
                            self.walk_children(
                                child,
                                index_array,
                                store_element,
                                decoder,
                                flat,
                                complete,
                            )?;
                        }
                        _ => {
                            let value = decoder.decode(type_id)?;
                            if store_element {
                                flat.values.push((
                                    FieldLeaf {
                                        node: child,
                                        index_array: index_array.clone(),
                                    },
                                    value,
                                ));
                            }
                        }
                    }
                }
            }

            if field.is_array() {
                index_array.pop();
            }
        }
        Ok(())
    }
}

/// Which wire format a [`ParserCollection`] decodes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum BackendKind {
    /// ROS1 packed format
    Ros1,
    /// CDR encapsulated format
    #[default]
    Cdr,
}

/// A registry of parsers keyed by topic, sharing one backend kind.
#[derive(Debug, Default)]
pub struct ParserCollection {
    backend: BackendKind,
    parsers: HashMap<String, Parser>,
}

impl ParserCollection {
    /// Create a collection decoding the given wire format.
    pub fn new(backend: BackendKind) -> Self {
        Self {
            backend,
            parsers: HashMap::new(),
        }
    }

    /// Compile and register a parser for `topic`. Registering the same
    /// topic twice keeps the first parser.
    pub fn register(
        &mut self,
        topic: &str,
        root_type: &RosType,
        definition: &str,
    ) -> Result<()> {
        if !self.parsers.contains_key(topic) {
            let parser = Parser::new(topic, root_type, definition)?;
            self.parsers.insert(topic.to_string(), parser);
        }
        Ok(())
    }

    /// The parser registered for `topic`, if any.
    pub fn parser(&self, topic: &str) -> Option<&Parser> {
        self.parsers.get(topic)
    }

    /// Decode one message for `topic`. Returns the flat message and the
    /// complete-parse flag.
    pub fn deserialize<'a>(
        &self,
        topic: &str,
        buffer: &'a [u8],
    ) -> Result<(FlatMessage<'a>, bool)> {
        let parser = self
            .parsers
            .get(topic)
            .ok_or_else(|| CodecError::unsupported(format!("topic '{topic}' not registered")))?;
        let mut flat = FlatMessage::new();
        let complete = match self.backend {
            BackendKind::Ros1 => {
                let mut decoder = crate::encoding::Ros1Decoder::new();
                parser.deserialize(buffer, &mut flat, &mut decoder)?
            }
            BackendKind::Cdr => {
                let mut decoder = crate::encoding::CdrDecoder::new();
                parser.deserialize(buffer, &mut flat, &mut decoder)?
            }
        };
        Ok((flat, complete))
    }
}
