// SPDX-FileCopyrightText: 2026 ArcheBase
//
// SPDX-License-Identifier: MulanPSL-2.0

//! Schema compiler: message-definition parsing, type resolution, and the
//! compiled field tree.

pub mod message;
pub mod ros_field;
pub mod ros_type;
pub mod tree;

use std::sync::Arc;

use crate::core::{CodecError, Result};

pub use message::{parse_message_definitions, MessageLibrary, RosMessage};
pub use ros_field::{RosField, ARRAY_DYNAMIC};
pub use ros_type::RosType;
pub use tree::{FieldLeaf, FieldTree, FieldTreeNode, NodeId};

/// A compiled schema: the field tree rooted at the topic plus the library
/// of every referenced message type.
#[derive(Debug, Clone)]
pub struct MessageSchema {
    /// Topic name, used as the root path segment
    pub topic_name: String,
    /// Root message type
    pub root_type: RosType,
    /// Preorder field tree (constants elided)
    pub field_tree: FieldTree,
    /// Library of all composite types
    pub library: MessageLibrary,
}

impl MessageSchema {
    /// The root message.
    pub fn root_message(&self) -> &Arc<RosMessage> {
        self.library
            .get(&self.root_type)
            .expect("library always contains the root type")
    }
}

/// Materialize the field tree and library from parsed message blocks.
///
/// The first entry of `parsed` is the root message. Fails with an
/// undefined-type error when a composite field has no matching block and
/// with a recursive-schema error when a type reaches itself.
pub fn build_message_schema(
    topic_name: &str,
    parsed: &[Arc<RosMessage>],
) -> Result<MessageSchema> {
    let root_msg = parsed
        .first()
        .ok_or_else(|| CodecError::malformed("", "empty message definition"))?;
    let root_type = root_msg.ty().clone();

    let mut library = MessageLibrary::new();
    for msg in parsed {
        library.insert(msg.ty().clone(), msg.clone());
    }

    let mut field_tree =
        FieldTree::with_root(RosField::new(root_type.clone(), topic_name));
    let mut visiting = vec![root_type.clone()];
    expand_message(
        &mut field_tree,
        &library,
        root_msg,
        0,
        &mut visiting,
    )?;

    Ok(MessageSchema {
        topic_name: topic_name.to_string(),
        root_type,
        field_tree,
        library,
    })
}

fn expand_message(
    tree: &mut FieldTree,
    library: &MessageLibrary,
    msg: &RosMessage,
    node: NodeId,
    visiting: &mut Vec<RosType>,
) -> Result<()> {
    for field in msg.fields() {
        if field.is_constant() {
            continue;
        }
        let child = tree.add_child(node, field.clone());
        if field.ty().is_builtin() {
            continue;
        }
        let sub = library
            .get(field.ty())
            .ok_or_else(|| CodecError::undefined_type(field.ty().base_name()))?;
        if visiting.contains(field.ty()) {
            return Err(CodecError::recursive_schema(field.ty().base_name()));
        }
        visiting.push(field.ty().clone());
        expand_message(tree, library, sub, child, visiting)?;
        visiting.pop();
    }
    Ok(())
}
