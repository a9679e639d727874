// SPDX-FileCopyrightText: 2026 ArcheBase
//
// SPDX-License-Identifier: MulanPSL-2.0

//! Preorder field tree compiled from a message schema.
//!
//! Nodes live in an arena and refer to each other by index, so the tree is
//! `Clone`/`Send` without shared-pointer cycles. The root holds a synthetic
//! field whose name is the topic and whose type is the root message type;
//! constant fields are elided. A leaf is a node whose type is builtin.

use std::fmt::Write as _;

use super::ros_field::RosField;

/// Index of a node inside a [`FieldTree`].
pub type NodeId = usize;

/// A node of the field tree.
#[derive(Debug, Clone)]
pub struct FieldTreeNode {
    parent: Option<NodeId>,
    children: Vec<NodeId>,
    field: RosField,
}

impl FieldTreeNode {
    /// The field this node was expanded from.
    pub fn field(&self) -> &RosField {
        &self.field
    }

    /// Parent node, `None` for the root.
    pub fn parent(&self) -> Option<NodeId> {
        self.parent
    }

    /// Children in declaration order.
    pub fn children(&self) -> &[NodeId] {
        &self.children
    }

    /// True if the node has no children.
    pub fn is_leaf(&self) -> bool {
        self.children.is_empty()
    }
}

/// Arena-backed tree of field descriptors.
#[derive(Debug, Clone, Default)]
pub struct FieldTree {
    nodes: Vec<FieldTreeNode>,
}

/// A leaf reference plus the array subscripts collected on the path from
/// the root, one entry per array ancestor, in visit order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldLeaf {
    /// Node index in the schema's field tree
    pub node: NodeId,
    /// Array subscript stack
    pub index_array: Vec<u16>,
}

impl FieldTree {
    /// Create a tree containing only a root node.
    pub fn with_root(field: RosField) -> Self {
        Self {
            nodes: vec![FieldTreeNode {
                parent: None,
                children: Vec::new(),
                field,
            }],
        }
    }

    /// Root node index.
    pub fn root(&self) -> NodeId {
        0
    }

    /// Node accessor.
    pub fn node(&self, id: NodeId) -> &FieldTreeNode {
        &self.nodes[id]
    }

    /// Children of `id`, in declaration order.
    pub fn children(&self, id: NodeId) -> &[NodeId] {
        &self.nodes[id].children
    }

    /// The `i`-th child of `id`.
    pub fn child(&self, id: NodeId, i: usize) -> NodeId {
        self.nodes[id].children[i]
    }

    /// The field owned by `id`.
    pub fn field(&self, id: NodeId) -> &RosField {
        &self.nodes[id].field
    }

    /// Number of nodes.
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// True if the tree has no nodes.
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Append a child under `parent`.
    pub(crate) fn add_child(&mut self, parent: NodeId, field: RosField) -> NodeId {
        let id = self.nodes.len();
        self.nodes.push(FieldTreeNode {
            parent: Some(parent),
            children: Vec::new(),
            field,
        });
        self.nodes[parent].children.push(id);
        id
    }

    /// Render the `/`-joined path of a leaf, inserting `[k]` at each array
    /// ancestor. The root (topic) segment is never subscripted.
    pub fn leaf_to_string(&self, leaf: &FieldLeaf) -> String {
        let mut chain = Vec::new();
        let mut current = Some(leaf.node);
        while let Some(id) = current {
            chain.push(id);
            current = self.nodes[id].parent;
        }
        chain.reverse();

        let mut out = String::new();
        let mut array_count = 0;
        for (i, id) in chain.iter().enumerate() {
            let field = &self.nodes[*id].field;
            if i > 0 {
                out.push('/');
            }
            out.push_str(field.name());
            if i > 0 && field.is_array() && array_count < leaf.index_array.len() {
                let _ = write!(out, "[{}]", leaf.index_array[array_count]);
                array_count += 1;
            }
        }
        out
    }
}
