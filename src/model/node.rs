// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Noema-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Noema and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use smallvec::SmallVec;

use super::ids::{EdgeId, NodeId};

/// Ordered child ids. Most concept nodes have a handful of children, so the
/// first few live inline.
pub type ChildIds = SmallVec<[NodeId; 4]>;

/// Depth tier of a node. Shallower tiers render larger and bolder, and the
/// tier feeds the minimum-size constraints handed to the layout backend.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum NodeTier {
    Root,
    Theme,
    Concept,
    Detail,
}

impl NodeTier {
    pub fn from_level(level: u32) -> Self {
        match level {
            0 => Self::Root,
            1 => Self::Theme,
            2 => Self::Concept,
            _ => Self::Detail,
        }
    }
}

/// A single concept in the mind map.
///
/// Identity, structure, and text are immutable once the tree is built; only
/// expansion/focus state (held elsewhere) changes between regenerations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConceptNode {
    node_id: NodeId,
    label: String,
    description: Option<String>,
    level: u32,
    parent_id: Option<NodeId>,
    children_ids: ChildIds,
}

impl ConceptNode {
    pub(crate) fn new(
        node_id: NodeId,
        label: impl Into<String>,
        description: Option<String>,
        level: u32,
        parent_id: Option<NodeId>,
    ) -> Self {
        Self {
            node_id,
            label: label.into(),
            description,
            level,
            parent_id,
            children_ids: ChildIds::new(),
        }
    }

    pub fn node_id(&self) -> &NodeId {
        &self.node_id
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    pub fn level(&self) -> u32 {
        self.level
    }

    pub fn tier(&self) -> NodeTier {
        NodeTier::from_level(self.level)
    }

    pub fn parent_id(&self) -> Option<&NodeId> {
        self.parent_id.as_ref()
    }

    pub fn children_ids(&self) -> &[NodeId] {
        &self.children_ids
    }

    pub fn is_leaf(&self) -> bool {
        self.children_ids.is_empty()
    }

    pub(crate) fn push_child(&mut self, child_id: NodeId) {
        self.children_ids.push(child_id);
    }
}

/// A parent-to-child adjacency entry. The edge set is exactly the tree's
/// adjacency and never contains cycles.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConceptEdge {
    edge_id: EdgeId,
    source_id: NodeId,
    target_id: NodeId,
}

impl ConceptEdge {
    pub(crate) fn new(source_id: NodeId, target_id: NodeId) -> Self {
        Self {
            edge_id: EdgeId::for_child(&target_id),
            source_id,
            target_id,
        }
    }

    pub fn edge_id(&self) -> &EdgeId {
        &self.edge_id
    }

    pub fn source_id(&self) -> &NodeId {
        &self.source_id
    }

    pub fn target_id(&self) -> &NodeId {
        &self.target_id
    }
}
