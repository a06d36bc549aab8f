// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Noema-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Noema and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! The render boundary: everything an external renderer needs, nothing else.
//!
//! A [`Scene`] joins the current map state with the latest layout snapshot.
//! Rendering, export, and styling happen entirely on the consumer side.

use serde::Serialize;

use crate::layout::{LayoutMode, LayoutSnapshot, Position, Size};
use crate::map::MindMap;
use crate::model::NodeId;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SceneNodeFlags {
    pub expanded: bool,
    pub focused: bool,
    pub in_focus_path: bool,
}

/// One positioned node, in presentation order.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SceneNode {
    id: String,
    label: String,
    description: Option<String>,
    level: u32,
    position: Position,
    size: Size,
    flags: SceneNodeFlags,
}

impl SceneNode {
    pub fn id(&self) -> &str {
        &self.id
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

    pub fn position(&self) -> Position {
        self.position
    }

    pub fn size(&self) -> Size {
        self.size
    }

    pub fn flags(&self) -> SceneNodeFlags {
        self.flags
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SceneEdgeFlags {
    /// The edge touches the focused node.
    pub focused: bool,
    /// Both endpoints are part of the focus context.
    pub in_focus_path: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SceneEdge {
    id: String,
    source_id: String,
    target_id: String,
    flags: SceneEdgeFlags,
}

impl SceneEdge {
    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn source_id(&self) -> &str {
        &self.source_id
    }

    pub fn target_id(&self) -> &str {
        &self.target_id
    }

    pub fn flags(&self) -> SceneEdgeFlags {
        self.flags
    }
}

/// The full render payload for one frame.
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Scene {
    version: u64,
    degraded: bool,
    nodes: Vec<SceneNode>,
    edges: Vec<SceneEdge>,
}

impl Scene {
    pub fn version(&self) -> u64 {
        self.version
    }

    /// Positions stem from a failed layout pass and show the last known-good
    /// arrangement.
    pub fn degraded(&self) -> bool {
        self.degraded
    }

    pub fn nodes(&self) -> &[SceneNode] {
        &self.nodes
    }

    pub fn edges(&self) -> &[SceneEdge] {
        &self.edges
    }
}

/// Assembles the scene for the map's current mode from the given snapshot.
/// Nodes the snapshot has no position for are omitted; they reappear once a
/// fresh layout lands.
pub fn build_scene(map: &MindMap, snapshot: &LayoutSnapshot) -> Scene {
    let tree = map.tree();
    let relevant = map.relevant_ids();
    let focused = map.focus().focused();

    let ordered: Vec<NodeId> = match map.layout_mode() {
        LayoutMode::Overview => map.visible_graph().nodes().to_vec(),
        LayoutMode::Focused => tree
            .depth_first_ids()
            .into_iter()
            .filter(|node_id| relevant.contains(node_id))
            .collect(),
    };

    let mut nodes = Vec::with_capacity(ordered.len());
    let mut included = std::collections::BTreeSet::new();
    for node_id in &ordered {
        let Some(node) = tree.node(node_id) else {
            continue;
        };
        let Some(position) = snapshot.layout().position(node_id) else {
            continue;
        };
        included.insert(node_id.clone());
        nodes.push(SceneNode {
            id: node_id.as_str().to_owned(),
            label: node.label().to_owned(),
            description: node.description().map(str::to_owned),
            level: node.level(),
            position,
            size: crate::layout::node_size(node),
            flags: SceneNodeFlags {
                expanded: map.expansion().is_expanded(node_id),
                focused: focused == Some(node_id),
                in_focus_path: relevant.contains(node_id),
            },
        });
    }

    let mut edges = Vec::new();
    for edge in tree.edges().values() {
        if !included.contains(edge.source_id()) || !included.contains(edge.target_id()) {
            continue;
        }
        let touches_focus =
            focused == Some(edge.source_id()) || focused == Some(edge.target_id());
        edges.push(SceneEdge {
            id: edge.edge_id().as_str().to_owned(),
            source_id: edge.source_id().as_str().to_owned(),
            target_id: edge.target_id().as_str().to_owned(),
            flags: SceneEdgeFlags {
                focused: touches_focus,
                in_focus_path: relevant.contains(edge.source_id())
                    && relevant.contains(edge.target_id()),
            },
        });
    }

    Scene { version: map.version(), degraded: snapshot.degraded(), nodes, edges }
}
