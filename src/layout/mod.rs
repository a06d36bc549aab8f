// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Noema-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Noema and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Layout port and the built-in layered backend.
//!
//! The engine never positions nodes itself; it hands an exact node/edge
//! subset to a [`LayoutBackend`] and applies the result version-gated. Any
//! deterministic layered graph-drawing implementation can stand behind the
//! port.

pub mod engine;
pub mod layered;
pub mod sizing;

use std::collections::BTreeMap;
use std::fmt;

use serde::Serialize;

use crate::model::{EdgeId, NodeId};

pub use engine::{LayoutConfig, LayoutEngine, LayoutHandle, LayoutRequest, LayoutSnapshot};
pub use layered::LayeredBackend;
pub use sizing::node_size;

/// Which subgraph a layout pass covers and how it is oriented.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LayoutMode {
    /// Top-down layout of the expand/collapse-driven visible subgraph.
    Overview,
    /// Left-to-right layout of the focus context only.
    Focused,
}

impl LayoutMode {
    pub fn direction(self) -> LayoutDirection {
        match self {
            Self::Overview => LayoutDirection::TopDown,
            Self::Focused => LayoutDirection::LeftToRight,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LayoutDirection {
    TopDown,
    LeftToRight,
}

/// A node's center in diagram coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize)]
pub struct Position {
    x: f32,
    y: f32,
}

impl Position {
    pub fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    pub fn x(&self) -> f32 {
        self.x
    }

    pub fn y(&self) -> f32 {
        self.y
    }
}

/// A node's box extent, fed to the backend as a minimum-size constraint.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize)]
pub struct Size {
    width: f32,
    height: f32,
}

impl Size {
    pub fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }

    pub fn width(&self) -> f32 {
        self.width
    }

    pub fn height(&self) -> f32 {
        self.height
    }
}

/// Gaps between layers and between boxes within a layer.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Spacing {
    pub layer_gap: f32,
    pub node_gap: f32,
}

impl Default for Spacing {
    fn default() -> Self {
        Self { layer_gap: 60.0, node_gap: 24.0 }
    }
}

/// One node of the subset handed to a backend.
#[derive(Debug, Clone, PartialEq)]
pub struct LayoutNode {
    pub node_id: NodeId,
    pub size: Size,
}

/// One edge of the subset handed to a backend. Both endpoints must be part
/// of the same request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LayoutEdge {
    pub edge_id: EdgeId,
    pub source_id: NodeId,
    pub target_id: NodeId,
}

/// A full layout request as seen by a backend.
#[derive(Debug, Clone, PartialEq)]
pub struct LayoutInput {
    pub nodes: Vec<LayoutNode>,
    pub edges: Vec<LayoutEdge>,
    pub direction: LayoutDirection,
    /// Node granted central placement within its layer (the focused node).
    pub priority: Option<NodeId>,
    pub spacing: Spacing,
}

/// Computed positions for one request. Nodes absent from the request are
/// absent here.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct MapLayout {
    positions: BTreeMap<NodeId, Position>,
}

impl MapLayout {
    pub fn new(positions: BTreeMap<NodeId, Position>) -> Self {
        Self { positions }
    }

    pub fn positions(&self) -> &BTreeMap<NodeId, Position> {
        &self.positions
    }

    pub fn position(&self, node_id: &NodeId) -> Option<Position> {
        self.positions.get(node_id).copied()
    }

    pub fn len(&self) -> usize {
        self.positions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EdgeEndpoint {
    Source,
    Target,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LayoutError {
    UnknownEndpoint { edge_id: EdgeId, endpoint: EdgeEndpoint, node_id: NodeId },
    CycleDetected { node_ids: Vec<NodeId> },
}

impl fmt::Display for LayoutError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::UnknownEndpoint { edge_id, endpoint, node_id } => {
                let endpoint = match endpoint {
                    EdgeEndpoint::Source => "source",
                    EdgeEndpoint::Target => "target",
                };
                write!(f, "edge {edge_id} references unknown {endpoint} node {node_id}")
            }
            Self::CycleDetected { node_ids } => {
                if node_ids.is_empty() {
                    return write!(f, "layout subset contains a cycle");
                }
                write!(f, "layout subset contains a cycle involving nodes: ")?;
                for (idx, node_id) in node_ids.iter().enumerate() {
                    if idx > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{node_id}")?;
                }
                Ok(())
            }
        }
    }
}

impl std::error::Error for LayoutError {}

/// The graph-drawing port. Implementations must be deterministic: identical
/// input yields identical positions.
pub trait LayoutBackend {
    fn compute(&self, input: &LayoutInput) -> Result<MapLayout, LayoutError>;
}
