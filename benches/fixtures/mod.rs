// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Noema-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Noema and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

#![allow(dead_code)]

// Shared deterministic benchmark fixtures (no RNG).

use serde_json::{Map, Value};

use noema::layout::{node_size, LayoutDirection, LayoutEdge, LayoutInput, LayoutNode, Spacing};
use noema::model::ConceptTree;

#[derive(Debug, Clone, Copy)]
pub enum Case {
    Small,
    MediumWide,
    LargeDeep,
}

pub fn source(case: Case) -> Value {
    let (branching, depth) = match case {
        Case::Small => (3, 2),
        Case::MediumWide => (8, 2),
        Case::LargeDeep => (4, 4),
    };
    let mut root = Map::new();
    root.insert("Root".to_owned(), balanced_children("c", branching, depth));
    Value::Object(root)
}

pub fn tree(case: Case) -> ConceptTree {
    ConceptTree::build_from_source(&source(case)).expect("bench tree")
}

fn balanced_children(prefix: &str, branching: usize, depth: usize) -> Value {
    let mut children = Vec::with_capacity(branching);
    for index in 0..branching {
        let label = format!("{prefix}{index}");
        if depth <= 1 {
            children.push(Value::String(label));
        } else {
            let mut entry = Map::new();
            entry.insert(label.clone(), balanced_children(&label, branching, depth - 1));
            children.push(Value::Object(entry));
        }
    }
    Value::Array(children)
}

pub fn layout_input(tree: &ConceptTree, direction: LayoutDirection) -> LayoutInput {
    let nodes = tree
        .depth_first_ids()
        .into_iter()
        .map(|node_id| {
            let node = tree.node(&node_id).expect("node");
            LayoutNode { node_id, size: node_size(node) }
        })
        .collect();
    let edges = tree
        .edges()
        .values()
        .map(|edge| LayoutEdge {
            edge_id: edge.edge_id().clone(),
            source_id: edge.source_id().clone(),
            target_id: edge.target_id().clone(),
        })
        .collect();
    LayoutInput { nodes, edges, direction, priority: None, spacing: Spacing::default() }
}
