// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Noema-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Noema and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use std::collections::{BTreeMap, BTreeSet};

use crate::model::NodeId;

use super::{
    EdgeEndpoint, LayoutBackend, LayoutDirection, LayoutError, LayoutInput, MapLayout, Position,
    Size,
};

/// Deterministic layered layout (DAG-first).
///
/// Baseline:
/// - Rejects cycles.
/// - Assigns layers via longest-path layering over a deterministic
///   topological order.
/// - Orders nodes within each layer deterministically, with one downward
///   barycenter sweep for readability.
/// - Centers the priority node on the cross axis of its layer.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LayeredBackend;

impl LayoutBackend for LayeredBackend {
    fn compute(&self, input: &LayoutInput) -> Result<MapLayout, LayoutError> {
        if input.nodes.is_empty() {
            return Ok(MapLayout::default());
        }

        let sizes: BTreeMap<NodeId, Size> = input
            .nodes
            .iter()
            .map(|node| (node.node_id.clone(), node.size))
            .collect();

        let (outgoing, predecessors) = adjacency(input, &sizes)?;
        let topo = topo_sort(&outgoing)?;
        let node_layers = assign_layers(&topo, &outgoing);

        let max_layer = node_layers.values().copied().max().unwrap_or(0);
        let mut layers = vec![Vec::<NodeId>::new(); max_layer + 1];
        for node_id in sizes.keys() {
            let layer = *node_layers.get(node_id).unwrap_or(&0);
            layers[layer].push(node_id.clone());
        }

        // Start deterministic: id ordering within each layer.
        for layer_nodes in layers.iter_mut() {
            layer_nodes.sort();
        }

        // One downward barycenter sweep (deterministic).
        for layer_idx in 1..layers.len() {
            let prev_positions = layers[layer_idx - 1]
                .iter()
                .enumerate()
                .map(|(idx, node_id)| (node_id.clone(), idx))
                .collect::<BTreeMap<_, _>>();
            sort_layer_by_barycenter(&mut layers[layer_idx], &prev_positions, &predecessors);
        }

        if let Some(priority) = &input.priority {
            center_priority(&mut layers, priority);
        }

        Ok(place(&layers, &sizes, input))
    }
}

fn adjacency(
    input: &LayoutInput,
    sizes: &BTreeMap<NodeId, Size>,
) -> Result<(BTreeMap<NodeId, Vec<NodeId>>, BTreeMap<NodeId, Vec<NodeId>>), LayoutError> {
    let mut outgoing = BTreeMap::<NodeId, Vec<NodeId>>::new();
    let mut predecessors = BTreeMap::<NodeId, Vec<NodeId>>::new();
    for node_id in sizes.keys() {
        outgoing.insert(node_id.clone(), Vec::new());
        predecessors.insert(node_id.clone(), Vec::new());
    }

    for edge in &input.edges {
        if !sizes.contains_key(&edge.source_id) {
            return Err(LayoutError::UnknownEndpoint {
                edge_id: edge.edge_id.clone(),
                endpoint: EdgeEndpoint::Source,
                node_id: edge.source_id.clone(),
            });
        }
        if !sizes.contains_key(&edge.target_id) {
            return Err(LayoutError::UnknownEndpoint {
                edge_id: edge.edge_id.clone(),
                endpoint: EdgeEndpoint::Target,
                node_id: edge.target_id.clone(),
            });
        }
        outgoing
            .get_mut(&edge.source_id)
            .expect("node exists (validated)")
            .push(edge.target_id.clone());
        predecessors
            .get_mut(&edge.target_id)
            .expect("node exists (validated)")
            .push(edge.source_id.clone());
    }

    for targets in outgoing.values_mut() {
        targets.sort();
    }
    for sources in predecessors.values_mut() {
        sources.sort();
    }

    Ok((outgoing, predecessors))
}

fn topo_sort(outgoing: &BTreeMap<NodeId, Vec<NodeId>>) -> Result<Vec<NodeId>, LayoutError> {
    let mut indegree = BTreeMap::<NodeId, usize>::new();
    for node_id in outgoing.keys() {
        indegree.insert(node_id.clone(), 0);
    }
    for targets in outgoing.values() {
        for target in targets {
            *indegree.get_mut(target).expect("node exists (validated)") += 1;
        }
    }

    let mut ready = BTreeSet::<NodeId>::new();
    for (node_id, degree) in &indegree {
        if *degree == 0 {
            ready.insert(node_id.clone());
        }
    }

    let mut topo = Vec::<NodeId>::with_capacity(indegree.len());
    while !ready.is_empty() {
        let next = ready.iter().next().cloned().expect("set not empty");
        ready.remove(&next);
        topo.push(next.clone());
        for target in outgoing.get(&next).map(|v| v.as_slice()).unwrap_or(&[]) {
            let degree = indegree.get_mut(target).expect("node exists");
            *degree = degree.saturating_sub(1);
            if *degree == 0 {
                ready.insert(target.clone());
            }
        }
    }

    if topo.len() != indegree.len() {
        let node_ids = indegree
            .into_iter()
            .filter_map(|(node_id, degree)| (degree > 0).then_some(node_id))
            .collect::<Vec<_>>();
        return Err(LayoutError::CycleDetected { node_ids });
    }

    Ok(topo)
}

fn assign_layers(
    topo: &[NodeId],
    outgoing: &BTreeMap<NodeId, Vec<NodeId>>,
) -> BTreeMap<NodeId, usize> {
    let mut layers = BTreeMap::<NodeId, usize>::new();
    for node_id in topo {
        layers.insert(node_id.clone(), 0);
    }

    for source in topo {
        let source_layer = *layers.get(source).expect("node exists");
        for target in outgoing.get(source).map(|v| v.as_slice()).unwrap_or(&[]) {
            let target_layer = layers.get(target).copied().unwrap_or(0);
            layers.insert(target.clone(), target_layer.max(source_layer + 1));
        }
    }

    layers
}

fn sort_layer_by_barycenter(
    layer_nodes: &mut [NodeId],
    prev_positions: &BTreeMap<NodeId, usize>,
    predecessors: &BTreeMap<NodeId, Vec<NodeId>>,
) {
    let barycenter = |node_id: &NodeId| {
        predecessors
            .get(node_id)
            .map(|sources| {
                sources
                    .iter()
                    .filter_map(|source| prev_positions.get(source).copied())
                    .fold((0usize, 0usize), |(sum, count), pos| (sum + pos, count + 1))
            })
            .and_then(|(sum, count)| (count > 0).then_some((sum, count)))
    };

    layer_nodes.sort_by(|a, b| match (barycenter(a), barycenter(b)) {
        (None, None) => a.cmp(b),
        (Some(_), None) => std::cmp::Ordering::Less,
        (None, Some(_)) => std::cmp::Ordering::Greater,
        (Some((sum_a, count_a)), Some((sum_b, count_b))) => {
            // Compare sum_a/count_a vs sum_b/count_b without floats.
            let left = (sum_a as u128) * (count_b as u128);
            let right = (sum_b as u128) * (count_a as u128);
            left.cmp(&right).then_with(|| a.cmp(b))
        }
    });
}

/// Moves the priority node to the middle slot of its layer, so the cross-axis
/// centering below puts it on the axis.
fn center_priority(layers: &mut [Vec<NodeId>], priority: &NodeId) {
    for layer_nodes in layers.iter_mut() {
        if let Some(index) = layer_nodes.iter().position(|node_id| node_id == priority) {
            let node_id = layer_nodes.remove(index);
            let middle = layer_nodes.len() / 2;
            layer_nodes.insert(middle, node_id);
            return;
        }
    }
}

fn cross_extent(size: Size, direction: LayoutDirection) -> f32 {
    match direction {
        LayoutDirection::TopDown => size.width(),
        LayoutDirection::LeftToRight => size.height(),
    }
}

fn main_extent(size: Size, direction: LayoutDirection) -> f32 {
    match direction {
        LayoutDirection::TopDown => size.height(),
        LayoutDirection::LeftToRight => size.width(),
    }
}

fn place(
    layers: &[Vec<NodeId>],
    sizes: &BTreeMap<NodeId, Size>,
    input: &LayoutInput,
) -> MapLayout {
    let direction = input.direction;
    let spacing = input.spacing;
    let mut positions = BTreeMap::<NodeId, Position>::new();
    let mut main_offset = 0.0f32;

    for layer_nodes in layers {
        if layer_nodes.is_empty() {
            continue;
        }

        let layer_depth = layer_nodes
            .iter()
            .filter_map(|node_id| sizes.get(node_id))
            .map(|size| main_extent(*size, direction))
            .fold(0.0f32, f32::max);
        let main_center = main_offset + layer_depth / 2.0;

        // Pack boxes along the cross axis, then shift so the layer (or the
        // priority node, when present) is centered on the axis.
        let mut cursor = 0.0f32;
        let mut centers = Vec::with_capacity(layer_nodes.len());
        for node_id in layer_nodes {
            let extent = sizes
                .get(node_id)
                .map(|size| cross_extent(*size, direction))
                .unwrap_or(0.0);
            centers.push(cursor + extent / 2.0);
            cursor += extent + spacing.node_gap;
        }
        let span = cursor - spacing.node_gap;

        let shift = input
            .priority
            .as_ref()
            .and_then(|priority| {
                layer_nodes
                    .iter()
                    .position(|node_id| node_id == priority)
                    .map(|index| centers[index])
            })
            .unwrap_or(span / 2.0);

        for (node_id, center) in layer_nodes.iter().zip(centers) {
            let cross = center - shift;
            let position = match direction {
                LayoutDirection::TopDown => Position::new(cross, main_center),
                LayoutDirection::LeftToRight => Position::new(main_center, cross),
            };
            positions.insert(node_id.clone(), position);
        }

        main_offset += layer_depth + spacing.layer_gap;
    }

    MapLayout::new(positions)
}
