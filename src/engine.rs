// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Noema-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Noema and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! The engine facade: state in, layout requests out, scenes on demand.

use serde_json::Value;
use tokio::sync::watch;

use crate::layout::{
    node_size, LayeredBackend, LayoutConfig, LayoutEdge, LayoutEngine, LayoutHandle, LayoutMode,
    LayoutNode, LayoutRequest, LayoutSnapshot,
};
use crate::map::MindMap;
use crate::model::{NodeId, TreeBuildError};
use crate::nav::{self, FitTarget, LayoutTrigger, NavEffects, NavKey, PointerTarget};
use crate::scene::{build_scene, Scene};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct SceneKey {
    state_version: u64,
    layout_version: u64,
    degraded: bool,
}

/// Ties the mind-map state machine to a layout worker and the scene builder.
///
/// The engine is single-threaded and synchronous on the input path; only
/// layout computation happens on the worker the host drives.
#[derive(Debug)]
pub struct MindMapEngine {
    map: MindMap,
    layout: LayoutHandle,
    scene_cache: Option<(SceneKey, Scene)>,
}

impl MindMapEngine {
    /// An engine wired to its own worker running the built-in layered
    /// backend. Spawn (or otherwise drive) `worker.run()` on the host
    /// runtime.
    pub fn with_layered_backend(config: LayoutConfig) -> (Self, LayoutEngine) {
        let (handle, worker) = LayoutEngine::channel(Box::new(LayeredBackend), config);
        (Self::new(handle), worker)
    }

    /// An engine over an already-wired layout handle (custom backend).
    pub fn new(layout: LayoutHandle) -> Self {
        Self { map: MindMap::new(), layout, scene_cache: None }
    }

    pub fn map(&self) -> &MindMap {
        &self.map
    }

    /// Replaces the tree from a fresh content-source value. Structural
    /// changes must apply immediately, so the layout request bypasses the
    /// debounce window.
    pub fn rebuild_from_source(&mut self, source: &Value) -> Result<NavEffects, TreeBuildError> {
        self.map.rebuild_from_source(source)?;
        let trigger = LayoutTrigger { mode: self.map.layout_mode(), force: true };
        self.request_layout(trigger);
        Ok(NavEffects {
            state_changed: true,
            layout: Some(trigger),
            fit: Some(FitTarget::Visible),
        })
    }

    pub fn handle_key(&mut self, key: NavKey) -> NavEffects {
        let effects = nav::handle_key(&mut self.map, key);
        self.apply(&effects);
        effects
    }

    pub fn handle_pointer(&mut self, target: PointerTarget) -> NavEffects {
        let effects = nav::handle_pointer(&mut self.map, target);
        self.apply(&effects);
        effects
    }

    /// The current render payload, memoized on (state version, layout
    /// version). Rebuilt exactly when tree, expansion, focus, or the layout
    /// snapshot change.
    pub fn scene(&mut self) -> &Scene {
        let snapshot = self.layout.snapshot();
        let key = SceneKey {
            state_version: self.map.version(),
            layout_version: snapshot.version(),
            degraded: snapshot.degraded(),
        };
        let stale = !matches!(&self.scene_cache, Some((cached, _)) if *cached == key);
        if stale {
            let scene = build_scene(&self.map, &snapshot);
            self.scene_cache = Some((key, scene));
        }
        match &self.scene_cache {
            Some((_, scene)) => scene,
            None => unreachable!("scene cache populated above"),
        }
    }

    /// A receiver the host can await to learn when new positions landed.
    pub fn watch_snapshots(&self) -> watch::Receiver<LayoutSnapshot> {
        self.layout.watch_snapshots()
    }

    fn apply(&mut self, effects: &NavEffects) {
        if let Some(trigger) = effects.layout {
            self.request_layout(trigger);
        }
    }

    /// Publishes the new state version (so in-flight results go stale) and
    /// submits the exact subset the current mode displays.
    fn request_layout(&self, trigger: LayoutTrigger) {
        self.layout.publish_version(self.map.version());

        let tree = self.map.tree();
        let ids: Vec<NodeId> = match trigger.mode {
            LayoutMode::Overview => self.map.visible_graph().nodes().to_vec(),
            LayoutMode::Focused => {
                let relevant = self.map.relevant_ids();
                tree.depth_first_ids()
                    .into_iter()
                    .filter(|node_id| relevant.contains(node_id))
                    .collect()
            }
        };

        let nodes = ids
            .iter()
            .filter_map(|node_id| tree.node(node_id))
            .map(|node| LayoutNode { node_id: node.node_id().clone(), size: node_size(node) })
            .collect();
        let edges = tree
            .edges()
            .values()
            .filter(|edge| ids.contains(edge.source_id()) && ids.contains(edge.target_id()))
            .map(|edge| LayoutEdge {
                edge_id: edge.edge_id().clone(),
                source_id: edge.source_id().clone(),
                target_id: edge.target_id().clone(),
            })
            .collect();

        self.layout.submit(LayoutRequest {
            nodes,
            edges,
            mode: trigger.mode,
            priority: self.map.focus().focused().cloned(),
            version: self.map.version(),
            force: trigger.force,
        });
    }
}
