// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Noema-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Noema and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use std::time::Duration;

use tokio::sync::{mpsc, watch};

use crate::model::NodeId;

use super::{LayoutBackend, LayoutEdge, LayoutInput, LayoutMode, LayoutNode, MapLayout, Spacing};

/// Tuning for the layout worker.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LayoutConfig {
    /// Requests arriving within this window collapse into one trailing
    /// computation. `force` requests bypass it.
    pub debounce_window: Duration,
    pub spacing: Spacing,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self { debounce_window: Duration::from_millis(100), spacing: Spacing::default() }
    }
}

/// One layout request: the exact subset to place, the mode, and the state
/// version it was derived from.
#[derive(Debug, Clone, PartialEq)]
pub struct LayoutRequest {
    pub nodes: Vec<LayoutNode>,
    pub edges: Vec<LayoutEdge>,
    pub mode: LayoutMode,
    pub priority: Option<NodeId>,
    pub version: u64,
    pub force: bool,
}

/// The engine's published output. `version` is the state version the
/// positions were computed for; `degraded` marks last-known-good positions
/// republished after a backend failure.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct LayoutSnapshot {
    version: u64,
    mode: Option<LayoutMode>,
    layout: MapLayout,
    degraded: bool,
}

impl LayoutSnapshot {
    #[cfg(test)]
    pub(crate) fn for_tests(
        version: u64,
        mode: Option<LayoutMode>,
        layout: MapLayout,
        degraded: bool,
    ) -> Self {
        Self { version, mode, layout, degraded }
    }

    pub fn version(&self) -> u64 {
        self.version
    }

    pub fn mode(&self) -> Option<LayoutMode> {
        self.mode
    }

    pub fn layout(&self) -> &MapLayout {
        &self.layout
    }

    pub fn degraded(&self) -> bool {
        self.degraded
    }
}

/// Client half: submit requests, publish the current state version, observe
/// snapshots.
#[derive(Debug)]
pub struct LayoutHandle {
    requests: mpsc::UnboundedSender<LayoutRequest>,
    version: watch::Sender<u64>,
    snapshots: watch::Receiver<LayoutSnapshot>,
}

impl LayoutHandle {
    /// Queues a request. Returns `false` (and logs) if the worker is gone.
    pub fn submit(&self, request: LayoutRequest) -> bool {
        if self.requests.send(request).is_err() {
            tracing::warn!("layout request dropped: worker stopped");
            return false;
        }
        true
    }

    /// Publishes the current state version. Any in-flight request carrying an
    /// older version is discarded instead of applied.
    pub fn publish_version(&self, version: u64) {
        self.version.send_replace(version);
    }

    pub fn snapshot(&self) -> LayoutSnapshot {
        self.snapshots.borrow().clone()
    }

    /// A receiver the host can await for snapshot changes.
    pub fn watch_snapshots(&self) -> watch::Receiver<LayoutSnapshot> {
        self.snapshots.clone()
    }
}

/// Worker half: owns the backend and computes off the input path. Drive
/// [`LayoutEngine::run`] on the host runtime.
pub struct LayoutEngine {
    backend: Box<dyn LayoutBackend + Send>,
    config: LayoutConfig,
    requests: mpsc::UnboundedReceiver<LayoutRequest>,
    version: watch::Receiver<u64>,
    snapshots: watch::Sender<LayoutSnapshot>,
    last_good: Option<MapLayout>,
}

impl std::fmt::Debug for LayoutEngine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LayoutEngine")
            .field("config", &self.config)
            .field("last_good", &self.last_good)
            .finish_non_exhaustive()
    }
}

impl LayoutEngine {
    pub fn channel(
        backend: Box<dyn LayoutBackend + Send>,
        config: LayoutConfig,
    ) -> (LayoutHandle, Self) {
        let (request_tx, request_rx) = mpsc::unbounded_channel();
        let (version_tx, version_rx) = watch::channel(0u64);
        let (snapshot_tx, snapshot_rx) = watch::channel(LayoutSnapshot::default());

        let handle = LayoutHandle {
            requests: request_tx,
            version: version_tx,
            snapshots: snapshot_rx,
        };
        let engine = Self {
            backend,
            config,
            requests: request_rx,
            version: version_rx,
            snapshots: snapshot_tx,
            last_good: None,
        };
        (handle, engine)
    }

    /// Processes requests until the handle is dropped. Non-forced requests
    /// are debounced to their trailing arrival.
    pub async fn run(mut self) {
        while let Some(first) = self.requests.recv().await {
            let (request, closed) = if first.force {
                (first, false)
            } else {
                self.debounce(first).await
            };
            self.process(request);
            if closed {
                break;
            }
        }
    }

    /// Collapses a burst into its latest request. A forced request ends the
    /// window immediately.
    async fn debounce(&mut self, first: LayoutRequest) -> (LayoutRequest, bool) {
        let mut current = first;
        loop {
            match tokio::time::timeout(self.config.debounce_window, self.requests.recv()).await {
                Ok(Some(next)) => {
                    let force = next.force;
                    current = next;
                    if force {
                        return (current, false);
                    }
                }
                Ok(None) => return (current, true),
                Err(_elapsed) => return (current, false),
            }
        }
    }

    fn process(&mut self, request: LayoutRequest) {
        let current_version = *self.version.borrow();
        if request.version < current_version {
            tracing::debug!(
                request_version = request.version,
                current_version,
                "discarding stale layout request"
            );
            return;
        }

        let input = LayoutInput {
            nodes: request.nodes,
            edges: request.edges,
            direction: request.mode.direction(),
            priority: request.priority.clone(),
            spacing: self.config.spacing,
        };
        let (layout, degraded) = match self.backend.compute(&input) {
            Ok(layout) => {
                self.last_good = Some(layout.clone());
                (layout, false)
            }
            Err(error) => {
                tracing::warn!(%error, "layout failed; keeping last known-good positions");
                (self.last_good.clone().unwrap_or_default(), true)
            }
        };

        // The version may have moved on while we computed; a stale result is
        // discarded, never applied.
        if request.version < *self.version.borrow() {
            tracing::debug!(request_version = request.version, "discarding stale layout result");
            return;
        }
        self.snapshots.send_replace(LayoutSnapshot {
            version: request.version,
            mode: Some(request.mode),
            layout,
            degraded,
        });
    }
}
