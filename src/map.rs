// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Noema-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Noema and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! The per-session aggregate: tree + expansion + focus + state version.

use std::collections::BTreeSet;

use serde_json::Value;

use crate::layout::LayoutMode;
use crate::model::{ConceptTree, NodeId, TreeBuildError};
use crate::state::{ExpansionState, FocusState, VisibleGraph};

/// All mutable mind-map state for one session.
///
/// Every state change bumps a monotonically increasing version; derived
/// consumers (layout, scene) key their work on it so stale results are
/// recognizable. The help flag is presentation-only and deliberately outside
/// the version.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct MindMap {
    tree: ConceptTree,
    expansion: ExpansionState,
    focus: FocusState,
    version: u64,
    help_visible: bool,
}

impl MindMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replaces the tree wholesale from a fresh content-source value and
    /// resets expansion and focus to their defaults. On a malformed source
    /// nothing changes and the error is surfaced.
    pub fn rebuild_from_source(&mut self, source: &Value) -> Result<(), TreeBuildError> {
        let tree = ConceptTree::build_from_source(source)?;
        self.tree = tree;
        self.expansion.reset(&self.tree);
        self.focus = FocusState::new();
        self.bump();
        Ok(())
    }

    pub fn tree(&self) -> &ConceptTree {
        &self.tree
    }

    pub fn expansion(&self) -> &ExpansionState {
        &self.expansion
    }

    pub fn focus(&self) -> &FocusState {
        &self.focus
    }

    pub fn version(&self) -> u64 {
        self.version
    }

    pub fn help_visible(&self) -> bool {
        self.help_visible
    }

    /// The mode the next layout request should use: focused context when a
    /// node is focused, otherwise the expand/collapse overview.
    pub fn layout_mode(&self) -> LayoutMode {
        if self.focus.focused().is_some() {
            LayoutMode::Focused
        } else {
            LayoutMode::Overview
        }
    }

    pub fn visible_graph(&self) -> VisibleGraph {
        self.expansion.compute_visible(&self.tree)
    }

    pub fn relevant_ids(&self) -> BTreeSet<NodeId> {
        self.focus.relevant_node_ids(&self.tree)
    }

    pub fn set_focus(&mut self, node_id: &NodeId) -> bool {
        let changed = self.focus.set_focus(&self.tree, node_id);
        if changed {
            self.bump();
        }
        changed
    }

    pub fn clear_focus(&mut self) -> bool {
        let changed = self.focus.clear_focus();
        if changed {
            self.bump();
        }
        changed
    }

    pub fn pop_focus_history(&mut self) -> Option<NodeId> {
        let previous = self.focus.pop_history();
        if previous.is_some() {
            self.bump();
        }
        previous
    }

    pub fn toggle_expansion(&mut self, node_id: &NodeId) -> bool {
        let changed = self.expansion.toggle(&self.tree, node_id);
        if changed {
            self.bump();
        }
        changed
    }

    pub fn expand(&mut self, node_id: &NodeId) -> bool {
        let changed = self.expansion.expand(&self.tree, node_id);
        if changed {
            self.bump();
        }
        changed
    }

    pub fn collapse(&mut self, node_id: &NodeId) -> bool {
        let changed = self.expansion.collapse(&self.tree, node_id);
        if changed {
            self.bump();
        }
        changed
    }

    pub fn expand_subtree(&mut self, node_id: &NodeId) -> bool {
        let changed = self.expansion.expand_subtree(&self.tree, node_id);
        if changed {
            self.bump();
        }
        changed
    }

    /// Presentation-only: flips the help overlay flag without touching the
    /// state version. Returns the new value.
    pub fn toggle_help(&mut self) -> bool {
        self.help_visible = !self.help_visible;
        self.help_visible
    }

    fn bump(&mut self) {
        self.version = self.version.saturating_add(1);
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use crate::layout::LayoutMode;
    use crate::model::NodeId;

    use super::MindMap;

    fn nid(value: &str) -> NodeId {
        NodeId::new(value).expect("node id")
    }

    fn quadrant_source() -> serde_json::Value {
        json!([
            {"id": "r", "label": "R"},
            {"id": "a", "label": "A", "parentId": "r"},
            {"id": "b", "label": "B", "parentId": "r"},
            {"id": "a1", "label": "A1", "parentId": "a"},
            {"id": "a2", "label": "A2", "parentId": "a"}
        ])
    }

    #[test]
    fn rebuild_resets_expansion_and_focus() {
        let mut map = MindMap::new();
        map.rebuild_from_source(&quadrant_source()).expect("rebuild");
        map.set_focus(&nid("a"));
        map.toggle_expansion(&nid("a"));

        map.rebuild_from_source(&quadrant_source()).expect("rebuild");
        assert_eq!(map.focus().focused(), None);
        assert!(map.focus().history().is_empty());
        assert!(map.expansion().is_expanded(&nid("r")));
        assert!(!map.expansion().is_expanded(&nid("a")));
    }

    #[test]
    fn rebuild_failure_leaves_state_untouched() {
        let mut map = MindMap::new();
        map.rebuild_from_source(&quadrant_source()).expect("rebuild");
        map.set_focus(&nid("a"));
        let version = map.version();

        let bad = json!([{"id": "x", "label": "X", "parentId": "x"}]);
        assert!(map.rebuild_from_source(&bad).is_err());
        assert_eq!(map.focus().focused(), Some(&nid("a")));
        assert_eq!(map.version(), version);
    }

    #[test]
    fn version_bumps_only_on_actual_change() {
        let mut map = MindMap::new();
        map.rebuild_from_source(&quadrant_source()).expect("rebuild");
        let version = map.version();

        assert!(map.set_focus(&nid("a")));
        assert_eq!(map.version(), version + 1);

        // Refocusing the focused node changes nothing.
        assert!(!map.set_focus(&nid("a")));
        assert_eq!(map.version(), version + 1);

        assert!(!map.toggle_expansion(&nid("ghost")));
        assert_eq!(map.version(), version + 1);
    }

    #[test]
    fn layout_mode_follows_focus() {
        let mut map = MindMap::new();
        map.rebuild_from_source(&quadrant_source()).expect("rebuild");
        assert_eq!(map.layout_mode(), LayoutMode::Overview);

        map.set_focus(&nid("a"));
        assert_eq!(map.layout_mode(), LayoutMode::Focused);

        map.clear_focus();
        assert_eq!(map.layout_mode(), LayoutMode::Overview);
    }

    #[test]
    fn help_flag_stays_out_of_the_version() {
        let mut map = MindMap::new();
        map.rebuild_from_source(&quadrant_source()).expect("rebuild");
        let version = map.version();

        assert!(map.toggle_help());
        assert!(!map.toggle_help());
        assert_eq!(map.version(), version);
    }
}
