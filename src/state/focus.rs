// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Noema-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Noema and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use std::collections::BTreeSet;

use crate::model::{ConceptTree, NodeId};

/// Focused node plus navigation history.
///
/// The history is ordered, deduplicated, most-recent last; whenever a node is
/// focused its last entry is the current focus. Clearing focus clears the
/// history too.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct FocusState {
    focused: Option<NodeId>,
    history: Vec<NodeId>,
}

impl FocusState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn focused(&self) -> Option<&NodeId> {
        self.focused.as_ref()
    }

    pub fn history(&self) -> &[NodeId] {
        &self.history
    }

    /// Focuses the node and records it in the history, removing any prior
    /// occurrence first. Unknown ids are logged and ignored. Returns whether
    /// anything changed.
    pub fn set_focus(&mut self, tree: &ConceptTree, node_id: &NodeId) -> bool {
        if !tree.contains(node_id) {
            tracing::warn!(node_id = %node_id, "focus ignored: unknown node");
            return false;
        }
        if self.focused.as_ref() == Some(node_id) {
            return false;
        }
        self.history.retain(|entry| entry != node_id);
        self.history.push(node_id.clone());
        self.focused = Some(node_id.clone());
        true
    }

    /// Clears focus and history. Returns whether anything changed.
    pub fn clear_focus(&mut self) -> bool {
        if self.focused.is_none() && self.history.is_empty() {
            return false;
        }
        self.focused = None;
        self.history.clear();
        true
    }

    /// Moves focus back to the previous history entry, dropping the current
    /// one. With fewer than two entries there is nowhere to go back to.
    pub fn pop_history(&mut self) -> Option<NodeId> {
        if self.history.len() < 2 {
            return None;
        }
        self.history.pop();
        let previous = self.history.last().cloned();
        self.focused.clone_from(&previous);
        previous
    }

    /// The focus context: the focused node, its children, its parent, its
    /// siblings, and every history entry still present in the tree. Empty
    /// when nothing is focused.
    pub fn relevant_node_ids(&self, tree: &ConceptTree) -> BTreeSet<NodeId> {
        let mut relevant = BTreeSet::new();
        let Some(focused_id) = &self.focused else {
            return relevant;
        };
        let Some(focused) = tree.node(focused_id) else {
            return relevant;
        };

        relevant.insert(focused_id.clone());
        relevant.extend(focused.children_ids().iter().cloned());
        if let Some(parent) = tree.parent(focused_id) {
            relevant.insert(parent.node_id().clone());
            relevant.extend(parent.children_ids().iter().cloned());
        }
        relevant.extend(
            self.history
                .iter()
                .filter(|entry| tree.contains(entry))
                .cloned(),
        );
        relevant
    }

    /// Whether an edge joins two in-context nodes. Flagged edges are the ones
    /// a renderer highlights instead of dimming.
    pub fn edge_in_focus_path(
        &self,
        tree: &ConceptTree,
        source_id: &NodeId,
        target_id: &NodeId,
    ) -> bool {
        let relevant = self.relevant_node_ids(tree);
        relevant.contains(source_id) && relevant.contains(target_id)
    }
}
