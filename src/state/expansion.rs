// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Noema-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Noema and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use std::collections::BTreeSet;

use crate::model::{ConceptTree, EdgeId, NodeId};

/// Expand/collapse state and the visible-subgraph resolver.
///
/// Collapse is cascading and forgetful: collapsing a node also drops every
/// expanded descendant from the set, so a hidden subtree never silently keeps
/// expansion state. Re-expanding restores only the node's own expansion.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ExpansionState {
    expanded: BTreeSet<NodeId>,
}

impl ExpansionState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Resets to the default state for a freshly built tree: only the root is
    /// expanded.
    pub fn reset(&mut self, tree: &ConceptTree) {
        self.expanded.clear();
        if let Some(root_id) = tree.root_id() {
            self.expanded.insert(root_id.clone());
        }
    }

    pub fn is_expanded(&self, node_id: &NodeId) -> bool {
        self.expanded.contains(node_id)
    }

    pub fn expanded_ids(&self) -> &BTreeSet<NodeId> {
        &self.expanded
    }

    /// Flips the node's expansion. Unknown ids are logged and ignored.
    /// Returns whether the set changed.
    pub fn toggle(&mut self, tree: &ConceptTree, node_id: &NodeId) -> bool {
        if !tree.contains(node_id) {
            tracing::warn!(node_id = %node_id, "toggle ignored: unknown node");
            return false;
        }
        if self.expanded.contains(node_id) {
            self.collapse(tree, node_id)
        } else {
            self.expanded.insert(node_id.clone());
            true
        }
    }

    pub fn expand(&mut self, tree: &ConceptTree, node_id: &NodeId) -> bool {
        if !tree.contains(node_id) {
            tracing::warn!(node_id = %node_id, "expand ignored: unknown node");
            return false;
        }
        self.expanded.insert(node_id.clone())
    }

    /// Collapses the node and forgets every expanded descendant.
    pub fn collapse(&mut self, tree: &ConceptTree, node_id: &NodeId) -> bool {
        if !tree.contains(node_id) {
            tracing::warn!(node_id = %node_id, "collapse ignored: unknown node");
            return false;
        }
        if !self.expanded.remove(node_id) {
            return false;
        }
        for descendant_id in tree.descendant_ids(node_id) {
            self.expanded.remove(&descendant_id);
        }
        true
    }

    /// Expands the node and its entire subtree.
    pub fn expand_subtree(&mut self, tree: &ConceptTree, node_id: &NodeId) -> bool {
        if !tree.contains(node_id) {
            tracing::warn!(node_id = %node_id, "expand subtree ignored: unknown node");
            return false;
        }
        let mut changed = self.expanded.insert(node_id.clone());
        for descendant_id in tree.descendant_ids(node_id) {
            changed |= self.expanded.insert(descendant_id);
        }
        changed
    }

    /// Resolves the visible subgraph: the root is always visible, and a
    /// deeper node is visible iff every ancestor strictly between the root
    /// and the node is expanded. Pure function of `(tree, expanded)`.
    pub fn compute_visible(&self, tree: &ConceptTree) -> VisibleGraph {
        let mut graph = VisibleGraph::default();
        let Some(root) = tree.root() else {
            return graph;
        };

        let mut stack = vec![root.node_id().clone()];
        while let Some(node_id) = stack.pop() {
            let Some(node) = tree.node(&node_id) else {
                continue;
            };
            let descend = tree.is_root(&node_id) || self.expanded.contains(&node_id);
            if descend {
                for child_id in node.children_ids().iter().rev() {
                    stack.push(child_id.clone());
                }
            }
            if node.parent_id().is_some() {
                graph.edges.push(EdgeId::for_child(&node_id));
            }
            graph.nodes.push(node_id);
        }
        graph
    }
}

/// The resolver output: nodes in depth-first source order plus the induced
/// edges (both endpoints visible).
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct VisibleGraph {
    nodes: Vec<NodeId>,
    edges: Vec<EdgeId>,
}

impl VisibleGraph {
    pub fn nodes(&self) -> &[NodeId] {
        &self.nodes
    }

    pub fn edges(&self) -> &[EdgeId] {
        &self.edges
    }

    pub fn contains(&self, node_id: &NodeId) -> bool {
        self.nodes.iter().any(|id| id == node_id)
    }
}

#[cfg(test)]
mod tests {
    use crate::model::{fixtures, NodeId};

    use super::ExpansionState;

    fn nid(value: &str) -> NodeId {
        NodeId::new(value).expect("node id")
    }

    fn visible_ids(state: &ExpansionState, tree: &crate::model::ConceptTree) -> Vec<String> {
        state
            .compute_visible(tree)
            .nodes()
            .iter()
            .map(|id| id.as_str().to_owned())
            .collect()
    }

    #[test]
    fn default_expansion_shows_root_and_its_children() {
        let tree = fixtures::quadrant_tree();
        let mut state = ExpansionState::new();
        state.reset(&tree);

        assert_eq!(visible_ids(&state, &tree), ["r", "a", "b"]);
    }

    #[test]
    fn expanding_a_child_reveals_its_subtree() {
        let tree = fixtures::quadrant_tree();
        let mut state = ExpansionState::new();
        state.reset(&tree);

        assert!(state.toggle(&tree, &nid("a")));
        assert_eq!(visible_ids(&state, &tree), ["r", "a", "a1", "a2", "b"]);

        let visible = state.compute_visible(&tree);
        let edge_ids: Vec<&str> = visible.edges().iter().map(|id| id.as_str()).collect();
        assert_eq!(edge_ids, ["e-a", "e-a1", "e-a2", "e-b"]);
    }

    #[test]
    fn compute_visible_is_pure() {
        let tree = fixtures::quadrant_tree();
        let mut state = ExpansionState::new();
        state.reset(&tree);
        state.toggle(&tree, &nid("a"));

        assert_eq!(state.compute_visible(&tree), state.compute_visible(&tree));
    }

    #[test]
    fn collapse_cascades_and_forgets_descendants() {
        let tree = fixtures::chain_tree();
        let mut state = ExpansionState::new();
        state.reset(&tree);

        state.expand(&tree, &nid("c1"));
        state.expand(&tree, &nid("c2"));
        assert_eq!(visible_ids(&state, &tree), ["r", "c1", "c2", "c3"]);

        // Collapsing c1 forgets c2's expansion, not just hides it.
        assert!(state.collapse(&tree, &nid("c1")));
        assert_eq!(visible_ids(&state, &tree), ["r", "c1"]);

        state.expand(&tree, &nid("c1"));
        assert!(!state.is_expanded(&nid("c2")));
        assert_eq!(visible_ids(&state, &tree), ["r", "c1", "c2"]);
    }

    #[test]
    fn toggle_unknown_node_is_a_noop() {
        let tree = fixtures::quadrant_tree();
        let mut state = ExpansionState::new();
        state.reset(&tree);

        let before = state.clone();
        assert!(!state.toggle(&tree, &nid("ghost")));
        assert_eq!(state, before);
    }

    #[test]
    fn collapse_of_unexpanded_node_changes_nothing() {
        let tree = fixtures::quadrant_tree();
        let mut state = ExpansionState::new();
        state.reset(&tree);

        assert!(!state.collapse(&tree, &nid("a")));
        assert_eq!(visible_ids(&state, &tree), ["r", "a", "b"]);
    }

    #[test]
    fn expand_subtree_expands_every_descendant() {
        let tree = fixtures::quadrant_tree();
        let mut state = ExpansionState::new();
        state.reset(&tree);

        assert!(state.expand_subtree(&tree, &nid("r")));
        assert_eq!(visible_ids(&state, &tree), ["r", "a", "a1", "a2", "b"]);
        assert!(state.is_expanded(&nid("a1")));
    }

    #[test]
    fn empty_tree_resolves_to_empty_graph() {
        let tree = crate::model::ConceptTree::default();
        let mut state = ExpansionState::new();
        state.reset(&tree);

        let visible = state.compute_visible(&tree);
        assert!(visible.nodes().is_empty());
        assert!(visible.edges().is_empty());
    }
}
