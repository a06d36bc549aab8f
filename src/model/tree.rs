// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Noema-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Noema and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use std::collections::{BTreeMap, BTreeSet, VecDeque};
use std::fmt;

use serde_json::Value;

use super::ids::{EdgeId, IdError, NodeId};
use super::node::{ConceptEdge, ConceptNode};

/// The authoritative concept graph: nodes plus parent/child adjacency.
///
/// Built once per generate request and replaced wholesale on regenerate.
/// Structure is immutable after construction; expansion and focus state live
/// outside the tree.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ConceptTree {
    nodes: BTreeMap<NodeId, ConceptNode>,
    edges: BTreeMap<EdgeId, ConceptEdge>,
    root_id: Option<NodeId>,
}

impl ConceptTree {
    /// Deterministically builds a tree from the content source's nested value.
    ///
    /// Two shapes are accepted:
    /// - nested: strings are leaves, records map a label to its children
    ///   (string value = description, list/record value = children),
    /// - flat: a list of records carrying `id`, `label`, optional
    ///   `description`, optional `parentId` (detected by an `id` field on the
    ///   first record).
    ///
    /// No source data (`null`, blank string, empty list/record) yields a valid
    /// empty tree. Malformed sources fail; the caller never sees a partial
    /// tree.
    pub fn build_from_source(source: &Value) -> Result<Self, TreeBuildError> {
        match source {
            Value::Null => Ok(Self::default()),
            Value::String(text) if text.trim().is_empty() => Ok(Self::default()),
            Value::Array(items) if items.is_empty() => Ok(Self::default()),
            Value::Object(entries) if entries.is_empty() => Ok(Self::default()),
            Value::Array(items) if is_flat_source(items) => build_flat(items),
            _ => build_nested(source),
        }
    }

    pub fn node(&self, node_id: &NodeId) -> Option<&ConceptNode> {
        self.nodes.get(node_id)
    }

    pub fn contains(&self, node_id: &NodeId) -> bool {
        self.nodes.contains_key(node_id)
    }

    /// The node's children in source order.
    pub fn children(&self, node_id: &NodeId) -> Vec<&ConceptNode> {
        let Some(node) = self.nodes.get(node_id) else {
            return Vec::new();
        };
        node.children_ids()
            .iter()
            .filter_map(|child_id| self.nodes.get(child_id))
            .collect()
    }

    pub fn parent(&self, node_id: &NodeId) -> Option<&ConceptNode> {
        let node = self.nodes.get(node_id)?;
        self.nodes.get(node.parent_id()?)
    }

    pub fn is_root(&self, node_id: &NodeId) -> bool {
        self.root_id.as_ref() == Some(node_id)
    }

    pub fn root(&self) -> Option<&ConceptNode> {
        self.nodes.get(self.root_id.as_ref()?)
    }

    pub fn root_id(&self) -> Option<&NodeId> {
        self.root_id.as_ref()
    }

    pub fn nodes(&self) -> &BTreeMap<NodeId, ConceptNode> {
        &self.nodes
    }

    pub fn edges(&self) -> &BTreeMap<EdgeId, ConceptEdge> {
        &self.edges
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// All node ids in depth-first source order (root first, children in
    /// insertion order). This is the canonical presentation order.
    pub fn depth_first_ids(&self) -> Vec<NodeId> {
        let mut out = Vec::with_capacity(self.nodes.len());
        let Some(root_id) = &self.root_id else {
            return out;
        };
        let mut stack = vec![root_id.clone()];
        while let Some(node_id) = stack.pop() {
            if let Some(node) = self.nodes.get(&node_id) {
                for child_id in node.children_ids().iter().rev() {
                    stack.push(child_id.clone());
                }
            }
            out.push(node_id);
        }
        out
    }

    /// Every id strictly below `node_id`, depth-first in source order.
    pub fn descendant_ids(&self, node_id: &NodeId) -> Vec<NodeId> {
        let mut out = Vec::new();
        let Some(node) = self.nodes.get(node_id) else {
            return out;
        };
        let mut stack: Vec<NodeId> = node.children_ids().iter().rev().cloned().collect();
        while let Some(child_id) = stack.pop() {
            if let Some(child) = self.nodes.get(&child_id) {
                for grandchild_id in child.children_ids().iter().rev() {
                    stack.push(grandchild_id.clone());
                }
            }
            out.push(child_id);
        }
        out
    }

    pub fn first_child(&self, node_id: &NodeId) -> Option<&NodeId> {
        self.nodes.get(node_id)?.children_ids().first()
    }

    /// The `index`-th child (0-based) in source order.
    pub fn nth_child(&self, node_id: &NodeId, index: usize) -> Option<&NodeId> {
        self.nodes.get(node_id)?.children_ids().get(index)
    }

    /// The node's sibling list (its parent's children, including itself).
    /// The root has no siblings.
    pub fn siblings(&self, node_id: &NodeId) -> &[NodeId] {
        match self.parent(node_id) {
            Some(parent) => parent.children_ids(),
            None => &[],
        }
    }

    /// Follows the first-child chain below `node_id` to its deepest
    /// descendant. A leaf maps to itself; unknown ids map to `None`.
    pub fn deepest_first_descendant(&self, node_id: &NodeId) -> Option<NodeId> {
        let mut current = self.nodes.get(node_id)?;
        while let Some(child_id) = current.children_ids().first() {
            current = self.nodes.get(child_id)?;
        }
        Some(current.node_id().clone())
    }
}

/// Rejection reasons for malformed sources. The tree is never silently
/// repaired; the first violation encountered is surfaced.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TreeBuildError {
    UnsupportedEntry { path: String, kind: &'static str },
    MissingField { index: usize, field: &'static str },
    InvalidId { value: String, reason: IdError },
    DuplicateId { node_id: NodeId },
    UnknownParent { node_id: NodeId, parent_id: String },
    SelfParent { node_id: NodeId },
    CycleDetected { node_ids: Vec<NodeId> },
    MissingRoot,
    MultipleRoots { entries: Vec<String> },
    EmptyLabel { node_id: NodeId },
}

impl fmt::Display for TreeBuildError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::UnsupportedEntry { path, kind } => {
                write!(f, "unsupported source entry at {path} ({kind})")
            }
            Self::MissingField { index, field } => {
                write!(f, "source record {index} is missing field '{field}'")
            }
            Self::InvalidId { value, reason } => {
                write!(f, "invalid node id '{value}': {reason}")
            }
            Self::DuplicateId { node_id } => {
                write!(f, "duplicate node id '{node_id}'")
            }
            Self::UnknownParent { node_id, parent_id } => {
                write!(f, "node '{node_id}' references unknown parent '{parent_id}'")
            }
            Self::SelfParent { node_id } => {
                write!(f, "node '{node_id}' references itself as parent")
            }
            Self::CycleDetected { node_ids } => {
                write!(f, "source contains a parent cycle involving nodes: ")?;
                for (idx, node_id) in node_ids.iter().enumerate() {
                    if idx > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{node_id}")?;
                }
                Ok(())
            }
            Self::MissingRoot => f.write_str("source has no root node (every record has a parent)"),
            Self::MultipleRoots { entries } => {
                write!(f, "source has multiple roots: ")?;
                for (idx, entry) in entries.iter().enumerate() {
                    if idx > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "'{entry}'")?;
                }
                Ok(())
            }
            Self::EmptyLabel { node_id } => {
                write!(f, "node '{node_id}' has an empty label")
            }
        }
    }
}

impl std::error::Error for TreeBuildError {}

fn is_flat_source(items: &[Value]) -> bool {
    matches!(items.first(), Some(Value::Object(entries)) if entries.contains_key("id"))
}

fn clean_text(text: &str) -> Option<String> {
    let trimmed = text.trim();
    (!trimmed.is_empty()).then(|| trimmed.to_owned())
}

/// One labeled entry of the nested form, before it becomes a node.
struct NestedEntry<'a> {
    label: String,
    value: &'a Value,
}

/// Expands one nested-form value into labeled entries. A record contributes
/// one entry per key; scalars contribute a single leaf entry.
fn nested_entries<'a>(value: &'a Value, path: &str) -> Result<Vec<NestedEntry<'a>>, TreeBuildError> {
    static NULL: Value = Value::Null;

    match value {
        Value::String(text) => Ok(vec![NestedEntry { label: text.clone(), value: &NULL }]),
        Value::Number(number) => Ok(vec![NestedEntry { label: number.to_string(), value: &NULL }]),
        Value::Bool(flag) => Ok(vec![NestedEntry { label: flag.to_string(), value: &NULL }]),
        Value::Object(entries) => Ok(entries
            .iter()
            .map(|(label, child_value)| NestedEntry { label: label.clone(), value: child_value })
            .collect()),
        Value::Array(items) => {
            let mut out = Vec::new();
            for (index, item) in items.iter().enumerate() {
                let item_path = format!("{path}[{index}]");
                match item {
                    Value::Array(_) => {
                        return Err(TreeBuildError::UnsupportedEntry {
                            path: item_path,
                            kind: "unlabeled list",
                        });
                    }
                    Value::Null => {
                        return Err(TreeBuildError::UnsupportedEntry {
                            path: item_path,
                            kind: "null entry",
                        });
                    }
                    _ => out.extend(nested_entries(item, &item_path)?),
                }
            }
            Ok(out)
        }
        Value::Null => Ok(Vec::new()),
    }
}

fn build_nested(source: &Value) -> Result<ConceptTree, TreeBuildError> {
    let entries = nested_entries(source, "$")?;
    if entries.is_empty() {
        return Ok(ConceptTree::default());
    }
    if entries.len() > 1 {
        return Err(TreeBuildError::MultipleRoots {
            entries: entries.into_iter().map(|entry| entry.label).collect(),
        });
    }

    let mut tree = ConceptTree::default();
    let entry = entries.into_iter().next().expect("one entry (checked)");
    let root_id = insert_nested(&mut tree, entry, None, &mut vec![0])?;
    tree.root_id = Some(root_id);
    Ok(tree)
}

/// Inserts one nested entry and recurses into its children. `path` holds the
/// sibling-index trail used to mint the node id.
fn insert_nested(
    tree: &mut ConceptTree,
    entry: NestedEntry<'_>,
    parent: Option<(NodeId, u32)>,
    path: &mut Vec<usize>,
) -> Result<NodeId, TreeBuildError> {
    let node_id = NodeId::from_path(path);
    let Some(label) = clean_text(&entry.label) else {
        return Err(TreeBuildError::EmptyLabel { node_id });
    };

    let level = parent.as_ref().map(|(_, parent_level)| parent_level + 1).unwrap_or(0);
    let parent_id = parent.as_ref().map(|(parent_id, _)| parent_id.clone());

    let description = match entry.value {
        Value::String(text) => clean_text(text),
        Value::Number(number) => Some(number.to_string()),
        Value::Bool(flag) => Some(flag.to_string()),
        _ => None,
    };

    tree.nodes.insert(
        node_id.clone(),
        ConceptNode::new(node_id.clone(), label, description, level, parent_id.clone()),
    );
    if let Some(parent_id) = &parent_id {
        let edge = ConceptEdge::new(parent_id.clone(), node_id.clone());
        tree.edges.insert(edge.edge_id().clone(), edge);
    }

    let children = match entry.value {
        Value::Array(_) | Value::Object(_) => nested_entries(entry.value, node_id.as_str())?,
        _ => Vec::new(),
    };
    for (index, child) in children.into_iter().enumerate() {
        path.push(index);
        let child_id = insert_nested(tree, child, Some((node_id.clone(), level)), path)?;
        path.pop();
        if let Some(node) = tree.nodes.get_mut(&node_id) {
            node.push_child(child_id);
        }
    }

    Ok(node_id)
}

struct FlatRecord {
    node_id: NodeId,
    label: String,
    description: Option<String>,
    parent_raw: Option<String>,
}

fn build_flat(items: &[Value]) -> Result<ConceptTree, TreeBuildError> {
    let mut records = Vec::with_capacity(items.len());
    let mut seen = BTreeSet::new();

    for (index, item) in items.iter().enumerate() {
        let Value::Object(entries) = item else {
            return Err(TreeBuildError::UnsupportedEntry {
                path: format!("$[{index}]"),
                kind: "non-record entry in flat source",
            });
        };
        let Some(id_raw) = entries.get("id").and_then(Value::as_str) else {
            return Err(TreeBuildError::MissingField { index, field: "id" });
        };
        let node_id = NodeId::new(id_raw).map_err(|reason| TreeBuildError::InvalidId {
            value: id_raw.to_owned(),
            reason,
        })?;
        if !seen.insert(node_id.clone()) {
            return Err(TreeBuildError::DuplicateId { node_id });
        }
        let Some(label_raw) = entries.get("label").and_then(Value::as_str) else {
            return Err(TreeBuildError::MissingField { index, field: "label" });
        };
        let Some(label) = clean_text(label_raw) else {
            return Err(TreeBuildError::EmptyLabel { node_id });
        };
        let description = entries.get("description").and_then(Value::as_str).and_then(clean_text);
        let parent_raw = entries
            .get("parentId")
            .and_then(Value::as_str)
            .map(str::to_owned);

        records.push(FlatRecord { node_id, label, description, parent_raw });
    }

    // Resolve parents before building: self-references and dangling ids fail
    // without a partially built tree.
    let mut parents = BTreeMap::<NodeId, NodeId>::new();
    let mut child_lists = BTreeMap::<NodeId, Vec<NodeId>>::new();
    let mut roots = Vec::new();

    for record in &records {
        match &record.parent_raw {
            None => roots.push(record.node_id.clone()),
            Some(parent_raw) => {
                let parent_id = NodeId::new(parent_raw.as_str()).ok().filter(|id| seen.contains(id));
                let Some(parent_id) = parent_id else {
                    return Err(TreeBuildError::UnknownParent {
                        node_id: record.node_id.clone(),
                        parent_id: parent_raw.clone(),
                    });
                };
                if parent_id == record.node_id {
                    return Err(TreeBuildError::SelfParent { node_id: record.node_id.clone() });
                }
                parents.insert(record.node_id.clone(), parent_id.clone());
                child_lists.entry(parent_id).or_default().push(record.node_id.clone());
            }
        }
    }

    if roots.is_empty() {
        return Err(TreeBuildError::MissingRoot);
    }
    if roots.len() > 1 {
        return Err(TreeBuildError::MultipleRoots {
            entries: roots.into_iter().map(NodeId::into_string).collect(),
        });
    }
    let root_id = roots.into_iter().next().expect("one root (checked)");

    // Levels come from a breadth-first walk; anything the walk cannot reach
    // sits on a parent cycle detached from the root.
    let mut levels = BTreeMap::<NodeId, u32>::new();
    let mut queue = VecDeque::from([(root_id.clone(), 0u32)]);
    while let Some((node_id, level)) = queue.pop_front() {
        levels.insert(node_id.clone(), level);
        if let Some(children) = child_lists.get(&node_id) {
            for child_id in children {
                queue.push_back((child_id.clone(), level + 1));
            }
        }
    }

    if levels.len() != records.len() {
        let node_ids = records
            .iter()
            .map(|record| record.node_id.clone())
            .filter(|node_id| !levels.contains_key(node_id))
            .collect();
        return Err(TreeBuildError::CycleDetected { node_ids });
    }

    let mut tree = ConceptTree::default();
    for record in records {
        let level = *levels.get(&record.node_id).expect("level assigned (checked)");
        let parent_id = parents.get(&record.node_id).cloned();
        tree.nodes.insert(
            record.node_id.clone(),
            ConceptNode::new(
                record.node_id.clone(),
                record.label,
                record.description,
                level,
                parent_id.clone(),
            ),
        );
        if let Some(parent_id) = parent_id {
            let edge = ConceptEdge::new(parent_id, record.node_id);
            tree.edges.insert(edge.edge_id().clone(), edge);
        }
    }
    for (parent_id, children) in child_lists {
        if let Some(parent) = tree.nodes.get_mut(&parent_id) {
            for child_id in children {
                parent.push_child(child_id);
            }
        }
    }
    tree.root_id = Some(root_id);

    Ok(tree)
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::{ConceptTree, TreeBuildError};
    use crate::model::fixtures;
    use crate::model::NodeId;

    fn nid(value: &str) -> NodeId {
        NodeId::new(value).expect("node id")
    }

    #[test]
    fn empty_sources_build_empty_trees() {
        for source in [json!(null), json!(""), json!("   "), json!([]), json!({})] {
            let tree = ConceptTree::build_from_source(&source).expect("build");
            assert!(tree.is_empty());
            assert!(tree.root().is_none());
            assert!(tree.edges().is_empty());
        }
    }

    #[test]
    fn bare_string_builds_single_root() {
        let tree = ConceptTree::build_from_source(&json!("Rust")).expect("build");
        assert_eq!(tree.len(), 1);
        let root = tree.root().expect("root");
        assert_eq!(root.label(), "Rust");
        assert_eq!(root.level(), 0);
        assert!(root.parent_id().is_none());
        assert!(root.is_leaf());
    }

    #[test]
    fn nested_build_assigns_levels_and_edges() {
        let tree = fixtures::learning_tree();
        assert_eq!(tree.len(), 9);

        let root = tree.root().expect("root");
        assert_eq!(root.label(), "Rust");
        assert_eq!(root.level(), 0);
        assert!(root.parent_id().is_none());

        for node in tree.nodes().values() {
            match tree.parent(node.node_id()) {
                Some(parent) => assert_eq!(node.level(), parent.level() + 1),
                None => assert_eq!(node.level(), 0),
            }
        }

        // Every edge connects a node to one of its direct children.
        assert_eq!(tree.edges().len(), tree.len() - 1);
        for edge in tree.edges().values() {
            let source = tree.node(edge.source_id()).expect("source node");
            assert!(source.children_ids().contains(edge.target_id()));
            let target = tree.node(edge.target_id()).expect("target node");
            assert_eq!(target.parent_id(), Some(edge.source_id()));
        }
    }

    #[test]
    fn nested_children_keep_source_order() {
        let tree = fixtures::learning_tree();
        let root = tree.root().expect("root");
        let labels: Vec<&str> = tree
            .children(root.node_id())
            .iter()
            .map(|child| child.label())
            .collect();
        assert_eq!(labels, ["Ownership", "Concurrency", "Tooling"]);
    }

    #[test]
    fn nested_string_value_becomes_description() {
        let tree = ConceptTree::build_from_source(&json!({"Async": "Futures and executors"}))
            .expect("build");
        let root = tree.root().expect("root");
        assert_eq!(root.label(), "Async");
        assert_eq!(root.description(), Some("Futures and executors"));
        assert!(root.is_leaf());
    }

    #[test]
    fn build_is_deterministic() {
        let source = json!({"Rust": ["Ownership", {"Concurrency": ["Threads"]}]});
        let first = ConceptTree::build_from_source(&source).expect("build");
        let second = ConceptTree::build_from_source(&source).expect("build");
        assert_eq!(first, second);
    }

    #[test]
    fn nested_multiple_top_level_entries_are_rejected() {
        let result = ConceptTree::build_from_source(&json!({"A": [], "B": []}));
        assert_eq!(
            result,
            Err(TreeBuildError::MultipleRoots { entries: vec!["A".to_owned(), "B".to_owned()] })
        );
    }

    #[test]
    fn nested_empty_label_is_rejected() {
        let result = ConceptTree::build_from_source(&json!({"  ": ["child"]}));
        assert!(matches!(result, Err(TreeBuildError::EmptyLabel { .. })));
    }

    #[test]
    fn flat_build_preserves_child_order() {
        let tree = fixtures::quadrant_tree();
        assert_eq!(tree.len(), 5);

        let root = tree.root().expect("root");
        assert_eq!(root.label(), "R");
        let children: Vec<&str> = tree
            .children(root.node_id())
            .iter()
            .map(|child| child.label())
            .collect();
        assert_eq!(children, ["A", "B"]);

        let a = nid("a");
        let grandchildren: Vec<&str> =
            tree.children(&a).iter().map(|child| child.label()).collect();
        assert_eq!(grandchildren, ["A1", "A2"]);
        assert_eq!(tree.node(&nid("a1")).expect("a1").level(), 2);
    }

    #[test]
    fn flat_self_parent_is_rejected() {
        let source = json!([{"id": "r", "label": "R", "parentId": "r"}]);
        assert_eq!(
            ConceptTree::build_from_source(&source),
            Err(TreeBuildError::SelfParent { node_id: nid("r") })
        );
    }

    #[test]
    fn flat_unknown_parent_is_rejected() {
        let source = json!([
            {"id": "r", "label": "R"},
            {"id": "a", "label": "A", "parentId": "ghost"}
        ]);
        assert_eq!(
            ConceptTree::build_from_source(&source),
            Err(TreeBuildError::UnknownParent {
                node_id: nid("a"),
                parent_id: "ghost".to_owned()
            })
        );
    }

    #[test]
    fn flat_duplicate_id_is_rejected() {
        let source = json!([
            {"id": "r", "label": "R"},
            {"id": "r", "label": "Again"}
        ]);
        assert_eq!(
            ConceptTree::build_from_source(&source),
            Err(TreeBuildError::DuplicateId { node_id: nid("r") })
        );
    }

    #[test]
    fn flat_detached_cycle_is_rejected() {
        let source = json!([
            {"id": "r", "label": "R"},
            {"id": "a", "label": "A", "parentId": "b"},
            {"id": "b", "label": "B", "parentId": "a"}
        ]);
        assert_eq!(
            ConceptTree::build_from_source(&source),
            Err(TreeBuildError::CycleDetected { node_ids: vec![nid("a"), nid("b")] })
        );
    }

    #[test]
    fn flat_without_root_is_rejected() {
        let source = json!([
            {"id": "a", "label": "A", "parentId": "b"},
            {"id": "b", "label": "B", "parentId": "a"}
        ]);
        assert_eq!(ConceptTree::build_from_source(&source), Err(TreeBuildError::MissingRoot));
    }

    #[test]
    fn traversal_helpers_follow_source_order() {
        let tree = fixtures::quadrant_tree();
        let root_id = tree.root_id().expect("root id").clone();

        assert_eq!(tree.first_child(&root_id), Some(&nid("a")));
        assert_eq!(tree.nth_child(&root_id, 1), Some(&nid("b")));
        assert_eq!(tree.nth_child(&root_id, 2), None);
        assert_eq!(tree.siblings(&nid("a")), &[nid("a"), nid("b")][..]);
        assert!(tree.siblings(&root_id).is_empty());
        assert_eq!(tree.deepest_first_descendant(&root_id), Some(nid("a1")));

        let dfs_ids = tree.depth_first_ids();
        let dfs: Vec<&str> = dfs_ids.iter().map(|id| id.as_str()).collect();
        assert_eq!(dfs, ["r", "a", "a1", "a2", "b"]);

        let below_a_ids = tree.descendant_ids(&nid("a"));
        let below_a: Vec<&str> = below_a_ids.iter().map(|id| id.as_str()).collect();
        assert_eq!(below_a, ["a1", "a2"]);
    }
}
