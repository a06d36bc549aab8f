// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Noema-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Noema and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use crate::layout::LayoutMode;
use crate::map::MindMap;
use crate::model::NodeId;

use super::keys::NavKey;

/// What a pointer event landed on, as reported by the rendering adapter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PointerTarget {
    /// The node's body (not its expand affordance).
    NodeBody(NodeId),
    /// The node's expand affordance.
    ExpandToggle(NodeId),
    /// Empty canvas.
    Canvas,
}

/// Which subset the viewport should be fit to after a change.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FitTarget {
    /// The expand/collapse-driven visible subgraph.
    Visible,
    /// The focus context subgraph.
    Relevant,
}

/// A layout pass the host should request from the layout engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LayoutTrigger {
    pub mode: LayoutMode,
    pub force: bool,
}

/// The outcome of one input event. Unmet preconditions yield the inert value
/// (`state_changed == false`), never an error.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NavEffects {
    pub state_changed: bool,
    pub layout: Option<LayoutTrigger>,
    pub fit: Option<FitTarget>,
}

impl NavEffects {
    pub fn none() -> Self {
        Self { state_changed: false, layout: None, fit: None }
    }

    /// Effects after a focus or expansion change: re-layout the current mode
    /// and fit the viewport to the subset that mode displays.
    fn after_change(map: &MindMap) -> Self {
        let mode = map.layout_mode();
        let fit = match mode {
            LayoutMode::Focused => FitTarget::Relevant,
            LayoutMode::Overview => FitTarget::Visible,
        };
        Self {
            state_changed: true,
            layout: Some(LayoutTrigger { mode, force: false }),
            fit: Some(fit),
        }
    }

    /// Presentation-only change: nothing to lay out or fit.
    fn presentation_only() -> Self {
        Self { state_changed: true, layout: None, fit: None }
    }
}

/// Applies one protocol key to the map. Active only while the diagram has
/// input focus; routing (text inputs, overlays) is the host's concern.
pub fn handle_key(map: &mut MindMap, key: NavKey) -> NavEffects {
    match key {
        NavKey::Descend => {
            let target = focused_then(map, |map, focused| {
                map.tree().first_child(focused).cloned()
            });
            focus_target(map, target)
        }
        NavKey::Ascend => {
            let target = focused_then(map, |map, focused| {
                map.tree().parent(focused).map(|parent| parent.node_id().clone())
            });
            focus_target(map, target)
        }
        NavKey::PrevSibling => {
            let target = sibling_step(map, -1);
            focus_target(map, target)
        }
        NavKey::NextSibling => {
            let target = sibling_step(map, 1);
            focus_target(map, target)
        }
        NavKey::FirstSibling => {
            let target = focused_then(map, |map, focused| {
                map.tree().siblings(focused).first().cloned()
            });
            focus_target(map, target)
        }
        NavKey::LastSibling => {
            let target = focused_then(map, |map, focused| {
                map.tree().siblings(focused).last().cloned()
            });
            focus_target(map, target)
        }
        NavKey::Child(n) => {
            let target = focused_then(map, |map, focused| {
                let index = usize::from(n).checked_sub(1)?;
                map.tree().nth_child(focused, index).cloned()
            });
            focus_target(map, target)
        }
        NavKey::FocusRoot => {
            let target = map.tree().root_id().cloned();
            focus_target(map, target)
        }
        NavKey::FocusRootIfUnfocused => {
            if map.focus().focused().is_some() {
                return NavEffects::none();
            }
            let target = map.tree().root_id().cloned();
            focus_target(map, target)
        }
        NavKey::FocusDeepest => {
            let start = map
                .focus()
                .focused()
                .cloned()
                .or_else(|| map.tree().root_id().cloned());
            let target = start.and_then(|start| map.tree().deepest_first_descendant(&start));
            focus_target(map, target)
        }
        NavKey::HistoryBack => {
            if map.pop_focus_history().is_some() {
                NavEffects::after_change(map)
            } else {
                NavEffects::none()
            }
        }
        NavKey::ClearFocus => {
            if map.clear_focus() {
                NavEffects::after_change(map)
            } else {
                NavEffects::none()
            }
        }
        NavKey::ToggleExpand => expansion_op(map, MindMap::toggle_expansion),
        NavKey::Expand => expansion_op(map, MindMap::expand),
        NavKey::Collapse => expansion_op(map, MindMap::collapse),
        NavKey::ExpandSubtree => expansion_op(map, MindMap::expand_subtree),
        NavKey::ToggleHelp => {
            map.toggle_help();
            NavEffects::presentation_only()
        }
    }
}

/// Applies one pointer event to the map.
pub fn handle_pointer(map: &mut MindMap, target: PointerTarget) -> NavEffects {
    match target {
        PointerTarget::NodeBody(node_id) => focus_target(map, Some(node_id)),
        PointerTarget::ExpandToggle(node_id) => {
            if map.toggle_expansion(&node_id) {
                NavEffects::after_change(map)
            } else {
                NavEffects::none()
            }
        }
        PointerTarget::Canvas => {
            if map.clear_focus() {
                NavEffects::after_change(map)
            } else {
                NavEffects::none()
            }
        }
    }
}

fn focused_then<F>(map: &MindMap, resolve: F) -> Option<NodeId>
where
    F: FnOnce(&MindMap, &NodeId) -> Option<NodeId>,
{
    let focused = map.focus().focused()?.clone();
    resolve(map, &focused)
}

fn focus_target(map: &mut MindMap, target: Option<NodeId>) -> NavEffects {
    match target {
        Some(node_id) if map.set_focus(&node_id) => NavEffects::after_change(map),
        _ => NavEffects::none(),
    }
}

/// Resolves the cyclic sibling neighbor of the focused node.
fn sibling_step(map: &MindMap, step: isize) -> Option<NodeId> {
    let focused = map.focus().focused()?;
    let siblings = map.tree().siblings(focused);
    if siblings.is_empty() {
        return None;
    }
    let index = siblings.iter().position(|id| id == focused)?;
    let len = siblings.len() as isize;
    let next = (index as isize + step).rem_euclid(len) as usize;
    Some(siblings[next].clone())
}

fn expansion_op<F>(map: &mut MindMap, op: F) -> NavEffects
where
    F: FnOnce(&mut MindMap, &NodeId) -> bool,
{
    let Some(focused) = map.focus().focused().cloned() else {
        return NavEffects::none();
    };
    if op(map, &focused) {
        NavEffects::after_change(map)
    } else {
        NavEffects::none()
    }
}
