// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Noema-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Noema and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use crate::model::{ConceptNode, NodeTier};

use super::Size;

/// Per-tier box metrics. Shallower tiers get larger, bolder boxes.
#[derive(Debug, Clone, Copy, PartialEq)]
struct TierMetrics {
    min_width: f32,
    max_width: f32,
    base_height: f32,
    char_width: f32,
    line_height: f32,
}

fn metrics_for(tier: NodeTier) -> TierMetrics {
    match tier {
        NodeTier::Root => TierMetrics {
            min_width: 160.0,
            max_width: 420.0,
            base_height: 64.0,
            char_width: 10.0,
            line_height: 18.0,
        },
        NodeTier::Theme => TierMetrics {
            min_width: 140.0,
            max_width: 360.0,
            base_height: 52.0,
            char_width: 8.5,
            line_height: 16.0,
        },
        NodeTier::Concept => TierMetrics {
            min_width: 120.0,
            max_width: 320.0,
            base_height: 44.0,
            char_width: 7.5,
            line_height: 15.0,
        },
        NodeTier::Detail => TierMetrics {
            min_width: 100.0,
            max_width: 280.0,
            base_height: 36.0,
            char_width: 7.0,
            line_height: 14.0,
        },
    }
}

/// Up to this many description lines contribute to the box height; longer
/// descriptions are elided by the renderer.
const MAX_DESCRIPTION_LINES: usize = 3;
const DESCRIPTION_WRAP_COLUMNS: usize = 36;

/// Derives a node's size hint from its label/description length and level
/// tier. Deterministic; this is the minimum-size constraint handed to the
/// layout backend.
pub fn node_size(node: &ConceptNode) -> Size {
    let metrics = metrics_for(node.tier());

    let label_width = node.label().chars().count() as f32 * metrics.char_width;
    let width = (label_width + 2.0 * metrics.char_width)
        .clamp(metrics.min_width, metrics.max_width);

    let description_lines = node
        .description()
        .map(|description| {
            let columns = description.chars().count();
            ((columns + DESCRIPTION_WRAP_COLUMNS - 1) / DESCRIPTION_WRAP_COLUMNS)
                .min(MAX_DESCRIPTION_LINES)
        })
        .unwrap_or(0);
    let height = metrics.base_height + description_lines as f32 * metrics.line_height;

    Size::new(width, height)
}
