// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Noema-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Noema and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use serde_json::json;

use super::tree::ConceptTree;

/// Three-level nested-form tree: Rust → Ownership/Concurrency/Tooling → leaves.
pub(crate) fn learning_tree() -> ConceptTree {
    let source = json!({
        "Rust": [
            {"Ownership": ["Borrowing", "Lifetimes"]},
            {"Concurrency": ["Threads", {"Async": "Futures and executors"}]},
            "Tooling"
        ]
    });
    ConceptTree::build_from_source(&source).expect("fixture tree")
}

/// Flat-form tree: root `R` with children `A`, `B`; `A` has `A1`, `A2`.
pub(crate) fn quadrant_tree() -> ConceptTree {
    let source = json!([
        {"id": "r", "label": "R"},
        {"id": "a", "label": "A", "parentId": "r"},
        {"id": "b", "label": "B", "parentId": "r"},
        {"id": "a1", "label": "A1", "parentId": "a"},
        {"id": "a2", "label": "A2", "parentId": "a"}
    ]);
    ConceptTree::build_from_source(&source).expect("fixture tree")
}

/// A single first-child chain `r → c1 → c2 → c3`, for descent tests.
pub(crate) fn chain_tree() -> ConceptTree {
    let source = json!([
        {"id": "r", "label": "Root"},
        {"id": "c1", "label": "One", "parentId": "r"},
        {"id": "c2", "label": "Two", "parentId": "c1"},
        {"id": "c3", "label": "Three", "parentId": "c2"}
    ]);
    ConceptTree::build_from_source(&source).expect("fixture tree")
}
