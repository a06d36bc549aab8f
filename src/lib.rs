// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Noema-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Noema and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Noema — concept mind-map engine (tree model + focus navigation + layered layout).
//!
//! The engine is a pure state machine: an external content source feeds
//! [`model::ConceptTree::build_from_source`], pointer/keyboard input drives
//! [`engine::MindMapEngine`], and an external renderer consumes [`scene::Scene`].
//! Layout is computed asynchronously behind the [`layout::LayoutBackend`] port.

pub mod engine;
pub mod format;
pub mod layout;
pub mod map;
pub mod model;
pub mod nav;
pub mod query;
pub mod scene;
pub mod state;
pub mod theme;

#[cfg(test)]
mod tests {
    #[test]
    fn sanity() {
        assert_eq!(2 + 2, 4);
    }
}
