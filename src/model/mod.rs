// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Noema-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Noema and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Core data model: typed ids, concept nodes/edges, and the concept tree.

#[cfg(test)]
pub(crate) mod fixtures;
pub mod ids;
pub mod node;
pub mod tree;

pub use ids::{EdgeId, Id, IdError, NodeId};
pub use node::{ChildIds, ConceptEdge, ConceptNode, NodeTier};
pub use tree::{ConceptTree, TreeBuildError};
