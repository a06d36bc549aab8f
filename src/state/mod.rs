// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Noema-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Noema and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Derived interaction state: expand/collapse visibility and focus context.

pub mod expansion;
pub mod focus;

pub use expansion::{ExpansionState, VisibleGraph};
pub use focus::FocusState;
