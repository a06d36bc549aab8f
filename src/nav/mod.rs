// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Noema-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Noema and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Pointer and keyboard navigation over the mind-map state.

pub mod controller;
pub mod keys;

pub use controller::{handle_key, handle_pointer, FitTarget, LayoutTrigger, NavEffects, PointerTarget};
pub use keys::NavKey;
