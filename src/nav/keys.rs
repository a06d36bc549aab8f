// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Noema-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Noema and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

/// The keyboard protocol, expressed as intents so the engine stays
/// independent of the input source. Hosts either construct these directly or
/// map terminal key events through [`NavKey::from_key_event`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NavKey {
    /// Focus the first child (`→`).
    Descend,
    /// Focus the parent (`←`).
    Ascend,
    /// Focus the previous sibling, cyclic (`↑`).
    PrevSibling,
    /// Focus the next sibling, cyclic (`↓`).
    NextSibling,
    /// Toggle expansion of the focused node (`Enter` / `Space`).
    ToggleExpand,
    /// Clear focus (`Esc`).
    ClearFocus,
    /// Focus the root (`Home`).
    FocusRoot,
    /// Focus the deepest first-child descendant (`End`).
    FocusDeepest,
    /// Focus the first sibling (`PageUp`).
    FirstSibling,
    /// Focus the last sibling (`PageDown`).
    LastSibling,
    /// Return to the previous focus-history entry (`Backspace`).
    HistoryBack,
    /// Focus the nth child, 1-indexed (`1`..`9`).
    Child(u8),
    /// Expand the focused node (`+` / `=`).
    Expand,
    /// Collapse the focused node (`-`).
    Collapse,
    /// Expand the focused node's whole subtree (`*`).
    ExpandSubtree,
    /// Focus the root, only when nothing is focused (`/` / `f`).
    FocusRootIfUnfocused,
    /// Toggle the help overlay flag (`?` / `h`).
    ToggleHelp,
}

impl NavKey {
    /// Maps a terminal key event onto the protocol. Only plain presses count;
    /// control/alt chords and release/repeat events belong to the host.
    pub fn from_key_event(event: &KeyEvent) -> Option<Self> {
        if event.kind != KeyEventKind::Press {
            return None;
        }
        if event
            .modifiers
            .intersects(KeyModifiers::CONTROL | KeyModifiers::ALT)
        {
            return None;
        }
        match event.code {
            KeyCode::Right => Some(Self::Descend),
            KeyCode::Left => Some(Self::Ascend),
            KeyCode::Up => Some(Self::PrevSibling),
            KeyCode::Down => Some(Self::NextSibling),
            KeyCode::Enter => Some(Self::ToggleExpand),
            KeyCode::Esc => Some(Self::ClearFocus),
            KeyCode::Home => Some(Self::FocusRoot),
            KeyCode::End => Some(Self::FocusDeepest),
            KeyCode::PageUp => Some(Self::FirstSibling),
            KeyCode::PageDown => Some(Self::LastSibling),
            KeyCode::Backspace => Some(Self::HistoryBack),
            KeyCode::Char(ch) => Self::from_char(ch),
            _ => None,
        }
    }

    pub fn from_char(ch: char) -> Option<Self> {
        match ch {
            ' ' => Some(Self::ToggleExpand),
            '+' | '=' => Some(Self::Expand),
            '-' => Some(Self::Collapse),
            '*' => Some(Self::ExpandSubtree),
            '/' | 'f' => Some(Self::FocusRootIfUnfocused),
            '?' | 'h' => Some(Self::ToggleHelp),
            '1'..='9' => Some(Self::Child(ch as u8 - b'0')),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
    use rstest::rstest;

    use super::NavKey;

    #[rstest]
    #[case(KeyCode::Right, NavKey::Descend)]
    #[case(KeyCode::Left, NavKey::Ascend)]
    #[case(KeyCode::Up, NavKey::PrevSibling)]
    #[case(KeyCode::Down, NavKey::NextSibling)]
    #[case(KeyCode::Enter, NavKey::ToggleExpand)]
    #[case(KeyCode::Esc, NavKey::ClearFocus)]
    #[case(KeyCode::Home, NavKey::FocusRoot)]
    #[case(KeyCode::End, NavKey::FocusDeepest)]
    #[case(KeyCode::PageUp, NavKey::FirstSibling)]
    #[case(KeyCode::PageDown, NavKey::LastSibling)]
    #[case(KeyCode::Backspace, NavKey::HistoryBack)]
    #[case(KeyCode::Char(' '), NavKey::ToggleExpand)]
    #[case(KeyCode::Char('+'), NavKey::Expand)]
    #[case(KeyCode::Char('='), NavKey::Expand)]
    #[case(KeyCode::Char('-'), NavKey::Collapse)]
    #[case(KeyCode::Char('*'), NavKey::ExpandSubtree)]
    #[case(KeyCode::Char('/'), NavKey::FocusRootIfUnfocused)]
    #[case(KeyCode::Char('f'), NavKey::FocusRootIfUnfocused)]
    #[case(KeyCode::Char('?'), NavKey::ToggleHelp)]
    #[case(KeyCode::Char('h'), NavKey::ToggleHelp)]
    #[case(KeyCode::Char('1'), NavKey::Child(1))]
    #[case(KeyCode::Char('9'), NavKey::Child(9))]
    fn maps_protocol_keys(#[case] code: KeyCode, #[case] expected: NavKey) {
        let event = KeyEvent::new(code, KeyModifiers::NONE);
        assert_eq!(NavKey::from_key_event(&event), Some(expected));
    }

    #[test]
    fn shifted_symbols_still_map() {
        let event = KeyEvent::new(KeyCode::Char('?'), KeyModifiers::SHIFT);
        assert_eq!(NavKey::from_key_event(&event), Some(NavKey::ToggleHelp));
    }

    #[test]
    fn control_chords_are_ignored() {
        let event = KeyEvent::new(KeyCode::Char('f'), KeyModifiers::CONTROL);
        assert_eq!(NavKey::from_key_event(&event), None);
    }

    #[test]
    fn releases_are_ignored() {
        let event =
            KeyEvent::new_with_kind(KeyCode::Right, KeyModifiers::NONE, KeyEventKind::Release);
        assert_eq!(NavKey::from_key_event(&event), None);
    }

    #[test]
    fn unrelated_keys_do_not_map() {
        for code in [KeyCode::Tab, KeyCode::Char('q'), KeyCode::Char('0'), KeyCode::F(1)] {
            let event = KeyEvent::new(code, KeyModifiers::NONE);
            assert_eq!(NavKey::from_key_event(&event), None);
        }
    }
}
