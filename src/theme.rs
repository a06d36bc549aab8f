// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Noema-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Noema and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Static, load-once presentation palette.
//!
//! Plain color data only; how a renderer applies it is its own business. The
//! palette is resolved once per process, with an optional `NOEMA_PALETTE`
//! environment override.

use std::sync::OnceLock;
use std::{env, fmt};

use crate::model::NodeTier;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RgbColor {
    r: u8,
    g: u8,
    b: u8,
}

impl RgbColor {
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Parses `#rrggbb`.
    pub fn parse_hex(value: &str) -> Result<Self, ThemeError> {
        let digits = value.strip_prefix('#').unwrap_or(value);
        if digits.len() != 6 || !digits.chars().all(|ch| ch.is_ascii_hexdigit()) {
            return Err(ThemeError::InvalidColor { value: value.to_owned() });
        }
        let channel = |range: std::ops::Range<usize>| {
            u8::from_str_radix(&digits[range], 16)
                .map_err(|_| ThemeError::InvalidColor { value: value.to_owned() })
        };
        Ok(Self { r: channel(0..2)?, g: channel(2..4)?, b: channel(4..6)? })
    }

    pub fn r(&self) -> u8 {
        self.r
    }

    pub fn g(&self) -> u8 {
        self.g
    }

    pub fn b(&self) -> u8 {
        self.b
    }
}

impl fmt::Display for RgbColor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }
}

/// How one tier of boxes presents.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TierStyle {
    pub fill: RgbColor,
    pub text: RgbColor,
    pub bold: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Theme {
    tiers: [TierStyle; 4],
    edge: RgbColor,
    dimmed: RgbColor,
    focus_ring: RgbColor,
}

impl Default for Theme {
    fn default() -> Self {
        let text = RgbColor::new(0xf8, 0xfa, 0xfc);
        Self {
            tiers: [
                TierStyle { fill: RgbColor::new(0x3b, 0x82, 0xf6), text, bold: true },
                TierStyle { fill: RgbColor::new(0x8b, 0x5c, 0xf6), text, bold: true },
                TierStyle { fill: RgbColor::new(0x10, 0xb9, 0x81), text, bold: false },
                TierStyle { fill: RgbColor::new(0x64, 0x74, 0x8b), text, bold: false },
            ],
            edge: RgbColor::new(0x94, 0xa3, 0xb8),
            dimmed: RgbColor::new(0x47, 0x55, 0x69),
            focus_ring: RgbColor::new(0xf5, 0x9e, 0x0b),
        }
    }
}

impl Theme {
    /// Expected `NOEMA_PALETTE` shape: seven comma-separated hex colors
    /// (root, theme, concept, detail fills, then edge, dimmed, focus ring).
    const CSV_LEN: usize = 7;

    pub fn tier(&self, tier: NodeTier) -> TierStyle {
        let index = match tier {
            NodeTier::Root => 0,
            NodeTier::Theme => 1,
            NodeTier::Concept => 2,
            NodeTier::Detail => 3,
        };
        self.tiers[index]
    }

    pub fn edge(&self) -> RgbColor {
        self.edge
    }

    pub fn dimmed(&self) -> RgbColor {
        self.dimmed
    }

    pub fn focus_ring(&self) -> RgbColor {
        self.focus_ring
    }

    fn parse_csv(value: &str) -> Result<Self, ThemeError> {
        let parts: Vec<&str> = value.split(',').map(str::trim).collect();
        if parts.len() != Self::CSV_LEN {
            return Err(ThemeError::WrongLength { expected: Self::CSV_LEN, found: parts.len() });
        }

        let mut theme = Self::default();
        for (index, part) in parts.iter().take(4).enumerate() {
            theme.tiers[index].fill = RgbColor::parse_hex(part)?;
        }
        theme.edge = RgbColor::parse_hex(parts[4])?;
        theme.dimmed = RgbColor::parse_hex(parts[5])?;
        theme.focus_ring = RgbColor::parse_hex(parts[6])?;
        Ok(theme)
    }

    fn from_env() -> Result<Option<Self>, ThemeError> {
        match env::var("NOEMA_PALETTE") {
            Ok(value) => Self::parse_csv(&value).map(Some),
            Err(env::VarError::NotPresent) => Ok(None),
            Err(env::VarError::NotUnicode(_)) => {
                Err(ThemeError::InvalidEnv { name: "NOEMA_PALETTE" })
            }
        }
    }
}

/// The process-wide palette, resolved on first use. An invalid override is
/// logged and replaced by the default rather than failing the session.
pub fn theme() -> &'static Theme {
    static THEME: OnceLock<Theme> = OnceLock::new();
    THEME.get_or_init(|| match Theme::from_env() {
        Ok(Some(theme)) => theme,
        Ok(None) => Theme::default(),
        Err(error) => {
            tracing::warn!(%error, "ignoring invalid palette override");
            Theme::default()
        }
    })
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ThemeError {
    InvalidColor { value: String },
    WrongLength { expected: usize, found: usize },
    InvalidEnv { name: &'static str },
}

impl fmt::Display for ThemeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidColor { value } => write!(f, "invalid color '{value}' (expected #rrggbb)"),
            Self::WrongLength { expected, found } => {
                write!(f, "expected {expected} comma-separated colors, got {found}")
            }
            Self::InvalidEnv { name } => write!(f, "{name} contains non-unicode data"),
        }
    }
}

impl std::error::Error for ThemeError {}
