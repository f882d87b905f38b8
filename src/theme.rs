//! # Theme Module
//!
//! This module provides the accent colours and icons used to tell the terminals apart,
//! plus helpers for rendering those colours in a console.

use crate::models::TerminalKind;

/// A 24-bit RGB colour
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const fn from_rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    pub fn to_hex(&self) -> String {
        format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }

    /// ANSI truecolor foreground escape sequence for this colour
    pub fn ansi_fg(&self) -> String {
        format!("\x1b[38;2;{};{};{}m", self.r, self.g, self.b)
    }
}

/// ANSI reset sequence
pub const ANSI_RESET: &str = "\x1b[0m";

/// Visual identity of one terminal kind
///
/// The accent colour marks the terminal's row in the session roster and its login
/// card; the icon is the Font Awesome class shown on the card.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct TerminalTheme {
    /// Accent colour for borders and highlights
    pub accent: Rgb,
    /// Icon class name
    pub icon: &'static str,
}

impl TerminalTheme {
    /// Purple (#7209b7) with a line chart
    pub const SALES: Self = Self {
        accent: Rgb::from_rgb(0x72, 0x09, 0xb7),
        icon: "fas fa-chart-line",
    };

    /// Orange (#f3722c) with a server rack
    pub const SYSTEM: Self = Self {
        accent: Rgb::from_rgb(0xf3, 0x72, 0x2c),
        icon: "fas fa-server",
    };

    /// Teal (#43aa8b) with a bar chart
    pub const ANALYTICS: Self = Self {
        accent: Rgb::from_rgb(0x43, 0xaa, 0x8b),
        icon: "fas fa-chart-bar",
    };

    /// Slate blue (#577590) with coins
    pub const FINANCE: Self = Self {
        accent: Rgb::from_rgb(0x57, 0x75, 0x90),
        icon: "fas fa-coins",
    };

    pub const fn for_kind(kind: TerminalKind) -> Self {
        match kind {
            TerminalKind::Sales => Self::SALES,
            TerminalKind::System => Self::SYSTEM,
            TerminalKind::Analytics => Self::ANALYTICS,
            TerminalKind::Finance => Self::FINANCE,
        }
    }
}

/// Wraps `text` in the accent colour's escape sequences
pub fn paint(text: &str, colour: Rgb) -> String {
    format!("{}{}{}", colour.ansi_fg(), text, ANSI_RESET)
}
