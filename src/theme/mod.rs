//! Light/dark theme state and its presentation tokens.
//!
//! Every theme-dependent value the page shows resolves through
//! [`ThemeToken`], so the controller and the observers agree on what "dark"
//! and "light" look like.

use crossterm::style::Color;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

mod bus;
mod controller;
pub mod observers;

pub use bus::{SubscriptionId, ThemeBus, ThemeChangeEvent, ThemeObserver};
pub use controller::{ThemeController, THEME_KEY};

/// Visual mode of the page.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    Dark,
    /// Unset markers read back as light.
    #[default]
    Light,
}

impl Theme {
    /// Stable persisted value (`dark` / `light`).
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Dark => "dark",
            Self::Light => "light",
        }
    }

    /// Parse a persisted or user-supplied value; anything else is `None`.
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "dark" => Some(Self::Dark),
            "light" => Some(Self::Light),
            _ => None,
        }
    }

    /// Theme suggested by a "prefers dark" signal.
    pub fn from_prefers_dark(prefers_dark: bool) -> Self {
        if prefers_dark {
            Self::Dark
        } else {
            Self::Light
        }
    }

    pub fn toggled(self) -> Self {
        match self {
            Self::Dark => Self::Light,
            Self::Light => Self::Dark,
        }
    }

    pub fn is_dark(self) -> bool {
        self == Self::Dark
    }

    pub fn is_light(self) -> bool {
        self == Self::Light
    }

    /// Resolve one presentation token for this theme.
    pub fn token(self, token: ThemeToken) -> &'static str {
        token.value(self)
    }

    /// Page background as a terminal color.
    pub fn background(self) -> Color {
        parse_hex_color(self.token(ThemeToken::MetaColor)).unwrap_or(Color::Reset)
    }

    /// Foreground that stays readable on [`Theme::background`].
    pub fn foreground(self) -> Color {
        parse_hex_color(self.token(ThemeToken::Foreground)).unwrap_or(Color::Reset)
    }
}

impl fmt::Display for Theme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Theme {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s).ok_or_else(|| format!("unknown theme `{s}`. Available themes: dark, light"))
    }
}

/// Semantic presentation slot that changes with the theme.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum ThemeToken {
    /// `<meta name="theme-color">` content.
    MetaColor,
    Foreground,
    ToggleIcon,
    ToggleLabel,
    LogoSource,
    HeroGradient,
    CardGlow,
}

impl ThemeToken {
    pub fn value(self, theme: Theme) -> &'static str {
        match (self, theme) {
            (Self::MetaColor, Theme::Dark) => "#0F172A",
            (Self::MetaColor, Theme::Light) => "#FFFFFF",
            (Self::Foreground, Theme::Dark) => "#F1F5F9",
            (Self::Foreground, Theme::Light) => "#0F172A",
            // The toggle advertises the theme it switches to.
            (Self::ToggleIcon, Theme::Dark) => "fas fa-sun",
            (Self::ToggleIcon, Theme::Light) => "fas fa-moon",
            (Self::ToggleLabel, Theme::Dark) => "Switch to light mode",
            (Self::ToggleLabel, Theme::Light) => "Switch to dark mode",
            (Self::LogoSource, Theme::Dark) => "dark.svg",
            (Self::LogoSource, Theme::Light) => "light.svg",
            (Self::HeroGradient, Theme::Dark) => "linear-gradient(135deg, #1E3A8A, #3B82F6)",
            (Self::HeroGradient, Theme::Light) => "linear-gradient(135deg, #86EFAC, #22C55E)",
            (Self::CardGlow, Theme::Dark) => "0 0 20px rgba(34, 197, 94, 0.2)",
            (Self::CardGlow, Theme::Light) => "0 8px 25px rgba(0, 0, 0, 0.1)",
        }
    }
}

/// Parse `#RRGGBB` into a terminal color.
pub fn parse_hex_color(input: &str) -> Result<Color, String> {
    let normalized = input.trim().to_ascii_lowercase();
    let Some(hex) = normalized.strip_prefix('#') else {
        return Err(format!("invalid hex color `{input}` (expected #RRGGBB)"));
    };
    if hex.len() != 6 {
        return Err(format!("invalid hex color `{input}` (expected #RRGGBB)"));
    }
    let r = u8::from_str_radix(&hex[0..2], 16).map_err(|_| format!("invalid hex color `{input}`"))?;
    let g = u8::from_str_radix(&hex[2..4], 16).map_err(|_| format!("invalid hex color `{input}`"))?;
    let b = u8::from_str_radix(&hex[4..6], 16).map_err(|_| format!("invalid hex color `{input}`"))?;
    Ok(Color::Rgb { r, g, b })
}
