//! Rain color presets.

use ratatui::style::Color;
use serde::{Deserialize, Serialize};

/// Fill color used for freshly drawn glyphs.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RainColor {
    /// Classic `#0F0`.
    #[default]
    Green,
    Cyan,
    Amber,
    White,
    Magenta,
}

impl RainColor {
    /// Cycle to the next preset.
    pub fn next(self) -> Self {
        match self {
            RainColor::Green => RainColor::Cyan,
            RainColor::Cyan => RainColor::Amber,
            RainColor::Amber => RainColor::White,
            RainColor::White => RainColor::Magenta,
            RainColor::Magenta => RainColor::Green,
        }
    }

    /// Red, green and blue channels of the preset.
    pub fn rgb(self) -> (u8, u8, u8) {
        match self {
            RainColor::Green => (0, 255, 0),
            RainColor::Cyan => (0, 255, 255),
            RainColor::Amber => (255, 176, 0),
            RainColor::White => (230, 255, 230),
            RainColor::Magenta => (255, 0, 200),
        }
    }

    /// Convert the preset to a Ratatui color.
    pub fn color(self) -> Color {
        let (r, g, b) = self.rgb();
        Color::Rgb(r, g, b)
    }

    /// Human readable name, shown in the help bar.
    pub fn name(self) -> &'static str {
        match self {
            RainColor::Green => "green",
            RainColor::Cyan => "cyan",
            RainColor::Amber => "amber",
            RainColor::White => "white",
            RainColor::Magenta => "magenta",
        }
    }
}
