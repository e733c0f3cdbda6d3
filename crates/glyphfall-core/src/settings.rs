//! Tunables for the rain renderer and the cursor follower.

use std::time::Duration;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::RainColor;

/// Katakana, Latin capitals and digits.
pub const DEFAULT_ALPHABET: &str = concat!(
    "アァカサタナハマヤャラワガザダバパイィキシチニヒミリヰギジヂビピウゥクスツヌフムユュルグズブヅプエェケセテネヘメレヱゲゼデベペオォコソトノホモヨョロヲゴゾドボポヴッン",
    "ABCDEFGHIJKLMNOPQRSTUVWXYZ",
    "0123456789",
);

/// How paint work is paced against the host's frame callbacks.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "mode", rename_all = "kebab-case")]
pub enum FramePacing {
    /// Request a callback every display frame and paint at most `fps`
    /// times per second.
    Throttled { fps: u32 },
    /// Fire on a fixed delay and paint on every firing.
    FixedDelay { interval_ms: u64 },
}

impl Default for FramePacing {
    fn default() -> Self {
        FramePacing::Throttled { fps: 20 }
    }
}

/// What happens to column state when the surface is resized.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ResizeMode {
    /// Keep surviving columns where they are and stagger new ones.
    #[default]
    Preserve,
    /// Restart every column from the top.
    Reset,
}

/// Settings rejected at startup.
#[derive(Debug, Error, PartialEq)]
pub enum SettingsError {
    #[error("scale factor must be at least 1.0, got {0}")]
    ScaleFactor(f32),
    #[error("font size must be at least 1px")]
    FontSize,
    #[error("frame rate must be at least 1 per second")]
    FrameRate,
    #[error("fixed frame delay must be at least 1ms")]
    FrameDelay,
    #[error("display refresh rate must be at least 1Hz")]
    DisplayRate,
    #[error("fade alpha must be within 0.0..=1.0, got {0}")]
    FadeAlpha(f32),
    #[error("reset threshold must be within 0.0..=1.0, got {0}")]
    ResetThreshold(f64),
    #[error("stagger range {min}..={max} is empty")]
    StaggerRange { min: i32, max: i32 },
    #[error("glyph alphabet is empty")]
    EmptyAlphabet,
    #[error("interactive selector {0:?} contains no selectors")]
    EmptySelector(String),
}

/// Tunables for the rain renderer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RainSettings {
    /// Viewport pixels per surface pixel, at least 1.
    pub scale_factor: f32,
    /// Glyph cell size in surface pixels.
    pub font_size: u16,
    pub pacing: FramePacing,
    /// Refresh rate of the host's per-frame callback.
    pub display_hz: u32,
    /// Opacity of the black overlay painted before every frame.
    pub fade_alpha: f32,
    /// A column past the bottom restarts when a uniform draw exceeds this.
    pub reset_threshold: f64,
    pub resize_debounce_ms: u64,
    /// Lowest start row given to columns that appear on resize.
    pub stagger_min: i32,
    /// Highest start row given to columns that appear on resize.
    pub stagger_max: i32,
    pub resize_mode: ResizeMode,
    pub alphabet: String,
    pub color: RainColor,
}

impl Default for RainSettings {
    fn default() -> Self {
        Self {
            scale_factor: 4.0,
            font_size: 16,
            pacing: FramePacing::default(),
            display_hz: 60,
            fade_alpha: 0.05,
            reset_threshold: 0.975,
            resize_debounce_ms: 200,
            stagger_min: -100,
            stagger_max: -1,
            resize_mode: ResizeMode::default(),
            alphabet: DEFAULT_ALPHABET.to_string(),
            color: RainColor::default(),
        }
    }
}

impl RainSettings {
    /// Check every tunable, reporting the first bad one.
    pub fn validate(&self) -> Result<(), SettingsError> {
        if !(self.scale_factor.is_finite() && self.scale_factor >= 1.0) {
            return Err(SettingsError::ScaleFactor(self.scale_factor));
        }
        if self.font_size == 0 {
            return Err(SettingsError::FontSize);
        }
        match self.pacing {
            FramePacing::Throttled { fps: 0 } => return Err(SettingsError::FrameRate),
            FramePacing::FixedDelay { interval_ms: 0 } => return Err(SettingsError::FrameDelay),
            _ => {}
        }
        if self.display_hz == 0 {
            return Err(SettingsError::DisplayRate);
        }
        if !(0.0..=1.0).contains(&self.fade_alpha) {
            return Err(SettingsError::FadeAlpha(self.fade_alpha));
        }
        if !(0.0..=1.0).contains(&self.reset_threshold) {
            return Err(SettingsError::ResetThreshold(self.reset_threshold));
        }
        if self.stagger_min > self.stagger_max {
            return Err(SettingsError::StaggerRange {
                min: self.stagger_min,
                max: self.stagger_max,
            });
        }
        if self.alphabet.is_empty() {
            return Err(SettingsError::EmptyAlphabet);
        }
        Ok(())
    }

    /// Glyphs available for sampling, in alphabet order.
    pub fn glyphs(&self) -> Vec<char> {
        self.alphabet.chars().collect()
    }

    /// Minimum time between two paints, or `None` when every frame paints.
    pub fn paint_interval(&self) -> Option<Duration> {
        match self.pacing {
            FramePacing::Throttled { fps } => Some(Duration::from_secs(1) / fps.max(1)),
            FramePacing::FixedDelay { .. } => None,
        }
    }

    /// Delay between two frame callbacks from the host.
    pub fn frame_period(&self) -> Duration {
        match self.pacing {
            FramePacing::Throttled { .. } => Duration::from_secs(1) / self.display_hz.max(1),
            FramePacing::FixedDelay { interval_ms } => Duration::from_millis(interval_ms),
        }
    }

    pub fn resize_debounce(&self) -> Duration {
        Duration::from_millis(self.resize_debounce_ms)
    }
}

/// Tunables for the cursor follower.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CursorSettings {
    pub enabled: bool,
    /// Comma separated simple selectors, e.g. `"a, button, .card"`.
    pub interactive_selector: String,
}

impl Default for CursorSettings {
    fn default() -> Self {
        Self {
            enabled: true,
            interactive_selector: "a, button".to_string(),
        }
    }
}

impl CursorSettings {
    pub fn validate(&self) -> Result<(), SettingsError> {
        let has_selector = self
            .interactive_selector
            .split(',')
            .any(|part| !part.trim().is_empty());
        if self.enabled && !has_selector {
            return Err(SettingsError::EmptySelector(
                self.interactive_selector.clone(),
            ));
        }
        Ok(())
    }
}
