//! Core types shared by the glyphfall crates.
//!
//! Everything here is plain data: surface and viewport geometry, the rain
//! color presets and the tunables that drive the renderer and the cursor
//! follower.

mod color;
mod geometry;
mod settings;

pub use color::RainColor;
pub use geometry::{SurfaceSize, Viewport};
pub use settings::{
    CursorSettings, DEFAULT_ALPHABET, FramePacing, RainSettings, ResizeMode, SettingsError,
};
