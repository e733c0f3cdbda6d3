//! Paint colors and compositing.

use glyphfall_core::RainColor;

/// A fill color with straight (non-premultiplied) alpha.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rgba {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: f32,
}

impl Rgba {
    pub const BLACK: Rgba = Rgba::opaque(0, 0, 0);

    pub const fn opaque(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 1.0 }
    }

    pub const fn with_alpha(self, a: f32) -> Self {
        Self { a, ..self }
    }

    /// Source-over composite onto an opaque destination.
    pub fn over(self, dst: [f32; 3]) -> [f32; 3] {
        let a = self.a.clamp(0.0, 1.0);
        let src = [self.r, self.g, self.b];
        std::array::from_fn(|i| f32::from(src[i]) * a + dst[i] * (1.0 - a))
    }
}

impl From<RainColor> for Rgba {
    fn from(color: RainColor) -> Self {
        let (r, g, b) = color.rgb();
        Rgba::opaque(r, g, b)
    }
}
