//! Viewport and surface geometry.

/// Size of the host viewport in pixels.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Viewport {
    pub width: u32,
    pub height: u32,
}

impl Viewport {
    pub fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    /// Surface dimensions for this viewport at a resolution scale factor.
    ///
    /// A factor of 1 renders at full resolution, 4 at quarter resolution.
    /// Fractional pixels are dropped.
    pub fn scaled(self, scale_factor: f32) -> SurfaceSize {
        let shrink = |px: u32| (px as f32 / scale_factor).floor().max(0.0) as u32;
        SurfaceSize {
            width: shrink(self.width),
            height: shrink(self.height),
        }
    }
}

/// Size of the drawing surface in device pixels.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SurfaceSize {
    pub width: u32,
    pub height: u32,
}

impl SurfaceSize {
    pub fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    /// Number of glyph columns that fit across the surface.
    pub fn columns(self, font_size: u16) -> usize {
        match font_size {
            0 => 0,
            size => (self.width / u32::from(size)) as usize,
        }
    }

    pub fn is_empty(self) -> bool {
        self.width == 0 || self.height == 0
    }
}
