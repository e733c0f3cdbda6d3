//! Drawing surfaces.

use glyphfall_core::SurfaceSize;

use crate::color::Rgba;

/// Channel value below which a faded cell counts as dark.
const DARK_FLOOR: f32 = 8.0;

/// The subset of a 2D drawing context the renderer needs.
///
/// Coordinates are surface pixels. Text is positioned by its baseline, so a
/// glyph drawn at `y` covers the pixel rows `y - font_size..y`.
pub trait Canvas {
    /// Resize the surface, discarding everything drawn so far.
    fn resize(&mut self, size: SurfaceSize);

    /// Composite `paint` over the given rectangle.
    fn fill_rect(&mut self, x: i64, y: i64, width: u32, height: u32, paint: Rgba);

    /// Draw a single glyph with its baseline at `(x, y)`.
    fn fill_text(&mut self, glyph: char, x: i64, y: i64, font_size: u16, paint: Rgba);
}

/// One glyph cell of a [`GlyphCanvas`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Cell {
    pub glyph: char,
    pub rgb: [f32; 3],
}

impl Cell {
    pub const EMPTY: Cell = Cell {
        glyph: ' ',
        rgb: [0.0; 3],
    };

    /// Whether the cell is still bright enough to show.
    pub fn is_lit(&self) -> bool {
        self.glyph != ' ' && self.rgb.iter().any(|&c| c >= DARK_FLOOR)
    }

    pub fn rgb8(&self) -> (u8, u8, u8) {
        let [r, g, b] = self.rgb.map(|c| c.round().clamp(0.0, 255.0) as u8);
        (r, g, b)
    }
}

/// An in-memory surface stored as a grid of glyph cells.
///
/// Each cell is `cell_size` surface pixels square. Fills composite onto
/// every cell they touch; text replaces the glyph of the cell its box
/// starts in.
#[derive(Debug, Clone)]
pub struct GlyphCanvas {
    cell_size: u16,
    size: SurfaceSize,
    cols: usize,
    rows: usize,
    cells: Vec<Cell>,
}

impl GlyphCanvas {
    pub fn new(cell_size: u16) -> Self {
        Self {
            cell_size: cell_size.max(1),
            size: SurfaceSize::default(),
            cols: 0,
            rows: 0,
            cells: Vec::new(),
        }
    }

    pub fn size(&self) -> SurfaceSize {
        self.size
    }

    /// Grid dimensions as `(columns, rows)`; partial cells count.
    pub fn grid_size(&self) -> (usize, usize) {
        (self.cols, self.rows)
    }

    pub fn cell(&self, col: usize, row: usize) -> Option<&Cell> {
        if col >= self.cols || row >= self.rows {
            return None;
        }
        self.cells.get(row * self.cols + col)
    }

    /// Number of cells currently lit.
    pub fn lit_cells(&self) -> usize {
        self.cells.iter().filter(|cell| cell.is_lit()).count()
    }

    /// Cell index range covering `start..start + len` pixels, clamped to `limit`.
    fn span(&self, start: i64, len: u32, limit: usize) -> std::ops::Range<usize> {
        let cell = i64::from(self.cell_size);
        let end = start + i64::from(len);
        let first = start.div_euclid(cell).clamp(0, limit as i64) as usize;
        let last = (end + cell - 1).div_euclid(cell).clamp(0, limit as i64) as usize;
        first..last.max(first)
    }
}

impl Canvas for GlyphCanvas {
    fn resize(&mut self, size: SurfaceSize) {
        let cell = self.cell_size as u32;
        self.size = size;
        self.cols = size.width.div_ceil(cell) as usize;
        self.rows = size.height.div_ceil(cell) as usize;
        self.cells = vec![Cell::EMPTY; self.cols * self.rows];
    }

    fn fill_rect(&mut self, x: i64, y: i64, width: u32, height: u32, paint: Rgba) {
        let cols = self.span(x, width, self.cols);
        let rows = self.span(y, height, self.rows);
        for row in rows {
            let line = &mut self.cells[row * self.cols..(row + 1) * self.cols];
            for cell in &mut line[cols.clone()] {
                cell.rgb = paint.over(cell.rgb);
                if !cell.is_lit() {
                    *cell = Cell::EMPTY;
                }
            }
        }
    }

    fn fill_text(&mut self, glyph: char, x: i64, y: i64, font_size: u16, paint: Rgba) {
        let cell_px = i64::from(self.cell_size);
        let top = y - i64::from(font_size);
        if x < 0 || top < 0 {
            return;
        }
        let (col, row) = ((x / cell_px) as usize, (top / cell_px) as usize);
        if col >= self.cols || row >= self.rows {
            return;
        }
        let cell = &mut self.cells[row * self.cols + col];
        cell.glyph = glyph;
        cell.rgb = paint.over(cell.rgb);
    }
}
