//! Ratatui widget that stretches a [`GlyphCanvas`] over an area.

use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Color, Style},
    widgets::Widget,
};

use crate::canvas::GlyphCanvas;

/// Displays a low resolution glyph canvas scaled up to fill the render area.
///
/// Every lit canvas cell is drawn once, at the top-left terminal cell of the
/// block of terminal cells it covers (centred vertically). Glyphs that do not
/// fit their block's width are skipped.
#[derive(Debug, Clone, Copy)]
pub struct RainView<'a> {
    canvas: &'a GlyphCanvas,
}

impl<'a> RainView<'a> {
    pub fn new(canvas: &'a GlyphCanvas) -> Self {
        Self { canvas }
    }
}

/// Start of block `index` when `count` blocks share `extent` cells.
fn block_start(index: usize, count: usize, extent: u16) -> u16 {
    (index * usize::from(extent) / count) as u16
}

impl Widget for RainView<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let (cols, rows) = self.canvas.grid_size();
        if cols == 0 || rows == 0 || area.is_empty() {
            return;
        }

        for row in 0..rows {
            let top = block_start(row, rows, area.height);
            let bottom = block_start(row + 1, rows, area.height);
            if bottom == top {
                continue;
            }
            let y = area.y + top + (bottom - top - 1) / 2;

            for col in 0..cols {
                let Some(cell) = self.canvas.cell(col, row).filter(|cell| cell.is_lit()) else {
                    continue;
                };
                let left = block_start(col, cols, area.width);
                let right = block_start(col + 1, cols, area.width);
                if right == left {
                    continue;
                }
                let (r, g, b) = cell.rgb8();
                let mut glyph = [0u8; 4];
                buf.set_stringn(
                    area.x + left,
                    y,
                    cell.glyph.encode_utf8(&mut glyph),
                    usize::from(right - left),
                    Style::new().fg(Color::Rgb(r, g, b)),
                );
            }
        }
    }
}
