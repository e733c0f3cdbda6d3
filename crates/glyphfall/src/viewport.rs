//! Terminal viewport measurement.

use std::io;

use crossterm::terminal;
use glyphfall_core::Viewport;

/// Pixel size assumed for one terminal cell when the terminal does not
/// report its pixel dimensions.
const FALLBACK_CELL_PX: (u32, u32) = (8, 16);

/// Measure the terminal window in pixels.
pub fn measure() -> io::Result<Viewport> {
    match terminal::window_size() {
        Ok(size) => Ok(from_window(size.columns, size.rows, size.width, size.height)),
        Err(_) => {
            let (columns, rows) = terminal::size()?;
            Ok(from_window(columns, rows, 0, 0))
        }
    }
}

/// Viewport for a window of `columns` x `rows` cells, using the reported
/// pixel size when there is one.
pub fn from_window(columns: u16, rows: u16, width_px: u16, height_px: u16) -> Viewport {
    if width_px == 0 || height_px == 0 {
        let (cell_w, cell_h) = FALLBACK_CELL_PX;
        return Viewport::new(u32::from(columns) * cell_w, u32::from(rows) * cell_h);
    }
    Viewport::new(u32::from(width_px), u32::from(height_px))
}
