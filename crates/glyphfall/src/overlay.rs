//! Terminal rendition of the cursor follower's tracking element.

use glyphfall_cursor::{Point, TrackingElement};
use ratatui::{
    buffer::Buffer,
    layout::{Position, Rect},
    style::{Color, Modifier, Style},
    widgets::Widget,
};

const IDLE_GLYPH: &str = "○";
const HOVER_GLYPH: &str = "◉";

/// A one-cell ring drawn at the pointer.
#[derive(Debug, Default)]
pub struct TerminalCursor {
    position: Option<Point>,
    hovering: bool,
}

impl TerminalCursor {
    pub fn position(&self) -> Option<Point> {
        self.position
    }

    pub fn is_hovering(&self) -> bool {
        self.hovering
    }
}

impl TrackingElement for TerminalCursor {
    fn set_position(&mut self, point: Point) {
        self.position = Some(point);
    }

    fn add_marker(&mut self) {
        self.hovering = true;
    }

    fn remove_marker(&mut self) {
        self.hovering = false;
    }
}

/// Draws a [`TerminalCursor`] in the accent color.
#[derive(Debug)]
pub struct CursorOverlay<'a> {
    cursor: &'a TerminalCursor,
    accent: Color,
}

impl<'a> CursorOverlay<'a> {
    pub fn new(cursor: &'a TerminalCursor, accent: Color) -> Self {
        Self { cursor, accent }
    }
}

impl Widget for CursorOverlay<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let Some(point) = self.cursor.position else {
            return;
        };
        let (Ok(x), Ok(y)) = (u16::try_from(point.x), u16::try_from(point.y)) else {
            return;
        };
        if !area.contains(Position::new(x, y)) {
            return;
        }
        let (glyph, style) = if self.cursor.hovering {
            (
                HOVER_GLYPH,
                Style::new().fg(self.accent).add_modifier(Modifier::BOLD),
            )
        } else {
            (IDLE_GLYPH, Style::new().fg(Color::White))
        };
        if let Some(cell) = buf.cell_mut(Position::new(x, y)) {
            cell.set_symbol(glyph).set_style(style);
        }
    }
}
