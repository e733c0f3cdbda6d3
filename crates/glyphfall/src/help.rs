//! Help bar with clickable key hints.

use glyphfall_core::RainColor;
use glyphfall_cursor::{Element, ElementId, Region};
use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Style, Stylize},
    text::{Line, Span},
    widgets::Widget,
};

/// Gap between two entries, in cells.
const GAP: u16 = 2;

/// What clicking an entry does.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    Quit,
    CycleColor,
}

#[derive(Debug, Clone)]
struct Entry {
    element: Element,
    key: &'static str,
    label: String,
    action: Option<Action>,
}

impl Entry {
    fn spans(&self, accent: ratatui::style::Color) -> Vec<Span<'_>> {
        let mut spans = Vec::with_capacity(2);
        if !self.key.is_empty() {
            spans.push(Span::styled(self.key, Style::new().bold().fg(accent)));
            spans.push(Span::raw(" "));
        }
        spans.push(self.label.as_str().dark_gray());
        spans
    }

    fn width(&self) -> u16 {
        let key = if self.key.is_empty() { 0 } else { self.key.len() + 1 };
        (key + Span::raw(self.label.as_str()).width()) as u16
    }
}

/// The bottom line of the screen: key hints rendered as buttons plus a
/// read-only status label.
#[derive(Debug, Clone)]
pub struct HelpBar {
    entries: Vec<Entry>,
    color: RainColor,
}

impl HelpBar {
    pub fn new(color: RainColor) -> Self {
        let mut bar = Self {
            entries: vec![
                Entry {
                    element: Element::new(1, "button"),
                    key: "q",
                    label: "quit".to_string(),
                    action: Some(Action::Quit),
                },
                Entry {
                    element: Element::new(2, "button"),
                    key: "c",
                    label: "cycle color".to_string(),
                    action: Some(Action::CycleColor),
                },
                Entry {
                    element: Element::new(3, "span").with_class("status"),
                    key: "",
                    label: String::new(),
                    action: None,
                },
            ],
            color,
        };
        bar.set_color(color);
        bar
    }

    pub fn set_color(&mut self, color: RainColor) {
        self.color = color;
        if let Some(status) = self.entries.last_mut() {
            status.label = format!("rain: {}", color.name());
        }
    }

    pub fn action_for(&self, id: ElementId) -> Option<Action> {
        self.entries
            .iter()
            .find(|entry| entry.element.id == id)
            .and_then(|entry| entry.action)
    }

    /// Total width of all entries and gaps.
    fn width(&self) -> u16 {
        let gaps = GAP * self.entries.len().saturating_sub(1) as u16;
        self.entries.iter().map(Entry::width).sum::<u16>() + gaps
    }

    /// Where each entry lands when the bar is centred in `area`.
    pub fn layout(&self, area: Rect) -> Vec<(Element, Region)> {
        if area.is_empty() {
            return Vec::new();
        }
        let mut x = area.x + area.width.saturating_sub(self.width()) / 2;
        let mut regions = Vec::with_capacity(self.entries.len());
        for entry in &self.entries {
            let width = entry.width();
            regions.push((
                entry.element.clone(),
                Region::new(i32::from(x), i32::from(area.y), u32::from(width), 1),
            ));
            x = x.saturating_add(width + GAP);
        }
        regions
    }
}

impl Widget for &HelpBar {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let accent = self.color.color();
        let gap = " ".repeat(usize::from(GAP));
        let mut spans = Vec::new();
        for (i, entry) in self.entries.iter().enumerate() {
            if i > 0 {
                spans.push(Span::raw(gap.as_str()));
            }
            spans.extend(entry.spans(accent));
        }
        Line::from(spans).centered().render(area, buf);
    }
}
