//! Hit testing pointer positions against element regions.

use crate::element::{Element, ElementId, Point};

/// Rectangle occupied by an element, in viewport coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Region {
    pub x: i32,
    pub y: i32,
    pub width: u32,
    pub height: u32,
}

impl Region {
    pub fn new(x: i32, y: i32, width: u32, height: u32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    pub fn contains(&self, point: Point) -> bool {
        let (px, py) = (i64::from(point.x), i64::from(point.y));
        let (x, y) = (i64::from(self.x), i64::from(self.y));
        px >= x && py >= y && px < x + i64::from(self.width) && py < y + i64::from(self.height)
    }
}

/// An enter or leave transition produced by [`HoverTracker::update`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HoverChange {
    Enter(Element),
    Leave(Element),
}

/// Tracks which elements the pointer is inside.
#[derive(Debug, Default)]
pub struct HoverTracker {
    regions: Vec<(Element, Region)>,
    inside: Vec<Element>,
}

impl HoverTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the element layout. Hovered elements that are gone produce a
    /// leave on the next update.
    pub fn set_regions(&mut self, regions: Vec<(Element, Region)>) {
        self.regions = regions;
    }

    /// Hit test `point`, returning leaves before enters.
    pub fn update(&mut self, point: Point) -> Vec<HoverChange> {
        let now: Vec<Element> = self
            .regions
            .iter()
            .filter(|(_, region)| region.contains(point))
            .map(|(element, _)| element.clone())
            .collect();

        let is_in = |set: &[Element], id: ElementId| set.iter().any(|e| e.id == id);
        let leaves = self
            .inside
            .iter()
            .filter(|element| !is_in(now.as_slice(), element.id))
            .cloned()
            .map(HoverChange::Leave);
        let enters = now
            .iter()
            .filter(|element| !is_in(self.inside.as_slice(), element.id))
            .cloned()
            .map(HoverChange::Enter);
        let changes = leaves.chain(enters).collect();

        self.inside = now;
        changes
    }

    /// Topmost element under `point`, if any. Later regions are on top.
    pub fn hit(&self, point: Point) -> Option<&Element> {
        self.regions
            .iter()
            .rev()
            .find(|(_, region)| region.contains(point))
            .map(|(element, _)| element)
    }
}
