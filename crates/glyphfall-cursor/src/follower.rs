//! Pointer follower.

use std::collections::BTreeSet;

use crate::element::{Element, ElementId, Point};
use crate::selector::InteractiveSelector;

/// The visual element that tracks the pointer.
pub trait TrackingElement {
    /// Move the element to `point`, in viewport coordinates.
    fn set_position(&mut self, point: Point);

    /// Show the "hovering" state.
    fn add_marker(&mut self);

    /// Drop the "hovering" state.
    fn remove_marker(&mut self);
}

/// Mirrors pointer movement and hover state onto a [`TrackingElement`].
///
/// Hovered interactive elements are tracked as a set, so overlapping
/// elements share a single marker: it is added when the first one is
/// entered and removed when the last one is left.
#[derive(Debug)]
pub struct CursorFollower<T> {
    element: T,
    selector: InteractiveSelector,
    hovered: BTreeSet<ElementId>,
    position: Option<Point>,
}

impl<T: TrackingElement> CursorFollower<T> {
    pub fn new(element: T, selector: InteractiveSelector) -> Self {
        Self {
            element,
            selector,
            hovered: BTreeSet::new(),
            position: None,
        }
    }

    pub fn on_pointer_move(&mut self, point: Point) {
        self.position = Some(point);
        self.element.set_position(point);
    }

    pub fn on_pointer_enter(&mut self, target: &Element) {
        if !self.selector.matches(target) {
            return;
        }
        let was_hovering = self.is_hovering();
        if self.hovered.insert(target.id) && !was_hovering {
            tracing::trace!(id = target.id.0, tag = %target.tag, "hover start");
            self.element.add_marker();
        }
    }

    pub fn on_pointer_leave(&mut self, target: &Element) {
        if self.hovered.remove(&target.id) && !self.is_hovering() {
            tracing::trace!(id = target.id.0, tag = %target.tag, "hover end");
            self.element.remove_marker();
        }
    }

    pub fn is_hovering(&self) -> bool {
        !self.hovered.is_empty()
    }

    /// Last pointer position seen, if any.
    pub fn position(&self) -> Option<Point> {
        self.position
    }

    pub fn element(&self) -> &T {
        &self.element
    }

    pub fn selector(&self) -> &InteractiveSelector {
        &self.selector
    }
}
