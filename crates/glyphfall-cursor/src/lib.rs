//! Cursor follower for glyphfall.
//!
//! A [`CursorFollower`] mirrors the pointer onto a [`TrackingElement`] and
//! flags it as hovering while the pointer is over an element matched by an
//! [`InteractiveSelector`]. [`HoverTracker`] turns raw pointer positions into
//! the enter/leave notifications the follower consumes.

mod element;
mod follower;
mod hover;
mod selector;

pub use element::{Element, ElementId, Point};
pub use follower::{CursorFollower, TrackingElement};
pub use hover::{HoverChange, HoverTracker, Region};
pub use selector::InteractiveSelector;
