//! Digital rain rendering for glyphfall.
//!
//! [`RainRenderer`] owns the per-column drop state and paints one glyph per
//! column per frame onto any [`Canvas`]. Frame callbacks and the debounced
//! resize timer come from a [`Scheduler`], randomness from a
//! [`RandomSource`], so the whole loop runs deterministically in tests.
//! [`GlyphCanvas`] is the in-memory surface the terminal host draws from via
//! [`RainView`].

mod canvas;
mod color;
mod pacing;
mod random;
mod renderer;
mod scheduler;
mod view;

#[cfg(test)]
mod testing;

pub use canvas::{Canvas, Cell, GlyphCanvas};
pub use color::Rgba;
pub use pacing::FrameThrottle;
pub use random::{RandomSource, SmallRandom};
pub use renderer::RainRenderer;
pub use scheduler::{LoopScheduler, Scheduler, Wake};
pub use view::RainView;
