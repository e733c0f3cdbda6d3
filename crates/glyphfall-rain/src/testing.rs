//! Test doubles for the renderer.

use glyphfall_core::SurfaceSize;

use crate::canvas::Canvas;
use crate::color::Rgba;
use crate::random::RandomSource;
use crate::scheduler::Scheduler;

/// Replays a fixed list of samples, cycling when exhausted.
#[derive(Debug, Clone)]
pub struct ScriptedRandom {
    samples: Vec<f64>,
    next: usize,
}

impl ScriptedRandom {
    pub fn new(samples: impl IntoIterator<Item = f64>) -> Self {
        let samples: Vec<f64> = samples.into_iter().collect();
        assert!(!samples.is_empty(), "scripted random needs samples");
        Self { samples, next: 0 }
    }

    /// Always yields `sample`.
    pub fn constant(sample: f64) -> Self {
        Self::new([sample])
    }
}

impl RandomSource for ScriptedRandom {
    fn next_unit(&mut self) -> f64 {
        let sample = self.samples[self.next % self.samples.len()];
        self.next += 1;
        sample
    }
}

/// A drawing call captured by [`RecordingCanvas`].
#[derive(Debug, Clone, PartialEq)]
pub enum DrawOp {
    Resize(SurfaceSize),
    Rect {
        x: i64,
        y: i64,
        width: u32,
        height: u32,
        paint: Rgba,
    },
    Text {
        glyph: char,
        x: i64,
        y: i64,
        font_size: u16,
        paint: Rgba,
    },
}

/// Canvas that only records what it was asked to draw.
#[derive(Debug, Default)]
pub struct RecordingCanvas {
    pub ops: Vec<DrawOp>,
}

impl RecordingCanvas {
    pub fn texts(&self) -> Vec<(char, i64, i64)> {
        self.ops
            .iter()
            .filter_map(|op| match op {
                DrawOp::Text { glyph, x, y, .. } => Some((*glyph, *x, *y)),
                _ => None,
            })
            .collect()
    }
}

impl Canvas for RecordingCanvas {
    fn resize(&mut self, size: SurfaceSize) {
        self.ops.push(DrawOp::Resize(size));
    }

    fn fill_rect(&mut self, x: i64, y: i64, width: u32, height: u32, paint: Rgba) {
        self.ops.push(DrawOp::Rect {
            x,
            y,
            width,
            height,
            paint,
        });
    }

    fn fill_text(&mut self, glyph: char, x: i64, y: i64, font_size: u16, paint: Rgba) {
        self.ops.push(DrawOp::Text {
            glyph,
            x,
            y,
            font_size,
            paint,
        });
    }
}

/// Scheduler that counts requests.
#[derive(Debug, Default)]
pub struct CountingScheduler {
    pub frames: usize,
    pub quiet: Vec<std::time::Duration>,
}

impl Scheduler for CountingScheduler {
    fn schedule_frame(&mut self) {
        self.frames += 1;
    }

    fn schedule_after_quiet(&mut self, delay: std::time::Duration) {
        self.quiet.push(delay);
    }
}
