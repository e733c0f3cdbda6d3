//! Digital rain renderer (stateful).

use std::time::Duration;

use glyphfall_core::{RainColor, RainSettings, ResizeMode, SettingsError, SurfaceSize, Viewport};

use crate::canvas::Canvas;
use crate::color::Rgba;
use crate::pacing::FrameThrottle;
use crate::random::{RandomSource, SmallRandom};
use crate::scheduler::Scheduler;

/// Falling-glyph renderer.
///
/// Each column holds the row index of its next glyph. Every paint fades the
/// surface a little, draws one glyph per column and moves every drop down a
/// row; drops past the bottom restart at random so columns end up with
/// different lengths.
#[derive(Debug)]
pub struct RainRenderer<R = SmallRandom> {
    settings: RainSettings,
    glyphs: Vec<char>,
    paint: Rgba,
    surface: SurfaceSize,
    columns: Vec<i32>,
    throttle: FrameThrottle,
    rng: R,
}

impl<R: RandomSource> RainRenderer<R> {
    /// Create a renderer. Nothing is allocated until [`Self::initialize`].
    pub fn new(settings: RainSettings, rng: R) -> Result<Self, SettingsError> {
        settings.validate()?;
        Ok(Self {
            glyphs: settings.glyphs(),
            paint: settings.color.into(),
            throttle: FrameThrottle::new(settings.paint_interval()),
            surface: SurfaceSize::default(),
            columns: Vec::new(),
            settings,
            rng,
        })
    }

    /// Size the surface to `viewport` and start every column one row down.
    pub fn initialize(&mut self, viewport: Viewport, canvas: &mut impl Canvas) {
        self.resize_surface(viewport, canvas);
        self.columns = vec![1; self.column_count()];
        tracing::info!(
            width = self.surface.width,
            height = self.surface.height,
            columns = self.columns.len(),
            "rain initialized"
        );
    }

    /// Frame callback.
    ///
    /// Requests the next frame, then paints if the throttle lets this frame
    /// through. Returns whether anything was painted.
    pub fn tick(
        &mut self,
        now: Duration,
        canvas: &mut impl Canvas,
        scheduler: &mut impl Scheduler,
    ) -> bool {
        scheduler.schedule_frame();
        if !self.throttle.ready(now) {
            return false;
        }
        self.paint(canvas);
        true
    }

    /// Paint one frame unconditionally.
    pub fn paint(&mut self, canvas: &mut impl Canvas) {
        let SurfaceSize { width, height } = self.surface;
        canvas.fill_rect(
            0,
            0,
            width,
            height,
            Rgba::BLACK.with_alpha(self.settings.fade_alpha),
        );

        let font_size = self.settings.font_size;
        let cell = i64::from(font_size);
        let bottom = i64::from(height);
        for (i, drop) in self.columns.iter_mut().enumerate() {
            let glyph = self.glyphs[self.rng.pick_index(self.glyphs.len())];
            let y = i64::from(*drop) * cell;
            canvas.fill_text(glyph, i as i64 * cell, y, font_size, self.paint);

            if y > bottom && self.rng.next_unit() > self.settings.reset_threshold {
                *drop = 0;
            }
            *drop = drop.saturating_add(1);
        }
    }

    /// Note a raw resize notification. The actual recompute happens in
    /// [`Self::on_resize`] once the notifications stop for the debounce delay.
    pub fn notify_resize(&self, scheduler: &mut impl Scheduler) {
        scheduler.schedule_after_quiet(self.settings.resize_debounce());
    }

    /// Resize the surface and the column state to a new viewport.
    pub fn on_resize(&mut self, viewport: Viewport, canvas: &mut impl Canvas) {
        let before = self.columns.len();
        self.resize_surface(viewport, canvas);
        let count = self.column_count();

        match self.settings.resize_mode {
            ResizeMode::Preserve => {
                self.columns.truncate(count);
                let (min, max) = (self.settings.stagger_min, self.settings.stagger_max);
                while self.columns.len() < count {
                    self.columns.push(self.rng.pick_in_range(min, max));
                }
            }
            ResizeMode::Reset => self.columns = vec![1; count],
        }

        tracing::debug!(
            before,
            after = count,
            mode = ?self.settings.resize_mode,
            "rain columns resized"
        );
    }

    /// Switch the glyph color for subsequent paints.
    pub fn set_color(&mut self, color: RainColor) {
        self.settings.color = color;
        self.paint = color.into();
    }

    pub fn color(&self) -> RainColor {
        self.settings.color
    }

    pub fn columns(&self) -> &[i32] {
        &self.columns
    }

    pub fn surface(&self) -> SurfaceSize {
        self.surface
    }

    pub fn settings(&self) -> &RainSettings {
        &self.settings
    }

    /// Columns that fit on the current surface.
    pub fn column_count(&self) -> usize {
        self.surface.columns(self.settings.font_size)
    }

    fn resize_surface(&mut self, viewport: Viewport, canvas: &mut impl Canvas) {
        self.surface = viewport.scaled(self.settings.scale_factor);
        canvas.resize(self.surface);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::canvas::GlyphCanvas;
    use crate::scheduler::{LoopScheduler, Wake};
    use crate::testing::{CountingScheduler, DrawOp, RecordingCanvas, ScriptedRandom};
    use glyphfall_core::FramePacing;
    use proptest::prelude::*;

    const MS: Duration = Duration::from_millis(1);

    fn settings() -> RainSettings {
        RainSettings {
            alphabet: "ABCD".to_string(),
            ..Default::default()
        }
    }

    fn renderer(settings: RainSettings, rng: ScriptedRandom) -> RainRenderer<ScriptedRandom> {
        RainRenderer::new(settings, rng).unwrap()
    }

    /// Viewport giving `columns` columns and `rows` rows at the default 4x scale
    /// and 16px font.
    fn viewport(columns: u32, rows: u32) -> Viewport {
        Viewport::new(columns * 64, rows * 64)
    }

    #[test]
    fn test_new_rejects_invalid_settings() {
        let bad = RainSettings {
            alphabet: String::new(),
            ..Default::default()
        };
        let err = RainRenderer::new(bad, ScriptedRandom::constant(0.5)).unwrap_err();
        assert_eq!(err, SettingsError::EmptyAlphabet);
    }

    #[test]
    fn test_initialize_sets_every_column_to_one() {
        let mut rain = renderer(settings(), ScriptedRandom::constant(0.5));
        let mut canvas = RecordingCanvas::default();
        rain.initialize(Viewport::new(1920, 1080), &mut canvas);

        assert_eq!(rain.surface(), SurfaceSize::new(480, 270));
        assert_eq!(rain.column_count(), 30);
        assert_eq!(rain.columns(), vec![1; 30].as_slice());
        assert_eq!(canvas.ops, vec![DrawOp::Resize(SurfaceSize::new(480, 270))]);
    }

    #[test]
    fn test_paint_fades_then_draws_one_glyph_per_column() {
        let mut rain = renderer(settings(), ScriptedRandom::constant(0.5));
        let mut canvas = RecordingCanvas::default();
        rain.initialize(viewport(3, 4), &mut canvas);
        canvas.ops.clear();

        rain.paint(&mut canvas);

        assert_eq!(
            canvas.ops[0],
            DrawOp::Rect {
                x: 0,
                y: 0,
                width: 48,
                height: 64,
                paint: Rgba::BLACK.with_alpha(0.05),
            }
        );
        // 0.5 * 4 glyphs picks 'C'.
        assert_eq!(canvas.texts(), vec![('C', 0, 16), ('C', 16, 16), ('C', 32, 16)]);
        assert!(canvas.ops[1..].iter().all(|op| matches!(
            op,
            DrawOp::Text {
                font_size: 16,
                paint,
                ..
            } if *paint == Rgba::opaque(0, 255, 0)
        )));
    }

    #[test]
    fn test_paint_without_resets_advances_every_column() {
        let mut settings = settings();
        settings.reset_threshold = 1.0;
        let mut rain = renderer(settings, ScriptedRandom::new([0.1, 0.9, 0.999, 0.4]));
        let mut canvas = RecordingCanvas::default();
        rain.initialize(viewport(5, 2), &mut canvas);

        let before = rain.columns().to_vec();
        for _ in 0..50 {
            rain.paint(&mut canvas);
        }
        let expected: Vec<i32> = before.iter().map(|v| v + 50).collect();
        assert_eq!(rain.columns(), expected.as_slice());
    }

    #[test]
    fn test_column_past_bottom_resets_when_draw_exceeds_threshold() {
        let mut settings = settings();
        settings.reset_threshold = 0.0;
        let mut rain = renderer(settings, ScriptedRandom::constant(0.99));
        let mut canvas = RecordingCanvas::default();
        // Surface 16x32: one column, two rows.
        rain.initialize(Viewport::new(64, 128), &mut canvas);

        rain.paint(&mut canvas); // draws row 1, moves to 2
        rain.paint(&mut canvas); // draws row 2 (y=32, on the edge), moves to 3
        assert_eq!(rain.columns(), &[3]);

        canvas.ops.clear();
        rain.paint(&mut canvas); // y=48 is past the bottom: reset to 0, then advance
        assert_eq!(canvas.texts(), vec![('D', 0, 48)]);
        assert_eq!(rain.columns(), &[1]);

        canvas.ops.clear();
        rain.paint(&mut canvas);
        assert_eq!(canvas.texts(), vec![('D', 0, 16)]);
    }

    #[test]
    fn test_reset_draw_only_happens_past_bottom() {
        let mut rain = renderer(settings(), ScriptedRandom::new([0.0, 0.99]));
        let mut canvas = RecordingCanvas::default();
        rain.initialize(Viewport::new(64, 64 * 10), &mut canvas);

        // Above the bottom each paint consumes exactly one sample (the glyph),
        // so the glyph pick alternates between the two scripted values.
        for _ in 0..4 {
            rain.paint(&mut canvas);
        }
        let glyphs: String = canvas.texts().iter().map(|(g, _, _)| *g).collect();
        assert_eq!(glyphs, "ADAD");
        assert_eq!(rain.columns(), &[5]);
    }

    #[test]
    fn test_reset_is_staggered_by_randomness() {
        let mut settings = settings();
        settings.alphabet = "A".to_string();
        // Samples: two glyphs, then glyph and reset draw for each column.
        let samples = [0.0, 0.0, 0.0, 0.5, 0.0, 0.99];
        let mut rain = renderer(settings, ScriptedRandom::new(samples));
        let mut canvas = RecordingCanvas::default();
        rain.initialize(Viewport::new(128, 64), &mut canvas);
        rain.paint(&mut canvas);
        // Surface is 32x16, so y=32 on the second paint is past the bottom.
        rain.paint(&mut canvas);
        assert_eq!(rain.columns(), &[3, 1]);
    }

    #[test]
    fn test_fixed_random_source_is_reproducible() {
        fn run() -> Vec<DrawOp> {
            let rng = ScriptedRandom::new([0.13, 0.72, 0.981, 0.05, 0.44, 0.99, 0.31]);
            let mut rain = renderer(settings(), rng);
            let mut canvas = RecordingCanvas::default();
            rain.initialize(viewport(4, 1), &mut canvas);
            for _ in 0..12 {
                rain.paint(&mut canvas);
            }
            canvas.ops
        }

        let first = run();
        assert_eq!(first, run());
        // Golden prefix: glyph picks follow the scripted samples.
        let texts: Vec<(char, i64, i64)> = first
            .iter()
            .filter_map(|op| match op {
                DrawOp::Text { glyph, x, y, .. } => Some((*glyph, *x, *y)),
                _ => None,
            })
            .take(4)
            .collect();
        assert_eq!(
            texts,
            vec![('A', 0, 16), ('C', 16, 16), ('D', 32, 16), ('A', 48, 16)]
        );
    }

    #[test]
    fn test_seeded_generator_is_reproducible() {
        let run = || {
            let mut rain = RainRenderer::new(settings(), SmallRandom::seeded(42)).unwrap();
            let mut canvas = GlyphCanvas::new(16);
            rain.initialize(viewport(8, 2), &mut canvas);
            for _ in 0..40 {
                rain.paint(&mut canvas);
            }
            (rain.columns().to_vec(), canvas.lit_cells())
        };
        assert_eq!(run(), run());
    }

    #[test]
    fn test_resize_growth_keeps_old_columns_and_staggers_new_ones() {
        let mut rain = renderer(settings(), ScriptedRandom::new([0.0, 0.37, 0.999_999]));
        let mut canvas = RecordingCanvas::default();
        rain.initialize(viewport(3, 4), &mut canvas);
        for _ in 0..5 {
            rain.paint(&mut canvas);
        }
        let before = rain.columns().to_vec();

        rain.on_resize(viewport(7, 4), &mut canvas);

        let columns = rain.columns();
        assert_eq!(columns.len(), 7);
        assert_eq!(&columns[..3], before.as_slice());
        assert!(columns[3..].iter().all(|v| (-100..=-1).contains(v)));
    }

    #[test]
    fn test_resize_shrink_truncates() {
        let mut rain = renderer(settings(), ScriptedRandom::constant(0.3));
        let mut canvas = RecordingCanvas::default();
        rain.initialize(viewport(6, 4), &mut canvas);
        for _ in 0..3 {
            rain.paint(&mut canvas);
        }
        let before = rain.columns().to_vec();

        rain.on_resize(viewport(2, 4), &mut canvas);

        assert_eq!(rain.columns(), &before[..2]);
        assert_eq!(rain.column_count(), 2);
    }

    #[test]
    fn test_reset_mode_restarts_every_column() {
        let settings = RainSettings {
            resize_mode: ResizeMode::Reset,
            ..settings()
        };
        let mut rain = renderer(settings, ScriptedRandom::constant(0.3));
        let mut canvas = RecordingCanvas::default();
        rain.initialize(viewport(3, 4), &mut canvas);
        rain.paint(&mut canvas);

        rain.on_resize(viewport(5, 4), &mut canvas);
        assert_eq!(rain.columns(), &[1, 1, 1, 1, 1]);
    }

    #[test]
    fn test_tick_requests_next_frame_and_throttles() {
        let mut rain = renderer(settings(), ScriptedRandom::constant(0.5));
        let mut canvas = RecordingCanvas::default();
        let mut scheduler = CountingScheduler::default();
        rain.initialize(viewport(2, 2), &mut canvas);

        assert!(!rain.tick(16 * MS, &mut canvas, &mut scheduler));
        assert!(!rain.tick(33 * MS, &mut canvas, &mut scheduler));
        assert!(rain.tick(66 * MS, &mut canvas, &mut scheduler));
        assert!(!rain.tick(83 * MS, &mut canvas, &mut scheduler));

        assert_eq!(scheduler.frames, 4);
        assert_eq!(rain.columns(), &[2, 2]);
    }

    #[test]
    fn test_fixed_delay_pacing_paints_every_tick() {
        let settings = RainSettings {
            pacing: FramePacing::FixedDelay { interval_ms: 30 },
            ..settings()
        };
        let mut rain = renderer(settings, ScriptedRandom::constant(0.5));
        let mut canvas = RecordingCanvas::default();
        let mut scheduler = CountingScheduler::default();
        rain.initialize(viewport(2, 2), &mut canvas);

        for frame in 1..=3u32 {
            assert!(rain.tick(frame * 30 * MS, &mut canvas, &mut scheduler));
        }
        assert_eq!(rain.columns(), &[4, 4]);
    }

    #[test]
    fn test_notify_resize_arms_debounce_delay() {
        let rain = renderer(settings(), ScriptedRandom::constant(0.5));
        let mut scheduler = CountingScheduler::default();
        rain.notify_resize(&mut scheduler);
        rain.notify_resize(&mut scheduler);
        assert_eq!(scheduler.quiet, vec![200 * MS, 200 * MS]);
    }

    #[test]
    fn test_resize_burst_recomputes_once() {
        let mut rain = renderer(settings(), ScriptedRandom::constant(0.5));
        let mut canvas = RecordingCanvas::default();
        let mut scheduler = LoopScheduler::new(16 * MS);
        rain.initialize(viewport(2, 2), &mut canvas);
        canvas.ops.clear();

        let mut recomputes = 0;
        for step in 0..20u32 {
            let now = step * 15 * MS;
            scheduler.advance_to(now);
            rain.notify_resize(&mut scheduler);
            while let Some(wake) = scheduler.poll(now) {
                if wake == Wake::Quiet {
                    recomputes += 1;
                }
            }
        }
        while let Some(wake) = scheduler.poll(Duration::from_secs(5)) {
            if wake == Wake::Quiet {
                recomputes += 1;
                rain.on_resize(viewport(4, 2), &mut canvas);
            }
        }

        assert_eq!(recomputes, 1);
        assert_eq!(canvas.ops, vec![DrawOp::Resize(SurfaceSize::new(64, 32))]);
        assert_eq!(rain.columns().len(), 4);
    }

    #[test]
    fn test_set_color_changes_paint() {
        let mut rain = renderer(settings(), ScriptedRandom::constant(0.5));
        let mut canvas = RecordingCanvas::default();
        rain.initialize(viewport(1, 1), &mut canvas);
        rain.set_color(RainColor::Amber);
        rain.paint(&mut canvas);
        assert!(matches!(
            canvas.ops.last(),
            Some(DrawOp::Text { paint, .. }) if *paint == Rgba::opaque(255, 176, 0)
        ));
        assert_eq!(rain.color(), RainColor::Amber);
    }

    #[test]
    fn test_paint_lights_glyph_canvas() {
        let mut rain = RainRenderer::new(settings(), SmallRandom::seeded(1)).unwrap();
        let mut canvas = GlyphCanvas::new(16);
        rain.initialize(viewport(4, 4), &mut canvas);
        rain.paint(&mut canvas);
        assert_eq!(canvas.lit_cells(), 4);
        assert!((0..4).all(|col| canvas.cell(col, 0).is_some_and(|c| c.is_lit())));
    }

    proptest! {
        #[test]
        fn column_count_tracks_surface_width(
            widths in prop::collection::vec(0u32..4000, 1..12),
            seed in any::<u64>(),
        ) {
            let mut rain = RainRenderer::new(settings(), SmallRandom::seeded(seed)).unwrap();
            let mut canvas = RecordingCanvas::default();
            rain.initialize(Viewport::new(widths[0], 600), &mut canvas);
            for width in &widths[1..] {
                rain.paint(&mut canvas);
                let before = rain.columns().to_vec();
                rain.on_resize(Viewport::new(*width, 600), &mut canvas);

                let count = (rain.surface().width / 16) as usize;
                prop_assert_eq!(rain.columns().len(), count);
                let kept = before.len().min(count);
                prop_assert_eq!(&rain.columns()[..kept], &before[..kept]);
                for value in &rain.columns()[kept..] {
                    prop_assert!((-100..=-1).contains(value));
                }
            }
        }

        #[test]
        fn drops_fall_one_row_per_paint_without_resets(
            paints in 1usize..60,
            seed in any::<u64>(),
        ) {
            let settings = RainSettings { reset_threshold: 1.0, ..settings() };
            let mut rain = RainRenderer::new(settings, SmallRandom::seeded(seed)).unwrap();
            let mut canvas = RecordingCanvas::default();
            rain.initialize(viewport(6, 1), &mut canvas);
            rain.on_resize(viewport(9, 1), &mut canvas);
            let before = rain.columns().to_vec();
            for _ in 0..paints {
                rain.paint(&mut canvas);
            }
            for (after, before) in rain.columns().iter().zip(&before) {
                prop_assert_eq!(*after, before + paints as i32);
            }
        }
    }
}
