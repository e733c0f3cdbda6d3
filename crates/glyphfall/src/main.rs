use std::io;
use std::time::{Duration, Instant};

use color_eyre::eyre::eyre;
use crossterm::{
    event::{
        self, DisableMouseCapture, EnableMouseCapture, Event, KeyCode, KeyEvent, KeyEventKind,
        KeyModifiers, MouseButton, MouseEvent, MouseEventKind,
    },
    execute,
    tty::IsTty,
};
use glyphfall_config::Config;
use glyphfall_core::Viewport;
use glyphfall_cursor::{CursorFollower, HoverChange, HoverTracker, InteractiveSelector, Point};
use glyphfall_rain::{
    GlyphCanvas, LoopScheduler, RainRenderer, RainView, Scheduler, SmallRandom, Wake,
};
use ratatui::{DefaultTerminal, Frame, layout::Rect};

mod help;
mod logging;
mod overlay;
mod viewport;

use help::{Action, HelpBar};
use overlay::{CursorOverlay, TerminalCursor};

/// Longest time to block on input when nothing is scheduled.
const IDLE_POLL: Duration = Duration::from_millis(250);

fn main() -> color_eyre::Result<()> {
    color_eyre::install()?;
    let config = Config::load()?;
    logging::init(&config.log)?;

    if !io::stdout().is_tty() {
        return Err(eyre!("glyphfall needs a terminal to draw on"));
    }
    let app = App::new(&config, viewport::measure()?)?;
    tracing::info!(?config, "starting");

    let terminal = ratatui::init();
    let result = execute!(io::stdout(), EnableMouseCapture)
        .map_err(Into::into)
        .and_then(|()| app.run(terminal));
    let _ = execute!(io::stdout(), DisableMouseCapture);
    ratatui::restore();
    result
}

/// The main application which holds the state and logic of the application.
#[derive(Debug)]
pub struct App {
    /// Is the application running?
    running: bool,
    /// Time origin for the scheduler and the frame throttle.
    started: Instant,
    /// Latest measured viewport; applied once resizing settles.
    viewport: Viewport,
    rain: RainRenderer,
    canvas: GlyphCanvas,
    scheduler: LoopScheduler,
    /// Absent when the cursor follower is disabled.
    cursor: Option<CursorFollower<TerminalCursor>>,
    /// Last pointer position, replayed against the hit regions after layout.
    pointer: Option<Point>,
    hover: HoverTracker,
    help: HelpBar,
    /// Does the screen need redrawing?
    dirty: bool,
}

impl App {
    /// Construct a new instance of [`App`].
    pub fn new(config: &Config, viewport: Viewport) -> color_eyre::Result<Self> {
        let rain = RainRenderer::new(config.rain.clone(), SmallRandom::from_os_rng())?;
        let cursor = config.cursor.enabled.then(|| {
            CursorFollower::new(
                TerminalCursor::default(),
                InteractiveSelector::parse(&config.cursor.interactive_selector),
            )
        });
        if let Some(cursor) = &cursor {
            tracing::debug!(selector = %cursor.selector(), "cursor follower enabled");
        }
        Ok(Self {
            running: false,
            started: Instant::now(),
            viewport,
            canvas: GlyphCanvas::new(config.rain.font_size),
            scheduler: LoopScheduler::new(config.rain.frame_period()),
            cursor,
            pointer: None,
            hover: HoverTracker::new(),
            help: HelpBar::new(rain.color()),
            rain,
            dirty: true,
        })
    }

    /// Run the application's main loop.
    pub fn run(mut self, mut terminal: DefaultTerminal) -> color_eyre::Result<()> {
        self.running = true;
        self.rain.initialize(self.viewport, &mut self.canvas);
        self.scheduler.schedule_frame();
        while self.running {
            self.dispatch_wakes(self.started.elapsed());
            if self.dirty {
                terminal.draw(|frame| self.render(frame))?;
                self.dirty = false;
            }
            self.handle_crossterm_events()?;
        }
        Ok(())
    }

    /// Deliver every frame and quiet-timer callback that is due.
    fn dispatch_wakes(&mut self, now: Duration) {
        while let Some(wake) = self.scheduler.poll(now) {
            match wake {
                Wake::Frame => {
                    if self.rain.tick(now, &mut self.canvas, &mut self.scheduler) {
                        self.dirty = true;
                    }
                }
                Wake::Quiet => {
                    self.rain.on_resize(self.viewport, &mut self.canvas);
                    self.dirty = true;
                }
            }
        }
    }

    /// Renders the user interface.
    fn render(&mut self, frame: &mut Frame) {
        let area = frame.area();
        frame.render_widget(RainView::new(&self.canvas), area);

        let bar = self.layout(area);
        frame.render_widget(&self.help, bar);

        if let Some(cursor) = &self.cursor {
            let accent = self.rain.color().color();
            frame.render_widget(CursorOverlay::new(cursor.element(), accent), area);
        }
    }

    /// Place the help bar on the last line and register its hit regions.
    fn layout(&mut self, area: Rect) -> Rect {
        let bar = Rect {
            y: area.bottom().saturating_sub(1),
            height: area.height.min(1),
            ..area
        };
        self.hover.set_regions(self.help.layout(bar));
        if let Some(point) = self.pointer {
            let changes = self.hover.update(point);
            self.apply_hover(&changes);
        }
        bar
    }

    /// Reads the crossterm events and updates the state of [`App`].
    /// Blocks no longer than the next scheduled callback.
    fn handle_crossterm_events(&mut self) -> color_eyre::Result<()> {
        let elapsed = self.started.elapsed();
        let timeout = self
            .scheduler
            .next_deadline()
            .map_or(IDLE_POLL, |at| at.saturating_sub(elapsed).min(IDLE_POLL));
        if event::poll(timeout)? {
            match event::read()? {
                Event::Key(key) if key.kind == KeyEventKind::Press => self.on_key_event(key),
                Event::Mouse(mouse) => self.on_mouse_event(mouse),
                Event::Resize(_, _) => self.on_resize(viewport::measure()?),
                _ => {}
            }
        }
        Ok(())
    }

    /// Handles the key events and updates the state of [`App`].
    fn on_key_event(&mut self, key: KeyEvent) {
        match (key.modifiers, key.code) {
            (_, KeyCode::Esc | KeyCode::Char('q'))
            | (KeyModifiers::CONTROL, KeyCode::Char('c') | KeyCode::Char('C')) => {
                self.apply(Action::Quit)
            }
            (_, KeyCode::Char('c')) => self.apply(Action::CycleColor),
            _ => {}
        }
    }

    fn on_mouse_event(&mut self, mouse: MouseEvent) {
        let point = Point::new(i32::from(mouse.column), i32::from(mouse.row));
        match mouse.kind {
            MouseEventKind::Moved | MouseEventKind::Drag(_) => self.on_pointer_move(point),
            MouseEventKind::Down(MouseButton::Left) => {
                self.on_pointer_move(point);
                let action = self
                    .hover
                    .hit(point)
                    .and_then(|element| self.help.action_for(element.id));
                if let Some(action) = action {
                    self.apply(action);
                }
            }
            _ => {}
        }
    }

    /// Forward a pointer move to the follower, with any hover transitions.
    fn on_pointer_move(&mut self, point: Point) {
        self.pointer = Some(point);
        let changes = self.hover.update(point);
        let Some(cursor) = self.cursor.as_mut() else {
            return;
        };
        cursor.on_pointer_move(point);
        self.apply_hover(&changes);
        self.dirty = true;
    }

    fn apply_hover(&mut self, changes: &[HoverChange]) {
        let Some(cursor) = self.cursor.as_mut() else {
            return;
        };
        for change in changes {
            match change {
                HoverChange::Enter(element) => cursor.on_pointer_enter(element),
                HoverChange::Leave(element) => cursor.on_pointer_leave(element),
            }
        }
    }

    /// Record the new viewport and restart the resize debounce.
    fn on_resize(&mut self, viewport: Viewport) {
        self.viewport = viewport;
        self.scheduler.advance_to(self.started.elapsed());
        self.rain.notify_resize(&mut self.scheduler);
        self.dirty = true;
    }

    fn apply(&mut self, action: Action) {
        match action {
            Action::Quit => self.quit(),
            Action::CycleColor => {
                let color = self.rain.color().next();
                self.rain.set_color(color);
                self.help.set_color(color);
                tracing::info!(color = color.name(), "rain color changed");
            }
        }
        self.dirty = true;
    }

    /// Set running to false to quit the application.
    fn quit(&mut self) {
        self.running = false;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::KeyEventState;
    use glyphfall_core::{CursorSettings, RainColor};

    fn app(config: &Config) -> App {
        let mut app = App::new(config, Viewport::new(640, 384)).unwrap();
        app.running = true;
        app.rain.initialize(app.viewport, &mut app.canvas);
        app.layout(Rect::new(0, 0, 80, 24));
        app
    }

    fn mouse(kind: MouseEventKind, column: u16, row: u16) -> MouseEvent {
        MouseEvent {
            kind,
            column,
            row,
            modifiers: KeyModifiers::NONE,
        }
    }

    fn key(code: KeyCode, modifiers: KeyModifiers) -> KeyEvent {
        KeyEvent {
            code,
            modifiers,
            kind: KeyEventKind::Press,
            state: KeyEventState::NONE,
        }
    }

    /// Column of the first cell of the help entry with element id `id`.
    fn entry_x(app: &App, id: u32) -> u16 {
        let regions = app.help.layout(Rect::new(0, 23, 80, 1));
        let (_, region) = regions
            .iter()
            .find(|(element, _)| element.id.0 == id)
            .unwrap();
        region.x as u16
    }

    #[test]
    fn test_keys_quit_and_cycle_color() {
        let mut app = app(&Config::default());
        app.on_key_event(key(KeyCode::Char('c'), KeyModifiers::NONE));
        assert_eq!(app.rain.color(), RainColor::Cyan);
        assert!(app.running);

        app.on_key_event(key(KeyCode::Char('c'), KeyModifiers::CONTROL));
        assert!(!app.running);
    }

    #[test]
    fn test_pointer_over_button_sets_hover_marker() {
        let mut app = app(&Config::default());
        let x = entry_x(&app, 1);

        app.on_mouse_event(mouse(MouseEventKind::Moved, x, 23));
        let cursor = app.cursor.as_ref().unwrap().element();
        assert_eq!(cursor.position(), Some(Point::new(i32::from(x), 23)));
        assert!(cursor.is_hovering());

        app.on_mouse_event(mouse(MouseEventKind::Moved, 0, 0));
        assert!(!app.cursor.as_ref().unwrap().element().is_hovering());
    }

    #[test]
    fn test_relayout_refreshes_hover_under_still_pointer() {
        let mut app = app(&Config::default());
        let x = entry_x(&app, 1);
        app.on_mouse_event(mouse(MouseEventKind::Moved, x, 23));
        assert!(app.cursor.as_ref().unwrap().element().is_hovering());

        // A wider terminal re-centres the bar away from the pointer.
        app.layout(Rect::new(0, 0, 120, 24));
        assert!(app.hover.hit(Point::new(i32::from(x), 23)).is_none());
        assert!(!app.cursor.as_ref().unwrap().element().is_hovering());

        app.layout(Rect::new(0, 0, 80, 24));
        assert!(app.cursor.as_ref().unwrap().element().is_hovering());
    }

    #[test]
    fn test_status_label_is_not_interactive() {
        let mut app = app(&Config::default());
        let x = entry_x(&app, 3);
        app.on_mouse_event(mouse(MouseEventKind::Moved, x, 23));
        assert!(!app.cursor.as_ref().unwrap().element().is_hovering());
    }

    #[test]
    fn test_clicking_buttons_runs_actions() {
        let mut app = app(&Config::default());
        let color = entry_x(&app, 2);
        app.on_mouse_event(mouse(MouseEventKind::Down(MouseButton::Left), color, 23));
        assert_eq!(app.rain.color(), RainColor::Cyan);

        let quit = entry_x(&app, 1);
        app.on_mouse_event(mouse(MouseEventKind::Down(MouseButton::Left), quit, 23));
        assert!(!app.running);
    }

    #[test]
    fn test_disabled_cursor_still_allows_clicks() {
        let config = Config {
            cursor: CursorSettings {
                enabled: false,
                ..Default::default()
            },
            ..Default::default()
        };
        let mut app = app(&config);
        assert!(app.cursor.is_none());
        let quit = entry_x(&app, 1);
        app.on_mouse_event(mouse(MouseEventKind::Down(MouseButton::Left), quit, 23));
        assert!(!app.running);
    }

    #[test]
    fn test_resize_applies_after_quiet_period() {
        let mut app = app(&Config::default());
        assert_eq!(app.rain.column_count(), 10);

        let base = app.started.elapsed();
        app.on_resize(Viewport::new(1280, 384));
        app.dispatch_wakes(base);
        assert_eq!(app.rain.column_count(), 10);

        app.dispatch_wakes(base + Duration::from_secs(1));
        assert_eq!(app.rain.column_count(), 20);
        assert_eq!(&app.rain.columns()[..10], &[1; 10]);
    }
}
