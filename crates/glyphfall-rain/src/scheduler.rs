//! Host scheduling primitives.

use std::time::Duration;

/// Callback scheduling offered by the host.
pub trait Scheduler {
    /// Ask for a frame callback on the next display frame. Requests made
    /// while one is already pending collapse into it.
    fn schedule_frame(&mut self);

    /// Arm the quiet timer to fire once `delay` from now, replacing any
    /// earlier arming.
    fn schedule_after_quiet(&mut self, delay: Duration);
}

/// A callback that is due.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Wake {
    Frame,
    Quiet,
}

/// Polled scheduler for a single-threaded event loop.
///
/// The host advances it with a monotonic timestamp and drains due wakes
/// with [`LoopScheduler::poll`]. [`LoopScheduler::next_deadline`] tells the
/// host how long it may block waiting for input.
#[derive(Debug, Clone)]
pub struct LoopScheduler {
    frame_period: Duration,
    now: Duration,
    frame_requested: bool,
    next_frame_at: Duration,
    quiet_deadline: Option<Duration>,
}

impl LoopScheduler {
    pub fn new(frame_period: Duration) -> Self {
        Self {
            frame_period,
            now: Duration::ZERO,
            frame_requested: false,
            next_frame_at: Duration::ZERO,
            quiet_deadline: None,
        }
    }

    /// Move the clock forward. Time never runs backwards.
    pub fn advance_to(&mut self, now: Duration) {
        self.now = self.now.max(now);
    }

    /// Advance to `now` and pop the next due wake, quiet timer first.
    pub fn poll(&mut self, now: Duration) -> Option<Wake> {
        self.advance_to(now);
        if self.quiet_deadline.is_some_and(|at| at <= self.now) {
            self.quiet_deadline = None;
            return Some(Wake::Quiet);
        }
        if self.frame_requested && self.next_frame_at <= self.now {
            self.frame_requested = false;
            self.next_frame_at += self.frame_period;
            if self.next_frame_at <= self.now {
                self.next_frame_at = self.now + self.frame_period;
            }
            return Some(Wake::Frame);
        }
        None
    }

    /// Earliest time a wake becomes due, if any is pending.
    pub fn next_deadline(&self) -> Option<Duration> {
        let frame = self.frame_requested.then_some(self.next_frame_at);
        match (frame, self.quiet_deadline) {
            (Some(a), Some(b)) => Some(a.min(b)),
            (a, b) => a.or(b),
        }
    }

    pub fn frame_pending(&self) -> bool {
        self.frame_requested
    }

    pub fn quiet_pending(&self) -> bool {
        self.quiet_deadline.is_some()
    }
}

impl Scheduler for LoopScheduler {
    fn schedule_frame(&mut self) {
        self.frame_requested = true;
    }

    fn schedule_after_quiet(&mut self, delay: Duration) {
        self.quiet_deadline = Some(self.now + delay);
    }
}
