//! Frame-rate throttling.

use std::time::Duration;

/// Skips paints that arrive sooner than a minimum interval after the last one.
///
/// The last-paint timestamp is snapped back by the overshoot so the average
/// rate stays on target regardless of the host's refresh rate.
#[derive(Debug, Clone)]
pub struct FrameThrottle {
    interval: Option<Duration>,
    last: Duration,
}

impl FrameThrottle {
    /// `None` lets every frame through.
    pub fn new(interval: Option<Duration>) -> Self {
        Self {
            interval,
            last: Duration::ZERO,
        }
    }

    /// Whether a frame at `now` should paint. Records the paint if so.
    pub fn ready(&mut self, now: Duration) -> bool {
        let Some(interval) = self.interval else {
            self.last = now;
            return true;
        };
        let delta = now.saturating_sub(self.last);
        if delta <= interval {
            return false;
        }
        let overshoot = delta.as_nanos() % interval.as_nanos().max(1);
        self.last = now - Duration::from_nanos(overshoot as u64);
        true
    }

    pub fn last_paint(&self) -> Duration {
        self.last
    }
}
