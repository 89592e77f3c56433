#![forbid(unsafe_code)]

//! Wall-clock frame timing.
//!
//! Hosts that drive the navigator from a real display loop use a
//! [`FrameClock`] to turn "a frame happened" into a bounded `dt`. The first
//! tick yields zero; later ticks yield the elapsed time, capped so that a
//! stalled frame (debugger pause, backgrounded app) cannot fling the spring.

use web_time::{Duration, Instant};

/// Default cap on the elapsed time reported by one tick.
const DEFAULT_MAX_STEP: Duration = Duration::from_millis(64);

/// Frame-to-frame elapsed time tracker.
#[derive(Debug, Clone)]
pub struct FrameClock {
    last: Option<Instant>,
    max_step: Duration,
}

impl Default for FrameClock {
    fn default() -> Self {
        Self::new()
    }
}

impl FrameClock {
    /// Create a clock that has not ticked yet.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            last: None,
            max_step: DEFAULT_MAX_STEP,
        }
    }

    /// Set the largest `dt` a single tick may report.
    #[must_use]
    pub const fn with_max_step(mut self, max_step: Duration) -> Self {
        self.max_step = max_step;
        self
    }

    /// Elapsed time since the previous tick, measured now.
    pub fn tick(&mut self) -> Duration {
        self.tick_at(Instant::now())
    }

    /// Elapsed time since the previous tick, measured at `now`.
    pub fn tick_at(&mut self, now: Instant) -> Duration {
        let dt = self
            .last
            .map(|last| now.saturating_duration_since(last))
            .unwrap_or(Duration::ZERO);
        self.last = Some(now);
        dt.min(self.max_step)
    }

    /// Forget the previous tick so the next one yields zero.
    pub fn reset(&mut self) {
        self.last = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn first_tick_is_zero() {
        let mut clock = FrameClock::new();
        assert_eq!(clock.tick_at(Instant::now()), Duration::ZERO);
    }

    #[test]
    fn reports_elapsed_between_ticks() {
        let mut clock = FrameClock::new();
        let t0 = Instant::now();
        clock.tick_at(t0);
        assert_eq!(
            clock.tick_at(t0 + Duration::from_millis(16)),
            Duration::from_millis(16)
        );
    }

    #[test]
    fn stalled_frames_are_capped() {
        let mut clock = FrameClock::new().with_max_step(Duration::from_millis(32));
        let t0 = Instant::now();
        clock.tick_at(t0);
        assert_eq!(
            clock.tick_at(t0 + Duration::from_secs(3)),
            Duration::from_millis(32)
        );
    }

    #[test]
    fn reset_forgets_previous_tick() {
        let mut clock = FrameClock::new();
        let t0 = Instant::now();
        clock.tick_at(t0);
        clock.reset();
        assert_eq!(clock.tick_at(t0 + Duration::from_millis(20)), Duration::ZERO);
    }
}
