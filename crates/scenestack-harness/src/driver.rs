#![forbid(unsafe_code)]

//! Simulated frame clock.
//!
//! [`FrameDriver`] advances a navigator with a synthetic clock so tests are
//! deterministic: every frame is exactly `frame` long, measured through a
//! [`FrameClock`] the same way a real host would.

use std::fmt;

use scenestack_core::{FrameClock, Spring};
use scenestack_nav::{Navigator, NavigatorError, Route, SceneHost};
use web_time::{Duration, Instant};

/// Default simulated frame length.
pub const FRAME: Duration = Duration::from_millis(16);

/// Frames allowed before a settle is declared stuck.
const DEFAULT_MAX_FRAMES: usize = 10_000;

/// Errors from driving a navigator.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HarnessError {
    /// The navigator was still animating after the frame budget.
    NeverSettled { frames: usize },
    /// The navigator reported an error while advancing.
    Navigator(NavigatorError),
}

impl fmt::Display for HarnessError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NeverSettled { frames } => {
                write!(f, "navigator still animating after {frames} frames")
            }
            Self::Navigator(err) => write!(f, "navigator error: {err}"),
        }
    }
}

impl std::error::Error for HarnessError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Navigator(err) => Some(err),
            Self::NeverSettled { .. } => None,
        }
    }
}

impl From<NavigatorError> for HarnessError {
    fn from(err: NavigatorError) -> Self {
        Self::Navigator(err)
    }
}

/// Fixed-step frame driver.
#[derive(Debug, Clone)]
pub struct FrameDriver {
    frame: Duration,
    max_frames: usize,
    clock: FrameClock,
    now: Instant,
    frames: usize,
}

impl Default for FrameDriver {
    fn default() -> Self {
        Self::new()
    }
}

impl FrameDriver {
    #[must_use]
    pub fn new() -> Self {
        let now = Instant::now();
        let mut clock = FrameClock::new();
        clock.tick_at(now);
        Self {
            frame: FRAME,
            max_frames: DEFAULT_MAX_FRAMES,
            clock,
            now,
            frames: 0,
        }
    }

    /// Use frames of `frame` length. Frames longer than 64ms are still
    /// reported whole.
    #[must_use]
    pub fn with_frame(mut self, frame: Duration) -> Self {
        self.frame = frame;
        self.clock = FrameClock::new().with_max_step(frame.max(Duration::from_millis(64)));
        self.clock.tick_at(self.now);
        self
    }

    #[must_use]
    pub fn with_max_frames(mut self, max_frames: usize) -> Self {
        self.max_frames = max_frames;
        self
    }

    /// Frames driven so far.
    #[must_use]
    pub fn frames(&self) -> usize {
        self.frames
    }

    /// Drive one frame.
    pub fn step<R: Route, H: SceneHost, S: Spring>(
        &mut self,
        nav: &mut Navigator<R, H, S>,
    ) -> Result<(), NavigatorError> {
        self.now += self.frame;
        let dt = self.clock.tick_at(self.now);
        self.frames += 1;
        nav.advance(dt)
    }

    /// Drive exactly `frames` frames.
    pub fn run<R: Route, H: SceneHost, S: Spring>(
        &mut self,
        nav: &mut Navigator<R, H, S>,
        frames: usize,
    ) -> Result<(), NavigatorError> {
        for _ in 0..frames {
            self.step(nav)?;
        }
        Ok(())
    }

    /// Drive until `done` holds; returns the frames it took.
    pub fn run_until<R: Route, H: SceneHost, S: Spring>(
        &mut self,
        nav: &mut Navigator<R, H, S>,
        mut done: impl FnMut(&Navigator<R, H, S>) -> bool,
    ) -> Result<usize, HarnessError> {
        for frame in 0..=self.max_frames {
            if done(nav) {
                return Ok(frame);
            }
            self.step(nav)?;
        }
        tracing::warn!(frames = self.max_frames, "navigator never settled");
        Err(HarnessError::NeverSettled {
            frames: self.max_frames,
        })
    }

    /// Drive until nothing is animating.
    pub fn settle<R: Route, H: SceneHost, S: Spring>(
        &mut self,
        nav: &mut Navigator<R, H, S>,
    ) -> Result<usize, HarnessError> {
        self.run_until(nav, |nav| !nav.is_animating())
    }
}
