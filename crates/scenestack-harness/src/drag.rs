#![forbid(unsafe_code)]

//! Scripted pointer drags.
//!
//! A [`DragScript`] replays a touch the way a platform responder system
//! would: touch start, responder negotiation on each move until the
//! navigator claims the touch, then moves and a release.

use scenestack_core::{GestureState, Spring};
use scenestack_nav::{GestureAction, Navigator, Result, Route, SceneHost};

/// A touch that goes down at one point and moves through offsets.
#[derive(Debug, Clone, PartialEq)]
pub struct DragScript {
    origin: GestureState,
    offsets: Vec<(f64, f64)>,
    release_velocity: (f64, f64),
}

/// What happened when a script was performed.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DragOutcome {
    /// Gesture attached when the pointer lifted.
    pub gesture: Option<GestureAction>,
    /// Whether the navigator held the responder.
    pub claimed: bool,
    /// Spring value just before release.
    pub progress_at_release: f64,
}

impl DragScript {
    /// Touch down at `(x, y)`.
    #[must_use]
    pub fn from(x: f64, y: f64) -> Self {
        Self {
            origin: GestureState::at(x, y),
            offsets: Vec::new(),
            release_velocity: (0.0, 0.0),
        }
    }

    /// Move to `(dx, dy)` from the touch origin.
    #[must_use]
    pub fn to(mut self, dx: f64, dy: f64) -> Self {
        self.offsets.push((dx, dy));
        self
    }

    /// Move to `(dx, dy)` in `steps` evenly spaced samples.
    #[must_use]
    pub fn glide(mut self, dx: f64, dy: f64, steps: u32) -> Self {
        let (sx, sy) = self.offsets.last().copied().unwrap_or((0.0, 0.0));
        let steps = steps.max(1);
        for step in 1..=steps {
            let t = f64::from(step) / f64::from(steps);
            self.offsets.push((sx + (dx - sx) * t, sy + (dy - sy) * t));
        }
        self
    }

    /// Pointer velocity reported with the release.
    #[must_use]
    pub fn release_with_velocity(mut self, vx: f64, vy: f64) -> Self {
        self.release_velocity = (vx, vy);
        self
    }

    /// Move samples in order.
    #[must_use]
    pub fn samples(&self) -> Vec<GestureState> {
        self.offsets
            .iter()
            .map(|&(dx, dy)| self.origin.moved_by(dx, dy))
            .collect()
    }

    /// The sample delivered with the release.
    #[must_use]
    pub fn release_sample(&self) -> GestureState {
        let (dx, dy) = self.offsets.last().copied().unwrap_or((0.0, 0.0));
        let (vx, vy) = self.release_velocity;
        self.origin.moved_by(dx, dy).with_velocity(vx, vy)
    }

    /// Deliver every move but do not lift the pointer.
    pub fn hold<R: Route, H: SceneHost, S: Spring>(
        &self,
        nav: &mut Navigator<R, H, S>,
    ) -> Result<bool> {
        nav.touch_start();
        // A navigator mid-transition captures the touch before negotiation.
        let mut claimed = nav.should_capture_touch_start();
        for sample in self.samples() {
            if claimed {
                nav.responder_move(&sample);
            } else if nav.move_should_set_responder(&sample) {
                nav.responder_grant()?;
                claimed = true;
            }
        }
        tracing::trace!(claimed, gesture = ?nav.active_gesture(), "drag held");
        Ok(claimed)
    }

    /// Deliver the whole touch, release included.
    pub fn perform<R: Route, H: SceneHost, S: Spring>(
        &self,
        nav: &mut Navigator<R, H, S>,
    ) -> Result<DragOutcome> {
        let claimed = self.hold(nav)?;
        let outcome = DragOutcome {
            gesture: nav.active_gesture(),
            claimed,
            progress_at_release: nav.spring_value(),
        };
        if claimed {
            nav.responder_release(&self.release_sample())?;
        }
        Ok(outcome)
    }

    /// Deliver the moves, then have another responder take the touch.
    pub fn interrupt<R: Route, H: SceneHost, S: Spring>(
        &self,
        nav: &mut Navigator<R, H, S>,
    ) -> Result<bool> {
        let claimed = self.hold(nav)?;
        if claimed {
            nav.responder_terminate()?;
        }
        Ok(claimed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn glide_interpolates_from_last_offset() {
        let script = DragScript::from(10.0, 20.0).to(2.0, 0.0).glide(12.0, 0.0, 2);
        let xs: Vec<f64> = script.samples().iter().map(|s| s.dx).collect();
        assert_eq!(xs, [2.0, 7.0, 12.0]);
        assert_eq!(script.samples()[2].move_x, 22.0);
    }

    #[test]
    fn release_carries_velocity_and_last_offset() {
        let release = DragScript::from(0.0, 0.0)
            .to(5.0, 1.0)
            .release_with_velocity(-1.5, 0.0)
            .release_sample();
        assert_eq!((release.dx, release.dy), (5.0, 1.0));
        assert_eq!(release.vx, -1.5);
    }
}
