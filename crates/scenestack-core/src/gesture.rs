#![forbid(unsafe_code)]

//! Pointer-drag samples and travel directions.
//!
//! A [`GestureState`] is the accumulated state of one pointer drag as the
//! platform's responder system reports it: where the pointer is now, how far
//! it has moved since the touch went down, and its current velocity.
//!
//! [`Direction`] names the travel axis and sense of a configured gesture.
//! Projecting a sample onto a direction yields axis-agnostic quantities:
//! after projection, positive travel always means "toward completing the
//! gesture" regardless of whether the gesture is horizontal or vertical.

/// Accumulated pointer-drag sample.
///
/// Distances are in stage units, velocities in stage units per millisecond.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct GestureState {
    /// Current pointer x position.
    pub move_x: f64,
    /// Current pointer y position.
    pub move_y: f64,
    /// Pointer x position when the touch went down.
    pub x0: f64,
    /// Pointer y position when the touch went down.
    pub y0: f64,
    /// Horizontal distance travelled since the touch went down.
    pub dx: f64,
    /// Vertical distance travelled since the touch went down.
    pub dy: f64,
    /// Current horizontal velocity.
    pub vx: f64,
    /// Current vertical velocity.
    pub vy: f64,
}

impl GestureState {
    /// A sample at rest at `(x, y)`.
    #[must_use]
    pub const fn at(x: f64, y: f64) -> Self {
        Self {
            move_x: x,
            move_y: y,
            x0: x,
            y0: y,
            dx: 0.0,
            dy: 0.0,
            vx: 0.0,
            vy: 0.0,
        }
    }

    /// Move the pointer by `(dx, dy)` relative to the touch origin.
    #[must_use]
    pub fn moved_by(mut self, dx: f64, dy: f64) -> Self {
        self.dx = dx;
        self.dy = dy;
        self.move_x = self.x0 + dx;
        self.move_y = self.y0 + dy;
        self
    }

    /// Set the pointer velocity.
    #[must_use]
    pub fn with_velocity(mut self, vx: f64, vy: f64) -> Self {
        self.vx = vx;
        self.vy = vy;
        self
    }
}

/// Travel direction of a configured gesture.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "kebab-case"))]
pub enum Direction {
    LeftToRight,
    RightToLeft,
    TopToBottom,
    BottomToTop,
}

impl Direction {
    /// Whether travel is along the vertical axis.
    #[inline]
    #[must_use]
    pub const fn is_vertical(self) -> bool {
        matches!(self, Self::TopToBottom | Self::BottomToTop)
    }

    /// Whether travel runs against the axis (right-to-left or bottom-to-top).
    #[inline]
    #[must_use]
    pub const fn is_inverted(self) -> bool {
        matches!(self, Self::RightToLeft | Self::BottomToTop)
    }

    /// Signed pointer position along the travel axis.
    #[must_use]
    pub fn leading(self, sample: &GestureState) -> f64 {
        let loc = if self.is_vertical() {
            sample.move_y
        } else {
            sample.move_x
        };
        self.orient(loc)
    }

    /// Signed distance travelled along the travel axis.
    #[must_use]
    pub fn travel(self, sample: &GestureState) -> f64 {
        let dist = if self.is_vertical() {
            sample.dy
        } else {
            sample.dx
        };
        self.orient(dist)
    }

    /// Signed distance travelled across the travel axis.
    #[must_use]
    pub fn cross_travel(self, sample: &GestureState) -> f64 {
        let dist = if self.is_vertical() {
            sample.dx
        } else {
            sample.dy
        };
        self.orient(dist)
    }

    /// Signed velocity along the travel axis.
    #[must_use]
    pub fn velocity(self, sample: &GestureState) -> f64 {
        let v = if self.is_vertical() {
            sample.vy
        } else {
            sample.vx
        };
        self.orient(v)
    }

    #[inline]
    fn orient(self, value: f64) -> f64 {
        if self.is_inverted() { -value } else { value }
    }
}
