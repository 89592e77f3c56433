#![forbid(unsafe_code)]

//! Progress-to-style interpolation.
//!
//! A transition between two scenes plays one scene *outgoing* and the other
//! *incoming*. A [`SceneInterpolator`] maps a progress value in `[0, 1]` to
//! the style each of them should show at that point: at progress 0 the
//! outgoing scene is fully on stage and the incoming one has not entered, at
//! progress 1 the reverse.
//!
//! [`Transition`] is the data-driven implementation used by every built-in
//! preset; [`FnInterpolator`] wraps arbitrary closures for styles the
//! keyframe model cannot express.
//!
//! # Invariants
//!
//! - Progress outside `[0, 1]` is clamped before sampling.
//! - Translate tweens are fractions of the stage extent along their axis.

use std::fmt;

use scenestack_core::Stage;

use crate::patch::StylePatch;

/// Maps transition progress to a style patch for each side of a transition.
pub trait SceneInterpolator {
    /// Style for the scene leaving the stage.
    fn interpolate_outgoing(&self, progress: f64, stage: Stage) -> StylePatch;

    /// Style for the scene entering the stage.
    fn interpolate_incoming(&self, progress: f64, stage: Stage) -> StylePatch;
}

/// Linear ramp between two values.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Tween {
    pub from: f64,
    pub to: f64,
}

impl Tween {
    #[must_use]
    pub const fn new(from: f64, to: f64) -> Self {
        Self { from, to }
    }

    /// A tween that holds `value` for the whole transition.
    #[must_use]
    pub const fn constant(value: f64) -> Self {
        Self::new(value, value)
    }

    /// Value at `t`, clamped to the ramp's endpoints.
    #[must_use]
    pub fn at(self, t: f64) -> f64 {
        let t = if t.is_nan() { 0.0 } else { t.clamp(0.0, 1.0) };
        self.from * (1.0 - t) + self.to * t
    }
}

/// Tweens for one side of a transition.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Keyframes {
    /// Horizontal offset as a fraction of stage width.
    pub translate_x: Option<Tween>,
    /// Vertical offset as a fraction of stage height.
    pub translate_y: Option<Tween>,
    pub opacity: Option<Tween>,
    pub scale: Option<Tween>,
}

impl Keyframes {
    #[must_use]
    pub const fn new() -> Self {
        Self {
            translate_x: None,
            translate_y: None,
            opacity: None,
            scale: None,
        }
    }

    #[must_use]
    pub const fn translate_x(mut self, from: f64, to: f64) -> Self {
        self.translate_x = Some(Tween::new(from, to));
        self
    }

    #[must_use]
    pub const fn translate_y(mut self, from: f64, to: f64) -> Self {
        self.translate_y = Some(Tween::new(from, to));
        self
    }

    #[must_use]
    pub const fn opacity(mut self, from: f64, to: f64) -> Self {
        self.opacity = Some(Tween::new(from, to));
        self
    }

    #[must_use]
    pub const fn scale(mut self, from: f64, to: f64) -> Self {
        self.scale = Some(Tween::new(from, to));
        self
    }

    /// Sample every tween at `progress`.
    #[must_use]
    pub fn sample(&self, progress: f64, stage: Stage) -> StylePatch {
        StylePatch {
            translate_x: self.translate_x.map(|t| t.at(progress) * stage.width),
            translate_y: self.translate_y.map(|t| t.at(progress) * stage.height),
            opacity: self.opacity.map(|t| t.at(progress)),
            scale: self.scale.map(|t| t.at(progress)),
            ..StylePatch::new()
        }
    }
}

/// Keyframe-driven interpolator.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Transition {
    pub outgoing: Keyframes,
    pub incoming: Keyframes,
}

impl Transition {
    #[must_use]
    pub const fn new(outgoing: Keyframes, incoming: Keyframes) -> Self {
        Self { outgoing, incoming }
    }

    /// New scene slides in from the right, old scene slides out to the left.
    #[must_use]
    pub const fn push_from_right() -> Self {
        Self::new(
            Keyframes::new().translate_x(0.0, -1.0).opacity(1.0, 1.0),
            Keyframes::new().translate_x(1.0, 0.0).opacity(1.0, 1.0),
        )
    }

    /// New scene slides in from the right over an old scene that drifts left
    /// and fades.
    #[must_use]
    pub const fn float_from_right() -> Self {
        Self::new(
            Keyframes::new()
                .translate_x(0.0, -0.3)
                .opacity(1.0, 0.3)
                .scale(1.0, 0.95),
            Keyframes::new().translate_x(1.0, 0.0).opacity(1.0, 1.0),
        )
    }

    /// Mirror of [`Transition::float_from_right`].
    #[must_use]
    pub const fn float_from_left() -> Self {
        Self::new(
            Keyframes::new()
                .translate_x(0.0, 0.3)
                .opacity(1.0, 0.3)
                .scale(1.0, 0.95),
            Keyframes::new().translate_x(-1.0, 0.0).opacity(1.0, 1.0),
        )
    }

    /// New scene rises from the bottom while the old one recedes.
    #[must_use]
    pub const fn float_from_bottom() -> Self {
        Self::new(
            Keyframes::new().opacity(1.0, 0.3).scale(1.0, 0.95),
            Keyframes::new().translate_y(1.0, 0.0).opacity(1.0, 1.0),
        )
    }

    /// Cross-fade in place.
    #[must_use]
    pub const fn fade() -> Self {
        Self::new(
            Keyframes::new().opacity(1.0, 0.0),
            Keyframes::new().opacity(0.0, 1.0),
        )
    }

    /// Vertical counterpart of [`Transition::push_from_right`]: the new scene
    /// comes up from below and pushes the old one off the top.
    #[must_use]
    pub const fn push_from_bottom() -> Self {
        Self::new(
            Keyframes::new().translate_y(0.0, -1.0).opacity(1.0, 1.0),
            Keyframes::new().translate_y(1.0, 0.0).opacity(1.0, 1.0),
        )
    }
}

impl SceneInterpolator for Transition {
    fn interpolate_outgoing(&self, progress: f64, stage: Stage) -> StylePatch {
        self.outgoing.sample(progress, stage)
    }

    fn interpolate_incoming(&self, progress: f64, stage: Stage) -> StylePatch {
        self.incoming.sample(progress, stage)
    }
}

type InterpolateFn = Box<dyn Fn(f64, Stage) -> StylePatch>;

/// Interpolator built from two closures.
pub struct FnInterpolator {
    outgoing: InterpolateFn,
    incoming: InterpolateFn,
}

impl FnInterpolator {
    pub fn new(
        outgoing: impl Fn(f64, Stage) -> StylePatch + 'static,
        incoming: impl Fn(f64, Stage) -> StylePatch + 'static,
    ) -> Self {
        Self {
            outgoing: Box::new(outgoing),
            incoming: Box::new(incoming),
        }
    }
}

impl fmt::Debug for FnInterpolator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FnInterpolator").finish_non_exhaustive()
    }
}

impl SceneInterpolator for FnInterpolator {
    fn interpolate_outgoing(&self, progress: f64, stage: Stage) -> StylePatch {
        (self.outgoing)(progress.clamp(0.0, 1.0), stage)
    }

    fn interpolate_incoming(&self, progress: f64, stage: Stage) -> StylePatch {
        (self.incoming)(progress.clamp(0.0, 1.0), stage)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const STAGE: Stage = Stage::new(400.0, 800.0);

    #[test]
    fn tween_clamps() {
        let t = Tween::new(10.0, 20.0);
        assert_eq!(t.at(-1.0), 10.0);
        assert_eq!(t.at(0.5), 15.0);
        assert_eq!(t.at(2.0), 20.0);
        assert_eq!(t.at(f64::NAN), 10.0);
        assert_eq!(Tween::constant(3.0).at(0.7), 3.0);
    }

    #[test]
    fn push_from_right_endpoints() {
        let t = Transition::push_from_right();
        assert_eq!(t.interpolate_incoming(0.0, STAGE).translate_x, Some(400.0));
        assert_eq!(t.interpolate_incoming(1.0, STAGE).translate_x, Some(0.0));
        assert_eq!(t.interpolate_outgoing(0.0, STAGE).translate_x, Some(0.0));
        assert_eq!(t.interpolate_outgoing(1.0, STAGE).translate_x, Some(-400.0));
    }

    #[test]
    fn float_from_right_fades_outgoing() {
        let out = Transition::float_from_right().interpolate_outgoing(1.0, STAGE);
        assert!((out.translate_x.unwrap_or_default() + 120.0).abs() < 1e-9);
        assert_eq!(out.opacity, Some(0.3));
        assert_eq!(out.scale, Some(0.95));
    }

    #[test]
    fn float_from_bottom_uses_height() {
        let t = Transition::float_from_bottom();
        let incoming = t.interpolate_incoming(0.25, STAGE);
        assert_eq!(incoming.translate_y, Some(600.0));
        assert_eq!(incoming.translate_x, None);
    }

    #[test]
    fn fade_is_complementary() {
        let t = Transition::fade();
        for step in 0..=10 {
            let p = f64::from(step) / 10.0;
            let out = t.interpolate_outgoing(p, STAGE).opacity.unwrap_or(1.0);
            let inc = t.interpolate_incoming(p, STAGE).opacity.unwrap_or(0.0);
            assert!((out + inc - 1.0).abs() < 1e-9);
        }
    }

    #[test]
    fn keyframes_never_touch_layout_edges() {
        let patch = Transition::push_from_bottom().interpolate_incoming(0.5, STAGE);
        assert_eq!(patch.top, None);
        assert_eq!(patch.bottom, None);
        assert_eq!(patch.translate_y, Some(400.0));
    }

    #[test]
    fn fn_interpolator_clamps_progress() {
        let interp = FnInterpolator::new(
            |p, _| StylePatch::new().opacity(1.0 - p),
            |p, stage| StylePatch::new().translate_x(stage.width * (1.0 - p)),
        );
        assert_eq!(interp.interpolate_outgoing(1.5, STAGE).opacity, Some(0.0));
        assert_eq!(
            interp.interpolate_incoming(-0.5, STAGE).translate_x,
            Some(400.0)
        );
    }

    proptest::proptest! {
        #[test]
        fn tween_stays_within_endpoints(
            from in -1000.0f64..1000.0,
            to in -1000.0f64..1000.0,
            t in -2.0f64..3.0,
        ) {
            let v = Tween::new(from, to).at(t);
            let (lo, hi) = if from < to { (from, to) } else { (to, from) };
            proptest::prop_assert!(v >= lo - 1e-9 && v <= hi + 1e-9);
        }
    }
}
