#![forbid(unsafe_code)]

//! Per-scene animation and gesture configuration.
//!
//! Each route gets a [`SceneConfig`] from the navigator's scene configurator.
//! The config decides the spring constants and default velocity of
//! transitions involving the scene, which drag gestures the scene accepts
//! while presented, and how the scene is styled while it enters or leaves.
//!
//! # Presets
//!
//! | Preset | Gestures | Interpolator |
//! |--------|----------|--------------|
//! | [`SceneConfig::push_from_right`] | pop, left-to-right from the left edge | [`Transition::push_from_right`] |
//! | [`SceneConfig::float_from_right`] | pop, left-to-right from the left edge | [`Transition::float_from_right`] |
//! | [`SceneConfig::float_from_left`] | pop, right-to-left from the right edge | [`Transition::float_from_left`] |
//! | [`SceneConfig::float_from_bottom`] | pop, top-to-bottom from the top band | [`Transition::float_from_bottom`] |
//! | [`SceneConfig::fade`] | none | [`Transition::fade`] |
//! | [`SceneConfig::horizontal_swipe_jump`] | jump back / forward, anywhere, detachable | [`Transition::push_from_right`] |
//! | [`SceneConfig::vertical_up_swipe_jump`] | jump back / forward, anywhere, detachable | [`Transition::push_from_bottom`] |

use std::fmt;
use std::rc::Rc;

use scenestack_core::{Direction, SpringConfig, Stage};
use scenestack_style::{SceneInterpolator, Transition};

/// Navigational action a drag gesture can request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "kebab-case"))]
pub enum GestureAction {
    Pop,
    JumpBack,
    JumpForward,
}

impl GestureAction {
    /// Every action, in matching priority order.
    pub const ALL: [GestureAction; 3] = [Self::Pop, Self::JumpBack, Self::JumpForward];

    /// Stack offset of the scene this action reveals.
    #[inline]
    #[must_use]
    pub const fn delta(self) -> isize {
        match self {
            Self::Pop | Self::JumpBack => -1,
            Self::JumpForward => 1,
        }
    }
}

/// Rubber-band friction applied when dragging past either end of the stack.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct OverswipeConfig {
    pub friction_constant: f64,
    pub friction_by_distance: f64,
}

impl Default for OverswipeConfig {
    fn default() -> Self {
        Self {
            friction_constant: 1.0,
            friction_by_distance: 1.5,
        }
    }
}

/// Recognition and release tuning for one drag gesture.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GestureConfig {
    /// Travel direction that advances the gesture.
    pub direction: Direction,
    /// Width of the band, measured from the leading edge, a drag must be in
    /// to be recognized. `None` accepts drags anywhere.
    pub edge_hit_width: Option<f64>,
    /// Travel needed before the drag is recognized.
    pub gesture_detect_movement: f64,
    /// Travel at which progress reaches 1.
    pub full_distance: f64,
    /// Minimum ratio of along-axis to cross-axis travel.
    pub direction_ratio: f64,
    /// Velocity substituted on a release that is "not moving".
    pub snap_velocity: f64,
    /// Release speed below which the drag counts as not moving.
    pub not_moving: f64,
    /// Fraction of `full_distance` a still release must pass to commit.
    pub still_completion_ratio: f64,
    /// Whether dragging back past the start lets go of the gesture.
    pub is_detachable: bool,
    /// Friction when the gesture would move past either end of the stack.
    /// `None` refuses to recognize the gesture there.
    pub overswipe: Option<OverswipeConfig>,
}

impl GestureConfig {
    /// Left-to-right drag from the left edge spanning the stage width.
    #[must_use]
    pub fn left_to_right(stage: Stage) -> Self {
        Self {
            direction: Direction::LeftToRight,
            edge_hit_width: Some(30.0),
            gesture_detect_movement: 2.0,
            full_distance: stage.width,
            direction_ratio: 0.66,
            snap_velocity: 2.0,
            not_moving: 0.3,
            still_completion_ratio: 3.0 / 5.0,
            is_detachable: false,
            overswipe: None,
        }
    }

    /// Right-to-left drag from the right edge spanning the stage width.
    #[must_use]
    pub fn right_to_left(stage: Stage) -> Self {
        Self::left_to_right(stage).with_direction(Direction::RightToLeft)
    }

    /// Top-to-bottom drag spanning the stage height.
    #[must_use]
    pub fn top_to_bottom(stage: Stage) -> Self {
        Self::left_to_right(stage)
            .with_direction(Direction::TopToBottom)
            .with_full_distance(stage.height)
    }

    /// Bottom-to-top drag spanning the stage height.
    #[must_use]
    pub fn bottom_to_top(stage: Stage) -> Self {
        Self::top_to_bottom(stage).with_direction(Direction::BottomToTop)
    }

    #[must_use]
    pub fn with_direction(mut self, direction: Direction) -> Self {
        self.direction = direction;
        self
    }

    #[must_use]
    pub fn with_edge_hit_width(mut self, width: Option<f64>) -> Self {
        self.edge_hit_width = width;
        self
    }

    #[must_use]
    pub fn with_full_distance(mut self, distance: f64) -> Self {
        self.full_distance = distance;
        self
    }

    #[must_use]
    pub fn with_overswipe(mut self, overswipe: Option<OverswipeConfig>) -> Self {
        self.overswipe = overswipe;
        self
    }

    #[must_use]
    pub fn detachable(mut self, is_detachable: bool) -> Self {
        self.is_detachable = is_detachable;
        self
    }

    /// Swipe-to-jump variant: recognized anywhere, rubber-bands at the ends,
    /// and lets go when dragged back past its start.
    #[must_use]
    pub fn swipe_jump(self) -> Self {
        self.with_edge_hit_width(None)
            .with_overswipe(Some(OverswipeConfig::default()))
            .detachable(true)
    }
}

impl Default for GestureConfig {
    fn default() -> Self {
        Self::left_to_right(Stage::default())
    }
}

/// Gestures a scene accepts while presented.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GestureSet {
    pub pop: Option<GestureConfig>,
    pub jump_back: Option<GestureConfig>,
    pub jump_forward: Option<GestureConfig>,
}

impl GestureSet {
    /// A set that accepts no gestures.
    #[must_use]
    pub const fn none() -> Self {
        Self {
            pop: None,
            jump_back: None,
            jump_forward: None,
        }
    }

    #[must_use]
    pub fn get(&self, action: GestureAction) -> Option<&GestureConfig> {
        match action {
            GestureAction::Pop => self.pop.as_ref(),
            GestureAction::JumpBack => self.jump_back.as_ref(),
            GestureAction::JumpForward => self.jump_forward.as_ref(),
        }
    }

    #[must_use]
    pub fn with(mut self, action: GestureAction, config: Option<GestureConfig>) -> Self {
        match action {
            GestureAction::Pop => self.pop = config,
            GestureAction::JumpBack => self.jump_back = config,
            GestureAction::JumpForward => self.jump_forward = config,
        }
        self
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.pop.is_none() && self.jump_back.is_none() && self.jump_forward.is_none()
    }
}

/// Animation and gesture configuration of one scene.
#[derive(Clone)]
pub struct SceneConfig {
    pub spring: SpringConfig,
    /// Spring velocity used when a transition is requested without one.
    pub default_transition_velocity: f64,
    pub gestures: GestureSet,
    pub interpolator: Rc<dyn SceneInterpolator>,
}

impl fmt::Debug for SceneConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SceneConfig")
            .field("spring", &self.spring)
            .field("default_transition_velocity", &self.default_transition_velocity)
            .field("gestures", &self.gestures)
            .finish_non_exhaustive()
    }
}

impl SceneConfig {
    /// Config with the default spring and the given gestures and style.
    pub fn new(gestures: GestureSet, interpolator: impl SceneInterpolator + 'static) -> Self {
        Self {
            spring: SpringConfig::default(),
            default_transition_velocity: 1.5,
            gestures,
            interpolator: Rc::new(interpolator),
        }
    }

    #[must_use]
    pub fn push_from_right(stage: Stage) -> Self {
        Self::new(
            GestureSet::none().with(GestureAction::Pop, Some(GestureConfig::left_to_right(stage))),
            Transition::push_from_right(),
        )
    }

    #[must_use]
    pub fn float_from_right(stage: Stage) -> Self {
        Self::new(
            GestureSet::none().with(GestureAction::Pop, Some(GestureConfig::left_to_right(stage))),
            Transition::float_from_right(),
        )
    }

    #[must_use]
    pub fn float_from_left(stage: Stage) -> Self {
        Self::new(
            GestureSet::none().with(GestureAction::Pop, Some(GestureConfig::right_to_left(stage))),
            Transition::float_from_left(),
        )
    }

    #[must_use]
    pub fn float_from_bottom(stage: Stage) -> Self {
        let pop = GestureConfig::top_to_bottom(stage).with_edge_hit_width(Some(150.0));
        Self::new(
            GestureSet::none().with(GestureAction::Pop, Some(pop)),
            Transition::float_from_bottom(),
        )
    }

    #[must_use]
    pub fn fade() -> Self {
        Self::new(GestureSet::none(), Transition::fade())
    }

    #[must_use]
    pub fn horizontal_swipe_jump(stage: Stage) -> Self {
        Self::new(
            GestureSet::none()
                .with(
                    GestureAction::JumpBack,
                    Some(GestureConfig::left_to_right(stage).swipe_jump()),
                )
                .with(
                    GestureAction::JumpForward,
                    Some(GestureConfig::right_to_left(stage).swipe_jump()),
                ),
            Transition::push_from_right(),
        )
    }

    #[must_use]
    pub fn vertical_up_swipe_jump(stage: Stage) -> Self {
        Self::new(
            GestureSet::none()
                .with(
                    GestureAction::JumpBack,
                    Some(GestureConfig::top_to_bottom(stage).swipe_jump()),
                )
                .with(
                    GestureAction::JumpForward,
                    Some(GestureConfig::bottom_to_top(stage).swipe_jump()),
                ),
            Transition::push_from_bottom(),
        )
    }

    #[must_use]
    pub fn with_spring(mut self, spring: SpringConfig) -> Self {
        self.spring = spring;
        self
    }

    #[must_use]
    pub fn with_default_velocity(mut self, velocity: f64) -> Self {
        self.default_transition_velocity = velocity;
        self
    }

    #[must_use]
    pub fn with_gestures(mut self, gestures: GestureSet) -> Self {
        self.gestures = gestures;
        self
    }

    #[must_use]
    pub fn with_interpolator(mut self, interpolator: impl SceneInterpolator + 'static) -> Self {
        self.interpolator = Rc::new(interpolator);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const STAGE: Stage = Stage::new(320.0, 640.0);

    #[test]
    fn deltas() {
        assert_eq!(GestureAction::Pop.delta(), -1);
        assert_eq!(GestureAction::JumpBack.delta(), -1);
        assert_eq!(GestureAction::JumpForward.delta(), 1);
    }

    #[test]
    fn base_gesture_constants() {
        let g = GestureConfig::left_to_right(STAGE);
        assert_eq!(g.edge_hit_width, Some(30.0));
        assert_eq!(g.gesture_detect_movement, 2.0);
        assert_eq!(g.full_distance, 320.0);
        assert_eq!(g.direction_ratio, 0.66);
        assert_eq!(g.snap_velocity, 2.0);
        assert_eq!(g.not_moving, 0.3);
        assert!((g.still_completion_ratio - 0.6).abs() < 1e-12);
        assert!(!g.is_detachable);
        assert!(g.overswipe.is_none());
    }

    #[test]
    fn vertical_gestures_span_height() {
        assert_eq!(GestureConfig::top_to_bottom(STAGE).full_distance, 640.0);
        assert_eq!(
            GestureConfig::bottom_to_top(STAGE).direction,
            Direction::BottomToTop
        );
    }

    #[test]
    fn push_from_right_only_pops() {
        let config = SceneConfig::push_from_right(STAGE);
        assert!(config.gestures.get(GestureAction::Pop).is_some());
        assert!(config.gestures.get(GestureAction::JumpBack).is_none());
        assert_eq!(config.spring, SpringConfig::new(26.0, 200.0));
        assert_eq!(config.default_transition_velocity, 1.5);
    }

    #[test]
    fn float_from_bottom_uses_wide_top_band() {
        let pop = SceneConfig::float_from_bottom(STAGE).gestures.pop;
        let pop = pop.unwrap_or_default();
        assert_eq!(pop.direction, Direction::TopToBottom);
        assert_eq!(pop.edge_hit_width, Some(150.0));
        assert_eq!(pop.full_distance, 640.0);
    }

    #[test]
    fn fade_has_no_gestures() {
        assert!(SceneConfig::fade().gestures.is_empty());
    }

    #[test]
    fn swipe_jump_gestures_overswipe_and_detach() {
        let config = SceneConfig::horizontal_swipe_jump(STAGE);
        for action in [GestureAction::JumpBack, GestureAction::JumpForward] {
            let g = config.gestures.get(action).copied().unwrap_or_default();
            assert!(g.is_detachable);
            assert!(g.edge_hit_width.is_none());
            assert_eq!(g.overswipe, Some(OverswipeConfig::default()));
        }
        assert!(config.gestures.pop.is_none());
    }

    #[test]
    fn debug_omits_interpolator() {
        let text = format!("{:?}", SceneConfig::fade());
        assert!(text.starts_with("SceneConfig"));
        assert!(text.contains(".."));
    }
}
