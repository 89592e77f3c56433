#![forbid(unsafe_code)]

//! Drag-gesture recognition and release decisions.
//!
//! The matcher turns raw drag samples into a [`GestureAction`] using the
//! presented scene's [`GestureSet`]. Candidates are tried in priority order
//! (pop, jump back, jump forward) and the first one that passes every check
//! wins:
//!
//! 1. It must not move past either end of the stack unless it has an
//!    overswipe policy.
//! 2. With an edge band configured, the pointer must be inside it, measured
//!    from the stage edge the gesture starts at.
//! 3. It must have travelled at least the detection distance.
//! 4. Its along-axis travel must dominate cross-axis travel by the direction
//!    ratio. A candidate failing only this check is dropped from the eligible
//!    set for the rest of the touch.
//!
//! # Invariants
//!
//! - The eligible set only shrinks between [`GestureMatcher::reset`] calls.
//! - Release velocity handed to the spring is within `[-10, 10]`.

use scenestack_core::{GestureState, Stage};

use crate::scene_config::{GestureAction, GestureConfig, GestureSet, OverswipeConfig};

/// Largest release velocity handed to the spring.
const MAX_RELEASE_VELOCITY: f64 = 10.0;

/// Stack position a gesture is evaluated against.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MatchContext {
    pub presented_index: usize,
    pub stack_len: usize,
    pub stage: Stage,
}

impl MatchContext {
    /// Whether `action` would move past either end of the stack.
    #[must_use]
    pub fn would_overswipe(&self, action: GestureAction) -> bool {
        match action {
            GestureAction::Pop | GestureAction::JumpBack => self.presented_index == 0,
            GestureAction::JumpForward => self.presented_index + 1 >= self.stack_len,
        }
    }
}

/// Gesture matcher with a per-touch eligible set.
#[derive(Debug, Clone)]
pub struct GestureMatcher {
    eligible: Vec<GestureAction>,
}

impl Default for GestureMatcher {
    fn default() -> Self {
        Self::new()
    }
}

impl GestureMatcher {
    #[must_use]
    pub fn new() -> Self {
        Self {
            eligible: GestureAction::ALL.to_vec(),
        }
    }

    /// Make every action eligible again; called when a touch starts.
    pub fn reset(&mut self) {
        self.eligible.clear();
        self.eligible.extend(GestureAction::ALL);
    }

    /// Actions still eligible in this touch.
    #[must_use]
    pub fn eligible(&self) -> &[GestureAction] {
        &self.eligible
    }

    /// Match against the actions still eligible in this touch.
    pub fn match_eligible(
        &mut self,
        gestures: &GestureSet,
        sample: &GestureState,
        ctx: &MatchContext,
    ) -> Option<GestureAction> {
        let candidates = self.eligible.clone();
        self.run(&candidates, gestures, sample, ctx)
    }

    /// Match against every action regardless of eligibility.
    pub fn match_any(
        &mut self,
        gestures: &GestureSet,
        sample: &GestureState,
        ctx: &MatchContext,
    ) -> Option<GestureAction> {
        self.run(&GestureAction::ALL, gestures, sample, ctx)
    }

    fn run(
        &mut self,
        candidates: &[GestureAction],
        gestures: &GestureSet,
        sample: &GestureState,
        ctx: &MatchContext,
    ) -> Option<GestureAction> {
        for &action in candidates {
            let Some(config) = gestures.get(action) else {
                continue;
            };
            match check(action, config, sample, ctx) {
                Check::Match => {
                    tracing::trace!(?action, "gesture matched");
                    return Some(action);
                }
                Check::WrongDirection => {
                    tracing::trace!(?action, "gesture no longer eligible");
                    self.eligible.retain(|a| *a != action);
                }
                Check::Reject => {}
            }
        }
        None
    }
}

enum Check {
    Match,
    Reject,
    WrongDirection,
}

fn check(
    action: GestureAction,
    config: &GestureConfig,
    sample: &GestureState,
    ctx: &MatchContext,
) -> Check {
    if config.overswipe.is_none() && ctx.would_overswipe(action) {
        return Check::Reject;
    }
    let direction = config.direction;
    if let Some(edge) = config.edge_hit_width {
        let band = if direction.is_inverted() {
            let extent = if direction.is_vertical() {
                ctx.stage.height
            } else {
                ctx.stage.width
            };
            -(extent - edge)
        } else {
            edge
        };
        if direction.leading(sample) >= band {
            return Check::Reject;
        }
    }
    let travel = direction.travel(sample);
    if travel < config.gesture_detect_movement {
        return Check::Reject;
    }
    let cross = direction.cross_travel(sample);
    if travel.abs() > cross.abs() * config.direction_ratio {
        Check::Match
    } else {
        Check::WrongDirection
    }
}

/// Progress of an attached gesture before overswipe friction and clamping.
///
/// Zero at the detection distance, one at the full distance; negative once
/// the pointer returns behind the point where the gesture was recognized.
#[must_use]
pub fn drag_progress(config: &GestureConfig, sample: &GestureState) -> f64 {
    let distance = config.direction.travel(sample);
    let span = (config.full_distance - config.gesture_detect_movement).max(f64::EPSILON);
    (distance - config.gesture_detect_movement) / span
}

/// Damp `progress` for a gesture dragging past either end of the stack.
#[must_use]
pub fn overswipe_friction(progress: f64, overswipe: &OverswipeConfig) -> f64 {
    let ratio = 1.0 / (overswipe.friction_constant + progress.abs() * overswipe.friction_by_distance);
    progress * ratio
}

/// Outcome of releasing an attached gesture.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ReleaseDecision {
    /// Spring back to the presented scene with `velocity`.
    Revert { velocity: f64 },
    /// Complete the gesture's navigation with `velocity`.
    Commit { velocity: f64 },
}

/// Decide whether a released gesture commits or reverts.
///
/// Velocity is normalized to the gesture direction and clamped. A release
/// slower than `not_moving` snaps forward if it travelled past
/// `full_distance * still_completion_ratio` and back otherwise. A gesture
/// that would overswipe always reverts.
#[must_use]
pub fn decide_release(
    config: &GestureConfig,
    sample: &GestureState,
    overswipe: bool,
) -> ReleaseDecision {
    let velocity = config.direction.velocity(sample);
    let distance = config.direction.travel(sample);
    let mut transition_velocity = velocity.clamp(-MAX_RELEASE_VELOCITY, MAX_RELEASE_VELOCITY);
    if velocity.abs() < config.not_moving {
        let far_enough = distance > config.full_distance * config.still_completion_ratio;
        transition_velocity = if far_enough {
            config.snap_velocity
        } else {
            -config.snap_velocity
        };
    }
    if transition_velocity < 0.0 || overswipe {
        ReleaseDecision::Revert {
            velocity: -transition_velocity,
        }
    } else {
        ReleaseDecision::Commit {
            velocity: transition_velocity,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scene_config::SceneConfig;
    use scenestack_core::Direction;

    const STAGE: Stage = Stage::new(300.0, 600.0);

    fn ctx(presented_index: usize, stack_len: usize) -> MatchContext {
        MatchContext {
            presented_index,
            stack_len,
            stage: STAGE,
        }
    }

    fn pop_only() -> GestureSet {
        SceneConfig::push_from_right(STAGE).gestures
    }

    #[test]
    fn overswipe_bounds() {
        assert!(ctx(0, 3).would_overswipe(GestureAction::Pop));
        assert!(ctx(0, 3).would_overswipe(GestureAction::JumpBack));
        assert!(!ctx(0, 3).would_overswipe(GestureAction::JumpForward));
        assert!(ctx(2, 3).would_overswipe(GestureAction::JumpForward));
        assert!(!ctx(1, 3).would_overswipe(GestureAction::Pop));
    }

    #[test]
    fn edge_swipe_matches_pop() {
        let mut m = GestureMatcher::new();
        let sample = GestureState::at(5.0, 100.0).moved_by(20.0, 2.0);
        // Pointer is now at x=25, still inside the 30pt band.
        assert_eq!(
            m.match_eligible(&pop_only(), &sample, &ctx(1, 2)),
            Some(GestureAction::Pop)
        );
    }

    #[test]
    fn pointer_outside_edge_band_rejected() {
        let mut m = GestureMatcher::new();
        let sample = GestureState::at(100.0, 100.0).moved_by(20.0, 0.0);
        assert_eq!(m.match_eligible(&pop_only(), &sample, &ctx(1, 2)), None);
        assert_eq!(m.eligible().len(), 3);
    }

    #[test]
    fn below_detection_distance_rejected() {
        let mut m = GestureMatcher::new();
        let sample = GestureState::at(5.0, 100.0).moved_by(1.0, 0.0);
        assert_eq!(m.match_eligible(&pop_only(), &sample, &ctx(1, 2)), None);
    }

    #[test]
    fn pop_at_root_without_overswipe_never_matches() {
        let mut m = GestureMatcher::new();
        let sample = GestureState::at(5.0, 100.0).moved_by(20.0, 0.0);
        assert_eq!(m.match_any(&pop_only(), &sample, &ctx(0, 1)), None);
    }

    #[test]
    fn wrong_direction_removes_candidate_for_the_touch() {
        let mut m = GestureMatcher::new();
        let diagonal = GestureState::at(5.0, 100.0).moved_by(10.0, 20.0);
        assert_eq!(m.match_eligible(&pop_only(), &diagonal, &ctx(1, 2)), None);
        assert_eq!(
            m.eligible(),
            [GestureAction::JumpBack, GestureAction::JumpForward]
        );

        // A later clean horizontal sample in the same touch cannot match pop.
        let clean = GestureState::at(5.0, 100.0).moved_by(20.0, 0.0);
        assert_eq!(m.match_eligible(&pop_only(), &clean, &ctx(1, 2)), None);

        m.reset();
        assert_eq!(
            m.match_eligible(&pop_only(), &clean, &ctx(1, 2)),
            Some(GestureAction::Pop)
        );
    }

    #[test]
    fn inverted_edge_band_measured_from_far_edge() {
        let gestures = SceneConfig::float_from_left(STAGE).gestures;
        let mut m = GestureMatcher::new();
        // Starts at the right edge and moves left.
        let near_right = GestureState::at(295.0, 100.0).moved_by(-20.0, 0.0);
        assert_eq!(
            m.match_eligible(&gestures, &near_right, &ctx(1, 2)),
            Some(GestureAction::Pop)
        );
        let mid = GestureState::at(150.0, 100.0).moved_by(-20.0, 0.0);
        assert_eq!(m.match_eligible(&gestures, &mid, &ctx(1, 2)), None);
    }

    #[test]
    fn swipe_jump_overswipes_and_prefers_jump_back() {
        let gestures = SceneConfig::horizontal_swipe_jump(STAGE).gestures;
        let mut m = GestureMatcher::new();
        let right = GestureState::at(150.0, 100.0).moved_by(40.0, 0.0);
        assert_eq!(
            m.match_any(&gestures, &right, &ctx(0, 3)),
            Some(GestureAction::JumpBack)
        );
        let left = GestureState::at(150.0, 100.0).moved_by(-40.0, 0.0);
        assert_eq!(
            m.match_any(&gestures, &left, &ctx(2, 3)),
            Some(GestureAction::JumpForward)
        );
    }

    #[test]
    fn progress_is_zero_at_detection_and_one_at_full_distance() {
        let config = GestureConfig::left_to_right(STAGE);
        let at_detect = GestureState::at(0.0, 0.0).moved_by(2.0, 0.0);
        let at_full = GestureState::at(0.0, 0.0).moved_by(300.0, 0.0);
        assert_eq!(drag_progress(&config, &at_detect), 0.0);
        assert_eq!(drag_progress(&config, &at_full), 1.0);
        let behind = GestureState::at(0.0, 0.0).moved_by(-10.0, 0.0);
        assert!(drag_progress(&config, &behind) < 0.0);
    }

    #[test]
    fn friction_damps_overswipe() {
        let o = OverswipeConfig::default();
        assert_eq!(overswipe_friction(0.0, &o), 0.0);
        // 0.5 / (1 + 0.75)
        assert!((overswipe_friction(0.5, &o) - 0.5 / 1.75).abs() < 1e-12);
        assert!(overswipe_friction(1.0, &o) < 0.5);
    }

    #[test]
    fn fast_release_commits_with_clamped_velocity() {
        let config = GestureConfig::left_to_right(STAGE);
        let sample = GestureState::at(0.0, 0.0)
            .moved_by(50.0, 0.0)
            .with_velocity(12.0, 0.0);
        assert_eq!(
            decide_release(&config, &sample, false),
            ReleaseDecision::Commit { velocity: 10.0 }
        );
    }

    #[test]
    fn negative_velocity_is_normalized_by_direction() {
        let sample = GestureState::at(0.0, 0.0)
            .moved_by(-200.0, 0.0)
            .with_velocity(-12.0, 0.0);
        let rtl = GestureConfig::right_to_left(STAGE);
        assert_eq!(
            decide_release(&rtl, &sample, false),
            ReleaseDecision::Commit { velocity: 10.0 }
        );
        let ltr = GestureConfig::left_to_right(STAGE);
        assert_eq!(
            decide_release(&ltr, &sample, false),
            ReleaseDecision::Revert { velocity: 10.0 }
        );
    }

    #[test]
    fn still_release_uses_completion_ratio() {
        let config = GestureConfig::left_to_right(STAGE);
        // 60% of 300 is 180.
        let past = GestureState::at(0.0, 0.0).moved_by(181.0, 0.0);
        let short = GestureState::at(0.0, 0.0).moved_by(179.0, 0.0);
        assert_eq!(
            decide_release(&config, &past, false),
            ReleaseDecision::Commit { velocity: 2.0 }
        );
        assert_eq!(
            decide_release(&config, &short, false),
            ReleaseDecision::Revert { velocity: 2.0 }
        );
    }

    #[test]
    fn overswipe_always_reverts() {
        let config = GestureConfig::left_to_right(STAGE).swipe_jump();
        let sample = GestureState::at(0.0, 0.0)
            .moved_by(250.0, 0.0)
            .with_velocity(3.0, 0.0);
        assert_eq!(
            decide_release(&config, &sample, true),
            ReleaseDecision::Revert { velocity: -3.0 }
        );
    }

    #[test]
    fn vertical_gesture_reads_y() {
        let config = GestureConfig::top_to_bottom(STAGE);
        assert_eq!(config.direction, Direction::TopToBottom);
        let sample = GestureState::at(0.0, 0.0).moved_by(0.0, 301.0);
        assert!((drag_progress(&config, &sample) - 0.5).abs() < 1e-12);
    }

    proptest::proptest! {
        #[test]
        fn release_velocity_is_bounded(
            dx in -400.0f64..400.0,
            vx in -50.0f64..50.0,
            overswipe in proptest::bool::ANY,
        ) {
            let config = GestureConfig::left_to_right(STAGE);
            let sample = GestureState::at(0.0, 0.0).moved_by(dx, 0.0).with_velocity(vx, 0.0);
            let v = match decide_release(&config, &sample, overswipe) {
                ReleaseDecision::Revert { velocity } | ReleaseDecision::Commit { velocity } => velocity,
            };
            proptest::prop_assert!(v.abs() <= MAX_RELEASE_VELOCITY);
        }
    }
}
