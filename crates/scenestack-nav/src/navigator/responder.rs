#![forbid(unsafe_code)]

//! Pointer responder integration.
//!
//! The host forwards its responder negotiation here. A touch starts with
//! [`Navigator::touch_start`]; each move asks
//! [`Navigator::move_should_set_responder`] until a gesture matches, after
//! which the host grants the responder and streams moves and a final release
//! or termination.
//!
//! # Failure Modes
//!
//! | Condition | Behavior |
//! |-----------|----------|
//! | Grant without a matched gesture | `Err(ResponderGrantedUnexpectedly)` |
//! | Release or terminate with no gesture attached | No-op |
//! | Gesture moves while a transition runs | Progress is buffered and chased once the transition settles |

use scenestack_core::{GestureState, Spring};

use super::{Navigator, signed};
use crate::error::{NavigatorError, Result};
use crate::gesture::{
    MatchContext, ReleaseDecision, decide_release, drag_progress, overswipe_friction,
};
use crate::host::SceneHost;
use crate::route::Route;
use crate::scene_config::{GestureAction, GestureConfig, GestureSet};
use crate::transition::Completion;

impl<R: Route, H: SceneHost, S: Spring> Navigator<R, H, S> {
    /// A new touch went down; every gesture becomes eligible again.
    pub fn touch_start(&mut self) {
        self.matcher.reset();
        self.expecting_grant = None;
    }

    /// Whether the navigator claims a touch before scene content sees it.
    ///
    /// True while a transition runs, so scenes cannot be poked mid-flight.
    #[must_use]
    pub fn should_capture_touch_start(&self) -> bool {
        self.state.is_transitioning()
    }

    /// Whether another responder may take over an attached gesture. Never.
    #[must_use]
    pub fn termination_request(&self) -> bool {
        false
    }

    /// Whether this move starts a gesture the navigator should own.
    pub fn move_should_set_responder(&mut self, sample: &GestureState) -> bool {
        let Some(gestures) = self.presented_gestures() else {
            return false;
        };
        let ctx = self.match_context();
        self.expecting_grant = self.matcher.match_eligible(&gestures, sample, &ctx);
        self.expecting_grant.is_some()
    }

    /// The host granted the responder after a positive
    /// [`Navigator::move_should_set_responder`].
    pub fn responder_grant(&mut self) -> Result<()> {
        let action = self
            .expecting_grant
            .take()
            .ok_or(NavigatorError::ResponderGrantedUnexpectedly)?;
        self.attach_gesture(action);
        self.on_animation_start();
        Ok(())
    }

    /// Pointer moved while the navigator holds the responder.
    pub fn responder_move(&mut self, sample: &GestureState) {
        let Some(gestures) = self.presented_gestures() else {
            return;
        };
        if let Some(action) = self.state.active_gesture {
            if let Some(config) = gestures.get(action).copied() {
                self.move_attached(action, &config, sample);
            }
            return;
        }
        let ctx = self.match_context();
        if let Some(action) = self.matcher.match_any(&gestures, sample, &ctx) {
            self.attach_gesture(action);
        }
    }

    /// Pointer lifted; commit or revert the attached gesture.
    pub fn responder_release(&mut self, sample: &GestureState) -> Result<()> {
        let Some(action) = self.state.active_gesture else {
            return Ok(());
        };
        let config = self
            .presented_gestures()
            .and_then(|gestures| gestures.get(action).copied());
        let Some(config) = config else {
            self.detach_gesture();
            return Ok(());
        };

        let value = self.spring.current_value();
        if value == 0.0 && !self.state.is_transitioning() {
            tracing::debug!(?action, "gesture released without progress");
            self.detach_gesture();
            self.spring.set_current_value(0.0);
            return self.complete_transition();
        }

        let presented = self.state.presented_index;
        let dest = signed(presented) + action.delta();
        let overswipe = self.match_context().would_overswipe(action);
        let result = match decide_release(&config, sample, overswipe) {
            ReleaseDecision::Revert { velocity } => {
                if self.state.is_transitioning() {
                    Ok(())
                } else {
                    tracing::debug!(?action, velocity, "gesture reverted");
                    self.start_transition(
                        dest,
                        presented,
                        Some(velocity),
                        Some(1.0 - value),
                        Completion::default(),
                    )
                }
            }
            ReleaseDecision::Commit { velocity } => match usize::try_from(dest) {
                Ok(dest) if dest < self.stack.len() => {
                    tracing::debug!(?action, dest, velocity, "gesture committed");
                    if let Some(route) = self.stack.route(dest).cloned() {
                        self.emit_will_focus(&route);
                    }
                    let completion = if action == GestureAction::Pop {
                        Completion::cleanup(dest, None)
                    } else {
                        Completion::default()
                    };
                    self.transition_to(dest, Some(velocity), completion)
                }
                _ => Ok(()),
            },
        };
        self.detach_gesture();
        result
    }

    /// Another responder took the touch; revert the attached gesture.
    pub fn responder_terminate(&mut self) -> Result<()> {
        let Some(action) = self.state.active_gesture else {
            return Ok(());
        };
        let result = match self.state.gesture_target() {
            Some(from) if !self.state.is_transitioning() => {
                tracing::debug!(?action, "gesture terminated");
                let value = self.spring.current_value();
                self.start_transition(
                    from,
                    self.state.presented_index,
                    None,
                    Some(1.0 - value),
                    Completion::default(),
                )
            }
            _ => Ok(()),
        };
        self.detach_gesture();
        result
    }

    fn move_attached(&mut self, action: GestureAction, config: &GestureConfig, sample: &GestureState) {
        let mut progress = drag_progress(config, sample);
        if progress < 0.0 && config.is_detachable {
            if let Some(to) = self.state.gesture_target() {
                self.transition_between(self.state.presented_as_isize(), to, 0.0);
            }
            let had_pending = self.state.pending_gesture_progress.is_some();
            tracing::debug!(?action, "gesture detached");
            self.detach_gesture();
            if had_pending && !self.state.is_transitioning() {
                self.spring.set_current_value(0.0);
                self.handle_spring_update();
            }
            return;
        }
        if let Some(overswipe) = config.overswipe.as_ref()
            && self.match_context().would_overswipe(action)
        {
            progress = overswipe_friction(progress, overswipe);
        }
        let progress = progress.clamp(0.0, 1.0);
        if self.state.is_transitioning() {
            self.state.pending_gesture_progress = Some(progress);
        } else if self.state.pending_catch_up().is_some() {
            self.state.pending_gesture_progress = Some(progress);
            self.spring.set_end_value(progress);
        } else {
            self.spring.set_current_value(progress);
            self.handle_spring_update();
        }
    }

    fn attach_gesture(&mut self, action: GestureAction) {
        self.state.active_gesture = Some(action);
        tracing::debug!(?action, presented = self.state.presented_index, "gesture attached");
        if let Some(to) = self.state.gesture_target() {
            self.enable_scene(to);
        }
    }

    fn detach_gesture(&mut self) {
        self.state.active_gesture = None;
        self.state.pending_gesture_progress = None;
        self.hide_scenes();
    }

    fn presented_gestures(&self) -> Option<GestureSet> {
        self.stack
            .config(self.state.presented_as_isize())
            .map(|config| config.gestures)
    }

    fn match_context(&self) -> MatchContext {
        MatchContext {
            presented_index: self.state.presented_index,
            stack_len: self.stack.len(),
            stage: self.config.stage,
        }
    }
}
