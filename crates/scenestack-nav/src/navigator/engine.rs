#![forbid(unsafe_code)]

//! Spring runs, settling, and the scene props they produce.

use scenestack_core::Spring;
use scenestack_style::SceneProps;

use super::{Navigator, signed};
use crate::context::FocusEventKind;
use crate::error::{NavigatorError, Result};
use crate::host::SceneHost;
use crate::route::Route;
use crate::transition::{Completion, QueuedTransition};
use crate::visibility::{ScenesInPlay, scene_style};

impl<R: Route, H: SceneHost, S: Spring> Navigator<R, H, S> {
    /// Move to `dest`, now or after the running transition settles.
    pub(super) fn transition_to(
        &mut self,
        dest: usize,
        velocity: Option<f64>,
        completion: Completion,
    ) -> Result<()> {
        if self.state.is_transitioning() {
            // Queued even when `dest` is already the target, so its cleanup
            // runs once the stack gets there.
            self.state.queue.push_back(QueuedTransition {
                dest,
                velocity,
                completion,
            });
            tracing::debug!(dest, queued = self.state.queue.len(), "transition queued");
            return Ok(());
        }
        if dest == self.state.presented_index {
            tracing::debug!(dest, "transition to presented index skipped");
            self.finish(completion);
            return Ok(());
        }
        self.start_transition(
            self.state.presented_as_isize(),
            dest,
            velocity,
            None,
            completion,
        )
    }

    /// Start a spring run from `from` toward `dest`.
    ///
    /// `jump_to` places the spring before it starts, used when reversing a
    /// gesture so the run picks up where the finger left off.
    pub(super) fn start_transition(
        &mut self,
        from: isize,
        dest: usize,
        velocity: Option<f64>,
        jump_to: Option<f64>,
        completion: Completion,
    ) -> Result<()> {
        let Some(config) = self
            .stack
            .config(from)
            .or_else(|| self.stack.config(signed(dest)))
        else {
            return Err(NavigatorError::UnconfiguredScene { index: from });
        };
        let spring_config = config.spring;
        let default_velocity = config.default_transition_velocity;

        self.state.from_index = Some(from);
        self.state.presented_index = dest;
        self.state.completion = Some(completion);
        tracing::debug!(from, to = dest, ?velocity, ?jump_to, "transition started");
        self.on_animation_start();

        if let Some(value) = jump_to {
            self.spring.set_current_value(value);
            self.handle_spring_update();
        }
        self.spring.set_overshoot_clamping_enabled(true);
        *self.spring.config_mut() = spring_config;
        self.spring
            .set_velocity(velocity.filter(|v| *v != 0.0).unwrap_or(default_velocity));
        self.spring.set_end_value(1.0);
        Ok(())
    }

    /// Mirror the spring value into the scenes in play.
    pub(super) fn handle_spring_update(&mut self) {
        let progress = self.spring.current_value();
        let presented = self.state.presented_as_isize();
        if let Some(from) = self.state.from_index {
            self.transition_between(from, presented, progress);
        } else if let Some(to) = self.state.gesture_target() {
            self.transition_between(presented, to, progress);
        }
    }

    pub(super) fn transition_between(&mut self, from: isize, to: isize, progress: f64) {
        tracing::trace!(from, to, progress, "scene progress");
        self.apply_scene_style(from, to, progress, from);
        self.apply_scene_style(from, to, progress, to);
        if let (Ok(from), Ok(to)) = (usize::try_from(from), usize::try_from(to))
            && let Some(bar) = self.navigation_bar.as_mut()
        {
            bar.update_progress(progress, from, to);
        }
    }

    fn apply_scene_style(&mut self, from: isize, to: isize, progress: f64, index: isize) {
        let Ok(slot) = usize::try_from(index) else {
            return;
        };
        if slot >= self.stack.len() {
            return;
        }
        let Some(patch) = scene_style(&self.stack, self.config.stage, from, to, progress, index)
        else {
            return;
        };
        if !patch.is_empty() {
            self.host.set_scene_props(slot, &SceneProps::style(patch));
        }
    }

    /// Handle the spring coming to rest.
    pub(super) fn complete_transition(&mut self) -> Result<()> {
        let value = self.spring.current_value();
        if value != 1.0 && value != 0.0 {
            tracing::trace!(value, "spring caught up with gesture");
            self.state.pending_gesture_progress = None;
            return Ok(());
        }

        self.on_animation_end();
        let presented = self.state.presented_index;
        if let Some(route) = self.did_focus_route(presented) {
            self.emit_did_focus(&route);
        }
        let from = self.state.from_index.take();
        tracing::debug!(presented, ?from, "transition settled");
        self.spring.set_current_value(0.0);
        self.handle_spring_update();
        self.hide_scenes();
        if let Some(completion) = self.state.completion.take() {
            self.finish(completion);
        }

        if let Some(pending) = self.state.pending_catch_up() {
            if let Some(to) = self.state.gesture_target() {
                self.enable_scene(to);
            }
            tracing::debug!(pending, "resuming pending gesture");
            self.spring.set_end_value(pending);
            return Ok(());
        }
        self.run_queue()
    }

    /// Start the next runnable queued transition.
    fn run_queue(&mut self) -> Result<()> {
        let mut missing = None;
        while let Some(next) = self.state.queue.pop_front() {
            let len = self.stack.len();
            if next.dest >= len {
                tracing::warn!(dest = next.dest, len, "queued transition target left the stack");
                missing.get_or_insert(NavigatorError::QueuedRouteMissing {
                    index: next.dest,
                    len,
                });
                continue;
            }
            if next.dest == self.state.presented_index {
                self.finish(next.completion);
                continue;
            }
            tracing::debug!(dest = next.dest, remaining = self.state.queue.len(), "dequeued");
            self.enable_scene(signed(next.dest));
            if let Some(route) = self.stack.route(next.dest).cloned() {
                self.emit_will_focus(&route);
            }
            self.transition_to(next.dest, next.velocity, next.completion)?;
            break;
        }
        match missing {
            Some(err) => Err(err),
            None => Ok(()),
        }
    }

    /// Release scenes and run the callback of a settled operation.
    pub(super) fn finish(&mut self, completion: Completion) {
        if let Some(index) = completion.cleanup_past {
            self.clean_scenes_past(index);
        }
        if let Some(callback) = completion.callback {
            callback();
        }
    }

    fn clean_scenes_past(&mut self, index: usize) {
        if !self.stack.truncate_after(index) {
            return;
        }
        tracing::debug!(kept = index + 1, "released scenes");
        self.sub_route_focus.truncate(index + 1);
        self.forget_removed_routes();
    }

    /// Drop keys and cached scenes of routes no longer in the stack.
    pub(super) fn forget_removed_routes(&mut self) {
        self.keys.retain(self.stack.routes());
        let stack = &self.stack;
        self.rendered.retain(|route, _| stack.index_of(route).is_some());
    }

    pub(super) fn enable_scene(&mut self, index: isize) {
        let Ok(slot) = usize::try_from(index) else {
            return;
        };
        if slot >= self.stack.len() {
            return;
        }
        let transparent =
            self.state.from_index != Some(index) && slot != self.state.presented_index;
        self.host
            .set_scene_props(slot, &SceneProps::enabled(transparent));
    }

    fn disable_scene(&mut self, index: usize) {
        self.host
            .set_scene_props(index, &SceneProps::disabled(self.config.stage));
    }

    /// Disable every scene that is not in play.
    pub(super) fn hide_scenes(&mut self) {
        let in_play = ScenesInPlay {
            presented: self.state.presented_index,
            transition_from: self.state.from_index,
            gesture_to: self.state.gesture_target(),
        };
        for index in in_play.hidden(self.stack.len()) {
            self.disable_scene(index);
        }
    }

    /// Enable the presented scene and disable the rest, with no transition.
    pub(super) fn apply_resting_layout(&mut self) {
        let presented = self.state.presented_index;
        for index in 0..self.stack.len() {
            if index == presented {
                self.host
                    .set_scene_props(index, &SceneProps::enabled(false));
            } else {
                self.disable_scene(index);
            }
        }
    }

    pub(super) fn on_animation_start(&mut self) {
        let presented = self.state.presented_as_isize();
        let (mut from, mut to) = (presented, presented);
        if let Some(source) = self.state.from_index {
            from = source;
        } else if let Some(target) = self.state.gesture_target() {
            to = target;
        }
        if let Some(bar) = self.navigation_bar.as_mut() {
            bar.on_animation_start(from, to);
        }
    }

    fn on_animation_end(&mut self) {
        if let Some(bar) = self.navigation_bar.as_mut() {
            bar.on_animation_end();
        }
    }

    /// Route reported when the scene at `index` gains focus.
    pub(super) fn did_focus_route(&self, index: usize) -> Option<R> {
        self.sub_route_focus
            .get(index)
            .cloned()
            .flatten()
            .or_else(|| self.stack.route(index).cloned())
    }

    pub(super) fn emit_will_focus(&mut self, route: &R) {
        tracing::debug!(?route, "will focus");
        self.context.emit(FocusEventKind::WillFocus, route);
        if let Some(bar) = self.navigation_bar.as_mut() {
            bar.handle_will_focus(route);
        }
        if let Some(hook) = self.on_will_focus.as_mut() {
            hook(route);
        }
    }

    pub(super) fn emit_did_focus(&mut self, route: &R) {
        tracing::debug!(?route, "did focus");
        self.context.emit(FocusEventKind::DidFocus, route);
        if let Some(hook) = self.on_did_focus.as_mut() {
            hook(route);
        }
    }
}
