#![forbid(unsafe_code)]

//! Public stack operations.
//!
//! Relative operations (push, pop, jumps) resolve against the target index:
//! the destination of the last queued transition, or the presented index when
//! nothing is queued. Requests made mid-transition therefore compose the way
//! they read.
//!
//! Each operation with a completion has a `*_then` variant taking the
//! callback. Animated operations run it once their transition settles; the
//! rest run it before returning.

use scenestack_core::Spring;

use super::{Navigator, signed};
use crate::error::{NavigatorError, Result};
use crate::host::SceneHost;
use crate::route::Route;
use crate::transition::{Callback, Completion};

impl<R: Route, H: SceneHost, S: Spring> Navigator<R, H, S> {
    /// Animate `route` onto the stack above the target index.
    ///
    /// Routes above the target are discarded, except scenes the running
    /// transition is animating between.
    pub fn push(&mut self, route: R) -> Result<()> {
        self.push_with(route, None)
    }

    pub fn push_then(&mut self, route: R, on_complete: impl FnOnce() + 'static) -> Result<()> {
        self.push_with(route, Some(Box::new(on_complete)))
    }

    fn push_with(&mut self, route: R, callback: Option<Callback>) -> Result<()> {
        let keep = self.push_keep_index();
        let dest = self.stack.push_after(keep, route.clone());
        self.sub_route_focus.truncate(dest);
        self.forget_removed_routes();
        self.keys.key(&route);
        tracing::debug!(dest, ?route, "push");
        self.emit_will_focus(&route);
        self.enable_scene(signed(dest));
        self.transition_to(dest, None, Completion::callback(callback))
    }

    /// Highest index a push may truncate to: the target, raised to cover the
    /// presented scene and the source of a running transition.
    fn push_keep_index(&self) -> usize {
        let from = self
            .state
            .from_index
            .and_then(|from| usize::try_from(from).ok())
            .unwrap_or(0);
        self.state
            .target_index()
            .max(self.state.presented_index)
            .max(from)
    }

    /// Insert `route` at the bottom of the stack without animating.
    ///
    /// Routes above the presented one are discarded and any queued
    /// transitions are dropped.
    pub fn push_to_front(&mut self, route: R) {
        self.push_to_front_with(route, None);
    }

    pub fn push_to_front_then(&mut self, route: R, on_complete: impl FnOnce() + 'static) {
        self.push_to_front_with(route, Some(Box::new(on_complete)));
    }

    fn push_to_front_with(&mut self, route: R, callback: Option<Callback>) {
        let presented = self.state.presented_index;
        self.stack.push_front(presented, route.clone());
        let discarded = self.state.reset(presented + 1);
        if discarded > 0 {
            tracing::debug!(discarded, "pending transitions dropped");
        }
        self.keys.key(&route);
        self.sub_route_focus.clear();
        self.forget_removed_routes();
        self.spring.set_current_value(0.0);
        tracing::debug!(?route, presented = presented + 1, "push to front");
        self.apply_resting_layout();
        if let Some(callback) = callback {
            callback();
        }
    }

    /// Animate back one route. At the root this does nothing.
    pub fn pop(&mut self) -> Result<()> {
        self.pop_with(None)
    }

    pub fn pop_then(&mut self, on_complete: impl FnOnce() + 'static) -> Result<()> {
        self.pop_with(Some(Box::new(on_complete)))
    }

    fn pop_with(&mut self, callback: Option<Callback>) -> Result<()> {
        let target = self.state.target_index();
        if target == 0 {
            tracing::debug!("pop at root ignored");
            if let Some(callback) = callback {
                callback();
            }
            return Ok(());
        }
        self.pop_to_index(target - 1, callback)
    }

    /// Pop back to `route` in one transition, releasing everything above it.
    pub fn pop_to_route(&mut self, route: &R) -> Result<()> {
        self.pop_to_route_with(route, None)
    }

    pub fn pop_to_route_then(
        &mut self,
        route: &R,
        on_complete: impl FnOnce() + 'static,
    ) -> Result<()> {
        self.pop_to_route_with(route, Some(Box::new(on_complete)))
    }

    fn pop_to_route_with(&mut self, route: &R, callback: Option<Callback>) -> Result<()> {
        let index = self
            .stack
            .index_of(route)
            .ok_or(NavigatorError::RouteNotFound {
                operation: "pop_to_route",
            })?;
        let target = self.state.target_index();
        if index > target {
            return Err(NavigatorError::RouteAheadOfTarget { index, target });
        }
        self.pop_n(target - index, callback)
    }

    /// Pop back to the first route.
    pub fn pop_to_top(&mut self) -> Result<()> {
        self.pop_n(self.state.target_index(), None)
    }

    pub fn pop_to_top_then(&mut self, on_complete: impl FnOnce() + 'static) -> Result<()> {
        self.pop_n(self.state.target_index(), Some(Box::new(on_complete)))
    }

    fn pop_n(&mut self, count: usize, callback: Option<Callback>) -> Result<()> {
        let target = self.state.target_index();
        if count > target {
            return Err(NavigatorError::PopBelowZero {
                from: target,
                count,
            });
        }
        if count == 0 {
            if let Some(callback) = callback {
                callback();
            }
            return Ok(());
        }
        self.pop_to_index(target - count, callback)
    }

    fn pop_to_index(&mut self, index: usize, callback: Option<Callback>) -> Result<()> {
        tracing::debug!(to = index, "pop");
        self.enable_scene(signed(index));
        if let Some(route) = self.stack.route(index).cloned() {
            self.emit_will_focus(&route);
        }
        self.transition_to(index, None, Completion::cleanup(index, callback))
    }

    /// Swap the route at `index` without animating.
    ///
    /// Negative indices count from the end. An out-of-range index changes
    /// nothing. Replacing the presented route emits will-focus and
    /// did-focus for the new one.
    pub fn replace_at_index(&mut self, route: R, index: isize) {
        self.replace_at_index_with(route, index, None);
    }

    pub fn replace_at_index_then(
        &mut self,
        route: R,
        index: isize,
        on_complete: impl FnOnce() + 'static,
    ) {
        self.replace_at_index_with(route, index, Some(Box::new(on_complete)));
    }

    fn replace_at_index_with(&mut self, route: R, index: isize, callback: Option<Callback>) {
        match self.stack.resolve(index) {
            Some(slot) => {
                let presented = slot == self.state.presented_index;
                if presented {
                    self.emit_will_focus(&route);
                }
                self.stack.replace_at(signed(slot), route.clone());
                if let Some(focus) = self.sub_route_focus.get_mut(slot) {
                    *focus = None;
                }
                self.forget_removed_routes();
                self.keys.key(&route);
                tracing::debug!(index = slot, ?route, "replace");
                if presented {
                    self.emit_did_focus(&route);
                }
            }
            None => tracing::debug!(index, "replace out of range ignored"),
        }
        if let Some(callback) = callback {
            callback();
        }
    }

    /// Replace the presented route.
    pub fn replace(&mut self, route: R) {
        self.replace_with(route, None);
    }

    pub fn replace_then(&mut self, route: R, on_complete: impl FnOnce() + 'static) {
        self.replace_with(route, Some(Box::new(on_complete)));
    }

    fn replace_with(&mut self, route: R, callback: Option<Callback>) {
        let presented = self.state.presented_as_isize();
        self.replace_at_index_with(route, presented, callback);
    }

    /// Replace the route below the presented one. At the root this does
    /// nothing.
    pub fn replace_previous(&mut self, route: R) {
        let presented = self.state.presented_index;
        if presented == 0 {
            tracing::debug!("replace previous at root ignored");
            return;
        }
        self.replace_at_index_with(route, signed(presented - 1), None);
    }

    /// Replace the previous route, then pop to it.
    pub fn replace_previous_and_pop(&mut self, route: R) -> Result<()> {
        if self.stack.len() < 2 {
            return Ok(());
        }
        self.replace_previous(route);
        self.pop_with(None)
    }

    /// Replace the first route and pop back to it.
    pub fn reset_to(&mut self, route: R) -> Result<()> {
        self.reset_to_with(route, None)
    }

    pub fn reset_to_then(&mut self, route: R, on_complete: impl FnOnce() + 'static) -> Result<()> {
        self.reset_to_with(route, Some(Box::new(on_complete)))
    }

    fn reset_to_with(&mut self, route: R, callback: Option<Callback>) -> Result<()> {
        self.replace_at_index_with(route, 0, None);
        if self.state.target_index() > 0 {
            return self.pop_to_index(0, callback);
        }
        if let Some(callback) = callback {
            callback();
        }
        Ok(())
    }

    /// Replace the whole stack and present its last route, without
    /// animating.
    ///
    /// Any running transition, gesture, or queued request is discarded;
    /// their callbacks are dropped without running.
    pub fn immediately_reset_route_stack(&mut self, routes: Vec<R>) -> Result<()> {
        self.stack.reset(routes)?;
        let presented = self.stack.last_index();
        let discarded = self.state.reset(presented);
        if discarded > 0 {
            tracing::debug!(discarded, "pending transitions dropped");
        }
        self.expecting_grant = None;
        self.spring.set_current_value(0.0);
        self.sub_route_focus.clear();
        self.forget_removed_routes();
        for route in self.stack.routes() {
            self.keys.key(route);
        }
        tracing::debug!(routes = self.stack.len(), presented, "route stack reset");
        self.apply_resting_layout();
        Ok(())
    }

    /// Animate to `route`, keeping every route in the stack.
    pub fn jump_to(&mut self, route: &R) -> Result<()> {
        let index = self
            .stack
            .index_of(route)
            .ok_or(NavigatorError::RouteNotFound {
                operation: "jump_to",
            })?;
        self.jump_n(signed(index) - signed(self.state.target_index()))
    }

    pub fn jump_forward(&mut self) -> Result<()> {
        self.jump_n(1)
    }

    pub fn jump_back(&mut self) -> Result<()> {
        self.jump_n(-1)
    }

    fn jump_n(&mut self, n: isize) -> Result<()> {
        let target = signed(self.state.target_index()) + n;
        let Ok(dest) = usize::try_from(target) else {
            return Err(NavigatorError::JumpBeforeFirst { target });
        };
        let last = self.stack.last_index();
        if dest > last {
            return Err(NavigatorError::JumpPastLast { target, last });
        }
        if n == 0 {
            return Ok(());
        }
        tracing::debug!(to = dest, "jump");
        self.enable_scene(target);
        if let Some(route) = self.stack.route(dest).cloned() {
            self.emit_will_focus(&route);
        }
        self.transition_to(dest, None, Completion::default())
    }
}

#[cfg(test)]
mod tests {
    use super::super::test_support::*;
    use crate::error::NavigatorError;
    use crate::transition::TransitionPhase;

    #[test]
    fn push_then_pop_restores_stack() {
        let (mut nav, _) = nav_with_log(&["a"]);
        nav.push("b").unwrap();
        settle(&mut nav);
        assert_eq!(nav.current_routes(), ["a", "b"]);
        assert_eq!(nav.presented_index(), 1);
        nav.pop().unwrap();
        settle(&mut nav);
        assert_eq!(nav.current_routes(), ["a"]);
        assert_eq!(nav.presented_index(), 0);
    }

    #[test]
    fn push_push_pop_before_settle_lands_on_middle() {
        let (mut nav, _) = nav_with_log(&["a"]);
        nav.push("b").unwrap();
        nav.push("c").unwrap();
        nav.pop().unwrap();
        assert_eq!(nav.queued_transitions(), 2);
        assert_eq!(nav.target_index(), 1);
        settle(&mut nav);
        assert_eq!(nav.current_routes(), ["a", "b"]);
        assert_eq!(nav.presented_route(), Some(&"b"));
    }

    #[test]
    fn push_discards_routes_above_target() {
        let (mut nav, _) = nav_with_log(&["a", "b", "c"]);
        nav.jump_to(&"a").unwrap();
        settle(&mut nav);
        nav.push("d").unwrap();
        settle(&mut nav);
        assert_eq!(nav.current_routes(), ["a", "d"]);
        assert!(nav.route_id(&"b").is_none());
    }

    #[test]
    fn push_behind_queued_jumps_keeps_scenes_in_play() {
        let (mut nav, log) = nav_with_log(&["a", "b", "c", "d"]);
        log.borrow_mut().clear();
        for _ in 0..3 {
            nav.jump_back().unwrap();
        }
        assert_eq!(nav.target_index(), 0);
        nav.push("e").unwrap();
        assert_eq!(nav.current_routes(), ["a", "b", "c", "d", "e"]);
        assert!(nav.presented_index() < nav.routes().len());
        assert_eq!(nav.presented_route(), Some(&"c"));

        settle(&mut nav);
        assert_eq!(nav.presented_route(), Some(&"e"));
        let did: Vec<String> = log
            .borrow()
            .iter()
            .filter(|entry| entry.starts_with("did:"))
            .cloned()
            .collect();
        assert_eq!(did, ["did:c", "did:b", "did:a", "did:e"]);
    }

    #[test]
    fn focus_events_bracket_push() {
        let (mut nav, log) = nav_with_log(&["a"]);
        nav.mount();
        log.borrow_mut().clear();
        nav.push("b").unwrap();
        assert_eq!(*log.borrow(), ["will:b"]);
        settle(&mut nav);
        assert_eq!(*log.borrow(), ["will:b", "did:b"]);
    }

    #[test]
    fn pop_at_root_runs_callback_now() {
        let (mut nav, _) = nav_with_log(&["a"]);
        let (count, cb) = flag();
        nav.pop_then(cb).unwrap();
        assert_eq!(*count.borrow(), 1);
        assert_eq!(nav.phase(), TransitionPhase::Idle);
    }

    #[test]
    fn pop_to_route_releases_everything_above() {
        let (mut nav, log) = nav_with_log(&["a", "b", "c"]);
        log.borrow_mut().clear();
        let (count, cb) = flag();
        nav.pop_to_route_then(&"a", cb).unwrap();
        assert_eq!(nav.routes().len(), 3);
        settle(&mut nav);
        assert_eq!(nav.current_routes(), ["a"]);
        assert_eq!(nav.presented_index(), 0);
        assert_eq!(*count.borrow(), 1);
        assert_eq!(*log.borrow(), ["will:a", "did:a"]);
    }

    #[test]
    fn pop_to_route_errors_leave_state_alone() {
        let (mut nav, _) = nav_with_log(&["a", "b", "c"]);
        nav.jump_to(&"b").unwrap();
        settle(&mut nav);
        assert_eq!(
            nav.pop_to_route(&"z"),
            Err(NavigatorError::RouteNotFound {
                operation: "pop_to_route"
            })
        );
        assert_eq!(
            nav.pop_to_route(&"c"),
            Err(NavigatorError::RouteAheadOfTarget {
                index: 2,
                target: 1
            })
        );
        assert_eq!(nav.phase(), TransitionPhase::Idle);
        assert_eq!(nav.current_routes(), ["a", "b", "c"]);
    }

    #[test]
    fn pop_to_presented_route_is_immediate() {
        let (mut nav, _) = nav_with_log(&["a", "b"]);
        let (count, cb) = flag();
        nav.pop_to_route_then(&"b", cb).unwrap();
        assert_eq!(*count.borrow(), 1);
        assert!(!nav.is_animating());
    }

    #[test]
    fn pop_to_top_from_deep_stack() {
        let (mut nav, _) = nav_with_log(&["a", "b", "c", "d"]);
        nav.pop_to_top().unwrap();
        settle(&mut nav);
        assert_eq!(nav.current_routes(), ["a"]);
    }

    #[test]
    fn push_to_front_is_immediate() {
        let (mut nav, _) = nav_with_log(&["a", "b"]);
        let (count, cb) = flag();
        nav.push_to_front_then("z", cb);
        assert_eq!(*count.borrow(), 1);
        assert_eq!(nav.current_routes(), ["z", "a", "b"]);
        assert_eq!(nav.presented_index(), 2);
        assert_eq!(nav.presented_route(), Some(&"b"));
        assert!(!nav.is_animating());
    }

    #[test]
    fn replace_presented_emits_focus_pair() {
        let (mut nav, log) = nav_with_log(&["a", "b"]);
        log.borrow_mut().clear();
        let old_key = nav.route_id(&"b").unwrap();
        nav.replace("c");
        assert_eq!(nav.current_routes(), ["a", "c"]);
        assert_eq!(*log.borrow(), ["will:c", "did:c"]);
        assert!(nav.route_id(&"b").is_none());
        assert_ne!(nav.route_id(&"c"), Some(old_key));
    }

    #[test]
    fn replace_at_negative_index_counts_from_end() {
        let (mut nav, log) = nav_with_log(&["a", "b", "c"]);
        log.borrow_mut().clear();
        nav.replace_at_index("x", -3);
        assert_eq!(nav.current_routes(), ["x", "b", "c"]);
        assert!(log.borrow().is_empty());
    }

    #[test]
    fn replace_out_of_range_still_calls_back() {
        let (mut nav, _) = nav_with_log(&["a"]);
        let (count, cb) = flag();
        nav.replace_at_index_then("x", 4, cb);
        assert_eq!(nav.current_routes(), ["a"]);
        assert_eq!(*count.borrow(), 1);
    }

    #[test]
    fn replace_previous_at_root_is_ignored() {
        let (mut nav, _) = nav_with_log(&["a"]);
        nav.replace_previous("x");
        assert_eq!(nav.current_routes(), ["a"]);
    }

    #[test]
    fn replace_previous_and_pop() {
        let (mut nav, _) = nav_with_log(&["a", "b"]);
        nav.replace_previous_and_pop("x").unwrap();
        settle(&mut nav);
        assert_eq!(nav.current_routes(), ["x"]);

        let (mut single, _) = nav_with_log(&["a"]);
        single.replace_previous_and_pop("x").unwrap();
        assert_eq!(single.current_routes(), ["a"]);
        assert!(!single.is_animating());
    }

    #[test]
    fn reset_to_replaces_root_and_pops() {
        let (mut nav, _) = nav_with_log(&["a", "b", "c"]);
        let (count, cb) = flag();
        nav.reset_to_then("home", cb).unwrap();
        settle(&mut nav);
        assert_eq!(nav.current_routes(), ["home"]);
        assert_eq!(*count.borrow(), 1);

        let (mut root, _) = nav_with_log(&["a"]);
        let (count, cb) = flag();
        root.reset_to_then("home", cb).unwrap();
        assert_eq!(root.current_routes(), ["home"]);
        assert_eq!(*count.borrow(), 1);
    }

    #[test]
    fn immediate_reset_discards_queue() {
        let (mut nav, _) = nav_with_log(&["a"]);
        let (count, cb) = flag();
        nav.push("b").unwrap();
        nav.push_then("c", cb).unwrap();
        nav.immediately_reset_route_stack(vec!["x", "y"]).unwrap();
        assert_eq!(nav.presented_index(), 1);
        assert_eq!(nav.phase(), TransitionPhase::Idle);
        assert_eq!(nav.queued_transitions(), 0);
        settle(&mut nav);
        assert_eq!(*count.borrow(), 0);
        assert_eq!(nav.current_routes(), ["x", "y"]);
    }

    #[test]
    fn immediate_reset_rejects_empty_stack() {
        let (mut nav, _) = nav_with_log(&["a", "b"]);
        assert_eq!(
            nav.immediately_reset_route_stack(Vec::new()),
            Err(NavigatorError::EmptyRouteStack)
        );
        assert_eq!(nav.current_routes(), ["a", "b"]);
    }

    #[test]
    fn jumps_keep_routes() {
        let (mut nav, log) = nav_with_log(&["a", "b", "c"]);
        nav.jump_back().unwrap();
        settle(&mut nav);
        nav.jump_back().unwrap();
        settle(&mut nav);
        assert_eq!(nav.presented_index(), 0);
        assert_eq!(nav.current_routes(), ["a", "b", "c"]);
        nav.jump_forward().unwrap();
        settle(&mut nav);
        assert_eq!(nav.presented_index(), 1);
        assert!(log.borrow().contains(&"did:a".to_string()));
    }

    #[test]
    fn jump_bounds() {
        let (mut nav, _) = nav_with_log(&["a", "b"]);
        assert_eq!(
            nav.jump_forward(),
            Err(NavigatorError::JumpPastLast { target: 2, last: 1 })
        );
        nav.jump_to(&"a").unwrap();
        settle(&mut nav);
        assert_eq!(
            nav.jump_back(),
            Err(NavigatorError::JumpBeforeFirst { target: -1 })
        );
        assert_eq!(
            nav.jump_to(&"z"),
            Err(NavigatorError::RouteNotFound { operation: "jump_to" })
        );
    }

    #[test]
    fn jump_to_presented_is_noop() {
        let (mut nav, log) = nav_with_log(&["a", "b"]);
        log.borrow_mut().clear();
        nav.jump_to(&"b").unwrap();
        assert!(!nav.is_animating());
        assert!(log.borrow().is_empty());
    }

    #[test]
    fn queued_jumps_resolve_against_target() {
        let (mut nav, _) = nav_with_log(&["a", "b", "c"]);
        nav.jump_back().unwrap();
        nav.jump_back().unwrap();
        assert_eq!(nav.target_index(), 0);
        assert_eq!(
            nav.jump_back(),
            Err(NavigatorError::JumpBeforeFirst { target: -1 })
        );
        nav.jump_forward().unwrap();
        settle(&mut nav);
        assert_eq!(nav.presented_index(), 1);
    }
}
