#![forbid(unsafe_code)]

//! Ordered routes with their derived scene configs.
//!
//! # Invariants
//!
//! - The stack always holds at least one route.
//! - `configs[i]` is the configurator's output for `routes[i]`; a slot's
//!   config is recomputed whenever its route is replaced and never mutated.
//! - Routes are appended, inserted at the bottom, truncated, replaced in
//!   place, or swapped out wholesale; existing routes never change order.
//!
//! # Failure Modes
//!
//! | Condition | Behavior |
//! |-----------|----------|
//! | Reset with no routes | `Err(EmptyRouteStack)`, stack unchanged |
//! | Replace out of range | Returns `None`, stack unchanged |
//! | Truncate past the end | No-op |

use std::fmt;
use std::rc::Rc;

use crate::error::{NavigatorError, Result};
use crate::route::Route;
use crate::scene_config::SceneConfig;

/// Derives a scene config from a route.
pub type ConfigureScene<R> = Rc<dyn Fn(&R) -> SceneConfig>;

/// Routes plus their parallel scene config stack.
#[derive(Clone)]
pub struct RouteStack<R> {
    routes: Vec<R>,
    configs: Vec<SceneConfig>,
    configure: ConfigureScene<R>,
}

impl<R: Route> fmt::Debug for RouteStack<R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RouteStack")
            .field("routes", &self.routes)
            .finish_non_exhaustive()
    }
}

impl<R: Route> RouteStack<R> {
    /// Build a stack from `routes`, configuring each one.
    pub fn new(routes: Vec<R>, configure: ConfigureScene<R>) -> Result<Self> {
        if routes.is_empty() {
            return Err(NavigatorError::EmptyRouteStack);
        }
        let configs = routes.iter().map(|r| configure(r)).collect();
        Ok(Self {
            routes,
            configs,
            configure,
        })
    }

    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.routes.len()
    }

    /// Never true for a constructed stack.
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.routes.is_empty()
    }

    #[inline]
    #[must_use]
    pub fn last_index(&self) -> usize {
        self.routes.len().saturating_sub(1)
    }

    #[must_use]
    pub fn routes(&self) -> &[R] {
        &self.routes
    }

    #[must_use]
    pub fn route(&self, index: usize) -> Option<&R> {
        self.routes.get(index)
    }

    /// Config at a possibly out-of-range signed index.
    #[must_use]
    pub fn config(&self, index: isize) -> Option<&SceneConfig> {
        usize::try_from(index)
            .ok()
            .and_then(|i| self.configs.get(i))
    }

    /// Position of the first route equal to `route`.
    #[must_use]
    pub fn index_of(&self, route: &R) -> Option<usize> {
        self.routes.iter().position(|r| r == route)
    }

    /// Replace every route.
    pub fn reset(&mut self, routes: Vec<R>) -> Result<()> {
        if routes.is_empty() {
            return Err(NavigatorError::EmptyRouteStack);
        }
        self.configs = routes.iter().map(|r| (self.configure)(r)).collect();
        self.routes = routes;
        Ok(())
    }

    /// Drop everything after `index` and append `route`; returns its index.
    pub fn push_after(&mut self, index: usize, route: R) -> usize {
        self.truncate_after(index);
        self.configs.push((self.configure)(&route));
        self.routes.push(route);
        self.routes.len() - 1
    }

    /// Keep `[0, index]` and insert `route` before it.
    pub fn push_front(&mut self, index: usize, route: R) {
        self.truncate_after(index);
        self.configs.insert(0, (self.configure)(&route));
        self.routes.insert(0, route);
    }

    /// Resolve a signed index (negative counts from the end).
    #[must_use]
    pub fn resolve(&self, index: isize) -> Option<usize> {
        let resolved = if index < 0 {
            index.checked_add_unsigned(self.routes.len())?
        } else {
            index
        };
        usize::try_from(resolved)
            .ok()
            .filter(|&i| i < self.routes.len())
    }

    /// Replace the route at a signed index; returns the resolved index.
    pub fn replace_at(&mut self, index: isize, route: R) -> Option<usize> {
        let index = self.resolve(index)?;
        self.configs[index] = (self.configure)(&route);
        self.routes[index] = route;
        Some(index)
    }

    /// Drop every route after `index`; returns whether anything was removed.
    pub fn truncate_after(&mut self, index: usize) -> bool {
        let keep = index.saturating_add(1);
        if keep >= self.routes.len() {
            return false;
        }
        self.routes.truncate(keep);
        self.configs.truncate(keep);
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use scenestack_core::Stage;
    use std::cell::Cell;

    fn configure() -> ConfigureScene<&'static str> {
        Rc::new(|route: &&str| {
            if route.starts_with("modal") {
                SceneConfig::float_from_bottom(Stage::default())
            } else {
                SceneConfig::push_from_right(Stage::default())
            }
        })
    }

    fn stack(routes: &[&'static str]) -> RouteStack<&'static str> {
        RouteStack::new(routes.to_vec(), configure()).unwrap()
    }

    #[test]
    fn empty_stack_rejected() {
        assert_eq!(
            RouteStack::new(Vec::<&str>::new(), configure()).err(),
            Some(NavigatorError::EmptyRouteStack)
        );
        let mut s = stack(&["a"]);
        assert_eq!(s.reset(vec![]), Err(NavigatorError::EmptyRouteStack));
        assert_eq!(s.routes(), ["a"]);
    }

    #[test]
    fn push_after_truncates_forward_history() {
        let mut s = stack(&["a", "b", "c"]);
        let idx = s.push_after(0, "d");
        assert_eq!(idx, 1);
        assert_eq!(s.routes(), ["a", "d"]);
        assert!(s.config(1).is_some());
        assert!(s.config(2).is_none());
    }

    #[test]
    fn push_front_keeps_active_prefix() {
        let mut s = stack(&["a", "b", "c"]);
        s.push_front(1, "z");
        assert_eq!(s.routes(), ["z", "a", "b"]);
    }

    #[test]
    fn replace_at_negative_counts_from_end() {
        let mut s = stack(&["a", "b", "c"]);
        assert_eq!(s.replace_at(-1, "modal"), Some(2));
        assert_eq!(s.routes(), ["a", "b", "modal"]);
        let pop = s.config(2).and_then(|c| c.gestures.pop);
        assert_eq!(pop.and_then(|g| g.edge_hit_width), Some(150.0));
    }

    #[test]
    fn replace_out_of_range_is_noop() {
        let mut s = stack(&["a", "b"]);
        assert_eq!(s.replace_at(2, "x"), None);
        assert_eq!(s.replace_at(-3, "x"), None);
        assert_eq!(s.routes(), ["a", "b"]);
    }

    #[test]
    fn truncate_after() {
        let mut s = stack(&["a", "b", "c"]);
        assert!(!s.truncate_after(2));
        assert!(s.truncate_after(0));
        assert_eq!(s.routes(), ["a"]);
        assert_eq!(s.last_index(), 0);
    }

    #[test]
    fn configurator_runs_once_per_new_slot() {
        let calls = Rc::new(Cell::new(0));
        let counter = Rc::clone(&calls);
        let configure: ConfigureScene<u8> = Rc::new(move |_: &u8| {
            counter.set(counter.get() + 1);
            SceneConfig::fade()
        });
        let mut s = RouteStack::new(vec![1, 2], configure).unwrap();
        assert_eq!(calls.get(), 2);
        s.push_after(1, 3);
        s.replace_at(0, 4);
        assert_eq!(calls.get(), 4);
        s.truncate_after(0);
        assert_eq!(calls.get(), 4);
    }

    #[test]
    fn index_of_and_signed_config_lookup() {
        let s = stack(&["a", "b"]);
        assert_eq!(s.index_of(&"b"), Some(1));
        assert_eq!(s.index_of(&"x"), None);
        assert!(s.config(-1).is_none());
        assert!(s.config(0).is_some());
    }
}
