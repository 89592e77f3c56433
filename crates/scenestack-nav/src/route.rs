#![forbid(unsafe_code)]

//! Route values and their stable keys.
//!
//! Routes are opaque application values compared by equality. The navigator
//! never inspects them beyond hashing and comparison; it needs a stable key
//! per route so hosts can keep a scene's rendered subtree alive across stack
//! mutations. [`RouteKeys`] is the side table that hands out those keys.
//!
//! # Invariants
//!
//! - A route keeps the same [`RouteId`] for as long as it stays in the stack.
//! - Ids are never reused; a route that leaves the stack and comes back gets
//!   a fresh id.
//! - Equal routes share one id.

use std::collections::HashMap;
use std::fmt;
use std::hash::Hash;

/// Bound for values that can sit in a route stack.
pub trait Route: Clone + Eq + Hash + fmt::Debug + 'static {}

impl<T: Clone + Eq + Hash + fmt::Debug + 'static> Route for T {}

/// Stable key of a route within one navigator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct RouteId(u64);

impl RouteId {
    /// Get the raw id value.
    #[inline]
    #[must_use]
    pub const fn get(self) -> u64 {
        self.0
    }
}

impl fmt::Display for RouteId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "scene_{}", self.0)
    }
}

/// Route-to-id side table.
#[derive(Debug, Clone)]
pub struct RouteKeys<R> {
    ids: HashMap<R, RouteId>,
    next: u64,
}

impl<R: Route> Default for RouteKeys<R> {
    fn default() -> Self {
        Self::new()
    }
}

impl<R: Route> RouteKeys<R> {
    #[must_use]
    pub fn new() -> Self {
        Self {
            ids: HashMap::new(),
            next: 0,
        }
    }

    /// Id for `route`, assigning the next one if it has none.
    pub fn key(&mut self, route: &R) -> RouteId {
        if let Some(id) = self.ids.get(route) {
            return *id;
        }
        let id = RouteId(self.next);
        self.next += 1;
        self.ids.insert(route.clone(), id);
        id
    }

    /// Id for `route` if one was assigned.
    #[must_use]
    pub fn get(&self, route: &R) -> Option<RouteId> {
        self.ids.get(route).copied()
    }

    /// Drop ids for routes not in `routes`.
    pub fn retain(&mut self, routes: &[R]) {
        self.ids.retain(|route, _| routes.contains(route));
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.ids.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }
}
