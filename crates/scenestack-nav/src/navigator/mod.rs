#![forbid(unsafe_code)]

//! The navigator: a route stack animated by one spring.
//!
//! A [`Navigator`] owns the route stack, the transition state machine, and
//! the spring. The host feeds it frame ticks through [`Navigator::advance`]
//! and pointer samples through the responder methods; the navigator answers
//! by pushing [`SceneProps`](scenestack_style::SceneProps) to the
//! [`SceneHost`] and emitting focus events.
//!
//! # Example
//!
//! ```ignore
//! let mut nav = Navigator::builder()
//!     .initial_route("home")
//!     .host(host)
//!     .build()?;
//! nav.mount();
//! nav.push("detail")?;
//! while nav.is_animating() {
//!     nav.advance(Duration::from_millis(16))?;
//! }
//! ```
//!
//! # Invariants
//!
//! - `presented_index` is always inside the route stack.
//! - At most one spring run is in flight; requests made meanwhile queue up.
//! - Every completion callback runs exactly once, or is dropped unrun when
//!   the queue holding it is discarded by a reset.
//!
//! # Failure Modes
//!
//! | Condition | Behavior |
//! |-----------|----------|
//! | Route not in stack | `Err(RouteNotFound)`, nothing changes |
//! | Pop or jump out of bounds | `Err`, nothing changes |
//! | Queued destination left the stack | Entry dropped with a warning, `Err(QueuedRouteMissing)` from `advance` |
//! | Unexpected responder grant | `Err(ResponderGrantedUnexpectedly)` |

mod engine;
mod ops;
mod responder;
mod scenes;

pub use scenes::SceneDescriptor;

use std::collections::HashMap;
use std::fmt;
use std::rc::Rc;

use scenestack_core::{ReboundSpring, Spring, Stage};
use web_time::Duration;

use crate::context::NavigationContext;
use crate::error::{NavigatorError, Result};
use crate::gesture::GestureMatcher;
use crate::host::{NavigationBar, SceneHost};
use crate::route::{Route, RouteId, RouteKeys};
use crate::route_stack::{ConfigureScene, RouteStack};
use crate::scene_config::{GestureAction, SceneConfig};
use crate::transition::{TransitionPhase, TransitionState};

/// Hook invoked with a focused route.
pub type FocusHook<R> = Box<dyn FnMut(&R)>;

/// Navigator-wide settings.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct NavigatorConfig {
    /// Size of the area scenes are laid out in.
    pub stage: Stage,
    /// Spring speed below which a transition may settle.
    pub rest_speed_threshold: f64,
    /// Spring displacement below which a transition may settle.
    pub rest_displacement_threshold: f64,
}

impl Default for NavigatorConfig {
    fn default() -> Self {
        Self {
            stage: Stage::default(),
            rest_speed_threshold: 0.05,
            rest_displacement_threshold: 0.001,
        }
    }
}

impl NavigatorConfig {
    #[must_use]
    pub fn with_stage(mut self, stage: Stage) -> Self {
        self.stage = stage;
        self
    }

    #[must_use]
    pub fn with_rest_speed_threshold(mut self, threshold: f64) -> Self {
        self.rest_speed_threshold = threshold;
        self
    }

    #[must_use]
    pub fn with_rest_displacement_threshold(mut self, threshold: f64) -> Self {
        self.rest_displacement_threshold = threshold;
        self
    }
}

/// Stack navigator with spring-driven transitions and drag gestures.
pub struct Navigator<R: Route, H: SceneHost, S: Spring = ReboundSpring> {
    config: NavigatorConfig,
    stack: RouteStack<R>,
    keys: RouteKeys<R>,
    state: TransitionState,
    spring: S,
    host: H,
    navigation_bar: Option<Box<dyn NavigationBar<R>>>,
    context: NavigationContext<R>,
    on_will_focus: Option<FocusHook<R>>,
    on_did_focus: Option<FocusHook<R>>,
    matcher: GestureMatcher,
    expecting_grant: Option<GestureAction>,
    sub_route_focus: Vec<Option<R>>,
    rendered: HashMap<R, Rc<SceneDescriptor<R>>>,
    mounted: bool,
}

impl<R: Route, H: SceneHost, S: Spring> fmt::Debug for Navigator<R, H, S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Navigator")
            .field("routes", &self.stack.routes())
            .field("state", &self.state)
            .field("spring_value", &self.spring.current_value())
            .field("mounted", &self.mounted)
            .finish_non_exhaustive()
    }
}

impl<R: Route, H: SceneHost> Navigator<R, H> {
    /// Start building a navigator driven by a [`ReboundSpring`].
    #[must_use]
    pub fn builder() -> NavigatorBuilder<R, H> {
        NavigatorBuilder::new()
    }
}

impl<R: Route, H: SceneHost, S: Spring> Navigator<R, H, S> {
    /// Apply the resting layout and announce the presented route.
    ///
    /// Emits did-focus for the initial route. Calling it again is a no-op.
    pub fn mount(&mut self) {
        if self.mounted {
            return;
        }
        self.mounted = true;
        self.apply_resting_layout();
        self.handle_spring_update();
        let presented = self.state.presented_index;
        tracing::debug!(presented, routes = self.stack.len(), "navigator mounted");
        if let Some(route) = self.did_focus_route(presented) {
            self.emit_did_focus(&route);
        }
    }

    /// Integrate the spring by `dt` and apply the result.
    ///
    /// Returns an error only when a queued transition could not run because
    /// its destination was removed from the stack.
    pub fn advance(&mut self, dt: Duration) -> Result<()> {
        #[cfg(feature = "tracing")]
        let _span = tracing::debug_span!(
            "navigator_frame",
            dt_us = dt.as_micros() as u64,
            presented = self.state.presented_index,
            phase = ?self.state.phase()
        )
        .entered();

        let tick = self.spring.advance(dt);
        if tick.moved {
            self.handle_spring_update();
        }
        if tick.came_to_rest {
            self.complete_transition()?;
        }
        Ok(())
    }

    /// Index of the presented route.
    #[inline]
    #[must_use]
    pub fn presented_index(&self) -> usize {
        self.state.presented_index
    }

    /// The presented route.
    #[must_use]
    pub fn presented_route(&self) -> Option<&R> {
        self.stack.route(self.state.presented_index)
    }

    /// Index the stack will present once every queued transition has run.
    #[must_use]
    pub fn target_index(&self) -> usize {
        self.state.target_index()
    }

    #[must_use]
    pub fn phase(&self) -> TransitionPhase {
        self.state.phase()
    }

    #[must_use]
    pub fn routes(&self) -> &[R] {
        self.stack.routes()
    }

    /// An owned copy of the route stack.
    #[must_use]
    pub fn current_routes(&self) -> Vec<R> {
        self.stack.routes().to_vec()
    }

    #[must_use]
    pub fn scene_config(&self, index: usize) -> Option<&SceneConfig> {
        self.stack.config(signed(index))
    }

    #[must_use]
    pub fn route_id(&self, route: &R) -> Option<RouteId> {
        self.keys.get(route)
    }

    #[must_use]
    pub fn active_gesture(&self) -> Option<GestureAction> {
        self.state.active_gesture
    }

    #[must_use]
    pub fn pending_gesture_progress(&self) -> Option<f64> {
        self.state.pending_gesture_progress
    }

    /// Number of transitions waiting for the running one to settle.
    #[must_use]
    pub fn queued_transitions(&self) -> usize {
        self.state.queue.len()
    }

    #[must_use]
    pub fn spring_value(&self) -> f64 {
        self.spring.current_value()
    }

    #[must_use]
    pub fn spring(&self) -> &S {
        &self.spring
    }

    /// Whether a transition or gesture is running or the spring is moving.
    #[must_use]
    pub fn is_animating(&self) -> bool {
        self.state.is_transitioning()
            || self.state.active_gesture.is_some()
            || !self.spring.is_at_rest()
    }

    #[must_use]
    pub fn config(&self) -> &NavigatorConfig {
        &self.config
    }

    #[must_use]
    pub fn host(&self) -> &H {
        &self.host
    }

    pub fn host_mut(&mut self) -> &mut H {
        &mut self.host
    }

    /// Focus listener registry shared with the embedding application.
    #[must_use]
    pub fn navigation_context(&self) -> &NavigationContext<R> {
        &self.context
    }

    /// Report `route` instead of the stack route when the scene at `index`
    /// gains focus. `None` clears the override.
    pub fn set_sub_route_focus(&mut self, index: usize, route: Option<R>) {
        if self.sub_route_focus.len() <= index {
            self.sub_route_focus.resize(index + 1, None);
        }
        self.sub_route_focus[index] = route;
    }
}

pub(crate) fn signed(index: usize) -> isize {
    isize::try_from(index).unwrap_or(isize::MAX)
}

/// Builder for [`Navigator`].
pub struct NavigatorBuilder<R: Route, H: SceneHost, S: Spring = ReboundSpring> {
    config: NavigatorConfig,
    initial_route: Option<R>,
    initial_route_stack: Option<Vec<R>>,
    configure_scene: Option<ConfigureScene<R>>,
    host: Option<H>,
    spring: S,
    navigation_bar: Option<Box<dyn NavigationBar<R>>>,
    context: Option<NavigationContext<R>>,
    on_will_focus: Option<FocusHook<R>>,
    on_did_focus: Option<FocusHook<R>>,
}

impl<R: Route, H: SceneHost> Default for NavigatorBuilder<R, H> {
    fn default() -> Self {
        Self::new()
    }
}

impl<R: Route, H: SceneHost> NavigatorBuilder<R, H> {
    #[must_use]
    pub fn new() -> Self {
        Self {
            config: NavigatorConfig::default(),
            initial_route: None,
            initial_route_stack: None,
            configure_scene: None,
            host: None,
            spring: ReboundSpring::default(),
            navigation_bar: None,
            context: None,
            on_will_focus: None,
            on_did_focus: None,
        }
    }
}

impl<R: Route, H: SceneHost, S: Spring> NavigatorBuilder<R, H, S> {
    #[must_use]
    pub fn config(mut self, config: NavigatorConfig) -> Self {
        self.config = config;
        self
    }

    /// Route presented first. With a route stack it must be an element of it.
    #[must_use]
    pub fn initial_route(mut self, route: R) -> Self {
        self.initial_route = Some(route);
        self
    }

    /// Routes the stack starts with. The last one is presented unless an
    /// initial route is also given.
    #[must_use]
    pub fn initial_route_stack(mut self, routes: impl IntoIterator<Item = R>) -> Self {
        self.initial_route_stack = Some(routes.into_iter().collect());
        self
    }

    /// Derive each route's scene config. Defaults to
    /// [`SceneConfig::push_from_right`] for the configured stage.
    #[must_use]
    pub fn configure_scene(mut self, configure: impl Fn(&R) -> SceneConfig + 'static) -> Self {
        self.configure_scene = Some(Rc::new(configure));
        self
    }

    #[must_use]
    pub fn host(mut self, host: H) -> Self {
        self.host = Some(host);
        self
    }

    /// Drive transitions with a different spring implementation.
    #[must_use]
    pub fn spring<S2: Spring>(self, spring: S2) -> NavigatorBuilder<R, H, S2> {
        NavigatorBuilder {
            config: self.config,
            initial_route: self.initial_route,
            initial_route_stack: self.initial_route_stack,
            configure_scene: self.configure_scene,
            host: self.host,
            spring,
            navigation_bar: self.navigation_bar,
            context: self.context,
            on_will_focus: self.on_will_focus,
            on_did_focus: self.on_did_focus,
        }
    }

    #[must_use]
    pub fn navigation_bar(mut self, bar: impl NavigationBar<R> + 'static) -> Self {
        self.navigation_bar = Some(Box::new(bar));
        self
    }

    /// Share an existing listener registry instead of creating one.
    #[must_use]
    pub fn navigation_context(mut self, context: NavigationContext<R>) -> Self {
        self.context = Some(context);
        self
    }

    #[must_use]
    pub fn on_will_focus(mut self, hook: impl FnMut(&R) + 'static) -> Self {
        self.on_will_focus = Some(Box::new(hook));
        self
    }

    #[must_use]
    pub fn on_did_focus(mut self, hook: impl FnMut(&R) + 'static) -> Self {
        self.on_did_focus = Some(Box::new(hook));
        self
    }

    /// Validate the inputs and build the navigator.
    ///
    /// Emits will-focus for the initial route.
    pub fn build(self) -> Result<Navigator<R, H, S>> {
        let routes = match (self.initial_route_stack, &self.initial_route) {
            (Some(routes), _) => routes,
            (None, Some(route)) => vec![route.clone()],
            (None, None) => return Err(NavigatorError::MissingInitialRoute),
        };
        if routes.is_empty() {
            return Err(NavigatorError::MissingInitialRoute);
        }
        let presented = match &self.initial_route {
            Some(route) => routes
                .iter()
                .position(|r| r == route)
                .ok_or(NavigatorError::InitialRouteNotInStack)?,
            None => routes.len() - 1,
        };
        let host = self.host.ok_or(NavigatorError::MissingSceneHost)?;

        let config = self.config;
        let configure = self.configure_scene.unwrap_or_else(|| {
            let stage = config.stage;
            Rc::new(move |_: &R| SceneConfig::push_from_right(stage))
        });
        let stack = RouteStack::new(routes, configure)?;

        let mut spring = self.spring;
        spring.set_rest_speed_threshold(config.rest_speed_threshold);
        spring.set_rest_displacement_threshold(config.rest_displacement_threshold);
        spring.set_current_value(0.0);

        let mut keys = RouteKeys::new();
        for route in stack.routes() {
            keys.key(route);
        }

        let mut nav = Navigator {
            config,
            stack,
            keys,
            state: TransitionState::new(presented),
            spring,
            host,
            navigation_bar: self.navigation_bar,
            context: self.context.unwrap_or_default(),
            on_will_focus: self.on_will_focus,
            on_did_focus: self.on_did_focus,
            matcher: GestureMatcher::new(),
            expecting_grant: None,
            sub_route_focus: Vec::new(),
            rendered: HashMap::new(),
            mounted: false,
        };
        tracing::debug!(routes = nav.stack.len(), presented, "navigator built");
        if let Some(route) = nav.stack.route(presented).cloned() {
            nav.emit_will_focus(&route);
        }
        Ok(nav)
    }
}
