#![forbid(unsafe_code)]

//! SceneStack: a stack navigator that animates scenes with one spring.
//!
//! This crate re-exports the public types of the member crates and a
//! [`prelude`] covering what a host needs to build, drive, and style a
//! [`Navigator`].
//!
//! ```
//! use scenestack::prelude::*;
//!
//! struct Host;
//!
//! impl SceneHost for Host {
//!     fn set_scene_props(&mut self, _index: usize, _props: &SceneProps) {}
//! }
//!
//! let mut nav = Navigator::builder()
//!     .initial_route("inbox")
//!     .host(Host)
//!     .build()?;
//! nav.mount();
//! nav.push("message")?;
//! while nav.is_animating() {
//!     nav.advance(Duration::from_millis(16))?;
//! }
//! assert_eq!(nav.presented_route(), Some(&"message"));
//! # Ok::<(), NavigatorError>(())
//! ```

pub use scenestack_core::{
    Direction, FrameClock, GestureState, ReboundSpring, Spring, SpringConfig, Stage,
};
pub use scenestack_nav::{
    FocusEventKind, GestureAction, GestureConfig, GestureSet, NavigationBar, NavigationContext,
    Navigator, NavigatorConfig, NavigatorError, Route, SceneConfig, SceneHost, TransitionPhase,
};
pub use scenestack_style::{PointerEvents, SceneInterpolator, SceneProps, StylePatch, Transition};

/// Common imports for hosts.
pub mod prelude {
    pub use scenestack_core::{GestureState, Spring, Stage};
    pub use scenestack_nav::{
        FocusEventKind, GestureAction, NavigationContext, Navigator, NavigatorConfig,
        NavigatorError, Route, SceneConfig, SceneHost, TransitionPhase,
    };
    pub use scenestack_style::{SceneProps, StylePatch};
    pub use web_time::Duration;
}
