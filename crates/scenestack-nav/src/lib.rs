#![forbid(unsafe_code)]

//! Stack navigation for SceneStack.
//!
//! This crate provides:
//! - [`Navigator`], which owns a route stack and animates between its scenes
//!   with one spring, queueing requests made mid-transition
//! - [`SceneConfig`] and [`GestureConfig`] presets describing how each
//!   scene enters, leaves, and responds to drags
//! - [`NavigationContext`] for focus listeners with RAII unsubscription
//! - [`SceneHost`] and [`NavigationBar`], the collaborators a host plugs in
//!
//! # Feature Flags
//!
//! - `serde`: derive `Serialize`/`Deserialize` for plain-data configs
//! - `tracing`: wrap every frame in a `navigator_frame` debug span

pub mod context;
pub mod error;
pub mod gesture;
pub mod host;
pub mod navigator;
pub mod route;
pub mod route_stack;
pub mod scene_config;
pub mod transition;
pub mod visibility;

pub use context::{FocusEvent, FocusEventKind, ListenerSubscription, NavigationContext};
pub use error::{NavigatorError, Result};
pub use gesture::{GestureMatcher, MatchContext, ReleaseDecision};
pub use host::{NavigationBar, SceneHost};
pub use navigator::{FocusHook, Navigator, NavigatorBuilder, NavigatorConfig, SceneDescriptor};
pub use route::{Route, RouteId, RouteKeys};
pub use route_stack::{ConfigureScene, RouteStack};
pub use scene_config::{GestureAction, GestureConfig, GestureSet, OverswipeConfig, SceneConfig};
pub use transition::{Callback, TransitionPhase};
pub use visibility::ScenesInPlay;
