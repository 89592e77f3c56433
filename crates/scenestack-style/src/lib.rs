#![forbid(unsafe_code)]

//! Scene styling for SceneStack.
//!
//! This crate provides:
//! - [`StylePatch`] and [`SceneProps`], the partial visual state the
//!   navigator pushes to a scene outside the declarative render pass
//! - [`SceneInterpolator`], the capability that maps transition progress to
//!   a patch, with [`Transition`] presets and [`FnInterpolator`] for custom
//!   styles

pub mod interpolate;
pub mod patch;

pub use interpolate::{FnInterpolator, Keyframes, SceneInterpolator, Transition, Tween};
pub use patch::{PointerEvents, SceneProps, StylePatch};
