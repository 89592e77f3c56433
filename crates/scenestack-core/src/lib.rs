#![forbid(unsafe_code)]

//! Core primitives for SceneStack.
//!
//! This crate provides:
//! - [`Stage`] for the size of the area scenes are laid out in
//! - [`GestureState`] and [`Direction`] for raw pointer-drag samples
//! - [`Spring`], the integrator contract the navigator drives, plus
//!   [`ReboundSpring`] as a ready-made implementation
//! - [`FrameClock`] for hosts that tick from wall-clock time

pub mod clock;
pub mod geometry;
pub mod gesture;
pub mod spring;

pub use clock::FrameClock;
pub use geometry::Stage;
pub use gesture::{Direction, GestureState};
pub use spring::{ReboundSpring, Spring, SpringConfig, SpringTick};
