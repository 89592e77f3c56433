#![forbid(unsafe_code)]

//! Test harness for SceneStack navigators.
//!
//! - [`RecordingHost`] records prop updates and folds them into per-scene
//!   state, with a JSON snapshot for golden comparisons
//! - [`FocusRecorder`] captures focus events from a navigation context
//! - [`DragScript`] replays pointer drags through responder negotiation
//! - [`FrameDriver`] advances navigators on a simulated clock
//! - [`strategy`] generates random operation sequences for property tests

pub mod drag;
pub mod driver;
pub mod focus;
pub mod host;
pub mod strategy;

pub use drag::{DragOutcome, DragScript};
pub use driver::{FRAME, FrameDriver, HarnessError};
pub use focus::FocusRecorder;
pub use host::{PropUpdate, RecordingHost};
pub use strategy::{NavOp, OpRunner, nav_op};

use scenestack_core::Stage;
use scenestack_nav::{NavigationContext, Navigator, NavigatorConfig, Result, Route, SceneConfig};

/// Stage used by [`fixture`]: a portrait phone.
pub const PHONE: Stage = Stage::new(390.0, 844.0);

/// A mounted navigator over `routes` with its focus recorder attached from
/// construction.
pub fn fixture<R: Route>(
    routes: impl IntoIterator<Item = R>,
    configure: impl Fn(&R) -> SceneConfig + 'static,
) -> Result<(Navigator<R, RecordingHost>, FocusRecorder<R>)> {
    let context = NavigationContext::new();
    let focus = FocusRecorder::attach(&context);
    let mut nav = Navigator::builder()
        .config(NavigatorConfig::default().with_stage(PHONE))
        .initial_route_stack(routes)
        .configure_scene(configure)
        .navigation_context(context)
        .host(RecordingHost::new())
        .build()?;
    nav.mount();
    Ok((nav, focus))
}
