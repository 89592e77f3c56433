#![forbid(unsafe_code)]

//! Collaborators the navigator drives but does not own the behavior of.

use scenestack_style::SceneProps;

/// Receives imperative prop updates for rendered scenes.
///
/// Indices are stack positions. The navigator only addresses indices inside
/// the current stack.
pub trait SceneHost {
    fn set_scene_props(&mut self, index: usize, props: &SceneProps);
}

impl<H: SceneHost + ?Sized> SceneHost for Box<H> {
    fn set_scene_props(&mut self, index: usize, props: &SceneProps) {
        (**self).set_scene_props(index, props);
    }
}

/// Optional navigation bar that follows transitions.
///
/// All hooks default to doing nothing.
pub trait NavigationBar<R> {
    /// A route is about to become presented.
    fn handle_will_focus(&mut self, _route: &R) {}

    /// A transition or gesture between `from` and `to` started.
    ///
    /// Either index may be one past the ends of the stack while a gesture
    /// overswipes.
    fn on_animation_start(&mut self, _from: isize, _to: isize) {}

    /// Progress of the transition between two in-stack indices.
    fn update_progress(&mut self, _progress: f64, _from: usize, _to: usize) {}

    /// The transition settled.
    fn on_animation_end(&mut self) {}
}
