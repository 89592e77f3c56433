#![forbid(unsafe_code)]

//! Which scenes are on stage and how the two in play are styled.
//!
//! During a transition or gesture between `from` and `to`, exactly those two
//! scenes are enabled; the presented scene always is. Everything else is
//! disabled.
//!
//! The interpolator comes from the scene at the higher index, since that is
//! the scene whose config describes how it enters and leaves. When the
//! higher index is past the end of the stack (an overswipe) the scene below
//! it is used instead. The lower-index scene plays outgoing, the other
//! incoming, and progress is mirrored when travelling backwards so that
//! interpolators only ever see forward progress.

use scenestack_core::Stage;
use scenestack_style::StylePatch;

use crate::route::Route;
use crate::route_stack::RouteStack;

/// Scenes that must stay enabled.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScenesInPlay {
    pub presented: usize,
    pub transition_from: Option<isize>,
    pub gesture_to: Option<isize>,
}

impl ScenesInPlay {
    #[must_use]
    pub fn contains(&self, index: usize) -> bool {
        let signed = isize::try_from(index).ok();
        index == self.presented
            || (signed.is_some() && (signed == self.transition_from || signed == self.gesture_to))
    }

    /// Stack indices to disable in a stack of `len` scenes.
    pub fn hidden(self, len: usize) -> impl Iterator<Item = usize> {
        (0..len).filter(move |i| !self.contains(*i))
    }
}

/// Style for the scene at `index` while moving from `from` to `to`.
///
/// Returns `None` when no config covers the transition.
#[must_use]
pub fn scene_style<R: Route>(
    stack: &RouteStack<R>,
    stage: Stage,
    from: isize,
    to: isize,
    progress: f64,
    index: isize,
) -> Option<StylePatch> {
    let config_index = if from < to { to } else { from };
    let config = stack
        .config(config_index)
        .or_else(|| stack.config(config_index - 1))?;
    let progress = if from < to { progress } else { 1.0 - progress };
    let patch = if index < from || index < to {
        config.interpolator.interpolate_outgoing(progress, stage)
    } else {
        config.interpolator.interpolate_incoming(progress, stage)
    };
    Some(patch)
}
