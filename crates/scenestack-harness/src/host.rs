#![forbid(unsafe_code)]

//! A scene host that remembers everything it was told.

use scenestack_nav::SceneHost;
use scenestack_style::{PointerEvents, SceneProps};

/// One `set_scene_props` call.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PropUpdate {
    pub index: usize,
    pub props: SceneProps,
}

/// Records every prop update and folds them into per-scene state.
#[derive(Debug, Clone, Default)]
pub struct RecordingHost {
    updates: Vec<PropUpdate>,
    scenes: Vec<SceneProps>,
}

impl RecordingHost {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Every update in arrival order.
    #[must_use]
    pub fn updates(&self) -> &[PropUpdate] {
        &self.updates
    }

    /// Updates addressed to `index`.
    pub fn updates_for(&self, index: usize) -> impl Iterator<Item = &SceneProps> + '_ {
        self.updates
            .iter()
            .filter(move |u| u.index == index)
            .map(|u| &u.props)
    }

    /// Forget the update log but keep the folded scene state.
    pub fn clear_updates(&mut self) {
        self.updates.clear();
    }

    /// Accumulated props of the scene at `index`.
    #[must_use]
    pub fn scene(&self, index: usize) -> Option<&SceneProps> {
        self.scenes.get(index)
    }

    /// Whether the scene at `index` currently accepts touches.
    #[must_use]
    pub fn is_enabled(&self, index: usize) -> bool {
        self.scene(index)
            .is_some_and(|p| p.pointer_events == Some(PointerEvents::Auto))
    }

    /// Indices of every enabled scene below `len`.
    #[must_use]
    pub fn enabled_scenes(&self, len: usize) -> Vec<usize> {
        (0..len).filter(|i| self.is_enabled(*i)).collect()
    }

    /// Folded scene state as JSON, one entry per scene index.
    #[must_use]
    pub fn snapshot(&self) -> serde_json::Value {
        serde_json::to_value(&self.scenes).unwrap_or(serde_json::Value::Null)
    }
}

impl SceneHost for RecordingHost {
    fn set_scene_props(&mut self, index: usize, props: &SceneProps) {
        if self.scenes.len() <= index {
            self.scenes.resize(index + 1, SceneProps::default());
        }
        self.scenes[index].merge(props);
        self.updates.push(PropUpdate {
            index,
            props: *props,
        });
    }
}
