#![forbid(unsafe_code)]

//! Partial scene styles.
//!
//! A [`StylePatch`] names only the properties it changes; absent fields keep
//! whatever the scene already has. [`SceneProps`] adds pointer-event routing
//! and is what a scene host receives from the navigator.
//!
//! # Invariants
//!
//! - An empty patch is never sent to a host.
//! - Merging is last-writer-wins per field.
//! - A disabled scene is one full stage height below the visible area, has
//!   zero opacity, and receives no pointer events.

use scenestack_core::Stage;

/// Whether a scene receives pointer events.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "kebab-case"))]
pub enum PointerEvents {
    #[default]
    Auto,
    None,
}

/// Partial visual style for one scene.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct StylePatch {
    #[cfg_attr(feature = "serde", serde(skip_serializing_if = "Option::is_none"))]
    pub top: Option<f64>,
    #[cfg_attr(feature = "serde", serde(skip_serializing_if = "Option::is_none"))]
    pub bottom: Option<f64>,
    #[cfg_attr(feature = "serde", serde(skip_serializing_if = "Option::is_none"))]
    pub opacity: Option<f64>,
    #[cfg_attr(feature = "serde", serde(skip_serializing_if = "Option::is_none"))]
    pub translate_x: Option<f64>,
    #[cfg_attr(feature = "serde", serde(skip_serializing_if = "Option::is_none"))]
    pub translate_y: Option<f64>,
    #[cfg_attr(feature = "serde", serde(skip_serializing_if = "Option::is_none"))]
    pub scale: Option<f64>,
}

impl StylePatch {
    /// An empty patch.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            top: None,
            bottom: None,
            opacity: None,
            translate_x: None,
            translate_y: None,
            scale: None,
        }
    }

    #[must_use]
    pub const fn top(mut self, top: f64) -> Self {
        self.top = Some(top);
        self
    }

    #[must_use]
    pub const fn bottom(mut self, bottom: f64) -> Self {
        self.bottom = Some(bottom);
        self
    }

    #[must_use]
    pub const fn opacity(mut self, opacity: f64) -> Self {
        self.opacity = Some(opacity);
        self
    }

    #[must_use]
    pub const fn translate_x(mut self, x: f64) -> Self {
        self.translate_x = Some(x);
        self
    }

    #[must_use]
    pub const fn translate_y(mut self, y: f64) -> Self {
        self.translate_y = Some(y);
        self
    }

    #[must_use]
    pub const fn scale(mut self, scale: f64) -> Self {
        self.scale = Some(scale);
        self
    }

    /// Whether the patch changes nothing.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.top.is_none()
            && self.bottom.is_none()
            && self.opacity.is_none()
            && self.translate_x.is_none()
            && self.translate_y.is_none()
            && self.scale.is_none()
    }

    /// Overlay `other` onto `self`; fields set in `other` win.
    pub fn merge(&mut self, other: &StylePatch) {
        self.top = other.top.or(self.top);
        self.bottom = other.bottom.or(self.bottom);
        self.opacity = other.opacity.or(self.opacity);
        self.translate_x = other.translate_x.or(self.translate_x);
        self.translate_y = other.translate_y.or(self.translate_y);
        self.scale = other.scale.or(self.scale);
    }
}

/// Imperative props pushed to one scene.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SceneProps {
    #[cfg_attr(feature = "serde", serde(skip_serializing_if = "Option::is_none"))]
    pub pointer_events: Option<PointerEvents>,
    pub style: StylePatch,
}

impl SceneProps {
    /// Props carrying only a style patch.
    #[must_use]
    pub const fn style(style: StylePatch) -> Self {
        Self {
            pointer_events: None,
            style,
        }
    }

    /// Props that move a scene off-stage and stop it intercepting touches.
    #[must_use]
    pub const fn disabled(stage: Stage) -> Self {
        Self {
            pointer_events: Some(PointerEvents::None),
            style: StylePatch::new()
                .top(stage.height)
                .bottom(-stage.height)
                .opacity(0.0),
        }
    }

    /// Props that put a scene back on stage.
    ///
    /// A scene enabled ahead of its transition is kept transparent so it
    /// cannot flash over the presented scene before its first frame.
    #[must_use]
    pub const fn enabled(transparent: bool) -> Self {
        let style = StylePatch::new().top(0.0).bottom(0.0);
        Self {
            pointer_events: Some(PointerEvents::Auto),
            style: if transparent { style.opacity(0.0) } else { style },
        }
    }

    /// Whether these props change nothing.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.pointer_events.is_none() && self.style.is_empty()
    }

    /// Overlay `other` onto `self`.
    pub fn merge(&mut self, other: &SceneProps) {
        self.pointer_events = other.pointer_events.or(self.pointer_events);
        self.style.merge(&other.style);
    }
}
