#![forbid(unsafe_code)]

//! Stage geometry.

/// Size of the area the navigator lays scenes out in.
///
/// Scene presets express offsets relative to the stage, and disabled scenes
/// are pushed one full stage height below the visible area.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Stage {
    pub width: f64,
    pub height: f64,
}

impl Stage {
    /// Create a stage of the given size.
    #[must_use]
    pub const fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }

    /// Whether either dimension is zero or negative.
    #[inline]
    #[must_use]
    pub fn is_empty(self) -> bool {
        self.width <= 0.0 || self.height <= 0.0
    }
}

impl Default for Stage {
    /// A phone-sized portrait stage.
    fn default() -> Self {
        Self::new(375.0, 667.0)
    }
}
