#![forbid(unsafe_code)]

//! Transition state.
//!
//! # Phases
//!
//! | From | Event | To |
//! |------|-------|----|
//! | Idle | transition requested | Transitioning |
//! | Idle | gesture attached | Gesturing |
//! | Gesturing | release or terminate | Transitioning |
//! | Transitioning | transition requested | Transitioning (queued) |
//! | Transitioning | attached gesture moves | TransitioningWithPendingGesture |
//! | Transitioning | spring rests at 0 or 1 | Idle, or the next queued transition |
//! | TransitioningWithPendingGesture | spring rests at 0 or 1 | Gesturing |
//!
//! # Invariants
//!
//! - `from_index` is set exactly while a spring run toward `presented_index`
//!   is in flight.
//! - `active_gesture` is set only while a pointer is down and classified.
//! - The queue only grows while `from_index` is set and drains one entry per
//!   completed transition.

use std::collections::VecDeque;
use std::fmt;

use crate::scene_config::GestureAction;

/// Callback run once a navigation operation has finished.
pub type Callback = Box<dyn FnOnce()>;

/// Coarse navigator phase.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TransitionPhase {
    Idle,
    Transitioning,
    Gesturing,
    TransitioningWithPendingGesture,
}

/// Work to do when a transition settles.
#[derive(Default)]
pub(crate) struct Completion {
    /// Release every route after this index.
    pub cleanup_past: Option<usize>,
    pub callback: Option<Callback>,
}

impl Completion {
    pub fn callback(callback: Option<Callback>) -> Self {
        Self {
            cleanup_past: None,
            callback,
        }
    }

    pub fn cleanup(index: usize, callback: Option<Callback>) -> Self {
        Self {
            cleanup_past: Some(index),
            callback,
        }
    }
}

impl fmt::Debug for Completion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Completion")
            .field("cleanup_past", &self.cleanup_past)
            .field("has_callback", &self.callback.is_some())
            .finish()
    }
}

/// A transition requested while another was in flight.
#[derive(Debug)]
pub(crate) struct QueuedTransition {
    pub dest: usize,
    pub velocity: Option<f64>,
    pub completion: Completion,
}

#[derive(Debug)]
pub(crate) struct TransitionState {
    pub presented_index: usize,
    /// Source of the in-flight transition. May sit one past either end of
    /// the stack when reverting an overswipe.
    pub from_index: Option<isize>,
    pub active_gesture: Option<GestureAction>,
    pub pending_gesture_progress: Option<f64>,
    pub queue: VecDeque<QueuedTransition>,
    pub completion: Option<Completion>,
}

impl TransitionState {
    pub fn new(presented_index: usize) -> Self {
        Self {
            presented_index,
            from_index: None,
            active_gesture: None,
            pending_gesture_progress: None,
            queue: VecDeque::new(),
            completion: None,
        }
    }

    /// Forget everything but the presented index.
    pub fn reset(&mut self, presented_index: usize) -> usize {
        let discarded = self.queue.len() + usize::from(self.completion.is_some());
        *self = Self::new(presented_index);
        discarded
    }

    pub fn phase(&self) -> TransitionPhase {
        match (self.from_index, self.pending_gesture_progress, self.active_gesture) {
            (Some(_), Some(_), _) => TransitionPhase::TransitioningWithPendingGesture,
            (Some(_), None, _) => TransitionPhase::Transitioning,
            (None, _, Some(_)) => TransitionPhase::Gesturing,
            (None, _, None) => TransitionPhase::Idle,
        }
    }

    pub fn is_transitioning(&self) -> bool {
        self.from_index.is_some()
    }

    /// Index the stack will present once the queue drains.
    pub fn target_index(&self) -> usize {
        self.queue
            .back()
            .map_or(self.presented_index, |queued| queued.dest)
    }

    /// Index the active gesture is revealing.
    pub fn gesture_target(&self) -> Option<isize> {
        self.active_gesture
            .map(|action| self.presented_as_isize() + action.delta())
    }

    /// Pending progress the spring should chase, ignoring zero.
    pub fn pending_catch_up(&self) -> Option<f64> {
        self.pending_gesture_progress.filter(|p| *p != 0.0)
    }

    pub fn presented_as_isize(&self) -> isize {
        isize::try_from(self.presented_index).unwrap_or(isize::MAX)
    }
}
