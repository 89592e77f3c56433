#![forbid(unsafe_code)]

//! Focus event capture.

use std::cell::RefCell;
use std::rc::Rc;

use scenestack_nav::{FocusEventKind, ListenerSubscription, NavigationContext, Route};

/// Records focus events from a [`NavigationContext`] while it lives.
///
/// Attach it to a context before handing the context to the navigator
/// builder to also catch the initial will-focus.
pub struct FocusRecorder<R> {
    events: Rc<RefCell<Vec<(FocusEventKind, R)>>>,
    _subscriptions: [ListenerSubscription; 2],
}

impl<R: Route> FocusRecorder<R> {
    #[must_use]
    pub fn attach(context: &NavigationContext<R>) -> Self {
        let events: Rc<RefCell<Vec<(FocusEventKind, R)>>> = Rc::default();
        let subscribe = |kind| {
            let sink = Rc::clone(&events);
            context.add_listener(kind, move |event| {
                sink.borrow_mut().push((event.kind, event.route.clone()));
            })
        };
        let subscriptions = [
            subscribe(FocusEventKind::WillFocus),
            subscribe(FocusEventKind::DidFocus),
        ];
        Self {
            events,
            _subscriptions: subscriptions,
        }
    }

    /// Every event so far, in order.
    #[must_use]
    pub fn events(&self) -> Vec<(FocusEventKind, R)> {
        self.events.borrow().clone()
    }

    /// Drain the recorded events.
    pub fn take(&self) -> Vec<(FocusEventKind, R)> {
        std::mem::take(&mut *self.events.borrow_mut())
    }

    /// Routes that received will-focus, in order.
    #[must_use]
    pub fn will_focus(&self) -> Vec<R> {
        self.routes_of(FocusEventKind::WillFocus)
    }

    /// Routes that received did-focus, in order.
    #[must_use]
    pub fn did_focus(&self) -> Vec<R> {
        self.routes_of(FocusEventKind::DidFocus)
    }

    fn routes_of(&self, kind: FocusEventKind) -> Vec<R> {
        self.events
            .borrow()
            .iter()
            .filter(|(k, _)| *k == kind)
            .map(|(_, r)| r.clone())
            .collect()
    }
}

impl<R> std::fmt::Debug for FocusRecorder<R> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FocusRecorder")
            .field("events", &self.events.borrow().len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn records_both_kinds_until_dropped() {
        let ctx = NavigationContext::new();
        let recorder = FocusRecorder::attach(&ctx);
        ctx.emit(FocusEventKind::WillFocus, &1_u8);
        ctx.emit(FocusEventKind::DidFocus, &1_u8);
        assert_eq!(recorder.will_focus(), [1]);
        assert_eq!(recorder.did_focus(), [1]);
        assert_eq!(recorder.take().len(), 2);
        assert!(recorder.events().is_empty());
        drop(recorder);
        assert_eq!(ctx.listener_count(), 0);
    }
}
