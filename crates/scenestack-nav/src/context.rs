#![forbid(unsafe_code)]

//! Focus event fan-out.
//!
//! A [`NavigationContext`] is a cheaply cloned handle to a listener registry.
//! Listeners are registered per [`FocusEventKind`] and stay registered for
//! as long as the returned [`ListenerSubscription`] lives.
//!
//! # Invariants
//!
//! - Listeners run in registration order.
//! - Registering or dropping listeners from inside a listener is allowed; the
//!   change takes effect from the next emit.
//! - A subscription outliving its context unsubscribes as a no-op.

use std::cell::RefCell;
use std::fmt;
use std::rc::{Rc, Weak};

/// Which focus transition an event reports.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FocusEventKind {
    /// The route is about to be presented.
    WillFocus,
    /// The route is presented and its transition has settled.
    DidFocus,
}

/// One focus event.
#[derive(Debug, Clone, Copy)]
pub struct FocusEvent<'a, R> {
    pub kind: FocusEventKind,
    pub route: &'a R,
}

type Listener<R> = Rc<dyn Fn(&FocusEvent<'_, R>)>;

struct Registry<R> {
    next_id: u64,
    listeners: Vec<(u64, FocusEventKind, Listener<R>)>,
}

/// Shared focus listener registry.
pub struct NavigationContext<R> {
    inner: Rc<RefCell<Registry<R>>>,
}

impl<R> Clone for NavigationContext<R> {
    fn clone(&self) -> Self {
        Self {
            inner: Rc::clone(&self.inner),
        }
    }
}

impl<R: 'static> Default for NavigationContext<R> {
    fn default() -> Self {
        Self::new()
    }
}

impl<R> fmt::Debug for NavigationContext<R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("NavigationContext")
            .field("listeners", &self.inner.borrow().listeners.len())
            .finish()
    }
}

impl<R: 'static> NavigationContext<R> {
    #[must_use]
    pub fn new() -> Self {
        Self {
            inner: Rc::new(RefCell::new(Registry {
                next_id: 0,
                listeners: Vec::new(),
            })),
        }
    }

    /// Register `listener` for events of `kind`.
    #[must_use = "dropping the subscription unregisters the listener"]
    pub fn add_listener(
        &self,
        kind: FocusEventKind,
        listener: impl Fn(&FocusEvent<'_, R>) + 'static,
    ) -> ListenerSubscription {
        let id = {
            let mut registry = self.inner.borrow_mut();
            let id = registry.next_id;
            registry.next_id += 1;
            registry.listeners.push((id, kind, Rc::new(listener)));
            id
        };
        let weak: Weak<RefCell<Registry<R>>> = Rc::downgrade(&self.inner);
        ListenerSubscription {
            release: Some(Box::new(move || {
                let Some(inner) = weak.upgrade() else {
                    return;
                };
                // Drop the listener after releasing the borrow; its captures
                // may hold further subscriptions.
                let removed = {
                    let mut registry = inner.borrow_mut();
                    registry
                        .listeners
                        .iter()
                        .position(|(lid, _, _)| *lid == id)
                        .map(|pos| registry.listeners.remove(pos))
                };
                drop(removed);
            })),
        }
    }

    /// Deliver an event to every listener registered for `kind`.
    pub fn emit(&self, kind: FocusEventKind, route: &R) {
        let listeners: Vec<Listener<R>> = self
            .inner
            .borrow()
            .listeners
            .iter()
            .filter(|(_, k, _)| *k == kind)
            .map(|(_, _, l)| Rc::clone(l))
            .collect();
        let event = FocusEvent { kind, route };
        for listener in listeners {
            listener(&event);
        }
    }

    /// Number of registered listeners.
    #[must_use]
    pub fn listener_count(&self) -> usize {
        self.inner.borrow().listeners.len()
    }

    /// Drop every listener.
    pub fn dispose(&self) {
        let drained = std::mem::take(&mut self.inner.borrow_mut().listeners);
        drop(drained);
    }
}

/// RAII guard for a registered listener.
pub struct ListenerSubscription {
    release: Option<Box<dyn FnOnce()>>,
}

impl ListenerSubscription {
    /// Keep the listener registered for the lifetime of its context.
    pub fn forget(mut self) {
        self.release = None;
    }
}

impl fmt::Debug for ListenerSubscription {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ListenerSubscription")
            .field("active", &self.release.is_some())
            .finish()
    }
}

impl Drop for ListenerSubscription {
    fn drop(&mut self) {
        if let Some(release) = self.release.take() {
            release();
        }
    }
}
