//! Global pointer listener registration as a scoped resource.
//!
//! Pointer move/up listeners are attached to the whole window once when the
//! panel opens, so a release outside the panel still ends the gesture. The
//! registration is held by a [`ListenerGuard`]; dropping the guard removes
//! the listeners on every exit path (close, drop, early return).

use std::cell::{Cell, RefCell};
use std::fmt;
use std::rc::Rc;
use tracing::debug;

/// Handle for one global listener registration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u64);

impl SubscriptionId {
    /// Wrap a platform registration handle.
    pub const fn new(raw: u64) -> Self {
        Self(raw)
    }

    /// Raw platform handle.
    pub const fn get(&self) -> u64 {
        self.0
    }
}

/// Window-level pointer move/up event source.
pub trait GlobalPointerEvents {
    /// Attach the global pointer move and pointer up listeners.
    fn subscribe(&self) -> SubscriptionId;

    /// Detach listeners attached by `subscribe`.
    fn unsubscribe(&self, id: SubscriptionId);
}

/// Keeps global listeners attached for as long as it lives.
pub struct ListenerGuard {
    events: Rc<dyn GlobalPointerEvents>,
    id: SubscriptionId,
}

impl ListenerGuard {
    /// Subscribe and return the guard owning the registration.
    pub fn acquire(events: Rc<dyn GlobalPointerEvents>) -> Self {
        let id = events.subscribe();
        debug!(subscription = id.get(), "Global pointer listeners attached");
        Self { events, id }
    }

    /// Registration handle.
    pub fn id(&self) -> SubscriptionId {
        self.id
    }
}

impl Drop for ListenerGuard {
    fn drop(&mut self) {
        self.events.unsubscribe(self.id);
        debug!(subscription = self.id.get(), "Global pointer listeners detached");
    }
}

impl fmt::Debug for ListenerGuard {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ListenerGuard").field("id", &self.id).finish()
    }
}

/// In-process listener registry that tracks attached subscriptions.
#[derive(Debug, Default)]
pub struct ListenerRegistry {
    next_id: Cell<u64>,
    active: RefCell<Vec<SubscriptionId>>,
    subscribed: Cell<usize>,
}

impl ListenerRegistry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of registrations currently attached.
    pub fn active_count(&self) -> usize {
        self.active.borrow().len()
    }

    /// Total `subscribe` calls.
    pub fn subscribe_count(&self) -> usize {
        self.subscribed.get()
    }
}

impl GlobalPointerEvents for ListenerRegistry {
    fn subscribe(&self) -> SubscriptionId {
        let id = SubscriptionId::new(self.next_id.get() + 1);
        self.next_id.set(id.get());
        self.active.borrow_mut().push(id);
        self.subscribed.set(self.subscribed.get() + 1);
        id
    }

    fn unsubscribe(&self, id: SubscriptionId) {
        self.active.borrow_mut().retain(|active| *active != id);
    }
}
