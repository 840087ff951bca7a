//! Notification channel observed by code outside the widget.
//!
//! Delivery is synchronous and in subscription order. Subscribers are
//! snapshotted before each delivery, so a callback may subscribe or
//! unsubscribe without disturbing the notification in flight.

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use super::file::SelectedFile;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Notification {
    Connect,
    Clear,
    Change(SelectedFile),
}

impl Notification {
    pub fn name(&self) -> &'static str {
        match self {
            Notification::Connect => "connect",
            Notification::Clear => "clear",
            Notification::Change(_) => "change",
        }
    }

    /// DOM event type, e.g. `dropzone:change`.
    pub fn event_type(&self, prefix: &str) -> String {
        format!("{}:{}", prefix, self.name())
    }

    pub fn file(&self) -> Option<&SelectedFile> {
        match self {
            Notification::Change(file) => Some(file),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SubscriptionId(u64);

type Listener = Rc<dyn Fn(&Notification)>;

/// Shared registry of notification listeners.
///
/// Cloning yields another handle onto the same registry.
#[derive(Clone, Default)]
pub struct Subscribers {
    listeners: Rc<RefCell<Vec<(SubscriptionId, Listener)>>>,
    next_id: Rc<Cell<u64>>,
}

impl Subscribers {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn subscribe<F>(&self, listener: F) -> SubscriptionId
    where
        F: Fn(&Notification) + 'static,
    {
        let id = SubscriptionId(self.next_id.get());
        self.next_id.set(id.0 + 1);
        self.listeners.borrow_mut().push((id, Rc::new(listener)));
        id
    }

    /// Returns whether the listener was still registered.
    pub fn unsubscribe(&self, id: SubscriptionId) -> bool {
        let mut listeners = self.listeners.borrow_mut();
        let before = listeners.len();
        listeners.retain(|(existing, _)| *existing != id);
        listeners.len() != before
    }

    pub fn len(&self) -> usize {
        self.listeners.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn publish(&self, notification: &Notification) {
        let snapshot: Vec<Listener> = self
            .listeners
            .borrow()
            .iter()
            .map(|(_, listener)| Rc::clone(listener))
            .collect();

        for listener in snapshot {
            listener(notification);
        }
    }
}
