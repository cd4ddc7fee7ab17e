//! Key press subscriptions.
//!
//! Most keys are interpreted directly by the handler according to the input
//! mode. Bindings that only exist while some piece of UI is open (Esc closing
//! the detail view) are registered here instead, and removed again when that
//! UI goes away.

use super::handler::Event;

/// A key press, reduced to what the plugin distinguishes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Key {
    Enter,
    Esc,
    Up,
    Down,
    Tab,
    Backspace,
    Char(char),
}

/// Handle returned by [`KeyBindings::subscribe`].
///
/// Deliberately not `Clone`: a subscription is released exactly once, by
/// passing it back to [`KeyBindings::unsubscribe`].
#[derive(Debug, PartialEq, Eq)]
#[must_use = "dropping a subscription handle leaves the binding active"]
pub struct Subscription {
    id: u64,
    key: Key,
}

impl Subscription {
    #[must_use]
    pub const fn key(&self) -> Key {
        self.key
    }
}

/// Registry of active key subscriptions.
#[derive(Debug, Clone, Default)]
pub struct KeyBindings {
    next_id: u64,
    entries: Vec<(u64, Key, Event)>,
}

impl KeyBindings {
    /// Fires `event` once for every press of `key` until unsubscribed.
    ///
    /// # Examples
    ///
    /// ```
    /// use movielist::app::{Event, Key, KeyBindings};
    ///
    /// let mut bindings = KeyBindings::default();
    /// let subscription = bindings.subscribe(Key::Esc, Event::CloseMovie);
    /// assert_eq!(bindings.dispatch(Key::Esc), vec![Event::CloseMovie]);
    ///
    /// assert!(bindings.unsubscribe(subscription));
    /// assert!(bindings.dispatch(Key::Esc).is_empty());
    /// ```
    pub fn subscribe(&mut self, key: Key, event: Event) -> Subscription {
        self.next_id += 1;
        let id = self.next_id;
        tracing::trace!(subscription = id, key = ?key, event = ?event, "key subscribed");
        self.entries.push((id, key, event));
        Subscription { id, key }
    }

    /// Removes a subscription. Returns whether it was still registered.
    pub fn unsubscribe(&mut self, subscription: Subscription) -> bool {
        let before = self.entries.len();
        self.entries.retain(|(id, _, _)| *id != subscription.id);
        let removed = self.entries.len() != before;
        tracing::trace!(subscription = subscription.id, removed = removed, "key unsubscribed");
        removed
    }

    /// Events bound to `key`, in subscription order.
    #[must_use]
    pub fn dispatch(&self, key: Key) -> Vec<Event> {
        self.entries
            .iter()
            .filter(|(_, bound, _)| *bound == key)
            .map(|(_, _, event)| event.clone())
            .collect()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
