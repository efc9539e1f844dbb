//! Synchronous observer list
//!
//! Listeners are plain `FnMut` closures; everything runs on the UI thread so
//! there are no `Send` bounds.

use std::fmt;

/// Handle returned by [`EventSource::subscribe`], used to unsubscribe later.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u64);

type Listener<E> = Box<dyn FnMut(&E)>;

pub struct EventSource<E> {
    listeners: Vec<(SubscriptionId, Listener<E>)>,
    next_id: u64,
}

impl<E> Default for EventSource<E> {
    fn default() -> Self {
        Self {
            listeners: Vec::new(),
            next_id: 1,
        }
    }
}

impl<E> fmt::Debug for EventSource<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EventSource")
            .field("listeners", &self.listeners.len())
            .finish()
    }
}

impl<E> EventSource<E> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn subscribe(&mut self, listener: impl FnMut(&E) + 'static) -> SubscriptionId {
        let id = SubscriptionId(self.next_id);
        self.next_id = self.next_id.wrapping_add(1);
        self.listeners.push((id, Box::new(listener)));
        id
    }

    /// Returns false if the id was unknown (already removed or never issued here).
    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        let before = self.listeners.len();
        self.listeners.retain(|(sid, _)| *sid != id);
        self.listeners.len() != before
    }

    /// Invoke every listener in subscription order. No listeners is a no-op.
    pub fn publish(&mut self, event: &E) {
        for (_, listener) in self.listeners.iter_mut() {
            listener(event);
        }
    }

    pub fn len(&self) -> usize {
        self.listeners.len()
    }

    pub fn is_empty(&self) -> bool {
        self.listeners.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::rc::Rc;

    #[test]
    fn publish_without_listeners_is_noop() {
        let mut source: EventSource<u32> = EventSource::new();
        source.publish(&7);
        assert!(source.is_empty());
    }

    #[test]
    fn listeners_run_in_subscription_order() {
        let seen = Rc::new(RefCell::new(Vec::new()));
        let mut source = EventSource::new();
        for tag in ["a", "b", "c"] {
            let seen = seen.clone();
            source.subscribe(move |n: &u32| seen.borrow_mut().push(format!("{tag}{n}")));
        }

        source.publish(&1);
        source.publish(&2);

        assert_eq!(*seen.borrow(), vec!["a1", "b1", "c1", "a2", "b2", "c2"]);
    }

    #[test]
    fn unsubscribed_listener_stops_receiving() {
        let count = Rc::new(RefCell::new(0));
        let mut source = EventSource::new();
        let c = count.clone();
        let id = source.subscribe(move |_: &()| *c.borrow_mut() += 1);

        source.publish(&());
        assert!(source.unsubscribe(id));
        source.publish(&());

        assert_eq!(*count.borrow(), 1);
        assert!(!source.unsubscribe(id));
    }

    #[test]
    fn subscription_ids_are_unique() {
        let mut source: EventSource<()> = EventSource::new();
        let a = source.subscribe(|_| {});
        let b = source.subscribe(|_| {});
        assert_ne!(a, b);
        assert_eq!(source.len(), 2);
    }
}
