//=========================================================================
// Channel
//=========================================================================
//
// Single-threaded observable value with synchronous broadcast.
//
// Architecture:
//   publish(value) → current = value → listeners (subscription order)
//   subscribe(cb)  → cb(current) → listeners.push(cb) → Subscription
//
// Listeners are snapshotted before delivery, so a listener may subscribe,
// unsubscribe or publish on the same channel without a borrow conflict.
// A listener is never re-entered while it is running; a nested publish
// skips it and logs a warning.
//
//=========================================================================

//=== External Dependencies ===============================================

use std::cell::RefCell;
use std::rc::{Rc, Weak};

use log::warn;

//=== Internal Dependencies ===============================================

use super::subscription::{ListenerSet, Subscription};

//=== Internal Types ======================================================

type Listener<T> = Rc<RefCell<dyn FnMut(&T)>>;

pub(super) struct Shared<T> {
    current: T,
    listeners: Vec<(u64, Listener<T>)>,
    next_id: u64,
}

impl<T> ListenerSet for RefCell<Shared<T>> {
    fn remove(&self, id: u64) -> bool {
        let mut shared = self.borrow_mut();
        let before = shared.listeners.len();
        shared.listeners.retain(|(listener_id, _)| *listener_id != id);
        shared.listeners.len() != before
    }

    fn contains(&self, id: u64) -> bool {
        self.borrow()
            .listeners
            .iter()
            .any(|(listener_id, _)| *listener_id == id)
    }
}

//=== Channel =============================================================

/// Observable value with ordered, synchronous delivery.
///
/// New subscribers receive the current value immediately, then every
/// published value until they unsubscribe.
pub struct Channel<T> {
    shared: Rc<RefCell<Shared<T>>>,
}

impl<T: Clone + 'static> Channel<T> {
    /// Creates a channel holding `initial`.
    pub fn new(initial: T) -> Self {
        Self {
            shared: Rc::new(RefCell::new(Shared {
                current: initial,
                listeners: Vec::new(),
                next_id: 0,
            })),
        }
    }

    /// Returns a copy of the current value.
    pub fn get(&self) -> T {
        self.shared.borrow().current.clone()
    }

    /// Stores `value` and delivers it to every current subscriber.
    pub fn publish(&self, value: T) {
        let listeners: Vec<(u64, Listener<T>)> = {
            let mut shared = self.shared.borrow_mut();
            shared.current = value.clone();
            shared
                .listeners
                .iter()
                .map(|(id, l)| (*id, Rc::clone(l)))
                .collect()
        };

        for (id, listener) in &listeners {
            // an earlier listener may have unsubscribed this one
            if self.shared.contains(*id) {
                Self::deliver(listener, &value);
            }
        }
    }

    /// Registers `listener` and immediately hands it the current value.
    pub fn subscribe<F>(&self, listener: F) -> Subscription
    where
        F: FnMut(&T) + 'static,
    {
        let listener: Listener<T> = Rc::new(RefCell::new(listener));

        let (id, current) = {
            let mut shared = self.shared.borrow_mut();
            let id = shared.next_id;
            shared.next_id += 1;
            shared.listeners.push((id, Rc::clone(&listener)));
            (id, shared.current.clone())
        };

        Self::deliver(&listener, &current);

        let set = Rc::downgrade(&self.shared);
        let set: Weak<dyn ListenerSet> = set;
        Subscription::attached(set, id)
    }

    /// Number of registered listeners.
    pub fn subscriber_count(&self) -> usize {
        self.shared.borrow().listeners.len()
    }

    //--- Internal Helpers -------------------------------------------------

    fn deliver(listener: &Listener<T>, value: &T) {
        match listener.try_borrow_mut() {
            Ok(mut callback) => (*callback)(value),
            Err(_) => warn!(target: "pointers", "Skipping re-entrant listener delivery"),
        }
    }
}

impl<T> std::fmt::Debug for Channel<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self.shared.try_borrow() {
            Ok(shared) => f
                .debug_struct("Channel")
                .field("subscribers", &shared.listeners.len())
                .finish(),
            Err(_) => f.debug_struct("Channel").finish_non_exhaustive(),
        }
    }
}

//=========================================================================
// Unit Tests
//=========================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn recorder() -> (Rc<RefCell<Vec<i32>>>, impl FnMut(&i32) + 'static) {
        let seen = Rc::new(RefCell::new(Vec::new()));
        let sink = Rc::clone(&seen);
        (seen, move |v: &i32| sink.borrow_mut().push(*v))
    }

    #[test]
    fn subscribe_delivers_current_value() {
        let channel = Channel::new(5);
        let (seen, listener) = recorder();

        let _sub = channel.subscribe(listener);

        assert_eq!(*seen.borrow(), vec![5]);
    }

    #[test]
    fn publish_reaches_all_subscribers_in_order() {
        let channel = Channel::new(0);
        let order = Rc::new(RefCell::new(Vec::new()));

        for tag in ["a", "b"] {
            let order = Rc::clone(&order);
            let _ = channel.subscribe(move |v: &i32| order.borrow_mut().push((tag, *v)));
        }
        order.borrow_mut().clear();

        channel.publish(1);
        channel.publish(2);

        assert_eq!(*order.borrow(), vec![("a", 1), ("b", 1), ("a", 2), ("b", 2)]);
        assert_eq!(channel.get(), 2);
    }

    #[test]
    fn unsubscribe_stops_delivery() {
        let channel = Channel::new(0);
        let (seen, listener) = recorder();

        let sub = channel.subscribe(listener);
        channel.publish(1);
        sub.unsubscribe();
        channel.publish(2);

        assert_eq!(*seen.borrow(), vec![0, 1]);
        assert_eq!(channel.subscriber_count(), 0);
    }

    #[test]
    fn unsubscribe_after_channel_dropped_is_noop() {
        let channel = Channel::new(0);
        let sub = channel.subscribe(|_: &i32| {});
        drop(channel);

        assert!(!sub.is_active());
        sub.unsubscribe();
    }

    #[test]
    fn nested_publish_does_not_reenter_listener() {
        let channel = Rc::new(Channel::new(0));
        let calls = Rc::new(RefCell::new(0));

        let inner = Rc::clone(&channel);
        let counter = Rc::clone(&calls);
        let _sub = channel.subscribe(move |v: &i32| {
            *counter.borrow_mut() += 1;
            if *v == 1 {
                inner.publish(2);
            }
        });

        channel.publish(1);

        // initial delivery + publish(1); the nested publish(2) is skipped
        assert_eq!(*calls.borrow(), 2);
        assert_eq!(channel.get(), 2);
    }

    #[test]
    fn listener_unsubscribed_mid_publish_misses_that_value() {
        let channel = Channel::new(0);
        let (seen, listener) = recorder();
        let target: Rc<RefCell<Option<Subscription>>> = Rc::new(RefCell::new(None));

        let pending = Rc::clone(&target);
        let _first = channel.subscribe(move |v: &i32| {
            if *v == 1 {
                if let Some(sub) = pending.borrow_mut().take() {
                    sub.unsubscribe();
                }
            }
        });
        *target.borrow_mut() = Some(channel.subscribe(listener));

        channel.publish(1);

        assert_eq!(*seen.borrow(), vec![0]);
        assert_eq!(channel.subscriber_count(), 1);
    }

    #[test]
    fn listener_may_subscribe_during_delivery() {
        let channel = Rc::new(Channel::new(0));
        let inner = Rc::clone(&channel);

        let _sub = channel.subscribe(move |v: &i32| {
            if *v == 1 {
                let _ = inner.subscribe(|_: &i32| {});
            }
        });

        channel.publish(1);
        assert_eq!(channel.subscriber_count(), 2);
    }
}
