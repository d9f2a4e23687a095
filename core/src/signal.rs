//! Single-threaded signal/slot plumbing with scoped unsubscription.
//!
//! Signals deliver synchronously in strict program order: `raise` returns
//! only after every live subscriber has run. Subscribers are detached by
//! dropping the [`Subscription`] returned from [`Signal::subscribe`]; there
//! is no manual bookkeeping entry point. A subscriber removed while a raise
//! is in flight is skipped for the remainder of that raise.

use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;

struct Slot<T> {
    id: u64,
    callback: Rc<dyn Fn(&T)>,
}

struct SlotList<T> {
    next_id: u64,
    entries: Vec<Slot<T>>,
}

/// Multicast change-notification signal.
///
/// Cloning a signal is cheap and shares the underlying slot list, so a
/// signal can be handed to a forwarding closure while its owner keeps
/// raising through the original handle.
pub struct Signal<T> {
    slots: Rc<RefCell<SlotList<T>>>,
}

// The detach closure inside a Subscription owns a weak handle to the
// slot list, so the payload type must not borrow from the caller.
impl<T: 'static> Signal<T> {
    /// Creates a new signal with no subscribers.
    #[must_use]
    pub fn new() -> Self {
        Self {
            slots: Rc::new(RefCell::new(SlotList {
                next_id: 0,
                entries: Vec::new(),
            })),
        }
    }

    /// Registers a subscriber and returns the handle that keeps it alive.
    #[must_use]
    pub fn subscribe(&self, callback: impl Fn(&T) + 'static) -> Subscription {
        let id = {
            let mut list = self.slots.borrow_mut();
            let id = list.next_id;
            list.next_id += 1;
            list.entries.push(Slot {
                id,
                callback: Rc::new(callback),
            });
            id
        };
        let slots = Rc::downgrade(&self.slots);
        Subscription {
            detach: Some(Box::new(move || {
                if let Some(slots) = slots.upgrade() {
                    slots.borrow_mut().entries.retain(|slot| slot.id != id);
                }
            })),
        }
    }

    /// Invokes every live subscriber with the provided value.
    ///
    /// The slot list is snapshotted up front so subscribers may subscribe
    /// or unsubscribe (including themselves) while the raise is running;
    /// newly added subscribers are not invoked until the next raise.
    pub fn raise(&self, value: &T) {
        let snapshot: Vec<Slot<T>> = self
            .slots
            .borrow()
            .entries
            .iter()
            .map(|slot| Slot {
                id: slot.id,
                callback: Rc::clone(&slot.callback),
            })
            .collect();
        for slot in snapshot {
            let live = self
                .slots
                .borrow()
                .entries
                .iter()
                .any(|entry| entry.id == slot.id);
            if live {
                (slot.callback)(value);
            }
        }
    }

    /// Number of currently live subscriptions.
    #[must_use]
    pub fn subscriber_count(&self) -> usize {
        self.slots.borrow().entries.len()
    }
}

impl<T: 'static> Clone for Signal<T> {
    fn clone(&self) -> Self {
        Self {
            slots: Rc::clone(&self.slots),
        }
    }
}

impl<T: 'static> Default for Signal<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: 'static> fmt::Debug for Signal<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Signal")
            .field("subscribers", &self.subscriber_count())
            .finish()
    }
}

/// Handle tying a subscriber's lifetime to a scope.
///
/// Dropping the subscription detaches the subscriber; dropping it after the
/// signal itself is gone is a no-op.
#[must_use = "dropping a subscription detaches the subscriber"]
pub struct Subscription {
    detach: Option<Box<dyn FnOnce()>>,
}

impl Drop for Subscription {
    fn drop(&mut self) {
        if let Some(detach) = self.detach.take() {
            detach();
        }
    }
}

impl fmt::Debug for Subscription {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Subscription").finish()
    }
}
