//! Cart Observer

use rust_decimal::Decimal;
use slotmap::{SlotMap, new_key_type};

use crate::{cart::CartItems, storage::StorageError};

new_key_type! {
    /// Handle returned when subscribing an observer.
    pub struct SubscriptionKey;
}

/// Observer trait for following changes to the cart.
///
/// Callbacks run after a commit has replaced the cart snapshot, and only
/// then. Operations that turn out to be no-ops do not commit, so observers
/// never hear about them.
///
/// Count and total callbacks fire only when the derived value differs from the
/// one the store last reported.
pub trait CartObserver {
    /// Called with the new snapshot after every commit.
    fn on_items_changed(&mut self, items: &CartItems);

    /// Called when the line item count changed.
    fn on_count_changed(&mut self, _count: usize) {}

    /// Called when the cart total changed.
    fn on_total_changed(&mut self, _total: Decimal) {}

    /// Called once, when persistence fails and the store stops writing to
    /// storage for the rest of the session.
    fn on_persistence_degraded(&mut self, _error: &StorageError) {}
}

/// Observer that ignores every callback.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoopObserver;

impl CartObserver for NoopObserver {
    fn on_items_changed(&mut self, _items: &CartItems) {}
}

/// Registered observers, keyed by subscription.
#[derive(Default)]
pub struct Observers {
    observers: SlotMap<SubscriptionKey, Box<dyn CartObserver>>,
}

impl Observers {
    /// Register an observer.
    pub fn subscribe(&mut self, observer: Box<dyn CartObserver>) -> SubscriptionKey {
        self.observers.insert(observer)
    }

    /// Remove an observer, handing it back if it was registered.
    pub fn unsubscribe(&mut self, key: SubscriptionKey) -> Option<Box<dyn CartObserver>> {
        self.observers.remove(key)
    }

    /// Number of registered observers.
    pub fn len(&self) -> usize {
        self.observers.len()
    }

    /// Whether no observer is registered.
    pub fn is_empty(&self) -> bool {
        self.observers.is_empty()
    }

    /// Run `f` against each observer in registration order.
    pub fn notify(&mut self, mut f: impl FnMut(&mut dyn CartObserver)) {
        for observer in self.observers.values_mut() {
            f(observer.as_mut());
        }
    }
}

impl std::fmt::Debug for Observers {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Observers")
            .field("len", &self.observers.len())
            .finish()
    }
}

#[cfg(test)]
pub(crate) mod recording {
    use std::{cell::RefCell, rc::Rc};

    use super::*;

    /// Everything a [`RecordingObserver`] has seen.
    #[derive(Debug, Default)]
    pub(crate) struct Recorded {
        pub(crate) snapshots: Vec<CartItems>,
        pub(crate) counts: Vec<usize>,
        pub(crate) totals: Vec<Decimal>,
        pub(crate) degraded: Vec<String>,
    }

    /// Observer that records callbacks into a shared log.
    #[derive(Debug, Default, Clone)]
    pub(crate) struct RecordingObserver {
        pub(crate) log: Rc<RefCell<Recorded>>,
    }

    impl CartObserver for RecordingObserver {
        fn on_items_changed(&mut self, items: &CartItems) {
            self.log.borrow_mut().snapshots.push(items.clone());
        }

        fn on_count_changed(&mut self, count: usize) {
            self.log.borrow_mut().counts.push(count);
        }

        fn on_total_changed(&mut self, total: Decimal) {
            self.log.borrow_mut().totals.push(total);
        }

        fn on_persistence_degraded(&mut self, error: &StorageError) {
            self.log.borrow_mut().degraded.push(error.to_string());
        }
    }
}
