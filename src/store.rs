//! Cart Store
//!
//! The cart state container. It owns the current [`CartItems`] snapshot and
//! is the only place that replaces it. Every mutation reads the whole
//! snapshot, computes the next one and commits it as a unit: the snapshot is
//! swapped, derived values are invalidated, the new cart is written to
//! storage and observers are told, in that order.

use std::sync::Arc;

use rust_decimal::Decimal;
use tracing::{debug, instrument};

use crate::{
    cart::CartItems,
    derived::DerivedValues,
    observer::{CartObserver, Observers, SubscriptionKey},
    operations::CartOperation,
    persistence::{CartSlot, Persistence},
    products::{Product, ProductRef},
    storage::Storage,
};

/// Derived values as last reported to observers.
#[derive(Debug, Clone, Copy)]
struct Reported {
    count: usize,
    total: Decimal,
}

/// Persisted, observable shopping cart.
#[derive(Debug)]
pub struct CartStore<S: Storage> {
    items: Arc<CartItems>,
    revision: u64,
    derived: DerivedValues,
    observers: Observers,
    reported: Option<Reported>,
    slot: CartSlot<S>,
}

impl<S: Storage> CartStore<S> {
    /// Open a store on the default `cartItems` slot of `storage`, rehydrating
    /// whatever was persisted there.
    pub fn open(storage: S) -> Self {
        Self::with_slot(CartSlot::with_default_key(storage))
    }

    /// Open a store on an explicit slot.
    pub fn with_slot(mut slot: CartSlot<S>) -> Self {
        let items = slot.get();

        // Already logged by the slot; nobody is subscribed yet to hear about it.
        slot.take_failure();

        Self {
            items: Arc::new(items),
            revision: 0,
            derived: DerivedValues::new(),
            observers: Observers::default(),
            reported: None,
            slot,
        }
    }

    /// Current cart contents.
    pub fn items(&self) -> &CartItems {
        &self.items
    }

    /// Shared handle to the current snapshot.
    ///
    /// The snapshot never changes; later commits replace the store's handle
    /// instead.
    pub fn snapshot(&self) -> Arc<CartItems> {
        Arc::clone(&self.items)
    }

    /// Number of commits since the store was opened.
    pub fn revision(&self) -> u64 {
        self.revision
    }

    /// Number of line items.
    pub fn count(&self) -> usize {
        *self.derived.count.get(&self.items)
    }

    /// Sum of price × quantity over the cart.
    pub fn total(&self) -> Decimal {
        *self.derived.total.get(&self.items)
    }

    /// Derived value cells, for inspecting caching behaviour.
    pub fn derived(&self) -> &DerivedValues {
        &self.derived
    }

    /// Add `product` at quantity one. Adding a product already in the cart
    /// changes nothing, and so does an add that would overflow the total.
    ///
    /// Accepts a [`Product`] or a [`CartItem`](crate::items::CartItem); an
    /// item's quantity is ignored.
    ///
    /// Returns whether the cart changed.
    pub fn add(&mut self, product: &impl AsRef<Product>) -> bool {
        self.apply(&CartOperation::Add(product.as_ref().clone()))
    }

    /// Remove the line item for `product`.
    ///
    /// Returns whether the cart changed.
    pub fn remove(&mut self, product: &impl ProductRef) -> bool {
        self.apply(&CartOperation::remove(product))
    }

    /// Raise the quantity of `product` by one.
    ///
    /// Returns whether the cart changed.
    pub fn increment(&mut self, product: &impl ProductRef) -> bool {
        self.apply(&CartOperation::increment(product))
    }

    /// Lower the quantity of `product` by one, removing it at zero.
    ///
    /// Returns whether the cart changed.
    pub fn decrement(&mut self, product: &impl ProductRef) -> bool {
        self.apply(&CartOperation::decrement(product))
    }

    /// Apply an operation to the current snapshot and commit the result.
    ///
    /// Returns whether the cart changed. A no-op commits nothing: the
    /// snapshot, derived values and storage are left as they were and no
    /// observer is called.
    #[instrument(name = "cart_store.apply", skip_all, fields(operation = %operation))]
    pub fn apply(&mut self, operation: &CartOperation) -> bool {
        match operation.apply(&self.items) {
            Some(next) => {
                self.commit(next);

                true
            }
            None => {
                debug!("operation left the cart unchanged");

                false
            }
        }
    }

    /// Register an observer for future commits.
    pub fn subscribe(&mut self, observer: impl CartObserver + 'static) -> SubscriptionKey {
        if self.observers.is_empty() {
            self.reported = Some(Reported {
                count: self.count(),
                total: self.total(),
            });
        }

        self.observers.subscribe(Box::new(observer))
    }

    /// Remove an observer. Returns whether it was registered.
    pub fn unsubscribe(&mut self, key: SubscriptionKey) -> bool {
        let removed = self.observers.unsubscribe(key).is_some();

        if self.observers.is_empty() {
            self.reported = None;
        }

        removed
    }

    /// Whether commits still reach storage.
    pub fn persistence(&self) -> Persistence {
        self.slot.persistence()
    }

    /// The storage slot backing the store.
    pub fn slot(&self) -> &CartSlot<S> {
        &self.slot
    }

    fn commit(&mut self, next: CartItems) {
        self.items = Arc::new(next);
        self.revision += 1;
        self.derived.invalidate();

        debug!(
            revision = self.revision,
            line_items = self.items.len(),
            "committed cart"
        );

        self.slot.set(&self.items);
        let failure = self.slot.take_failure();

        if self.observers.is_empty() {
            return;
        }

        let items = &self.items;
        self.observers
            .notify(|observer| observer.on_items_changed(items));

        let count = *self.derived.count.get(&self.items);
        let total = *self.derived.total.get(&self.items);
        let previous = self.reported.replace(Reported { count, total });

        if previous.is_none_or(|reported| reported.count != count) {
            self.observers
                .notify(|observer| observer.on_count_changed(count));
        }

        if previous.is_none_or(|reported| reported.total != total) {
            self.observers
                .notify(|observer| observer.on_total_changed(total));
        }

        if let Some(error) = failure {
            self.observers
                .notify(|observer| observer.on_persistence_degraded(&error));
        }
    }
}
