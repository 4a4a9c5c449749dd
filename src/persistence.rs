//! Persistence
//!
//! Binds the cart to one named slot in a [`Storage`]. Storage failures stop at
//! this boundary: the slot logs them, stops writing for the rest of the
//! session and the cart keeps working in memory. Failed writes are not
//! retried.

use tracing::{debug, info, warn};

use crate::{
    cart::CartItems,
    storage::{Storage, StorageError},
};

/// Storage key used when none is configured.
pub const DEFAULT_KEY: &str = "cartItems";

/// Whether the slot is still writing through to storage.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Persistence {
    /// Writes reach storage.
    Durable,

    /// A storage failure happened; the cart lives in memory only.
    MemoryOnly,
}

/// A cart bound to a storage slot.
#[derive(Debug)]
pub struct CartSlot<S> {
    storage: S,
    key: String,
    persistence: Persistence,
    failure: Option<StorageError>,
}

impl<S: Storage> CartSlot<S> {
    /// Bind to `key` in `storage`.
    pub fn new(storage: S, key: impl Into<String>) -> Self {
        Self {
            storage,
            key: key.into(),
            persistence: Persistence::Durable,
            failure: None,
        }
    }

    /// Bind to the default `cartItems` key.
    pub fn with_default_key(storage: S) -> Self {
        Self::new(storage, DEFAULT_KEY)
    }

    /// Read the stored cart.
    ///
    /// A missing entry yields an empty cart and seeds storage with it. An
    /// entry that cannot be decoded, or that breaks the cart invariants, is
    /// removed from storage and yields an empty cart.
    pub fn get(&mut self) -> CartItems {
        if self.persistence == Persistence::MemoryOnly {
            return CartItems::new();
        }

        let stored = match self.storage.get_item(&self.key) {
            Ok(stored) => stored,
            Err(err) => {
                self.degrade(err);

                return CartItems::new();
            }
        };

        let Some(json) = stored else {
            debug!(key = %self.key, "no stored cart, seeding empty cart");

            let items = CartItems::new();
            self.set(&items);

            return items;
        };

        match serde_json::from_str::<CartItems>(&json) {
            Ok(items) => {
                info!(key = %self.key, line_items = items.len(), "rehydrated cart");

                items
            }
            Err(err) => {
                warn!(key = %self.key, error = %err, "discarding unreadable stored cart");

                if let Err(err) = self.storage.remove_item(&self.key) {
                    self.degrade(err);
                }

                CartItems::new()
            }
        }
    }

    /// Replace the stored cart with `items`.
    ///
    /// Does nothing once the slot is memory-only.
    pub fn set(&mut self, items: &CartItems) {
        if self.persistence == Persistence::MemoryOnly {
            debug!(key = %self.key, "skipping write, persistence is disabled");

            return;
        }

        let json = match serde_json::to_string(items) {
            Ok(json) => json,
            Err(err) => {
                self.degrade(StorageError::Io(err.into()));

                return;
            }
        };

        match self.storage.set_item(&self.key, &json) {
            Ok(()) => debug!(key = %self.key, bytes = json.len(), "persisted cart"),
            Err(err) => self.degrade(err),
        }
    }

    /// Take the error that switched the slot to memory-only mode, if it has
    /// not been taken yet.
    pub fn take_failure(&mut self) -> Option<StorageError> {
        self.failure.take()
    }

    /// Current persistence mode.
    pub fn persistence(&self) -> Persistence {
        self.persistence
    }

    /// Storage key of the slot.
    pub fn key(&self) -> &str {
        &self.key
    }

    /// The underlying storage.
    pub fn storage(&self) -> &S {
        &self.storage
    }

    fn degrade(&mut self, err: StorageError) {
        warn!(
            key = %self.key,
            error = %err,
            "cart storage failed, continuing in memory only"
        );

        self.persistence = Persistence::MemoryOnly;
        self.failure = Some(err);
    }
}
