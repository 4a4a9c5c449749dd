//! Storage
//!
//! Durable key-value slots. A [`Storage`] holds string values under string
//! keys, and every write fully replaces the previous value for its key.

use std::io;

use thiserror::Error;

mod file;
mod memory;

pub use file::FileStorage;
pub use memory::MemoryStorage;

/// Errors raised by a storage medium.
#[derive(Debug, Error)]
pub enum StorageError {
    /// The underlying medium failed.
    #[error("Storage I/O error: {0}")]
    Io(#[from] io::Error),

    /// The write would exceed the medium's capacity.
    #[error("Storage quota of {limit} bytes exceeded writing key {key}")]
    QuotaExceeded {
        /// Key being written
        key: String,
        /// Capacity in bytes
        limit: usize,
    },

    /// The key cannot be represented by this medium.
    #[error("Invalid storage key: {0:?}")]
    InvalidKey(String),
}

/// A keyed, durable string store.
pub trait Storage {
    /// Read the value stored under `key`, if any.
    ///
    /// # Errors
    ///
    /// Returns a [`StorageError`] if the medium cannot be read.
    fn get_item(&self, key: &str) -> Result<Option<String>, StorageError>;

    /// Store `value` under `key`, replacing any previous value.
    ///
    /// # Errors
    ///
    /// Returns a [`StorageError`] if the medium cannot be written or is full.
    fn set_item(&mut self, key: &str, value: &str) -> Result<(), StorageError>;

    /// Delete the value stored under `key`. Deleting a missing key is not an error.
    ///
    /// # Errors
    ///
    /// Returns a [`StorageError`] if the medium cannot be written.
    fn remove_item(&mut self, key: &str) -> Result<(), StorageError>;
}

impl<S: Storage + ?Sized> Storage for Box<S> {
    fn get_item(&self, key: &str) -> Result<Option<String>, StorageError> {
        (**self).get_item(key)
    }

    fn set_item(&mut self, key: &str, value: &str) -> Result<(), StorageError> {
        (**self).set_item(key, value)
    }

    fn remove_item(&mut self, key: &str) -> Result<(), StorageError> {
        (**self).remove_item(key)
    }
}
