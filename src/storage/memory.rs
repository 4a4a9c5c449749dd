//! `MemoryStorage` - map-backed storage for tests and ephemeral sessions.

use std::{cell::RefCell, rc::Rc};

use rustc_hash::FxHashMap;

use super::{Storage, StorageError};

/// In-memory storage.
///
/// Clones share the same map, so a clone handed to one store can be handed to
/// the next one to simulate a restart. An optional quota, in bytes of stored
/// values, makes writes fail the way a full medium would.
#[derive(Debug, Clone, Default)]
pub struct MemoryStorage {
    entries: Rc<RefCell<FxHashMap<String, String>>>,
    quota: Option<usize>,
}

impl MemoryStorage {
    /// Create an empty, unbounded storage.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an empty storage that holds at most `bytes` of values.
    pub fn with_quota(bytes: usize) -> Self {
        Self {
            quota: Some(bytes),
            ..Self::default()
        }
    }

    /// Number of stored keys.
    pub fn len(&self) -> usize {
        self.entries.borrow().len()
    }

    /// Whether nothing is stored.
    pub fn is_empty(&self) -> bool {
        self.entries.borrow().is_empty()
    }

    fn used_bytes_excluding(&self, key: &str) -> usize {
        self.entries
            .borrow()
            .iter()
            .filter(|(k, _)| k.as_str() != key)
            .map(|(_, v)| v.len())
            .sum()
    }
}

impl Storage for MemoryStorage {
    fn get_item(&self, key: &str) -> Result<Option<String>, StorageError> {
        Ok(self.entries.borrow().get(key).cloned())
    }

    fn set_item(&mut self, key: &str, value: &str) -> Result<(), StorageError> {
        if let Some(limit) = self.quota {
            if self.used_bytes_excluding(key) + value.len() > limit {
                return Err(StorageError::QuotaExceeded {
                    key: key.to_string(),
                    limit,
                });
            }
        }

        self.entries
            .borrow_mut()
            .insert(key.to_string(), value.to_string());

        Ok(())
    }

    fn remove_item(&mut self, key: &str) -> Result<(), StorageError> {
        self.entries.borrow_mut().remove(key);

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use testresult::TestResult;

    use super::*;

    #[test]
    fn set_and_get() -> TestResult {
        let mut storage = MemoryStorage::new();

        storage.set_item("k", "v")?;

        assert_eq!(storage.get_item("k")?.as_deref(), Some("v"));

        Ok(())
    }

    #[test]
    fn get_missing_returns_none() -> TestResult {
        let storage = MemoryStorage::new();

        assert!(storage.get_item("missing")?.is_none());

        Ok(())
    }

    #[test]
    fn set_replaces_previous_value() -> TestResult {
        let mut storage = MemoryStorage::new();

        storage.set_item("k", "first")?;
        storage.set_item("k", "second")?;

        assert_eq!(storage.get_item("k")?.as_deref(), Some("second"));
        assert_eq!(storage.len(), 1);

        Ok(())
    }

    #[test]
    fn remove_missing_is_ok() -> TestResult {
        let mut storage = MemoryStorage::new();

        storage.remove_item("missing")?;

        assert!(storage.is_empty());

        Ok(())
    }

    #[test]
    fn clone_shares_entries() -> TestResult {
        let mut storage = MemoryStorage::new();
        let clone = storage.clone();

        storage.set_item("k", "v")?;

        assert_eq!(clone.get_item("k")?.as_deref(), Some("v"));

        Ok(())
    }

    #[test]
    fn quota_rejects_oversized_writes() -> TestResult {
        let mut storage = MemoryStorage::with_quota(4);

        storage.set_item("k", "1234")?;

        // Replacing a key only counts the new value.
        storage.set_item("k", "abcd")?;

        let result = storage.set_item("other", "x");

        assert!(matches!(
            result,
            Err(StorageError::QuotaExceeded { limit: 4, .. })
        ));
        assert_eq!(storage.get_item("k")?.as_deref(), Some("abcd"));

        Ok(())
    }
}
