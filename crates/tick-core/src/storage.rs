use std::{
    collections::HashMap,
    sync::{Arc, Mutex},
};

use thiserror::Error;

/// Errors produced by key-value store implementations.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum StoreError {
    /// Requested key does not exist.
    #[error("entry not found for key: {key}")]
    NotFound { key: String },
    /// Underlying storage failure.
    #[error("storage failure: {reason}")]
    Storage { reason: String },
}

/// Contract for the string-keyed byte store that backs persistence.
/// Every write is a full overwrite of the value under its key.
pub trait KeyValueStore {
    /// Persist a value under a key, overwriting any existing entry.
    fn put(&self, key: &str, value: &[u8]) -> Result<(), StoreError>;

    /// Retrieve the value for a key.
    fn get(&self, key: &str) -> Result<Vec<u8>, StoreError>;

    /// Remove a key and its value (idempotent).
    fn delete(&self, key: &str) -> Result<(), StoreError>;
}

/// In-memory store for tests and smoke runs.
#[derive(Debug, Default, Clone)]
pub struct InMemoryStore {
    inner: Arc<Mutex<HashMap<String, Vec<u8>>>>,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl KeyValueStore for InMemoryStore {
    fn put(&self, key: &str, value: &[u8]) -> Result<(), StoreError> {
        let mut map = self.inner.lock().map_err(|err| StoreError::Storage {
            reason: format!("lock poisoned: {err}"),
        })?;
        map.insert(key.to_string(), value.to_vec());
        Ok(())
    }

    fn get(&self, key: &str) -> Result<Vec<u8>, StoreError> {
        let map = self.inner.lock().map_err(|err| StoreError::Storage {
            reason: format!("lock poisoned: {err}"),
        })?;
        map.get(key).cloned().ok_or_else(|| StoreError::NotFound {
            key: key.to_string(),
        })
    }

    fn delete(&self, key: &str) -> Result<(), StoreError> {
        let mut map = self.inner.lock().map_err(|err| StoreError::Storage {
            reason: format!("lock poisoned: {err}"),
        })?;
        map.remove(key);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn round_trips_values() {
        let store = InMemoryStore::new();
        store.put("tasks", b"payload").expect("put should succeed");
        let retrieved = store.get("tasks").expect("get should succeed");
        assert_eq!(retrieved, b"payload");
    }

    #[test]
    fn put_overwrites_prior_value() {
        let store = InMemoryStore::new();
        store.put("k", b"old").expect("put should succeed");
        store.put("k", b"new").expect("put should succeed");
        assert_eq!(store.get("k").expect("get"), b"new");
    }

    #[test]
    fn delete_is_idempotent_and_removes_data() {
        let store = InMemoryStore::new();
        store.put("k", b"v").expect("put should succeed");
        store.delete("k").expect("delete should succeed");
        store.delete("k").expect("delete again should still succeed");

        let err = store.get("k").expect_err("get should fail after delete");
        assert!(matches!(err, StoreError::NotFound { .. }));
    }
}
