//! Mock key/value store
//!
//! HashMap-backed storage with write-failure injection.

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use super::lock;
use crate::platform::error::StorageError;
use crate::platform::traits::KeyValueStore;

#[derive(Debug, Default)]
struct Inner {
    slots: HashMap<String, String>,
    fail_writes: bool,
    writes: usize,
}

/// In-memory key/value store
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    inner: Arc<Mutex<Inner>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store pre-populated with `(key, value)` pairs
    pub fn with_entries<'a>(entries: impl IntoIterator<Item = (&'a str, &'a str)>) -> Self {
        let store = Self::new();
        {
            let mut inner = lock(&store.inner);
            for (key, value) in entries {
                inner.slots.insert(key.to_string(), value.to_string());
            }
        }
        store
    }

    /// Make every subsequent `set`/`remove` fail (for testing error handling)
    pub fn fail_writes(&self, fail: bool) {
        lock(&self.inner).fail_writes = fail;
    }

    /// Number of successful `set`/`remove` calls
    pub fn write_count(&self) -> usize {
        lock(&self.inner).writes
    }

    /// Current value of a slot (for test verification)
    pub fn value(&self, key: &str) -> Option<String> {
        lock(&self.inner).slots.get(key).cloned()
    }

    pub fn contains(&self, key: &str) -> bool {
        lock(&self.inner).slots.contains_key(key)
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        Ok(self.value(key))
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), StorageError> {
        let mut inner = lock(&self.inner);
        if inner.fail_writes {
            return Err(StorageError::QuotaExceeded(key.to_string()));
        }
        inner.slots.insert(key.to_string(), value.to_string());
        inner.writes += 1;
        Ok(())
    }

    fn remove(&mut self, key: &str) -> Result<(), StorageError> {
        let mut inner = lock(&self.inner);
        if inner.fail_writes {
            return Err(StorageError::Unavailable(key.to_string()));
        }
        inner.slots.remove(key);
        inner.writes += 1;
        Ok(())
    }
}
