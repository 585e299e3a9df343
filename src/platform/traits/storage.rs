//! Key/value persistence interface

use crate::platform::error::StorageError;

/// String slots keyed by parameter name
///
/// Values survive process restarts on real back-ends. Reads of a missing
/// key return `Ok(None)`.
pub trait KeyValueStore: Send {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError>;

    fn set(&mut self, key: &str, value: &str) -> Result<(), StorageError>;

    fn remove(&mut self, key: &str) -> Result<(), StorageError>;
}
