//! Mock platform implementation for testing
//!
//! In-memory implementations of the platform traits. Each mock is a cheap
//! cloneable handle over shared state, so a test can move one clone into a
//! session and keep another to drive or inspect it.
//!
//! # Feature Gate
//!
//! Available when the `mock` feature is enabled (on by default).
//!
//! # Example
//!
//! ```
//! use swivel::platform::mock::MemoryStore;
//! use swivel::platform::traits::KeyValueStore;
//!
//! let mut store = MemoryStore::new();
//! store.set("SWV_COUNT", "3").unwrap();
//! assert_eq!(store.get("SWV_COUNT").unwrap().as_deref(), Some("3"));
//! ```

mod sensor;
mod storage;
mod wake_lock;

pub use sensor::MockSensor;
pub use storage::MemoryStore;
pub use wake_lock::MockWakeLock;

use std::sync::{Mutex, MutexGuard, PoisonError};

/// Lock shared mock state, ignoring poisoning from a panicked test thread.
fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}
