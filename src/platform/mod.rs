//! Platform abstraction layer
//!
//! The session never talks to a sensor, storage back-end or OS power API
//! directly; it goes through the traits in [`traits`]. [`mock`] provides
//! in-memory implementations for tests.

pub mod error;
pub mod time;
pub mod traits;

#[cfg(feature = "mock")]
pub mod mock;

pub use error::{SensorError, StorageError, WakeLockError};
pub use time::TokioTime;
