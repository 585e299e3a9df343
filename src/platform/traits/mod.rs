//! Platform abstraction traits
//!
//! This module defines the capabilities a platform must provide to run a
//! detection session.

pub mod sensor;
pub mod storage;
pub mod wake_lock;

// Re-export trait interfaces
pub use sensor::{
    OrientationSensor, PermissionState, SensorSubscription, TimedSample, SAMPLE_QUEUE_DEPTH,
};
pub use storage::KeyValueStore;
pub use wake_lock::WakeLock;
