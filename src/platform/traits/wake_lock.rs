//! Screen keep-awake interface

use async_trait::async_trait;

use crate::platform::error::WakeLockError;

/// Keeps the screen on while detection runs
#[async_trait]
pub trait WakeLock: Send {
    /// Acquire the lock. Acquiring twice is a no-op.
    async fn acquire(&mut self) -> Result<(), WakeLockError>;

    /// Release the lock. Safe to call when not held.
    async fn release(&mut self);
}
