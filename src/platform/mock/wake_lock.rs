//! Mock screen keep-awake

use std::sync::{Arc, Mutex};

use async_trait::async_trait;

use super::lock;
use crate::platform::error::WakeLockError;
use crate::platform::traits::WakeLock;

#[derive(Debug, Default)]
struct Inner {
    held: bool,
    unsupported: bool,
    acquisitions: usize,
}

/// Wake lock that records whether it is held
#[derive(Debug, Clone, Default)]
pub struct MockWakeLock {
    inner: Arc<Mutex<Inner>>,
}

impl MockWakeLock {
    pub fn new() -> Self {
        Self::default()
    }

    /// Wake lock on a platform without keep-awake support
    pub fn unsupported() -> Self {
        let wake = Self::new();
        lock(&wake.inner).unsupported = true;
        wake
    }

    pub fn is_held(&self) -> bool {
        lock(&self.inner).held
    }

    /// Number of successful acquisitions
    pub fn acquisitions(&self) -> usize {
        lock(&self.inner).acquisitions
    }
}

#[async_trait]
impl WakeLock for MockWakeLock {
    async fn acquire(&mut self) -> Result<(), WakeLockError> {
        let mut inner = lock(&self.inner);
        if inner.unsupported {
            return Err(WakeLockError::Unsupported);
        }
        if !inner.held {
            inner.held = true;
            inner.acquisitions += 1;
        }
        Ok(())
    }

    async fn release(&mut self) {
        lock(&self.inner).held = false;
    }
}
