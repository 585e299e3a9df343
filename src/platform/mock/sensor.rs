//! Mock orientation sensor
//!
//! Fans samples out to every open subscription, stamped with the sensor's
//! own [`TokioTime`] clock at the moment they are pushed. A new
//! subscription first receives the most recent sample, the way a real
//! sensor reports its current orientation shortly after a listener
//! attaches.

use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use swivel_core::heading::OrientationSample;
use swivel_core::traits::TimeSource;
use tokio::sync::mpsc::{self, error::TrySendError};

use super::lock;
use crate::platform::error::SensorError;
use crate::platform::time::TokioTime;
use crate::platform::traits::{OrientationSensor, PermissionState, SensorSubscription, TimedSample};

#[derive(Debug)]
struct Inner {
    permission: PermissionState,
    latest: Option<TimedSample>,
    subscribers: Vec<mpsc::Sender<TimedSample>>,
    available: bool,
    silent: bool,
    permission_requests: usize,
    dropped: usize,
}

/// Scriptable orientation sensor
#[derive(Debug, Clone)]
pub struct MockSensor {
    inner: Arc<Mutex<Inner>>,
    clock: TokioTime,
}

impl Default for MockSensor {
    fn default() -> Self {
        Self::new()
    }
}

impl MockSensor {
    /// Sensor that grants permission without prompting
    pub fn new() -> Self {
        Self::with_permission(PermissionState::Granted)
    }

    /// Sensor that answers permission requests with `permission`
    pub fn with_permission(permission: PermissionState) -> Self {
        Self {
            inner: Arc::new(Mutex::new(Inner {
                permission,
                latest: None,
                subscribers: Vec::new(),
                available: true,
                silent: false,
                permission_requests: 0,
                dropped: 0,
            })),
            clock: TokioTime::new(),
        }
    }

    /// Change the answer to future permission requests
    pub fn set_permission(&self, permission: PermissionState) {
        lock(&self.inner).permission = permission;
    }

    /// Make `subscribe` fail (no orientation hardware)
    pub fn set_available(&self, available: bool) {
        lock(&self.inner).available = available;
    }

    /// Emit an absolute compass heading
    pub fn set_heading(&self, degrees: f32) {
        self.push_sample(OrientationSample::absolute(degrees));
    }

    /// Emit a raw sample to every open subscription, stamped now
    pub fn push_sample(&self, sample: OrientationSample) {
        let timed = TimedSample::new(self.clock.now_ms(), sample);
        let mut inner = lock(&self.inner);
        inner.latest = Some(timed);
        if inner.silent {
            return;
        }
        let mut dropped = 0;
        inner.subscribers.retain(|tx| match tx.try_send(timed) {
            Ok(()) => true,
            Err(TrySendError::Full(_)) => {
                dropped += 1;
                true
            }
            Err(TrySendError::Closed(_)) => false,
        });
        inner.dropped += dropped;
    }

    /// Stop delivering samples (sensor stalled); no replay to new subscribers
    pub fn go_silent(&self) {
        lock(&self.inner).silent = true;
    }

    /// Resume delivering samples
    pub fn resume(&self) {
        lock(&self.inner).silent = false;
    }

    /// Close every open stream, as when the platform revokes the sensor
    pub fn close_all(&self) {
        lock(&self.inner).subscribers.clear();
    }

    /// Number of subscriptions still attached
    pub fn subscriber_count(&self) -> usize {
        let mut inner = lock(&self.inner);
        inner.subscribers.retain(|tx| !tx.is_closed());
        inner.subscribers.len()
    }

    /// Number of permission requests seen
    pub fn permission_requests(&self) -> usize {
        lock(&self.inner).permission_requests
    }

    /// Samples dropped because a subscriber's queue was full
    pub fn dropped_samples(&self) -> usize {
        lock(&self.inner).dropped
    }
}

#[async_trait]
impl OrientationSensor for MockSensor {
    async fn request_permission(&mut self) -> PermissionState {
        let mut inner = lock(&self.inner);
        inner.permission_requests += 1;
        inner.permission
    }

    fn subscribe(&mut self) -> Result<SensorSubscription, SensorError> {
        let mut inner = lock(&self.inner);
        if !inner.available {
            return Err(SensorError::Unavailable);
        }
        let (tx, subscription) = SensorSubscription::channel();
        if !inner.silent {
            if let Some(timed) = inner.latest {
                let _ = tx.try_send(timed);
            }
        }
        inner.subscribers.push(tx);
        Ok(subscription)
    }
}
