//! Orientation sensor interface

use async_trait::async_trait;
use serde::Serialize;
use swivel_core::heading::OrientationSample;
use tokio::sync::mpsc;

use crate::platform::error::SensorError;

/// Samples a subscription buffers before the sensor starts dropping new ones
pub const SAMPLE_QUEUE_DEPTH: usize = 64;

/// Outcome of an orientation permission request
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum PermissionState {
    /// Not requested yet
    #[default]
    Unknown,
    /// Granted, or the platform needs no explicit grant
    Granted,
    /// Refused by the user or the platform
    Denied,
}

/// Orientation sample stamped by the sensor when it was produced
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TimedSample {
    /// Production time on the sensor's monotonic clock (ms)
    pub at_ms: u64,
    pub sample: OrientationSample,
}

impl TimedSample {
    pub fn new(at_ms: u64, sample: OrientationSample) -> Self {
        Self { at_ms, sample }
    }
}

/// Live stream of timestamped orientation samples
///
/// Dropping the subscription detaches it from the sensor.
#[derive(Debug)]
pub struct SensorSubscription {
    rx: mpsc::Receiver<TimedSample>,
}

impl SensorSubscription {
    /// Bounded channel for one subscription; the sensor keeps the sender.
    ///
    /// Senders should use `try_send` and drop samples while the queue is
    /// full, so a subscriber that is not polled never grows without bound.
    pub fn channel() -> (mpsc::Sender<TimedSample>, Self) {
        let (tx, rx) = mpsc::channel(SAMPLE_QUEUE_DEPTH);
        (tx, Self { rx })
    }

    /// Next sample; `None` once the sensor has closed the stream.
    pub async fn next(&mut self) -> Option<TimedSample> {
        self.rx.recv().await
    }

    /// Detach from the sensor. Samples already queued are discarded.
    pub fn unsubscribe(mut self) {
        self.rx.close();
    }
}

/// Device orientation source
///
/// Every sample is stamped when the sensor produces it, so detection
/// timing does not depend on how promptly the stream is polled.
#[async_trait]
pub trait OrientationSensor: Send {
    /// Ask for permission to read orientation. May suspend on a user prompt.
    async fn request_permission(&mut self) -> PermissionState;

    /// Open a new sample stream.
    fn subscribe(&mut self) -> Result<SensorSubscription, SensorError>;
}
