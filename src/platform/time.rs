//! Tokio-backed time source
//!
//! Milliseconds since the session clock was created, read from
//! `tokio::time::Instant` so a paused test runtime drives it
//! deterministically.

use swivel_core::traits::TimeSource;
use tokio::time::Instant;

/// Monotonic session clock
#[derive(Clone, Copy, Debug)]
pub struct TokioTime {
    epoch: Instant,
}

impl TokioTime {
    pub fn new() -> Self {
        Self {
            epoch: Instant::now(),
        }
    }
}

impl Default for TokioTime {
    fn default() -> Self {
        Self::new()
    }
}

impl TimeSource for TokioTime {
    fn now_ms(&self) -> u64 {
        self.epoch.elapsed().as_millis() as u64
    }

    fn now_us(&self) -> u64 {
        self.epoch.elapsed().as_micros() as u64
    }
}
