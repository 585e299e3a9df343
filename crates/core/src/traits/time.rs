//! Millisecond clock abstraction for detection timestamps.
//!
//! Detection timing (debounce, alignment window) is expressed in whole
//! milliseconds, so the clock reports milliseconds since an arbitrary
//! monotonic epoch. The host crate provides a tokio-backed implementation.

use core::cell::Cell;

/// Monotonic clock used to timestamp heading observations.
///
/// # Example
///
/// ```
/// use swivel_core::traits::{MockTime, TimeSource};
///
/// fn debounced<T: TimeSource>(time: &T, last_event_ms: u64, debounce_ms: u64) -> bool {
///     time.elapsed_ms_since(last_event_ms) < debounce_ms
/// }
///
/// let time = MockTime::new();
/// time.advance_ms(300);
/// assert!(debounced(&time, 0, 1000));
/// ```
pub trait TimeSource: Clone + Send + Sync {
    /// Milliseconds since the clock's epoch.
    fn now_ms(&self) -> u64;

    /// Microseconds since the clock's epoch.
    fn now_us(&self) -> u64 {
        self.now_ms().saturating_mul(1000)
    }

    /// Milliseconds elapsed since `reference_ms`, saturating at zero when
    /// the reference lies in the future.
    fn elapsed_ms_since(&self, reference_ms: u64) -> u64 {
        self.now_ms().saturating_sub(reference_ms)
    }
}

/// Manually driven clock for tests.
#[derive(Clone, Default)]
pub struct MockTime {
    current_ms: Cell<u64>,
}

// Safety: MockTime is only used from single-threaded test code; the
// Send + Sync bounds exist for real clocks shared with async runtimes.
unsafe impl Send for MockTime {}
unsafe impl Sync for MockTime {}

impl MockTime {
    /// Creates a clock reading 0 ms.
    pub fn new() -> Self {
        Self {
            current_ms: Cell::new(0),
        }
    }

    /// Creates a clock reading `ms`.
    pub fn with_initial_ms(ms: u64) -> Self {
        Self {
            current_ms: Cell::new(ms),
        }
    }

    /// Jumps to an absolute reading.
    pub fn set_ms(&self, ms: u64) {
        self.current_ms.set(ms);
    }

    /// Moves the clock forward.
    pub fn advance_ms(&self, ms: u64) {
        self.current_ms.set(self.current_ms.get().saturating_add(ms));
    }
}

impl TimeSource for MockTime {
    fn now_ms(&self) -> u64 {
        self.current_ms.get()
    }
}
