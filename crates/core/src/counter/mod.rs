//! Swivel counter with a non-negative floor
//!
//! Automatic increments come from the detector; manual adjustments come
//! from the operator. Neither touches detection state. The value is an
//! `f64` so whole-number increments stay exact far beyond any real count.

/// Step applied by an automatic (detected) increment
pub const AUTO_INCREMENT_STEP: f64 = 1.0;

/// Default step for manual adjustments
pub const DEFAULT_MANUAL_STEP: f32 = 0.5;

/// Running count, never negative
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct CounterStore {
    value: f64,
}

impl CounterStore {
    pub fn new() -> Self {
        Self { value: 0.0 }
    }

    /// Counter restored from a persisted value (clamped to ≥ 0).
    pub fn with_value(value: f64) -> Self {
        let mut counter = Self::new();
        counter.restore(value);
        counter
    }

    pub fn value(&self) -> f64 {
        self.value
    }

    /// Add `step`. Non-finite steps are ignored.
    pub fn increment(&mut self, step: f64) {
        if step.is_finite() {
            self.apply(self.value + step);
        }
    }

    /// Subtract `step`, stopping at zero. Non-finite steps are ignored.
    pub fn decrement(&mut self, step: f64) {
        if step.is_finite() {
            self.apply(self.value - step);
        }
    }

    /// Back to zero, unconditionally.
    pub fn reset(&mut self) {
        self.value = 0.0;
    }

    /// Overwrite with `value` (clamped). Non-finite values reset to zero.
    pub fn restore(&mut self, value: f64) {
        if value.is_finite() {
            self.apply(value);
        } else {
            self.reset();
        }
    }

    fn apply(&mut self, value: f64) {
        self.value = if value > 0.0 { value } else { 0.0 };
    }
}
