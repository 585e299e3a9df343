//! Swivel engine
//!
//! One owned instance per detection session. Bundles the calibration, the
//! detector (with its configuration and timing memory) and the counter,
//! and exposes only the operations a session performs on them.

use crate::calibration::{CalibrationError, CalibrationStore};
use crate::counter::{CounterStore, AUTO_INCREMENT_STEP, DEFAULT_MANUAL_STEP};
use crate::detector::{DetectionConfig, DetectorMode, DetectorState, SwivelDetector, SwivelEvent};
use crate::heading::Heading;

/// Detection engine for a single session
#[derive(Debug, Clone)]
pub struct SwivelEngine {
    calibration: CalibrationStore,
    detector: SwivelDetector,
    counter: CounterStore,
    manual_step: f32,
}

impl Default for SwivelEngine {
    fn default() -> Self {
        Self::new(DetectionConfig::default())
    }
}

impl SwivelEngine {
    pub fn new(config: DetectionConfig) -> Self {
        Self {
            calibration: CalibrationStore::new(),
            detector: SwivelDetector::new(config),
            counter: CounterStore::new(),
            manual_step: DEFAULT_MANUAL_STEP,
        }
    }

    // --- Lifecycle ---

    pub fn start(&mut self) {
        self.detector.start();
    }

    pub fn stop(&mut self) {
        self.detector.stop();
    }

    pub fn restart(&mut self) {
        self.detector.restart();
    }

    pub fn is_running(&self) -> bool {
        self.detector.is_running()
    }

    pub fn mode(&self) -> DetectorMode {
        self.detector.mode(&self.calibration)
    }

    /// Feed one heading; applies the automatic increment on a swivel.
    pub fn observe(&mut self, heading: Heading, now_ms: u64) -> Option<SwivelEvent> {
        let event = self.detector.observe(heading, now_ms, &self.calibration);
        if event.is_some() {
            self.counter.increment(AUTO_INCREMENT_STEP);
        }
        event
    }

    // --- Calibration ---

    /// Set the origin heading.
    ///
    /// Rejected when its tolerance cone would overlap another checkpoint.
    pub fn set_origin(&mut self, heading: Heading) -> Result<(), CalibrationError> {
        let mut candidate = self.calibration.clone();
        candidate.set_origin(heading);
        self.apply_calibration(candidate)
    }

    /// Set the destination heading (same overlap rule as the origin).
    pub fn set_destination(&mut self, heading: Heading) -> Result<(), CalibrationError> {
        let mut candidate = self.calibration.clone();
        candidate.set_destination(heading);
        self.apply_calibration(candidate)
    }

    /// Append an intermediate waypoint.
    pub fn push_waypoint(&mut self, heading: Heading) -> Result<(), CalibrationError> {
        let mut candidate = self.calibration.clone();
        candidate.push_waypoint(heading)?;
        self.apply_calibration(candidate)
    }

    pub fn clear_waypoints(&mut self) {
        self.calibration.clear_waypoints();
        self.detector.clear_alignment();
    }

    /// Replace the whole calibration at once (restoring a saved session).
    pub fn restore_calibration(
        &mut self,
        calibration: CalibrationStore,
    ) -> Result<(), CalibrationError> {
        self.apply_calibration(calibration)
    }

    /// Clear every calibration heading and all detector timestamps.
    pub fn recalibrate(&mut self) {
        self.calibration.reset();
        self.detector.reset_state();
    }

    pub fn calibration(&self) -> &CalibrationStore {
        &self.calibration
    }

    fn apply_calibration(&mut self, candidate: CalibrationStore) -> Result<(), CalibrationError> {
        let tolerance = self.detector.config().tolerance_deg();
        if let Some(separation_deg) = candidate.min_overlap(tolerance) {
            return Err(CalibrationError::OverlappingCones {
                separation_deg,
                required_deg: 2.0 * tolerance,
            });
        }
        self.calibration = candidate;
        self.detector.clear_alignment();
        Ok(())
    }

    // --- Configuration ---

    pub fn config(&self) -> &DetectionConfig {
        self.detector.config()
    }

    /// Replace the configuration, effective from the next observation.
    ///
    /// Rejected when the new tolerance would make set checkpoints overlap.
    pub fn set_config(&mut self, config: DetectionConfig) -> Result<(), CalibrationError> {
        let tolerance = config.tolerance_deg();
        if let Some(separation_deg) = self.calibration.min_overlap(tolerance) {
            return Err(CalibrationError::OverlappingCones {
                separation_deg,
                required_deg: 2.0 * tolerance,
            });
        }
        self.detector.set_config(config);
        Ok(())
    }

    pub fn manual_step(&self) -> f32 {
        self.manual_step
    }

    /// Step used by manual adjustments; ignored unless finite and positive.
    pub fn set_manual_step(&mut self, step: f32) {
        if step.is_finite() && step > 0.0 {
            self.manual_step = step;
        }
    }

    pub fn detector_state(&self) -> &DetectorState {
        self.detector.state()
    }

    // --- Counter ---

    pub fn count(&self) -> f64 {
        self.counter.value()
    }

    pub fn increment_manual(&mut self) {
        self.counter.increment(f64::from(self.manual_step));
    }

    pub fn decrement_manual(&mut self) {
        self.counter.decrement(f64::from(self.manual_step));
    }

    pub fn reset_counter(&mut self) {
        self.counter.reset();
    }

    pub fn restore_count(&mut self, value: f64) {
        self.counter.restore(value);
    }
}
