//! Swivel detector state machine
//!
//! Turns a stream of normalized headings into discrete swivel events.
//! The detector only ever sees discrete samples, so instead of tracking a
//! path it remembers when the heading was last aligned with the origin (and
//! with each waypoint, in order) and accepts the destination only while
//! that memory is younger than the alignment window.
//!
//! # Modes
//!
//! ```text
//!            start()               calibration complete
//!   Idle ───────────────► Armed ─────────────────────► Detecting
//!    ▲                      │                              │
//!    └──────── stop() ──────┴──────────────────────────────┘
//! ```
//!
//! `stop()` leaves the timing memory alone; only recalibration or
//! [`SwivelDetector::restart`] clears it.

mod config;
mod state;

pub use config::{
    DetectionConfig, DEFAULT_ALIGNMENT_WINDOW_MS, DEFAULT_DEBOUNCE_MS, DEFAULT_TOLERANCE_DEG,
    MAX_ALIGNMENT_WINDOW_MS, MAX_DEBOUNCE_MS, MAX_TOLERANCE_DEG, MIN_ALIGNMENT_WINDOW_MS,
    MIN_DEBOUNCE_MS, MIN_TOLERANCE_DEG,
};
pub use state::{DetectorMode, DetectorState, SwivelEvent};

use crate::calibration::CalibrationStore;
use crate::heading::{is_near, Heading};

/// Debounced origin → (waypoints) → destination detector
#[derive(Debug, Clone, Default)]
pub struct SwivelDetector {
    config: DetectionConfig,
    state: DetectorState,
}

impl SwivelDetector {
    pub fn new(config: DetectionConfig) -> Self {
        Self {
            config,
            state: DetectorState::default(),
        }
    }

    /// Start detection. No-op when already running.
    pub fn start(&mut self) {
        self.state.running = true;
    }

    /// Stop detection. Safe to call at any time; timestamps are kept.
    pub fn stop(&mut self) {
        self.state.running = false;
    }

    /// Clear all timing memory and start.
    pub fn restart(&mut self) {
        self.state.clear_timestamps();
        self.state.running = true;
    }

    pub fn is_running(&self) -> bool {
        self.state.running
    }

    /// Current mode given the calibration in use
    pub fn mode(&self, calibration: &CalibrationStore) -> DetectorMode {
        match (self.state.running, calibration.is_complete()) {
            (false, _) => DetectorMode::Idle,
            (true, false) => DetectorMode::Armed,
            (true, true) => DetectorMode::Detecting,
        }
    }

    pub fn config(&self) -> &DetectionConfig {
        &self.config
    }

    /// Replace the configuration; applies from the next observation.
    pub fn set_config(&mut self, config: DetectionConfig) {
        self.config = config;
    }

    pub fn state(&self) -> &DetectorState {
        &self.state
    }

    /// Forget origin/waypoint alignment (a reference heading changed).
    pub fn clear_alignment(&mut self) {
        self.state.clear_alignment();
    }

    /// Forget all timestamps (recalibration).
    pub fn reset_state(&mut self) {
        self.state.clear_timestamps();
    }

    /// Feed one heading observed at `now_ms`.
    ///
    /// Returns `Some` when this observation completes a swivel. Never fails.
    pub fn observe(
        &mut self,
        heading: Heading,
        now_ms: u64,
        calibration: &CalibrationStore,
    ) -> Option<SwivelEvent> {
        let (origin, destination) = match (calibration.origin(), calibration.destination()) {
            (Some(o), Some(d)) if self.state.running => (o, d),
            _ => return None,
        };

        if let Some(last) = self.state.last_increment_at {
            if now_ms.saturating_sub(last) < u64::from(self.config.debounce_ms()) {
                return None;
            }
        }

        let tolerance = self.config.tolerance_deg();
        let window = u64::from(self.config.alignment_window_ms());
        let waypoints = calibration.waypoints();
        let leg_open = |since: Option<u64>| {
            since.is_some_and(|t| now_ms.saturating_sub(t) <= window)
        };

        let mut event = None;

        if is_near(heading, destination, tolerance)
            && self.state.last_near_origin_at.is_some()
            && self.state.waypoints_passed >= waypoints.len()
            && leg_open(self.state.last_checkpoint_at)
        {
            self.state.last_increment_at = Some(now_ms);
            event = Some(SwivelEvent { at_ms: now_ms });
        }

        if let Some(next) = waypoints.get(self.state.waypoints_passed) {
            if self.state.last_near_origin_at.is_some()
                && is_near(heading, *next, tolerance)
                && leg_open(self.state.last_checkpoint_at)
            {
                self.state.waypoints_passed += 1;
                self.state.last_checkpoint_at = Some(now_ms);
            }
        }

        if is_near(heading, origin, tolerance) {
            self.state.last_near_origin_at = Some(now_ms);
            self.state.last_checkpoint_at = Some(now_ms);
            self.state.waypoints_passed = 0;
        }

        event
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn calibrated(origin: f32, destination: f32) -> CalibrationStore {
        let mut cal = CalibrationStore::new();
        cal.set_origin(Heading::new(origin));
        cal.set_destination(Heading::new(destination));
        cal
    }

    fn running_detector() -> SwivelDetector {
        let mut det = SwivelDetector::new(DetectionConfig::new(10.0, 1000, 4000));
        det.start();
        det
    }

    fn h(deg: f32) -> Heading {
        Heading::new(deg)
    }

    #[test]
    fn test_modes() {
        let mut det = SwivelDetector::default();
        let mut cal = CalibrationStore::new();
        assert_eq!(det.mode(&cal), DetectorMode::Idle);

        det.start();
        assert_eq!(det.mode(&cal), DetectorMode::Armed);

        cal.set_origin(h(45.0));
        cal.set_destination(h(200.0));
        assert_eq!(det.mode(&cal), DetectorMode::Detecting);

        det.stop();
        assert_eq!(det.mode(&cal), DetectorMode::Idle);
    }

    #[test]
    fn test_start_and_stop_are_idempotent() {
        let mut det = SwivelDetector::default();
        det.stop();
        assert!(!det.is_running());
        det.start();
        det.start();
        assert!(det.is_running());
        det.stop();
        det.stop();
        assert!(!det.is_running());
    }

    #[test]
    fn test_origin_then_destination_counts() {
        let cal = calibrated(45.0, 200.0);
        let mut det = running_detector();

        assert_eq!(det.observe(h(45.0), 0, &cal), None);
        assert_eq!(
            det.observe(h(200.0), 500, &cal),
            Some(SwivelEvent { at_ms: 500 })
        );
        assert_eq!(det.state().last_increment_at, Some(500));
    }

    #[test]
    fn test_tolerance_edges() {
        let cal = calibrated(45.0, 200.0);
        let mut det = running_detector();

        det.observe(h(54.0), 0, &cal);
        assert!(det.observe(h(191.0), 100, &cal).is_some());
    }

    #[test]
    fn test_destination_without_origin_ignored() {
        let cal = calibrated(45.0, 200.0);
        let mut det = running_detector();
        assert_eq!(det.observe(h(200.0), 0, &cal), None);
    }

    #[test]
    fn test_window_boundary_inclusive() {
        let cal = calibrated(45.0, 200.0);
        let mut det = running_detector();
        det.observe(h(45.0), 1000, &cal);
        assert!(det.observe(h(200.0), 5000, &cal).is_some());

        let mut det = running_detector();
        det.observe(h(45.0), 1000, &cal);
        assert!(det.observe(h(200.0), 5001, &cal).is_none());
    }

    #[test]
    fn test_debounce_suppresses_burst() {
        let cal = calibrated(45.0, 200.0);
        let mut det = running_detector();

        det.observe(h(45.0), 0, &cal);
        assert!(det.observe(h(200.0), 500, &cal).is_some());
        assert!(det.observe(h(201.0), 800, &cal).is_none());
        assert!(det.observe(h(199.0), 1499, &cal).is_none());
    }

    #[test]
    fn test_debounce_also_suppresses_origin_arming() {
        let cal = calibrated(45.0, 200.0);
        let mut det = running_detector();

        det.observe(h(45.0), 0, &cal);
        det.observe(h(200.0), 500, &cal);
        // Inside the debounce window the whole observation is skipped
        det.observe(h(45.0), 900, &cal);
        assert_eq!(det.state().last_near_origin_at, Some(0));
    }

    #[test]
    fn test_second_swing_after_debounce() {
        let cal = calibrated(45.0, 200.0);
        let mut det = running_detector();

        det.observe(h(45.0), 0, &cal);
        assert!(det.observe(h(200.0), 500, &cal).is_some());
        det.observe(h(45.0), 1600, &cal);
        assert!(det.observe(h(200.0), 2100, &cal).is_some());
    }

    #[test]
    fn test_stale_origin_memory_still_counts_inside_window() {
        // Origin memory is not consumed by an increment
        let cal = calibrated(45.0, 200.0);
        let mut det = running_detector();

        det.observe(h(45.0), 0, &cal);
        assert!(det.observe(h(200.0), 500, &cal).is_some());
        assert!(det.observe(h(200.0), 1600, &cal).is_some());
        assert!(det.observe(h(200.0), 4100, &cal).is_none());
    }

    #[test]
    fn test_not_running_never_counts() {
        let cal = calibrated(45.0, 200.0);
        let mut det = SwivelDetector::new(DetectionConfig::default());

        assert!(det.observe(h(45.0), 0, &cal).is_none());
        assert!(det.observe(h(200.0), 500, &cal).is_none());
        assert_eq!(det.state().last_near_origin_at, None);
    }

    #[test]
    fn test_incomplete_calibration_never_counts() {
        let mut cal = CalibrationStore::new();
        cal.set_origin(h(45.0));
        let mut det = running_detector();

        assert!(det.observe(h(45.0), 0, &cal).is_none());
        assert!(det.observe(h(200.0), 500, &cal).is_none());
    }

    #[test]
    fn test_stop_keeps_timestamps() {
        let cal = calibrated(45.0, 200.0);
        let mut det = running_detector();
        det.observe(h(45.0), 0, &cal);
        det.stop();
        assert_eq!(det.state().last_near_origin_at, Some(0));

        det.start();
        assert!(det.observe(h(200.0), 300, &cal).is_some());
    }

    #[test]
    fn test_restart_clears_timestamps() {
        let cal = calibrated(45.0, 200.0);
        let mut det = running_detector();
        det.observe(h(45.0), 0, &cal);
        det.restart();
        assert!(det.is_running());
        assert!(det.observe(h(200.0), 300, &cal).is_none());
    }

    #[test]
    fn test_clear_alignment_requires_fresh_origin() {
        let cal = calibrated(45.0, 200.0);
        let mut det = running_detector();
        det.observe(h(45.0), 0, &cal);
        det.clear_alignment();
        assert!(det.observe(h(200.0), 300, &cal).is_none());
    }

    #[test]
    fn test_waypoint_must_be_passed() {
        let mut cal = calibrated(0.0, 180.0);
        cal.push_waypoint(h(90.0)).unwrap();
        let mut det = running_detector();

        det.observe(h(0.0), 0, &cal);
        assert!(det.observe(h(180.0), 500, &cal).is_none());

        det.observe(h(90.0), 1000, &cal);
        assert_eq!(det.state().waypoints_passed, 1);
        assert!(det.observe(h(180.0), 1500, &cal).is_some());
    }

    #[test]
    fn test_waypoints_in_order() {
        let mut cal = calibrated(0.0, 270.0);
        cal.push_waypoint(h(90.0)).unwrap();
        cal.push_waypoint(h(180.0)).unwrap();
        let mut det = running_detector();

        det.observe(h(0.0), 0, &cal);
        // Second waypoint first does not count
        det.observe(h(180.0), 200, &cal);
        assert_eq!(det.state().waypoints_passed, 0);

        det.observe(h(90.0), 400, &cal);
        det.observe(h(180.0), 600, &cal);
        assert_eq!(det.state().waypoints_passed, 2);
        assert!(det.observe(h(270.0), 800, &cal).is_some());
    }

    #[test]
    fn test_alignment_window_applies_per_leg() {
        let mut cal = calibrated(0.0, 180.0);
        cal.push_waypoint(h(90.0)).unwrap();
        let mut det = running_detector();

        det.observe(h(0.0), 0, &cal);
        det.observe(h(90.0), 3500, &cal);
        // 7000 ms after origin, but only 3500 ms after the waypoint
        assert!(det.observe(h(180.0), 7000, &cal).is_some());
    }

    #[test]
    fn test_waypoint_leg_expires() {
        let mut cal = calibrated(0.0, 180.0);
        cal.push_waypoint(h(90.0)).unwrap();
        let mut det = running_detector();

        det.observe(h(0.0), 0, &cal);
        det.observe(h(90.0), 4500, &cal);
        assert_eq!(det.state().waypoints_passed, 0);
    }

    #[test]
    fn test_origin_realignment_resets_waypoint_progress() {
        let mut cal = calibrated(0.0, 180.0);
        cal.push_waypoint(h(90.0)).unwrap();
        let mut det = running_detector();

        det.observe(h(0.0), 0, &cal);
        det.observe(h(90.0), 500, &cal);
        det.observe(h(0.0), 1000, &cal);
        assert_eq!(det.state().waypoints_passed, 0);
        assert!(det.observe(h(180.0), 1500, &cal).is_none());
    }

    #[test]
    fn test_config_change_applies_next_observation() {
        let cal = calibrated(45.0, 200.0);
        let mut det = running_detector();
        det.observe(h(45.0), 0, &cal);

        det.set_config(DetectionConfig::new(10.0, 1000, 500));
        assert!(det.observe(h(200.0), 800, &cal).is_none());
    }

    #[test]
    fn test_clock_going_backwards_is_debounced() {
        let cal = calibrated(45.0, 200.0);
        let mut det = running_detector();
        det.observe(h(45.0), 10_000, &cal);
        assert!(det.observe(h(200.0), 10_500, &cal).is_some());
        assert!(det.observe(h(200.0), 9_000, &cal).is_none());
    }
}
