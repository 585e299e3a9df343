//! Detector mode and timing memory

/// Externally visible detector mode
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum DetectorMode {
    /// Not running
    #[default]
    Idle,
    /// Running, but origin or destination is missing
    Armed,
    /// Running with complete calibration
    Detecting,
}

/// Timing memory mutated by [`super::SwivelDetector::observe`]
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub struct DetectorState {
    /// Last time the heading was near the origin (ms)
    pub last_near_origin_at: Option<u64>,
    /// Last time a checkpoint (origin or waypoint) was reached (ms)
    pub last_checkpoint_at: Option<u64>,
    /// Waypoints reached in order since the last origin alignment
    pub waypoints_passed: usize,
    /// Time of the last automatic increment (ms)
    pub last_increment_at: Option<u64>,
    /// Detection is running
    pub running: bool,
}

impl DetectorState {
    /// Forget the origin alignment and waypoint progress.
    pub fn clear_alignment(&mut self) {
        self.last_near_origin_at = None;
        self.last_checkpoint_at = None;
        self.waypoints_passed = 0;
    }

    /// Forget every timestamp, keeping the running flag.
    pub fn clear_timestamps(&mut self) {
        self.clear_alignment();
        self.last_increment_at = None;
    }
}

/// One detected swivel
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SwivelEvent {
    /// Observation time that completed the swivel (ms)
    pub at_ms: u64,
}
