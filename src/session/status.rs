//! Status projection for a UI
//!
//! Display-only view of the session, recomputed on demand. Nothing here
//! feeds back into detection.

use core::fmt;

use serde::Serialize;
use swivel_core::detector::DetectorMode;

use crate::platform::traits::PermissionState;

/// Coarse session status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SessionStatus {
    /// Detection not running
    Idle,
    /// Running, waiting for the first heading
    Initializing,
    /// Running with a live heading, origin or destination missing
    ReadyToCalibrate,
    /// Running with complete calibration
    Detecting,
    /// Orientation access refused
    PermissionDenied,
}

impl SessionStatus {
    /// Derive the status from permission, detector mode and heading
    /// availability. A denied permission wins over everything else.
    pub fn resolve(permission: PermissionState, mode: DetectorMode, has_heading: bool) -> Self {
        if permission == PermissionState::Denied {
            return SessionStatus::PermissionDenied;
        }
        match mode {
            DetectorMode::Idle => SessionStatus::Idle,
            _ if !has_heading => SessionStatus::Initializing,
            DetectorMode::Armed => SessionStatus::ReadyToCalibrate,
            DetectorMode::Detecting => SessionStatus::Detecting,
        }
    }
}

impl fmt::Display for SessionStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            SessionStatus::Idle => "Idle",
            SessionStatus::Initializing => "Initializing sensor",
            SessionStatus::ReadyToCalibrate => "Ready to calibrate",
            SessionStatus::Detecting => "Detecting",
            SessionStatus::PermissionDenied => "Permission denied",
        };
        f.write_str(label)
    }
}

/// Snapshot of everything a UI displays
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StatusSnapshot {
    pub status: SessionStatus,
    /// Live heading (degrees), once one has been received
    pub heading: Option<f32>,
    pub origin: Option<f32>,
    pub destination: Option<f32>,
    /// Intermediate waypoints in path order
    pub waypoints: Vec<f32>,
    pub count: f64,
    /// Transient message from the last failed action
    pub notice: Option<String>,
}
