//! Calibration error types

use core::fmt;

/// Errors from calibration actions
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum CalibrationError {
    /// Two checkpoints are closer than twice the tolerance, so a single
    /// heading could satisfy both
    OverlappingCones {
        /// Separation between the offending checkpoints (degrees)
        separation_deg: f32,
        /// Minimum separation required (degrees)
        required_deg: f32,
    },
    /// Waypoint list is full
    TooManyWaypoints {
        /// Capacity of the waypoint list
        max: usize,
    },
}

impl fmt::Display for CalibrationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CalibrationError::OverlappingCones {
                separation_deg,
                required_deg,
            } => write!(
                f,
                "Calibration rejected: headings {:.1}° apart, need at least {:.1}°",
                separation_deg, required_deg
            ),
            CalibrationError::TooManyWaypoints { max } => {
                write!(f, "Calibration rejected: at most {} waypoints", max)
            }
        }
    }
}

impl core::error::Error for CalibrationError {}
