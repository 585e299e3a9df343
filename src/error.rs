use swivel_core::calibration::CalibrationError;

use crate::platform::error::SensorError;

/// Errors surfaced by [`crate::session::DetectionSession`] actions.
///
/// Every variant leaves the session in the state it had before the action.
#[derive(Debug, thiserror::Error)]
pub enum SessionError {
    #[error("Orientation permission denied")]
    PermissionDenied,

    #[error("No heading received within {0} ms")]
    CalibrationTimeout(u64),

    #[error("Orientation stream closed")]
    SensorClosed,

    #[error("Detection is not running")]
    NotRunning,

    #[error(transparent)]
    Calibration(#[from] CalibrationError),

    #[error("Sensor error: {0}")]
    Sensor(#[from] SensorError),
}
