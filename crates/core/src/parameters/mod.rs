//! Parameter management types
//!
//! Typed, fixed-capacity parameter store plus the swivel session's
//! parameter definitions. Reading and writing the persisted text slots is
//! done by the host crate.

pub mod detection;
pub mod error;
pub mod storage;

pub use detection::{
    load_count, register_defaults, write_count, CalibrationParams, DetectionParams,
    MAX_MANUAL_STEP, MIN_MANUAL_STEP, PARAM_ALIGNMENT_WINDOW, PARAM_COUNT, PARAM_DEBOUNCE, PARAM_DESTINATION, PARAM_MANUAL_STEP,
    PARAM_ORIGIN, PARAM_TOLERANCE, PARAM_WAYPOINTS,
};
pub use error::ParameterError;
pub use storage::{ParamFlags, ParamMetadata, ParamType, ParamValue, ParameterStore, MAX_PARAMS};
