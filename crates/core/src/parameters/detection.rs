//! Swivel Detection Parameter Definitions
//!
//! Maps the persisted slots of a detection session onto parameter store
//! entries.
//!
//! # Parameters
//!
//! - `SWV_COUNT` - Running swivel count
//! - `SWV_ORIGIN` - Origin heading (unset until calibrated)
//! - `SWV_DEST` - Destination heading (unset until calibrated)
//! - `SWV_WP1`..`SWV_WP4` - Intermediate waypoint headings, in path order
//! - `SWV_TOL` - Proximity tolerance in degrees
//! - `SWV_DEBOUNCE` - Minimum spacing between automatic increments (ms)
//! - `SWV_ALIGN_WIN` - Maximum time between consecutive checkpoints (ms)
//! - `SWV_MAN_STEP` - Step for manual counter adjustments

use super::error::ParameterError;
use super::storage::{ParamFlags, ParamType, ParamValue, ParameterStore};
use crate::calibration::{CalibrationStore, MAX_WAYPOINTS};
use crate::counter::DEFAULT_MANUAL_STEP;
use crate::detector::{
    DetectionConfig, DEFAULT_ALIGNMENT_WINDOW_MS, DEFAULT_DEBOUNCE_MS, DEFAULT_TOLERANCE_DEG,
    MAX_ALIGNMENT_WINDOW_MS, MAX_DEBOUNCE_MS, MAX_TOLERANCE_DEG, MIN_ALIGNMENT_WINDOW_MS,
    MIN_DEBOUNCE_MS, MIN_TOLERANCE_DEG,
};
use crate::heading::Heading;

// --- Names ---

pub const PARAM_COUNT: &str = "SWV_COUNT";
pub const PARAM_ORIGIN: &str = "SWV_ORIGIN";
pub const PARAM_DESTINATION: &str = "SWV_DEST";
pub const PARAM_WAYPOINTS: [&str; MAX_WAYPOINTS] = ["SWV_WP1", "SWV_WP2", "SWV_WP3", "SWV_WP4"];
pub const PARAM_TOLERANCE: &str = "SWV_TOL";
pub const PARAM_DEBOUNCE: &str = "SWV_DEBOUNCE";
pub const PARAM_ALIGNMENT_WINDOW: &str = "SWV_ALIGN_WIN";
pub const PARAM_MANUAL_STEP: &str = "SWV_MAN_STEP";

// --- Ranges ---

pub const MIN_MANUAL_STEP: f32 = 0.1;
pub const MAX_MANUAL_STEP: f32 = 10.0;

const CALIBRATION_FLAGS: ParamFlags = ParamFlags::OPTIONAL.union(ParamFlags::CALIBRATION);

/// Register every session parameter with its default
pub fn register_defaults(store: &mut ParameterStore) -> Result<(), ParameterError> {
    store.register(
        PARAM_COUNT,
        ParamType::Double,
        Some(ParamValue::Double(0.0)),
        ParamFlags::empty(),
    )?;
    store.register(PARAM_ORIGIN, ParamType::Float, None, CALIBRATION_FLAGS)?;
    store.register(PARAM_DESTINATION, ParamType::Float, None, CALIBRATION_FLAGS)?;
    for name in PARAM_WAYPOINTS {
        store.register(name, ParamType::Float, None, CALIBRATION_FLAGS)?;
    }
    DetectionParams::register_defaults(store)
}

/// Detection tuning loaded from the parameter store
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DetectionParams {
    /// Proximity tolerance (degrees)
    pub tolerance_deg: f32,
    /// Debounce window (ms)
    pub debounce_ms: u32,
    /// Alignment window (ms)
    pub alignment_window_ms: u32,
    /// Manual adjustment step
    pub manual_step: f32,
}

impl Default for DetectionParams {
    fn default() -> Self {
        Self {
            tolerance_deg: DEFAULT_TOLERANCE_DEG,
            debounce_ms: DEFAULT_DEBOUNCE_MS,
            alignment_window_ms: DEFAULT_ALIGNMENT_WINDOW_MS,
            manual_step: DEFAULT_MANUAL_STEP,
        }
    }
}

impl DetectionParams {
    /// Register detection parameters with default values
    pub fn register_defaults(store: &mut ParameterStore) -> Result<(), ParameterError> {
        store.register(
            PARAM_TOLERANCE,
            ParamType::Float,
            Some(ParamValue::Float(DEFAULT_TOLERANCE_DEG)),
            ParamFlags::empty(),
        )?;
        store.register(
            PARAM_DEBOUNCE,
            ParamType::Int,
            Some(ParamValue::Int(DEFAULT_DEBOUNCE_MS as i32)),
            ParamFlags::empty(),
        )?;
        store.register(
            PARAM_ALIGNMENT_WINDOW,
            ParamType::Int,
            Some(ParamValue::Int(DEFAULT_ALIGNMENT_WINDOW_MS as i32)),
            ParamFlags::empty(),
        )?;
        store.register(
            PARAM_MANUAL_STEP,
            ParamType::Float,
            Some(ParamValue::Float(DEFAULT_MANUAL_STEP)),
            ParamFlags::empty(),
        )?;
        Ok(())
    }

    /// Load detection parameters from parameter store
    pub fn from_store(store: &ParameterStore) -> Self {
        Self {
            tolerance_deg: load_float(
                store,
                PARAM_TOLERANCE,
                DEFAULT_TOLERANCE_DEG,
                MIN_TOLERANCE_DEG,
                MAX_TOLERANCE_DEG,
            ),
            debounce_ms: load_ms(
                store,
                PARAM_DEBOUNCE,
                DEFAULT_DEBOUNCE_MS,
                MIN_DEBOUNCE_MS,
                MAX_DEBOUNCE_MS,
            ),
            alignment_window_ms: load_ms(
                store,
                PARAM_ALIGNMENT_WINDOW,
                DEFAULT_ALIGNMENT_WINDOW_MS,
                MIN_ALIGNMENT_WINDOW_MS,
                MAX_ALIGNMENT_WINDOW_MS,
            ),
            manual_step: load_float(
                store,
                PARAM_MANUAL_STEP,
                DEFAULT_MANUAL_STEP,
                MIN_MANUAL_STEP,
                MAX_MANUAL_STEP,
            ),
        }
    }

    /// Write the tuning fields back into the store
    pub fn write_to(&self, store: &mut ParameterStore) -> Result<(), ParameterError> {
        store.set(PARAM_TOLERANCE, ParamValue::Float(self.tolerance_deg))?;
        store.set(PARAM_DEBOUNCE, ParamValue::Int(self.debounce_ms as i32))?;
        store.set(
            PARAM_ALIGNMENT_WINDOW,
            ParamValue::Int(self.alignment_window_ms as i32),
        )?;
        store.set(PARAM_MANUAL_STEP, ParamValue::Float(self.manual_step))?;
        Ok(())
    }

    /// Detector configuration for these parameters
    pub fn to_config(&self) -> DetectionConfig {
        DetectionConfig::new(
            self.tolerance_deg,
            self.debounce_ms,
            self.alignment_window_ms,
        )
    }

    /// Parameters mirroring an existing config and manual step
    pub fn from_config(config: &DetectionConfig, manual_step: f32) -> Self {
        Self {
            tolerance_deg: config.tolerance_deg(),
            debounce_ms: config.debounce_ms(),
            alignment_window_ms: config.alignment_window_ms(),
            manual_step,
        }
    }
}

/// Calibration headings loaded from the parameter store
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CalibrationParams {
    pub calibration: CalibrationStore,
}

impl CalibrationParams {
    /// Load calibration headings
    ///
    /// Waypoints are read in order and stop at the first unset slot.
    pub fn from_store(store: &ParameterStore) -> Self {
        let mut calibration = CalibrationStore::new();
        if let Some(origin) = load_heading(store, PARAM_ORIGIN) {
            calibration.set_origin(origin);
        }
        if let Some(destination) = load_heading(store, PARAM_DESTINATION) {
            calibration.set_destination(destination);
        }
        for name in PARAM_WAYPOINTS {
            match load_heading(store, name) {
                Some(wp) if calibration.push_waypoint(wp).is_ok() => {}
                _ => break,
            }
        }
        Self { calibration }
    }

    /// Mirror `calibration` into the store, unsetting missing headings
    pub fn write_to(
        calibration: &CalibrationStore,
        store: &mut ParameterStore,
    ) -> Result<(), ParameterError> {
        write_heading(store, PARAM_ORIGIN, calibration.origin())?;
        write_heading(store, PARAM_DESTINATION, calibration.destination())?;
        for (i, name) in PARAM_WAYPOINTS.iter().enumerate() {
            write_heading(store, name, calibration.waypoints().get(i).copied())?;
        }
        Ok(())
    }
}

/// Load the persisted count (never negative)
pub fn load_count(store: &ParameterStore) -> f64 {
    match store.get(PARAM_COUNT).map(|v| v.as_f64()) {
        Some(v) if v.is_finite() => v.max(0.0),
        _ => 0.0,
    }
}

/// Store the count
pub fn write_count(store: &mut ParameterStore, value: f64) -> Result<(), ParameterError> {
    store.set(PARAM_COUNT, ParamValue::Double(value))
}

fn load_heading(store: &ParameterStore, name: &str) -> Option<Heading> {
    store
        .get(name)
        .map(|v| v.as_f32())
        .filter(|v| v.is_finite())
        .map(Heading::new)
}

fn write_heading(
    store: &mut ParameterStore,
    name: &str,
    heading: Option<Heading>,
) -> Result<(), ParameterError> {
    match heading {
        Some(h) => store.set(name, ParamValue::Float(h.degrees())),
        None => store.clear(name),
    }
}

/// Load a float parameter with range clamping
fn load_float(store: &ParameterStore, name: &str, default: f32, min: f32, max: f32) -> f32 {
    match store.get(name) {
        Some(v) if v.as_f32().is_finite() => v.as_f32().clamp(min, max),
        _ => default,
    }
}

/// Load a millisecond parameter with range clamping
fn load_ms(store: &ParameterStore, name: &str, default: u32, min: u32, max: u32) -> u32 {
    match store.get(name) {
        Some(v) => (v.as_i32().max(0) as u32).clamp(min, max),
        None => default,
    }
}

#[cfg(test)]
mod tests {
    extern crate std;
    use std::string::ToString;

    use super::*;

    fn registered() -> ParameterStore {
        let mut store = ParameterStore::new();
        register_defaults(&mut store).unwrap();
        store
    }

    #[test]
    fn test_register_defaults_populates_all() {
        let store = registered();
        assert_eq!(store.len(), 3 + MAX_WAYPOINTS + 4);
        assert!(store.get(PARAM_COUNT).is_some());
        assert!(store.get(PARAM_TOLERANCE).is_some());
        assert!(store.get(PARAM_DEBOUNCE).is_some());
        assert!(store.get(PARAM_ALIGNMENT_WINDOW).is_some());
        assert!(store.get(PARAM_MANUAL_STEP).is_some());
        assert!(store.metadata(PARAM_ORIGIN).is_some());
        assert_eq!(store.get(PARAM_ORIGIN), None);
        assert_eq!(store.get(PARAM_DESTINATION), None);
    }

    #[test]
    fn test_from_store_reads_defaults() {
        let params = DetectionParams::from_store(&registered());
        assert_eq!(params, DetectionParams::default());
        assert_eq!(params.to_config(), DetectionConfig::default());
    }

    #[test]
    fn test_from_store_reads_custom_values() {
        let mut store = registered();
        store.set(PARAM_TOLERANCE, ParamValue::Float(15.0)).unwrap();
        store.set(PARAM_DEBOUNCE, ParamValue::Int(2000)).unwrap();
        store
            .set(PARAM_ALIGNMENT_WINDOW, ParamValue::Int(6000))
            .unwrap();
        store.set(PARAM_MANUAL_STEP, ParamValue::Float(1.0)).unwrap();

        let params = DetectionParams::from_store(&store);
        assert!((params.tolerance_deg - 15.0).abs() < 0.001);
        assert_eq!(params.debounce_ms, 2000);
        assert_eq!(params.alignment_window_ms, 6000);
        assert!((params.manual_step - 1.0).abs() < 0.001);
    }

    #[test]
    fn test_out_of_range_values_clamped() {
        let mut store = registered();
        store.set(PARAM_TOLERANCE, ParamValue::Float(0.5)).unwrap();
        store.set(PARAM_DEBOUNCE, ParamValue::Int(-10)).unwrap();
        store
            .set(PARAM_ALIGNMENT_WINDOW, ParamValue::Int(1_000_000))
            .unwrap();
        store.set(PARAM_MANUAL_STEP, ParamValue::Float(50.0)).unwrap();

        let params = DetectionParams::from_store(&store);
        assert!((params.tolerance_deg - MIN_TOLERANCE_DEG).abs() < 0.001);
        assert_eq!(params.debounce_ms, MIN_DEBOUNCE_MS);
        assert_eq!(params.alignment_window_ms, MAX_ALIGNMENT_WINDOW_MS);
        assert!((params.manual_step - MAX_MANUAL_STEP).abs() < 0.001);
    }

    #[test]
    fn test_write_to_round_trips() {
        let mut store = registered();
        let params = DetectionParams {
            tolerance_deg: 20.0,
            debounce_ms: 750,
            alignment_window_ms: 3000,
            manual_step: 0.25,
        };
        params.write_to(&mut store).unwrap();
        assert_eq!(DetectionParams::from_store(&store), params);
    }

    #[test]
    fn test_calibration_round_trip() {
        let mut store = registered();
        let mut calibration = CalibrationStore::new();
        calibration.set_origin(Heading::new(45.0));
        calibration.set_destination(Heading::new(200.0));
        calibration.push_waypoint(Heading::new(120.0)).unwrap();

        CalibrationParams::write_to(&calibration, &mut store).unwrap();
        assert_eq!(CalibrationParams::from_store(&store).calibration, calibration);

        CalibrationParams::write_to(&CalibrationStore::new(), &mut store).unwrap();
        assert_eq!(store.get(PARAM_ORIGIN), None);
        assert_eq!(store.get(PARAM_WAYPOINTS[0]), None);
    }

    #[test]
    fn test_waypoints_stop_at_gap() {
        let mut store = registered();
        store
            .set(PARAM_WAYPOINTS[0], ParamValue::Float(90.0))
            .unwrap();
        store
            .set(PARAM_WAYPOINTS[2], ParamValue::Float(180.0))
            .unwrap();
        let params = CalibrationParams::from_store(&store);
        assert_eq!(params.calibration.waypoints(), &[Heading::new(90.0)]);
    }

    #[test]
    fn test_calibration_headings_normalized_on_load() {
        let mut store = registered();
        store.set(PARAM_ORIGIN, ParamValue::Float(-90.0)).unwrap();
        let params = CalibrationParams::from_store(&store);
        assert_eq!(params.calibration.origin(), Some(Heading::new(270.0)));
    }

    #[test]
    fn test_count_load_and_write() {
        let mut store = registered();
        assert_eq!(load_count(&store), 0.0);
        write_count(&mut store, 12.5).unwrap();
        assert_eq!(load_count(&store), 12.5);

        store.insert_raw(PARAM_COUNT, Some(ParamValue::Double(-4.0)));
        assert_eq!(load_count(&store), 0.0);
    }

    #[test]
    fn test_large_count_is_exact() {
        let mut store = registered();
        write_count(&mut store, 16_777_217.0).unwrap();
        assert_eq!(load_count(&store), 16_777_217.0);
        assert_eq!(
            store.get(PARAM_COUNT).map(|v| v.to_string()).as_deref(),
            Some("16777217")
        );
    }
}
