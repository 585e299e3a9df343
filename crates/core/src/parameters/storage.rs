//! Parameter Storage Types
//!
//! In-memory typed mirror of the persisted key/value slots. The host crate
//! reads persisted text into the store at startup and writes changed
//! parameters back after every mutation.

use super::error::ParameterError;
use bitflags::bitflags;
use core::fmt;
use heapless::index_map::FnvIndexMap;
use heapless::Vec;

/// Maximum number of parameters (power of two)
pub const MAX_PARAMS: usize = 16;

bitflags! {
    /// Parameter flags
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub struct ParamFlags: u8 {
        /// Parameter may be unset (no value)
        const OPTIONAL = 0b00000001;
        /// Parameter belongs to the calibration and is cleared on recalibration
        const CALIBRATION = 0b00000010;
    }
}

/// Parameter type enumeration
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParamType {
    /// 32-bit signed integer
    Int,
    /// 32-bit floating point
    Float,
    /// 64-bit floating point
    Double,
}

/// Parameter value types
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ParamValue {
    /// 32-bit signed integer
    Int(i32),
    /// 32-bit floating point
    Float(f32),
    /// 64-bit floating point
    Double(f64),
}

impl ParamValue {
    /// Get parameter type
    pub fn param_type(&self) -> ParamType {
        match self {
            ParamValue::Int(_) => ParamType::Int,
            ParamValue::Float(_) => ParamType::Float,
            ParamValue::Double(_) => ParamType::Double,
        }
    }

    /// Parse persisted text as `param_type`.
    ///
    /// Returns `None` for anything that is not a finite number. Integer
    /// parameters accept decimal text and truncate it.
    pub fn parse(param_type: ParamType, text: &str) -> Option<Self> {
        let text = text.trim();
        match param_type {
            ParamType::Int => text
                .parse::<i32>()
                .ok()
                .or_else(|| {
                    text.parse::<f32>()
                        .ok()
                        .filter(|v| v.is_finite())
                        .map(|v| v as i32)
                })
                .map(ParamValue::Int),
            ParamType::Float => text
                .parse::<f32>()
                .ok()
                .filter(|v| v.is_finite())
                .map(ParamValue::Float),
            ParamType::Double => text
                .parse::<f64>()
                .ok()
                .filter(|v| v.is_finite())
                .map(ParamValue::Double),
        }
    }

    /// Numeric value as f32
    pub fn as_f32(&self) -> f32 {
        match *self {
            ParamValue::Int(v) => v as f32,
            ParamValue::Float(v) => v,
            ParamValue::Double(v) => v as f32,
        }
    }

    /// Numeric value as f64
    pub fn as_f64(&self) -> f64 {
        match *self {
            ParamValue::Int(v) => f64::from(v),
            ParamValue::Float(v) => f64::from(v),
            ParamValue::Double(v) => v,
        }
    }

    /// Numeric value as i32 (floats truncate, saturating)
    pub fn as_i32(&self) -> i32 {
        match *self {
            ParamValue::Int(v) => v,
            ParamValue::Float(v) => v as i32,
            ParamValue::Double(v) => v as i32,
        }
    }
}

impl fmt::Display for ParamValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ParamValue::Int(v) => write!(f, "{}", v),
            ParamValue::Float(v) => write!(f, "{}", v),
            ParamValue::Double(v) => write!(f, "{}", v),
        }
    }
}

/// Parameter metadata
#[derive(Debug, Clone, Copy)]
pub struct ParamMetadata {
    /// Registered type
    pub param_type: ParamType,
    /// Parameter flags
    pub flags: ParamFlags,
    /// Default value (`None` = unset by default)
    pub default: Option<ParamValue>,
}

/// Typed parameter store
///
/// Keys are the `'static` parameter names registered at startup. Every
/// change made through [`ParameterStore::set`] or
/// [`ParameterStore::clear`] is remembered until [`ParameterStore::take_dirty`]
/// so the caller can write exactly the changed slots back.
pub struct ParameterStore {
    /// Parameter values (`None` = unset)
    values: FnvIndexMap<&'static str, Option<ParamValue>, MAX_PARAMS>,
    /// Parameter metadata
    metadata: FnvIndexMap<&'static str, ParamMetadata, MAX_PARAMS>,
    /// Names changed since the last `take_dirty`
    dirty: Vec<&'static str, MAX_PARAMS>,
}

impl ParameterStore {
    /// Create a new empty parameter store
    pub fn new() -> Self {
        Self {
            values: FnvIndexMap::new(),
            metadata: FnvIndexMap::new(),
            dirty: Vec::new(),
        }
    }

    /// Register a parameter with its type, default and flags
    ///
    /// If the parameter already exists, this is a no-op (idempotent).
    pub fn register(
        &mut self,
        name: &'static str,
        param_type: ParamType,
        default: Option<ParamValue>,
        flags: ParamFlags,
    ) -> Result<(), ParameterError> {
        if self.values.contains_key(name) {
            return Ok(());
        }
        match default {
            Some(value) if value.param_type() != param_type => {
                return Err(ParameterError::TypeMismatch)
            }
            None if !flags.contains(ParamFlags::OPTIONAL) => return Err(ParameterError::Required),
            _ => {}
        }

        self.values
            .insert(name, default)
            .map_err(|_| ParameterError::StoreFull)?;
        self.metadata
            .insert(
                name,
                ParamMetadata {
                    param_type,
                    flags,
                    default,
                },
            )
            .map_err(|_| ParameterError::StoreFull)?;
        Ok(())
    }

    /// Current value; `None` if unknown or unset
    pub fn get(&self, name: &str) -> Option<ParamValue> {
        self.values.get(name).copied().flatten()
    }

    /// Metadata for a registered parameter
    pub fn metadata(&self, name: &str) -> Option<&ParamMetadata> {
        self.metadata.get(name)
    }

    /// Set a parameter value
    ///
    /// Marks the parameter dirty when the value changes.
    pub fn set(&mut self, name: &str, value: ParamValue) -> Result<(), ParameterError> {
        let (key, meta) = self.lookup(name)?;
        if meta.param_type != value.param_type() {
            return Err(ParameterError::TypeMismatch);
        }
        self.write(key, Some(value));
        Ok(())
    }

    /// Unset an optional parameter
    pub fn clear(&mut self, name: &str) -> Result<(), ParameterError> {
        let (key, meta) = self.lookup(name)?;
        if !meta.flags.contains(ParamFlags::OPTIONAL) {
            return Err(ParameterError::Required);
        }
        self.write(key, None);
        Ok(())
    }

    /// Unset every optional parameter carrying all of `flags`
    pub fn clear_flagged(&mut self, flags: ParamFlags) {
        let names: Vec<&'static str, MAX_PARAMS> = self
            .metadata
            .iter()
            .filter(|(_, meta)| {
                meta.flags.contains(flags) && meta.flags.contains(ParamFlags::OPTIONAL)
            })
            .map(|(name, _)| *name)
            .collect();
        for name in names {
            self.write(name, None);
        }
    }

    /// Insert a value without type checks or dirty tracking
    ///
    /// Used when loading persisted values; the caller has already parsed
    /// the text with the registered type.
    pub fn insert_raw(&mut self, name: &str, value: Option<ParamValue>) {
        if let Some(slot) = self.values.get_mut(name) {
            *slot = value;
        }
    }

    /// Drain the names changed since the last call
    pub fn take_dirty(&mut self) -> Vec<&'static str, MAX_PARAMS> {
        core::mem::take(&mut self.dirty)
    }

    /// Check if store has unsaved changes
    pub fn is_dirty(&self) -> bool {
        !self.dirty.is_empty()
    }

    /// Iterate over all registered parameter names with their metadata
    pub fn iter_metadata(&self) -> impl Iterator<Item = (&'static str, &ParamMetadata)> {
        self.metadata.iter().map(|(name, meta)| (*name, meta))
    }

    /// Number of registered parameters
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Check if the store is empty
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    fn lookup(&self, name: &str) -> Result<(&'static str, ParamMetadata), ParameterError> {
        self.metadata
            .iter()
            .find(|(key, _)| **key == name)
            .map(|(key, meta)| (*key, *meta))
            .ok_or(ParameterError::InvalidConfig)
    }

    fn write(&mut self, name: &'static str, value: Option<ParamValue>) {
        if let Some(slot) = self.values.get_mut(name) {
            if *slot != value {
                *slot = value;
                if !self.dirty.contains(&name) {
                    // Capacity equals MAX_PARAMS, so every name fits
                    let _ = self.dirty.push(name);
                }
            }
        }
    }
}

impl Default for ParameterStore {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    extern crate std;
    use std::string::ToString;

    use super::*;

    fn store_with_defaults() -> ParameterStore {
        let mut store = ParameterStore::new();
        store
            .register(
                "TOL",
                ParamType::Float,
                Some(ParamValue::Float(10.0)),
                ParamFlags::empty(),
            )
            .unwrap();
        store
            .register(
                "DEBOUNCE",
                ParamType::Int,
                Some(ParamValue::Int(1000)),
                ParamFlags::empty(),
            )
            .unwrap();
        store
            .register(
                "ORIGIN",
                ParamType::Float,
                None,
                ParamFlags::OPTIONAL | ParamFlags::CALIBRATION,
            )
            .unwrap();
        store
    }

    #[test]
    fn test_param_value_parse() {
        assert_eq!(
            ParamValue::parse(ParamType::Float, " 12.5 "),
            Some(ParamValue::Float(12.5))
        );
        assert_eq!(
            ParamValue::parse(ParamType::Int, "1500"),
            Some(ParamValue::Int(1500))
        );
        assert_eq!(
            ParamValue::parse(ParamType::Int, "1500.7"),
            Some(ParamValue::Int(1500))
        );
        assert_eq!(ParamValue::parse(ParamType::Float, "abc"), None);
        assert_eq!(ParamValue::parse(ParamType::Float, "NaN"), None);
        assert_eq!(ParamValue::parse(ParamType::Float, "inf"), None);
        assert_eq!(ParamValue::parse(ParamType::Int, ""), None);
        assert_eq!(
            ParamValue::parse(ParamType::Double, "16777217"),
            Some(ParamValue::Double(16_777_217.0))
        );
        assert_eq!(ParamValue::parse(ParamType::Double, "-inf"), None);
    }

    #[test]
    fn test_param_value_display_parses_back() {
        let value = ParamValue::Float(123.456);
        let text = value.to_string();
        assert_eq!(ParamValue::parse(ParamType::Float, &text), Some(value));
        assert_eq!(ParamValue::Int(-4).to_string(), "-4");
    }

    #[test]
    fn test_register_and_get() {
        let store = store_with_defaults();
        assert_eq!(store.len(), 3);
        assert_eq!(store.get("TOL"), Some(ParamValue::Float(10.0)));
        assert_eq!(store.get("ORIGIN"), None);
        assert_eq!(store.get("UNKNOWN"), None);
        assert!(!store.is_dirty());
    }

    #[test]
    fn test_register_rejects_bad_defaults() {
        let mut store = ParameterStore::new();
        assert_eq!(
            store.register(
                "X",
                ParamType::Int,
                Some(ParamValue::Float(1.0)),
                ParamFlags::empty()
            ),
            Err(ParameterError::TypeMismatch)
        );
        assert_eq!(
            store.register("Y", ParamType::Int, None, ParamFlags::empty()),
            Err(ParameterError::Required)
        );
    }

    #[test]
    fn test_register_idempotent() {
        let mut store = store_with_defaults();
        store.set("TOL", ParamValue::Float(20.0)).unwrap();
        store
            .register(
                "TOL",
                ParamType::Float,
                Some(ParamValue::Float(10.0)),
                ParamFlags::empty(),
            )
            .unwrap();
        assert_eq!(store.get("TOL"), Some(ParamValue::Float(20.0)));
    }

    #[test]
    fn test_set_marks_dirty_once() {
        let mut store = store_with_defaults();
        store.set("TOL", ParamValue::Float(15.0)).unwrap();
        store.set("TOL", ParamValue::Float(16.0)).unwrap();
        assert!(store.is_dirty());

        let dirty = store.take_dirty();
        assert_eq!(dirty.as_slice(), &["TOL"]);
        assert!(!store.is_dirty());
    }

    #[test]
    fn test_set_same_value_is_clean() {
        let mut store = store_with_defaults();
        store.set("TOL", ParamValue::Float(10.0)).unwrap();
        assert!(!store.is_dirty());
    }

    #[test]
    fn test_set_errors() {
        let mut store = store_with_defaults();
        assert_eq!(
            store.set("UNKNOWN", ParamValue::Int(1)),
            Err(ParameterError::InvalidConfig)
        );
        assert_eq!(
            store.set("DEBOUNCE", ParamValue::Float(1.0)),
            Err(ParameterError::TypeMismatch)
        );
    }

    #[test]
    fn test_clear_optional_only() {
        let mut store = store_with_defaults();
        store.set("ORIGIN", ParamValue::Float(45.0)).unwrap();
        store.clear("ORIGIN").unwrap();
        assert_eq!(store.get("ORIGIN"), None);
        assert_eq!(store.clear("TOL"), Err(ParameterError::Required));
    }

    #[test]
    fn test_clear_flagged() {
        let mut store = store_with_defaults();
        store.set("ORIGIN", ParamValue::Float(45.0)).unwrap();
        store.take_dirty();

        store.clear_flagged(ParamFlags::CALIBRATION);
        assert_eq!(store.get("ORIGIN"), None);
        assert_eq!(store.get("TOL"), Some(ParamValue::Float(10.0)));
        assert_eq!(store.take_dirty().as_slice(), &["ORIGIN"]);
    }

    #[test]
    fn test_insert_raw_skips_dirty() {
        let mut store = store_with_defaults();
        store.insert_raw("DEBOUNCE", Some(ParamValue::Int(2000)));
        assert_eq!(store.get("DEBOUNCE"), Some(ParamValue::Int(2000)));
        assert!(!store.is_dirty());

        // Unknown names are ignored
        store.insert_raw("NOPE", Some(ParamValue::Int(1)));
        assert_eq!(store.len(), 3);
    }

    #[test]
    fn test_conversions() {
        assert_eq!(ParamValue::Int(3).as_f32(), 3.0);
        assert_eq!(ParamValue::Float(2.9).as_i32(), 2);
        assert_eq!(ParamValue::Float(0.5).as_f64(), 0.5);
        assert_eq!(ParamValue::Double(16_777_217.0).to_string(), "16777217");
    }
}
