//! Parameter persistence
//!
//! Mirrors the parameter store into a [`KeyValueStore`]: every registered
//! parameter occupies one string slot named after the parameter. Unset
//! optional parameters have no slot.

use swivel_core::parameters::{ParamType, ParamValue, ParameterStore};

use crate::platform::traits::KeyValueStore;

/// Load every registered parameter from `storage`.
///
/// Missing slots keep their defaults. Malformed or unreadable slots also
/// keep their defaults; this is logged at debug and never surfaced.
pub fn load<K: KeyValueStore>(storage: &K, params: &mut ParameterStore) {
    let slots: Vec<(&'static str, ParamType)> = params
        .iter_metadata()
        .map(|(name, meta)| (name, meta.param_type))
        .collect();

    for (name, param_type) in slots {
        match storage.get(name) {
            Ok(Some(text)) => match ParamValue::parse(param_type, &text) {
                Some(value) => params.insert_raw(name, Some(value)),
                None => log_debug!("Ignoring malformed {}={:?}, using default", name, text),
            },
            Ok(None) => {}
            Err(e) => log_debug!("Could not read {}: {}, using default", name, e),
        }
    }
}

/// Write every parameter changed since the last flush.
///
/// Returns the number of slots that could not be written. Failures are
/// logged at warn and do not stop the remaining writes.
pub fn flush<K: KeyValueStore>(storage: &mut K, params: &mut ParameterStore) -> usize {
    let mut failures = 0;
    for name in params.take_dirty() {
        let result = match params.get(name) {
            Some(value) => storage.set(name, &value.to_string()),
            None => storage.remove(name),
        };
        if let Err(e) = result {
            log_warn!("Failed to persist {}: {}", name, e);
            failures += 1;
        }
    }
    failures
}
