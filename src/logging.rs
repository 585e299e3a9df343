//! Logging abstraction
//!
//! Unified logging macros for the session layer. Every message goes through
//! the [`log`] facade under the `swivel` target, so the embedding
//! application chooses the backend (or none).
//!
//! ```
//! use swivel::log_info;
//!
//! let count = 3.0;
//! log_info!("Swivel detected, count={}", count);
//! ```

/// Log target shared by all session messages
pub const LOG_TARGET: &str = "swivel";

/// Log informational message
#[macro_export]
macro_rules! log_info {
    ($($arg:tt)*) => {
        $crate::__log::info!(target: $crate::logging::LOG_TARGET, $($arg)*)
    };
}

/// Log warning message
#[macro_export]
macro_rules! log_warn {
    ($($arg:tt)*) => {
        $crate::__log::warn!(target: $crate::logging::LOG_TARGET, $($arg)*)
    };
}

/// Log error message
#[macro_export]
macro_rules! log_error {
    ($($arg:tt)*) => {
        $crate::__log::error!(target: $crate::logging::LOG_TARGET, $($arg)*)
    };
}

/// Log debug message
#[macro_export]
macro_rules! log_debug {
    ($($arg:tt)*) => {
        $crate::__log::debug!(target: $crate::logging::LOG_TARGET, $($arg)*)
    };
}

/// Log trace message
#[macro_export]
macro_rules! log_trace {
    ($($arg:tt)*) => {
        $crate::__log::trace!(target: $crate::logging::LOG_TARGET, $($arg)*)
    };
}

#[cfg(test)]
mod tests {
    #[test]
    fn test_macros_expand() {
        let value = 42;
        log_info!("info {}", value);
        log_warn!("warn {}", value);
        log_error!("error {}", value);
        log_debug!("debug {}", value);
        log_trace!("trace {}", value);
    }
}
