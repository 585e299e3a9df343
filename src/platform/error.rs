//! Platform error types
//!
//! Errors reported by the injected platform capabilities.

/// Orientation sensor failures
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SensorError {
    #[error("Orientation sensor unavailable")]
    Unavailable,
}

/// Key/value storage failures
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum StorageError {
    #[error("Storage unavailable: {0}")]
    Unavailable(String),

    #[error("Storage quota exceeded for {0}")]
    QuotaExceeded(String),
}

/// Screen keep-awake failures
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum WakeLockError {
    #[error("Wake lock not supported")]
    Unsupported,

    #[error("Wake lock rejected: {0}")]
    Rejected(String),
}
