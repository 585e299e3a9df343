//! Parameter error types

/// Errors from parameter store operations
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParameterError {
    /// Unknown parameter or invalid registration
    InvalidConfig,
    /// Store is full
    StoreFull,
    /// Value type does not match the registered type
    TypeMismatch,
    /// Parameter must always hold a value
    Required,
}

impl core::fmt::Display for ParameterError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            ParameterError::InvalidConfig => write!(f, "invalid parameter configuration"),
            ParameterError::StoreFull => write!(f, "parameter store full"),
            ParameterError::TypeMismatch => write!(f, "parameter type mismatch"),
            ParameterError::Required => write!(f, "parameter cannot be unset"),
        }
    }
}

impl core::error::Error for ParameterError {}
