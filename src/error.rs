//! Error types for RxOptional
//!
//! Validation and unchecked-access errors propagate to the caller.
//! Observer failures are reported and swallowed at the side-effect boundary.

/// Main error type for RxOptional operations
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum OptionalError {
    /// A required argument was absent on the path that needed it
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),
    /// Unchecked extraction from an empty container
    #[error("No value present")]
    EmptyValueAccess,
    /// A side-effect callback panicked or returned an error
    #[error("Observer failed: {0}")]
    ObserverFailure(String),
}

impl OptionalError {
    pub(crate) fn missing(argument: &str) -> Self {
        OptionalError::InvalidArgument(format!("{} must not be absent", argument))
    }
}

/// Result type for rx_optional operations
pub type OptionalResult<T> = Result<T, OptionalError>;
