//! Error types for OPAL record operations.

use thiserror::Error;

/// Error type for status line appearance operations.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum OpalError {
    /// The native layer returned a null record.
    #[error("Native allocation of {record} failed")]
    Allocation { record: &'static str },

    /// An accessor ran after the proxy was disposed.
    #[error("{record} used after dispose")]
    UseAfterDispose { record: &'static str },

    /// The proxy wraps a null address and has no record behind it.
    #[error("{record} does not reference a native record")]
    NullHandle { record: &'static str },

    /// A value could not be represented on the other side of the boundary.
    #[error("Cannot marshal {field}: {reason}")]
    Marshaling { field: &'static str, reason: String },
}

impl OpalError {
    /// Creates an allocation error.
    pub fn allocation(record: &'static str) -> Self {
        OpalError::Allocation { record }
    }

    /// Creates a use-after-dispose error.
    pub fn use_after_dispose(record: &'static str) -> Self {
        OpalError::UseAfterDispose { record }
    }

    /// Creates a null handle error.
    pub fn null_handle(record: &'static str) -> Self {
        OpalError::NullHandle { record }
    }

    /// Creates a marshaling error for a field.
    pub fn marshaling(field: &'static str, reason: impl Into<String>) -> Self {
        OpalError::Marshaling {
            field,
            reason: reason.into(),
        }
    }
}

/// Result type for OPAL record operations.
pub type OpalResult<T> = Result<T, OpalError>;
