//! Top-level error type shared across crates.

use thiserror::Error;

/// Common error type for Kavach input handling.
#[derive(Debug, Error)]
pub enum KavachError {
    #[error("invalid {field}: {reason}")]
    Validation { field: &'static str, reason: String },

    #[error("serialization error: {0}")]
    Serialization(String),

    #[error("{0}")]
    Other(String),
}

impl KavachError {
    pub fn validation(field: &'static str, reason: impl Into<String>) -> Self {
        Self::Validation {
            field,
            reason: reason.into(),
        }
    }
}
