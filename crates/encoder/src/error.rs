//! Error types for the encoder crate.

use thiserror::Error;

/// Errors raised while turning text into an embedding vector.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum EncodingError {
    /// The embedding backend could not be reached or returned an error.
    ///
    /// Surfaced to the caller as-is; nothing in this crate retries.
    #[error("Embedding backend '{backend}' unavailable: {reason}")]
    Unavailable { backend: String, reason: String },

    /// The backend answered, but with a vector of the wrong length.
    #[error("Embedding backend '{backend}' returned {found} dimensions, expected {expected}")]
    DimensionMismatch {
        backend: String,
        expected: usize,
        found: usize,
    },
}

impl EncodingError {
    /// Shorthand for building an [`EncodingError::Unavailable`].
    pub fn unavailable(backend: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::Unavailable {
            backend: backend.into(),
            reason: reason.into(),
        }
    }
}

/// Errors raised when a [`UserProfile`](crate::UserProfile) is constructed
/// from invalid input.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ProfileError {
    #[error("Age must be between {min} and {max}, got {age}")]
    AgeOutOfRange { age: u32, min: u32, max: u32 },
}

/// Convenience type alias for encoding results
pub type Result<T> = std::result::Result<T, EncodingError>;
