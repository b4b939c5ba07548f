//! Error types for Brickhouse
//!
//! This module defines all error types surfaced by table operations.
//! We use `thiserror` for automatic `Display` and `Error` trait implementations.
//!
//! Lookups by id report absence as `Option::None`, not as an error. Scan
//! cancellation is not an error either: see [`crate::ScanCancelled`].

use std::io;
use thiserror::Error;

/// Result type alias for Brickhouse operations
pub type Result<T> = std::result::Result<T, Error>;

/// Error types for Brickhouse
#[derive(Debug, Error)]
pub enum Error {
    /// Record has no `id` field, or the field is not a reference
    #[error("id is required")]
    MissingId,

    /// A normalizer refused the record
    #[error("Record rejected: {0}")]
    Rejected(String),

    /// A normalizer rewrote the record's identity
    #[error("Normalizer changed record id: expected {expected}, got {actual}")]
    IdChanged {
        /// Id the caller supplied
        expected: String,
        /// Id after normalization (empty when the field was dropped)
        actual: String,
    },

    /// Configuration could not be parsed or is out of range
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    /// I/O error while reading configuration
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
}

impl Error {
    /// Create a rejection error
    pub fn rejected(reason: impl Into<String>) -> Self {
        Error::Rejected(reason.into())
    }

    /// Create a configuration error
    pub fn invalid_config(reason: impl Into<String>) -> Self {
        Error::InvalidConfig(reason.into())
    }

    /// Whether the failure was caused by the caller's record
    pub fn is_bad_record(&self) -> bool {
        matches!(
            self,
            Error::MissingId | Error::Rejected(_) | Error::IdChanged { .. }
        )
    }
}
