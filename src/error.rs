//! Error types for CareSync client operations.

use thiserror::Error;

/// Result type alias for CareSync operations.
pub type Result<T> = std::result::Result<T, CareSyncError>;

/// Main error type for CareSync client operations.
#[derive(Error, Debug)]
pub enum CareSyncError {
    /// HTTP API errors (transport, status-coded, session handling)
    #[error("API error: {0}")]
    Api(#[from] crate::api::ApiError),

    /// Input validation errors
    #[error("Validation error: {0}")]
    Validation(String),

    /// Lookup failures against store state
    #[error("Not found: {0}")]
    NotFound(String),

    /// Configuration errors
    #[error("Configuration error: {0}")]
    Config(String),

    /// I/O errors
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization/deserialization errors
    #[error("Serialization error: {0}")]
    Serialization(String),

    /// Store-level action failures carrying the user-facing message
    #[error("{0}")]
    Store(String),
}

impl CareSyncError {
    /// Creates a new validation error.
    pub fn validation<T: ToString>(msg: T) -> Self {
        Self::Validation(msg.to_string())
    }

    /// Creates a new not-found error.
    pub fn not_found<T: ToString>(msg: T) -> Self {
        Self::NotFound(msg.to_string())
    }

    /// Creates a new configuration error.
    pub fn config<T: ToString>(msg: T) -> Self {
        Self::Config(msg.to_string())
    }

    /// Creates a new serialization error.
    pub fn serialization<T: ToString>(msg: T) -> Self {
        Self::Serialization(msg.to_string())
    }

    /// Creates a new store error.
    pub fn store<T: ToString>(msg: T) -> Self {
        Self::Store(msg.to_string())
    }
}
