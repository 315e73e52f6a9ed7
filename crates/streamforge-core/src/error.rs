//! Error types for StreamForge

use thiserror::Error;

/// Main error type for StreamForge operations
#[derive(Debug, Error)]
pub enum StreamForgeError {
    /// Malformed constraint definition or configuration, detected at build time
    #[error("Configuration error: {0}")]
    Config(String),

    /// Error in domain model definition
    #[error("Domain model error: {0}")]
    DomainModel(String),

    /// Error during score calculation
    #[error("Score calculation error: {0}")]
    ScoreCalculation(String),

    /// Operation called out of protocol, such as retracting a fact that was never inserted
    #[error("Invalid state: {0}")]
    InvalidState(String),

    /// Operation not available with the current session settings
    #[error("Unsupported operation: {0}")]
    Unsupported(String),

    /// The incrementally maintained score differs from a from-scratch calculation
    #[error("Score corruption: {0}")]
    ScoreCorruption(String),

    /// Internal error (should not occur in normal operation)
    #[error("Internal error: {0}")]
    Internal(String),
}

impl StreamForgeError {
    /// Shorthand for a [`StreamForgeError::Config`] error.
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config(message.into())
    }

    /// Shorthand for a [`StreamForgeError::InvalidState`] error.
    pub fn invalid_state(message: impl Into<String>) -> Self {
        Self::InvalidState(message.into())
    }

    /// Shorthand for a [`StreamForgeError::Internal`] error.
    pub fn internal(message: impl Into<String>) -> Self {
        Self::Internal(message.into())
    }
}

/// Result type alias for StreamForge operations
pub type Result<T> = std::result::Result<T, StreamForgeError>;
