/// Unified error types for the routing directory
use thiserror::Error;

/// Main error type for the routing service
#[derive(Error, Debug)]
pub enum RouterError {
    /// Caller-supplied string is not a well-formed content identifier
    #[error("Invalid content identifier: {0}")]
    InvalidIdentifier(String),

    /// Validation errors (configuration, arguments)
    #[error("Validation error: {0}")]
    Validation(String),

    /// Outbound HTTP errors from the routing client
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Internal server errors
    #[error("Internal error: {0}")]
    Internal(String),
}

/// Result type alias for routing operations
pub type RouterResult<T> = Result<T, RouterError>;
