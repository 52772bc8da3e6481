//! Error types for bsh-core
//!
//! Provides the unified error type shared by the store adapter and the CLI.

use thiserror::Error;

/// Result type alias for bsh-core operations
pub type Result<T> = std::result::Result<T, Error>;

/// Error types for bsh-core operations
#[derive(Error, Debug)]
pub enum Error {
    /// Authorization rejected by the store
    #[error("Authorization failed: {0}")]
    Auth(String),

    /// Resource not found
    #[error("Not found: {0}")]
    NotFound(String),

    /// Non-success response to a transfer request; displays the bare reason
    /// so callers can prefix it with the operation that failed
    #[error("{0}")]
    Transfer(String),

    /// Network error (retryable)
    #[error("Network error: {0}")]
    Network(String),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// General error
    #[error("{0}")]
    General(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = Error::Auth("invalid key".into());
        assert_eq!(err.to_string(), "Authorization failed: invalid key");

        let err = Error::NotFound("bucket".into());
        assert_eq!(err.to_string(), "Not found: bucket");

        let err = Error::Transfer("Service Unavailable".into());
        assert_eq!(err.to_string(), "Service Unavailable");
    }
}
