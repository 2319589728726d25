//! Error types for google-kit.

use thiserror::Error;

/// Main error type for google-kit operations.
#[derive(Error, Debug)]
pub enum Error {
    /// HTTP request failed before a response arrived
    #[error("HTTP error: {0}")]
    Http(String),

    /// Authentication failed (bad token, missing scope, refresh rejected)
    #[error("Authentication error: {0}")]
    Auth(String),

    /// API returned an error
    #[error("API error: {status} - {message}")]
    Api { status: u16, message: String },

    /// Requested resource does not exist
    #[error("Not found: {0}")]
    NotFound(String),

    /// Response could not be interpreted
    #[error("Invalid data: {0}")]
    InvalidData(String),

    /// Tool arguments failed validation
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Serialization/deserialization failed
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Generic error
    #[error("{0}")]
    Other(#[from] anyhow::Error),
}

impl Error {
    /// Map an unsuccessful HTTP status to the matching error variant.
    pub fn from_status(status: u16, message: impl Into<String>) -> Self {
        let message = message.into();
        match status {
            401 | 403 => Error::Auth(message),
            404 => Error::NotFound(message),
            _ => Error::Api { status, message },
        }
    }

    /// Shorthand for an [`Error::InvalidArgument`].
    pub fn invalid_argument(message: impl Into<String>) -> Self {
        Error::InvalidArgument(message.into())
    }
}

/// Result type alias for google-kit operations.
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_status_auth() {
        assert!(matches!(Error::from_status(401, "nope"), Error::Auth(_)));
        assert!(matches!(Error::from_status(403, "scope"), Error::Auth(_)));
    }

    #[test]
    fn test_from_status_not_found() {
        let err = Error::from_status(404, "Requested entity was not found.");
        assert_eq!(err.to_string(), "Not found: Requested entity was not found.");
    }

    #[test]
    fn test_from_status_other() {
        match Error::from_status(500, "backend") {
            Error::Api { status, message } => {
                assert_eq!(status, 500);
                assert_eq!(message, "backend");
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_invalid_argument_display() {
        let err = Error::invalid_argument("missing field `query`");
        assert_eq!(err.to_string(), "Invalid argument: missing field `query`");
    }
}
