//! Service-level errors
//!
//! Failures that can stop the service from starting or serving: bad
//! configuration, socket errors, subscriber installation. Per-request
//! failures are [`ApiError`](crate::handlers::ApiError)s and never reach this
//! type.

use thiserror::Error;

/// Result type alias using the service's error type
pub type Result<T> = std::result::Result<T, Error>;

/// Service error
#[derive(Debug, Error)]
pub enum Error {
    /// Configuration could not be loaded or extracted
    #[error("Configuration error: {0}")]
    Config(Box<figment::Error>),

    /// I/O error (binding the listener, serving connections)
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Internal error
    #[error("Internal error: {0}")]
    Internal(String),
}

impl From<figment::Error> for Error {
    fn from(err: figment::Error) -> Self {
        Error::Config(Box::new(err))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_io_error_display() {
        let err: Error = std::io::Error::new(std::io::ErrorKind::AddrInUse, "port taken").into();
        assert_eq!(err.to_string(), "I/O error: port taken");
    }

    #[test]
    fn test_figment_error_is_boxed() {
        let err: Error = figment::Error::from("missing field `port`".to_string()).into();
        assert!(matches!(err, Error::Config(_)));
        assert!(err.to_string().starts_with("Configuration error:"));
    }
}
