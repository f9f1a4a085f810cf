//! Error types shared across the Fairway crates.

use thiserror::Error;

/// Result type alias using the Fairway error type.
pub type Result<T> = std::result::Result<T, Error>;

/// Core error type for all Fairway operations.
#[derive(Error, Debug)]
pub enum Error {
    /// A submitted round failed validation.
    #[error("invalid round: {message}")]
    Validation {
        /// Description of the rejected field.
        message: String,
    },

    /// The round store could not be read or written.
    #[error("storage error: {message}")]
    Storage {
        /// Description of what went wrong.
        message: String,
    },

    /// A configured value the service cannot use.
    #[error("config error: {message}")]
    Config {
        /// Description of the offending setting.
        message: String,
    },

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization error.
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl Error {
    /// Create a validation error.
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation {
            message: message.into(),
        }
    }

    /// Create a storage error.
    pub fn storage(message: impl Into<String>) -> Self {
        Self::Storage {
            message: message.into(),
        }
    }

    /// Create a config error.
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config {
            message: message.into(),
        }
    }

    /// Whether the error was caused by bad caller input rather than a
    /// fault in the service itself.
    #[must_use]
    pub fn is_validation(&self) -> bool {
        matches!(self, Self::Validation { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = Error::validation("slope rating must not be zero");
        assert_eq!(
            err.to_string(),
            "invalid round: slope rating must not be zero"
        );

        let err = Error::storage("rounds file unreadable");
        assert_eq!(err.to_string(), "storage error: rounds file unreadable");
    }

    #[test]
    fn test_is_validation() {
        assert!(Error::validation("bad").is_validation());
        assert!(!Error::storage("down").is_validation());
    }
}
