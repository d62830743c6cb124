//! Error types for `LinkML` schema compilation

use thiserror::Error;

/// Main error type for `LinkML` operations
#[derive(Error, Debug)]
pub enum LinkMLError {
    /// Input could not be parsed into a path table or schema
    #[error("Failed to parse input: {message}")]
    ParseError {
        /// Error message
        message: String,
        /// Location in the input if available (sheet, row, column)
        location: Option<String>,
    },

    /// Schema model is structurally invalid
    #[error("Schema validation failed: {message}")]
    SchemaValidationError {
        /// Error message
        message: String,
        /// Schema element that failed
        element: Option<String>,
    },

    /// Configuration errors
    #[error("Configuration error: {0}")]
    ConfigError(String),

    /// IO errors
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    /// Serialization errors
    #[error("Serialization error: {0}")]
    SerializationError(String),
}

/// Result type alias for `LinkML` operations
pub type Result<T> = std::result::Result<T, LinkMLError>;

impl LinkMLError {
    /// Create a new parse error
    #[must_use]
    pub fn parse(message: impl Into<String>) -> Self {
        Self::ParseError {
            message: message.into(),
            location: None,
        }
    }

    /// Create a new parse error with location
    #[must_use]
    pub fn parse_at(message: impl Into<String>, location: impl Into<String>) -> Self {
        Self::ParseError {
            message: message.into(),
            location: Some(location.into()),
        }
    }

    /// Create a new schema validation error
    #[must_use]
    pub fn schema_validation(message: impl Into<String>) -> Self {
        Self::SchemaValidationError {
            message: message.into(),
            element: None,
        }
    }

    /// Create a new schema validation error naming the offending element
    #[must_use]
    pub fn schema_element(message: impl Into<String>, element: impl Into<String>) -> Self {
        Self::SchemaValidationError {
            message: message.into(),
            element: Some(element.into()),
        }
    }

    /// Create a new configuration error
    #[must_use]
    pub fn config(message: impl Into<String>) -> Self {
        Self::ConfigError(message.into())
    }

    /// Create a serialization error
    #[must_use]
    pub fn serialization(message: impl Into<String>) -> Self {
        Self::SerializationError(message.into())
    }
}

impl From<serde_json::Error> for LinkMLError {
    fn from(err: serde_json::Error) -> Self {
        Self::SerializationError(err.to_string())
    }
}

impl From<serde_yaml::Error> for LinkMLError {
    fn from(err: serde_yaml::Error) -> Self {
        Self::SerializationError(err.to_string())
    }
}
