//! Error handling for cmdhist
//!
//! Every fallible operation in the crate returns [`Result`], so callers get
//! a single error type whether a record failed to render, decode or encode.

use std::io;
use thiserror::Error;

/// Result type alias for cmdhist operations
pub type Result<T> = std::result::Result<T, Error>;

/// Main error type for cmdhist operations
#[derive(Error, Debug)]
pub enum Error {
    /// IO operation failed
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    /// JSON serialization/deserialization failed
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// A visible field name is not one of the renderable fields
    #[error("Render error: unknown field '{field}'")]
    Render { field: String },

    /// An encoded line could not be decoded
    #[error("Parse error: {reason}")]
    Parse { reason: String },

    /// A record could not be represented in the line encoding
    #[error("Encoding error: {reason}")]
    Encoding { reason: String },

    /// Invalid timestamp format
    #[error("Invalid timestamp format: {timestamp}")]
    InvalidTimestamp { timestamp: String },

    /// Home directory could not be determined
    #[error("Home directory not found")]
    HomeDirectoryNotFound,

    /// Invalid command line arguments
    #[error("Invalid arguments: {message}")]
    InvalidArguments { message: String },

    /// Configuration validation failed
    #[error("Configuration validation failed: {field} - {reason}")]
    ConfigValidation { field: String, reason: String },
}

impl Error {
    /// Create a render error for an unrecognised field name
    pub fn render<S: Into<String>>(field: S) -> Self {
        Error::Render {
            field: field.into(),
        }
    }

    /// Create a parse error
    pub fn parse<S: Into<String>>(reason: S) -> Self {
        Error::Parse {
            reason: reason.into(),
        }
    }

    /// Create an encoding error
    pub fn encoding<S: Into<String>>(reason: S) -> Self {
        Error::Encoding {
            reason: reason.into(),
        }
    }

    /// Create an invalid arguments error
    pub fn invalid_arguments<S: Into<String>>(message: S) -> Self {
        Error::InvalidArguments {
            message: message.into(),
        }
    }

    /// Create a config validation error
    pub fn config_validation<S: Into<String>>(field: S, reason: S) -> Self {
        Error::ConfigValidation {
            field: field.into(),
            reason: reason.into(),
        }
    }

    /// Prefix a parse error with the line it came from; other errors pass through
    pub fn at_line(self, line_number: usize) -> Self {
        match self {
            Error::Parse { reason } => Error::Parse {
                reason: format!("line {}: {}", line_number, reason),
            },
            other => other,
        }
    }

    /// Get the error category for logging purposes
    pub fn category(&self) -> &'static str {
        match self {
            Error::Io(_) => "io",
            Error::Json(_) => "json",
            Error::Render { .. } => "render",
            Error::Parse { .. } | Error::InvalidTimestamp { .. } => "parse",
            Error::Encoding { .. } => "encoding",
            Error::HomeDirectoryNotFound => "system",
            Error::InvalidArguments { .. } => "arguments",
            Error::ConfigValidation { .. } => "config",
        }
    }
}
