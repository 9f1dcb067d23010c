//! Error types for the `VoiceIQ` web tier

use std::{error::Error as StdError, fmt};

/// Main error type for the `VoiceIQ` web tier
#[derive(Debug)]
pub enum Error {
    /// I/O error
    Io(std::io::Error),

    /// Configuration error
    Configuration {
        /// Error message
        message: String,
    },

    /// Validation error
    Validation {
        /// Field that failed validation
        field: String,
        /// Validation error message
        message: String,
    },

    /// Media format error raised before any upload is attempted
    UnsupportedMediaFormat {
        /// The rejected file extension
        format: String,
    },

    /// File size error raised before any upload is attempted
    FileSizeExceeded {
        /// Actual file size
        size: u64,
        /// Maximum allowed size
        max_size: u64,
    },

    /// Authentication error
    Authentication(String),

    /// Backend-reported failure: non-2xx status with a decoded message
    Api {
        /// HTTP status code returned by the backend
        status: u16,
        /// Backend error message, verbatim when one was provided
        message: String,
    },

    /// Transport-level HTTP failure (connection, timeout, decode)
    Http(String),

    /// Not found error
    NotFound {
        /// Resource that was not found
        resource: String,
    },

    /// Serialization error
    Serialization(serde_json::Error),

    /// Other error
    Other(String),
}

/// Result type alias using our Error type
pub type Result<T> = std::result::Result<T, Error>;

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Io(err) => write!(f, "I/O error: {err}"),
            Self::Configuration { message } => write!(f, "Configuration error: {message}"),
            Self::Validation { field, message } => {
                write!(f, "Validation error: {field} - {message}")
            }
            Self::UnsupportedMediaFormat { format } => {
                write!(f, "Media format not supported: {format}")
            }
            Self::FileSizeExceeded { size, max_size } => {
                write!(f, "File size {size} exceeds maximum of {max_size}")
            }
            Self::Authentication(msg) => write!(f, "Authentication failed: {msg}"),
            Self::Api { status, message } => write!(f, "Backend error ({status}): {message}"),
            Self::Http(msg) => write!(f, "HTTP error: {msg}"),
            Self::NotFound { resource } => write!(f, "Resource not found: {resource}"),
            Self::Serialization(err) => write!(f, "Serialization error: {err}"),
            Self::Other(msg) => write!(f, "{msg}"),
        }
    }
}

impl StdError for Error {
    fn source(&self) -> Option<&(dyn StdError + 'static)> {
        match self {
            Self::Io(err) => Some(err),
            Self::Serialization(err) => Some(err),
            _ => None,
        }
    }
}

impl Error {
    /// Message suitable for showing to the user.
    ///
    /// Backend-reported failures surface their message verbatim; everything
    /// else falls back to the display form.
    #[must_use]
    pub fn user_message(&self) -> String {
        match self {
            Self::Api { message, .. } => message.clone(),
            other => other.to_string(),
        }
    }

    /// HTTP status to answer with when this error is surfaced by a handler.
    #[must_use]
    pub const fn http_status(&self) -> u16 {
        match self {
            Self::Api { status, .. } => *status,
            Self::Validation { .. }
            | Self::UnsupportedMediaFormat { .. }
            | Self::FileSizeExceeded { .. } => 400,
            Self::Authentication(_) => 401,
            Self::NotFound { .. } => 404,
            Self::Http(_) => 502,
            _ => 500,
        }
    }
}

// From implementations for automatic conversions
impl From<std::io::Error> for Error {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err)
    }
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Self::Serialization(err)
    }
}
