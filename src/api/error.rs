//! Errors raised while talking to the course API.

use thiserror::Error;

/// Failure of a single API call.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ApiError {
    /// Base URL could not be parsed or uses an unsupported scheme
    #[error("Invalid API URL '{url}': {message}")]
    InvalidUrl {
        /// The rejected URL
        url: String,
        /// Why it was rejected
        message: String,
    },

    /// Connection, timeout or body read failure
    #[error("Request to {endpoint} failed: {message}")]
    Transport {
        /// Endpoint that was requested
        endpoint: String,
        /// Underlying transport error
        message: String,
    },

    /// Server answered with a non-success status
    #[error("{endpoint} returned HTTP {status}")]
    Status {
        /// Endpoint that was requested
        endpoint: String,
        /// HTTP status code
        status: u16,
        /// `message` field of the error body, if the server sent one
        message: Option<String>,
    },

    /// Response body did not match the expected schema
    #[error("Unexpected response from {endpoint}: {message}")]
    Parse {
        /// Endpoint that was requested
        endpoint: String,
        /// Decoder error
        message: String,
    },
}

impl ApiError {
    /// Server-provided message carried by a status error.
    pub fn server_message(&self) -> Option<&str> {
        match self {
            Self::Status { message, .. } => message.as_deref(),
            _ => None,
        }
    }
}
