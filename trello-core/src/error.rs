//! Error types for trellosh

use std::path::PathBuf;
use thiserror::Error;

/// Core error type for Trello operations
#[derive(Error, Debug)]
pub enum TrelloError {
    /// The credentials file could not be read
    #[error("No credentials found at {}: {source}", .path.display())]
    CredentialsNotFound {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The credentials file was read but is not a valid credentials object
    #[error("Invalid credentials in {}: {reason}", .path.display())]
    InvalidCredentials { path: PathBuf, reason: String },

    /// Serialization/deserialization errors
    #[error("Serialization error: {0}")]
    Serialization(String),

    /// The request never produced a response (connect, timeout, TLS)
    #[error("Transport error: {0}")]
    Transport(String),

    /// Missing or rejected key/token
    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    /// Requested resource does not exist
    #[error("Not found: {0}")]
    NotFound(String),

    /// Any other non-success response from the API
    #[error("HTTP {status} from {endpoint}: {message}")]
    Api {
        status: u16,
        endpoint: String,
        message: String,
    },

    /// Invalid input or arguments
    #[error("Invalid input: {0}")]
    InvalidInput(String),
}

/// Result type alias for Trello operations
pub type Result<T> = std::result::Result<T, TrelloError>;

impl From<serde_json::Error> for TrelloError {
    fn from(err: serde_json::Error) -> Self {
        TrelloError::Serialization(err.to_string())
    }
}
