//! Client Error Types
//!
//! Errors raised while talking to the forecasting backend. The display text
//! of each variant is what pages show to the user.

use crate::session::SessionError;
use thiserror::Error;

/// Errors from a single API call
#[derive(Error, Debug)]
pub enum ClientError {
    /// The request never produced a response
    #[error("Network error: {0}")]
    Transport(#[from] reqwest::Error),

    /// Non-2xx response; displays as the raw response body
    #[error("{body}")]
    Api { status: u16, body: String },

    /// A 2xx response whose body was not the expected JSON
    #[error("Unexpected response: {0}")]
    Decode(String),

    /// The token could not be read or written
    #[error("Session error: {0}")]
    Session(#[from] SessionError),
}

impl ClientError {
    /// HTTP status for API errors
    pub fn status(&self) -> Option<u16> {
        match self {
            ClientError::Api { status, .. } => Some(*status),
            _ => None,
        }
    }
}

impl From<serde_json::Error> for ClientError {
    fn from(err: serde_json::Error) -> Self {
        ClientError::Decode(err.to_string())
    }
}

/// Result type for API operations
pub type ClientResult<T> = Result<T, ClientError>;
