//! Error types for the admin API client
//!
//! - `StoreError`: persistent key-value store failures
//! - `ClientError`: everything a request can fail with

use thiserror::Error;

/// Persistent store errors
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("Store I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Store is not valid JSON: {0}")]
    Serde(#[from] serde_json::Error),
}

/// Errors returned by `AdminClient` and the API modules built on it
#[derive(Debug, Error)]
pub enum ClientError {
    /// No endpoint configured. Never retried; configure the session first.
    #[error("API endpoint not configured")]
    Configuration,

    /// Non-2xx, non-401 response
    #[error("API {status}: {message}")]
    Api { status: u16, message: String },

    /// 401 response. The session has already been cleared.
    #[error("Session expired")]
    SessionExpired,

    #[error("Request failed: {0}")]
    Request(#[from] reqwest::Error),

    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    #[error("Deserialization error: {0}")]
    Decode(String),

    #[error("Session store error: {0}")]
    Store(#[from] StoreError),
}

impl ClientError {
    /// HTTP status carried by the error, if the server answered at all
    pub fn status(&self) -> Option<u16> {
        match self {
            ClientError::Api { status, .. } => Some(*status),
            ClientError::SessionExpired => Some(401),
            _ => None,
        }
    }
}
