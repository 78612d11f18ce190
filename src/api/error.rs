//! Errors reported by the remote admin API.

use std::path::PathBuf;

use thiserror::Error;

use crate::clock::Timestamp;
use crate::container::ErrorState;

#[derive(Debug, Error)]
pub enum ApiError {
    /// The entity does not exist server-side
    #[error("{kind} '{id}' not found")]
    NotFound { kind: &'static str, id: String },

    /// The server could not be reached or failed
    #[error("Service unavailable: {0}")]
    Unavailable(String),

    /// The server refused the request
    #[error("Request rejected: {0}")]
    Rejected(String),

    #[error("Failed to read seed file '{path}': {source}")]
    SeedRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse seed file '{path}': {source}")]
    SeedParse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

impl ApiError {
    /// Error type string for debug payloads
    pub fn error_type(&self) -> &'static str {
        match self {
            ApiError::NotFound { .. } => "not_found",
            ApiError::Unavailable(_) => "unavailable",
            ApiError::Rejected(_) => "rejected",
            ApiError::SeedRead { .. } => "seed_read",
            ApiError::SeedParse { .. } => "seed_parse",
        }
    }

    /// Record this failure as a first-attempt [`ErrorState`].
    pub fn to_error_state(&self, at: Timestamp) -> ErrorState {
        ErrorState::new(self.to_string(), at).with_debug(serde_json::json!({
            "type": self.error_type(),
            "message": self.to_string(),
        }))
    }
}
