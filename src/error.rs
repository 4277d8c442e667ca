// src/error.rs
//! Application error types with structured error handling.
//!
//! Each variant names the stage of the collection run that failed. Every
//! variant is fatal to the run: nothing is handed to the store unless the
//! whole listing was collected.

use thiserror::Error;

/// Main application error type.
#[derive(Error, Debug)]
pub enum AppError {
    #[error("Missing configuration: {0}")]
    MissingConfiguration(String),

    #[error("Login failed with HTTP status {status}")]
    AuthenticationFailed { status: reqwest::StatusCode },

    #[error("Request to {url} failed with HTTP status {status}")]
    FetchFailed {
        url: String,
        status: reqwest::StatusCode,
    },

    #[error("Unparseable document date '{raw}': {source}")]
    DateParse {
        raw: String,
        #[source]
        source: chrono::ParseError,
    },

    #[error("Network failure: {0}")]
    NetworkFailure(#[from] reqwest::Error),

    #[error("Malformed response: {0}")]
    MalformedResponse(String),

    #[error("Invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    #[error("Filesystem IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Storage error at {path}: {message}")]
    Storage {
        path: std::path::PathBuf,
        message: String,
    },

    #[error("Internal error: {message}")]
    InternalError {
        message: String,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    #[error(transparent)]
    Validation(#[from] crate::types::ValidationError),
}

impl AppError {
    /// Whether this error is transient and worth retrying at the transport level.
    ///
    /// Only connection-level failures, timeouts, throttling and server errors
    /// qualify. Authentication and date errors never do.
    pub fn is_retryable(&self) -> bool {
        match self {
            Self::NetworkFailure(e) => e.is_connect() || e.is_timeout(),
            Self::FetchFailed { status, .. } => {
                status.is_server_error() || *status == reqwest::StatusCode::TOO_MANY_REQUESTS
            }
            _ => false,
        }
    }
}

impl From<serde_json::Error> for AppError {
    fn from(err: serde_json::Error) -> Self {
        AppError::MalformedResponse(err.to_string())
    }
}

/// Result type alias for convenience
pub type Result<T, E = AppError> = std::result::Result<T, E>;
