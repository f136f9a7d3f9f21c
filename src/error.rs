//! Error types for shutterbox.
//!
//! Uses thiserror for ergonomic error definitions that integrate
//! with axum's response system.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    // Validation errors
    #[error("No file uploaded")]
    MissingFile,

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    // Resource errors
    #[error("File not found: {0}")]
    FileNotFound(String),

    // File errors
    #[error("File too large: max {max_size} bytes")]
    FileTooLarge { max_size: usize },

    // Transfer errors (device-side upload)
    #[error("Transfer failed: {0}")]
    Transfer(String),

    // Generic errors
    #[error("Internal error: {0}")]
    Internal(String),

    #[error("{0}")]
    Other(#[from] anyhow::Error),
}

impl Error {
    pub fn status_code(&self) -> StatusCode {
        match self {
            // 400
            Self::MissingFile | Self::InvalidInput(_) => StatusCode::BAD_REQUEST,

            // 404
            Self::FileNotFound(_) => StatusCode::NOT_FOUND,

            // 413
            Self::FileTooLarge { .. } => StatusCode::PAYLOAD_TOO_LARGE,

            // 502
            Self::Transfer(_) => StatusCode::BAD_GATEWAY,

            // 500
            Self::Internal(_) | Self::Other(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for Error {
    fn into_response(self) -> Response {
        let status = self.status_code();

        // Internal failures get a generic body; the detail goes to the log.
        let message = if status.is_server_error() {
            tracing::error!("Request failed: {}", self);
            "Server error".to_string()
        } else {
            self.to_string()
        };

        let body = Json(json!({ "message": message }));

        (status, body).into_response()
    }
}

// Convenience conversions
impl From<std::io::Error> for Error {
    fn from(err: std::io::Error) -> Self {
        Self::Internal(err.to_string())
    }
}

impl From<reqwest::Error> for Error {
    fn from(err: reqwest::Error) -> Self {
        Self::Transfer(err.to_string())
    }
}
