//! Error types for the clinic HTTP API.
//!
//! Services never fail; they answer with an envelope whose non-serialized
//! failure kind picks the HTTP status. [`RestError`] covers what goes wrong
//! before a service is reached, such as a body that is not JSON, and renders
//! the same `{ status, message }` envelope.
//!
//! # Status Mapping
//!
//! | Failure | HTTP Status |
//! |---------|-------------|
//! | none | 200 |
//! | NotFound | 404 |
//! | InvalidRequest | 400 |
//! | Internal | 500 |

use axum::{
    Json,
    extract::rejection::{JsonRejection, QueryRejection},
    response::{IntoResponse, Response},
};
use clinic_persistence::types::FailureKind;
use http::StatusCode;
use thiserror::Error;

/// Errors raised by the HTTP layer itself.
#[derive(Debug, Error)]
pub enum RestError {
    /// The JSON body could not be decoded.
    #[error("{message}")]
    InvalidBody {
        /// Status chosen by the extractor (400, 415 or 422).
        status: StatusCode,
        /// Human-readable reason.
        message: String,
    },

    /// The query string could not be decoded (HTTP 400).
    #[error("{message}")]
    InvalidQuery {
        /// Human-readable reason.
        message: String,
    },
}

/// Result type for HTTP handlers.
pub type RestResult<T> = Result<T, RestError>;

impl RestError {
    /// Returns the HTTP status for this error.
    pub fn status_code(&self) -> StatusCode {
        match self {
            RestError::InvalidBody { status, .. } => *status,
            RestError::InvalidQuery { .. } => StatusCode::BAD_REQUEST,
        }
    }
}

/// Maps a service outcome to its HTTP status.
pub fn status_for(failure: Option<FailureKind>) -> StatusCode {
    match failure {
        None => StatusCode::OK,
        Some(FailureKind::NotFound) => StatusCode::NOT_FOUND,
        Some(FailureKind::InvalidRequest) => StatusCode::BAD_REQUEST,
        Some(FailureKind::Internal) => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

impl IntoResponse for RestError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        tracing::debug!(status = status.as_u16(), error = %self, "Request rejected");

        let body = serde_json::json!({
            "status": false,
            "message": self.to_string(),
        });
        (status, Json(body)).into_response()
    }
}

impl From<JsonRejection> for RestError {
    fn from(rejection: JsonRejection) -> Self {
        RestError::InvalidBody {
            status: rejection.status(),
            message: rejection.body_text(),
        }
    }
}

impl From<QueryRejection> for RestError {
    fn from(rejection: QueryRejection) -> Self {
        RestError::InvalidQuery {
            message: rejection.body_text(),
        }
    }
}
