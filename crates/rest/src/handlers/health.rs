//! Health check endpoint handler.

use axum::{
    Json,
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use clinic_persistence::core::AppointmentStorage;
use tracing::debug;

use crate::state::AppState;

/// Handler for `GET /health`.
///
/// Reports liveness and the storage backend in use. Client databases are
/// opened lazily, so this does not touch storage.
pub async fn health_handler<S>(State(state): State<AppState<S>>) -> Response
where
    S: AppointmentStorage + Send + Sync + 'static,
{
    debug!("Processing health check request");

    let body = serde_json::json!({
        "status": "healthy",
        "backend": state.backend_name(),
        "version": clinic_persistence::VERSION,
        "timestamp": chrono::Utc::now().to_rfc3339()
    });

    (StatusCode::OK, Json(body)).into_response()
}
