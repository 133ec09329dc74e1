//! Appointment listing handlers.
//!
//! The same operation is reachable two ways: `GET` with the filter in the
//! query string, and `POST` with the filter as a JSON body. Query-string
//! page values arrive as text and are coerced by the service exactly like
//! JSON numbers.

use axum::{
    Json,
    extract::{
        Query, State,
        rejection::{JsonRejection, QueryRejection},
    },
    response::{IntoResponse, Response},
};
use clinic_persistence::core::AppointmentStorage;
use clinic_persistence::services::get_appointment_with_filter;
use clinic_persistence::types::AppointmentQuery;
use tracing::debug;

use crate::error::{RestResult, status_for};
use crate::state::AppState;

/// Handler for `GET /api/client/bu/appointment/getAppointmentWithFilter`.
///
/// # Response
///
/// - `200 OK` - listing or single appointment
/// - `400 Bad Request` - invalid client id or date filter
/// - `404 Not Found` - `appointmentId` matched nothing
/// - `500 Internal Server Error` - storage failure
pub async fn appointment_get_handler<S>(
    State(state): State<AppState<S>>,
    query: Result<Query<AppointmentQuery>, QueryRejection>,
) -> RestResult<Response>
where
    S: AppointmentStorage + Send + Sync + 'static,
{
    let Query(query) = query?;
    Ok(respond(&state, query).await)
}

/// Handler for `POST /api/client/bu/appointment/getAppointmentWithFilter`.
///
/// Accepts the same fields as the `GET` variant in a JSON body.
pub async fn appointment_post_handler<S>(
    State(state): State<AppState<S>>,
    body: Result<Json<AppointmentQuery>, JsonRejection>,
) -> RestResult<Response>
where
    S: AppointmentStorage + Send + Sync + 'static,
{
    let Json(query) = body?;
    Ok(respond(&state, query).await)
}

async fn respond<S>(state: &AppState<S>, query: AppointmentQuery) -> Response
where
    S: AppointmentStorage + Send + Sync + 'static,
{
    debug!(
        client_id = %query.client_id,
        appointment_id = ?query.appointment_id,
        "Processing appointment query"
    );

    let response = get_appointment_with_filter(state.storage(), &query).await;
    (status_for(response.failure), Json(response)).into_response()
}
