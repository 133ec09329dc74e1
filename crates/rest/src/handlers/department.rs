//! Department edit handler.

use axum::{
    Json,
    extract::{State, rejection::JsonRejection},
    response::{IntoResponse, Response},
};
use clinic_persistence::core::{AppointmentStorage, DepartmentStorage};
use clinic_persistence::services::edit_department;
use clinic_persistence::types::EditDepartmentRequest;
use tracing::debug;

use crate::error::{RestResult, status_for};
use crate::state::AppState;

/// Handler for `PUT /api/client/bu/department/editDepartment`.
///
/// Creates the department if it does not exist, otherwise merges the
/// supplied fields into it.
///
/// # Response
///
/// - `200 OK` - created, modified, or nothing to change
/// - `400 Bad Request` - `clientId` or `deptId` missing
/// - `500 Internal Server Error` - storage failure
pub async fn edit_department_handler<S>(
    State(state): State<AppState<S>>,
    body: Result<Json<EditDepartmentRequest>, JsonRejection>,
) -> RestResult<Response>
where
    S: AppointmentStorage + DepartmentStorage + Send + Sync + 'static,
{
    let Json(request) = body?;

    debug!(
        client_id = ?request.client_id,
        dept_id = ?request.dept_id,
        "Processing department edit"
    );

    let response = edit_department(state.storage(), &request).await;
    Ok((status_for(response.failure), Json(response)).into_response())
}
