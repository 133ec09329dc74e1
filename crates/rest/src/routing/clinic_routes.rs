//! Clinic route configuration.

use axum::{
    Router,
    routing::{get, put},
};
use clinic_persistence::core::{AppointmentStorage, DepartmentStorage};

use crate::handlers;
use crate::state::AppState;

/// Path of the appointment listing.
pub const APPOINTMENT_FILTER_PATH: &str = "/api/client/bu/appointment/getAppointmentWithFilter";

/// Path of the department upsert.
pub const EDIT_DEPARTMENT_PATH: &str = "/api/client/bu/department/editDepartment";

/// Creates all API routes.
///
/// # Routes
///
/// - `GET /health` - Health check
/// - `GET /api/client/bu/appointment/getAppointmentWithFilter` - Listing (query string)
/// - `POST /api/client/bu/appointment/getAppointmentWithFilter` - Listing (JSON body)
/// - `PUT /api/client/bu/department/editDepartment` - Department upsert
pub fn create_routes<S>(state: AppState<S>) -> Router
where
    S: AppointmentStorage + DepartmentStorage + Send + Sync + 'static,
{
    Router::new()
        .route("/health", get(handlers::health_handler::<S>))
        .route(
            APPOINTMENT_FILTER_PATH,
            get(handlers::appointment_get_handler::<S>)
                .post(handlers::appointment_post_handler::<S>),
        )
        .route(
            EDIT_DEPARTMENT_PATH,
            put(handlers::edit_department_handler::<S>),
        )
        .with_state(state)
}
