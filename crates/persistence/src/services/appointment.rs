//! The filtered, paginated appointment listing.

use crate::core::AppointmentStorage;
use crate::error::StorageResult;
use crate::filter::AppointmentFilter;
use crate::format::format_appointment;
use crate::tenant::ClientId;
use crate::types::{
    AppointmentPage, AppointmentQuery, FailureKind, PageMetadata, PageRequest, ServiceResponse,
};

use super::failure_kind;

const FOUND_ONE: &str = "The Appointment retrieved successfully.";
const NOT_FOUND: &str = "Appointment not found";
const FOUND_ALL: &str = "All Appointment retrieved successfully.";
const FOUND_NONE: &str = "No Appointments found";
const FOUND_PAGE: &str = "Appointment details retrieved successfully.";

/// Fetches appointments for a client.
///
/// Three paths, tried in order:
///
/// 1. `appointmentId` present: that single live appointment, ignoring every
///    other filter. Metadata is always `1/1/1/1`.
/// 2. `page` or `perPage` missing: every matching appointment, unpaginated.
/// 3. Otherwise: one page of matches plus the total count.
///
/// Any storage failure becomes `status: false` with the error text as the
/// message.
///
/// # Example
///
/// ```no_run
/// use clinic_persistence::backends::sqlite::SqliteBackend;
/// use clinic_persistence::services::get_appointment_with_filter;
/// use clinic_persistence::types::AppointmentQuery;
///
/// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let backend = SqliteBackend::in_memory()?;
/// let query = AppointmentQuery::for_client("c1").with_page(1u64, 10u64);
///
/// let response = get_appointment_with_filter(&backend, &query).await;
/// if let Some(page) = response.data {
///     println!("{} of {}", page.appointments.len(), page.metadata.total_count);
/// }
/// # Ok(())
/// # }
/// ```
pub async fn get_appointment_with_filter<S>(
    storage: &S,
    query: &AppointmentQuery,
) -> ServiceResponse<AppointmentPage>
where
    S: AppointmentStorage + ?Sized,
{
    match run(storage, query).await {
        Ok(response) => response,
        Err(err) => {
            tracing::warn!(
                client_id = %query.client_id,
                backend = storage.backend_name(),
                error = %err,
                "Appointment query failed"
            );
            ServiceResponse::failure(failure_kind(&err), err.to_string())
        }
    }
}

async fn run<S>(storage: &S, query: &AppointmentQuery) -> StorageResult<ServiceResponse<AppointmentPage>>
where
    S: AppointmentStorage + ?Sized,
{
    let client = ClientId::new(query.client_id.as_str());

    if let Some(id) = query.appointment_id() {
        let record = storage
            .find_appointment(&client, &AppointmentFilter::by_id(id))
            .await?;

        return Ok(match record {
            Some(record) => ServiceResponse::success(
                FOUND_ONE,
                AppointmentPage {
                    appointments: vec![format_appointment(&record)],
                    metadata: PageMetadata::single(),
                },
            ),
            None => ServiceResponse::failure(FailureKind::NotFound, NOT_FOUND),
        });
    }

    let filter = AppointmentFilter::from_query(query)?;

    let Some(page) = PageRequest::from_params(query.page.as_ref(), query.per_page.as_ref()) else {
        let records = storage.find_appointments(&client, &filter, None).await?;
        let count = records.len() as u64;

        tracing::debug!(client_id = %client, count, "Listed all appointments");

        return Ok(ServiceResponse::success(
            FOUND_ALL,
            AppointmentPage {
                appointments: records.iter().map(format_appointment).collect(),
                metadata: PageMetadata::unpaginated(count),
            },
        ));
    };

    let records = storage
        .find_appointments(&client, &filter, Some(page.into()))
        .await?;
    let total_count = storage.count_appointments(&client, &filter).await?;

    tracing::debug!(
        client_id = %client,
        page = page.page(),
        per_page = page.per_page(),
        returned = records.len(),
        total_count,
        "Listed appointment page"
    );

    let message = if total_count < 1 { FOUND_NONE } else { FOUND_PAGE };

    Ok(ServiceResponse::success(
        message,
        AppointmentPage {
            appointments: records.iter().map(format_appointment).collect(),
            metadata: page.metadata(total_count),
        },
    ))
}
