//! Department edit (upsert).

use chrono::Utc;

use crate::core::DepartmentStorage;
use crate::error::{StorageError, StorageResult, TenantError};
use crate::tenant::ClientId;
use crate::types::{
    Department, DepartmentPayload, DepartmentResponse, EditDepartmentRequest, FailureKind,
};

const CREDENTIAL_MISSING: &str = "Credential missing.";
const CREATED: &str = "Department created successfully.";
const MODIFIED: &str = "Department modified successfully.";
const UNCHANGED: &str = "No changes were made.";
const INTERNAL: &str = "Internal server error.";

/// Updates a department, creating it if it does not exist.
///
/// Only fields present in the request are compared and written. The
/// response echoes the department on create and modify, and carries only a
/// message when nothing changed.
pub async fn edit_department<S>(storage: &S, request: &EditDepartmentRequest) -> DepartmentResponse
where
    S: DepartmentStorage + ?Sized,
{
    let Some((client_id, dept_id)) = request.credentials() else {
        return DepartmentResponse::failure(FailureKind::InvalidRequest, CREDENTIAL_MISSING);
    };

    match upsert(storage, client_id, dept_id, request).await {
        Ok(response) => response,
        Err(StorageError::Tenant(TenantError::InvalidClient { reason, .. })) => {
            tracing::debug!(client_id, reason = %reason, "Rejected department edit");
            DepartmentResponse::failure(FailureKind::InvalidRequest, CREDENTIAL_MISSING)
        }
        Err(err) => {
            tracing::error!(client_id, dept_id, error = %err, "Department edit failed");
            DepartmentResponse::failure(FailureKind::Internal, INTERNAL)
        }
    }
}

async fn upsert<S>(
    storage: &S,
    client_id: &str,
    dept_id: &str,
    request: &EditDepartmentRequest,
) -> StorageResult<DepartmentResponse>
where
    S: DepartmentStorage + ?Sized,
{
    let client = ClientId::new(client_id);
    let now = Utc::now();

    let Some(mut department) = storage.find_department(&client, dept_id).await? else {
        let department = Department {
            dept_id: dept_id.to_string(),
            ..Department::from_request(request, now)
        };
        storage.insert_department(&client, &department).await?;

        tracing::info!(client_id, dept_id, "Department created");
        return Ok(DepartmentResponse::success(
            CREATED,
            Some(DepartmentPayload::created(client_id, &department)),
        ));
    };

    if !department.apply(request) {
        return Ok(DepartmentResponse::success(UNCHANGED, None));
    }

    department.updated_at = now;
    storage.update_department(&client, &department).await?;

    tracing::info!(client_id, dept_id, "Department modified");
    Ok(DepartmentResponse::success(
        MODIFIED,
        Some(DepartmentPayload::modified(client_id, &department)),
    ))
}
