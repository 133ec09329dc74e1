//! AppointmentStorage and DepartmentStorage implementations for SQLite.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use rusqlite::{OptionalExtension, Row, params, params_from_iter};

use crate::core::{AppointmentStorage, DepartmentStorage};
use crate::error::{BackendError, ResourceError, StorageError, StorageResult};
use crate::filter::AppointmentFilter;
use crate::tenant::ClientId;
use crate::types::{
    AppointmentRecord, ChairRef, Collection, Department, DisplayRef, NamedRef, PersonRef, Window,
};

use super::SqliteBackend;
use super::query_builder::{count_appointments, format_timestamp, select_appointments};

fn internal_error(message: String) -> StorageError {
    StorageError::Backend(BackendError::Internal {
        backend_name: "sqlite".to_string(),
        message,
        source: None,
    })
}

fn query_error(message: String) -> StorageError {
    StorageError::Backend(BackendError::QueryError { message })
}

pub(crate) fn parse_timestamp(field: &str, value: &str) -> StorageResult<DateTime<Utc>> {
    chrono::DateTime::parse_from_rfc3339(value)
        .map(|dt| dt.with_timezone(&Utc))
        .map_err(|e| internal_error(format!("Failed to parse {}: {}", field, e)))
}

fn parse_optional_timestamp(field: &str, value: Option<String>) -> StorageResult<Option<DateTime<Utc>>> {
    value.map(|v| parse_timestamp(field, &v)).transpose()
}

/// An appointment row before its timestamps are parsed.
struct RawAppointment {
    id: String,
    display_id: Option<String>,
    business_unit: Option<NamedRef>,
    branch: Option<NamedRef>,
    duty_doctor: Option<PersonRef>,
    specialist_doctor: Option<PersonRef>,
    dental_assistant: Option<String>,
    patient: Option<PersonRef>,
    case_sheet: Option<DisplayRef>,
    case: Option<DisplayRef>,
    chair: Option<ChairRef>,
    status: Option<String>,
    chief_complaint: Option<String>,
    appointment_date: Option<String>,
    slot_from: Option<String>,
    slot_to: Option<String>,
    is_active: bool,
    created_by: Option<PersonRef>,
    updated_by: Option<PersonRef>,
    deleted_by: Option<PersonRef>,
    created_at: String,
    updated_at: String,
    deleted_at: Option<String>,
}

fn populated_id(row: &Row<'_>, column: &str) -> rusqlite::Result<Option<String>> {
    row.get(format!("{}__id", column).as_str())
}

fn projected(row: &Row<'_>, column: &str, target: &str) -> rusqlite::Result<Option<String>> {
    row.get(format!("{}__{}", column, target).as_str())
}

fn named_ref(row: &Row<'_>, column: &str) -> rusqlite::Result<Option<NamedRef>> {
    match populated_id(row, column)? {
        Some(id) => Ok(Some(NamedRef {
            id,
            name: projected(row, column, "name")?,
        })),
        None => Ok(None),
    }
}

fn person_ref(row: &Row<'_>, column: &str) -> rusqlite::Result<Option<PersonRef>> {
    match populated_id(row, column)? {
        Some(id) => Ok(Some(PersonRef {
            id,
            first_name: projected(row, column, "first_name")?,
            last_name: projected(row, column, "last_name")?,
        })),
        None => Ok(None),
    }
}

fn display_ref(row: &Row<'_>, column: &str) -> rusqlite::Result<Option<DisplayRef>> {
    match populated_id(row, column)? {
        Some(id) => Ok(Some(DisplayRef {
            id,
            display_id: projected(row, column, "display_id")?,
        })),
        None => Ok(None),
    }
}

fn chair_ref(row: &Row<'_>, column: &str) -> rusqlite::Result<Option<ChairRef>> {
    match populated_id(row, column)? {
        Some(id) => Ok(Some(ChairRef {
            id,
            chair_number: projected(row, column, "chair_number")?,
        })),
        None => Ok(None),
    }
}

impl RawAppointment {
    fn from_row(row: &Row<'_>) -> rusqlite::Result<Self> {
        Ok(Self {
            id: row.get("id")?,
            display_id: row.get("display_id")?,
            business_unit: named_ref(row, "bu_id")?,
            branch: named_ref(row, "branch_id")?,
            duty_doctor: person_ref(row, "duty_doctor_id")?,
            specialist_doctor: person_ref(row, "specialist_doctor_id")?,
            dental_assistant: row.get("dental_assistant")?,
            patient: person_ref(row, "patient_id")?,
            case_sheet: display_ref(row, "case_sheet_id")?,
            case: display_ref(row, "case_id")?,
            chair: chair_ref(row, "chair_id")?,
            status: row.get("status")?,
            chief_complaint: row.get("chief_complaint")?,
            appointment_date: row.get("appointment_date")?,
            slot_from: row.get("slot_from")?,
            slot_to: row.get("slot_to")?,
            is_active: row.get::<_, i64>("is_active")? != 0,
            created_by: person_ref(row, "created_by")?,
            updated_by: person_ref(row, "updated_by")?,
            deleted_by: person_ref(row, "deleted_by")?,
            created_at: row.get("created_at")?,
            updated_at: row.get("updated_at")?,
            deleted_at: row.get("deleted_at")?,
        })
    }

    fn into_record(self) -> StorageResult<AppointmentRecord> {
        Ok(AppointmentRecord {
            appointment_date: parse_optional_timestamp("appointment_date", self.appointment_date)?,
            created_at: parse_timestamp("created_at", &self.created_at)?,
            updated_at: parse_timestamp("updated_at", &self.updated_at)?,
            deleted_at: parse_optional_timestamp("deleted_at", self.deleted_at)?,
            id: self.id,
            display_id: self.display_id,
            business_unit: self.business_unit,
            branch: self.branch,
            duty_doctor: self.duty_doctor,
            specialist_doctor: self.specialist_doctor,
            dental_assistant: self.dental_assistant,
            patient: self.patient,
            case_sheet: self.case_sheet,
            case: self.case,
            chair: self.chair,
            status: self.status,
            chief_complaint: self.chief_complaint,
            slot_from: self.slot_from,
            slot_to: self.slot_to,
            is_active: self.is_active,
            created_by: self.created_by,
            updated_by: self.updated_by,
            deleted_by: self.deleted_by,
        })
    }
}

#[async_trait]
impl AppointmentStorage for SqliteBackend {
    fn backend_name(&self) -> &'static str {
        "sqlite"
    }

    async fn find_appointment(
        &self,
        client: &ClientId,
        filter: &AppointmentFilter,
    ) -> StorageResult<Option<AppointmentRecord>> {
        let records = self
            .find_appointments(client, filter, Some(Window { skip: 0, limit: 1 }))
            .await?;
        Ok(records.into_iter().next())
    }

    async fn find_appointments(
        &self,
        client: &ClientId,
        filter: &AppointmentFilter,
        window: Option<Window>,
    ) -> StorageResult<Vec<AppointmentRecord>> {
        let conn = self.connection(client)?;
        let query = select_appointments(filter, window);

        let mut stmt = conn
            .prepare(&query.sql)
            .map_err(|e| query_error(format!("Failed to prepare appointment query: {}", e)))?;

        let rows = stmt
            .query_map(params_from_iter(query.params.iter()), RawAppointment::from_row)
            .map_err(|e| query_error(format!("Failed to query appointments: {}", e)))?;

        let mut records = Vec::new();
        for row in rows {
            let raw = row.map_err(|e| internal_error(format!("Failed to read appointment: {}", e)))?;
            records.push(raw.into_record()?);
        }

        tracing::debug!(
            client_id = %client,
            clauses = filter.clauses().len(),
            returned = records.len(),
            "Fetched appointments"
        );

        Ok(records)
    }

    async fn count_appointments(
        &self,
        client: &ClientId,
        filter: &AppointmentFilter,
    ) -> StorageResult<u64> {
        let conn = self.connection(client)?;
        let query = count_appointments(filter);

        let count: i64 = conn
            .query_row(&query.sql, params_from_iter(query.params.iter()), |row| {
                row.get(0)
            })
            .map_err(|e| query_error(format!("Failed to count appointments: {}", e)))?;

        Ok(count.max(0) as u64)
    }
}

#[async_trait]
impl DepartmentStorage for SqliteBackend {
    async fn find_department(
        &self,
        client: &ClientId,
        dept_id: &str,
    ) -> StorageResult<Option<Department>> {
        let conn = self.connection(client)?;

        let row = conn
            .query_row(
                "SELECT id, branch_id, dept_name, description, is_active, created_at, updated_at
                 FROM departments WHERE id = ?1",
                params![dept_id],
                |row| {
                    Ok((
                        row.get::<_, String>(0)?,
                        row.get::<_, Option<String>>(1)?,
                        row.get::<_, Option<String>>(2)?,
                        row.get::<_, Option<String>>(3)?,
                        row.get::<_, i64>(4)?,
                        row.get::<_, String>(5)?,
                        row.get::<_, String>(6)?,
                    ))
                },
            )
            .optional()
            .map_err(|e| internal_error(format!("Failed to read department: {}", e)))?;

        let Some((id, branch_id, dept_name, description, is_active, created_at, updated_at)) = row
        else {
            return Ok(None);
        };

        Ok(Some(Department {
            dept_id: id,
            branch_id,
            dept_name,
            description,
            is_active: is_active != 0,
            created_at: parse_timestamp("created_at", &created_at)?,
            updated_at: parse_timestamp("updated_at", &updated_at)?,
        }))
    }

    async fn insert_department(
        &self,
        client: &ClientId,
        department: &Department,
    ) -> StorageResult<()> {
        let conn = self.connection(client)?;

        let result = conn.execute(
            "INSERT INTO departments
                (id, branch_id, dept_name, description, is_active, created_at, updated_at)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)",
            params![
                department.dept_id,
                department.branch_id,
                department.dept_name,
                department.description,
                department.is_active as i64,
                format_timestamp(&department.created_at),
                format_timestamp(&department.updated_at),
            ],
        );

        match result {
            Ok(_) => Ok(()),
            Err(rusqlite::Error::SqliteFailure(err, _))
                if err.code == rusqlite::ErrorCode::ConstraintViolation =>
            {
                Err(StorageError::Resource(ResourceError::AlreadyExists {
                    collection: Collection::Department.to_string(),
                    id: department.dept_id.clone(),
                }))
            }
            Err(e) => Err(internal_error(format!("Failed to insert department: {}", e))),
        }
    }

    async fn update_department(
        &self,
        client: &ClientId,
        department: &Department,
    ) -> StorageResult<()> {
        let conn = self.connection(client)?;

        let changed = conn
            .execute(
                "UPDATE departments
                 SET branch_id = ?2, dept_name = ?3, description = ?4, is_active = ?5, updated_at = ?6
                 WHERE id = ?1",
                params![
                    department.dept_id,
                    department.branch_id,
                    department.dept_name,
                    department.description,
                    department.is_active as i64,
                    format_timestamp(&department.updated_at),
                ],
            )
            .map_err(|e| internal_error(format!("Failed to update department: {}", e)))?;

        if changed == 0 {
            return Err(StorageError::Resource(ResourceError::NotFound {
                collection: Collection::Department.to_string(),
                id: department.dept_id.clone(),
            }));
        }

        Ok(())
    }
}
