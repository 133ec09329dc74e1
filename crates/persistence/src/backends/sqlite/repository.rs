//! Write helpers for appointments and the collections they reference.
//!
//! The query path never writes. These helpers load reference data and
//! appointments into a client database for seeding and tests, and record
//! soft deletes.

// Entity fields are named after their columns
#![allow(missing_docs)]

use chrono::{DateTime, Utc};
use rusqlite::params;
use uuid::Uuid;

use crate::error::{ResourceError, StorageError, StorageResult};
use crate::tenant::ClientId;
use crate::types::Collection;

use super::SqliteBackend;
use super::query_builder::format_timestamp;

/// A row in one of the collections appointments point at.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReferenceEntity<'a> {
    BusinessUnit {
        id: &'a str,
        name: &'a str,
    },
    Branch {
        id: &'a str,
        bu_id: Option<&'a str>,
        name: &'a str,
    },
    ClientUser {
        id: &'a str,
        first_name: &'a str,
        last_name: &'a str,
    },
    Patient {
        id: &'a str,
        first_name: &'a str,
        last_name: &'a str,
    },
    CaseSheet {
        id: &'a str,
        display_id: &'a str,
    },
    Case {
        id: &'a str,
        display_id: &'a str,
    },
    Chair {
        id: &'a str,
        chair_number: &'a str,
    },
}

impl ReferenceEntity<'_> {
    /// Returns the collection this entity belongs to.
    pub fn collection(&self) -> Collection {
        match self {
            ReferenceEntity::BusinessUnit { .. } => Collection::BusinessUnit,
            ReferenceEntity::Branch { .. } => Collection::Branch,
            ReferenceEntity::ClientUser { .. } => Collection::ClientUser,
            ReferenceEntity::Patient { .. } => Collection::Patient,
            ReferenceEntity::CaseSheet { .. } => Collection::CaseSheet,
            ReferenceEntity::Case { .. } => Collection::Case,
            ReferenceEntity::Chair { .. } => Collection::Chair,
        }
    }

    fn id(&self) -> &str {
        match self {
            ReferenceEntity::BusinessUnit { id, .. }
            | ReferenceEntity::Branch { id, .. }
            | ReferenceEntity::ClientUser { id, .. }
            | ReferenceEntity::Patient { id, .. }
            | ReferenceEntity::CaseSheet { id, .. }
            | ReferenceEntity::Case { id, .. }
            | ReferenceEntity::Chair { id, .. } => *id,
        }
    }
}

/// Fields of an appointment to insert.
///
/// `id` and `created_at` are generated when left empty.
#[derive(Debug, Clone, Default)]
pub struct NewAppointment {
    pub id: Option<String>,
    pub display_id: Option<String>,
    pub bu_id: Option<String>,
    pub branch_id: Option<String>,
    pub duty_doctor_id: Option<String>,
    pub specialist_doctor_id: Option<String>,
    pub dental_assistant: Option<String>,
    pub patient_id: Option<String>,
    pub case_sheet_id: Option<String>,
    pub case_id: Option<String>,
    pub chair_id: Option<String>,
    pub status: Option<String>,
    pub chief_complaint: Option<String>,
    pub appointment_date: Option<DateTime<Utc>>,
    pub slot_from: Option<String>,
    pub slot_to: Option<String>,
    pub inactive: bool,
    pub created_by: Option<String>,
    pub updated_by: Option<String>,
    pub created_at: Option<DateTime<Utc>>,
}

fn already_exists(collection: Collection, id: &str) -> impl FnOnce(rusqlite::Error) -> StorageError {
    let id = id.to_string();
    move |e| match e {
        rusqlite::Error::SqliteFailure(err, _)
            if err.code == rusqlite::ErrorCode::ConstraintViolation =>
        {
            StorageError::Resource(ResourceError::AlreadyExists {
                collection: collection.to_string(),
                id,
            })
        }
        other => StorageError::from(other),
    }
}

impl SqliteBackend {
    /// Inserts a reference entity into `client`'s database.
    pub fn insert_reference(&self, client: &ClientId, entity: ReferenceEntity<'_>) -> StorageResult<()> {
        let conn = self.connection(client)?;
        let now = format_timestamp(&Utc::now());
        let on_error = already_exists(entity.collection(), entity.id());

        let result = match entity {
            ReferenceEntity::BusinessUnit { id, name } => conn.execute(
                "INSERT INTO business_units (id, name, created_at) VALUES (?1, ?2, ?3)",
                params![id, name, now],
            ),
            ReferenceEntity::Branch { id, bu_id, name } => conn.execute(
                "INSERT INTO branches (id, bu_id, name, created_at) VALUES (?1, ?2, ?3, ?4)",
                params![id, bu_id, name, now],
            ),
            ReferenceEntity::ClientUser {
                id,
                first_name,
                last_name,
            } => conn.execute(
                "INSERT INTO client_users (id, first_name, last_name, created_at)
                 VALUES (?1, ?2, ?3, ?4)",
                params![id, first_name, last_name, now],
            ),
            ReferenceEntity::Patient {
                id,
                first_name,
                last_name,
            } => conn.execute(
                "INSERT INTO patients (id, first_name, last_name, created_at)
                 VALUES (?1, ?2, ?3, ?4)",
                params![id, first_name, last_name, now],
            ),
            ReferenceEntity::CaseSheet { id, display_id } => conn.execute(
                "INSERT INTO case_sheets (id, display_id, created_at) VALUES (?1, ?2, ?3)",
                params![id, display_id, now],
            ),
            ReferenceEntity::Case { id, display_id } => conn.execute(
                "INSERT INTO cases (id, display_id, created_at) VALUES (?1, ?2, ?3)",
                params![id, display_id, now],
            ),
            ReferenceEntity::Chair { id, chair_number } => conn.execute(
                "INSERT INTO chairs (id, chair_number, created_at) VALUES (?1, ?2, ?3)",
                params![id, chair_number, now],
            ),
        };

        result.map(|_| ()).map_err(on_error)
    }

    /// Inserts an appointment and returns its id.
    pub fn insert_appointment(
        &self,
        client: &ClientId,
        appointment: &NewAppointment,
    ) -> StorageResult<String> {
        let conn = self.connection(client)?;

        let id = appointment
            .id
            .clone()
            .unwrap_or_else(|| Uuid::new_v4().simple().to_string());
        let created_at = format_timestamp(&appointment.created_at.unwrap_or_else(Utc::now));
        let appointment_date = appointment.appointment_date.as_ref().map(format_timestamp);

        conn.execute(
            "INSERT INTO appointments (
                id, display_id, bu_id, branch_id, duty_doctor_id, specialist_doctor_id,
                dental_assistant, patient_id, case_sheet_id, case_id, chair_id, status,
                chief_complaint, appointment_date, slot_from, slot_to, is_active,
                created_by, updated_by, created_at, updated_at
             ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12, ?13, ?14, ?15, ?16,
                       ?17, ?18, ?19, ?20, ?20)",
            params![
                id,
                appointment.display_id,
                appointment.bu_id,
                appointment.branch_id,
                appointment.duty_doctor_id,
                appointment.specialist_doctor_id,
                appointment.dental_assistant,
                appointment.patient_id,
                appointment.case_sheet_id,
                appointment.case_id,
                appointment.chair_id,
                appointment.status,
                appointment.chief_complaint,
                appointment_date,
                appointment.slot_from,
                appointment.slot_to,
                !appointment.inactive as i64,
                appointment.created_by,
                appointment.updated_by,
                created_at,
            ],
        )
        .map_err(already_exists(Collection::Appointment, &id))?;

        tracing::debug!(client_id = %client, appointment_id = %id, "Inserted appointment");
        Ok(id)
    }

    /// Marks an appointment as deleted.
    ///
    /// # Errors
    ///
    /// * `StorageError::Resource(NotFound)` - if no live appointment has this id
    pub fn soft_delete_appointment(
        &self,
        client: &ClientId,
        id: &str,
        deleted_by: Option<&str>,
    ) -> StorageResult<()> {
        let conn = self.connection(client)?;
        let now = format_timestamp(&Utc::now());

        let changed = conn.execute(
            "UPDATE appointments SET deleted_at = ?2, deleted_by = ?3, updated_at = ?2
             WHERE id = ?1 AND deleted_at IS NULL",
            params![id, now, deleted_by],
        )?;

        if changed == 0 {
            return Err(StorageError::Resource(ResourceError::NotFound {
                collection: Collection::Appointment.to_string(),
                id: id.to_string(),
            }));
        }

        tracing::debug!(client_id = %client, appointment_id = %id, "Soft-deleted appointment");
        Ok(())
    }
}
