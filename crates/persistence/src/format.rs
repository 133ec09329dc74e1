//! Reshapes populated appointment records into their API form.

use chrono::{DateTime, SecondsFormat, Utc};

use crate::types::{AppointmentRecord, AppointmentView, PersonRef};

fn timestamp(dt: &DateTime<Utc>) -> String {
    dt.to_rfc3339_opts(SecondsFormat::Millis, true)
}

fn person(reference: &Option<PersonRef>) -> (Option<String>, Option<String>) {
    match reference {
        Some(p) => (Some(p.id.clone()), p.full_name()),
        None => (None, None),
    }
}

/// Flattens a populated record into an [`AppointmentView`].
///
/// Each reference becomes an id plus a display label; a reference that did
/// not populate yields `null` for both.
pub fn format_appointment(record: &AppointmentRecord) -> AppointmentView {
    let (duty_doctor_id, duty_doctor_name) = person(&record.duty_doctor);
    let (specialist_doctor_id, specialist_doctor_name) = person(&record.specialist_doctor);
    let (patient_id, patient_name) = person(&record.patient);
    let (created_by, created_by_name) = person(&record.created_by);
    let (updated_by, updated_by_name) = person(&record.updated_by);
    let (deleted_by, deleted_by_name) = person(&record.deleted_by);

    AppointmentView {
        appointment_id: record.id.clone(),
        display_id: record.display_id.clone(),
        bu_id: record.business_unit.as_ref().map(|r| r.id.clone()),
        bu_name: record.business_unit.as_ref().and_then(|r| r.name.clone()),
        branch_id: record.branch.as_ref().map(|r| r.id.clone()),
        branch_name: record.branch.as_ref().and_then(|r| r.name.clone()),
        duty_doctor_id,
        duty_doctor_name,
        specialist_doctor_id,
        specialist_doctor_name,
        dental_assistant: record.dental_assistant.clone(),
        patient_id,
        patient_name,
        case_sheet_id: record.case_sheet.as_ref().map(|r| r.id.clone()),
        case_sheet_display_id: record.case_sheet.as_ref().and_then(|r| r.display_id.clone()),
        case_id: record.case.as_ref().map(|r| r.id.clone()),
        case_display_id: record.case.as_ref().and_then(|r| r.display_id.clone()),
        chair_id: record.chair.as_ref().map(|r| r.id.clone()),
        chair_number: record.chair.as_ref().and_then(|r| r.chair_number.clone()),
        status: record.status.clone(),
        chief_complaint: record.chief_complaint.clone(),
        appointment_date: record.appointment_date.as_ref().map(timestamp),
        slot_from: record.slot_from.clone(),
        slot_to: record.slot_to.clone(),
        is_active: record.is_active,
        created_by,
        created_by_name,
        updated_by,
        updated_by_name,
        deleted_by,
        deleted_by_name,
        created_at: timestamp(&record.created_at),
        updated_at: timestamp(&record.updated_at),
        deleted_at: record.deleted_at.as_ref().map(timestamp),
    }
}
