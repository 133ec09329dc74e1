//! Seed data for client databases.

#![allow(dead_code)]

use chrono::{DateTime, Duration, TimeZone, Utc};

use clinic_persistence::backends::sqlite::{NewAppointment, ReferenceEntity, SqliteBackend};
use clinic_persistence::tenant::ClientId;

pub fn create_backend() -> SqliteBackend {
    SqliteBackend::in_memory().expect("Failed to create SQLite backend")
}

pub fn client(id: &str) -> ClientId {
    ClientId::new(id)
}

/// Base creation time for seeded appointments; the n-th one is created
/// `n` days later.
pub fn day(n: i64) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 1, 1, 8, 0, 0).unwrap() + Duration::days(n)
}

/// Inserts the reference rows every appointment fixture points at.
pub fn seed_references(backend: &SqliteBackend, client: &ClientId) {
    let entities = [
        ReferenceEntity::BusinessUnit { id: "b1", name: "Downtown" },
        ReferenceEntity::BusinessUnit { id: "b2", name: "Uptown" },
        ReferenceEntity::Branch { id: "br1", bu_id: Some("b1"), name: "Main Street" },
        ReferenceEntity::ClientUser { id: "u1", first_name: "Asha", last_name: "Rao" },
        ReferenceEntity::ClientUser { id: "u2", first_name: "Vikram", last_name: "Shah" },
        ReferenceEntity::Patient { id: "p1", first_name: "Lee", last_name: "Chen" },
        ReferenceEntity::CaseSheet { id: "cs1", display_id: "CS-0001" },
        ReferenceEntity::Case { id: "k1", display_id: "CASE-0001" },
        ReferenceEntity::Chair { id: "ch1", chair_number: "3" },
    ];
    for entity in entities {
        backend
            .insert_reference(client, entity)
            .expect("Failed to seed reference");
    }
}

/// A fully-referenced appointment created on `day(n)`.
pub fn appointment(n: i64, bu_id: &str) -> NewAppointment {
    NewAppointment {
        display_id: Some(format!("APT-{:04}", n)),
        bu_id: Some(bu_id.to_string()),
        branch_id: Some("br1".to_string()),
        duty_doctor_id: Some("u1".to_string()),
        specialist_doctor_id: Some("u2".to_string()),
        dental_assistant: Some("u2".to_string()),
        patient_id: Some("p1".to_string()),
        case_sheet_id: Some("cs1".to_string()),
        case_id: Some("k1".to_string()),
        chair_id: Some("ch1".to_string()),
        status: Some("Scheduled".to_string()),
        chief_complaint: Some("Routine checkup".to_string()),
        appointment_date: Some(day(n) + Duration::days(7)),
        slot_from: Some("09:00".to_string()),
        slot_to: Some("09:30".to_string()),
        created_by: Some("u1".to_string()),
        updated_by: Some("u1".to_string()),
        created_at: Some(day(n)),
        ..Default::default()
    }
}

/// Inserts `count` appointments for `bu_id`, returning their ids in
/// insertion order.
pub fn seed_appointments(
    backend: &SqliteBackend,
    client: &ClientId,
    bu_id: &str,
    count: i64,
) -> Vec<String> {
    (0..count)
        .map(|n| {
            backend
                .insert_appointment(client, &appointment(n, bu_id))
                .expect("Failed to seed appointment")
        })
        .collect()
}
