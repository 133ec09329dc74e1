//! Test harness for the HTTP integration tests.

#![allow(dead_code)]

use std::sync::Arc;

use axum_test::TestServer;
use chrono::{Duration, TimeZone, Utc};
use clinic_persistence::backends::sqlite::{NewAppointment, ReferenceEntity, SqliteBackend};
use clinic_persistence::tenant::ClientId;
use clinic_rest::{AppState, ServerConfig};

pub const CLIENT: &str = "c1";

/// Creates a test server over a fresh in-memory backend.
///
/// The backend handle is returned alongside so tests can seed data.
pub fn create_test_server() -> (TestServer, Arc<SqliteBackend>) {
    let backend = Arc::new(SqliteBackend::in_memory().expect("Failed to create SQLite backend"));
    let state = AppState::new(Arc::clone(&backend), ServerConfig::for_testing());
    let app = clinic_rest::routing::create_routes(state);
    let server = TestServer::new(app).expect("Failed to create test server");
    (server, backend)
}

/// Seeds one business unit, one doctor and one patient, then `count`
/// appointments created a day apart.
pub fn seed(backend: &SqliteBackend, count: i64) -> Vec<String> {
    let client = ClientId::new(CLIENT);
    let entities = [
        ReferenceEntity::BusinessUnit { id: "b1", name: "Downtown" },
        ReferenceEntity::ClientUser { id: "u1", first_name: "Asha", last_name: "Rao" },
        ReferenceEntity::Patient { id: "p1", first_name: "Lee", last_name: "Chen" },
    ];
    for entity in entities {
        backend
            .insert_reference(&client, entity)
            .expect("Failed to seed reference");
    }

    let base = Utc.with_ymd_and_hms(2024, 3, 1, 10, 0, 0).unwrap();
    (0..count)
        .map(|n| {
            let appointment = NewAppointment {
                display_id: Some(format!("APT-{:04}", n)),
                bu_id: Some("b1".to_string()),
                duty_doctor_id: Some("u1".to_string()),
                patient_id: Some("p1".to_string()),
                status: Some(if n % 2 == 0 { "Scheduled" } else { "Completed" }.to_string()),
                chief_complaint: Some("Tooth sensitivity".to_string()),
                created_by: Some("u1".to_string()),
                created_at: Some(base + Duration::days(n)),
                ..Default::default()
            };
            backend
                .insert_appointment(&client, &appointment)
                .expect("Failed to seed appointment")
        })
        .collect()
}
