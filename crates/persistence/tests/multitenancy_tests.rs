//! Client isolation tests.

mod common;

use clinic_persistence::backends::sqlite::{SqliteBackend, SqliteBackendConfig};
use clinic_persistence::services::get_appointment_with_filter;
use clinic_persistence::types::{AppointmentQuery, FailureKind};

use common::*;

#[tokio::test]
async fn test_clients_do_not_see_each_other() {
    let backend = create_backend();
    let a = client("clinic-a");
    let b = client("clinic-b");
    let a_ids = seed_appointments(&backend, &a, "b1", 3);
    seed_appointments(&backend, &b, "b1", 5);

    let page = get_appointment_with_filter(&backend, &AppointmentQuery::for_client("clinic-a"))
        .await
        .data
        .unwrap();
    assert_eq!(page.metadata.total_count, 3);

    let mut cross = AppointmentQuery::for_client("clinic-b");
    cross.appointment_id = Some(a_ids[0].clone());
    let response = get_appointment_with_filter(&backend, &cross).await;
    assert!(!response.status);
    assert_eq!(response.message, "Appointment not found");
}

#[tokio::test]
async fn test_ids_differing_in_case_or_separator_are_isolated() {
    let backend = create_backend();
    seed_appointments(&backend, &client("Acme-01"), "b1", 3);

    for other in ["acme_01", "ACME-01", "Acme_01", "acme-01"] {
        let response = get_appointment_with_filter(&backend, &AppointmentQuery::for_client(other)).await;
        assert!(response.status);
        assert_eq!(
            response.data.unwrap().metadata.total_count,
            0,
            "{other} must not see Acme-01's appointments"
        );
    }

    let own = get_appointment_with_filter(&backend, &AppointmentQuery::for_client("Acme-01")).await;
    assert_eq!(own.data.unwrap().metadata.total_count, 3);
    assert_eq!(backend.open_clients(), 5);
}

#[tokio::test]
async fn test_file_backed_ids_get_distinct_files() {
    let dir = tempfile::tempdir().unwrap();
    let backend = SqliteBackend::open(dir.path()).unwrap();
    seed_appointments(&backend, &client("Acme-01"), "b1", 2);

    let response = get_appointment_with_filter(&backend, &AppointmentQuery::for_client("acme_01")).await;
    assert_eq!(response.data.unwrap().metadata.total_count, 0);
    assert!(dir.path().join("client_Acme-01.db").exists());
    assert!(dir.path().join("client_acme_01.db").exists());
}

#[tokio::test]
async fn test_unknown_client_gets_empty_database() {
    let backend = create_backend();
    seed_appointments(&backend, &client("c1"), "b1", 2);

    let response = get_appointment_with_filter(&backend, &AppointmentQuery::for_client("c2")).await;
    assert!(response.status);
    assert!(response.data.unwrap().appointments.is_empty());
}

#[tokio::test]
async fn test_invalid_client_ids_rejected() {
    let backend = create_backend();

    for bad in ["", "../secrets", "a/b", "x".repeat(65).as_str()] {
        let response = get_appointment_with_filter(&backend, &AppointmentQuery::for_client(bad)).await;
        assert!(!response.status, "{:?} should fail", bad);
        assert!(response.message.starts_with("invalid client id"));
        assert_eq!(response.failure, Some(FailureKind::InvalidRequest));
    }
    assert_eq!(backend.open_clients(), 0);
}

#[tokio::test]
async fn test_invalid_client_touches_no_files() {
    let dir = tempfile::tempdir().unwrap();
    let backend = SqliteBackend::open(dir.path()).unwrap();

    let response =
        get_appointment_with_filter(&backend, &AppointmentQuery::for_client("../escape")).await;
    assert!(!response.status);
    assert_eq!(std::fs::read_dir(dir.path()).unwrap().count(), 0);
}

#[tokio::test]
async fn test_file_backed_clients_persist_across_backends() {
    let dir = tempfile::tempdir().unwrap();
    let config = SqliteBackendConfig::default()
        .with_data_dir(dir.path())
        .with_database_prefix("clinic_");

    let ids = {
        let backend = SqliteBackend::with_config(config.clone()).unwrap();
        seed_references(&backend, &client("North-Clinic"));
        seed_appointments(&backend, &client("North-Clinic"), "b1", 4)
    };

    assert!(dir.path().join("clinic_North-Clinic.db").exists());

    let reopened = SqliteBackend::with_config(config).unwrap();
    let query = AppointmentQuery::for_client("North-Clinic").with_page(2u64, 3u64);
    let page = get_appointment_with_filter(&reopened, &query).await.data.unwrap();

    assert_eq!(page.metadata.total_count, 4);
    assert_eq!(page.appointments.len(), 1);
    assert_eq!(page.appointments[0].appointment_id, ids[3]);
    assert_eq!(page.appointments[0].bu_name.as_deref(), Some("Downtown"));
}

#[tokio::test]
async fn test_concurrent_first_use_opens_one_pool() {
    let backend = std::sync::Arc::new(create_backend());

    let mut handles = Vec::new();
    for _ in 0..8 {
        let backend = backend.clone();
        handles.push(tokio::spawn(async move {
            get_appointment_with_filter(backend.as_ref(), &AppointmentQuery::for_client("c1"))
                .await
                .status
        }));
    }
    for handle in handles {
        assert!(handle.await.unwrap());
    }
    assert_eq!(backend.open_clients(), 1);
}
