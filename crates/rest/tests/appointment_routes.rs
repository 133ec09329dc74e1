//! HTTP tests for the appointment listing.

mod common;

use axum::http::StatusCode;
use clinic_persistence::tenant::ClientId;
use clinic_rest::routing::clinic_routes::APPOINTMENT_FILTER_PATH;
use serde_json::{Value, json};

use common::{CLIENT, create_test_server, seed};

#[tokio::test]
async fn test_get_paged_listing_from_query_string() {
    let (server, backend) = create_test_server();
    seed(&backend, 12);

    let response = server
        .get(APPOINTMENT_FILTER_PATH)
        .add_query_param("clientId", CLIENT)
        .add_query_param("page", "2")
        .add_query_param("perPage", "5")
        .await;

    response.assert_status_ok();
    let body: Value = response.json();
    assert_eq!(body["status"], true);
    assert_eq!(body["message"], "Appointment details retrieved successfully.");
    assert_eq!(
        body["data"]["metadata"],
        json!({ "page": 2, "perPage": 5, "totalCount": 12, "totalPages": 3 })
    );

    let appointments = body["data"]["appointments"].as_array().unwrap();
    assert_eq!(appointments.len(), 5);
    assert_eq!(appointments[0]["displayId"], "APT-0005");
    assert_eq!(appointments[0]["buName"], "Downtown");
    assert_eq!(appointments[0]["dutyDoctorName"], "Asha Rao");
    assert_eq!(appointments[0]["patientName"], "Lee Chen");
    assert!(appointments[0]["branchId"].is_null());
}

#[tokio::test]
async fn test_post_with_json_body() {
    let (server, backend) = create_test_server();
    seed(&backend, 4);

    let response = server
        .post(APPOINTMENT_FILTER_PATH)
        .json(&json!({
            "clientId": CLIENT,
            "page": 1,
            "perPage": 10,
            "searchKey": "completed"
        }))
        .await;

    response.assert_status_ok();
    let body: Value = response.json();
    assert_eq!(body["data"]["metadata"]["totalCount"], 2);
    for appointment in body["data"]["appointments"].as_array().unwrap() {
        assert_eq!(appointment["status"], "Completed");
    }
}

#[tokio::test]
async fn test_unpaginated_when_page_missing() {
    let (server, backend) = create_test_server();
    seed(&backend, 3);

    let response = server
        .get(APPOINTMENT_FILTER_PATH)
        .add_query_param("clientId", CLIENT)
        .await;

    response.assert_status_ok();
    let body: Value = response.json();
    assert_eq!(body["message"], "All Appointment retrieved successfully.");
    assert_eq!(
        body["data"]["metadata"],
        json!({ "page": 1, "perPage": 3, "totalCount": 3, "totalPages": 1 })
    );
}

#[tokio::test]
async fn test_single_appointment_by_id() {
    let (server, backend) = create_test_server();
    let ids = seed(&backend, 3);

    let response = server
        .get(APPOINTMENT_FILTER_PATH)
        .add_query_param("clientId", CLIENT)
        .add_query_param("appointmentId", &ids[1])
        .add_query_param("buId", "somewhere-else")
        .await;

    response.assert_status_ok();
    let body: Value = response.json();
    assert_eq!(body["message"], "The Appointment retrieved successfully.");
    assert_eq!(body["data"]["appointments"][0]["appointmentId"], ids[1].as_str());
    assert_eq!(
        body["data"]["metadata"],
        json!({ "page": 1, "perPage": 1, "totalCount": 1, "totalPages": 1 })
    );
}

#[tokio::test]
async fn test_unknown_appointment_is_404() {
    let (server, backend) = create_test_server();
    seed(&backend, 1);

    let response = server
        .get(APPOINTMENT_FILTER_PATH)
        .add_query_param("clientId", CLIENT)
        .add_query_param("appointmentId", "missing")
        .await;

    response.assert_status(StatusCode::NOT_FOUND);
    let body: Value = response.json();
    assert_eq!(body, json!({ "status": false, "message": "Appointment not found" }));
}

#[tokio::test]
async fn test_deleted_appointment_is_404() {
    let (server, backend) = create_test_server();
    let ids = seed(&backend, 2);
    backend
        .soft_delete_appointment(&ClientId::new(CLIENT), &ids[0], Some("u1"))
        .unwrap();

    let response = server
        .get(APPOINTMENT_FILTER_PATH)
        .add_query_param("clientId", CLIENT)
        .add_query_param("appointmentId", &ids[0])
        .await;

    response.assert_status(StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_missing_client_is_400() {
    let (server, _backend) = create_test_server();

    let response = server.get(APPOINTMENT_FILTER_PATH).await;

    response.assert_status(StatusCode::BAD_REQUEST);
    let body: Value = response.json();
    assert_eq!(body["status"], false);
    assert!(body.get("data").is_none());
}

#[tokio::test]
async fn test_invalid_date_is_400() {
    let (server, backend) = create_test_server();
    seed(&backend, 1);

    let response = server
        .get(APPOINTMENT_FILTER_PATH)
        .add_query_param("clientId", CLIENT)
        .add_query_param("fromDate", "last tuesday")
        .await;

    response.assert_status(StatusCode::BAD_REQUEST);
    let body: Value = response.json();
    assert_eq!(body["status"], false);
    assert!(body["message"].as_str().unwrap().contains("fromDate"));
}

#[tokio::test]
async fn test_date_range_filter() {
    let (server, backend) = create_test_server();
    seed(&backend, 10);

    let response = server
        .get(APPOINTMENT_FILTER_PATH)
        .add_query_param("clientId", CLIENT)
        .add_query_param("fromDate", "2024-03-03")
        .add_query_param("toDate", "2024-03-05T23:59:59Z")
        .await;

    response.assert_status_ok();
    let body: Value = response.json();
    assert_eq!(body["data"]["metadata"]["totalCount"], 3);
}

#[tokio::test]
async fn test_empty_page_reports_no_appointments() {
    let (server, _backend) = create_test_server();

    let response = server
        .post(APPOINTMENT_FILTER_PATH)
        .json(&json!({ "clientId": CLIENT, "page": 1, "perPage": 10 }))
        .await;

    response.assert_status_ok();
    let body: Value = response.json();
    assert_eq!(body["status"], true);
    assert_eq!(body["message"], "No Appointments found");
    assert_eq!(body["data"]["appointments"], json!([]));
    assert_eq!(body["data"]["metadata"]["totalPages"], 0);
}

#[tokio::test]
async fn test_malformed_json_body_is_rejected() {
    let (server, _backend) = create_test_server();

    let response = server
        .post(APPOINTMENT_FILTER_PATH)
        .text("{ not json")
        .content_type("application/json")
        .await;

    response.assert_status(StatusCode::BAD_REQUEST);
    let body: Value = response.json();
    assert_eq!(body["status"], false);
    assert!(body["message"].is_string());
}
