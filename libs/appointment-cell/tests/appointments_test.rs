use std::sync::Arc;

use assert_matches::assert_matches;
use chrono::NaiveDate;
use serde_json::{json, Value};
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

use appointment_cell::{
    AppointmentError, AppointmentForm, AppointmentService, AppointmentStatus, BookingValidationError,
};
use shared_database::{SessionContext, SupabaseClient};
use shared_utils::test_utils::{MockSupabaseResponses, TestConfig, TestUser};

fn service(server: &MockServer, user: &TestUser) -> AppointmentService {
    let config = TestConfig::with_supabase_url(server.uri()).to_app_config();
    let ctx = SessionContext::new(user.to_user(), "test-token", Arc::new(SupabaseClient::new(&config)));
    AppointmentService::new(ctx)
}

fn form() -> AppointmentForm {
    AppointmentForm {
        doctor_name: "Meera Iyer".to_string(),
        specialization: "Dermatologist".to_string(),
        hospital_name: "City Clinic".to_string(),
        appointment_date: NaiveDate::from_ymd_opt(2030, 2, 1),
        appointment_time: "11:30".to_string(),
        reason: "Rash".to_string(),
        doctor_phone: None,
        address: Some("  ".to_string()),
        notes: Some("Allergic to penicillin".to_string()),
    }
}

async fn mount_get(server: &MockServer, user: &TestUser, id: &str, status: &str) {
    Mock::given(method("GET"))
        .and(path("/rest/v1/appointments"))
        .and(query_param("id", format!("eq.{}", id)))
        .and(query_param("user_id", format!("eq.{}", user.id)))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            MockSupabaseResponses::appointment_response(id, &user.id, status)
        ])))
        .mount(server)
        .await;
}

async fn mount_audit(server: &MockServer, user: &TestUser, expected: u64) {
    Mock::given(method("POST"))
        .and(path("/rest/v1/health_records"))
        .respond_with(ResponseTemplate::new(201).set_body_json(json!([
            MockSupabaseResponses::health_record_response(&user.id, "doctor_visit")
        ])))
        .expect(expected)
        .mount(server)
        .await;
}

async fn audit_body(server: &MockServer) -> Value {
    let requests = server.received_requests().await.unwrap();
    let request = requests
        .iter()
        .find(|r| r.url.path() == "/rest/v1/health_records")
        .unwrap();
    serde_json::from_slice(&request.body).unwrap()
}

#[tokio::test]
async fn test_list_is_owner_scoped_and_date_ordered() {
    let server = MockServer::start().await;
    let user = TestUser::default();

    Mock::given(method("GET"))
        .and(path("/rest/v1/appointments"))
        .and(query_param("user_id", format!("eq.{}", user.id)))
        .and(query_param("order", "appointment_date.asc"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            MockSupabaseResponses::appointment_response("appt-1", &user.id, "scheduled"),
            MockSupabaseResponses::appointment_response("appt-2", &user.id, "completed"),
        ])))
        .expect(1)
        .mount(&server)
        .await;

    let appointments = service(&server, &user).list().await.unwrap();

    assert_eq!(appointments.len(), 2);
    assert_eq!(appointments[1].status, AppointmentStatus::Completed);
}

#[tokio::test]
async fn test_save_creates_and_audits() {
    let server = MockServer::start().await;
    let user = TestUser::default();

    Mock::given(method("POST"))
        .and(path("/rest/v1/appointments"))
        .respond_with(ResponseTemplate::new(201).set_body_json(json!([
            MockSupabaseResponses::appointment_response("appt-9", &user.id, "scheduled")
        ])))
        .expect(1)
        .mount(&server)
        .await;
    mount_audit(&server, &user, 1).await;

    let saved = service(&server, &user).save(form(), None).await.unwrap();
    assert_eq!(saved.id, "appt-9");

    let requests = server.received_requests().await.unwrap();
    let row: Value = serde_json::from_slice(&requests[0].body).unwrap();
    assert_eq!(row["status"], "scheduled");
    assert_eq!(row["appointment_date"], "2030-02-01");
    assert!(row["address"].is_null());

    let audit = audit_body(&server).await;
    assert_eq!(audit["title"], "Appointment - Dr. Meera Iyer");
    assert_eq!(audit["description"], "Scheduled appointment with Dr. Meera Iyer (Dermatologist)");
}

#[tokio::test]
async fn test_save_edits_scheduled_appointment() {
    let server = MockServer::start().await;
    let user = TestUser::default();
    mount_get(&server, &user, "appt-1", "scheduled").await;

    Mock::given(method("PATCH"))
        .and(path("/rest/v1/appointments"))
        .and(query_param("id", "eq.appt-1"))
        .and(query_param("status", "eq.scheduled"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            MockSupabaseResponses::appointment_response("appt-1", &user.id, "scheduled")
        ])))
        .expect(1)
        .mount(&server)
        .await;
    mount_audit(&server, &user, 1).await;

    service(&server, &user).save(form(), Some("appt-1")).await.unwrap();

    let requests = server.received_requests().await.unwrap();
    let patch = requests.iter().find(|r| r.method.as_str() == "PATCH").unwrap();
    let body: Value = serde_json::from_slice(&patch.body).unwrap();
    assert!(body.get("status").is_none());
    assert_eq!(body["reason"], "Rash");

    let audit = audit_body(&server).await;
    assert_eq!(audit["description"], "Updated appointment with Dr. Meera Iyer (Dermatologist)");
}

#[tokio::test]
async fn test_save_rejects_missing_reason_without_writes() {
    let server = MockServer::start().await;
    let user = TestUser::default();

    let result = service(&server, &user)
        .save(AppointmentForm { reason: String::new(), ..form() }, None)
        .await;

    assert_matches!(
        result,
        Err(AppointmentError::Validation(BookingValidationError::MissingField("reason")))
    );
    assert!(server.received_requests().await.unwrap().is_empty());
}

#[tokio::test]
async fn test_complete_scheduled_appointment() {
    let server = MockServer::start().await;
    let user = TestUser::default();
    mount_get(&server, &user, "appt-1", "scheduled").await;

    Mock::given(method("PATCH"))
        .and(path("/rest/v1/appointments"))
        .and(query_param("status", "eq.scheduled"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            MockSupabaseResponses::appointment_response("appt-1", &user.id, "completed")
        ])))
        .expect(1)
        .mount(&server)
        .await;

    let appointment = service(&server, &user).complete("appt-1").await.unwrap();
    assert_eq!(appointment.status, AppointmentStatus::Completed);

    let requests = server.received_requests().await.unwrap();
    let patch = requests.iter().find(|r| r.method.as_str() == "PATCH").unwrap();
    let body: Value = serde_json::from_slice(&patch.body).unwrap();
    assert_eq!(body, json!({ "status": "completed" }));
}

#[tokio::test]
async fn test_completed_appointment_cannot_be_cancelled() {
    let server = MockServer::start().await;
    let user = TestUser::default();
    mount_get(&server, &user, "appt-1", "completed").await;

    Mock::given(method("PATCH"))
        .and(path("/rest/v1/appointments"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
        .expect(0)
        .mount(&server)
        .await;

    let result = service(&server, &user).cancel("appt-1").await;

    assert_matches!(
        result,
        Err(AppointmentError::InvalidStatusTransition {
            from: AppointmentStatus::Completed,
            to: AppointmentStatus::Cancelled,
        })
    );
}

#[tokio::test]
async fn test_concurrent_status_change_is_reported() {
    let server = MockServer::start().await;
    let user = TestUser::default();
    mount_get(&server, &user, "appt-1", "scheduled").await;

    // Another session completed it between the read and the write.
    Mock::given(method("PATCH"))
        .and(path("/rest/v1/appointments"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
        .expect(1)
        .mount(&server)
        .await;

    let result = service(&server, &user).cancel("appt-1").await;
    assert_matches!(result, Err(AppointmentError::InvalidStatusTransition { .. }));
}

#[tokio::test]
async fn test_edit_of_cancelled_appointment_is_refused() {
    let server = MockServer::start().await;
    let user = TestUser::default();
    mount_get(&server, &user, "appt-1", "cancelled").await;
    mount_audit(&server, &user, 0).await;

    let result = service(&server, &user).save(form(), Some("appt-1")).await;
    assert_matches!(result, Err(AppointmentError::NotEditable(AppointmentStatus::Cancelled)));
}

#[tokio::test]
async fn test_missing_appointment_is_not_found() {
    let server = MockServer::start().await;
    let user = TestUser::default();

    Mock::given(method("GET"))
        .and(path("/rest/v1/appointments"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
        .mount(&server)
        .await;

    let result = service(&server, &user).complete("appt-404").await;
    assert_matches!(result, Err(AppointmentError::NotFound(id)) if id == "appt-404");
}

#[tokio::test]
async fn test_delete_requires_confirmation() {
    let server = MockServer::start().await;
    let user = TestUser::default();

    let result = service(&server, &user).delete("appt-1", false).await;

    assert_matches!(result, Err(AppointmentError::ConfirmationRequired));
    assert!(server.received_requests().await.unwrap().is_empty());
}

#[tokio::test]
async fn test_confirmed_delete_is_owner_scoped() {
    let server = MockServer::start().await;
    let user = TestUser::default();

    Mock::given(method("DELETE"))
        .and(path("/rest/v1/appointments"))
        .and(query_param("id", "eq.appt-1"))
        .and(query_param("user_id", format!("eq.{}", user.id)))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            MockSupabaseResponses::appointment_response("appt-1", &user.id, "cancelled")
        ])))
        .expect(1)
        .mount(&server)
        .await;

    service(&server, &user).delete("appt-1", true).await.unwrap();
}
