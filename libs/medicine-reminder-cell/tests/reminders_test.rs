use std::sync::Arc;

use assert_matches::assert_matches;
use axum::{
    body::Body,
    http::{Request, StatusCode},
};
use serde_json::{json, Value};
use tower::ServiceExt;
use wiremock::matchers::{body_json, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

use medicine_reminder_cell::{
    reminder_routes, ReminderError, ReminderForm, ReminderFrequency, ReminderService,
    ReminderValidationError,
};
use shared_database::{SessionContext, SupabaseClient};
use shared_utils::test_utils::{JwtTestUtils, MockSupabaseResponses, TestConfig, TestUser};

fn session(server: &MockServer, user: &TestUser) -> SessionContext {
    let config = TestConfig::with_supabase_url(server.uri()).to_app_config();
    SessionContext::new(user.to_user(), "test-token", Arc::new(SupabaseClient::new(&config)))
}

fn reminder_row(user_id: &str, is_active: bool) -> Value {
    json!({
        "id": "rem-1",
        "user_id": user_id,
        "medicine_name": "Metformin",
        "dosage": "500mg",
        "frequency": "twice_daily",
        "time_slots": ["08:00", "20:00"],
        "start_date": "2026-10-17",
        "end_date": null,
        "notes": null,
        "is_active": is_active,
        "created_at": "2026-10-17T07:00:00Z"
    })
}

fn form() -> ReminderForm {
    ReminderForm {
        medicine_name: "Metformin".to_string(),
        dosage: "500mg".to_string(),
        frequency: ReminderFrequency::TwiceDaily,
        time_slots: vec!["08:00".to_string(), "20:00".to_string()],
        ..ReminderForm::default()
    }
}

async fn mount_audit(server: &MockServer, user: &TestUser) {
    Mock::given(method("POST"))
        .and(path("/rest/v1/health_records"))
        .respond_with(ResponseTemplate::new(201).set_body_json(json!([
            MockSupabaseResponses::health_record_response(&user.id, "medicine_reminder")
        ])))
        .expect(1)
        .mount(server)
        .await;
}

async fn body_for(server: &MockServer, method_name: &str, request_path: &str) -> Value {
    let requests = server.received_requests().await.unwrap();
    let request = requests
        .iter()
        .find(|r| r.method.as_str() == method_name && r.url.path() == request_path)
        .unwrap();
    serde_json::from_slice(&request.body).unwrap()
}

#[tokio::test]
async fn test_add_inserts_and_audits() {
    let server = MockServer::start().await;
    let user = TestUser::default();

    Mock::given(method("POST"))
        .and(path("/rest/v1/medicine_reminders"))
        .respond_with(ResponseTemplate::new(201).set_body_json(json!([reminder_row(&user.id, true)])))
        .expect(1)
        .mount(&server)
        .await;
    mount_audit(&server, &user).await;

    let reminder = ReminderService::new(session(&server, &user))
        .save(form(), None)
        .await
        .unwrap();
    assert_eq!(reminder.frequency, ReminderFrequency::TwiceDaily);

    let row = body_for(&server, "POST", "/rest/v1/medicine_reminders").await;
    assert_eq!(row["user_id"], json!(user.id));
    assert_eq!(row["time_slots"], json!(["08:00", "20:00"]));
    assert_eq!(row["is_active"], true);

    let audit = body_for(&server, "POST", "/rest/v1/health_records").await;
    assert_eq!(audit["activity_type"], "medicine_reminder");
    assert_eq!(audit["title"], "Medicine Reminder - Metformin");
    assert_eq!(audit["description"], "Added reminder for Metformin (500mg)");
    assert_eq!(audit["metadata"]["frequency"], "twice_daily");
}

#[tokio::test]
async fn test_edit_is_owner_scoped() {
    let server = MockServer::start().await;
    let user = TestUser::default();

    Mock::given(method("PATCH"))
        .and(path("/rest/v1/medicine_reminders"))
        .and(query_param("id", "eq.rem-1"))
        .and(query_param("user_id", format!("eq.{}", user.id)))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([reminder_row(&user.id, true)])))
        .expect(1)
        .mount(&server)
        .await;
    mount_audit(&server, &user).await;

    ReminderService::new(session(&server, &user))
        .save(form(), Some("rem-1"))
        .await
        .unwrap();

    let patch = body_for(&server, "PATCH", "/rest/v1/medicine_reminders").await;
    assert!(patch.get("user_id").is_none());

    let audit = body_for(&server, "POST", "/rest/v1/health_records").await;
    assert_eq!(audit["description"], "Updated reminder for Metformin (500mg)");
}

#[tokio::test]
async fn test_edit_of_missing_reminder() {
    let server = MockServer::start().await;
    let user = TestUser::default();

    Mock::given(method("PATCH"))
        .and(path("/rest/v1/medicine_reminders"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/rest/v1/health_records"))
        .respond_with(ResponseTemplate::new(201).set_body_json(json!([])))
        .expect(0)
        .mount(&server)
        .await;

    let result = ReminderService::new(session(&server, &user))
        .save(form(), Some("someone-elses"))
        .await;

    assert_matches!(result, Err(ReminderError::NotFound(id)) if id == "someone-elses");
}

#[tokio::test]
async fn test_invalid_form_never_reaches_the_store() {
    let server = MockServer::start().await;
    let user = TestUser::default();

    let result = ReminderService::new(session(&server, &user))
        .save(ReminderForm { time_slots: vec![], ..form() }, None)
        .await;

    assert_matches!(result, Err(ReminderError::Validation(ReminderValidationError::NoTimeSlots)));
    assert!(server.received_requests().await.unwrap().is_empty());
}

#[tokio::test]
async fn test_pause_only_touches_the_flag() {
    let server = MockServer::start().await;
    let user = TestUser::default();

    Mock::given(method("PATCH"))
        .and(path("/rest/v1/medicine_reminders"))
        .and(body_json(json!({ "is_active": false })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([reminder_row(&user.id, false)])))
        .expect(1)
        .mount(&server)
        .await;

    let reminder = ReminderService::new(session(&server, &user))
        .set_active("rem-1", false)
        .await
        .unwrap();

    assert!(!reminder.is_active);
}

#[tokio::test]
async fn test_delete_requires_confirmation() {
    let server = MockServer::start().await;
    let user = TestUser::default();

    let result = ReminderService::new(session(&server, &user)).delete("rem-1", false).await;

    assert_matches!(result, Err(ReminderError::ConfirmationRequired));
    assert!(server.received_requests().await.unwrap().is_empty());
}

#[tokio::test]
async fn test_list_route() {
    let server = MockServer::start().await;
    let config = TestConfig::with_supabase_url(server.uri());
    let user = TestUser::default();
    let token = JwtTestUtils::create_test_token(&user, &config.jwt_secret, None);

    Mock::given(method("GET"))
        .and(path("/rest/v1/medicine_reminders"))
        .and(query_param("user_id", format!("eq.{}", user.id)))
        .and(query_param("order", "created_at.desc"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([reminder_row(&user.id, true)])))
        .expect(1)
        .mount(&server)
        .await;

    let request = Request::builder()
        .uri("/")
        .header("Authorization", format!("Bearer {}", token))
        .body(Body::empty())
        .unwrap();

    let response = reminder_routes(config.to_arc()).oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let body = axum::body::to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let json: Value = serde_json::from_slice(&body).unwrap();
    assert_eq!(json["total"], 1);
    assert_eq!(json["reminders"][0]["medicine_name"], "Metformin");
}

#[tokio::test]
async fn test_unconfirmed_delete_route_is_rejected() {
    let server = MockServer::start().await;
    let config = TestConfig::with_supabase_url(server.uri());
    let token = JwtTestUtils::create_test_token(&TestUser::default(), &config.jwt_secret, None);

    let request = Request::builder()
        .method("DELETE")
        .uri("/rem-1")
        .header("Authorization", format!("Bearer {}", token))
        .body(Body::empty())
        .unwrap();

    let response = reminder_routes(config.to_arc()).oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert!(server.received_requests().await.unwrap().is_empty());
}
