use std::sync::Arc;

use assert_matches::assert_matches;
use async_trait::async_trait;
use axum::{
    body::Body,
    http::{Request, StatusCode},
};
use serde_json::{json, Value};
use tower::ServiceExt;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use diagnostics_cell::{
    diagnostics_routes, Diagnosis, DiagnosticsError, ImageAnalysisRequest, ImageAnalysisService,
    ImageClassifier, ImageType, PulseReadingRequest, PulseService, PulseStatus, Severity,
};
use shared_database::{SessionContext, SupabaseClient};
use shared_utils::test_utils::{JwtTestUtils, MockSupabaseResponses, TestConfig, TestUser};

struct FixedClassifier;

#[async_trait]
impl ImageClassifier for FixedClassifier {
    async fn classify(&self, _image: &[u8], _image_type: ImageType) -> Result<Diagnosis, DiagnosticsError> {
        Ok(Diagnosis {
            condition: "Superficial Cut".to_string(),
            confidence: 0.88,
            recommendation: "Clean thoroughly and apply antiseptic.".to_string(),
            severity: Severity::Low,
        })
    }
}

fn session(server: &MockServer, user: &TestUser) -> SessionContext {
    let config = TestConfig::with_supabase_url(server.uri()).to_app_config();
    SessionContext::new(user.to_user(), "test-token", Arc::new(SupabaseClient::new(&config)))
}

async fn mount_insert(server: &MockServer, table: &str, row: Value, expected: u64) {
    Mock::given(method("POST"))
        .and(path(format!("/rest/v1/{}", table)))
        .respond_with(ResponseTemplate::new(201).set_body_json(json!([row])))
        .expect(expected)
        .mount(server)
        .await;
}

async fn body_for(server: &MockServer, request_path: &str) -> Value {
    let requests = server.received_requests().await.unwrap();
    let request = requests.iter().find(|r| r.url.path() == request_path).unwrap();
    serde_json::from_slice(&request.body).unwrap()
}

#[tokio::test]
async fn test_image_analysis_is_stored_and_audited() {
    let server = MockServer::start().await;
    let user = TestUser::default();
    mount_insert(&server, "medical_images", json!({ "id": "img-1" }), 1).await;
    mount_insert(
        &server,
        "health_records",
        MockSupabaseResponses::health_record_response(&user.id, "image_analysis"),
        1,
    )
    .await;

    let service = ImageAnalysisService::new(session(&server, &user), Arc::new(FixedClassifier));
    let analysis = service
        .analyze(ImageAnalysisRequest {
            image: "data:image/jpeg;base64,aGVsbG8=".to_string(),
            image_type: ImageType::Wound,
            notes: Some("Kitchen knife".to_string()),
        })
        .await
        .unwrap();

    assert!(analysis.image_url.starts_with("sha256:"));
    assert_eq!(analysis.diagnosis.condition, "Superficial Cut");

    let row = body_for(&server, "/rest/v1/medical_images").await;
    assert_eq!(row["user_id"], json!(user.id));
    assert_eq!(row["image_type"], "wound");
    assert_eq!(row["recommended_action"], "Clean thoroughly and apply antiseptic.");

    let audit = body_for(&server, "/rest/v1/health_records").await;
    assert_eq!(audit["activity_type"], "image_analysis");
    assert_eq!(audit["title"], "Medical Image Analysis - Superficial Cut");
    assert_eq!(audit["description"], "Wound/Injury analysis: Superficial Cut");
    assert_eq!(audit["metadata"]["severity"], "low");
    assert_eq!(audit["metadata"]["notes"], "Kitchen knife");
}

#[tokio::test]
async fn test_invalid_image_never_reaches_the_store() {
    let server = MockServer::start().await;
    let user = TestUser::default();

    let service = ImageAnalysisService::new(session(&server, &user), Arc::new(FixedClassifier));
    let result = service
        .analyze(ImageAnalysisRequest {
            image: "%%%".to_string(),
            image_type: ImageType::Xray,
            notes: None,
        })
        .await;

    assert_matches!(result, Err(DiagnosticsError::InvalidImage(_)));
    assert!(server.received_requests().await.unwrap().is_empty());
}

#[tokio::test]
async fn test_measured_pulse_is_classified_and_stored() {
    let server = MockServer::start().await;
    let user = TestUser::default();
    mount_insert(&server, "pulse_readings", json!({ "id": "pulse-1" }), 1).await;
    mount_insert(
        &server,
        "health_records",
        MockSupabaseResponses::health_record_response(&user.id, "pulse_reading"),
        1,
    )
    .await;

    let reading = PulseService::new(session(&server, &user))
        .record_reading(PulseReadingRequest {
            heart_rate: Some(112),
            notes: Some("After stairs".to_string()),
            device: None,
        })
        .await
        .unwrap();

    assert_eq!(reading.heart_rate, 112);
    assert_eq!(reading.status, PulseStatus::High);

    let row = body_for(&server, "/rest/v1/pulse_readings").await;
    assert_eq!(row["heart_rate"], 112);
    assert_eq!(row["status"], "high");

    let audit = body_for(&server, "/rest/v1/health_records").await;
    assert_eq!(audit["title"], "Pulse Reading - 112 BPM");
    assert_eq!(audit["description"], "Heart rate: 112 BPM (high)");
    assert_eq!(audit["metadata"]["device"], "Bluetooth Sensor");
}

#[tokio::test]
async fn test_implausible_pulse_is_rejected() {
    let server = MockServer::start().await;
    let user = TestUser::default();

    let result = PulseService::new(session(&server, &user))
        .record_reading(PulseReadingRequest {
            heart_rate: Some(400),
            ..PulseReadingRequest::default()
        })
        .await;

    assert_matches!(result, Err(DiagnosticsError::HeartRateOutOfRange(400)));
    assert!(server.received_requests().await.unwrap().is_empty());
}

#[tokio::test]
async fn test_pulse_route_simulates_missing_reading() {
    let server = MockServer::start().await;
    let config = TestConfig::with_supabase_url(server.uri());
    let user = TestUser::default();
    let token = JwtTestUtils::create_test_token(&user, &config.jwt_secret, None);

    mount_insert(&server, "pulse_readings", json!({ "id": "pulse-1" }), 1).await;
    mount_insert(
        &server,
        "health_records",
        MockSupabaseResponses::health_record_response(&user.id, "pulse_reading"),
        1,
    )
    .await;

    let request = Request::builder()
        .method("POST")
        .uri("/pulse")
        .header("Authorization", format!("Bearer {}", token))
        .header("content-type", "application/json")
        .body(Body::from("{}"))
        .unwrap();

    let response = diagnostics_routes(config.to_arc()).oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let body = axum::body::to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let json: Value = serde_json::from_slice(&body).unwrap();
    let bpm = json["reading"]["heart_rate"].as_u64().unwrap();
    assert!((60..=100).contains(&bpm));
    assert_eq!(json["reading"]["status"], "normal");
}

#[tokio::test]
async fn test_image_route_rejects_empty_image() {
    let server = MockServer::start().await;
    let config = TestConfig::with_supabase_url(server.uri());
    let user = TestUser::default();
    let token = JwtTestUtils::create_test_token(&user, &config.jwt_secret, None);

    let request = Request::builder()
        .method("POST")
        .uri("/images")
        .header("Authorization", format!("Bearer {}", token))
        .header("content-type", "application/json")
        .body(Body::from(json!({ "image": "", "image_type": "xray" }).to_string()))
        .unwrap();

    let response = diagnostics_routes(config.to_arc()).oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}
