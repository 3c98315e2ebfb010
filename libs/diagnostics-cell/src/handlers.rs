use std::sync::Arc;

use axum::{
    extract::{Extension, State},
    Json,
};
use axum_extra::TypedHeader;
use headers::{authorization::Bearer, Authorization};
use serde_json::{json, Value};

use shared_config::AppConfig;
use shared_database::SessionContext;
use shared_models::auth::User;
use shared_models::error::AppError;

use crate::models::{ImageAnalysisRequest, PulseReadingRequest};
use crate::services::{ImageAnalysisService, MockImageClassifier, PulseService};

#[axum::debug_handler]
pub async fn analyze_image(
    State(state): State<Arc<AppConfig>>,
    TypedHeader(auth): TypedHeader<Authorization<Bearer>>,
    Extension(user): Extension<User>,
    Json(request): Json<ImageAnalysisRequest>,
) -> Result<Json<Value>, AppError> {
    let ctx = SessionContext::from_config(&state, user, auth.token());
    let classifier = Arc::new(MockImageClassifier::from_config(&state));
    let analysis = ImageAnalysisService::new(ctx, classifier).analyze(request).await?;

    Ok(Json(json!({
        "analysis": analysis,
        "message": "Analysis saved successfully"
    })))
}

#[axum::debug_handler]
pub async fn record_pulse(
    State(state): State<Arc<AppConfig>>,
    TypedHeader(auth): TypedHeader<Authorization<Bearer>>,
    Extension(user): Extension<User>,
    Json(request): Json<PulseReadingRequest>,
) -> Result<Json<Value>, AppError> {
    let ctx = SessionContext::from_config(&state, user, auth.token());
    let reading = PulseService::new(ctx).record_reading(request).await?;

    Ok(Json(json!({
        "reading": reading,
        "message": "Pulse reading saved successfully"
    })))
}
