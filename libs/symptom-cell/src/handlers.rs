use std::sync::Arc;

use axum::{
    extract::{Extension, Query, State},
    Json,
};
use axum_extra::TypedHeader;
use headers::{authorization::Bearer, Authorization};
use serde::Deserialize;
use serde_json::{json, Value};

use shared_config::AppConfig;
use shared_database::SessionContext;
use shared_models::auth::User;
use shared_models::error::AppError;

use crate::catalog::{medicines_for, symptoms};
use crate::models::SymptomCheckRequest;
use crate::services::SymptomCheckService;

#[derive(Debug, Deserialize)]
pub struct HistoryQuery {
    pub limit: Option<usize>,
}

#[derive(Debug, Deserialize)]
pub struct NotesRequest {
    pub notes: Option<String>,
}

#[axum::debug_handler]
pub async fn list_symptoms() -> Json<Value> {
    let entries: Vec<Value> = symptoms()
        .iter()
        .map(|symptom| {
            json!({
                "id": symptom.id,
                "name": symptom.name,
                "category": symptom.category,
                "medicines": medicines_for(symptom.id),
            })
        })
        .collect();

    Json(json!({
        "symptoms": entries,
        "total": entries.len()
    }))
}

#[axum::debug_handler]
pub async fn check_symptoms(
    State(state): State<Arc<AppConfig>>,
    TypedHeader(auth): TypedHeader<Authorization<Bearer>>,
    Extension(user): Extension<User>,
    Json(request): Json<SymptomCheckRequest>,
) -> Result<Json<Value>, AppError> {
    let ctx = SessionContext::from_config(&state, user, auth.token());
    let check = SymptomCheckService::new(ctx).check(request).await?;

    Ok(Json(json!({
        "check": check,
        "message": "Symptom check saved successfully"
    })))
}

#[axum::debug_handler]
pub async fn list_checks(
    State(state): State<Arc<AppConfig>>,
    TypedHeader(auth): TypedHeader<Authorization<Bearer>>,
    Extension(user): Extension<User>,
    Query(query): Query<HistoryQuery>,
) -> Result<Json<Value>, AppError> {
    let ctx = SessionContext::from_config(&state, user, auth.token());
    let checks = SymptomCheckService::new(ctx).history(query.limit).await?;

    Ok(Json(json!({
        "checks": checks,
        "total": checks.len()
    })))
}

#[axum::debug_handler]
pub async fn save_latest_notes(
    State(state): State<Arc<AppConfig>>,
    TypedHeader(auth): TypedHeader<Authorization<Bearer>>,
    Extension(user): Extension<User>,
    Json(request): Json<NotesRequest>,
) -> Result<Json<Value>, AppError> {
    let ctx = SessionContext::from_config(&state, user, auth.token());
    let check = SymptomCheckService::new(ctx).save_notes(request.notes).await?;

    Ok(Json(json!({
        "check": check,
        "message": "Results saved successfully"
    })))
}
