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

use crate::models::ActivityType;
use crate::services::HealthRecordService;

#[derive(Debug, Deserialize)]
pub struct HealthRecordQuery {
    pub activity_type: Option<ActivityType>,
    pub limit: Option<usize>,
}

#[axum::debug_handler]
pub async fn list_health_records(
    State(state): State<Arc<AppConfig>>,
    TypedHeader(auth): TypedHeader<Authorization<Bearer>>,
    Extension(user): Extension<User>,
    Query(query): Query<HealthRecordQuery>,
) -> Result<Json<Value>, AppError> {
    let ctx = SessionContext::from_config(&state, user, auth.token());
    let records = HealthRecordService::new(ctx)
        .list(query.activity_type, query.limit)
        .await?;

    Ok(Json(json!({
        "records": records,
        "total": records.len()
    })))
}

#[axum::debug_handler]
pub async fn get_health_summary(
    State(state): State<Arc<AppConfig>>,
    TypedHeader(auth): TypedHeader<Authorization<Bearer>>,
    Extension(user): Extension<User>,
) -> Result<Json<Value>, AppError> {
    let ctx = SessionContext::from_config(&state, user, auth.token());
    let summary = HealthRecordService::new(ctx).summary().await?;

    Ok(Json(json!(summary)))
}
