use std::sync::Arc;

use axum::{
    extract::{Extension, Path, Query, State},
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

use crate::models::ReminderForm;
use crate::services::ReminderService;

#[derive(Debug, Deserialize)]
pub struct DeleteReminderQuery {
    #[serde(default)]
    pub confirm: bool,
}

#[derive(Debug, Deserialize)]
pub struct ActiveRequest {
    pub is_active: bool,
}

#[axum::debug_handler]
pub async fn list_reminders(
    State(state): State<Arc<AppConfig>>,
    TypedHeader(auth): TypedHeader<Authorization<Bearer>>,
    Extension(user): Extension<User>,
) -> Result<Json<Value>, AppError> {
    let ctx = SessionContext::from_config(&state, user, auth.token());
    let reminders = ReminderService::new(ctx).list().await?;

    Ok(Json(json!({
        "reminders": reminders,
        "total": reminders.len()
    })))
}

#[axum::debug_handler]
pub async fn create_reminder(
    State(state): State<Arc<AppConfig>>,
    TypedHeader(auth): TypedHeader<Authorization<Bearer>>,
    Extension(user): Extension<User>,
    Json(form): Json<ReminderForm>,
) -> Result<Json<Value>, AppError> {
    let ctx = SessionContext::from_config(&state, user, auth.token());
    let reminder = ReminderService::new(ctx).save(form, None).await?;

    Ok(Json(json!({
        "reminder": reminder,
        "message": "Medicine reminder added successfully"
    })))
}

#[axum::debug_handler]
pub async fn update_reminder(
    State(state): State<Arc<AppConfig>>,
    Path(reminder_id): Path<String>,
    TypedHeader(auth): TypedHeader<Authorization<Bearer>>,
    Extension(user): Extension<User>,
    Json(form): Json<ReminderForm>,
) -> Result<Json<Value>, AppError> {
    let ctx = SessionContext::from_config(&state, user, auth.token());
    let reminder = ReminderService::new(ctx).save(form, Some(&reminder_id)).await?;

    Ok(Json(json!({
        "reminder": reminder,
        "message": "Medicine reminder updated successfully"
    })))
}

#[axum::debug_handler]
pub async fn set_reminder_active(
    State(state): State<Arc<AppConfig>>,
    Path(reminder_id): Path<String>,
    TypedHeader(auth): TypedHeader<Authorization<Bearer>>,
    Extension(user): Extension<User>,
    Json(request): Json<ActiveRequest>,
) -> Result<Json<Value>, AppError> {
    let ctx = SessionContext::from_config(&state, user, auth.token());
    let reminder = ReminderService::new(ctx)
        .set_active(&reminder_id, request.is_active)
        .await?;

    Ok(Json(json!({ "reminder": reminder })))
}

#[axum::debug_handler]
pub async fn delete_reminder(
    State(state): State<Arc<AppConfig>>,
    Path(reminder_id): Path<String>,
    Query(query): Query<DeleteReminderQuery>,
    TypedHeader(auth): TypedHeader<Authorization<Bearer>>,
    Extension(user): Extension<User>,
) -> Result<Json<Value>, AppError> {
    let ctx = SessionContext::from_config(&state, user, auth.token());
    ReminderService::new(ctx).delete(&reminder_id, query.confirm).await?;

    Ok(Json(json!({
        "deleted": reminder_id,
        "message": "Reminder deleted successfully"
    })))
}
