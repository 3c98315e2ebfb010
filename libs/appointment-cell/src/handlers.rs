use std::sync::Arc;

use axum::{
    extract::{Extension, Path, Query, State},
    Json,
};
use axum_extra::TypedHeader;
use headers::{authorization::Bearer, Authorization};
use serde::Deserialize;
use serde_json::{json, Value};

use doctor_cell::DoctorDirectory;
use shared_config::AppConfig;
use shared_database::SessionContext;
use shared_models::auth::User;
use shared_models::error::AppError;

use crate::models::{AppointmentDraft, AppointmentForm};
use crate::services::{AppointmentService, BookingWorkflow};

// ==============================================================================
// QUERY PARAMETER STRUCTS
// ==============================================================================

#[derive(Debug, Deserialize)]
pub struct DeleteAppointmentQuery {
    #[serde(default)]
    pub confirm: bool,
}

// ==============================================================================
// APPOINTMENT HANDLERS
// ==============================================================================

#[axum::debug_handler]
pub async fn list_appointments(
    State(state): State<Arc<AppConfig>>,
    TypedHeader(auth): TypedHeader<Authorization<Bearer>>,
    Extension(user): Extension<User>,
) -> Result<Json<Value>, AppError> {
    let ctx = SessionContext::from_config(&state, user, auth.token());
    let appointments = AppointmentService::new(ctx).list().await?;

    Ok(Json(json!({
        "appointments": appointments,
        "total": appointments.len()
    })))
}

#[axum::debug_handler]
pub async fn create_appointment(
    State(state): State<Arc<AppConfig>>,
    TypedHeader(auth): TypedHeader<Authorization<Bearer>>,
    Extension(user): Extension<User>,
    Json(form): Json<AppointmentForm>,
) -> Result<Json<Value>, AppError> {
    let ctx = SessionContext::from_config(&state, user, auth.token());
    let appointment = AppointmentService::new(ctx).save(form, None).await?;

    Ok(Json(json!({
        "appointment": appointment,
        "message": "Appointment scheduled successfully"
    })))
}

#[axum::debug_handler]
pub async fn update_appointment(
    State(state): State<Arc<AppConfig>>,
    Path(appointment_id): Path<String>,
    TypedHeader(auth): TypedHeader<Authorization<Bearer>>,
    Extension(user): Extension<User>,
    Json(form): Json<AppointmentForm>,
) -> Result<Json<Value>, AppError> {
    let ctx = SessionContext::from_config(&state, user, auth.token());
    let appointment = AppointmentService::new(ctx)
        .save(form, Some(&appointment_id))
        .await?;

    Ok(Json(json!({
        "appointment": appointment,
        "message": "Appointment updated successfully"
    })))
}

#[axum::debug_handler]
pub async fn complete_appointment(
    State(state): State<Arc<AppConfig>>,
    Path(appointment_id): Path<String>,
    TypedHeader(auth): TypedHeader<Authorization<Bearer>>,
    Extension(user): Extension<User>,
) -> Result<Json<Value>, AppError> {
    let ctx = SessionContext::from_config(&state, user, auth.token());
    let appointment = AppointmentService::new(ctx).complete(&appointment_id).await?;

    Ok(Json(json!({ "appointment": appointment })))
}

#[axum::debug_handler]
pub async fn cancel_appointment(
    State(state): State<Arc<AppConfig>>,
    Path(appointment_id): Path<String>,
    TypedHeader(auth): TypedHeader<Authorization<Bearer>>,
    Extension(user): Extension<User>,
) -> Result<Json<Value>, AppError> {
    let ctx = SessionContext::from_config(&state, user, auth.token());
    let appointment = AppointmentService::new(ctx).cancel(&appointment_id).await?;

    Ok(Json(json!({ "appointment": appointment })))
}

#[axum::debug_handler]
pub async fn delete_appointment(
    State(state): State<Arc<AppConfig>>,
    Path(appointment_id): Path<String>,
    Query(query): Query<DeleteAppointmentQuery>,
    TypedHeader(auth): TypedHeader<Authorization<Bearer>>,
    Extension(user): Extension<User>,
) -> Result<Json<Value>, AppError> {
    let ctx = SessionContext::from_config(&state, user, auth.token());
    AppointmentService::new(ctx)
        .delete(&appointment_id, query.confirm)
        .await?;

    Ok(Json(json!({
        "deleted": appointment_id,
        "message": "Appointment deleted successfully"
    })))
}

// ==============================================================================
// BOOKING HANDLERS
// ==============================================================================

/// Books a catalog doctor. The caller returns to the directory after `return_after_secs`.
#[axum::debug_handler]
pub async fn book_doctor(
    State(state): State<Arc<AppConfig>>,
    Path(doctor_id): Path<String>,
    TypedHeader(auth): TypedHeader<Authorization<Bearer>>,
    Extension(user): Extension<User>,
    Json(draft): Json<AppointmentDraft>,
) -> Result<Json<Value>, AppError> {
    let doctor = DoctorDirectory::default().get_doctor_by_id(&doctor_id)?.clone();
    let ctx = SessionContext::from_config(&state, user, auth.token());

    let mut workflow = BookingWorkflow::new(ctx, doctor, state.booking_success_delay()).with_draft(draft);
    let fee = workflow.fee();
    let channel = workflow.draft().channel;
    let appointment = workflow.submit().await?;

    Ok(Json(json!({
        "appointment": appointment,
        "state": workflow.state(),
        "appointment_type": channel,
        "fee": fee,
        "return_after_secs": workflow.success_delay().as_secs(),
        "message": "Appointment booked successfully"
    })))
}
