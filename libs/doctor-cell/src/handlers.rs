use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    Json,
};
use serde::Deserialize;
use serde_json::{json, Value};
use tracing::debug;

use shared_config::AppConfig;
use shared_models::error::AppError;

use crate::models::{AppointmentChannel, LocationCoords, LocationError, PositionOptions};
use crate::services::directory::{distance_km, DoctorDirectory};
use crate::services::location::{ClientPositionReport, LocationResolver};
use crate::services::maps::MapLinks;
use crate::services::search::SearchController;

#[derive(Debug, Deserialize)]
pub struct DoctorSearchQuery {
    pub specialization: Option<String>,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    pub available_only: Option<bool>,
}

#[derive(Debug, Deserialize)]
pub struct LocateRequest {
    pub report: ClientPositionReport,
    pub specialization: Option<String>,
}

#[axum::debug_handler]
pub async fn search_doctors(Query(query): Query<DoctorSearchQuery>) -> Result<Json<Value>, AppError> {
    let origin = match (query.latitude, query.longitude) {
        (Some(latitude), Some(longitude)) => Some(LocationCoords::new(latitude, longitude)),
        (None, None) => None,
        _ => {
            return Err(AppError::BadRequest(
                "latitude and longitude must be given together".to_string(),
            ))
        }
    };

    let directory = DoctorDirectory::default();
    let mut doctors = directory.get_filtered_doctors(query.specialization.as_deref(), origin);
    if query.available_only.unwrap_or(false) {
        doctors.retain(|d| d.is_available);
    }

    let distances: Option<Value> = origin.map(|origin| {
        doctors
            .iter()
            .map(|d| (d.id.clone(), json!(distance_km(d, origin))))
            .collect::<serde_json::Map<_, _>>()
            .into()
    });

    Ok(Json(json!({
        "doctors": doctors,
        "total": doctors.len(),
        "distances_km": distances,
    })))
}

#[axum::debug_handler]
pub async fn list_specializations() -> Json<Value> {
    Json(json!({
        "specializations": DoctorDirectory::default().specializations()
    }))
}

#[axum::debug_handler]
pub async fn get_doctor(Path(doctor_id): Path<String>) -> Result<Json<Value>, AppError> {
    let doctor = DoctorDirectory::default().get_doctor_by_id(&doctor_id)?;

    let channels: Vec<Value> = AppointmentChannel::ALL
        .iter()
        .map(|channel| {
            json!({
                "id": channel.id(),
                "name": channel.display_name(),
                "description": channel.description(),
                "fee": doctor.consultation_fee.fee_for(*channel),
            })
        })
        .collect();

    Ok(Json(json!({
        "doctor": doctor,
        "channels": channels,
    })))
}

#[axum::debug_handler]
pub async fn get_doctor_map(
    State(state): State<Arc<AppConfig>>,
    Path(doctor_id): Path<String>,
) -> Result<Json<Value>, AppError> {
    let doctor = DoctorDirectory::default().get_doctor_by_id(&doctor_id)?;

    Ok(Json(json!({
        "doctor_id": doctor.id,
        "url": MapLinks::from_config(&state).doctor_location(doctor),
    })))
}

/// Resolves the client's reported position and returns the nearest matching doctors.
#[axum::debug_handler]
pub async fn locate_doctors(
    State(state): State<Arc<AppConfig>>,
    Json(request): Json<LocateRequest>,
) -> Result<Json<Value>, LocationError> {
    debug!("Locating doctors near client position");

    let resolver = LocationResolver::with_options(request.report, PositionOptions::from_config(&state));
    let controller = SearchController::default();
    controller.open();
    controller.select_specialization(request.specialization.as_deref());
    controller.locate(&resolver).await;

    let snapshot = controller.snapshot();
    if let Some(err) = snapshot.error {
        return Err(err);
    }

    let map_url = snapshot
        .origin
        .map(|origin| MapLinks::from_config(&state).current_location(origin));

    Ok(Json(json!({
        "state": snapshot.state,
        "location": snapshot.origin,
        "map_url": map_url,
        "doctors": snapshot.results,
        "total": snapshot.results.len(),
    })))
}
