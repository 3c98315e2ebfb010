use std::sync::Arc;

use axum::{routing::get, Router};

use appointment_cell::router::appointment_routes;
use diagnostics_cell::router::diagnostics_routes;
use doctor_cell::router::doctor_routes;
use health_record_cell::router::health_record_routes;
use medicine_reminder_cell::router::reminder_routes;
use shared_config::AppConfig;
use symptom_cell::router::symptom_routes;

pub fn create_router(state: Arc<AppConfig>) -> Router {
    Router::new()
        .route("/", get(|| async { "Nirogya Care API is running!" }))
        .nest("/doctors", doctor_routes(state.clone()))
        .nest("/appointments", appointment_routes(state.clone()))
        .nest("/health-records", health_record_routes(state.clone()))
        .nest("/diagnostics", diagnostics_routes(state.clone()))
        .nest("/symptoms", symptom_routes(state.clone()))
        .nest("/medicine-reminders", reminder_routes(state))
}
