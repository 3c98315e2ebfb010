use std::sync::Arc;

use axum::{
    routing::{get, post},
    Router,
};

use shared_config::AppConfig;

use crate::handlers;

/// The directory is public; no route here needs a session.
pub fn doctor_routes(state: Arc<AppConfig>) -> Router {
    Router::new()
        .route("/", get(handlers::search_doctors))
        .route("/specializations", get(handlers::list_specializations))
        .route("/locate", post(handlers::locate_doctors))
        .route("/{doctor_id}", get(handlers::get_doctor))
        .route("/{doctor_id}/map", get(handlers::get_doctor_map))
        .with_state(state)
}
