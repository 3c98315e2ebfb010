use std::sync::Arc;

use axum::{
    middleware,
    routing::{get, put},
    Router,
};

use shared_config::AppConfig;
use shared_utils::extractor::auth_middleware;

use crate::handlers;

pub fn reminder_routes(state: Arc<AppConfig>) -> Router {
    Router::new()
        .route("/", get(handlers::list_reminders).post(handlers::create_reminder))
        .route(
            "/{reminder_id}",
            put(handlers::update_reminder).delete(handlers::delete_reminder),
        )
        .route("/{reminder_id}/active", put(handlers::set_reminder_active))
        .layer(middleware::from_fn_with_state(state.clone(), auth_middleware))
        .with_state(state)
}
