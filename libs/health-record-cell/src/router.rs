use std::sync::Arc;

use axum::{middleware, routing::get, Router};

use shared_config::AppConfig;
use shared_utils::extractor::auth_middleware;

use crate::handlers;

pub fn health_record_routes(state: Arc<AppConfig>) -> Router {
    Router::new()
        .route("/", get(handlers::list_health_records))
        .route("/summary", get(handlers::get_health_summary))
        .layer(middleware::from_fn_with_state(state.clone(), auth_middleware))
        .with_state(state)
}
