// src/api/http/router.rs
// HTTP router composition

use axum::{
    routing::{get, post},
    Router,
};
use std::sync::Arc;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use super::{
    chat::{chat_handler, session_log_handler},
    handlers::{bait_asset_handler, health_handler, home_handler},
};
use crate::state::AppState;

/// Full application router, CORS open to any origin
pub fn http_router(app_state: Arc<AppState>) -> Router {
    Router::new()
        .route("/", get(home_handler))
        .route("/health", get(health_handler))
        .route("/api/chat", post(chat_handler))
        .route("/api/sessions/{session_id}", get(session_log_handler))
        .route("/assets/{file_name}", get(bait_asset_handler))
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .with_state(app_state)
}
