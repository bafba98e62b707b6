// src/api/http/handlers.rs

use axum::{
    extract::Path,
    http::HeaderMap,
    response::{Html, IntoResponse},
    Json,
};
use chrono::Utc;
use serde_json::json;
use tracing::warn;

use crate::api::error::ApiError;
use crate::forensics::bait::{is_bait_file, BAIT_PAGE_HTML};

/// Root liveness banner
pub async fn home_handler() -> impl IntoResponse {
    Json(json!({
        "status": "Live",
        "system": "ScamHunters AI Defense System"
    }))
}

/// Health check handler
pub async fn health_handler() -> impl IntoResponse {
    Json(json!({
        "status": "ok",
        "version": env!("CARGO_PKG_VERSION"),
        "timestamp": Utc::now().to_rfc3339()
    }))
}

/// Bait download target. Any hit means a scammer opened a tracking link.
pub async fn bait_asset_handler(
    Path(file_name): Path<String>,
    headers: HeaderMap,
) -> impl IntoResponse {
    if !is_bait_file(&file_name) {
        return ApiError::not_found("Not Found").into_response();
    }

    let user_agent = headers
        .get("user-agent")
        .and_then(|v| v.to_str().ok())
        .unwrap_or("unknown");
    let forwarded_for = headers
        .get("x-forwarded-for")
        .and_then(|v| v.to_str().ok())
        .unwrap_or("unknown");
    warn!(file = %file_name, user_agent, forwarded_for, "Bait link opened");

    Html(BAIT_PAGE_HTML).into_response()
}
