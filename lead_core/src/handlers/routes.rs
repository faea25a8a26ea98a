//! Route table for the lead pipeline

use super::{health, sites, webhook};
use crate::{models::ApiResponse, AppState};
use axum::{
    extract::State,
    response::IntoResponse,
    routing::{get, post},
    Json, Router,
};

pub fn create_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(handle_root))
        .route("/health", get(health::handle_health))
        .route(
            "/webhook",
            post(webhook::handle_webhook_post).get(webhook::handle_webhook_probe),
        )
        .route("/api/sites", get(sites::handle_list_sites))
        .route("/api/sites/:site/submit", post(sites::handle_site_submit))
        .route("/api/fields/check", post(sites::handle_field_check))
}

async fn handle_root(State(state): State<AppState>) -> impl IntoResponse {
    Json(ApiResponse::success(serde_json::json!({
        "app": state.app_name,
        "version": state.version,
        "endpoints": {
            "health": "/health",
            "webhook": "/webhook",
            "sites": "/api/sites",
            "submit": "/api/sites/{site}/submit",
            "field_check": "/api/fields/check"
        }
    })))
}
