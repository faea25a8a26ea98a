//! Health check handler

use crate::{models::ApiResponse, AppState};
use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};
use tracing::warn;

pub async fn handle_health(State(state): State<AppState>) -> impl IntoResponse {
    let store = state.lead_service.store();

    let mut health_info = serde_json::json!({
        "status": "healthy",
        "timestamp": chrono::Utc::now().timestamp(),
        "version": state.version,
        "store": store.kind(),
    });

    match store.count().await {
        Ok(count) => health_info["leads"] = serde_json::json!(count),
        Err(e) => {
            warn!("Lead store unavailable: {}", e);
            health_info["status"] = serde_json::json!("unhealthy");
            health_info["store_error"] = serde_json::json!(e.to_string());
            return (StatusCode::SERVICE_UNAVAILABLE, Json(ApiResponse::success(health_info)));
        }
    }

    if let Some(db_manager) = &state.db_manager {
        if let Err(e) = db_manager.health_check().await {
            health_info["status"] = serde_json::json!("unhealthy");
            health_info["database_error"] = serde_json::json!(e.to_string());
            return (StatusCode::SERVICE_UNAVAILABLE, Json(ApiResponse::success(health_info)));
        }
    }

    (StatusCode::OK, Json(ApiResponse::success(health_info)))
}
