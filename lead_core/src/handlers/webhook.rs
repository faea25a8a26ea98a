//! Lead webhook: `POST` records a submission, `GET` is a liveness probe

use crate::{extractors::SubmissionBody, models::WebhookResponse, AppState};
use axum::{
    extract::State,
    http::header,
    response::IntoResponse,
    Json,
};
use tracing::info;

pub const PROBE_TEXT: &str = "API ativa!";

/// Always answers 200; success or failure travels in the JSON body.
pub async fn handle_webhook_post(
    State(state): State<AppState>,
    SubmissionBody(parsed): SubmissionBody,
) -> Json<WebhookResponse> {
    info!("POST /webhook");

    Json(state.lead_service.handle(parsed).await)
}

pub async fn handle_webhook_probe() -> impl IntoResponse {
    ([(header::CONTENT_TYPE, "text/plain; charset=utf-8")], PROBE_TEXT)
}
