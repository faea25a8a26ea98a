//! Deep-link dispatch for static sites that cannot build the link themselves

use crate::{
    dispatch::{Dispatcher, HeadlessSurface, IDLE_LABEL},
    error::{AppError, Result},
    extractors::SubmissionBody,
    models::{ApiResponse, DispatchResult},
    validation::{check_field, FieldKind},
    AppState,
};
use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use serde::{Deserialize, Serialize};
use tracing::info;

#[derive(Debug, Serialize)]
struct SiteSummary {
    key: String,
    title: String,
    variant: crate::site::FormVariant,
    required_fields: &'static [&'static str],
}

pub async fn handle_list_sites(State(state): State<AppState>) -> impl IntoResponse {
    let mut sites: Vec<SiteSummary> = state
        .sites
        .iter()
        .map(|(key, profile)| SiteSummary {
            key: key.clone(),
            title: profile.title.clone(),
            variant: profile.variant,
            required_fields: profile.required_fields(),
        })
        .collect();
    sites.sort_by(|a, b| a.key.cmp(&b.key));

    Json(ApiResponse::success(sites))
}

#[derive(Debug, Default, Deserialize)]
pub struct SubmitOptions {
    /// Identifier suffix of a secondary form on the same page.
    suffix: Option<String>,
}

pub async fn handle_site_submit(
    State(state): State<AppState>,
    Path(site): Path<String>,
    Query(options): Query<SubmitOptions>,
    SubmissionBody(parsed): SubmissionBody,
) -> Result<impl IntoResponse> {
    info!("POST /api/sites/{}/submit", site);

    let profile = state
        .sites
        .get(&site)
        .cloned()
        .ok_or_else(|| AppError::NotFound(format!("Unknown site: {}", site)))?;

    let raw = parsed?;
    let payload = profile
        .variant
        .binding()
        .with_suffix(options.suffix.unwrap_or_default())
        .collect(&raw);

    let surface = HeadlessSurface::new(IDLE_LABEL);
    let dispatcher = Dispatcher::new(profile, surface.ui()).with_settings(state.dispatch.clone());
    let result = dispatcher.submit(&payload).await;

    let status = match &result {
        DispatchResult::Success { .. } => StatusCode::OK,
        DispatchResult::ValidationFailure { .. } => StatusCode::BAD_REQUEST,
        DispatchResult::DeliveryFailure { .. } => StatusCode::INTERNAL_SERVER_ERROR,
    };

    Ok((status, Json(surface.report(result))))
}

#[derive(Debug, Deserialize)]
pub struct FieldCheckRequest {
    kind: FieldKind,
    #[serde(default)]
    value: String,
    #[serde(default)]
    required: bool,
}

pub async fn handle_field_check(Json(request): Json<FieldCheckRequest>) -> impl IntoResponse {
    Json(ApiResponse::success(check_field(
        request.kind,
        &request.value,
        request.required,
    )))
}
