//! Webhook body extractor accepting JSON, url-encoded and multipart submissions

use crate::error::{AppError, Result};
use crate::models::SubmissionPayload;
use axum::{
    async_trait,
    body::Bytes,
    extract::{FromRequest, Multipart, Query, Request},
    http::header::CONTENT_TYPE,
    Form,
};
use std::collections::HashMap;
use std::convert::Infallible;

/// Parsed submission, or the reason parsing failed.
///
/// Parsing never rejects the request: the webhook must answer every POST with
/// its own JSON envelope, so failures are handed to the handler instead.
pub struct SubmissionBody(pub Result<SubmissionPayload>);

#[async_trait]
impl<S> FromRequest<S> for SubmissionBody
where
    S: Send + Sync,
{
    type Rejection = Infallible;

    async fn from_request(req: Request, state: &S) -> std::result::Result<Self, Self::Rejection> {
        Ok(SubmissionBody(parse(req, state).await))
    }
}

fn content_essence(req: &Request) -> Option<String> {
    req.headers()
        .get(CONTENT_TYPE)
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.parse::<mime::Mime>().ok())
        .map(|mime| mime.essence_str().to_ascii_lowercase())
}

async fn parse<S>(req: Request, state: &S) -> Result<SubmissionPayload>
where
    S: Send + Sync,
{
    let essence = content_essence(&req);

    if essence.as_deref() == Some("application/json") {
        let bytes = Bytes::from_request(req, state)
            .await
            .map_err(|e| AppError::BadRequest(format!("Unreadable body: {}", e)))?;
        let value: serde_json::Value = serde_json::from_slice(&bytes)
            .map_err(|e| AppError::BadRequest(format!("Invalid JSON: {}", e)))?;
        return SubmissionPayload::from_json(&value);
    }

    let mut parameters: HashMap<String, String> = Query::<HashMap<String, String>>::try_from_uri(req.uri())
        .map(|Query(query)| query)
        .unwrap_or_default();

    match essence.as_deref() {
        Some("application/x-www-form-urlencoded") => {
            let Form(body) = Form::<HashMap<String, String>>::from_request(req, state)
                .await
                .map_err(|e| AppError::BadRequest(format!("Invalid form body: {}", e)))?;
            parameters.extend(body);
        }
        Some("multipart/form-data") => {
            let mut multipart = Multipart::from_request(req, state)
                .await
                .map_err(|e| AppError::BadRequest(format!("Invalid multipart body: {}", e)))?;

            while let Some(field) = multipart
                .next_field()
                .await
                .map_err(|e| AppError::BadRequest(format!("Invalid multipart body: {}", e)))?
            {
                let Some(name) = field.name().map(str::to_string) else {
                    continue;
                };
                if field.file_name().is_some() {
                    continue;
                }
                let value = field
                    .text()
                    .await
                    .map_err(|e| AppError::BadRequest(format!("Invalid multipart field {}: {}", name, e)))?;
                parameters.insert(name, value);
            }
        }
        _ => {}
    }

    Ok(SubmissionPayload::from(parameters))
}
