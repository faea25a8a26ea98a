//! Request logging middleware configuration

use axum::http::{Request, Response};
use std::time::Duration;
use tower_http::classify::{ServerErrorsAsFailures, ServerErrorsFailureClass, SharedClassifier};
use tower_http::trace::{
    DefaultOnBodyChunk, DefaultOnEos, MakeSpan, OnFailure, OnRequest, OnResponse, TraceLayer,
};
use tracing::{info_span, Span};

pub type LoggingLayer = TraceLayer<
    SharedClassifier<ServerErrorsAsFailures>,
    LeadMakeSpan,
    LeadOnRequest,
    LeadOnResponse,
    DefaultOnBodyChunk,
    DefaultOnEos,
    LeadOnFailure,
>;

pub fn logging_layer() -> LoggingLayer {
    TraceLayer::new_for_http()
        .make_span_with(LeadMakeSpan)
        .on_request(LeadOnRequest)
        .on_response(LeadOnResponse)
        .on_failure(LeadOnFailure)
}

/// Query strings are left out of the span: webhook submissions may carry
/// personal data there.
#[derive(Debug, Clone, Copy, Default)]
pub struct LeadMakeSpan;

impl<B> MakeSpan<B> for LeadMakeSpan {
    fn make_span(&mut self, request: &Request<B>) -> Span {
        info_span!(
            "lead_request",
            method = %request.method(),
            path = %request.uri().path(),
            version = ?request.version(),
        )
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct LeadOnRequest;

impl<B> OnRequest<B> for LeadOnRequest {
    fn on_request(&mut self, request: &Request<B>, _span: &Span) {
        tracing::debug!("received {} {}", request.method(), request.uri().path());
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct LeadOnResponse;

impl<B> OnResponse<B> for LeadOnResponse {
    fn on_response(self, response: &Response<B>, latency: Duration, _span: &Span) {
        let status = response.status().as_u16();
        let latency_ms = latency.as_millis();

        match status {
            400..=499 => tracing::warn!(status, latency_ms, "client error response"),
            500..=599 => tracing::error!(status, latency_ms, "server error response"),
            _ => tracing::info!(status, latency_ms, "request completed"),
        }
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct LeadOnFailure;

impl OnFailure<ServerErrorsFailureClass> for LeadOnFailure {
    fn on_failure(&mut self, error: ServerErrorsFailureClass, latency: Duration, _span: &Span) {
        tracing::error!(
            latency_ms = latency.as_millis(),
            error = ?error,
            "request failed"
        );
    }
}
