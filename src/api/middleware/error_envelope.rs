//! Finalizes every error response into the JSON error envelope.
//!
//! `AppError` responses carry an `ErrorReport` extension that is completed
//! here with request metadata. Bare error statuses produced by the router or
//! by tower layers (405, 408, extractor rejections) get a fresh envelope.
//! JSON error bodies without a report (the `/health` probe) pass through.

use axum::{
    body::Body,
    extract::{Request, State},
    http::{header, HeaderMap, HeaderValue, StatusCode},
    middleware::Next,
    response::{IntoResponse, Response},
};
use chrono::{SecondsFormat, Utc};
use serde_json::json;

use super::request_id::request_id_of;
use crate::api::AppState;
use crate::errors::{ErrorReport, ErrorResponse};

pub async fn error_envelope(State(state): State<AppState>, request: Request, next: Next) -> Response {
    let request_id = request_id_of(&request);
    let method = request.method().clone();
    let path = request.uri().path().to_string();

    let response = next.run(request).await;
    let status = response.status();
    if !status.is_client_error() && !status.is_server_error() {
        return response;
    }

    let (mut parts, body) = response.into_parts();
    let (mut envelope, detail) = match parts.extensions.remove::<ErrorReport>() {
        Some(report) => (report.body, report.detail),
        None if is_json(&parts.headers) => return Response::from_parts(parts, body),
        None => (ErrorResponse::for_status(status), None),
    };

    envelope.request_id = request_id;
    envelope.timestamp = Some(Utc::now().to_rfc3339_opts(SecondsFormat::Secs, true));
    if state.config.is_development() {
        envelope.details = detail.map(|d| json!({ "error": d }));
    }

    if status.is_server_error() {
        tracing::error!(
            %method,
            %path,
            status = status.as_u16(),
            code = %envelope.code,
            request_id = envelope.request_id.as_deref().unwrap_or("n/a"),
            "Request failed"
        );
    } else {
        tracing::warn!(
            %method,
            %path,
            status = status.as_u16(),
            code = %envelope.code,
            request_id = envelope.request_id.as_deref().unwrap_or("n/a"),
            "Request rejected"
        );
    }

    let bytes = match serde_json::to_vec(&envelope) {
        Ok(bytes) => bytes,
        Err(e) => {
            tracing::error!("Failed to serialize error envelope: {}", e);
            return StatusCode::INTERNAL_SERVER_ERROR.into_response();
        }
    };

    parts.headers.remove(header::CONTENT_LENGTH);
    parts.headers.insert(
        header::CONTENT_TYPE,
        HeaderValue::from_static("application/json"),
    );
    Response::from_parts(parts, Body::from(bytes))
}

fn is_json(headers: &HeaderMap) -> bool {
    headers
        .get(header::CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .is_some_and(|v| v.starts_with("application/json"))
}
