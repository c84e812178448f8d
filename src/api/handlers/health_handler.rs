//! Health check handlers.

use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Json, Response},
};
use chrono::Utc;
use serde::Serialize;
use utoipa::ToSchema;

use crate::api::AppState;
use crate::config::APP_VERSION;
use crate::types::ApiResponse;

/// Database probe response
#[derive(Debug, Serialize, ToSchema)]
pub struct HealthResponse {
    pub status: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub timestamp: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub version: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

/// API liveness payload
#[derive(Debug, Serialize, ToSchema)]
pub struct ApiStatus {
    pub status: String,
    pub version: String,
}

/// Database connectivity check
#[utoipa::path(
    get,
    path = "/health",
    tag = "Health",
    responses(
        (status = 200, description = "Database reachable", body = HealthResponse),
        (status = 503, description = "Database unreachable", body = HealthResponse)
    )
)]
pub async fn health_check(State(state): State<AppState>) -> Response {
    match state.health.ping().await {
        Ok(()) => (
            StatusCode::OK,
            Json(HealthResponse {
                status: "healthy".to_string(),
                timestamp: Some(Utc::now().to_rfc3339()),
                version: Some(APP_VERSION.to_string()),
                error: None,
            }),
        )
            .into_response(),
        Err(e) => {
            tracing::error!("Health check failed: {}", e);
            (
                StatusCode::SERVICE_UNAVAILABLE,
                Json(HealthResponse {
                    status: "unhealthy".to_string(),
                    timestamp: None,
                    version: None,
                    error: Some("Database connection failed".to_string()),
                }),
            )
                .into_response()
        }
    }
}

/// API liveness, no dependencies touched
#[utoipa::path(
    get,
    path = "/api/health",
    tag = "Health",
    responses((status = 200, description = "API is running", body = ApiStatus))
)]
pub async fn api_health() -> ApiResponse<ApiStatus> {
    ApiResponse::success(
        "API is running",
        ApiStatus {
            status: "success".to_string(),
            version: APP_VERSION.to_string(),
        },
    )
}
