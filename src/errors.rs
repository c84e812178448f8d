//! Centralized error handling.
//!
//! Provides a unified error type for the entire application,
//! with automatic HTTP response conversion into the error envelope.

use std::collections::BTreeMap;

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use thiserror::Error;
use utoipa::ToSchema;

/// Application error types
#[derive(Error, Debug)]
pub enum AppError {
    // Input
    #[error("{message}")]
    Validation {
        message: String,
        fields: BTreeMap<String, String>,
    },

    #[error("{0}")]
    BadRequest(String),

    // Resource errors
    #[error("{0} already exists")]
    Conflict(String),

    #[error("{0} not found")]
    NotFound(String),

    #[error("The requested route was not found")]
    RouteNotFound,

    // Authentication
    #[error("Invalid credentials")]
    InvalidCredentials,

    #[error("User account is deactivated")]
    AccountDeactivated,

    // External service errors
    #[error("Database error: {0}")]
    Storage(#[from] sea_orm::DbErr),

    // Internal
    #[error("Internal error: {0}")]
    Internal(String),
}

impl AppError {
    /// Machine-readable error code
    pub fn code(&self) -> &'static str {
        match self {
            AppError::Validation { .. } => "VALIDATION_ERROR",
            AppError::BadRequest(_) => "BAD_REQUEST",
            AppError::Conflict(_) => "CONFLICT",
            AppError::NotFound(_) => "NOT_FOUND",
            AppError::RouteNotFound => "ROUTE_NOT_FOUND",
            AppError::InvalidCredentials => "INVALID_CREDENTIALS",
            AppError::AccountDeactivated => "ACCOUNT_DEACTIVATED",
            AppError::Storage(_) => "STORAGE_ERROR",
            AppError::Internal(_) => "INTERNAL_ERROR",
        }
    }

    /// HTTP status code
    pub fn status(&self) -> StatusCode {
        match self {
            AppError::Validation { .. } | AppError::BadRequest(_) => StatusCode::BAD_REQUEST,
            AppError::InvalidCredentials => StatusCode::UNAUTHORIZED,
            AppError::AccountDeactivated => StatusCode::FORBIDDEN,
            AppError::NotFound(_) | AppError::RouteNotFound => StatusCode::NOT_FOUND,
            AppError::Conflict(_) => StatusCode::CONFLICT,
            AppError::Storage(_) | AppError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Short error title, e.g. "Not Found"
    pub fn title(&self) -> &'static str {
        match self {
            AppError::Validation { .. } => "Validation Error",
            _ => status_title(self.status()),
        }
    }

    /// User-facing message (hides internal details)
    pub fn user_message(&self) -> String {
        match self {
            AppError::Storage(e) => {
                tracing::error!("Database error: {:?}", e);
                "A database error occurred".to_string()
            }
            AppError::Internal(msg) => {
                tracing::error!("Internal error: {}", msg);
                "Something went wrong. Please try again later.".to_string()
            }
            _ => self.to_string(),
        }
    }

    /// Internal detail text, exposed only in development
    fn detail(&self) -> Option<String> {
        match self {
            AppError::Storage(e) => Some(e.to_string()),
            AppError::Internal(msg) => Some(msg.clone()),
            _ => None,
        }
    }
}

/// Convenience constructors
impl AppError {
    pub fn validation(msg: impl Into<String>) -> Self {
        AppError::Validation {
            message: msg.into(),
            fields: BTreeMap::new(),
        }
    }

    /// Validation failure attributed to a single field
    pub fn invalid_field(field: impl Into<String>, msg: impl Into<String>) -> Self {
        let message = msg.into();
        let mut fields = BTreeMap::new();
        fields.insert(field.into(), message.clone());
        AppError::Validation { message, fields }
    }

    pub fn conflict(entity: impl Into<String>) -> Self {
        AppError::Conflict(entity.into())
    }

    pub fn not_found(entity: impl Into<String>) -> Self {
        AppError::NotFound(entity.into())
    }

    pub fn bad_request(msg: impl Into<String>) -> Self {
        AppError::BadRequest(msg.into())
    }

    pub fn internal(msg: impl Into<String>) -> Self {
        AppError::Internal(msg.into())
    }
}

impl From<validator::ValidationErrors> for AppError {
    fn from(errors: validator::ValidationErrors) -> Self {
        let fields: BTreeMap<String, String> = errors
            .field_errors()
            .into_iter()
            .filter_map(|(field, errs)| {
                errs.first().map(|e| {
                    let message = e
                        .message
                        .as_ref()
                        .map(|m| m.to_string())
                        .unwrap_or_else(|| format!("{} is invalid", field));
                    (field.to_string(), message)
                })
            })
            .collect();

        AppError::Validation {
            message: "Validation failed".to_string(),
            fields,
        }
    }
}

/// Error envelope body
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct ErrorResponse {
    pub success: bool,
    pub message: String,
    pub error: String,
    pub code: String,
    /// Per-field validation messages
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<BTreeMap<String, String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    #[schema(value_type = Option<Object>)]
    pub details: Option<serde_json::Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub request_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub timestamp: Option<String>,
}

impl ErrorResponse {
    pub fn new(error: &str, code: &str, message: impl Into<String>) -> Self {
        Self {
            success: false,
            message: message.into(),
            error: error.to_string(),
            code: code.to_string(),
            data: None,
            details: None,
            request_id: None,
            timestamp: None,
        }
    }

    /// Envelope for a bare status produced outside the handlers
    /// (method mismatch, timeout, unmatched extractor rejections).
    pub fn for_status(status: StatusCode) -> Self {
        let title = status_title(status);
        match status {
            StatusCode::NOT_FOUND => Self::new(
                title,
                "ROUTE_NOT_FOUND",
                "The requested route was not found",
            ),
            StatusCode::METHOD_NOT_ALLOWED => Self::new(
                title,
                "METHOD_NOT_ALLOWED",
                "The HTTP method is not allowed for this endpoint",
            ),
            StatusCode::REQUEST_TIMEOUT => Self::new(
                title,
                "REQUEST_TIMEOUT",
                "The request took too long to process",
            ),
            s if s.is_server_error() => Self::new(
                title,
                "INTERNAL_ERROR",
                "Something went wrong. Please try again later.",
            ),
            _ => Self::new(title, "BAD_REQUEST", title),
        }
    }
}

/// Attached to error responses so the envelope middleware can finish them
/// with request metadata.
#[derive(Debug, Clone)]
pub struct ErrorReport {
    pub body: ErrorResponse,
    pub detail: Option<String>,
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();
        let mut body = ErrorResponse::new(self.title(), self.code(), self.user_message());
        let detail = self.detail();

        if let AppError::Validation { fields, .. } = self {
            if !fields.is_empty() {
                body.data = Some(fields);
            }
        }

        let mut response = (status, Json(body.clone())).into_response();
        response
            .extensions_mut()
            .insert(ErrorReport { body, detail });
        response
    }
}

fn status_title(status: StatusCode) -> &'static str {
    status.canonical_reason().unwrap_or("Error")
}

/// Result type alias
pub type AppResult<T> = Result<T, AppError>;

/// Extension trait for Option -> AppError conversion
pub trait OptionExt<T> {
    fn ok_or_not_found(self, entity: &str) -> AppResult<T>;
}

impl<T> OptionExt<T> for Option<T> {
    fn ok_or_not_found(self, entity: &str) -> AppResult<T> {
        self.ok_or_else(|| AppError::not_found(entity))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use validator::Validate;

    #[derive(Validate)]
    struct Sample {
        #[validate(length(min = 3, message = "name is too short"))]
        name: String,
        #[validate(range(min = 1))]
        count: i32,
    }

    #[test]
    fn test_status_mapping() {
        assert_eq!(AppError::validation("x").status(), StatusCode::BAD_REQUEST);
        assert_eq!(AppError::bad_request("x").status(), StatusCode::BAD_REQUEST);
        assert_eq!(AppError::InvalidCredentials.status(), StatusCode::UNAUTHORIZED);
        assert_eq!(AppError::AccountDeactivated.status(), StatusCode::FORBIDDEN);
        assert_eq!(AppError::not_found("User").status(), StatusCode::NOT_FOUND);
        assert_eq!(AppError::conflict("username").status(), StatusCode::CONFLICT);
        assert_eq!(
            AppError::Storage(sea_orm::DbErr::Custom("down".into())).status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
        assert_eq!(
            AppError::internal("x").status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn test_messages() {
        assert_eq!(
            AppError::conflict("username").user_message(),
            "username already exists"
        );
        assert_eq!(AppError::not_found("User").user_message(), "User not found");
        assert_eq!(AppError::not_found("User").title(), "Not Found");
        assert_eq!(AppError::validation("bad").title(), "Validation Error");
    }

    #[test]
    fn test_internal_details_hidden_from_message() {
        let err = AppError::Storage(sea_orm::DbErr::Custom("connection refused".into()));
        assert_eq!(err.user_message(), "A database error occurred");
        assert!(err.detail().unwrap_or_default().contains("connection refused"));
    }

    #[test]
    fn test_from_validation_errors_collects_fields() {
        let sample = Sample {
            name: "ab".to_string(),
            count: 0,
        };
        let err = AppError::from(sample.validate().unwrap_err());

        match err {
            AppError::Validation { fields, .. } => {
                assert_eq!(fields.get("name").map(String::as_str), Some("name is too short"));
                assert_eq!(fields.get("count").map(String::as_str), Some("count is invalid"));
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_into_response_carries_report() {
        let response = AppError::invalid_field("password", "too short").into_response();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let report = response.extensions().get::<ErrorReport>().unwrap();
        assert_eq!(report.body.code, "VALIDATION_ERROR");
        assert_eq!(
            report.body.data.as_ref().and_then(|d| d.get("password")).map(String::as_str),
            Some("too short")
        );
        assert!(report.detail.is_none());
    }

    #[test]
    fn test_for_status() {
        assert_eq!(
            ErrorResponse::for_status(StatusCode::METHOD_NOT_ALLOWED).code,
            "METHOD_NOT_ALLOWED"
        );
        assert_eq!(
            ErrorResponse::for_status(StatusCode::REQUEST_TIMEOUT).code,
            "REQUEST_TIMEOUT"
        );
        assert_eq!(
            ErrorResponse::for_status(StatusCode::UNSUPPORTED_MEDIA_TYPE).error,
            "Unsupported Media Type"
        );
    }

    #[test]
    fn test_option_ext() {
        let missing: Option<u8> = None;
        assert!(matches!(
            missing.ok_or_not_found("User"),
            Err(AppError::NotFound(entity)) if entity == "User"
        ));
        assert_eq!(Some(1).ok_or_not_found("User").unwrap(), 1);
    }
}
