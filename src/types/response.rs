use axum::{http::StatusCode, response::IntoResponse, Json};
use serde::Serialize;

use super::PaginationMeta;

/// Success envelope shared by every endpoint
#[derive(Debug, Serialize)]
pub struct ApiResponse<T: Serialize> {
    pub success: bool,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub meta: Option<ResponseMeta>,
}

/// Envelope metadata for list responses
#[derive(Debug, Serialize)]
pub struct ResponseMeta {
    pub pagination: PaginationMeta,
}

impl<T: Serialize> ApiResponse<T> {
    pub fn success(message: impl Into<String>, data: T) -> Self {
        Self {
            success: true,
            message: message.into(),
            data: Some(data),
            meta: None,
        }
    }

    pub fn paginated(message: impl Into<String>, data: T, pagination: PaginationMeta) -> Self {
        Self {
            success: true,
            message: message.into(),
            data: Some(data),
            meta: Some(ResponseMeta { pagination }),
        }
    }
}

impl ApiResponse<()> {
    pub fn message(message: impl Into<String>) -> Self {
        Self {
            success: true,
            message: message.into(),
            data: None,
            meta: None,
        }
    }
}

impl<T: Serialize> IntoResponse for ApiResponse<T> {
    fn into_response(self) -> axum::response::Response {
        (StatusCode::OK, Json(self)).into_response()
    }
}

/// Created response helper for POST endpoints
pub struct Created<T: Serialize>(pub ApiResponse<T>);

impl<T: Serialize> IntoResponse for Created<T> {
    fn into_response(self) -> axum::response::Response {
        (StatusCode::CREATED, Json(self.0)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_message_only_omits_data() {
        let value = serde_json::to_value(ApiResponse::message("User deleted successfully")).unwrap();
        assert_eq!(
            value,
            json!({"success": true, "message": "User deleted successfully"})
        );
    }

    #[test]
    fn test_paginated_shape() {
        let response = ApiResponse::paginated("ok", vec![1, 2], PaginationMeta::new(12, 0, 2));
        let value = serde_json::to_value(response).unwrap();

        assert_eq!(value["data"], json!([1, 2]));
        assert_eq!(value["meta"]["pagination"]["total"], 12);
        assert_eq!(value["meta"]["pagination"]["pages"], 6);
    }
}
