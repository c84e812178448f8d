//! Panic recovery response.

use std::any::Any;

use axum::response::{IntoResponse, Response};

use crate::errors::AppError;

/// Turns a caught handler panic into a generic 500 envelope.
pub fn handle_panic(err: Box<dyn Any + Send + 'static>) -> Response {
    let reason = if let Some(s) = err.downcast_ref::<String>() {
        s.clone()
    } else if let Some(s) = err.downcast_ref::<&str>() {
        s.to_string()
    } else {
        "unknown panic payload".to_string()
    };

    tracing::error!(panic = %reason, "Handler panicked");
    AppError::internal("request handler panicked").into_response()
}
