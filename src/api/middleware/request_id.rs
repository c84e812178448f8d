//! Request id generation and request-scoped tracing spans.

use axum::{
    body::Body,
    http::{HeaderName, HeaderValue, Request},
};
use tower_http::{
    classify::{ServerErrorsAsFailures, SharedClassifier},
    request_id::{MakeRequestId, RequestId},
    trace::{DefaultOnResponse, TraceLayer},
};
use tracing::Level;
use uuid::Uuid;

pub const X_REQUEST_ID: &str = "x-request-id";
pub const X_CORRELATION_ID: &str = "x-correlation-id";

pub fn header() -> HeaderName {
    HeaderName::from_static(X_REQUEST_ID)
}

/// Reuses an incoming `X-Correlation-ID`, otherwise a random UUID.
///
/// Only consulted when the client did not send `X-Request-ID`.
#[derive(Clone, Default)]
pub struct MakeCorrelatedId;

impl MakeRequestId for MakeCorrelatedId {
    fn make_request_id<B>(&mut self, request: &Request<B>) -> Option<RequestId> {
        let value = match request.headers().get(X_CORRELATION_ID) {
            Some(value) => value.clone(),
            None => HeaderValue::from_str(&Uuid::new_v4().to_string()).ok()?,
        };
        Some(RequestId::new(value))
    }
}

/// Read the request id of an in-flight request.
pub fn request_id_of<B>(request: &Request<B>) -> Option<String> {
    request
        .headers()
        .get(X_REQUEST_ID)
        .or_else(|| request.headers().get(X_CORRELATION_ID))
        .and_then(|v| v.to_str().ok())
        .map(str::to_owned)
}

/// Access log layer: one INFO span per request tagged with its id.
#[allow(clippy::type_complexity)]
pub fn trace_layer() -> TraceLayer<
    SharedClassifier<ServerErrorsAsFailures>,
    impl Fn(&Request<Body>) -> tracing::Span + Clone,
> {
    TraceLayer::new_for_http()
        .make_span_with(|request: &Request<Body>| {
            let request_id = request_id_of(request).unwrap_or_else(|| "n/a".to_string());
            tracing::info_span!(
                "http_request",
                method = %request.method(),
                path = %request.uri().path(),
                request_id = %request_id,
            )
        })
        .on_response(DefaultOnResponse::new().level(Level::INFO))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reuses_correlation_id() {
        let request = Request::builder()
            .header(X_CORRELATION_ID, "corr-42")
            .body(())
            .unwrap();

        let id = MakeCorrelatedId.make_request_id(&request).unwrap();
        assert_eq!(id.header_value(), "corr-42");
    }

    #[test]
    fn test_generates_uuid() {
        let request = Request::builder().body(()).unwrap();

        let id = MakeCorrelatedId.make_request_id(&request).unwrap();
        let value = id.header_value().to_str().unwrap();
        assert!(Uuid::parse_str(value).is_ok());
    }
}
