//! Application route configuration.

use std::time::Duration;

use axum::{middleware, routing::get, Router};
use tower::ServiceBuilder;
use tower_http::{
    catch_panic::CatchPanicLayer,
    request_id::{PropagateRequestIdLayer, SetRequestIdLayer},
    timeout::TimeoutLayer,
};
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use super::handlers::{api_health, auth_routes, health_check, user_routes};
use super::middleware::{
    cors_layer, error_envelope, handle_panic, request_id, trace_layer, MakeCorrelatedId,
};
use super::openapi::ApiDoc;
use super::AppState;
use crate::errors::AppError;

/// Create the application router with all routes configured
pub fn create_router(state: AppState) -> Router {
    let api = Router::new()
        .route("/health", get(api_health))
        .nest("/users", user_routes())
        .nest("/auth", auth_routes());

    let routes = Router::new()
        .route("/health", get(health_check))
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
        .nest("/api", api);

    with_middleware(routes, state)
}

/// Attach the 404 fallback and the shared middleware stack to `routes`.
pub fn with_middleware(routes: Router<AppState>, state: AppState) -> Router {
    // Outermost first
    let layers = ServiceBuilder::new()
        .layer(SetRequestIdLayer::new(request_id::header(), MakeCorrelatedId))
        .layer(PropagateRequestIdLayer::new(request_id::header()))
        .layer(cors_layer(&state.config))
        .layer(middleware::from_fn_with_state(state.clone(), error_envelope))
        .layer(trace_layer())
        .layer(CatchPanicLayer::custom(handle_panic))
        .layer(TimeoutLayer::new(Duration::from_secs(
            state.config.request_timeout_secs,
        )));

    routes
        .fallback(route_not_found)
        .layer(layers)
        .with_state(state)
}

async fn route_not_found() -> AppError {
    AppError::RouteNotFound
}
