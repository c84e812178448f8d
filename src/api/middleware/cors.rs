//! CORS policy built from configuration.

use std::time::Duration;

use axum::http::{HeaderName, HeaderValue, Method};
use tower_http::cors::{AllowHeaders, AllowMethods, AllowOrigin, CorsLayer};

use crate::config::Config;

/// Build the CORS layer.
///
/// Credentials are allowed, so a `*` entry in any list mirrors the
/// preflight request instead of sending a literal wildcard.
pub fn cors_layer(config: &Config) -> CorsLayer {
    let origin = if is_wildcard(&config.cors_allowed_origins) {
        AllowOrigin::mirror_request()
    } else {
        AllowOrigin::list(parse_all::<HeaderValue>(&config.cors_allowed_origins))
    };

    let methods = if is_wildcard(&config.cors_allowed_methods) {
        AllowMethods::mirror_request()
    } else {
        AllowMethods::list(parse_all::<Method>(&config.cors_allowed_methods))
    };

    let headers = if is_wildcard(&config.cors_allowed_headers) {
        AllowHeaders::mirror_request()
    } else {
        AllowHeaders::list(parse_all::<HeaderName>(&config.cors_allowed_headers))
    };

    CorsLayer::new()
        .allow_origin(origin)
        .allow_methods(methods)
        .allow_headers(headers)
        .allow_credentials(true)
        .max_age(Duration::from_secs(86400))
}

fn is_wildcard(values: &[String]) -> bool {
    values.iter().any(|v| v == "*")
}

fn parse_all<T: std::str::FromStr>(values: &[String]) -> Vec<T> {
    values
        .iter()
        .filter_map(|v| match v.parse() {
            Ok(parsed) => Some(parsed),
            Err(_) => {
                tracing::warn!(value = %v, "Ignoring invalid CORS entry");
                None
            }
        })
        .collect()
}
