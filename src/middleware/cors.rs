//! CORS policy: explicit origin allow-list, every origin in development.

use std::time::Duration;

use axum::http::{
    header::{AUTHORIZATION, CONTENT_TYPE},
    request::Parts,
    HeaderName, HeaderValue, Method,
};
use tower_http::cors::{AllowOrigin, CorsLayer};

use crate::config::AppConfig;

const X_REQUESTED_WITH: HeaderName = HeaderName::from_static("x-requested-with");

/// Build the CORS layer. A matching origin is echoed back; pre-flight
/// requests are answered by the layer itself with 200 and an empty body.
pub fn cors_layer(config: &AppConfig) -> CorsLayer {
    let allowed: Vec<HeaderValue> = config
        .allowed_origins
        .iter()
        .filter_map(|origin| HeaderValue::from_str(origin).ok())
        .collect();
    let allow_any = config.environment.is_development();

    CorsLayer::new()
        .allow_origin(AllowOrigin::predicate(
            move |origin: &HeaderValue, _parts: &Parts| allow_any || allowed.contains(origin),
        ))
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::DELETE,
            Method::PATCH,
            Method::OPTIONS,
        ])
        .allow_headers([CONTENT_TYPE, AUTHORIZATION, X_REQUESTED_WITH])
        .allow_credentials(true)
        .max_age(Duration::from_secs(24 * 60 * 60))
}
