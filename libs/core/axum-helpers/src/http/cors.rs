use axum::http::{HeaderValue, Method, header};
use std::io;
use std::time::Duration;
use tower_http::cors::{AllowOrigin, CorsLayer};
use tracing::{info, warn};

/// Creates the CORS layer for the configured origins.
///
/// An empty list allows any origin, which is only meant for local development.
///
/// # Errors
/// Returns `InvalidInput` if an origin is not a valid header value.
pub fn create_cors_layer(origins: &[String]) -> io::Result<CorsLayer> {
    if origins.is_empty() {
        warn!("No CORS origins configured, allowing any origin");
        return Ok(CorsLayer::permissive());
    }

    let allowed_origins = origins
        .iter()
        .map(|s| s.trim())
        .filter(|s| !s.is_empty())
        .map(HeaderValue::from_str)
        .collect::<Result<Vec<_>, _>>()
        .map_err(|e| {
            io::Error::new(
                io::ErrorKind::InvalidInput,
                format!("Invalid CORS origin: {}", e),
            )
        })?;

    info!("CORS configured with allowed origins: {}", origins.join(","));

    Ok(CorsLayer::new()
        .allow_origin(AllowOrigin::list(allowed_origins))
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::DELETE,
            Method::OPTIONS,
        ])
        .allow_headers([header::CONTENT_TYPE, header::ACCEPT])
        .max_age(Duration::from_secs(3600)))
}
