use super::shutdown::ShutdownCoordinator;
use crate::errors::handlers::{method_not_allowed, not_found};
use crate::http::{create_cors_layer, security_headers};
use axum::{Router, middleware};
use core_config::server::ServerConfig;
use std::future::Future;
use std::io;
use std::time::Duration;
use tower_http::compression::CompressionLayer;
use tower_http::trace::{DefaultMakeSpan, DefaultOnResponse, TraceLayer};
use tracing::{Level, info, warn};
use utoipa::OpenApi;
use utoipa_scalar::{Scalar, Servable};
use utoipa_swagger_ui::SwaggerUi;

/// Wraps the API routes with documentation and cross-cutting middleware.
///
/// - `apis` nested under `/api`
/// - Swagger UI at `/swagger-ui`, Scalar at `/scalar`, OpenAPI JSON at `/api-docs/openapi.json`
/// - JSON 404 for unknown routes and JSON 405 for unsupported methods
/// - request tracing, security headers, CORS (`server_config.cors_allowed_origins`)
///   and response compression
///
/// Domain routers apply their own state before being passed in. Health routes
/// are merged by the app afterwards.
///
/// # Errors
/// Returns `InvalidInput` if a configured CORS origin is invalid.
///
/// # Example
/// ```ignore
/// let apis = Router::new()
///     .nest("/products", domain_products::handlers::router(product_service));
///
/// let router = create_router::<ApiDoc>(apis, &config.app).await?;
/// ```
pub async fn create_router<T>(apis: Router, server_config: &ServerConfig) -> io::Result<Router>
where
    T: OpenApi + 'static,
{
    let cors_layer = create_cors_layer(&server_config.cors_allowed_origins)?;

    let router = Router::new()
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", T::openapi()))
        .merge(Scalar::with_url("/scalar", T::openapi()))
        .nest("/api", apis)
        .fallback(not_found)
        .method_not_allowed_fallback(method_not_allowed)
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(DefaultMakeSpan::new().level(Level::INFO))
                .on_response(DefaultOnResponse::new().level(Level::INFO)),
        )
        .layer(middleware::from_fn(security_headers))
        .layer(cors_layer)
        .layer(CompressionLayer::new());

    Ok(router)
}

/// Serves `router` until SIGINT/SIGTERM, then runs `cleanup`.
///
/// In-flight requests are drained first; `cleanup` (closing the pool) is then
/// given at most `shutdown_timeout`.
///
/// # Example
/// ```ignore
/// let cleanup = async move {
///     if let Err(e) = db.close().await {
///         tracing::error!("Error closing PostgreSQL pool: {}", e);
///     }
/// };
///
/// create_production_app(router, &config.app, Duration::from_secs(30), cleanup).await?;
/// ```
pub async fn create_production_app<F>(
    router: Router,
    server_config: &ServerConfig,
    shutdown_timeout: Duration,
    cleanup: F,
) -> io::Result<()>
where
    F: Future<Output = ()> + Send + 'static,
{
    let coordinator = ShutdownCoordinator::default();

    let listener = tokio::net::TcpListener::bind(server_config.address()).await?;
    info!("Server starting on {}", listener.local_addr()?);

    let signal_handle = {
        let coordinator = coordinator.clone();
        tokio::spawn(async move { coordinator.wait_for_signal().await })
    };

    let serve_result = axum::serve(listener, router.into_make_service())
        .with_graceful_shutdown({
            let coordinator = coordinator.clone();
            async move { coordinator.wait_for_shutdown().await }
        })
        .await
        .inspect_err(|e| {
            tracing::error!("Server encountered an error: {:?}", e);
        });

    // The server may also stop on error, without a signal.
    coordinator.shutdown();
    signal_handle.abort();

    info!("Starting cleanup tasks (timeout: {:?})", shutdown_timeout);
    match tokio::time::timeout(shutdown_timeout, cleanup).await {
        Ok(()) => info!("Cleanup completed successfully"),
        Err(_) => warn!(
            "Cleanup exceeded timeout of {:?}, forcing shutdown",
            shutdown_timeout
        ),
    }

    serve_result
}
