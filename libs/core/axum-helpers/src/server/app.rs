use super::shutdown::ShutdownCoordinator;
use crate::errors::handlers::not_found;
use crate::middleware::{create_cors_layer, exception_handling, handle_panic, security_headers};
use axum::{Router, http::HeaderValue, middleware};
use core_config::server::ServerConfig;
use std::future::Future;
use std::io;
use std::time::Duration;
use tower_http::catch_panic::CatchPanicLayer;
use tower_http::compression::CompressionLayer;
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::{DefaultMakeSpan, DefaultOnResponse, TraceLayer};
use tracing::{Level, info, warn};
use utoipa::OpenApi;

/// Requests running longer than this are answered with 408
pub const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// Creates a configured Axum router with common middleware and documentation.
///
/// This function sets up:
/// - OpenAPI documentation (Swagger UI, ReDoc, RapiDoc, Scalar)
/// - API routes nested under `/api`
/// - 404 fallback rendered as the standard error body
/// - Middleware, innermost first: panic catching, request timeout, request
///   tracing, exception handling (correlation ids), security headers, CORS,
///   compression
///
/// Health endpoints (/health, /ready) are merged by the app afterwards so
/// probes bypass the API middleware.
///
/// # Example
/// ```ignore
/// use axum_helpers::middleware::parse_allowed_origins;
/// use axum_helpers::server::create_router;
///
/// let origins = parse_allowed_origins("http://localhost:3000")?;
/// let router = create_router::<ApiDoc>(api_routes, origins);
/// ```
pub fn create_router<T>(apis: Router, allowed_origins: Vec<HeaderValue>) -> Router
where
    T: OpenApi + 'static,
{
    use utoipa_rapidoc::RapiDoc;
    use utoipa_redoc::{Redoc, Servable as RedocServable};
    use utoipa_scalar::{Scalar, Servable as ScalarServable};
    use utoipa_swagger_ui::SwaggerUi;

    info!(
        origins = allowed_origins.len(),
        "CORS configured with allowed origins"
    );

    Router::new()
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", T::openapi()))
        .merge(Redoc::with_url("/redoc", T::openapi()))
        .merge(RapiDoc::new("/api-docs/openapi.json").path("/rapidoc"))
        .merge(Scalar::with_url("/scalar", T::openapi()))
        .nest("/api", apis)
        .fallback(not_found)
        .layer(CatchPanicLayer::custom(handle_panic))
        .layer(TimeoutLayer::new(REQUEST_TIMEOUT))
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(DefaultMakeSpan::new().level(Level::INFO))
                .on_response(DefaultOnResponse::new().level(Level::INFO)),
        )
        .layer(middleware::from_fn(exception_handling))
        .layer(middleware::from_fn(security_headers))
        .layer(create_cors_layer(allowed_origins))
        .layer(CompressionLayer::new())
}

/// Serve `router` until SIGINT/SIGTERM, then drain and run `cleanup`.
///
/// In-flight requests finish first; `cleanup` (closing the database pool,
/// for instance) then gets `server_config.shutdown_timeout` to complete before
/// it is abandoned.
///
/// # Example
/// ```ignore
/// use axum_helpers::server::create_production_app;
///
/// create_production_app(router, &config, async move {
///     database::postgres::close(db).await;
/// })
/// .await?;
/// ```
pub async fn create_production_app<F>(
    router: Router,
    server_config: &ServerConfig,
    cleanup: F,
) -> io::Result<()>
where
    F: Future<Output = ()> + Send + 'static,
{
    let coordinator = ShutdownCoordinator::new();
    let signal_coordinator = coordinator.clone();
    let signal_handle = tokio::spawn(async move { signal_coordinator.wait_for_signal().await });

    let listener = tokio::net::TcpListener::bind(server_config.address()).await?;
    info!("Server starting on {}", listener.local_addr()?);

    let drain = coordinator.clone();
    let serve_result = axum::serve(listener, router.into_make_service())
        .with_graceful_shutdown(async move { drain.wait().await })
        .await
        .inspect_err(|e| {
            tracing::error!("Server encountered an error: {:?}", e);
        });

    signal_handle.abort();

    let shutdown_timeout = server_config.shutdown_timeout;
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
