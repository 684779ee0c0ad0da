//! # Axum Helpers
//!
//! Shared HTTP plumbing for the API services.
//!
//! ## Modules
//!
//! - **[`server`]**: Router setup, health checks, graceful shutdown
//! - **[`middleware`]**: Exception handling with correlation ids, CORS, security headers
//! - **[`errors`]**: `AppError` and the standard error body
//! - **[`envelope`]**: `ApiResponse` / `ApiPagedResponse` success envelopes
//! - **[`extractors`]**: Validated JSON and query extractors, typed path parameters
//!
//! ## Quick Start
//!
//! ```ignore
//! use axum::Router;
//! use axum_helpers::middleware::parse_allowed_origins;
//! use axum_helpers::server::{create_production_app, create_router};
//! use core_config::server::ServerConfig;
//! use utoipa::OpenApi;
//!
//! #[derive(OpenApi)]
//! #[openapi(paths())]
//! struct ApiDoc;
//!
//! #[tokio::main]
//! async fn main() -> std::io::Result<()> {
//!     let api_routes = Router::new(); // Add your routes
//!     let origins = parse_allowed_origins("http://localhost:3000")?;
//!     let router = create_router::<ApiDoc>(api_routes, origins);
//!
//!     create_production_app(router, &ServerConfig::default(), async {}).await
//! }
//! ```

pub mod envelope;
pub mod errors;
pub mod extractors;
pub mod middleware;
pub mod server;

pub use envelope::{ApiPagedResponse, ApiResponse};
pub use errors::{AppError, ErrorDetails, ErrorResponse};
pub use extractors::{PathParams, ValidatedJson, ValidatedQuery};
pub use middleware::{CorrelationId, exception_handling, security_headers};
pub use server::{
    HealthCheckFuture, ShutdownCoordinator, create_production_app, create_router, health_router,
    run_health_checks,
};
