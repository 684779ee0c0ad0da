//! HTTP middleware module.
//!
//! - Exception handling with correlation ids
//! - CORS configuration
//! - Security headers
//!
//! # Example
//!
//! ```ignore
//! use axum_helpers::middleware::{exception_handling, security_headers};
//!
//! let app = Router::new()
//!     .layer(axum::middleware::from_fn(security_headers))
//!     .layer(axum::middleware::from_fn(exception_handling));
//! ```

pub mod cors;
pub mod exception;
pub mod security;

pub use cors::{create_cors_layer, parse_allowed_origins};
pub use exception::{CorrelationId, REQUEST_ID_HEADER, exception_handling, handle_panic};
pub use security::security_headers;
