//! Custom extractors for Axum handlers.
//!
//! Every extractor here rejects with [`AppError`](crate::errors::AppError), so
//! malformed input ends up in the same error body as domain failures.

pub mod path;
pub mod validated_json;
pub mod validated_query;

pub use path::PathParams;
pub use validated_json::ValidatedJson;
pub use validated_query::ValidatedQuery;
