use axum::response::{IntoResponse, Response};

use super::AppError;

/// Handler for 404 Not Found errors.
///
/// This can be used as a fallback handler in your router.
pub async fn not_found() -> Response {
    AppError::NotFound("The requested resource was not found.".to_string()).into_response()
}
