//! Path parameter extractor with `AppError` rejections.

use crate::errors::AppError;
use axum::{
    extract::{FromRequestParts, Path},
    http::request::Parts,
};
use serde::de::DeserializeOwned;

/// Extractor for typed path parameters.
///
/// Behaves like `axum::extract::Path` but a parameter that fails to parse
/// (for example a non-numeric quantity) becomes a 400 `AppError`.
///
/// # Example
/// ```ignore
/// use axum::Router;
/// use axum::routing::put;
/// use axum_helpers::extractors::PathParams;
///
/// async fn restock(PathParams((id, quantity)): PathParams<(String, i32)>) -> String {
///     format!("{} += {}", id, quantity)
/// }
///
/// let app = Router::new().route("/add-to-stock/{id}/{quantity}", put(restock));
/// ```
pub struct PathParams<T>(pub T);

impl<T, S> FromRequestParts<S> for PathParams<T>
where
    T: DeserializeOwned + Send,
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Path(value) = Path::<T>::from_request_parts(parts, state).await?;
        Ok(PathParams(value))
    }
}
