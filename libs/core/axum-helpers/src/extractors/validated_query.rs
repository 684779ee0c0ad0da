//! Query string extractor with validation.

use crate::errors::AppError;
use axum::{
    extract::{FromRequestParts, Query},
    http::request::Parts,
};
use serde::de::DeserializeOwned;
use validator::Validate;

/// Query extractor that runs `Validate` after deserializing.
///
/// Used for paging parameters where out-of-range values must be rejected
/// rather than clamped.
pub struct ValidatedQuery<T>(pub T);

impl<T, S> FromRequestParts<S> for ValidatedQuery<T>
where
    T: DeserializeOwned + Validate,
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Query(value) = Query::<T>::from_request_parts(parts, state).await?;
        value.validate()?;
        Ok(ValidatedQuery(value))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{
        Router,
        body::Body,
        http::{Request, StatusCode},
        routing::get,
    };
    use serde::Deserialize;
    use tower::ServiceExt;

    #[derive(Deserialize, Validate)]
    struct Paging {
        #[validate(range(min = 1))]
        page: u64,
    }

    async fn handler(ValidatedQuery(paging): ValidatedQuery<Paging>) -> String {
        paging.page.to_string()
    }

    async fn status_for(uri: &str) -> StatusCode {
        let app = Router::new().route("/", get(handler));
        let request = Request::builder().uri(uri).body(Body::empty()).unwrap();
        app.oneshot(request).await.unwrap().status()
    }

    #[tokio::test]
    async fn test_query_validation() {
        assert_eq!(status_for("/?page=2").await, StatusCode::OK);
        assert_eq!(status_for("/?page=0").await, StatusCode::BAD_REQUEST);
        assert_eq!(status_for("/?page=abc").await, StatusCode::BAD_REQUEST);
    }
}
