//! Uniform success envelopes.
//!
//! Every successful response carries its status code and a human-readable
//! message next to the payload:
//!
//! ```json
//! { "statusCode": 200, "message": "Product retrieved successfully.", "data": { ... } }
//! ```

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Envelope for a single resource (or no payload at all)
#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ApiResponse<T> {
    pub status_code: u16,
    pub message: String,
    pub data: Option<T>,
}

impl<T> ApiResponse<T> {
    pub fn new(status: StatusCode, message: impl Into<String>, data: Option<T>) -> Self {
        Self {
            status_code: status.as_u16(),
            message: message.into(),
            data,
        }
    }

    /// 200 with a payload
    pub fn ok(message: impl Into<String>, data: T) -> Self {
        Self::new(StatusCode::OK, message, Some(data))
    }

    /// 201 with the created resource
    pub fn created(message: impl Into<String>, data: T) -> Self {
        Self::new(StatusCode::CREATED, message, Some(data))
    }

    /// 200 with `data: null`, for operations that only report success
    pub fn message(message: impl Into<String>) -> Self {
        Self::new(StatusCode::OK, message, None)
    }

    pub fn status(&self) -> StatusCode {
        StatusCode::from_u16(self.status_code).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR)
    }
}

impl<T: Serialize> IntoResponse for ApiResponse<T> {
    fn into_response(self) -> Response {
        (self.status(), Json(self)).into_response()
    }
}

/// Envelope for one page of a collection
#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ApiPagedResponse<T> {
    pub status_code: u16,
    pub message: String,
    pub data: Vec<T>,
    pub page: u64,
    pub page_size: u64,
    pub total_count: u64,
    pub total_pages: u64,
}

impl<T> ApiPagedResponse<T> {
    pub fn new(
        message: impl Into<String>,
        data: Vec<T>,
        page: u64,
        page_size: u64,
        total_count: u64,
    ) -> Self {
        Self {
            status_code: StatusCode::OK.as_u16(),
            message: message.into(),
            data,
            page,
            page_size,
            total_count,
            total_pages: total_pages(total_count, page_size),
        }
    }
}

impl<T: Serialize> IntoResponse for ApiPagedResponse<T> {
    fn into_response(self) -> Response {
        (StatusCode::OK, Json(self)).into_response()
    }
}

/// `ceil(total_count / page_size)`; zero when the page size is zero
pub fn total_pages(total_count: u64, page_size: u64) -> u64 {
    if page_size == 0 {
        return 0;
    }
    total_count.div_ceil(page_size)
}

#[cfg(test)]
mod tests {
    use super::*;
    use http_body_util::BodyExt;

    #[test]
    fn test_total_pages_rounds_up() {
        assert_eq!(total_pages(0, 10), 0);
        assert_eq!(total_pages(10, 10), 1);
        assert_eq!(total_pages(11, 10), 2);
        assert_eq!(total_pages(5, 0), 0);
    }

    #[tokio::test]
    async fn test_created_envelope_sets_status_and_camel_case() {
        let response = ApiResponse::created("Product created successfully.", 42).into_response();
        assert_eq!(response.status(), StatusCode::CREATED);

        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        let json: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(json["statusCode"], 201);
        assert_eq!(json["message"], "Product created successfully.");
        assert_eq!(json["data"], 42);
    }

    #[tokio::test]
    async fn test_message_envelope_has_null_data() {
        let response = ApiResponse::<()>::message("Product deleted successfully.").into_response();
        assert_eq!(response.status(), StatusCode::OK);

        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        let json: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
        assert!(json["data"].is_null());
    }

    #[test]
    fn test_paged_envelope_serializes_paging_fields() {
        let page = ApiPagedResponse::new("Products retrieved successfully.", vec![1, 2], 2, 2, 5);
        let json = serde_json::to_value(&page).unwrap();

        assert_eq!(json["page"], 2);
        assert_eq!(json["pageSize"], 2);
        assert_eq!(json["totalCount"], 5);
        assert_eq!(json["totalPages"], 3);
    }
}
