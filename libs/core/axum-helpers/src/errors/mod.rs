pub mod handlers;
pub mod responses;

use axum::{
    Json,
    extract::rejection::{JsonRejection, PathRejection, QueryRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;
use thiserror::Error;
use utoipa::ToSchema;
use validator::ValidationErrors;

/// Message returned to clients for any 5xx; the cause is only logged.
pub const INTERNAL_ERROR_MESSAGE: &str = "An unexpected error occurred.";

/// Message returned when field validation fails.
pub const VALIDATION_FAILED_MESSAGE: &str = "One or more validation errors occurred.";

/// Standard error response structure.
///
/// Every failed request ends with this body, whatever layer produced the
/// error. `correlationId` is filled in by the exception middleware.
///
/// # JSON Example
///
/// ```json
/// {
///   "statusCode": 404,
///   "message": "Product with ID 123456 not found.",
///   "correlationId": "6f1c7a4e-1a5b-4b37-9a43-61d1e4e0d2c3"
/// }
/// ```
#[derive(Clone, Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ErrorResponse {
    /// HTTP status code, repeated from the status line
    pub status_code: u16,
    /// Human-readable error message
    pub message: String,
    /// Per-request trace token, also sent as the `x-request-id` header
    #[serde(skip_serializing_if = "Option::is_none")]
    pub correlation_id: Option<String>,
    /// Field-level validation errors, keyed by field name
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<serde_json::Value>,
}

/// Error metadata carried as a response extension.
///
/// `AppError::into_response` attaches it so the exception middleware can
/// render the final body and log the failure with the request's correlation id.
#[derive(Clone, Debug)]
pub struct ErrorDetails {
    pub status: StatusCode,
    pub message: String,
    pub details: Option<serde_json::Value>,
    /// Internal cause, logged but never sent to the client
    pub source: Option<String>,
}

impl ErrorDetails {
    /// Details for a bare status produced outside `AppError` (405, 408, ...)
    pub fn from_status(status: StatusCode) -> Self {
        let message = if status.is_server_error() {
            INTERNAL_ERROR_MESSAGE.to_string()
        } else {
            status
                .canonical_reason()
                .unwrap_or("Request failed")
                .to_string()
        };

        Self {
            status,
            message,
            details: None,
            source: None,
        }
    }

    pub fn to_body(&self, correlation_id: Option<String>) -> ErrorResponse {
        ErrorResponse {
            status_code: self.status.as_u16(),
            message: self.message.clone(),
            correlation_id,
            details: self.details.clone(),
        }
    }
}

/// Application error type that can be converted to HTTP responses.
///
/// Domain crates convert their own error enums into this type; it is the only
/// error representation handlers hand to axum.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum AppError {
    #[error("JSON extraction error: {0}")]
    JsonExtractorRejection(#[from] JsonRejection),

    #[error("Query string error: {0}")]
    QueryRejection(#[from] QueryRejection),

    #[error("Path parameter error: {0}")]
    PathRejection(#[from] PathRejection),

    #[error("Validation error: {0}")]
    Validation(#[from] ValidationErrors),

    #[error("Bad Request: {0}")]
    BadRequest(String),

    #[error("Not Found: {0}")]
    NotFound(String),

    #[error("Conflict: {0}")]
    Conflict(String),

    #[error("Internal Server Error: {0}")]
    InternalServerError(String),
}

impl AppError {
    pub fn status(&self) -> StatusCode {
        match self {
            AppError::JsonExtractorRejection(JsonRejection::MissingJsonContentType(_)) => {
                StatusCode::UNSUPPORTED_MEDIA_TYPE
            }
            AppError::JsonExtractorRejection(_)
            | AppError::QueryRejection(_)
            | AppError::PathRejection(_)
            | AppError::Validation(_)
            | AppError::BadRequest(_) => StatusCode::BAD_REQUEST,
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::Conflict(_) => StatusCode::CONFLICT,
            AppError::InternalServerError(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Split into what the client sees and what only the logs see
    pub fn into_details(self) -> ErrorDetails {
        let status = self.status();
        let (message, details, source) = match self {
            AppError::JsonExtractorRejection(e) => (e.body_text(), None, None),
            AppError::QueryRejection(e) => (e.body_text(), None, None),
            AppError::PathRejection(e) => (e.body_text(), None, None),
            AppError::Validation(e) => (
                VALIDATION_FAILED_MESSAGE.to_string(),
                Some(validation_details(&e)),
                None,
            ),
            AppError::BadRequest(msg) | AppError::NotFound(msg) | AppError::Conflict(msg) => {
                (msg, None, None)
            }
            AppError::InternalServerError(msg) => {
                (INTERNAL_ERROR_MESSAGE.to_string(), None, Some(msg))
            }
        };

        ErrorDetails {
            status,
            message,
            details,
            source,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let details = self.into_details();
        let mut response = (details.status, Json(details.to_body(None))).into_response();
        response.extensions_mut().insert(details);
        response
    }
}

/// Convert validator errors to `{ field: [{code, message, params}] }`.
///
/// Field names are reported in camelCase to match the JSON payloads.
pub fn validation_details(errors: &ValidationErrors) -> serde_json::Value {
    let details = errors
        .field_errors()
        .iter()
        .map(|(field, errors)| {
            let error_messages: Vec<serde_json::Value> = errors
                .iter()
                .map(|err| {
                    serde_json::json!({
                        "code": err.code,
                        "message": err.message,
                        "params": err.params,
                    })
                })
                .collect();
            (camel_case(field), serde_json::json!(error_messages))
        })
        .collect::<serde_json::Map<_, _>>();

    serde_json::Value::Object(details)
}

fn camel_case(field: &str) -> String {
    let mut out = String::with_capacity(field.len());
    let mut upper = false;
    for c in field.chars() {
        if c == '_' {
            upper = true;
        } else if upper {
            out.extend(c.to_uppercase());
            upper = false;
        } else {
            out.push(c);
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use http_body_util::BodyExt;
    use validator::Validate;

    #[derive(Validate)]
    struct Input {
        #[validate(range(min = 1))]
        stock_available: i32,
    }

    async fn body_json(response: Response) -> serde_json::Value {
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[tokio::test]
    async fn test_not_found_renders_message_and_status() {
        let response = AppError::NotFound("Product with ID 123456 not found.".into()).into_response();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        assert!(response.extensions().get::<ErrorDetails>().is_some());

        let json = body_json(response).await;
        assert_eq!(json["statusCode"], 404);
        assert_eq!(json["message"], "Product with ID 123456 not found.");
    }

    #[tokio::test]
    async fn test_internal_error_hides_cause() {
        let response = AppError::InternalServerError("connection reset".into()).into_response();
        let details = response.extensions().get::<ErrorDetails>().cloned().unwrap();
        assert_eq!(details.source.as_deref(), Some("connection reset"));

        let json = body_json(response).await;
        assert_eq!(json["statusCode"], 500);
        assert_eq!(json["message"], INTERNAL_ERROR_MESSAGE);
    }

    #[test]
    fn test_validation_details_use_camel_case_fields() {
        let errors = Input { stock_available: 0 }.validate().unwrap_err();
        let details = AppError::Validation(errors).into_details();

        assert_eq!(details.status, StatusCode::BAD_REQUEST);
        let fields = details.details.unwrap();
        assert_eq!(fields["stockAvailable"][0]["code"], "range");
    }

    #[test]
    fn test_from_status_uses_canonical_reason() {
        let details = ErrorDetails::from_status(StatusCode::METHOD_NOT_ALLOWED);
        assert_eq!(details.message, "Method Not Allowed");

        let details = ErrorDetails::from_status(StatusCode::BAD_GATEWAY);
        assert_eq!(details.message, INTERNAL_ERROR_MESSAGE);
    }

    #[test]
    fn test_camel_case() {
        assert_eq!(camel_case("stock_available"), "stockAvailable");
        assert_eq!(camel_case("price"), "price");
    }
}
