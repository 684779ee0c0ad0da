//! Reusable OpenAPI response types for consistent API documentation.

use super::ErrorResponse;
#[allow(unused_imports)]
use serde_json::json;
use utoipa::ToResponse;

#[derive(ToResponse)]
#[response(
    description = "Internal Server Error",
    content_type = "application/json",
    example = json!({
        "statusCode": 500,
        "message": "An unexpected error occurred.",
        "correlationId": "6f1c7a4e-1a5b-4b37-9a43-61d1e4e0d2c3"
    })
)]
pub struct InternalServerErrorResponse(pub ErrorResponse);

#[derive(ToResponse)]
#[response(
    description = "Bad Request - Validation Error",
    content_type = "application/json",
    example = json!({
        "statusCode": 400,
        "message": "One or more validation errors occurred.",
        "correlationId": "6f1c7a4e-1a5b-4b37-9a43-61d1e4e0d2c3",
        "details": {
            "price": [{
                "code": "range",
                "message": "Price must be between 0.01 and 999999.99.",
                "params": {"min": 0.01, "max": 999999.99, "value": 0.0}
            }]
        }
    })
)]
pub struct BadRequestValidationResponse(pub ErrorResponse);

#[derive(ToResponse)]
#[response(
    description = "Bad Request - Rejected operation",
    content_type = "application/json",
    example = json!({
        "statusCode": 400,
        "message": "Insufficient stock. Available: 5, requested: 999.",
        "correlationId": "6f1c7a4e-1a5b-4b37-9a43-61d1e4e0d2c3"
    })
)]
pub struct BadRequestResponse(pub ErrorResponse);

#[derive(ToResponse)]
#[response(
    description = "Resource not found",
    content_type = "application/json",
    example = json!({
        "statusCode": 404,
        "message": "Product with ID 123456 not found.",
        "correlationId": "6f1c7a4e-1a5b-4b37-9a43-61d1e4e0d2c3"
    })
)]
pub struct NotFoundResponse(pub ErrorResponse);

#[derive(ToResponse)]
#[response(
    description = "Conflict - Resource already exists",
    content_type = "application/json",
    example = json!({
        "statusCode": 409,
        "message": "Could not allocate a unique product ID.",
        "correlationId": "6f1c7a4e-1a5b-4b37-9a43-61d1e4e0d2c3"
    })
)]
pub struct ConflictResponse(pub ErrorResponse);
