use axum::response::{IntoResponse, Response};
use axum_helpers::AppError;
use sea_orm::DbErr;
use thiserror::Error;
use validator::ValidationErrors;

#[derive(Debug, Error)]
pub enum ProductError {
    #[error("Product with ID {0} not found.")]
    NotFound(String),

    #[error("Insufficient stock. Available: {available}, requested: {requested}.")]
    InsufficientStock { available: i32, requested: i32 },

    #[error("Quantity must be at least 1, got {0}.")]
    InvalidQuantity(i32),

    #[error("Adding {requested} units to stock of {available} exceeds the maximum stock level.")]
    StockOverflow { available: i32, requested: i32 },

    #[error("Product ID {0} is already in use")]
    DuplicateId(String),

    #[error("Could not allocate a unique product ID.")]
    IdExhausted,

    #[error("Invalid input: {0}")]
    Validation(#[from] ValidationErrors),

    #[error("Database error: {0}")]
    Database(String),
}

pub type ProductResult<T> = Result<T, ProductError>;

/// Convert ProductError to AppError for standardized error responses
impl From<ProductError> for AppError {
    fn from(err: ProductError) -> Self {
        match err {
            ProductError::NotFound(_) => AppError::NotFound(err.to_string()),
            ProductError::InsufficientStock { .. }
            | ProductError::InvalidQuantity(_)
            | ProductError::StockOverflow { .. } => AppError::BadRequest(err.to_string()),
            ProductError::DuplicateId(_) | ProductError::IdExhausted => {
                AppError::Conflict(err.to_string())
            }
            ProductError::Validation(errors) => AppError::Validation(errors),
            ProductError::Database(msg) => AppError::InternalServerError(msg),
        }
    }
}

impl IntoResponse for ProductError {
    fn into_response(self) -> Response {
        let app_error: AppError = self.into();
        app_error.into_response()
    }
}

impl From<DbErr> for ProductError {
    fn from(err: DbErr) -> Self {
        ProductError::Database(err.to_string())
    }
}
