use axum::response::{IntoResponse, Response};
use axum_helpers::{extractors::first_validation_message, AppError};
use thiserror::Error;
use validator::ValidationErrors;

#[derive(Debug, Error)]
pub enum ProductError {
    #[error("{0}")]
    NotFound(String),

    #[error("Product with id: {0} already exists")]
    AlreadyExists(i64),

    #[error("{0}")]
    Validation(String),

    #[error("Database error: {0}")]
    Database(String),
}

pub type ProductResult<T> = Result<T, ProductError>;

impl ProductError {
    pub(crate) fn not_found(message: &str) -> Self {
        ProductError::NotFound(message.to_string())
    }

    pub(crate) fn validation(message: impl Into<String>) -> Self {
        ProductError::Validation(message.into())
    }
}

/// Convert ProductError to AppError for standardized error responses.
///
/// A duplicate id is reported as 400, not 409.
impl From<ProductError> for AppError {
    fn from(err: ProductError) -> Self {
        match err {
            ProductError::NotFound(msg) => AppError::NotFound(msg),
            err @ ProductError::AlreadyExists(_) => AppError::BadRequest(err.to_string()),
            ProductError::Validation(msg) => AppError::BadRequest(msg),
            ProductError::Database(msg) => AppError::Database(msg),
        }
    }
}

impl IntoResponse for ProductError {
    fn into_response(self) -> Response {
        let app_error: AppError = self.into();
        app_error.into_response()
    }
}

impl From<mongodb::error::Error> for ProductError {
    fn from(err: mongodb::error::Error) -> Self {
        ProductError::Database(err.to_string())
    }
}

impl From<ValidationErrors> for ProductError {
    fn from(errors: ValidationErrors) -> Self {
        ProductError::Validation(first_validation_message(&errors))
    }
}
