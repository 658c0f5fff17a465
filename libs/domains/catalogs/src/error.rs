use axum::response::{IntoResponse, Response};
use axum_helpers::AppError;
use domain_products::ProductError;
use thiserror::Error;

use crate::models::InvalidProductId;

#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("{0}")]
    NotFound(String),

    #[error("Catalog with id: {0} already exists")]
    AlreadyExists(i64),

    #[error("{0}")]
    Validation(String),

    #[error("Database error: {0}")]
    Database(String),

    /// Failure while looking up referenced products
    #[error(transparent)]
    Product(#[from] ProductError),
}

pub type CatalogResult<T> = Result<T, CatalogError>;

impl CatalogError {
    pub(crate) fn not_found(message: &str) -> Self {
        CatalogError::NotFound(message.to_string())
    }
}

impl From<CatalogError> for AppError {
    fn from(err: CatalogError) -> Self {
        match err {
            CatalogError::NotFound(msg) => AppError::NotFound(msg),
            err @ CatalogError::AlreadyExists(_) => AppError::BadRequest(err.to_string()),
            CatalogError::Validation(msg) => AppError::BadRequest(msg),
            CatalogError::Database(msg) => AppError::Database(msg),
            CatalogError::Product(err) => err.into(),
        }
    }
}

impl IntoResponse for CatalogError {
    fn into_response(self) -> Response {
        let app_error: AppError = self.into();
        app_error.into_response()
    }
}

impl From<mongodb::error::Error> for CatalogError {
    fn from(err: mongodb::error::Error) -> Self {
        CatalogError::Database(err.to_string())
    }
}

impl From<InvalidProductId> for CatalogError {
    fn from(err: InvalidProductId) -> Self {
        CatalogError::Validation(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_already_exists_is_bad_request() {
        let app: AppError = CatalogError::AlreadyExists(3).into();
        assert!(matches!(app, AppError::BadRequest(msg) if msg == "Catalog with id: 3 already exists"));
    }

    #[test]
    fn test_product_lookup_failure_keeps_database_mapping() {
        let app: AppError = CatalogError::from(ProductError::Database("down".into())).into();
        assert!(matches!(app, AppError::Database(_)));
    }
}
