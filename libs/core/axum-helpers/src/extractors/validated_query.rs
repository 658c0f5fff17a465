//! Query-string extractor with validation using the validator crate.

use super::JsonQuery;
use crate::errors::AppError;
use axum::{extract::FromRequestParts, http::request::Parts};
use serde::de::DeserializeOwned;
use validator::{Validate, ValidationErrors};

/// Deserializes the query string into `T` and runs `T::validate()`.
///
/// Deserialization failures become [`AppError::QueryRejection`]; rule
/// violations become [`AppError::BadRequest`] carrying the first
/// validation message.
///
/// ```ignore
/// #[derive(Deserialize, Validate)]
/// struct NewThing {
///     #[validate(custom(function = "validate_price", message = "price is invalid"))]
///     price: String,
/// }
///
/// async fn create(ValidatedQuery(input): ValidatedQuery<NewThing>) -> StatusCode { .. }
/// ```
pub struct ValidatedQuery<T>(pub T);

impl<T, S> FromRequestParts<S> for ValidatedQuery<T>
where
    T: DeserializeOwned + Validate,
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let JsonQuery(value) = JsonQuery::<T>::from_request_parts(parts, state).await?;

        value
            .validate()
            .map_err(|e| AppError::BadRequest(first_validation_message(&e)))?;

        Ok(ValidatedQuery(value))
    }
}

/// Message of the first failed rule, falling back to the error's Display.
pub fn first_validation_message(errors: &ValidationErrors) -> String {
    errors
        .field_errors()
        .values()
        .flat_map(|errs| errs.iter())
        .find_map(|err| err.message.as_ref().map(|m| m.to_string()))
        .unwrap_or_else(|| errors.to_string())
}
