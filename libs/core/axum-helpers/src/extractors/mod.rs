//! Custom extractors for Axum handlers.

pub mod json_query;
pub mod validated_query;

pub use json_query::JsonQuery;
pub use validated_query::{ValidatedQuery, first_validation_message};
