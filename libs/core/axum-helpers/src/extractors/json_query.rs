//! Query-string extractor whose rejections use the JSON error body.

use crate::errors::AppError;
use axum::{
    extract::{FromRequestParts, Query},
    http::request::Parts,
};
use serde::de::DeserializeOwned;

/// Same as [`Query`], but a malformed query string is rejected with
/// [`AppError::QueryRejection`], so the client gets an `ErrorResponse`.
///
/// ```ignore
/// async fn get_by_id(JsonQuery(query): JsonQuery<IdQuery>) -> Response { .. }
/// ```
pub struct JsonQuery<T>(pub T);

impl<T, S> FromRequestParts<S> for JsonQuery<T>
where
    T: DeserializeOwned,
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Query(value) = Query::<T>::from_request_parts(parts, state).await?;
        Ok(JsonQuery(value))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::to_bytes;
    use axum::http::{Request, StatusCode};
    use axum::response::IntoResponse;
    use serde::Deserialize;

    #[derive(Debug, Deserialize)]
    struct IdQuery {
        id: i64,
    }

    async fn extract(uri: &str) -> Result<JsonQuery<IdQuery>, AppError> {
        let (mut parts, _) = Request::builder().uri(uri).body(()).unwrap().into_parts();
        JsonQuery::<IdQuery>::from_request_parts(&mut parts, &()).await
    }

    #[tokio::test]
    async fn test_parses_query() {
        let JsonQuery(query) = extract("/x?id=7").await.unwrap();
        assert_eq!(query.id, 7);
    }

    #[tokio::test]
    async fn test_bad_value_is_json_400() {
        let err = extract("/x?id=abc").await.err().unwrap();
        assert!(matches!(err, AppError::QueryRejection(_)));

        let response = err.into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);

        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let body: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(body["error"], "INVALID_QUERY");
        assert_eq!(body["code"], 1003);
    }
}
