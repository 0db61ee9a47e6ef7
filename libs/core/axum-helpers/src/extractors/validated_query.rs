//! Query string extractor with validation.

use crate::errors::AppError;
use axum::{
    extract::{FromRequestParts, Query},
    http::request::Parts,
};
use serde::de::DeserializeOwned;
use validator::Validate;

/// Like `Query<T>`, but rejects with the standard JSON error body.
///
/// - unparseable query string: 400 `BAD_REQUEST`
/// - `T::validate` failure: 400 `VALIDATION_ERROR`
#[derive(Debug, Clone)]
pub struct ValidatedQuery<T>(pub T);

impl<T, S> FromRequestParts<S> for ValidatedQuery<T>
where
    T: DeserializeOwned + Validate,
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Query(params) = Query::<T>::from_request_parts(parts, state)
            .await
            .map_err(|e| AppError::BadRequest(e.body_text()))?;
        params.validate()?;

        Ok(ValidatedQuery(params))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{Router, body::Body, http::Request, http::StatusCode, routing::get};
    use serde::Deserialize;
    use tower::ServiceExt;

    #[derive(Deserialize, Validate)]
    struct Page {
        #[validate(range(min = 1, max = 100))]
        limit: Option<u64>,
    }

    fn app() -> Router {
        Router::new().route(
            "/",
            get(|ValidatedQuery(p): ValidatedQuery<Page>| async move {
                p.limit.unwrap_or_default().to_string()
            }),
        )
    }

    async fn status_for(uri: &str) -> StatusCode {
        app()
            .oneshot(Request::get(uri).body(Body::empty()).unwrap())
            .await
            .unwrap()
            .status()
    }

    #[tokio::test]
    async fn test_query_accepted() {
        assert_eq!(status_for("/?limit=10").await, StatusCode::OK);
        assert_eq!(status_for("/").await, StatusCode::OK);
    }

    #[tokio::test]
    async fn test_unparseable_query_is_bad_request() {
        assert_eq!(status_for("/?limit=ten").await, StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_out_of_range_is_bad_request() {
        assert_eq!(status_for("/?limit=0").await, StatusCode::BAD_REQUEST);
    }
}
