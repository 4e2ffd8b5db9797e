//! Request extraction
//!
//! `ApiJson` and `ApiQuery` wrap axum's extractors so malformed input is
//! reported with the same JSON error body as every other failure.

use axum::{
    Json,
    extract::{FromRequest, FromRequestParts, Query, Request, rejection::JsonRejection},
    http::{StatusCode, request::Parts},
};
use serde::de::DeserializeOwned;

use crate::error::ApiError;

fn json_rejection(rejection: &JsonRejection) -> ApiError {
    if rejection.status() == StatusCode::PAYLOAD_TOO_LARGE {
        ApiError::PayloadTooLarge
    } else {
        ApiError::BadRequest(rejection.body_text())
    }
}

/// JSON body extractor rejecting with [`ApiError`]
#[derive(Debug, Clone, Copy, Default)]
pub struct ApiJson<T>(pub T);

impl<T, S> FromRequest<S> for ApiJson<T>
where
    T: DeserializeOwned,
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(value) = Json::<T>::from_request(req, state)
            .await
            .map_err(|e| json_rejection(&e))?;
        Ok(Self(value))
    }
}

/// Query string extractor rejecting with [`ApiError`]
#[derive(Debug, Clone, Copy, Default)]
pub struct ApiQuery<T>(pub T);

impl<T, S> FromRequestParts<S> for ApiQuery<T>
where
    T: DeserializeOwned,
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Query(value) = Query::<T>::from_request_parts(parts, state)
            .await
            .map_err(|e| ApiError::BadRequest(e.body_text()))?;
        Ok(Self(value))
    }
}

#[cfg(test)]
mod tests {
    use axum::{
        Router,
        body::Body,
        extract::DefaultBodyLimit,
        routing::{get, post},
    };
    use domain::Coordinate;
    use serde::Deserialize;
    use tower::ServiceExt;

    use super::*;

    #[derive(Debug, Deserialize)]
    struct Pin {
        coordinate: Coordinate,
    }

    #[derive(Debug, Deserialize)]
    struct Page {
        zoom: u8,
    }

    async fn pin_handler(ApiJson(pin): ApiJson<Pin>) -> String {
        pin.coordinate.to_string()
    }

    async fn page_handler(ApiQuery(page): ApiQuery<Page>) -> String {
        page.zoom.to_string()
    }

    fn create_test_app() -> Router {
        Router::new()
            .route("/pin", post(pin_handler))
            .route("/page", get(page_handler))
            .layer(DefaultBodyLimit::max(64))
    }

    fn post_json(body: &str) -> axum::http::Request<Body> {
        axum::http::Request::builder()
            .method("POST")
            .uri("/pin")
            .header("content-type", "application/json")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    #[tokio::test]
    async fn valid_body_passes() {
        let response = create_test_app()
            .oneshot(post_json(r#"{"coordinate": {"lat": 1.5, "lon": 2.5}}"#))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn out_of_range_coordinate_rejected() {
        let response = create_test_app()
            .oneshot(post_json(r#"{"coordinate": {"lat": 95.0, "lon": 0.0}}"#))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn invalid_json_rejected() {
        let response = create_test_app()
            .oneshot(post_json(r#"{"coordinate": not json}"#))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn oversized_body_rejected() {
        let padding = "x".repeat(200);
        let body = format!(r#"{{"coordinate": {{"lat": 1, "lon": 2}}, "pad": "{padding}"}}"#);

        let response = create_test_app().oneshot(post_json(&body)).await.unwrap();

        assert_eq!(response.status(), StatusCode::PAYLOAD_TOO_LARGE);
    }

    #[tokio::test]
    async fn malformed_query_rejected() {
        let response = create_test_app()
            .oneshot(
                axum::http::Request::builder()
                    .uri("/page?zoom=high")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }
}
