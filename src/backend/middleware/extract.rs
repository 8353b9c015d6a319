/**
 * Request Extractors
 *
 * Wrappers around axum's `Json`, `Query` and `Path` whose rejections are
 * `BackendError`s. A malformed body, query string or path parameter is
 * answered with the usual `{"error": "...", "status": 400}` body instead
 * of axum's plain-text rejection.
 */

use axum::extract::{FromRequest, FromRequestParts};

use crate::backend::error::BackendError;

/// JSON request body
#[derive(Debug, FromRequest)]
#[from_request(via(axum::Json), rejection(BackendError))]
pub struct ApiJson<T>(pub T);

/// Query string
#[derive(Debug, FromRequestParts)]
#[from_request(via(axum::extract::Query), rejection(BackendError))]
pub struct ApiQuery<T>(pub T);

/// Path parameters
#[derive(Debug, FromRequestParts)]
#[from_request(via(axum::extract::Path), rejection(BackendError))]
pub struct ApiPath<T>(pub T);

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Body;
    use axum::http::{header::CONTENT_TYPE, Request, StatusCode};
    use serde::Deserialize;

    use crate::shared::scouting::{AdvertisementQuery, Position};

    #[derive(Debug, Deserialize)]
    struct PositionBody {
        position: Position,
    }

    #[tokio::test]
    async fn test_json_rejection_is_bad_request() {
        let request = Request::builder()
            .method("POST")
            .uri("/")
            .header(CONTENT_TYPE, "application/json")
            .body(Body::from(r#"{"position":"libero"}"#))
            .unwrap();

        let err = ApiJson::<PositionBody>::from_request(request, &())
            .await
            .unwrap_err();
        assert_eq!(err.status_code(), StatusCode::BAD_REQUEST);
        assert!(err.message().contains("libero"));
    }

    #[tokio::test]
    async fn test_json_accepts_valid_body() {
        let request = Request::builder()
            .method("POST")
            .uri("/")
            .header(CONTENT_TYPE, "application/json")
            .body(Body::from(r#"{"position":"striker"}"#))
            .unwrap();

        let ApiJson(body) = ApiJson::<PositionBody>::from_request(request, &())
            .await
            .unwrap();
        assert_eq!(body.position, Position::Striker);
    }

    #[tokio::test]
    async fn test_query_rejection_is_bad_request() {
        let request = Request::builder()
            .uri("/?sort=cheapest")
            .body(())
            .unwrap();
        let (mut parts, _) = request.into_parts();

        let err = ApiQuery::<AdvertisementQuery>::from_request_parts(&mut parts, &())
            .await
            .unwrap_err();
        assert_eq!(err.status_code(), StatusCode::BAD_REQUEST);
    }
}
