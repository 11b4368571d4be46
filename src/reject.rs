// Custom rejections and the recovery handler that maps them to JSON errors

use std::convert::Infallible;

use serde_json::json;
use warp::http::StatusCode;
use warp::{Rejection, Reply};

use crate::models::FieldError;
use crate::store;

/// Rejection raised when a submission fails field validation.
#[derive(Debug)]
pub struct ValidationFailure {
    pub errors: Vec<FieldError>,
}

impl warp::reject::Reject for ValidationFailure {}

/// Rejection raised when the message store returns an error.
#[derive(Debug)]
pub struct StoreFailure(pub store::Error);

impl warp::reject::Reject for StoreFailure {}

/// Map every rejection onto the shared `{"detail": ...}` envelope. Store
/// failures are logged here with their cause; the client only ever sees a
/// generic 500.
pub async fn handle_rejection(err: Rejection) -> Result<impl Reply, Infallible> {
    let (status, body) = if err.is_not_found() {
        (StatusCode::NOT_FOUND, json!({ "detail": "Not Found" }))
    } else if err.find::<warp::reject::MissingHeader>().is_some()
        || err.find::<warp::reject::InvalidHeader>().is_some()
    {
        // Only the upgrade endpoint requires headers; a plain HTTP request
        // there matches no route.
        (StatusCode::NOT_FOUND, json!({ "detail": "Not Found" }))
    } else if let Some(failure) = err.find::<ValidationFailure>() {
        (
            StatusCode::UNPROCESSABLE_ENTITY,
            json!({ "detail": failure.errors }),
        )
    } else if let Some(e) = err.find::<warp::filters::body::BodyDeserializeError>() {
        (
            StatusCode::UNPROCESSABLE_ENTITY,
            json!({ "detail": [FieldError::body("json_invalid", e.to_string())] }),
        )
    } else if err.find::<warp::reject::UnsupportedMediaType>().is_some() {
        (
            StatusCode::UNSUPPORTED_MEDIA_TYPE,
            json!({ "detail": "Unsupported Media Type" }),
        )
    } else if err.find::<warp::reject::MethodNotAllowed>().is_some() {
        (
            StatusCode::METHOD_NOT_ALLOWED,
            json!({ "detail": "Method Not Allowed" }),
        )
    } else if let Some(StoreFailure(e)) = err.find::<StoreFailure>() {
        tracing::error!(error = %e, "message store failure");
        (
            StatusCode::INTERNAL_SERVER_ERROR,
            json!({ "detail": "Internal server error" }),
        )
    } else {
        tracing::error!(rejection = ?err, "unhandled rejection");
        (
            StatusCode::INTERNAL_SERVER_ERROR,
            json!({ "detail": "Internal server error" }),
        )
    };

    Ok(warp::reply::with_status(warp::reply::json(&body), status))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_not_found_maps_to_404() {
        let reply = handle_rejection(warp::reject::not_found()).await.unwrap();
        let response = reply.into_response();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_validation_failure_maps_to_422() {
        let rejection = warp::reject::custom(ValidationFailure {
            errors: vec![FieldError::field("author", "string_too_short", "too short")],
        });
        let reply = handle_rejection(rejection).await.unwrap();
        let response = reply.into_response();
        assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
    }

    #[tokio::test]
    async fn test_store_failure_maps_to_500() {
        let rejection = warp::reject::custom(StoreFailure(store::Error::Connection(
            "refused".to_string(),
        )));
        let reply = handle_rejection(rejection).await.unwrap();
        let response = reply.into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }
}
