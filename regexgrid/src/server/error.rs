// regexgrid/src/server/error.rs
//! Maps `TransformError` onto HTTP responses.
//!
//! Client-side failures become `400 {"detail": ...}`; anything unexpected becomes
//! `500 {"error": ...}`.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use log::{error, warn};
use serde_json::json;
use thiserror::Error;

use regexgrid_core::TransformError;

#[derive(Debug, Error)]
#[error(transparent)]
pub struct ApiError(pub TransformError);

impl ApiError {
    pub fn input(message: impl Into<String>) -> Self {
        ApiError(TransformError::Input(message.into()))
    }
}

impl From<TransformError> for ApiError {
    fn from(err: TransformError) -> Self {
        ApiError(err)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        match self.0 {
            TransformError::Unexpected(err) => {
                error!("Request failed unexpectedly: {:#}", err);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    Json(json!({ "error": err.to_string() })),
                )
                    .into_response()
            }
            other => {
                warn!("Rejected request: {}", other);
                (
                    StatusCode::BAD_REQUEST,
                    Json(json!({ "detail": other.to_string() })),
                )
                    .into_response()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use http_body_util::BodyExt;

    async fn body_json(resp: Response) -> serde_json::Value {
        let bytes = resp.into_body().collect().await.unwrap().to_bytes();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[tokio::test]
    async fn test_client_errors_are_400_detail() {
        let resp = ApiError(TransformError::PatternCompile("unclosed group".into())).into_response();
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
        assert_eq!(body_json(resp).await, json!({"detail": "Invalid regex: unclosed group"}));
    }

    #[tokio::test]
    async fn test_unexpected_errors_are_500_error() {
        let resp = ApiError(TransformError::Unexpected(anyhow::anyhow!("disk full"))).into_response();
        assert_eq!(resp.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body_json(resp).await, json!({"error": "disk full"}));
    }
}
