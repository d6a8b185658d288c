//! API error type with the flat `{ "error": string }` wire shape the web
//! client renders.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;

use crate::pipeline::AnalysisError;

/// Error body returned to the browser client.
#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub error: String,
}

#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error("{0}")]
    BadRequest(String),

    #[error(transparent)]
    Analysis(#[from] AnalysisError),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match &self {
            ApiError::BadRequest(detail) => (StatusCode::BAD_REQUEST, detail.clone()),
            ApiError::Analysis(err) => {
                tracing::error!(error = %err, "Exam analysis failed");
                (StatusCode::INTERNAL_SERVER_ERROR, err.to_string())
            }
        };

        (status, Json(ErrorBody { error: message })).into_response()
    }
}

#[cfg(test)]
mod tests {
    use axum::body::to_bytes;

    use super::*;

    #[tokio::test]
    async fn bad_request_returns_400_with_flat_body() {
        let response = ApiError::BadRequest("Nenhum arquivo enviado".into()).into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let body = to_bytes(response.into_body(), 1024).await.unwrap();
        let json: serde_json::Value = serde_json::from_slice(&body).unwrap();
        assert_eq!(json["error"], "Nenhum arquivo enviado");
    }

    #[tokio::test]
    async fn analysis_error_returns_500_with_the_last_error_message() {
        let err = AnalysisError::Upstream {
            status: 503,
            body: "model overloaded".into(),
        };
        let response = ApiError::Analysis(err).into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        let body = to_bytes(response.into_body(), 1024).await.unwrap();
        let json: serde_json::Value = serde_json::from_slice(&body).unwrap();
        let message = json["error"].as_str().unwrap();
        assert!(message.contains("503"), "message: {message}");
        assert!(message.contains("model overloaded"), "message: {message}");
    }

    #[tokio::test]
    async fn analysis_error_converts_via_from() {
        let api_err: ApiError = AnalysisError::NoModelSucceeded.into();
        let response = api_err.into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }
}
