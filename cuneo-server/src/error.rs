//! Mapping from internal failures to HTTP responses.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use cuneo_core::UpstreamError;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::warn;
use utoipa::ToSchema;

/// Body of every error response.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ErrorBody {
    pub detail: String,
}

#[derive(Debug, Error)]
pub enum ApiError {
    #[error(transparent)]
    Upstream(#[from] UpstreamError),
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            // Every upstream failure is a 500 for now, whatever its kind.
            ApiError::Upstream(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        match &self {
            ApiError::Upstream(err) => warn!(
                upstream = %err.upstream(),
                kind = err.kind(),
                error = %err,
                "upstream call failed"
            ),
        }

        (self.status(), Json(ErrorBody { detail: self.to_string() })).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use cuneo_core::Upstream;

    #[tokio::test]
    async fn upstream_errors_become_500_with_detail() {
        let err = ApiError::from(UpstreamError::Rejected {
            upstream: Upstream::OpenAi,
            status: StatusCode::TOO_MANY_REQUESTS,
            message: "Rate limit reached".to_string(),
        });

        let response = err.into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);

        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let body: ErrorBody = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(body.detail, "OpenAI responded with status 429 Too Many Requests: Rate limit reached");
    }
}
