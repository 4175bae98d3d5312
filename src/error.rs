// Error types: upstream fetch failures and handler-boundary errors

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};

/// Failure of one upstream call. Call sites degrade these to a default value.
#[derive(Debug, thiserror::Error)]
pub enum FetchError {
    #[error("upstream request failed: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("upstream responded with HTTP {0}")]
    Status(reqwest::StatusCode),
    /// HTTP 200 carrying an error code or message in the body.
    #[error("upstream reported an error: {0}")]
    Logical(String),
    #[error("malformed upstream response: {0}")]
    Decode(#[from] serde_json::Error),
}

/// Errors that reach the HTTP boundary.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("{0}")]
    BadRequest(String),
    #[error("{0:#}")]
    Internal(#[from] anyhow::Error),
}

impl AppError {
    /// 400 for a missing request parameter, logged the way every handler reports it.
    pub fn missing(param: &str) -> Self {
        let msg = format!("parameter '{param}' is empty!");
        tracing::warn!("{}", msg);
        Self::BadRequest(msg)
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        match self {
            AppError::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg).into_response(),
            AppError::Internal(e) => {
                tracing::error!(error = ?e, "request failed");
                (StatusCode::INTERNAL_SERVER_ERROR, format!("{e:#}")).into_response()
            }
        }
    }
}
