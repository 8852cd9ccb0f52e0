use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use basketbridge_core::CoreError;
use serde_json::json;
use thiserror::Error;

/// Every failure a request can surface. All of them render as a structured
/// `{"error": ...}` body; none carry credentials, endpoints, or stack traces.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("Query is required")]
    MissingQuery,

    #[error("Method not allowed")]
    MethodNotAllowed,

    #[error("Invalid passcode")]
    InvalidPasscode,

    #[error("Azure OpenAI configuration missing")]
    ConfigMissing,

    #[error("Azure OpenAI API error: {0}")]
    Upstream(u16),

    #[error("{0}")]
    BadParameter(String),

    #[error("Internal server error")]
    Internal,
}

impl ApiError {
    fn status(&self) -> StatusCode {
        match self {
            ApiError::MissingQuery | ApiError::BadParameter(_) => StatusCode::BAD_REQUEST,
            ApiError::MethodNotAllowed => StatusCode::METHOD_NOT_ALLOWED,
            ApiError::InvalidPasscode => StatusCode::UNAUTHORIZED,
            ApiError::ConfigMissing | ApiError::Upstream(_) | ApiError::Internal => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        match &self {
            ApiError::ConfigMissing => {
                log::error!("Azure OpenAI configuration missing");
            }
            ApiError::Upstream(status) => {
                log::error!("Azure OpenAI API error: upstream returned {status}");
            }
            ApiError::Internal => {
                log::error!("Internal error while processing query");
            }
            _ => {}
        }

        let body = Json(json!({ "error": self.to_string() }));
        (self.status(), body).into_response()
    }
}

impl From<CoreError> for ApiError {
    fn from(err: CoreError) -> Self {
        match err {
            CoreError::InvalidParameter(msg) => ApiError::BadParameter(msg),
            other => {
                log::error!("Core error: {other}");
                ApiError::Internal
            }
        }
    }
}

impl From<reqwest::Error> for ApiError {
    fn from(err: reqwest::Error) -> Self {
        // Transport failures (DNS, connect, timeout) are unexpected faults,
        // distinct from a non-success status the upstream actually returned.
        log::error!("Upstream transport failure: {err}");
        ApiError::Internal
    }
}
