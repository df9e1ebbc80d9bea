//! HTTP 错误映射

use axum::extract::rejection::JsonRejection;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;
use thiserror::Error;

use bd_core::BrainDashError;

pub const NO_TOKEN_MESSAGE: &str = "No token provided. Authorization denied.";
pub const INVALID_TOKEN_MESSAGE: &str = "Invalid or expired token. Authorization denied.";

/// 接口层错误，渲染为 `{ "message": ... }`
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("{0}")]
    BadRequest(String),

    #[error("{0}")]
    Unauthorized(String),

    #[error("{0}")]
    NotFound(String),

    #[error("{0}")]
    Conflict(String),

    #[error("{0}")]
    Internal(String),
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::BadRequest(_) => StatusCode::BAD_REQUEST,
            ApiError::Unauthorized(_) => StatusCode::UNAUTHORIZED,
            ApiError::NotFound(_) => StatusCode::NOT_FOUND,
            ApiError::Conflict(_) => StatusCode::CONFLICT,
            ApiError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl From<BrainDashError> for ApiError {
    fn from(err: BrainDashError) -> Self {
        match err {
            BrainDashError::InvalidInput(msg) => ApiError::BadRequest(msg),
            BrainDashError::Unauthorized(msg) if msg == "Invalid credentials" => {
                ApiError::Unauthorized(msg)
            }
            BrainDashError::Unauthorized(_) => ApiError::Unauthorized(NO_TOKEN_MESSAGE.to_string()),
            BrainDashError::Token(_) => ApiError::Unauthorized(INVALID_TOKEN_MESSAGE.to_string()),
            BrainDashError::NotFound(msg) => ApiError::NotFound(msg),
            BrainDashError::Conflict(msg) => ApiError::Conflict(msg),
            other => ApiError::Internal(other.to_string()),
        }
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        ApiError::BadRequest(rejection.body_text())
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        let message = match self {
            ApiError::Internal(detail) => {
                tracing::error!(%detail, "Request failed");
                "Server error".to_string()
            }
            other => other.to_string(),
        };
        (status, Json(json!({ "message": message }))).into_response()
    }
}
