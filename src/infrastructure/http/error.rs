//! HTTP Error Handling

use axum::{
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;

use crate::application::ApplicationError;

/// 统一错误响应格式
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub errno: i32,
    pub error: String,
    pub data: Option<()>,
}

impl ErrorResponse {
    pub fn new(errno: i32, error: impl Into<String>) -> Self {
        Self {
            errno,
            error: error.into(),
            data: None,
        }
    }
}

/// 错误码定义（与 HTTP 状态码一致）
pub mod errno {
    pub const BAD_REQUEST: i32 = 400;
    pub const NOT_FOUND: i32 = 404;
    pub const PAYLOAD_TOO_LARGE: i32 = 413;
    pub const INTERNAL_ERROR: i32 = 500;
    pub const SERVICE_UNAVAILABLE: i32 = 503;
}

/// API 错误
#[derive(Debug)]
pub enum ApiError {
    BadRequest(String),
    NotFound(String),
    PayloadTooLarge(String),
    Internal(String),
    ServiceUnavailable(String),
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::BadRequest(_) => StatusCode::BAD_REQUEST,
            ApiError::NotFound(_) => StatusCode::NOT_FOUND,
            ApiError::PayloadTooLarge(_) => StatusCode::PAYLOAD_TOO_LARGE,
            ApiError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
            ApiError::ServiceUnavailable(_) => StatusCode::SERVICE_UNAVAILABLE,
        }
    }

    fn errno(&self) -> i32 {
        match self {
            ApiError::BadRequest(_) => errno::BAD_REQUEST,
            ApiError::NotFound(_) => errno::NOT_FOUND,
            ApiError::PayloadTooLarge(_) => errno::PAYLOAD_TOO_LARGE,
            ApiError::Internal(_) => errno::INTERNAL_ERROR,
            ApiError::ServiceUnavailable(_) => errno::SERVICE_UNAVAILABLE,
        }
    }

    fn message(&self) -> &str {
        match self {
            ApiError::BadRequest(msg)
            | ApiError::NotFound(msg)
            | ApiError::PayloadTooLarge(msg)
            | ApiError::Internal(msg)
            | ApiError::ServiceUnavailable(msg) => msg,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        let errno = self.errno();

        match &self {
            ApiError::BadRequest(msg) => {
                tracing::warn!(errno = errno, error = %msg, "Bad request");
            }
            ApiError::NotFound(msg) => {
                tracing::warn!(errno = errno, error = %msg, "Resource not found");
            }
            ApiError::PayloadTooLarge(msg) => {
                tracing::warn!(errno = errno, error = %msg, "Payload too large");
            }
            ApiError::Internal(msg) => {
                tracing::error!(errno = errno, error = %msg, "Internal server error");
            }
            ApiError::ServiceUnavailable(msg) => {
                tracing::error!(errno = errno, error = %msg, "Service unavailable");
            }
        }

        let body = ErrorResponse::new(errno, self.message());
        (status, Json(body)).into_response()
    }
}

impl From<ApplicationError> for ApiError {
    fn from(e: ApplicationError) -> Self {
        match e {
            ApplicationError::ValidationError(msg) => ApiError::BadRequest(msg),
            ApplicationError::ExternalServiceError(msg) => ApiError::ServiceUnavailable(msg),
            ApplicationError::InternalError(msg) => ApiError::Internal(msg),
        }
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        let message = format!("Invalid JSON body: {}", rejection.body_text());
        if rejection.status() == StatusCode::PAYLOAD_TOO_LARGE {
            ApiError::PayloadTooLarge(message)
        } else {
            ApiError::BadRequest(message)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_application_error_mapping() {
        let err: ApiError = ApplicationError::validation("topic must not be empty").into();
        assert_eq!(err.status(), StatusCode::BAD_REQUEST);

        let err: ApiError = ApplicationError::external("quota exceeded").into();
        assert_eq!(err.status(), StatusCode::SERVICE_UNAVAILABLE);

        let err: ApiError = ApplicationError::internal("decoder failed").into();
        assert_eq!(err.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[test]
    fn test_error_body_shape() {
        let body = serde_json::to_value(ErrorResponse::new(errno::BAD_REQUEST, "bad")).unwrap();
        assert_eq!(body["errno"], 400);
        assert_eq!(body["error"], "bad");
        assert!(body["data"].is_null());
    }
}
