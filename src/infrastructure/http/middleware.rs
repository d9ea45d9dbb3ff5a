//! HTTP Middleware
//!
//! 请求 ID 与状态码错误日志中间件

use axum::{
    extract::Request,
    http::{HeaderName, HeaderValue},
    middleware::Next,
    response::Response,
};
use std::time::Instant;

/// 请求 ID 头
pub static X_REQUEST_ID: HeaderName = HeaderName::from_static("x-request-id");

/// 请求 ID 中间件
///
/// 沿用客户端传入的 `x-request-id`，否则生成 uuid v4，并回写到响应头
pub async fn request_id_middleware(mut request: Request, next: Next) -> Response {
    let request_id = request
        .headers()
        .get(&X_REQUEST_ID)
        .filter(|v| !v.is_empty())
        .cloned()
        .or_else(|| HeaderValue::from_str(&uuid::Uuid::new_v4().to_string()).ok());

    if let Some(id) = &request_id {
        request.headers_mut().insert(X_REQUEST_ID.clone(), id.clone());
    }

    let mut response = next.run(request).await;

    if let Some(id) = request_id {
        response.headers_mut().insert(X_REQUEST_ID.clone(), id);
    }
    response
}

/// HTTP 状态码错误日志中间件
///
/// 拦截 HTTP 响应，当状态码为 4xx 或 5xx 时记录日志
/// 业务错误详情在 ApiError::into_response() 中记录
pub async fn error_logging_middleware(request: Request, next: Next) -> Response {
    let method = request.method().clone();
    let uri = request.uri().clone();
    let request_id = request
        .headers()
        .get(&X_REQUEST_ID)
        .and_then(|v| v.to_str().ok())
        .unwrap_or("-")
        .to_string();
    let started = Instant::now();

    let response = next.run(request).await;
    let status = response.status();
    let latency_ms = started.elapsed().as_millis() as u64;

    if status.is_server_error() {
        tracing::error!(
            method = %method,
            uri = %uri,
            request_id = %request_id,
            status = %status.as_u16(),
            latency_ms = latency_ms,
            "HTTP server error"
        );
    } else if status.is_client_error() {
        tracing::warn!(
            method = %method,
            uri = %uri,
            request_id = %request_id,
            status = %status.as_u16(),
            latency_ms = latency_ms,
            "HTTP client error"
        );
    }

    response
}
