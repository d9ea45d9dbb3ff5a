//! Ping Handlers
//!
//! 欢迎页与健康检查

use axum::Json;

use crate::infrastructure::http::dto::{HealthResponse, WelcomeResponse};

/// 根路径欢迎信息
pub async fn welcome() -> Json<WelcomeResponse> {
    Json(WelcomeResponse {
        message: "Welcome to the AI Podcast Generator Backend!",
    })
}

/// Health endpoint - 存活检查，不访问任何提供方
pub async fn health() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "Backend is running!",
        version: env!("CARGO_PKG_VERSION"),
    })
}
