//! HTTP Routes
//!
//! API Endpoints:
//! - /                    GET   欢迎信息
//! - /api/health          GET   健康检查
//! - /api/script          POST  根据主题生成脚本
//! - /api/podcast/audio   POST  合成播客音频（二进制）
//! - /api/voices          GET   列出提供方音色

use axum::{
    routing::{get, post},
    Router,
};
use std::sync::Arc;

use super::handlers;
use super::state::AppState;

/// 创建所有路由
pub fn create_routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/", get(handlers::welcome))
        .nest("/api", api_routes())
        .fallback(handlers::not_found)
}

/// API 路由
fn api_routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/health", get(handlers::health))
        .route("/script", post(handlers::generate_script))
        .route("/podcast/audio", post(handlers::generate_audio))
        .route("/voices", get(handlers::list_voices))
}
