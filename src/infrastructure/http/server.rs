//! HTTP Server
//!
//! Axum HTTP 服务器启动和配置

use std::sync::Arc;

use axum::extract::DefaultBodyLimit;
use axum::middleware;
use axum::Router;
use http::header::CONTENT_TYPE;
use http::{HeaderValue, Method};
use tokio::net::TcpListener;
use tower_http::cors::{AllowOrigin, Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::info;

use super::handlers::{X_PODCAST_DURATION_MS, X_PODCAST_SEGMENTS};
use super::middleware::{error_logging_middleware, request_id_middleware, X_REQUEST_ID};
use super::routes::create_routes;
use super::state::AppState;
use crate::config::ServerConfig;

/// CORS 配置：未指定来源时允许任意来源
fn cors_layer(origin: Option<&str>) -> CorsLayer {
    let allow_origin = match origin.map(HeaderValue::from_str) {
        Some(Ok(value)) => AllowOrigin::exact(value),
        Some(Err(e)) => {
            tracing::warn!(error = %e, "Invalid CORS origin, allowing any origin");
            AllowOrigin::from(Any)
        }
        None => AllowOrigin::from(Any),
    };

    CorsLayer::new()
        .allow_origin(allow_origin)
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers([CONTENT_TYPE])
        .expose_headers([
            X_PODCAST_SEGMENTS.clone(),
            X_PODCAST_DURATION_MS.clone(),
            X_REQUEST_ID.clone(),
        ])
        .max_age(std::time::Duration::from_secs(3600))
}

/// 构建 Router
pub fn build_router(state: Arc<AppState>, config: &ServerConfig) -> Router {
    create_routes()
        .layer(DefaultBodyLimit::max(config.max_body_bytes))
        .layer(middleware::from_fn(error_logging_middleware))
        .layer(middleware::from_fn(request_id_middleware))
        .layer(TraceLayer::new_for_http())
        .layer(cors_layer(config.cors_origin.as_deref()))
        .with_state(state)
}

/// HTTP 服务器
pub struct HttpServer {
    config: ServerConfig,
    state: Arc<AppState>,
}

impl HttpServer {
    /// 创建新的 HTTP 服务器
    pub fn new(config: ServerConfig, state: AppState) -> Self {
        Self {
            config,
            state: Arc::new(state),
        }
    }

    /// 启动服务器（带优雅关闭）
    pub async fn run_with_shutdown<F>(self, shutdown_signal: F) -> Result<(), std::io::Error>
    where
        F: std::future::Future<Output = ()> + Send + 'static,
    {
        let router = build_router(self.state.clone(), &self.config);
        let addr = self.config.addr();

        info!("Starting HTTP server on {} (with graceful shutdown)", addr);

        let listener = TcpListener::bind(&addr).await?;
        axum::serve(listener, router)
            .with_graceful_shutdown(shutdown_signal)
            .await?;

        Ok(())
    }
}
