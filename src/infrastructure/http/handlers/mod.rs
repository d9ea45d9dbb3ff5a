//! HTTP Handlers

mod ping;
mod podcast;
mod script;
mod voice;

pub use ping::*;
pub use podcast::*;
pub use script::*;
pub use voice::*;

use crate::infrastructure::http::error::ApiError;

/// 未知路由
pub async fn not_found(uri: axum::http::Uri) -> ApiError {
    ApiError::NotFound(format!("No route for {}", uri.path()))
}
