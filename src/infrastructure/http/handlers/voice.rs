//! Voice HTTP Handlers

use axum::{extract::State, Json};
use std::sync::Arc;

use crate::application::ListVoices;
use crate::infrastructure::http::dto::{VoiceResponse, VoicesResponse};
use crate::infrastructure::http::error::ApiError;
use crate::infrastructure::http::state::AppState;

/// 列出 TTS 提供方的可用音色（调试用）
pub async fn list_voices(
    State(state): State<Arc<AppState>>,
) -> Result<Json<VoicesResponse>, ApiError> {
    let voices = state.list_voices_handler.handle(ListVoices).await?;

    Ok(Json(VoicesResponse {
        voices: voices.into_iter().map(VoiceResponse::from).collect(),
    }))
}
