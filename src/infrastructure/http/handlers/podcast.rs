//! Podcast HTTP Handlers

use axum::{
    body::Body,
    extract::{rejection::JsonRejection, State},
    http::{header, HeaderName, StatusCode},
    response::Response,
    Json,
};
use std::sync::Arc;

use crate::application::{GeneratePodcastAudioCommand, SegmentInput};
use crate::infrastructure::http::dto::GenerateAudioRequest;
use crate::infrastructure::http::error::ApiError;
use crate::infrastructure::http::state::AppState;

/// 参与拼接的片段数
pub static X_PODCAST_SEGMENTS: HeaderName = HeaderName::from_static("x-podcast-segments");
/// 音频时长（毫秒），仅在已知时返回
pub static X_PODCAST_DURATION_MS: HeaderName = HeaderName::from_static("x-podcast-duration-ms");

/// 合成完整播客音频，直接返回二进制流
pub async fn generate_audio(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<GenerateAudioRequest>, JsonRejection>,
) -> Result<Response, ApiError> {
    let Json(req) = payload?;

    let cmd = GeneratePodcastAudioCommand {
        segments: req.segments.into_iter().map(SegmentInput::from).collect(),
    };
    let audio = state.generate_audio_handler.handle(cmd).await?;

    let mut builder = Response::builder()
        .status(StatusCode::OK)
        .header(header::CONTENT_TYPE, audio.content_type())
        .header(header::CONTENT_LENGTH, audio.data.len())
        .header(
            header::CONTENT_DISPOSITION,
            format!("inline; filename=\"podcast.{}\"", audio.format.extension()),
        )
        .header(&X_PODCAST_SEGMENTS, audio.segment_count);

    if let Some(duration_ms) = audio.duration_ms {
        builder = builder.header(&X_PODCAST_DURATION_MS, duration_ms);
    }

    builder
        .body(Body::from(audio.data))
        .map_err(|e| ApiError::Internal(format!("Failed to build audio response: {}", e)))
}
