//! Data Transfer Objects

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::application::{SegmentInput, VoiceInfo};
use crate::domain::script::{ScriptResult, Segment};

// ============================================================================
// Service DTOs
// ============================================================================

#[derive(Debug, Serialize)]
pub struct WelcomeResponse {
    pub message: &'static str,
}

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub version: &'static str,
}

// ============================================================================
// Script DTOs
// ============================================================================

#[derive(Debug, Deserialize)]
pub struct GenerateScriptRequest {
    pub topic: String,
}

/// 请求与响应共用的片段格式
///
/// speaker 以字符串接收，由应用层校验
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SegmentDto {
    pub speaker: String,
    pub text: String,
}

impl From<&Segment> for SegmentDto {
    fn from(segment: &Segment) -> Self {
        Self {
            speaker: segment.speaker.label().to_string(),
            text: segment.text.clone(),
        }
    }
}

impl From<SegmentDto> for SegmentInput {
    fn from(dto: SegmentDto) -> Self {
        SegmentInput::new(dto.speaker, dto.text)
    }
}

#[derive(Debug, Serialize)]
pub struct ScriptResponse {
    pub raw_script_text: String,
    pub segments: Vec<SegmentDto>,
}

impl From<ScriptResult> for ScriptResponse {
    fn from(result: ScriptResult) -> Self {
        let segments = result.segments().iter().map(SegmentDto::from).collect();
        let (raw_script_text, _) = result.into_parts();
        Self {
            raw_script_text,
            segments,
        }
    }
}

// ============================================================================
// Podcast DTOs
// ============================================================================

#[derive(Debug, Deserialize)]
pub struct GenerateAudioRequest {
    pub segments: Vec<SegmentDto>,
}

// ============================================================================
// Voice DTOs
// ============================================================================

#[derive(Debug, Serialize)]
pub struct VoiceResponse {
    pub voice_id: String,
    pub name: String,
    pub category: Option<String>,
    pub labels: BTreeMap<String, String>,
}

impl From<VoiceInfo> for VoiceResponse {
    fn from(voice: VoiceInfo) -> Self {
        Self {
            voice_id: voice.voice_id,
            name: voice.name,
            category: voice.category,
            labels: voice.labels,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct VoicesResponse {
    pub voices: Vec<VoiceResponse>,
}
