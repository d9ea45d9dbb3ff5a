//! TTS Engine Port - 语音合成引擎抽象
//!
//! 定义 TTS 合成的抽象接口，具体实现在 infrastructure/adapters 层

use async_trait::async_trait;
use std::collections::BTreeMap;
use thiserror::Error;

/// TTS 错误
#[derive(Debug, Error)]
pub enum TtsError {
    #[error("Network error: {0}")]
    NetworkError(String),

    #[error("Request timeout")]
    Timeout,

    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    #[error("Rate limited: {0}")]
    RateLimited(String),

    #[error("Service error: {0}")]
    ServiceError(String),

    #[error("Invalid response: {0}")]
    InvalidResponse(String),
}

/// TTS 合成请求
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SynthesisRequest {
    /// 要合成的文本内容
    pub text: String,
    /// 提供方的音色 ID
    pub voice_id: String,
}

/// TTS 合成响应
#[derive(Debug, Clone)]
pub struct SynthesisResponse {
    /// 提供方请求 ID（用于追踪）
    pub request_id: Option<String>,
    /// 编码后的音频数据
    pub audio_data: Vec<u8>,
    /// 响应的 Content-Type
    pub content_type: Option<String>,
}

/// 提供方音色信息
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VoiceInfo {
    pub voice_id: String,
    pub name: String,
    pub category: Option<String>,
    pub labels: BTreeMap<String, String>,
}

/// TTS Engine Port
///
/// 外部 TTS 服务的抽象接口
#[async_trait]
pub trait TtsEnginePort: Send + Sync {
    /// 使用指定音色合成一段文本
    async fn synthesize(&self, request: SynthesisRequest) -> Result<SynthesisResponse, TtsError>;

    /// 列出提供方可用的音色
    async fn list_voices(&self) -> Result<Vec<VoiceInfo>, TtsError>;
}
