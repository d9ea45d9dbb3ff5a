//! Fake TTS Client - 离线 TTS 客户端
//!
//! 不调用任何 TTS 服务，每段返回一小段静音 MP3

use async_trait::async_trait;
use std::collections::BTreeMap;
use std::sync::atomic::{AtomicUsize, Ordering};

use crate::application::ports::{
    SynthesisRequest, SynthesisResponse, TtsEnginePort, TtsError, VoiceInfo,
};
use crate::domain::{DEFAULT_GUEST_VOICE_ID, DEFAULT_HOST_VOICE_ID};

/// MPEG-1 Layer III, 128 kbps, 44.1 kHz, joint stereo, 无填充
const SILENT_FRAME_HEADER: [u8; 4] = [0xFF, 0xFB, 0x90, 0x64];
/// 144 * 128000 / 44100
const SILENT_FRAME_LEN: usize = 417;

/// 生成 `frames` 个静音 MP3 帧
pub fn silent_mp3(frames: usize) -> Vec<u8> {
    let mut data = Vec::with_capacity(frames * SILENT_FRAME_LEN);
    for _ in 0..frames {
        data.extend_from_slice(&SILENT_FRAME_HEADER);
        data.resize(data.len() + SILENT_FRAME_LEN - SILENT_FRAME_HEADER.len(), 0);
    }
    data
}

/// Fake TTS Client
///
/// 用于本地开发和测试；可配置为始终失败
pub struct FakeTtsClient {
    audio_data: Vec<u8>,
    failure: Option<String>,
    calls: AtomicUsize,
}

impl FakeTtsClient {
    /// 每次合成都返回给定音频
    pub fn new(audio_data: Vec<u8>) -> Self {
        Self {
            audio_data,
            failure: None,
            calls: AtomicUsize::new(0),
        }
    }

    /// 每段返回 `frames` 帧静音 MP3
    pub fn with_silence(frames: usize) -> Self {
        Self::new(silent_mp3(frames))
    }

    /// 每次合成都以 ServiceError 失败
    pub fn failing(message: impl Into<String>) -> Self {
        Self {
            audio_data: Vec::new(),
            failure: Some(message.into()),
            calls: AtomicUsize::new(0),
        }
    }

    /// 已收到的合成请求数
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

impl Default for FakeTtsClient {
    fn default() -> Self {
        Self::with_silence(8)
    }
}

fn fake_voice(voice_id: &str, name: &str) -> VoiceInfo {
    let mut labels = BTreeMap::new();
    labels.insert("source".to_string(), "fake".to_string());
    VoiceInfo {
        voice_id: voice_id.to_string(),
        name: name.to_string(),
        category: Some("premade".to_string()),
        labels,
    }
}

#[async_trait]
impl TtsEnginePort for FakeTtsClient {
    async fn synthesize(&self, request: SynthesisRequest) -> Result<SynthesisResponse, TtsError> {
        let call = self.calls.fetch_add(1, Ordering::SeqCst);

        tracing::debug!(
            call = call,
            text_len = request.text.len(),
            voice_id = %request.voice_id,
            "FakeTtsClient: returning fixed audio"
        );

        if let Some(message) = &self.failure {
            return Err(TtsError::ServiceError(message.clone()));
        }

        Ok(SynthesisResponse {
            request_id: Some(format!("fake-{}", uuid::Uuid::new_v4())),
            audio_data: self.audio_data.clone(),
            content_type: Some("audio/mpeg".to_string()),
        })
    }

    async fn list_voices(&self) -> Result<Vec<VoiceInfo>, TtsError> {
        if let Some(message) = &self.failure {
            return Err(TtsError::ServiceError(message.clone()));
        }
        Ok(vec![
            fake_voice(DEFAULT_HOST_VOICE_ID, "Rachel"),
            fake_voice(DEFAULT_GUEST_VOICE_ID, "Adam"),
        ])
    }
}
