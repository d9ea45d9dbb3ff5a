//! ElevenLabs TTS Client - 调用 ElevenLabs HTTP 服务
//!
//! 实现 TtsEnginePort trait
//!
//! 外部 TTS API:
//! POST {base_url}/v1/text-to-speech/{voice_id}?output_format=mp3_44100_128
//! Header: xi-api-key
//! Request: {"text": "...", "model_id": "..."}  (JSON)
//! Response: audio/mpeg binary, request id in headers
//!
//! GET {base_url}/v1/voices
//! Response: {"voices": [{"voice_id": "...", "name": "...", "category": "...", "labels": {...}}]}

use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::time::Duration;

use crate::application::ports::{
    SynthesisRequest, SynthesisResponse, TtsEnginePort, TtsError, VoiceInfo,
};

const XI_API_KEY_HEADER: &str = "xi-api-key";

/// TTS 合成请求体 (JSON)
#[derive(Debug, Serialize)]
struct TextToSpeechBody<'a> {
    text: &'a str,
    model_id: &'a str,
}

#[derive(Debug, Deserialize)]
struct VoicesResponse {
    #[serde(default)]
    voices: Vec<VoiceEntry>,
}

#[derive(Debug, Deserialize)]
struct VoiceEntry {
    voice_id: String,
    #[serde(default)]
    name: Option<String>,
    #[serde(default)]
    category: Option<String>,
    #[serde(default)]
    labels: BTreeMap<String, String>,
}

impl From<VoiceEntry> for VoiceInfo {
    fn from(entry: VoiceEntry) -> Self {
        Self {
            name: entry.name.unwrap_or_else(|| entry.voice_id.clone()),
            voice_id: entry.voice_id,
            category: entry.category,
            labels: entry.labels,
        }
    }
}

/// ElevenLabs 客户端配置
#[derive(Debug, Clone)]
pub struct ElevenLabsClientConfig {
    /// 服务基础 URL
    pub base_url: String,
    pub api_key: String,
    /// 合成模型
    pub model_id: String,
    /// 输出编码，如 mp3_44100_128
    pub output_format: String,
    /// 请求超时时间（秒）
    pub timeout_secs: u64,
}

impl Default for ElevenLabsClientConfig {
    fn default() -> Self {
        Self {
            base_url: "https://api.elevenlabs.io".to_string(),
            api_key: String::new(),
            model_id: "eleven_multilingual_v2".to_string(),
            output_format: "mp3_44100_128".to_string(),
            timeout_secs: 60,
        }
    }
}

impl ElevenLabsClientConfig {
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            ..Default::default()
        }
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    pub fn with_timeout(mut self, secs: u64) -> Self {
        self.timeout_secs = secs;
        self
    }
}

/// ElevenLabs TTS 客户端
pub struct ElevenLabsClient {
    client: Client,
    config: ElevenLabsClientConfig,
}

impl ElevenLabsClient {
    pub fn new(config: ElevenLabsClientConfig) -> Result<Self, TtsError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| TtsError::NetworkError(e.to_string()))?;

        Ok(Self { client, config })
    }

    fn base_url(&self) -> &str {
        self.config.base_url.trim_end_matches('/')
    }

    /// 获取合成 URL
    fn synthesis_url(&self, voice_id: &str) -> String {
        format!("{}/v1/text-to-speech/{}", self.base_url(), voice_id)
    }

    fn voices_url(&self) -> String {
        format!("{}/v1/voices", self.base_url())
    }
}

fn map_send_error(e: reqwest::Error) -> TtsError {
    if e.is_timeout() {
        TtsError::Timeout
    } else if e.is_connect() {
        TtsError::NetworkError(format!("Cannot connect to TTS service: {}", e))
    } else {
        TtsError::NetworkError(e.to_string())
    }
}

/// 从 ElevenLabs 错误体中提取可读信息
///
/// 常见格式: {"detail": {"status": "...", "message": "..."}} 或 {"detail": "..."}
fn extract_error_message(body: &str) -> String {
    serde_json::from_str::<serde_json::Value>(body)
        .ok()
        .and_then(|v| {
            let detail = v.get("detail")?;
            detail
                .get("message")
                .and_then(|m| m.as_str())
                .or_else(|| detail.as_str())
                .map(str::to_string)
        })
        .unwrap_or_else(|| body.to_string())
}

/// 将非 2xx 响应映射为 TtsError
fn map_error_status(status: StatusCode, body: &str) -> TtsError {
    let message = format!("HTTP {}: {}", status.as_u16(), extract_error_message(body));
    match status {
        StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => TtsError::Unauthorized(message),
        StatusCode::TOO_MANY_REQUESTS => TtsError::RateLimited(message),
        _ => TtsError::ServiceError(message),
    }
}

fn parse_voices(body: &str) -> Result<Vec<VoiceInfo>, TtsError> {
    let parsed: VoicesResponse = serde_json::from_str(body)
        .map_err(|e| TtsError::InvalidResponse(format!("Malformed voices body: {}", e)))?;
    Ok(parsed.voices.into_iter().map(VoiceInfo::from).collect())
}

#[async_trait]
impl TtsEnginePort for ElevenLabsClient {
    async fn synthesize(&self, request: SynthesisRequest) -> Result<SynthesisResponse, TtsError> {
        let url = self.synthesis_url(&request.voice_id);

        tracing::debug!(
            url = %url,
            text_len = request.text.len(),
            voice_id = %request.voice_id,
            "Sending TTS request"
        );

        let response = self
            .client
            .post(&url)
            .query(&[("output_format", self.config.output_format.as_str())])
            .header(XI_API_KEY_HEADER, &self.config.api_key)
            .header(reqwest::header::ACCEPT, "audio/mpeg")
            .json(&TextToSpeechBody {
                text: &request.text,
                model_id: &self.config.model_id,
            })
            .send()
            .await
            .map_err(map_send_error)?;

        let status = response.status();
        if !status.is_success() {
            let error_text = response.text().await.unwrap_or_default();
            return Err(map_error_status(status, &error_text));
        }

        // 从 headers 提取元数据
        let headers = response.headers();
        let request_id = headers
            .get("request-id")
            .and_then(|v| v.to_str().ok())
            .map(str::to_string);
        let content_type = headers
            .get(reqwest::header::CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .map(str::to_string);

        // 直接获取音频字节
        let audio_data = response
            .bytes()
            .await
            .map_err(|e| TtsError::InvalidResponse(format!("Failed to read audio: {}", e)))?
            .to_vec();

        tracing::info!(
            request_id = ?request_id,
            voice_id = %request.voice_id,
            audio_size = audio_data.len(),
            "TTS synthesis completed"
        );

        Ok(SynthesisResponse {
            request_id,
            audio_data,
            content_type,
        })
    }

    async fn list_voices(&self) -> Result<Vec<VoiceInfo>, TtsError> {
        let response = self
            .client
            .get(self.voices_url())
            .header(XI_API_KEY_HEADER, &self.config.api_key)
            .send()
            .await
            .map_err(map_send_error)?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| TtsError::InvalidResponse(format!("Failed to read voices: {}", e)))?;

        if !status.is_success() {
            return Err(map_error_status(status, &body));
        }

        parse_voices(&body)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_default() {
        let config = ElevenLabsClientConfig::default();
        assert_eq!(config.base_url, "https://api.elevenlabs.io");
        assert_eq!(config.output_format, "mp3_44100_128");
        assert_eq!(config.timeout_secs, 60);
    }

    #[test]
    fn test_urls() {
        let config = ElevenLabsClientConfig::new("key")
            .with_base_url("http://localhost:9000/")
            .with_timeout(5);
        let client = ElevenLabsClient::new(config).unwrap();
        assert_eq!(
            client.synthesis_url("abc123"),
            "http://localhost:9000/v1/text-to-speech/abc123"
        );
        assert_eq!(client.voices_url(), "http://localhost:9000/v1/voices");
    }

    #[test]
    fn test_parse_voices() {
        let body = r#"{
            "voices": [
                {"voice_id": "21m00Tcm4TlvDq8ikWAM", "name": "Rachel", "category": "premade",
                 "labels": {"gender": "female", "accent": "american"}},
                {"voice_id": "no-name"}
            ]
        }"#;
        let voices = parse_voices(body).unwrap();
        assert_eq!(voices.len(), 2);
        assert_eq!(voices[0].name, "Rachel");
        assert_eq!(voices[0].labels.get("gender").map(String::as_str), Some("female"));
        assert_eq!(voices[1].name, "no-name");
        assert_eq!(voices[1].category, None);
    }

    #[test]
    fn test_error_mapping() {
        let body = r#"{"detail": {"status": "quota_exceeded", "message": "This request exceeds your quota."}}"#;
        match map_error_status(StatusCode::UNAUTHORIZED, body) {
            TtsError::Unauthorized(msg) => {
                assert_eq!(msg, "HTTP 401: This request exceeds your quota.")
            }
            other => panic!("unexpected error: {:?}", other),
        }

        assert!(matches!(
            map_error_status(StatusCode::TOO_MANY_REQUESTS, r#"{"detail": "too many"}"#),
            TtsError::RateLimited(msg) if msg.ends_with("too many")
        ));
        assert!(matches!(
            map_error_status(StatusCode::INTERNAL_SERVER_ERROR, "plain text"),
            TtsError::ServiceError(msg) if msg == "HTTP 500: plain text"
        ));
    }
}
