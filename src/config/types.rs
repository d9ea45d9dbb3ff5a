//! Configuration Types
//!
//! 定义所有配置结构体

use serde::Deserialize;

use crate::application::ports::AudioFormat;
use crate::domain::{DEFAULT_GUEST_VOICE_ID, DEFAULT_HOST_VOICE_ID};

/// 应用主配置
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AppConfig {
    /// 服务器配置
    #[serde(default)]
    pub server: ServerConfig,

    /// 文本生成配置
    #[serde(default)]
    pub llm: LlmConfig,

    /// TTS 引擎配置
    #[serde(default)]
    pub tts: TtsConfig,

    /// 音频配置
    #[serde(default)]
    pub audio: AudioConfig,

    /// 脚本配置
    #[serde(default)]
    pub script: ScriptConfig,

    /// 日志配置
    #[serde(default)]
    pub log: LogConfig,
}

/// 服务器配置
#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    /// 监听地址
    #[serde(default = "default_host")]
    pub host: String,

    /// 监听端口
    #[serde(default = "default_port")]
    pub port: u16,

    /// 允许的跨域来源（前端地址），未设置时允许任意来源
    #[serde(default)]
    pub cors_origin: Option<String>,

    /// 请求体最大字节数
    #[serde(default = "default_max_body_bytes")]
    pub max_body_bytes: usize,
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    8000
}

fn default_max_body_bytes() -> usize {
    2 * 1024 * 1024 // 2 MiB
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            cors_origin: None,
            max_body_bytes: default_max_body_bytes(),
        }
    }
}

impl ServerConfig {
    /// 获取服务器地址
    pub fn addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

/// 文本生成提供方
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LlmProvider {
    #[default]
    OpenAi,
    /// 离线模板脚本
    Fake,
}

/// 文本生成配置
#[derive(Debug, Clone, Deserialize)]
pub struct LlmConfig {
    #[serde(default)]
    pub provider: LlmProvider,

    /// OpenAI 兼容 API 基础 URL
    #[serde(default = "default_llm_base_url")]
    pub base_url: String,

    #[serde(default)]
    pub api_key: String,

    #[serde(default = "default_llm_model")]
    pub model: String,

    #[serde(default = "default_temperature")]
    pub temperature: f32,

    #[serde(default = "default_max_tokens")]
    pub max_tokens: u32,

    /// 请求超时时间（秒）
    #[serde(default = "default_timeout")]
    pub timeout_secs: u64,
}

fn default_llm_base_url() -> String {
    "https://api.openai.com/v1".to_string()
}

fn default_llm_model() -> String {
    "gpt-4o-mini".to_string()
}

fn default_temperature() -> f32 {
    0.8
}

fn default_max_tokens() -> u32 {
    1500
}

fn default_timeout() -> u64 {
    60
}

impl Default for LlmConfig {
    fn default() -> Self {
        Self {
            provider: LlmProvider::default(),
            base_url: default_llm_base_url(),
            api_key: String::new(),
            model: default_llm_model(),
            temperature: default_temperature(),
            max_tokens: default_max_tokens(),
            timeout_secs: default_timeout(),
        }
    }
}

/// TTS 提供方
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TtsProvider {
    #[default]
    ElevenLabs,
    /// 离线静音 MP3
    Fake,
}

/// TTS 引擎配置
#[derive(Debug, Clone, Deserialize)]
pub struct TtsConfig {
    #[serde(default)]
    pub provider: TtsProvider,

    /// TTS 服务基础 URL
    #[serde(default = "default_tts_base_url")]
    pub base_url: String,

    #[serde(default)]
    pub api_key: String,

    #[serde(default = "default_tts_model_id")]
    pub model_id: String,

    /// 提供方输出编码
    #[serde(default = "default_tts_output_format")]
    pub output_format: String,

    /// 主持人音色
    #[serde(default = "default_host_voice_id")]
    pub host_voice_id: String,

    /// 嘉宾音色
    #[serde(default = "default_guest_voice_id")]
    pub guest_voice_id: String,

    /// 请求超时时间（秒）
    #[serde(default = "default_timeout")]
    pub timeout_secs: u64,

    /// 同时进行的合成请求数
    #[serde(default = "default_max_concurrency")]
    pub max_concurrency: usize,

    #[serde(default = "default_max_segments")]
    pub max_segments: usize,

    #[serde(default = "default_max_segment_chars")]
    pub max_segment_chars: usize,
}

fn default_tts_base_url() -> String {
    "https://api.elevenlabs.io".to_string()
}

fn default_tts_model_id() -> String {
    "eleven_multilingual_v2".to_string()
}

fn default_tts_output_format() -> String {
    "mp3_44100_128".to_string()
}

fn default_host_voice_id() -> String {
    DEFAULT_HOST_VOICE_ID.to_string()
}

fn default_guest_voice_id() -> String {
    DEFAULT_GUEST_VOICE_ID.to_string()
}

fn default_max_concurrency() -> usize {
    1
}

fn default_max_segments() -> usize {
    200
}

fn default_max_segment_chars() -> usize {
    5000
}

impl Default for TtsConfig {
    fn default() -> Self {
        Self {
            provider: TtsProvider::default(),
            base_url: default_tts_base_url(),
            api_key: String::new(),
            model_id: default_tts_model_id(),
            output_format: default_tts_output_format(),
            host_voice_id: default_host_voice_id(),
            guest_voice_id: default_guest_voice_id(),
            timeout_secs: default_timeout(),
            max_concurrency: default_max_concurrency(),
            max_segments: default_max_segments(),
            max_segment_chars: default_max_segment_chars(),
        }
    }
}

/// 音频配置
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AudioConfig {
    /// 交付格式
    /// 可选: mp3, wav
    #[serde(default)]
    pub output_format: AudioFormat,
}

/// 脚本配置
#[derive(Debug, Clone, Deserialize)]
pub struct ScriptConfig {
    /// 目标字数
    #[serde(default = "default_target_words")]
    pub target_words: usize,

    /// 主题最大字符数
    #[serde(default = "default_max_topic_chars")]
    pub max_topic_chars: usize,
}

fn default_target_words() -> usize {
    crate::domain::script::DEFAULT_TARGET_WORDS
}

fn default_max_topic_chars() -> usize {
    500
}

impl Default for ScriptConfig {
    fn default() -> Self {
        Self {
            target_words: default_target_words(),
            max_topic_chars: default_max_topic_chars(),
        }
    }
}

/// 日志配置
#[derive(Debug, Clone, Deserialize)]
pub struct LogConfig {
    /// 日志级别
    #[serde(default = "default_log_level")]
    pub level: String,

    /// 是否启用 JSON 格式
    #[serde(default)]
    pub json: bool,
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            json: false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = AppConfig::default();
        assert_eq!(config.server.host, "0.0.0.0");
        assert_eq!(config.server.port, 8000);
        assert_eq!(config.server.max_body_bytes, 2 * 1024 * 1024);
        assert_eq!(config.llm.provider, LlmProvider::OpenAi);
        assert_eq!(config.llm.model, "gpt-4o-mini");
        assert_eq!(config.tts.provider, TtsProvider::ElevenLabs);
        assert_eq!(config.tts.host_voice_id, DEFAULT_HOST_VOICE_ID);
        assert_eq!(config.tts.max_concurrency, 1);
        assert_eq!(config.audio.output_format, AudioFormat::Mp3);
        assert_eq!(config.script.target_words, 500);
    }

    #[test]
    fn test_server_addr() {
        let config = ServerConfig::default();
        assert_eq!(config.addr(), "0.0.0.0:8000");
    }
}
