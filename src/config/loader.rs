//! Configuration Loader
//!
//! 实现多源配置加载与合并逻辑
//!
//! 优先级（从高到低）：
//! 1. 环境变量（PODCAST_ 前缀）
//! 2. 配置文件（config.toml）
//! 3. 通用提供方环境变量（OPENAI_API_KEY 等）
//! 4. 默认值

use config::{Config, ConfigError as ConfigCrateError, Environment, File};
use std::path::Path;
use thiserror::Error;

use super::types::{AppConfig, LlmProvider, TtsProvider};

/// 配置加载错误
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to load configuration: {0}")]
    LoadError(String),

    #[error("Failed to parse configuration: {0}")]
    ParseError(String),

    #[error("Configuration validation failed: {0}")]
    ValidationError(String),
}

impl From<ConfigCrateError> for ConfigError {
    fn from(err: ConfigCrateError) -> Self {
        ConfigError::LoadError(err.to_string())
    }
}

/// 配置文件搜索路径
const CONFIG_FILE_NAMES: &[&str] = &["config", "config.local"];

/// 作为兜底的通用环境变量 → 配置键
const WELL_KNOWN_ENV: &[(&str, &str)] = &[
    ("OPENAI_API_KEY", "llm.api_key"),
    ("ELEVENLABS_API_KEY", "tts.api_key"),
    ("FRONTEND_URL", "server.cors_origin"),
];

/// 加载应用配置
///
/// # 环境变量示例
/// - `PODCAST_SERVER__PORT=8080`
/// - `PODCAST_LLM__PROVIDER=fake`
/// - `PODCAST_TTS__HOST_VOICE_ID=21m00Tcm4TlvDq8ikWAM`
/// - `PODCAST_AUDIO__OUTPUT_FORMAT=wav`
pub fn load_config() -> Result<AppConfig, ConfigError> {
    load_config_from_path(None)
}

/// 从指定路径加载配置
///
/// # 参数
/// - `config_path` - 可选的配置文件路径，如果为 None 则使用默认搜索路径
pub fn load_config_from_path(config_path: Option<&Path>) -> Result<AppConfig, ConfigError> {
    let mut builder = Config::builder();

    // 1. 默认值（最低优先级）
    builder = builder
        .set_default("server.host", "0.0.0.0")?
        .set_default("server.port", 8000)?
        .set_default("server.max_body_bytes", 2 * 1024 * 1024)?
        .set_default("llm.provider", "openai")?
        .set_default("llm.base_url", "https://api.openai.com/v1")?
        .set_default("llm.model", "gpt-4o-mini")?
        .set_default("llm.temperature", 0.8)?
        .set_default("llm.max_tokens", 1500)?
        .set_default("llm.timeout_secs", 60)?
        .set_default("tts.provider", "elevenlabs")?
        .set_default("tts.base_url", "https://api.elevenlabs.io")?
        .set_default("tts.model_id", "eleven_multilingual_v2")?
        .set_default("tts.output_format", "mp3_44100_128")?
        .set_default("tts.timeout_secs", 60)?
        .set_default("tts.max_concurrency", 1)?
        .set_default("audio.output_format", "mp3")?
        .set_default("log.level", "info")?
        .set_default("log.json", false)?;

    // 2. 通用提供方环境变量，作为默认值的一部分，可被配置文件和 PODCAST_ 变量覆盖
    for (var, key) in WELL_KNOWN_ENV {
        if let Ok(value) = std::env::var(var) {
            if !value.trim().is_empty() {
                builder = builder.set_default(*key, value)?;
            }
        }
    }

    // 3. 配置文件（如果存在）
    if let Some(path) = config_path {
        builder = builder.add_source(File::from(path).required(true));
    } else {
        for name in CONFIG_FILE_NAMES {
            builder = builder.add_source(File::with_name(name).required(false));
        }
    }

    // 4. 环境变量（最高优先级）
    // 前缀: PODCAST_
    // 层级分隔符: __ (双下划线)
    builder = builder.add_source(
        Environment::with_prefix("PODCAST")
            .prefix_separator("_")
            .separator("__")
            .try_parsing(true),
    );

    let config = builder.build()?;

    let app_config: AppConfig = config.try_deserialize().map_err(|e| {
        ConfigError::ParseError(format!("Failed to deserialize config: {}", e))
    })?;

    validate_config(&app_config)?;

    Ok(app_config)
}

fn require_non_empty(value: &str, what: &str) -> Result<(), ConfigError> {
    if value.trim().is_empty() {
        return Err(ConfigError::ValidationError(format!("{} cannot be empty", what)));
    }
    Ok(())
}

/// 验证配置有效性
fn validate_config(config: &AppConfig) -> Result<(), ConfigError> {
    if config.server.port == 0 {
        return Err(ConfigError::ValidationError(
            "Server port cannot be 0".to_string(),
        ));
    }

    if config.llm.provider != LlmProvider::Fake {
        require_non_empty(&config.llm.base_url, "LLM base URL")?;
        require_non_empty(
            &config.llm.api_key,
            "LLM API key (set OPENAI_API_KEY or llm.api_key)",
        )?;
    }

    if config.tts.provider != TtsProvider::Fake {
        require_non_empty(&config.tts.base_url, "TTS base URL")?;
        require_non_empty(
            &config.tts.api_key,
            "TTS API key (set ELEVENLABS_API_KEY or tts.api_key)",
        )?;
    }

    require_non_empty(&config.tts.host_voice_id, "Host voice id")?;
    require_non_empty(&config.tts.guest_voice_id, "Guest voice id")?;

    if config.tts.max_concurrency == 0 {
        return Err(ConfigError::ValidationError(
            "TTS max_concurrency must be at least 1".to_string(),
        ));
    }

    if config.tts.max_segments == 0 {
        return Err(ConfigError::ValidationError(
            "TTS max_segments must be at least 1".to_string(),
        ));
    }

    if config.script.target_words == 0 {
        return Err(ConfigError::ValidationError(
            "Script target_words must be greater than 0".to_string(),
        ));
    }

    Ok(())
}

/// 隐藏密钥，只保留末尾 4 个字符
fn mask_secret(secret: &str) -> String {
    let chars: Vec<char> = secret.chars().collect();
    match chars.len() {
        0 => "<unset>".to_string(),
        n if n <= 8 => "****".to_string(),
        n => format!("****{}", chars[n - 4..].iter().collect::<String>()),
    }
}

/// 打印配置信息（用于启动时日志）
pub fn print_config(config: &AppConfig) {
    tracing::info!("=== Application Configuration ===");
    tracing::info!("Server: {}", config.server.addr());
    tracing::info!(
        "CORS Origin: {}",
        config.server.cors_origin.as_deref().unwrap_or("*")
    );
    tracing::info!("Max Body: {} bytes", config.server.max_body_bytes);
    tracing::info!("LLM Provider: {:?}", config.llm.provider);
    if config.llm.provider != LlmProvider::Fake {
        tracing::info!("LLM URL: {}", config.llm.base_url);
        tracing::info!("LLM Model: {}", config.llm.model);
        tracing::info!("LLM API Key: {}", mask_secret(&config.llm.api_key));
    }
    tracing::info!("TTS Provider: {:?}", config.tts.provider);
    if config.tts.provider != TtsProvider::Fake {
        tracing::info!("TTS URL: {}", config.tts.base_url);
        tracing::info!("TTS Model: {}", config.tts.model_id);
        tracing::info!("TTS API Key: {}", mask_secret(&config.tts.api_key));
    }
    tracing::info!(
        "Voices: host={} guest={}",
        config.tts.host_voice_id,
        config.tts.guest_voice_id
    );
    tracing::info!("TTS Concurrency: {}", config.tts.max_concurrency);
    tracing::info!("Audio Output: {}", config.audio.output_format);
    tracing::info!("Script Target Words: {}", config.script.target_words);
    tracing::info!("Log Level: {}", config.log.level);
    tracing::info!("=================================");
}
