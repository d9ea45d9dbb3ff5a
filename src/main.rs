//! Podcaster - 双人对话播客生成服务
//!
//! 主题 → LLM 脚本 → Host/Guest 片段 → 逐段 TTS → 顺序拼接

use std::sync::Arc;

use podcaster::application::{
    AudioConcatenatorPort, ScriptGenerationSettings, SynthesisSettings, TextGenerationPort,
    TtsEnginePort,
};
use podcaster::config::{load_config, print_config, AppConfig, LlmProvider, TtsProvider};
use podcaster::domain::script::PromptOptions;
use podcaster::domain::VoiceCast;
use podcaster::infrastructure::adapters::{
    ElevenLabsClient, ElevenLabsClientConfig, FakeScriptWriter, FakeTtsClient, OpenAiChatClient,
    OpenAiChatClientConfig, StreamConcatenator,
};
use podcaster::infrastructure::http::{AppState, HttpServer};

/// 初始化日志（RUST_LOG 优先于配置）
fn init_tracing(config: &AppConfig) {
    let log_filter = format!(
        "{},podcaster={},tower_http=debug",
        config.log.level, config.log.level
    );
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(&log_filter));

    if config.log.json {
        tracing_subscriber::fmt()
            .json()
            .with_env_filter(env_filter)
            .init();
    } else {
        tracing_subscriber::fmt().with_env_filter(env_filter).init();
    }
}

/// 按提供方类型创建文本生成引擎
fn build_text_generator(config: &AppConfig) -> anyhow::Result<Arc<dyn TextGenerationPort>> {
    Ok(match config.llm.provider {
        LlmProvider::OpenAi => {
            let client_config = OpenAiChatClientConfig {
                base_url: config.llm.base_url.clone(),
                api_key: config.llm.api_key.clone(),
                model: config.llm.model.clone(),
                timeout_secs: config.llm.timeout_secs,
            };
            Arc::new(OpenAiChatClient::new(client_config)?)
        }
        LlmProvider::Fake => {
            tracing::warn!("Using offline script writer (llm.provider = fake)");
            Arc::new(FakeScriptWriter::new())
        }
    })
}

/// 按提供方类型创建 TTS 引擎
fn build_tts_engine(config: &AppConfig) -> anyhow::Result<Arc<dyn TtsEnginePort>> {
    Ok(match config.tts.provider {
        TtsProvider::ElevenLabs => {
            let client_config = ElevenLabsClientConfig {
                base_url: config.tts.base_url.clone(),
                api_key: config.tts.api_key.clone(),
                model_id: config.tts.model_id.clone(),
                output_format: config.tts.output_format.clone(),
                timeout_secs: config.tts.timeout_secs,
            };
            Arc::new(ElevenLabsClient::new(client_config)?)
        }
        TtsProvider::Fake => {
            tracing::warn!("Using offline TTS engine (tts.provider = fake)");
            Arc::new(FakeTtsClient::default())
        }
    })
}

fn build_state(config: &AppConfig) -> anyhow::Result<AppState> {
    let text_generator = build_text_generator(config)?;
    let tts_engine = build_tts_engine(config)?;
    let concatenator: Arc<dyn AudioConcatenatorPort> =
        Arc::new(StreamConcatenator::new(config.audio.output_format));

    let voice_cast = VoiceCast::new(&config.tts.host_voice_id, &config.tts.guest_voice_id);

    let script_settings = ScriptGenerationSettings {
        prompt: PromptOptions {
            target_words: config.script.target_words,
        },
        max_topic_chars: config.script.max_topic_chars,
        temperature: Some(config.llm.temperature),
        max_tokens: Some(config.llm.max_tokens),
    };

    let synthesis_settings = SynthesisSettings {
        max_concurrency: config.tts.max_concurrency,
        max_segments: config.tts.max_segments,
        max_segment_chars: config.tts.max_segment_chars,
    };

    Ok(AppState::new(
        text_generator,
        tts_engine,
        concatenator,
        voice_cast,
        script_settings,
        synthesis_settings,
    ))
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "Failed to listen for ctrl-c");
        return;
    }
    tracing::info!("Received shutdown signal");
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // 加载配置（优先级：环境变量 > 配置文件 > 通用环境变量 > 默认值）
    let config = load_config().map_err(|e| anyhow::anyhow!("Failed to load config: {}", e))?;

    init_tracing(&config);

    tracing::info!("Podcaster - AI podcast generator");
    print_config(&config);

    let state = build_state(&config)?;
    let server = HttpServer::new(config.server.clone(), state);

    server.run_with_shutdown(shutdown_signal()).await?;

    tracing::info!("Server shutdown complete");

    Ok(())
}
