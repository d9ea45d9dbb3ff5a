//! 应用层 - 用例编排
//!
//! 包含：
//! - ports: 六边形架构端口定义（TextGeneration、TtsEngine、AudioConcatenator）
//! - commands: 脚本生成 / 音频合成命令及处理器
//! - queries: 音色列表查询及处理器
//! - error: 应用层错误定义

pub mod commands;
pub mod error;
pub mod ports;
pub mod queries;

// Re-exports
pub use commands::{
    GeneratePodcastAudioCommand,
    GenerateScriptCommand,
    ScriptGenerationSettings,
    SegmentInput,
    SynthesisSettings,
    // Handlers
    handlers::{GeneratePodcastAudioHandler, GenerateScriptHandler},
};

pub use error::ApplicationError;

pub use ports::{
    // Audio concatenator
    AudioChunk,
    AudioConcatenatorPort,
    AudioFormat,
    ConcatError,
    PodcastAudio,
    // Text generation
    CompletionRequest,
    CompletionResponse,
    LlmError,
    TextGenerationPort,
    // TTS engine
    SynthesisRequest,
    SynthesisResponse,
    TtsEnginePort,
    TtsError,
    VoiceInfo,
};

pub use queries::{handlers::ListVoicesHandler, ListVoices};
