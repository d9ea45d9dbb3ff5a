//! Application Ports - 出站端口定义
//!
//! 定义应用层与基础设施层的抽象接口

mod audio_concatenator;
mod text_generation;
mod tts_engine;

pub use audio_concatenator::{
    AudioChunk, AudioConcatenatorPort, AudioFormat, ConcatError, PodcastAudio,
};
pub use text_generation::{CompletionRequest, CompletionResponse, LlmError, TextGenerationPort};
pub use tts_engine::{SynthesisRequest, SynthesisResponse, TtsEnginePort, TtsError, VoiceInfo};
