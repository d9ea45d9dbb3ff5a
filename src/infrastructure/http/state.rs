//! Application State
//!
//! 包含所有 Command/Query Handlers 的应用状态

use std::sync::Arc;

use crate::application::{
    // Handlers
    GeneratePodcastAudioHandler, GenerateScriptHandler, ListVoicesHandler,
    // Settings
    ScriptGenerationSettings, SynthesisSettings,
    // Ports
    AudioConcatenatorPort, TextGenerationPort, TtsEnginePort,
};
use crate::domain::VoiceCast;

/// 应用状态
///
/// 所有端口在启动时构建一次，请求之间只读共享
pub struct AppState {
    // ========== Command Handlers ==========
    pub generate_script_handler: GenerateScriptHandler,
    pub generate_audio_handler: GeneratePodcastAudioHandler,

    // ========== Query Handlers ==========
    pub list_voices_handler: ListVoicesHandler,
}

impl AppState {
    /// 创建应用状态
    pub fn new(
        text_generator: Arc<dyn TextGenerationPort>,
        tts_engine: Arc<dyn TtsEnginePort>,
        concatenator: Arc<dyn AudioConcatenatorPort>,
        voice_cast: VoiceCast,
        script_settings: ScriptGenerationSettings,
        synthesis_settings: SynthesisSettings,
    ) -> Self {
        Self {
            generate_script_handler: GenerateScriptHandler::new(
                text_generator,
                script_settings,
            ),
            generate_audio_handler: GeneratePodcastAudioHandler::new(
                tts_engine.clone(),
                concatenator,
                voice_cast,
                synthesis_settings,
            ),

            list_voices_handler: ListVoicesHandler::new(tts_engine),
        }
    }

    /// 使用默认音色与参数创建
    pub fn with_defaults(
        text_generator: Arc<dyn TextGenerationPort>,
        tts_engine: Arc<dyn TtsEnginePort>,
        concatenator: Arc<dyn AudioConcatenatorPort>,
    ) -> Self {
        Self::new(
            text_generator,
            tts_engine,
            concatenator,
            VoiceCast::default(),
            ScriptGenerationSettings::default(),
            SynthesisSettings::default(),
        )
    }
}
