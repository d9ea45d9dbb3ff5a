//! Voice Query Handlers

use std::sync::Arc;

use crate::application::error::ApplicationError;
use crate::application::ports::{TtsEnginePort, VoiceInfo};
use crate::application::queries::ListVoices;

/// ListVoices Handler - 透传提供方音色列表（调试用）
pub struct ListVoicesHandler {
    tts_engine: Arc<dyn TtsEnginePort>,
}

impl ListVoicesHandler {
    pub fn new(tts_engine: Arc<dyn TtsEnginePort>) -> Self {
        Self { tts_engine }
    }

    pub async fn handle(&self, _query: ListVoices) -> Result<Vec<VoiceInfo>, ApplicationError> {
        let mut voices = self.tts_engine.list_voices().await.map_err(|e| {
            tracing::error!(error = %e, "Failed to list provider voices");
            ApplicationError::from(e)
        })?;
        voices.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(voices)
    }
}
