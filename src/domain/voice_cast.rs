//! 声音分配
//!
//! 每个说话人对应一个固定的 TTS 音色 ID，只由 speaker 决定

use serde::Serialize;

use super::script::Speaker;

/// 默认主持人音色（女声，ElevenLabs "Rachel"）
pub const DEFAULT_HOST_VOICE_ID: &str = "21m00Tcm4TlvDq8ikWAM";

/// 默认嘉宾音色（男声，ElevenLabs "Adam"）
pub const DEFAULT_GUEST_VOICE_ID: &str = "pNInz6obpgDQGcFmaJgB";

/// 说话人 → 音色 ID 的两项映射
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct VoiceCast {
    host_voice_id: String,
    guest_voice_id: String,
}

impl VoiceCast {
    pub fn new(host_voice_id: impl Into<String>, guest_voice_id: impl Into<String>) -> Self {
        Self {
            host_voice_id: host_voice_id.into(),
            guest_voice_id: guest_voice_id.into(),
        }
    }

    pub fn voice_for(&self, speaker: Speaker) -> &str {
        match speaker {
            Speaker::Host => &self.host_voice_id,
            Speaker::Guest => &self.guest_voice_id,
        }
    }
}

impl Default for VoiceCast {
    fn default() -> Self {
        Self::new(DEFAULT_HOST_VOICE_ID, DEFAULT_GUEST_VOICE_ID)
    }
}
