//! Voice Queries

/// 列出 TTS 提供方的所有音色
#[derive(Debug, Clone, Default)]
pub struct ListVoices;
