//! Podcast Commands - 播客音频合成命令

/// 调用方提交的片段（speaker 尚未校验）
#[derive(Debug, Clone)]
pub struct SegmentInput {
    pub speaker: String,
    pub text: String,
}

impl SegmentInput {
    pub fn new(speaker: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            speaker: speaker.into(),
            text: text.into(),
        }
    }
}

/// 生成播客音频命令
#[derive(Debug, Clone)]
pub struct GeneratePodcastAudioCommand {
    pub segments: Vec<SegmentInput>,
}

/// 合成参数
#[derive(Debug, Clone)]
pub struct SynthesisSettings {
    /// 同时进行的 TTS 调用数，1 表示严格串行
    pub max_concurrency: usize,
    /// 单次请求最多片段数
    pub max_segments: usize,
    /// 单个片段最大字符数
    pub max_segment_chars: usize,
}

impl Default for SynthesisSettings {
    fn default() -> Self {
        Self {
            max_concurrency: 1,
            max_segments: 200,
            max_segment_chars: 5000,
        }
    }
}
