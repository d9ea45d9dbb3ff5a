//! Audio Concatenator Port - 音频拼接抽象
//!
//! 将逐段合成的音频按顺序拼接为一个可播放的音频流

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::domain::script::Speaker;

/// 拼接错误
#[derive(Debug, Error)]
pub enum ConcatError {
    #[error("No audio chunks to concatenate")]
    EmptyInput,

    #[error("Invalid input in chunk {index}: {reason}")]
    InvalidInput { index: usize, reason: String },

    #[error("Decoding error in chunk {index}: {reason}")]
    DecodingError { index: usize, reason: String },

    #[error("Encoding error: {0}")]
    EncodingError(String),
}

/// 音频交付格式
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum AudioFormat {
    /// MP3 帧级直接拼接，不重新编码
    #[default]
    Mp3,
    /// 解码为 PCM 后重新编码为 16 位 WAV
    Wav,
}

impl AudioFormat {
    pub fn content_type(&self) -> &'static str {
        match self {
            AudioFormat::Mp3 => "audio/mpeg",
            AudioFormat::Wav => "audio/wav",
        }
    }

    pub fn extension(&self) -> &'static str {
        match self {
            AudioFormat::Mp3 => "mp3",
            AudioFormat::Wav => "wav",
        }
    }
}

impl std::fmt::Display for AudioFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.extension())
    }
}

impl std::str::FromStr for AudioFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "mp3" | "mpeg" => Ok(AudioFormat::Mp3),
            "wav" => Ok(AudioFormat::Wav),
            _ => Err(format!("Unsupported audio format: {}", s)),
        }
    }
}

/// 单个片段的合成音频
#[derive(Debug, Clone)]
pub struct AudioChunk {
    /// 对应片段在输入中的位置
    pub index: usize,
    pub speaker: Speaker,
    pub data: Vec<u8>,
    pub content_type: Option<String>,
}

/// 拼接后的完整播客音频
#[derive(Debug, Clone)]
pub struct PodcastAudio {
    pub data: Vec<u8>,
    pub format: AudioFormat,
    /// 参与拼接的片段数
    pub segment_count: usize,
    /// 时长（毫秒），仅在解码过 PCM 时可知
    pub duration_ms: Option<u64>,
}

impl PodcastAudio {
    pub fn content_type(&self) -> &'static str {
        self.format.content_type()
    }
}

/// Audio Concatenator Port
///
/// CPU 密集操作，调用方应在阻塞线程池中执行
pub trait AudioConcatenatorPort: Send + Sync {
    /// 按输入顺序拼接音频片段
    ///
    /// 空输入视为调用方违反不变量，返回 `ConcatError::EmptyInput`
    fn concat(&self, chunks: &[AudioChunk]) -> Result<PodcastAudio, ConcatError>;

    /// 输出格式
    fn output_format(&self) -> AudioFormat;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_parse_and_mime() {
        assert_eq!("MP3".parse::<AudioFormat>().unwrap(), AudioFormat::Mp3);
        assert_eq!("wav".parse::<AudioFormat>().unwrap(), AudioFormat::Wav);
        assert!("opus".parse::<AudioFormat>().is_err());
        assert_eq!(AudioFormat::Mp3.content_type(), "audio/mpeg");
        assert_eq!(AudioFormat::default(), AudioFormat::Mp3);
    }
}
