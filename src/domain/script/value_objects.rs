//! Script Context - Value Objects

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use super::ScriptError;

/// 说话人
///
/// 线上格式严格为 `"Host"` / `"Guest"`（区分大小写）
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Speaker {
    Host,
    Guest,
}

impl Speaker {
    pub const ALL: [Speaker; 2] = [Speaker::Host, Speaker::Guest];

    /// 脚本中的标签文本
    pub fn label(&self) -> &'static str {
        match self {
            Speaker::Host => "Host",
            Speaker::Guest => "Guest",
        }
    }
}

impl fmt::Display for Speaker {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for Speaker {
    type Err = ScriptError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Host" => Ok(Speaker::Host),
            "Guest" => Ok(Speaker::Guest),
            other => Err(ScriptError::UnknownSpeaker(other.to_string())),
        }
    }
}

/// 对话片段 - 一个说话人的一轮发言
///
/// 不变量:
/// - text 去除首尾空白后非空
/// - 在序列中的位置即播放顺序
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Segment {
    pub speaker: Speaker,
    pub text: String,
}

impl Segment {
    /// 创建片段，文本会被 trim，空白文本返回错误
    pub fn new(speaker: Speaker, text: impl Into<String>) -> Result<Self, ScriptError> {
        let text = text.into();
        let trimmed = text.trim();
        if trimmed.is_empty() {
            return Err(ScriptError::EmptyText);
        }
        Ok(Self {
            speaker,
            text: trimmed.to_string(),
        })
    }

    /// 以脚本行格式输出：`<Speaker>: <text>`
    pub fn to_script_line(&self) -> String {
        format!("{}: {}", self.speaker, self.text)
    }
}

/// 脚本生成结果
///
/// 每次请求创建一次，之后不可变，不落盘
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScriptResult {
    raw_text: String,
    segments: Vec<Segment>,
}

impl ScriptResult {
    pub fn new(raw_text: impl Into<String>, segments: Vec<Segment>) -> Self {
        Self {
            raw_text: raw_text.into(),
            segments,
        }
    }

    pub fn raw_text(&self) -> &str {
        &self.raw_text
    }

    pub fn segments(&self) -> &[Segment] {
        &self.segments
    }

    /// 脚本可用于合成音频（至少有一个片段）
    pub fn is_playable(&self) -> bool {
        !self.segments.is_empty()
    }

    pub fn into_parts(self) -> (String, Vec<Segment>) {
        (self.raw_text, self.segments)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_speaker_from_str_is_case_sensitive() {
        assert_eq!("Host".parse::<Speaker>().unwrap(), Speaker::Host);
        assert_eq!("Guest".parse::<Speaker>().unwrap(), Speaker::Guest);
        assert!("host".parse::<Speaker>().is_err());
        assert!("Narrator".parse::<Speaker>().is_err());
    }

    #[test]
    fn test_speaker_serde_wire_format() {
        let json = serde_json::to_string(&Speaker::Guest).unwrap();
        assert_eq!(json, "\"Guest\"");
        let speaker: Speaker = serde_json::from_str("\"Host\"").unwrap();
        assert_eq!(speaker, Speaker::Host);
    }

    #[test]
    fn test_segment_rejects_blank_text() {
        assert!(Segment::new(Speaker::Host, "   \n\t").is_err());
        let segment = Segment::new(Speaker::Host, "  Hi  ").unwrap();
        assert_eq!(segment.text, "Hi");
        assert_eq!(segment.to_script_line(), "Host: Hi");
    }

    #[test]
    fn test_script_result_playable() {
        let empty = ScriptResult::new("no labels here", vec![]);
        assert!(!empty.is_playable());
        assert_eq!(empty.raw_text(), "no labels here");
    }
}
